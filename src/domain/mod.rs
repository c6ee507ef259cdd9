// ==========================================
// 月度目标日计划分解系统 - 领域模型层
// ==========================================
// 依据: Allocation_Specs - 3. 数据模型
// ==========================================
// 职责: 定义领域实体与类型
// 红线: 不含数据访问逻辑, 不含引擎逻辑
// ==========================================

pub mod calendar;
pub mod plan;
pub mod profile;
pub mod types;

// 重导出核心类型
pub use calendar::CalendarDay;
pub use plan::{DailyPlanItem, DailyWeight, WeeklyBucket};
pub use profile::ActivityProfile;
pub use types::{
    DayScope, DayType, GlobalSmootherKind, MonthKey, ProfileScope, SmoothMethod, WeekKey,
};
