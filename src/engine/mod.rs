// ==========================================
// 月度目标日计划分解系统 - 引擎层
// ==========================================
// 依据: Allocation_Specs - 2. 系统总览 (依赖顺序, 叶子优先)
// ==========================================
// 职责: 实现分配与平滑的业务规则引擎
// 红线: 引擎无状态、无 I/O, 全部数据经 providers 注入
// ==========================================

pub mod bridge;
pub mod day_weight;
pub mod distributor;
pub mod global_smooth;
pub mod intraweek;
pub mod orchestrator;
pub mod providers;
pub mod rescale;
pub mod rolling;
pub mod weekly;

// 重导出核心引擎
pub use bridge::CrossPeriodBridgeSmoother;
pub use day_weight::DayWeightComposer;
pub use distributor::MonthlyDistributor;
pub use global_smooth::GlobalSmoother;
pub use intraweek::IntraweekSmoother;
pub use orchestrator::{TargetAllocationOrchestrator, MAX_RANGE_DAYS};
pub use providers::{
    AllocationProviders, CalendarClassifier, HistoricalProfileProvider, InMemoryCalendar,
    InMemoryProfile, InMemoryTargets, MonthlyTargetProvider,
};
pub use weekly::WeeklyNormalizer;
