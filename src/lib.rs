// ==========================================
// 月度目标日计划分解系统 - 核心库
// ==========================================
// 依据: Allocation_Specs - 分层目标分配与平滑引擎
// 系统定位: 纯内存批计算, 无 I/O、无持久化
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 配置层 - 分配配置
pub mod config;

// 引擎层 - 分配与平滑规则
pub mod engine;

// 错误类型
pub mod error;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{
    DayScope, DayType, GlobalSmootherKind, MonthKey, ProfileScope, SmoothMethod, WeekKey,
};

// 领域实体
pub use domain::{ActivityProfile, CalendarDay, DailyPlanItem, DailyWeight, WeeklyBucket};

// 配置
pub use config::AllocationConfig;

// 引擎
pub use engine::{
    AllocationProviders, CalendarClassifier, CrossPeriodBridgeSmoother, DayWeightComposer,
    GlobalSmoother, HistoricalProfileProvider, InMemoryCalendar, InMemoryProfile, InMemoryTargets,
    IntraweekSmoother, MonthlyDistributor, MonthlyTargetProvider, TargetAllocationOrchestrator,
    WeeklyNormalizer,
};

// 错误
pub use error::AllocationError;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "月度目标日计划分解系统";

// ==========================================
// 预编译检查
// ==========================================
