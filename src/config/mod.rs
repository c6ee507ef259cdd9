// ==========================================
// 月度目标日计划分解系统 - 配置层
// ==========================================
// 依据: Allocation_Specs - 6. 外部接口
// ==========================================
// 职责: 分配配置的定义、校验与快照
// ==========================================

pub mod allocation_config;

// 重导出核心配置
pub use allocation_config::AllocationConfig;
