// ==========================================
// 月度目标日计划分解系统 - 引擎错误类型
// ==========================================
// 依据: Allocation_Specs - 7. 错误处理设计
// 工具: thiserror 派生宏
// ==========================================
// 说明: 引擎无 I/O, 所有失败都是输入/配置契约违规,
// 同样输入重试必然同样失败, 因此不设重试逻辑
// ==========================================

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::types::MonthKey;

/// 分配引擎错误类型
#[derive(Error, Debug)]
pub enum AllocationError {
    // ===== 范围错误 =====
    #[error("无效的日期范围: start={start} > end={end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("日期范围过长: {days} 天, 上限 {max_days} 天")]
    RangeTooLong { days: i64, max_days: i64 },

    // ===== 数据完整性错误 =====
    #[error("日历数据缺失: {date} 无 CalendarDay 记录")]
    MissingCalendarData { date: NaiveDate },

    #[error("月度目标缺失: {month} 无 MonthlyTarget 记录")]
    MissingTarget { month: MonthKey },

    // ===== 配置错误 =====
    #[error("无效配置: {message}")]
    InvalidConfig { message: String },
}

impl AllocationError {
    /// 配置错误的便捷构造
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_readable() {
        let e = AllocationError::MissingTarget {
            month: MonthKey::new(2026, 5),
        };
        assert!(e.to_string().contains("2026-05"));

        let e = AllocationError::invalid_config("relative_cap 不能为负");
        assert!(e.to_string().contains("relative_cap"));
    }
}
