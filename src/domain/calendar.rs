// ==========================================
// 月度目标日计划分解系统 - 日历领域模型
// ==========================================
// 依据: Allocation_Specs - 3. 数据模型 (CalendarDay)
// 红线: 日历属性由外部分类器提供, 引擎只读不改
// ==========================================

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::types::DayType;

// ==========================================
// CalendarDay - 日历日
// ==========================================
// 请求范围内每个日期一条, 不可变
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarDay {
    pub date: NaiveDate,   // 日期
    pub iso_year: i32,     // ISO 周年 (年末年初可能与自然年不同)
    pub iso_week: u32,     // ISO 周号 (1-53)
    pub iso_dow: u32,      // ISO 星期 (1=周一 .. 7=周日)
    pub is_business: bool, // 是否开放活动 (开放的周日也为 true)
    pub is_holiday: bool,  // 是否节假日
    pub day_type: DayType, // 日类型 (OPEN/CLOSED/MAINTENANCE)
}

impl CalendarDay {
    /// 创建日历日, ISO 字段由日期推导
    ///
    /// # 参数
    /// - `date`: 日期
    /// - `is_business`: 是否开放
    /// - `is_holiday`: 是否节假日
    /// - `day_type`: 日类型
    pub fn new(date: NaiveDate, is_business: bool, is_holiday: bool, day_type: DayType) -> Self {
        let iso = date.iso_week();
        Self {
            date,
            iso_year: iso.year(),
            iso_week: iso.week(),
            iso_dow: date.weekday().number_from_monday(),
            is_business,
            is_holiday,
            day_type,
        }
    }

    /// 普通开放日的便捷构造 (周一至周六营业, 周日开放但属 SUN 口径)
    pub fn open(date: NaiveDate) -> Self {
        Self::new(date, true, false, DayType::Open)
    }

    /// 停业日的便捷构造
    pub fn closed(date: NaiveDate) -> Self {
        Self::new(date, false, false, DayType::Closed)
    }
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iso_fields_derived() {
        // 2026-01-01 是周四, ISO 2026-W01
        let d = CalendarDay::open(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
        assert_eq!(d.iso_year, 2026);
        assert_eq!(d.iso_week, 1);
        assert_eq!(d.iso_dow, 4);
    }

    #[test]
    fn test_iso_year_boundary() {
        // 2027-01-01 是周五, 属 ISO 2026-W53
        let d = CalendarDay::open(NaiveDate::from_ymd_opt(2027, 1, 1).unwrap());
        assert_eq!(d.iso_year, 2026);
        assert_eq!(d.iso_week, 53);
    }

    #[test]
    fn test_sunday_dow() {
        // 2026-01-04 是周日
        let d = CalendarDay::open(NaiveDate::from_ymd_opt(2026, 1, 4).unwrap());
        assert_eq!(d.iso_dow, 7);
    }
}
