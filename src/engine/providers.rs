// ==========================================
// 月度目标日计划分解系统 - 引擎层数据提供者
// ==========================================
// 依据: Allocation_Specs - 6. 外部接口 (只读协作者)
// ==========================================
// 职责: 聚合分配引擎所需的全部只读数据源
// 目标: trait 接缝便于单元测试 mock, 聚合结构体
//       减少编排器的参数数量
// ==========================================

use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::calendar::CalendarDay;
use crate::domain::profile::ActivityProfile;
use crate::domain::types::{MonthKey, ProfileScope};

// ==========================================
// 数据提供者 trait
// ==========================================

/// 日历分类器: 提供范围内每个日期的日历属性
pub trait CalendarClassifier {
    /// 获取 [start, end] 闭区间内的日历日 (按日期升序)
    fn get_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<CalendarDay>;
}

/// 历史活动画像提供者
pub trait HistoricalProfileProvider {
    /// 查询 (口径, ISO 周, ISO 星期) 的历史均值, 缺口返回 None
    fn get(&self, scope: ProfileScope, iso_week: u32, iso_dow: u32) -> Option<f64>;
}

/// 月度目标提供者
pub trait MonthlyTargetProvider {
    /// 查询某月的目标量, 缺失返回 None
    fn get(&self, month: MonthKey) -> Option<f64>;
}

// ==========================================
// AllocationProviders - 提供者集合
// ==========================================
// 将 3 个数据源合并为 1 个结构体参数, 便于注入与 mock
#[derive(Clone)]
pub struct AllocationProviders {
    pub calendar: Arc<dyn CalendarClassifier>,
    pub profile: Arc<dyn HistoricalProfileProvider>,
    pub targets: Arc<dyn MonthlyTargetProvider>,
}

impl AllocationProviders {
    /// 创建新的提供者集合
    pub fn new(
        calendar: Arc<dyn CalendarClassifier>,
        profile: Arc<dyn HistoricalProfileProvider>,
        targets: Arc<dyn MonthlyTargetProvider>,
    ) -> Self {
        Self {
            calendar,
            profile,
            targets,
        }
    }
}

// ==========================================
// 内存实现 (调用方预取数据后装入)
// ==========================================

/// 内存日历: 由调用方预取的日历日列表构成
#[derive(Debug, Clone, Default)]
pub struct InMemoryCalendar {
    days: HashMap<NaiveDate, CalendarDay>,
}

impl InMemoryCalendar {
    pub fn new(days: Vec<CalendarDay>) -> Self {
        Self {
            days: days.into_iter().map(|d| (d.date, d)).collect(),
        }
    }
}

impl CalendarClassifier for InMemoryCalendar {
    fn get_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<CalendarDay> {
        let mut out = Vec::new();
        let mut cursor = start;
        while cursor <= end {
            if let Some(day) = self.days.get(&cursor) {
                out.push(day.clone());
            }
            match cursor.succ_opt() {
                Some(next) => cursor = next,
                None => break,
            }
        }
        out
    }
}

/// 内存画像: ActivityProfile 的直接包装
#[derive(Debug, Clone, Default)]
pub struct InMemoryProfile {
    profile: ActivityProfile,
}

impl InMemoryProfile {
    pub fn new(profile: ActivityProfile) -> Self {
        Self { profile }
    }
}

impl HistoricalProfileProvider for InMemoryProfile {
    fn get(&self, scope: ProfileScope, iso_week: u32, iso_dow: u32) -> Option<f64> {
        self.profile.get(scope, iso_week, iso_dow)
    }
}

/// 内存月度目标表
#[derive(Debug, Clone, Default)]
pub struct InMemoryTargets {
    targets: HashMap<MonthKey, f64>,
}

impl InMemoryTargets {
    pub fn new(targets: HashMap<MonthKey, f64>) -> Self {
        Self { targets }
    }

    /// 便捷写入
    pub fn set(&mut self, month: MonthKey, target: f64) {
        self.targets.insert(month, target);
    }
}

impl MonthlyTargetProvider for InMemoryTargets {
    fn get(&self, month: MonthKey) -> Option<f64> {
        self.targets.get(&month).copied()
    }
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_calendar_ordered_and_gapped() {
        let d1 = CalendarDay::open(NaiveDate::from_ymd_opt(2026, 1, 5).unwrap());
        let d3 = CalendarDay::open(NaiveDate::from_ymd_opt(2026, 1, 7).unwrap());
        let cal = InMemoryCalendar::new(vec![d3.clone(), d1.clone()]);

        let range = cal.get_range(d1.date, d3.date);
        // 1月6日缺失, 只返回存在的两天, 且按日期升序
        assert_eq!(range.len(), 2);
        assert_eq!(range[0].date, d1.date);
        assert_eq!(range[1].date, d3.date);
    }

    #[test]
    fn test_in_memory_targets() {
        let mut targets = InMemoryTargets::default();
        targets.set(MonthKey::new(2026, 2), 500.0);
        assert_eq!(targets.get(MonthKey::new(2026, 2)), Some(500.0));
        assert_eq!(targets.get(MonthKey::new(2026, 3)), None);
    }
}
