// ==========================================
// 月度目标日计划分解系统 - 历史活动画像
// ==========================================
// 依据: Allocation_Specs - 3. 数据模型 (ActivityProfile)
// 红线: 画像缺口按 0 处理, 引擎绝不凭空捏造需求
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::types::ProfileScope;

// ==========================================
// ActivityProfile - 历史活动画像
// ==========================================
// 键: (口径, ISO 周, ISO 星期) -> 历史均值 (>= 0)
// 由外部预测/估计流程产出, 引擎只读
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActivityProfile {
    entries: HashMap<(ProfileScope, u32, u32), f64>,
}

impl ActivityProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// 写入一条画像均值 (负值按 0 截断)
    pub fn insert(&mut self, scope: ProfileScope, iso_week: u32, iso_dow: u32, mean_value: f64) {
        self.entries
            .insert((scope, iso_week, iso_dow), mean_value.max(0.0));
    }

    /// 查询画像均值, 缺口返回 None
    pub fn get(&self, scope: ProfileScope, iso_week: u32, iso_dow: u32) -> Option<f64> {
        self.entries.get(&(scope, iso_week, iso_dow)).copied()
    }

    /// 条目数 (测试与日志用)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gap_is_none() {
        let p = ActivityProfile::new();
        assert_eq!(p.get(ProfileScope::Business, 10, 1), None);
    }

    #[test]
    fn test_negative_clamped() {
        let mut p = ActivityProfile::new();
        p.insert(ProfileScope::Business, 10, 1, -5.0);
        assert_eq!(p.get(ProfileScope::Business, 10, 1), Some(0.0));
    }

    #[test]
    fn test_scopes_independent() {
        let mut p = ActivityProfile::new();
        p.insert(ProfileScope::Business, 10, 1, 3.0);
        p.insert(ProfileScope::AllIncludingSunday, 10, 1, 7.0);
        assert_eq!(p.get(ProfileScope::Business, 10, 1), Some(3.0));
        assert_eq!(p.get(ProfileScope::AllIncludingSunday, 10, 1), Some(7.0));
    }
}
