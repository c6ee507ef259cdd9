// ==========================================
// 月度目标日计划分解系统 - 月小计回缩
// ==========================================
// 依据: Allocation_Specs - 4.5 / 4.6 (rescale-back)
// ==========================================
// 职责: 平滑后把每个月的掩码内小计精确还原为平滑前小计
// 实现: 显式两遍归约 (先算原小计与新小计, 再乘比值),
//       保证守恒不变量可独立审计与测试
// ==========================================

use std::collections::BTreeMap;

use crate::domain::plan::DailyPlanItem;
use crate::domain::types::MonthKey;

/// 按月回缩掩码内的目标值
///
/// # 参数
/// - `items`: 计划序列, 掩码位置已写入平滑后的值
/// - `mask`: 掩码下标 (升序)
/// - `original`: 掩码位置的平滑前原值 (与 mask 对齐)
///
/// 掩码外条目不受影响, 因此各月总量随掩码小计一并还原。
/// 某月平滑后小计为 0 时无法求比值, 直接还原原值。
pub fn rescale_masked_by_month(items: &mut [DailyPlanItem], mask: &[usize], original: &[f64]) {
    debug_assert_eq!(mask.len(), original.len());

    // 第一遍: 逐月累计原小计与新小计
    let mut subtotals: BTreeMap<MonthKey, (f64, f64)> = BTreeMap::new();
    for (k, &i) in mask.iter().enumerate() {
        let month = MonthKey::from_date(items[i].date);
        let entry = subtotals.entry(month).or_insert((0.0, 0.0));
        entry.0 += original[k];
        entry.1 += items[i].target;
    }

    // 第二遍: 乘比值
    for (k, &i) in mask.iter().enumerate() {
        let month = MonthKey::from_date(items[i].date);
        let (orig_sub, new_sub) = subtotals[&month];
        if new_sub.abs() > f64::EPSILON {
            items[i].target *= orig_sub / new_sub;
        } else {
            items[i].target = original[k];
        }
    }
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::DayScope;
    use chrono::NaiveDate;

    fn item(y: i32, m: u32, d: u32, target: f64) -> DailyPlanItem {
        DailyPlanItem {
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            target,
            scope_used: DayScope::Biz,
        }
    }

    #[test]
    fn test_subtotal_restored_per_month() {
        // 原值: 3月 [10, 20], 4月 [30]; 平滑后: [12, 24, 20]
        let mut items = vec![item(2026, 3, 30, 12.0), item(2026, 3, 31, 24.0), item(2026, 4, 1, 20.0)];
        let mask = vec![0, 1, 2];
        let original = vec![10.0, 20.0, 30.0];

        rescale_masked_by_month(&mut items, &mask, &original);

        // 3月小计还原为 30, 比例 12:24 保持
        assert!((items[0].target + items[1].target - 30.0).abs() < 1e-9);
        assert!((items[1].target / items[0].target - 2.0).abs() < 1e-9);
        // 4月小计还原为 30
        assert!((items[2].target - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_unmasked_untouched() {
        let mut items = vec![item(2026, 3, 1, 5.0), item(2026, 3, 2, 99.0)];
        let mask = vec![1];
        let original = vec![50.0];

        rescale_masked_by_month(&mut items, &mask, &original);
        assert_eq!(items[0].target, 5.0);
        assert!((items[1].target - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_smoothed_subtotal_restores_original() {
        let mut items = vec![item(2026, 3, 1, 0.0)];
        let mask = vec![0];
        let original = vec![7.0];

        rescale_masked_by_month(&mut items, &mask, &original);
        assert_eq!(items[0].target, 7.0);
    }
}
