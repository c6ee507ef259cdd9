// ==========================================
// 月度目标日计划分解系统 - 周归一引擎
// ==========================================
// 依据: Allocation_Specs - 4.2 WeeklyNormalizer
// ==========================================
// 职责: 按 (月, ISO 年, ISO 周) 分组日权重, 计算原始份额
// 红线: 跨月的 ISO 周拆成两个桶, 各归其月
// ==========================================

use crate::domain::calendar::CalendarDay;
use crate::domain::plan::{DailyWeight, WeeklyBucket};
use crate::domain::types::{MonthKey, WeekKey};

// ==========================================
// WeeklyNormalizer - 周归一引擎
// ==========================================
pub struct WeeklyNormalizer {
    // 无状态引擎
}

impl WeeklyNormalizer {
    pub fn new() -> Self {
        Self {}
    }

    /// 分组并计算原始份额
    ///
    /// 输入按日期升序且一一对应, 因此同一周桶必然是连续区段,
    /// 线性扫描即可完成分组。
    ///
    /// # 参数
    /// - `days`: 日历日序列 (升序)
    /// - `weights`: 对应的日权重序列
    ///
    /// # 返回
    /// 周桶列表 (升序), 每桶已填充 raw_sum 与原始份额
    pub fn group(&self, days: &[CalendarDay], weights: &[DailyWeight]) -> Vec<WeeklyBucket> {
        debug_assert_eq!(days.len(), weights.len());

        let mut buckets: Vec<WeeklyBucket> = Vec::new();

        for (day, weight) in days.iter().zip(weights.iter()) {
            let key = WeekKey {
                month: MonthKey::from_date(day.date),
                iso_year: day.iso_year,
                iso_week: day.iso_week,
            };

            match buckets.last_mut() {
                Some(bucket) if bucket.key == key => bucket.days.push(weight.clone()),
                _ => buckets.push(WeeklyBucket {
                    key,
                    days: vec![weight.clone()],
                    raw_sum: 0.0,
                    shares: Vec::new(),
                }),
            }
        }

        for bucket in &mut buckets {
            bucket.raw_sum = bucket.days.iter().map(|d| d.raw_weight).sum();
            bucket.shares = Self::raw_shares(&bucket.days, bucket.raw_sum);
        }

        buckets
    }

    /// 原始份额: weight / Σweights; 合计为 0 时全部置 0
    /// (零周由周内平滑的稀疏回退策略接手)
    fn raw_shares(days: &[DailyWeight], raw_sum: f64) -> Vec<f64> {
        if raw_sum > 0.0 {
            days.iter().map(|d| d.raw_weight / raw_sum).collect()
        } else {
            vec![0.0; days.len()]
        }
    }
}

impl Default for WeeklyNormalizer {
    fn default() -> Self {
        Self::new()
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

    fn make_inputs(dates: &[(i32, u32, u32, f64)]) -> (Vec<CalendarDay>, Vec<DailyWeight>) {
        let mut days = Vec::new();
        let mut weights = Vec::new();
        for &(y, m, d, w) in dates {
            let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
            days.push(CalendarDay::open(date));
            weights.push(DailyWeight {
                date,
                raw_weight: w,
                scope_used: DayScope::Biz,
            });
        }
        (days, weights)
    }

    #[test]
    fn test_shares_sum_to_one() {
        // 2026-03-02(一) 至 03-04(三), 同一 ISO 周
        let (days, weights) =
            make_inputs(&[(2026, 3, 2, 2.0), (2026, 3, 3, 3.0), (2026, 3, 4, 5.0)]);
        let buckets = WeeklyNormalizer::new().group(&days, &weights);
        assert_eq!(buckets.len(), 1);
        assert!((buckets[0].raw_sum - 10.0).abs() < 1e-12);
        assert!((buckets[0].share_sum() - 1.0).abs() < 1e-12);
        assert!((buckets[0].shares[2] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_month_boundary_splits_week() {
        // 2026-03-30(一) 至 2026-04-01(三): 同一 ISO 周 W14 跨月
        let (days, weights) =
            make_inputs(&[(2026, 3, 30, 1.0), (2026, 3, 31, 1.0), (2026, 4, 1, 1.0)]);
        let buckets = WeeklyNormalizer::new().group(&days, &weights);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].key.month, MonthKey::new(2026, 3));
        assert_eq!(buckets[1].key.month, MonthKey::new(2026, 4));
        assert_eq!(buckets[0].key.iso_week, buckets[1].key.iso_week);
        // 两个桶各自归一
        assert!((buckets[0].share_sum() - 1.0).abs() < 1e-12);
        assert!((buckets[1].share_sum() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_week_all_zero_shares() {
        let (days, weights) = make_inputs(&[(2026, 3, 2, 0.0), (2026, 3, 3, 0.0)]);
        let buckets = WeeklyNormalizer::new().group(&days, &weights);
        assert_eq!(buckets[0].raw_sum, 0.0);
        assert!(buckets[0].shares.iter().all(|&s| s == 0.0));
    }
}
