// ==========================================
// 月度目标日计划分解系统 - 月度分配引擎
// ==========================================
// 依据: Allocation_Specs - 4.4 MonthlyDistributor (两级拆分)
// 红线: 各月日目标之和必须恰好还原月目标 (浮点容差内)
// ==========================================
// 职责: 月目标 -> 周目标 (按原始权重比例)
//       周目标 -> 日目标 (按平滑后份额)
// 输入: 平滑后的周桶序列 + 月度目标提供者
// 输出: 有序 DailyPlanItem 序列
// ==========================================

use tracing::{debug, instrument, warn};

use crate::domain::plan::{DailyPlanItem, WeeklyBucket};
use crate::domain::types::{DayScope, MonthKey};
use crate::engine::providers::MonthlyTargetProvider;
use crate::error::AllocationError;

// ==========================================
// MonthlyDistributor - 月度分配引擎
// ==========================================
pub struct MonthlyDistributor {
    // 无状态引擎
}

impl MonthlyDistributor {
    pub fn new() -> Self {
        Self {}
    }

    /// 两级拆分: 月目标 -> 周目标 -> 日目标
    ///
    /// 周目标按各桶的原始 (平滑前) 权重合计占比拆分,
    /// 日目标按桶内平滑后份额拆分, 月守恒由构造保证。
    ///
    /// # 参数
    /// - `buckets`: 周桶序列 (升序, shares 已为平滑后份额)
    /// - `targets`: 月度目标提供者
    ///
    /// # 返回
    /// 日计划序列; 范围内任一月无目标时返回 MissingTarget
    /// (宁可报错, 不可悄悄产出全零月)
    #[instrument(skip(self, buckets, targets), fields(bucket_count = buckets.len()))]
    pub fn distribute(
        &self,
        buckets: &[WeeklyBucket],
        targets: &dyn MonthlyTargetProvider,
    ) -> Result<Vec<DailyPlanItem>, AllocationError> {
        let mut plan = Vec::new();

        // 桶序列按日期升序, 同月的桶必然连续
        let mut i = 0;
        while i < buckets.len() {
            let month = buckets[i].key.month;
            let mut j = i;
            while j < buckets.len() && buckets[j].key.month == month {
                j += 1;
            }
            self.distribute_month(month, &buckets[i..j], targets, &mut plan)?;
            i = j;
        }

        Ok(plan)
    }

    /// 拆分单个月
    fn distribute_month(
        &self,
        month: MonthKey,
        buckets: &[WeeklyBucket],
        targets: &dyn MonthlyTargetProvider,
        plan: &mut Vec<DailyPlanItem>,
    ) -> Result<(), AllocationError> {
        let month_target = targets
            .get(month)
            .ok_or(AllocationError::MissingTarget { month })?;

        let month_raw: f64 = buckets.iter().map(|b| b.raw_sum).sum();

        if month_raw > 0.0 {
            for bucket in buckets {
                let week_target = month_target * bucket.raw_sum / month_raw;
                debug!(week = %bucket.key, week_target, "周目标拆分");
                for (day, &share) in bucket.days.iter().zip(bucket.shares.iter()) {
                    plan.push(DailyPlanItem {
                        date: day.date,
                        target: share * week_target,
                        scope_used: day.scope_used,
                    });
                }
            }
            return Ok(());
        }

        // 整月原始权重为 0: 画像完全缺失。为维持月守恒,
        // 将月目标均摊到开放日; 若整月无开放日则保持全零
        let open_days: usize = buckets
            .iter()
            .flat_map(|b| b.days.iter())
            .filter(|d| d.scope_used != DayScope::Closed)
            .count();

        if month_target > 0.0 && open_days == 0 {
            warn!(%month, month_target, "整月停业且目标为正, 输出全零月");
        } else if month_target > 0.0 {
            warn!(%month, month_target, open_days, "整月画像缺失, 月目标均摊到开放日");
        }

        let each = if open_days > 0 && month_target > 0.0 {
            month_target / open_days as f64
        } else {
            0.0
        };

        for bucket in buckets {
            for day in &bucket.days {
                let target = if day.scope_used == DayScope::Closed {
                    0.0
                } else {
                    each
                };
                plan.push(DailyPlanItem {
                    date: day.date,
                    target,
                    scope_used: day.scope_used,
                });
            }
        }

        Ok(())
    }
}

impl Default for MonthlyDistributor {
    fn default() -> Self {
        Self::new()
    }
}
