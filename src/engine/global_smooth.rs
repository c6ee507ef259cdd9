// ==========================================
// 月度目标日计划分解系统 - 全局平滑引擎
// ==========================================
// 依据: Allocation_Specs - 4.6 GlobalSmoother
// 红线: 与桥接平滑相同的按月回缩, 月总量不得漂移
// ==========================================
// 职责: 对营业日子序列做 EMA 或高斯平滑的最终修整
// ==========================================

use tracing::{debug, instrument};

use crate::config::AllocationConfig;
use crate::domain::plan::DailyPlanItem;
use crate::domain::types::GlobalSmootherKind;
use crate::engine::rescale::rescale_masked_by_month;
use crate::engine::rolling::{ema, gaussian_smooth};

// ==========================================
// GlobalSmoother - 全局平滑引擎
// ==========================================
pub struct GlobalSmoother {
    // 无状态引擎
}

impl GlobalSmoother {
    pub fn new() -> Self {
        Self {}
    }

    /// 对计划的营业日子序列执行最终平滑
    ///
    /// # 参数
    /// - `plan`: 日计划序列 (升序, 可能已经过桥接平滑)
    /// - `config`: 分配配置; global_smoother 为 None 时原样返回
    #[instrument(skip(self, plan, config), fields(plan_len = plan.len()))]
    pub fn smooth(&self, plan: &[DailyPlanItem], config: &AllocationConfig) -> Vec<DailyPlanItem> {
        let kind = match config.global_smoother {
            Some(kind) => kind,
            None => return plan.to_vec(),
        };

        let mask: Vec<usize> = (0..plan.len())
            .filter(|&i| plan[i].scope_used.is_business())
            .collect();

        if mask.len() < 2 {
            debug!(masked = mask.len(), "营业日不足, 跳过全局平滑");
            return plan.to_vec();
        }

        let original: Vec<f64> = mask.iter().map(|&i| plan[i].target).collect();
        let smoothed = match kind {
            GlobalSmootherKind::Ema => ema(&original, config.global_smoother_param),
            GlobalSmootherKind::Gaussian => {
                gaussian_smooth(&original, config.global_smoother_param)
            }
        };

        let mut out = plan.to_vec();
        for (k, &i) in mask.iter().enumerate() {
            out[i].target = smoothed[k];
        }
        rescale_masked_by_month(&mut out, &mask, &original);
        out
    }
}

impl Default for GlobalSmoother {
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

    const EPS: f64 = 1e-9;

    fn plan_with_zigzag() -> Vec<DailyPlanItem> {
        (0..10)
            .map(|i| DailyPlanItem {
                date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap() + chrono::Days::new(i),
                target: if i % 2 == 0 { 20.0 } else { 5.0 },
                scope_used: DayScope::Biz,
            })
            .collect()
    }

    #[test]
    fn test_none_is_identity() {
        let plan = plan_with_zigzag();
        let out = GlobalSmoother::new().smooth(&plan, &AllocationConfig::default());
        for (a, b) in plan.iter().zip(out.iter()) {
            assert_eq!(a.target, b.target);
        }
    }

    #[test]
    fn test_ema_preserves_month_total() {
        let plan = plan_with_zigzag();
        let config = AllocationConfig {
            global_smoother: Some(GlobalSmootherKind::Ema),
            global_smoother_param: 3.0,
            ..Default::default()
        };
        let out = GlobalSmoother::new().smooth(&plan, &config);

        let orig_total: f64 = plan.iter().map(|p| p.target).sum();
        let new_total: f64 = out.iter().map(|p| p.target).sum();
        assert!((orig_total - new_total).abs() < EPS);

        // 平滑应收窄极差
        let max = out.iter().map(|p| p.target).fold(f64::MIN, f64::max);
        let min = out.iter().map(|p| p.target).fold(f64::MAX, f64::min);
        assert!(max - min < 15.0);
    }

    #[test]
    fn test_gaussian_preserves_month_total() {
        let plan = plan_with_zigzag();
        let config = AllocationConfig {
            global_smoother: Some(GlobalSmootherKind::Gaussian),
            global_smoother_param: 1.5,
            ..Default::default()
        };
        let out = GlobalSmoother::new().smooth(&plan, &config);

        let orig_total: f64 = plan.iter().map(|p| p.target).sum();
        let new_total: f64 = out.iter().map(|p| p.target).sum();
        assert!((orig_total - new_total).abs() < EPS);
    }

    #[test]
    fn test_non_business_days_untouched() {
        let mut plan = plan_with_zigzag();
        plan[3].scope_used = DayScope::Sun;
        plan[3].target = 7.7;
        plan[5].scope_used = DayScope::Closed;
        plan[5].target = 0.0;

        let config = AllocationConfig {
            global_smoother: Some(GlobalSmootherKind::Ema),
            global_smoother_param: 3.0,
            ..Default::default()
        };
        let out = GlobalSmoother::new().smooth(&plan, &config);

        assert_eq!(out[3].target, 7.7);
        assert_eq!(out[5].target, 0.0);
        // 月总量仍守恒 (掩码外原样 + 掩码内小计还原)
        let orig_total: f64 = plan.iter().map(|p| p.target).sum();
        let new_total: f64 = out.iter().map(|p| p.target).sum();
        assert!((orig_total - new_total).abs() < EPS);
    }
}
