// ==========================================
// 月度目标日计划分解系统 - 跨期桥接平滑引擎
// ==========================================
// 依据: Allocation_Specs - 4.5 CrossPeriodBridgeSmoother
// 红线: 回缩后各月掩码内小计必须精确还原
// ==========================================
// 职责: 对掩码内日序列做跨月滚动平滑, 再按月回缩
// 说明: 与周内平滑不同, 本阶段无视周界与月界
// ==========================================

use std::collections::HashSet;
use tracing::{debug, instrument};

use crate::config::AllocationConfig;
use crate::domain::plan::DailyPlanItem;
use crate::domain::types::{DayScope, SmoothMethod};
use crate::engine::rescale::rescale_masked_by_month;
use crate::engine::rolling::{rolling_mean, rolling_median};

// ==========================================
// CrossPeriodBridgeSmoother - 跨期桥接平滑引擎
// ==========================================
pub struct CrossPeriodBridgeSmoother {
    // 无状态引擎
}

impl CrossPeriodBridgeSmoother {
    pub fn new() -> Self {
        Self {}
    }

    /// 对完整计划序列执行桥接平滑
    ///
    /// 1. 取出口径在 bridge_scope 内的子序列 (跨整个范围)
    /// 2. 可选幽灵延拓: 两端镜像填充半窗, 平滑后裁掉
    /// 3. 套用与周内平滑相同的滚动原语 (bridge_window 宽)
    /// 4. 按月回缩, 还原各月掩码内小计
    ///
    /// # 参数
    /// - `plan`: 分配后的日计划 (升序)
    /// - `config`: 分配配置 (已校验)
    ///
    /// # 返回
    /// 新的日计划序列, 掩码外条目原样保留
    #[instrument(skip(self, plan, config), fields(plan_len = plan.len()))]
    pub fn smooth(&self, plan: &[DailyPlanItem], config: &AllocationConfig) -> Vec<DailyPlanItem> {
        let scope_set: HashSet<DayScope> = config.bridge_scope.iter().copied().collect();
        // 停业日目标恒为 0, 无条件排除在掩码外
        let mask: Vec<usize> = (0..plan.len())
            .filter(|&i| {
                plan[i].scope_used != DayScope::Closed && scope_set.contains(&plan[i].scope_used)
            })
            .collect();

        if mask.len() < 2 {
            debug!(masked = mask.len(), "掩码内条目不足, 跳过桥接平滑");
            return plan.to_vec();
        }

        let original: Vec<f64> = mask.iter().map(|&i| plan[i].target).collect();
        let window = config.effective_bridge_window();

        let smoothed = if config.ghost_extend {
            let pad = ((window as usize) / 2).min(original.len() - 1);
            let padded = Self::mirror_pad(&original, pad);
            let full = Self::apply_rolling(&padded, window, config.method);
            full[pad..pad + original.len()].to_vec()
        } else {
            Self::apply_rolling(&original, window, config.method)
        };

        let mut out = plan.to_vec();
        for (k, &i) in mask.iter().enumerate() {
            out[i].target = smoothed[k];
        }
        rescale_masked_by_month(&mut out, &mask, &original);
        out
    }

    /// 与周内平滑一致的滚动原语
    fn apply_rolling(values: &[f64], window: u32, method: SmoothMethod) -> Vec<f64> {
        match method {
            SmoothMethod::MedianThenMean => rolling_mean(&rolling_median(values, window), window),
            SmoothMethod::MeanOnly => rolling_mean(values, window),
        }
    }

    /// 镜像填充: 左端取 values[1..=pad] 倒序, 右端对称
    fn mirror_pad(values: &[f64], pad: usize) -> Vec<f64> {
        let n = values.len();
        let mut out = Vec::with_capacity(n + 2 * pad);
        for k in (1..=pad).rev() {
            out.push(values[k]);
        }
        out.extend_from_slice(values);
        for k in 1..=pad {
            out.push(values[n - 1 - k]);
        }
        out
    }
}

impl Default for CrossPeriodBridgeSmoother {
    fn default() -> Self {
        Self::new()
    }
}
