// ==========================================
// 月度目标日计划分解系统 - 周内平滑引擎
// ==========================================
// 依据: Allocation_Specs - 4.3 IntraweekSmoother (核心算法)
// 红线: 输出份额向量之和必须为 1.0 (全零周除外)
// 红线: 纯阶段, 不修改输入周桶
// ==========================================
// 职责: 滚动平滑 + 相对封顶 + 非营业封顶与赤字再分配
// 输入: 单个 WeeklyBucket + AllocationConfig
// 输出: 新的份额向量 (与桶内日序对齐)
// ==========================================

use tracing::debug;

use crate::config::AllocationConfig;
use crate::domain::plan::WeeklyBucket;
use crate::domain::types::SmoothMethod;
use crate::engine::rolling::{rolling_mean, rolling_median};


// ==========================================
// IntraweekSmoother - 周内平滑引擎
// ==========================================
pub struct IntraweekSmoother {
    // 无状态引擎, 配置通过参数传入
}

impl IntraweekSmoother {
    pub fn new() -> Self {
        Self {}
    }

    /// 对单个周桶执行完整的周内平滑管线
    ///
    /// 步骤 (依据 Allocation_Specs 4.3):
    /// 1. 稀疏周回退: 正权重营业日 < K 时退化为均匀分配, 直接跳到步骤 6
    /// 2. 营业日子序列滚动平滑 (中位数 -> 均值, 或仅均值)
    /// 3. 相对封顶: 营业日份额不超过周营业日均值 × R
    /// 4. 全向量归一
    /// 5. 非营业封顶 (SUN/HOL) + 赤字按比例再分配 + 再归一
    /// 6. 可选全局封顶 (clip 全部正份额日, 再分配给营业日)
    ///
    /// # 参数
    /// - `bucket`: 周桶 (只读)
    /// - `config`: 分配配置 (已校验)
    ///
    /// # 返回
    /// 新的份额向量, 合计 1.0 ± ε (桶内无任何正权重时全零)
    pub fn smooth(&self, bucket: &WeeklyBucket, config: &AllocationConfig) -> Vec<f64> {
        let n = bucket.days.len();
        if n == 0 {
            return Vec::new();
        }

        // ==========================================
        // 步骤1: 稀疏周回退
        // ==========================================
        let positive_biz = bucket.positive_business_days();
        if (positive_biz as u32) < config.min_open_business_days {
            debug!(
                week = %bucket.key,
                positive_biz,
                min_required = config.min_open_business_days,
                "稀疏周回退: 正权重日均匀分配"
            );
            let shares = Self::uniform_fallback(bucket);
            return self.apply_universal_cap(bucket, shares, config);
        }

        let mut shares = bucket.shares.clone();

        // ==========================================
        // 步骤2: 营业日子序列滚动平滑
        // ==========================================
        let biz_idx: Vec<usize> = (0..n)
            .filter(|&i| bucket.days[i].scope_used.is_business())
            .collect();

        let window = config.effective_window();
        if window > 1 && biz_idx.len() > 1 {
            let biz_vals: Vec<f64> = biz_idx.iter().map(|&i| shares[i]).collect();
            let smoothed = match config.method {
                SmoothMethod::MedianThenMean => {
                    rolling_mean(&rolling_median(&biz_vals, window), window)
                }
                SmoothMethod::MeanOnly => rolling_mean(&biz_vals, window),
            };
            for (k, &i) in biz_idx.iter().enumerate() {
                shares[i] = smoothed[k];
            }
        }

        // ==========================================
        // 步骤3: 相对封顶 (仅营业日)
        // ==========================================
        if !biz_idx.is_empty() {
            let mean: f64 =
                biz_idx.iter().map(|&i| shares[i]).sum::<f64>() / biz_idx.len() as f64;
            let cap = mean * config.relative_cap;
            for &i in &biz_idx {
                if shares[i] > cap {
                    shares[i] = cap;
                }
            }
        }

        // ==========================================
        // 步骤4: 全向量归一
        // ==========================================
        Self::normalize(&mut shares);

        // ==========================================
        // 步骤5: 非营业封顶 + 赤字再分配
        // ==========================================
        let clip_idx: Vec<usize> = (0..n)
            .filter(|&i| bucket.days[i].scope_used.is_non_business_open())
            .collect();
        shares = Self::clip_and_redistribute(
            bucket,
            shares,
            &clip_idx,
            config.non_business_share_cap,
        );

        // ==========================================
        // 步骤6: 可选全局封顶
        // ==========================================
        self.apply_universal_cap(bucket, shares, config)
    }

    /// 稀疏周回退: 每个正权重日份额 1/n, 其余为 0
    fn uniform_fallback(bucket: &WeeklyBucket) -> Vec<f64> {
        let positive: Vec<usize> = (0..bucket.days.len())
            .filter(|&i| bucket.days[i].raw_weight > 0.0)
            .collect();

        let mut shares = vec![0.0; bucket.days.len()];
        if !positive.is_empty() {
            let each = 1.0 / positive.len() as f64;
            for i in positive {
                shares[i] = each;
            }
        }
        shares
    }

    /// 可选全局封顶: clip 全部正份额日, 赤字再分配给营业日
    fn apply_universal_cap(
        &self,
        bucket: &WeeklyBucket,
        shares: Vec<f64>,
        config: &AllocationConfig,
    ) -> Vec<f64> {
        match config.universal_share_cap {
            Some(cap) => {
                let clip_idx: Vec<usize> =
                    (0..shares.len()).filter(|&i| shares[i] > 0.0).collect();
                Self::clip_and_redistribute(bucket, shares, &clip_idx, cap)
            }
            None => shares,
        }
    }

    /// 封顶与赤字再分配
    ///
    /// 1. 将 clip_idx 中超过 cap 的份额截到 cap
    /// 2. 赤字 = 1.0 - Σ当前份额
    /// 3. 赤字按当前份额比例分给正份额营业日;
    ///    若无正份额营业日, 平均分给所有正份额日
    /// 4. 全向量再归一, 保证合计恰为 1.0
    fn clip_and_redistribute(
        bucket: &WeeklyBucket,
        mut shares: Vec<f64>,
        clip_idx: &[usize],
        cap: f64,
    ) -> Vec<f64> {
        let mut clipped = false;
        for &i in clip_idx {
            if shares[i] > cap {
                shares[i] = cap;
                clipped = true;
            }
        }
        if !clipped {
            return shares;
        }

        let deficit = 1.0 - shares.iter().sum::<f64>();

        let biz_pos: Vec<usize> = (0..shares.len())
            .filter(|&i| bucket.days[i].scope_used.is_business() && shares[i] > 0.0)
            .collect();

        if !biz_pos.is_empty() {
            let total: f64 = biz_pos.iter().map(|&i| shares[i]).sum();
            for &i in &biz_pos {
                shares[i] += deficit * shares[i] / total;
            }
        } else {
            let any_pos: Vec<usize> = (0..shares.len()).filter(|&i| shares[i] > 0.0).collect();
            if !any_pos.is_empty() {
                let each = deficit / any_pos.len() as f64;
                for &i in &any_pos {
                    shares[i] += each;
                }
            }
        }

        Self::normalize(&mut shares);
        shares
    }

    /// 全向量归一到合计 1.0 (合计为 0 时保持不变)
    fn normalize(shares: &mut [f64]) {
        let sum: f64 = shares.iter().sum();
        if sum > 0.0 {
            for s in shares.iter_mut() {
                *s /= sum;
            }
        }
    }
}

impl Default for IntraweekSmoother {
    fn default() -> Self {
        Self::new()
    }
}
