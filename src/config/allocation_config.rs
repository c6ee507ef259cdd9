// ==========================================
// 月度目标日计划分解系统 - 分配配置
// ==========================================
// 依据: Allocation_Specs - 6. 外部接口 (AllocationConfig)
// ==========================================
// 职责: 分配引擎的全部可调参数 + 校验 + 快照
// 说明: 偶数窗口提升为下一个奇数, 是修正不是错误
// ==========================================

use serde::{Deserialize, Serialize};

use crate::domain::types::{DayScope, GlobalSmootherKind, SmoothMethod};
use crate::error::AllocationError;

// ===== serde 默认值函数 =====

fn default_window() -> u32 {
    3
}

fn default_relative_cap() -> f64 {
    1.5
}

fn default_min_open_business_days() -> u32 {
    3
}

fn default_non_business_share_cap() -> f64 {
    0.08
}

fn default_bridge_window() -> u32 {
    7
}

fn default_bridge_scope() -> Vec<DayScope> {
    vec![DayScope::Biz]
}

fn default_global_smoother_param() -> f64 {
    7.0
}

// ==========================================
// AllocationConfig - 分配配置
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationConfig {
    // ===== 周内平滑 =====
    /// 滚动窗口宽度 (偶数自动提升为下一个奇数)
    #[serde(default = "default_window")]
    pub window: u32,

    /// 平滑方法
    #[serde(default)]
    pub method: SmoothMethod,

    /// 相对封顶: 营业日份额上限 = 周营业日均值 × relative_cap
    #[serde(default = "default_relative_cap")]
    pub relative_cap: f64,

    /// 稀疏周判定阈值: 正权重营业日少于该值时退化为均匀分配
    #[serde(default = "default_min_open_business_days")]
    pub min_open_business_days: u32,

    /// 非营业开放日 (SUN/HOL) 的份额上限
    #[serde(default = "default_non_business_share_cap")]
    pub non_business_share_cap: f64,

    /// 可选的全局份额上限 (作用于所有正份额日)
    #[serde(default)]
    pub universal_share_cap: Option<f64>,

    // ===== 跨期桥接平滑 =====
    /// 是否启用跨月桥接平滑
    #[serde(default)]
    pub bridge_enabled: bool,

    /// 桥接平滑窗口宽度 (偶数同样提升为奇数)
    #[serde(default = "default_bridge_window")]
    pub bridge_window: u32,

    /// 桥接平滑作用的口径集合 (通常仅营业日)
    #[serde(default = "default_bridge_scope")]
    pub bridge_scope: Vec<DayScope>,

    /// 幽灵延拓: 平滑前镜像填充半窗, 降低序列两端偏差
    #[serde(default)]
    pub ghost_extend: bool,

    // ===== 全局平滑 =====
    /// 最终全局平滑器 (None 表示关闭)
    #[serde(default)]
    pub global_smoother: Option<GlobalSmootherKind>,

    /// 全局平滑器参数 (EMA 的 span / 高斯核的 sigma)
    #[serde(default = "default_global_smoother_param")]
    pub global_smoother_param: f64,
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            window: default_window(),
            method: SmoothMethod::default(),
            relative_cap: default_relative_cap(),
            min_open_business_days: default_min_open_business_days(),
            non_business_share_cap: default_non_business_share_cap(),
            universal_share_cap: None,
            bridge_enabled: false,
            bridge_window: default_bridge_window(),
            bridge_scope: default_bridge_scope(),
            ghost_extend: false,
            global_smoother: None,
            global_smoother_param: default_global_smoother_param(),
        }
    }
}

impl AllocationConfig {
    /// 奇数提升: 偶数窗口提升为下一个奇数
    fn promote_odd(window: u32) -> u32 {
        if window % 2 == 0 {
            window + 1
        } else {
            window
        }
    }

    /// 周内平滑的有效窗口 (奇数提升后)
    pub fn effective_window(&self) -> u32 {
        Self::promote_odd(self.window)
    }

    /// 桥接平滑的有效窗口 (奇数提升后)
    pub fn effective_bridge_window(&self) -> u32 {
        Self::promote_odd(self.bridge_window)
    }

    /// 校验配置
    ///
    /// # 校验规则
    /// 1. 窗口经奇数提升后必须为正
    /// 2. 各封顶参数不得为负, 份额上限不得超过 1.0
    /// 3. 启用桥接时口径集合不得为空, 且不得包含 CLOSED
    /// 4. 配置了全局平滑器时参数必须为正
    pub fn validate(&self) -> Result<(), AllocationError> {
        if self.effective_window() == 0 {
            return Err(AllocationError::invalid_config("window 必须为正整数"));
        }

        if self.relative_cap <= 0.0 {
            return Err(AllocationError::invalid_config(format!(
                "relative_cap 必须为正: {}",
                self.relative_cap
            )));
        }

        if !(0.0..=1.0).contains(&self.non_business_share_cap) {
            return Err(AllocationError::invalid_config(format!(
                "non_business_share_cap 必须在 [0,1] 内: {}",
                self.non_business_share_cap
            )));
        }

        if let Some(cap) = self.universal_share_cap {
            if !(cap > 0.0 && cap <= 1.0) {
                return Err(AllocationError::invalid_config(format!(
                    "universal_share_cap 必须在 (0,1] 内: {}",
                    cap
                )));
            }
        }

        if self.bridge_enabled {
            if self.effective_bridge_window() == 0 {
                return Err(AllocationError::invalid_config("bridge_window 必须为正整数"));
            }
            if self.bridge_scope.is_empty() {
                return Err(AllocationError::invalid_config(
                    "bridge_enabled 时 bridge_scope 不能为空",
                ));
            }
            // 停业日目标恒为 0, 纳入桥接掩码会把营业日目标抹进停业日
            if self.bridge_scope.contains(&DayScope::Closed) {
                return Err(AllocationError::invalid_config(
                    "bridge_scope 不允许包含 CLOSED",
                ));
            }
        }

        if self.global_smoother.is_some() && self.global_smoother_param <= 0.0 {
            return Err(AllocationError::invalid_config(format!(
                "global_smoother_param 必须为正: {}",
                self.global_smoother_param
            )));
        }

        Ok(())
    }

    /// 获取配置快照 (JSON 格式)
    ///
    /// # 用途
    /// - 记录每次计算所用配置, 保证结果可复现可追溯
    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(AllocationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_even_window_promoted() {
        let cfg = AllocationConfig {
            window: 4,
            bridge_window: 6,
            ..Default::default()
        };
        assert_eq!(cfg.effective_window(), 5);
        assert_eq!(cfg.effective_bridge_window(), 7);
        // 提升是修正, 不是错误
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_zero_window_promoted() {
        let cfg = AllocationConfig {
            window: 0,
            ..Default::default()
        };
        // 0 提升为 1, 依然有效 —— 只有负参数才非法, u32 不可能为负,
        // 因此 window=0 提升后为 1 是合法配置
        assert_eq!(cfg.effective_window(), 1);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_negative_cap_rejected() {
        let cfg = AllocationConfig {
            non_business_share_cap: -0.1,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = AllocationConfig {
            relative_cap: -1.0,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_bridge_scope_empty_rejected() {
        let cfg = AllocationConfig {
            bridge_enabled: true,
            bridge_scope: vec![],
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_bridge_scope_closed_rejected() {
        let cfg = AllocationConfig {
            bridge_enabled: true,
            bridge_scope: vec![DayScope::Biz, DayScope::Closed],
            ..Default::default()
        };
        assert!(cfg.validate().is_err());

        // 未启用桥接时不检查口径集合
        let cfg = AllocationConfig {
            bridge_enabled: false,
            bridge_scope: vec![DayScope::Closed],
            ..Default::default()
        };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let cfg = AllocationConfig {
            universal_share_cap: Some(0.3),
            global_smoother: Some(crate::domain::types::GlobalSmootherKind::Ema),
            ..Default::default()
        };
        let json = cfg.snapshot_json();
        let parsed: AllocationConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.universal_share_cap, Some(0.3));
        assert_eq!(
            parsed.global_smoother,
            Some(crate::domain::types::GlobalSmootherKind::Ema)
        );
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let cfg: AllocationConfig = serde_json::from_str(r#"{"window": 5}"#).unwrap();
        assert_eq!(cfg.window, 5);
        assert_eq!(cfg.relative_cap, 1.5);
        assert_eq!(cfg.method, SmoothMethod::MedianThenMean);
        assert!(!cfg.bridge_enabled);
    }
}
