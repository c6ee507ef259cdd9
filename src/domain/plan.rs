// ==========================================
// 月度目标日计划分解系统 - 计划领域模型
// ==========================================
// 依据: Allocation_Specs - 3. 数据模型 (DailyWeight/WeeklyBucket/DailyPlan)
// 红线: 停业日 target 恒为 0; 各月日目标之和必须还原月目标
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::types::{DayScope, MonthKey, WeekKey};

// ==========================================
// DailyWeight - 日权重 (派生)
// ==========================================
// DayWeightComposer 的输出: 原始权重 + 选用口径
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyWeight {
    pub date: NaiveDate,     // 日期
    pub raw_weight: f64,     // 原始权重 (>= 0, 画像缺口为 0)
    pub scope_used: DayScope, // 选用口径
}

// ==========================================
// WeeklyBucket - 周桶 (派生)
// ==========================================
// 按 (月, ISO 年, ISO 周) 分组的有序日权重;
// 平滑后 shares 之和为 1.0 (全零周除外)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyBucket {
    pub key: WeekKey,           // 分组键
    pub days: Vec<DailyWeight>, // 桶内日权重 (按日期升序)
    pub raw_sum: f64,           // 原始权重合计 (月->周拆分的依据)
    pub shares: Vec<f64>,       // 日份额向量 (与 days 对齐)
}

impl WeeklyBucket {
    /// 桶内份额合计 (校验用)
    pub fn share_sum(&self) -> f64 {
        self.shares.iter().sum()
    }

    /// 桶内正权重营业日数量 (稀疏周判定的依据)
    pub fn positive_business_days(&self) -> usize {
        self.days
            .iter()
            .filter(|d| d.scope_used.is_business() && d.raw_weight > 0.0)
            .count()
    }
}

// ==========================================
// DailyPlanItem - 日计划明细 (输出)
// ==========================================
// 红线: 只是计算快照, 不可反向污染输入
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyPlanItem {
    pub date: NaiveDate,      // 日期
    pub target: f64,          // 当日目标量
    pub scope_used: DayScope, // 权重合成时选用的口径
}

impl DailyPlanItem {
    /// 所属月
    pub fn month(&self) -> MonthKey {
        MonthKey::from_date(self.date)
    }
}
