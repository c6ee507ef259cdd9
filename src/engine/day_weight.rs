// ==========================================
// 月度目标日计划分解系统 - 日权重合成引擎
// ==========================================
// 依据: Allocation_Specs - 4.1 DayWeightComposer
// 红线: 画像缺口按 0 处理, 绝不凭空捏造需求
// ==========================================
// 职责: 日历属性 + 历史画像 -> 原始日权重 + 口径标记
// 输入: 单个 CalendarDay + 画像查询接口
// 输出: DailyWeight (纯函数, 无副作用)
// ==========================================

use crate::domain::calendar::CalendarDay;
use crate::domain::plan::DailyWeight;
use crate::domain::types::{DayScope, ProfileScope};
use crate::engine::providers::HistoricalProfileProvider;

// ==========================================
// DayWeightComposer - 日权重合成引擎
// ==========================================
pub struct DayWeightComposer {
    // 无状态引擎, 画像通过参数传入
}

impl DayWeightComposer {
    pub fn new() -> Self {
        Self {}
    }

    /// 合成单日权重
    ///
    /// 口径选择策略 (按顺序判定):
    /// 1. 非营业或停业 -> CLOSED, 权重 0
    /// 2. 周日 (iso_dow=7) -> SUN, 查全量口径第 7 天
    /// 3. 节假日 -> HOL, 借用全量口径同星期
    ///    (营业日口径没有节假日观测)
    /// 4. 其余 -> BIZ, 查营业日口径
    ///
    /// # 参数
    /// - `day`: 日历日
    /// - `profile`: 画像查询接口
    pub fn compose(
        &self,
        day: &CalendarDay,
        profile: &dyn HistoricalProfileProvider,
    ) -> DailyWeight {
        let (scope_used, raw_weight) = if !day.is_business || day.day_type.is_closed() {
            (DayScope::Closed, 0.0)
        } else if day.iso_dow == 7 {
            (
                DayScope::Sun,
                self.lookup(profile, ProfileScope::AllIncludingSunday, day),
            )
        } else if day.is_holiday {
            (
                DayScope::Hol,
                self.lookup(profile, ProfileScope::AllIncludingSunday, day),
            )
        } else {
            (
                DayScope::Biz,
                self.lookup(profile, ProfileScope::Business, day),
            )
        };

        DailyWeight {
            date: day.date,
            raw_weight,
            scope_used,
        }
    }

    /// 画像查询, 缺口与负值一律折算为 0
    fn lookup(
        &self,
        profile: &dyn HistoricalProfileProvider,
        scope: ProfileScope,
        day: &CalendarDay,
    ) -> f64 {
        profile
            .get(scope, day.iso_week, day.iso_dow)
            .unwrap_or(0.0)
            .max(0.0)
    }
}

impl Default for DayWeightComposer {
    fn default() -> Self {
        Self::new()
    }
}
