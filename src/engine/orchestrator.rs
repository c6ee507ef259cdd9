// ==========================================
// 月度目标日计划分解系统 - 引擎编排器
// ==========================================
// 依据: Allocation_Specs - 2. 系统总览 (计算主流程)
// 用途: 协调各分配引擎的执行顺序
// ==========================================
// 红线: 纯阶段管线, 每个阶段消费不可变输入产出新序列;
//       引擎跨调用无共享可变状态, 同输入必同输出
// ==========================================

use chrono::NaiveDate;
use tracing::{debug, info, instrument};

use crate::config::AllocationConfig;
use crate::domain::plan::{DailyPlanItem, DailyWeight, WeeklyBucket};
use crate::engine::bridge::CrossPeriodBridgeSmoother;
use crate::engine::day_weight::DayWeightComposer;
use crate::engine::distributor::MonthlyDistributor;
use crate::engine::global_smooth::GlobalSmoother;
use crate::engine::intraweek::IntraweekSmoother;
use crate::engine::providers::AllocationProviders;
use crate::engine::weekly::WeeklyNormalizer;
use crate::error::AllocationError;

/// 请求范围上限 (天)
pub const MAX_RANGE_DAYS: i64 = 3660;

// ==========================================
// TargetAllocationOrchestrator - 引擎编排器
// ==========================================
pub struct TargetAllocationOrchestrator {
    config: AllocationConfig,
    composer: DayWeightComposer,
    normalizer: WeeklyNormalizer,
    smoother: IntraweekSmoother,
    distributor: MonthlyDistributor,
    bridge: CrossPeriodBridgeSmoother,
    global: GlobalSmoother,
}

impl TargetAllocationOrchestrator {
    /// 创建新的编排器实例
    ///
    /// # 参数
    /// - `config`: 分配配置 (produce_daily_plan 执行时校验)
    pub fn new(config: AllocationConfig) -> Self {
        Self {
            config,
            composer: DayWeightComposer::new(),
            normalizer: WeeklyNormalizer::new(),
            smoother: IntraweekSmoother::new(),
            distributor: MonthlyDistributor::new(),
            bridge: CrossPeriodBridgeSmoother::new(),
            global: GlobalSmoother::new(),
        }
    }

    /// 执行完整分配流程, 产出有序日计划
    ///
    /// # 参数
    /// - `start`, `end`: 请求范围 (闭区间)
    /// - `providers`: 只读数据提供者集合 (日历/画像/月目标)
    ///
    /// # 返回
    /// 按日期升序的日计划; 任何契约违规返回 AllocationError
    #[instrument(skip(self, providers), fields(%start, %end))]
    pub fn produce_daily_plan(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        providers: &AllocationProviders,
    ) -> Result<Vec<DailyPlanItem>, AllocationError> {
        info!(config = %self.config.snapshot_json(), "开始执行目标分配流程");

        // ==========================================
        // 步骤0: 配置与范围校验
        // ==========================================
        self.config.validate()?;

        if end < start {
            return Err(AllocationError::InvalidRange { start, end });
        }
        let span_days = (end - start).num_days() + 1;
        if span_days > MAX_RANGE_DAYS {
            return Err(AllocationError::RangeTooLong {
                days: span_days,
                max_days: MAX_RANGE_DAYS,
            });
        }

        // ==========================================
        // 步骤1: 取日历并校验完整性
        // ==========================================
        let days = providers.calendar.get_range(start, end);
        let mut expected = start;
        for day in &days {
            if day.date != expected {
                return Err(AllocationError::MissingCalendarData { date: expected });
            }
            expected = day
                .date
                .succ_opt()
                .ok_or(AllocationError::InvalidRange { start, end })?;
        }
        if (days.len() as i64) != span_days {
            return Err(AllocationError::MissingCalendarData { date: expected });
        }
        debug!(days = days.len(), "步骤1: 日历就绪");

        // ==========================================
        // 步骤2: 合成日权重
        // ==========================================
        let weights: Vec<DailyWeight> = days
            .iter()
            .map(|d| self.composer.compose(d, providers.profile.as_ref()))
            .collect();
        debug!("步骤2: 日权重合成完成");

        // ==========================================
        // 步骤3: 周分组与原始份额
        // ==========================================
        let buckets = self.normalizer.group(&days, &weights);
        debug!(buckets = buckets.len(), "步骤3: 周分组完成");

        // ==========================================
        // 步骤4: 周内平滑
        // ==========================================
        let smoothed: Vec<WeeklyBucket> = buckets
            .iter()
            .map(|b| WeeklyBucket {
                shares: self.smoother.smooth(b, &self.config),
                ..b.clone()
            })
            .collect();
        debug!("步骤4: 周内平滑完成");

        // ==========================================
        // 步骤5: 月度两级分配
        // ==========================================
        let mut plan = self
            .distributor
            .distribute(&smoothed, providers.targets.as_ref())?;
        debug!("步骤5: 月度分配完成");

        // ==========================================
        // 步骤6: 可选跨期桥接平滑
        // ==========================================
        if self.config.bridge_enabled {
            plan = self.bridge.smooth(&plan, &self.config);
            debug!("步骤6: 桥接平滑完成");
        }

        // ==========================================
        // 步骤7: 可选全局平滑
        // ==========================================
        if self.config.global_smoother.is_some() {
            plan = self.global.smooth(&plan, &self.config);
            debug!("步骤7: 全局平滑完成");
        }

        info!(plan_len = plan.len(), "目标分配流程完成");
        Ok(plan)
    }
}
