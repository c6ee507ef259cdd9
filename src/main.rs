// ==========================================
// 月度目标日计划分解系统 - 演示主入口
// ==========================================
// 用途: 构造示例月份数据, 跑通完整分配流程并打印日计划
// ==========================================

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use chrono::NaiveDate;

use daily_target_aps::{
    ActivityProfile, AllocationConfig, AllocationProviders, CalendarDay, InMemoryCalendar,
    InMemoryProfile, InMemoryTargets, MonthKey, ProfileScope, TargetAllocationOrchestrator,
};

fn main() -> Result<()> {
    // 初始化日志系统
    daily_target_aps::logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", daily_target_aps::APP_NAME);
    tracing::info!("系统版本: {}", daily_target_aps::VERSION);
    tracing::info!("==================================================");

    // 示例范围: 2026 年 3 月整月
    let start = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2026, 3, 31).unwrap();

    // 日历: 全月开放
    let mut days = Vec::new();
    let mut cursor = start;
    while cursor <= end {
        days.push(CalendarDay::open(cursor));
        cursor = cursor.succ_opt().unwrap();
    }

    // 画像: 营业日周初偏高, 周末回落; 周日单独口径
    let mut profile = ActivityProfile::new();
    for day in &days {
        match day.iso_dow {
            7 => profile.insert(ProfileScope::AllIncludingSunday, day.iso_week, 7, 4.0),
            dow => profile.insert(
                ProfileScope::Business,
                day.iso_week,
                dow,
                14.0 - dow as f64,
            ),
        }
    }

    // 月目标
    let mut targets = InMemoryTargets::new(HashMap::new());
    targets.set(MonthKey::new(2026, 3), 9300.0);

    let providers = AllocationProviders::new(
        Arc::new(InMemoryCalendar::new(days)),
        Arc::new(InMemoryProfile::new(profile)),
        Arc::new(targets),
    );

    let orchestrator = TargetAllocationOrchestrator::new(AllocationConfig::default());
    let plan = orchestrator.produce_daily_plan(start, end, &providers)?;

    println!("{:<12} {:>10} {:>8}", "日期", "目标量", "口径");
    let mut total = 0.0;
    for item in &plan {
        total += item.target;
        println!(
            "{:<12} {:>10.2} {:>8}",
            item.date.format("%Y-%m-%d"),
            item.target,
            item.scope_used
        );
    }
    println!("{:<12} {:>10.2}", "合计", total);
    tracing::info!(month = %MonthKey::new(2026, 3), total, "演示计划输出完毕");

    // 演示用, 断言月守恒
    debug_assert!((total - 9300.0).abs() / 9300.0 < 1e-6);

    Ok(())
}
