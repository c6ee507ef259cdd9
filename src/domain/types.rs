// ==========================================
// 月度目标日计划分解系统 - 领域类型定义
// ==========================================
// 依据: Allocation_Specs - 3. 数据模型
// 红线: 所有枚举必须可序列化且可读 (Display)
// ==========================================

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 日类型 (Day Type)
// ==========================================
// 来自外部日历分类器, MAINTENANCE 在分配层等同停业
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DayType {
    Open,        // 正常营业
    Closed,      // 停业
    Maintenance, // 检修停业
}

impl DayType {
    /// 分配层视角: 是否停业
    pub fn is_closed(&self) -> bool {
        matches!(self, DayType::Closed | DayType::Maintenance)
    }
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayType::Open => write!(f, "OPEN"),
            DayType::Closed => write!(f, "CLOSED"),
            DayType::Maintenance => write!(f, "MAINTENANCE"),
        }
    }
}

// ==========================================
// 日口径 (Day Scope)
// ==========================================
// 权重合成时选定的画像口径, 贯穿输出 (scope_used)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DayScope {
    Biz,    // 普通营业日
    Sun,    // 周日
    Hol,    // 非周日节假日
    Closed, // 停业日 (权重恒为 0)
}

impl DayScope {
    /// 是否属于营业日口径 (参与周内平滑与赤字再分配)
    pub fn is_business(&self) -> bool {
        matches!(self, DayScope::Biz)
    }

    /// 是否属于开放的非营业日口径 (受 non_business_share_cap 约束)
    pub fn is_non_business_open(&self) -> bool {
        matches!(self, DayScope::Sun | DayScope::Hol)
    }
}

impl fmt::Display for DayScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayScope::Biz => write!(f, "BIZ"),
            DayScope::Sun => write!(f, "SUN"),
            DayScope::Hol => write!(f, "HOL"),
            DayScope::Closed => write!(f, "CLOSED"),
        }
    }
}

// ==========================================
// 画像口径 (Profile Scope)
// ==========================================
// 历史活动画像的两套口径:
// - BUSINESS: 仅营业日样本
// - ALL_INCLUDING_SUNDAY: 含周日的全量样本 (节假日借用此口径,
//   因为营业日口径没有节假日观测)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProfileScope {
    Business,
    AllIncludingSunday,
}

impl fmt::Display for ProfileScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileScope::Business => write!(f, "BUSINESS"),
            ProfileScope::AllIncludingSunday => write!(f, "ALL_INCLUDING_SUNDAY"),
        }
    }
}

// ==========================================
// 平滑方法 (Smooth Method)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SmoothMethod {
    /// 先滚动中位数再滚动均值 (默认, 抗离群)
    #[default]
    MedianThenMean,
    /// 仅滚动均值
    MeanOnly,
}

impl fmt::Display for SmoothMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SmoothMethod::MedianThenMean => write!(f, "median_then_mean"),
            SmoothMethod::MeanOnly => write!(f, "mean_only"),
        }
    }
}

// ==========================================
// 全局平滑器类型 (Global Smoother Kind)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GlobalSmootherKind {
    /// 指数移动平均, 参数为 span
    Ema,
    /// 高斯核, 参数为 sigma
    Gaussian,
}

impl fmt::Display for GlobalSmootherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GlobalSmootherKind::Ema => write!(f, "ema"),
            GlobalSmootherKind::Gaussian => write!(f, "gaussian"),
        }
    }
}

// ==========================================
// 月键 (Month Key)
// ==========================================
// 月度目标与月守恒校验的分组键
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32, // 1-12
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// 由日期取其所属月
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

// ==========================================
// 周键 (Week Key)
// ==========================================
// 周桶分组键: 同一 ISO 周跨月时拆成两个桶,
// 各自归属所在月 (月守恒的前提)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WeekKey {
    pub month: MonthKey,
    pub iso_year: i32,
    pub iso_week: u32,
}

impl fmt::Display for WeekKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/W{:02}@{}", self.iso_year, self.iso_week, self.month)
    }
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_type_closed() {
        assert!(!DayType::Open.is_closed());
        assert!(DayType::Closed.is_closed());
        assert!(DayType::Maintenance.is_closed());
    }

    #[test]
    fn test_month_key_from_date() {
        let d = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
        assert_eq!(MonthKey::from_date(d), MonthKey::new(2026, 3));
        assert_eq!(MonthKey::new(2026, 3).to_string(), "2026-03");
    }

    #[test]
    fn test_scope_serde_format() {
        let s = serde_json::to_string(&DayScope::Hol).unwrap();
        assert_eq!(s, "\"HOL\"");
        let p: ProfileScope = serde_json::from_str("\"ALL_INCLUDING_SUNDAY\"").unwrap();
        assert_eq!(p, ProfileScope::AllIncludingSunday);
    }
}
