// ==========================================
// 月度目标日计划分解系统 - 滚动平滑原语
// ==========================================
// 依据: Allocation_Specs - 4.3 / 4.5 / 4.6
// ==========================================
// 职责: 居中滚动中位数/均值、EMA、高斯核
// 红线: min_periods = 1, 序列边缘不得产生 NaN
// ==========================================

/// 居中滚动均值
///
/// 窗口在序列两端自动截断 (min_periods = 1)。
///
/// # 参数
/// - `values`: 输入序列
/// - `window`: 窗口宽度 (应为奇数, 由配置层保证)
pub fn rolling_mean(values: &[f64], window: u32) -> Vec<f64> {
    let half = (window as usize) / 2;
    (0..values.len())
        .map(|i| {
            let lo = i.saturating_sub(half);
            let hi = (i + half + 1).min(values.len());
            let slice = &values[lo..hi];
            slice.iter().sum::<f64>() / slice.len() as f64
        })
        .collect()
}

/// 居中滚动中位数
///
/// 窗口在序列两端自动截断 (min_periods = 1);
/// 窗口内元素个数为偶数时取中间两数的均值。
pub fn rolling_median(values: &[f64], window: u32) -> Vec<f64> {
    let half = (window as usize) / 2;
    (0..values.len())
        .map(|i| {
            let lo = i.saturating_sub(half);
            let hi = (i + half + 1).min(values.len());
            let mut slice = values[lo..hi].to_vec();
            slice.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
            let n = slice.len();
            if n % 2 == 1 {
                slice[n / 2]
            } else {
                (slice[n / 2 - 1] + slice[n / 2]) / 2.0
            }
        })
        .collect()
}

/// 指数移动平均 (EMA)
///
/// 递归形式: s[0] = x[0], s[i] = α·x[i] + (1-α)·s[i-1],
/// 其中 α = 2 / (span + 1)。
pub fn ema(values: &[f64], span: f64) -> Vec<f64> {
    if values.is_empty() {
        return Vec::new();
    }
    let alpha = 2.0 / (span + 1.0);
    let mut out = Vec::with_capacity(values.len());
    let mut state = values[0];
    out.push(state);
    for &x in &values[1..] {
        state = alpha * x + (1.0 - alpha) * state;
        out.push(state);
    }
    out
}

/// 高斯核平滑
///
/// 核半径取 ceil(3σ), 序列边缘按实际覆盖的核重量重新归一,
/// 因此边缘同样不会失真为 0。
pub fn gaussian_smooth(values: &[f64], sigma: f64) -> Vec<f64> {
    if values.is_empty() {
        return Vec::new();
    }
    let radius = (3.0 * sigma).ceil() as i64;
    let kernel: Vec<f64> = (-radius..=radius)
        .map(|d| (-0.5 * (d as f64 / sigma).powi(2)).exp())
        .collect();

    let n = values.len() as i64;
    (0..n)
        .map(|i| {
            let mut acc = 0.0;
            let mut norm = 0.0;
            for (k, w) in kernel.iter().enumerate() {
                let j = i + (k as i64 - radius);
                if j >= 0 && j < n {
                    acc += w * values[j as usize];
                    norm += w;
                }
            }
            acc / norm
        })
        .collect()
}
