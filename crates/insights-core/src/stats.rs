//! Descriptive-statistics primitives shared by the analytic views.
//!
//! All helpers operate on plain `f64` slices of *present* values; callers are
//! responsible for filtering out missing markers before calling in, so that
//! absent metrics never contribute to a mean or a quantile.

// ── Basic aggregates ──────────────────────────────────────────────────────────

/// Arithmetic mean. `None` on an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Median via [`percentile`] at p = 50.
pub fn median(values: &[f64]) -> Option<f64> {
    percentile(values, 50.0)
}

/// Round to two decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ── Percentiles ───────────────────────────────────────────────────────────────

/// Percentile with linear interpolation between closest ranks.
///
/// `p` is in `[0, 100]`. Input does not need to be sorted. Returns `None` on
/// an empty slice.
pub fn percentile(values: &[f64], p: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let n = sorted.len();
    if n == 1 {
        return Some(sorted[0]);
    }

    let rank = p / 100.0 * (n - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        return Some(sorted[lower]);
    }
    let weight = rank - lower as f64;
    Some(sorted[lower] * (1.0 - weight) + sorted[upper] * weight)
}

/// Quartiles and the Tukey outlier fences derived from them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IqrBounds {
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub lower_fence: f64,
    pub upper_fence: f64,
}

/// Compute Q1/Q3 with linear interpolation and the 1.5×IQR fences.
pub fn iqr_bounds(values: &[f64]) -> Option<IqrBounds> {
    let q1 = percentile(values, 25.0)?;
    let q3 = percentile(values, 75.0)?;
    let iqr = q3 - q1;
    Some(IqrBounds {
        q1,
        q3,
        iqr,
        lower_fence: q1 - 1.5 * iqr,
        upper_fence: q3 + 1.5 * iqr,
    })
}

// ── Rolling mean ──────────────────────────────────────────────────────────────

/// Trailing moving average over `window` points.
///
/// Leading positions with fewer than `window` predecessors average over what
/// is available (a partial window), so the output has the same length as the
/// input and no leading gaps.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    let window = window.max(1);
    let mut out = Vec::with_capacity(values.len());
    let mut running = 0.0;
    for (i, v) in values.iter().enumerate() {
        running += v;
        if i >= window {
            running -= values[i - window];
        }
        let count = (i + 1).min(window);
        out.push(running / count as f64);
    }
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────
