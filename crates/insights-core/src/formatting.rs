//! Display formatting for metric values and captions.

/// Format a float with comma-grouped thousands and a fixed number of
/// decimal places.
///
/// # Examples
///
/// ```
/// use insights_core::formatting::format_number;
///
/// assert_eq!(format_number(1234.5, 1), "1,234.5");
/// assert_eq!(format_number(1234567.0, 0), "1,234,567");
/// assert_eq!(format_number(-9876.5, 1), "-9,876.5");
/// ```
pub fn format_number(value: f64, decimals: u32) -> String {
    let scale = 10_f64.powi(decimals as i32);
    // One ulp of relative nudge keeps midpoints like 1.005 from rounding
    // down through their binary representation.
    let rounded = (value.abs() * scale * (1.0 + f64::EPSILON)).round() / scale;

    let plain = format!("{:.*}", decimals as usize, rounded);
    let (int_digits, frac_digits) = match plain.split_once('.') {
        Some((head, tail)) => (head, Some(tail)),
        None => (plain.as_str(), None),
    };

    let mut out = String::with_capacity(plain.len() + 4);
    if value < 0.0 && rounded != 0.0 {
        out.push('-');
    }
    let len = int_digits.len();
    for (i, digit) in int_digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }
    if let Some(frac) = frac_digits {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Format an optional metric, rendering the missing marker as `"-"`.
///
/// # Examples
///
/// ```
/// use insights_core::formatting::format_metric;
///
/// assert_eq!(format_metric(Some(1234.5), 1), "1,234.5");
/// assert_eq!(format_metric(None, 1), "-");
/// ```
pub fn format_metric(value: Option<f64>, decimals: u32) -> String {
    value.map_or_else(|| "-".to_string(), |v| format_number(v, decimals))
}

/// Cut a caption down to `max_chars` characters, appending an ellipsis when
/// anything was dropped. Counting characters rather than bytes keeps
/// multi-byte captions intact.
///
/// # Examples
///
/// ```
/// use insights_core::formatting::truncate_caption;
///
/// assert_eq!(truncate_caption("short", 10), "short");
/// assert_eq!(truncate_caption("a longer caption", 8), "a longer…");
/// ```
pub fn truncate_caption(caption: &str, max_chars: usize) -> String {
    match caption.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}…", &caption[..cut]),
        None => caption.to_string(),
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── format_number ────────────────────────────────────────────────────────

    #[test]
    fn test_format_number_zero() {
        assert_eq!(format_number(0.0, 0), "0");
        assert_eq!(format_number(0.0, 2), "0.00");
    }

    #[test]
    fn test_format_number_rounds_to_decimals() {
        assert_eq!(format_number(123.456, 2), "123.46");
        assert_eq!(format_number(1.005, 2), "1.01");
    }

    #[test]
    fn test_format_number_groups_thousands() {
        assert_eq!(format_number(5.0, 0), "5");
        assert_eq!(format_number(999.0, 0), "999");
        assert_eq!(format_number(1_000.0, 0), "1,000");
        assert_eq!(format_number(1_234.5, 1), "1,234.5");
        assert_eq!(format_number(1_234_567.0, 0), "1,234,567");
    }

    #[test]
    fn test_format_number_negative() {
        assert_eq!(format_number(-9_876.5, 1), "-9,876.5");
        assert_eq!(format_number(-12.0, 0), "-12");
    }

    // ── format_metric ────────────────────────────────────────────────────────

    #[test]
    fn test_format_metric_present() {
        assert_eq!(format_metric(Some(2.345), 2), "2.35");
    }

    #[test]
    fn test_format_metric_missing_is_dash() {
        assert_eq!(format_metric(None, 2), "-");
    }

    // ── truncate_caption ─────────────────────────────────────────────────────

    #[test]
    fn test_truncate_caption_short_and_exact_unchanged() {
        assert_eq!(truncate_caption("hello", 10), "hello");
        assert_eq!(truncate_caption("hello", 5), "hello");
    }

    #[test]
    fn test_truncate_caption_cuts_with_ellipsis() {
        assert_eq!(truncate_caption("hello world", 5), "hello…");
    }

    #[test]
    fn test_truncate_caption_multibyte() {
        assert_eq!(truncate_caption("héllo", 2), "hé…");
    }
}
