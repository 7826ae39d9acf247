use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::warn;

// ── TimestampParser ───────────────────────────────────────────────────────────

/// Parses post timestamps from the raw dataset representation.
///
/// The dataset stores publication times as milliseconds since the Unix epoch,
/// usually as a JSON integer but occasionally as a numeric string.
pub struct TimestampParser;

impl TimestampParser {
    /// Attempt to parse a [`serde_json::Value`] into a UTC [`DateTime`].
    ///
    /// Handles:
    /// * `null`       → `None`
    /// * JSON number  → epoch milliseconds (integer or float).
    /// * JSON string  → digits parsed as epoch milliseconds.
    pub fn parse_millis(value: &Value) -> Option<DateTime<Utc>> {
        match value {
            Value::Null => None,
            Value::Number(n) => {
                if let Some(ms) = n.as_i64() {
                    DateTime::from_timestamp_millis(ms)
                } else if let Some(f) = n.as_f64() {
                    DateTime::from_timestamp_millis(f.trunc() as i64)
                } else {
                    None
                }
            }
            Value::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return None;
                }
                match trimmed.parse::<i64>() {
                    Ok(ms) => DateTime::from_timestamp_millis(ms),
                    Err(_) => {
                        warn!("TimestampParser: could not parse timestamp \"{}\"", s);
                        None
                    }
                }
            }
            _ => None,
        }
    }
}

// ── NumericCoercer ────────────────────────────────────────────────────────────

/// Coerces loosely-typed metric fields to numbers.
///
/// Metric columns (`likesCount`, `commentsCount`, `engagement_rate`) arrive as
/// numbers, numeric strings, nulls or garbage. Anything that does not coerce
/// cleanly becomes the missing marker `None`, never zero, so that invalid
/// values are excluded from means rather than dragging them down.
pub struct NumericCoercer;

impl NumericCoercer {
    /// Coerce a raw JSON value to `f64`, returning `None` for anything that
    /// is not a finite number or a string parsing as one.
    pub fn coerce(value: &Value) -> Option<f64> {
        match value {
            Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
            Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            _ => None,
        }
    }

    /// Look up `key` in a JSON object and coerce it. Absent key → `None`.
    pub fn coerce_field(obj: &Value, key: &str) -> Option<f64> {
        obj.get(key).and_then(Self::coerce)
    }
}

// ── Hashtag extraction ────────────────────────────────────────────────────────

/// Derive the ordered hashtag list from a caption: whitespace-split tokens
/// that start with `#`. An absent caption yields an empty list.
pub fn extract_hashtags(caption: Option<&str>) -> Vec<String> {
    let Some(text) = caption else {
        return Vec::new();
    };
    text.split_whitespace()
        .filter(|word| word.starts_with('#'))
        .map(|word| word.to_string())
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use serde_json::json;

    // ── TimestampParser ──────────────────────────────────────────────────────

    #[test]
    fn test_parse_millis_integer() {
        // 2024-01-15T10:30:00Z = 1705314600000 ms
        let dt = TimestampParser::parse_millis(&json!(1_705_314_600_000_i64)).unwrap();
        assert_eq!(dt.year(), 2024);
        assert_eq!(dt.month(), 1);
        assert_eq!(dt.day(), 15);
        assert_eq!(dt.hour(), 10);
        assert_eq!(dt.minute(), 30);
    }

    #[test]
    fn test_parse_millis_zero_is_epoch() {
        let dt = TimestampParser::parse_millis(&json!(0)).unwrap();
        assert_eq!(dt.year(), 1970);
    }

    #[test]
    fn test_parse_millis_numeric_string() {
        let dt = TimestampParser::parse_millis(&json!("1705314600000")).unwrap();
        assert_eq!(dt.year(), 2024);
    }

    #[test]
    fn test_parse_millis_float_truncates() {
        let dt = TimestampParser::parse_millis(&json!(1_705_314_600_000.9_f64)).unwrap();
        assert_eq!(dt.year(), 2024);
    }

    #[test]
    fn test_parse_millis_null_returns_none() {
        assert!(TimestampParser::parse_millis(&json!(null)).is_none());
    }

    #[test]
    fn test_parse_millis_garbage_string_returns_none() {
        assert!(TimestampParser::parse_millis(&json!("yesterday")).is_none());
    }

    #[test]
    fn test_parse_millis_empty_string_returns_none() {
        assert!(TimestampParser::parse_millis(&json!("")).is_none());
    }

    // ── NumericCoercer ───────────────────────────────────────────────────────

    #[test]
    fn test_coerce_number() {
        assert_eq!(NumericCoercer::coerce(&json!(42)), Some(42.0));
        assert_eq!(NumericCoercer::coerce(&json!(3.25)), Some(3.25));
    }

    #[test]
    fn test_coerce_numeric_string() {
        assert_eq!(NumericCoercer::coerce(&json!("17")), Some(17.0));
        assert_eq!(NumericCoercer::coerce(&json!(" 2.5 ")), Some(2.5));
    }

    #[test]
    fn test_coerce_invalid_becomes_missing_not_zero() {
        assert_eq!(NumericCoercer::coerce(&json!("n/a")), None);
        assert_eq!(NumericCoercer::coerce(&json!(null)), None);
        assert_eq!(NumericCoercer::coerce(&json!(true)), None);
        assert_eq!(NumericCoercer::coerce(&json!({"v": 1})), None);
    }

    #[test]
    fn test_coerce_field_absent_returns_none() {
        let obj = json!({"likesCount": 10});
        assert_eq!(NumericCoercer::coerce_field(&obj, "likesCount"), Some(10.0));
        assert_eq!(NumericCoercer::coerce_field(&obj, "commentsCount"), None);
    }

    // ── extract_hashtags ─────────────────────────────────────────────────────

    #[test]
    fn test_extract_hashtags_basic() {
        let tags = extract_hashtags(Some("morning run #fitness #health done"));
        assert_eq!(tags, vec!["#fitness", "#health"]);
    }

    #[test]
    fn test_extract_hashtags_preserves_order() {
        let tags = extract_hashtags(Some("#b #a #c"));
        assert_eq!(tags, vec!["#b", "#a", "#c"]);
    }

    #[test]
    fn test_extract_hashtags_none_caption() {
        assert!(extract_hashtags(None).is_empty());
    }

    #[test]
    fn test_extract_hashtags_no_tags() {
        assert!(extract_hashtags(Some("plain caption")).is_empty());
    }

    #[test]
    fn test_extract_hashtags_mid_word_hash_not_counted() {
        // Only tokens *starting* with '#' qualify.
        let tags = extract_hashtags(Some("c# is not a hashtag #rust"));
        assert_eq!(tags, vec!["#rust"]);
    }
}
