//! Dataset file loading for insta-insights.
//!
//! Reads the refined dataset JSON file (a top-level array of post objects)
//! and converts it into a [`PostTable`] for downstream aggregation.

use std::path::Path;

use insights_core::coerce::{extract_hashtags, NumericCoercer, TimestampParser};
use insights_core::error::{InsightsError, Result};
use insights_core::models::{PostRecord, PostTable};
use tracing::{debug, warn};

// ── Public API ────────────────────────────────────────────────────────────────

/// Load and decode the dataset at `path`.
///
/// Fails fast on I/O errors, invalid JSON, and a top level that is not an
/// array. Individual rows are decoded leniently: non-object rows are skipped
/// with a warning and badly-typed fields become missing markers, so a single
/// dirty row never takes the dashboard down.
pub fn load_posts(path: &Path) -> Result<PostTable> {
    let content = std::fs::read_to_string(path).map_err(|source| InsightsError::DatasetRead {
        path: path.to_path_buf(),
        source,
    })?;

    let value: serde_json::Value = serde_json::from_str(&content)?;

    let rows = value.as_array().ok_or_else(|| {
        InsightsError::DatasetShape(format!(
            "expected a top-level array of posts in {}",
            path.display()
        ))
    })?;

    let mut records: Vec<PostRecord> = Vec::with_capacity(rows.len());
    let mut skipped = 0u64;

    for row in rows {
        if !row.is_object() {
            skipped += 1;
            warn!("skipping non-object dataset row: {}", row);
            continue;
        }
        records.push(decode_row(row));
    }

    debug!(
        "Loaded {} posts from {} ({} rows skipped)",
        records.len(),
        path.display(),
        skipped
    );

    Ok(PostTable::new(records))
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Decode a single JSON object into a [`PostRecord`].
///
/// Metric fields coerce leniently to `Option<f64>`; the hashtag list is
/// derived from the caption at decode time.
fn decode_row(row: &serde_json::Value) -> PostRecord {
    let timestamp = row
        .get("timestamp")
        .and_then(|v| TimestampParser::parse_millis(v));

    let caption = row
        .get("caption")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string());

    let media_type = row
        .get("type")
        .and_then(|v| v.as_str())
        .unwrap_or("unknown")
        .to_string();

    let hashtags = extract_hashtags(caption.as_deref());

    PostRecord {
        timestamp,
        caption,
        media_type,
        likes: NumericCoercer::coerce_field(row, "likesCount"),
        comments: NumericCoercer::coerce_field(row, "commentsCount"),
        engagement_rate: NumericCoercer::coerce_field(row, "engagement_rate"),
        hashtags,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
