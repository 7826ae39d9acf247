//! Pure aggregation behind the non-trend dashboard views.
//!
//! Every function here takes the loaded [`PostTable`] plus view parameters
//! and returns a plain report struct; rendering lives entirely in the UI
//! crate. Missing metrics are excluded from every mean and quantile.

use std::collections::BTreeMap;

use insights_core::models::{PostRecord, PostTable};
use insights_core::stats::{iqr_bounds, mean, median, round2};
use insights_core::time_utils::{hour_12, Meridiem};

// ── Top posts ─────────────────────────────────────────────────────────────────

/// The up-to-ten posts with the highest engagement rate, descending.
///
/// Posts without an engagement rate never qualify. The sort is stable, so
/// equal rates keep dataset order.
pub fn top_posts(table: &PostTable) -> Vec<&PostRecord> {
    let mut ranked: Vec<&PostRecord> = table
        .records()
        .iter()
        .filter(|p| p.engagement_rate.is_some())
        .collect();
    ranked.sort_by(|a, b| {
        b.engagement_rate
            .partial_cmp(&a.engagement_rate)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked.truncate(10);
    ranked
}

// ── Content type summary ──────────────────────────────────────────────────────

/// Mean metrics for one content type, rounded to two decimals.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentTypeRow {
    pub media_type: String,
    /// Mean over posts of this type with a present like count.
    pub avg_likes: Option<f64>,
    pub avg_comments: Option<f64>,
    pub avg_engagement: Option<f64>,
}

/// Group posts by content type and average each metric over present values.
///
/// Rows come out in lexicographic type order. A type whose posts all miss a
/// metric gets a missing mean for it rather than zero.
pub fn content_type_summary(table: &PostTable) -> Vec<ContentTypeRow> {
    let mut groups: BTreeMap<&str, (Vec<f64>, Vec<f64>, Vec<f64>)> = BTreeMap::new();

    for post in table.records() {
        let group = groups.entry(post.media_type.as_str()).or_default();
        if let Some(v) = post.likes {
            group.0.push(v);
        }
        if let Some(v) = post.comments {
            group.1.push(v);
        }
        if let Some(v) = post.engagement_rate {
            group.2.push(v);
        }
    }

    groups
        .into_iter()
        .map(|(media_type, (likes, comments, engagement))| ContentTypeRow {
            media_type: media_type.to_string(),
            avg_likes: mean(&likes).map(round2),
            avg_comments: mean(&comments).map(round2),
            avg_engagement: mean(&engagement).map(round2),
        })
        .collect()
}

// ── Engagement distribution ───────────────────────────────────────────────────

/// A post flagged as an engagement outlier.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlierPost {
    pub caption: String,
    pub engagement_rate: f64,
}

/// Summary statistics over present engagement rates plus Tukey outliers.
#[derive(Debug, Clone, PartialEq)]
pub struct EngagementDistribution {
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    pub q1: f64,
    pub q3: f64,
    /// Posts outside the 1.5×IQR fences, in dataset order.
    pub outliers: Vec<OutlierPost>,
}

/// Describe the engagement-rate distribution.
///
/// Returns `None` when no post carries an engagement rate.
pub fn engagement_distribution(table: &PostTable) -> Option<EngagementDistribution> {
    let rates: Vec<f64> = table
        .records()
        .iter()
        .filter_map(|p| p.engagement_rate)
        .collect();

    let bounds = iqr_bounds(&rates)?;
    let outliers = table
        .records()
        .iter()
        .filter_map(|p| {
            let rate = p.engagement_rate?;
            (rate < bounds.lower_fence || rate > bounds.upper_fence).then(|| OutlierPost {
                caption: p.caption_text().to_string(),
                engagement_rate: rate,
            })
        })
        .collect();

    Some(EngagementDistribution {
        mean: mean(&rates)?,
        median: median(&rates)?,
        min: rates.iter().copied().fold(f64::INFINITY, f64::min),
        max: rates.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        q1: bounds.q1,
        q3: bounds.q3,
        outliers,
    })
}

// ── Hashtag frequency ─────────────────────────────────────────────────────────

/// The ten most frequent hashtags, count descending.
///
/// Equal counts keep first-encountered order across the dataset.
pub fn hashtag_frequency(table: &PostTable) -> Vec<(String, usize)> {
    // First-encountered order so ties stay deterministic.
    let mut counts: Vec<(String, usize)> = Vec::new();

    for post in table.records() {
        for tag in &post.hashtags {
            match counts.iter_mut().find(|(t, _)| t == tag) {
                Some((_, n)) => *n += 1,
                None => counts.push((tag.clone(), 1)),
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(10);
    counts
}

// ── Posting time analysis ─────────────────────────────────────────────────────

/// Mean engagement for one 12-hour clock slot.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSlot {
    /// Clock hour, 1–12.
    pub hour: u32,
    pub meridiem: Meridiem,
    pub avg_engagement: f64,
    pub posts: usize,
}

impl TimeSlot {
    /// Label such as `"1 PM"`.
    pub fn label(&self) -> String {
        format!("{} {}", self.hour, self.meridiem)
    }
}

/// Group posts by 12-hour posting slot and average engagement per slot.
///
/// Only posts with both a timestamp and an engagement rate participate.
/// Slots sort by clock hour ascending with AM before PM, so the sequence is
/// 1 AM, 1 PM, 2 AM, … 12 PM. Hour 0 shows as 12 AM and hour 12 as 12 PM.
pub fn posting_times(table: &PostTable) -> Vec<TimeSlot> {
    use chrono::Timelike as _;

    let mut groups: BTreeMap<(u32, Meridiem), Vec<f64>> = BTreeMap::new();

    for post in table.records() {
        let (Some(ts), Some(rate)) = (post.timestamp, post.engagement_rate) else {
            continue;
        };
        groups.entry(hour_12(ts.hour())).or_default().push(rate);
    }

    groups
        .into_iter()
        .filter_map(|((hour, meridiem), rates)| {
            Some(TimeSlot {
                hour,
                meridiem,
                avg_engagement: mean(&rates)?,
                posts: rates.len(),
            })
        })
        .collect()
}

/// The slot with the highest mean engagement, first on ties.
pub fn best_posting_time(slots: &[TimeSlot]) -> Option<&TimeSlot> {
    let mut best: Option<&TimeSlot> = None;
    for slot in slots {
        match best {
            Some(b) if slot.avg_engagement <= b.avg_engagement => {}
            _ => best = Some(slot),
        }
    }
    best
}

// ── Engagement ratios ─────────────────────────────────────────────────────────

/// The post with the highest comments-to-likes ratio.
#[derive(Debug, Clone, PartialEq)]
pub struct RatioPost {
    pub caption: String,
    pub likes: f64,
    pub comments: f64,
    pub ratio: f64,
}

/// Comments-to-likes ratio summary.
#[derive(Debug, Clone, PartialEq)]
pub struct RatioReport {
    /// Mean ratio over qualifying posts.
    pub avg_ratio: f64,
    /// Highest-ratio post; dataset order wins ties.
    pub top: RatioPost,
}

/// Compute per-post comments-to-likes ratios and summarise them.
///
/// A post qualifies only when both counts are present and its like count is
/// strictly positive, so division by zero can never occur. Returns `None`
/// when nothing qualifies.
pub fn engagement_ratios(table: &PostTable) -> Option<RatioReport> {
    let mut ratios: Vec<f64> = Vec::new();
    let mut top: Option<RatioPost> = None;

    for post in table.records() {
        let (Some(likes), Some(comments)) = (post.likes, post.comments) else {
            continue;
        };
        if likes <= 0.0 {
            continue;
        }
        let ratio = comments / likes;
        ratios.push(ratio);

        let replace = match &top {
            Some(t) => ratio > t.ratio,
            None => true,
        };
        if replace {
            top = Some(RatioPost {
                caption: post.caption_text().to_string(),
                likes,
                comments,
                ratio,
            });
        }
    }

    Some(RatioReport {
        avg_ratio: mean(&ratios)?,
        top: top?,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
