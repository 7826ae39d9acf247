//! Time-bucketed and keyword-driven trend aggregation.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use insights_core::models::PostTable;
use insights_core::stats::{mean, rolling_mean};
use insights_core::time_utils::week_start;
use regex::RegexBuilder;
use tracing::debug;

// ── Weekly engagement trend ───────────────────────────────────────────────────

/// Aggregated metrics for one calendar week of posts.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    /// Monday that starts the week.
    pub week_start: NaiveDate,
    /// Sum of present like counts in the week.
    pub likes: f64,
    /// Sum of present comment counts in the week.
    pub comments: f64,
    /// Sum of present engagement rates in the week.
    pub engagement: f64,
    /// Number of posts in the week.
    pub posts: usize,
    /// Trailing 7-point moving average of weekly like sums.
    pub likes_avg_7: f64,
    /// Trailing 7-point moving average of weekly comment sums.
    pub comments_avg_7: f64,
}

/// Bucket posts into calendar weeks (Monday start) and sum their metrics.
///
/// Posts without a timestamp are excluded entirely. Weeks come out in
/// ascending order; only weeks that contain at least one post appear. The
/// moving averages run over the weekly sums with partial leading windows, so
/// early weeks average over however many weeks exist so far.
pub fn weekly_trend(table: &PostTable) -> Vec<TrendPoint> {
    let mut buckets: BTreeMap<NaiveDate, (f64, f64, f64, usize)> = BTreeMap::new();

    for post in table.records() {
        let Some(ts) = post.timestamp else {
            continue;
        };
        let week = week_start(ts.date_naive());
        let bucket = buckets.entry(week).or_insert((0.0, 0.0, 0.0, 0));
        bucket.0 += post.likes.unwrap_or(0.0);
        bucket.1 += post.comments.unwrap_or(0.0);
        bucket.2 += post.engagement_rate.unwrap_or(0.0);
        bucket.3 += 1;
    }

    let likes_series: Vec<f64> = buckets.values().map(|b| b.0).collect();
    let comments_series: Vec<f64> = buckets.values().map(|b| b.1).collect();
    let likes_avg = rolling_mean(&likes_series, 7);
    let comments_avg = rolling_mean(&comments_series, 7);

    let points: Vec<TrendPoint> = buckets
        .into_iter()
        .enumerate()
        .map(|(i, (week, (likes, comments, engagement, posts)))| TrendPoint {
            week_start: week,
            likes,
            comments,
            engagement,
            posts,
            likes_avg_7: likes_avg[i],
            comments_avg_7: comments_avg[i],
        })
        .collect();

    debug!("weekly_trend: {} weeks from {} posts", points.len(), table.len());
    points
}

// ── Keyword trends ────────────────────────────────────────────────────────────

/// How one user-supplied keyword performs across captions.
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordTrend {
    /// The (lowercased) keyword.
    pub keyword: String,
    /// Number of captions containing this keyword.
    pub count: usize,
    /// Mean engagement rate over the captions containing this keyword.
    pub avg_engagement: f64,
}

/// Split a comma-separated keyword string into trimmed, lowercased, non-empty
/// keywords, preserving input order and dropping duplicates.
pub fn parse_keywords(input: &str) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();
    for raw in input.split(',') {
        let kw = raw.trim().to_lowercase();
        if !kw.is_empty() && !keywords.contains(&kw) {
            keywords.push(kw);
        }
    }
    keywords
}

/// Count and score keyword hits over captions.
///
/// Only posts with both a caption and an engagement rate participate. Each
/// keyword is matched case-insensitively as a literal; a caption containing
/// several keywords counts toward each of them, and the per-keyword mean
/// engagement runs over exactly that keyword's matching captions. Results
/// sort by count descending, keyword input order on ties. Keywords that
/// never match are absent from the output.
pub fn keyword_trends(table: &PostTable, keywords: &[String]) -> Vec<KeywordTrend> {
    // One literal matcher per keyword, in input order.
    let matchers: Vec<(&String, regex::Regex)> = keywords
        .iter()
        .filter_map(|kw| {
            RegexBuilder::new(&regex::escape(kw))
                .case_insensitive(true)
                .build()
                .ok()
                .map(|re| (kw, re))
        })
        .collect();
    if matchers.is_empty() {
        return Vec::new();
    }

    // Engagement rates of every matching caption, per keyword.
    let mut rates: Vec<Vec<f64>> = vec![Vec::new(); matchers.len()];

    for post in table.records() {
        let (Some(caption), Some(rate)) = (post.caption.as_deref(), post.engagement_rate) else {
            continue;
        };
        for ((_, re), bucket) in matchers.iter().zip(rates.iter_mut()) {
            if re.is_match(caption) {
                bucket.push(rate);
            }
        }
    }

    let mut trends: Vec<KeywordTrend> = matchers
        .iter()
        .zip(rates.iter())
        .filter(|(_, bucket)| !bucket.is_empty())
        .map(|((kw, _), bucket)| KeywordTrend {
            keyword: (*kw).clone(),
            count: bucket.len(),
            avg_engagement: mean(bucket).unwrap_or_default(),
        })
        .collect();

    // Stable sort keeps input order among equal counts.
    trends.sort_by(|a, b| b.count.cmp(&a.count));
    trends
}

/// The keyword with the highest mean engagement, first on ties.
pub fn best_keyword(trends: &[KeywordTrend]) -> Option<&KeywordTrend> {
    let mut best: Option<&KeywordTrend> = None;
    for trend in trends {
        match best {
            Some(b) if trend.avg_engagement <= b.avg_engagement => {}
            _ => best = Some(trend),
        }
    }
    best
}

// ── Tests ─────────────────────────────────────────────────────────────────────
