//! Analytics panel rendering: one function per dashboard view.
//!
//! Every function takes an already-computed report from `insights-data` and
//! draws a bordered table or summary into `area`; no aggregation happens
//! here.

use insights_core::formatting::{format_metric, format_number, truncate_caption};
use insights_core::models::PostRecord;
use insights_data::trends::{best_keyword, KeywordTrend, TrendPoint};
use insights_data::views::{
    best_posting_time, ContentTypeRow, EngagementDistribution, RatioReport, TimeSlot,
};
use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::themes::Theme;

const CAPTION_WIDTH: usize = 40;

// ── Weekly trend ──────────────────────────────────────────────────────────────

/// Render the weekly engagement trend table.
pub fn render_trend(frame: &mut Frame, area: Rect, points: &[TrendPoint], theme: &Theme) {
    if points.is_empty() {
        render_no_data(frame, area, "No posts with timestamps to chart.", theme);
        return;
    }

    let header = Row::new(
        ["Week", "Likes", "Comments", "Engagement", "Posts", "Likes MA7", "Comments MA7"]
            .iter()
            .map(|h| Cell::from(*h).style(theme.table_header)),
    )
    .height(1);

    let mut rows: Vec<Row> = points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            Row::new(vec![
                Cell::from(p.week_start.format("%Y-%m-%d").to_string()),
                Cell::from(format_number(p.likes, 0)),
                Cell::from(format_number(p.comments, 0)),
                Cell::from(format_number(p.engagement, 2)),
                Cell::from(p.posts.to_string()),
                Cell::from(format_number(p.likes_avg_7, 1)),
                Cell::from(format_number(p.comments_avg_7, 1)),
            ])
            .style(row_style(theme, i))
        })
        .collect();

    // Cross-week totals row at the bottom.
    let total_likes: f64 = points.iter().map(|p| p.likes).sum();
    let total_comments: f64 = points.iter().map(|p| p.comments).sum();
    let total_engagement: f64 = points.iter().map(|p| p.engagement).sum();
    let total_posts: usize = points.iter().map(|p| p.posts).sum();
    rows.push(
        Row::new(vec![
            Cell::from("Total"),
            Cell::from(format_number(total_likes, 0)),
            Cell::from(format_number(total_comments, 0)),
            Cell::from(format_number(total_engagement, 2)),
            Cell::from(total_posts.to_string()),
            Cell::from(""),
            Cell::from(""),
        ])
        .style(theme.table_total),
    );

    let widths = [
        Constraint::Length(12),
        Constraint::Length(12),
        Constraint::Length(10),
        Constraint::Length(12),
        Constraint::Length(7),
        Constraint::Length(12),
        Constraint::Length(14),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(titled_block(" Engagement Trends (weekly) "))
        .style(theme.text);
    frame.render_widget(table, area);
}

// ── Top posts ─────────────────────────────────────────────────────────────────

/// Render the top-posts-by-engagement table.
pub fn render_top_posts(frame: &mut Frame, area: Rect, posts: &[&PostRecord], theme: &Theme) {
    if posts.is_empty() {
        render_no_data(frame, area, "No posts carry an engagement rate.", theme);
        return;
    }

    let header = Row::new(
        ["#", "Caption", "Likes", "Comments", "Engagement"]
            .iter()
            .map(|h| Cell::from(*h).style(theme.table_header)),
    )
    .height(1);

    let rows: Vec<Row> = posts
        .iter()
        .enumerate()
        .map(|(i, p)| {
            Row::new(vec![
                Cell::from((i + 1).to_string()),
                Cell::from(truncate_caption(p.caption_text(), CAPTION_WIDTH)),
                Cell::from(format_metric(p.likes, 0)),
                Cell::from(format_metric(p.comments, 0)),
                Cell::from(format_metric(p.engagement_rate, 2)),
            ])
            .style(row_style(theme, i))
        })
        .collect();

    let widths = [
        Constraint::Length(4),
        Constraint::Length(CAPTION_WIDTH as u16 + 2),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(12),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(titled_block(" Top Performing Posts "))
        .style(theme.text);
    frame.render_widget(table, area);
}

// ── Content types ─────────────────────────────────────────────────────────────

/// Render mean metrics per content type.
pub fn render_content_types(frame: &mut Frame, area: Rect, rows: &[ContentTypeRow], theme: &Theme) {
    if rows.is_empty() {
        render_no_data(frame, area, "No posts loaded.", theme);
        return;
    }

    let header = Row::new(
        ["Type", "Avg Likes", "Avg Comments", "Avg Engagement"]
            .iter()
            .map(|h| Cell::from(*h).style(theme.table_header)),
    )
    .height(1);

    let data_rows: Vec<Row> = rows
        .iter()
        .enumerate()
        .map(|(i, r)| {
            Row::new(vec![
                Cell::from(r.media_type.clone()),
                Cell::from(format_metric(r.avg_likes, 2)),
                Cell::from(format_metric(r.avg_comments, 2)),
                Cell::from(format_metric(r.avg_engagement, 2)),
            ])
            .style(row_style(theme, i))
        })
        .collect();

    let widths = [
        Constraint::Length(14),
        Constraint::Length(12),
        Constraint::Length(14),
        Constraint::Length(16),
    ];

    let table = Table::new(data_rows, widths)
        .header(header)
        .block(titled_block(" Content Type Distribution "))
        .style(theme.text);
    frame.render_widget(table, area);
}

// ── Engagement distribution ───────────────────────────────────────────────────

/// Render the engagement-rate summary statistics and outlier list.
pub fn render_distribution(
    frame: &mut Frame,
    area: Rect,
    dist: Option<&EngagementDistribution>,
    theme: &Theme,
) {
    let Some(dist) = dist else {
        render_no_data(frame, area, "No posts carry an engagement rate.", theme);
        return;
    };

    let mut lines = vec![
        stat_line("Mean", dist.mean, theme),
        stat_line("Median", dist.median, theme),
        stat_line("Min", dist.min, theme),
        stat_line("Max", dist.max, theme),
        stat_line("Q1", dist.q1, theme),
        stat_line("Q3", dist.q3, theme),
        Line::from(""),
    ];

    if dist.outliers.is_empty() {
        lines.push(Line::from(Span::styled(
            "No outliers detected (1.5×IQR).",
            theme.dim,
        )));
    } else {
        lines.push(Line::from(Span::styled(
            format!("{} outlier(s) outside the 1.5×IQR fences:", dist.outliers.len()),
            theme.warning,
        )));
        for outlier in &dist.outliers {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  {} ", format_number(outlier.engagement_rate, 2)),
                    theme.value,
                ),
                Span::styled(
                    truncate_caption(&outlier.caption, CAPTION_WIDTH),
                    theme.text,
                ),
            ]));
        }
    }

    let paragraph = Paragraph::new(lines).block(titled_block(" Engagement Rate Distribution "));
    frame.render_widget(paragraph, area);
}

// ── Hashtags ──────────────────────────────────────────────────────────────────

/// Render the top-hashtags frequency table.
pub fn render_hashtags(frame: &mut Frame, area: Rect, counts: &[(String, usize)], theme: &Theme) {
    if counts.is_empty() {
        render_no_data(frame, area, "No hashtags found in any caption.", theme);
        return;
    }

    let header = Row::new(
        ["Hashtag", "Count"]
            .iter()
            .map(|h| Cell::from(*h).style(theme.table_header)),
    )
    .height(1);

    let rows: Vec<Row> = counts
        .iter()
        .enumerate()
        .map(|(i, (tag, count))| {
            Row::new(vec![Cell::from(tag.clone()), Cell::from(count.to_string())])
                .style(row_style(theme, i))
        })
        .collect();

    let widths = [Constraint::Length(30), Constraint::Length(8)];

    let table = Table::new(rows, widths)
        .header(header)
        .block(titled_block(" Top Hashtags "))
        .style(theme.text);
    frame.render_widget(table, area);
}

// ── Posting times ─────────────────────────────────────────────────────────────

/// Render mean engagement per 12-hour posting slot with the best slot called
/// out underneath.
pub fn render_posting_times(frame: &mut Frame, area: Rect, slots: &[TimeSlot], theme: &Theme) {
    if slots.is_empty() {
        render_no_data(
            frame,
            area,
            "No posts with both a timestamp and an engagement rate.",
            theme,
        );
        return;
    }

    let mut lines: Vec<Line> = slots
        .iter()
        .map(|slot| {
            Line::from(vec![
                Span::styled(format!("{:>6}  ", slot.label()), theme.label),
                Span::styled(format_number(slot.avg_engagement, 2), theme.value),
                Span::styled(format!("  ({} posts)", slot.posts), theme.dim),
            ])
        })
        .collect();

    if let Some(best) = best_posting_time(slots) {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Best time to post: ", theme.info),
            Span::styled(best.label(), theme.success),
            Span::styled(
                format!(
                    " (avg engagement {})",
                    format_number(best.avg_engagement, 2)
                ),
                theme.text,
            ),
        ]));
    }

    let paragraph = Paragraph::new(lines).block(titled_block(" Best Time to Post "));
    frame.render_widget(paragraph, area);
}

// ── Engagement ratios ─────────────────────────────────────────────────────────

/// Render the comments-to-likes ratio summary.
pub fn render_ratios(frame: &mut Frame, area: Rect, report: Option<&RatioReport>, theme: &Theme) {
    let Some(report) = report else {
        render_no_data(
            frame,
            area,
            "No posts with positive likes and a comment count.",
            theme,
        );
        return;
    };

    let lines = vec![
        stat_line("Average ratio", report.avg_ratio, theme),
        Line::from(""),
        Line::from(Span::styled("Highest-ratio post:", theme.bold)),
        Line::from(vec![
            Span::styled("  Caption: ", theme.label),
            Span::styled(
                truncate_caption(&report.top.caption, CAPTION_WIDTH),
                theme.text,
            ),
        ]),
        Line::from(vec![
            Span::styled("  Likes: ", theme.label),
            Span::styled(format_number(report.top.likes, 0), theme.value),
            Span::styled("  Comments: ", theme.label),
            Span::styled(format_number(report.top.comments, 0), theme.value),
            Span::styled("  Ratio: ", theme.label),
            Span::styled(format_number(report.top.ratio, 2), theme.value),
        ]),
    ];

    let paragraph = Paragraph::new(lines).block(titled_block(" Comments to Likes Ratio "));
    frame.render_widget(paragraph, area);
}

// ── Keyword trends ────────────────────────────────────────────────────────────

/// Render the keyword frequency/engagement table for the active keyword set.
pub fn render_keywords(
    frame: &mut Frame,
    area: Rect,
    keywords_input: &str,
    trends: &[KeywordTrend],
    editing: bool,
    theme: &Theme,
) {
    let mut lines = vec![Line::from(vec![
        Span::styled("Keywords: ", theme.label),
        Span::styled(keywords_input.to_string(), theme.value),
        if editing {
            Span::styled("█  (Enter to apply, Esc to cancel)", theme.dim)
        } else {
            Span::styled("  (press 'e' to edit)", theme.dim)
        },
    ])];
    lines.push(Line::from(""));

    if trends.is_empty() {
        lines.push(Line::from(Span::styled(
            "No captions match the given keywords.",
            theme.warning,
        )));
    } else {
        lines.push(Line::from(vec![
            Span::styled(format!("{:<16}", "Keyword"), theme.table_header),
            Span::styled(format!("{:>10}", "Frequency"), theme.table_header),
            Span::styled(format!("{:>18}", "Avg Engagement"), theme.table_header),
        ]));
        for trend in trends {
            lines.push(Line::from(vec![
                Span::styled(format!("{:<16}", trend.keyword), theme.text),
                Span::styled(format!("{:>10}", trend.count), theme.value),
                Span::styled(
                    format!("{:>18}", format_number(trend.avg_engagement, 2)),
                    theme.value,
                ),
            ]));
        }

        if let Some(best) = best_keyword(trends) {
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::styled("Best performing keyword: ", theme.text),
                Span::styled(best.keyword.clone(), theme.success),
                Span::styled(
                    format!(
                        " (avg engagement {})",
                        format_number(best.avg_engagement, 2)
                    ),
                    theme.text,
                ),
            ]));
        }
    }

    let paragraph = Paragraph::new(lines).block(titled_block(" Trend-Based Insights "));
    frame.render_widget(paragraph, area);
}

// ── Shared ────────────────────────────────────────────────────────────────────

/// Render a centred placeholder message for a view with nothing to show.
pub fn render_no_data(frame: &mut Frame, area: Rect, message: &str, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(message.to_string(), theme.warning)),
        Line::from(""),
        Line::from(Span::styled("Press 'q' or Ctrl+C to exit", theme.dim)),
    ];
    frame.render_widget(
        Paragraph::new(ratatui::text::Text::from(text)).block(titled_block(" Instagram Insights ")),
        area,
    );
}

fn titled_block(title: &str) -> Block<'_> {
    Block::default().borders(Borders::ALL).title(title.to_string())
}

fn row_style(theme: &Theme, index: usize) -> ratatui::style::Style {
    if index % 2 == 0 {
        theme.table_row
    } else {
        theme.table_row_alt
    }
}

fn stat_line(label: &str, value: f64, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<16}", label), theme.label),
        Span::styled(format_number(value, 2), theme.value),
    ])
}

// ── Tests ─────────────────────────────────────────────────────────────────────
