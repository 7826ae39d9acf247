//! Chat panel rendering: transcript plus the input line.

use insights_core::models::{ChatTurn, Speaker};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use unicode_width::UnicodeWidthStr;

use crate::themes::Theme;

/// Render the chat transcript and input box into `area`.
///
/// The transcript fills everything above a fixed three-line input block.
/// While a request is in flight the input block shows a waiting notice
/// instead of the buffer.
pub fn render_chat(
    frame: &mut Frame,
    area: Rect,
    turns: &[ChatTurn],
    input: &str,
    waiting: bool,
    theme: &Theme,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(area);

    render_transcript(frame, chunks[0], turns, theme);
    render_input(frame, chunks[1], input, waiting, theme);
}

/// Render the transcript, keeping the most recent lines in view.
fn render_transcript(frame: &mut Frame, area: Rect, turns: &[ChatTurn], theme: &Theme) {
    let mut lines: Vec<Line> = Vec::with_capacity(turns.len() * 2);
    for turn in turns {
        let (prefix, style) = match turn.speaker {
            Speaker::User => ("You: ", theme.chat_user),
            Speaker::Assistant => ("AI:  ", theme.chat_assistant),
        };
        lines.push(Line::from(vec![
            Span::styled(prefix, style),
            Span::styled(turn.text.clone(), theme.text),
        ]));
        lines.push(Line::from(""));
    }

    // Scroll so the newest turns stay visible inside the bordered block.
    let visible = area.height.saturating_sub(2) as usize;
    let scroll = lines.len().saturating_sub(visible) as u16;

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(" Chat "),
        );
    frame.render_widget(paragraph, area);
}

/// Render the single-line input box with a trailing cursor marker.
///
/// When the buffer is wider than the box, the head is trimmed so the end of
/// the input (where the user is typing) stays visible.
fn render_input(frame: &mut Frame, area: Rect, input: &str, waiting: bool, theme: &Theme) {
    let line = if waiting {
        Line::from(Span::styled("Waiting for reply…", theme.dim))
    } else {
        // 2 border columns plus the cursor cell.
        let max_width = area.width.saturating_sub(3) as usize;
        let visible = visible_tail(input, max_width);
        Line::from(vec![
            Span::styled(visible.to_string(), theme.chat_input),
            Span::styled("█", theme.dim),
        ])
    };

    let paragraph = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.table_border)
            .title(" Message (Enter to send) "),
    );
    frame.render_widget(paragraph, area);
}

/// The longest suffix of `input` whose display width fits in `max_width`.
fn visible_tail(input: &str, max_width: usize) -> &str {
    let mut start = 0;
    while input[start..].width() > max_width {
        match input[start..].char_indices().nth(1) {
            Some((offset, _)) => start += offset,
            None => break,
        }
    }
    &input[start..]
}

// ── Tests ─────────────────────────────────────────────────────────────────────
