//! Main application state and TUI event loop for insta-insights.
//!
//! [`App`] owns the theme, the loaded post table, the optional chat session,
//! and the panel/tab navigation state. Every analytics view is recomputed
//! from the immutable table on each draw; the table is small enough that
//! this keeps the UI a pure function of state.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};

use insights_chat::ChatSession;
use insights_core::models::PostTable;
use insights_core::time_utils::convert_to_timezone;
use insights_data::{trends, views};

use crate::analytics_view;
use crate::chat_view;
use crate::themes::Theme;

// ── Panel / AnalyticsTab ──────────────────────────────────────────────────────

/// Which top-level panel the TUI is currently rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    /// Conversational assistant.
    Chat,
    /// Dataset analytics views.
    Analytics,
}

/// The eight analytics sub-views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyticsTab {
    Trend,
    TopPosts,
    ContentTypes,
    Distribution,
    Hashtags,
    PostingTimes,
    Ratios,
    Keywords,
}

impl AnalyticsTab {
    /// All tabs in display order.
    pub const ALL: [AnalyticsTab; 8] = [
        AnalyticsTab::Trend,
        AnalyticsTab::TopPosts,
        AnalyticsTab::ContentTypes,
        AnalyticsTab::Distribution,
        AnalyticsTab::Hashtags,
        AnalyticsTab::PostingTimes,
        AnalyticsTab::Ratios,
        AnalyticsTab::Keywords,
    ];

    /// Short label shown in the tab bar.
    pub fn title(self) -> &'static str {
        match self {
            AnalyticsTab::Trend => "Trends",
            AnalyticsTab::TopPosts => "Top Posts",
            AnalyticsTab::ContentTypes => "Types",
            AnalyticsTab::Distribution => "Distribution",
            AnalyticsTab::Hashtags => "Hashtags",
            AnalyticsTab::PostingTimes => "Timing",
            AnalyticsTab::Ratios => "Ratios",
            AnalyticsTab::Keywords => "Keywords",
        }
    }

    /// Resolve a `'1'..='8'` key to a tab.
    pub fn from_digit(c: char) -> Option<Self> {
        let index = c.to_digit(10)? as usize;
        Self::ALL.get(index.checked_sub(1)?).copied()
    }

    /// The tab to the right, wrapping around.
    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    /// The tab to the left, wrapping around.
    pub fn prev(self) -> Self {
        let i = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the insta-insights TUI.
pub struct App {
    /// Active colour theme.
    pub theme: Theme,
    /// IANA timezone used for the header clock.
    pub timezone: String,
    /// Panel currently shown.
    pub panel: Panel,
    /// Active analytics sub-view.
    pub tab: AnalyticsTab,
    /// Applied comma-separated keyword string for the keyword view.
    pub keywords_input: String,
    /// Chat input buffer.
    pub chat_input: String,
    /// Transient status/error message shown in the footer.
    pub status: Option<String>,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
    /// `true` while a chat request is in flight.
    pub waiting: bool,

    table: PostTable,
    session: Option<ChatSession>,
    /// Edit buffer for the keyword view; `Some` while editing.
    keyword_edit: Option<String>,
}

impl App {
    /// Construct a new application with the given configuration.
    ///
    /// `session` is `None` when no chat endpoint was configured; the chat
    /// panel then shows a configuration hint instead of a transcript.
    pub fn new(
        theme_name: &str,
        timezone: String,
        start_panel: Panel,
        keywords: String,
        table: PostTable,
        session: Option<ChatSession>,
    ) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
            timezone,
            panel: start_panel,
            tab: AnalyticsTab::Trend,
            keywords_input: keywords,
            chat_input: String::new(),
            status: None,
            should_quit: false,
            waiting: false,
            table,
            session,
            keyword_edit: None,
        }
    }

    // ── Event loop ────────────────────────────────────────────────────────────

    /// Run the TUI until the user quits.
    ///
    /// Uses `crossterm::event::poll` (synchronous, with a 250 ms timeout) so
    /// the terminal event loop stays on the current thread; a chat request
    /// blocks the loop for its duration, with a waiting notice drawn first.
    pub async fn run(mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(250);

        let result = loop {
            terminal.draw(|frame| self.render(frame))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    if let Some(message) = self.on_key(key.code, key.modifiers) {
                        // Show the waiting notice before blocking on the
                        // request.
                        self.waiting = true;
                        terminal.draw(|frame| self.render(frame))?;
                        if let Some(session) = self.session.as_mut() {
                            if let Err(e) = session.send(&message).await {
                                self.status = Some(e.to_string());
                            }
                        }
                        self.waiting = false;
                    }
                }
            }

            if self.should_quit {
                break Ok(());
            }
        };

        // Restore terminal state unconditionally.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    // ── Key handling ──────────────────────────────────────────────────────────

    /// Apply one key press to the application state.
    ///
    /// Returns `Some(message)` when a chat message should be sent; the event
    /// loop performs the actual request so this stays synchronous and
    /// testable.
    pub fn on_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> Option<String> {
        self.status = None;

        if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return None;
        }

        if self.keyword_edit.is_some() {
            self.on_keyword_edit_key(code);
            return None;
        }

        match self.panel {
            Panel::Chat => self.on_chat_key(code),
            Panel::Analytics => {
                self.on_analytics_key(code);
                None
            }
        }
    }

    /// Keys while the keyword edit buffer is open.
    fn on_keyword_edit_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Enter => {
                if let Some(buffer) = self.keyword_edit.take() {
                    self.keywords_input = buffer;
                }
            }
            KeyCode::Esc => {
                self.keyword_edit = None;
            }
            KeyCode::Backspace => {
                if let Some(buffer) = self.keyword_edit.as_mut() {
                    buffer.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(buffer) = self.keyword_edit.as_mut() {
                    buffer.push(c);
                }
            }
            _ => {}
        }
    }

    /// Keys while the chat panel has focus; printable characters type into
    /// the input buffer, so quit stays on Ctrl+C here.
    fn on_chat_key(&mut self, code: KeyCode) -> Option<String> {
        match code {
            KeyCode::Tab | KeyCode::Esc => {
                self.panel = Panel::Analytics;
                None
            }
            KeyCode::Enter => {
                let message = self.chat_input.trim().to_string();
                if message.is_empty() {
                    return None;
                }
                if self.session.is_none() {
                    self.status =
                        Some("Chat is not configured; pass --chat-url or set INSIGHTS_CHAT_URL".to_string());
                    return None;
                }
                self.chat_input.clear();
                Some(message)
            }
            KeyCode::Backspace => {
                self.chat_input.pop();
                None
            }
            KeyCode::Char(c) => {
                self.chat_input.push(c);
                None
            }
            _ => None,
        }
    }

    /// Keys while the analytics panel has focus.
    fn on_analytics_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Char('c') => self.panel = Panel::Chat,
            KeyCode::Char('a') => self.panel = Panel::Analytics,
            KeyCode::Tab => self.tab = self.tab.next(),
            KeyCode::Char('e') if self.tab == AnalyticsTab::Keywords => {
                self.keyword_edit = Some(self.keywords_input.clone());
            }
            KeyCode::Char(c @ '1'..='8') => {
                if let Some(tab) = AnalyticsTab::from_digit(c) {
                    self.tab = tab;
                }
            }
            KeyCode::Right => self.tab = self.tab.next(),
            KeyCode::Left => self.tab = self.tab.prev(),
            _ => {}
        }
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    /// Render the current application state into `frame`.
    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(frame.area());

        self.render_header(frame, chunks[0]);
        self.render_body(frame, chunks[1]);
        self.render_footer(frame, chunks[2]);
    }

    fn render_header(&self, frame: &mut Frame, area: ratatui::layout::Rect) {
        let now = convert_to_timezone(chrono::Utc::now(), &self.timezone);
        let clock = now.format("%Y-%m-%d %H:%M:%S").to_string();

        let title = Line::from(vec![
            Span::styled("insta-insights", self.theme.header),
            Span::styled(format!("  {}  ({})", clock, self.timezone), self.theme.dim),
        ]);

        let mut tabs: Vec<Span> = vec![
            panel_span("Chatbot", self.panel == Panel::Chat, &self.theme),
            Span::styled("  │  ", self.theme.separator),
            panel_span(
                "Instagram Insights",
                self.panel == Panel::Analytics,
                &self.theme,
            ),
        ];
        if self.panel == Panel::Analytics {
            tabs.push(Span::styled("   ", self.theme.separator));
            for (i, tab) in AnalyticsTab::ALL.iter().enumerate() {
                let style = if *tab == self.tab {
                    self.theme.tab_active
                } else {
                    self.theme.tab_inactive
                };
                tabs.push(Span::styled(format!(" {}:{}", i + 1, tab.title()), style));
            }
        }

        let header = Paragraph::new(vec![title, Line::from(tabs)]);
        frame.render_widget(header, area);
    }

    fn render_body(&self, frame: &mut Frame, area: ratatui::layout::Rect) {
        match self.panel {
            Panel::Chat => match &self.session {
                Some(session) => chat_view::render_chat(
                    frame,
                    area,
                    session.history().turns(),
                    &self.chat_input,
                    self.waiting,
                    &self.theme,
                ),
                None => analytics_view::render_no_data(
                    frame,
                    area,
                    "Chat is not configured; pass --chat-url or set INSIGHTS_CHAT_URL",
                    &self.theme,
                ),
            },
            Panel::Analytics => self.render_analytics(frame, area),
        }
    }

    fn render_analytics(&self, frame: &mut Frame, area: ratatui::layout::Rect) {
        match self.tab {
            AnalyticsTab::Trend => {
                let points = trends::weekly_trend(&self.table);
                analytics_view::render_trend(frame, area, &points, &self.theme);
            }
            AnalyticsTab::TopPosts => {
                let posts = views::top_posts(&self.table);
                analytics_view::render_top_posts(frame, area, &posts, &self.theme);
            }
            AnalyticsTab::ContentTypes => {
                let rows = views::content_type_summary(&self.table);
                analytics_view::render_content_types(frame, area, &rows, &self.theme);
            }
            AnalyticsTab::Distribution => {
                let dist = views::engagement_distribution(&self.table);
                analytics_view::render_distribution(frame, area, dist.as_ref(), &self.theme);
            }
            AnalyticsTab::Hashtags => {
                let counts = views::hashtag_frequency(&self.table);
                analytics_view::render_hashtags(frame, area, &counts, &self.theme);
            }
            AnalyticsTab::PostingTimes => {
                let slots = views::posting_times(&self.table);
                analytics_view::render_posting_times(frame, area, &slots, &self.theme);
            }
            AnalyticsTab::Ratios => {
                let report = views::engagement_ratios(&self.table);
                analytics_view::render_ratios(frame, area, report.as_ref(), &self.theme);
            }
            AnalyticsTab::Keywords => {
                let display = self.keyword_edit.as_deref().unwrap_or(&self.keywords_input);
                let keywords = trends::parse_keywords(display);
                let keyword_trends = trends::keyword_trends(&self.table, &keywords);
                analytics_view::render_keywords(
                    frame,
                    area,
                    display,
                    &keyword_trends,
                    self.keyword_edit.is_some(),
                    &self.theme,
                );
            }
        }
    }

    fn render_footer(&self, frame: &mut Frame, area: ratatui::layout::Rect) {
        let line = if let Some(status) = &self.status {
            Line::from(Span::styled(status.clone(), self.theme.error))
        } else {
            let hints = match self.panel {
                Panel::Chat => "Enter send · Tab/Esc analytics · Ctrl+C quit",
                Panel::Analytics => "1-8 views · ←/→ cycle · c chat · q quit",
            };
            Line::from(Span::styled(hints, self.theme.dim))
        };
        frame.render_widget(Paragraph::new(line), area);
    }
}

fn panel_span<'a>(label: &'a str, active: bool, theme: &Theme) -> Span<'a> {
    let style = if active {
        theme.tab_active
    } else {
        theme.tab_inactive
    };
    Span::styled(label, style)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use insights_core::models::PostRecord;
    use ratatui::backend::TestBackend;

    fn make_app(panel: Panel) -> App {
        let table = PostTable::new(vec![PostRecord {
            caption: Some("hello #world".into()),
            likes: Some(10.0),
            comments: Some(2.0),
            engagement_rate: Some(1.5),
            hashtags: vec!["#world".into()],
            ..Default::default()
        }]);
        App::new(
            "dark",
            "UTC".to_string(),
            panel,
            "fitness, family, love".to_string(),
            table,
            None,
        )
    }

    // ── AnalyticsTab ──────────────────────────────────────────────────────────

    #[test]
    fn test_tab_from_digit() {
        assert_eq!(AnalyticsTab::from_digit('1'), Some(AnalyticsTab::Trend));
        assert_eq!(AnalyticsTab::from_digit('8'), Some(AnalyticsTab::Keywords));
        assert_eq!(AnalyticsTab::from_digit('9'), None);
        assert_eq!(AnalyticsTab::from_digit('0'), None);
        assert_eq!(AnalyticsTab::from_digit('x'), None);
    }

    #[test]
    fn test_tab_next_prev_wrap() {
        assert_eq!(AnalyticsTab::Trend.next(), AnalyticsTab::TopPosts);
        assert_eq!(AnalyticsTab::Keywords.next(), AnalyticsTab::Trend);
        assert_eq!(AnalyticsTab::Trend.prev(), AnalyticsTab::Keywords);
        assert_eq!(AnalyticsTab::TopPosts.prev(), AnalyticsTab::Trend);
    }

    // ── App::new ──────────────────────────────────────────────────────────────

    #[test]
    fn test_app_creation_defaults() {
        let app = make_app(Panel::Chat);
        assert_eq!(app.panel, Panel::Chat);
        assert_eq!(app.tab, AnalyticsTab::Trend);
        assert!(!app.should_quit);
        assert!(!app.waiting);
        assert!(app.status.is_none());
        assert!(app.chat_input.is_empty());
    }

    // ── on_key: global ────────────────────────────────────────────────────────

    #[test]
    fn test_ctrl_c_quits_from_any_panel() {
        let mut app = make_app(Panel::Chat);
        app.on_key(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(app.should_quit);

        let mut app = make_app(Panel::Analytics);
        app.on_key(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(app.should_quit);
    }

    // ── on_key: analytics panel ───────────────────────────────────────────────

    #[test]
    fn test_q_quits_in_analytics() {
        let mut app = make_app(Panel::Analytics);
        app.on_key(KeyCode::Char('q'), KeyModifiers::NONE);
        assert!(app.should_quit);
    }

    #[test]
    fn test_digit_selects_tab() {
        let mut app = make_app(Panel::Analytics);
        app.on_key(KeyCode::Char('5'), KeyModifiers::NONE);
        assert_eq!(app.tab, AnalyticsTab::Hashtags);
        app.on_key(KeyCode::Char('8'), KeyModifiers::NONE);
        assert_eq!(app.tab, AnalyticsTab::Keywords);
    }

    #[test]
    fn test_arrows_and_tab_cycle_tabs() {
        let mut app = make_app(Panel::Analytics);
        app.on_key(KeyCode::Right, KeyModifiers::NONE);
        assert_eq!(app.tab, AnalyticsTab::TopPosts);
        app.on_key(KeyCode::Left, KeyModifiers::NONE);
        assert_eq!(app.tab, AnalyticsTab::Trend);
        app.on_key(KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(app.tab, AnalyticsTab::TopPosts);
    }

    #[test]
    fn test_c_switches_to_chat() {
        let mut app = make_app(Panel::Analytics);
        app.on_key(KeyCode::Char('c'), KeyModifiers::NONE);
        assert_eq!(app.panel, Panel::Chat);
        assert!(!app.should_quit);
    }

    // ── on_key: chat panel ────────────────────────────────────────────────────

    #[test]
    fn test_chat_typing_accumulates_input() {
        let mut app = make_app(Panel::Chat);
        for c in "hiq1".chars() {
            app.on_key(KeyCode::Char(c), KeyModifiers::NONE);
        }
        // 'q' and '1' type into the buffer instead of acting as shortcuts.
        assert_eq!(app.chat_input, "hiq1");
        assert!(!app.should_quit);
        assert_eq!(app.panel, Panel::Chat);
    }

    #[test]
    fn test_chat_backspace_removes_char() {
        let mut app = make_app(Panel::Chat);
        app.on_key(KeyCode::Char('h'), KeyModifiers::NONE);
        app.on_key(KeyCode::Char('i'), KeyModifiers::NONE);
        app.on_key(KeyCode::Backspace, KeyModifiers::NONE);
        assert_eq!(app.chat_input, "h");
    }

    #[test]
    fn test_chat_enter_without_session_sets_status() {
        let mut app = make_app(Panel::Chat);
        app.on_key(KeyCode::Char('h'), KeyModifiers::NONE);
        let sent = app.on_key(KeyCode::Enter, KeyModifiers::NONE);
        assert!(sent.is_none());
        assert!(app.status.is_some());
    }

    #[test]
    fn test_chat_enter_empty_input_is_noop() {
        let mut app = make_app(Panel::Chat);
        let sent = app.on_key(KeyCode::Enter, KeyModifiers::NONE);
        assert!(sent.is_none());
        assert!(app.status.is_none());
    }

    #[test]
    fn test_chat_tab_switches_to_analytics() {
        let mut app = make_app(Panel::Chat);
        app.on_key(KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(app.panel, Panel::Analytics);
    }

    // ── on_key: keyword editing ───────────────────────────────────────────────

    #[test]
    fn test_keyword_edit_apply() {
        let mut app = make_app(Panel::Analytics);
        app.on_key(KeyCode::Char('8'), KeyModifiers::NONE);
        app.on_key(KeyCode::Char('e'), KeyModifiers::NONE);

        // Clear the buffer, type a new keyword, apply.
        for _ in 0.."fitness, family, love".len() {
            app.on_key(KeyCode::Backspace, KeyModifiers::NONE);
        }
        for c in "travel".chars() {
            app.on_key(KeyCode::Char(c), KeyModifiers::NONE);
        }
        app.on_key(KeyCode::Enter, KeyModifiers::NONE);

        assert_eq!(app.keywords_input, "travel");
    }

    #[test]
    fn test_keyword_edit_escape_cancels() {
        let mut app = make_app(Panel::Analytics);
        app.on_key(KeyCode::Char('8'), KeyModifiers::NONE);
        app.on_key(KeyCode::Char('e'), KeyModifiers::NONE);
        for c in "xyz".chars() {
            app.on_key(KeyCode::Char(c), KeyModifiers::NONE);
        }
        app.on_key(KeyCode::Esc, KeyModifiers::NONE);

        assert_eq!(app.keywords_input, "fitness, family, love");
    }

    #[test]
    fn test_e_only_edits_on_keyword_tab() {
        let mut app = make_app(Panel::Analytics);
        // On the trend tab 'e' does nothing; 'q' afterwards still quits, which
        // would not happen inside the edit buffer.
        app.on_key(KeyCode::Char('e'), KeyModifiers::NONE);
        app.on_key(KeyCode::Char('q'), KeyModifiers::NONE);
        assert!(app.should_quit);
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    #[test]
    fn test_render_all_analytics_tabs_does_not_panic() {
        let mut app = make_app(Panel::Analytics);
        let backend = TestBackend::new(120, 30);
        let mut terminal = Terminal::new(backend).unwrap();

        for tab in AnalyticsTab::ALL {
            app.tab = tab;
            terminal.draw(|frame| app.render(frame)).unwrap();
        }
    }

    #[test]
    fn test_render_chat_panel_without_session_does_not_panic() {
        let app = make_app(Panel::Chat);
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
    }
}
