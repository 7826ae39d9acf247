use ratatui::style::{Color, Modifier, Style};

/// Rough classification of the terminal background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackgroundKind {
    Dark,
    Light,
}

/// Guess the terminal background from `COLORFGBG`.
///
/// The variable carries `"foreground;background"`; ANSI backgrounds 7 and
/// above count as light. Anything absent or unparseable counts as dark,
/// which every palette here stays readable on.
pub fn detect_background() -> BackgroundKind {
    std::env::var("COLORFGBG")
        .ok()
        .and_then(|v| v.rsplit(';').next().and_then(|bg| bg.parse::<u8>().ok()))
        .map(|bg| {
            if bg >= 7 {
                BackgroundKind::Light
            } else {
                BackgroundKind::Dark
            }
        })
        .unwrap_or(BackgroundKind::Dark)
}

/// Five colour roles plus an emphasis switch; every [`Theme`] is derived
/// from one of these.
struct Palette {
    /// Headers, table headers, assistant text.
    accent: Color,
    /// Active tab and totals row.
    highlight: Color,
    /// Primary text.
    fore: Color,
    /// Labels, inactive tabs, alternating rows.
    muted: Color,
    /// Dim text, separators, borders.
    faint: Color,
    /// Whether emphasised surfaces get the BOLD modifier.
    emphasis: bool,
}

impl Palette {
    fn build(self) -> Theme {
        let fg = |c: Color| Style::default().fg(c);
        let em = |s: Style| {
            if self.emphasis {
                s.add_modifier(Modifier::BOLD)
            } else {
                s
            }
        };

        Theme {
            header: em(fg(self.accent)),
            separator: fg(self.faint),

            text: fg(self.fore),
            dim: fg(self.faint),
            bold: em(fg(self.fore)),
            label: fg(self.muted),
            value: em(fg(self.fore)),

            info: fg(self.accent),
            success: fg(Color::Green),
            warning: fg(Color::Yellow),
            error: fg(Color::Red),

            tab_active: em(fg(self.highlight)),
            tab_inactive: fg(self.muted),

            table_header: em(fg(self.accent)),
            table_border: fg(self.faint),
            table_row: fg(self.fore),
            table_row_alt: fg(self.muted),
            table_total: em(fg(self.highlight)),

            chat_user: em(fg(Color::Green)),
            chat_assistant: fg(self.accent),
            chat_input: fg(self.fore),
        }
    }
}

/// Every style the UI components draw with.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Header ───────────────────────────────────────────────────────────────
    pub header: Style,
    pub separator: Style,

    // ── Text ─────────────────────────────────────────────────────────────────
    pub text: Style,
    pub dim: Style,
    pub bold: Style,
    pub label: Style,
    pub value: Style,

    // ── Status ───────────────────────────────────────────────────────────────
    pub info: Style,
    pub success: Style,
    pub warning: Style,
    pub error: Style,

    // ── Tabs ─────────────────────────────────────────────────────────────────
    pub tab_active: Style,
    pub tab_inactive: Style,

    // ── Table ────────────────────────────────────────────────────────────────
    pub table_header: Style,
    pub table_border: Style,
    pub table_row: Style,
    pub table_row_alt: Style,
    pub table_total: Style,

    // ── Chat ─────────────────────────────────────────────────────────────────
    pub chat_user: Style,
    pub chat_assistant: Style,
    pub chat_input: Style,
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────────────────────

    /// Default palette for dark backgrounds.
    pub fn dark() -> Self {
        Palette {
            accent: Color::Cyan,
            highlight: Color::Yellow,
            fore: Color::White,
            muted: Color::Gray,
            faint: Color::DarkGray,
            emphasis: true,
        }
        .build()
    }

    /// Palette for white or light-grey terminal canvases; dark text with
    /// blue and magenta accents.
    pub fn light() -> Self {
        Palette {
            accent: Color::Blue,
            highlight: Color::Magenta,
            fore: Color::Black,
            muted: Color::DarkGray,
            faint: Color::Gray,
            emphasis: true,
        }
        .build()
    }

    /// The dark palette with emphasis disabled, for terminals that render
    /// bold poorly.
    pub fn classic() -> Self {
        Palette {
            accent: Color::Cyan,
            highlight: Color::Yellow,
            fore: Color::White,
            muted: Color::Gray,
            faint: Color::DarkGray,
            emphasis: false,
        }
        .build()
    }

    /// Pick dark or light based on the detected terminal background.
    pub fn auto_detect() -> Self {
        match detect_background() {
            BackgroundKind::Light => Self::light(),
            BackgroundKind::Dark => Self::dark(),
        }
    }

    /// Look a theme up by its settings name; unknown names auto-detect.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "dark" => Self::dark(),
            "classic" => Self::classic(),
            _ => Self::auto_detect(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dark_theme_colours() {
        let t = Theme::dark();
        assert_eq!(t.header.fg, Some(Color::Cyan));
        assert_eq!(t.tab_active.fg, Some(Color::Yellow));
        assert_eq!(t.success.fg, Some(Color::Green));
        assert_eq!(t.error.fg, Some(Color::Red));
        assert!(t.header.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_light_theme_colours() {
        let t = Theme::light();
        assert_eq!(t.header.fg, Some(Color::Blue));
        assert_eq!(t.text.fg, Some(Color::Black));
        assert_eq!(t.tab_active.fg, Some(Color::Magenta));
        assert_eq!(t.chat_assistant.fg, Some(Color::Blue));
    }

    #[test]
    fn test_classic_theme_has_no_bold() {
        let t = Theme::classic();
        for style in [t.header, t.bold, t.value, t.tab_active, t.table_total] {
            assert!(!style.add_modifier.contains(Modifier::BOLD));
        }
        assert_eq!(t.header.fg, Some(Color::Cyan));
    }

    #[test]
    fn test_status_colours_shared_across_themes() {
        for t in [Theme::dark(), Theme::light(), Theme::classic()] {
            assert_eq!(t.success.fg, Some(Color::Green));
            assert_eq!(t.warning.fg, Some(Color::Yellow));
            assert_eq!(t.error.fg, Some(Color::Red));
        }
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Theme::from_name("dark").header.fg, Some(Color::Cyan));
        assert_eq!(Theme::from_name("light").header.fg, Some(Color::Blue));
        assert!(!Theme::from_name("classic")
            .header
            .add_modifier
            .contains(Modifier::BOLD));
        // Unknown names fall back to a valid theme rather than panicking.
        assert!(Theme::from_name("does-not-exist").header.fg.is_some());
    }
}
