use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single social-media post as loaded from the dataset.
///
/// Every metric field uses `Option` as its missing marker: a value that was
/// absent or failed numeric coercion is `None`, never zero, so that means and
/// medians exclude it from both numerator and denominator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostRecord {
    /// When the post was published (parsed from epoch milliseconds).
    pub timestamp: Option<DateTime<Utc>>,
    /// Free-text caption, absent for caption-less posts.
    pub caption: Option<String>,
    /// Categorical content label, e.g. `"photo"`, `"video"`, `"carousel"`.
    pub media_type: String,
    /// Like count, coerced to numeric; invalid/absent → missing.
    pub likes: Option<f64>,
    /// Comment count, coerced to numeric; invalid/absent → missing.
    pub comments: Option<f64>,
    /// Engagement ratio, coerced to numeric; invalid/absent → missing.
    pub engagement_rate: Option<f64>,
    /// `#`-prefixed tokens derived from the caption at load time.
    #[serde(default)]
    pub hashtags: Vec<String>,
}

impl PostRecord {
    /// Caption text for display, empty string when absent.
    pub fn caption_text(&self) -> &str {
        self.caption.as_deref().unwrap_or("")
    }
}

/// The immutable, ordered collection of posts loaded once at startup.
///
/// Every analytic view is a pure function of `(PostTable, parameters)`;
/// nothing mutates the table after loading.
#[derive(Debug, Clone, Default)]
pub struct PostTable {
    records: Vec<PostRecord>,
}

impl PostTable {
    /// Wrap an already-decoded record list.
    pub fn new(records: Vec<PostRecord>) -> Self {
        Self { records }
    }

    /// All records in original dataset order.
    pub fn records(&self) -> &[PostRecord] {
        &self.records
    }

    /// Number of records in the table.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table holds no records at all.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ── Chat transcript model ─────────────────────────────────────────────────────

/// Who produced a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Assistant,
}

/// One `(speaker, text)` entry in the transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub speaker: Speaker,
    pub text: String,
}

/// Append-only chat transcript for one session.
///
/// Seeded with a greeting turn at construction; the only mutation ever
/// applied afterwards is [`ChatHistory::push`].
#[derive(Debug, Clone, Default)]
pub struct ChatHistory {
    turns: Vec<ChatTurn>,
}

impl ChatHistory {
    /// An empty transcript with no greeting.
    pub fn new() -> Self {
        Self::default()
    }

    /// A transcript seeded with an assistant greeting turn.
    pub fn with_greeting(greeting: impl Into<String>) -> Self {
        let mut history = Self::default();
        history.push(Speaker::Assistant, greeting);
        history
    }

    /// Append one turn to the transcript.
    pub fn push(&mut self, speaker: Speaker, text: impl Into<String>) {
        self.turns.push(ChatTurn {
            speaker,
            text: text.into(),
        });
    }

    /// All turns in order of appearance.
    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    /// Number of turns recorded so far.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether the transcript holds no turns.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
