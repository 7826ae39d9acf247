use clap::parser::ValueSource;
use clap::{CommandFactory, Parser};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Terminal analytics and AI chat over an Instagram post dataset
#[derive(Parser, Debug, Clone)]
#[command(
    name = "insta-insights",
    about = "Terminal analytics and AI chat over an Instagram post dataset",
    version
)]
pub struct Settings {
    /// Path to the refined dataset JSON file
    #[arg(long)]
    pub dataset: Option<PathBuf>,

    /// Panel shown on startup
    #[arg(long, default_value = "chat", value_parser = ["chat", "analytics"])]
    pub view: String,

    /// Comma-separated keywords for the keyword trend view
    #[arg(long, default_value = "fitness, family, love")]
    pub keywords: String,

    /// Conversational API endpoint URL
    #[arg(long, env = "INSIGHTS_CHAT_URL")]
    pub chat_url: Option<String>,

    /// Bearer token for the conversational API
    #[arg(long, env = "INSIGHTS_CHAT_TOKEN", hide_env_values = true)]
    pub chat_token: Option<String>,

    /// Timezone (auto-detected if not specified)
    #[arg(long, default_value = "auto")]
    pub timezone: String,

    /// Display theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "classic", "auto"])]
    pub theme: String,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Clear saved configuration
    #[arg(long)]
    pub clear: bool,
}

// ── LastUsedParams ─────────────────────────────────────────────────────────────

/// Snapshot of the display-related flags from the previous run, kept in
/// `~/.insta-insights/last_used.json`. The dataset path and the chat
/// credentials are deliberately excluded: the former is machine-specific and
/// the latter must never touch disk.
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct LastUsedParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
}

impl LastUsedParams {
    /// Location of the snapshot file under the user's home directory.
    pub fn config_path() -> PathBuf {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::config_path_in(&home)
    }

    /// Snapshot path rooted somewhere else, for tests.
    pub fn config_path_in(base_dir: &Path) -> PathBuf {
        base_dir.join(".insta-insights").join("last_used.json")
    }

    /// Read the snapshot at `path`; an absent or corrupt file yields the
    /// empty snapshot.
    pub fn load_from(path: &Path) -> Self {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|text| serde_json::from_str(&text).ok())
            .unwrap_or_default()
    }

    /// Write the snapshot to `path`, creating missing parents. A sibling
    /// temp file is renamed into place so a crash mid-write cannot corrupt
    /// the previous snapshot.
    pub fn save_to(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let body = serde_json::to_vec_pretty(self).map_err(std::io::Error::other)?;
        let staging = path.with_extension("json.tmp");
        std::fs::write(&staging, body)?;
        std::fs::rename(&staging, path)
    }

    /// Remove the snapshot at `path`, ignoring an already-absent file.
    pub fn clear_at(path: &Path) -> Result<(), std::io::Error> {
        match std::fs::remove_file(path) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}

impl From<&Settings> for LastUsedParams {
    fn from(s: &Settings) -> Self {
        LastUsedParams {
            theme: Some(s.theme.clone()),
            timezone: Some(s.timezone.clone()),
            view: Some(s.view.clone()),
            keywords: Some(s.keywords.clone()),
        }
    }
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse the process arguments, fill in anything the user did not pass
    /// from the last-used snapshot, resolve `"auto"` sentinels, and persist
    /// the merged result for the next run.
    pub fn load_with_last_used() -> Self {
        Self::load_merged(std::env::args_os().collect(), &LastUsedParams::config_path())
    }

    /// [`load_with_last_used`](Self::load_with_last_used) with the argument
    /// list and snapshot path injected, so tests stay hermetic.
    pub fn load_merged(args: Vec<OsString>, snapshot_path: &Path) -> Self {
        // ArgMatches is kept alongside the typed parse so each field's
        // ValueSource can be queried.
        let matches = Settings::command().get_matches_from(args.clone());
        let mut settings = Settings::parse_from(args);

        if settings.clear {
            let _ = LastUsedParams::clear_at(snapshot_path);
            return settings.resolve_auto();
        }

        let saved = LastUsedParams::load_from(snapshot_path);
        let from_cli =
            |name: &str| matches.value_source(name) == Some(ValueSource::CommandLine);

        // A flag typed on the command line beats the snapshot; defaults and
        // env-sourced values do not.
        for (name, field, saved_value) in [
            ("view", &mut settings.view, saved.view),
            ("timezone", &mut settings.timezone, saved.timezone),
            ("theme", &mut settings.theme, saved.theme),
            ("keywords", &mut settings.keywords, saved.keywords),
        ] {
            if !from_cli(name) {
                if let Some(value) = saved_value {
                    *field = value;
                }
            }
        }

        let settings = settings.resolve_auto();
        let _ = LastUsedParams::from(&settings).save_to(snapshot_path);
        settings
    }

    /// Replace `"auto"` sentinels with concrete values and let `--debug`
    /// force the log level.
    fn resolve_auto(mut self) -> Self {
        if self.timezone == "auto" {
            self.timezone = crate::time_utils::get_system_timezone();
        }
        if self.debug {
            self.log_level = "DEBUG".to_string();
        }
        self
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
