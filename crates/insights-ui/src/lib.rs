//! Terminal UI layer for insta-insights.
//!
//! Provides themes, the analytics table/summary views, the chat transcript
//! view, and the main application event loop built on top of [`ratatui`] for
//! rendering the dashboard in the terminal.

pub mod analytics_view;
pub mod app;
pub mod chat_view;
pub mod themes;

pub use insights_core as core;
