//! Core domain layer for insta-insights.
//!
//! Holds the post/chat data model, raw-field coercion helpers, statistics
//! primitives shared by the analytic views, display formatting, time helpers
//! and the CLI settings machinery.

pub mod coerce;
pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod stats;
pub mod time_utils;
