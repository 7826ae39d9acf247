//! Conversational API client and chat session for insta-insights.
//!
//! [`client`] speaks HTTP to the external flow endpoint; [`session`] wraps a
//! client together with the append-only transcript shown in the chat panel.

pub mod client;
pub mod session;

pub use client::{ChatClient, ChatConfig, FALLBACK_REPLY};
pub use session::{ChatSession, GREETING};
