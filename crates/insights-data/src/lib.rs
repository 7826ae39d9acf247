//! Dataset loading and analytics for insta-insights.
//!
//! [`reader`] turns the refined dataset JSON file into a typed
//! [`insights_core::models::PostTable`]; [`trends`] and [`views`] are the pure
//! aggregation functions behind each dashboard view.

pub mod reader;
pub mod trends;
pub mod views;
