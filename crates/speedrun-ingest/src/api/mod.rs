//! speedrun.com API client module
//!
//! HTTP client and wire types for the two read operations the collector
//! needs: listing a game's categories and paging through its runs.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::ApiClient;
pub use types::*;
