//! Ambar web API client and types.
//!
//! This module provides the interface for communicating with the Ambar REST API.

mod auth;
mod client;
pub mod error;
pub mod types;

pub use auth::{get_token, store_token, Auth};
pub use client::AmbarClient;
pub use error::ApiError;
pub use types::{ContentHighlight, HiddenMark, Hit, HitTag, SearchResult, Source};
