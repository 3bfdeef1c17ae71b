//! LazyAmbar - a terminal client for the Ambar document search engine.
//!
//! Search, preview, tag and hide documents without leaving the terminal.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod state;
pub mod tasks;
pub mod ui;
