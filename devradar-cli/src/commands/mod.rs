//! CLI command implementations.
//!
//! - [`config`] - Configuration management (get, set, list, path, init)
//! - [`search`] - One-shot search at a position
//! - [`watch`] - Interactive map with realtime updates

pub mod common;
pub mod config;
pub mod search;
pub mod watch;
