//! DevRadar - find nearby developers by technology
//!
//! This library provides the client side of a developer map: it locates the
//! user once, searches a backend for developers near the visible region who
//! work with a given technology, and keeps the marker list current with
//! realtime pushes of newly registered developers.
//!
//! # High-Level API
//!
//! The [`view`] module ties everything together:
//!
//! ```ignore
//! use devradar::location::{FixedGeolocation, LocationProvider};
//! use devradar::realtime::WebSocketChannel;
//! use devradar::search::HttpSearchApi;
//! use devradar::view::{MapSearchView, ViewOptions};
//!
//! let mut view = MapSearchView::new(
//!     LocationProvider::new(FixedGeolocation::at(-23.55, -46.63)),
//!     HttpSearchApi::new("http://localhost:3333")?,
//!     WebSocketChannel::new("ws://localhost:3333/realtime")?,
//!     ViewOptions::default(),
//! );
//!
//! view.mount().await;
//! view.set_query("ReactJS");
//! view.search().await?;
//! ```

pub mod config;
pub mod developer;
pub mod location;
pub mod logging;
pub mod realtime;
pub mod region;
pub mod registry;
pub mod search;
pub mod view;

/// Version of the devradar library and CLI.
///
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
