//! Developer search over the HTTP API.
//!
//! # Architecture
//!
//! ```text
//! MapSearchView::search()
//!     │
//!     ├── SearchQuery::from_region(region, techs)   (wire field mapping)
//!     │
//!     └── SearchApi trait → HttpSearchApi (reqwest)
//!             │
//!             └── GET /search?latitude=..&longitude=..&techs=..  →  {"devs": [...]}
//! ```
//!
//! The backend stores coordinates in the opposite order from their names, so
//! the query sends the region's longitude as `latitude` and its latitude as
//! `longitude`. [`SearchQuery`] is the single place that mapping lives.

mod client;
mod error;
mod query;

pub use client::{HttpSearchApi, SearchApi, DEFAULT_SEARCH_TIMEOUT};
pub use error::SearchError;
pub use query::SearchQuery;
