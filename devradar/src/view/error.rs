//! Errors surfaced by the map search view.

use thiserror::Error;

use crate::realtime::SubscriptionError;
use crate::region::RegionError;
use crate::search::SearchError;

/// Failures the front-end may show to the user.
///
/// Location failures are absent on purpose: a refused permission or missing
/// fix leaves the view blank without an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ViewError {
    /// Search was triggered before any region was known.
    #[error("no map region yet, search is unavailable")]
    RegionUnavailable,

    #[error("search failed: {0}")]
    Search(#[from] SearchError),

    #[error("realtime subscription failed: {0}")]
    Subscription(#[from] SubscriptionError),

    #[error("invalid region: {0}")]
    Region(#[from] RegionError),

    /// The view was unmounted, or unmounted while the operation was in flight.
    #[error("view is unmounted")]
    Unmounted,
}
