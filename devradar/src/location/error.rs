//! Location acquisition errors.

use thiserror::Error;

/// Why no position fix was produced.
///
/// Both kinds are expected outcomes: the view stays blank and nothing is
/// surfaced to the user.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LocationError {
    #[error("location permission denied")]
    PermissionDenied,

    #[error("position unavailable: {0}")]
    PositionUnavailable(String),
}
