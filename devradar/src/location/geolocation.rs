//! Geolocation service seam and the simple implementations.

use std::future::Future;

use super::error::LocationError;

/// A device position fix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

impl Position {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Platform geolocation service.
pub trait Geolocation: Send + Sync {
    /// Asks for permission to read the position. Returns whether it was granted.
    fn request_permission(&self) -> impl Future<Output = bool> + Send;

    /// Fetches the current position once.
    ///
    /// With `high_accuracy` set, implementations that cannot provide a precise
    /// fix must fail rather than degrade to a coarser source.
    fn current_position(
        &self,
        high_accuracy: bool,
    ) -> impl Future<Output = Result<Position, LocationError>> + Send;
}

/// Position supplied up front, e.g. from configuration or command-line flags.
///
/// Permission counts as granted only when coordinates are present.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedGeolocation {
    position: Option<Position>,
}

impl FixedGeolocation {
    pub fn new(position: Option<Position>) -> Self {
        Self { position }
    }

    pub fn at(latitude: f64, longitude: f64) -> Self {
        Self::new(Some(Position::new(latitude, longitude)))
    }
}

impl Geolocation for FixedGeolocation {
    async fn request_permission(&self) -> bool {
        self.position.is_some()
    }

    async fn current_position(&self, _high_accuracy: bool) -> Result<Position, LocationError> {
        self.position.ok_or_else(|| {
            LocationError::PositionUnavailable("no coordinates configured".to_string())
        })
    }
}

/// Always refuses permission.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeniedGeolocation;

impl Geolocation for DeniedGeolocation {
    async fn request_permission(&self) -> bool {
        false
    }

    async fn current_position(&self, _high_accuracy: bool) -> Result<Position, LocationError> {
        Err(LocationError::PermissionDenied)
    }
}
