//! One-shot location bootstrap.
//!
//! [`LocationProvider::acquire`] asks for permission and, if granted, fetches
//! a single position and centers a [`Region`] on it. There is no retry and
//! no polling.

mod error;
mod geolocation;
mod http;

pub use error::LocationError;
pub use geolocation::{DeniedGeolocation, FixedGeolocation, Geolocation, Position};
pub use http::HttpGeolocation;

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::region::Region;

/// Produces the initial region from a geolocation service.
#[derive(Debug, Clone)]
pub struct LocationProvider<G> {
    geolocation: G,
    high_accuracy: bool,
}

impl<G: Geolocation> LocationProvider<G> {
    /// Creates a provider that requests high-accuracy fixes.
    pub fn new(geolocation: G) -> Self {
        Self {
            geolocation,
            high_accuracy: true,
        }
    }

    pub fn with_high_accuracy(mut self, high_accuracy: bool) -> Self {
        self.high_accuracy = high_accuracy;
        self
    }

    pub fn high_accuracy(&self) -> bool {
        self.high_accuracy
    }

    /// Makes the single acquisition attempt.
    pub async fn acquire(&self) -> Result<Region, LocationError> {
        if !self.geolocation.request_permission().await {
            debug!("Location permission not granted");
            return Err(LocationError::PermissionDenied);
        }

        let position = self.geolocation.current_position(self.high_accuracy).await?;
        let region = Region::centered(position.latitude, position.longitude)
            .map_err(|e| LocationError::PositionUnavailable(e.to_string()))?;

        debug!(region = %region, "Location acquired");
        Ok(region)
    }
}

/// Which geolocation implementation to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocationSource {
    #[default]
    Fixed,
    Http,
    Denied,
}

impl FromStr for LocationSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fixed" => Ok(Self::Fixed),
            "http" => Ok(Self::Http),
            "denied" => Ok(Self::Denied),
            other => Err(format!(
                "unknown location source '{}', expected fixed, http or denied",
                other
            )),
        }
    }
}

impl fmt::Display for LocationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed => write!(f, "fixed"),
            Self::Http => write!(f, "http"),
            Self::Denied => write!(f, "denied"),
        }
    }
}

/// A geolocation service chosen at runtime.
#[derive(Debug, Clone)]
pub enum AnyGeolocation {
    Fixed(FixedGeolocation),
    Http(HttpGeolocation),
    Denied(DeniedGeolocation),
}

impl Geolocation for AnyGeolocation {
    async fn request_permission(&self) -> bool {
        match self {
            Self::Fixed(g) => g.request_permission().await,
            Self::Http(g) => g.request_permission().await,
            Self::Denied(g) => g.request_permission().await,
        }
    }

    async fn current_position(&self, high_accuracy: bool) -> Result<Position, LocationError> {
        match self {
            Self::Fixed(g) => g.current_position(high_accuracy).await,
            Self::Http(g) => g.current_position(high_accuracy).await,
            Self::Denied(g) => g.current_position(high_accuracy).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Counts calls so tests can check that a refused permission skips the fetch.
    #[derive(Clone, Default)]
    struct CountingGeolocation {
        granted: bool,
        position: Option<Position>,
        fetches: Arc<AtomicUsize>,
        accuracy_seen: Arc<std::sync::Mutex<Vec<bool>>>,
    }

    impl Geolocation for CountingGeolocation {
        async fn request_permission(&self) -> bool {
            self.granted
        }

        async fn current_position(&self, high_accuracy: bool) -> Result<Position, LocationError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            self.accuracy_seen.lock().unwrap().push(high_accuracy);
            self.position
                .ok_or_else(|| LocationError::PositionUnavailable("no fix".to_string()))
        }
    }

    #[tokio::test]
    async fn test_granted_centers_region() {
        let provider = LocationProvider::new(FixedGeolocation::at(-23.5, -46.6));
        let region = provider.acquire().await.unwrap();

        assert_eq!(region, Region::centered(-23.5, -46.6).unwrap());
        assert_eq!(region.latitude_delta, 0.02);
        assert_eq!(region.longitude_delta, 0.02);
    }

    #[tokio::test]
    async fn test_denied_skips_fetch() {
        let geo = CountingGeolocation {
            granted: false,
            position: Some(Position::new(1.0, 2.0)),
            ..Default::default()
        };
        let provider = LocationProvider::new(geo.clone());

        assert_eq!(provider.acquire().await, Err(LocationError::PermissionDenied));
        assert_eq!(geo.fetches.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_single_high_accuracy_attempt() {
        let geo = CountingGeolocation {
            granted: true,
            ..Default::default()
        };
        let provider = LocationProvider::new(geo.clone());

        assert!(matches!(
            provider.acquire().await,
            Err(LocationError::PositionUnavailable(_))
        ));
        assert_eq!(geo.fetches.load(Ordering::SeqCst), 1);
        assert_eq!(*geo.accuracy_seen.lock().unwrap(), vec![true]);
    }

    #[tokio::test]
    async fn test_out_of_range_fix_is_unavailable() {
        let provider = LocationProvider::new(FixedGeolocation::at(120.0, 0.0));
        assert!(matches!(
            provider.acquire().await,
            Err(LocationError::PositionUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_fixed_without_coordinates_is_denied() {
        let provider = LocationProvider::new(FixedGeolocation::default());
        assert_eq!(provider.acquire().await, Err(LocationError::PermissionDenied));
    }

    #[tokio::test]
    async fn test_denied_geolocation() {
        let provider = LocationProvider::new(AnyGeolocation::Denied(DeniedGeolocation));
        assert_eq!(provider.acquire().await, Err(LocationError::PermissionDenied));
    }

    #[test]
    fn test_location_source_parse() {
        assert_eq!("HTTP".parse::<LocationSource>(), Ok(LocationSource::Http));
        assert_eq!(LocationSource::default().to_string(), "fixed");
        assert!("gps".parse::<LocationSource>().is_err());
    }
}
