//! Region type definitions

use thiserror::Error;

/// Valid latitude range
pub const MIN_LAT: f64 = -90.0;
pub const MAX_LAT: f64 = 90.0;

/// Valid longitude range
pub const MIN_LON: f64 = -180.0;
pub const MAX_LON: f64 = 180.0;

/// Zoom extent used when a region is centered on a fresh location fix.
pub const DEFAULT_REGION_DELTA: f64 = 0.02;

/// Map viewport: center point plus the visible extent on each axis.
///
/// Deltas are in degrees and always strictly positive. A region is replaced
/// as a whole on every pan/zoom event; fields are never updated one at a time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    /// Center latitude in degrees (-90 to 90)
    pub latitude: f64,
    /// Center longitude in degrees (-180 to 180)
    pub longitude: f64,
    /// Visible north-south extent in degrees
    pub latitude_delta: f64,
    /// Visible east-west extent in degrees
    pub longitude_delta: f64,
}

/// Bounding box of a region, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

/// Errors for invalid region values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegionError {
    #[error("Invalid latitude: {0} (must be between -90 and 90)")]
    InvalidLatitude(f64),
    #[error("Invalid longitude: {0} (must be between -180 and 180)")]
    InvalidLongitude(f64),
    #[error("Invalid {axis} delta: {value} (must be a positive number)")]
    InvalidDelta { axis: &'static str, value: f64 },
}

impl Region {
    /// Creates a validated region.
    pub fn new(
        latitude: f64,
        longitude: f64,
        latitude_delta: f64,
        longitude_delta: f64,
    ) -> Result<Self, RegionError> {
        let region = Self {
            latitude,
            longitude,
            latitude_delta,
            longitude_delta,
        };
        region.validate()?;
        Ok(region)
    }

    /// Creates a region centered on a point with the default zoom extent.
    pub fn centered(latitude: f64, longitude: f64) -> Result<Self, RegionError> {
        Self::new(
            latitude,
            longitude,
            DEFAULT_REGION_DELTA,
            DEFAULT_REGION_DELTA,
        )
    }

    /// Checks the region invariants.
    ///
    /// Fields are public so that map events can be constructed literally;
    /// everything that stores a region calls this first.
    pub fn validate(&self) -> Result<(), RegionError> {
        if !(MIN_LAT..=MAX_LAT).contains(&self.latitude) {
            return Err(RegionError::InvalidLatitude(self.latitude));
        }
        if !(MIN_LON..=MAX_LON).contains(&self.longitude) {
            return Err(RegionError::InvalidLongitude(self.longitude));
        }
        if !(self.latitude_delta.is_finite() && self.latitude_delta > 0.0) {
            return Err(RegionError::InvalidDelta {
                axis: "latitude",
                value: self.latitude_delta,
            });
        }
        if !(self.longitude_delta.is_finite() && self.longitude_delta > 0.0) {
            return Err(RegionError::InvalidDelta {
                axis: "longitude",
                value: self.longitude_delta,
            });
        }
        Ok(())
    }

    /// Returns the visible bounding box.
    ///
    /// Latitude is clamped to the poles. Longitude is not wrapped, so a
    /// viewport crossing the antimeridian reports `west < -180` or `east > 180`.
    pub fn bounds(&self) -> Bounds {
        let half_lat = self.latitude_delta / 2.0;
        let half_lon = self.longitude_delta / 2.0;
        Bounds {
            south: (self.latitude - half_lat).max(MIN_LAT),
            west: self.longitude - half_lon,
            north: (self.latitude + half_lat).min(MAX_LAT),
            east: self.longitude + half_lon,
        }
    }

    /// Returns true if the point lies inside the visible viewport.
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        self.bounds().contains(latitude, longitude)
    }
}

impl Bounds {
    /// Returns true if the point lies inside (or on the edge of) the box.
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        (self.south..=self.north).contains(&latitude) && (self.west..=self.east).contains(&longitude)
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:.5}, {:.5} (±{:.3}°/{:.3}°)",
            self.latitude, self.longitude, self.latitude_delta, self.longitude_delta
        )
    }
}
