//! Map viewport state.
//!
//! [`RegionState`] holds the currently visible [`Region`]. It is a pure state
//! holder: it never performs I/O and never triggers a search by itself.
//!
//! A region becomes available either from the initial location fix
//! ([`RegionState::seed`]) or from the user panning the map
//! ([`RegionState::on_region_changed`]). Until then the view has nothing to
//! show.

mod types;


pub use types::{
    Bounds, Region, RegionError, DEFAULT_REGION_DELTA, MAX_LAT, MAX_LON, MIN_LAT, MIN_LON,
};

/// Currently visible map viewport, absent until the first region arrives.
#[derive(Debug, Clone, Default)]
pub struct RegionState {
    current: Option<Region>,
}

impl RegionState {
    /// Creates an empty state (no region yet).
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current region, if any.
    pub fn current(&self) -> Option<Region> {
        self.current
    }

    /// Returns true once a region is available.
    pub fn is_present(&self) -> bool {
        self.current.is_some()
    }

    /// Seeds the state from the initial location fix.
    ///
    /// Only applies while no region is present, so a late fix never overrides
    /// a region the user already panned to. Returns true if the seed was applied.
    pub fn seed(&mut self, region: Region) -> Result<bool, RegionError> {
        region.validate()?;
        if self.current.is_some() {
            tracing::debug!(%region, "Ignoring location seed, region already set");
            return Ok(false);
        }
        self.current = Some(region);
        Ok(true)
    }

    /// Replaces the current region after a completed pan/zoom gesture.
    ///
    /// An invalid region is rejected and the previous one is kept.
    pub fn on_region_changed(&mut self, region: Region) -> Result<(), RegionError> {
        region.validate()?;
        self.current = Some(region);
        Ok(())
    }
}
