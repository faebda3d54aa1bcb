//! Search request parameters.

use crate::region::Region;

/// Parameters of one search request, already in wire order.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    /// Value sent as the `latitude` parameter.
    pub latitude: f64,
    /// Value sent as the `longitude` parameter.
    pub longitude: f64,
    /// Free-text technology filter, sent verbatim.
    pub techs: String,
}

impl SearchQuery {
    /// Builds the query for a region and technology filter.
    ///
    /// The backend expects the coordinates under swapped names: `latitude`
    /// carries the region's longitude and `longitude` carries its latitude.
    /// Keep this mapping in sync with the backend, not with geometry.
    pub fn from_region(region: &Region, techs: &str) -> Self {
        Self {
            latitude: region.longitude,
            longitude: region.latitude,
            techs: techs.to_string(),
        }
    }

    /// Query-string pairs in the order they are sent.
    pub fn query_pairs(&self) -> [(&'static str, String); 3] {
        [
            ("latitude", self.latitude.to_string()),
            ("longitude", self.longitude.to_string()),
            ("techs", self.techs.clone()),
        ]
    }
}
