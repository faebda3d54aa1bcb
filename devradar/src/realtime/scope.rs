//! Subscription scope, identifiers and inbound events.

use std::fmt;

use crate::developer::Developer;
use crate::region::Region;

/// The (latitude, longitude, techs) triple a subscription is bound to.
///
/// Unlike the search request, the realtime scope uses the region's
/// coordinates under their own names.
#[derive(Debug, Clone, PartialEq)]
pub struct SubscriptionScope {
    pub latitude: f64,
    pub longitude: f64,
    pub techs: String,
}

impl SubscriptionScope {
    pub fn new(region: &Region, techs: &str) -> Self {
        Self {
            latitude: region.latitude,
            longitude: region.longitude,
            techs: techs.to_string(),
        }
    }

    /// Query-string pairs sent when connecting.
    pub fn query_pairs(&self) -> [(&'static str, String); 3] {
        [
            ("latitude", self.latitude.to_string()),
            ("longitude", self.longitude.to_string()),
            ("techs", self.techs.clone()),
        ]
    }
}

impl fmt::Display for SubscriptionScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {} [{}]",
            self.latitude, self.longitude, self.techs
        )
    }
}

/// Identifier of one opened subscription, unique per manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A developer pushed by the server, tagged with the subscription it arrived on.
#[derive(Debug, Clone, PartialEq)]
pub struct RealtimeEvent {
    pub subscription: SubscriptionId,
    pub developer: Developer,
}
