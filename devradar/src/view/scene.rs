//! Render output of the view: what the map widget draws.

use crate::developer::Developer;
use crate::region::Region;

/// Everything needed to draw the map.
#[derive(Debug, Clone, PartialEq)]
pub struct MapScene {
    pub region: Region,
    pub markers: Vec<Marker>,
    /// Registry revision the markers were built from.
    pub revision: u64,
}

/// One developer pin.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    /// Position in the registry. Pass to
    /// [`MapSearchView::press_callout`](super::MapSearchView::press_callout).
    pub key: usize,
    pub latitude: f64,
    pub longitude: f64,
    pub avatar_url: String,
    pub callout: Callout,
    pub github_username: String,
    /// Whether the pin lies inside the scene's region. Pins outside are
    /// still part of the scene.
    pub in_view: bool,
}

/// Detail bubble shown when a marker is tapped.
#[derive(Debug, Clone, PartialEq)]
pub struct Callout {
    pub title: String,
    pub bio: Option<String>,
    pub techs: String,
}

/// Where a callout press leads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Profile { github_username: String, url: String },
}

impl Marker {
    pub(crate) fn for_developer(key: usize, dev: &Developer, region: &Region) -> Self {
        Self {
            key,
            latitude: dev.location.latitude,
            longitude: dev.location.longitude,
            avatar_url: dev.avatar_url.clone(),
            callout: Callout {
                title: dev.name.clone(),
                bio: dev.bio.clone(),
                techs: dev.techs_label(),
            },
            github_username: dev.github_username.clone(),
            in_view: region.contains(dev.location.latitude, dev.location.longitude),
        }
    }
}

impl Navigation {
    pub(crate) fn profile(dev: &Developer) -> Self {
        Self::Profile {
            github_username: dev.github_username.clone(),
            url: dev.profile_url(),
        }
    }
}
