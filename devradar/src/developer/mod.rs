//! Developer records as delivered by the search API and the realtime feed.
//!
//! The backend stores locations as GeoJSON points, so coordinates arrive as
//! `[longitude, latitude]`. [`GeoPoint`] hides that ordering behind named
//! fields.

use serde::{Deserialize, Serialize};

/// Base URL of the profile page opened from a marker callout.
pub const PROFILE_BASE_URL: &str = "https://github.com";

/// A registered developer, immutable once received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Developer {
    /// Backend identifier (`_id` on the wire).
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub bio: Option<String>,

    #[serde(default)]
    pub avatar_url: String,

    pub github_username: String,

    /// Technologies in the order the developer listed them.
    #[serde(default)]
    pub techs: Vec<String>,

    pub location: GeoPoint,
}

impl Developer {
    /// Techs joined for display in a callout, e.g. `"ReactJS, Node.js"`.
    pub fn techs_label(&self) -> String {
        self.techs.join(", ")
    }

    /// URL of the developer's profile page.
    pub fn profile_url(&self) -> String {
        profile_url(&self.github_username)
    }
}

/// Builds the profile page URL for a GitHub username.
pub fn profile_url(github_username: &str) -> String {
    format!("{}/{}", PROFILE_BASE_URL, github_username)
}

/// Geographic point with named coordinates.
///
/// Serialized as a GeoJSON point: `{"type": "Point", "coordinates": [lng, lat]}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GeoJsonPoint", into = "GeoJsonPoint")]
pub struct GeoPoint {
    pub longitude: f64,
    pub latitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct GeoJsonPoint {
    #[serde(rename = "type", default = "point_type")]
    kind: String,
    coordinates: Vec<f64>,
}

fn point_type() -> String {
    "Point".to_string()
}

impl TryFrom<GeoJsonPoint> for GeoPoint {
    type Error = String;

    fn try_from(point: GeoJsonPoint) -> Result<Self, Self::Error> {
        if point.kind != "Point" {
            return Err(format!("expected GeoJSON Point, got '{}'", point.kind));
        }
        match point.coordinates.as_slice() {
            [longitude, latitude] => Ok(Self {
                longitude: *longitude,
                latitude: *latitude,
            }),
            other => Err(format!(
                "expected [longitude, latitude], got {} values",
                other.len()
            )),
        }
    }
}

impl From<GeoPoint> for GeoJsonPoint {
    fn from(point: GeoPoint) -> Self {
        Self {
            kind: point_type(),
            coordinates: vec![point.longitude, point.latitude],
        }
    }
}
