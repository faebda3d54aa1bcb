//! Network based geolocation.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::debug;

use super::error::LocationError;
use super::geolocation::{Geolocation, Position};

const LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Deserialize)]
struct LookupResponse {
    latitude: f64,
    longitude: f64,
}

/// Looks the position up from an HTTP endpoint returning
/// `{"latitude": .., "longitude": ..}`.
///
/// A network lookup is never a satellite fix, so high-accuracy requests fail
/// with [`LocationError::PositionUnavailable`] without contacting the server.
#[derive(Debug, Clone)]
pub struct HttpGeolocation {
    http: Client,
    lookup_url: Url,
}

impl HttpGeolocation {
    pub fn new(lookup_url: &str) -> Result<Self, LocationError> {
        let lookup_url = Url::parse(lookup_url.trim()).map_err(|e| {
            LocationError::PositionUnavailable(format!("invalid lookup URL '{}': {}", lookup_url, e))
        })?;
        let http = Client::builder()
            .timeout(LOOKUP_TIMEOUT)
            .build()
            .map_err(|e| LocationError::PositionUnavailable(e.to_string()))?;

        Ok(Self { http, lookup_url })
    }

    pub fn lookup_url(&self) -> &Url {
        &self.lookup_url
    }
}

impl Geolocation for HttpGeolocation {
    async fn request_permission(&self) -> bool {
        true
    }

    async fn current_position(&self, high_accuracy: bool) -> Result<Position, LocationError> {
        if high_accuracy {
            return Err(LocationError::PositionUnavailable(
                "network lookup cannot provide a high-accuracy fix".to_string(),
            ));
        }

        debug!(url = %self.lookup_url, "Looking up network position");
        let response = self
            .http
            .get(self.lookup_url.clone())
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| LocationError::PositionUnavailable(e.to_string()))?;

        let body: LookupResponse = response
            .json()
            .await
            .map_err(|e| LocationError::PositionUnavailable(e.to_string()))?;

        Ok(Position::new(body.latitude, body.longitude))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_high_accuracy_fails_without_request() {
        // Port 9 is discard; a request would fail differently.
        let geo = HttpGeolocation::new("http://127.0.0.1:9/json").unwrap();
        let err = geo.current_position(true).await.unwrap_err();
        assert!(matches!(err, LocationError::PositionUnavailable(msg) if msg.contains("high-accuracy")));
    }

    #[test]
    fn test_invalid_lookup_url() {
        assert!(HttpGeolocation::new("not a url").is_err());
    }
}
