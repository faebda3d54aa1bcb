//! Search API trait and HTTP implementation.
//!
//! The [`SearchApi`] trait is the seam the view talks to; tests substitute
//! their own implementation. [`HttpSearchApi`] is the real client.

use std::future::Future;
use std::time::Duration;

use reqwest::Url;
use serde::Deserialize;
use tracing::{debug, warn};

use super::error::SearchError;
use super::query::SearchQuery;
use crate::developer::Developer;

/// Default HTTP timeout for a search request.
pub const DEFAULT_SEARCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Path of the search endpoint, relative to the API base URL.
const SEARCH_PATH: &str = "search";

/// Trait for searching developers near a point.
pub trait SearchApi: Send + Sync {
    /// Runs one search and returns the matching developers.
    fn search(
        &self,
        query: &SearchQuery,
    ) -> impl Future<Output = Result<Vec<Developer>, SearchError>> + Send;
}

/// Response body of `GET /search`.
#[derive(Deserialize)]
struct SearchResponse {
    devs: Vec<Developer>,
}

/// Search client using direct HTTP requests.
///
/// Uses a reusable `reqwest::Client` with connection pooling and a timeout.
#[derive(Clone)]
pub struct HttpSearchApi {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpSearchApi {
    /// Creates a client for the API at `base_url` with the default timeout.
    pub fn new(base_url: &str) -> Result<Self, SearchError> {
        Self::with_timeout(base_url, DEFAULT_SEARCH_TIMEOUT)
    }

    /// Creates a client with a custom request timeout.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, SearchError> {
        let base_url = parse_base_url(base_url)?;
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("devradar/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SearchError::HttpError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { http, base_url })
    }

    /// The base URL requests are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds the full request URL for a query.
    pub fn search_url(&self, query: &SearchQuery) -> Result<Url, SearchError> {
        let mut url = self
            .base_url
            .join(SEARCH_PATH)
            .map_err(|e| SearchError::InvalidEndpoint {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        url.query_pairs_mut().extend_pairs(query.query_pairs());
        Ok(url)
    }
}

impl SearchApi for HttpSearchApi {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<Developer>, SearchError> {
        let url = self.search_url(query)?;
        debug!(url = %url, "Searching developers");

        let response = self.http.get(url.clone()).send().await.map_err(|e| {
            warn!(
                url = %url,
                error = %e,
                is_connect = e.is_connect(),
                is_timeout = e.is_timeout(),
                "Search request failed"
            );
            if e.is_timeout() {
                SearchError::Timeout
            } else {
                SearchError::HttpError(e.to_string())
            }
        })?;

        if !response.status().is_success() {
            return Err(SearchError::HttpStatus {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }

        let bytes = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                SearchError::Timeout
            } else {
                SearchError::HttpError(format!("Failed to read response: {}", e))
            }
        })?;

        let devs = decode_response(&bytes)?;
        debug!(count = devs.len(), "Search completed");
        Ok(devs)
    }
}

/// Parses the API base URL, forcing a trailing slash so that joining the
/// endpoint path keeps any path prefix (`http://host/api` → `/api/search`).
fn parse_base_url(base_url: &str) -> Result<Url, SearchError> {
    let trimmed = base_url.trim();
    let normalized = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{}/", trimmed)
    };

    let url = Url::parse(&normalized).map_err(|e| SearchError::InvalidEndpoint {
        url: base_url.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(SearchError::InvalidEndpoint {
            url: base_url.to_string(),
            reason: format!("unsupported scheme '{}'", other),
        }),
    }
}

/// Decodes a `{"devs": [...]}` response body.
fn decode_response(bytes: &[u8]) -> Result<Vec<Developer>, SearchError> {
    serde_json::from_slice::<SearchResponse>(bytes)
        .map(|r| r.devs)
        .map_err(|e| SearchError::InvalidResponse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::Region;

    fn api(base: &str) -> HttpSearchApi {
        HttpSearchApi::new(base).unwrap()
    }

    #[test]
    fn test_search_url_uses_swapped_mapping() {
        let region = Region::centered(10.0, 20.0).unwrap();
        let query = SearchQuery::from_region(&region, "node");

        let url = api("http://localhost:3333").search_url(&query).unwrap();

        assert_eq!(url.path(), "/search");
        assert_eq!(url.query(), Some("latitude=20&longitude=10&techs=node"));
    }

    #[test]
    fn test_search_url_keeps_path_prefix() {
        let region = Region::centered(1.5, 2.5).unwrap();
        let query = SearchQuery::from_region(&region, "rust");

        let url = api("https://api.example.com/v1").search_url(&query).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.example.com/v1/search?latitude=2.5&longitude=1.5&techs=rust"
        );
    }

    #[test]
    fn test_search_url_encodes_techs() {
        let region = Region::centered(0.0, 0.0).unwrap();
        let query = SearchQuery::from_region(&region, "ReactJS, Node.js");

        let url = api("http://localhost:3333/").search_url(&query).unwrap();
        assert_eq!(
            url.query(),
            Some("latitude=0&longitude=0&techs=ReactJS%2C+Node.js")
        );
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        assert!(matches!(
            HttpSearchApi::new("not a url"),
            Err(SearchError::InvalidEndpoint { .. })
        ));
        assert!(matches!(
            HttpSearchApi::new("ftp://example.com"),
            Err(SearchError::InvalidEndpoint { .. })
        ));
    }

    #[test]
    fn test_decode_response() {
        let body = br#"{
            "devs": [
                {"_id": "1", "github_username": "a", "name": "A", "techs": ["node"],
                 "location": {"type": "Point", "coordinates": [20.0, 10.0]}},
                {"_id": "2", "github_username": "b", "name": "B", "techs": [],
                 "location": {"type": "Point", "coordinates": [20.1, 10.1]}}
            ]
        }"#;

        let devs = decode_response(body).unwrap();
        assert_eq!(devs.len(), 2);
        assert_eq!(devs[0].github_username, "a");
        assert_eq!(devs[1].location.latitude, 10.1);
    }

    #[test]
    fn test_decode_response_rejects_other_shapes() {
        assert!(matches!(
            decode_response(b"[]"),
            Err(SearchError::InvalidResponse(_))
        ));
        assert!(matches!(
            decode_response(b"<html>"),
            Err(SearchError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_decode_empty_result() {
        assert_eq!(decode_response(br#"{"devs": []}"#).unwrap(), vec![]);
    }
}
