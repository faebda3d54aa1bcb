//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.
//! These are pure data types with no parsing or serialization logic.

use std::path::PathBuf;

use crate::location::LocationSource;
use crate::registry::AppendPolicy;
use crate::view::ScopePolicy;

/// Complete application configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// Search API settings
    pub api: ApiSettings,
    /// Realtime server settings
    pub realtime: RealtimeSettings,
    /// Where the initial position comes from
    pub location: LocationSettings,
    /// Map view behavior
    pub view: ViewSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// `[api]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiSettings {
    /// Base URL of the backend; `/search` is resolved against it.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout: u64,
}

/// `[realtime]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct RealtimeSettings {
    /// WebSocket endpoint (`ws://` or `wss://`).
    pub url: String,
}

/// `[location]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationSettings {
    pub source: LocationSource,
    /// Used by the `fixed` source. Both must be set for permission to be granted.
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Used by the `http` source.
    pub lookup_url: Option<String>,
    /// Require a precise fix. Network lookups cannot satisfy this.
    pub high_accuracy: bool,
}

/// `[view]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSettings {
    pub append_policy: AppendPolicy,
    pub scope_policy: ScopePolicy,
    /// Query text the view starts with.
    pub default_techs: String,
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    pub file: PathBuf,
}
