//! Default values for all configuration settings.

use std::path::PathBuf;

use super::file::config_directory;
use super::settings::*;
use crate::location::LocationSource;
use crate::registry::AppendPolicy;
use crate::view::ScopePolicy;

/// Default backend base URL.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3333";

/// Default search request timeout in seconds.
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 30;

/// Default realtime endpoint.
pub const DEFAULT_REALTIME_URL: &str = "ws://localhost:3333/realtime";

/// Position fixes are high-accuracy unless configured otherwise.
pub const DEFAULT_HIGH_ACCURACY: bool = true;

/// Log file name inside the config directory.
pub const DEFAULT_LOG_FILE_NAME: &str = "devradar.log";

/// Default log file path (~/.devradar/devradar.log).
pub fn default_log_file() -> PathBuf {
    config_directory().join(DEFAULT_LOG_FILE_NAME)
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            api: ApiSettings {
                base_url: DEFAULT_API_BASE_URL.to_string(),
                timeout: DEFAULT_API_TIMEOUT_SECS,
            },
            realtime: RealtimeSettings {
                url: DEFAULT_REALTIME_URL.to_string(),
            },
            location: LocationSettings {
                source: LocationSource::Fixed,
                latitude: None,
                longitude: None,
                lookup_url: None,
                high_accuracy: DEFAULT_HIGH_ACCURACY,
            },
            view: ViewSettings {
                append_policy: AppendPolicy::Literal,
                scope_policy: ScopePolicy::Unfiltered,
                default_techs: String::new(),
            },
            logging: LoggingSettings {
                file: default_log_file(),
            },
        }
    }
}
