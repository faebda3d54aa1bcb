//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::process;

use devradar::config::{ConfigFileError, ConfigKeyError};
use devradar::location::LocationError;
use devradar::realtime::SubscriptionError;
use devradar::search::SearchError;
use devradar::view::ViewError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration error
    Config(String),
    /// Failed to read the config file
    ConfigFile(ConfigFileError),
    /// Failed to build a client from configuration
    Setup(String),
    /// No map region, so nothing can be searched
    NoRegion,
    /// Search or subscription failure reported by the view
    View(ViewError),
    /// Terminal or runtime I/O error
    Io(std::io::Error),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        match self {
            CliError::NoRegion => {
                eprintln!();
                eprintln!("Give a position with --lat and --lng, or configure one:");
                eprintln!("  devradar config set location.latitude -23.55");
                eprintln!("  devradar config set location.longitude -46.63");
            }
            CliError::View(ViewError::Search(SearchError::HttpError(_)))
            | CliError::View(ViewError::Search(SearchError::Timeout)) => {
                eprintln!();
                eprintln!("Check that the backend is running and api.base_url is correct:");
                eprintln!("  devradar config get api.base_url");
            }
            CliError::View(ViewError::Subscription(_)) => {
                eprintln!();
                eprintln!("Check the realtime endpoint:");
                eprintln!("  devradar config get realtime.url");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::ConfigFile(e) => write!(f, "{}", e),
            CliError::Setup(msg) => write!(f, "Setup failed: {}", msg),
            CliError::NoRegion => write!(f, "No location available, the map is blank"),
            CliError::View(e) => write!(f, "{}", e),
            CliError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::ConfigFile(e) => Some(e),
            CliError::View(e) => Some(e),
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::ConfigFile(e)
    }
}

impl From<ConfigKeyError> for CliError {
    fn from(e: ConfigKeyError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<ViewError> for CliError {
    fn from(e: ViewError) -> Self {
        CliError::View(e)
    }
}

impl From<SearchError> for CliError {
    fn from(e: SearchError) -> Self {
        CliError::Setup(e.to_string())
    }
}

impl From<SubscriptionError> for CliError {
    fn from(e: SubscriptionError) -> Self {
        CliError::Setup(e.to_string())
    }
}

impl From<LocationError> for CliError {
    fn from(e: LocationError) -> Self {
        CliError::Setup(e.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}
