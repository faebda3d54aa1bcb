//! Configuration key access and validation.
//!
//! Type-safe get/set of configuration values by `section.key` name, with
//! validation through small value specifications.

use std::path::Path;
use std::str::FromStr;

use thiserror::Error;

use super::parser::{check_url, expand_tilde, parse_bool, parse_coordinate};
use super::settings::ConfigFile;
use crate::location::LocationSource;
use crate::registry::AppendPolicy;
use crate::view::ScopePolicy;

/// Errors that can occur when getting or setting configuration values.
#[derive(Debug, Error)]
pub enum ConfigKeyError {
    /// Unknown configuration key.
    #[error("Unknown configuration key '{0}'")]
    UnknownKey(String),

    /// Validation failed for the value.
    #[error("Invalid value for {key}: {reason}")]
    ValidationFailed { key: String, reason: String },
}

/// Supported configuration keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    ApiBaseUrl,
    ApiTimeout,

    RealtimeUrl,

    LocationSource,
    LocationLatitude,
    LocationLongitude,
    LocationLookupUrl,
    LocationHighAccuracy,

    ViewAppendPolicy,
    ViewScopePolicy,
    ViewDefaultTechs,

    LoggingFile,
}

impl FromStr for ConfigKey {
    type Err = ConfigKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|key| key.name() == lower)
            .ok_or_else(|| ConfigKeyError::UnknownKey(s.to_string()))
    }
}

impl ConfigKey {
    /// Get the canonical key name (e.g., "api.base_url").
    pub fn name(&self) -> &'static str {
        match self {
            ConfigKey::ApiBaseUrl => "api.base_url",
            ConfigKey::ApiTimeout => "api.timeout",
            ConfigKey::RealtimeUrl => "realtime.url",
            ConfigKey::LocationSource => "location.source",
            ConfigKey::LocationLatitude => "location.latitude",
            ConfigKey::LocationLongitude => "location.longitude",
            ConfigKey::LocationLookupUrl => "location.lookup_url",
            ConfigKey::LocationHighAccuracy => "location.high_accuracy",
            ConfigKey::ViewAppendPolicy => "view.append_policy",
            ConfigKey::ViewScopePolicy => "view.scope_policy",
            ConfigKey::ViewDefaultTechs => "view.default_techs",
            ConfigKey::LoggingFile => "logging.file",
        }
    }

    /// Get the section name (e.g., "api").
    pub fn section(&self) -> &'static str {
        self.name().split('.').next().unwrap_or("")
    }

    /// Get the key name within the section (e.g., "base_url").
    pub fn key_name(&self) -> &'static str {
        self.name().split('.').nth(1).unwrap_or(self.name())
    }

    /// Get the value from a config file as a string.
    pub fn get(&self, config: &ConfigFile) -> String {
        match self {
            ConfigKey::ApiBaseUrl => config.api.base_url.clone(),
            ConfigKey::ApiTimeout => config.api.timeout.to_string(),
            ConfigKey::RealtimeUrl => config.realtime.url.clone(),
            ConfigKey::LocationSource => config.location.source.to_string(),
            ConfigKey::LocationLatitude => config
                .location
                .latitude
                .map(|v| v.to_string())
                .unwrap_or_default(),
            ConfigKey::LocationLongitude => config
                .location
                .longitude
                .map(|v| v.to_string())
                .unwrap_or_default(),
            ConfigKey::LocationLookupUrl => {
                config.location.lookup_url.clone().unwrap_or_default()
            }
            ConfigKey::LocationHighAccuracy => config.location.high_accuracy.to_string(),
            ConfigKey::ViewAppendPolicy => config.view.append_policy.to_string(),
            ConfigKey::ViewScopePolicy => config.view.scope_policy.to_string(),
            ConfigKey::ViewDefaultTechs => config.view.default_techs.clone(),
            ConfigKey::LoggingFile => path_to_display(&config.logging.file),
        }
    }

    /// Set the value in a config file.
    ///
    /// Validates the value according to the key's specification before setting.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> Result<(), ConfigKeyError> {
        self.validate(value)?;
        self.apply(config, value.trim())
            .map_err(|reason| ConfigKeyError::ValidationFailed {
                key: self.name().to_string(),
                reason,
            })
    }

    fn apply(&self, config: &mut ConfigFile, value: &str) -> Result<(), String> {
        match self {
            ConfigKey::ApiBaseUrl => config.api.base_url = value.to_string(),
            ConfigKey::ApiTimeout => {
                config.api.timeout = value.parse().map_err(|e| format!("{}", e))?
            }
            ConfigKey::RealtimeUrl => config.realtime.url = value.to_string(),
            ConfigKey::LocationSource => config.location.source = value.parse::<LocationSource>()?,
            ConfigKey::LocationLatitude => config.location.latitude = parse_coordinate(value, 90.0)?,
            ConfigKey::LocationLongitude => {
                config.location.longitude = parse_coordinate(value, 180.0)?
            }
            ConfigKey::LocationLookupUrl => config.location.lookup_url = optional_string(value),
            ConfigKey::LocationHighAccuracy => {
                config.location.high_accuracy =
                    parse_bool(value).ok_or_else(|| "must be true or false".to_string())?
            }
            ConfigKey::ViewAppendPolicy => {
                config.view.append_policy = value.parse::<AppendPolicy>()?
            }
            ConfigKey::ViewScopePolicy => config.view.scope_policy = value.parse::<ScopePolicy>()?,
            ConfigKey::ViewDefaultTechs => config.view.default_techs = value.to_string(),
            ConfigKey::LoggingFile => config.logging.file = expand_tilde(value),
        }
        Ok(())
    }

    /// Validate a value according to this key's specification.
    pub fn validate(&self, value: &str) -> Result<(), ConfigKeyError> {
        self.specification()
            .is_satisfied_by(value.trim())
            .map_err(|reason| ConfigKeyError::ValidationFailed {
                key: self.name().to_string(),
                reason,
            })
    }

    fn specification(&self) -> Box<dyn ValueSpecification> {
        match self {
            ConfigKey::ApiBaseUrl => Box::new(UrlSpec::new(&["http", "https"], false)),
            ConfigKey::ApiTimeout => Box::new(PositiveIntegerSpec),
            ConfigKey::RealtimeUrl => Box::new(UrlSpec::new(&["ws", "wss"], false)),
            ConfigKey::LocationSource => Box::new(OneOfSpec::new(&["fixed", "http", "denied"])),
            ConfigKey::LocationLatitude => Box::new(CoordinateSpec { limit: 90.0 }),
            ConfigKey::LocationLongitude => Box::new(CoordinateSpec { limit: 180.0 }),
            ConfigKey::LocationLookupUrl => Box::new(UrlSpec::new(&["http", "https"], true)),
            ConfigKey::LocationHighAccuracy => Box::new(BooleanSpec),
            ConfigKey::ViewAppendPolicy => Box::new(OneOfSpec::new(&["literal", "dedup"])),
            ConfigKey::ViewScopePolicy => Box::new(OneOfSpec::new(&["unfiltered", "active"])),
            ConfigKey::ViewDefaultTechs => Box::new(AnyStringSpec),
            ConfigKey::LoggingFile => Box::new(PathSpec),
        }
    }

    /// Get all supported configuration keys.
    pub fn all() -> &'static [ConfigKey] {
        &[
            ConfigKey::ApiBaseUrl,
            ConfigKey::ApiTimeout,
            ConfigKey::RealtimeUrl,
            ConfigKey::LocationSource,
            ConfigKey::LocationLatitude,
            ConfigKey::LocationLongitude,
            ConfigKey::LocationLookupUrl,
            ConfigKey::LocationHighAccuracy,
            ConfigKey::ViewAppendPolicy,
            ConfigKey::ViewScopePolicy,
            ConfigKey::ViewDefaultTechs,
            ConfigKey::LoggingFile,
        ]
    }
}

// ============================================================================
// Value specifications
// ============================================================================

trait ValueSpecification {
    /// Returns Ok(()) if valid, Err(reason) if invalid.
    fn is_satisfied_by(&self, value: &str) -> Result<(), String>;
}

/// Accepts any string value.
struct AnyStringSpec;

impl ValueSpecification for AnyStringSpec {
    fn is_satisfied_by(&self, _value: &str) -> Result<(), String> {
        Ok(())
    }
}

/// Requires the value to be one of a set of options.
struct OneOfSpec {
    options: &'static [&'static str],
}

impl OneOfSpec {
    fn new(options: &'static [&'static str]) -> Self {
        Self { options }
    }
}

impl ValueSpecification for OneOfSpec {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String> {
        let lower = value.to_lowercase();
        if self.options.iter().any(|opt| *opt == lower) {
            Ok(())
        } else {
            Err(format!("must be one of: {}", self.options.join(", ")))
        }
    }
}

struct PositiveIntegerSpec;

impl ValueSpecification for PositiveIntegerSpec {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String> {
        match value.parse::<u64>() {
            Ok(n) if n > 0 => Ok(()),
            _ => Err("must be a positive integer".to_string()),
        }
    }
}

/// Optional coordinate within `±limit`.
struct CoordinateSpec {
    limit: f64,
}

impl ValueSpecification for CoordinateSpec {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String> {
        parse_coordinate(value, self.limit).map(|_| ())
    }
}

struct BooleanSpec;

impl ValueSpecification for BooleanSpec {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String> {
        parse_bool(value)
            .map(|_| ())
            .ok_or_else(|| "must be true/false, yes/no, 1/0, or on/off".to_string())
    }
}

/// Non-empty path.
struct PathSpec;

impl ValueSpecification for PathSpec {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String> {
        if value.is_empty() {
            Err("must be a valid path".to_string())
        } else {
            Ok(())
        }
    }
}

/// URL with one of the given schemes.
struct UrlSpec {
    schemes: &'static [&'static str],
    optional: bool,
}

impl UrlSpec {
    fn new(schemes: &'static [&'static str], optional: bool) -> Self {
        Self { schemes, optional }
    }
}

impl ValueSpecification for UrlSpec {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String> {
        if value.is_empty() && self.optional {
            return Ok(());
        }
        check_url(value, self.schemes)
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Convert path to display string, collapsing home dir to ~.
fn path_to_display(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}

/// Convert empty string to None, non-empty to Some.
fn optional_string(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_key_parsing() {
        assert_eq!(
            "api.base_url".parse::<ConfigKey>().unwrap(),
            ConfigKey::ApiBaseUrl
        );
        assert_eq!(
            "VIEW.SCOPE_POLICY".parse::<ConfigKey>().unwrap(),
            ConfigKey::ViewScopePolicy
        );
        assert!(matches!(
            "invalid.key".parse::<ConfigKey>(),
            Err(ConfigKeyError::UnknownKey(_))
        ));
    }

    #[test]
    fn test_key_name_parts() {
        assert_eq!(ConfigKey::LocationLookupUrl.section(), "location");
        assert_eq!(ConfigKey::LocationLookupUrl.key_name(), "lookup_url");
    }

    #[test]
    fn test_every_key_round_trips_its_name() {
        for key in ConfigKey::all() {
            assert_eq!(key.name().parse::<ConfigKey>().unwrap(), *key);
        }
    }

    #[test]
    fn test_get_value() {
        let config = ConfigFile::default();

        assert_eq!(ConfigKey::ApiTimeout.get(&config), "30");
        assert_eq!(ConfigKey::LocationSource.get(&config), "fixed");
        assert_eq!(ConfigKey::LocationLatitude.get(&config), "");
        assert_eq!(ConfigKey::LocationHighAccuracy.get(&config), "true");
    }

    #[test]
    fn test_set_value() {
        let mut config = ConfigFile::default();

        ConfigKey::LocationLatitude.set(&mut config, "-23.55").unwrap();
        assert_eq!(config.location.latitude, Some(-23.55));

        ConfigKey::ViewAppendPolicy.set(&mut config, "dedup").unwrap();
        assert_eq!(config.view.append_policy, AppendPolicy::DedupById);

        ConfigKey::LocationHighAccuracy.set(&mut config, "no").unwrap();
        assert!(!config.location.high_accuracy);

        ConfigKey::LocationLatitude.set(&mut config, "").unwrap();
        assert_eq!(config.location.latitude, None);
    }

    #[test]
    fn test_set_rejects_invalid_values() {
        let mut config = ConfigFile::default();

        assert!(ConfigKey::RealtimeUrl.set(&mut config, "http://x").is_err());
        assert!(ConfigKey::LocationLongitude.set(&mut config, "181").is_err());
        assert!(ConfigKey::ApiTimeout.set(&mut config, "0").is_err());
        assert!(ConfigKey::ViewScopePolicy.set(&mut config, "strict").is_err());
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_optional_lookup_url() {
        assert!(ConfigKey::LocationLookupUrl.validate("").is_ok());
        assert!(ConfigKey::LocationLookupUrl.validate("ftp://x").is_err());
    }
}
