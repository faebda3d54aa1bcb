//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This is the single place where INI key names are mapped to struct fields.

use std::path::PathBuf;

use ini::Ini;

use super::file::ConfigFileError;
use super::settings::ConfigFile;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [api] section
    if let Some(section) = ini.section(Some("api")) {
        if let Some(v) = section.get("base_url") {
            let v = v.trim();
            check_url(v, &["http", "https"])
                .map_err(|reason| invalid("api", "base_url", v, reason))?;
            config.api.base_url = v.to_string();
        }
        if let Some(v) = section.get("timeout") {
            config.api.timeout = match v.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(invalid(
                        "api",
                        "timeout",
                        v,
                        "must be a positive integer (seconds)",
                    ))
                }
            };
        }
    }

    // [realtime] section
    if let Some(section) = ini.section(Some("realtime")) {
        if let Some(v) = section.get("url") {
            let v = v.trim();
            check_url(v, &["ws", "wss"]).map_err(|reason| invalid("realtime", "url", v, reason))?;
            config.realtime.url = v.to_string();
        }
    }

    // [location] section
    if let Some(section) = ini.section(Some("location")) {
        if let Some(v) = section.get("source") {
            config.location.source = v
                .parse()
                .map_err(|_| invalid("location", "source", v, "must be one of: fixed, http, denied"))?;
        }
        if let Some(v) = section.get("latitude") {
            config.location.latitude = parse_coordinate(v, 90.0)
                .map_err(|reason| invalid("location", "latitude", v, reason))?;
        }
        if let Some(v) = section.get("longitude") {
            config.location.longitude = parse_coordinate(v, 180.0)
                .map_err(|reason| invalid("location", "longitude", v, reason))?;
        }
        if let Some(v) = section.get("lookup_url") {
            let v = v.trim();
            if !v.is_empty() {
                check_url(v, &["http", "https"])
                    .map_err(|reason| invalid("location", "lookup_url", v, reason))?;
                config.location.lookup_url = Some(v.to_string());
            }
        }
        if let Some(v) = section.get("high_accuracy") {
            config.location.high_accuracy = parse_bool(v)
                .ok_or_else(|| invalid("location", "high_accuracy", v, "must be true or false"))?;
        }
    }

    // [view] section
    if let Some(section) = ini.section(Some("view")) {
        if let Some(v) = section.get("append_policy") {
            config.view.append_policy = v
                .parse()
                .map_err(|_| invalid("view", "append_policy", v, "must be 'literal' or 'dedup'"))?;
        }
        if let Some(v) = section.get("scope_policy") {
            config.view.scope_policy = v.parse().map_err(|_| {
                invalid("view", "scope_policy", v, "must be 'unfiltered' or 'active'")
            })?;
        }
        if let Some(v) = section.get("default_techs") {
            config.view.default_techs = v.trim().to_string();
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.file = expand_tilde(v);
            }
        }
    }

    Ok(config)
}

fn invalid(section: &str, key: &str, value: &str, reason: impl Into<String>) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// Checks that `value` parses as a URL with one of `schemes`.
pub(super) fn check_url(value: &str, schemes: &[&str]) -> Result<(), String> {
    let expected = || format!("must be a URL starting with {}", schemes.join(":// or ") + "://");
    match reqwest::Url::parse(value) {
        Ok(url) if schemes.contains(&url.scheme()) => Ok(()),
        _ => Err(expected()),
    }
}

/// Parses an optional coordinate within `±limit`. Empty means unset.
pub(super) fn parse_coordinate(value: &str, limit: f64) -> Result<Option<f64>, String> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    match value.parse::<f64>() {
        Ok(n) if n.is_finite() && n.abs() <= limit => Ok(Some(n)),
        _ => Err(format!("must be a number between -{} and {}", limit, limit)),
    }
}

/// Parse a boolean value from string. Returns `None` for anything unrecognized.
pub(super) fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Expand ~ to home directory in paths.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}
