//! INI serialization logic for converting `ConfigFile` → INI string.

use std::path::Path;

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    let latitude = config
        .location
        .latitude
        .map(|v| v.to_string())
        .unwrap_or_default();
    let longitude = config
        .location
        .longitude
        .map(|v| v.to_string())
        .unwrap_or_default();
    let lookup_url = config.location.lookup_url.as_deref().unwrap_or("");

    format!(
        r#"[api]
; Backend base URL. Searches go to <base_url>/search
base_url = {}
; Timeout in seconds for search requests (default: 30)
timeout = {}

[realtime]
; WebSocket endpoint for new-developer pushes (ws:// or wss://)
url = {}

[location]
; Where the initial map position comes from:
;   fixed  - latitude/longitude below (blank = permission denied)
;   http   - network lookup at lookup_url, returns {{"latitude":..,"longitude":..}}
;   denied - never grant location, the map stays blank
source = {}
latitude = {}
longitude = {}
lookup_url = {}
; Require a precise fix (default: true). The http source cannot provide one,
; so set this to false when using it.
high_accuracy = {}

[view]
; How realtime pushes are added to the marker list:
;   literal - append every push, duplicates included (default)
;   dedup   - skip developers already shown
append_policy = {}
; Which realtime pushes are accepted:
;   unfiltered - every push, including late ones from a replaced subscription (default)
;   active     - only pushes from the subscription opened by the latest search
scope_policy = {}
; Technology filter the map starts with, e.g. ReactJS, Node.js
default_techs = {}

[logging]
; Log file path (default: ~/.devradar/devradar.log)
file = {}
"#,
        config.api.base_url,
        config.api.timeout,
        config.realtime.url,
        config.location.source,
        latitude,
        longitude,
        lookup_url,
        config.location.high_accuracy,
        config.view.append_policy,
        config.view.scope_policy,
        config.view.default_techs,
        path_to_string(&config.logging.file),
    )
}

/// Convert a path to string, collapsing the home directory to `~`.
fn path_to_string(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}
