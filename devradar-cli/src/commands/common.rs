//! Types and helpers shared by the map commands.

use clap::Args;
use tracing::debug;

use devradar::config::ConfigFile;
use devradar::location::{
    AnyGeolocation, DeniedGeolocation, FixedGeolocation, HttpGeolocation, LocationProvider,
    LocationSource,
};
use devradar::realtime::WebSocketChannel;
use devradar::search::HttpSearchApi;
use devradar::view::MapSearchView;

use crate::error::CliError;

/// The view as wired by the CLI.
pub type CliView = MapSearchView<AnyGeolocation, HttpSearchApi, WebSocketChannel>;

/// Position and filter flags shared by `search` and `watch`.
#[derive(Debug, Clone, Default, Args)]
pub struct MapArgs {
    /// Technology filter, e.g. "ReactJS, Node.js" (default: view.default_techs)
    #[arg(long)]
    pub techs: Option<String>,

    /// Latitude to start at (overrides the configured location source)
    #[arg(long, allow_negative_numbers = true, requires = "lng")]
    pub lat: Option<f64>,

    /// Longitude to start at
    #[arg(long, allow_negative_numbers = true, requires = "lat")]
    pub lng: Option<f64>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl MapArgs {
    /// Technology filter from the flag, falling back to the configured default.
    pub fn techs_or_default(&self, config: &ConfigFile) -> String {
        self.techs
            .clone()
            .unwrap_or_else(|| config.view.default_techs.clone())
    }
}

/// Picks the geolocation service: flags first, then the configured source.
pub fn resolve_geolocation(args: &MapArgs, config: &ConfigFile) -> Result<AnyGeolocation, CliError> {
    if let (Some(lat), Some(lng)) = (args.lat, args.lng) {
        debug!(lat, lng, "Using position from command line");
        return Ok(AnyGeolocation::Fixed(FixedGeolocation::at(lat, lng)));
    }

    match config.location.source {
        LocationSource::Fixed => Ok(AnyGeolocation::Fixed(FixedGeolocation::new(
            config.fixed_position(),
        ))),
        LocationSource::Http => {
            let url = config.location.lookup_url.as_deref().ok_or_else(|| {
                CliError::Config(
                    "location.source is 'http' but location.lookup_url is not set".to_string(),
                )
            })?;
            Ok(AnyGeolocation::Http(HttpGeolocation::new(url)?))
        }
        LocationSource::Denied => Ok(AnyGeolocation::Denied(DeniedGeolocation)),
    }
}

/// Builds the view from configuration and flags.
pub fn build_view(args: &MapArgs, config: &ConfigFile) -> Result<CliView, CliError> {
    let geolocation = resolve_geolocation(args, config)?;
    let location =
        LocationProvider::new(geolocation).with_high_accuracy(config.location.high_accuracy);
    let search_api = HttpSearchApi::with_timeout(&config.api.base_url, config.api_timeout())?;
    let channel = WebSocketChannel::new(&config.realtime.url)?;

    let mut view = MapSearchView::new(location, search_api, channel, config.view_options());
    view.set_query(args.techs_or_default(config));
    Ok(view)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_configured_source() {
        let mut config = ConfigFile::default();
        config.location.source = LocationSource::Denied;
        let args = MapArgs {
            lat: Some(1.0),
            lng: Some(2.0),
            ..MapArgs::default()
        };

        assert!(matches!(
            resolve_geolocation(&args, &config).unwrap(),
            AnyGeolocation::Fixed(_)
        ));
    }

    #[test]
    fn test_http_source_requires_lookup_url() {
        let mut config = ConfigFile::default();
        config.location.source = LocationSource::Http;

        assert!(matches!(
            resolve_geolocation(&MapArgs::default(), &config),
            Err(CliError::Config(_))
        ));
    }

    #[test]
    fn test_techs_fall_back_to_config() {
        let mut config = ConfigFile::default();
        config.view.default_techs = "rust".to_string();

        assert_eq!(MapArgs::default().techs_or_default(&config), "rust");
        let args = MapArgs {
            techs: Some("go".to_string()),
            ..MapArgs::default()
        };
        assert_eq!(args.techs_or_default(&config), "go");
    }

    #[test]
    fn test_build_view_starts_blank_with_query() {
        let mut config = ConfigFile::default();
        config.view.default_techs = "node".to_string();

        let view = build_view(&MapArgs::default(), &config).unwrap();
        assert_eq!(view.query(), "node");
        assert!(view.render().is_none());
    }
}
