//! DevRadar CLI - find nearby developers from the terminal
//!
//! Subcommands:
//! - `search` - one search, prints the markers
//! - `watch` - interactive map with realtime updates
//! - `config` - view and edit `~/.devradar/config.ini`

mod commands;
mod error;
mod render;
mod runner;

use clap::{Parser, Subcommand};

use commands::common::MapArgs;
use commands::config::ConfigCommands;

#[derive(Parser)]
#[command(name = "devradar")]
#[command(version = devradar::VERSION)]
#[command(about = "Find developers near you by technology", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search once at the given or located position and print the results
    Search(MapArgs),

    /// Open the interactive map and follow newly registered developers
    Watch(MapArgs),

    /// View or change configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Search(args) => commands::search::run(args),
        Commands::Watch(args) => commands::watch::run(args),
        Commands::Config(command) => commands::config::run(command),
    };

    if let Err(e) = result {
        e.exit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_negative_coordinates() {
        let cli = Cli::try_parse_from([
            "devradar", "search", "--techs", "node", "--lat", "-23.55", "--lng", "-46.63",
        ])
        .unwrap();

        match cli.command {
            Commands::Search(args) => {
                assert_eq!(args.techs.as_deref(), Some("node"));
                assert_eq!(args.lat, Some(-23.55));
                assert_eq!(args.lng, Some(-46.63));
            }
            _ => panic!("expected search"),
        }
    }

    #[test]
    fn test_lat_requires_lng() {
        assert!(Cli::try_parse_from(["devradar", "watch", "--lat", "1"]).is_err());
    }

    #[test]
    fn test_config_set() {
        let cli =
            Cli::try_parse_from(["devradar", "config", "set", "location.latitude", "-3.7"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Config(ConfigCommands::Set { ref value, .. }) if value == "-3.7"
        ));
    }
}
