//! Watch command - the interactive map screen.
//!
//! Mounts the view, then reads commands from stdin while realtime pushes are
//! applied as they arrive. Ctrl-C or `quit` unmounts and exits.

use console::style;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, trace};

use devradar::region::{Region, DEFAULT_REGION_DELTA};

use super::common::{build_view, CliView, MapArgs};
use crate::error::CliError;
use crate::render;
use crate::runner::CliRunner;

const HELP: &str = "\
Commands:
  techs <text>                 set the technology filter
  search                       search at the current region
  pan <lat> <lng> [<dlat> <dlng>]  move the map
  open <n>                     open the profile behind marker n
  list                         show the map again
  help                         show this help
  quit                         exit";

/// A line typed at the prompt.
#[derive(Debug, Clone, PartialEq)]
enum WatchCommand {
    Techs(String),
    Search,
    Pan {
        latitude: f64,
        longitude: f64,
        deltas: Option<(f64, f64)>,
    },
    Open(usize),
    List,
    Help,
    Quit,
}

/// Parses one input line. Blank lines yield `Ok(None)`.
fn parse_command(line: &str) -> Result<Option<WatchCommand>, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_lowercase().as_str() {
        "" => return Ok(None),
        "techs" => WatchCommand::Techs(rest.to_string()),
        "search" | "s" => WatchCommand::Search,
        "pan" => parse_pan(rest)?,
        "open" => WatchCommand::Open(
            rest.parse()
                .map_err(|_| format!("'{}' is not a marker number", rest))?,
        ),
        "list" | "ls" => WatchCommand::List,
        "help" | "?" => WatchCommand::Help,
        "quit" | "exit" | "q" => WatchCommand::Quit,
        other => return Err(format!("unknown command '{}', type 'help'", other)),
    };
    Ok(Some(command))
}

fn parse_pan(args: &str) -> Result<WatchCommand, String> {
    let numbers = args
        .split_whitespace()
        .map(|s| s.parse::<f64>().map_err(|_| format!("'{}' is not a number", s)))
        .collect::<Result<Vec<_>, _>>()?;

    match numbers.as_slice() {
        [latitude, longitude] => Ok(WatchCommand::Pan {
            latitude: *latitude,
            longitude: *longitude,
            deltas: None,
        }),
        [latitude, longitude, dlat, dlng] => Ok(WatchCommand::Pan {
            latitude: *latitude,
            longitude: *longitude,
            deltas: Some((*dlat, *dlng)),
        }),
        _ => Err("usage: pan <lat> <lng> [<dlat> <dlng>]".to_string()),
    }
}

/// Run the watch command.
pub fn run(args: MapArgs) -> Result<(), CliError> {
    let runner = CliRunner::with_debug(args.debug)?;
    runner.log_startup("watch");

    let mut view = build_view(&args, runner.config())?;

    let shutdown = view.cancellation_token();
    ctrlc::set_handler(move || shutdown.cancel())
        .map_err(|e| CliError::Config(format!("Failed to set signal handler: {}", e)))?;

    let runtime = runner.runtime()?;
    let result = runtime.block_on(async move {
        let result = watch_loop(&mut view).await;
        view.unmount().await;
        result
    });

    // The stdin reader may still be blocked on a read; don't wait for it.
    runtime.shutdown_background();
    println!();
    println!("Map closed.");
    result
}

async fn watch_loop(view: &mut CliView) -> Result<(), CliError> {
    println!("{} v{}", style("DevRadar").bold().cyan(), devradar::VERSION);
    println!("Type 'help' for commands, Ctrl+C to exit.");
    println!();

    if view.mount().await {
        show(view);
    } else {
        render::print_blank();
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    prompt();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_command(&line) {
                    Ok(Some(WatchCommand::Quit)) => break,
                    Ok(Some(command)) => apply(view, command).await,
                    Ok(None) => {}
                    Err(msg) => println!("{}", style(msg).yellow()),
                }
                if view.is_unmounted() {
                    break;
                }
                prompt();
            }

            event = view.next_realtime() => {
                let Some(event) = event else { break };
                let key = view.registry().len();
                if view.handle_realtime(event) {
                    if let Some(marker) = view.render().and_then(|s| s.markers.into_iter().nth(key)) {
                        println!();
                        println!("{}", style("+ new developer").green().bold());
                        render::print_marker(&marker);
                        prompt();
                    }
                }
            }
        }
    }

    info!("Watch loop finished");
    Ok(())
}

async fn apply(view: &mut CliView, command: WatchCommand) {
    match command {
        WatchCommand::Techs(text) => {
            println!("Filter: {}", style(&text).green());
            view.set_query(text);
        }
        WatchCommand::Search => {
            if !view.can_search() {
                render::print_blank();
                return;
            }
            match view.search().await {
                Ok(found) => {
                    println!("Found {} developer(s)", found);
                    show(view);
                }
                Err(e) => render::print_view_error(&e),
            }
        }
        WatchCommand::Pan {
            latitude,
            longitude,
            deltas,
        } => {
            let (dlat, dlng) = deltas.unwrap_or_else(|| {
                view.region()
                    .map(|r| (r.latitude_delta, r.longitude_delta))
                    .unwrap_or((DEFAULT_REGION_DELTA, DEFAULT_REGION_DELTA))
            });
            match Region::new(latitude, longitude, dlat, dlng) {
                Ok(region) => {
                    if let Err(e) = view.on_region_changed(region) {
                        render::print_view_error(&e);
                    } else {
                        show(view);
                    }
                }
                Err(e) => println!("{}", style(e).yellow()),
            }
        }
        WatchCommand::Open(key) => match view.press_callout(key) {
            Some(navigation) => render::print_navigation(&navigation),
            None => println!("{}", style(format!("No marker {}", key)).yellow()),
        },
        WatchCommand::List => show(view),
        WatchCommand::Help => println!("{}", HELP),
        WatchCommand::Quit => {}
    }
}

fn show(view: &CliView) {
    match view.render() {
        Some(scene) => render::print_scene(&scene),
        None => render::print_blank(),
    }
}

fn prompt() {
    use std::io::Write;
    print!("{} ", style(">").cyan());
    if let Err(e) = std::io::stdout().flush() {
        trace!(error = %e, "Failed to flush prompt");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(parse_command("search"), Ok(Some(WatchCommand::Search)));
        assert_eq!(parse_command("  LIST "), Ok(Some(WatchCommand::List)));
        assert_eq!(parse_command("q"), Ok(Some(WatchCommand::Quit)));
        assert_eq!(parse_command("   "), Ok(None));
    }

    #[test]
    fn test_parse_techs_keeps_text() {
        assert_eq!(
            parse_command("techs ReactJS, Node.js"),
            Ok(Some(WatchCommand::Techs("ReactJS, Node.js".to_string())))
        );
        assert_eq!(
            parse_command("techs"),
            Ok(Some(WatchCommand::Techs(String::new())))
        );
    }

    #[test]
    fn test_parse_pan() {
        assert_eq!(
            parse_command("pan -23.55 -46.63"),
            Ok(Some(WatchCommand::Pan {
                latitude: -23.55,
                longitude: -46.63,
                deltas: None,
            }))
        );
        assert_eq!(
            parse_command("pan 1 2 0.5 0.5"),
            Ok(Some(WatchCommand::Pan {
                latitude: 1.0,
                longitude: 2.0,
                deltas: Some((0.5, 0.5)),
            }))
        );
        assert!(parse_command("pan 1").is_err());
        assert!(parse_command("pan north south").is_err());
    }

    #[test]
    fn test_parse_open() {
        assert_eq!(parse_command("open 3"), Ok(Some(WatchCommand::Open(3))));
        assert!(parse_command("open x").is_err());
    }

    #[test]
    fn test_unknown_command() {
        assert!(parse_command("fly").unwrap_err().contains("help"));
    }
}
