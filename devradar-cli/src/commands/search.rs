//! Search command - one search at the given or located position.

use tracing::{debug, info};

use devradar::view::ViewError;

use super::common::{build_view, MapArgs};
use crate::error::CliError;
use crate::render;
use crate::runner::CliRunner;

/// Run the search command.
pub fn run(args: MapArgs) -> Result<(), CliError> {
    let runner = CliRunner::with_debug(args.debug)?;
    runner.log_startup("search");

    let mut view = build_view(&args, runner.config())?;
    let runtime = runner.runtime()?;

    runtime.block_on(async move {
        let result = search_once(&mut view).await;
        view.unmount().await;
        result
    })
}

async fn search_once(view: &mut super::common::CliView) -> Result<(), CliError> {
    if !view.mount().await {
        return Err(CliError::NoRegion);
    }

    match view.search().await {
        Ok(found) => info!(found, "Search finished"),
        // Results are already applied; a one-shot search has no use for pushes.
        Err(ViewError::Subscription(e)) => {
            debug!(error = %e, "Realtime subscription unavailable");
        }
        Err(e) => return Err(e.into()),
    }

    if let Some(scene) = view.render() {
        render::print_scene(&scene);
    }
    Ok(())
}
