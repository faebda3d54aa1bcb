//! Terminal rendering of the map scene.

use console::style;

use devradar::view::{MapScene, Marker, Navigation, ViewError};

/// Prints the whole scene: region header plus one line per marker.
pub fn print_scene(scene: &MapScene) {
    let region = &scene.region;
    let bounds = region.bounds();
    println!(
        "{} {:.5}, {:.5}  {}",
        style("Map").bold(),
        region.latitude,
        region.longitude,
        style(format!(
            "[S {:.4} W {:.4} N {:.4} E {:.4}]",
            bounds.south, bounds.west, bounds.north, bounds.east
        ))
        .dim(),
    );

    if scene.markers.is_empty() {
        println!("  {}", style("no developers").dim());
        return;
    }

    for marker in &scene.markers {
        print_marker(marker);
    }
}

/// Prints one marker with its callout.
pub fn print_marker(marker: &Marker) {
    println!(
        "  {} {} {} {}",
        style(format!("[{}]", marker.key)).cyan(),
        style(&marker.callout.title).bold(),
        style(format!("@{}", marker.github_username)).dim(),
        style(format!("({:.5}, {:.5})", marker.latitude, marker.longitude)).dim(),
    );
    if !marker.in_view {
        println!("      {}", style("outside the visible map").yellow());
    }
    if let Some(bio) = marker.callout.bio.as_deref().filter(|b| !b.is_empty()) {
        println!("      {}", bio);
    }
    if !marker.callout.techs.is_empty() {
        println!("      {}", style(&marker.callout.techs).green());
    }
}

/// Prints the blank state shown while no region is known.
pub fn print_blank() {
    println!("{}", style("Map is blank: no location yet.").dim());
    println!(
        "{}",
        style("Pan with 'pan <lat> <lng>' to pick a region.").dim()
    );
}

pub fn print_navigation(navigation: &Navigation) {
    match navigation {
        Navigation::Profile {
            github_username,
            url,
        } => println!(
            "{} {} {}",
            style("Profile").bold(),
            github_username,
            style(url).cyan().underlined()
        ),
    }
}

pub fn print_view_error(error: &ViewError) {
    println!("{} {}", style("!").red().bold(), style(error).red());
}
