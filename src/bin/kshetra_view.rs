//! View saved rover maps.
//!
//! # Usage
//!
//! ```bash
//! kshetra-view                          # most recent map in the map directory
//! kshetra-view --list                   # list saved maps
//! kshetra-view --wifi                   # Wi-Fi heat map of the most recent map
//! kshetra-view /tmp/rover_map_20240307_090501.json
//! ```

use std::path::{Path, PathBuf};

use clap::Parser;
use log::debug;

use kshetra_map::io::snapshot::{latest_snapshot, list_snapshots};
use kshetra_map::{KshetraConfig, RenderLayer, RoverMap};

/// Columns used for the map view
const VIEW_WIDTH: usize = 50;

#[derive(Parser)]
#[command(name = "kshetra-view")]
#[command(about = "View saved rover exploration maps")]
struct Args {
    /// Map file to view (defaults to the most recent one)
    map_file: Option<PathBuf>,

    /// Show the Wi-Fi heat map instead of occupancy
    #[arg(long)]
    wifi: bool,

    /// List available maps
    #[arg(long)]
    list: bool,

    /// Directory to search for maps (defaults to the configured map_dir)
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => KshetraConfig::load(path)?,
        None => KshetraConfig::load_default()?,
    };
    let dir = args
        .dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.persistence.map_dir));
    debug!("Map directory: {}", dir.display());

    if args.list {
        return print_listing(&dir);
    }

    let layer = if args.wifi {
        RenderLayer::Wifi
    } else {
        RenderLayer::Occupancy
    };

    match &args.map_file {
        Some(path) => view_map(path, layer),
        None => match latest_snapshot(&dir)? {
            Some(path) => {
                println!("Showing most recent map:");
                view_map(&path, layer)
            }
            None => {
                println!("No maps found. Use --list to search or specify a map file.");
                Ok(())
            }
        },
    }
}

fn view_map(path: &Path, layer: RenderLayer) -> Result<(), Box<dyn std::error::Error>> {
    let map = RoverMap::load(path)?;
    let stats = map.statistics();
    let pose = map.pose();

    println!("\nMap: {}", path.display());
    println!("{}", "=".repeat(60));
    println!("Rover Position: ({:.0}, {:.0})cm", pose.x, pose.y);
    println!("Heading: {:.0}°", pose.heading);
    println!("Distance Traveled: {:.1}m", stats.distance_traveled_m);
    println!("Explored: {:.1}%", stats.explored_percent);
    println!("Scans: {}", stats.scan_count);
    println!();

    match layer {
        RenderLayer::Occupancy => println!("Occupancy Grid:"),
        RenderLayer::Wifi => println!("Wi-Fi Signal Heatmap:"),
    }
    println!("   {}", layer.legend());
    println!();
    println!("{}", map.render_ascii(VIEW_WIDTH, layer));

    if layer == RenderLayer::Wifi {
        if let Some((at, dbm)) = map.best_wifi_location() {
            println!("\nBest signal: ({:.0}, {:.0})cm at {}dBm", at.x, at.y, dbm);
        }
    }

    println!("\n{}", "=".repeat(60));
    Ok(())
}

fn print_listing(dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let maps = list_snapshots(dir)?;
    if maps.is_empty() {
        println!("No maps found in {}", dir.display());
        return Ok(());
    }

    println!("\nAvailable Maps in {}:", dir.display());
    println!("{}", "=".repeat(60));
    for entry in maps {
        match entry.error {
            Some(_) => println!("  {} (error reading)", entry.path.display()),
            None => {
                let stats = entry.statistics.unwrap_or_default();
                println!("  {}", entry.timestamp);
                println!("    Distance: {:.1}m", stats.distance_traveled_m);
                println!("    Explored: {:.1}%", stats.explored_percent);
                println!("    Scans: {}", stats.scan_count);
                println!();
            }
        }
    }
    println!("{}", "=".repeat(60));
    Ok(())
}
