use anyhow::{Context, Result, bail};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;

use svg2map::config::{FileConfig, defaults};
use svg2map::geometry::Scaler;
use svg2map::output::{assemble, write_module};
use svg2map::regions::{build_families, resolve_families};
use svg2map::svg::parse_groups;

/// Generate game-ready region fill polygons from an SVG map document
///
/// Examples:
///   # Regenerate the map module for the reference 610x560 map
///   svg2map assets/map.svg web/generated/map-data.js
///
///   # Target a non-default canvas
///   svg2map assets/map.svg out.js --canvas-width 1000 --canvas-height 700
///
///   # Use a config file
///   svg2map assets/map.svg out.js --config my-settings.toml
#[derive(Parser, Debug)]
#[command(name = "svg2map")]
#[command(version, about, long_about = None)]
struct Args {
    /// Input SVG map document
    input: PathBuf,

    /// Output path for the generated module
    output: PathBuf,

    /// Path to config file (optional, auto-searches svg2map.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Source viewbox width in source units
    #[arg(long)]
    viewbox_width: Option<f64>,

    /// Source viewbox height in source units
    #[arg(long)]
    viewbox_height: Option<f64>,

    /// Target canvas width in output units
    #[arg(long)]
    canvas_width: Option<f64>,

    /// Target canvas height in output units
    #[arg(long)]
    canvas_height: Option<f64>,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let total_start = Instant::now();

    let file_config = if let Some(ref config_path) = args.config {
        if config_path.exists() {
            let contents = std::fs::read_to_string(config_path)
                .context(format!("Failed to read config file: {:?}", config_path))?;
            Some(toml::from_str(&contents).context("Failed to parse config file")?)
        } else {
            bail!("Config file not found: {:?}", config_path);
        }
    } else {
        FileConfig::load()
    };

    let viewbox_width = args
        .viewbox_width
        .or_else(|| file_config.as_ref().and_then(|c| c.viewbox_width))
        .unwrap_or(defaults::VIEWBOX_WIDTH);
    let viewbox_height = args
        .viewbox_height
        .or_else(|| file_config.as_ref().and_then(|c| c.viewbox_height))
        .unwrap_or(defaults::VIEWBOX_HEIGHT);
    let canvas_width = args
        .canvas_width
        .or_else(|| file_config.as_ref().and_then(|c| c.canvas_width))
        .unwrap_or(defaults::CANVAS_WIDTH);
    let canvas_height = args
        .canvas_height
        .or_else(|| file_config.as_ref().and_then(|c| c.canvas_height))
        .unwrap_or(defaults::CANVAS_HEIGHT);
    let verbose = args.verbose || file_config.as_ref().map(|c| c.verbose).unwrap_or(false);

    if viewbox_width <= 0.0 || viewbox_height <= 0.0 {
        bail!("Viewbox dimensions must be positive");
    }
    if canvas_width <= 0.0 || canvas_height <= 0.0 {
        bail!("Canvas dimensions must be positive");
    }

    println!("svg2map - Region Polygon Extractor");
    println!("==================================");
    println!();

    if verbose {
        println!("Configuration:");
        println!("  Input: {}", args.input.display());
        println!("  Output: {}", args.output.display());
        println!("  Viewbox: {} x {}", viewbox_width, viewbox_height);
        println!("  Canvas: {} x {}", canvas_width, canvas_height);
        println!("  Endpoint tolerance: {}", defaults::ENDPOINT_TOLERANCE);
        println!("  Arc samples: {}", defaults::ARC_SEGMENTS);
        println!();
    }

    let text = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read map document: {}", args.input.display()))?;

    let spinner = create_spinner("Parsing map document...");
    let start = Instant::now();
    let groups = parse_groups(&text).context("Failed to parse map document")?;
    spinner.finish_with_message(format!(
        "Parsed {} titled groups [{:.1}s]",
        groups.len(),
        start.elapsed().as_secs_f32()
    ));

    let spinner = create_spinner("Grouping regions...");
    let start = Instant::now();
    let grouping = build_families(&groups, defaults::ENDPOINT_TOLERANCE, defaults::ARC_SEGMENTS);
    spinner.finish_with_message(format!(
        "Discovered {} region families, {} labeled [{:.1}s]",
        grouping.discovered,
        grouping.families.len(),
        start.elapsed().as_secs_f32()
    ));

    if verbose {
        for family in &grouping.families {
            println!(
                "  {}: {} polygons, {} polylines, {} variant groups",
                family.base_key,
                family.raw_polygons.len(),
                family.raw_polylines.len(),
                family.variants.len()
            );
        }
    }

    let spinner = create_spinner("Stitching region rings...");
    let start = Instant::now();
    let resolved = resolve_families(&grouping.families, defaults::ENDPOINT_TOLERANCE);
    spinner.finish_with_message(format!(
        "Resolved {} rings [{:.1}s]",
        resolved.len(),
        start.elapsed().as_secs_f32()
    ));

    let spinner = create_spinner("Writing region module...");
    let start = Instant::now();
    let scaler = Scaler::new(
        (viewbox_width, viewbox_height),
        (canvas_width, canvas_height),
    );
    let document = assemble(&resolved, &grouping.water_overlays, &scaler);
    write_module(&args.output, &document).context("Failed to write region module")?;
    spinner.finish_with_message(format!(
        "Wrote {} regions and {} water overlays [{:.1}s]",
        document.regions.len(),
        document.water_overlays.len(),
        start.elapsed().as_secs_f32()
    ));

    println!();
    println!(
        "Done! Emitted {} regions from {} discovered families in {:.1}s",
        document.regions.len(),
        grouping.discovered,
        total_start.elapsed().as_secs_f32()
    );
    println!();
    println!("Output: {}", args.output.display());

    Ok(())
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}
