//! hydroburn CLI - hydrological DTM conditioning

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use hydroburn_adjust::burn::burn_lines;
use hydroburn_adjust::sampling::{sample_horseshoes_z, sample_lines_z, SamplingParams};
use hydroburn_adjust::workflow::{condition_dtm, ConditionParams};
use hydroburn_core::io::{read_geotiff, write_geotiff};
use hydroburn_core::raster::Raster;

mod geojson_io;
use geojson_io::{read_line_features, read_line_z_features, write_line_z_features};

// ─── CLI structure ──────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "hydroburn")]
#[command(author, version, about = "Hydrological DTM conditioning", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show information about a DTM raster
    Info {
        /// Input raster file
        input: PathBuf,
    },
    /// Sample DTM elevation at line vertices, producing 3D lines
    SampleLineZ {
        /// Input DTM raster
        #[arg(short, long)]
        raster: PathBuf,
        /// Input 2D crossing lines (GeoJSON)
        #[arg(short, long)]
        lines: PathBuf,
        /// Output 3D lines (GeoJSON)
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Sample horseshoe profiles and render them as 3D cross lines
    SampleHorseshoeZLines {
        /// Input DTM raster
        #[arg(short, long)]
        raster: PathBuf,
        /// Input horseshoe quads (GeoJSON, 4-point lines in A-B-C-D order)
        #[arg(short = 's', long)]
        horseshoes: PathBuf,
        /// Output 3D cross lines (GeoJSON)
        #[arg(short, long)]
        output: PathBuf,
        /// Maximum spacing between profile samples (map units);
        /// default is half the raster's diagonal pixel size
        #[arg(short, long)]
        max_sample_dist: Option<f64>,
    },
    /// Burn 3D lines into a DTM raster
    BurnLineZ {
        /// Input DTM raster
        #[arg(short, long)]
        raster: PathBuf,
        /// Input 3D lines (GeoJSON)
        #[arg(short, long)]
        lines: PathBuf,
        /// Output conditioned raster
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Run the complete conditioning workflow
    Adjust {
        /// Input DTM raster
        #[arg(short, long)]
        raster: PathBuf,
        /// Input 2D crossing lines (GeoJSON)
        #[arg(short, long)]
        lines: Option<PathBuf>,
        /// Input horseshoe quads (GeoJSON)
        #[arg(short = 's', long)]
        horseshoes: Option<PathBuf>,
        /// Output conditioned raster
        #[arg(short, long)]
        output: PathBuf,
        /// Maximum spacing between horseshoe profile samples (map units)
        #[arg(short, long)]
        max_sample_dist: Option<f64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Info { input } => {
            let raster = read_dem(&input)?;
            print_info(&raster);
        }
        Commands::SampleLineZ {
            raster,
            lines,
            output,
        } => {
            let start = Instant::now();
            let dem = read_dem(&raster)?;
            let features = read_line_features(&lines)?;
            info!("Loaded {} line features", features.len());

            let pb = spinner("Sampling line elevations...");
            let (sampled, stats) = sample_lines_z(&dem, &features, &SamplingParams::default());
            pb.finish_and_clear();

            info!(
                "Sampling complete: {} valid, {} invalid, {} rejected",
                stats.kept, stats.dropped, stats.rejected
            );
            write_line_z_features(&output, &sampled)?;
            done("3D lines", &output, start.elapsed());
        }
        Commands::SampleHorseshoeZLines {
            raster,
            horseshoes,
            output,
            max_sample_dist,
        } => {
            let start = Instant::now();
            let dem = read_dem(&raster)?;
            let quads = read_line_features(&horseshoes)?;
            info!("Loaded {} horseshoe features", quads.len());

            let params = SamplingParams {
                max_sample_dist,
                ..Default::default()
            };
            let pb = spinner("Sampling horseshoe profiles...");
            let (sampled, stats) = sample_horseshoes_z(&dem, &quads, &params);
            pb.finish_and_clear();

            info!(
                "Sampling complete: {} valid, {} invalid, {} rejected",
                stats.kept, stats.dropped, stats.rejected
            );
            write_line_z_features(&output, &sampled)?;
            done("3D cross lines", &output, start.elapsed());
        }
        Commands::BurnLineZ {
            raster,
            lines,
            output,
        } => {
            let start = Instant::now();
            let mut dem = read_dem(&raster)?;
            let burnable = read_line_z_features(&lines)?;
            info!("Loaded {} 3D lines", burnable.len());

            let pb = spinner("Burning lines...");
            let burned = burn_lines(&mut dem, &burnable).context("Failed to burn lines")?;
            pb.finish_and_clear();

            info!("Burned {} of {} lines", burned, burnable.len());
            write_dem(&dem, &output)?;
            done("Conditioned DTM", &output, start.elapsed());
        }
        Commands::Adjust {
            raster,
            lines,
            horseshoes,
            output,
            max_sample_dist,
        } => {
            let start = Instant::now();
            let dem = read_dem(&raster)?;
            let line_features = match &lines {
                Some(path) => read_line_features(path)?,
                None => Vec::new(),
            };
            let horseshoe_features = match &horseshoes {
                Some(path) => read_line_features(path)?,
                None => Vec::new(),
            };
            info!(
                "Loaded {} line and {} horseshoe features",
                line_features.len(),
                horseshoe_features.len()
            );

            let params = ConditionParams {
                sampling: SamplingParams {
                    max_sample_dist,
                    ..Default::default()
                },
            };
            let pb = spinner("Conditioning DTM...");
            let (conditioned, report) =
                condition_dtm(&dem, &line_features, &horseshoe_features, &params)
                    .context("Conditioning failed")?;
            pb.finish_and_clear();

            info!(
                "Lines: {} sampled, {} invalid, {} rejected, {} outside extent",
                report.line_stats.kept,
                report.line_stats.dropped,
                report.line_stats.rejected,
                report.lines_filtered_out
            );
            info!(
                "Horseshoes: {} sampled, {} invalid, {} rejected, {} outside extent",
                report.horseshoe_stats.kept,
                report.horseshoe_stats.dropped,
                report.horseshoe_stats.rejected,
                report.horseshoes_filtered_out
            );
            info!("Burned {} adjustment lines", report.lines_burned);

            write_dem(&conditioned, &output)?;
            done("Conditioned DTM", &output, start.elapsed());
        }
    }

    Ok(())
}

// ─── Helpers ────────────────────────────────────────────────────────────

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn read_dem(path: &PathBuf) -> Result<Raster<f64>> {
    let pb = spinner("Reading raster...");
    let raster: Raster<f64> = read_geotiff(path).context("Failed to read raster")?;
    pb.finish_and_clear();
    info!("Input: {} x {}", raster.cols(), raster.rows());
    Ok(raster)
}

fn write_dem(raster: &Raster<f64>, path: &PathBuf) -> Result<()> {
    let pb = spinner("Writing output...");
    write_geotiff(raster, path).context("Failed to write output")?;
    pb.finish_and_clear();
    Ok(())
}

fn print_info(raster: &Raster<f64>) {
    let gt = raster.transform();
    let bounds = raster.bounds();
    let stats = raster.statistics();

    println!("Size:       {} x {} pixels", raster.cols(), raster.rows());
    println!("Pixel size: {} x {}", gt.pixel_width, gt.pixel_height);
    println!("Origin:     ({}, {})", gt.origin_x, gt.origin_y);
    println!(
        "Extent:     [{}, {}] x [{}, {}]",
        bounds.x_min, bounds.x_max, bounds.y_min, bounds.y_max
    );
    println!("North-up:   {}", gt.is_north_up());
    match raster.crs() {
        Some(crs) => println!("CRS:        {}", crs),
        None => println!("CRS:        unknown"),
    }
    match raster.nodata() {
        Some(nd) => println!("NoData:     {}", nd),
        None => println!("NoData:     not set"),
    }
    if let (Some(min), Some(max), Some(mean)) = (stats.min, stats.max, stats.mean) {
        println!("Elevation:  min {:.2}, max {:.2}, mean {:.2}", min, max, mean);
    }
    println!(
        "Cells:      {} valid, {} nodata",
        stats.valid_count, stats.nodata_count
    );
}

fn done(name: &str, path: &PathBuf, elapsed: std::time::Duration) {
    println!("{} saved to: {}", name, path.display());
    println!("  Processing time: {:.2?}", elapsed);
}
