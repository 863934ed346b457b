//! `overlay` - render, query and inspect raster overlays.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

use overlay_cli::commands;
use overlay_cli::OverlaySettings;
use overlay_common::{CrsCode, LonLat};

#[derive(Parser, Debug)]
#[command(name = "overlay")]
#[command(about = "Render, query and inspect raster measurement overlays")]
struct Args {
    /// Layer catalog
    #[arg(short, long, global = true, env = "OVERLAY_LAYERS_CONFIG")]
    config: Option<PathBuf>,

    /// Log level, used when RUST_LOG is not set
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a raster payload to PNG plus JSON metadata
    Render {
        /// Layer ID from the catalog
        #[arg(short, long)]
        layer: String,

        /// Raster payload (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, env = "OVERLAY_OUTPUT_DIR")]
        out_dir: Option<PathBuf>,
    },

    /// Print the value under a geographic position
    Query {
        #[arg(short, long)]
        layer: String,

        #[arg(short, long)]
        input: PathBuf,

        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Print the reading as JSON
        #[arg(long)]
        as_json: bool,
    },

    /// Print the legend gradient and scale labels for a value range
    Legend {
        #[arg(long, allow_hyphen_values = true)]
        min: f64,

        #[arg(long, allow_hyphen_values = true)]
        max: f64,
    },

    /// Convert point rows with a `geom` column to GeoJSON
    Points {
        #[arg(short, long)]
        input: PathBuf,

        /// CRS of the `geom` coordinates
        #[arg(long, default_value = "EPSG:25830")]
        crs: CrsCode,
    },

    /// Great-circle distance between two positions
    Distance {
        /// Start as LON,LAT
        #[arg(long, allow_hyphen_values = true, value_parser = commands::parse_lon_lat)]
        from: LonLat,

        /// End as LON,LAT
        #[arg(long, allow_hyphen_values = true, value_parser = commands::parse_lon_lat)]
        to: LonLat,
    },

    /// Numeric map scale for a zoom level
    Scale {
        #[arg(long)]
        zoom: u8,
    },
}

fn init_tracing(args: &Args) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    if args.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(&args);

    let mut settings = OverlaySettings::from_env()?;
    if let Some(config) = &args.config {
        settings.layers_config = config.clone();
    }
    debug!(?settings, "Resolved settings");

    match args.command {
        Command::Render {
            layer,
            input,
            out_dir,
        } => {
            let catalog = settings.load_catalog()?;
            let out_dir = out_dir.unwrap_or_else(|| settings.output_dir.clone());
            let output = commands::render(&settings, &catalog, &layer, &input, &out_dir)?;
            println!("{}", output.png_path.display());
            println!("{}", output.metadata_path.display());
        }
        Command::Query {
            layer,
            input,
            lon,
            lat,
            as_json,
        } => {
            let catalog = settings.load_catalog()?;
            let click = LonLat::new(lon, lat);
            match commands::query(&settings, &catalog, &layer, &input, click)? {
                Some(reading) if as_json => println!("{}", reading.to_json()?),
                Some(reading) => print!("{}", reading.to_text()),
                None => info!(lon, lat, "Position is outside the raster"),
            }
        }
        Command::Legend { min, max } => {
            let legend = commands::legend(&settings, min, max)?;
            println!("{}", legend.css_linear_gradient());
            println!("{}", legend.scale.labels().join(" "));
        }
        Command::Points { input, crs } => {
            let collection = commands::points(&input, crs)?;
            println!("{}", collection.to_json()?);
        }
        Command::Distance { from, to } => {
            let (_, text) = commands::distance(from, to);
            println!("{}", text);
        }
        Command::Scale { zoom } => {
            println!("{}", commands::scale(zoom));
        }
    }

    Ok(())
}
