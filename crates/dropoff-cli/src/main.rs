mod pricing;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "dropoff-cli")]
#[command(about = "Delivery fee quoting and shop configuration checks")]
struct Cli {
    /// Path to the shops YAML file
    #[arg(
        long,
        global = true,
        env = "DROPOFF_SHOPS_PATH",
        default_value = "./config/shops.yaml"
    )]
    shops: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Quote an order for a consumer location
    Quote {
        /// Shop id from the shops file
        #[arg(long)]
        shop: String,
        /// Order subtotal in whole currency units
        #[arg(long)]
        subtotal: Decimal,
        /// Consumer latitude in decimal degrees
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        /// Consumer longitude in decimal degrees
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
    },
    /// Preview the fee for a subtotal and distance without coordinates
    Preview {
        /// Shop id from the shops file
        #[arg(long)]
        shop: String,
        /// Order subtotal in whole currency units
        #[arg(long)]
        subtotal: Decimal,
        /// Distance from the shop in meters
        #[arg(long)]
        distance: f64,
    },
    /// Great-circle distance in meters between two points
    Distance {
        #[arg(allow_negative_numbers = true)]
        lat1: f64,
        #[arg(allow_negative_numbers = true)]
        lon1: f64,
        #[arg(allow_negative_numbers = true)]
        lat2: f64,
        #[arg(allow_negative_numbers = true)]
        lon2: f64,
    },
    /// Validate the shops file and print configuration warnings
    CheckConfig,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("warn"))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Quote {
            shop,
            subtotal,
            lat,
            lon,
        }) => pricing::run_quote(&cli.shops, &shop, subtotal, lat, lon)?,
        Some(Commands::Preview {
            shop,
            subtotal,
            distance,
        }) => pricing::run_preview(&cli.shops, &shop, subtotal, distance)?,
        Some(Commands::Distance {
            lat1,
            lon1,
            lat2,
            lon2,
        }) => pricing::run_distance(lat1, lon1, lat2, lon2)?,
        Some(Commands::CheckConfig) => pricing::run_check_config(&cli.shops)?,
        None => println!("no command given; run `dropoff-cli --help` for usage"),
    }

    Ok(())
}

#[cfg(test)]
mod tests;
