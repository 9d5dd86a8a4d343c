use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use afterglow::api::AppState;
use afterglow::{AfterglowConfig, Coordinate, OpenMeteoClient, SkyForecastService, cache, telemetry, web};
use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};

/// Sunrise and sunset quality forecasts from multi-zone cloud cover
#[derive(Parser, Debug)]
#[command(name = "afterglow", version)]
#[command(about = "Sunrise and sunset quality forecasts from multi-zone cloud cover", long_about = None)]
struct Cli {
    /// Configuration file (defaults to the user config directory)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP API
    Serve {
        /// Listen port, overriding the configured one
        #[arg(long)]
        port: Option<u16>,
    },
    /// Rate the next sunrise or sunset at a location
    Predict {
        /// Latitude in decimal degrees. Example: -33.87
        #[arg(allow_negative_numbers = true)]
        latitude: f64,

        /// Longitude in decimal degrees. Example: 151.21
        #[arg(allow_negative_numbers = true)]
        longitude: f64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = AfterglowConfig::load_from_path(cli.config)?;

    let _telemetry = telemetry::init(&config.logging)?;

    let mut client = OpenMeteoClient::new(&config.weather)?;
    if config.cache.enabled {
        cache::init(&config.cache.location)
            .with_context(|| format!("Failed to open cache at {}", config.cache.location))?;
        client = client.with_cache(Duration::from_secs(u64::from(config.cache.ttl_minutes) * 60));
    }

    match cli.command {
        Command::Serve { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            let state = AppState::new(Arc::new(client), config.sampling.event_source);
            web::run(&config.server, state).await?;
        }
        Command::Predict {
            latitude,
            longitude,
        } => {
            let base = Coordinate::new(latitude, longitude);
            base.validate()?;

            let prediction = SkyForecastService::predict(
                &client,
                base,
                Utc::now().timestamp(),
                config.sampling.event_source,
            )
            .await
            .map_err(|e| anyhow::anyhow!("{}\n  ({e})", e.user_message()))?;
            println!("Sky forecast for {base}");
            print!("{prediction}");
        }
    }

    Ok(())
}
