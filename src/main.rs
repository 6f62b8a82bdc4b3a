//! METAR Scraper - Main Daemon
//!
//! Polls the aviationweather.gov METAR API every ten minutes and writes each
//! new observation for the station to InfluxDB.
//!
//! Usage:
//!   cargo run --release
//!
//! Environment:
//!   INFLUX_HOST   - InfluxDB base URL, e.g. http://localhost:8086
//!   INFLUX_TOKEN  - API token with write access to the bucket
//!   INFLUX_ORG    - organization name
//!   INFLUX_BUCKET - bucket name
//!   RUST_LOG      - log filter (default: info)

use log::error;
use metar_scraper::config::InfluxConfig;
use metar_scraper::daemon::{Daemon, DaemonConfig};

fn main() {
    pretty_env_logger::formatted_timed_builder()
        .parse_filters(&std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .init();

    let influx = match InfluxConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    let mut daemon = Daemon::connect(DaemonConfig::default(), &influx);

    if let Err(e) = daemon.run() {
        error!("{}", e);
        std::process::exit(1);
    }
}
