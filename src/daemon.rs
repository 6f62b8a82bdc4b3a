/// Core daemon implementation for the METAR scraper
///
/// Each tick the daemon:
/// 1. Sleeps for the poll interval
/// 2. Fetches the latest observation for the station
/// 3. Skips it unless it is newer than the last observation written
/// 4. Writes it to InfluxDB as a `metar` point
///
/// Fetch and write failures are logged and the tick ends; the next attempt
/// happens after the next full sleep. A failed body read is the one
/// condition that stops the daemon.

use crate::config::InfluxConfig;
use crate::influx::{InfluxWriter, Point, WriteError};
use crate::ingest::metar::{self, MetarClient};
use crate::model::{self, FetchError, Observation};
use chrono::{DateTime, Utc};
use log::{error, info};
use std::time::Duration;

// ---------------------------------------------------------------------------
// Seams
// ---------------------------------------------------------------------------

/// Something that yields the station's latest observation.
pub trait ObservationSource {
    fn fetch(&self) -> Result<Observation, FetchError>;
}

/// Something that durably stores a point.
pub trait PointSink {
    fn write(&self, point: &Point) -> Result<(), WriteError>;
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Daemon configuration
#[derive(Debug, Clone)]
pub struct DaemonConfig {
    /// How long to sleep before each fetch (default: 10 minutes)
    pub poll_interval: Duration,

    /// ICAO identifier of the station to scrape (default: EGPH)
    pub station: String,

    /// METAR data API base URL
    pub metar_base_url: String,

    /// User-Agent sent to the METAR API
    pub user_agent: String,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(10 * 60),
            station: model::STATION_EGPH.to_string(),
            metar_base_url: metar::METAR_BASE_URL.to_string(),
            user_agent: metar::USER_AGENT.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Errors and outcomes
// ---------------------------------------------------------------------------

/// Conditions that end the daemon loop
#[derive(Debug, PartialEq)]
pub enum DaemonError {
    Fatal(FetchError),
}

impl std::fmt::Display for DaemonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DaemonError::Fatal(e) => write!(f, "fatal fetch error: {}", e),
        }
    }
}

impl std::error::Error for DaemonError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DaemonError::Fatal(e) => Some(e),
        }
    }
}

/// What a single tick did
#[derive(Debug, PartialEq)]
pub enum TickOutcome {
    /// Fetch failed with a recoverable error
    FetchFailed,
    /// Observation was not newer than the watermark
    Stale,
    /// Point written
    Written(Point),
    /// Write attempted and rejected; the watermark has still moved
    WriteFailed(Point),
}

// ---------------------------------------------------------------------------
// Daemon
// ---------------------------------------------------------------------------

/// Main daemon state
pub struct Daemon<S, W> {
    config: DaemonConfig,
    source: S,
    sink: W,
    /// Observation time of the last point we attempted to write
    last_obs: DateTime<Utc>,
}

impl Daemon<MetarClient, InfluxWriter> {
    /// Wire the real METAR client and InfluxDB writer. Both share one
    /// HTTP connection pool for the life of the process.
    pub fn connect(config: DaemonConfig, influx: &InfluxConfig) -> Self {
        let http = reqwest::blocking::Client::new();
        let source = MetarClient::new(
            http.clone(),
            &config.metar_base_url,
            &config.station,
            &config.user_agent,
        );
        let sink = InfluxWriter::new(http, influx);
        Self::new(config, source, sink)
    }
}

impl<S: ObservationSource, W: PointSink> Daemon<S, W> {
    /// Create a daemon with the watermark at the Unix epoch, so the first
    /// observation fetched is always written.
    pub fn new(config: DaemonConfig, source: S, sink: W) -> Self {
        Self {
            config,
            source,
            sink,
            last_obs: DateTime::UNIX_EPOCH,
        }
    }

    /// Observation time of the most recent write attempt
    pub fn watermark(&self) -> DateTime<Utc> {
        self.last_obs
    }

    /// Run one fetch / decide / write pass (no sleep).
    ///
    /// Returns `Err` only for fatal fetch errors; everything else is logged
    /// and reported through `TickOutcome`.
    pub fn tick(&mut self) -> Result<TickOutcome, DaemonError> {
        let data = match self.source.fetch() {
            Ok(data) => data,
            Err(e) if e.is_fatal() => return Err(DaemonError::Fatal(e)),
            Err(e) => {
                error!("failed to request data: error={}", e);
                return Ok(TickOutcome::FetchFailed);
            }
        };

        let obs_time = data.observed_at();
        info!("got data: {:?}", data);

        if obs_time <= self.last_obs {
            return Ok(TickOutcome::Stale);
        }

        info!(
            "data is new observation: obs_time={} prev_obs_time={} station={}",
            obs_time, self.last_obs, data.icao_id
        );
        self.last_obs = obs_time;

        let point = Point::from_observation(&data);
        match self.sink.write(&point) {
            Ok(()) => {
                info!("wrote point: {}", point);
                Ok(TickOutcome::Written(point))
            }
            Err(e) => {
                error!("failed to write point: error={}", e);
                Ok(TickOutcome::WriteFailed(point))
            }
        }
    }

    /// Main daemon loop (runs until a fatal error)
    pub fn run(&mut self) -> Result<(), DaemonError> {
        info!(
            "starting daemon: station={} poll_interval={}s",
            self.config.station,
            self.config.poll_interval.as_secs()
        );

        loop {
            info!("waiting...");
            std::thread::sleep(self.config.poll_interval);
            self.tick()?;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
