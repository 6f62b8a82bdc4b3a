/// Core data types for the METAR scraper.
///
/// This module defines the shared domain model imported by all other modules.
/// It contains no I/O, only types and the conversions between them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

// ---------------------------------------------------------------------------
// Station
// ---------------------------------------------------------------------------

/// ICAO identifier of the station we scrape (Edinburgh).
pub const STATION_EGPH: &str = "EGPH";

// ---------------------------------------------------------------------------
// Observation
// ---------------------------------------------------------------------------

/// A single METAR observation as returned by the aviationweather.gov data API.
///
/// Only the fields we write are kept; everything else in the payload is
/// ignored by serde. Fields the station did not report are omitted or
/// `null` upstream: measurements stay `None`, a missing time reads as the
/// epoch and a missing station as an empty identifier.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Observation {
    #[serde(rename = "obsTime", default, deserialize_with = "null_as_default")]
    pub obs_time: i64,  // Unix seconds
    #[serde(rename = "icaoId", default, deserialize_with = "null_as_default")]
    pub icao_id: String,
    #[serde(default)]
    pub temp: Option<i64>,  // °C
    #[serde(default)]
    pub dewp: Option<i64>,  // °C
    #[serde(default)]
    pub wdir: Option<i64>,  // degrees true
    #[serde(default)]
    pub wspd: Option<i64>,  // knots
    #[serde(default)]
    pub wgst: Option<i64>,  // knots
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Observation {
    /// Observation time as a UTC timestamp.
    ///
    /// Timestamps chrono cannot represent collapse to the epoch, which the
    /// daemon then treats as never newer than anything already written.
    pub fn observed_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.obs_time, 0).unwrap_or(DateTime::UNIX_EPOCH)
    }

    /// Reported measurements in a fixed order, keyed by their field name.
    pub fn measurements(&self) -> Vec<(&'static str, i64)> {
        [
            ("temp", self.temp),
            ("dewp", self.dewp),
            ("wdir", self.wdir),
            ("wspd", self.wspd),
            ("wgst", self.wgst),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
        .collect()
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can arise when fetching the latest METAR observation.
#[derive(Debug, PartialEq)]
pub enum FetchError {
    /// The request never got a response (DNS, connect, TLS).
    Network(String),
    /// Non-200 HTTP response from the METAR API.
    HttpStatus(u16),
    /// The status line arrived but the body could not be read.
    BodyRead(String),
    /// The response body was not a JSON array of observations.
    Parse(String),
    /// The API returned an empty array.
    NoData,
}

impl FetchError {
    /// Whether the daemon should stop instead of waiting for the next tick.
    pub fn is_fatal(&self) -> bool {
        matches!(self, FetchError::BodyRead(_))
    }
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Network(msg) => write!(f, "Network error: {}", msg),
            FetchError::HttpStatus(code) => write!(f, "status code {}", code),
            FetchError::BodyRead(msg) => write!(f, "Failed to read response body: {}", msg),
            FetchError::Parse(msg) => write!(f, "Parse error: {}", msg),
            FetchError::NoData => write!(f, "no datapoints found"),
        }
    }
}

impl std::error::Error for FetchError {}
