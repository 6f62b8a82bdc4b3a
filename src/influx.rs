/// InfluxDB v2 writer.
///
/// Points are encoded as line protocol and sent with the HTTP write API:
///   POST {host}/api/v2/write?org=..&bucket=..&precision=s
///   Authorization: Token {token}
///
/// Timestamps are written at second precision, which is all a METAR
/// observation time carries.

use crate::config::InfluxConfig;
use crate::daemon::PointSink;
use crate::model::Observation;
use chrono::{DateTime, Utc};

/// Measurement name every observation is written under.
pub const MEASUREMENT_METAR: &str = "metar";

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// One time-series record: measurement, tags, integer fields, timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub measurement: String,
    pub tags: Vec<(String, String)>,
    pub fields: Vec<(String, i64)>,
    pub timestamp: DateTime<Utc>,
}

impl Point {
    pub fn new(measurement: &str, timestamp: DateTime<Utc>) -> Self {
        Self {
            measurement: measurement.to_string(),
            tags: Vec::new(),
            fields: Vec::new(),
            timestamp,
        }
    }

    pub fn tag(mut self, key: &str, value: &str) -> Self {
        self.tags.push((key.to_string(), value.to_string()));
        self
    }

    pub fn add_field(&mut self, key: &str, value: i64) {
        self.fields.push((key.to_string(), value));
    }

    /// Build the `metar` point for an observation: tagged by station,
    /// stamped at observation time, one field per reported measurement.
    ///
    /// An observation with nothing reported still yields a point, just with
    /// no fields.
    pub fn from_observation(obs: &Observation) -> Self {
        let mut point = Point::new(MEASUREMENT_METAR, obs.observed_at())
            .tag("station", &obs.icao_id);
        for (name, value) in obs.measurements() {
            point.add_field(name, value);
        }
        point
    }

    /// Encode as a single line of line protocol (no trailing newline).
    ///
    /// Integer fields carry the `i` suffix; the timestamp is in seconds.
    pub fn to_line_protocol(&self) -> String {
        let mut line = escape_measurement(&self.measurement);
        for (key, value) in &self.tags {
            line.push(',');
            line.push_str(&escape_key(key));
            line.push('=');
            line.push_str(&escape_key(value));
        }

        let fields: Vec<String> = self
            .fields
            .iter()
            .map(|(key, value)| format!("{}={}i", escape_key(key), value))
            .collect();
        line.push(' ');
        line.push_str(&fields.join(","));

        line.push(' ');
        line.push_str(&self.timestamp.timestamp().to_string());
        line
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_line_protocol())
    }
}

// Backslashes are doubled first so a trailing one cannot swallow the
// separator that follows. Newlines would end the line, so they become `\n`.
// Measurement names escape commas and spaces; tag keys, tag values and
// field keys additionally escape equals signs.
fn escape_measurement(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('\n', "\\n")
        .replace(',', "\\,")
        .replace(' ', "\\ ")
}

fn escape_key(s: &str) -> String {
    escape_measurement(s).replace('=', "\\=")
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors returned by the InfluxDB write API.
#[derive(Debug, PartialEq)]
pub enum WriteError {
    /// The request never got a response.
    Network(String),
    /// InfluxDB answered with a non-2xx status.
    Status { status: u16, body: String },
}

impl std::fmt::Display for WriteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WriteError::Network(msg) => write!(f, "InfluxDB request failed: {}", msg),
            WriteError::Status { status, body } => {
                write!(f, "InfluxDB write rejected ({}): {}", status, body)
            }
        }
    }
}

impl std::error::Error for WriteError {}

// ---------------------------------------------------------------------------
// Writer
// ---------------------------------------------------------------------------

/// Blocking writer bound to one org and bucket.
pub struct InfluxWriter {
    http: reqwest::blocking::Client,
    write_url: String,
    auth_header: String,
}

impl InfluxWriter {
    pub fn new(http: reqwest::blocking::Client, config: &InfluxConfig) -> Self {
        Self {
            http,
            write_url: build_write_url(&config.host, &config.org, &config.bucket),
            auth_header: format!("Token {}", config.token),
        }
    }

    pub fn write_url(&self) -> &str {
        &self.write_url
    }

    /// Write one point and wait for InfluxDB to acknowledge it.
    pub fn write_point(&self, point: &Point) -> Result<(), WriteError> {
        let response = self
            .http
            .post(&self.write_url)
            .header(reqwest::header::AUTHORIZATION, &self.auth_header)
            .header(reqwest::header::CONTENT_TYPE, "text/plain; charset=utf-8")
            .body(point.to_line_protocol())
            .send()
            .map_err(|e| WriteError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(WriteError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}

impl PointSink for InfluxWriter {
    fn write(&self, point: &Point) -> Result<(), WriteError> {
        self.write_point(point)
    }
}

/// Builds the v2 write endpoint for an org/bucket at second precision.
pub fn build_write_url(host: &str, org: &str, bucket: &str) -> String {
    format!(
        "{}/api/v2/write?org={}&bucket={}&precision=s",
        host.trim_end_matches('/'),
        urlencoding::encode(org),
        urlencoding::encode(bucket)
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
