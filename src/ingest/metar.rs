/// aviationweather.gov METAR data API client.
///
/// Handles URL construction, the single GET per tick, and JSON response
/// parsing for the endpoint:
///   https://aviationweather.gov/api/data/metar
///
/// See `fixtures.rs` for annotated examples of the response structure.

use crate::daemon::ObservationSource;
use crate::model::{FetchError, Observation};
use log::debug;
use reqwest::StatusCode;

pub const METAR_BASE_URL: &str = "https://aviationweather.gov/api/data/metar";

/// Sent with every request so the API operators can reach us.
pub const USER_AGENT: &str =
    "github.com/dzfranklin/metar-scraper (daniel@danielzfranklin.org)";

// ---------------------------------------------------------------------------
// URL construction
// ---------------------------------------------------------------------------

/// Builds a METAR API URL for one station, JSON format.
///
/// # Example
/// ```
/// use metar_scraper::ingest::metar::{build_metar_url, METAR_BASE_URL};
///
/// let url = build_metar_url(METAR_BASE_URL, "EGPH");
/// assert_eq!(url, "https://aviationweather.gov/api/data/metar?ids=EGPH&format=json");
/// ```
pub fn build_metar_url(base_url: &str, station: &str) -> String {
    format!("{}?ids={}&format=json", base_url, station)
}

// ---------------------------------------------------------------------------
// Response parsing
// ---------------------------------------------------------------------------

/// Parses a METAR API response body and returns its first observation.
///
/// The API lists the most recent report first; that ordering is trusted
/// and the remaining entries are discarded.
///
/// # Errors
/// - `FetchError::Parse` — body is not a JSON array of observations.
/// - `FetchError::NoData` — the array is empty.
pub fn parse_metar_response(body: &[u8]) -> Result<Observation, FetchError> {
    let observations: Vec<Observation> = serde_json::from_slice(body)
        .map_err(|e| FetchError::Parse(format!("JSON deserialization failed: {}", e)))?;

    observations.into_iter().next().ok_or(FetchError::NoData)
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Long-lived client for one station's METAR feed.
pub struct MetarClient {
    http: reqwest::blocking::Client,
    url: String,
    user_agent: String,
}

impl MetarClient {
    pub fn new(http: reqwest::blocking::Client, base_url: &str, station: &str, user_agent: &str) -> Self {
        Self {
            http,
            url: build_metar_url(base_url, station),
            user_agent: user_agent.to_string(),
        }
    }

    /// Fetch the latest observation for the station.
    ///
    /// One request, no retry. Transport defaults are whatever the shared
    /// `reqwest` client was built with.
    pub fn fetch_latest(&self) -> Result<Observation, FetchError> {
        let response = self
            .http
            .get(&self.url)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .send()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        let body = response
            .bytes()
            .map_err(|e| FetchError::BodyRead(e.to_string()))?;
        debug!("fetched {} bytes from {}", body.len(), self.url);

        parse_metar_response(&body)
    }
}

impl ObservationSource for MetarClient {
    fn fetch(&self) -> Result<Observation, FetchError> {
        self.fetch_latest()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::fixtures::*;

    #[test]
    fn test_build_url_for_egph() {
        let url = build_metar_url(METAR_BASE_URL, "EGPH");
        assert_eq!(url, "https://aviationweather.gov/api/data/metar?ids=EGPH&format=json");
    }

    #[test]
    fn test_build_url_with_local_base() {
        let url = build_metar_url("http://127.0.0.1:9000/metar", "EGPH");
        assert_eq!(url, "http://127.0.0.1:9000/metar?ids=EGPH&format=json");
    }

    #[test]
    fn test_parse_returns_first_observation() {
        let obs = parse_metar_response(fixture_egph_gusty_json().as_bytes()).unwrap();

        assert_eq!(obs.icao_id, "EGPH");
        assert_eq!(obs.obs_time, 1717244400);
        assert_eq!(obs.temp, Some(14));
        assert_eq!(obs.dewp, Some(9));
        assert_eq!(obs.wdir, Some(250));
        assert_eq!(obs.wspd, Some(12));
        assert_eq!(obs.wgst, Some(24));
    }

    #[test]
    fn test_parse_null_and_absent_fields_are_unreported() {
        let obs = parse_metar_response(fixture_egph_unreported_json().as_bytes()).unwrap();

        assert_eq!(obs.obs_time, 1717246200);
        assert_eq!(obs.temp, None);
        assert_eq!(obs.dewp, None);
        assert_eq!(obs.wdir, None);
        assert_eq!(obs.wspd, None);
        assert_eq!(obs.wgst, None);
        assert!(obs.measurements().is_empty());
    }

    #[test]
    fn test_parse_empty_array_is_no_data() {
        let err = parse_metar_response(fixture_empty_json().as_bytes()).unwrap_err();
        assert_eq!(err, FetchError::NoData);
    }

    #[test]
    fn test_parse_error_object_is_parse_error() {
        let err = parse_metar_response(fixture_error_object_json().as_bytes()).unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)), "got {:?}", err);
    }

    #[test]
    fn test_parse_truncated_body_is_parse_error() {
        let err = parse_metar_response(br#"[{"icaoId": "EGPH", "obsTi"#).unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
    }

    #[test]
    fn test_parse_missing_obs_time_reads_as_epoch() {
        let obs = parse_metar_response(br#"[{"icaoId": "EGPH", "temp": 3}]"#).unwrap();
        assert_eq!(obs.obs_time, 0);
        assert_eq!(obs.icao_id, "EGPH");
        assert_eq!(obs.temp, Some(3));
    }

    #[test]
    fn test_parse_null_obs_time_reads_as_epoch() {
        let obs = parse_metar_response(br#"[{"icaoId": "EGPH", "obsTime": null, "temp": 3}]"#).unwrap();
        assert_eq!(obs.obs_time, 0);
        assert_eq!(obs.observed_at().timestamp(), 0);
    }

    #[test]
    fn test_parse_missing_or_null_station_is_empty() {
        let obs = parse_metar_response(br#"[{"obsTime": 1000, "temp": 3}]"#).unwrap();
        assert_eq!(obs.icao_id, "");
        assert_eq!(obs.obs_time, 1000);

        let obs = parse_metar_response(br#"[{"icaoId": null, "obsTime": 1000}]"#).unwrap();
        assert_eq!(obs.icao_id, "");
    }
}
