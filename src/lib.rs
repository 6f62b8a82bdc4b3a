/// metar_scraper: METAR observations from aviationweather.gov into InfluxDB.
///
/// # Module structure
///
/// ```text
/// metar_scraper
/// ├── model       — shared data types (Observation, FetchError)
/// ├── config      — InfluxDB settings from the environment
/// ├── daemon      — main loop (sleep, fetch, dedupe on watermark, write)
/// ├── influx      — Point, line protocol encoding, InfluxDB v2 writer
/// └── ingest
///     ├── metar   — METAR data API: URL construction + JSON parsing
///     └── fixtures (test only) — representative API response payloads
/// ```

pub mod config;
pub mod daemon;
pub mod influx;
pub mod ingest;
pub mod model;
