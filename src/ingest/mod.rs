/// Upstream weather data sources.
pub mod metar;

#[cfg(test)]
pub(crate) mod fixtures;
