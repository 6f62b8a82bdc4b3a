/// Test fixtures: representative JSON payloads from the aviationweather.gov
/// METAR data API.
///
/// Shape returned by:
///   https://aviationweather.gov/api/data/metar?ids=EGPH&format=json
///
///   [                      — array, most recent report first
///     {
///       "icaoId":  "EGPH",
///       "obsTime": 1717243800,   — Unix seconds
///       "temp": 14, "dewp": 9,   — °C, omitted or null when not reported
///       "wdir": 250, "wspd": 12, "wgst": 24,
///       "rawOb": "...", "clouds": [...], ...  — ignored by the parser
///     },
///     ...
///   ]

/// EGPH with a full set of measurements, followed by an older report that
/// the fetcher must ignore.
#[cfg(test)]
pub(crate) fn fixture_egph_gusty_json() -> &'static str {
    r#"[
      {
        "icaoId": "EGPH",
        "receiptTime": "2024-06-01 12:23:10",
        "obsTime": 1717244400,
        "reportTime": "2024-06-01 12:20:00",
        "temp": 14,
        "dewp": 9,
        "wdir": 250,
        "wspd": 12,
        "wgst": 24,
        "visib": "6+",
        "altim": 1009,
        "qcField": 16,
        "metarType": "METAR",
        "rawOb": "METAR EGPH 011220Z 25012G24KT 9999 FEW030 14/09 Q1009",
        "lat": 55.95,
        "lon": -3.3725,
        "elev": 41,
        "name": "Edinburgh Arpt, SC, GB",
        "clouds": [{ "cover": "FEW", "base": 3000 }]
      },
      {
        "icaoId": "EGPH",
        "obsTime": 1717242600,
        "temp": 13,
        "dewp": 9,
        "wdir": 240,
        "wspd": 11,
        "rawOb": "METAR EGPH 011150Z 24011KT 9999 FEW028 13/09 Q1009"
      }
    ]"#
}

/// Calm, unreported report: every measurement either null or absent.
#[cfg(test)]
pub(crate) fn fixture_egph_unreported_json() -> &'static str {
    r#"[
      {
        "icaoId": "EGPH",
        "obsTime": 1717246200,
        "temp": null,
        "dewp": null,
        "wdir": null,
        "rawOb": "METAR EGPH 011250Z AUTO NIL"
      }
    ]"#
}

/// No recent reports for the station.
#[cfg(test)]
pub(crate) fn fixture_empty_json() -> &'static str {
    "[]"
}

/// Error envelope the API returns for bad query parameters; not an array.
#[cfg(test)]
pub(crate) fn fixture_error_object_json() -> &'static str {
    r#"{ "status": "error", "error": "Invalid ids parameter" }"#
}
