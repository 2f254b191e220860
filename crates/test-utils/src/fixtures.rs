//! Common request fixtures for msis-api tests.

use serde_json::{json, Value};

/// Quiet-sun space weather.
pub mod space_weather {
    pub const F107: f64 = 150.0;
    pub const F107A: f64 = 150.0;
    pub const AP: f64 = 4.0;
}

/// A fixed date in the accepted `YYYY-MM-DDTHH:MM` form (day 80, 12:00 UT).
pub const DATE: &str = "2024-03-20T12:00";

/// A second date, one day later (day 81, 00:30 UT).
pub const NEXT_DATE: &str = "2024-03-21T00:30";

/// A small valid bulk body: 2 dates x 3 lons x 2 lats x 2 alts.
pub fn bulk_body() -> Value {
    json!({
        "dates": [DATE, NEXT_DATE],
        "lons": [-100.0, 0.0, 100.0],
        "lats": [-45.0, 45.0],
        "alts": [200.0, 400.0],
        "f107s": [150.0, 180.0],
        "f107as": [145.0, 170.0],
        "aps": [4.0, 7.0]
    })
}

/// A bulk body with 3 x 10 x 10 x 34 = 10,200 points.
pub fn oversized_bulk_body() -> Value {
    json!({
        "dates": [DATE, DATE, DATE],
        "lons": (0..10).map(|i| i as f64 * 10.0).collect::<Vec<_>>(),
        "lats": (0..10).map(|i| i as f64 * 5.0).collect::<Vec<_>>(),
        "alts": (0..34).map(|i| 100.0 + i as f64 * 10.0).collect::<Vec<_>>(),
        "f107s": [150.0, 150.0, 150.0],
        "f107as": [150.0, 150.0, 150.0],
        "aps": [4.0, 4.0, 4.0]
    })
}

/// JSON-encoded switch array with every switch set to `value`.
pub fn options_string(value: i32) -> String {
    format!("[{}]", vec![value.to_string(); 25].join(","))
}

/// Query string for the surface endpoint.
pub fn surface_query(altitude: f64) -> String {
    format!(
        "date={}&altitude={}&f107={}&f107a={}&ap={}",
        DATE,
        altitude,
        space_weather::F107,
        space_weather::F107A,
        space_weather::AP
    )
}

/// Query string for the altitude endpoint.
pub fn altitude_query(longitude: f64, latitude: f64) -> String {
    format!(
        "date={}&longitude={}&latitude={}&f107={}&f107a={}&ap={}",
        DATE,
        longitude,
        latitude,
        space_weather::F107,
        space_weather::F107A,
        space_weather::AP
    )
}

/// Percent-encode the characters of a JSON array for a query string.
pub fn encode_query_value(value: &str) -> String {
    value
        .replace('[', "%5B")
        .replace(']', "%5D")
        .replace(',', "%2C")
}
