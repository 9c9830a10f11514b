//! Data sources for the mirror panels
//!
//! Each submodule wraps one upstream HTTP endpoint: Surfline wave forecasts,
//! WeatherFlow wind models, Open-Meteo weather, and the Google News RSS feed.
//! The shared pieces live here: the error taxonomy, the fixed request headers
//! every provider gets, and small helpers for location lookup tables and
//! weekday labels.

pub mod news;
pub mod surf;
pub mod weather;
pub mod wind;

pub use news::{Headlines, NewsClient};
pub use surf::{SurfClient, SurfForecast};
pub use weather::{WeatherClient, WeatherCondition, WeatherReport};
pub use wind::{WindClient, WindForecast};

use reqwest::{header, Client, RequestBuilder};
use thiserror::Error;

/// User agent sent on every upstream request. Some of the forecast endpoints
/// only answer browser-looking clients.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/87.0.4280.88 Safari/537.36";

/// Language headers sent alongside the user agent.
pub const LANGUAGE: &str = "en-US,en;q=0.5";

/// Weekday names indexed by `Weekday::num_days_from_monday`.
pub const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Errors produced by the fetch/shape pipeline
///
/// The panel refresh cycle is the single place these are handled; the clients
/// and shapers only ever propagate them with `?`.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The location token is not in the lookup table and cannot be used as a
    /// provider identifier directly
    #[error("unknown location `{0}`")]
    UnknownLocation(String),

    /// HTTP transport failure
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Response body is not valid JSON
    #[error("payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// JSONP-style body with no embedded JSON object to extract
    #[error("no JSON object found in response body")]
    NoJsonObject,

    /// RSS feed could not be parsed
    #[error("feed parse failed: {0}")]
    Feed(#[from] rss::Error),

    /// Payload parsed as JSON but an expected field is missing or mistyped
    #[error("unexpected payload shape: {0}")]
    Schema(String),

    /// A timestamp field did not match the provider's documented format
    #[error("invalid timestamp `{0}`")]
    InvalidTimestamp(String),
}

/// Attaches the fixed header set to a GET request.
pub(crate) fn get_with_headers(client: &Client, url: &str) -> RequestBuilder {
    client
        .get(url)
        .header(header::USER_AGENT, USER_AGENT)
        .header(header::ACCEPT_LANGUAGE, LANGUAGE)
        .header(header::CONTENT_LANGUAGE, LANGUAGE)
}

/// Looks up `token` in a compile-time location table, ignoring ASCII case.
///
/// Returns the mapped identifier, or `None` when the token is absent; callers
/// decide whether pass-through or an error is the right fallback.
pub fn resolve<V: Copy>(lookup: &[(&str, V)], token: &str) -> Option<V> {
    lookup
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(token))
        .map(|(_, id)| *id)
}

/// Weekday name for a chrono weekday value.
pub fn weekday_name(weekday: chrono::Weekday) -> &'static str {
    WEEKDAYS[weekday.num_days_from_monday() as usize]
}

/// Arithmetic mean of a measurement column. NaN for an empty column, which
/// never compares equal and therefore never triggers the unchanged-skip path.
pub fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;
    for v in values {
        sum += v;
        count += 1;
    }
    if count == 0 {
        f64::NAN
    } else {
        sum / count as f64
    }
}

/// Extracts the JSON object embedded in a JSONP-style response body.
///
/// The wind endpoint wraps its payload in a jQuery callback invocation; the
/// object itself sits between the first `{` and the last `}` of the body.
pub fn extract_json_object(body: &str) -> Result<&str, FetchError> {
    let start = body.find('{').ok_or(FetchError::NoJsonObject)?;
    let end = body.rfind('}').ok_or(FetchError::NoJsonObject)?;
    if end < start {
        return Err(FetchError::NoJsonObject);
    }
    Ok(&body[start..=end])
}
