//! WeatherFlow wind model client
//!
//! Reads the pro model forecast behind the iWindsurf spot pages. The endpoint
//! answers JSONP (a jQuery callback wrapping the JSON object), so the object
//! is cut out of the body before parsing. Every model entry becomes one row;
//! nothing is subsampled.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDateTime};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{extract_json_object, get_with_headers, mean, resolve, weekday_name, FetchError};

/// URL template for the model data endpoint; `{spot}` is replaced with the
/// resolved numeric spot id. Model 211 is the pro forecast.
const MODEL_URL: &str = "https://api.weatherflow.com/wxengine/rest/model/getModelDataBySpot?callback=jQuery17204981289850784012_1608525296698&units_wind=mph&units_temp=f&units_distance=mi&spot_id={spot}&model_id=211&wf_token=b9f5e47c00d17fce97f3391d9c5ab285&_=1608525296891";

/// Local timestamp format once the trailing UTC offset is stripped.
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Length of the UTC offset suffix (`-0800`) on `model_time_local` values.
const TIME_SUFFIX_LEN: usize = 5;

/// Known launch names and their WeatherFlow spot ids.
pub const LOCATION_LOOKUP: &[(&str, u32)] = &[
    ("3rd Ave Channel", 1374),
    ("Anita Rock-Crissy Field", 411),
    ("Palo Alto", 425),
    ("Coyote Point", 408),
];

/// One model entry of the wind forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindRow {
    /// Launch name the row belongs to
    pub location: String,
    /// Forecast time in the spot's local timezone
    pub time: NaiveDateTime,
    /// Weekday of the forecast time
    pub weekday: String,
    /// 12-hour clock label with any leading zero stripped, e.g. `8AM`, `12PM`
    pub hour_label: String,
    /// Forecast wind speed in mph
    pub speed_mph: f64,
}

/// Wind forecast for one launch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindForecast {
    /// Launch name the forecast was requested for
    pub location: String,
    /// Model rows, oldest first
    pub rows: Vec<WindRow>,
}

impl WindForecast {
    /// Mean of the wind-speed column, used as the unchanged-skip aggregate.
    pub fn average_speed(&self) -> f64 {
        mean(self.rows.iter().map(|r| r.speed_mph))
    }
}

/// Client for the WeatherFlow model endpoint
///
/// Keeps a running history of every row it has seen, merged so that repeated
/// fetches of the same launch never duplicate a (location, timestamp) pair.
/// Each fetch still returns the fresh forecast wholesale; the history is not
/// what the panels render.
#[derive(Debug, Clone, Default)]
pub struct WindClient {
    client: Client,
    history: Vec<WindRow>,
}

impl WindClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves a launch token to a WeatherFlow spot id.
    ///
    /// Known names are mapped case-insensitively; an unmapped token is
    /// accepted when it is already a numeric spot id.
    pub fn resolve_spot(token: &str) -> Result<u32, FetchError> {
        if let Some(id) = resolve(LOCATION_LOOKUP, token) {
            return Ok(id);
        }
        token
            .parse()
            .map_err(|_| FetchError::UnknownLocation(token.to_string()))
    }

    /// Launch name for a spot id reported by the endpoint, falling back to
    /// the id itself for spots outside the lookup table.
    fn location_name(spot_id: u32) -> String {
        LOCATION_LOOKUP
            .iter()
            .find(|(_, id)| *id == spot_id)
            .map(|(name, _)| name.to_string())
            .unwrap_or_else(|| spot_id.to_string())
    }

    /// Fetches and shapes the wind forecast for a launch name or spot id.
    pub async fn fetch_forecast(&mut self, location: &str) -> Result<WindForecast, FetchError> {
        let spot_id = Self::resolve_spot(location)?;
        let url = MODEL_URL.replace("{spot}", &spot_id.to_string());

        let body = get_with_headers(&self.client, &url).send().await?.text().await?;
        let value: serde_json::Value = serde_json::from_str(extract_json_object(&body)?)?;
        let response: ModelResponse =
            serde_json::from_value(value).map_err(|e| FetchError::Schema(e.to_string()))?;

        let forecast = shape_model(response)?;
        self.history = merge_keep_latest(std::mem::take(&mut self.history), forecast.rows.clone());
        Ok(forecast)
    }

    /// Every row seen so far, one per (location, timestamp).
    #[allow(dead_code)]
    pub fn history(&self) -> &[WindRow] {
        &self.history
    }
}

/// Projects the raw model entries into forecast rows.
fn shape_model(response: ModelResponse) -> Result<WindForecast, FetchError> {
    let location = WindClient::location_name(response.spot_id);

    let mut rows = Vec::with_capacity(response.model_data.len());
    for entry in &response.model_data {
        let time = parse_local_time(&entry.model_time_local)?;
        rows.push(WindRow {
            location: location.clone(),
            time,
            weekday: weekday_name(time.weekday()).to_string(),
            hour_label: hour_label(time),
            speed_mph: entry.wind_speed,
        });
    }

    Ok(WindForecast { location, rows })
}

/// Parses a `model_time_local` value, e.g. `2020-12-20 09:00:00-0800`.
///
/// The trailing UTC offset is dropped; the remainder is a plain local
/// timestamp.
fn parse_local_time(raw: &str) -> Result<NaiveDateTime, FetchError> {
    let trimmed = raw
        .len()
        .checked_sub(TIME_SUFFIX_LEN)
        .and_then(|end| raw.get(..end))
        .ok_or_else(|| FetchError::InvalidTimestamp(raw.to_string()))?;
    NaiveDateTime::parse_from_str(trimmed, TIME_FORMAT)
        .map_err(|_| FetchError::InvalidTimestamp(raw.to_string()))
}

/// 12-hour clock label with the leading zero stripped: `08:00` becomes `8AM`,
/// `12:00` stays `12PM`.
fn hour_label(time: NaiveDateTime) -> String {
    let label = time.format("%I%p").to_string();
    match label.strip_prefix('0') {
        Some(rest) => rest.to_string(),
        None => label,
    }
}

/// Concatenates two row sets and deduplicates by (location, timestamp),
/// keeping the later set's row on conflict. The result is ordered by location
/// and time.
pub fn merge_keep_latest(older: Vec<WindRow>, newer: Vec<WindRow>) -> Vec<WindRow> {
    let mut by_key: HashMap<(String, NaiveDateTime), WindRow> = HashMap::new();
    for row in older.into_iter().chain(newer) {
        by_key.insert((row.location.clone(), row.time), row);
    }
    let mut rows: Vec<WindRow> = by_key.into_values().collect();
    rows.sort_by(|a, b| (&a.location, a.time).cmp(&(&b.location, b.time)));
    rows
}

/// Model data response structure
#[derive(Debug, Deserialize)]
struct ModelResponse {
    spot_id: u32,
    model_data: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
struct ModelEntry {
    model_time_local: String,
    wind_speed: f64,
}
