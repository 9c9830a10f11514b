//! Surfline wave forecast client
//!
//! Reads the KBYG wave endpoint that the Surfline site itself calls when a
//! spot page loads. The hourly series is reduced to four samples per day by
//! keeping every sixth entry, with min/max surf height and their midpoint per
//! kept sample.

use chrono::{Local, TimeZone};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{get_with_headers, mean, resolve, weekday_name, FetchError};

/// URL template for the wave forecast endpoint; `{spot}` is replaced with the
/// resolved spot id.
const WAVE_URL: &str = "https://services.surfline.com/kbyg/spots/forecasts/wave?spotId={spot}&days=6&intervalHours=1&maxHeights=false&sds=false";

/// Keep every Nth hourly entry: four samples per day from hourly input.
const SAMPLE_STRIDE: usize = 6;

/// Known spot names and their Surfline spot ids.
pub const LOCATION_LOOKUP: &[(&str, &str)] = &[
    ("PACIFICA_LINDA_MAR", "5842041f4e65fad6a7708976"),
    ("PACIFICA_LINDAMAR", "5842041f4e65fad6a7708976"),
    ("OCEAN_BEACH_OVERVIEW", "5842041f4e65fad6a77087f8"),
];

/// One sampled row of the surf forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfRow {
    /// Unix timestamp of the sampled hour
    pub timestamp: i64,
    /// Weekday of the timestamp in local time
    pub weekday: String,
    /// Minimum surf height in feet
    pub min_ft: f64,
    /// Maximum surf height in feet
    pub max_ft: f64,
    /// Midpoint of min and max
    pub avg_ft: f64,
}

/// Sampled surf forecast for one spot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfForecast {
    /// Spot name the forecast was requested for
    pub spot: String,
    /// Sampled rows, oldest first
    pub rows: Vec<SurfRow>,
}

impl SurfForecast {
    /// Mean of the average-height column, used as the unchanged-skip
    /// aggregate. NaN when the forecast has no rows.
    pub fn average_height(&self) -> f64 {
        mean(self.rows.iter().map(|r| r.avg_ft))
    }
}

/// Client for the Surfline wave forecast endpoint
#[derive(Debug, Clone, Default)]
pub struct SurfClient {
    client: Client,
}

impl SurfClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves a spot token to a Surfline spot id.
    ///
    /// Known names are mapped case-insensitively; anything else is assumed to
    /// already be a spot id and passes through unchanged.
    pub fn resolve_spot(token: &str) -> String {
        resolve(LOCATION_LOOKUP, token)
            .map(str::to_string)
            .unwrap_or_else(|| token.to_string())
    }

    /// Fetches and shapes the wave forecast for a spot name or spot id.
    pub async fn fetch_forecast(&self, spot: &str) -> Result<SurfForecast, FetchError> {
        let spot_id = Self::resolve_spot(spot);
        let url = WAVE_URL.replace("{spot}", &spot_id);

        let body = get_with_headers(&self.client, &url).send().await?.text().await?;
        let value: serde_json::Value = serde_json::from_str(&body)?;
        let response: WaveResponse =
            serde_json::from_value(value).map_err(|e| FetchError::Schema(e.to_string()))?;

        shape_waves(spot, response)
    }
}

/// Projects the raw hourly wave series into the sampled forecast.
fn shape_waves(spot: &str, response: WaveResponse) -> Result<SurfForecast, FetchError> {
    let mut rows = Vec::new();

    for wave in response.data.wave.iter().step_by(SAMPLE_STRIDE) {
        let local = Local
            .timestamp_opt(wave.timestamp, 0)
            .single()
            .ok_or_else(|| FetchError::InvalidTimestamp(wave.timestamp.to_string()))?;

        let min_ft = wave.surf.min;
        let max_ft = wave.surf.max;
        rows.push(SurfRow {
            timestamp: wave.timestamp,
            weekday: weekday_name(chrono::Datelike::weekday(&local)).to_string(),
            min_ft,
            max_ft,
            avg_ft: (min_ft + max_ft) / 2.0,
        });
    }

    Ok(SurfForecast {
        spot: spot.to_string(),
        rows,
    })
}

/// Wave forecast response structure
#[derive(Debug, Deserialize)]
struct WaveResponse {
    data: WaveData,
}

#[derive(Debug, Deserialize)]
struct WaveData {
    wave: Vec<WaveEntry>,
}

#[derive(Debug, Deserialize)]
struct WaveEntry {
    timestamp: i64,
    surf: SurfRange,
}

#[derive(Debug, Deserialize)]
struct SurfRange {
    min: f64,
    max: f64,
}
