//! Open-Meteo weather client
//!
//! Fetches current conditions plus an eight-day daily temperature forecast
//! for a named region. Regions are resolved to coordinates through a fixed
//! lookup table; the provider is keyed by latitude/longitude, so a region
//! name outside the table cannot be used directly.

use chrono::{Datelike, NaiveDate};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{get_with_headers, resolve, weekday_name, FetchError};

/// Base URL for the Open-Meteo forecast API
const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Days of daily forecast requested, one chart point per day.
const FORECAST_DAYS: u8 = 8;

/// Known region names and their coordinates.
pub const REGION_LOOKUP: &[(&str, (f64, f64))] = &[
    ("Redwood City", (37.4852, -122.2364)),
    ("San Francisco", (37.7749, -122.4194)),
    ("Palo Alto", (37.4419, -122.1430)),
    ("Pacifica", (37.6138, -122.4869)),
    ("Half Moon Bay", (37.4636, -122.4286)),
];

/// Weather conditions distilled from WMO weather codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeatherCondition {
    Clear,
    PartlyCloudy,
    Cloudy,
    Rain,
    Showers,
    Thunderstorm,
    Snow,
    Fog,
}

/// Current conditions for the region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Temperature in Celsius
    pub temp_c: f64,
    /// Distilled weather condition
    pub condition: WeatherCondition,
}

/// One day of the temperature forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTemp {
    /// Weekday name of the forecast day
    pub weekday: String,
    /// Daily minimum in Celsius
    pub min_c: f64,
    /// Daily maximum in Celsius
    pub max_c: f64,
    /// Midpoint of min and max
    pub avg_c: f64,
}

/// Current conditions plus the daily forecast, as one record
///
/// A single fetch feeds both the text block and the temperature chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    /// Region name the report was requested for
    pub region: String,
    pub current: CurrentConditions,
    /// Daily forecast, today first
    pub daily: Vec<DailyTemp>,
}

/// Client for the Open-Meteo forecast API
#[derive(Debug, Clone, Default)]
pub struct WeatherClient {
    client: Client,
}

impl WeatherClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves a region name to coordinates, case-insensitively.
    pub fn resolve_region(region: &str) -> Result<(f64, f64), FetchError> {
        resolve(REGION_LOOKUP, region)
            .ok_or_else(|| FetchError::UnknownLocation(region.to_string()))
    }

    /// Fetches current conditions and the daily forecast for a region name.
    pub async fn fetch_report(&self, region: &str) -> Result<WeatherReport, FetchError> {
        let (lat, lon) = Self::resolve_region(region)?;
        let url = format!(
            "{}?latitude={}&longitude={}&current=temperature_2m,weather_code&daily=temperature_2m_min,temperature_2m_max&forecast_days={}&timezone=auto",
            FORECAST_URL, lat, lon, FORECAST_DAYS
        );

        let body = get_with_headers(&self.client, &url).send().await?.text().await?;
        let value: serde_json::Value = serde_json::from_str(&body)?;
        let response: ForecastResponse =
            serde_json::from_value(value).map_err(|e| FetchError::Schema(e.to_string()))?;

        shape_report(region, response)
    }
}

/// Projects the raw forecast response into a report.
fn shape_report(region: &str, response: ForecastResponse) -> Result<WeatherReport, FetchError> {
    let daily = &response.daily;
    if daily.temperature_2m_min.len() != daily.time.len()
        || daily.temperature_2m_max.len() != daily.time.len()
    {
        return Err(FetchError::Schema(
            "daily arrays have inconsistent lengths".to_string(),
        ));
    }

    let mut days = Vec::with_capacity(daily.time.len());
    for (i, date_str) in daily.time.iter().enumerate() {
        let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
            .map_err(|_| FetchError::InvalidTimestamp(date_str.to_string()))?;
        let min_c = daily.temperature_2m_min[i];
        let max_c = daily.temperature_2m_max[i];
        days.push(DailyTemp {
            weekday: weekday_name(date.weekday()).to_string(),
            min_c,
            max_c,
            avg_c: (min_c + max_c) / 2.0,
        });
    }

    Ok(WeatherReport {
        region: region.to_string(),
        current: CurrentConditions {
            temp_c: response.current.temperature_2m,
            condition: condition_from_code(response.current.weather_code),
        },
        daily: days,
    })
}

/// Maps a WMO weather code to a condition.
///
/// 0 clear, 1-3 partly cloudy, 45/48 fog, drizzle and rain codes to rain,
/// freezing variants to showers, snow codes to snow, 95-99 thunderstorm;
/// anything unknown falls back to cloudy.
pub fn condition_from_code(code: u8) -> WeatherCondition {
    match code {
        0 => WeatherCondition::Clear,
        1..=3 => WeatherCondition::PartlyCloudy,
        45 | 48 => WeatherCondition::Fog,
        51..=55 | 61..=65 | 80..=82 => WeatherCondition::Rain,
        56..=57 | 66..=67 => WeatherCondition::Showers,
        71..=77 | 85..=86 => WeatherCondition::Snow,
        95..=99 => WeatherCondition::Thunderstorm,
        _ => WeatherCondition::Cloudy,
    }
}

/// Celsius to Fahrenheit, for the side-by-side temperature label.
pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

/// Forecast response structure
#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: RawCurrent,
    daily: RawDaily,
}

#[derive(Debug, Deserialize)]
struct RawCurrent {
    temperature_2m: f64,
    weather_code: u8,
}

#[derive(Debug, Deserialize)]
struct RawDaily {
    time: Vec<String>,
    temperature_2m_min: Vec<f64>,
    temperature_2m_max: Vec<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_RESPONSE: &str = r#"{
        "latitude": 37.48,
        "longitude": -122.24,
        "timezone": "America/Los_Angeles",
        "current": {
            "time": "2024-07-15T14:00",
            "temperature_2m": 22.5,
            "weather_code": 2
        },
        "daily": {
            "time": ["2024-07-15", "2024-07-16", "2024-07-17"],
            "temperature_2m_min": [14.0, 13.5, 15.0],
            "temperature_2m_max": [24.0, 22.5, 26.0]
        }
    }"#;

    #[test]
    fn test_shape_valid_response() {
        let response: ForecastResponse = serde_json::from_str(VALID_RESPONSE).unwrap();
        let report = shape_report("Redwood City", response).unwrap();

        assert_eq!(report.region, "Redwood City");
        assert!((report.current.temp_c - 22.5).abs() < f64::EPSILON);
        assert_eq!(report.current.condition, WeatherCondition::PartlyCloudy);
        assert_eq!(report.daily.len(), 3);

        // 2024-07-15 was a Monday
        assert_eq!(report.daily[0].weekday, "Monday");
        assert!((report.daily[0].avg_c - 19.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_daily_average_is_midpoint() {
        let response: ForecastResponse = serde_json::from_str(VALID_RESPONSE).unwrap();
        let report = shape_report("Redwood City", response).unwrap();
        for day in &report.daily {
            assert!((day.avg_c - (day.min_c + day.max_c) / 2.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_inconsistent_daily_arrays_is_schema_error() {
        let payload = r#"{
            "current": {"temperature_2m": 20.0, "weather_code": 0},
            "daily": {
                "time": ["2024-07-15", "2024-07-16"],
                "temperature_2m_min": [14.0],
                "temperature_2m_max": [24.0, 25.0]
            }
        }"#;
        let response: ForecastResponse = serde_json::from_str(payload).unwrap();
        let err = shape_report("Redwood City", response).unwrap_err();
        assert!(matches!(err, FetchError::Schema(_)));
    }

    #[test]
    fn test_bad_date_is_invalid_timestamp() {
        let payload = r#"{
            "current": {"temperature_2m": 20.0, "weather_code": 0},
            "daily": {
                "time": ["July 15"],
                "temperature_2m_min": [14.0],
                "temperature_2m_max": [24.0]
            }
        }"#;
        let response: ForecastResponse = serde_json::from_str(payload).unwrap();
        let err = shape_report("Redwood City", response).unwrap_err();
        assert!(matches!(err, FetchError::InvalidTimestamp(_)));
    }

    #[test]
    fn test_missing_daily_block_fails_to_deserialize() {
        let payload = r#"{"current": {"temperature_2m": 20.0, "weather_code": 0}}"#;
        let result: Result<ForecastResponse, _> = serde_json::from_str(payload);
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_region_is_case_insensitive() {
        let (lat, lon) = WeatherClient::resolve_region("redwood city").unwrap();
        assert!((lat - 37.4852).abs() < 1e-6);
        assert!((lon - (-122.2364)).abs() < 1e-6);
    }

    #[test]
    fn test_resolve_region_unknown_is_an_error() {
        let err = WeatherClient::resolve_region("Atlantis").unwrap_err();
        assert!(matches!(err, FetchError::UnknownLocation(_)));
    }

    #[test]
    fn test_condition_mapping_covers_code_families() {
        assert_eq!(condition_from_code(0), WeatherCondition::Clear);
        assert_eq!(condition_from_code(2), WeatherCondition::PartlyCloudy);
        assert_eq!(condition_from_code(45), WeatherCondition::Fog);
        assert_eq!(condition_from_code(61), WeatherCondition::Rain);
        assert_eq!(condition_from_code(81), WeatherCondition::Rain);
        assert_eq!(condition_from_code(66), WeatherCondition::Showers);
        assert_eq!(condition_from_code(73), WeatherCondition::Snow);
        assert_eq!(condition_from_code(95), WeatherCondition::Thunderstorm);
        assert_eq!(condition_from_code(200), WeatherCondition::Cloudy);
    }

    #[test]
    fn test_celsius_to_fahrenheit() {
        assert!((celsius_to_fahrenheit(0.0) - 32.0).abs() < f64::EPSILON);
        assert!((celsius_to_fahrenheit(100.0) - 212.0).abs() < f64::EPSILON);
        assert!((celsius_to_fahrenheit(20.0) - 68.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_report_clone_compares_equal() {
        let response: ForecastResponse = serde_json::from_str(VALID_RESPONSE).unwrap();
        let a = shape_report("Redwood City", response).unwrap();
        let b = a.clone();
        assert_eq!(a, b);
    }
}
