//! Mirror configuration
//!
//! Locations, display formats, and refresh intervals. Defaults match the
//! hallway deployment; the CLI overrides individual fields.

use std::time::Duration;

use crate::panel::PanelIntervals;

/// Refresh spacing for the panel cycles
#[derive(Debug, Clone)]
pub struct RefreshConfig {
    /// Interval for the chart panels (surf, wind)
    pub chart_interval: Duration,
    /// Interval for the text panels (weather, news)
    pub text_interval: Duration,
    /// Short interval after an unchanged-skip
    pub retry_interval: Duration,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            chart_interval: Duration::from_secs(200),
            text_interval: Duration::from_secs(600),
            retry_interval: Duration::from_secs(10),
        }
    }
}

impl RefreshConfig {
    /// Intervals for a chart panel.
    pub fn chart(&self) -> PanelIntervals {
        PanelIntervals {
            refresh: self.chart_interval,
            retry: self.retry_interval,
        }
    }

    /// Intervals for a text panel.
    pub fn text(&self) -> PanelIntervals {
        PanelIntervals {
            refresh: self.text_interval,
            retry: self.retry_interval,
        }
    }
}

/// Everything the shell needs to wire the panels
#[derive(Debug, Clone)]
pub struct MirrorConfig {
    /// Region shown in the weather panel
    pub weather_region: String,
    /// Surfline spot name or id for the surf chart
    pub surf_spot: String,
    /// Wind launches; successive renders rotate through this list
    pub wind_locations: Vec<String>,
    /// Two-letter country code for the news feed
    pub news_country: String,
    /// 24-hour clock instead of 12-hour
    pub twenty_four_hour: bool,
    /// strftime-style date format for the clock panel
    pub date_format: String,
    /// Panel refresh spacing
    pub refresh: RefreshConfig,
    /// Whether to read/write the on-disk forecast cache
    pub use_cache: bool,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            weather_region: "Redwood City".to_string(),
            surf_spot: "OCEAN_BEACH_OVERVIEW".to_string(),
            wind_locations: vec!["3rd Ave Channel".to_string()],
            news_country: "us".to_string(),
            twenty_four_hour: false,
            date_format: "%b %d, %Y".to_string(),
            refresh: RefreshConfig::default(),
            use_cache: true,
        }
    }
}
