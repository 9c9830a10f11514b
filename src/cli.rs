//! Command-line interface for the mirror
//!
//! Every flag overrides one field of [`MirrorConfig`]; with no flags the
//! defaults run the hallway deployment unchanged.

use clap::Parser;

use crate::config::MirrorConfig;

/// Bay Mirror - a terminal smart mirror with weather, surf, wind, and news
#[derive(Parser, Debug)]
#[command(name = "baymirror")]
#[command(about = "Terminal smart mirror: clock, weather, surf and wind forecasts, news")]
#[command(version)]
pub struct Cli {
    /// Weather region for the conditions panel (e.g. "Redwood City")
    #[arg(long, value_name = "REGION")]
    pub region: Option<String>,

    /// Surfline spot name or spot id for the surf chart
    #[arg(long, value_name = "SPOT")]
    pub spot: Option<String>,

    /// Wind launch name or spot id; repeat the flag to rotate between several
    #[arg(long = "wind", value_name = "LOCATION")]
    pub wind: Vec<String>,

    /// Two-letter country code for news headlines
    #[arg(long, value_name = "CC")]
    pub news_country: Option<String>,

    /// Use a 24-hour clock
    #[arg(long)]
    pub twenty_four_hour: bool,

    /// Skip reading and writing the on-disk forecast cache
    #[arg(long)]
    pub no_cache: bool,
}

impl Cli {
    /// Builds the runtime configuration, starting from the defaults and
    /// applying every flag that was given.
    pub fn into_config(self) -> MirrorConfig {
        let mut config = MirrorConfig::default();
        if let Some(region) = self.region {
            config.weather_region = region;
        }
        if let Some(spot) = self.spot {
            config.surf_spot = spot;
        }
        if !self.wind.is_empty() {
            config.wind_locations = self.wind;
        }
        if let Some(country) = self.news_country {
            config.news_country = country;
        }
        if self.twenty_four_hour {
            config.twenty_four_hour = true;
        }
        if self.no_cache {
            config.use_cache = false;
        }
        config
    }
}
