//! Application state for the mirror shell
//!
//! Owns the four data panels, their clients, and the shell-level flags
//! (fullscreen, quit). `tick` drives every due panel through one refresh
//! cycle; all of it runs on the UI task, so panels never race each other.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::Serialize;

use crate::cache::CacheStore;
use crate::config::MirrorConfig;
use crate::data::{
    Headlines, NewsClient, SurfClient, SurfForecast, WeatherClient, WeatherReport, WindClient,
    WindForecast,
};
use crate::panel::{Panel, RefreshOutcome};

/// Cached records older than this still render at startup, just marked stale
/// in the log.
const CACHE_MAX_AGE_HOURS: i64 = 12;

/// Top-level mirror state
pub struct App {
    pub config: MirrorConfig,
    /// Fullscreen layout toggle; Enter flips it, Escape forces windowed
    pub fullscreen: bool,
    pub should_quit: bool,

    pub weather: Panel<WeatherReport>,
    pub surf: Panel<SurfForecast>,
    pub wind: Panel<WindForecast>,
    pub news: Panel<Headlines>,

    /// Index into `config.wind_locations`; advances after each wind render
    wind_index: usize,

    weather_client: WeatherClient,
    surf_client: SurfClient,
    wind_client: WindClient,
    news_client: NewsClient,
    cache: Option<CacheStore>,
}

impl App {
    pub fn new(config: MirrorConfig) -> Self {
        let cache = if config.use_cache {
            CacheStore::open()
        } else {
            None
        };

        let mut app = Self {
            weather: Panel::new("weather", config.refresh.text()),
            surf: Panel::new("surf", config.refresh.chart()),
            wind: Panel::new("wind", config.refresh.chart()),
            news: Panel::new("news", config.refresh.text()),
            wind_index: 0,
            weather_client: WeatherClient::new(),
            surf_client: SurfClient::new(),
            wind_client: WindClient::new(),
            news_client: NewsClient::new(),
            cache,
            fullscreen: false,
            should_quit: false,
            config,
        };
        app.preload_from_cache();
        app
    }

    /// Wind launch the next fetch targets.
    pub fn current_wind_location(&self) -> Option<&str> {
        self.config
            .wind_locations
            .get(self.wind_index)
            .map(String::as_str)
    }

    /// Moves the rotation to the next configured wind launch.
    fn advance_wind(&mut self) {
        if !self.config.wind_locations.is_empty() {
            self.wind_index = (self.wind_index + 1) % self.config.wind_locations.len();
        }
    }

    /// Handles one key event from the terminal.
    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.fullscreen = !self.fullscreen,
            KeyCode::Esc => self.fullscreen = false,
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    /// Runs one refresh pass: every panel whose timer has elapsed fetches,
    /// compares, and reschedules. Panels are visited one at a time; a slow
    /// upstream therefore stalls the whole pass, which is the deployment's
    /// accepted trade-off for a lock-free single task.
    pub async fn tick(&mut self) {
        let now = Instant::now();

        if self.weather.is_due(now) {
            let result = self.weather_client.fetch_report(&self.config.weather_region).await;
            let outcome = self
                .weather
                .complete(Instant::now(), result, |prev, fresh| prev == fresh);
            if outcome == RefreshOutcome::Rendered {
                let key = cache_key("weather", &self.config.weather_region);
                store_record(self.cache.as_ref(), &key, self.weather.record());
            }
        }

        if self.surf.is_due(now) {
            let result = self.surf_client.fetch_forecast(&self.config.surf_spot).await;
            let outcome = self.surf.complete(Instant::now(), result, |prev, fresh| {
                prev.average_height() == fresh.average_height()
            });
            if outcome == RefreshOutcome::Rendered {
                let key = cache_key("surf", &self.config.surf_spot);
                store_record(self.cache.as_ref(), &key, self.surf.record());
            }
        }

        if self.wind.is_due(now) {
            if let Some(location) = self.current_wind_location().map(str::to_string) {
                let result = self.wind_client.fetch_forecast(&location).await;
                let outcome = self.wind.complete(Instant::now(), result, |prev, fresh| {
                    prev.average_speed() == fresh.average_speed()
                });
                if outcome == RefreshOutcome::Rendered {
                    let key = cache_key("wind", &location);
                    store_record(self.cache.as_ref(), &key, self.wind.record());
                    self.advance_wind();
                }
            }
        }

        if self.news.is_due(now) {
            let result = self.news_client.fetch_headlines(&self.config.news_country).await;
            // headlines always repaint; there is no numeric aggregate to compare
            let outcome = self.news.complete(Instant::now(), result, |_, _| false);
            if outcome == RefreshOutcome::Rendered {
                let key = cache_key("news", &self.config.news_country);
                store_record(self.cache.as_ref(), &key, self.news.record());
            }
        }
    }

    /// Seeds each panel from the on-disk cache so the first frame is not
    /// blank. Every seeded panel stays due, so live data replaces the seed as
    /// soon as the first fetch lands.
    fn preload_from_cache(&mut self) {
        let Some(cache) = self.cache.clone() else {
            return;
        };
        let max_age = chrono::Duration::hours(CACHE_MAX_AGE_HOURS);

        if let Some(cached) = cache.load::<WeatherReport>(
            &cache_key("weather", &self.config.weather_region),
            max_age,
        ) {
            log::debug!("weather: seeded from cache (stale: {})", cached.is_stale);
            self.weather =
                Panel::with_record("weather", self.config.refresh.text(), cached.record);
        }

        if let Some(cached) =
            cache.load::<SurfForecast>(&cache_key("surf", &self.config.surf_spot), max_age)
        {
            log::debug!("surf: seeded from cache (stale: {})", cached.is_stale);
            self.surf = Panel::with_record("surf", self.config.refresh.chart(), cached.record);
        }

        if let Some(location) = self.current_wind_location().map(str::to_string) {
            if let Some(cached) =
                cache.load::<WindForecast>(&cache_key("wind", &location), max_age)
            {
                log::debug!("wind: seeded from cache (stale: {})", cached.is_stale);
                self.wind = Panel::with_record("wind", self.config.refresh.chart(), cached.record);
            }
        }

        if let Some(cached) =
            cache.load::<Headlines>(&cache_key("news", &self.config.news_country), max_age)
        {
            log::debug!("news: seeded from cache (stale: {})", cached.is_stale);
            self.news = Panel::with_record("news", self.config.refresh.text(), cached.record);
        }
    }
}

fn cache_key(prefix: &str, token: &str) -> String {
    format!("{} {}", prefix, token)
}

/// Persists a freshly rendered record; cache errors are logged and dropped.
fn store_record<T: Serialize>(
    cache: Option<&CacheStore>,
    key: &str,
    record: Option<&T>,
) {
    if let (Some(cache), Some(record)) = (cache, record) {
        if let Err(err) = cache.save(key, record) {
            log::warn!("cache write for `{}` failed: {}", key, err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        let config = MirrorConfig {
            use_cache: false,
            ..MirrorConfig::default()
        };
        App::new(config)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_starts_windowed_with_empty_panels() {
        let app = app();
        assert!(!app.fullscreen);
        assert!(!app.should_quit);
        assert!(app.weather.record().is_none());
        assert!(app.surf.record().is_none());
        assert!(app.wind.record().is_none());
        assert!(app.news.record().is_none());
    }

    #[test]
    fn test_enter_toggles_fullscreen() {
        let mut app = app();
        app.handle_key(key(KeyCode::Enter));
        assert!(app.fullscreen);
        app.handle_key(key(KeyCode::Enter));
        assert!(!app.fullscreen);
    }

    #[test]
    fn test_escape_forces_windowed() {
        let mut app = app();
        app.handle_key(key(KeyCode::Enter));
        assert!(app.fullscreen);
        app.handle_key(key(KeyCode::Esc));
        assert!(!app.fullscreen);
        // idempotent when already windowed
        app.handle_key(key(KeyCode::Esc));
        assert!(!app.fullscreen);
    }

    #[test]
    fn test_q_quits() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = app();
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[test]
    fn test_plain_c_does_not_quit() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('c')));
        assert!(!app.should_quit);
    }

    #[test]
    fn test_wind_rotation_cycles_through_locations() {
        let config = MirrorConfig {
            wind_locations: vec![
                "3rd Ave Channel".to_string(),
                "Palo Alto".to_string(),
                "Coyote Point".to_string(),
            ],
            use_cache: false,
            ..MirrorConfig::default()
        };
        let mut app = App::new(config);

        assert_eq!(app.current_wind_location(), Some("3rd Ave Channel"));
        app.advance_wind();
        assert_eq!(app.current_wind_location(), Some("Palo Alto"));
        app.advance_wind();
        assert_eq!(app.current_wind_location(), Some("Coyote Point"));
        app.advance_wind();
        assert_eq!(app.current_wind_location(), Some("3rd Ave Channel"));
    }

    #[test]
    fn test_no_wind_locations_yields_none() {
        let config = MirrorConfig {
            wind_locations: vec![],
            use_cache: false,
            ..MirrorConfig::default()
        };
        let mut app = App::new(config);
        assert_eq!(app.current_wind_location(), None);
        // advancing with no locations must not panic
        app.advance_wind();
        assert_eq!(app.current_wind_location(), None);
    }
}
