//! Weather panel
//!
//! Current conditions as text (temperature in both units, condition glyph,
//! region) with the daily temperature chart underneath. Both halves read the
//! same report.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::data::weather::celsius_to_fahrenheit;
use crate::data::WeatherCondition;

use super::charts;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(0)])
        .split(area);

    match app.weather.record() {
        Some(report) => {
            let temp_f = celsius_to_fahrenheit(report.current.temp_c);
            let lines = vec![
                Line::from(Span::styled(
                    format!("{:.0}°C / {:.0}°F", report.current.temp_c, temp_f),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(vec![
                    Span::raw(condition_glyph(report.current.condition)),
                    Span::raw(" "),
                    Span::styled(
                        condition_label(report.current.condition),
                        Style::default().fg(Color::White),
                    ),
                ]),
                Line::from(Span::styled(
                    report.region.clone(),
                    Style::default().fg(Color::Gray),
                )),
            ];
            frame.render_widget(Paragraph::new(lines), chunks[0]);
            charts::render_temperature_chart(frame, chunks[1], &report.daily);
        }
        None => {
            let placeholder = Paragraph::new("Loading weather...")
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(placeholder, chunks[0]);
        }
    }
}

/// Glyph shown next to the condition text, the terminal stand-in for the
/// icon set a wall-mounted build would load from disk.
pub fn condition_glyph(condition: WeatherCondition) -> &'static str {
    match condition {
        WeatherCondition::Clear => "☀",
        WeatherCondition::PartlyCloudy => "⛅",
        WeatherCondition::Cloudy => "☁",
        WeatherCondition::Rain => "🌧",
        WeatherCondition::Showers => "🌦",
        WeatherCondition::Thunderstorm => "⛈",
        WeatherCondition::Snow => "❄",
        WeatherCondition::Fog => "🌫",
    }
}

/// Human-readable condition name.
pub fn condition_label(condition: WeatherCondition) -> &'static str {
    match condition {
        WeatherCondition::Clear => "Clear",
        WeatherCondition::PartlyCloudy => "Partly Cloudy",
        WeatherCondition::Cloudy => "Cloudy",
        WeatherCondition::Rain => "Rain",
        WeatherCondition::Showers => "Showers",
        WeatherCondition::Thunderstorm => "Thunderstorm",
        WeatherCondition::Snow => "Snow",
        WeatherCondition::Fog => "Fog",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_condition_has_a_glyph_and_label() {
        let conditions = [
            WeatherCondition::Clear,
            WeatherCondition::PartlyCloudy,
            WeatherCondition::Cloudy,
            WeatherCondition::Rain,
            WeatherCondition::Showers,
            WeatherCondition::Thunderstorm,
            WeatherCondition::Snow,
            WeatherCondition::Fog,
        ];
        for condition in conditions {
            assert!(!condition_glyph(condition).is_empty());
            assert!(!condition_label(condition).is_empty());
        }
    }

    #[test]
    fn test_labels_are_distinct() {
        assert_ne!(
            condition_label(WeatherCondition::Rain),
            condition_label(WeatherCondition::Showers)
        );
        assert_ne!(
            condition_label(WeatherCondition::Clear),
            condition_label(WeatherCondition::PartlyCloudy)
        );
    }
}
