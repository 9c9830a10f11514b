//! Forecast charts
//!
//! Surf is a grouped bar chart, one group per day with four bars each; wind
//! and temperature are line charts. Everything is styled for the dark
//! mirror: white foreground, gray accents, no borders.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Bar, BarChart, BarGroup, Block, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::data::wind::WindRow;
use crate::data::{weather::DailyTemp, SurfForecast, WindForecast};

/// Bars per day group in the surf chart.
const POINTS_PER_DAY: usize = 4;

/// Hour markers under the surf bars; every other one is skipped to keep the
/// axis readable at mirror distance.
const HOUR_LABELS: [&str; 4] = ["12AM", "6AM", "12PM", "6PM"];

fn chart_title(text: String) -> Block<'static> {
    Block::default().title(Span::styled(
        text,
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    ))
}

fn placeholder(frame: &mut Frame, area: Rect, text: &str) {
    let message = Paragraph::new(text.to_string()).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(message, area);
}

/// Draws the sampled surf forecast as one bar group per day.
pub fn render_surf_chart(frame: &mut Frame, area: Rect, forecast: Option<&SurfForecast>) {
    let Some(forecast) = forecast.filter(|f| !f.rows.is_empty()) else {
        placeholder(frame, area, "Loading surf forecast...");
        return;
    };

    let mut chart = BarChart::default()
        .block(chart_title(format!(
            "{} Surf Report [Ft]",
            title_case(&forecast.spot)
        )))
        .bar_width(4)
        .bar_gap(0)
        .group_gap(1)
        .bar_style(Style::default().fg(Color::Cyan))
        .value_style(Style::default().fg(Color::Black).bg(Color::Cyan))
        .label_style(Style::default().fg(Color::Gray));

    for day in forecast.rows.chunks(POINTS_PER_DAY) {
        let bars: Vec<Bar> = day
            .iter()
            .enumerate()
            .map(|(i, row)| {
                Bar::default()
                    .value((row.avg_ft * 10.0).round() as u64)
                    .text_value(format!("{:.1}", row.avg_ft))
                    .label(Line::from(bar_hour_label(i)))
            })
            .collect();
        let group = BarGroup::default()
            .label(Line::from(Span::styled(
                day[0].weekday.clone(),
                Style::default().fg(Color::White),
            )))
            .bars(&bars);
        chart = chart.data(group);
    }

    frame.render_widget(chart, area);
}

/// Draws the wind forecast as a line with day-boundary separators and the
/// weekday names spread across the day spans.
pub fn render_wind_chart(frame: &mut Frame, area: Rect, forecast: Option<&WindForecast>) {
    let Some(forecast) = forecast.filter(|f| !f.rows.is_empty()) else {
        placeholder(frame, area, "Loading wind forecast...");
        return;
    };

    let points: Vec<(f64, f64)> = forecast
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| (i as f64, row.speed_mph))
        .collect();

    let max_speed = forecast
        .rows
        .iter()
        .map(|r| r.speed_mph)
        .fold(f64::MIN, f64::max);
    let y_max = max_speed + 2.0;

    let separators: Vec<[(f64, f64); 2]> = day_separator_indices(&forecast.rows)
        .into_iter()
        .map(|i| [(i as f64, 0.0), (i as f64, y_max)])
        .collect();

    let mut datasets = vec![Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(&points)];
    for separator in &separators {
        datasets.push(
            Dataset::default()
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::Red))
                .data(separator),
        );
    }

    let x_labels: Vec<Span> = ordered_weekdays(&forecast.rows)
        .into_iter()
        .map(|day| Span::styled(day, Style::default().fg(Color::White)))
        .collect();

    let chart = Chart::new(datasets)
        .block(chart_title(format!(
            "Wind Speed @ {} [mph]",
            forecast.location
        )))
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, (points.len().saturating_sub(1)) as f64])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, y_max])
                .labels(vec![
                    Span::raw("0"),
                    Span::raw(format!("{:.0}", y_max / 2.0)),
                    Span::raw(format!("{:.0}", y_max)),
                ]),
        );

    frame.render_widget(chart, area);
}

/// Draws the daily min/avg/max temperature lines.
pub fn render_temperature_chart(frame: &mut Frame, area: Rect, daily: &[DailyTemp]) {
    if daily.is_empty() {
        placeholder(frame, area, "Loading temperature forecast...");
        return;
    }

    let as_points = |f: fn(&DailyTemp) -> f64| -> Vec<(f64, f64)> {
        daily
            .iter()
            .enumerate()
            .map(|(i, day)| (i as f64, f(day)))
            .collect()
    };
    let max_points = as_points(|d| d.max_c);
    let avg_points = as_points(|d| d.avg_c);
    let min_points = as_points(|d| d.min_c);

    let y_min = daily.iter().map(|d| d.min_c).fold(f64::MAX, f64::min) - 2.0;
    let y_max = daily.iter().map(|d| d.max_c).fold(f64::MIN, f64::max) + 2.0;

    let datasets = vec![
        Dataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::DarkGray))
            .data(&max_points),
        Dataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
            .data(&avg_points),
        Dataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::DarkGray))
            .data(&min_points),
    ];

    let x_labels: Vec<Span> = daily
        .iter()
        .map(|d| Span::styled(d.weekday.clone(), Style::default().fg(Color::Gray)))
        .collect();

    let chart = Chart::new(datasets)
        .block(chart_title("Temperature Forecast [°C]".to_string()))
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, (daily.len().saturating_sub(1)) as f64])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::raw(format!("{:.0}", y_min)),
                    Span::raw(format!("{:.0}", (y_min + y_max) / 2.0)),
                    Span::raw(format!("{:.0}", y_max)),
                ]),
        );

    frame.render_widget(chart, area);
}

/// Hour marker for bar `i` within a day group; odd positions stay blank.
fn bar_hour_label(i: usize) -> &'static str {
    if i % 2 == 0 {
        HOUR_LABELS[i % HOUR_LABELS.len()]
    } else {
        ""
    }
}

/// Row indices that start a new day, marked by the midnight hour label.
fn day_separator_indices(rows: &[WindRow]) -> Vec<usize> {
    rows.iter()
        .enumerate()
        .filter(|(_, row)| row.hour_label == "12AM")
        .map(|(i, _)| i)
        .collect()
}

/// Weekday names in row order with consecutive repeats collapsed, one entry
/// per day span.
fn ordered_weekdays(rows: &[WindRow]) -> Vec<String> {
    let mut days: Vec<String> = Vec::new();
    for row in rows {
        if days.last() != Some(&row.weekday) {
            days.push(row.weekday.clone());
        }
    }
    days
}

/// `OCEAN_BEACH_OVERVIEW` → `Ocean Beach Overview`.
fn title_case(spot: &str) -> String {
    spot.split(['_', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn wind_row(time: &str, weekday: &str, hour_label: &str, speed: f64) -> WindRow {
        WindRow {
            location: "Palo Alto".to_string(),
            time: NaiveDateTime::parse_from_str(time, "%Y-%m-%d %H:%M:%S").unwrap(),
            weekday: weekday.to_string(),
            hour_label: hour_label.to_string(),
            speed_mph: speed,
        }
    }

    #[test]
    fn test_bar_hour_labels_skip_every_other() {
        assert_eq!(bar_hour_label(0), "12AM");
        assert_eq!(bar_hour_label(1), "");
        assert_eq!(bar_hour_label(2), "12PM");
        assert_eq!(bar_hour_label(3), "");
    }

    #[test]
    fn test_day_separators_fall_on_midnight_rows() {
        let rows = vec![
            wind_row("2020-12-21 18:00:00", "Monday", "6PM", 10.0),
            wind_row("2020-12-22 00:00:00", "Tuesday", "12AM", 8.0),
            wind_row("2020-12-22 06:00:00", "Tuesday", "6AM", 9.0),
            wind_row("2020-12-23 00:00:00", "Wednesday", "12AM", 12.0),
        ];
        assert_eq!(day_separator_indices(&rows), vec![1, 3]);
    }

    #[test]
    fn test_no_midnight_rows_means_no_separators() {
        let rows = vec![
            wind_row("2020-12-21 09:00:00", "Monday", "9AM", 10.0),
            wind_row("2020-12-21 10:00:00", "Monday", "10AM", 11.0),
        ];
        assert!(day_separator_indices(&rows).is_empty());
    }

    #[test]
    fn test_ordered_weekdays_collapses_day_spans() {
        let rows = vec![
            wind_row("2020-12-21 18:00:00", "Monday", "6PM", 10.0),
            wind_row("2020-12-21 21:00:00", "Monday", "9PM", 10.0),
            wind_row("2020-12-22 00:00:00", "Tuesday", "12AM", 8.0),
            wind_row("2020-12-22 03:00:00", "Tuesday", "3AM", 8.0),
            wind_row("2020-12-23 00:00:00", "Wednesday", "12AM", 12.0),
        ];
        assert_eq!(
            ordered_weekdays(&rows),
            vec!["Monday", "Tuesday", "Wednesday"]
        );
    }

    #[test]
    fn test_title_case_replaces_underscores() {
        assert_eq!(title_case("OCEAN_BEACH_OVERVIEW"), "Ocean Beach Overview");
        assert_eq!(title_case("PACIFICA_LINDA_MAR"), "Pacifica Linda Mar");
        assert_eq!(title_case("3rd Ave Channel"), "3rd Ave Channel");
    }

    #[test]
    fn test_title_case_handles_empty_segments() {
        assert_eq!(title_case("__a__b"), "A B");
        assert_eq!(title_case(""), "");
    }
}
