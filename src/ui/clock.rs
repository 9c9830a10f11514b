//! Clock panel
//!
//! Time, weekday, and date, right-aligned in the top corner. The strings are
//! rebuilt from the wall clock on every frame and the terminal draw diff
//! takes care of not repainting unchanged cells.

use chrono::{Local, NaiveDateTime};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::config::MirrorConfig;

pub fn render(frame: &mut Frame, area: Rect, config: &MirrorConfig) {
    let now = Local::now().naive_local();

    let lines = vec![
        Line::from(Span::styled(
            format_time(now, config.twenty_four_hour),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format_weekday(now),
            Style::default().fg(Color::Gray),
        )),
        Line::from(Span::styled(
            format_date(now, &config.date_format),
            Style::default().fg(Color::Gray),
        )),
    ];

    let clock = Paragraph::new(lines).alignment(Alignment::Right);
    frame.render_widget(clock, area);
}

/// Clock string in the configured format.
fn format_time(now: NaiveDateTime, twenty_four_hour: bool) -> String {
    if twenty_four_hour {
        now.format("%H:%M").to_string()
    } else {
        now.format("%I:%M %p").to_string()
    }
}

/// Full weekday name.
fn format_weekday(now: NaiveDateTime) -> String {
    now.format("%A").to_string()
}

/// Date line in the configured strftime format.
fn format_date(now: NaiveDateTime, date_format: &str) -> String {
    now.format(date_format).to_string()
}
