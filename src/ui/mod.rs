//! Dashboard rendering
//!
//! Immediate-mode drawing of the mirror grid: weather, surf, and wind stack
//! down the left, the clock sits top-right, headlines run along the bottom.
//! Every renderer takes the frame and its own area explicitly; there is no
//! shared drawing state anywhere in this module tree.

pub mod charts;
pub mod clock;
pub mod news;
pub mod weather;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::{Block, Borders},
    Frame,
};

use crate::app::App;

/// Draws the full dashboard for one frame.
pub fn render_dashboard(frame: &mut Frame, app: &App) {
    let area = if app.fullscreen {
        frame.area()
    } else {
        // windowed mode: a dim frame with breathing room, so the mirror can
        // be told apart from the kiosk layout while developing
        let outer = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" baymirror ");
        let inner = outer.inner(frame.area());
        frame.render_widget(outer, frame.area());
        inner
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(8)])
        .split(area);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(58), Constraint::Percentage(42)])
        .split(rows[0]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(38),
            Constraint::Percentage(31),
            Constraint::Percentage(31),
        ])
        .split(top[0]);

    weather::render(frame, left[0], app);
    charts::render_surf_chart(frame, left[1], app.surf.record());
    charts::render_wind_chart(frame, left[2], app.wind.record());

    clock::render(frame, top[1], &app.config);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(58), Constraint::Percentage(42)])
        .split(rows[1]);

    news::render(frame, bottom[0], app.news.record());
}
