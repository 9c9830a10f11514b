//! Headline panel
//!
//! A short list of top stories along the bottom edge of the mirror.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

use crate::data::Headlines;

pub fn render(frame: &mut Frame, area: Rect, headlines: Option<&Headlines>) {
    let Some(headlines) = headlines.filter(|h| !h.titles.is_empty()) else {
        let placeholder =
            Paragraph::new("Fetching headlines...").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(placeholder, area);
        return;
    };

    let mut items = vec![ListItem::new(Line::from(Span::styled(
        "News",
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )))];
    items.extend(headlines.titles.iter().map(|title| {
        ListItem::new(Line::from(vec![
            Span::styled("▸ ", Style::default().fg(Color::Cyan)),
            Span::styled(title.clone(), Style::default().fg(Color::White)),
        ]))
    }));

    frame.render_widget(List::new(items), area);
}
