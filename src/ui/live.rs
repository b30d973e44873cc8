//! Live view rendering.
//!
//! Displays the latest reading with per-metric classification: the
//! value, its tier color, and the status description underneath,
//! recomputed from the latest record on every draw.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::classify_record;
use crate::data::timestamp::format_time;

/// Render the Live view with large per-metric readouts.
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let Some(ref latest) = app.latest else {
        let loading = Paragraph::new("Loading...")
            .alignment(Alignment::Center)
            .style(Style::default().add_modifier(Modifier::BOLD));
        let centered = Rect::new(
            area.x,
            area.y + area.height / 2,
            area.width,
            1.min(area.height),
        );
        frame.render_widget(loading, centered);
        return;
    };

    let mut lines: Vec<Line> = vec![Line::from("")];

    for (metric, value, status) in classify_record(latest) {
        let style = app.theme.tier_style(status.tier);

        let reading = if metric.unit().is_empty() {
            format!("{} : {}", metric.label(), value)
        } else {
            format!("{} : {} {}", metric.label(), value, metric.unit())
        };

        lines.push(Line::from(Span::styled(
            reading,
            style.add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(status.description, style)));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        format!("Terakhir diperbarui: {}", format_time(latest.created_at)),
        Style::default().add_modifier(Modifier::DIM),
    )));

    let block = Block::default()
        .title(" Water Quality ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center).block(block);

    frame.render_widget(paragraph, area);
}
