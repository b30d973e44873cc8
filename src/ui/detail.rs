//! Detail overlay rendering.
//!
//! Displays a modal overlay classifying a single selected history
//! record: the same rules the live view applies, against an older
//! reading.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table},
    Frame,
};

use crate::app::App;
use crate::data::{aggregate, classify_record, Tier};
use crate::data::timestamp::format_time;

/// Minimum width required for the detail overlay to render properly.
const MIN_OVERLAY_WIDTH: u16 = 50;
/// Minimum height required for the detail overlay to render properly.
const MIN_OVERLAY_HEIGHT: u16 = 12;

/// Render the record detail as a modal overlay.
///
/// Shows the selected record's timestamp and each metric's parsed
/// value, tier, and description.
pub fn render_overlay(frame: &mut Frame, app: &App, area: Rect) {
    // Skip rendering if terminal is too small for the overlay
    if area.width < MIN_OVERLAY_WIDTH || area.height < MIN_OVERLAY_HEIGHT {
        return;
    }

    let Some(record) = app.selected_record() else {
        return;
    };

    let classified = classify_record(record);
    let tiers: Vec<Tier> = classified.iter().map(|(_, _, s)| s.tier).collect();
    let overall = aggregate(&tiers);

    let overlay_width = (area.width * 80 / 100).clamp(MIN_OVERLAY_WIDTH, 80);
    let overlay_height = MIN_OVERLAY_HEIGHT;

    let x = area.x + (area.width.saturating_sub(overlay_width)) / 2;
    let y = area.y + (area.height.saturating_sub(overlay_height)) / 2;
    let overlay_area = Rect::new(x, y, overlay_width, overlay_height);

    // Clear the area behind the overlay
    frame.render_widget(Clear, overlay_area);

    let chunks = Layout::vertical([
        Constraint::Length(4), // Header with record info
        Constraint::Min(6),    // Metric table
        Constraint::Length(1), // Footer
    ])
    .split(overlay_area);

    // ===== HEADER SECTION =====
    let header_lines = vec![
        Line::from(vec![
            Span::styled(
                format!(" Record #{} ", record.entry_id),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(format_time(record.created_at)),
        ]),
        Line::from(vec![
            Span::raw(" Status: "),
            Span::styled(
                overall.symbol(),
                app.theme.tier_style(overall).add_modifier(Modifier::BOLD),
            ),
        ]),
    ];

    let header_block = Block::default()
        .title(" Record Detail ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    frame.render_widget(Paragraph::new(header_lines).block(header_block), chunks[0]);

    // ===== METRIC TABLE =====
    let table_header = Row::new(vec![
        Cell::from("Metric"),
        Cell::from("Value"),
        Cell::from("Status"),
        Cell::from("Description"),
    ])
    .height(1)
    .style(app.theme.header);

    let rows: Vec<Row> = classified
        .iter()
        .map(|(metric, value, status)| {
            let style = app.theme.tier_style(status.tier);
            let value_text = if value.is_nan() {
                "-".to_string()
            } else if metric.unit().is_empty() {
                format!("{}", value)
            } else {
                format!("{} {}", value, metric.unit())
            };

            Row::new(vec![
                Cell::from(metric.label()),
                Cell::from(value_text),
                Cell::from(status.tier.symbol()).style(style),
                Cell::from(status.description).style(style),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(10), // Metric
        Constraint::Length(12), // Value
        Constraint::Length(8),  // Status
        Constraint::Fill(1),    // Description
    ];

    let table = Table::new(rows, widths).header(table_header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(app.theme.border)),
    );

    frame.render_widget(table, chunks[1]);

    // ===== FOOTER =====
    let footer = Paragraph::new(Line::from(vec![Span::styled(
        " Press Esc to close ",
        Style::default().add_modifier(Modifier::DIM),
    )]));
    frame.render_widget(footer, chunks[2]);
}
