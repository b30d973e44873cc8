//! History view rendering.
//!
//! Displays the filtered feed history as a paginated table. The sensor
//! selector chooses which value columns are shown; the time-range filter
//! and pagination come from [`filter_and_paginate`] via the app state.

use ratatui::{
    layout::{Alignment, Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::app::App;
use crate::data::history::filter_and_paginate;
use crate::data::timestamp::format_time;
use crate::data::SensorSelector;

/// Render the History view as a paginated table.
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    // A failed history fetch replaces the content, as long as no data
    // ever arrived.
    if app.history.is_none() {
        if let Some(ref err) = app.history_error {
            let error = Paragraph::new(format!("Error: {}", err))
                .alignment(Alignment::Center)
                .style(Style::default().fg(app.theme.danger));
            frame.render_widget(error, centered_line(area));
            return;
        }

        let loading = Paragraph::new("Loading...")
            .alignment(Alignment::Center)
            .style(Style::default().add_modifier(Modifier::BOLD));
        frame.render_widget(loading, centered_line(area));
        return;
    }

    let Some(records) = app.history.as_deref() else {
        return;
    };
    let page = filter_and_paginate(records, &app.criteria);

    let sensor = app.criteria.sensor;

    // Column set follows the sensor selector
    let mut header_cells = vec![Cell::from("No."), Cell::from("Waktu")];
    match sensor {
        SensorSelector::All => {
            header_cells.push(Cell::from("pH"));
            header_cells.push(Cell::from("Turbidity"));
            header_cells.push(Cell::from("TDS"));
        }
        _ => header_cells.push(Cell::from("Value")),
    }
    let header = Row::new(header_cells).height(1).style(app.theme.header);

    let rows: Vec<Row> = page
        .items
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let mut cells = vec![
                Cell::from(format!("{}", i + 1)),
                Cell::from(format_time(record.created_at)),
            ];
            match sensor {
                SensorSelector::All => {
                    cells.push(Cell::from(raw_field(record.field1.as_deref(), "")));
                    cells.push(Cell::from(raw_field(record.field2.as_deref(), "NTU")));
                    cells.push(Cell::from(raw_field(record.field3.as_deref(), "ppm")));
                }
                SensorSelector::Ph => {
                    cells.push(Cell::from(raw_field(record.field1.as_deref(), "")));
                }
                SensorSelector::Turbidity => {
                    cells.push(Cell::from(raw_field(record.field2.as_deref(), "NTU")));
                }
                SensorSelector::Tds => {
                    cells.push(Cell::from(raw_field(record.field3.as_deref(), "ppm")));
                }
            }
            Row::new(cells)
        })
        .collect();

    let widths: Vec<Constraint> = match sensor {
        SensorSelector::All => vec![
            Constraint::Length(5),  // No.
            Constraint::Fill(2),    // Waktu
            Constraint::Fill(1),    // pH
            Constraint::Fill(1),    // Turbidity
            Constraint::Fill(1),    // TDS
        ],
        _ => vec![
            Constraint::Length(5),
            Constraint::Fill(2),
            Constraint::Fill(1),
        ],
    };

    let title = format!(
        " History Sensor ({}/{}) [s:{}]{} ",
        page.filtered_count,
        records.len(),
        sensor.label(),
        range_info(app),
    );

    let footer_title = format!(
        " Page {} of {} [←→:page] ",
        app.criteria.page, page.total_pages
    );

    let block = Block::default()
        .title(title)
        .title_bottom(Line::from(footer_title).right_aligned())
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    if page.items.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "Tidak ada data.",
                Style::default().add_modifier(Modifier::DIM),
            )),
        ])
        .alignment(Alignment::Center)
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(app.selected_row.min(page.items.len().saturating_sub(1))));

    frame.render_stateful_widget(table, area, &mut state);
}

/// Raw field text with unit suffix, "-" when the field is missing.
fn raw_field(value: Option<&str>, unit: &str) -> String {
    match value {
        Some(v) if unit.is_empty() => v.to_string(),
        Some(v) => format!("{} {}", v, unit),
        None => "-".to_string(),
    }
}

/// Human summary of the active time-range filter for the table title.
fn range_info(app: &App) -> String {
    match (app.criteria.start, app.criteria.end) {
        (None, None) => String::new(),
        (Some(start), None) => format!(" [≥ {}]", format_time(start)),
        (None, Some(end)) => format!(" [≤ {}]", format_time(end)),
        (Some(start), Some(end)) => {
            format!(" [{} .. {}]", format_time(start), format_time(end))
        }
    }
}

fn centered_line(area: Rect) -> Rect {
    Rect::new(
        area.x,
        area.y + area.height / 2,
        area.width,
        1.min(area.height),
    )
}
