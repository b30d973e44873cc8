//! Common UI components shared across views.
//!
//! This module contains the header bar, tab bar, status bar, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

use crate::app::{App, View};
use crate::data::classify_record;

/// Render the header bar with the aggregate water status.
///
/// Displays: status indicator, per-metric tiers, source description.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref latest) = app.latest else {
        let line = Line::from(vec![
            Span::styled(
                " AQUAWATCH ",
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("| Loading..."),
        ]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    };

    let classified = classify_record(latest);

    // Overall status indicator, Danger dominating
    let aggregate = app.aggregate_tier().unwrap_or(crate::data::Tier::Unknown);
    let status_style = app.theme.tier_style(aggregate);

    let mut spans = vec![
        Span::styled(" ● ", status_style),
        Span::styled("AQUAWATCH ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
        Span::styled(
            format!("{} ", aggregate.symbol()),
            status_style.add_modifier(Modifier::BOLD),
        ),
        Span::raw("│ "),
    ];

    for (metric, _, status) in classified {
        spans.push(Span::styled(
            format!("{}:{} ", metric.label(), status.tier.symbol()),
            app.theme.tier_style(status.tier),
        ));
    }

    spans.push(Span::raw("│ "));
    spans.push(Span::raw(app.source_description().to_string()));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the tab bar showing available views.
///
/// Highlights the currently active view.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = vec![Line::from(" 1:Live "), Line::from(" 2:History ")];

    let selected = match app.current_view {
        View::Live => 0,
        View::History => 1,
    };

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Render the status bar at the bottom.
///
/// Shows: time since last update, available controls. Also displays
/// temporary status messages and the most recent live-fetch failure.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    // Check for temporary status message first
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    // Time input takes over the status bar while active
    if let Some(field) = app.input_field {
        let line = format!(
            " {}: {}_  (contoh: 2024-11-23 10:00 | Enter:apply Esc:cancel)",
            field.label(),
            app.input_text
        );
        let paragraph = Paragraph::new(line).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    // Context-sensitive controls
    let controls = match app.current_view {
        View::Live => "Tab:switch r:refresh e:export ?:help q:quit",
        View::History => "←→:page s:sensor f/t:waktu c:clear Enter:detail ?:help q:quit",
    };

    let updated = app
        .last_updated
        .map(|t| format!("Updated {:.1}s ago", t.elapsed().as_secs_f64()))
        .unwrap_or_else(|| "Loading...".to_string());

    let status = match app.live_error {
        Some(ref err) => format!(" {} | fetch error: {} | {}", updated, err, controls),
        None => format!(" {} | {}", updated, controls),
    };

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));

    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Navigation",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  Tab 1/2     Switch views"),
        Line::from("  ↑/↓ j/k     Select row"),
        Line::from("  Enter       Record detail"),
        Line::from("  Esc         Go back"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " History",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  ←/→ h/l   Previous/next page"),
        Line::from("  Home/End  First/last page"),
        Line::from("  s         Cycle sensor columns"),
        Line::from("  f         Edit start time"),
        Line::from("  t         Edit end time"),
        Line::from("  c         Clear time filter"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " General",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  r         Refresh reading"),
        Line::from("  e         Export to JSON"),
        Line::from("  q         Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 42u16.min(area.width.saturating_sub(4));
    let help_height = 26u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    // Clear the area behind the help
    frame.render_widget(ratatui::widgets::Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
