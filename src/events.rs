use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind,
};

use crate::app::{App, TimeField, View};

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    // If the detail overlay is shown, handle overlay-specific keys
    if app.show_detail_overlay {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace | KeyCode::Char('q') => {
                app.show_detail_overlay = false;
            }
            // Allow scrolling through rows while the overlay is open
            KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => app.select_next(),
            _ => {}
        }
        return;
    }

    // If time input is active, handle text input
    if app.input_field.is_some() {
        handle_time_input(app, key);
        return;
    }

    match key.code {
        // Quit
        KeyCode::Char('q') => app.quit(),

        // View switching
        KeyCode::Tab | KeyCode::BackTab => app.next_view(),
        KeyCode::Char('1') => app.set_view(View::Live),
        KeyCode::Char('2') => app.set_view(View::History),

        // Help
        KeyCode::Char('?') => app.toggle_help(),

        // Ask the source for a fresh reading
        KeyCode::Char('r') => app.request_refresh(),

        // Export
        KeyCode::Char('e') => {
            let export_path = std::path::PathBuf::from("aquawatch_export.json");
            match app.export_state(&export_path) {
                Ok(()) => {
                    app.set_status_message(format!("Exported to {}", export_path.display()));
                }
                Err(e) => {
                    app.set_status_message(format!("Export failed: {}", e));
                }
            }
        }

        // Go back (close overlay, then return to Live)
        KeyCode::Esc | KeyCode::Backspace => app.go_back(),

        _ => handle_history_key(app, key),
    }
}

/// Keys that only mean something in the history view
fn handle_history_key(app: &mut App, key: KeyEvent) {
    if app.current_view != View::History {
        return;
    }

    match key.code {
        // Pagination
        KeyCode::Left | KeyCode::Char('h') => app.prev_page(),
        KeyCode::Right | KeyCode::Char('l') => app.next_page(),
        KeyCode::Home => app.first_page(),
        KeyCode::End => app.last_page(),

        // Row selection
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),

        // Record detail overlay
        KeyCode::Enter => app.enter_detail(),

        // Filters
        KeyCode::Char('s') => app.cycle_sensor(),
        KeyCode::Char('f') => app.start_time_input(TimeField::Start),
        KeyCode::Char('t') => app.start_time_input(TimeField::End),
        KeyCode::Char('c') => app.clear_filters(),

        _ => {}
    }
}

/// Handle key input while the time filter editor is active
fn handle_time_input(app: &mut App, key: KeyEvent) {
    match key.code {
        // Apply (an empty input clears the bound)
        KeyCode::Enter => app.apply_time_input(),

        // Cancel without applying
        KeyCode::Esc => app.cancel_time_input(),

        // Backspace
        KeyCode::Backspace => app.input_pop(),

        // Type characters
        KeyCode::Char(c) => app.input_push(c),

        _ => {}
    }
}

/// Handle mouse events
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent, content_start_row: u16) {
    match mouse.kind {
        // Scroll wheel moves the history selection
        MouseEventKind::ScrollUp => {
            if app.current_view == View::History {
                app.select_prev();
            }
        }
        MouseEventKind::ScrollDown => {
            if app.current_view == View::History {
                app.select_next();
            }
        }

        MouseEventKind::Down(MouseButton::Left) => {
            let clicked_row = mouse.row;

            // Tab clicks (row 1, after the header)
            if clicked_row == 1 {
                let col = mouse.column;
                // Approximate tab positions: Live (0-8), History (9-20)
                if col < 9 {
                    app.set_view(View::Live);
                } else if col < 21 {
                    app.set_view(View::History);
                }
                return;
            }

            // Row clicks select within the current page
            if app.current_view == View::History && clicked_row > content_start_row {
                let item_row = (clicked_row - content_start_row - 1) as usize;
                let page_len = app.history_page().map(|p| p.items.len()).unwrap_or(0);
                if item_row < page_len {
                    app.selected_row = item_row;
                }
            }
        }

        // Right-click goes back
        MouseEventKind::Down(MouseButton::Right) => {
            app.go_back();
        }

        _ => {}
    }
}
