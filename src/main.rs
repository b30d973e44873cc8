// Binary includes library modules - some public API items are only for library consumers
#![allow(unused)]

use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    Terminal,
};

mod app;
mod data;
mod events;
mod settings;
mod source;
mod ui;

use app::{App, View};
use source::{FeedClient, FeedSource, FileSource, RemoteSource};

#[derive(Parser, Debug)]
#[command(name = "aquawatch")]
#[command(about = "Terminal dashboard for monitoring water-quality telemetry channels")]
struct Args {
    /// Path to a feeds.json document (offline mode)
    #[arg(short, long, conflicts_with_all = ["channel", "base_url"])]
    file: Option<PathBuf>,

    /// Channel id to poll
    #[arg(short, long)]
    channel: Option<u64>,

    /// Base URL of the feed API
    #[arg(long)]
    base_url: Option<String>,

    /// Path to a TOML config file ([api] and [poll] sections)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Live refresh interval in seconds
    #[arg(short, long)]
    refresh: Option<u64>,

    /// Export the newest classified reading to a JSON file and exit.
    /// Requires --file.
    #[arg(short, long, requires = "file")]
    export: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let settings = settings::load_settings(args.config.as_deref())?;
    let base_url = args.base_url.unwrap_or(settings.api.base_url);
    let channel = args.channel.unwrap_or(settings.api.channel);
    // Interval timers reject a zero period
    let refresh = Duration::from_secs(args.refresh.unwrap_or(settings.poll.refresh_secs).max(1));

    // Handle export mode (non-interactive)
    if let Some(ref export_path) = args.export {
        let Some(ref file) = args.file else {
            anyhow::bail!("--export requires --file");
        };
        return export_to_file(file, export_path);
    }

    // Offline mode: browse a feed document from disk
    if let Some(ref path) = args.file {
        return run_with_file(path, refresh);
    }

    run_with_remote(&base_url, channel, refresh)
}

/// Run with a file-based feed source
fn run_with_file(path: &Path, refresh: Duration) -> Result<()> {
    let source = Box::new(FileSource::new(path));
    run_tui(source, refresh)
}

/// Run against the remote channel API
fn run_with_remote(base_url: &str, channel: u64, refresh: Duration) -> Result<()> {
    // Build a tokio runtime for the background poller
    let rt = tokio::runtime::Runtime::new()?;

    let source = rt.block_on(async {
        let client = FeedClient::new(base_url, channel);
        Box::new(RemoteSource::spawn(client, refresh)) as Box<dyn FeedSource>
    });

    // The poller pushes events through a channel; drain it frequently.
    // The runtime must outlive the TUI so the background task keeps running.
    run_tui(source, Duration::from_millis(100))
}

/// Run the TUI with the given feed source
fn run_tui(source: Box<dyn FeedSource>, refresh_interval: Duration) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    // Create app and drain any immediately-available data
    let mut app = App::new(source);
    let _ = app.reload_data();

    // Run the main loop
    let result = run_app(&mut terminal, &mut app, refresh_interval);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    refresh_interval: Duration,
) -> Result<()> {
    let mut last_refresh = Instant::now();

    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 60;
    const MIN_HEIGHT: u16 = 12;

    while app.running {
        // Draw UI
        terminal.draw(|frame| {
            let area = frame.area();

            // Check for minimum terminal size
            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = ratatui::widgets::Paragraph::new(msg)
                    .alignment(ratatui::layout::Alignment::Center)
                    .style(ratatui::style::Style::default().fg(ratatui::style::Color::Yellow));
                let centered = ratatui::layout::Rect::new(
                    0,
                    (area.height / 2).saturating_sub(2),
                    area.width,
                    5.min(area.height),
                );
                frame.render_widget(paragraph, centered);
                return;
            }

            let chunks = Layout::vertical([
                Constraint::Length(1), // Header bar
                Constraint::Length(1), // Tabs
                Constraint::Min(8),    // Content
                Constraint::Length(1), // Status bar
            ])
            .split(area);

            // Render header with aggregate water status
            ui::common::render_header(frame, app, chunks[0]);

            // Render tabs
            ui::common::render_tabs(frame, app, chunks[1]);

            // Render current view
            match app.current_view {
                View::Live => ui::live::render(frame, app, chunks[2]),
                View::History => ui::history::render(frame, app, chunks[2]),
            }

            // Render status bar
            ui::common::render_status_bar(frame, app, chunks[3]);

            // Render detail overlay if active
            if app.show_detail_overlay {
                ui::detail::render_overlay(frame, app, area);
            }

            // Render help overlay if active
            if app.show_help {
                ui::common::render_help(frame, app, area);
            }
        })?;

        // Poll for events with a short timeout
        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => {
                    // Content starts after header (1) + tabs (1) + table header (1)
                    events::handle_mouse_event(app, mouse, 3);
                }
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }

        // Drain the feed source periodically
        if last_refresh.elapsed() >= refresh_interval {
            let _ = app.reload_data();
            last_refresh = Instant::now();
        }
    }

    Ok(())
}

/// Export the newest classified reading from a feed document to JSON
fn export_to_file(feeds_path: &Path, export_path: &Path) -> Result<()> {
    let source = Box::new(FileSource::new(feeds_path));
    let mut app = App::new(source);
    app.reload_data()?;

    if app.latest.is_none() {
        anyhow::bail!("No records in {}", feeds_path.display());
    }
    app.export_state(export_path)?;

    println!("Exported water status to: {}", export_path.display());
    Ok(())
}
