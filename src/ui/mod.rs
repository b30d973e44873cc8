//! Terminal UI rendering using ratatui.
//!
//! Each view is implemented in its own submodule with a `render`
//! function; `main.rs` dispatches on the current view.
//!
//! - [`live`]: latest reading with per-metric classification
//! - [`history`]: filterable, paginated table of the full feed
//! - [`detail`]: modal overlay classifying one selected record
//! - [`common`]: shared components (header, tabs, status bar, help)
//! - [`theme`]: light/dark theme support with terminal auto-detection

pub mod common;
pub mod detail;
pub mod history;
pub mod live;
pub mod theme;

pub use theme::Theme;
