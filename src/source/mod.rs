//! Feed source abstraction for receiving telemetry data.
//!
//! This module provides a trait-based abstraction for receiving feed
//! records from various backends - the remote channel API, a local
//! snapshot file, or an in-memory channel.

mod channel;
mod feed;
mod file;
mod remote;

pub use channel::ChannelSource;
pub use feed::{FeedDocument, FeedRecord};
pub use file::FileSource;
pub use remote::{FeedClient, RemoteSource, DEFAULT_BASE_URL};

use std::fmt::Debug;

/// Something a feed source produced: data or the failure that replaced it.
///
/// Failures carry only a message string; a failed cycle never tears down
/// the source, and the next cycle proceeds regardless (no retry, no
/// backoff).
#[derive(Debug, Clone)]
pub enum FeedEvent {
    /// The single most recent record.
    Latest(FeedRecord),
    /// The full feed history, in server order.
    History(Vec<FeedRecord>),
    /// A latest-record fetch failed.
    LatestFailed(String),
    /// A history fetch failed.
    HistoryFailed(String),
}

/// Trait for receiving telemetry data from various sources.
///
/// # Example
///
/// ```
/// use aquawatch::{ChannelSource, FeedSource};
///
/// let (_tx, mut source) = ChannelSource::create("demo");
/// assert!(source.poll().is_none());
/// ```
pub trait FeedSource: Send + Debug {
    /// Poll for the next event.
    ///
    /// Returns `Some(event)` if one is pending, `None` otherwise.
    /// This method must not block.
    fn poll(&mut self) -> Option<FeedEvent>;

    /// Ask the source for the full feed history.
    ///
    /// One request produces (at most) one `History` or `HistoryFailed`
    /// event; a single attempt, never retried by the source.
    fn request_history(&mut self);

    /// Ask the source for a fresh latest record ahead of its own cadence.
    fn request_refresh(&mut self);

    /// Returns a human-readable description of the source.
    ///
    /// Used for display in the TUI status bar.
    fn description(&self) -> &str;
}
