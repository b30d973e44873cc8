//! Channel-based feed source.
//!
//! Receives feed events via a tokio mpsc channel. This is useful for
//! embedding the dashboard behind another data pipeline, and for tests
//! that drive the app without touching the network.

use tokio::sync::mpsc;

use super::{FeedEvent, FeedSource};

/// A feed source fed by pushing events through a channel.
///
/// The producer sends [`FeedEvent`]s through the sender half; `poll()`
/// drains them without blocking.
///
/// # Example
///
/// ```
/// use aquawatch::ChannelSource;
///
/// let (tx, source) = ChannelSource::create("simulator");
/// ```
#[derive(Debug)]
pub struct ChannelSource {
    receiver: mpsc::UnboundedReceiver<FeedEvent>,
    description: String,
}

impl ChannelSource {
    /// Create a new channel source from a receiver.
    pub fn new(receiver: mpsc::UnboundedReceiver<FeedEvent>, source_description: &str) -> Self {
        Self {
            receiver,
            description: format!("channel: {}", source_description),
        }
    }

    /// Create a channel pair for pushing events to a ChannelSource.
    pub fn create(source_description: &str) -> (mpsc::UnboundedSender<FeedEvent>, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        (tx, Self::new(rx, source_description))
    }
}

impl FeedSource for ChannelSource {
    fn poll(&mut self) -> Option<FeedEvent> {
        self.receiver.try_recv().ok()
    }

    fn request_history(&mut self) {
        // The producer decides when history arrives.
    }

    fn request_refresh(&mut self) {}

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::FeedRecord;
    use chrono::Utc;

    #[test]
    fn test_channel_source_poll() {
        let (tx, mut source) = ChannelSource::create("test");

        assert!(source.poll().is_none());

        let record = FeedRecord {
            created_at: Utc::now(),
            entry_id: 1,
            field1: Some("7.0".to_string()),
            field2: Some("10".to_string()),
            field3: Some("300".to_string()),
        };
        tx.send(FeedEvent::Latest(record)).unwrap();

        assert!(matches!(source.poll(), Some(FeedEvent::Latest(_))));
        assert!(source.poll().is_none());
    }

    #[test]
    fn test_channel_source_description() {
        let (_tx, source) = ChannelSource::create("simulator");
        assert_eq!(source.description(), "channel: simulator");
    }
}
