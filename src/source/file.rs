//! File-based feed source.
//!
//! Reads a channel feed document (the same JSON shape the remote API
//! serves) from disk, for offline demos and tests. The source tracks the
//! file's modification time and only re-reads when the file changes.

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use super::{FeedDocument, FeedEvent, FeedSource};

/// A feed source that reads a feeds.json document from a file.
///
/// Each (re-)read emits the full history followed by the newest record,
/// so both views stay in sync with the file. The newest record is the
/// last element of `feeds`, per the feed's ascending order convention.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
    last_modified: Option<SystemTime>,
    document: Option<FeedDocument>,
    pending: VecDeque<FeedEvent>,
}

impl FileSource {
    /// Create a new file source for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self {
            path,
            description,
            last_modified: None,
            document: None,
            pending: VecDeque::new(),
        }
    }

    /// Returns the path being read.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn get_modified_time(&self) -> Option<SystemTime> {
        fs::metadata(&self.path).ok()?.modified().ok()
    }

    /// Read and decode the file, queueing the resulting events.
    fn read_file(&mut self) -> bool {
        let document: Result<FeedDocument, String> = fs::read_to_string(&self.path)
            .map_err(|e| format!("Read error: {}", e))
            .and_then(|content| {
                serde_json::from_str(&content).map_err(|e| format!("Parse error: {}", e))
            });

        match document {
            Ok(document) => {
                self.queue_document(&document);
                self.document = Some(document);
                true
            }
            Err(message) => {
                self.pending.push_back(FeedEvent::HistoryFailed(message.clone()));
                self.pending.push_back(FeedEvent::LatestFailed(message));
                false
            }
        }
    }

    fn queue_document(&mut self, document: &FeedDocument) {
        self.pending.push_back(FeedEvent::History(document.feeds.clone()));
        if let Some(newest) = document.feeds.last() {
            self.pending.push_back(FeedEvent::Latest(newest.clone()));
        }
    }
}

impl FeedSource for FileSource {
    fn poll(&mut self) -> Option<FeedEvent> {
        if let Some(event) = self.pending.pop_front() {
            return Some(event);
        }

        let current_modified = self.get_modified_time();

        // Re-read only when the file has been modified since the last
        // successful read.
        let file_changed = match (&self.last_modified, &current_modified) {
            (None, _) => true,        // First poll, always read
            (Some(_), None) => false, // File disappeared, keep what we have
            (Some(last), Some(current)) => current > last,
        };

        if file_changed && self.read_file() {
            self.last_modified = current_modified;
        }

        self.pending.pop_front()
    }

    fn request_history(&mut self) {
        if let Some(document) = self.document.clone() {
            self.queue_document(&document);
        }
        // Otherwise the first poll will read the file and emit anyway.
    }

    fn request_refresh(&mut self) {
        // Force a re-read on the next poll.
        self.last_modified = None;
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn sample_json() -> &'static str {
        r#"{
            "channel": { "id": 1 },
            "feeds": [
                { "created_at": "2024-11-23T10:00:00Z", "entry_id": 1,
                  "field1": "7.0", "field2": "10", "field3": "300" },
                { "created_at": "2024-11-23T10:00:30Z", "entry_id": 2,
                  "field1": "6.0", "field2": "20", "field3": "800" }
            ]
        }"#
    }

    #[test]
    fn test_file_source_new() {
        let source = FileSource::new("/tmp/feeds.json");
        assert_eq!(source.path(), Path::new("/tmp/feeds.json"));
        assert_eq!(source.description(), "file: /tmp/feeds.json");
    }

    #[test]
    fn test_first_poll_emits_history_then_latest() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", sample_json()).unwrap();

        let mut source = FileSource::new(file.path());

        match source.poll() {
            Some(FeedEvent::History(records)) => assert_eq!(records.len(), 2),
            other => panic!("expected History, got {:?}", other),
        }
        match source.poll() {
            Some(FeedEvent::Latest(record)) => assert_eq!(record.entry_id, 2),
            other => panic!("expected Latest, got {:?}", other),
        }

        // No change, nothing more to emit.
        assert!(source.poll().is_none());
    }

    #[test]
    fn test_request_history_re_emits_cached_document() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", sample_json()).unwrap();

        let mut source = FileSource::new(file.path());
        while source.poll().is_some() {}

        source.request_history();
        assert!(matches!(source.poll(), Some(FeedEvent::History(_))));
    }

    #[test]
    fn test_request_refresh_forces_re_read() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", sample_json()).unwrap();

        let mut source = FileSource::new(file.path());
        while source.poll().is_some() {}
        assert!(source.poll().is_none());

        source.request_refresh();
        assert!(matches!(source.poll(), Some(FeedEvent::History(_))));
    }

    #[test]
    fn test_missing_file_reports_failures() {
        let mut source = FileSource::new("/nonexistent/path/feeds.json");

        match source.poll() {
            Some(FeedEvent::HistoryFailed(msg)) => assert!(msg.contains("Read error")),
            other => panic!("expected HistoryFailed, got {:?}", other),
        }
        assert!(matches!(source.poll(), Some(FeedEvent::LatestFailed(_))));
    }

    #[test]
    fn test_invalid_json_reports_failures() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not valid json").unwrap();

        let mut source = FileSource::new(file.path());

        match source.poll() {
            Some(FeedEvent::HistoryFailed(msg)) => assert!(msg.contains("Parse error")),
            other => panic!("expected HistoryFailed, got {:?}", other),
        }
    }
}
