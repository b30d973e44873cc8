//! Remote feed source backed by the channel HTTP API.
//!
//! [`FeedClient`] is the thin fetch wrapper; [`RemoteSource`] owns a
//! background task that drives it on a fixed cadence and forwards
//! results over a channel for the TUI to drain.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::{FeedDocument, FeedEvent, FeedRecord, FeedSource};

/// Default channel API host.
pub const DEFAULT_BASE_URL: &str = "https://api.thingspeak.com";

/// Thin fetch wrapper over the channel feed endpoints.
///
/// Every call is a single attempt: a failure is reported and the next
/// cycle starts from scratch. No retry, no backoff.
#[derive(Debug, Clone)]
pub struct FeedClient {
    http: reqwest::Client,
    base_url: String,
    channel: u64,
}

impl FeedClient {
    /// Create a client for one channel.
    pub fn new(base_url: &str, channel: u64) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            channel,
        }
    }

    /// The channel id this client reads.
    pub fn channel(&self) -> u64 {
        self.channel
    }

    /// URL for the single most recent record.
    pub fn latest_url(&self) -> String {
        format!("{}?results=1", self.history_url())
    }

    /// URL for the full (server-capped) feed history.
    pub fn history_url(&self) -> String {
        format!("{}/channels/{}/feeds.json", self.base_url, self.channel)
    }

    /// Fetch the single most recent record.
    pub async fn fetch_latest(&self) -> Result<FeedRecord> {
        let doc = self.fetch(&self.latest_url()).await?;
        doc.feeds.into_iter().next().context("feed returned no records")
    }

    /// Fetch the full feed history, in server order.
    pub async fn fetch_history(&self) -> Result<Vec<FeedRecord>> {
        Ok(self.fetch(&self.history_url()).await?.feeds)
    }

    async fn fetch(&self, url: &str) -> Result<FeedDocument> {
        let response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            bail!("feed API error: {}", response.status());
        }
        Ok(response.json().await?)
    }
}

enum Command {
    Refresh,
    History,
}

/// A feed source that polls the remote API from a background task.
///
/// The task fetches the latest record on a fixed interval regardless of
/// prior failure and services one-shot history requests. Events are
/// forwarded over a bounded channel and drained non-blockingly via
/// `poll()`. Dropping the source aborts the task, so the polling timer
/// lives exactly as long as the app that owns it; a response in flight at
/// that point is discarded.
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use aquawatch::{FeedClient, RemoteSource};
///
/// # tokio_test::block_on(async {
/// let client = FeedClient::new("https://api.thingspeak.com", 2725512);
/// let source = RemoteSource::spawn(client, Duration::from_secs(10));
/// # });
/// ```
#[derive(Debug)]
pub struct RemoteSource {
    events: mpsc::Receiver<FeedEvent>,
    commands: mpsc::UnboundedSender<Command>,
    description: String,
    worker: JoinHandle<()>,
}

impl RemoteSource {
    /// Spawn the background poller.
    ///
    /// Must be called from within a tokio runtime. The first fetch
    /// happens immediately; subsequent fetches follow `refresh`.
    pub fn spawn(client: FeedClient, refresh: Duration) -> Self {
        let (tx, rx) = mpsc::channel(16);
        let (cmd_tx, mut cmd_rx) = mpsc::unbounded_channel();
        let description = format!("channel: {}", client.channel());

        let worker = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(refresh);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if tx.send(fetch_latest_event(&client).await).await.is_err() {
                            break;
                        }
                    }
                    cmd = cmd_rx.recv() => {
                        let event = match cmd {
                            Some(Command::Refresh) => fetch_latest_event(&client).await,
                            Some(Command::History) => match client.fetch_history().await {
                                Ok(records) => FeedEvent::History(records),
                                Err(e) => FeedEvent::HistoryFailed(e.to_string()),
                            },
                            // Source dropped
                            None => break,
                        };
                        if tx.send(event).await.is_err() {
                            break;
                        }
                    }
                }
            }
        });

        Self {
            events: rx,
            commands: cmd_tx,
            description,
            worker,
        }
    }
}

async fn fetch_latest_event(client: &FeedClient) -> FeedEvent {
    match client.fetch_latest().await {
        Ok(record) => FeedEvent::Latest(record),
        Err(e) => FeedEvent::LatestFailed(e.to_string()),
    }
}

impl FeedSource for RemoteSource {
    fn poll(&mut self) -> Option<FeedEvent> {
        self.events.try_recv().ok()
    }

    fn request_history(&mut self) {
        let _ = self.commands.send(Command::History);
    }

    fn request_refresh(&mut self) {
        let _ = self.commands.send(Command::Refresh);
    }

    fn description(&self) -> &str {
        &self.description
    }
}

impl Drop for RemoteSource {
    fn drop(&mut self) {
        self.worker.abort();
    }
}
