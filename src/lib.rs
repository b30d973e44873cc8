// Library crate: public API items may not be used by the binary
#![allow(unused)]

//! # aquawatch
//!
//! A terminal dashboard and library for monitoring water-quality
//! telemetry channels.
//!
//! This crate polls a ThingSpeak-style channel API for water-quality
//! readings (pH, turbidity, total dissolved solids), classifies each
//! metric against fixed threshold bands, and displays the result in an
//! interactive terminal UI with a live view and a filterable,
//! paginated history view.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐ │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal│ │
//! │  │ (state) │    │(classify/│    │(render) │    │         │ │
//! │  └────┬────┘    │ paginate)│    └─────────┘    └─────────┘ │
//! │       │         └──────────┘                                │
//! │       ▼                                                     │
//! │  ┌─────────┐                                                │
//! │  │ source  │◀── RemoteSource | FileSource | ChannelSource  │
//! │  │ (input) │                                                │
//! │  └─────────┘                                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: Application state, view navigation, and user interaction logic
//! - **[`source`]**: Feed source abstraction ([`FeedSource`] trait) with
//!   implementations for the remote channel API, local feed documents, and
//!   channel-based input
//! - **[`data`]**: The decision-bearing core - threshold classification of
//!   readings and time-range filtering/pagination of the feed history
//! - **[`ui`]**: Terminal rendering using ratatui - live readouts, the history
//!   table, the record-detail overlay, and theme support
//! - **[`settings`]**: Optional TOML configuration for the API endpoint and poll cadence
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Poll the default channel every 10 seconds
//! aquawatch
//!
//! # Poll a specific channel
//! aquawatch --channel 2725512
//!
//! # Browse an offline feed document
//! aquawatch --file feeds.json
//! ```
//!
//! ### Classifying a reading
//!
//! ```
//! use aquawatch::data::{classify, Metric, Tier};
//!
//! let status = classify(7.2, Metric::Ph);
//! assert_eq!(status.tier, Tier::Normal);
//! ```
//!
//! ### As a library with a file source
//!
//! ```
//! use aquawatch::{App, FileSource};
//!
//! let source = Box::new(FileSource::new("feeds.json"));
//! let app = App::new(source);
//! ```
//!
//! ### As a library with a channel source (for embedding)
//!
//! ```
//! use aquawatch::{App, ChannelSource};
//!
//! // Create a channel for pushing feed events
//! let (tx, source) = ChannelSource::create("simulator");
//! let app = App::new(Box::new(source));
//! ```

pub mod app;
pub mod data;
pub mod events;
pub mod settings;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::{App, View};
pub use data::{
    aggregate, classify, classify_record, filter_and_paginate, FilterCriteria, Metric, Page,
    SensorSelector, Status, Tier, PAGE_SIZE,
};
pub use source::{
    ChannelSource, FeedClient, FeedDocument, FeedEvent, FeedRecord, FeedSource, FileSource,
    RemoteSource,
};
