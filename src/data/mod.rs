//! Data processing for telemetry readings.
//!
//! This module holds the decision-bearing core of the dashboard:
//!
//! - [`status`]: pure threshold classification of a parsed reading into a
//!   tier + description, plus the aggregate across the three live metrics
//! - [`history`]: time-range filtering and fixed-size pagination of the
//!   feed history
//! - [`timestamp`]: parsing and formatting of filter timestamps
//!
//! ## Data Flow
//!
//! ```text
//! FeedRecord (numeric-as-string fields)
//!        │ ph() / turbidity() / tds()   (NaN on parse failure)
//!        ▼
//! classify(value, metric) ──▶ Status { tier, description }
//!        │
//!        └──▶ aggregate() (live view header)
//!
//! [FeedRecord] + FilterCriteria ──▶ filter_and_paginate() ──▶ Page
//! ```

pub mod history;
pub mod status;
pub mod timestamp;

pub use history::{filter_and_paginate, FilterCriteria, Page, SensorSelector, PAGE_SIZE};
pub use status::{aggregate, classify, classify_record, Metric, Status, Tier};
