//! Wire types for the telemetry feed API.
//!
//! These types match the JSON document served by ThingSpeak-style channel
//! endpoints (`/channels/{id}/feeds.json`). They are decoded verbatim;
//! numeric readings arrive as strings and are parsed on access.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A complete feed document as returned by the channel endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedDocument {
    /// Channel metadata. Opaque to this crate.
    #[serde(default)]
    pub channel: serde_json::Value,
    /// Telemetry records in the order the server returned them
    /// (chronological ascending by convention, not verified here).
    #[serde(default)]
    pub feeds: Vec<FeedRecord>,
}

/// One timestamped telemetry record.
///
/// `field1` is pH, `field2` is turbidity (NTU), `field3` is TDS (ppm).
/// All three arrive as numeric strings; a missing or malformed field
/// parses to NaN, which the classifier resolves to the Unknown tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedRecord {
    /// ISO-8601 timestamp assigned by the server.
    pub created_at: DateTime<Utc>,

    /// Monotonic record id within the channel.
    #[serde(default)]
    pub entry_id: i64,

    /// pH reading, numeric-as-string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field1: Option<String>,

    /// Turbidity reading in NTU, numeric-as-string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field2: Option<String>,

    /// TDS reading in ppm, numeric-as-string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field3: Option<String>,
}

impl FeedRecord {
    /// Parsed pH value, NaN when missing or unparseable.
    pub fn ph(&self) -> f64 {
        parse_field(self.field1.as_deref())
    }

    /// Parsed turbidity in NTU, NaN when missing or unparseable.
    pub fn turbidity(&self) -> f64 {
        parse_field(self.field2.as_deref())
    }

    /// Parsed TDS in ppm, NaN when missing or unparseable.
    pub fn tds(&self) -> f64 {
        parse_field(self.field3.as_deref())
    }
}

fn parse_field(raw: Option<&str>) -> f64 {
    raw.and_then(|s| s.trim().parse::<f64>().ok()).unwrap_or(f64::NAN)
}
