//! Example: Feeding the dashboard through a channel
//!
//! This example demonstrates how to integrate aquawatch into your own
//! application by pushing feed events through a channel.
//!
//! This is useful when you want to:
//! - Bridge readings from another transport (MQTT, serial, etc.)
//! - Generate synthetic data for testing
//!
//! # Usage
//!
//! ```bash
//! cargo run --example channel_source
//! ```

use std::thread;
use std::time::Duration;

use aquawatch::{classify_record, ChannelSource, FeedEvent, FeedRecord, FeedSource};
use chrono::Utc;

fn main() {
    println!("Channel source example");
    println!("Generating synthetic readings...\n");

    // Create a channel source - this returns both a sender and the source
    let (tx, mut source) = ChannelSource::create("synthetic-data");

    // Spawn a thread that drifts the readings through the threshold bands
    thread::spawn(move || {
        let mut counter = 0u64;

        loop {
            counter += 1;

            let ph = 6.0 + (counter % 30) as f64 / 10.0;
            let turbidity = 10 + counter % 25;
            let tds = 300 + (counter * 50) % 900;

            let record = FeedRecord {
                created_at: Utc::now(),
                entry_id: counter as i64,
                field1: Some(format!("{:.1}", ph)),
                field2: Some(format!("{}", turbidity)),
                field3: Some(format!("{}", tds)),
            };

            if tx.send(FeedEvent::Latest(record)).is_err() {
                break;
            }

            thread::sleep(Duration::from_secs(1));
        }
    });

    // Poll a handful of readings and print their classification
    for _ in 0..10 {
        if let Some(FeedEvent::Latest(record)) = source.poll() {
            println!("Reading #{} at {}", record.entry_id, record.created_at);
            for (metric, value, status) in classify_record(&record) {
                println!(
                    "  {:>9}: {:>6.1} {:<3} [{}] {}",
                    metric.label(),
                    value,
                    metric.unit(),
                    status.tier.symbol(),
                    status.description
                );
            }
            println!();
        }

        thread::sleep(Duration::from_millis(500));
    }
}
