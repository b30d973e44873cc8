//! Time-range filtering and pagination of the feed history.
//!
//! Filtering is time-range only: the sensor selector chooses which
//! columns the history table shows, never which records are kept.

use chrono::{DateTime, Utc};

use crate::source::FeedRecord;

/// Fixed number of records per history page.
pub const PAGE_SIZE: usize = 10;

/// Which sensor columns the history table displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SensorSelector {
    /// All three sensor columns.
    #[default]
    All,
    Ph,
    Turbidity,
    Tds,
}

impl SensorSelector {
    /// Cycle to the next selector.
    pub fn next(self) -> Self {
        match self {
            SensorSelector::All => SensorSelector::Ph,
            SensorSelector::Ph => SensorSelector::Turbidity,
            SensorSelector::Turbidity => SensorSelector::Tds,
            SensorSelector::Tds => SensorSelector::All,
        }
    }

    /// Display label for the selector.
    pub fn label(&self) -> &'static str {
        match self {
            SensorSelector::All => "Semua Sensor",
            SensorSelector::Ph => "PH",
            SensorSelector::Turbidity => "Turbidity",
            SensorSelector::Tds => "TDS",
        }
    }
}

/// History view filter state.
///
/// Lives only in [`App`](crate::App); not persisted across runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    pub sensor: SensorSelector,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    /// Current page, 1-based.
    pub page: usize,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            sensor: SensorSelector::default(),
            start: None,
            end: None,
            page: 1,
        }
    }
}

/// One page of filtered history.
#[derive(Debug, Clone)]
pub struct Page<'a> {
    /// Records on the requested page, in feed order.
    pub items: Vec<&'a FeedRecord>,
    /// Total record count after filtering.
    pub filtered_count: usize,
    /// `ceil(filtered_count / PAGE_SIZE)`.
    pub total_pages: usize,
}

/// Apply the time-range filter and slice out the requested page.
///
/// Record order is preserved as returned by the source. Both range bounds
/// are inclusive. A page beyond the filtered range yields an empty item
/// list; guarding page *requests* to `[1, total_pages]` is the caller's
/// concern.
pub fn filter_and_paginate<'a>(records: &'a [FeedRecord], criteria: &FilterCriteria) -> Page<'a> {
    let filtered: Vec<&FeedRecord> = records
        .iter()
        .filter(|record| {
            criteria.start.is_none_or(|start| record.created_at >= start)
                && criteria.end.is_none_or(|end| record.created_at <= end)
        })
        .collect();

    let filtered_count = filtered.len();
    let total_pages = filtered_count.div_ceil(PAGE_SIZE);

    let start = criteria.page.saturating_sub(1).saturating_mul(PAGE_SIZE);
    let items = if start < filtered_count {
        filtered[start..(start + PAGE_SIZE).min(filtered_count)].to_vec()
    } else {
        Vec::new()
    };

    Page {
        items,
        filtered_count,
        total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(minute: u32) -> FeedRecord {
        FeedRecord {
            created_at: Utc.with_ymd_and_hms(2024, 11, 23, 10, minute, 0).unwrap(),
            entry_id: minute as i64,
            field1: Some("7.0".to_string()),
            field2: Some("10".to_string()),
            field3: Some("300".to_string()),
        }
    }

    fn records(n: u32) -> Vec<FeedRecord> {
        (0..n).map(record).collect()
    }

    #[test]
    fn test_twenty_five_records_three_pages() {
        let records = records(25);

        let page1 = filter_and_paginate(&records, &FilterCriteria::default());
        assert_eq!(page1.total_pages, 3);
        assert_eq!(page1.filtered_count, 25);
        assert_eq!(page1.items.len(), 10);

        let page3 = filter_and_paginate(
            &records,
            &FilterCriteria {
                page: 3,
                ..Default::default()
            },
        );
        assert_eq!(page3.items.len(), 5);
    }

    #[test]
    fn test_preserves_feed_order() {
        let records = records(12);
        let page = filter_and_paginate(&records, &FilterCriteria::default());
        let ids: Vec<i64> = page.items.iter().map(|r| r.entry_id).collect();
        assert_eq!(ids, (0..10).collect::<Vec<i64>>());
    }

    #[test]
    fn test_time_range_bounds_are_inclusive() {
        let records = records(10);
        let criteria = FilterCriteria {
            start: Some(Utc.with_ymd_and_hms(2024, 11, 23, 10, 3, 0).unwrap()),
            end: Some(Utc.with_ymd_and_hms(2024, 11, 23, 10, 7, 0).unwrap()),
            ..Default::default()
        };

        let page = filter_and_paginate(&records, &criteria);
        let ids: Vec<i64> = page.items.iter().map(|r| r.entry_id).collect();
        assert_eq!(ids, vec![3, 4, 5, 6, 7]);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_open_ended_ranges() {
        let records = records(10);

        let from = FilterCriteria {
            start: Some(Utc.with_ymd_and_hms(2024, 11, 23, 10, 8, 0).unwrap()),
            ..Default::default()
        };
        assert_eq!(filter_and_paginate(&records, &from).filtered_count, 2);

        let until = FilterCriteria {
            end: Some(Utc.with_ymd_and_hms(2024, 11, 23, 10, 1, 0).unwrap()),
            ..Default::default()
        };
        assert_eq!(filter_and_paginate(&records, &until).filtered_count, 2);
    }

    #[test]
    fn test_sensor_selector_never_drops_records() {
        let records = records(25);
        for sensor in [
            SensorSelector::All,
            SensorSelector::Ph,
            SensorSelector::Turbidity,
            SensorSelector::Tds,
        ] {
            let criteria = FilterCriteria {
                sensor,
                ..Default::default()
            };
            assert_eq!(filter_and_paginate(&records, &criteria).filtered_count, 25);
        }
    }

    #[test]
    fn test_idempotent_for_same_criteria() {
        let records = records(25);
        let criteria = FilterCriteria {
            page: 2,
            start: Some(Utc.with_ymd_and_hms(2024, 11, 23, 10, 2, 0).unwrap()),
            ..Default::default()
        };

        let first = filter_and_paginate(&records, &criteria);
        let second = filter_and_paginate(&records, &criteria);
        assert_eq!(first.total_pages, second.total_pages);
        assert_eq!(first.filtered_count, second.filtered_count);
        let first_ids: Vec<i64> = first.items.iter().map(|r| r.entry_id).collect();
        let second_ids: Vec<i64> = second.items.iter().map(|r| r.entry_id).collect();
        assert_eq!(first_ids, second_ids);
    }

    #[test]
    fn test_page_beyond_range_is_empty() {
        let records = records(25);
        let page = filter_and_paginate(
            &records,
            &FilterCriteria {
                page: 4,
                ..Default::default()
            },
        );
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn test_empty_history() {
        let page = filter_and_paginate(&[], &FilterCriteria::default());
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.filtered_count, 0);
    }
}
