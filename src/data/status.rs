//! Threshold classification of water-quality readings.
//!
//! Each metric has an ordered list of guarded rules evaluated
//! top-to-bottom; the first matching rule wins and every list ends in an
//! unconditional catch-all, so classification is total. The band overlaps
//! (pH 7.5-7.8, TDS 500-700) resolve in favor of the earlier rule.

use crate::source::FeedRecord;

/// Metric kind for a single reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Ph,
    Turbidity,
    Tds,
}

impl Metric {
    /// Display label for this metric.
    pub fn label(&self) -> &'static str {
        match self {
            Metric::Ph => "PH",
            Metric::Turbidity => "Turbidity",
            Metric::Tds => "TDS",
        }
    }

    /// Unit suffix for display, empty for pH.
    pub fn unit(&self) -> &'static str {
        match self {
            Metric::Ph => "",
            Metric::Turbidity => "NTU",
            Metric::Tds => "ppm",
        }
    }
}

/// Classification outcome for a reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tier {
    Normal,
    Warning,
    Danger,
    Unknown,
}

impl Tier {
    /// Returns a short symbol for display.
    pub fn symbol(&self) -> &'static str {
        match self {
            Tier::Normal => "OK",
            Tier::Warning => "WARN",
            Tier::Danger => "DANGER",
            Tier::Unknown => "?",
        }
    }
}

/// Tier plus the human-readable description shown next to the reading.
///
/// Derived, never stored: recomputed from the latest record on every
/// render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    pub tier: Tier,
    pub description: &'static str,
}

/// One guarded classification rule.
struct Rule {
    matches: fn(f64) -> bool,
    tier: Tier,
    description: &'static str,
}

const PH_RULES: &[Rule] = &[
    Rule {
        matches: |v| v >= 6.5 && v <= 7.8,
        tier: Tier::Normal,
        description: "PH air normal.",
    },
    Rule {
        matches: |v| v > 7.5 && v < 8.0,
        tier: Tier::Warning,
        description: "PH tidak normal.",
    },
    Rule {
        matches: |v| v < 6.5,
        tier: Tier::Danger,
        description: "Air terlalu asam.",
    },
    Rule {
        matches: |v| v > 8.0 && v <= 14.0,
        tier: Tier::Danger,
        description: "Air terlalu basa.",
    },
    Rule {
        matches: |_| true,
        tier: Tier::Danger,
        description: "PH terlalu tinggi (>8).",
    },
];

const TURBIDITY_RULES: &[Rule] = &[
    Rule {
        matches: |v| v <= 15.0,
        tier: Tier::Normal,
        description: "Kekeruhan dalam batas normal.",
    },
    Rule {
        matches: |v| v > 15.0 && v <= 30.0,
        tier: Tier::Warning,
        description: "Kekeruhan sedikit tinggi (>15 NTU).",
    },
    Rule {
        matches: |_| true,
        tier: Tier::Danger,
        description: "Kekeruhan sangat tinggi (>30 NTU).",
    },
];

const TDS_RULES: &[Rule] = &[
    Rule {
        matches: |v| v >= 50.0 && v <= 700.0,
        tier: Tier::Normal,
        description: "TDS dalam batas normal.",
    },
    Rule {
        matches: |v| v > 500.0 && v <= 1000.0,
        tier: Tier::Warning,
        description: "TDS sedikit tinggi (>500 ppm).",
    },
    Rule {
        matches: |_| true,
        tier: Tier::Danger,
        description: "TDS sangat tinggi (>1000 ppm).",
    },
];

/// Classify a parsed reading into a status tier.
///
/// Pure function of (value, metric): no hidden state, no history
/// dependency. NaN resolves to Unknown before any rule runs, since every
/// comparison against NaN is false and would otherwise fall through to a
/// misleading tier.
pub fn classify(value: f64, metric: Metric) -> Status {
    if value.is_nan() {
        return Status {
            tier: Tier::Unknown,
            description: "Data tidak valid.",
        };
    }

    let rules = match metric {
        Metric::Ph => PH_RULES,
        Metric::Turbidity => TURBIDITY_RULES,
        Metric::Tds => TDS_RULES,
    };

    for rule in rules {
        if (rule.matches)(value) {
            return Status {
                tier: rule.tier,
                description: rule.description,
            };
        }
    }

    // The final rule of every list matches unconditionally.
    unreachable!("classification rule lists end in a catch-all")
}

/// Classify all three metrics of one record.
///
/// Returns (metric, parsed value, status) triples in display order.
pub fn classify_record(record: &FeedRecord) -> [(Metric, f64, Status); 3] {
    let ph = record.ph();
    let turbidity = record.turbidity();
    let tds = record.tds();
    [
        (Metric::Ph, ph, classify(ph, Metric::Ph)),
        (Metric::Turbidity, turbidity, classify(turbidity, Metric::Turbidity)),
        (Metric::Tds, tds, classify(tds, Metric::Tds)),
    ]
}

/// Aggregate status across the three live metrics.
///
/// Danger if any metric is Danger, else Warning if any is Warning, else
/// Normal.
pub fn aggregate(tiers: &[Tier]) -> Tier {
    if tiers.contains(&Tier::Danger) {
        Tier::Danger
    } else if tiers.contains(&Tier::Warning) {
        Tier::Warning
    } else {
        Tier::Normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ph_normal_band() {
        for v in [6.5, 6.8, 7.0, 7.5, 7.6, 7.8] {
            assert_eq!(classify(v, Metric::Ph).tier, Tier::Normal, "pH {}", v);
        }
    }

    #[test]
    fn test_ph_overlap_resolves_to_normal() {
        // 7.5-7.8 sits inside both the Normal and Warning bands; the
        // Normal rule is evaluated first and wins.
        let status = classify(7.7, Metric::Ph);
        assert_eq!(status.tier, Tier::Normal);
        assert_eq!(status.description, "PH air normal.");
    }

    #[test]
    fn test_ph_warning_band() {
        let status = classify(7.9, Metric::Ph);
        assert_eq!(status.tier, Tier::Warning);
        assert_eq!(status.description, "PH tidak normal.");
    }

    #[test]
    fn test_ph_acidic_is_danger() {
        for v in [6.4, 6.0, 3.0, 0.0, -1.0] {
            let status = classify(v, Metric::Ph);
            assert_eq!(status.tier, Tier::Danger, "pH {}", v);
            assert_eq!(status.description, "Air terlalu asam.");
        }
    }

    #[test]
    fn test_ph_alkaline_is_danger() {
        let status = classify(8.5, Metric::Ph);
        assert_eq!(status.tier, Tier::Danger);
        assert_eq!(status.description, "Air terlalu basa.");
    }

    #[test]
    fn test_ph_catch_all() {
        // Exactly 8 escapes the Warning band (exclusive) and the alkaline
        // band (exclusive lower bound); above 14 escapes everything.
        for v in [8.0, 14.5, 100.0] {
            let status = classify(v, Metric::Ph);
            assert_eq!(status.tier, Tier::Danger, "pH {}", v);
            assert_eq!(status.description, "PH terlalu tinggi (>8).");
        }
    }

    #[test]
    fn test_turbidity_bands() {
        assert_eq!(classify(10.0, Metric::Turbidity).tier, Tier::Normal);
        assert_eq!(classify(15.0, Metric::Turbidity).tier, Tier::Normal);
        assert_eq!(classify(20.0, Metric::Turbidity).tier, Tier::Warning);
        assert_eq!(classify(30.0, Metric::Turbidity).tier, Tier::Warning);
        assert_eq!(classify(30.1, Metric::Turbidity).tier, Tier::Danger);
    }

    #[test]
    fn test_tds_normal_band() {
        for v in [50.0, 300.0, 500.0, 600.0, 700.0] {
            assert_eq!(classify(v, Metric::Tds).tier, Tier::Normal, "TDS {}", v);
        }
    }

    #[test]
    fn test_tds_warning_band() {
        // The 500-700 overlap belongs to Normal; Warning effectively
        // covers (700, 1000].
        for v in [700.5, 850.0, 1000.0] {
            assert_eq!(classify(v, Metric::Tds).tier, Tier::Warning, "TDS {}", v);
        }
    }

    #[test]
    fn test_tds_danger() {
        assert_eq!(classify(1000.1, Metric::Tds).tier, Tier::Danger);
        // Below the Normal floor falls through to the catch-all.
        assert_eq!(classify(30.0, Metric::Tds).tier, Tier::Danger);
    }

    #[test]
    fn test_nan_is_unknown_for_every_metric() {
        for metric in [Metric::Ph, Metric::Turbidity, Metric::Tds] {
            let status = classify(f64::NAN, metric);
            assert_eq!(status.tier, Tier::Unknown);
            assert_eq!(status.description, "Data tidak valid.");
        }
    }

    #[test]
    fn test_classify_record_from_raw_fields() {
        let record = FeedRecord {
            created_at: chrono::Utc::now(),
            entry_id: 1,
            field1: Some("6.0".to_string()),
            field2: Some("20".to_string()),
            field3: None,
        };

        let [(_, _, ph), (_, _, turbidity), (_, _, tds)] = classify_record(&record);
        assert_eq!(ph.tier, Tier::Danger);
        assert_eq!(ph.description, "Air terlalu asam.");
        assert_eq!(turbidity.tier, Tier::Warning);
        assert_eq!(tds.tier, Tier::Unknown);
    }

    #[test]
    fn test_aggregate_danger_wins() {
        assert_eq!(
            aggregate(&[Tier::Normal, Tier::Danger, Tier::Normal]),
            Tier::Danger
        );
    }

    #[test]
    fn test_aggregate_warning_over_normal() {
        assert_eq!(
            aggregate(&[Tier::Normal, Tier::Warning, Tier::Normal]),
            Tier::Warning
        );
    }

    #[test]
    fn test_aggregate_all_normal() {
        assert_eq!(
            aggregate(&[Tier::Normal, Tier::Normal, Tier::Normal]),
            Tier::Normal
        );
    }
}
