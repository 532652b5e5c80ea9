use std::collections::HashMap;

use anyhow::Context;

use crate::magnitude;
use crate::models::{EventRecord, Measure, RankedEntry};

/// Per-event-type running totals for a single measure.
///
/// Groups are keyed by the exact event-type string, no trimming or
/// case-folding, so "TSTM WIND" and "tstm wind" stay separate groups.
/// That mirrors the free-text entry in the source data and is a known
/// data-quality caveat, not something this layer papers over.
/// First-encounter order is preserved so that ranking ties break
/// deterministically.
#[derive(Debug, Clone, Default)]
pub struct ImpactSummary {
    entries: Vec<RankedEntry>,
    index: HashMap<String, usize>,
}

impl ImpactSummary {
    pub fn add(&mut self, event_type: &str, value: f64) {
        match self.index.get(event_type) {
            Some(&i) => self.entries[i].total += value,
            None => {
                self.index.insert(event_type.to_string(), self.entries.len());
                self.entries.push(RankedEntry {
                    event_type: event_type.to_string(),
                    total: value,
                });
            }
        }
    }

    pub fn total_for(&self, event_type: &str) -> Option<f64> {
        self.index.get(event_type).map(|&i| self.entries[i].total)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All groups in first-encounter order.
    pub fn entries(&self) -> &[RankedEntry] {
        &self.entries
    }
}

/// Sum one measure per event type across all records, in a single pass.
///
/// Damage measures run each record's raw amount through the magnitude
/// normalizer; a code outside the alphabet aborts the whole aggregation
/// with the offending row named, rather than quietly dropping dollars.
pub fn aggregate(records: &[EventRecord], measure: Measure) -> anyhow::Result<ImpactSummary> {
    let mut summary = ImpactSummary::default();

    for (row, record) in records.iter().enumerate() {
        let value = measure_value(record, measure).with_context(|| {
            format!("record {} ({:?})", row + 1, record.event_type)
        })?;
        summary.add(&record.event_type, value);
    }

    Ok(summary)
}

fn measure_value(record: &EventRecord, measure: Measure) -> anyhow::Result<f64> {
    let value = match measure {
        Measure::Fatalities => f64::from(record.fatalities),
        Measure::Injuries => f64::from(record.injuries),
        Measure::PropertyDamage => {
            magnitude::normalize(record.property_amount, &record.property_magnitude)?
        }
        Measure::CropDamage => magnitude::normalize(record.crop_amount, &record.crop_magnitude)?,
    };
    Ok(value)
}

/// The `n` largest groups by total, descending.
///
/// The sort is stable, so groups with equal totals keep their
/// first-encounter order. Asking for more groups than exist returns them
/// all; an empty summary yields an empty table.
pub fn top_n(summary: &ImpactSummary, n: usize) -> Vec<RankedEntry> {
    let mut ranked = summary.entries().to_vec();
    ranked.sort_by(|a, b| b.total.partial_cmp(&a.total).unwrap_or(std::cmp::Ordering::Equal));
    ranked.truncate(n);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn health_record(event_type: &str, fatalities: u32, injuries: u32) -> EventRecord {
        EventRecord {
            event_type: event_type.to_string(),
            fatalities,
            injuries,
            property_amount: 0.0,
            property_magnitude: String::new(),
            crop_amount: 0.0,
            crop_magnitude: String::new(),
        }
    }

    fn damage_record(event_type: &str, amount: f64, code: &str) -> EventRecord {
        EventRecord {
            event_type: event_type.to_string(),
            fatalities: 0,
            injuries: 0,
            property_amount: amount,
            property_magnitude: code.to_string(),
            crop_amount: 0.0,
            crop_magnitude: String::new(),
        }
    }

    #[test]
    fn fatalities_accumulate_by_event_type() {
        let records = vec![
            health_record("TORNADO", 5, 15),
            health_record("TORNADO", 0, 2),
            health_record("FLOOD", 1, 3),
        ];

        let summary = aggregate(&records, Measure::Fatalities).unwrap();
        assert_eq!(summary.len(), 2);
        assert_eq!(summary.total_for("TORNADO"), Some(5.0));
        assert_eq!(summary.total_for("FLOOD"), Some(1.0));

        let top = top_n(&summary, 1);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].event_type, "TORNADO");
        assert_eq!(top[0].total, 5.0);
    }

    #[test]
    fn property_damage_sums_normalized_dollars() {
        let records = vec![
            damage_record("FLOOD", 100.0, "K"),
            damage_record("FLOOD", 5.0, "M"),
        ];

        let summary = aggregate(&records, Measure::PropertyDamage).unwrap();
        assert_eq!(summary.total_for("FLOOD"), Some(5_100_000.0));
    }

    #[test]
    fn totals_are_order_independent() {
        let mut records = vec![
            health_record("HAIL", 0, 4),
            health_record("TORNADO", 2, 9),
            health_record("HAIL", 1, 1),
            health_record("HEAT", 7, 0),
        ];

        let forward = aggregate(&records, Measure::Injuries).unwrap();
        records.reverse();
        let backward = aggregate(&records, Measure::Injuries).unwrap();

        assert_eq!(forward.len(), backward.len());
        for entry in forward.entries() {
            assert_eq!(backward.total_for(&entry.event_type), Some(entry.total));
        }
    }

    #[test]
    fn event_type_labels_are_not_folded_or_trimmed() {
        let records = vec![
            health_record("FLOOD", 1, 0),
            health_record("flood", 2, 0),
            health_record(" FLOOD", 4, 0),
        ];

        let summary = aggregate(&records, Measure::Fatalities).unwrap();
        assert_eq!(summary.len(), 3);
        assert_eq!(summary.total_for("FLOOD"), Some(1.0));
        assert_eq!(summary.total_for("flood"), Some(2.0));
    }

    #[test]
    fn unmapped_magnitude_code_aborts_the_aggregation() {
        let records = vec![
            damage_record("FLOOD", 1.0, "K"),
            damage_record("TORNADO", 2.0, "z"),
        ];

        let err = aggregate(&records, Measure::PropertyDamage).unwrap_err();
        assert!(err.to_string().contains("record 2"));
        let root = err.root_cause().to_string();
        assert!(root.contains("\"z\""), "unexpected cause: {root}");
    }

    #[test]
    fn top_n_is_descending_and_bounded() {
        let mut summary = ImpactSummary::default();
        summary.add("HAIL", 3.0);
        summary.add("TORNADO", 10.0);
        summary.add("HEAT", 7.0);
        summary.add("FLOOD", 7.0);

        let top = top_n(&summary, 3);
        assert_eq!(top.len(), 3);
        assert!(top.windows(2).all(|w| w[0].total >= w[1].total));
        assert_eq!(top[0].event_type, "TORNADO");
        // HEAT was grouped before FLOOD, so the tie keeps that order.
        assert_eq!(top[1].event_type, "HEAT");
        assert_eq!(top[2].event_type, "FLOOD");
    }

    #[test]
    fn top_n_past_the_group_count_returns_everything() {
        let mut summary = ImpactSummary::default();
        summary.add("HAIL", 3.0);
        summary.add("FLOOD", 9.0);

        assert_eq!(top_n(&summary, 10).len(), 2);
        assert!(top_n(&ImpactSummary::default(), 10).is_empty());
    }

    #[test]
    fn empty_input_aggregates_to_an_empty_summary() {
        let summary = aggregate(&[], Measure::CropDamage).unwrap();
        assert!(summary.is_empty());
        assert!(top_n(&summary, 10).is_empty());
    }

    #[test]
    fn reaggregating_a_summary_reproduces_it() {
        let records = vec![
            health_record("TORNADO", 5, 15),
            health_record("TORNADO", 0, 2),
            health_record("FLOOD", 1, 3),
        ];
        let summary = aggregate(&records, Measure::Injuries).unwrap();

        // Expand back to one record per group and aggregate again.
        let expanded: Vec<EventRecord> = summary
            .entries()
            .iter()
            .map(|entry| health_record(&entry.event_type, 0, entry.total as u32))
            .collect();
        let again = aggregate(&expanded, Measure::Injuries).unwrap();

        assert_eq!(again.len(), summary.len());
        for entry in summary.entries() {
            assert_eq!(again.total_for(&entry.event_type), Some(entry.total));
        }
    }
}
