use std::fmt::Write;

use crate::aggregate::{self, ImpactSummary};
use crate::models::{EventRecord, Measure, RankedEntry};

/// One ranked table plus the measure it ranks by, for rendering or export.
#[derive(Debug, Clone, serde::Serialize)]
pub struct MeasureTable {
    pub measure: String,
    pub entries: Vec<RankedEntry>,
}

pub fn rank_measure(
    records: &[EventRecord],
    measure: Measure,
    top: usize,
) -> anyhow::Result<MeasureTable> {
    let summary = aggregate::aggregate(records, measure)?;
    Ok(table_from(measure, &summary, top))
}

/// Run all four pipelines over the same record set.
pub fn rank_all(records: &[EventRecord], top: usize) -> anyhow::Result<Vec<MeasureTable>> {
    Measure::ALL
        .iter()
        .map(|&measure| rank_measure(records, measure, top))
        .collect()
}

fn table_from(measure: Measure, summary: &ImpactSummary, top: usize) -> MeasureTable {
    MeasureTable {
        measure: measure.label().to_string(),
        entries: aggregate::top_n(summary, top),
    }
}

pub fn format_total(measure: Measure, total: f64) -> String {
    if measure.is_monetary() {
        // Rendering in millions keeps billion-dollar totals readable; the
        // underlying tables stay in raw dollars.
        format!("${:.1}M", total / 1_000_000.0)
    } else {
        format!("{}", total as u64)
    }
}

pub fn render_table(measure: Measure, table: &MeasureTable) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "Top event types by {}:", measure.label().to_lowercase());
    if table.entries.is_empty() {
        let _ = writeln!(output, "(no records)");
    }
    for (rank, entry) in table.entries.iter().enumerate() {
        let _ = writeln!(
            output,
            "{:>2}. {} — {}",
            rank + 1,
            entry.event_type,
            format_total(measure, entry.total)
        );
    }
    output
}

/// Markdown report covering all four measures.
pub fn build_report(records: &[EventRecord], top: usize) -> anyhow::Result<String> {
    let mut output = String::new();
    let _ = writeln!(output, "# Storm Impact Report");
    let _ = writeln!(
        output,
        "Ranked across {} recorded events (top {} event types per measure).",
        records.len(),
        top
    );

    for measure in Measure::ALL {
        let table = rank_measure(records, measure, top)?;
        let _ = writeln!(output);
        let _ = writeln!(output, "## {}", measure.label());

        if table.entries.is_empty() {
            let _ = writeln!(output, "No events recorded for this measure.");
            continue;
        }
        for entry in &table.entries {
            let _ = writeln!(
                output,
                "- {}: {}",
                entry.event_type,
                format_total(measure, entry.total)
            );
        }
    }

    Ok(output)
}
