use std::path::Path;

use anyhow::Context;

use crate::models::EventRecord;

/// Raw row shape of the NOAA storm-events CSV. The file carries dozens of
/// columns; only the seven the pipeline needs are picked out here, and the
/// magnitude codes come through as raw strings, not pre-interpreted.
#[derive(serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "EVTYPE")]
    event_type: String,
    // Counts are written with decimal points in the source file ("15.00"),
    // so they parse as floats and get truncated to whole people.
    #[serde(rename = "FATALITIES")]
    fatalities: Option<f64>,
    #[serde(rename = "INJURIES")]
    injuries: Option<f64>,
    #[serde(rename = "PROPDMG")]
    property_amount: Option<f64>,
    #[serde(rename = "PROPDMGEXP")]
    property_magnitude: Option<String>,
    #[serde(rename = "CROPDMG")]
    crop_amount: Option<f64>,
    #[serde(rename = "CROPDMGEXP")]
    crop_magnitude: Option<String>,
}

impl From<CsvRow> for EventRecord {
    fn from(row: CsvRow) -> Self {
        EventRecord {
            event_type: row.event_type,
            fatalities: row.fatalities.unwrap_or(0.0) as u32,
            injuries: row.injuries.unwrap_or(0.0) as u32,
            property_amount: row.property_amount.unwrap_or(0.0),
            property_magnitude: row.property_magnitude.unwrap_or_default(),
            crop_amount: row.crop_amount.unwrap_or(0.0),
            crop_magnitude: row.crop_magnitude.unwrap_or_default(),
        }
    }
}

pub fn load_csv(path: &Path) -> anyhow::Result<Vec<EventRecord>> {
    let reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    read_records(reader).with_context(|| format!("failed to parse {}", path.display()))
}

fn read_records<R: std::io::Read>(mut reader: csv::Reader<R>) -> anyhow::Result<Vec<EventRecord>> {
    let mut records = Vec::new();
    for result in reader.deserialize::<CsvRow>() {
        records.push(result?.into());
    }
    Ok(records)
}
