use clap::ValueEnum;
use serde::Serialize;

/// One observed weather event, as supplied by the CSV ingest layer.
///
/// Counts and amounts are non-negative in the source data; the damage
/// amounts are raw figures that only become dollars once combined with
/// their magnitude codes.
#[derive(Debug, Clone)]
pub struct EventRecord {
    pub event_type: String,
    pub fatalities: u32,
    pub injuries: u32,
    pub property_amount: f64,
    pub property_magnitude: String,
    pub crop_amount: f64,
    pub crop_magnitude: String,
}

/// The four impact measures the pipeline ranks event types by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Measure {
    Fatalities,
    Injuries,
    PropertyDamage,
    CropDamage,
}

impl Measure {
    pub const ALL: [Measure; 4] = [
        Measure::Fatalities,
        Measure::Injuries,
        Measure::PropertyDamage,
        Measure::CropDamage,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Measure::Fatalities => "Fatalities",
            Measure::Injuries => "Injuries",
            Measure::PropertyDamage => "Property damage (USD)",
            Measure::CropDamage => "Crop damage (USD)",
        }
    }

    /// Whether the measure is a dollar figure rather than a person count.
    pub fn is_monetary(&self) -> bool {
        matches!(self, Measure::PropertyDamage | Measure::CropDamage)
    }
}

/// One row of a ranked top-N table: an event-type label and its summed
/// measure across all matching records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntry {
    pub event_type: String,
    pub total: f64,
}
