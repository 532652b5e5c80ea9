use thiserror::Error;

/// A damage magnitude code outside the alphabet the NOAA storm data uses.
///
/// Surfaced rather than zeroed so data-quality problems in the source file
/// are visible to the caller instead of silently shrinking the totals.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unmapped damage magnitude code {code:?}")]
pub struct UnmappedMagnitude {
    pub code: String,
}

/// Dollar multiplier for a raw damage amount's magnitude code.
///
/// The alphabet is closed: "", "-" and "?" mean "magnitude unknown" and
/// contribute nothing (the source convention, even though it discards the
/// raw amount for such rows), "+" leaves the amount as-is, a digit means
/// tens, and h/k/m/b are hundreds, thousands, millions and billions.
/// Codes are case-insensitive. Anything else is an error.
pub fn multiplier(code: &str) -> Result<f64, UnmappedMagnitude> {
    match code {
        "" | "-" | "?" => Ok(0.0),
        "+" => Ok(1.0),
        "0" | "1" | "2" | "3" | "4" | "5" | "6" | "7" | "8" => Ok(10.0),
        "h" | "H" => Ok(100.0),
        "k" | "K" => Ok(1_000.0),
        "m" | "M" => Ok(1_000_000.0),
        "b" | "B" => Ok(1_000_000_000.0),
        other => Err(UnmappedMagnitude {
            code: other.to_string(),
        }),
    }
}

/// Normalize a raw damage amount to dollars using its magnitude code.
///
/// Pure and total over the closed alphabet. Negative amounts are outside
/// the declared domain and pass through unchecked.
pub fn normalize(amount: f64, code: &str) -> Result<f64, UnmappedMagnitude> {
    Ok(amount * multiplier(code)?)
}
