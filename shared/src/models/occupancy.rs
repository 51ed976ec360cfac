//! Occupancy classification for storage locations

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::ResolvedCapacity;

/// Locations below this occupancy are consolidation candidates
pub const MERGE_THRESHOLD_PERCENT: i64 = 60;

/// Fill state reported by the bin status view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BinStatus {
    Empty,
    Partial,
    Full,
}

impl BinStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinStatus::Empty => "EMPTY",
            BinStatus::Partial => "PARTIAL",
            BinStatus::Full => "FULL",
        }
    }
}

impl std::fmt::Display for BinStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a location for the bin status view.
///
/// FULL is only reported when a manual ceiling exists; without one any
/// stocked location is PARTIAL.
pub fn classify_bin_status(total_cartons: i64, capacity: &ResolvedCapacity) -> BinStatus {
    if total_cartons == 0 {
        BinStatus::Empty
    } else if capacity.is_override() && total_cartons >= i64::from(capacity.max_cartons) {
        BinStatus::Full
    } else {
        BinStatus::Partial
    }
}

/// Cartons as a percentage of capacity, rounded to one decimal place.
///
/// The ratio is taken in binary floating point and rounded half to even,
/// so 1 carton in a 16-carton slot reports 6.2. Zero when capacity is not
/// positive.
pub fn occupancy_percent(total_cartons: i64, max_cartons: i32) -> Decimal {
    if max_cartons <= 0 {
        return Decimal::ZERO;
    }
    let ratio = (total_cartons as f64 / f64::from(max_cartons)) * 100.0;
    Decimal::from_f64_retain(ratio)
        .map(|pct| pct.round_dp_with_strategy(1, RoundingStrategy::MidpointNearestEven))
        .unwrap_or(Decimal::ZERO)
}

/// Under-utilized locations are merge candidates
pub fn needs_merge(occupancy_percent: Decimal, threshold_percent: Decimal) -> bool {
    occupancy_percent < threshold_percent
}

/// Occupancy figures for one optimizer row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occupancy {
    pub percent: Decimal,
    pub needs_merge: bool,
}

impl Occupancy {
    pub fn compute(total_cartons: i64, max_cartons: i32, threshold_percent: Decimal) -> Self {
        let percent = occupancy_percent(total_cartons, max_cartons);
        Self {
            percent,
            needs_merge: needs_merge(percent, threshold_percent),
        }
    }
}
