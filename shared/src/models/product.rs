//! Carton conversion for product packaging

/// Convert a raw unit count into whole cartons.
///
/// A missing or non-positive ratio yields zero cartons. Negative unit counts
/// are treated as zero stock. Callers sum the floored per-item values, never
/// the fractional ones.
pub fn cartons_for_units(units: i64, units_per_carton: Option<i32>) -> i64 {
    match units_per_carton {
        Some(ratio) if ratio > 0 => units.max(0) / i64::from(ratio),
        _ => 0,
    }
}

/// Whether the packaging ratio is usable for carton math
pub fn has_carton_ratio(units_per_carton: Option<i32>) -> bool {
    matches!(units_per_carton, Some(ratio) if ratio > 0)
}
