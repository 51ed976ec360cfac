//! Carton capacity overrides and their resolution
//!
//! The optimizer resolves capacity per (location, SKU) from three tiers in
//! strict order: a manual location override, then a product + rack-type
//! rule, then the system default. The bin status view only consults the
//! manual override and falls back to its own default.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::LocationCode;

/// Optimizer fallback when no override applies
pub const OPTIMIZER_DEFAULT_MAX_CARTONS: i32 = 42;

/// Bin status fallback when the location has no manual override.
///
/// Intentionally differs from [`OPTIMIZER_DEFAULT_MAX_CARTONS`].
pub const BIN_DEFAULT_MAX_CARTONS: i32 = 0;

/// Manual capacity ceiling for a whole location, regardless of SKU
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocationCapacity {
    pub location_code: String,
    /// `None` keeps the row but removes the ceiling
    pub max_cartons: Option<i32>,
}

/// Capacity rule for a SKU stored in a given rack type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductRackCapacity {
    pub sku: String,
    pub rack_type: String,
    pub max_cartons: i32,
}

/// The tier that produced a resolved capacity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapacitySource {
    LocationOverride,
    RackRule,
    Default,
}

/// Maximum cartons for a slot together with the tier it came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedCapacity {
    pub max_cartons: i32,
    pub source: CapacitySource,
}

impl ResolvedCapacity {
    pub fn is_override(&self) -> bool {
        self.source == CapacitySource::LocationOverride
    }
}

/// Lookup tables for both override tiers, loaded once per report
#[derive(Debug, Clone, Default)]
pub struct CapacityBook {
    locations: HashMap<String, i32>,
    rack_rules: HashMap<(String, String), i32>,
}

impl CapacityBook {
    pub fn new(
        locations: impl IntoIterator<Item = LocationCapacity>,
        rack_rules: impl IntoIterator<Item = ProductRackCapacity>,
    ) -> Self {
        let locations = locations
            .into_iter()
            .filter_map(|row| {
                row.max_cartons
                    .map(|max| (LocationCode::parse(&row.location_code).as_str().to_string(), max))
            })
            .collect();

        let rack_rules = rack_rules
            .into_iter()
            .map(|rule| {
                (
                    (rule.sku, rule.rack_type.trim().to_uppercase()),
                    rule.max_cartons,
                )
            })
            .collect();

        Self {
            locations,
            rack_rules,
        }
    }

    /// Manual ceiling for a location, if one is set
    pub fn location_override(&self, location: &LocationCode) -> Option<i32> {
        self.locations.get(location.as_str()).copied()
    }

    /// Rule for a SKU on a rack type. SKUs match exactly; rack types are
    /// compared upper-cased.
    pub fn rack_rule(&self, sku: &str, rack_type: &str) -> Option<i32> {
        if rack_type.is_empty() {
            return None;
        }
        self.rack_rules
            .get(&(sku.to_string(), rack_type.to_uppercase()))
            .copied()
    }

    /// Three-tier resolution used by the optimizer view
    pub fn resolve_for_item(
        &self,
        location: &LocationCode,
        sku: &str,
        default_max: i32,
    ) -> ResolvedCapacity {
        resolve_capacity(
            self.location_override(location),
            self.rack_rule(sku, location.rack_type()),
            default_max,
        )
    }

    /// Location-only resolution used by the bin status view
    pub fn resolve_for_location(&self, location: &LocationCode, default_max: i32) -> ResolvedCapacity {
        resolve_capacity(self.location_override(location), None, default_max)
    }
}

/// Pick exactly one tier: manual override, then rack rule, then default
pub fn resolve_capacity(
    location_override: Option<i32>,
    rack_rule: Option<i32>,
    default_max: i32,
) -> ResolvedCapacity {
    match (location_override, rack_rule) {
        (Some(max_cartons), _) => ResolvedCapacity {
            max_cartons,
            source: CapacitySource::LocationOverride,
        },
        (None, Some(max_cartons)) => ResolvedCapacity {
            max_cartons,
            source: CapacitySource::RackRule,
        },
        (None, None) => ResolvedCapacity {
            max_cartons: default_max,
            source: CapacitySource::Default,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book() -> CapacityBook {
        CapacityBook::new(
            vec![
                LocationCapacity {
                    location_code: "p2-a-01".to_string(),
                    max_cartons: Some(5),
                },
                LocationCapacity {
                    location_code: "P4-A-01".to_string(),
                    max_cartons: None,
                },
            ],
            vec![ProductRackCapacity {
                sku: "SKU-1".to_string(),
                rack_type: "a".to_string(),
                max_cartons: 80,
            }],
        )
    }

    #[test]
    fn manual_override_wins_even_when_larger_rule_exists() {
        let resolved = book().resolve_for_item(&LocationCode::parse("P2-A-01"), "SKU-1", 42);
        assert_eq!(resolved.max_cartons, 5);
        assert_eq!(resolved.source, CapacitySource::LocationOverride);
    }

    #[test]
    fn rack_rule_applies_without_override() {
        let resolved = book().resolve_for_item(&LocationCode::parse("P6-A-02"), "SKU-1", 42);
        assert_eq!(resolved.max_cartons, 80);
        assert_eq!(resolved.source, CapacitySource::RackRule);
    }

    #[test]
    fn cleared_override_falls_through() {
        let resolved = book().resolve_for_item(&LocationCode::parse("P4-A-01"), "SKU-1", 42);
        assert_eq!(resolved.source, CapacitySource::RackRule);
    }

    #[test]
    fn sku_match_is_case_sensitive() {
        let resolved = book().resolve_for_item(&LocationCode::parse("P6-A-02"), "sku-1", 42);
        assert_eq!(resolved.max_cartons, 42);
        assert_eq!(resolved.source, CapacitySource::Default);
    }

    #[test]
    fn rack_rule_needs_matching_rack_type() {
        let resolved = book().resolve_for_item(&LocationCode::parse("P6-B-02"), "SKU-1", 42);
        assert_eq!(resolved.source, CapacitySource::Default);
        let bare = book().resolve_for_item(&LocationCode::parse("P6"), "SKU-1", 42);
        assert_eq!(bare.source, CapacitySource::Default);
    }

    #[test]
    fn bin_resolution_ignores_rack_rules() {
        let resolved = book().resolve_for_location(&LocationCode::parse("P6-A-02"), BIN_DEFAULT_MAX_CARTONS);
        assert_eq!(resolved.max_cartons, 0);
        assert_eq!(resolved.source, CapacitySource::Default);
        assert!(!resolved.is_override());
    }
}
