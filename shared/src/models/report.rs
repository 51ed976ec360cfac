//! Bin status and location optimizer read models
//!
//! Both views group per-(location, SKU) stock facts by upper-cased location
//! code. Carton counts are floored per item before they are summed.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{
    cartons_for_units, classify_bin_status, has_carton_ratio, AisleSet, BinStatus, CapacityBook,
    LocationCode, Occupancy, Side, BIN_DEFAULT_MAX_CARTONS, MERGE_THRESHOLD_PERCENT,
    OPTIMIZER_DEFAULT_MAX_CARTONS,
};

/// One stocked SKU at one location, joined with its product data
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StockFact {
    pub location_code: String,
    pub sku: String,
    pub product_name: String,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub units: i64,
    pub units_per_carton: Option<i32>,
}

impl StockFact {
    pub fn cartons(&self) -> i64 {
        cartons_for_units(self.units, self.units_per_carton)
    }

    /// Rows the optimizer considers: positive stock with known packaging
    pub fn is_stocked(&self) -> bool {
        self.units > 0 && has_carton_ratio(self.units_per_carton)
    }
}

/// Per-SKU line inside a location summary
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocationItem {
    pub sku: String,
    pub product_name: String,
    pub cartons: i64,
}

impl From<&StockFact> for LocationItem {
    fn from(fact: &StockFact) -> Self {
        Self {
            sku: fact.sku.clone(),
            product_name: fact.product_name.clone(),
            cartons: fact.cartons(),
        }
    }
}

/// A row of the bin status view
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BinStatusRow {
    pub location_code: String,
    pub aisle: String,
    pub side: Side,
    pub total_cartons: i64,
    pub max_cartons: i32,
    pub status: BinStatus,
    pub items: Vec<LocationItem>,
}

/// A row of the location optimizer view
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OptimizerLocation {
    pub location_code: String,
    pub aisle: String,
    pub rack_type: String,
    pub total_cartons: i64,
    pub max_cartons: i32,
    #[serde(with = "rust_decimal::serde::float")]
    pub occupancy_percent: Decimal,
    pub is_mixed: bool,
    pub needs_merge: bool,
    pub items: Vec<LocationItem>,
}

/// Tunables shared by both views
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSettings {
    pub aisles: AisleSet,
    pub optimizer_default_max_cartons: i32,
    pub bin_default_max_cartons: i32,
    pub merge_threshold_percent: Decimal,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            aisles: AisleSet::default(),
            optimizer_default_max_cartons: OPTIMIZER_DEFAULT_MAX_CARTONS,
            bin_default_max_cartons: BIN_DEFAULT_MAX_CARTONS,
            merge_threshold_percent: Decimal::from(MERGE_THRESHOLD_PERCENT),
        }
    }
}

/// Group facts in recognized aisles by normalized location code.
///
/// The map keeps locations ordered; members keep their input order.
fn group_by_location<'a, I>(facts: I, aisles: &AisleSet) -> BTreeMap<LocationCode, Vec<&'a StockFact>>
where
    I: IntoIterator<Item = &'a StockFact>,
{
    let mut groups: BTreeMap<LocationCode, Vec<&StockFact>> = BTreeMap::new();
    for fact in facts {
        let code = LocationCode::parse(&fact.location_code);
        if aisles.covers(&code) {
            groups.entry(code).or_default().push(fact);
        }
    }
    groups
}

/// Orders facts that share a sort key, so that case variants of one
/// location code merge the same way whatever order the rows arrive in.
fn tie_break(a: &StockFact, b: &StockFact) -> Ordering {
    a.location_code
        .cmp(&b.location_code)
        .then_with(|| a.units.cmp(&b.units))
        .then_with(|| a.units_per_carton.cmp(&b.units_per_carton))
        .then_with(|| a.product_name.cmp(&b.product_name))
        .then_with(|| a.brand.cmp(&b.brand))
        .then_with(|| a.category.cmp(&b.category))
}

/// Build the bin status view: one row per location in a recognized aisle.
///
/// Items are ordered by product name, then SKU, then the raw row fields.
pub fn build_bin_status_view(
    facts: &[StockFact],
    capacities: &CapacityBook,
    settings: &ReportSettings,
) -> Vec<BinStatusRow> {
    group_by_location(facts, &settings.aisles)
        .into_iter()
        .map(|(code, mut members)| {
            members.sort_by(|a, b| {
                a.product_name
                    .cmp(&b.product_name)
                    .then_with(|| a.sku.cmp(&b.sku))
                    .then_with(|| tie_break(a, b))
            });

            let items: Vec<LocationItem> = members.iter().map(|f| LocationItem::from(*f)).collect();
            let total_cartons = items.iter().map(|i| i.cartons).sum();
            let capacity = capacities.resolve_for_location(&code, settings.bin_default_max_cartons);

            BinStatusRow {
                aisle: code.aisle().to_string(),
                side: code.side(),
                total_cartons,
                max_cartons: capacity.max_cartons,
                status: classify_bin_status(total_cartons, &capacity),
                items,
                location_code: code.as_str().to_string(),
            }
        })
        .collect()
}

/// Build the optimizer view from (possibly filtered) facts.
///
/// `sku_counts` holds the distinct SKU count per upper-cased location over
/// the unfiltered stock table, so filters never change `is_mixed`.
///
/// Members are ordered by SKU, then the raw row fields. When rack rules give different capacities to
/// SKUs in one location, the first member's capacity represents the
/// location.
pub fn build_optimizer_view(
    facts: &[StockFact],
    capacities: &CapacityBook,
    sku_counts: &HashMap<String, i64>,
    settings: &ReportSettings,
) -> Vec<OptimizerLocation> {
    let stocked = facts.iter().filter(|fact| fact.is_stocked());

    group_by_location(stocked, &settings.aisles)
        .into_iter()
        .filter_map(|(code, mut members)| {
            members.sort_by(|a, b| a.sku.cmp(&b.sku).then_with(|| tie_break(a, b)));
            let first = members.first()?;

            let capacity = capacities.resolve_for_item(
                &code,
                &first.sku,
                settings.optimizer_default_max_cartons,
            );
            let items: Vec<LocationItem> = members.iter().map(|f| LocationItem::from(*f)).collect();
            let total_cartons = items.iter().map(|i| i.cartons).sum();
            let occupancy = Occupancy::compute(
                total_cartons,
                capacity.max_cartons,
                settings.merge_threshold_percent,
            );
            let distinct_skus = sku_counts.get(code.as_str()).copied().unwrap_or(0);

            Some(OptimizerLocation {
                aisle: code.aisle_letter().map(String::from).unwrap_or_default(),
                rack_type: code.rack_type().to_string(),
                total_cartons,
                max_cartons: capacity.max_cartons,
                occupancy_percent: occupancy.percent,
                is_mixed: distinct_skus > 1,
                needs_merge: occupancy.needs_merge,
                items,
                location_code: code.as_str().to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fact(location: &str, sku: &str, name: &str, units: i64, ratio: Option<i32>) -> StockFact {
        StockFact {
            location_code: location.to_string(),
            sku: sku.to_string(),
            product_name: name.to_string(),
            brand: None,
            category: None,
            units,
            units_per_carton: ratio,
        }
    }

    #[test]
    fn bin_view_groups_case_insensitively() {
        let facts = vec![
            fact("p2-a-01", "B", "Bolts", 50, Some(10)),
            fact("P2-A-01", "A", "Anchors", 35, Some(10)),
        ];
        let rows = build_bin_status_view(&facts, &CapacityBook::default(), &ReportSettings::default());
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.location_code, "P2-A-01");
        assert_eq!(row.total_cartons, 8);
        assert_eq!(row.items[0].product_name, "Anchors");
        assert_eq!(row.items[0].cartons, 3);
    }

    #[test]
    fn case_variant_rows_merge_in_a_fixed_order() {
        let forward = vec![
            fact("p2-a-01", "A", "Anchors", 10, Some(1)),
            fact("P2-A-01", "A", "Anchors", 50, Some(1)),
        ];
        let reversed: Vec<StockFact> = forward.iter().rev().cloned().collect();
        let settings = ReportSettings::default();
        let book = CapacityBook::default();

        let rows = build_bin_status_view(&forward, &book, &settings);
        assert_eq!(rows, build_bin_status_view(&reversed, &book, &settings));
        assert_eq!(rows[0].items[0].cartons, 50);
        assert_eq!(rows[0].items[1].cartons, 10);
    }

    #[test]
    fn bin_view_keeps_zero_stock_locations() {
        let facts = vec![fact("Q1-A-01", "A", "Anchors", 0, Some(10))];
        let rows = build_bin_status_view(&facts, &CapacityBook::default(), &ReportSettings::default());
        assert_eq!(rows[0].status, BinStatus::Empty);
        assert_eq!(rows[0].side, Side::Left);
    }

    #[test]
    fn optimizer_skips_unstocked_facts() {
        let facts = vec![
            fact("P2-A-01", "A", "Anchors", 0, Some(10)),
            fact("P4-A-01", "B", "Bolts", 40, None),
        ];
        let rows = build_optimizer_view(
            &facts,
            &CapacityBook::default(),
            &HashMap::new(),
            &ReportSettings::default(),
        );
        assert!(rows.is_empty());
    }

    #[test]
    fn optimizer_keeps_partial_carton_rows() {
        let facts = vec![fact("P2-A-01", "A", "Anchors", 5, Some(10))];
        let rows = build_optimizer_view(
            &facts,
            &CapacityBook::default(),
            &HashMap::new(),
            &ReportSettings::default(),
        );
        assert_eq!(rows[0].total_cartons, 0);
        assert_eq!(rows[0].occupancy_percent, Decimal::ZERO);
        assert!(rows[0].needs_merge);
    }

    #[test]
    fn settings_defaults_match_constants() {
        let settings = ReportSettings::default();
        assert_eq!(settings.optimizer_default_max_cartons, 42);
        assert_eq!(settings.bin_default_max_cartons, 0);
        assert_eq!(settings.merge_threshold_percent, Decimal::from(60));
    }
}
