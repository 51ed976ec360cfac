//! Purchase reorder recommendations from sales history, stock and supplier terms

use std::collections::HashMap;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::csv_table::{trimmed_header, CsvTable};
use crate::error::{DomainError, DomainResult};

/// Days of cover reported for SKUs with no sales
pub const NO_SALES_DAYS_COVER: i64 = 999;

const SALES_COLUMNS: [&str; 3] = ["date", "sku", "qty_sold"];
const STOCK_COLUMNS: [&str; 2] = ["sku", "current_stock"];
const SUPPLIER_COLUMNS: [&str; 5] = ["sku", "lead_time_days", "moq", "unit_cost", "safety_stock"];

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d/%m/%Y"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalesRecord {
    pub date: NaiveDate,
    pub sku: String,
    pub qty_sold: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockRecord {
    pub sku: String,
    pub current_stock: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupplierTerms {
    pub lead_time_days: Decimal,
    pub moq: Decimal,
    pub unit_cost: Decimal,
    pub safety_stock: Decimal,
}

/// Urgency of a reorder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReorderStatus {
    Urgent,
    OrderSoon,
    Safe,
}

/// Recommendation for one SKU of the stock file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReorderRecommendation {
    pub sku: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub avg_daily_sales: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub current_stock: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub days_cover: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub reorder_point: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub suggested_order: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub capital_required: Decimal,
    pub status: ReorderStatus,
}

/// Numbers that fail to parse count as zero
pub fn parse_decimal(raw: &str) -> Decimal {
    let value = raw.trim().replace(',', "");
    Decimal::from_str(&value)
        .or_else(|_| Decimal::from_scientific(&value))
        .unwrap_or(Decimal::ZERO)
}

pub fn parse_sales_date(raw: &str) -> Option<NaiveDate> {
    let value = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
                .map(|dt| dt.date())
        })
}

fn require_all(table: &CsvTable, file: &str, columns: &[&str]) -> DomainResult<Vec<usize>> {
    columns.iter().map(|c| table.require(file, c)).collect()
}

/// Sales rows with unparseable dates are dropped
pub fn parse_sales_csv(bytes: &[u8]) -> DomainResult<Vec<SalesRecord>> {
    let table = CsvTable::from_bytes(bytes, trimmed_header)?;
    let cols = require_all(&table, "sales", &SALES_COLUMNS)?;

    Ok(table
        .rows()
        .filter_map(|row| {
            Some(SalesRecord {
                date: parse_sales_date(row.get(cols[0]))?,
                sku: row.get(cols[1]).to_string(),
                qty_sold: parse_decimal(row.get(cols[2])),
            })
        })
        .collect())
}

pub fn parse_stock_csv(bytes: &[u8]) -> DomainResult<Vec<StockRecord>> {
    let table = CsvTable::from_bytes(bytes, trimmed_header)?;
    let cols = require_all(&table, "stock", &STOCK_COLUMNS)?;

    Ok(table
        .rows()
        .map(|row| StockRecord {
            sku: row.get(cols[0]).to_string(),
            current_stock: parse_decimal(row.get(cols[1])),
        })
        .collect())
}

/// Supplier terms keyed by SKU; the first row for a SKU wins
pub fn parse_supplier_csv(bytes: &[u8]) -> DomainResult<HashMap<String, SupplierTerms>> {
    let table = CsvTable::from_bytes(bytes, trimmed_header)?;
    let cols = require_all(&table, "supplier", &SUPPLIER_COLUMNS)?;

    let mut terms = HashMap::new();
    for row in table.rows() {
        terms
            .entry(row.get(cols[0]).to_string())
            .or_insert_with(|| SupplierTerms {
                lead_time_days: parse_decimal(row.get(cols[1])),
                moq: parse_decimal(row.get(cols[2])),
                unit_cost: parse_decimal(row.get(cols[3])),
                safety_stock: parse_decimal(row.get(cols[4])),
            });
    }
    Ok(terms)
}

/// Average daily units sold per SKU over the span of the sales history
pub fn average_daily_sales(sales: &[SalesRecord]) -> DomainResult<HashMap<String, Decimal>> {
    let (Some(first), Some(last)) = (
        sales.iter().map(|s| s.date).min(),
        sales.iter().map(|s| s.date).max(),
    ) else {
        return Err(DomainError::EmptyData("Sales".to_string()));
    };
    let total_days = Decimal::from((last - first).num_days().max(0) + 1);

    let mut totals: HashMap<String, Decimal> = HashMap::new();
    for record in sales {
        let total = totals.entry(record.sku.clone()).or_default();
        *total = total
            .checked_add(record.qty_sold)
            .ok_or_else(|| overflow(&format!("Total sales for SKU {}", record.sku)))?;
    }
    for total in totals.values_mut() {
        *total /= total_days;
    }
    Ok(totals)
}

pub fn classify_reorder(current_stock: Decimal, reorder_point: Decimal) -> ReorderStatus {
    if current_stock <= reorder_point * Decimal::new(7, 1) {
        ReorderStatus::Urgent
    } else if current_stock <= reorder_point {
        ReorderStatus::OrderSoon
    } else {
        ReorderStatus::Safe
    }
}

fn overflow(what: &str) -> DomainError {
    DomainError::ArithmeticOverflow(what.to_string())
}

/// Recommendation for a single SKU
///
/// Fails with `ArithmeticOverflow` when the reorder point or the capital
/// required does not fit in a `Decimal`.
pub fn recommend(
    stock: &StockRecord,
    avg_daily_sales: Decimal,
    terms: &SupplierTerms,
) -> DomainResult<ReorderRecommendation> {
    let current_stock = stock.current_stock;

    let days_cover = if avg_daily_sales > Decimal::ZERO {
        current_stock
            .checked_div(avg_daily_sales)
            .unwrap_or(Decimal::ZERO)
    } else {
        Decimal::from(NO_SALES_DAYS_COVER)
    };

    let reorder_point = avg_daily_sales
        .checked_mul(terms.lead_time_days)
        .and_then(|demand| demand.checked_add(terms.safety_stock))
        .ok_or_else(|| overflow(&format!("Reorder point for SKU {}", stock.sku)))?;
    let shortfall = reorder_point
        .checked_sub(current_stock)
        .ok_or_else(|| overflow(&format!("Shortfall for SKU {}", stock.sku)))?
        .max(Decimal::ZERO);
    let suggested_order = if shortfall > Decimal::ZERO {
        terms.moq.max(shortfall)
    } else {
        Decimal::ZERO
    };

    let capital_required = suggested_order
        .checked_mul(terms.unit_cost)
        .ok_or_else(|| overflow(&format!("Capital required for SKU {}", stock.sku)))?;

    Ok(ReorderRecommendation {
        sku: stock.sku.clone(),
        avg_daily_sales,
        current_stock,
        days_cover,
        reorder_point,
        suggested_order,
        capital_required,
        status: classify_reorder(current_stock, reorder_point),
    })
}

/// One recommendation per stock row, in stock-file order
pub fn analyze_reorders(
    sales: &[SalesRecord],
    stock: &[StockRecord],
    suppliers: &HashMap<String, SupplierTerms>,
) -> DomainResult<Vec<ReorderRecommendation>> {
    let averages = average_daily_sales(sales)?;
    let no_terms = SupplierTerms::default();

    stock
        .iter()
        .map(|record| {
            let avg = averages.get(&record.sku).copied().unwrap_or(Decimal::ZERO);
            let terms = suppliers.get(&record.sku).unwrap_or(&no_terms);
            recommend(record, avg, terms)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sale(date: &str, sku: &str, qty: i64) -> SalesRecord {
        SalesRecord {
            date: parse_sales_date(date).unwrap(),
            sku: sku.to_string(),
            qty_sold: Decimal::from(qty),
        }
    }

    #[test]
    fn parses_common_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 5);
        assert_eq!(parse_sales_date("2024-03-05"), expected);
        assert_eq!(parse_sales_date("2024/03/05"), expected);
        assert_eq!(parse_sales_date("03/05/2024"), expected);
        assert_eq!(parse_sales_date("2024-03-05 10:00:00"), expected);
        assert_eq!(parse_sales_date("yesterday"), None);
    }

    #[test]
    fn average_uses_inclusive_day_span() {
        let sales = vec![sale("2024-01-01", "A", 10), sale("2024-01-10", "A", 10)];
        let averages = average_daily_sales(&sales).unwrap();
        assert_eq!(averages["A"], dec("2"));
    }

    #[test]
    fn empty_sales_is_rejected() {
        assert_eq!(
            average_daily_sales(&[]).unwrap_err(),
            DomainError::EmptyData("Sales".to_string())
        );
    }

    #[test]
    fn moq_lifts_small_orders() {
        let stock = StockRecord {
            sku: "A".to_string(),
            current_stock: dec("10"),
        };
        let terms = SupplierTerms {
            lead_time_days: dec("5"),
            moq: dec("50"),
            unit_cost: dec("2.5"),
            safety_stock: dec("10"),
        };
        let rec = recommend(&stock, dec("2"), &terms).unwrap();
        assert_eq!(rec.reorder_point, dec("20"));
        assert_eq!(rec.suggested_order, dec("50"));
        assert_eq!(rec.capital_required, dec("125"));
        assert_eq!(rec.days_cover, dec("5"));
        assert_eq!(rec.status, ReorderStatus::Urgent);
    }

    #[test]
    fn no_sales_means_long_cover() {
        let stock = StockRecord {
            sku: "A".to_string(),
            current_stock: dec("10"),
        };
        let rec = recommend(&stock, Decimal::ZERO, &SupplierTerms::default()).unwrap();
        assert_eq!(rec.days_cover, Decimal::from(NO_SALES_DAYS_COVER));
        assert_eq!(rec.suggested_order, Decimal::ZERO);
        assert_eq!(rec.status, ReorderStatus::Safe);
    }

    #[test]
    fn oversized_reorder_point_is_an_error() {
        let stock = StockRecord {
            sku: "A".to_string(),
            current_stock: Decimal::ZERO,
        };
        let terms = SupplierTerms {
            lead_time_days: dec("2"),
            ..SupplierTerms::default()
        };
        assert!(matches!(
            recommend(&stock, Decimal::MAX, &terms),
            Err(DomainError::ArithmeticOverflow(_))
        ));
    }

    #[test]
    fn status_bands() {
        assert_eq!(classify_reorder(dec("70"), dec("100")), ReorderStatus::Urgent);
        assert_eq!(classify_reorder(dec("71"), dec("100")), ReorderStatus::OrderSoon);
        assert_eq!(classify_reorder(dec("100"), dec("100")), ReorderStatus::OrderSoon);
        assert_eq!(classify_reorder(dec("101"), dec("100")), ReorderStatus::Safe);
    }

    #[test]
    fn analysis_follows_stock_file() {
        let sales = parse_sales_csv(b"date,sku,qty_sold\n2024-01-01,A,30\nbad,A,99\n2024-01-03,B,3\n").unwrap();
        let stock = parse_stock_csv(b"sku,current_stock\nB,100\nA,5\nC,\n").unwrap();
        let suppliers = parse_supplier_csv(
            b"sku,lead_time_days,moq,unit_cost,safety_stock\nA,7,20,1.5,5\n",
        )
        .unwrap();

        let recs = analyze_reorders(&sales, &stock, &suppliers).unwrap();
        assert_eq!(recs.len(), 3);
        assert_eq!(recs[0].sku, "B");
        assert_eq!(recs[0].avg_daily_sales, dec("1"));
        assert_eq!(recs[1].avg_daily_sales, dec("10"));
        assert_eq!(recs[1].reorder_point, dec("75"));
        assert_eq!(recs[1].suggested_order, dec("70"));
        assert_eq!(recs[2].current_stock, Decimal::ZERO);
    }
}
