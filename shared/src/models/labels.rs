//! Carton label counts for purchase-order receiving

use serde::{Deserialize, Serialize};

use crate::csv_table::CsvTable;
use crate::error::{DomainError, DomainResult};

/// Shown in place of a product name when the PO SKU is unknown
pub const MANUAL_MAPPING_REQUIRED: &str = "Manual mapping required";

const SKU_HEADERS: [&str; 2] = ["sku", "skus"];
const QTY_HEADERS: [&str; 2] = ["qtyoutstanding", "outstandingqty"];

/// One outstanding PO line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoLine {
    /// 1-based position in the file
    pub row: usize,
    pub sku: String,
    pub qty_outstanding: i64,
}

/// Product fields needed to size labels
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LabelProduct {
    pub sku: String,
    pub product_name: String,
    pub units_per_carton: Option<i32>,
    pub carton_barcode: Option<String>,
}

/// Label requirement for one PO line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LabelLine {
    pub row: usize,
    pub sku: String,
    pub matched_sku: Option<String>,
    pub product_name: String,
    pub qty_outstanding: i64,
    pub units_per_carton: Option<i32>,
    pub labels_required: i64,
    pub carton_barcode: Option<String>,
    pub needs_user_input: bool,
}

/// Response body for a label run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LabelReport {
    pub total_rows: usize,
    pub labels: Vec<LabelLine>,
}

/// `"Qty Outstanding"` and `"qty_outstanding"` both become `qtyoutstanding`
pub fn normalize_po_header(header: &str) -> String {
    header
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| *c != ' ' && *c != '_')
        .collect()
}

/// Quantities may carry thousands separators (`1,400`); anything else
/// unparseable counts as 0
pub fn parse_po_quantity(raw: &str) -> i64 {
    raw.replace(',', "").trim().parse().unwrap_or(0)
}

/// Spreadsheet exports turn barcodes into floats; drop the trailing `.0`
pub fn clean_barcode(raw: Option<&str>) -> Option<String> {
    raw.map(|value| {
        let value = value.trim();
        value.strip_suffix(".0").unwrap_or(value).to_string()
    })
}

/// One label per started carton
pub fn labels_required(qty_outstanding: i64, units_per_carton: Option<i32>) -> i64 {
    match units_per_carton {
        Some(ratio) if ratio > 0 => {
            let ratio = i64::from(ratio);
            let qty = qty_outstanding.max(0);
            qty / ratio + i64::from(qty % ratio != 0)
        }
        _ => 0,
    }
}

/// Read SKU and outstanding quantity columns from a PO export
pub fn parse_po_csv(bytes: &[u8]) -> DomainResult<Vec<PoLine>> {
    let table = CsvTable::from_bytes(bytes, normalize_po_header)?;

    let (Some(sku_col), Some(qty_col)) =
        (table.column_any(&SKU_HEADERS), table.column_any(&QTY_HEADERS))
    else {
        return Err(DomainError::MissingColumns {
            expected: "SKU and Qty Outstanding".to_string(),
            columns_found: table.headers().to_vec(),
        });
    };

    Ok(table
        .rows()
        .enumerate()
        .map(|(idx, row)| PoLine {
            row: idx + 1,
            sku: row.get(sku_col).to_string(),
            qty_outstanding: parse_po_quantity(row.get(qty_col)),
        })
        .collect())
}

/// Size labels for a PO line; unknown SKUs get one label per unit and are
/// flagged for manual mapping
pub fn build_label_line(line: &PoLine, product: Option<&LabelProduct>) -> LabelLine {
    match product {
        Some(product) => LabelLine {
            row: line.row,
            sku: line.sku.clone(),
            matched_sku: Some(product.sku.clone()),
            product_name: product.product_name.clone(),
            qty_outstanding: line.qty_outstanding,
            units_per_carton: Some(product.units_per_carton.unwrap_or(0)),
            labels_required: labels_required(line.qty_outstanding, product.units_per_carton),
            carton_barcode: clean_barcode(product.carton_barcode.as_deref()),
            needs_user_input: false,
        },
        None => LabelLine {
            row: line.row,
            sku: line.sku.clone(),
            matched_sku: None,
            product_name: MANUAL_MAPPING_REQUIRED.to_string(),
            qty_outstanding: line.qty_outstanding,
            units_per_carton: None,
            labels_required: line.qty_outstanding,
            carton_barcode: None,
            needs_user_input: true,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_lose_spaces_and_underscores() {
        assert_eq!(normalize_po_header(" Qty Outstanding "), "qtyoutstanding");
        assert_eq!(normalize_po_header("OUTSTANDING_QTY"), "outstandingqty");
    }

    #[test]
    fn quantities_accept_thousands_separators() {
        assert_eq!(parse_po_quantity("1,400"), 1400);
        assert_eq!(parse_po_quantity(" 700 "), 700);
        assert_eq!(parse_po_quantity("n/a"), 0);
    }

    #[test]
    fn label_count_rounds_up() {
        assert_eq!(labels_required(700, Some(24)), 30);
        assert_eq!(labels_required(720, Some(24)), 30);
        assert_eq!(labels_required(0, Some(24)), 0);
        assert_eq!(labels_required(700, None), 0);
    }

    #[test]
    fn barcode_float_suffix_removed() {
        assert_eq!(clean_barcode(Some("9300601234567.0")).as_deref(), Some("9300601234567"));
        assert_eq!(clean_barcode(Some("ABC")).as_deref(), Some("ABC"));
        assert_eq!(clean_barcode(None), None);
    }

    #[test]
    fn missing_columns_report_what_was_found() {
        let err = parse_po_csv(b"Item,Qty\nA,1\n").unwrap_err();
        match err {
            DomainError::MissingColumns { columns_found, .. } => {
                assert_eq!(columns_found, vec!["item", "qty"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unknown_sku_needs_manual_mapping() {
        let lines = parse_po_csv(b"SKU,Qty Outstanding\nZZ9,\"1,200\"\n").unwrap();
        let label = build_label_line(&lines[0], None);
        assert_eq!(label.row, 1);
        assert_eq!(label.labels_required, 1200);
        assert_eq!(label.product_name, MANUAL_MAPPING_REQUIRED);
        assert!(label.needs_user_input);
    }

    #[test]
    fn known_sku_uses_carton_ratio() {
        let product = LabelProduct {
            sku: "A1".to_string(),
            product_name: "Anchor".to_string(),
            units_per_carton: Some(50),
            carton_barcode: Some("12345.0".to_string()),
        };
        let line = PoLine {
            row: 3,
            sku: "A1".to_string(),
            qty_outstanding: 120,
        };
        let label = build_label_line(&line, Some(&product));
        assert_eq!(label.labels_required, 3);
        assert_eq!(label.carton_barcode.as_deref(), Some("12345"));
        assert_eq!(label.matched_sku.as_deref(), Some("A1"));
    }
}
