//! PO label tests
//!
//! Tests for carton label counts on purchase-order receiving

use proptest::prelude::*;
use shared::{
    build_label_line, clean_barcode, labels_required, parse_po_csv, DomainError, LabelProduct,
    MANUAL_MAPPING_REQUIRED,
};

fn product(sku: &str, ratio: Option<i32>, barcode: Option<&str>) -> LabelProduct {
    LabelProduct {
        sku: sku.to_string(),
        product_name: format!("Product {sku}"),
        units_per_carton: ratio,
        carton_barcode: barcode.map(str::to_string),
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Test PO files with spaced headers and thousands separators
    #[test]
    fn test_parse_po_csv() {
        let csv = "SKU,Description,Qty Outstanding\nA1,Anchor,\"1,400\"\nB2,Bolt,abc\n";
        let lines = parse_po_csv(csv.as_bytes()).unwrap();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].row, 1);
        assert_eq!(lines[0].qty_outstanding, 1400);
        assert_eq!(lines[1].row, 2);
        assert_eq!(lines[1].qty_outstanding, 0);
    }

    /// Test the alternative header spellings
    #[test]
    fn test_alternative_headers() {
        let csv = "SKUs,OUTSTANDING_QTY\nA1,12\n";
        let lines = parse_po_csv(csv.as_bytes()).unwrap();
        assert_eq!(lines[0].sku, "A1");
        assert_eq!(lines[0].qty_outstanding, 12);
    }

    /// Test missing columns report what was found
    #[test]
    fn test_missing_columns_lists_headers() {
        let err = parse_po_csv(b"Item,Qty\nA1,3\n").unwrap_err();
        match err {
            DomainError::MissingColumns { columns_found, .. } => {
                assert_eq!(columns_found, vec!["item".to_string(), "qty".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    /// Test a known SKU gets one label per started carton
    #[test]
    fn test_known_sku_labels() {
        let lines = parse_po_csv(b"sku,qtyoutstanding\nA1,25\n").unwrap();
        let line = build_label_line(&lines[0], Some(&product("A1", Some(12), Some("9300000000017.0"))));

        assert_eq!(line.labels_required, 3);
        assert_eq!(line.carton_barcode.as_deref(), Some("9300000000017"));
        assert_eq!(line.matched_sku.as_deref(), Some("A1"));
        assert!(!line.needs_user_input);
    }

    /// Test the largest outstanding quantity still yields a ceiling count
    #[test]
    fn test_labels_for_largest_quantity() {
        assert_eq!(labels_required(i64::MAX, Some(10)), 922_337_203_685_477_581);
        assert_eq!(labels_required(i64::MAX, Some(1)), i64::MAX);
        assert_eq!(labels_required(i64::MIN, Some(10)), 0);
    }

    /// Test a known SKU without a ratio needs no labels
    #[test]
    fn test_known_sku_without_ratio() {
        let lines = parse_po_csv(b"sku,qtyoutstanding\nA1,25\n").unwrap();
        let line = build_label_line(&lines[0], Some(&product("A1", None, None)));

        assert_eq!(line.labels_required, 0);
        assert_eq!(line.units_per_carton, Some(0));
    }

    /// Test unknown SKUs are flagged for manual mapping
    #[test]
    fn test_unknown_sku_needs_mapping() {
        let lines = parse_po_csv(b"sku,qtyoutstanding\nZZ9,7\n").unwrap();
        let line = build_label_line(&lines[0], None);

        assert_eq!(line.product_name, MANUAL_MAPPING_REQUIRED);
        assert_eq!(line.labels_required, 7);
        assert!(line.needs_user_input);
        assert_eq!(line.matched_sku, None);
    }

    /// Test only a trailing `.0` is removed from barcodes
    #[test]
    fn test_clean_barcode() {
        assert_eq!(clean_barcode(Some("123.0")).as_deref(), Some("123"));
        assert_eq!(clean_barcode(Some("12.05")).as_deref(), Some("12.05"));
        assert_eq!(clean_barcode(None), None);
    }
}

// ============================================================================
// Property Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    proptest! {
        /// Labels cover the quantity without a spare carton
        #[test]
        fn prop_labels_are_ceiling(qty in 0i64..1_000_000, ratio in 1i32..500) {
            let labels = labels_required(qty, Some(ratio));
            let ratio = i64::from(ratio);

            prop_assert!(labels * ratio >= qty);
            prop_assert!(labels == 0 || (labels - 1) * ratio < qty);
        }
    }
}
