//! Warehouse upload tests
//!
//! Tests for normalizing the product master and location stock files

use proptest::prelude::*;
use shared::{parse_location_csv, parse_product_csv, parse_units, DomainError};

const PRODUCT_HEADER: &str =
    " SKU , Product Name,CATEGORY,Hidden Carton Qty,Hidden Barcode Unit,Hidden Barcode Carton,Hidden Barcode Outer\n";

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Test product headers are matched case-insensitively
    #[test]
    fn test_product_headers_normalized() {
        let csv = format!("{PRODUCT_HEADER}A1,Anchor,Fixings,10,111,222.0,333\n");
        let products = parse_product_csv(csv.as_bytes()).unwrap();

        assert_eq!(products.len(), 1);
        assert_eq!(products[0].units_per_carton, 10);
        assert_eq!(products[0].carton_barcode.as_deref(), Some("222.0"));
        assert_eq!(products[0].brand, None);
    }

    /// Test a missing product column names the column
    #[test]
    fn test_product_missing_column() {
        let csv = "sku,product name,category,hidden carton qty\nA1,Anchor,Fixings,10\n";
        let err = parse_product_csv(csv.as_bytes()).unwrap_err();

        assert!(matches!(
            err,
            DomainError::MissingColumn { ref column, .. } if column == "hidden barcode unit"
        ));
    }

    /// Test SKU and quantity lists pair up positionally
    #[test]
    fn test_location_lists_zip() {
        let csv = "Location,SKU(s),QTY\n p2-a-01 ,A1 B2,10 20.0\n";
        let import = parse_location_csv(csv.as_bytes()).unwrap();

        assert_eq!(import.rows.len(), 2);
        assert_eq!(import.rows[0].location_code, "P2-A-01");
        assert_eq!(import.rows[0].sku, "A1");
        assert_eq!(import.rows[0].units, 10);
        assert_eq!(import.rows[1].sku, "B2");
        assert_eq!(import.rows[1].units, 20);
        assert_eq!(import.skipped, 0);
    }

    /// Test unusable rows are counted as skipped
    #[test]
    fn test_location_rows_skipped() {
        let csv = "Location,SKU(s),QTY\nP2-A-01,-,5\nP2-A-02,nan,5\nP2-A-03,A1 B2,5\nP2-A-04,,5\nP2-A-05,C3,-\n";
        let import = parse_location_csv(csv.as_bytes()).unwrap();

        assert_eq!(import.skipped, 4);
        assert_eq!(import.rows.len(), 1);
        assert_eq!(import.rows[0].sku, "C3");
        assert_eq!(import.rows[0].units, 0);
    }

    /// Test the location file needs all three columns
    #[test]
    fn test_location_missing_column() {
        let err = parse_location_csv(b"Location,SKU(s)\nP2-A-01,A1\n").unwrap_err();
        assert_eq!(
            err,
            DomainError::MissingColumn {
                file: "location".to_string(),
                column: "QTY".to_string(),
            }
        );
    }

    /// Test a UTF-8 byte order mark does not hide the first header
    #[test]
    fn test_location_with_bom() {
        let csv = b"\xEF\xBB\xBFLocation,SKU(s),QTY\nQ1-B-01,A1,3\n";
        let import = parse_location_csv(csv).unwrap();
        assert_eq!(import.rows.len(), 1);
    }
}

// ============================================================================
// Property Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    proptest! {
        /// Integers parse to themselves
        #[test]
        fn prop_units_integer_roundtrip(units in 0i64..10_000_000) {
            prop_assert_eq!(parse_units(&units.to_string()), units);
            prop_assert_eq!(parse_units(&format!("{units}.0")), units);
        }

        /// Non-numeric text is zero
        #[test]
        fn prop_units_garbage_is_zero(text in "[a-zA-Z]{1,12}") {
            prop_assert_eq!(parse_units(&text), 0);
        }
    }
}
