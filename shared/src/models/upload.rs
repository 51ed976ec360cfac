//! Normalization of the warehouse product and location-stock uploads

use serde::{Deserialize, Serialize};

use crate::csv_table::{lowercase_header, trimmed_header, CsvTable};
use crate::error::DomainResult;

/// Columns the product master file must carry
pub const REQUIRED_PRODUCT_COLUMNS: [&str; 7] = [
    "sku",
    "product name",
    "category",
    "hidden carton qty",
    "hidden barcode unit",
    "hidden barcode carton",
    "hidden barcode outer",
];

/// Columns the location stock file must carry
pub const REQUIRED_LOCATION_COLUMNS: [&str; 3] = ["Location", "SKU(s)", "QTY"];

/// A product row ready for upsert
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductImport {
    pub sku: String,
    pub product_name: String,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub units_per_carton: i32,
    pub unit_barcode: Option<String>,
    pub carton_barcode: Option<String>,
    pub outer_barcode: Option<String>,
}

/// A (location, SKU, units) row ready for upsert
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocationStockImport {
    pub location_code: String,
    pub sku: String,
    pub units: i64,
}

/// Rows kept and rows skipped while normalizing the location file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationImport {
    pub rows: Vec<LocationStockImport>,
    pub skipped: usize,
}

/// Totals reported back after a successful upload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UploadSummary {
    pub status: String,
    pub products_loaded: usize,
    pub locations_loaded: usize,
}

fn is_blank_marker(value: &str) -> bool {
    matches!(value, "" | "-" | "nan")
}

/// Lenient integer parsing for spreadsheet exports: `"12.0"` is 12, blanks,
/// dashes and garbage are 0.
pub fn parse_units(raw: &str) -> i64 {
    let value = raw.trim();
    if is_blank_marker(value) {
        return 0;
    }
    value
        .parse::<i64>()
        .ok()
        .or_else(|| {
            value
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .map(|f| f.trunc() as i64)
        })
        .unwrap_or(0)
}

/// Parse the product master file. Rows without SKU, name or carton quantity
/// are dropped and the first occurrence of a SKU wins.
pub fn parse_product_csv(bytes: &[u8]) -> DomainResult<Vec<ProductImport>> {
    let table = CsvTable::from_bytes(bytes, lowercase_header)?;

    let mut columns = [0usize; 7];
    for (slot, name) in columns.iter_mut().zip(REQUIRED_PRODUCT_COLUMNS) {
        *slot = table.require("product", name)?;
    }
    let [sku_col, name_col, category_col, qty_col, unit_col, carton_col, outer_col] = columns;
    let brand_col = table.column("brand");

    let mut seen = std::collections::HashSet::new();
    let mut products = Vec::new();

    for row in table.rows() {
        let (Some(sku), Some(product_name), Some(qty)) =
            (row.non_empty(sku_col), row.non_empty(name_col), row.non_empty(qty_col))
        else {
            continue;
        };
        if !seen.insert(sku.to_string()) {
            continue;
        }

        products.push(ProductImport {
            sku: sku.to_string(),
            product_name: product_name.to_string(),
            category: row.non_empty(category_col).map(str::to_string),
            brand: brand_col.and_then(|i| row.non_empty(i)).map(str::to_string),
            units_per_carton: i32::try_from(parse_units(qty)).unwrap_or(0),
            unit_barcode: row.non_empty(unit_col).map(str::to_string),
            carton_barcode: row.non_empty(carton_col).map(str::to_string),
            outer_barcode: row.non_empty(outer_col).map(str::to_string),
        });
    }

    Ok(products)
}

/// Parse the location stock file.
///
/// Each row lists whitespace-separated SKUs and quantities that pair up
/// positionally. Rows with no SKUs or mismatched list lengths are skipped.
pub fn parse_location_csv(bytes: &[u8]) -> DomainResult<LocationImport> {
    let table = CsvTable::from_bytes(bytes, trimmed_header)?;
    let location = table.require("location", REQUIRED_LOCATION_COLUMNS[0])?;
    let skus = table.require("location", REQUIRED_LOCATION_COLUMNS[1])?;
    let qtys = table.require("location", REQUIRED_LOCATION_COLUMNS[2])?;

    let mut import = LocationImport::default();

    for row in table.rows() {
        let location_code = row.get(location).to_uppercase();
        let skus_raw = row.get(skus);

        if is_blank_marker(skus_raw) || location_code.is_empty() {
            import.skipped += 1;
            continue;
        }

        let sku_list: Vec<&str> = skus_raw.split_whitespace().collect();
        let qty_list: Vec<&str> = row.get(qtys).split_whitespace().collect();
        if sku_list.len() != qty_list.len() {
            import.skipped += 1;
            continue;
        }

        import
            .rows
            .extend(sku_list.into_iter().zip(qty_list).map(|(sku, qty)| LocationStockImport {
                location_code: location_code.clone(),
                sku: sku.to_string(),
                units: parse_units(qty),
            }));
    }

    Ok(import)
}
