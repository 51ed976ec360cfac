//! In-memory CSV tables for uploaded files

use crate::error::{DomainError, DomainResult};

/// A parsed CSV file with normalized headers
#[derive(Debug, Clone, Default)]
pub struct CsvTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

/// Borrowed view of a single record
#[derive(Debug, Clone, Copy)]
pub struct CsvRow<'a> {
    cells: &'a [String],
}

impl<'a> CsvRow<'a> {
    /// Trimmed cell value, empty when the record is short
    pub fn get(&self, index: usize) -> &'a str {
        self.cells.get(index).map(|c| c.trim()).unwrap_or("")
    }

    /// Cell value or `None` when blank
    pub fn non_empty(&self, index: usize) -> Option<&'a str> {
        let value = self.get(index);
        (!value.is_empty()).then_some(value)
    }
}

impl CsvTable {
    /// Parse raw upload bytes, mapping each header through `normalize`
    pub fn from_bytes<F>(bytes: &[u8], normalize: F) -> DomainResult<Self>
    where
        F: Fn(&str) -> String,
    {
        let text = decode_text(bytes);
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers = reader.headers()?.iter().map(|h| normalize(h)).collect();
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            if record.iter().all(|cell| cell.trim().is_empty()) {
                continue;
            }
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Index of the first header matching any of `names`
    pub fn column_any(&self, names: &[&str]) -> Option<usize> {
        names.iter().find_map(|name| self.column(name))
    }

    pub fn require(&self, file: &str, name: &str) -> DomainResult<usize> {
        self.column(name).ok_or_else(|| DomainError::MissingColumn {
            file: file.to_string(),
            column: name.to_string(),
        })
    }

    pub fn rows(&self) -> impl Iterator<Item = CsvRow<'_>> {
        self.rows.iter().map(|cells| CsvRow { cells })
    }
}

/// Decode as UTF-8, falling back to Latin-1 for legacy exports
pub fn decode_text(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => bytes.iter().map(|&b| char::from(b)).collect(),
    }
}

/// Trim and lowercase
pub fn lowercase_header(header: &str) -> String {
    header.trim().to_lowercase()
}

/// Trim only
pub fn trimmed_header(header: &str) -> String {
    header.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_headers_and_skips_blank_lines() {
        let table = CsvTable::from_bytes(b" SKU ,Product Name\nA1,Anchor\n,\nB2,Bolt\n", lowercase_header)
            .unwrap();
        assert_eq!(table.headers(), ["sku", "product name"]);
        assert_eq!(table.rows().count(), 2);
        let second = table.rows().nth(1).unwrap();
        assert_eq!(second.get(0), "B2");
        assert_eq!(second.get(5), "");
    }

    #[test]
    fn latin1_fallback() {
        let text = decode_text(b"caf\xE9");
        assert_eq!(text, "café");
    }

    #[test]
    fn strips_byte_order_mark() {
        let table = CsvTable::from_bytes(b"\xEF\xBB\xBFsku\nA\n", lowercase_header).unwrap();
        assert_eq!(table.column("sku"), Some(0));
    }

    #[test]
    fn missing_column_names_file() {
        let table = CsvTable::from_bytes(b"sku\nA\n", lowercase_header).unwrap();
        let err = table.require("product", "category").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing required column in product file: category"
        );
    }
}
