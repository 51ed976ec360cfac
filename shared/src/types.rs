//! Common request and response types used across the platform

use serde::{Deserialize, Serialize};

/// Query filters accepted by the optimizer view
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct OptimizerFilter {
    /// Aisle letter, e.g. `P`
    pub aisle: Option<String>,
    /// Case-insensitive substring of the product category
    pub category: Option<String>,
    /// Case-insensitive substring of the brand
    pub brand: Option<String>,
    /// Case-insensitive substring of the SKU or product name
    pub search: Option<String>,
}

impl OptimizerFilter {
    /// Drop blank values and upper-case the aisle letter
    pub fn normalized(self) -> Self {
        fn clean(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        Self {
            aisle: clean(self.aisle).map(|a| a.to_uppercase()),
            category: clean(self.category),
            brand: clean(self.brand),
            search: clean(self.search),
        }
    }

    /// `ILIKE` pattern for a substring match
    pub fn like_pattern(value: &Option<String>) -> Option<String> {
        value.as_ref().map(|v| format!("%{}%", v))
    }
}

/// Distinct values offered as optimizer filters
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilterOptions {
    pub categories: Vec<String>,
    pub brands: Vec<String>,
}

/// Plain `{"status": ...}` body for liveness checks
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusMessage {
    pub status: String,
}

impl StatusMessage {
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
        }
    }
}

/// Recognized aisle letters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AisleList {
    pub aisles: Vec<String>,
}
