//! Shared types and rules for the Warehouse Inventory Platform
//!
//! This crate holds everything that can be computed without the data store:
//! carton conversion, capacity resolution, occupancy classification, report
//! aggregation and the CSV normalization used by the upload endpoints.

pub mod csv_table;
pub mod error;
pub mod models;
pub mod types;
pub mod validation;

pub use error::*;
pub use models::*;
pub use types::*;
pub use validation::*;
