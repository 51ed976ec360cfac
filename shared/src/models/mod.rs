//! Domain models for the Warehouse Inventory Platform

mod capacity;
mod labels;
mod location;
mod occupancy;
mod product;
mod purchase;
mod report;
mod upload;

pub use capacity::*;
pub use labels::*;
pub use location::*;
pub use occupancy::*;
pub use product::*;
pub use purchase::*;
pub use report::*;
pub use upload::*;
