//! HTTP handlers for the warehouse API

pub mod bins;
pub mod health;
pub mod locations;
pub mod optimizer;
pub mod po_labels;
pub mod products;
pub mod purchase;
pub mod uploads;

pub use bins::*;
pub use health::*;
pub use locations::*;
pub use optimizer::*;
pub use po_labels::*;
pub use products::*;
pub use purchase::*;
pub use uploads::*;
