//! Business logic services for the Warehouse Inventory Platform

pub mod capacity;
pub mod inventory;
pub mod labels;
pub mod product;
pub mod purchase;
pub mod reporting;
pub mod upload;

pub use capacity::CapacityService;
pub use inventory::InventoryService;
pub use labels::LabelService;
pub use product::ProductService;
pub use purchase::PurchaseService;
pub use reporting::ReportingService;
pub use upload::UploadService;
