//! Business logic services for the Pharmaceutical Inventory Dashboard

pub mod alert;
pub mod csv_import;
pub mod inventory;
pub mod uploads;

pub use alert::AlertService;
pub use inventory::InventoryService;
pub use uploads::UploadService;
