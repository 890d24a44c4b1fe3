//! Domain models for the Pharmaceutical Inventory Dashboard

mod aggregate;
mod dashboard;
mod expiry;
mod minimum_stock;
mod record;
mod reorder;

pub use aggregate::*;
pub use dashboard::*;
pub use expiry::*;
pub use minimum_stock::*;
pub use record::*;
pub use reorder::*;
