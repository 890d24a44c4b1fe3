//! HTTP handlers for the Pharmaceutical Inventory Dashboard

pub mod health;
pub mod inventory;
pub mod relay;

pub use health::{health_check, root};
pub use inventory::{
    get_categories, get_expiry, get_product, get_reorder_plan, get_stats, list_products,
    list_records, replace_records,
};
pub use relay::{process_inventory, send_email, upload_files};
