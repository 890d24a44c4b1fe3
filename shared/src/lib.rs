//! Shared types and models for the Pharmaceutical Inventory Dashboard
//!
//! This crate contains the inventory core shared between the backend, the
//! browser dashboard (via WASM), and other components of the system. Every
//! function here is a pure computation over an in-memory record snapshot.

pub mod models;
pub mod quantity;
pub mod seed;
pub mod types;
pub mod validation;

pub use models::*;
pub use quantity::*;
pub use types::*;
pub use validation::*;
