//! Inventory domain module.
//!
//! This crate contains the catalog/ledger business rules, implemented as
//! synchronous in-memory logic (no IO, no HTTP, no storage).

pub mod item;
pub mod manager;
pub mod record;

pub use item::Item;
pub use manager::{InventoryManager, Summary, DEFAULT_ITEMS};
pub use record::CheckoutRecord;
