//! `tracker-core`: shared building blocks for the classroom item tracker.
//!
//! This crate contains **pure domain** primitives (no IO, no HTTP).

pub mod entity;
pub mod error;

pub use entity::Entity;
pub use error::{InventoryError, InventoryResult};
