//! Port contracts for the entity store.

pub mod repository;

pub use repository::{Entity, EntityStore, StoreError, StoreResult};
