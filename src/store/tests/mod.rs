//! Unit tests for the entity store.
