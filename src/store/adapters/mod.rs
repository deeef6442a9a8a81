//! Entity store adapter implementations.

pub mod memory;
