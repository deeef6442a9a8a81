//! Entity store: the single authoritative home of every domain record.
//!
//! - Port contract in [`ports`]
//! - In-memory adapter in [`adapters`]
//! - Demo seed data in [`fixtures`]

pub mod adapters;
pub mod fixtures;
pub mod ports;

#[cfg(test)]
mod tests;
