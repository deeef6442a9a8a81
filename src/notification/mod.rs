//! Advisory notifications derived from lifecycle events.
//!
//! - Domain types in [`domain`]
//! - Deriver and inbox services in [`services`]

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
