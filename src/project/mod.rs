//! Projects, team members and discussions.
//!
//! - Domain types in [`domain`]
//! - Creation, aggregation and discussion services in [`services`]

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
