//! Task lifecycle management.
//!
//! Creating tasks inside projects, moving them between board columns,
//! applying partial field updates and evaluating deadlines. Project totals
//! are never stored on the project; they are derived from the tasks by the
//! project aggregator.
//!
//! - Domain types in [`domain`]
//! - Orchestration services in [`services`]

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
