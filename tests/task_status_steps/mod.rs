//! Step definitions for task status scenarios.

pub mod world;

mod given;
mod then;
mod when;
