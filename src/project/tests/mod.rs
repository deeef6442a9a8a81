//! Unit tests for the project context.

mod aggregator_tests;
