//! Unit tests for the reminder context.

mod recovery_tests;
mod support;
mod window_tests;
