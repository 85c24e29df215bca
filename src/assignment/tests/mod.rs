//! Unit tests for the assignment context.

mod domain_tests;
mod messages_tests;
