//! Integration tests for quote-relay

mod e2e_test;
mod support;
