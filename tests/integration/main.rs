//! Integration tests for a11y-sweep
//!
//! These tests use wiremock to stand in for the target site and the scan
//! engine, and exercise discovery and scanning end-to-end.

mod discovery_tests;
mod scan_tests;
