//! Integration tests for sitewatch
//!
//! These tests use wiremock to serve site content and run full checks
//! against a real state file.

mod check_tests;
