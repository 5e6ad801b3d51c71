//! Integration tests for checklink
//!
//! These tests use wiremock to create mock HTTP servers and exercise the
//! fetcher, the checker, the model classifier and full runs end-to-end.

mod check_tests;
mod classifier_tests;
mod common;
mod run_tests;
