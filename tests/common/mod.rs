//! Shared test utilities for series-navigator
//!
//! Integration tests drive the orchestrator against a scripted [`fake_api::FakeApi`]
//! and the CLI binary against temporary config/cache homes.

pub mod assertions;
pub mod fake_api;
pub mod fixtures;
pub mod home;
