//! Common Test Utilities
//!
//! Shared fixtures for building stores, journeys and wizard sessions.

pub mod fixtures;

pub use fixtures::*;
