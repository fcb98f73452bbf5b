//! Integration test utilities for the guildhall server
//!
//! This crate provides helpers for running end-to-end tests against
//! the REST API.

pub mod helpers;

pub use helpers::*;
