//! Test utilities and mock implementations.
//!
//! This module provides reusable mock implementations of domain traits
//! plus deterministic data builders for use in unit and integration tests.

pub mod fixtures;
pub mod mocks;

pub use mocks::MockClientRepository;
