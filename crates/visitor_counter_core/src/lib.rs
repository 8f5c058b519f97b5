//! Shared visitor counter domain primitives.
//!
//! This crate owns the increment protocol, the counter record contract, and the
//! store capability the protocol runs against. It intentionally excludes AWS SDK
//! and Lambda runtime concerns.

pub mod contract;
pub mod logging;
#[cfg(any(test, feature = "test-helpers"))]
pub mod memory_store;
pub mod service;
pub mod store;
