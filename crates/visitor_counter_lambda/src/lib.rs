//! AWS-oriented adapters and handlers for the visitor counter.
//!
//! This crate owns runtime integration details (the API Gateway handler,
//! environment configuration, and the DynamoDB store adapter). The increment
//! protocol itself lives in `visitor_counter_core`.

pub mod adapters;
pub mod config;
pub mod handlers;
