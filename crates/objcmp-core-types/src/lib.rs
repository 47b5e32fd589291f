//! Core types shared across objcmp facilities
//!
//! This crate provides foundational types used by the comparison engine
//! and its logging facility:
//!
//! - **Correlation types**: ComparisonId
//! - **Schema constants**: Canonical field keys and event names

pub mod correlation;
pub mod schema;

pub use correlation::ComparisonId;
