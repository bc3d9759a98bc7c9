//! # Macrodash Core Types
//!
//! The shared vocabulary of the dashboard: a time series is an ordered run of
//! dated observations under one FRED series code. Every other crate speaks in
//! these types.
//!
//! ## Architectural Principles
//!
//! - **Layer 0:** This crate depends on nothing else in the workspace. The
//!   fetcher produces a `Series`, the transforms consume and produce them,
//!   and the web server serializes them.
//! - **No hidden coercion:** a missing observation stays `None`. Coercing an
//!   absent value to `0.0` would silently corrupt every derived statistic.

pub mod error;
pub mod series;

// Re-export the core types to provide a clean public API.
pub use error::SeriesError;
pub use series::{Observation, Series};
