//! Benchmark support crate for clusterwalk.
//!
//! Provides seeded graph fixtures and parameter types used by the Criterion
//! benchmarks for graph generation and the three walks.

pub mod error;
pub mod fixtures;
pub mod params;
