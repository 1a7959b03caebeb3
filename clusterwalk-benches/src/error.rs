//! Benchmark setup error type.
//!
//! Lets fixture builders propagate configuration failures with `?` instead
//! of using `.expect()`.

use clusterwalk_core::{GeneratorError, InformationError, WalkError};

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Graph generation was misconfigured.
    #[error("graph generation failed: {0}")]
    Generator(#[from] GeneratorError),
    /// Information assignment was misconfigured.
    #[error("information assignment failed: {0}")]
    Information(#[from] InformationError),
    /// A walk was misconfigured.
    #[error("walk configuration failed: {0}")]
    Walk(#[from] WalkError),
}
