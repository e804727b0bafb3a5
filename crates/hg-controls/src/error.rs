//! Error types for control operations.

use hg_core::HgError;
use hg_graph::GraphError;
use hg_thermal::ThermalError;
use thiserror::Error;

/// Result type for control operations.
pub type ControlResult<T> = Result<T, ControlError>;

/// Errors that can occur while building or stepping controllers.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ControlError {
    /// Invalid argument provided to a controller constructor.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Controller refers to an element that does not exist.
    #[error("Invalid reference: {what}")]
    InvalidReference { what: String },

    #[error(transparent)]
    Core(#[from] HgError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Thermal(#[from] ThermalError),
}
