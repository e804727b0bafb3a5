//! Error types for thermal network operations.

use hg_core::HgError;
use hg_graph::GraphError;
use thiserror::Error;

/// Errors raised while building or stepping a thermal network.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ThermalError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Coupling '{name}' conducted twice in one step")]
    AlreadyConducted { name: String },

    #[error("Heater '{heater}' refers to non-existent process {process}")]
    DanglingHeater { heater: String, process: hg_core::ProcessId },

    #[error(transparent)]
    Core(#[from] HgError),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

pub type ThermalResult<T> = Result<T, ThermalError>;
