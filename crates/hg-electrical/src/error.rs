//! Error types for electrical network construction.

use hg_core::{BusId, HgError};
use hg_graph::GraphError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ElectricalError {
    #[error("Transmission line length must be > 0 m (got {value})")]
    NonPositiveLength { value: f64 },

    #[error("Charging susceptance must be >= 0 S (got {value})")]
    NegativeCharging { value: f64 },

    #[error("Transformer k-factor cannot be zero")]
    ZeroKFactor,

    #[error("Reactance must be > 0 ohm (got {value})")]
    NonPositiveReactance { value: f64 },

    #[error("Resistance must be >= 0 ohm (got {value})")]
    NegativeResistance { value: f64 },

    #[error("Network already has slack bus {existing}; cannot add '{name}'")]
    DuplicateSlack { existing: BusId, name: String },

    #[error("No element can be attached to slack bus {bus}")]
    AttachedToSlack { bus: BusId },

    #[error(transparent)]
    Core(#[from] HgError),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

pub type ElectricalResult<T> = Result<T, ElectricalError>;
