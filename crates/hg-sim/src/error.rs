//! Error types for the simulation driver.

use hg_controls::ControlError;
use hg_core::{HgError, Id};
use hg_electrical::ElectricalError;
use hg_thermal::ThermalError;
use thiserror::Error;

use crate::query::ElementKind;

/// Errors raised while assembling or running a simulation.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Name '{name}' is already used in this simulation")]
    DuplicateName { name: String },

    #[error("No {kind} with id {id}")]
    UnknownElement { kind: ElementKind, id: Id },

    #[error("'{subject}' has no attribute '{attribute}'")]
    UnknownAttribute { subject: String, attribute: String },

    #[error(transparent)]
    Core(#[from] HgError),

    #[error(transparent)]
    Thermal(#[from] ThermalError),

    #[error(transparent)]
    Electrical(#[from] ElectricalError),

    #[error(transparent)]
    Control(#[from] ControlError),
}

pub type SimResult<T> = Result<T, SimError>;
