//! Controllers for heatgrid.
//!
//! Controllers read published state during `calculate`, publish a decision in
//! `update`, and the driver applies the resulting commands after the update
//! sweep. A command therefore affects the plant from the next step on.

pub mod error;
pub mod module;
pub mod thermostat;

pub use error::{ControlError, ControlResult};
pub use module::{ControlModule, HeaterCommand};
pub use thermostat::{Thermostat, ThermostatMode};
