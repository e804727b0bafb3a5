//! Switchable heat source or sink bound to one process.

use hg_core::{
    AttributeSpec, Identity, Observable, ProcessId, SimulationElement, Unit, ensure_finite,
    ensure_positive,
};
use hg_graph::IntoEndpoint;

use crate::error::{ThermalError, ThermalResult};

const HEATER_ATTRS: &[AttributeSpec] = &[
    AttributeSpec::new("power", Unit::Watt),
    AttributeSpec::new("on", Unit::Boolean),
];

/// Heater (positive rated power) or cooler (negative rated power).
///
/// When on, injects `rated_power * efficiency * dt` joules into its process
/// during the network's calculate phase.
#[derive(Debug, Clone)]
pub struct HeaterCooler {
    identity: Identity,
    process: ProcessId,
    rated_power: f64,
    efficiency: f64,
    initially_on: bool,

    on: bool,
    delta_energy: f64,
    power: Option<f64>,
}

impl HeaterCooler {
    pub fn new(
        name: impl Into<String>,
        process: impl IntoEndpoint,
        rated_power: f64,
    ) -> ThermalResult<Self> {
        let identity = Identity::new(name)?;
        ensure_finite(rated_power, "rated_power")?;
        let process = process.into_endpoint()?;

        Ok(Self {
            identity,
            process,
            rated_power,
            efficiency: 1.0,
            initially_on: false,
            on: false,
            delta_energy: 0.0,
            power: None,
        })
    }

    /// Efficiency in (0, 1].
    pub fn with_efficiency(mut self, efficiency: f64) -> ThermalResult<Self> {
        let efficiency = ensure_positive(efficiency, "efficiency")?;
        if efficiency > 1.0 {
            return Err(ThermalError::InvalidArg {
                what: "efficiency must not exceed 1",
            });
        }
        self.efficiency = efficiency;
        Ok(self)
    }

    /// Start switched on after every reset.
    pub fn initially_on(mut self) -> Self {
        self.initially_on = true;
        self.on = true;
        self
    }

    pub fn process(&self) -> ProcessId {
        self.process
    }

    pub fn rated_power(&self) -> f64 {
        self.rated_power
    }

    pub fn efficiency(&self) -> f64 {
        self.efficiency
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    /// Switch command; takes effect at the next calculate.
    pub fn set_on(&mut self, on: bool) {
        self.on = on;
    }

    /// Energy injected in the current step (J).
    pub fn delta_energy(&self) -> f64 {
        self.delta_energy
    }

    /// Delivered power over the last step (W).
    pub fn power(&self) -> Option<f64> {
        self.power
    }
}

impl SimulationElement for HeaterCooler {
    fn identity(&self) -> &Identity {
        &self.identity
    }

    fn identity_mut(&mut self) -> &mut Identity {
        &mut self.identity
    }

    fn reset(&mut self) {
        self.on = self.initially_on;
        self.delta_energy = 0.0;
        self.power = None;
    }

    fn calculate(&mut self, _time: f64, delta_time: f64) {
        self.delta_energy = if self.on {
            self.rated_power * self.efficiency * delta_time
        } else {
            0.0
        };
    }

    fn update(&mut self, _time: f64, delta_time: f64) {
        self.power = Some(if delta_time > 0.0 {
            self.delta_energy / delta_time
        } else {
            0.0
        });
    }
}

impl Observable for HeaterCooler {
    fn attributes(&self) -> &'static [AttributeSpec] {
        HEATER_ATTRS
    }

    fn attribute(&self, name: &str) -> Option<f64> {
        match name {
            "power" => self.power,
            "on" => Some(if self.on { 1.0 } else { 0.0 }),
            _ => None,
        }
    }
}
