//! Two-point (bang-bang) temperature controller with hysteresis.

use hg_core::{
    AttributeSpec, HeaterId, Identity, Observable, Position, ProcessId, SimulationElement, Unit,
    ensure_non_negative, ensure_positive,
};
use hg_graph::IntoEndpoint;

use crate::error::ControlResult;

/// Which side of the band switches the actuator on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ThermostatMode {
    /// On below the band, off above it.
    Heating,
    /// On above the band, off below it.
    Cooling,
}

const THERMOSTAT_ATTRS: &[AttributeSpec] = &[
    AttributeSpec::new("on", Unit::Boolean),
    AttributeSpec::new("target_temperature", Unit::Kelvin),
];

/// Watches one process and switches one heater/cooler.
///
/// The band is `target ± hysteresis / 2`. Inside the band the last command
/// is held. The decision is taken in `calculate` from the temperature fed
/// through [`sense`](Self::sense) and published in `update`.
#[derive(Debug, Clone)]
pub struct Thermostat {
    identity: Identity,
    position: Position,
    /// K
    target: f64,
    /// K, full band width
    hysteresis: f64,
    // Construction-time setpoints restored by `reset`
    initial_target: f64,
    initial_hysteresis: f64,
    process: ProcessId,
    actuator: HeaterId,
    mode: ThermostatMode,

    measured: Option<f64>,
    pending: bool,
    output: bool,
}

impl Thermostat {
    pub fn new(
        name: impl Into<String>,
        target: f64,
        hysteresis: f64,
        process: impl IntoEndpoint,
        actuator: impl IntoEndpoint,
    ) -> ControlResult<Self> {
        let identity = Identity::new(name)?;
        ensure_non_negative(target, "target_temperature")?;
        ensure_positive(hysteresis, "hysteresis")?;
        Ok(Self {
            identity,
            position: Position::default(),
            target,
            hysteresis,
            initial_target: target,
            initial_hysteresis: hysteresis,
            process: process.into_endpoint()?,
            actuator: actuator.into_endpoint()?,
            mode: ThermostatMode::Heating,
            measured: None,
            pending: false,
            output: false,
        })
    }

    pub fn with_mode(mut self, mode: ThermostatMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    /// Change the setpoint until the next `reset`.
    pub fn set_target(&mut self, target: f64) -> ControlResult<()> {
        self.target = ensure_non_negative(target, "target_temperature")?;
        Ok(())
    }

    pub fn hysteresis(&self) -> f64 {
        self.hysteresis
    }

    pub fn set_hysteresis(&mut self, hysteresis: f64) -> ControlResult<()> {
        self.hysteresis = ensure_positive(hysteresis, "hysteresis")?;
        Ok(())
    }

    pub fn process(&self) -> ProcessId {
        self.process
    }

    pub fn actuator(&self) -> HeaterId {
        self.actuator
    }

    pub fn mode(&self) -> ThermostatMode {
        self.mode
    }

    /// Feed the pre-step temperature of the watched process.
    pub fn sense(&mut self, temperature: f64) {
        self.measured = Some(temperature);
    }

    /// Published command.
    pub fn output(&self) -> bool {
        self.output
    }

    fn decide(&self, temperature: f64) -> bool {
        let low = self.target - self.hysteresis / 2.0;
        let high = self.target + self.hysteresis / 2.0;
        let (below, above) = (temperature < low, temperature > high);
        match self.mode {
            ThermostatMode::Heating if below => true,
            ThermostatMode::Heating if above => false,
            ThermostatMode::Cooling if above => true,
            ThermostatMode::Cooling if below => false,
            _ => self.output,
        }
    }
}

impl SimulationElement for Thermostat {
    fn identity(&self) -> &Identity {
        &self.identity
    }

    fn identity_mut(&mut self) -> &mut Identity {
        &mut self.identity
    }

    fn position(&self) -> Option<&Position> {
        Some(&self.position)
    }

    fn reset(&mut self) {
        self.target = self.initial_target;
        self.hysteresis = self.initial_hysteresis;
        self.measured = None;
        self.pending = false;
        self.output = false;
    }

    fn calculate(&mut self, _time: f64, _delta_time: f64) {
        self.pending = match self.measured.take() {
            Some(temperature) => self.decide(temperature),
            None => self.output,
        };
    }

    fn update(&mut self, _time: f64, _delta_time: f64) {
        self.output = self.pending;
    }
}

impl Observable for Thermostat {
    fn attributes(&self) -> &'static [AttributeSpec] {
        THERMOSTAT_ATTRS
    }

    fn attribute(&self, name: &str) -> Option<f64> {
        match name {
            "on" => Some(if self.output { 1.0 } else { 0.0 }),
            "target_temperature" => Some(self.target),
            _ => None,
        }
    }
}
