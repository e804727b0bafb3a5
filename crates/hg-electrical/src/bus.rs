//! Electrical buses (network nodes).

use hg_core::{
    AttributeSpec, Identity, Observable, Position, SimulationElement, Unit,
};

use crate::error::ElectricalResult;

/// What a power-flow solver holds fixed at a bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BusType {
    /// Reference bus: fixes voltage magnitude and angle, balances power.
    Slack,
    /// Generator bus: fixes active power and voltage magnitude.
    PV,
    /// Load bus: fixes active and reactive power.
    PQ,
}

impl BusType {
    pub fn as_str(self) -> &'static str {
        match self {
            BusType::Slack => "slack",
            BusType::PV => "pv",
            BusType::PQ => "pq",
        }
    }
}

/// Bus solution as published by an external solver.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BusState {
    /// Active power, W
    pub p: Option<f64>,
    /// Reactive power, var
    pub q: Option<f64>,
    /// Voltage magnitude, V
    pub v: Option<f64>,
    /// Voltage angle, rad
    pub th: Option<f64>,
}

const BUS_ATTRS: &[AttributeSpec] = &[
    AttributeSpec::new("p", Unit::Watt),
    AttributeSpec::new("q", Unit::VoltAmpereReactive),
    AttributeSpec::new("v", Unit::Volt),
    AttributeSpec::new("th", Unit::Radian),
];

#[derive(Debug, Clone)]
pub struct ElectricalBus {
    identity: Identity,
    bus_type: BusType,
    position: Position,
    state: BusState,
}

impl ElectricalBus {
    pub fn new(name: impl Into<String>, bus_type: BusType) -> ElectricalResult<Self> {
        Ok(Self {
            identity: Identity::new(name)?,
            bus_type,
            position: Position::default(),
            state: BusState::default(),
        })
    }

    pub fn slack(name: impl Into<String>) -> ElectricalResult<Self> {
        Self::new(name, BusType::Slack)
    }

    pub fn pv(name: impl Into<String>) -> ElectricalResult<Self> {
        Self::new(name, BusType::PV)
    }

    pub fn pq(name: impl Into<String>) -> ElectricalResult<Self> {
        Self::new(name, BusType::PQ)
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn bus_type(&self) -> BusType {
        self.bus_type
    }

    pub fn state(&self) -> &BusState {
        &self.state
    }

    /// Active power injected by the attached elements, W.
    pub(crate) fn set_injection(&mut self, p: f64) {
        self.state.p = Some(p);
    }

    /// Publish a solver result for this bus.
    pub fn set_solution(&mut self, state: BusState) {
        self.state = state;
    }
}

impl SimulationElement for ElectricalBus {
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
        self.state = BusState::default();
    }

    // Solution values are written by the solver, not stepped
    fn calculate(&mut self, _time: f64, _delta_time: f64) {}

    fn update(&mut self, _time: f64, _delta_time: f64) {}
}

impl Observable for ElectricalBus {
    fn attributes(&self) -> &'static [AttributeSpec] {
        BUS_ATTRS
    }

    fn attribute(&self, name: &str) -> Option<f64> {
        match name {
            "p" => self.state.p,
            "q" => self.state.q,
            "v" => self.state.v,
            "th" => self.state.th,
            _ => None,
        }
    }
}
