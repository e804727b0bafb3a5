//! Cyber-physical consumers and producers attached to buses.

use hg_core::{
    AttributeSpec, BusId, Identity, Observable, Position, SimulationElement, Unit,
    ensure_finite, ensure_non_negative, units::Power, units::si,
};

use crate::error::ElectricalResult;

const CPS_ATTRS: &[AttributeSpec] = &[
    AttributeSpec::new("delta_energy", Unit::Joule),
    AttributeSpec::new("power", Unit::Watt),
];

/// Element drawing or feeding a constant power at one bus.
///
/// Sign convention: positive power and energy are consumed, negative are
/// produced. Each step publishes `power * dt` as `delta_energy`.
#[derive(Debug, Clone)]
pub struct CpsElement {
    identity: Identity,
    bus: Option<BusId>,
    position: Position,
    initial_power: f64,

    power: f64,
    pending: f64,
    delta_energy: f64,
}

impl CpsElement {
    /// Element with a signed power demand in W.
    pub fn new(name: impl Into<String>, power: f64) -> ElectricalResult<Self> {
        let identity = Identity::new(name)?;
        let power = ensure_finite(power, "power")?;
        Ok(Self {
            identity,
            bus: None,
            position: Position::default(),
            initial_power: power,
            power,
            pending: 0.0,
            delta_energy: 0.0,
        })
    }

    pub fn from_power(name: impl Into<String>, power: Power) -> ElectricalResult<Self> {
        Self::new(name, si::watts(power))
    }

    /// Load drawing `demand` W.
    pub fn consumer(name: impl Into<String>, demand: f64) -> ElectricalResult<Self> {
        let demand = ensure_non_negative(demand, "demand")?;
        Self::new(name, demand)
    }

    /// Generator feeding `output` W.
    pub fn producer(name: impl Into<String>, output: f64) -> ElectricalResult<Self> {
        let output = ensure_non_negative(output, "output")?;
        Self::new(name, -output)
    }

    /// Bus this element is attached to, if any.
    pub fn bus(&self) -> Option<BusId> {
        self.bus
    }

    pub(crate) fn attach_to(&mut self, bus: BusId, position: Position) {
        self.bus = Some(bus);
        self.position = position;
    }

    /// Power used from the next calculate on, until the next `reset`.
    pub fn set_power(&mut self, power: f64) -> ElectricalResult<()> {
        self.power = ensure_finite(power, "power")?;
        Ok(())
    }

    pub fn power(&self) -> f64 {
        self.power
    }

    /// Energy consumed (> 0) or produced (< 0) over the last step, J.
    pub fn delta_energy(&self) -> f64 {
        self.delta_energy
    }
}

impl SimulationElement for CpsElement {
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
        self.power = self.initial_power;
        self.pending = 0.0;
        self.delta_energy = 0.0;
    }

    fn calculate(&mut self, _time: f64, delta_time: f64) {
        self.pending = self.power * delta_time;
    }

    fn update(&mut self, _time: f64, _delta_time: f64) {
        self.delta_energy = self.pending;
    }
}

impl Observable for CpsElement {
    fn attributes(&self) -> &'static [AttributeSpec] {
        CPS_ATTRS
    }

    fn attribute(&self, name: &str) -> Option<f64> {
        match name {
            "delta_energy" => Some(self.delta_energy),
            "power" => Some(self.power),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hg_core::{HgError, units::w};

    #[test]
    fn energy_is_published_on_update() {
        let mut load = CpsElement::consumer("fridge", 150.0).unwrap();
        load.calculate(0.0, 60.0);
        assert_eq!(load.delta_energy(), 0.0);
        load.update(0.0, 60.0);
        assert_eq!(load.delta_energy(), 9000.0);
        assert_eq!(load.attribute_unit("delta_energy"), Some(Unit::Joule));
    }

    #[test]
    fn producers_report_negative_energy() {
        let mut pv = CpsElement::producer("roof", 2000.0).unwrap();
        assert_eq!(pv.power(), -2000.0);
        pv.calculate(0.0, 10.0);
        pv.update(0.0, 10.0);
        assert_eq!(pv.delta_energy(), -20_000.0);
        assert!(CpsElement::producer("bad", -1.0).is_err());
    }

    #[test]
    fn reset_restores_power_and_clears_energy() {
        let mut el = CpsElement::from_power("heat pump", w(800.0)).unwrap();
        el.set_power(1200.0).unwrap();
        el.calculate(0.0, 1.0);
        el.update(0.0, 1.0);
        assert_eq!(el.delta_energy(), 1200.0);

        el.reset();
        assert_eq!(el.power(), 800.0);
        assert_eq!(el.delta_energy(), 0.0);
    }

    #[test]
    fn non_finite_power_rejected() {
        assert!(matches!(
            CpsElement::new("x", f64::NAN),
            Err(crate::ElectricalError::Core(HgError::NonFinite { .. }))
        ));
        let mut el = CpsElement::new("y", 1.0).unwrap();
        assert!(el.set_power(f64::INFINITY).is_err());
        assert_eq!(el.power(), 1.0);
    }
}
