//! Lumped thermal process: a body with uniform temperature.

use hg_core::units::{Area, Length, Mass, Temperature, si};
use hg_core::{
    AttributeSpec, Identity, Material, Observable, Position, SimulationElement, Unit,
    ensure_finite, ensure_non_negative, ensure_positive,
};

use crate::error::ThermalResult;

/// How a process responds to exchanged energy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessKind {
    /// Finite capacity; temperature follows stored energy.
    Lumped,
    /// Infinite reservoir held at its initial temperature. Exchanged energy is
    /// tallied in `thermal_energy` so network totals stay auditable.
    Boundary,
}

const PROCESS_ATTRS: &[AttributeSpec] = &[
    AttributeSpec::new("temperature", Unit::Kelvin),
    AttributeSpec::new("thermal_energy", Unit::Joule),
];

/// Energy reservoir exposing a temperature derived from stored energy.
///
/// `add_energy` only touches the internal accumulator; `temperature` and
/// `thermal_energy` change on `update`.
#[derive(Debug, Clone)]
pub struct ThermalProcess {
    identity: Identity,
    position: Position,
    kind: ProcessKind,
    /// J/(kg·K)
    thermal_capacity: f64,
    /// kg
    mass: f64,
    /// K
    initial_temperature: f64,

    // Authoritative stored energy, accumulates during calculate
    internal_energy: f64,
    // Published
    thermal_energy: f64,
    temperature: f64,
}

impl ThermalProcess {
    /// Create a process from SI magnitudes.
    ///
    /// # Arguments
    /// * `thermal_capacity` - specific heat, J/(kg·K), > 0
    /// * `initial_temperature` - K, ≥ 0
    /// * `mass` - kg, > 0
    pub fn new(
        name: impl Into<String>,
        thermal_capacity: f64,
        initial_temperature: f64,
        mass: f64,
    ) -> ThermalResult<Self> {
        let identity = Identity::new(name)?;
        ensure_positive(thermal_capacity, "thermal_capacity")?;
        ensure_positive(mass, "mass")?;
        ensure_non_negative(initial_temperature, "initial_temperature")?;

        Ok(Self::build(
            identity,
            ProcessKind::Lumped,
            thermal_capacity,
            mass,
            initial_temperature,
        ))
    }

    /// Volume of air over a floor `surface` with ceiling `height`.
    pub fn room(
        name: impl Into<String>,
        surface: Area,
        height: Length,
        initial_temperature: Temperature,
    ) -> ThermalResult<Self> {
        let volume = ensure_positive(si::square_meters(surface) * si::meters(height), "room volume")?;
        let air = Material::AIR;
        Self::new(
            name,
            air.specific_heat,
            si::kelvin(initial_temperature),
            air.mass_of_volume(volume),
        )
    }

    /// Solid body of `mass` made of `material`.
    pub fn solid(
        name: impl Into<String>,
        material: &Material,
        mass: Mass,
        initial_temperature: Temperature,
    ) -> ThermalResult<Self> {
        Self::new(
            name,
            material.specific_heat,
            si::kelvin(initial_temperature),
            si::kilograms(mass),
        )
    }

    /// Boundary reservoir held at `temperature` (K), e.g. outside air or ground.
    pub fn constant(name: impl Into<String>, temperature: f64) -> ThermalResult<Self> {
        let identity = Identity::new(name)?;
        ensure_non_negative(temperature, "temperature")?;
        Ok(Self::build(
            identity,
            ProcessKind::Boundary,
            f64::INFINITY,
            1.0,
            temperature,
        ))
    }

    fn build(
        identity: Identity,
        kind: ProcessKind,
        thermal_capacity: f64,
        mass: f64,
        initial_temperature: f64,
    ) -> Self {
        let mut process = Self {
            identity,
            position: Position::default(),
            kind,
            thermal_capacity,
            mass,
            initial_temperature,
            internal_energy: 0.0,
            thermal_energy: 0.0,
            temperature: 0.0,
        };
        process.reset();
        process
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn kind(&self) -> ProcessKind {
        self.kind
    }

    pub fn thermal_capacity(&self) -> f64 {
        self.thermal_capacity
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Total heat capacity C·m, J/K (infinite for boundaries).
    pub fn heat_capacity(&self) -> f64 {
        self.thermal_capacity * self.mass
    }

    pub fn initial_temperature(&self) -> f64 {
        self.initial_temperature
    }

    /// Published temperature, K.
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Published stored energy, J. For boundaries, the net energy absorbed
    /// since reset.
    pub fn thermal_energy(&self) -> f64 {
        self.thermal_energy
    }

    /// Accumulate `delta` joules for this step. Positive adds heat.
    pub fn add_energy(&mut self, delta: f64) {
        self.internal_energy += delta;
    }

    fn energy_at(&self, temperature: f64) -> f64 {
        temperature * self.thermal_capacity * self.mass
    }
}

impl SimulationElement for ThermalProcess {
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
        self.internal_energy = match self.kind {
            ProcessKind::Lumped => self.energy_at(self.initial_temperature),
            ProcessKind::Boundary => 0.0,
        };
        self.thermal_energy = self.internal_energy;
        self.temperature = self.initial_temperature;
    }

    /// Start the step from the published energy; anything accumulated by an
    /// aborted step is discarded.
    fn calculate(&mut self, _time: f64, _delta_time: f64) {
        self.internal_energy = self.thermal_energy;
    }

    fn update(&mut self, _time: f64, _delta_time: f64) {
        self.thermal_energy = self.internal_energy;
        if self.kind == ProcessKind::Lumped {
            self.temperature = self.internal_energy / self.heat_capacity();
        }
    }
}

impl Observable for ThermalProcess {
    fn attributes(&self) -> &'static [AttributeSpec] {
        PROCESS_ATTRS
    }

    fn attribute(&self, name: &str) -> Option<f64> {
        match name {
            "temperature" => Some(self.temperature),
            "thermal_energy" => Some(self.thermal_energy),
            _ => None,
        }
    }
}

/// Reject a non-finite energy increment before it poisons an accumulator.
pub(crate) fn checked_energy(delta: f64) -> ThermalResult<f64> {
    Ok(ensure_finite(delta, "energy increment")?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hg_core::units::{degc, k, kg, m, m2};
    use hg_core::{HgError, Id};

    #[test]
    fn room_uses_air_properties() {
        let room = ThermalProcess::room("room", m2(50.0), m(2.5), k(293.15)).unwrap();
        assert_eq!(room.thermal_capacity(), 1005.0);
        assert!((room.mass() - 150.0).abs() < 1e-12);
        assert_eq!(room.temperature(), 293.15);
        assert!((room.thermal_energy() - 293.15 * 1005.0 * 150.0).abs() < 1e-6);
    }

    #[test]
    fn solid_from_material() {
        let slab = ThermalProcess::solid("slab", &Material::CONCRETE, kg(2000.0), degc(20.0)).unwrap();
        assert_eq!(slab.thermal_capacity(), 750.0);
        assert_eq!(slab.mass(), 2000.0);
        assert!((slab.temperature() - 293.15).abs() < 1e-9);
    }

    #[test]
    fn invalid_parameters_rejected() {
        assert!(matches!(
            ThermalProcess::new("p", 0.0, 300.0, 1.0),
            Err(crate::ThermalError::Core(HgError::OutOfRange { .. }))
        ));
        assert!(ThermalProcess::new("p", 1000.0, 300.0, -1.0).is_err());
        assert!(ThermalProcess::new("p", 1000.0, -1.0, 1.0).is_err());
        assert!(ThermalProcess::new("p", f64::NAN, 300.0, 1.0).is_err());
        assert!(ThermalProcess::new("", 1000.0, 300.0, 1.0).is_err());
        assert!(ThermalProcess::room("r", m2(0.0), m(2.5), k(293.15)).is_err());
    }

    #[test]
    fn add_energy_publishes_on_update() {
        let mut p = ThermalProcess::new("p", 1000.0, 300.0, 2.0).unwrap();
        p.add_energy(2000.0);
        assert_eq!(p.temperature(), 300.0);

        p.update(0.0, 1.0);
        assert!((p.temperature() - 301.0).abs() < 1e-12);
        assert_eq!(p.thermal_energy(), 300.0 * 1000.0 * 2.0 + 2000.0);
    }

    #[test]
    fn temperature_matches_energy_after_update() {
        let mut p = ThermalProcess::new("p", 4190.0, 285.0, 3.7).unwrap();
        for delta in [1.0e4, -3.3e3, 7.1e5] {
            p.add_energy(delta);
            p.update(0.0, 1.0);
            let implied = p.thermal_energy() / (p.thermal_capacity() * p.mass());
            assert_eq!(p.temperature(), implied);
        }
    }

    #[test]
    fn reset_restores_construction_state() {
        let fresh = ThermalProcess::new("p", 1005.0, 333.15, 150.0).unwrap();
        let mut p = fresh.clone();
        p.add_energy(-1.0e6);
        p.update(0.0, 300.0);
        p.reset();
        p.reset();

        assert_eq!(p.temperature().to_bits(), fresh.temperature().to_bits());
        assert_eq!(
            p.thermal_energy().to_bits(),
            fresh.thermal_energy().to_bits()
        );
    }

    #[test]
    fn boundary_holds_temperature_and_tallies() {
        let mut outside = ThermalProcess::constant("outside", 273.15).unwrap();
        assert_eq!(outside.kind(), ProcessKind::Boundary);
        assert!(outside.heat_capacity().is_infinite());

        outside.add_energy(500.0);
        outside.update(0.0, 1.0);
        assert_eq!(outside.temperature(), 273.15);
        assert_eq!(outside.thermal_energy(), 500.0);

        outside.reset();
        assert_eq!(outside.thermal_energy(), 0.0);
    }

    #[test]
    fn observable_attributes() {
        let mut p = ThermalProcess::new("p", 1000.0, 300.0, 1.0).unwrap();
        p.identity_mut().assign(Id::from_index(0)).unwrap();
        assert!(p.has_attribute("temperature"));
        assert_eq!(p.attribute_unit("thermal_energy"), Some(Unit::Joule));
        assert_eq!(p.attribute("temperature"), Some(300.0));
        assert_eq!(p.attribute("power"), None);
    }

    #[test]
    fn non_finite_increment_rejected() {
        assert!(checked_energy(f64::NAN).is_err());
        assert_eq!(checked_energy(3.0), Ok(3.0));
    }
}
