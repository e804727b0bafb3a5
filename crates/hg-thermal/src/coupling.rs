//! Conductive link between two thermal processes.

use hg_core::units::{Area, Length, si};
use hg_core::{
    AttributeSpec, Identity, Material, Observable, ProcessId, SimulationElement, Unit,
    ensure_non_negative, ensure_positive,
};
use hg_graph::{Endpoints, IntoEndpoint};

use crate::error::{ThermalError, ThermalResult};
use crate::process::checked_energy;

const COUPLING_ATTRS: &[AttributeSpec] = &[AttributeSpec::new("power", Unit::Watt)];

/// Fourier conduction between `from` and `to`.
///
/// The coupling stores endpoint ids only; the owning network resolves them
/// and applies the energy it computes. Positive energy flows from `from` to
/// `to`.
#[derive(Debug, Clone)]
pub struct ThermalCoupling {
    identity: Identity,
    ends: Endpoints,
    /// W/K per unit area over unit thickness
    conductivity: f64,
    /// m²
    contact_area: f64,
    /// m
    thickness: f64,

    // Pending, cleared each calculate
    delta_energy: f64,
    conducted: bool,
    // Published
    power: Option<f64>,
}

impl ThermalCoupling {
    /// Couple two processes, each given as a registered entity or a raw id.
    pub fn new(
        name: impl Into<String>,
        conductivity: f64,
        from: impl IntoEndpoint,
        to: impl IntoEndpoint,
    ) -> ThermalResult<Self> {
        let identity = Identity::new(name)?;
        ensure_non_negative(conductivity, "conductivity")?;
        let ends = Endpoints::new(identity.name(), from, to)?;

        Ok(Self {
            identity,
            ends,
            conductivity,
            contact_area: 1.0,
            thickness: 1.0,
            delta_energy: 0.0,
            conducted: false,
            power: None,
        })
    }

    /// Conduction through a slab of `material`.
    pub fn through(
        name: impl Into<String>,
        material: &Material,
        area: Area,
        thickness: Length,
        from: impl IntoEndpoint,
        to: impl IntoEndpoint,
    ) -> ThermalResult<Self> {
        Self::new(name, material.conductivity, from, to)?
            .with_geometry(si::square_meters(area), si::meters(thickness))
    }

    /// Set contact area (m²) and thickness (m), both > 0.
    pub fn with_geometry(mut self, contact_area: f64, thickness: f64) -> ThermalResult<Self> {
        self.contact_area = ensure_positive(contact_area, "contact_area")?;
        self.thickness = ensure_positive(thickness, "thickness")?;
        Ok(self)
    }

    pub fn endpoints(&self) -> Endpoints {
        self.ends
    }

    pub fn source(&self) -> ProcessId {
        self.ends.from
    }

    pub fn target(&self) -> ProcessId {
        self.ends.to
    }

    pub fn conductivity(&self) -> f64 {
        self.conductivity
    }

    pub fn contact_area(&self) -> f64 {
        self.contact_area
    }

    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    /// Effective conductance, W/K.
    pub fn conductance(&self) -> f64 {
        self.conductivity * self.contact_area / self.thickness
    }

    /// Energy leaving `from` this step, computed from pre-step temperatures.
    ///
    /// May be called once per step; the network applies the returned value
    /// to both endpoints.
    pub fn conduct(&mut self, t_from: f64, t_to: f64, delta_time: f64) -> ThermalResult<f64> {
        if self.conducted {
            return Err(ThermalError::AlreadyConducted {
                name: self.name().to_string(),
            });
        }
        self.conducted = true;

        if delta_time == 0.0 {
            self.delta_energy = 0.0;
            return Ok(0.0);
        }
        let flow_rate = self.conductance() * (t_from - t_to);
        self.delta_energy = checked_energy(flow_rate * delta_time)?;
        Ok(self.delta_energy)
    }

    /// Energy conducted in the current step (J).
    pub fn delta_energy(&self) -> f64 {
        self.delta_energy
    }

    /// Mean power over the last step (W); `None` before the first step.
    pub fn power(&self) -> Option<f64> {
        self.power
    }
}

impl SimulationElement for ThermalCoupling {
    fn identity(&self) -> &Identity {
        &self.identity
    }

    fn identity_mut(&mut self) -> &mut Identity {
        &mut self.identity
    }

    fn reset(&mut self) {
        self.delta_energy = 0.0;
        self.conducted = false;
        self.power = None;
    }

    fn calculate(&mut self, _time: f64, _delta_time: f64) {
        self.delta_energy = 0.0;
        self.conducted = false;
    }

    fn update(&mut self, _time: f64, delta_time: f64) {
        self.power = Some(if delta_time > 0.0 {
            self.delta_energy / delta_time
        } else {
            0.0
        });
    }
}

impl Observable for ThermalCoupling {
    fn attributes(&self) -> &'static [AttributeSpec] {
        COUPLING_ATTRS
    }

    fn attribute(&self, name: &str) -> Option<f64> {
        match name {
            "power" => self.power,
            _ => None,
        }
    }
}
