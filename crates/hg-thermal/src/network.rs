//! Thermal network: registries plus the energy-conserving step.

use hg_core::{CouplingId, HeaterId, ProcessId, SimulationElement};
use hg_graph::{Adjacency, Registry, validate_edges};
use tracing::{debug, trace, warn};

use crate::coupling::ThermalCoupling;
use crate::error::{ThermalError, ThermalResult};
use crate::heater::HeaterCooler;
use crate::process::ThermalProcess;

/// Owns processes, couplings and heaters.
///
/// A step is `calculate` then `update`. During `calculate` every coupling
/// reads published (pre-step) temperatures and the resulting energy is
/// accumulated into both endpoints; nothing is published until `update`.
#[derive(Debug, Clone)]
pub struct ThermalNetwork {
    processes: Registry<ThermalProcess>,
    couplings: Registry<ThermalCoupling>,
    heaters: Registry<HeaterCooler>,
}

impl Default for ThermalNetwork {
    fn default() -> Self {
        Self::new()
    }
}

impl ThermalNetwork {
    pub fn new() -> Self {
        Self {
            processes: Registry::new("process"),
            couplings: Registry::new("coupling"),
            heaters: Registry::new("heater"),
        }
    }

    pub fn add_process(&mut self, process: ThermalProcess) -> ThermalResult<ProcessId> {
        Ok(self.processes.add(process)?)
    }

    /// Register a coupling. Endpoints are checked at `reset`, so a coupling
    /// may be added before the processes it names.
    pub fn add_coupling(&mut self, coupling: ThermalCoupling) -> ThermalResult<CouplingId> {
        if coupling.conductance() == 0.0 {
            warn!(name = coupling.name(), "coupling has zero conductance");
        }
        Ok(self.couplings.add(coupling)?)
    }

    pub fn add_heater(&mut self, heater: HeaterCooler) -> ThermalResult<HeaterId> {
        Ok(self.heaters.add(heater)?)
    }

    pub fn process(&self, id: ProcessId) -> Option<&ThermalProcess> {
        self.processes.get(id)
    }

    pub fn coupling(&self, id: CouplingId) -> Option<&ThermalCoupling> {
        self.couplings.get(id)
    }

    pub fn heater(&self, id: HeaterId) -> Option<&HeaterCooler> {
        self.heaters.get(id)
    }

    pub fn heater_mut(&mut self, id: HeaterId) -> Option<&mut HeaterCooler> {
        self.heaters.get_mut(id)
    }

    pub fn process_by_name(&self, name: &str) -> Option<&ThermalProcess> {
        self.processes.by_name(name)
    }

    pub fn coupling_by_name(&self, name: &str) -> Option<&ThermalCoupling> {
        self.couplings.by_name(name)
    }

    pub fn heater_by_name(&self, name: &str) -> Option<&HeaterCooler> {
        self.heaters.by_name(name)
    }

    pub fn processes(&self) -> &Registry<ThermalProcess> {
        &self.processes
    }

    pub fn couplings(&self) -> &Registry<ThermalCoupling> {
        &self.couplings
    }

    pub fn heaters(&self) -> &Registry<HeaterCooler> {
        &self.heaters
    }

    /// Switch a heater; effective from the next `calculate`.
    pub fn set_heater(&mut self, id: HeaterId, on: bool) -> ThermalResult<()> {
        self.heaters.resolve_mut(id)?.set_on(on);
        Ok(())
    }

    /// Check that every coupling and heater refers to a registered process.
    pub fn validate(&self) -> ThermalResult<()> {
        validate_edges(
            &self.processes,
            self.couplings.iter().map(|c| (c.name(), c.endpoints())),
        )?;
        for heater in &self.heaters {
            if !self.processes.contains(heater.process()) {
                return Err(ThermalError::DanglingHeater {
                    heater: heater.name().to_string(),
                    process: heater.process(),
                });
            }
        }
        Ok(())
    }

    /// Process adjacency over couplings.
    pub fn adjacency(&self) -> Adjacency {
        Adjacency::from_edges(
            self.processes.len(),
            self.couplings
                .iter()
                .filter_map(|c| c.id().map(|id| (id, c.endpoints()))),
        )
    }

    /// Sum of published process energies: stored energy of lumped processes
    /// plus the exchange tally of boundaries. Constant for an isolated network.
    pub fn total_energy(&self) -> f64 {
        self.processes.iter().map(|p| p.thermal_energy()).sum()
    }

    pub fn reset(&mut self) -> ThermalResult<()> {
        self.validate()?;
        self.processes.reset_all();
        self.couplings.reset_all();
        self.heaters.reset_all();
        debug!(
            processes = self.processes.len(),
            couplings = self.couplings.len(),
            heaters = self.heaters.len(),
            "thermal network reset"
        );
        Ok(())
    }

    /// Compute and accumulate this step's energy exchange.
    ///
    /// References are checked and every transfer is computed before the
    /// first `add_energy`, so a failure leaves no process touched.
    pub fn calculate(&mut self, time: f64, delta_time: f64) -> ThermalResult<()> {
        self.validate()?;
        self.processes.calculate_all(time, delta_time);
        self.couplings.calculate_all(time, delta_time);
        self.heaters.calculate_all(time, delta_time);

        // Published temperatures are still pre-step here
        let mut transfers = Vec::with_capacity(self.couplings.len() + self.heaters.len());
        for coupling in self.couplings.iter_mut() {
            let (from, to) = (coupling.source(), coupling.target());
            let t_from = self.processes.resolve(from)?.temperature();
            let t_to = self.processes.resolve(to)?.temperature();

            let delta = coupling.conduct(t_from, t_to, delta_time)?;
            transfers.push((from, -delta));
            transfers.push((to, delta));
            trace!(coupling = coupling.name(), delta, "conducted");
        }
        for heater in &self.heaters {
            let delta = heater.delta_energy();
            if delta != 0.0 {
                transfers.push((heater.process(), delta));
            }
        }

        for (process, delta) in transfers {
            self.processes.resolve_mut(process)?.add_energy(delta);
        }
        Ok(())
    }

    /// Publish the step.
    pub fn update(&mut self, time: f64, delta_time: f64) {
        self.processes.update_all(time, delta_time);
        self.couplings.update_all(time, delta_time);
        self.heaters.update_all(time, delta_time);
    }

    /// `calculate` then `update`.
    pub fn step(&mut self, time: f64, delta_time: f64) -> ThermalResult<()> {
        self.calculate(time, delta_time)?;
        self.update(time, delta_time);
        Ok(())
    }
}
