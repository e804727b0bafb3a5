//! Registry of controllers and the step that drives them.

use hg_core::{ControllerId, HeaterId, SimulationElement};
use hg_graph::Registry;
use hg_thermal::ThermalNetwork;
use tracing::debug;

use crate::error::{ControlError, ControlResult};
use crate::thermostat::Thermostat;

/// Switch command produced by a controller, applied after the update sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaterCommand {
    pub heater: HeaterId,
    pub on: bool,
}

#[derive(Debug, Clone)]
pub struct ControlModule {
    thermostats: Registry<Thermostat>,
}

impl Default for ControlModule {
    fn default() -> Self {
        Self::new()
    }
}

impl ControlModule {
    pub fn new() -> Self {
        Self {
            thermostats: Registry::new("thermostat"),
        }
    }

    pub fn add_thermostat(&mut self, thermostat: Thermostat) -> ControlResult<ControllerId> {
        Ok(self.thermostats.add(thermostat)?)
    }

    pub fn thermostat(&self, id: ControllerId) -> Option<&Thermostat> {
        self.thermostats.get(id)
    }

    pub fn thermostat_mut(&mut self, id: ControllerId) -> Option<&mut Thermostat> {
        self.thermostats.get_mut(id)
    }

    pub fn thermostat_by_name(&self, name: &str) -> Option<&Thermostat> {
        self.thermostats.by_name(name)
    }

    pub fn thermostats(&self) -> &Registry<Thermostat> {
        &self.thermostats
    }

    /// Every thermostat must watch an existing process and drive an existing
    /// heater.
    pub fn validate(&self, thermal: &ThermalNetwork) -> ControlResult<()> {
        for t in &self.thermostats {
            if thermal.process(t.process()).is_none() {
                return Err(ControlError::InvalidReference {
                    what: format!("thermostat '{}' watches missing process {}", t.name(), t.process()),
                });
            }
            if thermal.heater(t.actuator()).is_none() {
                return Err(ControlError::InvalidReference {
                    what: format!("thermostat '{}' drives missing heater {}", t.name(), t.actuator()),
                });
            }
        }
        Ok(())
    }

    pub fn reset(&mut self, thermal: &ThermalNetwork) -> ControlResult<()> {
        self.validate(thermal)?;
        self.thermostats.reset_all();
        debug!(thermostats = self.thermostats.len(), "control module reset");
        Ok(())
    }

    /// Read published temperatures and decide. Must run before the thermal
    /// network publishes the step.
    pub fn calculate(
        &mut self,
        thermal: &ThermalNetwork,
        time: f64,
        delta_time: f64,
    ) -> ControlResult<()> {
        for t in self.thermostats.iter_mut() {
            let process = thermal.processes().resolve(t.process())?;
            t.sense(process.temperature());
        }
        self.thermostats.calculate_all(time, delta_time);
        Ok(())
    }

    /// Publish decisions and return the resulting commands.
    pub fn update(&mut self, time: f64, delta_time: f64) -> Vec<HeaterCommand> {
        self.thermostats.update_all(time, delta_time);
        self.thermostats
            .iter()
            .map(|t| HeaterCommand {
                heater: t.actuator(),
                on: t.output(),
            })
            .collect()
    }
}
