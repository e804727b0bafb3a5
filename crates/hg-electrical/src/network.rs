//! Electrical network: bus, branch and consumer/producer registries.

use hg_core::{BranchId, BusId, CpsId, SimulationElement};
use hg_graph::{IntoEndpoint, Registry, validate_edges};
use tracing::debug;

use crate::bus::{BusType, ElectricalBus};
use crate::cps::CpsElement;
use crate::error::{ElectricalError, ElectricalResult};
use crate::topology::{ElectricalTopology, aggregate_injections};
use crate::two_port::{ElectricalTwoPort, TwoPortKind};

/// Buses, branches and attached elements of one power network.
///
/// Each update publishes the active power the attached elements inject at
/// every non-slack bus. Solving the power flow is left to the consumer of
/// [`ElectricalTopology`].
#[derive(Debug, Clone)]
pub struct ElectricalNetwork {
    buses: Registry<ElectricalBus>,
    branches: Registry<ElectricalTwoPort>,
    elements: Registry<CpsElement>,
    slack: Option<BusId>,
}

impl Default for ElectricalNetwork {
    fn default() -> Self {
        Self::new()
    }
}

impl ElectricalNetwork {
    pub fn new() -> Self {
        Self {
            buses: Registry::new("bus"),
            branches: Registry::new("branch"),
            elements: Registry::new("element"),
            slack: None,
        }
    }

    /// Register a bus. At most one slack bus per network.
    pub fn add_bus(&mut self, bus: ElectricalBus) -> ElectricalResult<BusId> {
        let is_slack = bus.bus_type() == BusType::Slack;
        if is_slack {
            if let Some(existing) = self.slack {
                return Err(ElectricalError::DuplicateSlack {
                    existing,
                    name: bus.name().to_string(),
                });
            }
        }
        let id = self.buses.add(bus)?;
        if is_slack {
            self.slack = Some(id);
        }
        Ok(id)
    }

    pub fn add_branch(&mut self, branch: ElectricalTwoPort) -> ElectricalResult<BranchId> {
        Ok(self.branches.add(branch)?)
    }

    /// Build and register a branch in one call.
    pub fn connect(
        &mut self,
        name: impl Into<String>,
        from: impl IntoEndpoint,
        to: impl IntoEndpoint,
        kind: impl Into<TwoPortKind>,
    ) -> ElectricalResult<BranchId> {
        let branch = ElectricalTwoPort::new(name, from, to, kind)?;
        self.add_branch(branch)
    }

    pub fn add_element(&mut self, element: CpsElement) -> ElectricalResult<CpsId> {
        Ok(self.elements.add(element)?)
    }

    /// Attach a registered element to a non-slack bus.
    ///
    /// The element takes the bus position. Attaching again moves it.
    pub fn attach(&mut self, bus: BusId, element: CpsId) -> ElectricalResult<()> {
        let target = self.buses.resolve(bus)?;
        if target.bus_type() == BusType::Slack {
            return Err(ElectricalError::AttachedToSlack { bus });
        }
        let position = target.position().copied().unwrap_or_default();
        let el = self.elements.resolve_mut(element)?;
        el.attach_to(bus, position);
        debug!(element = el.name(), %bus, "element attached");
        Ok(())
    }

    pub fn slack(&self) -> Option<BusId> {
        self.slack
    }

    pub fn bus(&self, id: BusId) -> Option<&ElectricalBus> {
        self.buses.get(id)
    }

    pub fn bus_mut(&mut self, id: BusId) -> Option<&mut ElectricalBus> {
        self.buses.get_mut(id)
    }

    pub fn branch(&self, id: BranchId) -> Option<&ElectricalTwoPort> {
        self.branches.get(id)
    }

    pub fn branch_mut(&mut self, id: BranchId) -> Option<&mut ElectricalTwoPort> {
        self.branches.get_mut(id)
    }

    pub fn element(&self, id: CpsId) -> Option<&CpsElement> {
        self.elements.get(id)
    }

    pub fn element_mut(&mut self, id: CpsId) -> Option<&mut CpsElement> {
        self.elements.get_mut(id)
    }

    pub fn element_by_name(&self, name: &str) -> Option<&CpsElement> {
        self.elements.by_name(name)
    }

    pub fn bus_by_name(&self, name: &str) -> Option<&ElectricalBus> {
        self.buses.by_name(name)
    }

    pub fn branch_by_name(&self, name: &str) -> Option<&ElectricalTwoPort> {
        self.branches.by_name(name)
    }

    pub fn buses(&self) -> &Registry<ElectricalBus> {
        &self.buses
    }

    pub fn branches(&self) -> &Registry<ElectricalTwoPort> {
        &self.branches
    }

    pub fn elements(&self) -> &Registry<CpsElement> {
        &self.elements
    }

    /// Every branch must end on registered buses.
    pub fn validate(&self) -> ElectricalResult<()> {
        validate_edges(
            &self.buses,
            self.branches.iter().map(|b| (b.name(), b.endpoints())),
        )?;
        Ok(())
    }

    /// Validated solver input.
    pub fn topology(&self) -> ElectricalResult<ElectricalTopology> {
        self.validate()?;
        Ok(ElectricalTopology::build(
            &self.buses,
            &self.branches,
            &self.elements,
        ))
    }

    /// Clear published solutions.
    pub fn reset(&mut self) -> ElectricalResult<()> {
        self.validate()?;
        self.buses.reset_all();
        self.branches.reset_all();
        self.elements.reset_all();
        debug!(
            buses = self.buses.len(),
            branches = self.branches.len(),
            elements = self.elements.len(),
            "electrical network reset"
        );
        Ok(())
    }

    pub fn calculate(&mut self, time: f64, delta_time: f64) {
        self.buses.calculate_all(time, delta_time);
        self.branches.calculate_all(time, delta_time);
        self.elements.calculate_all(time, delta_time);
    }

    /// Publish element energies, then the bus injections they imply.
    pub fn update(&mut self, time: f64, delta_time: f64) {
        self.buses.update_all(time, delta_time);
        self.branches.update_all(time, delta_time);
        self.elements.update_all(time, delta_time);
        if delta_time > 0.0 {
            self.publish_injections(delta_time);
        }
    }

    fn publish_injections(&mut self, delta_time: f64) {
        let injections = aggregate_injections(
            self.buses.len(),
            self.elements
                .iter()
                .map(|e| (e.bus().map(|b| b.slot()), e.delta_energy() / delta_time)),
        );
        for (bus, p) in self.buses.iter_mut().zip(injections) {
            if bus.bus_type() != BusType::Slack {
                bus.set_injection(p);
            }
        }
    }
}
