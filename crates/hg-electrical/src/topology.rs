//! Solver-facing view of an electrical network.

use hg_core::{BranchId, BusId, SimulationElement};
use hg_graph::{Adjacency, Registry};

use crate::bus::{BusType, ElectricalBus};
use crate::cps::CpsElement;
use crate::two_port::{AdmittanceStamp, ElectricalTwoPort};

/// One branch as a solver sees it: dense bus indices plus its stamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BranchEntry {
    pub branch: BranchId,
    pub from: usize,
    pub to: usize,
    pub stamp: AdmittanceStamp,
}

/// Bus roles, branch index pairs and admittance stamps, in registry order.
///
/// Bus index `i` is the bus with `Id::from_index(i)`.
#[derive(Debug, Clone)]
pub struct ElectricalTopology {
    pub bus_types: Vec<BusType>,
    pub branches: Vec<BranchEntry>,
    /// Bus index of each consumer or producer, `None` while unattached.
    pub element_buses: Vec<Option<usize>>,
    adjacency: Adjacency,
}

/// Active power injected at each bus: `P = -A * Pe`, where `A` maps elements
/// to buses and `Pe` is the power each element consumes.
pub(crate) fn aggregate_injections(
    bus_count: usize,
    elements: impl IntoIterator<Item = (Option<usize>, f64)>,
) -> Vec<f64> {
    let mut p = vec![0.0; bus_count];
    for (bus, consumed) in elements {
        if let Some(slot) = bus.filter(|slot| *slot < bus_count) {
            p[slot] -= consumed;
        }
    }
    p
}

impl ElectricalTopology {
    pub(crate) fn build(
        buses: &Registry<ElectricalBus>,
        branches: &Registry<ElectricalTwoPort>,
        elements: &Registry<CpsElement>,
    ) -> Self {
        let bus_types = buses.iter().map(|b| b.bus_type()).collect();
        let entries: Vec<BranchEntry> = branches
            .iter()
            .filter_map(|b| {
                let branch = b.id()?;
                Some(BranchEntry {
                    branch,
                    from: b.from_bus().slot(),
                    to: b.to_bus().slot(),
                    stamp: b.kind().admittance_stamp(),
                })
            })
            .collect();
        let adjacency = Adjacency::from_edges(
            buses.len(),
            branches
                .iter()
                .filter_map(|b| b.id().map(|id| (id, b.endpoints()))),
        );

        let element_buses = elements.iter().map(|e| e.bus().map(|b| b.slot())).collect();

        Self {
            bus_types,
            branches: entries,
            element_buses,
            adjacency,
        }
    }

    pub fn bus_count(&self) -> usize {
        self.bus_types.len()
    }

    /// `true` at PV buses.
    pub fn pv_mask(&self) -> Vec<bool> {
        self.bus_types.iter().map(|t| *t == BusType::PV).collect()
    }

    /// Index of the slack bus, if any.
    pub fn slack_index(&self) -> Option<usize> {
        self.bus_types.iter().position(|t| *t == BusType::Slack)
    }

    /// `(from, to)` bus index per branch.
    pub fn branch_pairs(&self) -> Vec<(usize, usize)> {
        self.branches.iter().map(|b| (b.from, b.to)).collect()
    }

    /// Per-bus active power injection for the given per-element consumed
    /// power (W, indexed like `element_buses`). Unattached elements are
    /// ignored.
    pub fn bus_power(&self, element_power: &[f64]) -> Vec<f64> {
        aggregate_injections(
            self.bus_count(),
            self.element_buses
                .iter()
                .copied()
                .zip(element_power.iter().copied()),
        )
    }

    /// Connected groups of buses. Each island needs its own slack.
    pub fn islands(&self) -> Vec<Vec<BusId>> {
        self.adjacency.components()
    }

    pub fn adjacency(&self) -> &Adjacency {
        &self.adjacency
    }
}
