//! Electrical network data model for heatgrid.
//!
//! Buses carry a fixed role (slack, PV, PQ); branches carry validated line or
//! transformer parameters. Consumers and producers attach to non-slack buses
//! and set their active power each step. [`ElectricalNetwork::topology`] turns the network
//! into the indexed form a power-flow solver consumes:
//!
//! ```
//! use hg_electrical::{ElectricalBus, ElectricalNetwork, TransmissionLine};
//!
//! let mut net = ElectricalNetwork::new();
//! let s = net.add_bus(ElectricalBus::slack("S").unwrap()).unwrap();
//! let l = net.add_bus(ElectricalBus::pq("L").unwrap()).unwrap();
//! net.connect("S-L", s, l, TransmissionLine::new(1.0e3, 0.4, 0.05, 0.0).unwrap())
//!     .unwrap();
//!
//! let topo = net.topology().unwrap();
//! assert_eq!(topo.branch_pairs(), vec![(0, 1)]);
//! assert_eq!(topo.slack_index(), Some(0));
//! ```

pub mod bus;
pub mod cps;
pub mod error;
pub mod network;
pub mod topology;
pub mod two_port;

pub use bus::{BusState, BusType, ElectricalBus};
pub use cps::CpsElement;
pub use error::{ElectricalError, ElectricalResult};
pub use network::ElectricalNetwork;
pub use topology::{BranchEntry, ElectricalTopology};
pub use two_port::{
    AdmittanceStamp, BranchFlows, ElectricalTwoPort, GenTransformer, TransmissionLine,
    TwoPortKind,
};
