//! Lumped thermal networks for heatgrid.
//!
//! Provides:
//! - `ThermalProcess`: energy reservoir with temperature derived from stored energy
//! - `ThermalCoupling`: conductive link between two processes, held by id
//! - `HeaterCooler`: switchable heat source bound to one process
//! - `ThermalNetwork`: registries plus the energy-conserving step
//!
//! # Example
//!
//! ```
//! use hg_thermal::{ThermalCoupling, ThermalNetwork, ThermalProcess};
//!
//! let mut net = ThermalNetwork::new();
//! let hot = net.add_process(ThermalProcess::new("hot", 1000.0, 350.0, 1.0).unwrap()).unwrap();
//! let cold = net.add_process(ThermalProcess::new("cold", 1000.0, 300.0, 1.0).unwrap()).unwrap();
//! net.add_coupling(ThermalCoupling::new("wall", 10.0, hot, cold).unwrap()).unwrap();
//!
//! net.reset().unwrap();
//! let before = net.total_energy();
//! net.calculate(0.0, 1.0).unwrap();
//! net.update(0.0, 1.0);
//!
//! assert!(net.process(hot).unwrap().temperature() < 350.0);
//! assert!((net.total_energy() - before).abs() < 1e-6);
//! ```

pub mod coupling;
pub mod error;
pub mod heater;
pub mod network;
pub mod process;

pub use coupling::ThermalCoupling;
pub use error::{ThermalError, ThermalResult};
pub use heater::HeaterCooler;
pub use network::ThermalNetwork;
pub use process::{ProcessKind, ThermalProcess};
