//! Simulation driver for heatgrid.
//!
//! Provides:
//! - `Simulator`: owns the thermal, electrical and control modules, enforces
//!   unique names, runs reset and the calculate/update step
//! - `Query`/`find`: search elements by module, kind, name, attribute or
//!   position
//! - `Recorder`: plot and histogram recorders sampled after every step
//! - `ExecutionManager`: unpaced or wall-clock paced stepping
//!
//! # Example
//!
//! ```
//! use hg_core::units::{k, m, m2};
//! use hg_sim::{PlotRecorder, Query, Simulator};
//! use hg_thermal::{ThermalCoupling, ThermalProcess};
//!
//! let mut sim = Simulator::new();
//! let hot = sim
//!     .add_process(ThermalProcess::room("hot_room", m2(50.0), m(2.5), k(333.15)).unwrap())
//!     .unwrap();
//! let cold = sim
//!     .add_process(ThermalProcess::room("cold_room", m2(50.0), m(2.5), k(293.15)).unwrap())
//!     .unwrap();
//! sim.add_coupling(ThermalCoupling::new("wall", 100.0, hot, cold).unwrap())
//!     .unwrap();
//!
//! let subjects = sim.find(&Query::new().has_attribute("temperature"));
//! let temps = sim.record(PlotRecorder::new("temperature"), &subjects).unwrap();
//!
//! sim.reset().unwrap();
//! sim.run(3600.0, 300.0).unwrap();
//!
//! let rec = sim.recorder(temps).unwrap();
//! assert_eq!(rec.x_values().len(), 13);
//! let hot_series = rec.y_values("hot_room").unwrap();
//! assert!((hot_series[12] - 313.195).abs() < 1e-3);
//! ```

pub mod error;
pub mod execution;
pub mod options;
pub mod query;
pub mod recorder;
pub mod simulator;

pub use error::{SimError, SimResult};
pub use execution::{ExecutionManager, RealTime, Unpaced};
pub use options::SimOptions;
pub use query::{ElementKind, ElementRef, Module, Query};
pub use recorder::{HistogramRecorder, PlotRecorder, Recorder, RecorderHandle};
pub use simulator::{Entity, Simulator};
