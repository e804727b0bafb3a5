//! hg-core: stable foundation for heatgrid.
//!
//! Contains:
//! - ids (compact registry IDs for elements)
//! - identity (name + once-assigned ID carried by every element)
//! - element (lifecycle and observation contracts)
//! - error (shared error types)
//! - numeric (Real + tolerances + float checks)
//! - units (uom SI types + constructors, observed attribute units)
//! - position, material (element metadata and material constants)

pub mod element;
pub mod error;
pub mod identity;
pub mod ids;
pub mod material;
pub mod numeric;
pub mod position;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use element::{AttributeSpec, Observable, SimulationElement};
pub use error::{HgError, HgResult};
pub use identity::Identity;
pub use ids::*;
pub use material::Material;
pub use numeric::*;
pub use position::Position;
pub use units::Unit;
