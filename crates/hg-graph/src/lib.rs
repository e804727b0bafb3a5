//! hg-graph: element registries and identity-reference resolution.
//!
//! Provides:
//! - Arena-style registries keyed by `Id`, with unique names
//! - Endpoint capture from a registered element or a raw id
//! - Edge validation (dangling references) at graph-build time
//! - Node → edge adjacency and connected components
//!
//! # Example
//!
//! ```
//! use hg_core::{Identity, SimulationElement};
//! use hg_graph::{Endpoints, Registry};
//!
//! struct Node(Identity);
//!
//! impl SimulationElement for Node {
//!     fn identity(&self) -> &Identity { &self.0 }
//!     fn identity_mut(&mut self) -> &mut Identity { &mut self.0 }
//!     fn reset(&mut self) {}
//!     fn calculate(&mut self, _t: f64, _dt: f64) {}
//!     fn update(&mut self, _t: f64, _dt: f64) {}
//! }
//!
//! let mut nodes = Registry::new("node");
//! let a = nodes.add(Node(Identity::new("a").unwrap())).unwrap();
//! let b = nodes.add(Node(Identity::new("b").unwrap())).unwrap();
//!
//! let edge = Endpoints::new("a-b", nodes.resolve(a).unwrap(), b).unwrap();
//! assert_eq!(edge.from, a);
//! assert_eq!(nodes.len(), 2);
//! ```

pub mod adjacency;
pub mod endpoint;
pub mod error;
pub mod registry;
pub mod validate;

// Re-exports for ergonomics
pub use adjacency::{Adjacency, Incidence};
pub use endpoint::{Endpoints, IntoEndpoint};
pub use error::{GraphError, GraphResult};
pub use registry::Registry;
pub use validate::validate_edges;
