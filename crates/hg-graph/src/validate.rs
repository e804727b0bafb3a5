//! Edge validation against a node registry.

use hg_core::SimulationElement;

use crate::endpoint::Endpoints;
use crate::error::{GraphError, GraphResult};
use crate::registry::Registry;

/// Check that every edge endpoint resolves to a registered node.
///
/// Raw-id endpoints are accepted unchecked at edge construction; this is
/// where a dangling reference is finally reported, before the first step.
pub fn validate_edges<'a, N, I>(nodes: &Registry<N>, edges: I) -> GraphResult<()>
where
    N: SimulationElement,
    I: IntoIterator<Item = (&'a str, Endpoints)>,
{
    for (edge, ends) in edges {
        for node in [ends.from, ends.to] {
            if !nodes.contains(node) {
                return Err(GraphError::DanglingRef {
                    edge: edge.to_string(),
                    node,
                });
            }
        }
        // Endpoints::new already refuses this, but edges may be rebuilt from raw parts
        if ends.from == ends.to {
            return Err(GraphError::SameEndpoints {
                edge: edge.to_string(),
                node: ends.from,
            });
        }
    }
    Ok(())
}
