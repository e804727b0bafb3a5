//! Compact node → edge adjacency.
//!
//! Built once from a validated edge list; used to answer "which edges touch
//! this node" and to split a network into connected islands.

use std::collections::HashMap;

use hg_core::Id;

use crate::endpoint::Endpoints;

/// One edge incident to a node, with the node at its other end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Incidence {
    pub edge: Id,
    pub neighbor: Id,
}

/// CSR adjacency: node i's incidences are in
/// `incidences[offsets[i]..offsets[i + 1]]`, sorted by edge id.
#[derive(Debug, Clone)]
pub struct Adjacency {
    offsets: Vec<usize>,
    incidences: Vec<Incidence>,
}

impl Adjacency {
    /// Build adjacency for `node_count` nodes. Edges referring to nodes
    /// outside `0..node_count` are skipped; validate first.
    pub fn from_edges<I>(node_count: usize, edges: I) -> Self
    where
        I: IntoIterator<Item = (Id, Endpoints)>,
    {
        let mut per_node: HashMap<usize, Vec<Incidence>> = HashMap::new();
        for (edge, ends) in edges {
            if ends.from.slot() >= node_count || ends.to.slot() >= node_count {
                continue;
            }
            per_node.entry(ends.from.slot()).or_default().push(Incidence {
                edge,
                neighbor: ends.to,
            });
            per_node.entry(ends.to.slot()).or_default().push(Incidence {
                edge,
                neighbor: ends.from,
            });
        }

        // Sort each node's list for determinism
        for list in per_node.values_mut() {
            list.sort_by_key(|inc| (inc.edge, inc.neighbor));
        }

        let mut offsets = Vec::with_capacity(node_count + 1);
        let mut incidences = Vec::new();
        offsets.push(0);
        for node in 0..node_count {
            if let Some(list) = per_node.get(&node) {
                incidences.extend_from_slice(list);
            }
            offsets.push(incidences.len());
        }

        Self {
            offsets,
            incidences,
        }
    }

    pub fn node_count(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Edges touching `node` (empty if out of range).
    pub fn incident(&self, node: Id) -> &[Incidence] {
        let idx = node.slot();
        if idx >= self.node_count() {
            return &[];
        }
        &self.incidences[self.offsets[idx]..self.offsets[idx + 1]]
    }

    pub fn degree(&self, node: Id) -> usize {
        self.incident(node).len()
    }

    /// Connected components, each sorted by id, ordered by their smallest id.
    ///
    /// Isolated nodes form singleton components.
    pub fn components(&self) -> Vec<Vec<Id>> {
        let n = self.node_count();
        let mut seen = vec![false; n];
        let mut out = Vec::new();

        for start in 0..n {
            if seen[start] {
                continue;
            }
            seen[start] = true;
            let mut stack = vec![start];
            let mut members = Vec::new();

            while let Some(node) = stack.pop() {
                let id = Id::from_index(node as u32);
                members.push(id);
                for inc in self.incident(id) {
                    let next = inc.neighbor.slot();
                    if !seen[next] {
                        seen[next] = true;
                        stack.push(next);
                    }
                }
            }

            members.sort();
            out.push(members);
        }
        out
    }
}
