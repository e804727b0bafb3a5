//! Integration tests for hg-graph.

use hg_core::{Id, Identity, SimulationElement};
use hg_graph::{Adjacency, Endpoints, GraphError, Registry, validate_edges};
use proptest::prelude::*;

struct Node(Identity);

impl Node {
    fn named(name: &str) -> Self {
        Node(Identity::new(name).unwrap())
    }
}

impl SimulationElement for Node {
    fn identity(&self) -> &Identity {
        &self.0
    }
    fn identity_mut(&mut self) -> &mut Identity {
        &mut self.0
    }
    fn reset(&mut self) {}
    fn calculate(&mut self, _time: f64, _delta_time: f64) {}
    fn update(&mut self, _time: f64, _delta_time: f64) {}
}

#[test]
fn entity_and_raw_endpoints_mix() {
    let mut nodes = Registry::new("node");
    let n1 = nodes.add(Node::named("N1")).unwrap();
    let n2 = nodes.add(Node::named("N2")).unwrap();

    // Entity for one end, raw id for the other
    let ends = Endpoints::new("E1", nodes.resolve(n1).unwrap(), n2).unwrap();
    assert_eq!(ends, Endpoints { from: n1, to: n2 });
    assert!(validate_edges(&nodes, [("E1", ends)]).is_ok());
}

#[test]
fn edge_built_before_its_node_is_registered() {
    let mut nodes = Registry::new("node");
    let n1 = nodes.add(Node::named("N1")).unwrap();

    // Raw id for a node that doesn't exist yet
    let future = Id::from_index(1);
    let ends = Endpoints::new("E1", n1, future).unwrap();
    assert!(matches!(
        validate_edges(&nodes, [("E1", ends)]),
        Err(GraphError::DanglingRef { .. })
    ));

    let n2 = nodes.add(Node::named("N2")).unwrap();
    assert_eq!(n2, future);
    assert!(validate_edges(&nodes, [("E1", ends)]).is_ok());
}

#[test]
fn adjacency_over_registry() {
    let mut nodes = Registry::new("node");
    let ids: Vec<Id> = ["A", "B", "C", "D"]
        .iter()
        .map(|n| nodes.add(Node::named(n)).unwrap())
        .collect();

    let edges = [
        (Id::from_index(0), Endpoints::new("AB", ids[0], ids[1]).unwrap()),
        (Id::from_index(1), Endpoints::new("BC", ids[1], ids[2]).unwrap()),
    ];
    let adj = Adjacency::from_edges(nodes.len(), edges);

    assert_eq!(adj.degree(ids[1]), 2);
    assert_eq!(adj.degree(ids[3]), 0);
    assert_eq!(adj.components(), vec![vec![ids[0], ids[1], ids[2]], vec![ids[3]]]);
}

proptest! {
    #[test]
    fn components_partition_nodes(
        n in 1_usize..12,
        raw in prop::collection::vec((0_u32..12, 0_u32..12), 0..20),
    ) {
        let edges: Vec<(Id, Endpoints)> = raw
            .iter()
            .enumerate()
            .filter(|(_, (a, b))| (*a as usize) < n && (*b as usize) < n && a != b)
            .map(|(i, (a, b))| {
                (
                    Id::from_index(i as u32),
                    Endpoints { from: Id::from_index(*a), to: Id::from_index(*b) },
                )
            })
            .collect();
        let adj = Adjacency::from_edges(n, edges.iter().copied());
        let comps = adj.components();

        let mut all: Vec<Id> = comps.iter().flatten().copied().collect();
        all.sort();
        let expected: Vec<Id> = (0..n as u32).map(Id::from_index).collect();
        prop_assert_eq!(all, expected);

        // Every edge stays inside one component
        for (_, ends) in &edges {
            let comp = comps.iter().find(|c| c.contains(&ends.from)).unwrap();
            prop_assert!(comp.contains(&ends.to));
        }
    }
}
