//! Edge endpoint capture.
//!
//! An edge (thermal coupling, electrical branch) never holds its nodes; it
//! stores their ids and resolves them through the owning registry. An
//! endpoint can be given either as a registered element, whose id is
//! captured, or as a raw id, which is stored unchecked and validated later by
//! [`validate_edges`](crate::validate_edges).

use hg_core::{Id, SimulationElement};

use crate::error::{GraphError, GraphResult};

/// Something that identifies an edge endpoint.
pub trait IntoEndpoint {
    fn into_endpoint(self) -> GraphResult<Id>;
}

impl IntoEndpoint for Id {
    fn into_endpoint(self) -> GraphResult<Id> {
        Ok(self)
    }
}

impl<T: SimulationElement + ?Sized> IntoEndpoint for &T {
    fn into_endpoint(self) -> GraphResult<Id> {
        self.id().ok_or_else(|| GraphError::Unregistered {
            name: self.name().to_string(),
        })
    }
}

/// The two endpoint ids of a directed edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Endpoints {
    pub from: Id,
    pub to: Id,
}

impl Endpoints {
    /// Capture both endpoints of the edge called `edge`.
    ///
    /// Fails if either endpoint is an unregistered element, or if both
    /// endpoints are the same node.
    pub fn new(edge: &str, from: impl IntoEndpoint, to: impl IntoEndpoint) -> GraphResult<Self> {
        let from = from.into_endpoint()?;
        let to = to.into_endpoint()?;
        if from == to {
            return Err(GraphError::SameEndpoints {
                edge: edge.to_string(),
                node: from,
            });
        }
        Ok(Self { from, to })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hg_core::Identity;

    struct Dummy(Identity);

    impl SimulationElement for Dummy {
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
    fn raw_ids_are_stored_unchecked() {
        let ends = Endpoints::new("e", Id::from_index(40), Id::from_index(41)).unwrap();
        assert_eq!(ends.from.index(), 40);
        assert_eq!(ends.to.index(), 41);
    }

    #[test]
    fn unregistered_entity_rejected() {
        let loose = Dummy(Identity::new("loose").unwrap());
        let err = Endpoints::new("e", &loose, Id::from_index(0)).unwrap_err();
        assert_eq!(
            err,
            GraphError::Unregistered {
                name: "loose".into()
            }
        );
    }

    #[test]
    fn registered_entity_captures_id() {
        let mut node = Dummy(Identity::new("n").unwrap());
        node.identity_mut().assign(Id::from_index(5)).unwrap();
        let ends = Endpoints::new("e", &node, Id::from_index(0)).unwrap();
        assert_eq!(ends.from, Id::from_index(5));
    }

    #[test]
    fn same_endpoints_rejected() {
        let err = Endpoints::new("loop", Id::from_index(2), Id::from_index(2)).unwrap_err();
        assert!(matches!(err, GraphError::SameEndpoints { .. }));
    }
}
