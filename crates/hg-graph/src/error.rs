//! Registry and reference error types.

use hg_core::Id;

pub type GraphResult<T> = Result<T, GraphError>;

/// Registration and reference-resolution errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// An element with this name is already registered.
    DuplicateName { kind: &'static str, name: String },

    /// The element being registered already carries an id.
    AlreadyRegistered { name: String, id: Id },

    /// An element was used as an endpoint before being registered.
    Unregistered { name: String },

    /// Both endpoints of an edge are the same node.
    SameEndpoints { edge: String, node: Id },

    /// An edge endpoint refers to a node that doesn't exist.
    DanglingRef { edge: String, node: Id },

    /// ID not found in a registry.
    IdNotFound { kind: &'static str, id: Id },

    /// Name not found in a registry.
    NameNotFound { kind: &'static str, name: String },

    /// The registry has no id left to hand out.
    CapacityExceeded { kind: &'static str },
}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphError::DuplicateName { kind, name } => {
                write!(f, "Duplicate {} name '{}', names must be unique", kind, name)
            }
            GraphError::AlreadyRegistered { name, id } => {
                write!(f, "Element '{}' is already registered with id {}", name, id)
            }
            GraphError::Unregistered { name } => {
                write!(f, "Element '{}' has not been registered yet", name)
            }
            GraphError::SameEndpoints { edge, node } => {
                write!(f, "Edge '{}' connects node {} to itself", edge, node)
            }
            GraphError::DanglingRef { edge, node } => {
                write!(f, "Edge '{}' refers to non-existent node {}", edge, node)
            }
            GraphError::IdNotFound { kind, id } => {
                write!(f, "No {} with id {}", kind, id)
            }
            GraphError::NameNotFound { kind, name } => {
                write!(f, "No {} named '{}'", kind, name)
            }
            GraphError::CapacityExceeded { kind } => {
                write!(f, "The {} registry is full", kind)
            }
        }
    }
}

impl std::error::Error for GraphError {}
