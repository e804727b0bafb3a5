//! Arena-style element registry.

use std::collections::HashMap;

use hg_core::{Id, SimulationElement};

use crate::error::{GraphError, GraphResult};

/// Id for the element stored at slot `len`.
///
/// Slots past `u32::MAX - 1` have no distinct id, so they are refused instead
/// of wrapping onto an existing element.
fn next_id(kind: &'static str, len: usize) -> GraphResult<Id> {
    u32::try_from(len)
        .ok()
        .filter(|index| *index < u32::MAX)
        .map(Id::from_index)
        .ok_or(GraphError::CapacityExceeded { kind })
}

/// Owns every element of one kind, keyed by a contiguous `Id`.
///
/// Elements reference each other only through these ids, so the registry is
/// the single owner of the graph and can reset or drop it as a whole.
#[derive(Debug, Clone)]
pub struct Registry<T> {
    kind: &'static str,
    items: Vec<T>,
    by_name: HashMap<String, Id>,
}

impl<T: SimulationElement> Registry<T> {
    /// Create an empty registry. `kind` names the element kind in errors.
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            items: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// Register an element, assigning its id.
    ///
    /// Fails if the name is taken or the element already carries an id.
    pub fn add(&mut self, mut item: T) -> GraphResult<Id> {
        if let Some(id) = item.id() {
            return Err(GraphError::AlreadyRegistered {
                name: item.name().to_string(),
                id,
            });
        }
        if self.by_name.contains_key(item.name()) {
            return Err(GraphError::DuplicateName {
                kind: self.kind,
                name: item.name().to_string(),
            });
        }

        let id = next_id(self.kind, self.items.len())?;
        item.identity_mut()
            .assign(id)
            .map_err(|_| GraphError::AlreadyRegistered {
                name: item.name().to_string(),
                id,
            })?;
        tracing::debug!(kind = self.kind, name = item.name(), %id, "registered element");

        self.by_name.insert(item.name().to_string(), id);
        self.items.push(item);
        Ok(id)
    }

    /// Get an element by ID (returns None if ID out of bounds).
    pub fn get(&self, id: Id) -> Option<&T> {
        self.items.get(id.slot())
    }

    pub fn get_mut(&mut self, id: Id) -> Option<&mut T> {
        self.items.get_mut(id.slot())
    }

    /// Like [`get`](Self::get), but a missing id is an error.
    pub fn resolve(&self, id: Id) -> GraphResult<&T> {
        let kind = self.kind;
        self.get(id).ok_or(GraphError::IdNotFound { kind, id })
    }

    pub fn resolve_mut(&mut self, id: Id) -> GraphResult<&mut T> {
        let kind = self.kind;
        self.get_mut(id).ok_or(GraphError::IdNotFound { kind, id })
    }

    pub fn id_of(&self, name: &str) -> Option<Id> {
        self.by_name.get(name).copied()
    }

    pub fn by_name(&self, name: &str) -> Option<&T> {
        self.id_of(name).and_then(|id| self.get(id))
    }

    /// Look up an id by name, failing with `NameNotFound`.
    pub fn resolve_name(&self, name: &str) -> GraphResult<Id> {
        self.id_of(name).ok_or_else(|| GraphError::NameNotFound {
            kind: self.kind,
            name: name.to_string(),
        })
    }

    pub fn contains(&self, id: Id) -> bool {
        id.slot() < self.items.len()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Elements in registration order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    pub fn ids(&self) -> impl Iterator<Item = Id> + '_ {
        (0..self.items.len()).map(|i| Id::from_index(i as u32))
    }

    /// Reset every element.
    pub fn reset_all(&mut self) {
        for item in &mut self.items {
            item.reset();
        }
    }

    pub fn calculate_all(&mut self, time: f64, delta_time: f64) {
        for item in &mut self.items {
            item.calculate(time, delta_time);
        }
    }

    pub fn update_all(&mut self, time: f64, delta_time: f64) {
        for item in &mut self.items {
            item.update(time, delta_time);
        }
    }
}

impl<'a, T> IntoIterator for &'a Registry<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
