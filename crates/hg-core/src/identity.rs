//! Element identity: a human name plus a registry id assigned exactly once.

use crate::error::{HgError, HgResult};
use crate::ids::Id;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    name: String,
    id: Option<Id>,
}

impl Identity {
    /// Create an unregistered identity. The name must not be empty.
    pub fn new(name: impl Into<String>) -> HgResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(HgError::EmptyName);
        }
        Ok(Self { name, id: None })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registry id, `None` until the element has been registered.
    pub fn id(&self) -> Option<Id> {
        self.id
    }

    pub fn is_registered(&self) -> bool {
        self.id.is_some()
    }

    /// Assign the registry id. Fails if one was already assigned.
    pub fn assign(&mut self, id: Id) -> HgResult<()> {
        if let Some(existing) = self.id {
            return Err(HgError::IdAlreadyAssigned {
                name: self.name.clone(),
                id: existing,
            });
        }
        self.id = Some(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_name_rejected() {
        assert_eq!(Identity::new(""), Err(HgError::EmptyName));
        assert_eq!(Identity::new("   "), Err(HgError::EmptyName));
    }

    #[test]
    fn id_assigned_once() {
        let mut ident = Identity::new("room").unwrap();
        assert!(!ident.is_registered());

        ident.assign(Id::from_index(3)).unwrap();
        assert_eq!(ident.id(), Some(Id::from_index(3)));

        let err = ident.assign(Id::from_index(4)).unwrap_err();
        assert!(matches!(err, HgError::IdAlreadyAssigned { .. }));
        assert_eq!(ident.id(), Some(Id::from_index(3)));
    }
}
