//! Element search across simulation modules.

use std::fmt;

use hg_core::{Id, Position};

/// Simulation module an element belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Module {
    Thermal,
    Electrical,
    Control,
}

/// Concrete element kind. Ids are unique per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ElementKind {
    Process,
    Coupling,
    Heater,
    Bus,
    Branch,
    CpsElement,
    Thermostat,
}

impl ElementKind {
    pub const ALL: [ElementKind; 7] = [
        ElementKind::Process,
        ElementKind::Coupling,
        ElementKind::Heater,
        ElementKind::Bus,
        ElementKind::Branch,
        ElementKind::CpsElement,
        ElementKind::Thermostat,
    ];

    pub fn module(self) -> Module {
        match self {
            ElementKind::Process | ElementKind::Coupling | ElementKind::Heater => Module::Thermal,
            ElementKind::Bus | ElementKind::Branch | ElementKind::CpsElement => {
                Module::Electrical
            }
            ElementKind::Thermostat => Module::Control,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ElementKind::Process => "process",
            ElementKind::Coupling => "coupling",
            ElementKind::Heater => "heater",
            ElementKind::Bus => "bus",
            ElementKind::Branch => "branch",
            ElementKind::CpsElement => "element",
            ElementKind::Thermostat => "thermostat",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Handle to any registered element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementRef {
    pub kind: ElementKind,
    pub id: Id,
}

impl ElementRef {
    pub fn new(kind: ElementKind, id: Id) -> Self {
        Self { kind, id }
    }
}

/// Conjunction of optional filters; an empty query matches everything.
#[derive(Debug, Clone, Default)]
pub struct Query {
    pub module: Option<Module>,
    pub kind: Option<ElementKind>,
    pub name: Option<String>,
    pub has_attribute: Option<String>,
    /// Center and radius (m). Elements without a position never match.
    pub near: Option<(Position, f64)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn module(mut self, module: Module) -> Self {
        self.module = Some(module);
        self
    }

    pub fn kind(mut self, kind: ElementKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn has_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.has_attribute = Some(attribute.into());
        self
    }

    pub fn near(mut self, center: Position, radius: f64) -> Self {
        self.near = Some((center, radius));
        self
    }

    /// Filters that depend only on the element kind.
    pub(crate) fn admits_kind(&self, kind: ElementKind) -> bool {
        self.module.is_none_or(|m| kind.module() == m) && self.kind.is_none_or(|k| kind == k)
    }
}
