//! Lifecycle and observation contracts shared by every simulated entity.

use crate::identity::Identity;
use crate::ids::Id;
use crate::position::Position;
use crate::units::Unit;

/// Three-phase lifecycle driven by the simulator.
///
/// A step is a `calculate` sweep over every element followed by an `update`
/// sweep. `calculate` may read the published state of other elements but only
/// writes private pending state; `update` commits the element's own pending
/// state and publishes new observable values. Because nothing published
/// changes until the update sweep, the outcome of a step does not depend on
/// the order in which elements are visited.
pub trait SimulationElement {
    fn identity(&self) -> &Identity;

    /// Mutable identity, used by registries to assign the id.
    fn identity_mut(&mut self) -> &mut Identity;

    fn name(&self) -> &str {
        self.identity().name()
    }

    fn id(&self) -> Option<Id> {
        self.identity().id()
    }

    /// Geographic position, if the element carries one.
    fn position(&self) -> Option<&Position> {
        None
    }

    /// Restore the state implied by the construction parameters.
    ///
    /// Idempotent; the result is identical to a freshly constructed element.
    fn reset(&mut self);

    /// Compute this step's pending effect without publishing it.
    fn calculate(&mut self, time: f64, delta_time: f64);

    /// Commit the pending effect and publish observable values.
    fn update(&mut self, time: f64, delta_time: f64);
}

/// Name and unit of one observable attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttributeSpec {
    pub name: &'static str,
    pub unit: Unit,
}

impl AttributeSpec {
    pub const fn new(name: &'static str, unit: Unit) -> Self {
        Self { name, unit }
    }
}

/// Read access to named numeric attributes, used by recorders.
///
/// The attribute list is fixed per element type; a value may be undefined
/// (`None`) before the first update, but the name and unit never change.
pub trait Observable {
    fn attributes(&self) -> &'static [AttributeSpec];

    /// Current value of `name` in SI units.
    ///
    /// Returns `None` when the attribute is unknown or not yet defined.
    fn attribute(&self, name: &str) -> Option<f64>;

    fn has_attribute(&self, name: &str) -> bool {
        self.attributes().iter().any(|a| a.name == name)
    }

    fn attribute_unit(&self, name: &str) -> Option<Unit> {
        self.attributes()
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Clock {
        identity: Identity,
        pending: f64,
        elapsed: f64,
    }

    const CLOCK_ATTRS: &[AttributeSpec] = &[AttributeSpec::new("elapsed", Unit::Joule)];

    impl SimulationElement for Clock {
        fn identity(&self) -> &Identity {
            &self.identity
        }
        fn identity_mut(&mut self) -> &mut Identity {
            &mut self.identity
        }
        fn reset(&mut self) {
            self.pending = 0.0;
            self.elapsed = 0.0;
        }
        fn calculate(&mut self, _time: f64, delta_time: f64) {
            self.pending = self.elapsed + delta_time;
        }
        fn update(&mut self, _time: f64, _delta_time: f64) {
            self.elapsed = self.pending;
        }
    }

    impl Observable for Clock {
        fn attributes(&self) -> &'static [AttributeSpec] {
            CLOCK_ATTRS
        }
        fn attribute(&self, name: &str) -> Option<f64> {
            (name == "elapsed").then_some(self.elapsed)
        }
    }

    #[test]
    fn calculate_does_not_publish() {
        let mut clock = Clock {
            identity: Identity::new("clock").unwrap(),
            pending: 0.0,
            elapsed: 0.0,
        };
        clock.reset();
        clock.calculate(0.0, 0.25);
        assert_eq!(clock.attribute("elapsed"), Some(0.0));
        clock.update(0.0, 0.25);
        assert_eq!(clock.attribute("elapsed"), Some(0.25));
    }

    #[test]
    fn default_observable_helpers() {
        let clock = Clock {
            identity: Identity::new("clock").unwrap(),
            pending: 0.0,
            elapsed: 0.0,
        };
        assert!(clock.has_attribute("elapsed"));
        assert!(!clock.has_attribute("temperature"));
        assert_eq!(clock.attribute_unit("elapsed"), Some(Unit::Joule));
        assert_eq!(clock.name(), "clock");
        assert_eq!(clock.id(), None);
        assert!(clock.position().is_none());
    }
}
