//! Simulation driver: owns every module and runs the two-phase step.

use std::collections::HashSet;

use hg_controls::{ControlModule, Thermostat};
use hg_core::{
    BranchId, BusId, ControllerId, CouplingId, CpsId, HeaterId, Id, Observable, ProcessId,
    SimulationElement,
};
use hg_electrical::{
    CpsElement, ElectricalBus, ElectricalNetwork, ElectricalTwoPort, TwoPortKind,
};
use hg_graph::IntoEndpoint;
use hg_thermal::{HeaterCooler, ThermalCoupling, ThermalNetwork, ThermalProcess};
use tracing::{debug, info};

use crate::error::{SimError, SimResult};
use crate::execution::{ExecutionManager, Unpaced};
use crate::options::SimOptions;
use crate::query::{ElementKind, ElementRef, Query};
use crate::recorder::{Recorder, RecorderHandle};

/// Anything the driver can search and observe.
pub trait Entity: SimulationElement + Observable {}

impl<T: SimulationElement + Observable> Entity for T {}

struct Binding {
    recorder: Box<dyn Recorder>,
    subjects: Vec<ElementRef>,
}

/// Owns the thermal, electrical and control modules.
///
/// A step runs every `calculate` (controllers first, reading published
/// temperatures), then every `update`, then applies controller commands,
/// advances time and samples the recorders.
pub struct Simulator {
    thermal: ThermalNetwork,
    electrical: ElectricalNetwork,
    control: ControlModule,
    names: HashSet<String>,
    recorders: Vec<Binding>,
    executor: Box<dyn ExecutionManager>,
    time: f64,
    steps: usize,
    record_every: usize,
    is_reset: bool,
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulator {
    pub fn new() -> Self {
        Self {
            thermal: ThermalNetwork::new(),
            electrical: ElectricalNetwork::new(),
            control: ControlModule::new(),
            names: HashSet::new(),
            recorders: Vec::new(),
            executor: Box::new(Unpaced),
            time: 0.0,
            steps: 0,
            record_every: 1,
            is_reset: false,
        }
    }

    pub fn with_executor(mut self, executor: impl ExecutionManager + 'static) -> Self {
        self.executor = Box::new(executor);
        self
    }

    /// Current simulated time (s).
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Steps taken since the last reset.
    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn thermal(&self) -> &ThermalNetwork {
        &self.thermal
    }

    pub fn electrical(&self) -> &ElectricalNetwork {
        &self.electrical
    }

    /// Mutable access for an external power-flow solver to publish results.
    pub fn electrical_mut(&mut self) -> &mut ElectricalNetwork {
        &mut self.electrical
    }

    pub fn control(&self) -> &ControlModule {
        &self.control
    }

    fn claim_name<T>(
        names: &mut HashSet<String>,
        name: &str,
        add: impl FnOnce() -> SimResult<T>,
    ) -> SimResult<T> {
        if names.contains(name) {
            return Err(SimError::DuplicateName {
                name: name.to_string(),
            });
        }
        let out = add()?;
        names.insert(name.to_string());
        Ok(out)
    }

    pub fn add_process(&mut self, process: ThermalProcess) -> SimResult<ProcessId> {
        let name = process.name().to_string();
        let thermal = &mut self.thermal;
        Self::claim_name(&mut self.names, &name, || Ok(thermal.add_process(process)?))
    }

    pub fn add_coupling(&mut self, coupling: ThermalCoupling) -> SimResult<CouplingId> {
        let name = coupling.name().to_string();
        let thermal = &mut self.thermal;
        Self::claim_name(&mut self.names, &name, || Ok(thermal.add_coupling(coupling)?))
    }

    pub fn add_heater(&mut self, heater: HeaterCooler) -> SimResult<HeaterId> {
        let name = heater.name().to_string();
        let thermal = &mut self.thermal;
        Self::claim_name(&mut self.names, &name, || Ok(thermal.add_heater(heater)?))
    }

    pub fn add_bus(&mut self, bus: ElectricalBus) -> SimResult<BusId> {
        let name = bus.name().to_string();
        let electrical = &mut self.electrical;
        Self::claim_name(&mut self.names, &name, || Ok(electrical.add_bus(bus)?))
    }

    pub fn add_branch(&mut self, branch: ElectricalTwoPort) -> SimResult<BranchId> {
        let name = branch.name().to_string();
        let electrical = &mut self.electrical;
        Self::claim_name(&mut self.names, &name, || Ok(electrical.add_branch(branch)?))
    }

    /// Build and register a branch between two buses.
    pub fn connect(
        &mut self,
        name: impl Into<String>,
        from: impl IntoEndpoint,
        to: impl IntoEndpoint,
        kind: impl Into<TwoPortKind>,
    ) -> SimResult<BranchId> {
        let branch = ElectricalTwoPort::new(name, from, to, kind)?;
        self.add_branch(branch)
    }

    pub fn add_cps_element(&mut self, element: CpsElement) -> SimResult<CpsId> {
        let name = element.name().to_string();
        let electrical = &mut self.electrical;
        Self::claim_name(&mut self.names, &name, || Ok(electrical.add_element(element)?))
    }

    /// Attach a consumer or producer to a non-slack bus.
    pub fn attach(&mut self, bus: BusId, element: CpsId) -> SimResult<()> {
        Ok(self.electrical.attach(bus, element)?)
    }

    pub fn add_thermostat(&mut self, thermostat: Thermostat) -> SimResult<ControllerId> {
        let name = thermostat.name().to_string();
        let control = &mut self.control;
        Self::claim_name(&mut self.names, &name, || Ok(control.add_thermostat(thermostat)?))
    }

    /// Switch a heater directly; effective from the next step.
    pub fn set_heater(&mut self, id: HeaterId, on: bool) -> SimResult<()> {
        Ok(self.thermal.set_heater(id, on)?)
    }

    fn entity(&self, r: ElementRef) -> Option<&dyn Entity> {
        match r.kind {
            ElementKind::Process => self.thermal.process(r.id).map(|e| e as &dyn Entity),
            ElementKind::Coupling => self.thermal.coupling(r.id).map(|e| e as &dyn Entity),
            ElementKind::Heater => self.thermal.heater(r.id).map(|e| e as &dyn Entity),
            ElementKind::Bus => self.electrical.bus(r.id).map(|e| e as &dyn Entity),
            ElementKind::Branch => self.electrical.branch(r.id).map(|e| e as &dyn Entity),
            ElementKind::CpsElement => self.electrical.element(r.id).map(|e| e as &dyn Entity),
            ElementKind::Thermostat => self.control.thermostat(r.id).map(|e| e as &dyn Entity),
        }
    }

    fn ids_of(&self, kind: ElementKind) -> Vec<Id> {
        match kind {
            ElementKind::Process => self.thermal.processes().ids().collect(),
            ElementKind::Coupling => self.thermal.couplings().ids().collect(),
            ElementKind::Heater => self.thermal.heaters().ids().collect(),
            ElementKind::Bus => self.electrical.buses().ids().collect(),
            ElementKind::Branch => self.electrical.branches().ids().collect(),
            ElementKind::CpsElement => self.electrical.elements().ids().collect(),
            ElementKind::Thermostat => self.control.thermostats().ids().collect(),
        }
    }

    /// Name of a registered element.
    pub fn name_of(&self, r: ElementRef) -> Option<&str> {
        self.entity(r).map(|e| e.name())
    }

    /// Current value of `attribute` on `r`.
    pub fn observe(&self, r: ElementRef, attribute: &str) -> Option<f64> {
        self.entity(r).and_then(|e| e.attribute(attribute))
    }

    /// Elements matching every filter of `query`, grouped by kind in
    /// registration order.
    pub fn find(&self, query: &Query) -> Vec<ElementRef> {
        let mut out = Vec::new();
        for kind in ElementKind::ALL {
            if !query.admits_kind(kind) {
                continue;
            }
            for id in self.ids_of(kind) {
                let r = ElementRef::new(kind, id);
                let Some(e) = self.entity(r) else { continue };
                if query.name.as_deref().is_some_and(|n| n != e.name()) {
                    continue;
                }
                if query
                    .has_attribute
                    .as_deref()
                    .is_some_and(|a| !e.has_attribute(a))
                {
                    continue;
                }
                if let Some((center, radius)) = &query.near {
                    match e.position() {
                        Some(p) if center.distance_to(p) <= *radius => {}
                        _ => continue,
                    }
                }
                out.push(r);
            }
        }
        out
    }

    /// Attach a recorder to `subjects`. Every subject must expose the
    /// recorder's attribute.
    pub fn record<R: Recorder>(
        &mut self,
        mut recorder: R,
        subjects: &[ElementRef],
    ) -> SimResult<RecorderHandle<R>> {
        let mut names = Vec::with_capacity(subjects.len());
        for r in subjects {
            let e = self.entity(*r).ok_or(SimError::UnknownElement {
                kind: r.kind,
                id: r.id,
            })?;
            if !e.has_attribute(recorder.attribute()) {
                return Err(SimError::UnknownAttribute {
                    subject: e.name().to_string(),
                    attribute: recorder.attribute().to_string(),
                });
            }
            names.push(e.name().to_string());
        }

        let index = self.recorders.len();
        if self.is_reset {
            recorder.on_reset(&names);
        }
        self.recorders.push(Binding {
            recorder: Box::new(recorder),
            subjects: subjects.to_vec(),
        });
        if self.is_reset {
            self.sample_one(index);
        }
        Ok(RecorderHandle::new(index))
    }

    pub fn recorder<R: Recorder>(&self, handle: RecorderHandle<R>) -> Option<&R> {
        self.recorders
            .get(handle.index)
            .and_then(|b| b.recorder.as_any().downcast_ref::<R>())
    }

    fn sample_one(&mut self, index: usize) {
        let time = self.time;
        let values: Vec<(String, Option<f64>)> = {
            let binding = &self.recorders[index];
            let attribute = binding.recorder.attribute();
            binding
                .subjects
                .iter()
                .filter_map(|r| self.entity(*r))
                .map(|e| (e.name().to_string(), e.attribute(attribute)))
                .collect()
        };
        let recorder = &mut self.recorders[index].recorder;
        recorder.on_step(time);
        for (subject, value) in values {
            recorder.on_value(&subject, time, value);
        }
    }

    fn sample(&mut self) {
        for index in 0..self.recorders.len() {
            self.sample_one(index);
        }
    }

    /// Check every cross-module reference without touching any state.
    pub fn validate(&self) -> SimResult<()> {
        self.thermal.validate()?;
        self.electrical.validate()?;
        self.control.validate(&self.thermal)?;
        Ok(())
    }

    /// Validate references, restore every element to its initial state and
    /// take the t = 0 sample.
    pub fn reset(&mut self) -> SimResult<()> {
        self.thermal.reset()?;
        self.electrical.reset()?;
        self.control.reset(&self.thermal)?;
        self.time = 0.0;
        self.steps = 0;
        self.executor.reset();

        for i in 0..self.recorders.len() {
            let names: Vec<String> = self.recorders[i]
                .subjects
                .iter()
                .filter_map(|r| self.entity(*r).map(|e| e.name().to_string()))
                .collect();
            self.recorders[i].recorder.on_reset(&names);
        }
        self.is_reset = true;
        self.sample();
        info!(
            names = self.names.len(),
            recorders = self.recorders.len(),
            "simulation reset"
        );
        Ok(())
    }

    /// Advance by `delta_time` seconds. Resets first if needed.
    ///
    /// A failed step publishes nothing: references are validated before the
    /// calculate sweep and all fallible work happens before the first update.
    pub fn step(&mut self, delta_time: f64) -> SimResult<()> {
        if !(delta_time.is_finite() && delta_time >= 0.0) {
            return Err(SimError::InvalidArg {
                what: "delta_time must be finite and non-negative",
            });
        }
        if !self.is_reset {
            self.reset()?;
        }
        // Elements added since the last reset are only checked here
        self.validate()?;
        let time = self.time;
        self.executor.preprocess();

        self.control.calculate(&self.thermal, time, delta_time)?;
        self.thermal.calculate(time, delta_time)?;
        self.electrical.calculate(time, delta_time);

        self.thermal.update(time, delta_time);
        self.electrical.update(time, delta_time);
        for cmd in self.control.update(time, delta_time) {
            self.thermal.set_heater(cmd.heater, cmd.on)?;
        }

        self.time += delta_time;
        self.steps += 1;
        if self.steps % self.record_every == 0 {
            self.sample();
        }
        self.executor.postprocess(delta_time);
        debug!(time = self.time, step = self.steps, "step");
        Ok(())
    }

    /// Step by `delta_time` until `t_end` is reached. Returns the number of
    /// steps taken.
    pub fn run(&mut self, t_end: f64, delta_time: f64) -> SimResult<usize> {
        if !(delta_time.is_finite() && delta_time > 0.0) {
            return Err(SimError::InvalidArg {
                what: "delta_time must be positive",
            });
        }
        if !self.is_reset {
            self.reset()?;
        }
        // Tolerate rounding in the accumulated time
        let limit = t_end - delta_time * 1e-9;
        let mut taken = 0;
        while self.time < limit {
            self.step(delta_time)?;
            taken += 1;
        }
        Ok(taken)
    }

    /// Reset, then run with `opts`; the final state is always sampled.
    pub fn run_with(&mut self, opts: &SimOptions) -> SimResult<usize> {
        opts.validate()?;
        self.record_every = opts.record_every;
        self.reset()?;
        info!(dt = opts.dt, t_end = opts.t_end, "run started");

        let limit = opts.t_end - opts.dt * 1e-9;
        while self.time < limit && self.steps < opts.max_steps {
            self.step(opts.dt)?;
        }
        if self.steps % self.record_every != 0 {
            self.sample();
        }
        self.record_every = 1;
        info!(time = self.time, steps = self.steps, "run finished");
        Ok(self.steps)
    }
}
