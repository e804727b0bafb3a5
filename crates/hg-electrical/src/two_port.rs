//! Branch elements: transmission lines and generator transformers.
//!
//! Parameters are validated at construction so a topology handed to a
//! solver never carries an impossible branch.

use hg_core::units::{Conductance, Length, Resistance, si};
use hg_core::{
    AttributeSpec, BusId, Identity, Observable, SimulationElement, Unit, ensure_finite,
};
use hg_graph::{Endpoints, IntoEndpoint};
use num_complex::Complex64;

use crate::error::{ElectricalError, ElectricalResult};

fn check_impedance(x: f64, r: f64) -> ElectricalResult<()> {
    if !(x.is_finite() && x > 0.0) {
        return Err(ElectricalError::NonPositiveReactance { value: x });
    }
    if !(r.is_finite() && r >= 0.0) {
        return Err(ElectricalError::NegativeResistance { value: r });
    }
    Ok(())
}

/// Series impedance `R + jX`.
fn series_admittance(r: f64, x: f64) -> Complex64 {
    Complex64::new(r, x).inv()
}

/// π-equivalent line: series `R + jX`, shunt `jB/2` at each end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransmissionLine {
    /// m
    pub length: f64,
    /// Ω
    pub reactance: f64,
    /// Ω
    pub resistance: f64,
    /// S
    pub charging: f64,
}

impl TransmissionLine {
    pub fn new(length: f64, reactance: f64, resistance: f64, charging: f64) -> ElectricalResult<Self> {
        if !(length.is_finite() && length > 0.0) {
            return Err(ElectricalError::NonPositiveLength { value: length });
        }
        if !(charging.is_finite() && charging >= 0.0) {
            return Err(ElectricalError::NegativeCharging { value: charging });
        }
        check_impedance(reactance, resistance)?;
        Ok(Self {
            length,
            reactance,
            resistance,
            charging,
        })
    }

    pub fn from_quantities(
        length: Length,
        reactance: Resistance,
        resistance: Resistance,
        charging: Conductance,
    ) -> ElectricalResult<Self> {
        Self::new(
            si::meters(length),
            si::ohms(reactance),
            si::ohms(resistance),
            si::siemens(charging),
        )
    }
}

/// Series impedance followed by an ideal `1:k` transformer at the to-bus end;
/// `k` carries tap ratio and phase shift.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenTransformer {
    pub k_factor: Complex64,
    /// Ω
    pub reactance: f64,
    /// Ω
    pub resistance: f64,
}

impl GenTransformer {
    pub fn new(k_factor: Complex64, reactance: f64, resistance: f64) -> ElectricalResult<Self> {
        ensure_finite(k_factor.re, "k_factor real part")?;
        ensure_finite(k_factor.im, "k_factor imaginary part")?;
        if k_factor.norm_sqr() == 0.0 {
            return Err(ElectricalError::ZeroKFactor);
        }
        check_impedance(reactance, resistance)?;
        Ok(Self {
            k_factor,
            reactance,
            resistance,
        })
    }

    /// Real tap ratio, no phase shift.
    pub fn with_ratio(ratio: f64, reactance: f64, resistance: f64) -> ElectricalResult<Self> {
        Self::new(Complex64::new(ratio, 0.0), reactance, resistance)
    }
}

/// Closed set of branch kinds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TwoPortKind {
    Line(TransmissionLine),
    Transformer(GenTransformer),
}

/// Branch contribution to the bus admittance matrix.
///
/// Current injections satisfy `[I_f; I_t] = [[ff, ft]; [tf, tt]] * [V_f; V_t]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdmittanceStamp {
    pub ff: Complex64,
    pub ft: Complex64,
    pub tf: Complex64,
    pub tt: Complex64,
}

impl TwoPortKind {
    pub fn reactance(&self) -> f64 {
        match self {
            TwoPortKind::Line(l) => l.reactance,
            TwoPortKind::Transformer(t) => t.reactance,
        }
    }

    pub fn resistance(&self) -> f64 {
        match self {
            TwoPortKind::Line(l) => l.resistance,
            TwoPortKind::Transformer(t) => t.resistance,
        }
    }

    pub fn admittance_stamp(&self) -> AdmittanceStamp {
        match self {
            TwoPortKind::Line(l) => {
                let y = series_admittance(l.resistance, l.reactance);
                let half_shunt = Complex64::new(0.0, l.charging / 2.0);
                AdmittanceStamp {
                    ff: y + half_shunt,
                    ft: -y,
                    tf: -y,
                    tt: y + half_shunt,
                }
            }
            TwoPortKind::Transformer(t) => {
                let y = series_admittance(t.resistance, t.reactance);
                let k = t.k_factor;
                AdmittanceStamp {
                    ff: y,
                    ft: -y / k,
                    tf: -y / k.conj(),
                    tt: y / k.norm_sqr(),
                }
            }
        }
    }
}

impl From<TransmissionLine> for TwoPortKind {
    fn from(line: TransmissionLine) -> Self {
        TwoPortKind::Line(line)
    }
}

impl From<GenTransformer> for TwoPortKind {
    fn from(transformer: GenTransformer) -> Self {
        TwoPortKind::Transformer(transformer)
    }
}

/// Power flowing into the branch at each terminal, as published by a solver.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BranchFlows {
    pub pij: Option<f64>,
    pub qij: Option<f64>,
    pub pji: Option<f64>,
    pub qji: Option<f64>,
}

const BRANCH_ATTRS: &[AttributeSpec] = &[
    AttributeSpec::new("pij", Unit::Watt),
    AttributeSpec::new("qij", Unit::VoltAmpereReactive),
    AttributeSpec::new("pji", Unit::Watt),
    AttributeSpec::new("qji", Unit::VoltAmpereReactive),
];

/// A branch between two buses.
#[derive(Debug, Clone)]
pub struct ElectricalTwoPort {
    identity: Identity,
    ends: Endpoints,
    kind: TwoPortKind,
    flows: BranchFlows,
}

impl ElectricalTwoPort {
    pub fn new(
        name: impl Into<String>,
        from: impl IntoEndpoint,
        to: impl IntoEndpoint,
        kind: impl Into<TwoPortKind>,
    ) -> ElectricalResult<Self> {
        let identity = Identity::new(name)?;
        let ends = Endpoints::new(identity.name(), from, to)?;
        Ok(Self {
            identity,
            ends,
            kind: kind.into(),
            flows: BranchFlows::default(),
        })
    }

    pub fn endpoints(&self) -> Endpoints {
        self.ends
    }

    pub fn from_bus(&self) -> BusId {
        self.ends.from
    }

    pub fn to_bus(&self) -> BusId {
        self.ends.to
    }

    pub fn kind(&self) -> &TwoPortKind {
        &self.kind
    }

    pub fn flows(&self) -> &BranchFlows {
        &self.flows
    }

    pub fn set_flows(&mut self, flows: BranchFlows) {
        self.flows = flows;
    }
}

impl SimulationElement for ElectricalTwoPort {
    fn identity(&self) -> &Identity {
        &self.identity
    }

    fn identity_mut(&mut self) -> &mut Identity {
        &mut self.identity
    }

    fn reset(&mut self) {
        self.flows = BranchFlows::default();
    }

    fn calculate(&mut self, _time: f64, _delta_time: f64) {}

    fn update(&mut self, _time: f64, _delta_time: f64) {}
}

impl Observable for ElectricalTwoPort {
    fn attributes(&self) -> &'static [AttributeSpec] {
        BRANCH_ATTRS
    }

    fn attribute(&self, name: &str) -> Option<f64> {
        match name {
            "pij" => self.flows.pij,
            "qij" => self.flows.qij,
            "pji" => self.flows.pji,
            "qji" => self.flows.qji,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hg_core::units::{m, ohm, siemens};
    use hg_core::{HgError, Id};

    fn close(a: Complex64, b: Complex64) -> bool {
        (a - b).norm() < 1e-12
    }

    #[test]
    fn line_validation() {
        assert!(TransmissionLine::new(1000.0, 0.1, 0.01, 1e-6).is_ok());
        assert!(matches!(
            TransmissionLine::new(0.0, 0.1, 0.0, 0.0),
            Err(ElectricalError::NonPositiveLength { .. })
        ));
        assert!(matches!(
            TransmissionLine::new(10.0, 0.1, 0.0, -1e-6),
            Err(ElectricalError::NegativeCharging { .. })
        ));
        assert!(matches!(
            TransmissionLine::new(10.0, 0.0, 0.0, 0.0),
            Err(ElectricalError::NonPositiveReactance { .. })
        ));
        assert!(matches!(
            TransmissionLine::new(10.0, 0.1, -0.1, 0.0),
            Err(ElectricalError::NegativeResistance { .. })
        ));
        assert!(TransmissionLine::new(f64::NAN, 0.1, 0.0, 0.0).is_err());
    }

    #[test]
    fn line_from_quantities() {
        let line =
            TransmissionLine::from_quantities(m(5000.0), ohm(0.4), ohm(0.05), siemens(2e-6))
                .unwrap();
        assert_eq!(line.length, 5000.0);
        assert_eq!(line.charging, 2e-6);
    }

    #[test]
    fn transformer_validation() {
        assert!(matches!(
            GenTransformer::new(Complex64::new(0.0, 0.0), 0.1, 0.0),
            Err(ElectricalError::ZeroKFactor)
        ));
        assert!(GenTransformer::new(Complex64::new(0.0, 1.0), 0.1, 0.0).is_ok());
        assert!(GenTransformer::with_ratio(0.95, -0.1, 0.0).is_err());
        assert!(matches!(
            GenTransformer::new(Complex64::new(f64::NAN, 0.0), 0.1, 0.0),
            Err(ElectricalError::Core(HgError::NonFinite { .. }))
        ));
        assert!(matches!(
            GenTransformer::new(Complex64::new(1.0, f64::INFINITY), 0.1, 0.0),
            Err(ElectricalError::Core(HgError::NonFinite { .. }))
        ));
    }

    #[test]
    fn step_up_tap_scales_the_to_diagonal() {
        // k = 1.05, X = 0.1: Y = -10j on the from side, Y/|k|^2 on the to side
        let t = GenTransformer::with_ratio(1.05, 0.1, 0.0).unwrap();
        let s = TwoPortKind::from(t).admittance_stamp();
        assert!(close(s.ff, Complex64::new(0.0, -10.0)));
        assert!((s.tt.im + 10.0 / 1.1025).abs() < 1e-12);
        assert!(s.tt.norm() < s.ff.norm());
        // Real tap keeps the stamp reciprocal
        assert!(close(s.ft, s.tf));
    }

    #[test]
    fn line_stamp_is_symmetric() {
        let line = TransmissionLine::new(1.0, 0.2, 0.1, 0.04).unwrap();
        let s = TwoPortKind::from(line).admittance_stamp();
        let y = Complex64::new(0.1, 0.2).inv();

        assert!(close(s.ft, -y));
        assert!(close(s.tf, -y));
        assert!(close(s.ff, y + Complex64::new(0.0, 0.02)));
        assert!(close(s.ff, s.tt));
    }

    #[test]
    fn unit_transformer_matches_series_branch() {
        let t = GenTransformer::with_ratio(1.0, 0.2, 0.1).unwrap();
        let s = TwoPortKind::from(t).admittance_stamp();
        let y = Complex64::new(0.1, 0.2).inv();
        assert!(close(s.ff, y));
        assert!(close(s.tt, y));
        assert!(close(s.ft, -y));
        assert!(close(s.tf, -y));
    }

    #[test]
    fn phase_shifter_stamp() {
        let k = Complex64::from_polar(1.05, 0.1);
        let t = GenTransformer::new(k, 0.1, 0.0).unwrap();
        let s = TwoPortKind::from(t).admittance_stamp();
        let y = Complex64::new(0.0, 0.1).inv();

        // Tap on the to side: the from diagonal sees the bare series admittance
        assert!(close(s.ff, y));
        assert!(close(s.tt, y / (1.05 * 1.05)));
        assert!(close(s.ft, -y / k));
        assert!(close(s.tf, -y / k.conj()));
        // Phase shift breaks symmetry
        assert!(!close(s.ft, s.tf));
    }

    #[test]
    fn branch_flows_reset() {
        let line = TransmissionLine::new(1.0, 0.1, 0.0, 0.0).unwrap();
        let mut b =
            ElectricalTwoPort::new("l1", Id::from_index(0), Id::from_index(1), line).unwrap();
        b.set_flows(BranchFlows {
            pij: Some(1.0),
            qij: Some(0.5),
            pji: Some(-0.98),
            qji: Some(-0.45),
        });
        assert_eq!(b.attribute("pji"), Some(-0.98));
        b.reset();
        assert_eq!(b.attribute("pij"), None);
    }

    #[test]
    fn branch_rejects_self_loop() {
        let line = TransmissionLine::new(1.0, 0.1, 0.0, 0.0).unwrap();
        assert!(ElectricalTwoPort::new("l", Id::from_index(2), Id::from_index(2), line).is_err());
    }
}
