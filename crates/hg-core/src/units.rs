// hg-core/src/units.rs

use uom::si::f64::{
    Area as UomArea, ElectricalConductance as UomConductance,
    ElectricalResistance as UomResistance, Length as UomLength, Mass as UomMass,
    Power as UomPower, ThermodynamicTemperature as UomThermodynamicTemperature,
};

// Public canonical unit types (SI, f64)
pub type Area = UomArea;
pub type Conductance = UomConductance;
pub type Length = UomLength;
pub type Mass = UomMass;
pub type Power = UomPower;
pub type Resistance = UomResistance;
pub type Temperature = UomThermodynamicTemperature;

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn degc(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::degree_celsius;
    Temperature::new::<degree_celsius>(v)
}

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn m2(v: f64) -> Area {
    use uom::si::area::square_meter;
    Area::new::<square_meter>(v)
}

#[inline]
pub fn kg(v: f64) -> Mass {
    use uom::si::mass::kilogram;
    Mass::new::<kilogram>(v)
}

#[inline]
pub fn w(v: f64) -> Power {
    use uom::si::power::watt;
    Power::new::<watt>(v)
}

#[inline]
pub fn ohm(v: f64) -> Resistance {
    use uom::si::electrical_resistance::ohm;
    Resistance::new::<ohm>(v)
}

#[inline]
pub fn siemens(v: f64) -> Conductance {
    use uom::si::electrical_conductance::siemens;
    Conductance::new::<siemens>(v)
}

/// SI magnitude helpers: the core stores plain `f64` in base units.
pub mod si {
    use super::*;

    #[inline]
    pub fn kelvin(t: Temperature) -> f64 {
        t.get::<uom::si::thermodynamic_temperature::kelvin>()
    }

    #[inline]
    pub fn meters(l: Length) -> f64 {
        l.get::<uom::si::length::meter>()
    }

    #[inline]
    pub fn square_meters(a: Area) -> f64 {
        a.get::<uom::si::area::square_meter>()
    }

    #[inline]
    pub fn kilograms(mass: Mass) -> f64 {
        mass.get::<uom::si::mass::kilogram>()
    }

    #[inline]
    pub fn watts(p: Power) -> f64 {
        p.get::<uom::si::power::watt>()
    }

    #[inline]
    pub fn ohms(r: Resistance) -> f64 {
        r.get::<uom::si::electrical_resistance::ohm>()
    }

    #[inline]
    pub fn siemens(g: Conductance) -> f64 {
        g.get::<uom::si::electrical_conductance::siemens>()
    }
}

/// Unit tag attached to an observed attribute.
///
/// Observed values are always plain SI magnitudes; the tag tells a recorder
/// what they mean without going through the quantity system.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Unit {
    Kelvin,
    Joule,
    Watt,
    VoltAmpereReactive,
    Volt,
    Radian,
    /// 1.0 for on/true, 0.0 for off/false.
    Boolean,
}

impl Unit {
    pub fn symbol(self) -> &'static str {
        match self {
            Unit::Kelvin => "K",
            Unit::Joule => "J",
            Unit::Watt => "W",
            Unit::VoltAmpereReactive => "var",
            Unit::Volt => "V",
            Unit::Radian => "rad",
            Unit::Boolean => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_smoke() {
        let _t = k(300.0);
        let _l = m(2.0);
        let _a = m2(50.0);
        let _m = kg(1.0);
        let _p = w(1.0);
        let _r = ohm(0.2);
        let _g = siemens(1e-6);
    }

    #[test]
    fn celsius_converts_to_kelvin() {
        let t = degc(20.0);
        assert!((si::kelvin(t) - 293.15).abs() < 1e-9);
    }

    #[test]
    fn si_magnitudes_round_trip() {
        assert_eq!(si::meters(m(2.5)), 2.5);
        assert_eq!(si::square_meters(m2(50.0)), 50.0);
        assert_eq!(si::kilograms(kg(3.0)), 3.0);
        assert_eq!(si::watts(w(1500.0)), 1500.0);
        assert_eq!(si::ohms(ohm(0.2)), 0.2);
        assert_eq!(si::siemens(siemens(0.5)), 0.5);
    }

    #[test]
    fn unit_symbols() {
        assert_eq!(Unit::Kelvin.symbol(), "K");
        assert_eq!(Unit::Watt.symbol(), "W");
    }
}
