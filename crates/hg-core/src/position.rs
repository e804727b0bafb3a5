//! Geographic position metadata.
//!
//! Positions have no effect on the physics; they are carried for search
//! (`close to`) and for presentation.

/// Mean Earth radius used for great-circle distances (m).
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    /// Degrees, positive north.
    pub latitude: f64,
    /// Degrees, positive east.
    pub longitude: f64,
    /// Metres above sea level. Ignored by `distance_to`.
    pub altitude: f64,
}

impl Position {
    pub fn new(latitude: f64, longitude: f64, altitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude,
        }
    }

    /// Great-circle (haversine) distance in metres.
    pub fn distance_to(&self, other: &Position) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let d_lat = lat2 - lat1;
        let d_lon = (other.longitude - self.longitude).to_radians();

        let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        EARTH_RADIUS_M * 2.0 * a.sqrt().atan2((1.0 - a).sqrt())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn default_is_origin() {
        assert_eq!(Position::default(), Position::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn distance_is_symmetric_and_zero_on_self() {
        let office = Position::new(46.240301, 7.358394, 566.0);
        let home = Position::new(46.309180, 7.972517, 676.0);

        assert_eq!(office.distance_to(&office), 0.0);
        let d1 = home.distance_to(&office);
        let d2 = office.distance_to(&home);
        assert!((d1 - d2).abs() < 1e-6);
        assert!((d1 - 47_817.528_525_586).abs() < 1e-3, "got {d1}");
    }

    #[test]
    fn quarter_meridian() {
        let equator = Position::new(0.0, 0.0, 0.0);
        let pole = Position::new(90.0, 0.0, 0.0);
        let expected = EARTH_RADIUS_M * std::f64::consts::FRAC_PI_2;
        assert!((equator.distance_to(&pole) - expected).abs() < 1e-6);
    }

    fn coords() -> impl Strategy<Value = Position> {
        (-89.0_f64..89.0, -179.0_f64..179.0).prop_map(|(lat, lon)| Position::new(lat, lon, 0.0))
    }

    proptest! {
        #[test]
        fn distance_is_a_metric(a in coords(), b in coords(), c in coords()) {
            let ab = a.distance_to(&b);
            prop_assert!(ab >= 0.0);
            prop_assert!((ab - b.distance_to(&a)).abs() < 1e-6);
            prop_assert!(ab <= a.distance_to(&c) + c.distance_to(&b) + 1e-3);
        }
    }
}
