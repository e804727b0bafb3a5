//! Bulk material constants for lumped thermal bodies.

/// Thermal properties of a homogeneous material (SI).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub name: &'static str,
    /// Specific heat capacity, J/(kg·K).
    pub specific_heat: f64,
    /// Density, kg/m³.
    pub density: f64,
    /// Thermal conductivity, W/(m·K).
    pub conductivity: f64,
}

impl Material {
    pub const AIR: Material = Material::new("air", 1005.0, 1.2, 0.0262);
    pub const WATER: Material = Material::new("water", 4190.0, 1000.0, 0.5985);
    pub const CONCRETE: Material = Material::new("concrete", 750.0, 2403.0, 1.04);
    pub const COMMON_BRICK: Material = Material::new("common brick", 900.0, 1922.0, 1.26);
    pub const GRANITE: Material = Material::new("granite", 790.0, 2400.0, 2.855);
    pub const GLASS: Material = Material::new("glass", 840.0, 2579.0, 1.0);
    pub const GLASS_WOOL: Material = Material::new("glass wool", 670.0, 25.0, 0.04);
    pub const STEEL: Material = Material::new("steel", 490.0, 7700.0, 46.6);
    pub const WOOD: Material = Material::new("wood", 2000.0, 500.0, 0.14);

    pub const fn new(name: &'static str, specific_heat: f64, density: f64, conductivity: f64) -> Self {
        Self {
            name,
            specific_heat,
            density,
            conductivity,
        }
    }

    /// Mass of `volume_m3` cubic metres of this material (kg).
    pub fn mass_of_volume(&self, volume_m3: f64) -> f64 {
        volume_m3 * self.density
    }
}
