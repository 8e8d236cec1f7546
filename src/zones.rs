//! Closed-form impact zone estimates.
//!
//! The demo-grade "physics" the impact pages display next to the
//! animation: a stony-density sphere, kinetic energy, TNT equivalent, and
//! three nested damage radii scaled off the crater. Simplified scaling for
//! visualization - not a hazard model.

/// Assumed impactor density, kg/m³ (stony asteroid).
const DENSITY_KG_M3: f64 = 3000.0;

/// Joules per kiloton of TNT.
const JOULES_PER_KILOTON: f64 = 4.184e12;

/// Derived impact magnitudes for display alongside the animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpactZones {
    /// Impactor mass in kilograms.
    pub mass_kg: f64,
    /// Kinetic energy in joules.
    pub energy_j: f64,
    /// Energy expressed in kilotons of TNT.
    pub tnt_kilotons: f64,
    /// Crater radius in kilometers.
    pub crater_radius_km: f64,
    /// Blast damage radius in kilometers (3× crater).
    pub blast_radius_km: f64,
    /// Thermal effects radius in kilometers (7× crater).
    pub thermal_radius_km: f64,
}

impl ImpactZones {
    /// Compute all zones from diameter (meters) and velocity (km/s).
    ///
    /// Non-finite or negative inputs clamp to zero, which flows through to
    /// all-zero outputs rather than NaN.
    pub fn from_params(diameter_m: f64, velocity_kms: f64) -> Self {
        let diameter_m = if diameter_m.is_finite() { diameter_m.max(0.0) } else { 0.0 };
        let velocity_kms = if velocity_kms.is_finite() { velocity_kms.max(0.0) } else { 0.0 };

        let radius_m = diameter_m / 2.0;
        let volume_m3 = (4.0 / 3.0) * std::f64::consts::PI * radius_m.powi(3);
        let mass_kg = DENSITY_KG_M3 * volume_m3;

        let velocity_ms = velocity_kms * 1000.0;
        let energy_j = 0.5 * mass_kg * velocity_ms * velocity_ms;

        let crater_radius_km = energy_j.cbrt() / 1000.0;

        Self {
            mass_kg,
            energy_j,
            tnt_kilotons: energy_j / JOULES_PER_KILOTON,
            crater_radius_km,
            blast_radius_km: crater_radius_km * 3.0,
            thermal_radius_km: crater_radius_km * 7.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mass_is_density_times_sphere_volume() {
        let zones = ImpactZones::from_params(100.0, 20.0);
        let expected = 3000.0 * (4.0 / 3.0) * std::f64::consts::PI * 50.0_f64.powi(3);
        assert!((zones.mass_kg - expected).abs() / expected < 1e-12);
    }

    #[test]
    fn test_energy_is_half_m_v_squared() {
        let zones = ImpactZones::from_params(100.0, 20.0);
        let expected = 0.5 * zones.mass_kg * 20_000.0_f64 * 20_000.0;
        assert!((zones.energy_j - expected).abs() / expected < 1e-12);
    }

    #[test]
    fn test_zone_radii_are_nested_multiples() {
        let zones = ImpactZones::from_params(370.0, 30.7);
        assert!((zones.blast_radius_km - zones.crater_radius_km * 3.0).abs() < 1e-9);
        assert!((zones.thermal_radius_km - zones.crater_radius_km * 7.0).abs() < 1e-9);
        assert!(zones.crater_radius_km > 0.0);
    }

    #[test]
    fn test_tnt_conversion() {
        let zones = ImpactZones::from_params(20.0, 19.0);
        assert!((zones.tnt_kilotons - zones.energy_j / 4.184e12).abs() < 1e-6);
    }

    #[test]
    fn test_degenerate_inputs_yield_zero_not_nan() {
        let zones = ImpactZones::from_params(f64::NAN, -5.0);
        assert_eq!(zones.mass_kg, 0.0);
        assert_eq!(zones.energy_j, 0.0);
        assert_eq!(zones.crater_radius_km, 0.0);
    }

    #[test]
    fn test_larger_faster_impactor_hits_harder() {
        let small = ImpactZones::from_params(50.0, 15.0);
        let large = ImpactZones::from_params(500.0, 30.0);
        assert!(large.energy_j > small.energy_j);
        assert!(large.thermal_radius_km > small.thermal_radius_km);
    }
}
