// ─────────────────────────────────────────────────────────────────────
// SatPower Core — Orbital Environment
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Environmental fluxes: seasonal solar, Earth albedo, Earth IR, and the
//! orbit beta angle.

use satpower_math::vec3::{dot, Vec3};
use satpower_types::constants::{
    DAYS_PER_YEAR, EARTH_ALBEDO, EARTH_IR_EMISSION, OBLIQUITY_DEG, R_EARTH, SOLAR_CONSTANT,
};

/// Perihelion day of year.
const PERIHELION_DOY: f64 = 3.0;

/// Annual flux modulation amplitude from orbital eccentricity.
const FLUX_ECCENTRICITY_AMPLITUDE: f64 = 0.0334;

#[derive(Debug, Clone, Copy)]
pub struct OrbitalEnvironment {
    solar_constant: f64,
}

impl Default for OrbitalEnvironment {
    fn default() -> Self {
        OrbitalEnvironment {
            solar_constant: SOLAR_CONSTANT,
        }
    }
}

impl OrbitalEnvironment {
    pub fn new(solar_constant: f64) -> Self {
        OrbitalEnvironment { solar_constant }
    }

    /// Solar flux at the given day of year (W/m^2).
    ///
    /// Varies +-3.34% over the year: peaks near perihelion (day ~3),
    /// minimum near aphelion (day ~186).
    pub fn solar_flux_at_epoch(&self, day_of_year: f64) -> f64 {
        self.solar_constant
            * (1.0
                + FLUX_ECCENTRICITY_AMPLITUDE
                    * (2.0 * std::f64::consts::PI * (day_of_year - PERIHELION_DOY) / DAYS_PER_YEAR)
                        .cos())
    }

    /// Albedo flux reflected from Earth onto the satellite (W/m^2),
    /// spherical view-factor model at the given solar flux.
    pub fn earth_albedo_flux(&self, altitude_m: f64, solar_flux: f64) -> f64 {
        let r = R_EARTH + altitude_m;
        EARTH_ALBEDO * solar_flux * (R_EARTH / r).powi(2)
    }

    /// Earth infrared flux onto the satellite (W/m^2).
    pub fn earth_ir_flux(&self, altitude_m: f64) -> f64 {
        let r = R_EARTH + altitude_m;
        EARTH_IR_EMISSION * (R_EARTH / r).powi(2)
    }

    /// Beta angle (rad): angle between the orbital plane and the sun
    /// direction. Higher |beta| means shorter eclipses.
    pub fn beta_angle(
        &self,
        inclination_rad: f64,
        raan_rad: f64,
        sun_ecliptic_lon_rad: f64,
    ) -> f64 {
        let eps = OBLIQUITY_DEG.to_radians();
        let sun_hat: Vec3 = [
            sun_ecliptic_lon_rad.cos(),
            sun_ecliptic_lon_rad.sin() * eps.cos(),
            sun_ecliptic_lon_rad.sin() * eps.sin(),
        ];

        // Orbital angular momentum direction from RAAN and inclination.
        let h_hat: Vec3 = [
            raan_rad.sin() * inclination_rad.sin(),
            -raan_rad.cos() * inclination_rad.sin(),
            inclination_rad.cos(),
        ];

        dot(&sun_hat, &h_hat).clamp(-1.0, 1.0).asin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flux_peaks_at_perihelion() {
        let env = OrbitalEnvironment::default();
        let perihelion = env.solar_flux_at_epoch(3.0);
        let aphelion = env.solar_flux_at_epoch(3.0 + 365.25 / 2.0);
        assert!(perihelion > aphelion);
        assert!((perihelion - 1361.0 * 1.0334).abs() < 1e-9);
    }

    #[test]
    fn test_flux_max_min_ratio() {
        let env = OrbitalEnvironment::default();
        let mut max = f64::MIN;
        let mut min = f64::MAX;
        for day in 0..3653 {
            let flux = env.solar_flux_at_epoch(day as f64 / 10.0);
            max = max.max(flux);
            min = min.min(flux);
        }
        let expected = (1.0 + 0.0334) / (1.0 - 0.0334);
        assert!(
            ((max / min) - expected).abs() < 1e-6,
            "ratio = {}, expected {expected}",
            max / min
        );
    }

    #[test]
    fn test_albedo_below_direct_flux() {
        let env = OrbitalEnvironment::default();
        let albedo = env.earth_albedo_flux(550e3, 1361.0);
        assert!(albedo > 0.0);
        assert!(albedo < 0.3 * 1361.0);
        // View factor shrinks with altitude.
        assert!(env.earth_albedo_flux(2000e3, 1361.0) < albedo);
    }

    #[test]
    fn test_earth_ir_at_surface_limit() {
        let env = OrbitalEnvironment::default();
        let ir = env.earth_ir_flux(0.0);
        assert!((ir - EARTH_IR_EMISSION).abs() < 1e-12);
        assert!(env.earth_ir_flux(550e3) < ir);
    }

    #[test]
    fn test_beta_angle_equatorial_orbit() {
        let env = OrbitalEnvironment::default();
        // Equatorial orbit, sun at the equinox: both in the X-Y plane
        // with h along +Z, but the sun has no Z component -> beta = 0.
        let beta = env.beta_angle(0.0, 0.0, 0.0);
        assert!(beta.abs() < 1e-12);
    }

    #[test]
    fn test_beta_angle_zero_for_sun_in_orbit_plane() {
        let env = OrbitalEnvironment::default();
        // RAAN 0, any inclination: the orbit plane contains +X, which is
        // exactly where the sun sits at the equinox.
        let beta = env.beta_angle(97.6_f64.to_radians(), 0.0, 0.0);
        assert!(beta.abs() < 1e-12, "beta = {beta}");
    }

    #[test]
    fn test_beta_angle_bounded() {
        let env = OrbitalEnvironment::default();
        for i in 0..18 {
            for o in 0..36 {
                for l in 0..12 {
                    let beta = env.beta_angle(
                        (i as f64 * 10.0).to_radians(),
                        (o as f64 * 10.0).to_radians(),
                        (l as f64 * 30.0).to_radians(),
                    );
                    assert!(beta.abs() <= std::f64::consts::FRAC_PI_2 + 1e-12);
                }
            }
        }
    }
}
