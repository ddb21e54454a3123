// ─────────────────────────────────────────────────────────────────────
// SatPower Core — Sun Ephemeris
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Annual sun ephemeris: ecliptic longitude advancing once per year,
//! tilted by the obliquity into the equatorial (ECI) frame.

use satpower_math::vec3::Vec3;
use satpower_types::constants::{AU, DAYS_PER_YEAR, DEFAULT_EPOCH_DOY, OBLIQUITY_DEG, SECONDS_PER_DAY};

/// Day of year at which the sun crosses the vernal equinox.
const VERNAL_EQUINOX_DOY: f64 = 80.0;

/// Low-order sun model for power and eclipse geometry.
#[derive(Debug, Clone, Copy)]
pub struct SunEphemeris {
    epoch_day_of_year: f64,
}

impl Default for SunEphemeris {
    fn default() -> Self {
        SunEphemeris {
            epoch_day_of_year: DEFAULT_EPOCH_DOY,
        }
    }
}

impl SunEphemeris {
    pub fn new(epoch_day_of_year: f64) -> Self {
        SunEphemeris { epoch_day_of_year }
    }

    pub fn epoch_day_of_year(&self) -> f64 {
        self.epoch_day_of_year
    }

    /// Day of year at mission time `t` (s), fractional.
    pub fn day_of_year(&self, t: f64) -> f64 {
        self.epoch_day_of_year + t / SECONDS_PER_DAY
    }

    /// Ecliptic longitude (rad), zero at the vernal equinox.
    pub fn ecliptic_longitude(&self, t: f64) -> f64 {
        2.0 * std::f64::consts::PI * (self.day_of_year(t) - VERNAL_EQUINOX_DOY) / DAYS_PER_YEAR
    }

    /// Unit vector toward the sun in ECI.
    pub fn direction_eci(&self, t: f64) -> Vec3 {
        let lon = self.ecliptic_longitude(t);
        let eps = OBLIQUITY_DEG.to_radians();
        [lon.cos(), lon.sin() * eps.cos(), lon.sin() * eps.sin()]
    }

    /// Sun position in ECI (m), at a fixed 1 AU; the seasonal flux model
    /// owns the distance variation.
    pub fn position_eci(&self, t: f64) -> Vec3 {
        let d = self.direction_eci(t);
        [d[0] * AU, d[1] * AU, d[2] * AU]
    }
}
