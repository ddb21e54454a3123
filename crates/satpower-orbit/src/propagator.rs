// ─────────────────────────────────────────────────────────────────────
// SatPower Core — Orbit Propagator
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Analytical circular Kepler propagation with optional J2 RAAN drift.

use ndarray::{Array1, Array2};
use satpower_math::vec3::Vec3;
use satpower_types::constants::{J2, MU_EARTH, R_EARTH};
use satpower_types::error::{PowerError, PowerResult};

/// Satellite trajectory sampled at one or more times.
#[derive(Debug, Clone)]
pub struct OrbitState {
    /// Sample times, seconds from epoch.
    pub time: Array1<f64>,
    /// ECI positions (N, 3) in meters.
    pub position: Array2<f64>,
    /// ECI velocities (N, 3) in m/s.
    pub velocity: Array2<f64>,
}

impl OrbitState {
    /// Altitude above the Earth reference sphere (m) for each sample.
    pub fn altitude(&self) -> Array1<f64> {
        Array1::from_iter(self.position.rows().into_iter().map(|r| {
            (r[0] * r[0] + r[1] * r[1] + r[2] * r[2]).sqrt() - R_EARTH
        }))
    }
}

/// Circular orbit defined by semi-major axis, inclination, and RAAN.
///
/// The satellite starts at the ascending node at t = 0. All derived
/// quantities are fixed at construction; the orbit is immutable.
#[derive(Debug, Clone)]
pub struct Orbit {
    semi_major_axis_m: f64,
    inclination_rad: f64,
    raan_rad: f64,
    mean_motion: f64,
    raan_rate: f64,
    j2_enabled: bool,
}

impl Orbit {
    pub fn new(
        semi_major_axis_m: f64,
        inclination_rad: f64,
        raan_rad: f64,
        j2_enabled: bool,
    ) -> PowerResult<Self> {
        if !semi_major_axis_m.is_finite() || semi_major_axis_m <= R_EARTH {
            return Err(PowerError::InvalidConfig(format!(
                "semi-major axis must exceed the Earth radius, got {semi_major_axis_m} m"
            )));
        }
        let mean_motion = (MU_EARTH / semi_major_axis_m.powi(3)).sqrt();

        // Secular J2 nodal regression.
        let raan_rate = if j2_enabled {
            -1.5 * mean_motion * J2 * (R_EARTH / semi_major_axis_m).powi(2) * inclination_rad.cos()
        } else {
            0.0
        };

        Ok(Orbit {
            semi_major_axis_m,
            inclination_rad,
            raan_rad,
            mean_motion,
            raan_rate,
            j2_enabled,
        })
    }

    /// Circular orbit from altitude (km) and inclination (deg).
    pub fn circular(
        altitude_km: f64,
        inclination_deg: f64,
        raan_deg: f64,
        j2_enabled: bool,
    ) -> PowerResult<Self> {
        Orbit::new(
            R_EARTH + altitude_km * 1000.0,
            inclination_deg.to_radians(),
            raan_deg.to_radians(),
            j2_enabled,
        )
    }

    /// Orbital period (s).
    pub fn period(&self) -> f64 {
        2.0 * std::f64::consts::PI / self.mean_motion
    }

    /// Mean motion (rad/s).
    pub fn mean_motion(&self) -> f64 {
        self.mean_motion
    }

    pub fn semi_major_axis_m(&self) -> f64 {
        self.semi_major_axis_m
    }

    pub fn altitude_m(&self) -> f64 {
        self.semi_major_axis_m - R_EARTH
    }

    pub fn inclination_rad(&self) -> f64 {
        self.inclination_rad
    }

    pub fn j2_enabled(&self) -> bool {
        self.j2_enabled
    }

    /// Nodal regression rate (rad/s); zero when J2 is disabled.
    pub fn raan_rate(&self) -> f64 {
        self.raan_rate
    }

    /// RAAN at time `t` (rad).
    pub fn raan_at(&self, t: f64) -> f64 {
        self.raan_rad + self.raan_rate * t
    }

    /// Position and velocity at a single time, ECI (m, m/s).
    pub fn propagate_one(&self, t: f64) -> (Vec3, Vec3) {
        let a = self.semi_major_axis_m;
        let theta = self.mean_motion * t;
        let raan = self.raan_at(t);

        let (sin_th, cos_th) = theta.sin_cos();
        let (sin_raan, cos_raan) = raan.sin_cos();
        let (sin_inc, cos_inc) = self.inclination_rad.sin_cos();

        // Perifocal position rotated through inclination and RAAN
        // (argument of perigee = 0 for a circular orbit).
        let x_orb = a * cos_th;
        let y_orb = a * sin_th;
        let position = [
            cos_raan * x_orb - sin_raan * cos_inc * y_orb,
            sin_raan * x_orb + cos_raan * cos_inc * y_orb,
            sin_inc * y_orb,
        ];

        let v = a * self.mean_motion;
        let vx_orb = -v * sin_th;
        let vy_orb = v * cos_th;
        let velocity = [
            cos_raan * vx_orb - sin_raan * cos_inc * vy_orb,
            sin_raan * vx_orb + cos_raan * cos_inc * vy_orb,
            sin_inc * vy_orb,
        ];

        (position, velocity)
    }

    /// Propagate to every time in `times` (seconds from epoch).
    pub fn propagate(&self, times: &[f64]) -> OrbitState {
        let n = times.len();
        let mut position = Array2::zeros((n, 3));
        let mut velocity = Array2::zeros((n, 3));
        for (i, &t) in times.iter().enumerate() {
            let (r, v) = self.propagate_one(t);
            for axis in 0..3 {
                position[[i, axis]] = r[axis];
                velocity[[i, axis]] = v[axis];
            }
        }
        OrbitState {
            time: Array1::from_vec(times.to_vec()),
            position,
            velocity,
        }
    }
}
