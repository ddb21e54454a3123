// ─────────────────────────────────────────────────────────────────────
// SatPower Core — Eclipse
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Earth shadow models: sharp cylinder and angular-overlap cone.

use satpower_math::vec3::{dot, norm, scale, sub, unit, Vec3};
use satpower_types::config::EclipseMethod;
use satpower_types::constants::{R_EARTH, R_SUN};

/// Threshold on the shadow fraction separating "sunlit" from "in eclipse"
/// for boolean consumers and transition detection.
pub const ECLIPSE_THRESHOLD: f64 = 0.5;

/// An eclipse boundary crossing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EclipseEvent {
    /// Seconds from epoch, midpoint of the bracketing samples.
    pub time_s: f64,
    pub kind: EclipseEventKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EclipseEventKind {
    Entry,
    Exit,
}

/// Shadow-fraction evaluator over a selected geometry.
#[derive(Debug, Clone, Copy)]
pub struct EclipseModel {
    method: EclipseMethod,
}

impl EclipseModel {
    pub fn new(method: EclipseMethod) -> Self {
        EclipseModel { method }
    }

    pub fn method(&self) -> EclipseMethod {
        self.method
    }

    /// Shadow fraction at a satellite position: 0 = fully sunlit,
    /// 1 = fully shadowed. Positions in ECI meters.
    pub fn shadow_fraction(&self, sat_pos: &Vec3, sun_pos: &Vec3) -> f64 {
        match self.method {
            EclipseMethod::Cylindrical => cylindrical_shadow(sat_pos, sun_pos),
            EclipseMethod::Conical => conical_shadow(sat_pos, sun_pos),
        }
    }

    /// Entry/exit events from threshold crossings of sampled positions.
    pub fn find_transitions(
        &self,
        sat_positions: &[Vec3],
        sun_positions: &[Vec3],
        times: &[f64],
    ) -> Vec<EclipseEvent> {
        let fractions: Vec<f64> = sat_positions
            .iter()
            .zip(sun_positions)
            .map(|(sat, sun)| self.shadow_fraction(sat, sun))
            .collect();

        let mut events = Vec::new();
        for i in 1..fractions.len() {
            let prev_in = fractions[i - 1] >= ECLIPSE_THRESHOLD;
            let curr_in = fractions[i] >= ECLIPSE_THRESHOLD;
            if prev_in != curr_in {
                events.push(EclipseEvent {
                    time_s: 0.5 * (times[i - 1] + times[i]),
                    kind: if curr_in {
                        EclipseEventKind::Entry
                    } else {
                        EclipseEventKind::Exit
                    },
                });
            }
        }
        events
    }
}

/// Sharp shadow: in shadow iff the satellite sits behind Earth along the
/// sun line and within one Earth radius of the shadow axis.
fn cylindrical_shadow(sat_pos: &Vec3, sun_pos: &Vec3) -> f64 {
    let to_sun = unit(&sub(sun_pos, sat_pos));

    // Projection of the satellite position onto the sun direction.
    let proj = dot(sat_pos, &to_sun);
    if proj >= 0.0 {
        return 0.0;
    }

    let rejection = sub(sat_pos, &scale(&to_sun, proj));
    if norm(&rejection) < R_EARTH {
        1.0
    } else {
        0.0
    }
}

/// Angular-overlap shadow with a linear penumbra ramp.
fn conical_shadow(sat_pos: &Vec3, sun_pos: &Vec3) -> f64 {
    let to_earth = [-sat_pos[0], -sat_pos[1], -sat_pos[2]];
    let to_sun = sub(sun_pos, sat_pos);

    let d_earth = norm(&to_earth);
    let d_sun = norm(&to_sun);

    // Angular radii of the two disks as seen from the satellite.
    let theta_earth = (R_EARTH / d_earth).clamp(0.0, 1.0).asin();
    let theta_sun = (R_SUN / d_sun).clamp(0.0, 1.0).asin();

    let cos_sep = dot(&unit(&to_earth), &unit(&to_sun)).clamp(-1.0, 1.0);
    let theta_sep = cos_sep.acos();

    if theta_sep >= theta_earth + theta_sun {
        0.0
    } else if theta_sep <= theta_earth - theta_sun {
        1.0
    } else {
        let ramp = (theta_earth + theta_sun - theta_sep) / (2.0 * theta_sun);
        ramp.clamp(0.0, 1.0)
    }
}
