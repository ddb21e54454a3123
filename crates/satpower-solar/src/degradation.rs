// ─────────────────────────────────────────────────────────────────────
// SatPower Core — Radiation Degradation
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! JPL remaining-factor radiation degradation.
//!
//! Datasheets pin the remaining Pmax fraction at 1e14 and 1e15 equivalent
//! 1 MeV electron fluences; between and beyond the pins the factor is
//! log-linear in fluence.

/// Degrade a beginning-of-life power by accumulated fluence (e-/cm^2).
pub fn apply_radiation_degradation(
    power_bol_w: f64,
    fluence_1mev: f64,
    remaining_factor_1e14: f64,
    remaining_factor_1e15: f64,
) -> f64 {
    if fluence_1mev <= 0.0 {
        return power_bol_w;
    }

    let log_f = fluence_1mev.log10();
    let rf = if log_f <= 14.0 {
        1.0 - (1.0 - remaining_factor_1e14) * (log_f / 14.0)
    } else if log_f <= 15.0 {
        let t = log_f - 14.0;
        remaining_factor_1e14 + t * (remaining_factor_1e15 - remaining_factor_1e14)
    } else {
        let slope = remaining_factor_1e15 - remaining_factor_1e14;
        remaining_factor_1e15 + slope * (log_f - 15.0)
    };

    power_bol_w * rf.clamp(0.0, 1.0)
}
