// ─────────────────────────────────────────────────────────────────────
// SatPower Core — Battery Aging
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Calendar and cycle capacity fade with Arrhenius temperature
//! acceleration.
//!
//! Cycle fade per equivalent full cycle is pinned at 50% and 100% DoD and
//! interpolated linearly in depth of discharge. Both loss channels share
//! the Arrhenius factor, which doubles roughly every 10 K around room
//! temperature at the default activation energy.

use satpower_types::constants::{R_GAS, T_REF};
use satpower_types::error::{PowerError, PowerResult};

/// Default aging activation energy (J/mol): x2 per ~10 K at 25 C.
pub const DEFAULT_AGING_ACTIVATION_ENERGY_J: f64 = 53_000.0;

#[derive(Debug, Clone, Copy)]
pub struct AgingModel {
    calendar_fade_per_year: f64,
    cycle_fade_per_cycle_50dod: f64,
    cycle_fade_per_cycle_100dod: f64,
    activation_energy_j: f64,
    reference_temp_k: f64,
}

impl AgingModel {
    pub fn new(
        calendar_fade_per_year: f64,
        cycle_fade_per_cycle_50dod: f64,
        cycle_fade_per_cycle_100dod: f64,
    ) -> PowerResult<Self> {
        for (name, value) in [
            ("calendar_fade_per_year", calendar_fade_per_year),
            ("cycle_fade_per_cycle_50dod", cycle_fade_per_cycle_50dod),
            ("cycle_fade_per_cycle_100dod", cycle_fade_per_cycle_100dod),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(PowerError::InvalidConfig(format!(
                    "aging {name} must be finite and >= 0, got {value}"
                )));
            }
        }
        if cycle_fade_per_cycle_100dod < cycle_fade_per_cycle_50dod {
            return Err(PowerError::InvalidConfig(
                "cycle fade at 100% DoD must be >= fade at 50% DoD".to_string(),
            ));
        }
        Ok(AgingModel {
            calendar_fade_per_year,
            cycle_fade_per_cycle_50dod,
            cycle_fade_per_cycle_100dod,
            activation_energy_j: DEFAULT_AGING_ACTIVATION_ENERGY_J,
            reference_temp_k: T_REF,
        })
    }

    /// Override the Arrhenius activation energy (J/mol).
    pub fn with_activation_energy(mut self, activation_energy_j: f64) -> Self {
        self.activation_energy_j = activation_energy_j;
        self
    }

    /// Temperature acceleration on both fade channels. Unity at the
    /// reference temperature; above it aging speeds up.
    pub fn arrhenius_factor(&self, temperature_k: f64) -> f64 {
        (self.activation_energy_j / R_GAS
            * (1.0 / self.reference_temp_k - 1.0 / temperature_k))
            .exp()
    }

    /// Fade per equivalent full cycle at the given depth of discharge.
    pub fn fade_per_cycle(&self, avg_dod: f64) -> f64 {
        let dod = avg_dod.clamp(0.0, 1.0);
        if dod <= 0.5 {
            self.cycle_fade_per_cycle_50dod * (dod / 0.5)
        } else {
            let t = (dod - 0.5) / 0.5;
            self.cycle_fade_per_cycle_50dod
                + t * (self.cycle_fade_per_cycle_100dod - self.cycle_fade_per_cycle_50dod)
        }
    }

    /// Fraction of original capacity remaining after the given history.
    pub fn capacity_remaining(
        &self,
        years: f64,
        n_cycles: f64,
        avg_dod: f64,
        mean_temperature_k: f64,
    ) -> f64 {
        let accel = self.arrhenius_factor(mean_temperature_k);
        let calendar_loss = self.calendar_fade_per_year * years * accel;
        let cycle_loss = self.fade_per_cycle(avg_dod) * n_cycles * accel;
        (1.0 - calendar_loss - cycle_loss).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> AgingModel {
        AgingModel::new(0.02, 1e-4, 5e-4).unwrap()
    }

    #[test]
    fn test_calendar_only() {
        let m = model();
        let remaining = m.capacity_remaining(2.0, 0.0, 0.0, T_REF);
        assert!((remaining - 0.96).abs() < 1e-12);
    }

    #[test]
    fn test_cycle_fade_interpolation() {
        let m = model();
        assert!((m.fade_per_cycle(0.5) - 1e-4).abs() < 1e-18);
        assert!((m.fade_per_cycle(1.0) - 5e-4).abs() < 1e-18);
        assert!((m.fade_per_cycle(0.75) - 3e-4).abs() < 1e-18);
        // Shallow cycling scales down from the 50% pin.
        assert!((m.fade_per_cycle(0.25) - 5e-5).abs() < 1e-18);
    }

    #[test]
    fn test_arrhenius_doubles_per_ten_kelvin() {
        let m = model();
        let at_25c = m.arrhenius_factor(298.15);
        let at_35c = m.arrhenius_factor(308.15);
        assert!((at_25c - 1.0).abs() < 1e-12);
        let ratio = at_35c / at_25c;
        assert!(
            (ratio - 2.0).abs() / 2.0 < 0.05,
            "acceleration ratio = {ratio}"
        );
    }

    #[test]
    fn test_cold_storage_slows_aging() {
        let m = model();
        let warm = m.capacity_remaining(1.0, 100.0, 0.3, 308.15);
        let cool = m.capacity_remaining(1.0, 100.0, 0.3, 288.15);
        assert!(cool > warm);
    }

    #[test]
    fn test_remaining_never_negative() {
        let m = AgingModel::new(0.5, 1e-2, 5e-2).unwrap();
        let remaining = m.capacity_remaining(10.0, 1e4, 1.0, 330.0);
        assert_eq!(remaining, 0.0);
    }

    #[test]
    fn test_rejects_inverted_pins() {
        assert!(AgingModel::new(0.02, 5e-4, 1e-4).is_err());
    }
}
