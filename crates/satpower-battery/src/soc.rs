// ─────────────────────────────────────────────────────────────────────
// SatPower Core — State of Charge
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Coulomb-counting state of charge.

/// SoC rate for a given current (1/s). Current positive on discharge.
pub fn dsoc_dt(current_a: f64, capacity_ah: f64) -> f64 {
    -current_a / (capacity_ah * 3600.0)
}

/// Incremental Coulomb counter for step-wise callers outside the ODE path.
///
/// Unlike the integrated simulation state, the counter clamps to [0, 1];
/// it models a fuel gauge, not the physical cell.
#[derive(Debug, Clone, Copy)]
pub struct CoulombCounter {
    capacity_as: f64,
    soc: f64,
}

impl CoulombCounter {
    pub fn new(capacity_ah: f64, initial_soc: f64) -> Self {
        CoulombCounter {
            capacity_as: capacity_ah * 3600.0,
            soc: initial_soc.clamp(0.0, 1.0),
        }
    }

    pub fn soc(&self) -> f64 {
        self.soc
    }

    /// Advance by `dt` seconds at the given current (A, discharge
    /// positive) and return the updated SoC.
    pub fn update(&mut self, current_a: f64, dt: f64) -> f64 {
        self.soc = (self.soc - current_a * dt / self.capacity_as).clamp(0.0, 1.0);
        self.soc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dsoc_dt_full_discharge_in_one_hour() {
        // 1C discharge: the full capacity drains in 3600 s.
        let rate = dsoc_dt(3.35, 3.35);
        assert!((rate * 3600.0 + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_counter_integrates_current() {
        let mut counter = CoulombCounter::new(2.0, 1.0);
        // 1 A discharge for half an hour: 0.5 Ah of 2 Ah = 25%.
        counter.update(1.0, 1800.0);
        assert!((counter.soc() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_counter_clamps() {
        let mut counter = CoulombCounter::new(1.0, 0.05);
        counter.update(10.0, 3600.0);
        assert_eq!(counter.soc(), 0.0);
        counter.update(-10.0, 7200.0);
        assert_eq!(counter.soc(), 1.0);
    }
}
