// ─────────────────────────────────────────────────────────────────────
// SatPower Core — MPPT
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Maximum power point tracker conditioning efficiency.

use satpower_types::config::MpptConfig;
use satpower_types::error::PowerResult;

#[derive(Debug, Clone, Copy)]
pub struct MpptModel {
    config: MpptConfig,
}

impl MpptModel {
    pub fn new(config: MpptConfig) -> PowerResult<Self> {
        config.validate()?;
        Ok(MpptModel { config })
    }

    pub fn config(&self) -> MpptConfig {
        self.config
    }

    /// Tracking efficiency at the given array power (W).
    ///
    /// The power-dependent curve starts at `min_eff` for a dark array and
    /// saturates exponentially toward `peak_eff` as power approaches the
    /// rated level.
    pub fn tracking_efficiency(&self, power_w: f64) -> f64 {
        match self.config {
            MpptConfig::Constant(eff) => eff,
            MpptConfig::PowerDependent {
                peak_eff,
                min_eff,
                rated_w,
            } => peak_eff - (peak_eff - min_eff) * (-5.0 * power_w.max(0.0) / rated_w).exp(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_is_flat() {
        let mppt = MpptModel::new(MpptConfig::Constant(0.97)).unwrap();
        assert_eq!(mppt.tracking_efficiency(0.0), 0.97);
        assert_eq!(mppt.tracking_efficiency(100.0), 0.97);
    }

    #[test]
    fn test_power_dependent_endpoints() {
        let mppt = MpptModel::new(MpptConfig::PowerDependent {
            peak_eff: 0.97,
            min_eff: 0.85,
            rated_w: 20.0,
        })
        .unwrap();
        assert!((mppt.tracking_efficiency(0.0) - 0.85).abs() < 1e-12);
        // At rated power the exponential has decayed to exp(-5).
        let at_rated = mppt.tracking_efficiency(20.0);
        assert!((at_rated - (0.97 - 0.12 * (-5.0_f64).exp())).abs() < 1e-12);
        assert!(at_rated > 0.969);
    }

    #[test]
    fn test_power_dependent_monotone() {
        let mppt = MpptModel::new(MpptConfig::PowerDependent {
            peak_eff: 0.97,
            min_eff: 0.85,
            rated_w: 20.0,
        })
        .unwrap();
        let mut prev = 0.0;
        for i in 0..100 {
            let eff = mppt.tracking_efficiency(i as f64 * 0.5);
            assert!(eff >= prev);
            assert!(eff <= 0.97);
            prev = eff;
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(MpptModel::new(MpptConfig::PowerDependent {
            peak_eff: 0.8,
            min_eff: 0.9,
            rated_w: 20.0,
        })
        .is_err());
    }
}
