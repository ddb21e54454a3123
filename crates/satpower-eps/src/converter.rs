// ─────────────────────────────────────────────────────────────────────
// SatPower Core — DC-DC Converter
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Converter efficiency: constant, or a load-dependent curve.
//!
//! The load-dependent curve is built from three pieces:
//!   - a quadratic rise from the light-load efficiency to the peak at 50%
//!     of rated power, flat at the junction;
//!   - a quadratic ease-down from the peak to the nominal efficiency at
//!     rated power;
//!   - a mild linear droop past rated, floored at the light-load value.
//! Reference points for the default-style parameters (rated 10 W, peak
//! 0.95, nominal 0.92, light 0.80): eta(0.5 W) = 0.8285, eta(3 W) =
//! 0.9260, eta(8 W) = 0.9392, eta(12 W) = 0.9170.

use satpower_types::config::ConverterConfig;
use satpower_types::error::PowerResult;

/// Fraction of (peak - nominal) lost per half-rated-power of overload.
const OVERLOAD_DROOP: f64 = 0.25;

#[derive(Debug, Clone, Copy)]
pub struct Converter {
    config: ConverterConfig,
}

impl Default for Converter {
    fn default() -> Self {
        Converter {
            config: ConverterConfig::default(),
        }
    }
}

impl Converter {
    pub fn new(config: ConverterConfig) -> PowerResult<Self> {
        config.validate()?;
        Ok(Converter { config })
    }

    pub fn config(&self) -> ConverterConfig {
        self.config
    }

    /// Conversion efficiency at the given load power (W).
    pub fn efficiency_at(&self, load_w: f64) -> f64 {
        match self.config {
            ConverterConfig::Constant(eff) => eff,
            ConverterConfig::LoadDependent {
                rated_w,
                peak_eff,
                light_load_eff,
                nominal_eff,
            } => {
                let p = load_w.max(0.0);
                let half = 0.5 * rated_w;
                if p <= half {
                    let t = p / half;
                    light_load_eff + (peak_eff - light_load_eff) * (1.0 - (1.0 - t) * (1.0 - t))
                } else if p <= rated_w {
                    let u = (p - half) / half;
                    peak_eff - (peak_eff - nominal_eff) * u * u
                } else {
                    let droop = OVERLOAD_DROOP * (peak_eff - nominal_eff) * (p - rated_w) / half;
                    (nominal_eff - droop).max(light_load_eff)
                }
            }
        }
    }

    /// Output power for a given input power at the given load (W).
    pub fn output_power(&self, input_w: f64, load_w: f64) -> f64 {
        input_w * self.efficiency_at(load_w)
    }

    /// Input power required to deliver the given output (W).
    pub fn input_power(&self, output_w: f64, load_w: f64) -> f64 {
        output_w / self.efficiency_at(load_w)
    }
}
