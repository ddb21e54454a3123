// ─────────────────────────────────────────────────────────────────────
// SatPower Core — Solar Cell
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Single-diode I-V model with temperature and irradiance dependence.
//!
//! The implicit diode equation is solved by bisection for explicit I-V
//! curves; the fill-factor approximation provides the fast MPP power used
//! on every RHS evaluation.

use satpower_math::root::bisect;
use satpower_types::config::SolarCellParams;
use satpower_types::constants::{K_BOLTZMANN, Q_ELECTRON};
use satpower_types::error::PowerResult;

/// Voltage-grid resolution for the exact MPP search.
const MPP_SCAN_POINTS: usize = 200;

/// Fill-factor clamp range; outside it the approximation is untrustworthy.
const FF_MIN: f64 = 0.5;
const FF_MAX: f64 = 0.95;

/// Fallback fill factor when the normalized Voc collapses.
const FF_FALLBACK: f64 = 0.7;

/// Single-diode solar cell.
#[derive(Debug, Clone)]
pub struct SolarCell {
    params: SolarCellParams,
    /// Thermal voltage at the reference temperature (V).
    vt_ref: f64,
    /// Diode saturation current at the reference temperature (A).
    i0_ref: f64,
}

impl SolarCell {
    pub fn new(params: SolarCellParams) -> PowerResult<Self> {
        params.validate()?;
        let vt_ref =
            params.ideality_factor * K_BOLTZMANN * params.reference_temp_k / Q_ELECTRON;
        let i0_ref = params.isc_a / ((params.voc_v / vt_ref).exp() - 1.0);
        Ok(SolarCell {
            params,
            vt_ref,
            i0_ref,
        })
    }

    pub fn params(&self) -> &SolarCellParams {
        &self.params
    }

    /// Cell area (m^2).
    pub fn area_m2(&self) -> f64 {
        self.params.area_m2()
    }

    pub fn packing_factor(&self) -> f64 {
        self.params.packing_factor
    }

    fn thermal_voltage(&self, temperature_k: f64) -> f64 {
        self.params.ideality_factor * K_BOLTZMANN * temperature_k / Q_ELECTRON
    }

    /// Photocurrent, saturation current, and thermal voltage at the given
    /// conditions.
    fn adjust_for_conditions(&self, irradiance: f64, temperature_k: f64) -> (f64, f64, f64) {
        let p = &self.params;
        let g_ratio = irradiance / p.reference_irradiance_w_m2;
        let dt = temperature_k - p.reference_temp_k;

        let i_ph = (p.isc_a + p.disc_dt_a_per_k * dt) * g_ratio;
        let vt = self.thermal_voltage(temperature_k);

        // Saturation current grows with temperature: T^3 prefactor plus the
        // band-gap Arrhenius term referenced to Voc.
        let i0 = self.i0_ref
            * (temperature_k / p.reference_temp_k).powi(3)
            * (Q_ELECTRON * p.voc_v / (p.ideality_factor * K_BOLTZMANN)
                * (1.0 / p.reference_temp_k - 1.0 / temperature_k))
                .exp();

        (i_ph, i0, vt)
    }

    /// Current at a single voltage from the implicit diode equation.
    fn current_at(&self, i_ph: f64, i0: f64, vt: f64, voltage: f64) -> f64 {
        if i_ph <= 0.0 {
            return 0.0;
        }
        let p = &self.params;
        let residual = |i: f64| {
            i_ph
                - i0 * (((voltage + i * p.series_resistance_ohm) / vt).exp() - 1.0)
                - (voltage + i * p.series_resistance_ohm) / p.shunt_resistance_ohm
                - i
        };
        bisect(residual, 0.0, i_ph * 1.1, 1e-9, 200).unwrap_or(0.0)
    }

    /// I(V) for the given irradiance (W/m^2) and temperature (K).
    pub fn iv_curve(&self, irradiance: f64, temperature_k: f64, voltages: &[f64]) -> Vec<f64> {
        if irradiance <= 0.0 {
            return vec![0.0; voltages.len()];
        }
        let (i_ph, i0, vt) = self.adjust_for_conditions(irradiance, temperature_k);
        voltages
            .iter()
            .map(|&v| self.current_at(i_ph, i0, vt, v))
            .collect()
    }

    /// Maximum power point (V_mp, I_mp) from a scan of the full I-V curve.
    ///
    /// Slower than `power_at_mpp` but exact to the diode model; intended
    /// for analysis, not for the RHS hot path.
    pub fn mpp(&self, irradiance: f64, temperature_k: f64) -> (f64, f64) {
        if irradiance <= 0.0 {
            return (0.0, 0.0);
        }
        let p = &self.params;
        let voc_approx =
            (p.voc_v + p.dvoc_dt_v_per_k * (temperature_k - p.reference_temp_k)).max(0.1);

        let voltages: Vec<f64> = (0..MPP_SCAN_POINTS)
            .map(|i| voc_approx * i as f64 / (MPP_SCAN_POINTS - 1) as f64)
            .collect();
        let currents = self.iv_curve(irradiance, temperature_k, &voltages);

        let mut best = (0.0, 0.0);
        let mut best_power = 0.0;
        for (&v, &i) in voltages.iter().zip(&currents) {
            if v * i > best_power {
                best_power = v * i;
                best = (v, i);
            }
        }
        best
    }

    /// MPP power (W) from the fill-factor approximation.
    ///
    /// Zero for non-positive irradiance; the diode equation is never
    /// evaluated in that case.
    pub fn power_at_mpp(&self, irradiance: f64, temperature_k: f64) -> f64 {
        if irradiance <= 0.0 {
            return 0.0;
        }
        let p = &self.params;
        let g_ratio = irradiance / p.reference_irradiance_w_m2;
        let dt = temperature_k - p.reference_temp_k;

        let isc = (p.isc_a + p.disc_dt_a_per_k * dt) * g_ratio;
        let vt = self.thermal_voltage(temperature_k);
        // Voc shifts linearly with temperature and logarithmically with
        // irradiance.
        let voc = p.voc_v + p.dvoc_dt_v_per_k * dt + vt * g_ratio.max(1e-10).ln();

        if isc <= 0.0 || voc <= 0.0 {
            return 0.0;
        }

        let voc_norm = voc / vt;
        let ff = if voc_norm > 1.0 {
            let ff0 = (voc_norm - (voc_norm + 0.72).ln()) / (voc_norm + 1.0);
            ff0 * (1.0 - p.series_resistance_ohm * isc / voc)
        } else {
            FF_FALLBACK
        };

        isc * voc * ff.clamp(FF_MIN, FF_MAX)
    }
}
