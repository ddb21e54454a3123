// ─────────────────────────────────────────────────────────────────────
// SatPower Core — Battery Cell
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Thevenin equivalent-circuit battery cell.
//!
//! Terminal voltage: V = OCV(SoC) - I*R0(T) - V_rc1 - V_rc2, with the
//! R-C branch voltages integrated by the caller. Current is positive on
//! discharge.

use satpower_math::interp::interp1_clamped;
use satpower_types::config::BatteryCellParams;
use satpower_types::constants::R_GAS;
use satpower_types::error::PowerResult;

#[derive(Debug, Clone)]
pub struct BatteryCell {
    params: BatteryCellParams,
    soc_points: Vec<f64>,
    ocv_points: Vec<f64>,
}

impl BatteryCell {
    pub fn new(params: BatteryCellParams) -> PowerResult<Self> {
        params.validate()?;
        let soc_points = params.ocv_soc_table.iter().map(|row| row[0]).collect();
        let ocv_points = params.ocv_soc_table.iter().map(|row| row[1]).collect();
        Ok(BatteryCell {
            params,
            soc_points,
            ocv_points,
        })
    }

    pub fn params(&self) -> &BatteryCellParams {
        &self.params
    }

    pub fn capacity_ah(&self) -> f64 {
        self.params.capacity_ah
    }

    pub fn nominal_voltage(&self) -> f64 {
        self.params.nominal_voltage_v
    }

    pub fn min_voltage(&self) -> f64 {
        self.params.min_voltage_v
    }

    pub fn max_voltage(&self) -> f64 {
        self.params.max_voltage_v
    }

    /// Energy at the nominal voltage (Wh).
    pub fn energy_wh(&self) -> f64 {
        self.params.capacity_ah * self.params.nominal_voltage_v
    }

    /// Open-circuit voltage at the given state of charge.
    ///
    /// The table clamps at its endpoints, so SoC excursions outside [0, 1]
    /// saturate rather than extrapolate.
    pub fn ocv(&self, soc: f64) -> f64 {
        interp1_clamped(&self.soc_points, &self.ocv_points, soc)
    }

    /// Ohmic resistance with Arrhenius temperature correction.
    pub fn r0(&self, temperature_k: f64) -> f64 {
        let p = &self.params;
        p.r0_ohm
            * (p.activation_energy_j / R_GAS
                * (1.0 / temperature_k - 1.0 / p.reference_temp_k))
                .exp()
    }

    /// Terminal voltage under load. Current positive on discharge.
    pub fn terminal_voltage(
        &self,
        soc: f64,
        current_a: f64,
        temperature_k: f64,
        v_rc1: f64,
        v_rc2: f64,
    ) -> f64 {
        self.ocv(soc) - current_a * self.r0(temperature_k) - v_rc1 - v_rc2
    }

    /// R-C branch voltage rates (dV_rc1/dt, dV_rc2/dt) in V/s.
    ///
    /// A branch with zero R or C is inert and holds zero rate.
    pub fn derivatives(&self, current_a: f64, v_rc1: f64, v_rc2: f64) -> (f64, f64) {
        let p = &self.params;
        let dv1 = current_a / p.c1_f - v_rc1 / (p.r1_ohm * p.c1_f);
        let dv2 = if p.r2_ohm > 0.0 && p.c2_f > 0.0 {
            current_a / p.c2_f - v_rc2 / (p.r2_ohm * p.c2_f)
        } else {
            0.0
        };
        (dv1, dv2)
    }
}
