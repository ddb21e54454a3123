// ─────────────────────────────────────────────────────────────────────
// SatPower Core — Battery Pack
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Series/parallel pack built from identical cells.
//!
//! All quantities are pack-level: resistances scale by Ns/Np, capacitances
//! by Np/Ns (R-C time constants are invariant), capacity by Np, voltages
//! by Ns. The R-C state variables integrated by the simulation are pack
//! voltages, so a 1S1P pack reproduces the bare cell exactly.

use satpower_types::error::{PowerError, PowerResult};

use crate::cell::BatteryCell;

#[derive(Debug, Clone)]
pub struct BatteryPack {
    cell: BatteryCell,
    n_series: usize,
    n_parallel: usize,
    /// Aging derate on capacity, 1.0 when fresh.
    capacity_scale: f64,
}

impl BatteryPack {
    pub fn new(cell: BatteryCell, n_series: usize, n_parallel: usize) -> PowerResult<Self> {
        if n_series == 0 || n_parallel == 0 {
            return Err(PowerError::InvalidConfig(format!(
                "pack configuration must have at least one cell, got {n_series}S{n_parallel}P"
            )));
        }
        Ok(BatteryPack {
            cell,
            n_series,
            n_parallel,
            capacity_scale: 1.0,
        })
    }

    /// A copy of this pack with its capacity derated by `scale`.
    pub fn with_capacity_scale(&self, scale: f64) -> PowerResult<Self> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(PowerError::InvalidConfig(format!(
                "capacity scale must be > 0, got {scale}"
            )));
        }
        let mut pack = self.clone();
        pack.capacity_scale = scale;
        Ok(pack)
    }

    pub fn cell(&self) -> &BatteryCell {
        &self.cell
    }

    pub fn n_series(&self) -> usize {
        self.n_series
    }

    pub fn n_parallel(&self) -> usize {
        self.n_parallel
    }

    pub fn capacity_scale(&self) -> f64 {
        self.capacity_scale
    }

    /// Pack capacity (Ah), including any aging derate.
    pub fn capacity_ah(&self) -> f64 {
        self.cell.capacity_ah() * self.n_parallel as f64 * self.capacity_scale
    }

    /// Pack energy at nominal voltage (Wh), including any aging derate.
    pub fn energy_wh(&self) -> f64 {
        self.capacity_ah() * self.nominal_voltage()
    }

    pub fn nominal_voltage(&self) -> f64 {
        self.cell.nominal_voltage() * self.n_series as f64
    }

    pub fn min_voltage(&self) -> f64 {
        self.cell.min_voltage() * self.n_series as f64
    }

    pub fn max_voltage(&self) -> f64 {
        self.cell.max_voltage() * self.n_series as f64
    }

    fn series_over_parallel(&self) -> f64 {
        self.n_series as f64 / self.n_parallel as f64
    }

    /// Pack open-circuit voltage.
    pub fn ocv(&self, soc: f64) -> f64 {
        self.cell.ocv(soc) * self.n_series as f64
    }

    /// Pack ohmic resistance with temperature correction.
    pub fn r0(&self, temperature_k: f64) -> f64 {
        self.cell.r0(temperature_k) * self.series_over_parallel()
    }

    /// Pack terminal voltage. Current and R-C voltages are pack-level;
    /// current positive on discharge.
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

    /// Pack-level R-C voltage rates (V/s). Current positive on discharge.
    pub fn derivatives(&self, current_a: f64, v_rc1: f64, v_rc2: f64) -> (f64, f64) {
        let p = self.cell.params();
        let sp = self.series_over_parallel();
        let c1 = p.c1_f / sp;
        let r1 = p.r1_ohm * sp;
        let dv1 = current_a / c1 - v_rc1 / (r1 * c1);

        let dv2 = if p.r2_ohm > 0.0 && p.c2_f > 0.0 {
            let c2 = p.c2_f / sp;
            let r2 = p.r2_ohm * sp;
            current_a / c2 - v_rc2 / (r2 * c2)
        } else {
            0.0
        };
        (dv1, dv2)
    }

    /// State-of-charge rate for a pack current (1/s).
    pub fn dsoc_dt(&self, current_a: f64) -> f64 {
        crate::soc::dsoc_dt(current_a, self.capacity_ah())
    }
}
