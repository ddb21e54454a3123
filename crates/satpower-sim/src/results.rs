// ─────────────────────────────────────────────────────────────────────
// SatPower Core — Simulation Results
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Aligned output series and derived statistics for one simulation run.

use ndarray::Array1;
use serde::Serialize;

/// Panel temperature above which the boundary report flags the run (K).
const PANEL_OVERTEMP_K: f64 = 400.0;

/// Aligned time series produced by a simulation run.
///
/// State-of-charge is reported as integrated, without clamping: values
/// outside [0, 1] indicate a failed power budget and are surfaced through
/// the boundary report instead of being hidden.
#[derive(Debug, Clone)]
pub struct SimulationResults {
    /// Seconds from epoch.
    pub time: Array1<f64>,
    /// State of charge, dimensionless.
    pub soc: Array1<f64>,
    /// Array output power after MPPT conditioning (W).
    pub power_generated: Array1<f64>,
    /// Load demand (W).
    pub power_consumed: Array1<f64>,
    /// Battery terminal voltage at the solved bus current (V).
    pub battery_voltage: Array1<f64>,
    /// True when the shadow fraction is at or above one half.
    pub eclipse: Vec<bool>,
    /// Comma-joined names of the active load modes per sample.
    pub modes: Vec<String>,
    /// Panel temperature (K), present when the thermal model ran.
    pub panel_temp_k: Option<Array1<f64>>,
    /// Battery temperature (K), present when the thermal model ran.
    pub battery_temp_k: Option<Array1<f64>>,
    /// Orbital period of the simulated orbit (s).
    pub orbit_period_s: f64,
    /// Pack minimum voltage used by the undervoltage flag (V).
    pub pack_min_voltage_v: f64,
}

/// Non-fatal numerical boundary flags with sample counts.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct BoundaryReport {
    pub soc_out_of_range: bool,
    pub soc_out_of_range_samples: usize,
    pub undervoltage: bool,
    pub undervoltage_samples: usize,
    pub panel_overtemp: bool,
    pub panel_overtemp_samples: usize,
}

/// Scalar summary of one run.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationSummary {
    pub min_soc: f64,
    pub max_soc: f64,
    pub worst_case_dod: f64,
    pub avg_power_generated_w: f64,
    pub avg_power_consumed_w: f64,
    pub power_margin_w: f64,
    pub energy_balance_per_orbit_wh: f64,
    pub eclipse_fraction: f64,
    pub min_battery_voltage_v: f64,
    pub max_battery_voltage_v: f64,
    pub duration_orbits: f64,
    pub boundary: BoundaryReport,
}

impl SimulationResults {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn min_soc(&self) -> f64 {
        self.soc.iter().copied().fold(f64::INFINITY, f64::min)
    }

    pub fn max_soc(&self) -> f64 {
        self.soc.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Worst depth of discharge over the run.
    pub fn worst_case_dod(&self) -> f64 {
        1.0 - self.min_soc()
    }

    /// Mean depth of discharge over the run.
    pub fn mean_dod(&self) -> f64 {
        if self.soc.is_empty() {
            return 0.0;
        }
        self.soc.iter().map(|&s| 1.0 - s).sum::<f64>() / self.soc.len() as f64
    }

    /// Mean generated minus mean consumed power (W).
    pub fn power_margin_w(&self) -> f64 {
        mean(&self.power_generated) - mean(&self.power_consumed)
    }

    /// Fraction of samples spent in eclipse.
    pub fn eclipse_fraction(&self) -> f64 {
        if self.eclipse.is_empty() {
            return 0.0;
        }
        self.eclipse.iter().filter(|&&e| e).count() as f64 / self.eclipse.len() as f64
    }

    /// Simulated duration in orbital periods.
    pub fn duration_orbits(&self) -> f64 {
        if self.time.len() < 2 {
            return 0.0;
        }
        (self.time[self.time.len() - 1] - self.time[0]) / self.orbit_period_s
    }

    /// Net energy per orbit (Wh), trapezoidal integral of the power
    /// balance.
    pub fn energy_balance_per_orbit_wh(&self) -> f64 {
        let n_orbits = self.duration_orbits();
        if n_orbits <= 0.0 {
            return 0.0;
        }
        let mut energy_ws = 0.0;
        for i in 1..self.time.len() {
            let dt = self.time[i] - self.time[i - 1];
            let net_prev = self.power_generated[i - 1] - self.power_consumed[i - 1];
            let net_curr = self.power_generated[i] - self.power_consumed[i];
            energy_ws += 0.5 * (net_prev + net_curr) * dt;
        }
        energy_ws / 3600.0 / n_orbits
    }

    /// Eclipse entry/exit times from the boolean series, at bracketing
    /// sample midpoints: (entries, exits).
    pub fn eclipse_transitions(&self) -> (Vec<f64>, Vec<f64>) {
        let mut entries = Vec::new();
        let mut exits = Vec::new();
        for i in 1..self.eclipse.len() {
            if self.eclipse[i] != self.eclipse[i - 1] {
                let t = 0.5 * (self.time[i - 1] + self.time[i]);
                if self.eclipse[i] {
                    entries.push(t);
                } else {
                    exits.push(t);
                }
            }
        }
        (entries, exits)
    }

    /// Numerical boundary flags: never fatal, always reported.
    pub fn boundary_report(&self) -> BoundaryReport {
        let soc_out = self
            .soc
            .iter()
            .filter(|&&s| !(0.0..=1.0).contains(&s))
            .count();
        let undervolt = self
            .battery_voltage
            .iter()
            .filter(|&&v| v < self.pack_min_voltage_v)
            .count();
        let overtemp = self
            .panel_temp_k
            .as_ref()
            .map(|t| t.iter().filter(|&&v| v > PANEL_OVERTEMP_K).count())
            .unwrap_or(0);

        BoundaryReport {
            soc_out_of_range: soc_out > 0,
            soc_out_of_range_samples: soc_out,
            undervoltage: undervolt > 0,
            undervoltage_samples: undervolt,
            panel_overtemp: overtemp > 0,
            panel_overtemp_samples: overtemp,
        }
    }

    pub fn summary(&self) -> SimulationSummary {
        SimulationSummary {
            min_soc: self.min_soc(),
            max_soc: self.max_soc(),
            worst_case_dod: self.worst_case_dod(),
            avg_power_generated_w: mean(&self.power_generated),
            avg_power_consumed_w: mean(&self.power_consumed),
            power_margin_w: self.power_margin_w(),
            energy_balance_per_orbit_wh: self.energy_balance_per_orbit_wh(),
            eclipse_fraction: self.eclipse_fraction(),
            min_battery_voltage_v: self
                .battery_voltage
                .iter()
                .copied()
                .fold(f64::INFINITY, f64::min),
            max_battery_voltage_v: self
                .battery_voltage
                .iter()
                .copied()
                .fold(f64::NEG_INFINITY, f64::max),
            duration_orbits: self.duration_orbits(),
            boundary: self.boundary_report(),
        }
    }
}

fn mean(values: &Array1<f64>) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.sum() / values.len() as f64
}
