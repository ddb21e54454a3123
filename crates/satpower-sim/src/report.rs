// ─────────────────────────────────────────────────────────────────────
// SatPower Core — Power Budget Report
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Per-subsystem power budget with a pass/fail verdict.

use serde::Serialize;

use satpower_battery::pack::BatteryPack;
use satpower_eps::loads::LoadProfile;

use crate::results::SimulationResults;

/// Budget verdict. The margin is positive only when the average balance
/// closes, the battery never empties, and the DoD stays physical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    PositiveMargin,
    NegativeMargin,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::PositiveMargin => write!(f, "POSITIVE MARGIN"),
            Verdict::NegativeMargin => write!(f, "NEGATIVE MARGIN"),
        }
    }
}

/// One load mode in the budget table.
#[derive(Debug, Clone, Serialize)]
pub struct SubsystemRow {
    pub name: String,
    pub power_w: f64,
    pub duty_cycle: f64,
    pub trigger: String,
    /// Orbit-averaged contribution at the simulated eclipse fraction (W).
    pub orbit_average_w: f64,
}

/// Power budget summary for a mission.
#[derive(Debug, Clone, Serialize)]
pub struct PowerBudgetReport {
    pub mission_name: String,
    pub subsystems: Vec<SubsystemRow>,
    pub avg_generated_w: f64,
    pub avg_consumed_w: f64,
    pub avg_consumed_sunlight_w: f64,
    pub avg_consumed_eclipse_w: f64,
    pub power_margin_w: f64,
    pub eclipse_fraction: f64,
    pub worst_dod: f64,
    pub min_soc: f64,
    pub battery_energy_wh: f64,
    pub energy_balance_per_orbit_wh: f64,
    pub verdict: Verdict,
    /// Conditions that forced a negative verdict; empty when positive.
    pub failing_conditions: Vec<String>,
}

impl PowerBudgetReport {
    pub fn generate(
        results: &SimulationResults,
        loads: &LoadProfile,
        battery: &BatteryPack,
        mission_name: impl Into<String>,
    ) -> Self {
        let eclipse_fraction = results.eclipse_fraction();
        let sunlight_fraction = 1.0 - eclipse_fraction;

        let subsystems = loads
            .modes()
            .iter()
            .map(|mode| {
                let avg = mode.power_w * mode.duty_cycle;
                let orbit_average_w = match mode.trigger {
                    satpower_eps::loads::Trigger::Sunlight => avg * sunlight_fraction,
                    satpower_eps::loads::Trigger::Eclipse => avg * eclipse_fraction,
                    _ => avg,
                };
                SubsystemRow {
                    name: mode.name.clone(),
                    power_w: mode.power_w,
                    duty_cycle: mode.duty_cycle,
                    trigger: mode.trigger.label().to_string(),
                    orbit_average_w,
                }
            })
            .collect();

        let (sun_sum, sun_count, ecl_sum, ecl_count) = results
            .eclipse
            .iter()
            .zip(results.power_consumed.iter())
            .fold((0.0, 0usize, 0.0, 0usize), |acc, (&in_ecl, &p)| {
                if in_ecl {
                    (acc.0, acc.1, acc.2 + p, acc.3 + 1)
                } else {
                    (acc.0 + p, acc.1 + 1, acc.2, acc.3)
                }
            });
        let avg_consumed_sunlight_w = if sun_count > 0 {
            sun_sum / sun_count as f64
        } else {
            0.0
        };
        let avg_consumed_eclipse_w = if ecl_count > 0 {
            ecl_sum / ecl_count as f64
        } else {
            0.0
        };

        let summary = results.summary();
        let power_margin_w = summary.power_margin_w;
        let min_soc = summary.min_soc;
        let worst_dod = summary.worst_case_dod;

        let mut failing_conditions = Vec::new();
        if power_margin_w < 0.0 {
            failing_conditions.push(format!("power margin {power_margin_w:.2} W < 0"));
        }
        if min_soc <= 0.0 {
            failing_conditions.push(format!("battery empties (min SoC {min_soc:.3})"));
        }
        if worst_dod > 1.0 {
            failing_conditions.push(format!("worst DoD {worst_dod:.3} exceeds capacity"));
        }
        let verdict = if failing_conditions.is_empty() {
            Verdict::PositiveMargin
        } else {
            Verdict::NegativeMargin
        };

        PowerBudgetReport {
            mission_name: mission_name.into(),
            subsystems,
            avg_generated_w: summary.avg_power_generated_w,
            avg_consumed_w: summary.avg_power_consumed_w,
            avg_consumed_sunlight_w,
            avg_consumed_eclipse_w,
            power_margin_w,
            eclipse_fraction,
            worst_dod,
            min_soc,
            battery_energy_wh: battery.energy_wh(),
            energy_balance_per_orbit_wh: summary.energy_balance_per_orbit_wh,
            verdict,
            failing_conditions,
        }
    }

    /// Human-readable budget table.
    pub fn to_text(&self) -> String {
        let sep = "=".repeat(60);
        let mut lines = vec![
            sep.clone(),
            format!("  POWER BUDGET REPORT: {}", self.mission_name),
            sep.clone(),
            String::new(),
            "  SUBSYSTEM BREAKDOWN".to_string(),
            format!(
                "  {:<25} {:>10} {:>8} {:>10}",
                "Subsystem", "Power (W)", "Duty", "Trigger"
            ),
        ];
        for sub in &self.subsystems {
            lines.push(format!(
                "  {:<25} {:>10.2} {:>7.0}% {:>10}",
                sub.name,
                sub.power_w,
                sub.duty_cycle * 100.0,
                sub.trigger
            ));
        }

        lines.push(String::new());
        lines.push("  ORBIT AVERAGES".to_string());
        lines.push(format!(
            "    Eclipse fraction: {:>5.1}%",
            self.eclipse_fraction * 100.0
        ));
        lines.push(format!("    Generated:      {:>6.2} W", self.avg_generated_w));
        if self.eclipse_fraction < 1.0 {
            lines.push(format!(
                "    Consumed (sun): {:>6.2} W",
                self.avg_consumed_sunlight_w
            ));
        }
        if self.eclipse_fraction > 0.0 {
            lines.push(format!(
                "    Consumed (ecl): {:>6.2} W",
                self.avg_consumed_eclipse_w
            ));
        }
        lines.push(format!("    Consumed (avg): {:>6.2} W", self.avg_consumed_w));
        let sign = if self.power_margin_w >= 0.0 { "+" } else { "" };
        lines.push(format!("    Margin:        {sign}{:>6.2} W", self.power_margin_w));

        lines.push(String::new());
        lines.push("  BATTERY".to_string());
        lines.push(format!("    Worst DoD:      {:>5.1}%", self.worst_dod * 100.0));
        lines.push(format!("    Min SoC:        {:>5.1}%", self.min_soc * 100.0));
        lines.push(format!("    Pack energy:    {:>6.1} Wh", self.battery_energy_wh));
        if self.worst_dod > 0.0 {
            lines.push(format!(
                "    Sizing margin:  {:>5.1}x",
                1.0 / self.worst_dod
            ));
        }

        lines.push(String::new());
        lines.push(format!("  VERDICT: {}", self.verdict));
        for condition in &self.failing_conditions {
            lines.push(format!("    - {condition}"));
        }
        lines.push(sep);
        lines.join("\n")
    }
}
