// ─────────────────────────────────────────────────────────────────────
// SatPower Core — Load Scheduler
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Operational load modes and the instantaneous power draw they produce.
//!
//! Duty cycle is interpreted as a time-averaged multiplier for the
//! Always/Sunlight/Eclipse triggers, which keeps the ODE right-hand side
//! smooth within an orbit. The `Scheduled` trigger is the explicit gated
//! alternative: a square wave of the given period and phase, at full
//! power inside the window.

use satpower_types::error::{PowerError, PowerResult};

/// When a load mode contributes to the bus draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Trigger {
    Always,
    Sunlight,
    Eclipse,
    /// Gated square wave: active when ((t + phase) mod period)/period
    /// falls below the mode's duty cycle.
    Scheduled { period_s: f64, phase_s: f64 },
}

impl Trigger {
    pub fn label(&self) -> &'static str {
        match self {
            Trigger::Always => "always",
            Trigger::Sunlight => "sunlight",
            Trigger::Eclipse => "eclipse",
            Trigger::Scheduled { .. } => "scheduled",
        }
    }
}

/// A single operational mode.
#[derive(Debug, Clone)]
pub struct LoadMode {
    pub name: String,
    pub power_w: f64,
    pub duty_cycle: f64,
    pub trigger: Trigger,
    pub priority: i32,
}

impl LoadMode {
    fn scheduled_active(&self, time_s: f64) -> bool {
        match self.trigger {
            Trigger::Scheduled { period_s, phase_s } => {
                if self.duty_cycle <= 0.0 {
                    return false;
                }
                let phase = ((time_s + phase_s).rem_euclid(period_s)) / period_s;
                phase < self.duty_cycle
            }
            _ => false,
        }
    }

    /// Whether the mode draws power at this instant.
    fn active(&self, time_s: f64, in_eclipse: bool) -> bool {
        if self.duty_cycle <= 0.0 {
            return false;
        }
        match self.trigger {
            Trigger::Always => true,
            Trigger::Sunlight => !in_eclipse,
            Trigger::Eclipse => in_eclipse,
            Trigger::Scheduled { .. } => self.scheduled_active(time_s),
        }
    }

    /// Instantaneous draw (W) when active.
    fn draw_w(&self) -> f64 {
        match self.trigger {
            // Gated modes run at full power inside their window.
            Trigger::Scheduled { .. } => self.power_w,
            _ => self.power_w * self.duty_cycle,
        }
    }
}

/// Ordered collection of load modes; append-only after construction.
#[derive(Debug, Clone, Default)]
pub struct LoadProfile {
    modes: Vec<LoadMode>,
}

impl LoadProfile {
    pub fn new() -> Self {
        LoadProfile::default()
    }

    pub fn add_mode(
        &mut self,
        name: impl Into<String>,
        power_w: f64,
        duty_cycle: f64,
        trigger: Trigger,
        priority: i32,
    ) -> PowerResult<()> {
        if !power_w.is_finite() || power_w < 0.0 {
            return Err(PowerError::InvalidConfig(format!(
                "load power must be finite and >= 0, got {power_w}"
            )));
        }
        if !(0.0..=1.0).contains(&duty_cycle) {
            return Err(PowerError::InvalidConfig(format!(
                "duty cycle must be in [0, 1], got {duty_cycle}"
            )));
        }
        if let Trigger::Scheduled { period_s, .. } = trigger {
            if !period_s.is_finite() || period_s <= 0.0 {
                return Err(PowerError::InvalidConfig(format!(
                    "scheduled period must be > 0, got {period_s}"
                )));
            }
        }
        self.modes.push(LoadMode {
            name: name.into(),
            power_w,
            duty_cycle,
            trigger,
            priority,
        });
        Ok(())
    }

    pub fn modes(&self) -> &[LoadMode] {
        &self.modes
    }

    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }

    /// Total power draw (W) at a time and eclipse state.
    pub fn power_at(&self, time_s: f64, in_eclipse: bool) -> f64 {
        self.modes
            .iter()
            .filter(|m| m.active(time_s, in_eclipse))
            .map(LoadMode::draw_w)
            .sum()
    }

    /// Names of the modes currently drawing power.
    pub fn active_modes(&self, time_s: f64, in_eclipse: bool) -> Vec<&str> {
        self.modes
            .iter()
            .filter(|m| m.active(time_s, in_eclipse))
            .map(|m| m.name.as_str())
            .collect()
    }

    /// Orbit-averaged draw (W) for a given eclipse fraction.
    pub fn orbit_average_power(&self, eclipse_fraction: f64) -> f64 {
        let sunlight_fraction = 1.0 - eclipse_fraction;
        self.modes
            .iter()
            .map(|m| {
                let avg = m.power_w * m.duty_cycle;
                match m.trigger {
                    Trigger::Always | Trigger::Scheduled { .. } => avg,
                    Trigger::Sunlight => avg * sunlight_fraction,
                    Trigger::Eclipse => avg * eclipse_fraction,
                }
            })
            .sum()
    }
}

pub mod templates {
    //! Typical CubeSat subsystem draws (W), for quick mission sketches.

    pub fn subsystem_power_w(name: &str) -> Option<f64> {
        let power = match name {
            "obc_arm" => 0.4,
            "obc_msp430" => 0.15,
            "adcs_magnetorquer" => 0.8,
            "adcs_reaction_wheel" => 2.5,
            "uhf_transceiver" => 4.0,
            "sband_transmitter" => 8.0,
            "xband_transmitter" => 12.0,
            "camera_vis" => 5.0,
            "camera_multispectral" => 8.0,
            "gps_receiver" => 0.8,
            "star_tracker" => 1.5,
            "heater_battery" => 1.0,
            "beacon" => 0.3,
            "ais_receiver" => 1.0,
            _ => return None,
        };
        Some(power)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> LoadProfile {
        let mut p = LoadProfile::new();
        p.add_mode("obc", 0.5, 1.0, Trigger::Always, 0).unwrap();
        p.add_mode("radio", 4.0, 0.15, Trigger::Always, 1).unwrap();
        p.add_mode("payload", 5.0, 0.30, Trigger::Sunlight, 1).unwrap();
        p.add_mode("heater", 1.0, 1.0, Trigger::Eclipse, 2).unwrap();
        p
    }

    #[test]
    fn test_power_in_sunlight() {
        let p = profile();
        // obc 0.5 + radio 0.6 + payload 1.5
        assert!((p.power_at(0.0, false) - 2.6).abs() < 1e-12);
    }

    #[test]
    fn test_power_in_eclipse() {
        let p = profile();
        // obc 0.5 + radio 0.6 + heater 1.0
        assert!((p.power_at(0.0, true) - 2.1).abs() < 1e-12);
    }

    #[test]
    fn test_active_modes_filter() {
        let p = profile();
        let sun = p.active_modes(0.0, false);
        assert_eq!(sun, vec!["obc", "radio", "payload"]);
        let ecl = p.active_modes(0.0, true);
        assert_eq!(ecl, vec!["obc", "radio", "heater"]);
    }

    #[test]
    fn test_orbit_average_weighting() {
        let p = profile();
        let f = 0.37;
        let expected = 0.5 + 0.6 + 1.5 * (1.0 - f) + 1.0 * f;
        assert!((p.orbit_average_power(f) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_scheduled_square_wave() {
        let mut p = LoadProfile::new();
        p.add_mode(
            "downlink",
            8.0,
            0.25,
            Trigger::Scheduled {
                period_s: 1000.0,
                phase_s: 0.0,
            },
            0,
        )
        .unwrap();

        // Active at full power in the first quarter of the period.
        assert!((p.power_at(100.0, false) - 8.0).abs() < 1e-12);
        assert_eq!(p.power_at(300.0, false), 0.0);
        assert!((p.power_at(1100.0, false) - 8.0).abs() < 1e-12);
        // Orbit average still reflects the duty cycle.
        assert!((p.orbit_average_power(0.3) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_duty_mode_inert() {
        let mut p = LoadProfile::new();
        p.add_mode("idle", 3.0, 0.0, Trigger::Always, 0).unwrap();
        assert_eq!(p.power_at(0.0, false), 0.0);
        assert!(p.active_modes(0.0, false).is_empty());
    }

    #[test]
    fn test_invalid_duty_rejected() {
        let mut p = LoadProfile::new();
        assert!(p.add_mode("bad", 1.0, 1.5, Trigger::Always, 0).is_err());
        assert!(p.add_mode("bad", -1.0, 0.5, Trigger::Always, 0).is_err());
    }

    #[test]
    fn test_invalid_schedule_period_rejected() {
        let mut p = LoadProfile::new();
        assert!(p
            .add_mode(
                "bad",
                1.0,
                0.5,
                Trigger::Scheduled {
                    period_s: 0.0,
                    phase_s: 0.0
                },
                0
            )
            .is_err());
    }

    #[test]
    fn test_templates_lookup() {
        assert_eq!(templates::subsystem_power_w("uhf_transceiver"), Some(4.0));
        assert_eq!(templates::subsystem_power_w("warp_drive"), None);
    }
}
