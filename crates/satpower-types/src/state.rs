// ─────────────────────────────────────────────────────────────────────
// SatPower Core — State
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Simulation state vector.
//!
//! The electrical-only state is [SoC, V_rc1, V_rc2]; enabling the thermal
//! model appends [T_panel, T_battery]. The sum type keeps the RHS a total
//! function over both layouts.

/// ODE state vector, with or without the thermal tail.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimState {
    /// [SoC, V_rc1, V_rc2]
    NoThermal([f64; 3]),
    /// [SoC, V_rc1, V_rc2, T_panel, T_battery]
    WithThermal([f64; 5]),
}

impl SimState {
    /// Initial state at the given SoC with relaxed RC branches.
    pub fn initial(soc: f64, thermal: Option<(f64, f64)>) -> Self {
        match thermal {
            None => SimState::NoThermal([soc, 0.0, 0.0]),
            Some((t_panel, t_battery)) => {
                SimState::WithThermal([soc, 0.0, 0.0, t_panel, t_battery])
            }
        }
    }

    pub fn dim(&self) -> usize {
        match self {
            SimState::NoThermal(_) => 3,
            SimState::WithThermal(_) => 5,
        }
    }

    pub fn as_slice(&self) -> &[f64] {
        match self {
            SimState::NoThermal(y) => y,
            SimState::WithThermal(y) => y,
        }
    }

    /// Rebuild a state of the same layout from a raw slice.
    ///
    /// Panics if `y` is shorter than the layout requires; the integrator
    /// always hands back the dimension it was given.
    pub fn with_values(&self, y: &[f64]) -> Self {
        match self {
            SimState::NoThermal(_) => SimState::NoThermal([y[0], y[1], y[2]]),
            SimState::WithThermal(_) => SimState::WithThermal([y[0], y[1], y[2], y[3], y[4]]),
        }
    }

    pub fn soc(&self) -> f64 {
        self.as_slice()[0]
    }

    pub fn v_rc1(&self) -> f64 {
        self.as_slice()[1]
    }

    pub fn v_rc2(&self) -> f64 {
        self.as_slice()[2]
    }

    /// (T_panel, T_battery) when the thermal tail is present.
    pub fn temperatures(&self) -> Option<(f64, f64)> {
        match self {
            SimState::NoThermal(_) => None,
            SimState::WithThermal(y) => Some((y[3], y[4])),
        }
    }
}
