// ─────────────────────────────────────────────────────────────────────
// SatPower Core — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Boundary parameter records and typed simulation options.
//!
//! Every record arrives pre-parsed from the collaborator layer (datasheet
//! loaders, mission config); the core only checks the physical invariants
//! it depends on. Mode selection is expressed as enums, never strings.

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::{PowerError, PowerResult};

/// Single-diode solar cell parameter record at reference conditions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolarCellParams {
    /// Active cell area (cm^2).
    pub area_cm2: f64,
    /// Open-circuit voltage at reference conditions (V).
    pub voc_v: f64,
    /// Short-circuit current at reference conditions (A).
    pub isc_a: f64,
    /// Maximum-power-point voltage at reference conditions (V).
    pub vmp_v: f64,
    /// Maximum-power-point current at reference conditions (A).
    pub imp_a: f64,
    /// Diode ideality factor.
    pub ideality_factor: f64,
    /// Series resistance (ohm).
    pub series_resistance_ohm: f64,
    /// Shunt resistance (ohm).
    pub shunt_resistance_ohm: f64,
    /// dVoc/dT (V/K), typically negative.
    pub dvoc_dt_v_per_k: f64,
    /// dIsc/dT (A/K), typically positive.
    pub disc_dt_a_per_k: f64,
    /// dPmp/dT (fraction/K), typically negative.
    pub dpmp_dt_per_k: f64,
    /// Reference temperature (K).
    pub reference_temp_k: f64,
    /// Reference irradiance (W/m^2).
    pub reference_irradiance_w_m2: f64,
    /// Solar absorptance.
    pub absorptance: f64,
    /// IR emittance.
    pub emittance: f64,
    /// Cell packing factor on a panel substrate, in (0, 1].
    pub packing_factor: f64,
}

impl SolarCellParams {
    pub fn area_m2(&self) -> f64 {
        self.area_cm2 * 1e-4
    }

    pub fn validate(&self) -> PowerResult<()> {
        let positive = [
            ("area_cm2", self.area_cm2),
            ("voc_v", self.voc_v),
            ("isc_a", self.isc_a),
            ("vmp_v", self.vmp_v),
            ("imp_a", self.imp_a),
            ("ideality_factor", self.ideality_factor),
            ("series_resistance_ohm", self.series_resistance_ohm),
            ("shunt_resistance_ohm", self.shunt_resistance_ohm),
            ("reference_temp_k", self.reference_temp_k),
            ("reference_irradiance_w_m2", self.reference_irradiance_w_m2),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(PowerError::InvalidConfig(format!(
                    "solar cell {name} must be finite and > 0, got {value}"
                )));
            }
        }
        if self.vmp_v >= self.voc_v {
            return Err(PowerError::InvalidConfig(format!(
                "solar cell Vmp must be < Voc, got {} >= {}",
                self.vmp_v, self.voc_v
            )));
        }
        if self.imp_a >= self.isc_a {
            return Err(PowerError::InvalidConfig(format!(
                "solar cell Imp must be < Isc, got {} >= {}",
                self.imp_a, self.isc_a
            )));
        }
        if !(0.0 < self.packing_factor && self.packing_factor <= 1.0) {
            return Err(PowerError::InvalidConfig(format!(
                "solar cell packing_factor must be in (0, 1], got {}",
                self.packing_factor
            )));
        }
        for (name, value) in [("absorptance", self.absorptance), ("emittance", self.emittance)] {
            if !(0.0 < value && value <= 1.0) {
                return Err(PowerError::InvalidConfig(format!(
                    "solar cell {name} must be in (0, 1], got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Thevenin battery cell parameter record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatteryCellParams {
    /// Rated capacity (A·h).
    pub capacity_ah: f64,
    /// Nominal terminal voltage (V).
    pub nominal_voltage_v: f64,
    /// Minimum discharge voltage (V).
    pub min_voltage_v: f64,
    /// Maximum charge voltage (V).
    pub max_voltage_v: f64,
    /// Ohmic resistance at the reference temperature (ohm).
    pub r0_ohm: f64,
    /// First RC branch resistance (ohm).
    pub r1_ohm: f64,
    /// First RC branch capacitance (F).
    pub c1_f: f64,
    /// Second RC branch resistance (ohm). Zero disables the branch.
    pub r2_ohm: f64,
    /// Second RC branch capacitance (F). Zero disables the branch.
    pub c2_f: f64,
    /// Arrhenius activation energy for R0(T) (J/mol).
    pub activation_energy_j: f64,
    /// Reference temperature for R0 (K).
    pub reference_temp_k: f64,
    /// OCV vs SoC table, rows [soc, ocv_v], soc in [0, 1] ascending,
    /// ocv monotone non-decreasing.
    pub ocv_soc_table: Vec<[f64; 2]>,
}

impl BatteryCellParams {
    pub fn validate(&self) -> PowerResult<()> {
        let positive = [
            ("capacity_ah", self.capacity_ah),
            ("nominal_voltage_v", self.nominal_voltage_v),
            ("min_voltage_v", self.min_voltage_v),
            ("max_voltage_v", self.max_voltage_v),
            ("r0_ohm", self.r0_ohm),
            ("r1_ohm", self.r1_ohm),
            ("c1_f", self.c1_f),
            ("reference_temp_k", self.reference_temp_k),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(PowerError::InvalidConfig(format!(
                    "battery cell {name} must be finite and > 0, got {value}"
                )));
            }
        }
        if self.r2_ohm < 0.0 || self.c2_f < 0.0 {
            return Err(PowerError::InvalidConfig(
                "battery cell second RC branch must be >= 0 (0 disables it)".to_string(),
            ));
        }
        if !(self.min_voltage_v <= self.nominal_voltage_v
            && self.nominal_voltage_v <= self.max_voltage_v)
        {
            return Err(PowerError::InvalidConfig(format!(
                "battery cell voltages must satisfy min <= nominal <= max, got {} / {} / {}",
                self.min_voltage_v, self.nominal_voltage_v, self.max_voltage_v
            )));
        }
        if self.ocv_soc_table.len() < 2 {
            return Err(PowerError::InvalidConfig(
                "battery cell OCV table needs at least 2 rows".to_string(),
            ));
        }
        for pair in self.ocv_soc_table.windows(2) {
            let ([s0, v0], [s1, v1]) = (pair[0], pair[1]);
            if s1 <= s0 {
                return Err(PowerError::InvalidConfig(format!(
                    "battery cell OCV table SoC must be strictly ascending, got {s0} then {s1}"
                )));
            }
            if v1 < v0 {
                return Err(PowerError::InvalidConfig(format!(
                    "battery cell OCV table must be monotone non-decreasing, got {v0} then {v1}"
                )));
            }
        }
        Ok(())
    }
}

/// EPS board record: bus voltage plus converter and MPPT efficiencies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpsBoardParams {
    pub name: String,
    pub bus_voltage_v: f64,
    pub converter_efficiency: f64,
    pub mppt_efficiency: f64,
}

impl EpsBoardParams {
    pub fn validate(&self) -> PowerResult<()> {
        if !self.bus_voltage_v.is_finite() || self.bus_voltage_v <= 0.0 {
            return Err(PowerError::InvalidConfig(format!(
                "EPS board bus voltage must be > 0, got {}",
                self.bus_voltage_v
            )));
        }
        for (name, eff) in [
            ("converter_efficiency", self.converter_efficiency),
            ("mppt_efficiency", self.mppt_efficiency),
        ] {
            if !(0.0 < eff && eff <= 1.0) {
                return Err(PowerError::InvalidConfig(format!(
                    "EPS board {name} must be in (0, 1], got {eff}"
                )));
            }
        }
        Ok(())
    }
}

/// Lumped thermal model configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThermalConfig {
    /// Panel thermal mass (J/K).
    pub panel_thermal_mass_j_per_k: f64,
    /// Panel solar absorptance.
    pub panel_absorptance: f64,
    /// Panel IR emittance.
    pub panel_emittance: f64,
    /// Total illuminated panel area (m^2).
    pub panel_area_m2: f64,
    /// Battery thermal mass (J/K).
    pub battery_thermal_mass_j_per_k: f64,
    /// Battery IR emittance.
    pub battery_emittance: f64,
    /// Battery radiating surface area (m^2).
    pub battery_surface_area_m2: f64,
    /// Spacecraft interior reference temperature (K).
    pub spacecraft_interior_temp_k: f64,
    /// Survival heater power applied to the battery (W).
    pub heater_power_w: f64,
    /// Initial panel temperature (K).
    pub initial_panel_temp_k: f64,
    /// Initial battery temperature (K).
    pub initial_battery_temp_k: f64,
}

impl Default for ThermalConfig {
    fn default() -> Self {
        ThermalConfig {
            panel_thermal_mass_j_per_k: 450.0,
            panel_absorptance: 0.91,
            panel_emittance: 0.85,
            panel_area_m2: 0.06,
            battery_thermal_mass_j_per_k: 95.0,
            battery_emittance: 0.8,
            battery_surface_area_m2: 0.01,
            spacecraft_interior_temp_k: 293.15,
            heater_power_w: 0.0,
            initial_panel_temp_k: constants::DEFAULT_PANEL_TEMP,
            initial_battery_temp_k: constants::DEFAULT_BATTERY_TEMP,
        }
    }
}

impl ThermalConfig {
    pub fn validate(&self) -> PowerResult<()> {
        let positive = [
            ("panel_thermal_mass_j_per_k", self.panel_thermal_mass_j_per_k),
            ("panel_area_m2", self.panel_area_m2),
            ("battery_thermal_mass_j_per_k", self.battery_thermal_mass_j_per_k),
            ("battery_surface_area_m2", self.battery_surface_area_m2),
            ("spacecraft_interior_temp_k", self.spacecraft_interior_temp_k),
            ("initial_panel_temp_k", self.initial_panel_temp_k),
            ("initial_battery_temp_k", self.initial_battery_temp_k),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(PowerError::InvalidConfig(format!(
                    "thermal {name} must be finite and > 0, got {value}"
                )));
            }
        }
        for (name, value) in [
            ("panel_absorptance", self.panel_absorptance),
            ("panel_emittance", self.panel_emittance),
            ("battery_emittance", self.battery_emittance),
        ] {
            if !(0.0 < value && value <= 1.0) {
                return Err(PowerError::InvalidConfig(format!(
                    "thermal {name} must be in (0, 1], got {value}"
                )));
            }
        }
        if self.heater_power_w < 0.0 {
            return Err(PowerError::InvalidConfig(format!(
                "thermal heater_power_w must be >= 0, got {}",
                self.heater_power_w
            )));
        }
        Ok(())
    }
}

/// Shadow geometry selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EclipseMethod {
    /// Sharp-edged cylinder behind Earth, no penumbra.
    Cylindrical,
    /// Angular disk overlap with a linear penumbra ramp.
    Conical,
}

/// MPPT tracking-efficiency selection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MpptConfig {
    Constant(f64),
    PowerDependent {
        peak_eff: f64,
        min_eff: f64,
        rated_w: f64,
    },
}

impl Default for MpptConfig {
    fn default() -> Self {
        MpptConfig::Constant(constants::DEFAULT_MPPT_EFF)
    }
}

impl MpptConfig {
    pub fn validate(&self) -> PowerResult<()> {
        match *self {
            MpptConfig::Constant(eff) => {
                if !(0.0 < eff && eff <= 1.0) {
                    return Err(PowerError::InvalidConfig(format!(
                        "MPPT efficiency must be in (0, 1], got {eff}"
                    )));
                }
            }
            MpptConfig::PowerDependent {
                peak_eff,
                min_eff,
                rated_w,
            } => {
                if !(0.0 < min_eff && min_eff <= peak_eff && peak_eff <= 1.0) {
                    return Err(PowerError::InvalidConfig(format!(
                        "MPPT efficiencies must satisfy 0 < min <= peak <= 1, got {min_eff} / {peak_eff}"
                    )));
                }
                if !rated_w.is_finite() || rated_w <= 0.0 {
                    return Err(PowerError::InvalidConfig(format!(
                        "MPPT rated power must be > 0, got {rated_w}"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// DC-DC converter efficiency selection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ConverterConfig {
    Constant(f64),
    LoadDependent {
        rated_w: f64,
        /// Efficiency at ~50% of rated load.
        peak_eff: f64,
        /// Efficiency approaching zero load.
        light_load_eff: f64,
        /// Efficiency at rated load.
        nominal_eff: f64,
    },
}

impl Default for ConverterConfig {
    fn default() -> Self {
        ConverterConfig::Constant(constants::DEFAULT_CONVERTER_EFF)
    }
}

impl ConverterConfig {
    pub fn validate(&self) -> PowerResult<()> {
        match *self {
            ConverterConfig::Constant(eff) => {
                if !(0.0 < eff && eff <= 1.0) {
                    return Err(PowerError::InvalidConfig(format!(
                        "converter efficiency must be in (0, 1], got {eff}"
                    )));
                }
            }
            ConverterConfig::LoadDependent {
                rated_w,
                peak_eff,
                light_load_eff,
                nominal_eff,
            } => {
                if !rated_w.is_finite() || rated_w <= 0.0 {
                    return Err(PowerError::InvalidConfig(format!(
                        "converter rated power must be > 0, got {rated_w}"
                    )));
                }
                if !(0.0 < light_load_eff
                    && light_load_eff <= nominal_eff
                    && nominal_eff <= peak_eff
                    && peak_eff <= 1.0)
                {
                    return Err(PowerError::InvalidConfig(format!(
                        "converter efficiencies must satisfy 0 < light <= nominal <= peak <= 1, \
                         got {light_load_eff} / {nominal_eff} / {peak_eff}"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Thermal model selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ThermalMode {
    Disabled,
    Enabled(ThermalConfig),
}

impl ThermalMode {
    pub fn is_enabled(&self) -> bool {
        matches!(self, ThermalMode::Enabled(_))
    }

    pub fn validate(&self) -> PowerResult<()> {
        match self {
            ThermalMode::Disabled => Ok(()),
            ThermalMode::Enabled(cfg) => cfg.validate(),
        }
    }
}
