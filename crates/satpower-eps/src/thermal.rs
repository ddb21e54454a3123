// ─────────────────────────────────────────────────────────────────────
// SatPower Core — Thermal
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Lumped-parameter panel and battery temperatures.
//!
//! The panel absorbs solar, albedo, and Earth IR flux and radiates to
//! space from both faces. The battery is heated by its ohmic losses and
//! an optional survival heater, exchanging radiation with the spacecraft
//! interior.

use satpower_types::config::ThermalConfig;
use satpower_types::constants::STEFAN_BOLTZMANN;
use satpower_types::error::PowerResult;

#[derive(Debug, Clone)]
pub struct ThermalModel {
    config: ThermalConfig,
}

impl ThermalModel {
    pub fn new(config: ThermalConfig) -> PowerResult<Self> {
        config.validate()?;
        Ok(ThermalModel { config })
    }

    pub fn config(&self) -> &ThermalConfig {
        &self.config
    }

    /// Panel temperature rate (K/s).
    ///
    /// `solar_absorbed_w` is the solar heat load after subtracting the
    /// electrical power extracted by the cells; albedo and IR fluxes are
    /// in W/m^2 at the spacecraft.
    pub fn panel_rate(
        &self,
        t_panel_k: f64,
        solar_absorbed_w: f64,
        albedo_flux_w_m2: f64,
        earth_ir_flux_w_m2: f64,
    ) -> f64 {
        let cfg = &self.config;
        let area = cfg.panel_area_m2;

        let q_albedo = cfg.panel_absorptance * albedo_flux_w_m2 * area;
        let q_earth_ir = cfg.panel_emittance * earth_ir_flux_w_m2 * area;
        // Front and back faces both radiate to space.
        let q_radiated =
            cfg.panel_emittance * STEFAN_BOLTZMANN * area * 2.0 * t_panel_k.powi(4);

        (solar_absorbed_w + q_albedo + q_earth_ir - q_radiated) / cfg.panel_thermal_mass_j_per_k
    }

    /// Battery temperature rate (K/s) from joule heating, the survival
    /// heater, and radiative exchange with the interior.
    pub fn battery_rate(&self, t_battery_k: f64, joule_heat_w: f64) -> f64 {
        let cfg = &self.config;
        let q_radiated = cfg.battery_emittance
            * STEFAN_BOLTZMANN
            * cfg.battery_surface_area_m2
            * (t_battery_k.powi(4) - cfg.spacecraft_interior_temp_k.powi(4));

        (joule_heat_w + cfg.heater_power_w - q_radiated) / cfg.battery_thermal_mass_j_per_k
    }

    /// Solar heat absorbed by the panel stack (W): absorptance times the
    /// cosine-projected incident solar power, minus the electrical power
    /// carried away by the cells.
    pub fn solar_absorbed_w(&self, incident_solar_w: f64, electrical_power_w: f64) -> f64 {
        self.config.panel_absorptance * incident_solar_w.max(0.0) - electrical_power_w
    }
}
