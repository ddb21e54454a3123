// ─────────────────────────────────────────────────────────────────────
// SatPower Core — Simulation Engine
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Coupled EPS simulation: orbit, sun, eclipse, solar array, loads, bus,
//! battery, and (optionally) lumped temperatures, integrated as one ODE.
//!
//! Every right-hand-side evaluation walks the full chain: propagate the
//! orbit, place the sun, compute the shadow fraction and seasonal flux,
//! project irradiance onto each panel at the current panel temperature,
//! condition through the MPPT, query the load schedule, solve the bus
//! balance for the battery current, and form the state rates. After
//! integration the same chain is re-evaluated on the output grid so the
//! recorded series are exactly consistent with the integrated states.

use ndarray::Array1;

use satpower_battery::pack::BatteryPack;
use satpower_eps::bus::PowerBus;
use satpower_eps::loads::LoadProfile;
use satpower_eps::thermal::ThermalModel;
use satpower_math::rk45::{integrate_on_grid, OdeSystem, Rk45Options};
use satpower_math::vec3::Vec3;
use satpower_orbit::eclipse::{EclipseModel, ECLIPSE_THRESHOLD};
use satpower_orbit::environment::OrbitalEnvironment;
use satpower_orbit::propagator::Orbit;
use satpower_orbit::sun::SunEphemeris;
use satpower_solar::mppt::MpptModel;
use satpower_solar::panel::{eci_to_body, SolarPanel};
use satpower_types::config::{
    EclipseMethod, EpsBoardParams, MpptConfig, ThermalMode,
};
use satpower_types::constants::{
    DEFAULT_BATTERY_TEMP, DEFAULT_DT_MAX, DEFAULT_PANEL_TEMP,
};
use satpower_types::error::{PowerError, PowerResult};
use satpower_types::state::SimState;

use crate::results::SimulationResults;

/// Minimum number of output grid points per run.
const MIN_GRID_POINTS: usize = 100;

/// SoC band below full over which the charge current tapers to zero.
/// Models the charge regulator shunting surplus once the pack tops off,
/// and keeps the integrated SoC from running past 1.
const CHARGE_TAPER_SOC: f64 = 0.01;

/// Simulation horizon.
#[derive(Debug, Clone, Copy)]
pub enum Duration {
    Orbits(f64),
    Seconds(f64),
}

/// Everything the RHS needs at one instant.
#[derive(Debug, Clone, Copy)]
pub struct InstantSample {
    pub shadow_fraction: f64,
    pub in_eclipse: bool,
    /// Seasonal solar flux at the epoch day (W/m^2).
    pub solar_flux_w_m2: f64,
    /// Flux after shadowing (W/m^2).
    pub irradiance_w_m2: f64,
    /// Array output after MPPT conditioning (W).
    pub solar_power_w: f64,
    /// Cosine-projected solar power incident on the panel substrates (W).
    pub incident_solar_w: f64,
    pub load_power_w: f64,
    /// Bus-balance battery current (A), positive on discharge.
    pub battery_current_a: f64,
    /// Terminal voltage at the solved current (V).
    pub battery_voltage_v: f64,
}

/// A fully-assembled CubeSat power simulation.
///
/// Owns deep copies of every component; cloning the simulation clones the
/// whole stack, which is what the lifetime driver relies on.
#[derive(Debug, Clone)]
pub struct Simulation {
    orbit: Orbit,
    panels: Vec<SolarPanel>,
    battery: BatteryPack,
    loads: LoadProfile,
    environment: OrbitalEnvironment,
    bus: PowerBus,
    mppt: MpptModel,
    eclipse_model: EclipseModel,
    thermal: ThermalMode,
    sun: SunEphemeris,
    initial_soc: f64,
}

impl Simulation {
    pub fn new(
        orbit: Orbit,
        panels: Vec<SolarPanel>,
        battery: BatteryPack,
        loads: LoadProfile,
    ) -> PowerResult<Self> {
        if panels.is_empty() {
            return Err(PowerError::InvalidConfig(
                "simulation needs at least one solar panel".to_string(),
            ));
        }
        Ok(Simulation {
            orbit,
            panels,
            battery,
            loads,
            environment: OrbitalEnvironment::default(),
            bus: PowerBus::default(),
            mppt: MpptModel::new(MpptConfig::default())?,
            eclipse_model: EclipseModel::new(EclipseMethod::Cylindrical),
            thermal: ThermalMode::Disabled,
            sun: SunEphemeris::default(),
            initial_soc: 1.0,
        })
    }

    pub fn with_environment(mut self, environment: OrbitalEnvironment) -> Self {
        self.environment = environment;
        self
    }

    pub fn with_bus(mut self, bus: PowerBus) -> Self {
        self.bus = bus;
        self
    }

    pub fn with_mppt(mut self, mppt: MpptModel) -> Self {
        self.mppt = mppt;
        self
    }

    /// Take bus voltage, converter, and MPPT efficiencies from an EPS
    /// board record.
    pub fn with_eps_board(mut self, board: &EpsBoardParams) -> PowerResult<Self> {
        self.bus = PowerBus::from_board(board)?;
        self.mppt = MpptModel::new(MpptConfig::Constant(board.mppt_efficiency))?;
        Ok(self)
    }

    pub fn with_eclipse_method(mut self, method: EclipseMethod) -> Self {
        self.eclipse_model = EclipseModel::new(method);
        self
    }

    pub fn with_thermal(mut self, thermal: ThermalMode) -> PowerResult<Self> {
        thermal.validate()?;
        self.thermal = thermal;
        Ok(self)
    }

    pub fn with_epoch_day_of_year(mut self, day_of_year: f64) -> Self {
        self.sun = SunEphemeris::new(day_of_year);
        self
    }

    pub fn with_initial_soc(mut self, initial_soc: f64) -> PowerResult<Self> {
        if !(0.0..=1.0).contains(&initial_soc) {
            return Err(PowerError::InvalidConfig(format!(
                "initial SoC must be in [0, 1], got {initial_soc}"
            )));
        }
        self.initial_soc = initial_soc;
        Ok(self)
    }

    /// A copy with the battery capacity derated by `scale`.
    pub fn with_capacity_scale(&self, scale: f64) -> PowerResult<Self> {
        let mut sim = self.clone();
        sim.battery = self.battery.with_capacity_scale(scale)?;
        Ok(sim)
    }

    pub fn orbit(&self) -> &Orbit {
        &self.orbit
    }

    pub fn battery(&self) -> &BatteryPack {
        &self.battery
    }

    pub fn loads(&self) -> &LoadProfile {
        &self.loads
    }

    pub fn panels(&self) -> &[SolarPanel] {
        &self.panels
    }

    pub fn initial_soc(&self) -> f64 {
        self.initial_soc
    }

    pub fn thermal(&self) -> &ThermalMode {
        &self.thermal
    }

    /// Conditioned array power and cosine-projected incident power (W)
    /// for a sun direction in the body frame.
    fn array_power(&self, sun_body: &Vec3, irradiance: f64, panel_temp_k: f64) -> (f64, f64) {
        if irradiance <= 0.0 {
            return (0.0, 0.0);
        }
        let mut raw = 0.0;
        let mut incident = 0.0;
        for panel in &self.panels {
            raw += panel.power(sun_body, irradiance, panel_temp_k, 1.0);
            let cos_incidence = satpower_math::vec3::dot(sun_body, &panel.normal());
            if cos_incidence > 0.0 {
                incident += irradiance * cos_incidence * panel.area_m2();
            }
        }
        (raw * self.mppt.tracking_efficiency(raw), incident)
    }

    /// Evaluate the full power chain at one instant.
    pub fn instantaneous(
        &self,
        t: f64,
        soc: f64,
        v_rc1: f64,
        v_rc2: f64,
        panel_temp_k: f64,
        battery_temp_k: f64,
    ) -> InstantSample {
        let (position, velocity) = self.orbit.propagate_one(t);
        let sun_dir = self.sun.direction_eci(t);
        let sun_pos = self.sun.position_eci(t);

        let shadow_fraction = self.eclipse_model.shadow_fraction(&position, &sun_pos);
        let in_eclipse = shadow_fraction >= ECLIPSE_THRESHOLD;

        let solar_flux = self.environment.solar_flux_at_epoch(self.sun.day_of_year(t));
        let irradiance = solar_flux * (1.0 - shadow_fraction);

        let (solar_power_w, incident_solar_w) = if irradiance > 0.0 {
            let sun_body = eci_to_body(&position, &velocity, &sun_dir);
            self.array_power(&sun_body, irradiance, panel_temp_k)
        } else {
            (0.0, 0.0)
        };

        let load_power_w = self.loads.power_at(t, in_eclipse);

        // The algebraic balance uses the relaxed terminal voltage; the
        // reported voltage includes the ohmic drop at the solved current.
        let balance_voltage =
            self.battery
                .terminal_voltage(soc, 0.0, battery_temp_k, v_rc1, v_rc2);
        let mut battery_current_a =
            self.bus
                .net_battery_current(solar_power_w, load_power_w, balance_voltage);
        if battery_current_a < 0.0 {
            battery_current_a *= ((1.0 - soc) / CHARGE_TAPER_SOC).clamp(0.0, 1.0);
        }
        let battery_voltage_v =
            self.battery
                .terminal_voltage(soc, battery_current_a, battery_temp_k, v_rc1, v_rc2);

        InstantSample {
            shadow_fraction,
            in_eclipse,
            solar_flux_w_m2: solar_flux,
            irradiance_w_m2: irradiance,
            solar_power_w,
            incident_solar_w,
            load_power_w,
            battery_current_a,
            battery_voltage_v,
        }
    }

    /// State rates at `(t, y)`; `y` layout follows the thermal mode.
    fn state_rates(&self, t: f64, y: &[f64], thermal: Option<&ThermalModel>, dydt: &mut [f64]) {
        let (panel_temp, battery_temp) = match thermal {
            Some(_) => (y[3], y[4]),
            None => (DEFAULT_PANEL_TEMP, DEFAULT_BATTERY_TEMP),
        };
        let sample = self.instantaneous(t, y[0], y[1], y[2], panel_temp, battery_temp);

        dydt[0] = self.battery.dsoc_dt(sample.battery_current_a);
        let (dv1, dv2) = self
            .battery
            .derivatives(sample.battery_current_a, y[1], y[2]);
        dydt[1] = dv1;
        dydt[2] = dv2;

        if let Some(model) = thermal {
            let altitude = self.orbit.altitude_m();
            let albedo = self
                .environment
                .earth_albedo_flux(altitude, sample.solar_flux_w_m2);
            let earth_ir = self.environment.earth_ir_flux(altitude);
            let solar_absorbed =
                model.solar_absorbed_w(sample.incident_solar_w, sample.solar_power_w);
            dydt[3] = model.panel_rate(panel_temp, solar_absorbed, albedo, earth_ir);

            let joule =
                sample.battery_current_a * sample.battery_current_a * self.battery.r0(battery_temp);
            dydt[4] = model.battery_rate(battery_temp, joule);
        }
    }

    /// Run the simulation over the requested horizon.
    pub fn run(&self, duration: Duration, dt_max: f64) -> PowerResult<SimulationResults> {
        let t_end = match duration {
            Duration::Orbits(orbits) => orbits * self.orbit.period(),
            Duration::Seconds(seconds) => seconds,
        };
        if !t_end.is_finite() || t_end <= 0.0 {
            return Err(PowerError::InvalidConfig(format!(
                "simulation duration must be > 0, got {t_end} s"
            )));
        }
        if !dt_max.is_finite() || dt_max <= 0.0 {
            return Err(PowerError::InvalidConfig(format!(
                "dt_max must be > 0, got {dt_max} s"
            )));
        }

        let thermal_model = match &self.thermal {
            ThermalMode::Disabled => None,
            ThermalMode::Enabled(cfg) => Some(ThermalModel::new(cfg.clone())?),
        };
        let initial = SimState::initial(
            self.initial_soc,
            thermal_model.as_ref().map(|m| {
                (
                    m.config().initial_panel_temp_k,
                    m.config().initial_battery_temp_k,
                )
            }),
        );

        let n_points = ((t_end / dt_max) as usize + 1).max(MIN_GRID_POINTS);
        let grid: Vec<f64> = (0..n_points)
            .map(|i| t_end * i as f64 / (n_points - 1) as f64)
            .collect();

        let mut atol = vec![1e-6; 3];
        if thermal_model.is_some() {
            atol.extend([1e-3, 1e-3]);
        }
        let opts = Rk45Options {
            rtol: 1e-5,
            atol,
            dt_max,
            ..Rk45Options::default()
        };

        let rhs = SimRhs {
            sim: self,
            thermal: thermal_model.as_ref(),
            dim: initial.dim(),
        };
        let states = integrate_on_grid(&rhs, initial.as_slice(), &grid, &opts)?;

        // Re-run the power chain on the grid so every recorded series is
        // consistent with the integrated states.
        let n = grid.len();
        let mut soc = Array1::zeros(n);
        let mut power_generated = Array1::zeros(n);
        let mut power_consumed = Array1::zeros(n);
        let mut battery_voltage = Array1::zeros(n);
        let mut eclipse = Vec::with_capacity(n);
        let mut modes = Vec::with_capacity(n);
        let mut panel_temp = thermal_model.as_ref().map(|_| Array1::zeros(n));
        let mut battery_temp = thermal_model.as_ref().map(|_| Array1::zeros(n));

        for (i, &t) in grid.iter().enumerate() {
            let row = states.row(i);
            let (t_panel, t_battery) = if thermal_model.is_some() {
                (row[3], row[4])
            } else {
                (DEFAULT_PANEL_TEMP, DEFAULT_BATTERY_TEMP)
            };
            let sample = self.instantaneous(t, row[0], row[1], row[2], t_panel, t_battery);

            soc[i] = row[0];
            power_generated[i] = sample.solar_power_w;
            power_consumed[i] = sample.load_power_w;
            battery_voltage[i] = sample.battery_voltage_v;
            eclipse.push(sample.in_eclipse);
            modes.push(self.loads.active_modes(t, sample.in_eclipse).join(","));
            if let Some(series) = panel_temp.as_mut() {
                series[i] = row[3];
            }
            if let Some(series) = battery_temp.as_mut() {
                series[i] = row[4];
            }
        }

        Ok(SimulationResults {
            time: Array1::from_vec(grid),
            soc,
            power_generated,
            power_consumed,
            battery_voltage,
            eclipse,
            modes,
            panel_temp_k: panel_temp,
            battery_temp_k: battery_temp,
            orbit_period_s: self.orbit.period(),
            pack_min_voltage_v: self.battery.min_voltage(),
        })
    }

    /// Run for a number of orbits at the default step cap.
    pub fn run_orbits(&self, orbits: f64) -> PowerResult<SimulationResults> {
        self.run(Duration::Orbits(orbits), DEFAULT_DT_MAX)
    }
}

struct SimRhs<'a> {
    sim: &'a Simulation,
    thermal: Option<&'a ThermalModel>,
    dim: usize,
}

impl OdeSystem for SimRhs<'_> {
    fn dim(&self) -> usize {
        self.dim
    }

    fn rhs(&self, t: f64, y: &[f64], dydt: &mut [f64]) -> PowerResult<()> {
        self.sim.state_rates(t, y, self.thermal, dydt);
        Ok(())
    }
}
