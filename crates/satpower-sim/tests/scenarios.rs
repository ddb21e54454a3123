// ─────────────────────────────────────────────────────────────────────
// SatPower Core — End-to-End Mission Scenarios
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Full-stack mission scenarios: a sun-synchronous 3U imaging mission,
//! shadow-model comparison, J2 drift, a deliberately overdrawn 1U bus,
//! a thermal run with deployed wings, and a two-year lifetime sweep.

use satpower_battery::aging::AgingModel;
use satpower_battery::cell::BatteryCell;
use satpower_battery::pack::BatteryPack;
use satpower_eps::loads::{LoadProfile, Trigger};
use satpower_orbit::propagator::Orbit;
use satpower_sim::engine::{Duration, Simulation};
use satpower_sim::lifetime::LifetimeSimulation;
use satpower_sim::report::{PowerBudgetReport, Verdict};
use satpower_sim::results::SimulationResults;
use satpower_solar::cell::SolarCell;
use satpower_solar::panel::{FormFactor, SolarPanel};
use satpower_types::config::{
    BatteryCellParams, EclipseMethod, SolarCellParams, ThermalConfig, ThermalMode,
};

/// Triple-junction GaAs cell, azur 3G30C class.
fn triple_junction_cell() -> SolarCell {
    SolarCell::new(SolarCellParams {
        area_cm2: 30.18,
        voc_v: 2.70,
        isc_a: 0.52,
        vmp_v: 2.41,
        imp_a: 0.50,
        ideality_factor: 2.5,
        series_resistance_ohm: 0.3,
        shunt_resistance_ohm: 500.0,
        dvoc_dt_v_per_k: -6.2e-3,
        disc_dt_a_per_k: 3.6e-4,
        dpmp_dt_per_k: -2.4e-3,
        reference_temp_k: 301.15,
        reference_irradiance_w_m2: 1361.0,
        absorptance: 0.91,
        emittance: 0.85,
        packing_factor: 0.9,
    })
    .expect("valid cell parameters")
}

/// 18650 lithium-ion cell, NCR18650B class.
fn li_ion_cell() -> BatteryCell {
    BatteryCell::new(BatteryCellParams {
        capacity_ah: 3.35,
        nominal_voltage_v: 3.6,
        min_voltage_v: 2.5,
        max_voltage_v: 4.2,
        r0_ohm: 0.045,
        r1_ohm: 0.015,
        c1_f: 2400.0,
        r2_ohm: 0.01,
        c2_f: 60000.0,
        activation_energy_j: 19000.0,
        reference_temp_k: 298.15,
        ocv_soc_table: vec![
            [0.0, 3.00],
            [0.1, 3.35],
            [0.2, 3.45],
            [0.3, 3.52],
            [0.4, 3.58],
            [0.5, 3.63],
            [0.6, 3.70],
            [0.7, 3.78],
            [0.8, 3.87],
            [0.9, 3.97],
            [1.0, 4.15],
        ],
    })
    .expect("valid battery parameters")
}

fn pack(n_series: usize, n_parallel: usize) -> BatteryPack {
    BatteryPack::new(li_ion_cell(), n_series, n_parallel).expect("valid pack layout")
}

/// Imaging-mission load set: always-on OBC, duty-cycled radio and payload.
fn imaging_loads() -> LoadProfile {
    let mut loads = LoadProfile::new();
    loads.add_mode("obc", 0.5, 1.0, Trigger::Always, 0).unwrap();
    loads.add_mode("radio", 4.0, 0.15, Trigger::Always, 1).unwrap();
    loads
        .add_mode("payload", 5.0, 0.30, Trigger::Always, 1)
        .unwrap();
    loads
}

/// 550 km sun-synchronous 3U bus with body-mounted panels and a 2S2P pack.
fn sso_3u_simulation() -> Simulation {
    let cell = triple_junction_cell();
    let panels = SolarPanel::cubesat_body(FormFactor::ThreeU, &cell, &[]).unwrap();
    let orbit = Orbit::circular(550.0, 97.6, 0.0, false).unwrap();
    Simulation::new(orbit, panels, pack(2, 2), imaging_loads()).unwrap()
}

/// Largest single-step change in a series.
fn max_step_jump(results: &SimulationResults) -> f64 {
    let mut max = 0.0_f64;
    for i in 1..results.len() {
        max = max.max((results.power_generated[i] - results.power_generated[i - 1]).abs());
    }
    max
}

#[test]
fn test_sun_synchronous_3u_positive_budget() {
    let sim = sso_3u_simulation();
    let results = sim.run(Duration::Orbits(5.0), 30.0).unwrap();

    let fraction = results.eclipse_fraction();
    assert!(
        (0.33..=0.40).contains(&fraction),
        "eclipse fraction = {fraction}"
    );

    assert!(
        results.power_margin_w() > 0.0,
        "margin = {} W",
        results.power_margin_w()
    );
    assert!(results.min_soc() > 0.90, "min SoC = {}", results.min_soc());

    let report =
        PowerBudgetReport::generate(&results, sim.loads(), sim.battery(), "sso-imaging-3u");
    assert_eq!(report.verdict, Verdict::PositiveMargin);
    assert!(report.failing_conditions.is_empty());
}

#[test]
fn test_conical_shadow_close_to_cylindrical_but_softer() {
    let cylindrical = sso_3u_simulation();
    let conical = sso_3u_simulation().with_eclipse_method(EclipseMethod::Conical);

    let res_cyl = cylindrical.run(Duration::Orbits(5.0), 30.0).unwrap();
    let res_con = conical.run(Duration::Orbits(5.0), 30.0).unwrap();

    let f_cyl = res_cyl.eclipse_fraction();
    let f_con = res_con.eclipse_fraction();
    let sample = 1.0 / res_cyl.len() as f64;

    // The penumbra is narrower than one output step, so the boolean
    // fractions agree to within a couple of samples, with the cone never
    // wider than the cylinder.
    assert!(f_con <= f_cyl + 2.0 * sample, "cone {f_con} vs cyl {f_cyl}");
    assert!(
        f_cyl - f_con <= 0.05 * f_cyl + 2.0 * sample,
        "cone {f_con} vs cyl {f_cyl}"
    );

    // Penumbra shading can only soften the power transition.
    assert!(
        max_step_jump(&res_con) <= max_step_jump(&res_cyl) + 1e-6,
        "conical jump {} > cylindrical {}",
        max_step_jump(&res_con),
        max_step_jump(&res_cyl)
    );

    assert!(
        res_con.min_soc() >= res_cyl.min_soc() - 0.005,
        "conical min SoC {} vs cylindrical {}",
        res_con.min_soc(),
        res_cyl.min_soc()
    );
}

#[test]
fn test_j2_raan_drift_over_five_orbits() {
    let orbit = Orbit::circular(550.0, 97.6, 0.0, true).unwrap();
    let t_total = 5.0 * orbit.period();

    let a = orbit.semi_major_axis_m();
    let n = orbit.mean_motion();
    let expected_rate = -1.5
        * n
        * satpower_types::constants::J2
        * (satpower_types::constants::R_EARTH / a).powi(2)
        * 97.6_f64.to_radians().cos();
    let expected_drift = expected_rate * t_total;

    let drift = orbit.raan_at(t_total) - orbit.raan_at(0.0);
    assert!(
        ((drift - expected_drift) / expected_drift).abs() < 0.01,
        "drift {drift} vs expected {expected_drift}"
    );
    // Retrograde sun-synchronous orbit precesses eastward a few mrad.
    assert!(drift > 0.0);
    assert!(drift < 0.01);

    // The drifting node must shift the propagated ground track.
    let orbit_static = Orbit::circular(550.0, 97.6, 0.0, false).unwrap();
    let (r_j2, _) = orbit.propagate_one(t_total);
    let (r_static, _) = orbit_static.propagate_one(t_total);
    let displaced: f64 = r_j2
        .iter()
        .zip(r_static.iter())
        .map(|(a, b)| (a - b) * (a - b))
        .sum::<f64>()
        .sqrt();
    assert!(displaced > 1000.0, "J2 displacement only {displaced} m");
}

#[test]
fn test_overdrawn_1u_goes_negative() {
    let cell = triple_junction_cell();
    let panels = SolarPanel::cubesat_body(FormFactor::OneU, &cell, &[]).unwrap();
    let orbit = Orbit::circular(550.0, 97.6, 0.0, false).unwrap();
    let mut loads = LoadProfile::new();
    loads
        .add_mode("continuous", 10.0, 1.0, Trigger::Always, 0)
        .unwrap();

    let sim = Simulation::new(orbit, panels, pack(2, 1), loads).unwrap();
    let results = sim.run(Duration::Orbits(3.0), 30.0).unwrap();

    // The bus drains far faster than a 1U array can replenish.
    let two_orbits = 2.0 * results.orbit_period_s;
    let min_by_orbit_two = results
        .time
        .iter()
        .zip(results.soc.iter())
        .filter(|(&t, _)| t <= two_orbits)
        .map(|(_, &s)| s)
        .fold(f64::INFINITY, f64::min);
    assert!(
        min_by_orbit_two < 0.5,
        "SoC after two orbits = {min_by_orbit_two}"
    );

    // The run keeps integrating through empty: the failure is visible,
    // not masked by an early stop.
    assert!(results.min_soc() < 0.0);
    let boundary = results.boundary_report();
    assert!(boundary.soc_out_of_range);

    let report = PowerBudgetReport::generate(&results, sim.loads(), sim.battery(), "overdrawn");
    assert_eq!(report.verdict, Verdict::NegativeMargin);
    assert!(!report.failing_conditions.is_empty());
}

#[test]
fn test_thermal_swings_with_wings() {
    let cell = triple_junction_cell();
    // 3U body (0.14 m^2) plus two 0.02 m^2 wings: 0.18 m^2 of radiator.
    let panels =
        SolarPanel::cubesat_with_wings(FormFactor::ThreeU, &cell, 2, Some(0.02), &[]).unwrap();
    let orbit = Orbit::circular(550.0, 97.6, 0.0, false).unwrap();

    let thermal = ThermalConfig {
        panel_area_m2: 0.18,
        ..ThermalConfig::default()
    };
    let sim = Simulation::new(orbit, panels, pack(2, 2), imaging_loads())
        .unwrap()
        .with_eclipse_method(EclipseMethod::Conical)
        .with_thermal(ThermalMode::Enabled(thermal))
        .unwrap();

    let results = sim.run(Duration::Orbits(3.0), 30.0).unwrap();
    let panel_temp = results.panel_temp_k.as_ref().unwrap();
    let battery_temp = results.battery_temp_k.as_ref().unwrap();

    for (&tp, &tb) in panel_temp.iter().zip(battery_temp.iter()) {
        assert!((180.0..=360.0).contains(&tp), "panel temp {tp} K");
        assert!((283.0..=313.0).contains(&tb), "battery temp {tb} K");
    }

    // Each orbit crosses the shadow boundary twice.
    let (entries, exits) = results.eclipse_transitions();
    assert!(entries.len() >= 3, "entries: {}", entries.len());
    assert!(exits.len() >= 2, "exits: {}", exits.len());

    // The panel turns around within a few samples of each transition:
    // cooling after eclipse entry, warming after exit.
    for &t_entry in &entries {
        let i = results.time.iter().position(|&t| t >= t_entry).unwrap();
        if i + 3 < results.len() {
            assert!(
                panel_temp[i + 3] < panel_temp[i],
                "panel kept warming after eclipse entry at t={t_entry}"
            );
        }
    }
    for &t_exit in &exits {
        let i = results.time.iter().position(|&t| t >= t_exit).unwrap();
        if i + 3 < results.len() {
            assert!(
                panel_temp[i + 3] > panel_temp[i],
                "panel kept cooling after eclipse exit at t={t_exit}"
            );
        }
    }
}

#[test]
fn test_two_year_lifetime_fade() {
    let aging = AgingModel::new(0.02, 1e-4, 5e-4).unwrap();
    let driver = LifetimeSimulation::new(sso_3u_simulation(), aging);

    let results = driver.run(2.0, 100, 3).unwrap();
    assert!(!results.capacity_clamped);

    let final_capacity = results.final_capacity();
    assert!(
        (0.93..=0.97).contains(&final_capacity),
        "capacity after 2 years = {final_capacity}"
    );

    for pair in results.segments.windows(2) {
        assert!(
            pair[1].capacity_remaining <= pair[0].capacity_remaining + 1e-12,
            "capacity increased between segments"
        );
    }

    // Shallow LEO cycling: the battery barely dips each orbit.
    for segment in &results.segments {
        assert!(segment.worst_dod < 0.2, "worst DoD {}", segment.worst_dod);
    }
}

#[test]
fn test_rc_branches_converge_under_constant_current() {
    use satpower_math::rk45::{integrate_on_grid, OdeSystem, Rk45Options};
    use satpower_types::error::PowerResult;

    struct ConstantCurrent {
        pack: BatteryPack,
        current_a: f64,
    }

    impl OdeSystem for ConstantCurrent {
        fn dim(&self) -> usize {
            2
        }
        fn rhs(&self, _t: f64, y: &[f64], dydt: &mut [f64]) -> PowerResult<()> {
            let (dv1, dv2) = self.pack.derivatives(self.current_a, y[0], y[1]);
            dydt[0] = dv1;
            dydt[1] = dv2;
            Ok(())
        }
    }

    let system = ConstantCurrent {
        pack: pack(2, 2),
        current_a: 1.5,
    };
    let params = li_ion_cell().params().clone();
    let sp = 2.0 / 2.0;
    let tau_max = (params.r2_ohm * sp) * (params.c2_f / sp);
    let horizon = 5.0 * tau_max;

    let grid: Vec<f64> = (0..301).map(|i| horizon * i as f64 / 300.0).collect();
    let states = integrate_on_grid(&system, &[0.0, 0.0], &grid, &Rk45Options::default()).unwrap();

    let v1_target = 1.5 * params.r1_ohm * sp;
    let v2_target = 1.5 * params.r2_ohm * sp;
    let last = grid.len() - 1;
    assert!(
        (states[[last, 0]] - v1_target).abs() / v1_target < 0.01,
        "V_rc1 = {} vs {}",
        states[[last, 0]],
        v1_target
    );
    assert!(
        (states[[last, 1]] - v2_target).abs() / v2_target < 0.01,
        "V_rc2 = {} vs {}",
        states[[last, 1]],
        v2_target
    );
}

#[test]
fn test_rerun_is_bitwise_identical() {
    let sim = sso_3u_simulation();
    let a = sim.run(Duration::Orbits(2.0), 30.0).unwrap();
    let b = sim.run(Duration::Orbits(2.0), 30.0).unwrap();
    assert_eq!(a.soc, b.soc);
    assert_eq!(a.power_generated, b.power_generated);
    assert_eq!(a.power_consumed, b.power_consumed);
    assert_eq!(a.battery_voltage, b.battery_voltage);
    assert_eq!(a.eclipse, b.eclipse);
}

#[test]
fn test_eclipse_samples_generate_nothing() {
    let sim = sso_3u_simulation();
    let results = sim.run(Duration::Orbits(2.0), 30.0).unwrap();
    for i in 0..results.len() {
        if results.eclipse[i] {
            assert_eq!(results.power_generated[i], 0.0, "generation at sample {i}");
        } else {
            assert!(
                results.power_generated[i] > 0.0,
                "dark sunlit sample at {i}"
            );
        }
    }
}
