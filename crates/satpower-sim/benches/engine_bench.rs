//! Hot-path benchmarks: one RHS-equivalent instantaneous evaluation and a
//! full single-orbit run.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use satpower_battery::cell::BatteryCell;
use satpower_battery::pack::BatteryPack;
use satpower_eps::loads::{LoadProfile, Trigger};
use satpower_orbit::propagator::Orbit;
use satpower_sim::engine::{Duration, Simulation};
use satpower_solar::cell::SolarCell;
use satpower_solar::panel::{FormFactor, SolarPanel};
use satpower_types::config::{BatteryCellParams, SolarCellParams};

fn simulation() -> Simulation {
    let cell = SolarCell::new(SolarCellParams {
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
    .unwrap();
    let battery_cell = BatteryCell::new(BatteryCellParams {
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
            [0.2, 3.45],
            [0.4, 3.58],
            [0.6, 3.70],
            [0.8, 3.87],
            [1.0, 4.15],
        ],
    })
    .unwrap();

    let panels = SolarPanel::cubesat_body(FormFactor::ThreeU, &cell, &[]).unwrap();
    let orbit = Orbit::circular(550.0, 97.6, 0.0, false).unwrap();
    let battery = BatteryPack::new(battery_cell, 2, 2).unwrap();
    let mut loads = LoadProfile::new();
    loads.add_mode("obc", 0.5, 1.0, Trigger::Always, 0).unwrap();
    loads.add_mode("radio", 4.0, 0.15, Trigger::Always, 1).unwrap();

    Simulation::new(orbit, panels, battery, loads).unwrap()
}

fn bench_instantaneous(c: &mut Criterion) {
    let sim = simulation();
    c.bench_function("instantaneous_power_chain", |b| {
        b.iter(|| {
            sim.instantaneous(
                black_box(1234.5),
                black_box(0.95),
                black_box(0.01),
                black_box(0.002),
                301.15,
                298.15,
            )
        })
    });
}

fn bench_single_orbit(c: &mut Criterion) {
    let sim = simulation();
    c.bench_function("run_one_orbit", |b| {
        b.iter(|| sim.run(black_box(Duration::Orbits(1.0)), 30.0).unwrap())
    });
}

criterion_group!(benches, bench_instantaneous, bench_single_orbit);
criterion_main!(benches);
