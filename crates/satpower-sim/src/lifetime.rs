// ─────────────────────────────────────────────────────────────────────
// SatPower Core — Lifetime Simulation
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Multi-year mission simulation with capacity fade between segments.
//!
//! Aging lives on a timescale of months; the power ODE on seconds.
//! Instead of stiffening the ODE, the driver runs short representative
//! segments, scales their cycle loading up to the full update interval,
//! and re-derates a fresh copy of the template simulation for the next
//! segment. The template itself is never mutated.

use satpower_battery::aging::AgingModel;
use satpower_types::constants::{DAYS_PER_YEAR, DEFAULT_BATTERY_TEMP, SECONDS_PER_DAY};
use satpower_types::error::{PowerError, PowerResult};

use crate::engine::{Duration, Simulation};

/// Step cap for lifetime segments (s); coarser than single-run analysis
/// because each segment only has to resolve the orbit-scale cycling.
const SEGMENT_DT_MAX: f64 = 60.0;

/// Capacity floor as a fraction of the original capacity. Derating below
/// this is reported, not applied, so a badly aged pack cannot drive the
/// segment simulation into nonsense.
const CAPACITY_FLOOR: f64 = 0.5;

/// One lifetime segment record.
#[derive(Debug, Clone, Copy)]
pub struct LifetimeSegment {
    /// Mission years elapsed at the end of the represented interval.
    pub years: f64,
    /// Capacity fraction applied to the next segment.
    pub capacity_remaining: f64,
    pub min_soc: f64,
    pub worst_dod: f64,
    pub mean_dod: f64,
    /// Mean battery temperature over the segment (K).
    pub mean_battery_temp_k: f64,
}

/// Results of a lifetime run.
#[derive(Debug, Clone, Default)]
pub struct LifetimeResults {
    pub segments: Vec<LifetimeSegment>,
    /// Set when the capacity floor engaged at least once.
    pub capacity_clamped: bool,
}

impl LifetimeResults {
    /// Capacity fraction at end of mission.
    pub fn final_capacity(&self) -> f64 {
        self.segments.last().map(|s| s.capacity_remaining).unwrap_or(1.0)
    }
}

/// Multi-segment lifetime driver over an immutable simulation template.
#[derive(Debug, Clone)]
pub struct LifetimeSimulation {
    template: Simulation,
    aging: AgingModel,
}

impl LifetimeSimulation {
    pub fn new(template: Simulation, aging: AgingModel) -> Self {
        LifetimeSimulation { template, aging }
    }

    /// Run `duration_years` of mission time, re-derating the battery
    /// every `update_interval_orbits` using segments of
    /// `orbits_per_segment` simulated orbits.
    pub fn run(
        &self,
        duration_years: f64,
        update_interval_orbits: usize,
        orbits_per_segment: usize,
    ) -> PowerResult<LifetimeResults> {
        if !duration_years.is_finite() || duration_years <= 0.0 {
            return Err(PowerError::InvalidConfig(format!(
                "lifetime duration must be > 0 years, got {duration_years}"
            )));
        }
        if update_interval_orbits == 0 {
            return Err(PowerError::InvalidConfig(
                "update_interval_orbits must be > 0".to_string(),
            ));
        }
        if orbits_per_segment == 0 {
            return Err(PowerError::InvalidConfig(
                "orbits_per_segment must be > 0".to_string(),
            ));
        }

        let orbit_period_s = self.template.orbit().period();
        let orbits_per_year = DAYS_PER_YEAR * SECONDS_PER_DAY / orbit_period_s;
        let total_orbits = duration_years * orbits_per_year;

        let mut results = LifetimeResults::default();
        let mut elapsed_orbits = 0.0;
        let mut equivalent_full_cycles = 0.0;
        let mut capacity_scale = 1.0;
        let mut carry_soc = self.template.initial_soc();

        while elapsed_orbits < total_orbits {
            let represented_orbits =
                (update_interval_orbits as f64).min(total_orbits - elapsed_orbits);
            // Floating remainder too small to represent a real segment.
            if represented_orbits < 1e-6 {
                break;
            }
            let segment_orbits = (orbits_per_segment as f64).min(represented_orbits);

            let sim = self
                .template
                .with_capacity_scale(capacity_scale)?
                .with_initial_soc(carry_soc.clamp(0.0, 1.0))?;
            let seg = sim.run(Duration::Orbits(segment_orbits), SEGMENT_DT_MAX)?;

            let min_soc = seg.min_soc();
            let worst_dod = seg.worst_case_dod();
            let mean_dod = seg.mean_dod();
            let mean_battery_temp_k = seg
                .battery_temp_k
                .as_ref()
                .map(|t| t.sum() / t.len() as f64)
                .unwrap_or(DEFAULT_BATTERY_TEMP);

            // One charge/discharge cycle per orbit at the segment's worst
            // depth, scaled to the whole represented interval.
            equivalent_full_cycles += worst_dod * represented_orbits;
            elapsed_orbits += represented_orbits;
            let elapsed_years = elapsed_orbits / orbits_per_year;
            carry_soc = seg.soc[seg.len() - 1];

            let mut remaining = self.aging.capacity_remaining(
                elapsed_years,
                equivalent_full_cycles,
                worst_dod,
                mean_battery_temp_k,
            );
            if remaining < CAPACITY_FLOOR {
                remaining = CAPACITY_FLOOR;
                results.capacity_clamped = true;
            }
            capacity_scale = remaining;

            results.segments.push(LifetimeSegment {
                years: elapsed_years,
                capacity_remaining: remaining,
                min_soc,
                worst_dod,
                mean_dod,
                mean_battery_temp_k,
            });
        }

        Ok(results)
    }
}
