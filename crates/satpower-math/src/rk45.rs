//! Adaptive Dormand-Prince 4(5) integration with output-grid evaluation.
//!
//! The stepper lands exactly on every requested output time, so callers can
//! recompute auxiliary quantities from the stored states without a dense
//! interpolant. Step size is governed by the embedded 4th-order error
//! estimate; the RC and thermal time constants of the power system are
//! seconds to hours, so no stiff machinery is needed.

use ndarray::Array2;
use satpower_types::error::{PowerError, PowerResult};

/// Right-hand side contract for the integrator.
pub trait OdeSystem {
    fn dim(&self) -> usize;

    /// Write dy/dt at `(t, y)` into `dydt`.
    fn rhs(&self, t: f64, y: &[f64], dydt: &mut [f64]) -> PowerResult<()>;
}

/// Step-size and tolerance controls.
#[derive(Debug, Clone)]
pub struct Rk45Options {
    /// Relative tolerance.
    pub rtol: f64,
    /// Absolute tolerance per component. A shorter vector repeats its last
    /// entry for the remaining components.
    pub atol: Vec<f64>,
    /// Hard cap on the step size (s).
    pub dt_max: f64,
    /// Floor below which a step is accepted regardless of the error
    /// estimate; bounds the work spent crossing eclipse discontinuities.
    pub h_min: f64,
    /// Consecutive rejections allowed before the run is abandoned.
    pub max_rejects: usize,
}

impl Default for Rk45Options {
    fn default() -> Self {
        Rk45Options {
            rtol: 1e-5,
            atol: vec![1e-6],
            dt_max: 30.0,
            h_min: 1e-3,
            max_rejects: 50,
        }
    }
}

// Dormand-Prince coefficients (Butcher tableau).
const C: [f64; 7] = [0.0, 1.0 / 5.0, 3.0 / 10.0, 4.0 / 5.0, 8.0 / 9.0, 1.0, 1.0];

const A: [[f64; 6]; 7] = [
    [0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    [1.0 / 5.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    [3.0 / 40.0, 9.0 / 40.0, 0.0, 0.0, 0.0, 0.0],
    [44.0 / 45.0, -56.0 / 15.0, 32.0 / 9.0, 0.0, 0.0, 0.0],
    [
        19372.0 / 6561.0,
        -25360.0 / 2187.0,
        64448.0 / 6561.0,
        -212.0 / 729.0,
        0.0,
        0.0,
    ],
    [
        9017.0 / 3168.0,
        -355.0 / 33.0,
        46732.0 / 5247.0,
        49.0 / 176.0,
        -5103.0 / 18656.0,
        0.0,
    ],
    [
        35.0 / 384.0,
        0.0,
        500.0 / 1113.0,
        125.0 / 192.0,
        -2187.0 / 6784.0,
        11.0 / 84.0,
    ],
];

/// 5th-order solution weights.
const B5: [f64; 7] = [
    35.0 / 384.0,
    0.0,
    500.0 / 1113.0,
    125.0 / 192.0,
    -2187.0 / 6784.0,
    11.0 / 84.0,
    0.0,
];

/// Embedded 4th-order weights.
const B4: [f64; 7] = [
    5179.0 / 57600.0,
    0.0,
    7571.0 / 16695.0,
    393.0 / 640.0,
    -92097.0 / 339200.0,
    187.0 / 2100.0,
    1.0 / 40.0,
];

fn integration_error(t: f64, y: &[f64], message: impl Into<String>) -> PowerError {
    PowerError::Integration {
        t_last: t,
        state: y.to_vec(),
        message: message.into(),
    }
}

/// Integrate `system` from `grid[0]` and record the state at every grid
/// point. Returns an `(n_points, dim)` array whose first row is `y0`.
pub fn integrate_on_grid<S: OdeSystem>(
    system: &S,
    y0: &[f64],
    grid: &[f64],
    opts: &Rk45Options,
) -> PowerResult<Array2<f64>> {
    let n = system.dim();
    if y0.len() != n {
        return Err(PowerError::InvalidConfig(format!(
            "initial state has {} components, system expects {n}",
            y0.len()
        )));
    }
    if grid.len() < 2 {
        return Err(PowerError::InvalidConfig(
            "output grid needs at least 2 points".to_string(),
        ));
    }

    let mut out = Array2::zeros((grid.len(), n));
    out.row_mut(0).iter_mut().zip(y0).for_each(|(o, &v)| *o = v);

    let mut t = grid[0];
    let mut y = y0.to_vec();
    let mut y_new = vec![0.0; n];
    let mut y_stage = vec![0.0; n];
    let mut k = vec![vec![0.0; n]; 7];

    let atol = |i: usize| -> f64 { opts.atol[i.min(opts.atol.len() - 1)] };

    let mut h = opts.dt_max.min(grid[1] - grid[0]);

    for (row, &target) in grid.iter().enumerate().skip(1) {
        let mut rejects = 0usize;

        while t < target {
            let h_step = h.min(opts.dt_max).min(target - t).max(opts.h_min.min(target - t));

            // Seven stages.
            system.rhs(t, &y, &mut k[0])?;
            for stage in 1..7 {
                for i in 0..n {
                    let mut acc = 0.0;
                    for (j, kj) in k.iter().enumerate().take(stage) {
                        acc += A[stage][j] * kj[i];
                    }
                    y_stage[i] = y[i] + h_step * acc;
                }
                system.rhs(t + C[stage] * h_step, &y_stage, &mut k[stage])?;
            }

            // 5th-order candidate and scaled RMS error against the
            // embedded 4th-order solution.
            let mut err_sq = 0.0;
            for i in 0..n {
                let mut y5 = 0.0;
                let mut y4 = 0.0;
                for (j, kj) in k.iter().enumerate() {
                    y5 += B5[j] * kj[i];
                    y4 += B4[j] * kj[i];
                }
                y_new[i] = y[i] + h_step * y5;
                let scale = atol(i) + opts.rtol * y[i].abs().max(y_new[i].abs());
                let e = h_step * (y5 - y4) / scale;
                err_sq += e * e;
            }
            let err = (err_sq / n as f64).sqrt();

            if !err.is_finite() || y_new.iter().any(|v| !v.is_finite()) {
                return Err(integration_error(t, &y, "non-finite state encountered"));
            }

            let factor = if err > 0.0 {
                (0.9 * err.powf(-0.2)).clamp(0.2, 5.0)
            } else {
                5.0
            };

            if err <= 1.0 || h_step <= opts.h_min {
                t += h_step;
                y.copy_from_slice(&y_new);
                h = (h_step * factor).min(opts.dt_max);
                rejects = 0;
            } else {
                rejects += 1;
                if rejects > opts.max_rejects {
                    return Err(integration_error(
                        t,
                        &y,
                        format!("step rejected {rejects} times at h={h_step:.3e} s"),
                    ));
                }
                h = (h_step * factor).max(opts.h_min);
            }
        }

        out.row_mut(row).iter_mut().zip(&y).for_each(|(o, &v)| *o = v);
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// dy/dt = -y, y(0) = 1: exact solution exp(-t).
    struct Decay;

    impl OdeSystem for Decay {
        fn dim(&self) -> usize {
            1
        }
        fn rhs(&self, _t: f64, y: &[f64], dydt: &mut [f64]) -> PowerResult<()> {
            dydt[0] = -y[0];
            Ok(())
        }
    }

    /// Harmonic oscillator: y'' = -y as a 2-state system.
    struct Oscillator;

    impl OdeSystem for Oscillator {
        fn dim(&self) -> usize {
            2
        }
        fn rhs(&self, _t: f64, y: &[f64], dydt: &mut [f64]) -> PowerResult<()> {
            dydt[0] = y[1];
            dydt[1] = -y[0];
            Ok(())
        }
    }

    /// RHS with a jump at t = 5 (mimics an eclipse boundary).
    struct Step;

    impl OdeSystem for Step {
        fn dim(&self) -> usize {
            1
        }
        fn rhs(&self, t: f64, _y: &[f64], dydt: &mut [f64]) -> PowerResult<()> {
            dydt[0] = if t < 5.0 { 1.0 } else { -1.0 };
            Ok(())
        }
    }

    fn uniform_grid(t_end: f64, n: usize) -> Vec<f64> {
        (0..n).map(|i| t_end * i as f64 / (n - 1) as f64).collect()
    }

    #[test]
    fn test_exponential_decay_accuracy() {
        let grid = uniform_grid(5.0, 51);
        let out = integrate_on_grid(&Decay, &[1.0], &grid, &Rk45Options::default()).unwrap();
        for (i, &t) in grid.iter().enumerate() {
            let exact = (-t).exp();
            assert!(
                (out[[i, 0]] - exact).abs() < 1e-6,
                "t={t}: got {}, exact {exact}",
                out[[i, 0]]
            );
        }
    }

    #[test]
    fn test_oscillator_amplitude_preserved() {
        let grid = uniform_grid(4.0 * std::f64::consts::PI, 200);
        let opts = Rk45Options {
            rtol: 1e-8,
            atol: vec![1e-10],
            dt_max: 0.5,
            ..Rk45Options::default()
        };
        let out = integrate_on_grid(&Oscillator, &[1.0, 0.0], &grid, &opts).unwrap();
        let last = grid.len() - 1;
        // Two full periods: back to (1, 0).
        assert!((out[[last, 0]] - 1.0).abs() < 1e-5, "y = {}", out[[last, 0]]);
        assert!(out[[last, 1]].abs() < 1e-5, "y' = {}", out[[last, 1]]);
    }

    #[test]
    fn test_discontinuous_rhs_integrates_through() {
        let grid = uniform_grid(10.0, 101);
        let out = integrate_on_grid(&Step, &[0.0], &grid, &Rk45Options::default()).unwrap();
        // y rises to 5 at t=5, then returns to 0 at t=10.
        let mid = 50;
        assert!((out[[mid, 0]] - 5.0).abs() < 1e-3);
        assert!(out[[100, 0]].abs() < 1e-2);
    }

    #[test]
    fn test_rows_land_on_grid() {
        let grid = uniform_grid(3.0, 7);
        let out = integrate_on_grid(&Decay, &[1.0], &grid, &Rk45Options::default()).unwrap();
        assert_eq!(out.shape(), &[7, 1]);
        assert_eq!(out[[0, 0]], 1.0);
    }

    #[test]
    fn test_dimension_mismatch_rejected() {
        let grid = uniform_grid(1.0, 3);
        assert!(integrate_on_grid(&Decay, &[1.0, 2.0], &grid, &Rk45Options::default()).is_err());
    }

    #[test]
    fn test_deterministic_rerun() {
        let grid = uniform_grid(5.0, 60);
        let a = integrate_on_grid(&Oscillator, &[1.0, 0.0], &grid, &Rk45Options::default()).unwrap();
        let b = integrate_on_grid(&Oscillator, &[1.0, 0.0], &grid, &Rk45Options::default()).unwrap();
        assert_eq!(a, b);
    }
}
