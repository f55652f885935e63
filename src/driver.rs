//-------------------------------------------------------------------//
//       pic1d : 1d1v electrostatic PIC code on a periodic domain    //
//-------------------------------------------------------------------//
// Disclaimer: pic1d (one-dimensional electrostatic Particle-in-     //
// Cell simulation code) is free software: you can redistribute it   //
// and/or modify it under the terms of the GNU General Public License//
// as published by the Free Software Foundation, version 3.          //
// This program is distributed in the hope that it will be useful,   //
// but WITHOUT ANY WARRANTY; without even the implied warranty of    //
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU  //
// General Public License for more details at                        //
// https://www.gnu.org/licenses/gpl-3.0.html.                        //
//-------------------------------------------------------------------//

//----------------------------------------------------------------------//
// simulation driver: Courant-limited RK4 substeps, exact output times  //
//----------------------------------------------------------------------//

use log::{debug, info, warn};

use crate::error::{invalid, PicError, Result};
use crate::grid::Grid;
use crate::output::{Output, Snapshot};
use crate::pic::ElectrostaticPic;
use crate::rk4::{rk4_step, Derivative};

pub const DEFAULT_COURANT: f64 = 0.5;        // fraction of a cell the fastest particle may cross per substep
pub const DEFAULT_T_END: f64 = 20.0;         // last output time when none are given
pub const DEFAULT_N_OUTPUTS: usize = 100;    // number of output times when none are given
const RHS_PER_STEP: u64 = 4;                 // RK4 stages

/// `n` evenly spaced values from `start` to `stop` inclusive.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / ((n - 1) as f64);
            (0..n)
                .map(|i| if i == n - 1 { stop } else { start + step * (i as f64) })
                .collect()
        }
    }
}

/// Cell count used when none is given: `floor(sqrt(N))`, at least one.
pub fn default_ncells(nparticles: usize) -> usize {
    ((nparticles as f64).sqrt().floor() as usize).max(1)
}

/// Counters for one completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunStats {
    pub substeps: u64,
    pub rhs_evaluations: u64,
    pub outputs: usize,
}

/// Particle state after the last output time.
#[derive(Debug, Clone)]
pub struct RunResult {
    pub position: Vec<f64>,
    pub velocity: Vec<f64>,
    pub time: f64,
    pub ncells: usize,
    pub stats: RunStats,
}

/// Run parameters. Build with [`Simulation::new`] and the `with_*` methods.
#[derive(Debug, Clone)]
pub struct Simulation {
    length: f64,
    ncells: Option<usize>,
    courant: f64,
    output_times: Vec<f64>,
    start_time: f64,
}

impl Simulation {
    pub fn new(length: f64) -> Self {
        Simulation {
            length,
            ncells: None,
            courant: DEFAULT_COURANT,
            output_times: linspace(0.0, DEFAULT_T_END, DEFAULT_N_OUTPUTS),
            start_time: 0.0,
        }
    }

    pub fn with_cells(mut self, ncells: usize) -> Self {
        self.ncells = Some(ncells);
        self
    }

    pub fn with_courant(mut self, courant: f64) -> Self {
        self.courant = courant;
        self
    }

    pub fn with_output_times(mut self, output_times: Vec<f64>) -> Self {
        self.output_times = output_times;
        self
    }

    /// Time of the initial state (0 unless resuming from a checkpoint).
    pub fn starting_at(mut self, time: f64) -> Self {
        self.start_time = time;
        self
    }

    pub fn output_times(&self) -> &[f64] {
        &self.output_times
    }

    fn validate(&self, position: &[f64], velocity: &[f64]) -> Result<Grid> {
        if position.is_empty() {
            return invalid("no particles to simulate");
        }
        if position.len() != velocity.len() {
            return invalid(format!(
                "{} positions but {} velocities",
                position.len(),
                velocity.len()
            ));
        }
        if position.iter().chain(velocity.iter()).any(|v| !v.is_finite()) {
            return invalid("initial particle state contains non-finite values");
        }
        if !(self.courant.is_finite() && self.courant > 0.0) {
            return invalid(format!("Courant number must be positive, got {}", self.courant));
        }
        if !self.start_time.is_finite() {
            return invalid("start time must be finite");
        }
        let mut previous = self.start_time;
        for (i, &t) in self.output_times.iter().enumerate() {
            if !t.is_finite() {
                return invalid(format!("output time #{} is not finite", i));
            }
            let ordered = if i == 0 { t >= previous } else { t > previous };
            if !ordered {
                return invalid(format!(
                    "output times must increase strictly from t = {}, got {} after {}",
                    self.start_time, t, previous
                ));
            }
            previous = t;
        }
        if self.courant > 1.0 {
            warn!("Courant number {} lets particles cross more than one cell per substep", self.courant);
        }

        let ncells = self.ncells.unwrap_or_else(|| default_ncells(position.len()));
        Grid::new(self.length, ncells)
    }

    /// Advances the particles through every output time, calling `outputs` at each.
    ///
    /// The run is all-or-nothing: the first error stops it, and snapshots already
    /// delivered stay delivered.
    pub fn run(
        &self,
        position: Vec<f64>,
        velocity: Vec<f64>,
        outputs: &mut [&mut dyn Output],
    ) -> Result<RunResult> {
        let grid = self.validate(&position, &velocity)?;
        let pic = ElectrostaticPic::new(grid);

        info!(
            "{} particles, {} cells, L = {}, {} output times, Courant = {}",
            position.len(),
            grid.ncells(),
            grid.length(),
            self.output_times.len(),
            self.courant
        );
        self.integrate(&pic, grid, position, velocity, outputs)
    }

    /// Stepping loop, generic over the right-hand side.
    fn integrate<D: Derivative>(
        &self,
        rhs: &D,
        grid: Grid,
        position: Vec<f64>,
        velocity: Vec<f64>,
        outputs: &mut [&mut dyn Output],
    ) -> Result<RunResult> {
        let n = position.len();
        let dx = grid.dx();

        let mut state = position;
        state.extend(velocity);
        grid.wrap_all(&mut state[..n]);

        let mut time = self.start_time;
        let mut stats = RunStats::default();

        for &t_next in &self.output_times {
            let mut stepping = true;
            while stepping {
                let vmax = state[n..].iter().fold(0.0f64, |m, v| m.max(v.abs()));
                if vmax == 0.0 {
                    return Err(PicError::DegenerateVelocityField { time });
                }
                // fastest particle moves at most `courant` cells
                let mut dt = self.courant * dx / vmax;
                if time + dt >= t_next {
                    stepping = false;
                    dt = t_next - time;
                } else if time + dt == time {
                    return Err(PicError::StalledStep { time, dt });
                }

                state = rk4_step(rhs, &state, dt)?;
                stats.substeps += 1;
                stats.rhs_evaluations += RHS_PER_STEP;

                if state.iter().any(|v| !v.is_finite()) {
                    return Err(PicError::NumericalDivergence {
                        time: time + dt,
                        substep: stats.substeps,
                    });
                }
                grid.wrap_all(&mut state[..n]);
                time = if stepping { time + dt } else { t_next };
            }

            debug!("t = {:10.4}  substeps = {:8}", time, stats.substeps);

            let (pos, vel) = state.split_at(n);
            let snapshot = Snapshot {
                position: pos,
                velocity: vel,
                ncells: grid.ncells(),
                length: grid.length(),
                time,
            };
            for out in outputs.iter_mut() {
                out.on_snapshot(&snapshot)?;
            }
            stats.outputs += 1;
        }

        info!(
            "reached t = {} after {} substeps ({} field solves)",
            time, stats.substeps, stats.rhs_evaluations
        );

        let velocity = state.split_off(n);
        Ok(RunResult {
            position: state,
            velocity,
            time,
            ncells: grid.ncells(),
            stats,
        })
    }
}

/// Top-level entry point with the optional arguments of a plain run.
///
/// Defaults: `ncells = floor(sqrt(N))`, output times `linspace(0, 20, 100)`,
/// Courant number 0.5. Returns the final `(position, velocity)`.
pub fn run(
    position: Vec<f64>,
    velocity: Vec<f64>,
    length: f64,
    ncells: Option<usize>,
    output_times: Option<Vec<f64>>,
    courant: Option<f64>,
    outputs: &mut [&mut dyn Output],
) -> Result<(Vec<f64>, Vec<f64>)> {
    let mut sim = Simulation::new(length);
    if let Some(nc) = ncells {
        sim = sim.with_cells(nc);
    }
    if let Some(times) = output_times {
        sim = sim.with_output_times(times);
    }
    if let Some(c) = courant {
        sim = sim.with_courant(c);
    }
    let result = sim.run(position, velocity, outputs)?;
    Ok((result.position, result.velocity))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_hits_both_ends() {
        let t = linspace(0.0, 40.0, 100);
        assert_eq!(t.len(), 100);
        assert_eq!(t[0], 0.0);
        assert_eq!(t[99], 40.0);
        assert!(t.windows(2).all(|w| w[1] > w[0]));
        assert_eq!(linspace(1.0, 2.0, 1), vec![1.0]);
        assert!(linspace(1.0, 2.0, 0).is_empty());
    }

    #[test]
    fn default_cells_from_particle_count() {
        assert_eq!(default_ncells(20000), 141);
        assert_eq!(default_ncells(100), 10);
        assert_eq!(default_ncells(3), 1);
    }

    #[test]
    fn rejects_bad_configuration_before_stepping() {
        let pos = vec![0.1, 0.5];
        let vel = vec![1.0, -1.0];
        let run_with = |sim: Simulation| sim.run(pos.clone(), vel.clone(), &mut []);

        let bad = [
            Simulation::new(0.0),
            Simulation::new(-2.0),
            Simulation::new(1.0).with_cells(0),
            Simulation::new(1.0).with_courant(0.0),
            Simulation::new(1.0).with_courant(f64::NAN),
            Simulation::new(1.0).with_output_times(vec![0.0, 1.0, 1.0]),
            Simulation::new(1.0).with_output_times(vec![0.0, 2.0, 1.0]),
            Simulation::new(1.0).with_output_times(vec![-1.0, 1.0]),
            Simulation::new(1.0).with_output_times(vec![0.0, f64::INFINITY]),
        ];
        for sim in bad.iter() {
            match run_with(sim.clone()) {
                Err(PicError::InvalidConfiguration(_)) => {}
                other => panic!("{:?} accepted: {:?}", sim, other.map(|r| r.stats)),
            }
        }
    }

    #[test]
    fn rejects_mismatched_or_empty_particles() {
        let sim = Simulation::new(1.0).with_output_times(vec![0.1]);
        assert!(matches!(
            sim.run(vec![], vec![], &mut []),
            Err(PicError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            sim.run(vec![0.1, 0.2], vec![1.0], &mut []),
            Err(PicError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            sim.run(vec![0.1], vec![f64::NAN], &mut []),
            Err(PicError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn cold_plasma_has_no_step_size() {
        let sim = Simulation::new(1.0).with_cells(4).with_output_times(vec![0.5]);
        match sim.run(vec![0.1, 0.3, 0.6], vec![0.0; 3], &mut []) {
            Err(PicError::DegenerateVelocityField { time }) => assert_eq!(time, 0.0),
            other => panic!("unexpected {:?}", other.map(|r| r.stats)),
        }
    }

    #[test]
    fn free_streaming_pair_lands_on_target() {
        // two particles one cell apart keep the density uniform and stream freely
        let sim = Simulation::new(1.0)
            .with_cells(2)
            .with_output_times(vec![0.25, 1.0]);
        let r = sim.run(vec![0.0, 0.5], vec![1.0, 1.0], &mut []).unwrap();
        assert_eq!(r.time, 1.0);
        assert_eq!(r.stats.outputs, 2);
        assert_eq!(r.stats.rhs_evaluations, 4 * r.stats.substeps);
        assert!(r.position.iter().all(|&x| (0.0..1.0).contains(&x)));
    }

    #[test]
    fn blow_up_is_caught_after_the_offending_substep() {
        let sim = Simulation::new(1.0).with_output_times(vec![1.0]);
        let grid = Grid::new(1.0, 2).unwrap();
        let explode = |y: &[f64]| -> Result<Vec<f64>> {
            Ok(y.iter().map(|v| if *v > 0.0 { f64::INFINITY } else { 0.0 }).collect())
        };
        match sim.integrate(&explode, grid, vec![0.5], vec![1.0], &mut []) {
            Err(PicError::NumericalDivergence { substep, .. }) => assert_eq!(substep, 1),
            other => panic!("unexpected {:?}", other.map(|r| r.stats)),
        }
    }

    #[test]
    fn step_below_clock_resolution_is_an_error() {
        // dt = 0.5 * 0.5 / 1e7 = 2.5e-8, under half an ulp of 1e9
        let sim = Simulation::new(1.0)
            .with_cells(2)
            .starting_at(1e9)
            .with_output_times(vec![1e9 + 1.0]);
        match sim.run(vec![0.1, 0.6], vec![1e7, 1e7], &mut []) {
            Err(PicError::StalledStep { time, dt }) => {
                assert_eq!(time, 1e9);
                assert_eq!(time + dt, time);
            }
            other => panic!("unexpected {:?}", other.map(|r| r.stats)),
        }
    }

    #[test]
    fn substep_count_follows_courant_limit() {
        // uniform beam, no field: dt = 0.5 * dx / v = 0.5 * 0.25 / 1 = 0.125
        let n = 8;
        let pos: Vec<f64> = (0..n).map(|i| i as f64 / n as f64).collect();
        let sim = Simulation::new(1.0)
            .with_cells(4)
            .with_output_times(vec![1.0]);
        let r = sim.run(pos, vec![1.0; n], &mut []).unwrap();
        assert_eq!(r.stats.substeps, 8);
        assert_eq!(r.time, 1.0);
    }
}
