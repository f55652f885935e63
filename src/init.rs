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
// initialization routines: Landau quiet start, two-stream beams        //
//----------------------------------------------------------------------//

use std::f64::consts::PI;

use rand::Rng;
use rand_distr::Normal;
use serde::{Deserialize, Serialize};

use crate::error::{invalid, PicError, Result};
use crate::grid::wrap_periodic;

pub const DEFAULT_ALPHA: f64 = 0.2;              // Landau perturbation amplitude
pub const DEFAULT_NEWTON_ITERATIONS: usize = 10; // fixed number of displacement updates
pub const DEFAULT_VBEAM: f64 = 2.0;              // two-stream beam velocity

/// Particle positions and velocities produced by a generator.
#[derive(Debug, Clone)]
pub struct ParticleLoad {
    pub position: Vec<f64>,
    pub velocity: Vec<f64>,
    /// `max |x + alpha sin(kx)/k - x0|` after the last Newton update (quiet start only).
    pub newton_residual: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LandauParams {
    pub alpha: f64,
    /// The iteration count is fixed; convergence is never tested, only reported.
    pub newton_iterations: usize,
}

impl Default for LandauParams {
    fn default() -> Self {
        LandauParams {
            alpha: DEFAULT_ALPHA,
            newton_iterations: DEFAULT_NEWTON_ITERATIONS,
        }
    }
}

fn check_domain(npart: usize, length: f64) -> Result<()> {
    if npart == 0 {
        return invalid("cannot load zero particles");
    }
    if !(length.is_finite() && length > 0.0) {
        return invalid(format!("domain length must be positive and finite, got {}", length));
    }
    Ok(())
}

fn unit_normal() -> Result<Normal<f64>> {
    Normal::new(0.0, 1.0).map_err(|e| PicError::InvalidConfiguration(format!("{:?}", e)))
}

/// Density `1 + alpha cos(kx)` with `k = 2 pi / L`, Maxwellian velocities.
///
/// Starts from uniform positions `x0` and solves `x + alpha sin(kx)/k = x0` with exactly
/// `newton_iterations` Newton updates. The final residual is returned, not checked.
pub fn landau<R: Rng + ?Sized>(
    npart: usize,
    length: f64,
    params: LandauParams,
    rng: &mut R,
) -> Result<ParticleLoad> {
    check_domain(npart, length)?;
    let alpha = params.alpha;
    if !alpha.is_finite() || alpha.abs() >= 1.0 {
        // 1 + alpha cos(kx) must stay positive for the map to be invertible
        return invalid(format!("Landau amplitude must satisfy |alpha| < 1, got {}", alpha));
    }

    let k = 2.0 * PI / length;
    let pos0: Vec<f64> = (0..npart).map(|_| length * rng.gen::<f64>()).collect();
    let mut pos = pos0.clone();

    for _ in 0..params.newton_iterations {
        for (x, &x0) in pos.iter_mut().zip(pos0.iter()) {
            *x -= (*x + alpha * (k * *x).sin() / k - x0) / (1.0 + alpha * (k * *x).cos());
        }
    }

    let residual = pos
        .iter()
        .zip(pos0.iter())
        .map(|(&x, &x0)| (x + alpha * (k * x).sin() / k - x0).abs())
        .fold(0.0, f64::max);

    let normal = unit_normal()?;
    let velocity = (0..npart).map(|_| rng.sample(normal)).collect();

    Ok(ParticleLoad {
        position: pos.into_iter().map(|x| wrap_periodic(x, length)).collect(),
        velocity,
        newton_residual: Some(residual),
    })
}

/// Uniform positions, two Maxwellian beams at `+vbeam` (first half) and `-vbeam`.
pub fn two_stream<R: Rng + ?Sized>(
    npart: usize,
    length: f64,
    vbeam: f64,
    rng: &mut R,
) -> Result<ParticleLoad> {
    check_domain(npart, length)?;
    if !vbeam.is_finite() {
        return invalid("beam velocity must be finite");
    }

    let position = (0..npart).map(|_| length * rng.gen::<f64>()).collect();
    let normal = unit_normal()?;
    let np2 = npart / 2;
    let velocity = (0..npart)
        .map(|i| {
            let v: f64 = rng.sample(normal);
            if i < np2 {
                v + vbeam
            } else {
                v - vbeam
            }
        })
        .collect();

    Ok(ParticleLoad {
        position,
        velocity,
        newton_residual: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::density::deposit_density;
    use crate::diagnostics::first_harmonic;
    use crate::grid::Grid;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn landau_load_is_in_domain_and_converged() {
        let mut rng = StdRng::seed_from_u64(7);
        let l = 4.0 * PI;
        let load = landau(5000, l, LandauParams::default(), &mut rng).unwrap();
        assert_eq!(load.position.len(), 5000);
        assert_eq!(load.velocity.len(), 5000);
        assert!(load.position.iter().all(|&x| x >= 0.0 && x < l));
        assert!(load.newton_residual.unwrap() < 1e-10);
    }

    #[test]
    fn landau_density_carries_the_perturbation() {
        let mut rng = StdRng::seed_from_u64(11);
        let l = 4.0 * PI;
        let load = landau(200_000, l, LandauParams::default(), &mut rng).unwrap();
        let d = deposit_density(&load.position, &Grid::new(l, 20).unwrap()).unwrap();
        // cloud-in-cell smoothing shrinks the mode slightly below alpha
        let fh = first_harmonic(&d);
        assert!(fh > 0.17 && fh < 0.22, "first harmonic {}", fh);
    }

    #[test]
    fn zero_iterations_leave_the_uniform_load() {
        let l = 1.0;
        let params = LandauParams {
            alpha: 0.5,
            newton_iterations: 0,
        };
        let a = landau(100, l, params, &mut StdRng::seed_from_u64(3)).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let uniform: Vec<f64> = (0..100).map(|_| l * rng.gen::<f64>()).collect();
        assert_eq!(a.position, uniform);
        assert!(a.newton_residual.unwrap() > 0.0);
    }

    #[test]
    fn landau_rejects_overdriven_amplitude() {
        let params = LandauParams {
            alpha: 1.5,
            ..LandauParams::default()
        };
        assert!(landau(10, 1.0, params, &mut StdRng::seed_from_u64(0)).is_err());
        assert!(landau(0, 1.0, LandauParams::default(), &mut StdRng::seed_from_u64(0)).is_err());
    }

    #[test]
    fn two_stream_beams_move_apart() {
        let mut rng = StdRng::seed_from_u64(5);
        let load = two_stream(10_000, 100.0, 3.0, &mut rng).unwrap();
        let (first, second) = load.velocity.split_at(5000);
        let mean = |v: &[f64]| v.iter().sum::<f64>() / v.len() as f64;
        assert!((mean(first) - 3.0).abs() < 0.1);
        assert!((mean(second) + 3.0).abs() < 0.1);
        assert!(load.position.iter().all(|&x| x >= 0.0 && x < 100.0));
        assert!(load.newton_residual.is_none());
    }

    #[test]
    fn same_seed_same_load() {
        let a = two_stream(50, 2.0, 1.0, &mut StdRng::seed_from_u64(9)).unwrap();
        let b = two_stream(50, 2.0, 1.0, &mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(a.position, b.position);
        assert_eq!(a.velocity, b.velocity);
    }
}
