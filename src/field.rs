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

//! Periodic field solve by discrete Fourier transform.
//!
//! The electric field follows from `dE/dx = rho` on the periodic grid. In grid-index
//! units this is an antiderivative: `E = -fft_integrate(rho) * dx`, with the sign
//! convention the equations of motion expect.

use std::f64::consts::PI;
use std::sync::Arc;

use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};

use crate::error::{invalid, Result};

/// Angular frequency of every bin of a length-`n` DFT, in the transform's own layout.
///
/// Non-negative frequencies come first, then the negative ones:
/// - n even: `[0, 1, .., n/2, 1-n/2, .., -1] * 2pi/n` (Nyquist bin carried as `+n/2`)
/// - n odd:  `[0, 1, .., (n-1)/2, -(n-1)/2, .., -1] * 2pi/n`
pub fn angular_frequencies(n: usize) -> Vec<f64> {
    let n_i = n as i64;
    let highest = n_i / 2; // n/2 for even n, (n-1)/2 for odd n
    (0..n_i)
        .map(|m| if m <= highest { m } else { m - n_i })
        .map(|m| 2.0 * PI * (m as f64) / (n as f64))
        .collect()
}

/// Planned forward/inverse transforms for one grid size.
pub struct SpectralSolver {
    forward: Arc<dyn Fft<f64>>,
    inverse: Arc<dyn Fft<f64>>,
    k: Vec<f64>,
}

impl SpectralSolver {
    pub fn new(n: usize) -> Self {
        let mut planner = FftPlanner::<f64>::new();
        SpectralSolver {
            forward: planner.plan_fft_forward(n),
            inverse: planner.plan_fft_inverse(n),
            k: angular_frequencies(n),
        }
    }

    pub fn len(&self) -> usize {
        self.k.len()
    }

    pub fn is_empty(&self) -> bool {
        self.k.is_empty()
    }

    /// Zero-mean periodic antiderivative of `y` with unit index spacing.
    ///
    /// Returns `F` with `dF/di = y` and `sum F = 0`. The zero-frequency
    /// coefficient is forced to 0, so a nonzero mean of `y` is dropped silently:
    /// `integrate(y + c) == integrate(y)` for any constant `c`.
    pub fn integrate(&self, y: &[f64]) -> Result<Vec<f64>> {
        let n = self.len();
        if y.len() != n {
            return invalid(format!(
                "spectral solver planned for {} points was given {}",
                n,
                y.len()
            ));
        }

        let mut f: Vec<Complex<f64>> = y.iter().map(|&v| Complex::new(v, 0.0)).collect();
        self.forward.process(&mut f);

        f[0] = Complex::new(0.0, 0.0);
        for (coef, &km) in f.iter_mut().zip(self.k.iter()).skip(1) {
            *coef /= Complex::new(0.0, km);
        }

        self.inverse.process(&mut f);
        // rustfft leaves the inverse unnormalised
        let scale = 1.0 / (n as f64);
        Ok(f.iter().map(|c| c.re * scale).collect())
    }

    /// Electric field on the grid from the net charge density.
    pub fn electric_field(&self, rho: &[f64], dx: f64) -> Result<Vec<f64>> {
        Ok(self.integrate(rho)?.into_iter().map(|v| -v * dx).collect())
    }
}

/// One-shot [`SpectralSolver::integrate`] that plans the transforms itself.
pub fn fft_integrate(y: &[f64]) -> Result<Vec<f64>> {
    if y.is_empty() {
        return Ok(Vec::new());
    }
    SpectralSolver::new(y.len()).integrate(y)
}

/// One-shot [`SpectralSolver::electric_field`].
pub fn electric_field(rho: &[f64], dx: f64) -> Result<Vec<f64>> {
    Ok(fft_integrate(rho)?.into_iter().map(|v| -v * dx).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn bins(n: usize) -> Vec<i64> {
        angular_frequencies(n)
            .iter()
            .map(|k| (k * (n as f64) / (2.0 * PI)).round() as i64)
            .collect()
    }

    #[test]
    fn frequency_layout_even_length() {
        assert_eq!(bins(8), vec![0, 1, 2, 3, 4, -3, -2, -1]);
        assert_eq!(bins(2), vec![0, 1]);
    }

    #[test]
    fn frequency_layout_odd_length() {
        assert_eq!(bins(7), vec![0, 1, 2, 3, -3, -2, -1]);
        assert_eq!(bins(1), vec![0]);
        assert_eq!(bins(3), vec![0, 1, -1]);
    }

    #[test]
    fn derivative_of_output_reproduces_sine() {
        for &n in &[64usize, 65] {
            let y: Vec<f64> = (0..n)
                .map(|i| (2.0 * PI * (i as f64) / (n as f64)).sin())
                .collect();
            let f = fft_integrate(&y).unwrap();
            for i in 0..n {
                let central = 0.5 * (f[(i + 1) % n] - f[(i + n - 1) % n]);
                assert_relative_eq!(central, y[i], epsilon = 1e-2);
            }
            assert_relative_eq!(f.iter().sum::<f64>(), 0.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn cosine_integrates_to_scaled_sine() {
        // integral of cos(2pi i/n) over index i is n/(2pi) sin(2pi i/n)
        let n = 16;
        let w = 2.0 * PI / (n as f64);
        let y: Vec<f64> = (0..n).map(|i| (w * i as f64).cos()).collect();
        let f = fft_integrate(&y).unwrap();
        for i in 0..n {
            assert_relative_eq!(f[i], (w * i as f64).sin() / w, epsilon = 1e-10);
        }
    }

    #[test]
    fn mean_is_removed_not_rejected() {
        let n = 10;
        let y: Vec<f64> = (0..n).map(|i| (2.0 * PI * i as f64 / n as f64).sin()).collect();
        let shifted: Vec<f64> = y.iter().map(|v| v + 3.0).collect();
        let a = fft_integrate(&y).unwrap();
        let b = fft_integrate(&shifted).unwrap();
        for (u, v) in a.iter().zip(b.iter()) {
            assert_relative_eq!(*u, *v, epsilon = 1e-12);
        }
        let flat = fft_integrate(&[2.5; 6]).unwrap();
        assert!(flat.iter().all(|v| v.abs() < 1e-12));
    }

    #[test]
    fn field_scales_with_cell_size() {
        let rho = [0.5, -0.5, 0.25, -0.25];
        let f = fft_integrate(&rho).unwrap();
        let e = electric_field(&rho, 0.1).unwrap();
        for (fi, ei) in f.iter().zip(e.iter()) {
            assert_relative_eq!(*ei, -0.1 * fi, epsilon = 1e-15);
        }
    }

    #[test]
    fn length_mismatch_is_an_error() {
        let solver = SpectralSolver::new(4);
        assert!(matches!(
            solver.integrate(&[1.0, 2.0]),
            Err(crate::error::PicError::InvalidConfiguration(_))
        ));
        assert!(solver.electric_field(&[0.0; 5], 0.1).is_err());
        assert!(fft_integrate(&[]).unwrap().is_empty());
    }
}
