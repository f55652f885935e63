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

//! Classical fourth-order Runge-Kutta step over an opaque state vector.

use crate::error::Result;

/// Time derivative of a flat state vector.
///
/// Implementors must be pure: the same state gives the same derivative and nothing is
/// remembered between calls. Any extra parameters live in `self` (or in the closure).
pub trait Derivative {
    fn derivative(&self, state: &[f64]) -> Result<Vec<f64>>;
}

impl<F> Derivative for F
where
    F: Fn(&[f64]) -> Result<Vec<f64>>,
{
    fn derivative(&self, state: &[f64]) -> Result<Vec<f64>> {
        self(state)
    }
}

/// `y + h * k`
fn offset(y: &[f64], k: &[f64], h: f64) -> Vec<f64> {
    y.iter().zip(k.iter()).map(|(yi, ki)| yi + h * ki).collect()
}

/// Advances `y0` by one step of size `dt`.
///
/// Stages:
/// - k1 = f(y0)
/// - k2 = f(y0 + dt/2 * k1)
/// - k3 = f(y0 + dt/2 * k2)
/// - k4 = f(y0 + dt * k3)
/// - y1 = y0 + dt/6 * (k1 + 2*k2 + 2*k3 + k4)
///
/// There is no error control; the caller owns the choice of `dt`.
pub fn rk4_step<D>(rhs: &D, y0: &[f64], dt: f64) -> Result<Vec<f64>>
where
    D: Derivative + ?Sized,
{
    let k1 = rhs.derivative(y0)?;
    let k2 = rhs.derivative(&offset(y0, &k1, 0.5 * dt))?;
    let k3 = rhs.derivative(&offset(y0, &k2, 0.5 * dt))?;
    let k4 = rhs.derivative(&offset(y0, &k3, dt))?;

    let w = dt / 6.0;
    Ok((0..y0.len())
        .map(|i| y0[i] + w * (k1[i] + 2.0 * k2[i] + 2.0 * k3[i] + k4[i]))
        .collect())
}
