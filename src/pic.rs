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
// equations of motion: deposit -> field solve -> interpolate           //
//----------------------------------------------------------------------//

use crate::density::charge_density;
use crate::error::{invalid, Result};
use crate::field::SpectralSolver;
use crate::grid::Grid;
use crate::interp::periodic_interp;
use crate::rk4::Derivative;

/// Right-hand side of the electrostatic Vlasov system sampled by particles.
///
/// The state is `[x_0 .. x_{N-1}, v_0 .. v_{N-1}]`; its derivative is
/// `[v_0 .. v_{N-1}, a_0 .. a_{N-1}]` with `a = -E(x)`. Density, charge and field
/// are rebuilt on every call and nothing survives between calls.
pub struct ElectrostaticPic {
    grid: Grid,
    solver: SpectralSolver,
}

impl ElectrostaticPic {
    pub fn new(grid: Grid) -> Self {
        ElectrostaticPic {
            grid,
            solver: SpectralSolver::new(grid.ncells()),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Electric field on the grid for particles at `position` (must be inside `[0, L)`).
    pub fn field(&self, position: &[f64]) -> Result<Vec<f64>> {
        let rho = charge_density(position, &self.grid)?;
        self.solver.electric_field(&rho, self.grid.dx())
    }

    /// Acceleration of every particle, `a_i = -E(x_i)`.
    pub fn accelerations(&self, position: &[f64]) -> Result<Vec<f64>> {
        let pos: Vec<f64> = position.iter().map(|&x| self.grid.wrap(x)).collect();
        let efield = self.field(&pos)?;
        let inv_dx = 1.0 / self.grid.dx();
        pos.iter()
            .map(|&x| periodic_interp(&efield, x * inv_dx).map(|e| -e))
            .collect()
    }
}

impl Derivative for ElectrostaticPic {
    fn derivative(&self, state: &[f64]) -> Result<Vec<f64>> {
        if state.len() % 2 != 0 {
            return invalid(format!("state vector of odd length {}", state.len()));
        }
        let (pos, vel) = state.split_at(state.len() / 2);

        let mut dfdt = Vec::with_capacity(state.len());
        dfdt.extend_from_slice(vel);
        dfdt.extend(self.accelerations(pos)?);
        Ok(dfdt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn uniform_plasma_feels_no_force() {
        let grid = Grid::new(2.0 * PI, 16).unwrap();
        let pic = ElectrostaticPic::new(grid);
        let n = 160;
        let pos: Vec<f64> = (0..n).map(|i| 2.0 * PI * (i as f64) / (n as f64)).collect();
        for a in pic.accelerations(&pos).unwrap() {
            assert!(a.abs() < 1e-10);
        }
    }

    #[test]
    fn derivative_layout_is_velocity_then_acceleration() {
        let grid = Grid::new(1.0, 4).unwrap();
        let pic = ElectrostaticPic::new(grid);
        let state = [0.1, 0.4, 0.7, 3.0, -1.0, 0.5];
        let d = pic.derivative(&state).unwrap();
        assert_eq!(d.len(), 6);
        assert_eq!(&d[..3], &[3.0, -1.0, 0.5]);
        assert_eq!(d[3..].to_vec(), pic.accelerations(&state[..3]).unwrap());
    }

    #[test]
    fn does_not_touch_its_input_and_repeats_exactly() {
        let grid = Grid::new(1.0, 5).unwrap();
        let pic = ElectrostaticPic::new(grid);
        let state = vec![0.05, 0.33, 0.91, 1.2, -0.2, 0.4, 0.0, 2.0];
        let before = state.clone();
        let a = pic.derivative(&state).unwrap();
        let b = pic.derivative(&state).unwrap();
        assert_eq!(state, before);
        assert_eq!(a, b);
    }

    #[test]
    fn out_of_domain_positions_are_wrapped() {
        let grid = Grid::new(1.0, 5).unwrap();
        let pic = ElectrostaticPic::new(grid);
        let a = pic.accelerations(&[0.2, 0.45, 0.8]).unwrap();
        let b = pic.accelerations(&[1.2, -0.55, 2.8]).unwrap();
        for (x, y) in a.iter().zip(b.iter()) {
            assert_relative_eq!(*x, *y, epsilon = 1e-12);
        }
    }

    #[test]
    fn density_bump_pushes_particles_apart() {
        // like charges repel: an overdense slab pushes particles on either side outward
        let grid = Grid::new(1.0, 32).unwrap();
        let pic = ElectrostaticPic::new(grid);
        let mut pos: Vec<f64> = (0..320).map(|i| (i as f64 + 0.5) / 320.0).collect();
        pos.extend((0..80).map(|i| 0.45 + 0.1 * (i as f64) / 80.0));
        let probe_left = 0.3;
        let probe_right = 0.7;
        pos.push(probe_left);
        pos.push(probe_right);
        let acc = pic.accelerations(&pos).unwrap();
        let n = acc.len();
        assert!(acc[n - 2] < 0.0, "left probe a = {}", acc[n - 2]);
        assert!(acc[n - 1] > 0.0, "right probe a = {}", acc[n - 1]);
    }

    #[test]
    fn odd_state_length_is_rejected() {
        let pic = ElectrostaticPic::new(Grid::new(1.0, 4).unwrap());
        assert!(pic.derivative(&[0.1, 0.2, 0.3]).is_err());
    }
}
