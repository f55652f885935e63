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
// compute density from particle positions (cloud-in-cell weighting)    //
//----------------------------------------------------------------------//

use crate::error::{invalid, Result};
use crate::grid::Grid;

/// Number density on the grid, normalised so that a uniform load gives 1 in every cell.
///
/// Each particle at continuous cell coordinate `p = x / dx` puts `1 - (p - floor p)` on
/// cell `floor p` and the remainder on the next cell, both taken modulo `ncells`.
/// Positions are expected in `[0, L)`; the sum over cells is then `ncells`.
pub fn deposit_density(position: &[f64], grid: &Grid) -> Result<Vec<f64>> {
    if position.is_empty() {
        return invalid("cannot deposit the density of an empty particle set");
    }

    let ncells = grid.ncells();
    let inv_dx = 1.0 / grid.dx();
    let mut density = vec![0.0; ncells];

    for &x in position {
        let p = x * inv_dx;
        let lower = p.floor();
        let rem = p - lower;
        let q = (lower as i64).rem_euclid(ncells as i64) as usize;
        density[q] += 1.0 - rem;
        density[(q + 1) % ncells] += rem;
    }

    let norm = (ncells as f64) / (position.len() as f64);
    density.iter_mut().for_each(|d| *d *= norm);
    Ok(density)
}

/// Net charge density `density - 1`; the uniform neutralising background is subtracted.
pub fn charge_density(position: &[f64], grid: &Grid) -> Result<Vec<f64>> {
    let mut rho = deposit_density(position, grid)?;
    rho.iter_mut().for_each(|r| *r -= 1.0);
    Ok(rho)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn empty_set_is_rejected() {
        let grid = Grid::new(1.0, 4).unwrap();
        assert!(deposit_density(&[], &grid).is_err());
    }

    #[test]
    fn particle_on_cell_boundary_stays_in_its_cell() {
        // dx = 0.5, particle exactly on the left edge of cell 3
        let grid = Grid::new(4.0, 8).unwrap();
        let d = deposit_density(&[1.5], &grid).unwrap();
        assert_eq!(d[3], 8.0);
        assert_eq!(d[4], 0.0);
        assert_eq!(d.iter().sum::<f64>(), 8.0);
    }

    #[test]
    fn midpoint_particle_splits_evenly() {
        let grid = Grid::new(4.0, 8).unwrap();
        let d = deposit_density(&[1.75], &grid).unwrap();
        assert_eq!(d[3], 4.0);
        assert_eq!(d[4], 4.0);
    }

    #[test]
    fn last_cell_wraps_onto_first() {
        let grid = Grid::new(4.0, 8).unwrap();
        let d = deposit_density(&[3.75], &grid).unwrap();
        assert_eq!(d[7], 4.0);
        assert_eq!(d[0], 4.0);
    }

    #[test]
    fn uniform_load_gives_unit_density() {
        let grid = Grid::new(10.0, 10).unwrap();
        let n = 1000;
        let pos: Vec<f64> = (0..n).map(|i| 10.0 * (i as f64) / (n as f64)).collect();
        let d = deposit_density(&pos, &grid).unwrap();
        for v in &d {
            assert_relative_eq!(*v, 1.0, epsilon = 1e-12);
        }
        assert_relative_eq!(d.iter().sum::<f64>(), 10.0, epsilon = 1e-10);
    }

    #[test]
    fn charge_density_has_zero_mean() {
        let grid = Grid::new(3.0, 7).unwrap();
        let pos = [0.1, 0.2, 1.9, 2.95, 2.2];
        let rho = charge_density(&pos, &grid).unwrap();
        assert_relative_eq!(rho.iter().sum::<f64>(), 0.0, epsilon = 1e-12);
    }
}
