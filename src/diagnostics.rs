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
// first-harmonic diagnostics                                           //
//----------------------------------------------------------------------//

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::info;
use rustfft::num_complex::Complex;

use crate::density::deposit_density;
use crate::error::Result;
use crate::grid::Grid;
use crate::output::{Output, Snapshot};

/// Amplitude of the lowest nonzero spatial mode: `2 |DFT(d)[1]| / n`.
///
/// A density `1 + a cos(2 pi i / n + phi)` gives `a`. Grids of one cell have no such
/// mode and give 0.
pub fn first_harmonic(density: &[f64]) -> f64 {
    let n = density.len();
    if n < 2 {
        return 0.0;
    }
    let w = -2.0 * std::f64::consts::PI / (n as f64);
    let mode: Complex<f64> = density
        .iter()
        .enumerate()
        .map(|(j, &d)| Complex::from_polar(d, w * (j as f64)))
        .sum();
    2.0 * mode.norm() / (n as f64)
}

/// Records `(time, first-harmonic amplitude)` at every output instant.
#[derive(Debug, Clone, Default)]
pub struct Summary {
    t: Vec<f64>,
    firstharmonic: Vec<f64>,
}

impl Summary {
    pub fn new() -> Self {
        Summary::default()
    }

    /// Output times seen so far, in call order.
    pub fn times(&self) -> &[f64] {
        &self.t
    }

    pub fn first_harmonic(&self) -> &[f64] {
        &self.firstharmonic
    }

    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    /// Two columns, time and amplitude.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut file = BufWriter::new(File::create(path)?);
        for (t, fh) in self.t.iter().zip(self.firstharmonic.iter()) {
            writeln!(file, "{:1.6e} \t{:1.6e}", t, fh)?;
        }
        file.flush()?;
        Ok(())
    }
}

impl Output for Summary {
    fn on_snapshot(&mut self, snapshot: &Snapshot<'_>) -> Result<()> {
        let grid = Grid::new(snapshot.length, snapshot.ncells)?;
        let d = deposit_density(snapshot.position, &grid)?;
        let fh = first_harmonic(&d);

        info!("Time: {:10.4}  First: {:1.6e}", snapshot.time, fh);

        self.t.push(snapshot.time);
        self.firstharmonic.push(fh);
        Ok(())
    }
}
