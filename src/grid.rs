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

//! Uniform periodic grid covering `[0, L)`.

use serde::{Deserialize, Serialize};

use crate::error::{invalid, Result};

/// `ncells` cells of width `dx = length / ncells`; cell `i` is `[i*dx, (i+1)*dx)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    length: f64,
    ncells: usize,
}

impl Grid {
    pub fn new(length: f64, ncells: usize) -> Result<Self> {
        if !(length.is_finite() && length > 0.0) {
            return invalid(format!("domain length must be positive and finite, got {}", length));
        }
        if ncells == 0 {
            return invalid("number of cells must be at least 1");
        }
        Ok(Grid { length, ncells })
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn ncells(&self) -> usize {
        self.ncells
    }

    pub fn dx(&self) -> f64 {
        self.length / (self.ncells as f64)
    }

    /// Maps `x` back into `[0, L)`.
    pub fn wrap(&self, x: f64) -> f64 {
        wrap_periodic(x, self.length)
    }

    pub fn wrap_all(&self, position: &mut [f64]) {
        for x in position.iter_mut() {
            *x = wrap_periodic(*x, self.length);
        }
    }
}

/// `((x mod L) + L) mod L`, with the rounding case `-tiny + L == L` folded onto 0.
pub fn wrap_periodic(x: f64, length: f64) -> f64 {
    let w = x.rem_euclid(length);
    if w >= length {
        0.0
    } else {
        w
    }
}
