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

//! Interface between the driver and whatever consumes its output instants.

use crate::error::Result;

/// Read-only view of the particles at one requested output time.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    /// Positions, all inside `[0, L)`.
    pub position: &'a [f64],
    pub velocity: &'a [f64],
    pub ncells: usize,
    pub length: f64,
    /// Exactly one of the requested output times.
    pub time: f64,
}

impl<'a> Snapshot<'a> {
    pub fn particle_count(&self) -> usize {
        self.position.len()
    }
}

/// Something called at every output instant, in registration order.
///
/// Calls are synchronous: the driver waits for `on_snapshot` to return before the next
/// substep. An error ends the run.
pub trait Output {
    fn on_snapshot(&mut self, snapshot: &Snapshot<'_>) -> Result<()>;
}
