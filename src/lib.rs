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

//! One-dimensional electrostatic particle-in-cell simulation of a periodic plasma.
//!
//! Electrons move in a neutralizing ion background on `[0, L)`. Each RK4 stage deposits
//! the particles on a grid with the cloud-in-cell shape, integrates the charge density
//! spectrally to get the field, and interpolates it back. The driver picks Courant
//! limited substeps that land exactly on the requested output times.

pub mod analysis;
pub mod checkpoint;
pub mod cli;
pub mod config;
pub mod density;
pub mod diagnostics;
pub mod driver;
pub mod error;
pub mod field;
pub mod grid;
pub mod init;
pub mod interp;
pub mod logging;
pub mod output;
pub mod pic;
pub mod plot;
pub mod report;
pub mod rk4;

pub use crate::driver::{run, RunResult, RunStats, Simulation};
pub use crate::error::{PicError, Result};
pub use crate::grid::Grid;
pub use crate::output::{Output, Snapshot};
pub use crate::pic::ElectrostaticPic;
pub use crate::rk4::{rk4_step, Derivative};
