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

//! Error type shared by every stage of a run.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PicError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("all particle velocities are zero at t = {time}, the Courant step is undefined")]
    DegenerateVelocityField { time: f64 },

    #[error("non-finite particle state after substep {substep} (t = {time})")]
    NumericalDivergence { time: f64, substep: u64 },

    #[error("Courant step {dt} no longer advances t = {time}")]
    StalledStep { time: f64, dt: f64 },

    #[error("not enough data to analyse: {0}")]
    InsufficientData(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("checkpoint error: {0}")]
    Checkpoint(#[from] bincode::Error),

    #[error("config parse error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("plot error: {0}")]
    Plot(String),
}

pub type Result<T> = std::result::Result<T, PicError>;

pub(crate) fn invalid<T>(msg: impl Into<String>) -> Result<T> {
    Err(PicError::InvalidConfiguration(msg.into()))
}
