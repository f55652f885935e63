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

//! Run configuration, read from TOML. Every key is optional; the defaults reproduce the
//! Landau damping run (L = 4 pi, 20 cells, 20000 particles, alpha = 0.2, t in [0, 40]).

use std::f64::consts::PI;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::driver::{linspace, DEFAULT_COURANT};
use crate::error::Result;
use crate::init::{LandauParams, DEFAULT_VBEAM};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RunConfig {
    pub domain: DomainConfig,
    pub particles: ParticleConfig,
    pub initial: InitialCondition,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainConfig {
    pub length: f64,
    /// `None` picks `floor(sqrt(N))`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ncells: Option<usize>,
}

impl Default for DomainConfig {
    fn default() -> Self {
        DomainConfig {
            length: 4.0 * PI,
            ncells: Some(20),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    pub count: usize,
    /// `None` seeds from OS entropy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        ParticleConfig {
            count: 20000,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InitialCondition {
    Landau(LandauParams),
    TwoStream {
        #[serde(default = "default_vbeam")]
        vbeam: f64,
    },
}

fn default_vbeam() -> f64 {
    DEFAULT_VBEAM
}

impl Default for InitialCondition {
    fn default() -> Self {
        InitialCondition::Landau(LandauParams::default())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub t_end: f64,
    pub n_outputs: usize,
    pub courant: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary_file: Option<PathBuf>,
    /// Semilog chart of the first harmonic, written after the run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub harmonic_plot: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info_file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plot_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkpoint: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            t_end: 40.0,
            n_outputs: 100,
            courant: DEFAULT_COURANT,
            summary_file: Some(PathBuf::from("firstharmonic.dat")),
            harmonic_plot: Some(PathBuf::from("firstharmonic.svg")),
            info_file: Some(PathBuf::from("info.txt")),
            plot_dir: None,
            checkpoint: Some(PathBuf::from(crate::checkpoint::DEFAULT_CHECKPOINT)),
        }
    }
}

impl RunConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// `n_outputs` times evenly spread from `t_start` to `t_end`.
    pub fn output_times(&self, t_start: f64) -> Vec<f64> {
        linspace(t_start, self.output.t_end, self.output.n_outputs)
    }
}
