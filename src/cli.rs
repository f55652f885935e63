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

//! Command line interface for pic1d

use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

use crate::config::{InitialCondition, RunConfig};
use crate::error::Result;

/// pic1d - 1d1v electrostatic PIC simulation of a periodic plasma
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file (TOML format)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Number of particles (overrides config file)
    #[arg(short = 'n', long, value_name = "COUNT")]
    pub particles: Option<usize>,

    /// Number of grid cells (overrides config file)
    #[arg(long, value_name = "COUNT")]
    pub cells: Option<usize>,

    /// Random seed for the initial load
    #[arg(short = 's', long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Two-stream load instead of Landau damping, optionally with the beam velocity
    /// (default 2)
    #[arg(long, value_name = "VBEAM", num_args = 0..=1, default_missing_value = "2.0")]
    pub two_stream: Option<f64>,

    /// Last output time
    #[arg(short = 't', long, value_name = "TIME")]
    pub t_end: Option<f64>,

    /// Number of output times
    #[arg(long, value_name = "COUNT")]
    pub outputs: Option<usize>,

    /// Write one phase-space frame per output time into this directory
    #[arg(long, value_name = "DIR")]
    pub plot: Option<PathBuf>,

    /// Continue from a saved particle data file
    #[arg(long, value_name = "FILE")]
    pub resume: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

impl Args {
    /// Config file (or defaults) with the command line applied on top.
    pub fn load_config(&self) -> Result<RunConfig> {
        let mut cfg = match &self.config {
            Some(path) => RunConfig::load(path)?,
            None => RunConfig::default(),
        };
        self.apply(&mut cfg);
        Ok(cfg)
    }

    pub fn apply(&self, cfg: &mut RunConfig) {
        if let Some(n) = self.particles {
            cfg.particles.count = n;
        }
        if let Some(nc) = self.cells {
            cfg.domain.ncells = Some(nc);
        }
        if let Some(seed) = self.seed {
            cfg.particles.seed = Some(seed);
        }
        if let Some(vbeam) = self.two_stream {
            cfg.initial = InitialCondition::TwoStream { vbeam };
        }
        if let Some(t) = self.t_end {
            cfg.output.t_end = t;
        }
        if let Some(k) = self.outputs {
            cfg.output.n_outputs = k;
        }
        if let Some(dir) = &self.plot {
            cfg.output.plot_dir = Some(dir.clone());
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }
}
