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
// simulation report including stability and accuracy conditions       //
//----------------------------------------------------------------------//

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::warn;

use crate::analysis::OscillationEstimate;
use crate::driver::RunStats;
use crate::grid::Grid;

const RULE: &str = "--------------------------------------------------------------------------------";

/// Root-mean-square spread of `v` about its mean; the Debye length in plasma units.
pub fn thermal_velocity(v: &[f64]) -> f64 {
    if v.is_empty() {
        return 0.0;
    }
    let n = v.len() as f64;
    let mean = v.iter().sum::<f64>() / n;
    (v.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>() / n).sqrt()
}

/// Everything `info.txt` reports about one run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub grid: Grid,
    pub particles: usize,
    pub courant: f64,
    pub t_start: f64,
    pub t_end: f64,
    pub stats: RunStats,
    pub thermal_velocity: f64,
    pub newton_residual: Option<f64>,
    pub oscillation: Option<OscillationEstimate>,
    pub elapsed_secs: f64,
}

impl RunReport {
    pub fn particles_per_cell(&self) -> f64 {
        self.particles as f64 / self.grid.ncells() as f64
    }

    /// Cell size over Debye length; infinite for a cold plasma.
    pub fn dx_per_debye(&self) -> f64 {
        if self.thermal_velocity > 0.0 {
            self.grid.dx() / self.thermal_velocity
        } else {
            f64::INFINITY
        }
    }

    pub fn conditions_ok(&self) -> bool {
        self.dx_per_debye() <= 1.0 && self.courant <= 1.0 && self.particles_per_cell() >= 100.0
    }

    pub fn write_to<W: Write>(&self, mut w: W) -> std::io::Result<()> {
        writeln!(w, "########################## pic1d simulation report #############################")?;
        writeln!(w, "Simulation parameters:")?;
        writeln!(w, "System length                         = {:1.6e}", self.grid.length())?;
        writeln!(w, "# of grid cells                       = {:10}", self.grid.ncells())?;
        writeln!(w, "Cell size                             = {:1.6e}", self.grid.dx())?;
        writeln!(w, "# of particles                        = {:10}", self.particles)?;
        writeln!(w, "Courant number                        = {:10.4}", self.courant)?;
        writeln!(w, "Simulated time                        = {:1.6e} .. {:1.6e}", self.t_start, self.t_end)?;
        if let Some(r) = self.newton_residual {
            writeln!(w, "Quiet start Newton residual           = {:1.6e}", r)?;
        }
        writeln!(w, "{}", RULE)?;
        writeln!(w, "Run statistics:")?;
        writeln!(w, "# of RK4 substeps                     = {:10}", self.stats.substeps)?;
        writeln!(w, "# of field solves                     = {:10}", self.stats.rhs_evaluations)?;
        writeln!(w, "# of outputs                          = {:10}", self.stats.outputs)?;
        writeln!(w, "Wall time                             = {:10.3} [s]", self.elapsed_secs)?;
        writeln!(w, "{}", RULE)?;
        writeln!(w, "Stability and accuracy conditions:")?;
        writeln!(w, "DX / Debye length                     = {:10.4} (OK if less than 1.00)", self.dx_per_debye())?;
        writeln!(w, "Courant number                        = {:10.4} (OK if less than 1.00)", self.courant)?;
        writeln!(w, "Particles per cell                    = {:10.1} (OK if at least 100)", self.particles_per_cell())?;
        if !self.conditions_ok() {
            writeln!(w, "{}", RULE)?;
            writeln!(w, "** STABILITY AND ACCURACY CONDITION(S) VIOLATED - REFINE SIMULATION SETTINGS! **")?;
        }
        writeln!(w, "{}", RULE)?;
        match &self.oscillation {
            Some(osc) => {
                writeln!(w, "Oscillation of the first harmonic:")?;
                writeln!(w, "# of peaks                            = {:10}", osc.peak_times.len())?;
                writeln!(w, "Period                                = {:1.6e} +/- {:1.6e}", osc.period, osc.period_error)?;
                writeln!(w, "Frequency                             = {:1.6e}", osc.frequency)?;
                match osc.damping_rate {
                    Some(g) => writeln!(w, "Damping rate                          = {:1.6e}", g)?,
                    None => writeln!(w, "Damping rate                          =        n/a")?,
                }
                match osc.noise_time {
                    Some(t) => writeln!(w, "Noise floor reached at t              = {:1.6e}", t)?,
                    None => writeln!(w, "Noise floor reached at t              =  not reached")?,
                }
            }
            None => writeln!(w, "Oscillation of the first harmonic: not enough peaks to analyse")?,
        }
        writeln!(w, "{}\n", RULE)?;
        Ok(())
    }

    pub fn save(&self, path: &Path) -> crate::error::Result<()> {
        let mut file = BufWriter::new(File::create(path)?);
        self.write_to(&mut file)?;
        file.flush()?;
        if !self.conditions_ok() {
            warn!("STABILITY AND ACCURACY CONDITION(S) VIOLATED!");
            warn!("for details see '{}' and refine simulation settings!", path.display());
        }
        Ok(())
    }
}
