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
// save / load particle data (binary checkpoint)                        //
//----------------------------------------------------------------------//

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{invalid, Result};

pub const DEFAULT_CHECKPOINT: &str = "picdata.bin";

/// Complete particle state at one instant; enough to continue a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub time: f64,
    pub length: f64,
    pub ncells: usize,
    pub position: Vec<f64>,
    pub velocity: Vec<f64>,
}

impl Checkpoint {
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut file = BufWriter::new(File::create(path)?);
        bincode::serialize_into(&mut file, self)?;
        file.flush()?;
        info!("saved {} particles at t = {} to {}", self.position.len(), self.time, path.display());
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return invalid(format!(
                "no particle data file found at {}, run without --resume first",
                path.display()
            ));
        }
        let file = BufReader::new(File::open(path)?);
        let cp: Checkpoint = bincode::deserialize_from(file)?;
        if cp.position.len() != cp.velocity.len() {
            return invalid(format!("corrupt checkpoint {}: particle arrays differ in length", path.display()));
        }
        info!("loaded {} particles at t = {} from {}", cp.position.len(), cp.time, path.display());
        Ok(cp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_then_load_restores_the_run() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CHECKPOINT);
        let cp = Checkpoint {
            time: 12.5,
            length: 4.0 * std::f64::consts::PI,
            ncells: 20,
            position: vec![0.1, 3.3, 9.9],
            velocity: vec![-1.2, 0.0, 2.5],
        };
        cp.save(&path).unwrap();
        assert_eq!(Checkpoint::load(&path).unwrap(), cp);
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Checkpoint::load(&dir.path().join("nothing.bin")).is_err());
    }

    #[test]
    fn garbage_is_not_a_checkpoint() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("junk.bin");
        std::fs::write(&path, b"abc").unwrap();
        assert!(Checkpoint::load(&path).is_err());
    }
}
