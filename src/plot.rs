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
// phase-space frames and the semilog first-harmonic history           //
//----------------------------------------------------------------------//

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use plotters::prelude::*;

use crate::analysis::OscillationEstimate;
use crate::density::deposit_density;
use crate::error::{PicError, Result};
use crate::grid::Grid;
use crate::output::{Output, Snapshot};

const FRAME_SIZE: (u32, u32) = (1200, 900);     // pixels
const UPPER_HEIGHT: u32 = 500;                  // phase-space panel height
const HISTORY_SIZE: (u32, u32) = (1000, 600);   // pixels

fn plot_err<E: std::fmt::Debug>(err: E) -> PicError {
    PicError::Plot(format!("{:?}", err))
}

/// Equal-width histogram over `[min, max]` of `values`; returns `(counts, bin centres)`.
pub fn histogram(values: &[f64], nbins: usize) -> (Vec<f64>, Vec<f64>) {
    if values.is_empty() || nbins == 0 {
        return (Vec::new(), Vec::new());
    }
    let lo = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let hi = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let (lo, hi) = if hi > lo { (lo, hi) } else { (lo - 0.5, lo + 0.5) };
    let width = (hi - lo) / (nbins as f64);

    let mut counts = vec![0.0; nbins];
    for &v in values {
        // last edge is closed
        let b = (((v - lo) / width) as usize).min(nbins - 1);
        counts[b] += 1.0;
    }
    let centres = (0..nbins).map(|i| lo + width * (i as f64 + 0.5)).collect();
    (counts, centres)
}

/// Renders one SVG frame per output instant into its own directory.
///
/// Owns the output location and frame counter; create it once and register it with
/// the driver.
#[derive(Debug)]
pub struct PhasePlot {
    dir: PathBuf,
    frame: usize,
}

impl PhasePlot {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(PhasePlot { dir, frame: 0 })
    }

    pub fn frames_written(&self) -> usize {
        self.frame
    }

    pub fn frame_path(&self, frame: usize) -> PathBuf {
        self.dir.join(format!("frame_{:04}.svg", frame))
    }

    fn render(&self, path: &Path, snapshot: &Snapshot<'_>, density: &[f64]) -> Result<()> {
        let root = SVGBackend::new(path, FRAME_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(plot_err)?;
        let (upper, lower) = root.split_vertically(UPPER_HEIGHT);
        let (left, right) = lower.split_horizontally(FRAME_SIZE.0 / 2);

        let length = snapshot.length;
        let (vlo, vhi) = velocity_range(snapshot.velocity);

        // phase space
        let mut phase = ChartBuilder::on(&upper)
            .margin(10)
            .build_cartesian_2d(0.0..length, vlo..vhi)
            .map_err(plot_err)?;
        phase
            .draw_series(
                snapshot
                    .position
                    .iter()
                    .zip(snapshot.velocity.iter())
                    .map(|(&x, &v)| Circle::new((x, v), 1, BLUE.filled())),
            )
            .map_err(plot_err)?;

        // density profile
        let dmax = density.iter().cloned().fold(0.0, f64::max).max(1.0) * 1.1;
        let dx = length / (density.len() as f64);
        let mut dens = ChartBuilder::on(&left)
            .margin(10)
            .build_cartesian_2d(0.0..length, 0.0..dmax)
            .map_err(plot_err)?;
        dens.draw_series(LineSeries::new(
            density.iter().enumerate().map(|(i, &d)| (i as f64 * dx, d)),
            &RED,
        ))
        .map_err(plot_err)?;

        // velocity histogram, sideways so it shares the phase-space velocity axis
        let nbins = ((snapshot.velocity.len() as f64).sqrt() as usize).max(1);
        let (counts, centres) = histogram(snapshot.velocity, nbins);
        let cmax = counts.iter().cloned().fold(0.0, f64::max).max(1.0) * 1.1;
        let half = if centres.len() > 1 { 0.5 * (centres[1] - centres[0]) } else { 0.5 };
        let mut hist = ChartBuilder::on(&right)
            .margin(10)
            .build_cartesian_2d(0.0..cmax, vlo..vhi)
            .map_err(plot_err)?;
        hist.draw_series(
            counts
                .iter()
                .zip(centres.iter())
                .map(|(&c, &v)| Rectangle::new([(0.0, v - half), (c, v + half)], GREEN.filled())),
        )
        .map_err(plot_err)?;

        root.present().map_err(plot_err)?;
        Ok(())
    }
}

fn velocity_range(velocity: &[f64]) -> (f64, f64) {
    let lo = velocity.iter().cloned().fold(f64::INFINITY, f64::min);
    let hi = velocity.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if hi > lo {
        let pad = 0.05 * (hi - lo);
        (lo - pad, hi + pad)
    } else if lo.is_finite() {
        (lo - 1.0, lo + 1.0)
    } else {
        (-1.0, 1.0)
    }
}

impl Output for PhasePlot {
    fn on_snapshot(&mut self, snapshot: &Snapshot<'_>) -> Result<()> {
        let grid = Grid::new(snapshot.length, snapshot.ncells)?;
        let density = deposit_density(snapshot.position, &grid)?;
        let path = self.frame_path(self.frame);
        self.render(&path, snapshot, &density)?;
        debug!("frame {} (t = {}) -> {}", self.frame, snapshot.time, path.display());
        self.frame += 1;
        Ok(())
    }
}

/// Semilog chart of a first-harmonic history, with the maxima of `estimate` marked.
///
/// Zero amplitudes are drawn at the smallest positive one so the log axis stays finite.
pub fn save_harmonic_plot(
    path: &Path,
    t: &[f64],
    amp: &[f64],
    estimate: Option<&OscillationEstimate>,
) -> Result<()> {
    if t.is_empty() || t.len() != amp.len() {
        return Err(PicError::InsufficientData(format!(
            "cannot plot {} times against {} amplitudes",
            t.len(),
            amp.len()
        )));
    }
    let floor = amp
        .iter()
        .cloned()
        .filter(|&a| a > 0.0)
        .fold(f64::INFINITY, f64::min);
    let floor = if floor.is_finite() { floor } else { 1e-6 };
    let top = amp.iter().cloned().fold(floor, f64::max) * 1.5;
    let (t0, t1) = (t[0], t[t.len() - 1]);
    let t1 = if t1 > t0 { t1 } else { t0 + 1.0 };

    let root = SVGBackend::new(path, HISTORY_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;
    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .build_cartesian_2d(t0..t1, (0.5 * floor..top).log_scale())
        .map_err(plot_err)?;
    chart
        .draw_series(LineSeries::new(
            t.iter().zip(amp.iter()).map(|(&ti, &a)| (ti, a.max(floor))),
            &BLUE,
        ))
        .map_err(plot_err)?;
    if let Some(est) = estimate {
        chart
            .draw_series(
                est.peak_times
                    .iter()
                    .zip(est.peak_amplitudes.iter())
                    .map(|(&ti, &a)| Circle::new((ti, a.max(floor)), 5, RED.filled())),
            )
            .map_err(plot_err)?;
    }
    root.present().map_err(plot_err)?;
    debug!("first-harmonic history -> {}", path.display());
    Ok(())
}
