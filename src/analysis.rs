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

//! Post-run analysis of a first-harmonic history: oscillation period, frequency,
//! noise onset and damping rate.
//!
//! `|rho_1|` peaks twice per wave period, so the spacing between consecutive maxima
//! is half a period.

use crate::error::{PicError, Result};

/// Indices `i` where the discrete slope `amp[i+1] - amp[i]` changes sign.
///
/// The slope before the first sample counts as positive, so a series that starts by
/// falling reports index 1 as a turning point.
pub fn turning_points(amp: &[f64]) -> Vec<usize> {
    let mut turns = Vec::new();
    let mut previous = 1.0;
    for i in 1..amp.len().saturating_sub(1) {
        let gradient = amp[i + 1] - amp[i];
        if gradient * previous < 0.0 {
            turns.push(i);
        }
        previous = gradient;
    }
    turns
}

#[derive(Debug, Clone, PartialEq)]
pub struct OscillationEstimate {
    /// Times and amplitudes of every other turning point (the maxima).
    pub peak_times: Vec<f64>,
    pub peak_amplitudes: Vec<f64>,
    /// Peak spacings up to and including the first growing peak.
    pub spacings: Vec<f64>,
    /// Twice the mean spacing.
    pub period: f64,
    pub period_min: f64,
    pub period_max: f64,
    /// `(max - min) / 2` of the spacings.
    pub period_error: f64,
    /// `2 pi / period`.
    pub frequency: f64,
    /// Time of the first peak larger than its predecessor, where the decay has
    /// reached the noise floor.
    pub noise_time: Option<f64>,
    /// Slope of `ln(peak amplitude)` against time over the decaying peaks; negative
    /// for damping. `None` with fewer than two decaying peaks.
    pub damping_rate: Option<f64>,
}

fn too_short(what: &str) -> PicError {
    PicError::InsufficientData(what.to_string())
}

/// Period and frequency of the oscillation in a `(t, amplitude)` history.
pub fn estimate_oscillation(t: &[f64], amp: &[f64]) -> Result<OscillationEstimate> {
    if t.len() != amp.len() {
        return Err(PicError::InsufficientData(format!(
            "{} times but {} amplitudes",
            t.len(),
            amp.len()
        )));
    }

    let turns = turning_points(amp);
    if turns.len() < 2 {
        return Err(too_short("fewer than two turning points"));
    }

    // keep alternate turning points, starting with whichever of the first two is larger
    let skip = if amp[turns[0]] > amp[turns[1]] { 0 } else { 1 };
    let peaks: Vec<usize> = turns.iter().cloned().skip(skip).step_by(2).collect();
    if peaks.len() < 2 {
        return Err(too_short("fewer than two peaks"));
    }
    let peak_times: Vec<f64> = peaks.iter().map(|&i| t[i]).collect();
    let peak_amplitudes: Vec<f64> = peaks.iter().map(|&i| amp[i]).collect();

    let mut spacings = Vec::new();
    let mut noise_time = None;
    let mut decaying = 1;
    for i in 1..peaks.len() {
        spacings.push(peak_times[i] - peak_times[i - 1]);
        if peak_amplitudes[i] > peak_amplitudes[i - 1] {
            noise_time = Some(peak_times[i]);
            break;
        }
        decaying = i + 1;
    }

    let period_max = spacings.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let period_min = spacings.iter().cloned().fold(f64::INFINITY, f64::min);
    let period = 2.0 * spacings.iter().sum::<f64>() / (spacings.len() as f64);

    Ok(OscillationEstimate {
        damping_rate: log_slope(&peak_times[..decaying], &peak_amplitudes[..decaying]),
        peak_times,
        peak_amplitudes,
        spacings,
        period,
        period_min,
        period_max,
        period_error: 0.5 * (period_max - period_min),
        frequency: 2.0 * std::f64::consts::PI / period,
        noise_time,
    })
}

/// Least-squares slope of `ln(y)` against `x`.
fn log_slope(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() < 2 || y.iter().any(|&v| v <= 0.0) {
        return None;
    }
    let n = x.len() as f64;
    let ly: Vec<f64> = y.iter().map(|v| v.ln()).collect();
    let mx = x.iter().sum::<f64>() / n;
    let my = ly.iter().sum::<f64>() / n;
    let sxy: f64 = x.iter().zip(ly.iter()).map(|(a, b)| (a - mx) * (b - my)).sum();
    let sxx: f64 = x.iter().map(|a| (a - mx) * (a - mx)).sum();
    if sxx == 0.0 {
        None
    } else {
        Some(sxy / sxx)
    }
}
