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

use std::time::Instant;

use anyhow::{bail, Context};
use clap::Parser;
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use pic1d::analysis::estimate_oscillation;
use pic1d::checkpoint::Checkpoint;
use pic1d::cli::Args;
use pic1d::config::{InitialCondition, RunConfig};
use pic1d::diagnostics::Summary;
use pic1d::init::{landau, two_stream, ParticleLoad};
use pic1d::logging::Logger;
use pic1d::plot::{save_harmonic_plot, PhasePlot};
use pic1d::report::{thermal_velocity, RunReport};
use pic1d::{Grid, Output, Simulation};

fn initial_load(cfg: &RunConfig) -> anyhow::Result<ParticleLoad> {
    let mut rng = match cfg.particles.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let (n, l) = (cfg.particles.count, cfg.domain.length);
    let load = match cfg.initial {
        InitialCondition::Landau(params) => {
            info!("Landau damping load, alpha = {}", params.alpha);
            landau(n, l, params, &mut rng)?
        }
        InitialCondition::TwoStream { vbeam } => {
            info!("two-stream load, vbeam = {}", vbeam);
            two_stream(n, l, vbeam, &mut rng)?
        }
    };
    Ok(load)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    Logger::init(args.log_level())?;

    info!("starting...");
    info!("**************************************************************************");
    info!("This program comes with ABSOLUTELY NO WARRANTY");
    info!("This is free software, you are welcome to use, modify and redistribute it");
    info!("according to the GNU General Public License, https://www.gnu.org/licenses/");
    info!("**************************************************************************");

    let mut cfg = args.load_config().context("cannot read the run configuration")?;
    let start = Instant::now();

    // a resumed run continues on the saved grid from the saved time
    let (load, t_start) = match &args.resume {
        Some(path) => {
            let cp = Checkpoint::load(path)?;
            if cp.length != cfg.domain.length {
                warn!("using the saved domain length {} instead of {}", cp.length, cfg.domain.length);
            }
            cfg.domain.length = cp.length;
            cfg.domain.ncells = Some(cp.ncells);
            let load = ParticleLoad {
                position: cp.position,
                velocity: cp.velocity,
                newton_residual: None,
            };
            (load, cp.time)
        }
        None => (initial_load(&cfg)?, 0.0),
    };
    if let Some(r) = load.newton_residual {
        info!("quiet start Newton residual = {:1.6e}", r);
    }

    let mut times = cfg.output_times(t_start);
    if args.resume.is_some() {
        times.retain(|&t| t > t_start);
        if times.is_empty() {
            bail!("nothing to do: t_end = {} is not after the saved time {}", cfg.output.t_end, t_start);
        }
    }

    let mut sim = Simulation::new(cfg.domain.length)
        .with_courant(cfg.output.courant)
        .with_output_times(times)
        .starting_at(t_start);
    if let Some(nc) = cfg.domain.ncells {
        sim = sim.with_cells(nc);
    }

    let mut summary = Summary::new();
    let mut frames = match &cfg.output.plot_dir {
        Some(dir) => Some(PhasePlot::new(dir)?),
        None => None,
    };
    let particles = load.position.len();
    let result = {
        let mut outputs: Vec<&mut dyn Output> = vec![&mut summary];
        if let Some(p) = frames.as_mut() {
            outputs.push(p);
        }
        info!("Running the simulation...");
        sim.run(load.position, load.velocity, &mut outputs)?
    };

    if let Some(path) = &cfg.output.summary_file {
        info!("saving {}", path.display());
        summary.save(path)?;
    }
    if let Some(p) = &frames {
        info!("{} frames written", p.frames_written());
    }
    let cp = Checkpoint {
        time: result.time,
        length: cfg.domain.length,
        ncells: result.ncells,
        position: result.position,
        velocity: result.velocity,
    };
    if let Some(path) = &cfg.output.checkpoint {
        cp.save(path)?;
    }

    let oscillation = match estimate_oscillation(summary.times(), summary.first_harmonic()) {
        Ok(osc) => {
            info!("Frequency = {:1.6e}  Period = {:1.6e} +/- {:1.6e}", osc.frequency, osc.period, osc.period_error);
            if let Some(t) = osc.noise_time {
                info!("Noise floor reached at t = {:10.4}", t);
            }
            Some(osc)
        }
        Err(e) => {
            warn!("{}", e);
            None
        }
    };

    if let (Some(path), false) = (&cfg.output.harmonic_plot, summary.is_empty()) {
        info!("saving {}", path.display());
        save_harmonic_plot(path, summary.times(), summary.first_harmonic(), oscillation.as_ref())?;
    }

    let elapsed = 0.001 * start.elapsed().as_millis() as f64;
    if let Some(path) = &cfg.output.info_file {
        let report = RunReport {
            grid: Grid::new(cfg.domain.length, result.ncells)?,
            particles,
            courant: cfg.output.courant,
            t_start,
            t_end: result.time,
            stats: result.stats,
            thermal_velocity: thermal_velocity(&cp.velocity),
            newton_residual: load.newton_residual,
            oscillation,
            elapsed_secs: elapsed,
        };
        info!("saving {}", path.display());
        report.save(path)?;
    }

    info!("Simulation up to t = {} is completed lasting {:.3} sec.", result.time, elapsed);
    Ok(())
}
