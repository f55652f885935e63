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

//! Cost of one field solve and one RK4 substep for the default Landau load.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::hint::black_box;

use pic1d::init::{landau, LandauParams};
use pic1d::{rk4_step, Derivative, ElectrostaticPic, Grid};

fn landau_state(npart: usize) -> (ElectrostaticPic, Vec<f64>) {
    let length = 4.0 * std::f64::consts::PI;
    let load = landau(npart, length, LandauParams::default(), &mut StdRng::seed_from_u64(42))
        .expect("valid Landau parameters");
    let mut state = load.position;
    state.extend(load.velocity);
    let grid = Grid::new(length, 20).expect("valid grid");
    (ElectrostaticPic::new(grid), state)
}

fn benchmark_rhs(c: &mut Criterion) {
    let mut group = c.benchmark_group("rhs");
    for &npart in &[2_000usize, 20_000, 200_000] {
        let (pic, state) = landau_state(npart);
        group.throughput(Throughput::Elements(npart as u64));
        group.bench_with_input(BenchmarkId::new("derivative", npart), &state, |b, s| {
            b.iter(|| pic.derivative(black_box(s)))
        });
        group.bench_with_input(BenchmarkId::new("rk4_step", npart), &state, |b, s| {
            b.iter(|| rk4_step(&pic, black_box(s), black_box(0.05)))
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_rhs);
criterion_main!(benches);
