//! Per-frame cost of the two-body core
//!
//! The simulation runs once per rendered frame, so these track how much of
//! a frame budget the force, orbit, detector and visual mapping take.

use core::time::Duration;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

extern crate newtonlab;
use newtonlab::physics::math::{Scalar, gravitational_force};
use newtonlab::visuals::{ArrowGeometry, arrow_orientation};
use newtonlab::{NewtonLabConfig, SimulationInput, SimulationState};

const FRAME: Duration = Duration::from_millis(16);

fn benchmark_force_kernel(c: &mut Criterion) {
    let mut group = c.benchmark_group("force_kernel");

    for &distance in &[0.5, 1.0, 15.0, 1_000.0] {
        group.bench_with_input(
            BenchmarkId::new("gravitational_force", distance),
            &distance,
            |b, &d| {
                b.iter(|| gravitational_force(black_box(8.0), black_box(2.0), black_box(d)));
            },
        );
    }

    group.finish();
}

fn benchmark_simulation_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulation_tick");

    for &frames in &[1_usize, 60, 600, 3_600] {
        group.throughput(Throughput::Elements(frames as u64));

        group.bench_with_input(
            BenchmarkId::new("orbiting", frames),
            &frames,
            |b, &count| {
                let mut state = SimulationState::new(&NewtonLabConfig::default());
                b.iter(|| {
                    for _ in 0..count {
                        black_box(state.tick(FRAME));
                    }
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("mass_sweep", frames),
            &frames,
            |b, &count| {
                let mut state = SimulationState::new(&NewtonLabConfig::default());
                b.iter(|| {
                    for i in 0..count {
                        let mass = 1.0 + (i % 180) as Scalar * 0.05;
                        let _ = state.apply(SimulationInput::SetPrimaryMass(mass));
                        black_box(state.tick(FRAME));
                    }
                });
            },
        );
    }

    group.finish();
}

fn benchmark_visual_mapping(c: &mut Criterion) {
    let mut group = c.benchmark_group("visual_mapping");

    group.bench_function("arrow_geometry", |b| {
        b.iter(|| ArrowGeometry::from_force(black_box(7.11), black_box(2.0)));
    });

    group.bench_function("arrow_orientation", |b| {
        let state = SimulationState::new(&NewtonLabConfig::default());
        let primary = state.primary().position;
        let secondary = state.secondary().position;
        b.iter(|| {
            arrow_orientation(
                black_box(primary),
                black_box(secondary),
                black_box(3.5),
                black_box(0.2),
            )
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_force_kernel,
    benchmark_simulation_tick,
    benchmark_visual_mapping
);
criterion_main!(benches);
