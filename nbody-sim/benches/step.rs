// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Benchmarks for the pairwise step
//!
//! These benchmarks measure:
//! - Step throughput (pairs per second) for different body counts
//! - Sequential against Rayon-parallel execution of the same system
//! - Pair index rebuild cost when bodies are appended

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use nbody_sim::{ExecutionMode, PairIndex, SimulationConfig, Simulator};
use rand::SeedableRng;
use rand_chacha::ChaChaRng;

fn setup_cluster(body_count: usize, execution: ExecutionMode) -> Simulator<f64> {
    let config = SimulationConfig::new(body_count, 0.01)
        .with_mass_range(1.0, 10.0)
        .with_position_radius(1000.0)
        .with_gravitational_constant(1.0)
        .with_softening(0.1)
        .with_execution(execution)
        .with_parallel_threshold(0);
    let mut rng = ChaChaRng::seed_from_u64(42);
    Simulator::new(&config, &mut rng).expect("valid benchmark configuration")
}

fn bench_step_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("step_throughput");

    for body_count in [16, 128, 512, 2048].iter() {
        group.throughput(Throughput::Elements(PairIndex::expected_len(*body_count) as u64));

        group.bench_with_input(
            BenchmarkId::new("sequential", body_count),
            body_count,
            |b, &body_count| {
                let mut sim = setup_cluster(body_count, ExecutionMode::Sequential);
                b.iter(|| black_box(sim.step()));
            },
        );

        group.bench_with_input(
            BenchmarkId::new("parallel", body_count),
            body_count,
            |b, &body_count| {
                let mut sim = setup_cluster(body_count, ExecutionMode::Parallel);
                b.iter(|| black_box(sim.step()));
            },
        );
    }

    group.finish();
}

fn bench_pair_rebuild(c: &mut Criterion) {
    let mut group = c.benchmark_group("pair_rebuild");

    for body_count in [100, 1000].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(body_count),
            body_count,
            |b, &body_count| {
                let mut index = PairIndex::new();
                b.iter(|| {
                    index.rebuild(black_box(body_count));
                    black_box(index.len())
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_step_throughput, bench_pair_rebuild);
criterion_main!(benches);
