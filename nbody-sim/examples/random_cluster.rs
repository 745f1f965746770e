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
//! Random cluster example
//!
//! Samples a cluster of bodies from a seeded RNG, runs it sequentially and
//! in parallel, and compares wall-clock time and final positions.
//!
//! # Running
//!
//! ```bash
//! cargo run --example random_cluster --release
//!
//! # More bodies, different seed
//! cargo run --example random_cluster --release -- --bodies 2000 --seed 7
//! ```

use nbody_sim::{ExecutionMode, SimulationConfig, Simulator};
use rand::SeedableRng;
use rand_chacha::ChaChaRng;
use std::time::Instant;

fn parse_arg<T: std::str::FromStr>(args: &[String], flag: &str, default: T) -> T {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let bodies: usize = parse_arg(&args, "--bodies", 500);
    let seed: u64 = parse_arg(&args, "--seed", 42);
    let duration: f64 = parse_arg(&args, "--duration", 0.5);

    println!("Random Cluster Simulation");
    println!("=========================\n");

    let config = SimulationConfig::new(bodies, 0.01)
        .with_mass_range(1.0, 100.0)
        .with_position_radius(1000.0)
        .with_gravitational_constant(1.0)
        .with_softening(0.5);

    let mut sequential = match Simulator::new(&config, &mut ChaChaRng::seed_from_u64(seed)) {
        Ok(sim) => sim,
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(1);
        }
    };
    let mut parallel = sequential.clone();
    parallel.set_execution(ExecutionMode::Parallel);

    println!("Bodies: {}", sequential.len());
    println!("Pairs: {}", sequential.pairs().len());
    println!("Seed: {}", seed);
    let steps = match sequential.steps_for(duration) {
        Ok(steps) => steps,
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(1);
        }
    };
    println!("Duration: {} ({} steps)\n", duration, steps);

    for (label, sim) in [("sequential", &mut sequential), ("parallel", &mut parallel)] {
        let start = Instant::now();
        if let Err(err) = sim.run(duration) {
            eprintln!("Error during {} run: {}", label, err);
            std::process::exit(1);
        }
        println!("  {:<10} {:>10.2?}", label, start.elapsed());
    }

    let max_difference = sequential
        .bodies()
        .iter()
        .zip(parallel.bodies())
        .map(|(s, p)| (s.position - p.position).magnitude())
        .fold(0.0_f64, f64::max);

    println!();
    println!("Max position difference: {:.3e}", max_difference);
    if let Some(com) = sequential.center_of_mass() {
        println!("Center of mass: {}", com);
    }
}
