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
//! Two-body infall example
//!
//! Two equal masses start at rest one unit apart and fall toward each
//! other. The example reports positions at a fixed interval and stops
//! cleanly if the bodies ever coincide.
//!
//! # Running
//!
//! ```bash
//! cargo run --example two_body --release
//!
//! # Longer run with a coarser report interval
//! cargo run --example two_body --release -- --duration 3.0 --interval 0.5
//! ```

use nbody_sim::{SimulationConfig, SimulationError, Simulator, Vector3};

struct ExampleConfig {
    duration: f64,
    interval: f64,
    timestep: f64,
}

impl Default for ExampleConfig {
    fn default() -> Self {
        ExampleConfig {
            duration: 2.0,
            interval: 0.25,
            timestep: 0.001,
        }
    }
}

fn parse_value(args: &[String], i: usize, flag: &str, default: f64) -> f64 {
    match args.get(i + 1).map(|v| v.parse::<f64>()) {
        Some(Ok(value)) => value,
        Some(Err(_)) => {
            eprintln!("Warning: Invalid value for {}, using default {}", flag, default);
            default
        }
        None => {
            eprintln!("Error: {} requires an argument", flag);
            std::process::exit(1);
        }
    }
}

fn main() {
    println!("==========================================================");
    println!("       Two-Body Infall");
    println!("==========================================================");
    println!();

    let args: Vec<String> = std::env::args().collect();
    let mut config = ExampleConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--duration" => {
                config.duration = parse_value(&args, i, "--duration", config.duration);
                i += 2;
            }
            "--interval" => {
                config.interval = parse_value(&args, i, "--interval", config.interval);
                i += 2;
            }
            "--timestep" => {
                config.timestep = parse_value(&args, i, "--timestep", config.timestep);
                i += 2;
            }
            _ => {
                i += 1;
            }
        }
    }

    let sim_config = SimulationConfig::new(0, config.timestep).with_gravitational_constant(0.01);
    let mut sim = match Simulator::empty(&sim_config) {
        Ok(sim) => sim,
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(1);
        }
    };

    sim.add_body_at_rest(100.0, Vector3::xyz(0.0, 0.0, 0.0));
    sim.add_body_at_rest(100.0, Vector3::xyz(1.0, 0.0, 0.0));

    println!("Configuration:");
    println!("  G = {}", sim.gravitational_constant());
    println!("  dt = {}", sim.timestep());
    println!("  Duration: {}", config.duration);
    println!();
    print!("{}", sim.snapshot());

    let mut remaining = config.duration;
    while remaining >= config.interval {
        match sim.run(config.interval) {
            Ok(_) => print!("{}", sim.snapshot()),
            Err(SimulationError::UndefinedInteraction { first, second }) => {
                println!();
                println!("Bodies {} and {} coincided; stopping.", first, second);
                break;
            }
            Err(err) => {
                eprintln!("Error: {}", err);
                std::process::exit(1);
            }
        }
        remaining -= config.interval;
    }

    println!();
    println!("Steps taken: {}", sim.steps_taken());
    println!("Kinetic energy: {:.6e}", sim.kinetic_energy());
}
