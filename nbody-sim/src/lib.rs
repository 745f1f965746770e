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
//! # N-Body Simulator
//!
//! Gravitational dynamics of point masses by direct pairwise force
//! summation and explicit fixed-step integration.
//!
//! ## Features
//!
//! - **Const-generic vectors**: [`Vector`] arithmetic with the dimension in
//!   the type
//! - **Stable pair index**: pairs stored as body indices, rebuilt whenever a
//!   body is added
//! - **Exact reaction**: each pair's contribution to the second body is the
//!   negation of its contribution to the first
//! - **Parallelization**: optional Rayon execution of every step pass
//! - **Reproducible setup**: random initial conditions from a caller-owned RNG
//!
//! ## Example
//!
//! ```rust
//! use nbody_sim::{SimulationConfig, Simulator};
//! use rand::SeedableRng;
//! use rand_chacha::ChaChaRng;
//!
//! let config = SimulationConfig::new(8, 0.01)
//!     .with_mass_range(1.0, 10.0)
//!     .with_position_radius(100.0)
//!     .with_gravitational_constant(1.0);
//! let mut rng = ChaChaRng::seed_from_u64(42);
//!
//! let mut sim = Simulator::new(&config, &mut rng).unwrap();
//! sim.run(1.0).unwrap();
//! println!("{}", sim.snapshot());
//! ```
//!
//! ## Logging
//!
//! The crate logs through the `log` facade and never installs a logger.

#![warn(missing_docs)]

/// Fixed-dimension vector arithmetic
pub mod vector;

/// Point-mass state
pub mod body;

/// Unordered pair enumeration
pub mod pairs;

/// Newtonian force law
pub mod gravity;

/// Construction parameters
pub mod config;

/// Error type
pub mod error;

/// Random initial conditions
pub mod generator;

/// Position snapshots for reporting
pub mod snapshot;

/// The simulator and its step loop
pub mod simulator;

pub use body::Body;
pub use config::{ExecutionMode, SimulationConfig};
pub use error::{Result, SimulationError};
pub use pairs::{Pair, PairIndex};
pub use simulator::Simulator;
pub use snapshot::Snapshot;
pub use vector::{Axis, Scalar, Vector, Vector3};
