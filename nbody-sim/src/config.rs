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
//! Simulation configuration
//!
//! [`SimulationConfig`] gathers every construction parameter of a
//! [`Simulator`](crate::Simulator). Build one from `Default` and the
//! `with_*` methods; [`validate`](SimulationConfig::validate) runs when the
//! simulator is constructed.
//!
//! With the `serde` feature enabled the configuration types can be loaded
//! from any serde format.

use crate::error::{Result, SimulationError};
use crate::gravity::GRAVITATIONAL_CONSTANT;
use crate::vector::Scalar;

/// How the passes of a step are scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecutionMode {
    /// A single thread walks pairs and bodies in index order
    #[default]
    Sequential,
    /// Passes are split across the Rayon thread pool
    ///
    /// Needs the `parallel` feature; without it the simulator logs a warning
    /// and runs sequentially.
    Parallel,
}

/// Construction parameters for a simulator
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationConfig<T> {
    /// Number of bodies sampled at construction
    pub body_count: usize,
    /// Fixed integration timestep (Δt)
    pub timestep: T,
    /// Inclusive `(lower, upper)` bounds for sampled masses
    pub mass_range: (T, T),
    /// Sampled positions lie in `[0, position_radius]` on every axis
    pub position_radius: T,
    /// Gravitational constant G
    pub gravitational_constant: T,
    /// Softening length ε; zero disables softening
    pub softening: T,
    /// Scheduling of the step passes
    pub execution: ExecutionMode,
    /// Systems with fewer pairs than this run sequentially even in
    /// parallel mode
    pub parallel_threshold: usize,
}

impl<T: Scalar> Default for SimulationConfig<T> {
    fn default() -> Self {
        SimulationConfig {
            body_count: 0,
            timestep: T::from_f64_lossy(1e-3),
            mass_range: (T::one(), T::from_f64_lossy(100.0)),
            position_radius: T::from_f64_lossy(100.0),
            gravitational_constant: T::from_f64_lossy(GRAVITATIONAL_CONSTANT),
            softening: T::zero(),
            execution: ExecutionMode::Sequential,
            parallel_threshold: 1024,
        }
    }
}

impl<T: Scalar> SimulationConfig<T> {
    /// Configuration for `body_count` sampled bodies with timestep `dt`
    pub fn new(body_count: usize, timestep: T) -> Self {
        SimulationConfig {
            body_count,
            timestep,
            ..Default::default()
        }
    }

    /// Set the number of sampled bodies
    pub fn with_body_count(mut self, body_count: usize) -> Self {
        self.body_count = body_count;
        self
    }

    /// Set the timestep
    pub fn with_timestep(mut self, timestep: T) -> Self {
        self.timestep = timestep;
        self
    }

    /// Set the inclusive mass bounds
    pub fn with_mass_range(mut self, lower: T, upper: T) -> Self {
        self.mass_range = (lower, upper);
        self
    }

    /// Set the per-axis position bound
    pub fn with_position_radius(mut self, radius: T) -> Self {
        self.position_radius = radius;
        self
    }

    /// Set the gravitational constant
    pub fn with_gravitational_constant(mut self, g: T) -> Self {
        self.gravitational_constant = g;
        self
    }

    /// Set the softening length
    pub fn with_softening(mut self, softening: T) -> Self {
        self.softening = softening;
        self
    }

    /// Set the execution mode
    pub fn with_execution(mut self, execution: ExecutionMode) -> Self {
        self.execution = execution;
        self
    }

    /// Set the pair count below which parallel mode falls back to sequential
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Check every parameter, returning the first violation
    pub fn validate(&self) -> Result<()> {
        let dt = self.timestep;
        if !(dt > T::zero()) || !dt.is_finite() {
            return Err(SimulationError::invalid(
                "timestep",
                format!("must be positive and finite, got {}", dt),
            ));
        }

        let (lower, upper) = self.mass_range;
        if !lower.is_finite() || !upper.is_finite() {
            return Err(SimulationError::invalid(
                "mass_range",
                format!("bounds must be finite, got [{}, {}]", lower, upper),
            ));
        }
        if lower > upper {
            return Err(SimulationError::invalid(
                "mass_range",
                format!("lower bound {} exceeds upper bound {}", lower, upper),
            ));
        }

        Self::check_non_negative("position_radius", self.position_radius)?;
        Self::check_non_negative("gravitational_constant", self.gravitational_constant)?;
        Self::check_non_negative("softening", self.softening)?;

        Ok(())
    }

    fn check_non_negative(name: &'static str, value: T) -> Result<()> {
        if !(value >= T::zero()) || !value.is_finite() {
            return Err(SimulationError::invalid(
                name,
                format!("must be non-negative and finite, got {}", value),
            ));
        }
        Ok(())
    }

    /// Advisory warnings about a valid but questionable timestep
    ///
    /// Very small timesteps lose precision, large ones make the explicit
    /// update unstable. An empty vector means nothing to report.
    pub fn timestep_warnings(&self) -> Vec<String> {
        let dt = self.timestep.to_f64().unwrap_or(f64::NAN);
        let mut warnings = Vec::new();

        if dt < 1e-9 {
            warnings.push(format!(
                "Timestep {} is extremely small and may cause precision loss",
                dt
            ));
        }
        if dt > 1.0 {
            warnings.push(format!(
                "Timestep {} is large and may cause instability",
                dt
            ));
        }

        warnings
    }
}
