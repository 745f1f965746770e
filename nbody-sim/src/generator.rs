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
//! Random initial conditions
//!
//! The generator never owns a random source. Callers pass their own `Rng`,
//! so a seeded generator such as `ChaChaRng` reproduces the same bodies on
//! every run.
//!
//! ```
//! use nbody_sim::generator::UniformGenerator;
//! use rand::SeedableRng;
//! use rand_chacha::ChaChaRng;
//!
//! let generator = UniformGenerator::new((1.0, 2.0), 10.0).unwrap();
//! let mut rng = ChaChaRng::seed_from_u64(7);
//! let bodies = generator.generate(&mut rng, 4);
//! assert_eq!(bodies.len(), 4);
//! ```

use crate::body::Body;
use crate::error::{Result, SimulationError};
use crate::vector::{Scalar, Vector3};
use rand::Rng;

/// Samples bodies at rest with uniform mass and uniform per-axis position
#[derive(Debug, Clone)]
pub struct UniformGenerator<T: Scalar> {
    mass_range: (T, T),
    position_radius: T,
}

impl<T: Scalar> UniformGenerator<T> {
    /// Masses are drawn from `[lower, upper]`, coordinates from
    /// `[0, position_radius]`
    pub fn new(mass_range: (T, T), position_radius: T) -> Result<Self> {
        let (lower, upper) = mass_range;
        if !lower.is_finite() || !upper.is_finite() || lower > upper {
            return Err(SimulationError::invalid(
                "mass_range",
                format!("expected finite lower <= upper, got [{}, {}]", lower, upper),
            ));
        }
        if !(position_radius >= T::zero()) || !position_radius.is_finite() {
            return Err(SimulationError::invalid(
                "position_radius",
                format!("must be non-negative and finite, got {}", position_radius),
            ));
        }

        Ok(UniformGenerator {
            mass_range,
            position_radius,
        })
    }

    /// Mass bounds
    pub fn mass_range(&self) -> (T, T) {
        self.mass_range
    }

    /// Per-axis position bound
    pub fn position_radius(&self) -> T {
        self.position_radius
    }

    /// Draw one body
    pub fn sample_body<R: Rng + ?Sized>(&self, rng: &mut R) -> Body<T> {
        let (lower, upper) = self.mass_range;
        let radius = self.position_radius;

        let mass = rng.gen_range(lower..=upper);
        let position = Vector3::xyz(
            rng.gen_range(T::zero()..=radius),
            rng.gen_range(T::zero()..=radius),
            rng.gen_range(T::zero()..=radius),
        );
        Body::at_rest(mass, position)
    }

    /// Draw `count` bodies
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R, count: usize) -> Vec<Body<T>> {
        (0..count).map(|_| self.sample_body(rng)).collect()
    }
}
