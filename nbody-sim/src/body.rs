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
//! Point-mass state
//!
//! A [`Body`] is plain data. The physics that mutates it lives in
//! [`Simulator`](crate::Simulator), which owns every body exclusively.

use crate::vector::{Scalar, Vector3};

/// A point mass with position, velocity, and accumulated acceleration
///
/// Mass is expected to be positive but is not validated. The acceleration
/// field only ever holds contributions from the current step; the simulator
/// clears it before each force pass.
///
/// # Examples
///
/// ```
/// use nbody_sim::{Body, Vector3};
///
/// let body = Body::at_rest(5.0, Vector3::xyz(1.0, 0.0, 0.0));
/// assert_eq!(body.velocity, Vector3::zero());
/// assert_eq!(body.kinetic_energy(), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body<T: Scalar> {
    /// Mass of the body
    pub mass: T,
    /// Current position
    pub position: Vector3<T>,
    /// Current velocity
    pub velocity: Vector3<T>,
    /// Acceleration accumulated during the current step
    pub acceleration: Vector3<T>,
}

impl<T: Scalar> Body<T> {
    /// Create a body with the given mass, position, and velocity
    pub fn new(mass: T, position: Vector3<T>, velocity: Vector3<T>) -> Self {
        Body {
            mass,
            position,
            velocity,
            acceleration: Vector3::zero(),
        }
    }

    /// Create a body with zero velocity
    pub fn at_rest(mass: T, position: Vector3<T>) -> Self {
        Body::new(mass, position, Vector3::zero())
    }

    /// Linear momentum, m * v
    pub fn momentum(&self) -> Vector3<T> {
        self.velocity * self.mass
    }

    /// Kinetic energy, 0.5 * m * v²
    pub fn kinetic_energy(&self) -> T {
        T::from_f64_lossy(0.5) * self.mass * self.velocity.magnitude_squared()
    }

    /// Check that every field is finite
    pub fn is_finite(&self) -> bool {
        self.mass.is_finite()
            && self.position.is_finite()
            && self.velocity.is_finite()
            && self.acceleration.is_finite()
    }
}
