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
//! Pairwise Newtonian gravity
//!
//! Every point mass attracts every other point mass with a force
//! proportional to the product of their masses and inversely proportional to
//! the square of their separation:
//!
//! **F = G * (m₁ * m₂) / r²**
//!
//! # References
//!
//! - Newton, I. (1687). "Philosophiæ Naturalis Principia Mathematica"
//! - [CODATA 2018 value for G](https://physics.nist.gov/cgi-bin/cuu/Value?bg)
//!
//! # Softening
//!
//! Two coincident point masses have no defined interaction. By default the
//! law is applied unmodified and a zero separation is reported as
//! [`SimulationError::UndefinedInteraction`](crate::SimulationError) by the
//! simulator. A non-zero softening length ε replaces r² with r² + ε² in
//! both the magnitude and the direction normalization:
//!
//! **F = G * (m₁ * m₂) / (r² + ε²)**
//!
//! See Aarseth, S. J. (2003). "Gravitational N-Body Simulations".
//!
//! # Per-step contribution
//!
//! The force pass accumulates `û * F * dt` on the first body of a pair and
//! the exact negation of that vector on the second. The reaction is never
//! re-evaluated, so the two contributions cancel bit for bit.

use crate::body::Body;
use crate::vector::{Scalar, Vector3};

/// Gravitational constant in SI units (m³/(kg⋅s²))
pub const GRAVITATIONAL_CONSTANT: f64 = 6.6743e-11;

/// Evaluated interaction between two bodies
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interaction<T: Scalar> {
    /// Separation vector from the first body to the second
    pub separation: Vector3<T>,
    /// Magnitude of the attractive force
    pub force_magnitude: T,
    /// Unit vector from the first body toward the second
    pub direction: Vector3<T>,
}

impl<T: Scalar> Interaction<T> {
    /// Force vector acting on the first body
    pub fn force(&self) -> Vector3<T> {
        self.direction * self.force_magnitude
    }
}

/// Newtonian gravity with optional softening
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gravity<T: Scalar> {
    g_constant: T,
    softening: T,
}

impl<T: Scalar> Gravity<T> {
    /// Create a force law with the given constant and softening length
    pub fn new(g_constant: T, softening: T) -> Self {
        Gravity {
            g_constant,
            softening,
        }
    }

    /// Gravitational constant in use
    pub fn g_constant(&self) -> T {
        self.g_constant
    }

    /// Softening length in use
    pub fn softening(&self) -> T {
        self.softening
    }

    fn softened_distance_squared(&self, separation: &Vector3<T>) -> T {
        separation.magnitude_squared() + self.softening * self.softening
    }

    /// Evaluate the interaction of `a` with `b`
    ///
    /// Returns `None` when the softened separation is zero or any derived
    /// quantity is not finite.
    pub fn interaction(&self, a: &Body<T>, b: &Body<T>) -> Option<Interaction<T>> {
        let separation = b.position - a.position;
        let r_squared = self.softened_distance_squared(&separation);
        if r_squared == T::zero() {
            return None;
        }

        let force_magnitude = self.g_constant * a.mass * b.mass / r_squared;
        let direction = separation / r_squared.sqrt();

        if !force_magnitude.is_finite() || !direction.is_finite() {
            return None;
        }

        Some(Interaction {
            separation,
            force_magnitude,
            direction,
        })
    }

    /// Acceleration contribution on `a` from `b` over one timestep
    ///
    /// This is `û * F * dt`; the caller applies its negation to `b`.
    pub fn contribution(&self, a: &Body<T>, b: &Body<T>, dt: T) -> Option<Vector3<T>> {
        let interaction = self.interaction(a, b)?;
        let contribution = interaction.direction * interaction.force_magnitude * dt;
        contribution.is_finite().then_some(contribution)
    }

    /// Potential energy of the pair, -G * m₁ * m₂ / r
    pub fn potential_energy(&self, a: &Body<T>, b: &Body<T>) -> T {
        let separation = b.position - a.position;
        let r = self.softened_distance_squared(&separation).sqrt();
        -(self.g_constant * a.mass * b.mass / r)
    }
}

impl<T: Scalar> Default for Gravity<T> {
    fn default() -> Self {
        Gravity::new(T::from_f64_lossy(GRAVITATIONAL_CONSTANT), T::zero())
    }
}
