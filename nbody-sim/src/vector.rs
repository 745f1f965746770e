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
//! Fixed-dimension vector arithmetic
//!
//! [`Vector`] is a `Copy` tuple of `N` floating-point scalars with elementwise
//! arithmetic, scalar scaling, and the norms needed by the force kernel.
//! The dimension is a const generic, so mixing vectors of different
//! dimension is a compile error rather than a runtime check.
//!
//! # Examples
//!
//! ```
//! use nbody_sim::vector::{Axis, Vector3};
//!
//! let a = Vector3::xyz(0.0, 2.0, -1.0);
//! let b = Vector3::xyz(1.0, -2.0, 1.0);
//! let sum = a + b;
//! assert_eq!(sum[Axis::X], 1.0);
//! assert_eq!(sum[1], 0.0);
//! ```
//!
//! # Equality
//!
//! `==` compares every component exactly, with no tolerance. Deterministic
//! runs are expected to reproduce bit-identical state; use `approx` in tests
//! that cross a parallel reduction.

use num_traits::{Float, FromPrimitive, NumAssignOps};
use rand::distributions::uniform::SampleUniform;
use std::fmt;
use std::ops::{
    Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign,
};

/// Floating-point scalar usable as a vector component
///
/// Any `num_traits::Float` that rand can sample uniformly qualifies, which
/// in practice means `f32` and `f64`. The `SampleUniform` bound lets the
/// initial-condition generator draw values of the same type the simulator
/// integrates with.
pub trait Scalar:
    Float
    + FromPrimitive
    + NumAssignOps
    + SampleUniform
    + Send
    + Sync
    + fmt::Debug
    + fmt::Display
    + 'static
{
    /// Convert from `f64`, yielding NaN if the value is not representable
    ///
    /// A NaN parameter is then rejected by validation like any other.
    fn from_f64_lossy(value: f64) -> Self {
        Self::from_f64(value).unwrap_or_else(Self::nan)
    }
}

impl<T> Scalar for T where
    T: Float
        + FromPrimitive
        + NumAssignOps
        + SampleUniform
        + Send
        + Sync
        + fmt::Debug
        + fmt::Display
        + 'static
{
}

/// Named axis for component access
///
/// Only the first `N` axes exist on a `Vector<N, T>`; indexing with an axis
/// past the dimension panics exactly like an out-of-range `usize` index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Component 0
    X,
    /// Component 1
    Y,
    /// Component 2
    Z,
    /// Component 3
    T,
    /// Component 4
    W,
    /// Component 5
    V,
}

impl Axis {
    /// Position of this axis within the component array
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
            Axis::T => 3,
            Axis::W => 4,
            Axis::V => 5,
        }
    }
}

/// An `N`-dimensional vector of floating-point components
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector<const N: usize, T> {
    components: [T; N],
}

/// Three-dimensional vector, the shape every body uses
pub type Vector3<T> = Vector<3, T>;

impl<const N: usize, T: Scalar> Vector<N, T> {
    /// Create a vector from its components
    pub fn new(components: [T; N]) -> Self {
        Vector { components }
    }

    /// The zero vector
    pub fn zero() -> Self {
        Vector {
            components: [T::zero(); N],
        }
    }

    /// Number of components
    pub fn dimension(&self) -> usize {
        N
    }

    /// Copy of the component array
    pub fn as_array(&self) -> [T; N] {
        self.components
    }

    /// Iterate over the components in index order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.components.iter()
    }

    /// Dot product
    pub fn dot(&self, other: &Self) -> T {
        self.components
            .iter()
            .zip(other.components.iter())
            .fold(T::zero(), |acc, (&a, &b)| acc + a * b)
    }

    /// Sum of squared components
    ///
    /// Prefer this over [`magnitude`](Self::magnitude) when the square root
    /// is not needed, e.g. as the denominator of an inverse-square law.
    pub fn magnitude_squared(&self) -> T {
        self.dot(self)
    }

    /// Euclidean length
    pub fn magnitude(&self) -> T {
        self.magnitude_squared().sqrt()
    }

    /// This vector scaled to unit length
    ///
    /// The zero vector has no direction. Calling this on it divides by zero
    /// and yields non-finite components; it is not checked here. Use
    /// [`try_unit`](Self::try_unit) when the input may be degenerate.
    pub fn unit(&self) -> Self {
        *self / self.magnitude()
    }

    /// This vector scaled to unit length, or `None` if the magnitude is zero
    /// or not finite
    pub fn try_unit(&self) -> Option<Self> {
        let magnitude = self.magnitude();
        if magnitude == T::zero() || !magnitude.is_finite() {
            return None;
        }
        Some(*self / magnitude)
    }

    /// Check if all components are finite (not NaN or infinite)
    pub fn is_finite(&self) -> bool {
        self.components.iter().all(|c| c.is_finite())
    }

    /// In-place elementwise addition, returning `self` for chaining
    pub fn add_mut(&mut self, rhs: &Self) -> &mut Self {
        for (c, &r) in self.components.iter_mut().zip(rhs.components.iter()) {
            *c += r;
        }
        self
    }

    /// In-place elementwise subtraction, returning `self` for chaining
    pub fn sub_mut(&mut self, rhs: &Self) -> &mut Self {
        for (c, &r) in self.components.iter_mut().zip(rhs.components.iter()) {
            *c -= r;
        }
        self
    }

    /// In-place scaling, returning `self` for chaining
    pub fn scale_mut(&mut self, factor: T) -> &mut Self {
        for c in self.components.iter_mut() {
            *c *= factor;
        }
        self
    }

    /// In-place division by a scalar, returning `self` for chaining
    pub fn div_mut(&mut self, divisor: T) -> &mut Self {
        for c in self.components.iter_mut() {
            *c /= divisor;
        }
        self
    }

    fn map(self, f: impl Fn(T) -> T) -> Self {
        Vector {
            components: self.components.map(f),
        }
    }
}

impl<T: Scalar> Vector<3, T> {
    /// Create a 3D vector from its coordinates
    pub fn xyz(x: T, y: T, z: T) -> Self {
        Vector::new([x, y, z])
    }

    /// The x component
    pub fn x(&self) -> T {
        self.components[0]
    }

    /// The y component
    pub fn y(&self) -> T {
        self.components[1]
    }

    /// The z component
    pub fn z(&self) -> T {
        self.components[2]
    }

    /// Cross product
    pub fn cross(&self, other: &Self) -> Self {
        let [ax, ay, az] = self.components;
        let [bx, by, bz] = other.components;
        Vector::xyz(ay * bz - az * by, az * bx - ax * bz, ax * by - ay * bx)
    }
}

impl<const N: usize, T: Scalar> Default for Vector<N, T> {
    fn default() -> Self {
        Vector::zero()
    }
}

impl<const N: usize, T: Scalar> From<[T; N]> for Vector<N, T> {
    fn from(components: [T; N]) -> Self {
        Vector::new(components)
    }
}

impl<const N: usize, T> Index<usize> for Vector<N, T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.components[index]
    }
}

impl<const N: usize, T> IndexMut<usize> for Vector<N, T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.components[index]
    }
}

impl<const N: usize, T> Index<Axis> for Vector<N, T> {
    type Output = T;

    fn index(&self, axis: Axis) -> &T {
        &self.components[axis.index()]
    }
}

impl<const N: usize, T> IndexMut<Axis> for Vector<N, T> {
    fn index_mut(&mut self, axis: Axis) -> &mut T {
        &mut self.components[axis.index()]
    }
}

impl<const N: usize, T: Scalar> Add for Vector<N, T> {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        self.add_mut(&rhs);
        self
    }
}

impl<const N: usize, T: Scalar> Sub for Vector<N, T> {
    type Output = Self;

    fn sub(mut self, rhs: Self) -> Self {
        self.sub_mut(&rhs);
        self
    }
}

impl<const N: usize, T: Scalar> Neg for Vector<N, T> {
    type Output = Self;

    fn neg(self) -> Self {
        self.map(|c| -c)
    }
}

impl<const N: usize, T: Scalar> Mul<T> for Vector<N, T> {
    type Output = Self;

    fn mul(self, factor: T) -> Self {
        self.map(|c| c * factor)
    }
}

impl<const N: usize, T: Scalar> Div<T> for Vector<N, T> {
    type Output = Self;

    fn div(self, divisor: T) -> Self {
        self.map(|c| c / divisor)
    }
}

impl<const N: usize, T: Scalar> AddAssign for Vector<N, T> {
    fn add_assign(&mut self, rhs: Self) {
        self.add_mut(&rhs);
    }
}

impl<const N: usize, T: Scalar> SubAssign for Vector<N, T> {
    fn sub_assign(&mut self, rhs: Self) {
        self.sub_mut(&rhs);
    }
}

impl<const N: usize, T: Scalar> MulAssign<T> for Vector<N, T> {
    fn mul_assign(&mut self, factor: T) {
        self.scale_mut(factor);
    }
}

impl<const N: usize, T: Scalar> DivAssign<T> for Vector<N, T> {
    fn div_assign(&mut self, divisor: T) {
        self.div_mut(divisor);
    }
}

impl<const N: usize, T: Scalar> IntoIterator for Vector<N, T> {
    type Item = T;
    type IntoIter = std::array::IntoIter<T, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.components.into_iter()
    }
}

impl<const N: usize, T: Scalar> fmt::Display for Vector<N, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, c) in self.components.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, " {}", c)?;
        }
        write!(f, " ]")
    }
}
