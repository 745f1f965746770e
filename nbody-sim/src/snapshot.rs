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
//! Read-only position snapshots for reporting
//!
//! A [`Snapshot`] is an owned copy of every body position taken between
//! steps. Reporters read it freely without holding any borrow of the
//! simulator. Its `Display` impl renders one line per body.

use crate::vector::{Scalar, Vector3};
use std::fmt;

/// Position of one body at the time the snapshot was taken
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyPosition<T: Scalar> {
    /// Index of the body in the simulator
    pub index: usize,
    /// Position of the body
    pub position: Vector3<T>,
}

/// Ordered `(index, position)` sequence for all bodies
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<T: Scalar> {
    elapsed: T,
    entries: Vec<BodyPosition<T>>,
}

impl<T: Scalar> Snapshot<T> {
    /// Build a snapshot from positions listed in body order
    pub fn new(elapsed: T, positions: impl IntoIterator<Item = Vector3<T>>) -> Self {
        let entries = positions
            .into_iter()
            .enumerate()
            .map(|(index, position)| BodyPosition { index, position })
            .collect();
        Snapshot { elapsed, entries }
    }

    /// Simulated time at which the snapshot was taken
    pub fn elapsed(&self) -> T {
        self.elapsed
    }

    /// Number of bodies
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the simulator held no bodies
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Position of body `index`
    pub fn position(&self, index: usize) -> Option<Vector3<T>> {
        self.entries.get(index).map(|e| e.position)
    }

    /// Iterate entries in body order
    pub fn iter(&self) -> std::slice::Iter<'_, BodyPosition<T>> {
        self.entries.iter()
    }
}

impl<'a, T: Scalar> IntoIterator for &'a Snapshot<T> {
    type Item = &'a BodyPosition<T>;
    type IntoIter = std::slice::Iter<'a, BodyPosition<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<T: Scalar> fmt::Display for Snapshot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "t = {}", self.elapsed)?;
        for entry in &self.entries {
            writeln!(f, "  body {}: {}", entry.index, entry.position)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_order_and_lookup() {
        let snapshot = Snapshot::new(
            0.5,
            vec![Vector3::xyz(0.0, 0.0, 0.0), Vector3::xyz(1.0, 2.0, 3.0)],
        );
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.elapsed(), 0.5);
        assert_eq!(snapshot.position(1), Some(Vector3::xyz(1.0, 2.0, 3.0)));
        assert_eq!(snapshot.position(2), None);

        let indices: Vec<usize> = snapshot.iter().map(|e| e.index).collect();
        assert_eq!(indices, vec![0, 1]);
    }

    #[test]
    fn test_display() {
        let snapshot = Snapshot::new(1.0, vec![Vector3::xyz(1.0, 0.0, -1.0)]);
        assert_eq!(snapshot.to_string(), "t = 1\n  body 0: [ 1, 0, -1 ]\n");
    }

    #[test]
    fn test_empty() {
        let snapshot = Snapshot::<f64>::new(0.0, Vec::new());
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.to_string(), "t = 0\n");
    }
}
