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
//! Unordered body-pair enumeration
//!
//! For N bodies the force pass visits N*(N-1)/2 pairs. [`PairIndex`] stores
//! them as dense indices into the simulator's body storage, so an entry never
//! outlives a reallocation of that storage and always resolves to the
//! current state of the body.
//!
//! # Ordering
//!
//! Pairs are enumerated by ascending first index, then ascending second
//! index. Floating-point accumulation in the force pass follows this order,
//! which makes sequential runs bit-for-bit reproducible.

use std::fmt;

/// Two distinct body indices, always with `first < second`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pair {
    first: usize,
    second: usize,
}

impl Pair {
    /// Create a pair from two indices in either order
    ///
    /// Returns `None` if `a == b`; a body never pairs with itself.
    pub fn new(a: usize, b: usize) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Pair { first: a, second: b }),
            std::cmp::Ordering::Greater => Some(Pair { first: b, second: a }),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// The lower body index
    pub fn first(&self) -> usize {
        self.first
    }

    /// The higher body index
    pub fn second(&self) -> usize {
        self.second
    }

    /// Both indices as a tuple
    pub fn indices(&self) -> (usize, usize) {
        (self.first, self.second)
    }

    /// Whether the given body participates in this pair
    pub fn contains(&self, body: usize) -> bool {
        self.first == body || self.second == body
    }
}

impl fmt::Display for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.first, self.second)
    }
}

/// Every unordered pair of bodies for a fixed body count
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairIndex {
    pairs: Vec<Pair>,
    body_count: usize,
}

impl PairIndex {
    /// An empty index covering zero bodies
    pub fn new() -> Self {
        PairIndex::default()
    }

    /// Build the index for `body_count` bodies
    pub fn for_bodies(body_count: usize) -> Self {
        let mut index = PairIndex::new();
        index.rebuild(body_count);
        index
    }

    /// Number of pairs among `body_count` bodies
    pub fn expected_len(body_count: usize) -> usize {
        body_count * body_count.saturating_sub(1) / 2
    }

    /// Replace the contents with all pairs among `body_count` bodies
    ///
    /// The previous contents are discarded, never patched.
    pub fn rebuild(&mut self, body_count: usize) {
        self.pairs.clear();
        self.pairs.reserve(Self::expected_len(body_count));

        for i in 0..body_count {
            for j in (i + 1)..body_count {
                self.pairs.push(Pair { first: i, second: j });
            }
        }

        self.body_count = body_count;
        log::debug!(
            "Rebuilt pair index: {} bodies, {} pairs",
            body_count,
            self.pairs.len()
        );
    }

    /// Number of bodies this index was built for
    pub fn body_count(&self) -> usize {
        self.body_count
    }

    /// Number of pairs
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// True if there are no pairs (fewer than two bodies)
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Pair at position `k` in enumeration order
    pub fn get(&self, k: usize) -> Option<Pair> {
        self.pairs.get(k).copied()
    }

    /// Iterate over all pairs in enumeration order
    pub fn iter(&self) -> std::slice::Iter<'_, Pair> {
        self.pairs.iter()
    }

    /// All pairs as a slice, for chunked or parallel traversal
    pub fn as_slice(&self) -> &[Pair] {
        &self.pairs
    }
}

impl<'a> IntoIterator for &'a PairIndex {
    type Item = &'a Pair;
    type IntoIter = std::slice::Iter<'a, Pair>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}
