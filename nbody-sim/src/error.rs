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
//! Error type for simulator construction and stepping

use std::fmt;

/// Errors reported by the simulator
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// A construction parameter is out of range
    ///
    /// Fatal to the construction attempt; retry with corrected values.
    InvalidParameter {
        /// Name of the offending parameter
        name: &'static str,
        /// Human-readable explanation
        reason: String,
    },
    /// Two bodies produced a singular interaction during the force pass
    ///
    /// Raised when the (softened) separation is zero or the computed
    /// contribution is not finite. The step that detected it leaves all body
    /// state untouched.
    UndefinedInteraction {
        /// Index of the first body of the pair
        first: usize,
        /// Index of the second body of the pair
        second: usize,
    },
}

impl SimulationError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        SimulationError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::InvalidParameter { name, reason } => {
                write!(f, "Invalid parameter `{}`: {}", name, reason)
            }
            SimulationError::UndefinedInteraction { first, second } => write!(
                f,
                "Undefined gravitational interaction between bodies {} and {} (zero separation)",
                first, second
            ),
        }
    }
}

impl std::error::Error for SimulationError {}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, SimulationError>;
