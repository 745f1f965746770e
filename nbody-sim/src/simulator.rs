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
//! Direct-summation N-body simulator
//!
//! The [`Simulator`] owns every body and the [`PairIndex`] over them, and
//! advances the system by a fixed timestep with explicit integration.
//!
//! # Step
//!
//! Each call to [`Simulator::step`] runs three passes, each one finishing
//! before the next begins:
//!
//! ```text
//! 1. for each pair (A, B):  c = û * F * dt;  acc[A] += c;  acc[B] -= c
//! 2. for each body:         v += acc * dt
//! 3. for each body:         x += v * dt
//! ```
//!
//! Pass 1 reads only the positions from before the step and writes into a
//! fresh accumulator buffer, so accelerations never carry over from a
//! previous step. The buffer is committed to the bodies only after every pair
//! has been evaluated; a singular pair therefore aborts the step with
//! [`SimulationError::UndefinedInteraction`] and leaves all state untouched.
//!
//! # Parallel execution
//!
//! With the `parallel` feature and [`ExecutionMode::Parallel`], pass 1 folds
//! pairs into per-task accumulator buffers that are then summed by a Rayon
//! reduction, and passes 2 and 3 run as parallel iterations over bodies.
//! Summation order differs from the sequential walk, so results agree only
//! to within floating-point rounding.

use crate::body::Body;
use crate::config::{ExecutionMode, SimulationConfig};
use crate::error::{Result, SimulationError};
use crate::generator::UniformGenerator;
use crate::gravity::Gravity;
use crate::pairs::{Pair, PairIndex};
use crate::snapshot::Snapshot;
use crate::vector::{Scalar, Vector3};
use rand::Rng;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Minimum number of pairs handed to one Rayon task in the force pass
///
/// Each task allocates an accumulator buffer of one vector per body, so
/// tiny tasks would spend more time allocating and merging than computing.
#[cfg(feature = "parallel")]
const MIN_PAIRS_PER_TASK: usize = 256;

/// Gravitational N-body simulator with a fixed timestep
///
/// # Examples
///
/// ```
/// use nbody_sim::{SimulationConfig, Simulator, Vector3};
///
/// let config = SimulationConfig::new(0, 0.001).with_gravitational_constant(0.01);
/// let mut sim = Simulator::empty(&config).unwrap();
/// sim.add_body_at_rest(100.0, Vector3::xyz(0.0, 0.0, 0.0));
/// sim.add_body_at_rest(100.0, Vector3::xyz(1.0, 0.0, 0.0));
///
/// let steps = sim.run(0.01).unwrap();
/// assert_eq!(steps, 10);
/// assert!(sim.body(0).unwrap().position.x() > 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct Simulator<T: Scalar> {
    bodies: Vec<Body<T>>,
    pairs: PairIndex,
    gravity: Gravity<T>,
    timestep: T,
    execution: ExecutionMode,
    parallel_threshold: usize,
    steps_taken: u64,
}

impl<T: Scalar> Simulator<T> {
    /// Create a simulator with `config.body_count` randomly sampled bodies
    ///
    /// Masses are uniform in `config.mass_range`, positions uniform per axis
    /// in `[0, config.position_radius]`, velocities zero. The random source
    /// belongs to the caller; seed it for reproducible setups.
    ///
    /// # Errors
    ///
    /// [`SimulationError::InvalidParameter`] if the configuration does not
    /// validate, e.g. a non-positive timestep or an inverted mass range.
    pub fn new<R: Rng + ?Sized>(config: &SimulationConfig<T>, rng: &mut R) -> Result<Self> {
        let mut simulator = Self::empty(config)?;
        let generator = UniformGenerator::new(config.mass_range, config.position_radius)?;

        simulator.bodies = generator.generate(rng, config.body_count);
        simulator.pairs.rebuild(simulator.bodies.len());

        log::debug!(
            "Created simulator with {} bodies, dt = {}, G = {}",
            simulator.bodies.len(),
            simulator.timestep,
            simulator.gravity.g_constant()
        );
        Ok(simulator)
    }

    /// Create a simulator with no bodies, ignoring `config.body_count`
    pub fn empty(config: &SimulationConfig<T>) -> Result<Self> {
        config.validate()?;

        for warning in config.timestep_warnings() {
            log::warn!("{}", warning);
        }
        Self::warn_if_parallel_unavailable(config.execution);

        Ok(Simulator {
            bodies: Vec::new(),
            pairs: PairIndex::new(),
            gravity: Gravity::new(config.gravitational_constant, config.softening),
            timestep: config.timestep,
            execution: config.execution,
            parallel_threshold: config.parallel_threshold,
            steps_taken: 0,
        })
    }

    /// Create a simulator holding exactly the given bodies
    pub fn with_bodies(config: &SimulationConfig<T>, bodies: Vec<Body<T>>) -> Result<Self> {
        let mut simulator = Self::empty(config)?;
        simulator.bodies = bodies;
        simulator.pairs.rebuild(simulator.bodies.len());
        Ok(simulator)
    }

    fn warn_if_parallel_unavailable(execution: ExecutionMode) {
        if execution == ExecutionMode::Parallel && !cfg!(feature = "parallel") {
            log::warn!(
                "Parallel execution requested but the `parallel` feature is disabled; running sequentially"
            );
        }
    }

    /// Append a body and rebuild the pair index, returning the body's index
    pub fn add_body(&mut self, mass: T, position: Vector3<T>, velocity: Vector3<T>) -> usize {
        self.push_body(Body::new(mass, position, velocity))
    }

    /// Append a body with zero velocity, returning its index
    pub fn add_body_at_rest(&mut self, mass: T, position: Vector3<T>) -> usize {
        self.push_body(Body::at_rest(mass, position))
    }

    /// Append an existing body, returning its index
    ///
    /// The body's stored acceleration is discarded at the next step.
    pub fn push_body(&mut self, body: Body<T>) -> usize {
        self.bodies.push(body);
        self.pairs.rebuild(self.bodies.len());
        self.bodies.len() - 1
    }

    /// Advance the system by exactly one timestep
    ///
    /// # Errors
    ///
    /// [`SimulationError::UndefinedInteraction`] if any pair has a singular
    /// interaction. No body is modified in that case. When several pairs are
    /// singular, the sequential walk reports the first in pair order; the
    /// parallel reduction may report any of them.
    pub fn step(&mut self) -> Result<()> {
        let parallel = self.uses_parallel();

        let accelerations = self.compute_accelerations(parallel)?;
        self.integrate(accelerations, parallel);

        self.steps_taken += 1;
        log::trace!(
            "Step {} complete ({} bodies, {} pairs, parallel = {})",
            self.steps_taken,
            self.bodies.len(),
            self.pairs.len(),
            parallel
        );
        Ok(())
    }

    /// Number of whole steps that fit in `duration`
    ///
    /// Durations shorter than one timestep, zero, or negative give zero.
    ///
    /// # Errors
    ///
    /// [`SimulationError::InvalidParameter`] for a NaN or infinite duration,
    /// or one whose step count does not fit in a `usize`.
    pub fn steps_for(&self, duration: T) -> Result<usize> {
        if !duration.is_finite() {
            return Err(SimulationError::invalid(
                "duration",
                format!("must be finite, got {}", duration),
            ));
        }
        if !(duration > T::zero()) {
            return Ok(0);
        }
        (duration / self.timestep).floor().to_usize().ok_or_else(|| {
            SimulationError::invalid(
                "duration",
                format!(
                    "{} at timestep {} needs more than {} steps",
                    duration,
                    self.timestep,
                    usize::MAX
                ),
            )
        })
    }

    /// Advance by `floor(duration / dt)` steps, returning the step count
    ///
    /// # Errors
    ///
    /// [`SimulationError::InvalidParameter`] for a duration rejected by
    /// [`steps_for`](Self::steps_for), or the first error returned by
    /// [`step`](Self::step). Steps completed before a failing step are kept.
    pub fn run(&mut self, duration: T) -> Result<usize> {
        let steps = self.steps_for(duration)?;
        self.run_steps(steps)
    }

    /// Advance by exactly `steps` steps
    pub fn run_steps(&mut self, steps: usize) -> Result<usize> {
        for completed in 0..steps {
            if let Err(err) = self.step() {
                log::error!("Run stopped after {} of {} steps: {}", completed, steps, err);
                return Err(err);
            }
        }
        Ok(steps)
    }

    fn uses_parallel(&self) -> bool {
        match self.execution {
            ExecutionMode::Sequential => false,
            ExecutionMode::Parallel => {
                cfg!(feature = "parallel") && self.pairs.len() >= self.parallel_threshold
            }
        }
    }

    fn compute_accelerations(&self, parallel: bool) -> Result<Vec<Vector3<T>>> {
        #[cfg(feature = "parallel")]
        {
            if parallel {
                return self.accumulate_parallel();
            }
        }
        #[cfg(not(feature = "parallel"))]
        let _ = parallel;

        self.accumulate_sequential()
    }

    fn accumulate_pair(&self, pair: Pair, accelerations: &mut [Vector3<T>]) -> Result<()> {
        let (i, j) = pair.indices();
        let contribution = self
            .gravity
            .contribution(&self.bodies[i], &self.bodies[j], self.timestep)
            .ok_or_else(|| {
                log::error!(
                    "Undefined interaction between bodies {} and {} at step {}",
                    i,
                    j,
                    self.steps_taken + 1
                );
                SimulationError::UndefinedInteraction { first: i, second: j }
            })?;

        accelerations[i] += contribution;
        accelerations[j] -= contribution;
        Ok(())
    }

    fn accumulate_sequential(&self) -> Result<Vec<Vector3<T>>> {
        let mut accelerations = vec![Vector3::zero(); self.bodies.len()];
        for &pair in &self.pairs {
            self.accumulate_pair(pair, &mut accelerations)?;
        }
        Ok(accelerations)
    }

    #[cfg(feature = "parallel")]
    fn accumulate_parallel(&self) -> Result<Vec<Vector3<T>>> {
        let n = self.bodies.len();

        self.pairs
            .as_slice()
            .par_iter()
            .with_min_len(MIN_PAIRS_PER_TASK)
            .try_fold(
                || vec![Vector3::zero(); n],
                |mut accelerations: Vec<Vector3<T>>, &pair: &Pair| -> Result<Vec<Vector3<T>>> {
                    self.accumulate_pair(pair, &mut accelerations)?;
                    Ok(accelerations)
                },
            )
            .try_reduce(
                || vec![Vector3::zero(); n],
                |mut left: Vec<Vector3<T>>, right: Vec<Vector3<T>>| -> Result<Vec<Vector3<T>>> {
                    for (l, r) in left.iter_mut().zip(right) {
                        *l += r;
                    }
                    Ok(left)
                },
            )
    }

    fn integrate(&mut self, accelerations: Vec<Vector3<T>>, parallel: bool) {
        let dt = self.timestep;

        #[cfg(feature = "parallel")]
        {
            if parallel {
                self.bodies
                    .par_iter_mut()
                    .zip(accelerations.into_par_iter())
                    .for_each(|(body, acceleration)| {
                        body.acceleration = acceleration;
                        body.velocity += acceleration * dt;
                    });
                self.bodies.par_iter_mut().for_each(|body| {
                    body.position += body.velocity * dt;
                });
                return;
            }
        }
        #[cfg(not(feature = "parallel"))]
        let _ = parallel;

        for (body, acceleration) in self.bodies.iter_mut().zip(accelerations) {
            body.acceleration = acceleration;
            body.velocity += acceleration * dt;
        }
        for body in &mut self.bodies {
            body.position += body.velocity * dt;
        }
    }

    /// Owned copy of every body position, in body order
    pub fn snapshot(&self) -> Snapshot<T> {
        Snapshot::new(self.elapsed(), self.bodies.iter().map(|b| b.position))
    }

    /// All bodies, read-only
    pub fn bodies(&self) -> &[Body<T>] {
        &self.bodies
    }

    /// Body at `index`, if any
    pub fn body(&self, index: usize) -> Option<&Body<T>> {
        self.bodies.get(index)
    }

    /// The pair index over the current bodies
    pub fn pairs(&self) -> &PairIndex {
        &self.pairs
    }

    /// Number of bodies
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// True if there are no bodies
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Fixed timestep
    pub fn timestep(&self) -> T {
        self.timestep
    }

    /// The force law in use
    pub fn gravity(&self) -> &Gravity<T> {
        &self.gravity
    }

    /// Gravitational constant
    pub fn gravitational_constant(&self) -> T {
        self.gravity.g_constant()
    }

    /// Current execution mode
    pub fn execution(&self) -> ExecutionMode {
        self.execution
    }

    /// Switch execution mode between steps
    pub fn set_execution(&mut self, execution: ExecutionMode) {
        Self::warn_if_parallel_unavailable(execution);
        self.execution = execution;
    }

    /// Number of completed steps
    pub fn steps_taken(&self) -> u64 {
        self.steps_taken
    }

    /// Simulated time elapsed, `steps_taken * dt`
    pub fn elapsed(&self) -> T {
        T::from_f64_lossy(self.steps_taken as f64) * self.timestep
    }

    /// Sum of body masses
    pub fn total_mass(&self) -> T {
        self.bodies.iter().fold(T::zero(), |acc, b| acc + b.mass)
    }

    /// Mass-weighted mean position, or `None` when the total mass is zero
    pub fn center_of_mass(&self) -> Option<Vector3<T>> {
        let total = self.total_mass();
        if total == T::zero() {
            return None;
        }
        let weighted = self
            .bodies
            .iter()
            .fold(Vector3::zero(), |acc, b| acc + b.position * b.mass);
        Some(weighted / total)
    }

    /// Sum of body momenta
    pub fn total_momentum(&self) -> Vector3<T> {
        self.bodies
            .iter()
            .fold(Vector3::zero(), |acc, b| acc + b.momentum())
    }

    /// Sum of body kinetic energies
    pub fn kinetic_energy(&self) -> T {
        self.bodies
            .iter()
            .fold(T::zero(), |acc, b| acc + b.kinetic_energy())
    }

    /// Sum of pairwise potential energies
    pub fn potential_energy(&self) -> T {
        self.pairs.iter().fold(T::zero(), |acc, pair| {
            let (i, j) = pair.indices();
            acc + self.gravity.potential_energy(&self.bodies[i], &self.bodies[j])
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaChaRng;

    fn two_body_config() -> SimulationConfig<f64> {
        SimulationConfig::new(0, 0.001).with_gravitational_constant(0.01)
    }

    fn two_bodies() -> Simulator<f64> {
        let mut sim = Simulator::empty(&two_body_config()).unwrap();
        sim.add_body_at_rest(100.0, Vector3::xyz(0.0, 0.0, 0.0));
        sim.add_body_at_rest(100.0, Vector3::xyz(1.0, 0.0, 0.0));
        sim
    }

    #[test]
    fn test_construction_samples_bodies() {
        let config = SimulationConfig::new(20, 0.01)
            .with_mass_range(100.0, 101.0)
            .with_position_radius(100.0);
        let mut rng = ChaChaRng::seed_from_u64(42);
        let sim = Simulator::new(&config, &mut rng).unwrap();

        assert_eq!(sim.len(), 20);
        assert_eq!(sim.pairs().len(), 190);
        for body in sim.bodies() {
            assert!(body.mass >= 100.0 && body.mass <= 101.0);
            assert!(body.position.iter().all(|&c| (0.0..=100.0).contains(&c)));
            assert_eq!(body.velocity, Vector3::zero());
            assert_eq!(body.acceleration, Vector3::zero());
        }
    }

    #[test]
    fn test_construction_rejects_invalid_parameters() {
        let mut rng = ChaChaRng::seed_from_u64(0);

        let err = Simulator::new(&SimulationConfig::new(3, 0.0), &mut rng).unwrap_err();
        assert!(matches!(
            err,
            SimulationError::InvalidParameter { name: "timestep", .. }
        ));

        let inverted = SimulationConfig::new(3, 0.1).with_mass_range(101.0, 100.0);
        let err = Simulator::new(&inverted, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            SimulationError::InvalidParameter { name: "mass_range", .. }
        ));
    }

    #[test]
    fn test_add_body_rebuilds_pairs() {
        let mut sim = Simulator::empty(&two_body_config()).unwrap();
        assert!(sim.pairs().is_empty());

        for k in 0..5 {
            let index = sim.add_body_at_rest(1.0, Vector3::xyz(k as f64, 0.0, 0.0));
            assert_eq!(index, k);
            assert_eq!(sim.pairs().len(), PairIndex::expected_len(k + 1));
            assert_eq!(sim.pairs().body_count(), k + 1);
        }
    }

    #[test]
    fn test_single_step_scenario() {
        let mut sim = two_bodies();
        sim.step().unwrap();

        let a = sim.body(0).unwrap();
        let b = sim.body(1).unwrap();

        // F = 0.01 * 100 * 100 / 1² = 100, accumulated as F * dt
        assert!((a.acceleration.x() - 0.1).abs() < 1e-12);
        assert_eq!(a.acceleration, -b.acceleration);
        assert!(a.velocity.x() > 0.0);
        assert!(b.velocity.x() < 0.0);
        assert!(a.position.x() > 0.0);
        assert!(b.position.x() < 1.0);
        assert_eq!(a.velocity, -b.velocity);
        assert!((a.position.x() - (1.0 - b.position.x())).abs() < 1e-15);
        assert_eq!(sim.steps_taken(), 1);
    }

    #[test]
    fn test_acceleration_does_not_carry_over() {
        let mut sim = two_bodies();
        sim.step().unwrap();
        let first = sim.body(0).unwrap().acceleration.x();
        sim.step().unwrap();
        let second = sim.body(0).unwrap().acceleration.x();

        // Bodies barely moved, so the fresh acceleration is close to the
        // first one rather than double it
        assert!((second - first).abs() < 1e-3 * first);
    }

    #[test]
    fn test_run_step_count() {
        let mut sim = two_bodies();
        assert_eq!(sim.run(0.0105).unwrap(), 10);
        assert_eq!(sim.steps_taken(), 10);
        assert!((sim.elapsed() - 0.01).abs() < 1e-15);
    }

    #[test]
    fn test_run_shorter_than_timestep_is_noop() {
        let mut sim = two_bodies();
        let before = sim.bodies().to_vec();

        assert_eq!(sim.run(0.0).unwrap(), 0);
        assert_eq!(sim.run(0.0005).unwrap(), 0);
        assert_eq!(sim.run(-1.0).unwrap(), 0);
        assert_eq!(sim.bodies(), &before[..]);
        assert_eq!(sim.steps_taken(), 0);
    }

    #[test]
    fn test_run_rejects_non_finite_duration() {
        let mut sim = two_bodies();
        assert!(sim.run(f64::NAN).is_err());
        assert!(sim.run(f64::INFINITY).is_err());
    }

    #[test]
    fn test_run_rejects_unbounded_step_count() {
        let mut sim = two_bodies();
        let before = sim.bodies().to_vec();

        let err = sim.steps_for(1e300).unwrap_err();
        assert!(matches!(
            err,
            SimulationError::InvalidParameter { name: "duration", .. }
        ));
        assert!(sim.run(1e300).is_err());
        assert_eq!(sim.steps_taken(), 0);
        assert_eq!(sim.bodies(), &before[..]);

        // Large but representable counts are still accepted
        assert_eq!(sim.steps_for(1e6).unwrap(), 1_000_000_000);
    }

    #[test]
    fn test_coincident_bodies_abort_step() {
        let mut sim = Simulator::empty(&two_body_config()).unwrap();
        sim.add_body(1.0, Vector3::xyz(2.0, 2.0, 2.0), Vector3::xyz(1.0, 0.0, 0.0));
        sim.add_body_at_rest(1.0, Vector3::xyz(2.0, 2.0, 2.0));
        let before = sim.bodies().to_vec();

        let err = sim.step().unwrap_err();
        assert_eq!(err, SimulationError::UndefinedInteraction { first: 0, second: 1 });
        assert_eq!(sim.bodies(), &before[..]);
        assert_eq!(sim.steps_taken(), 0);
    }

    #[test]
    fn test_softening_allows_coincident_bodies() {
        let config = two_body_config().with_softening(0.1);
        let mut sim = Simulator::empty(&config).unwrap();
        sim.add_body_at_rest(1.0, Vector3::zero());
        sim.add_body_at_rest(1.0, Vector3::zero());

        assert!(sim.step().is_ok());
        assert!(sim.bodies().iter().all(Body::is_finite));
    }

    #[test]
    fn test_single_body_moves_ballistically() {
        let mut sim = Simulator::empty(&two_body_config()).unwrap();
        sim.add_body(5.0, Vector3::zero(), Vector3::xyz(1.0, 2.0, 0.0));
        sim.run_steps(1000).unwrap();

        let body = sim.body(0).unwrap();
        assert_eq!(body.velocity, Vector3::xyz(1.0, 2.0, 0.0));
        assert!((body.position.x() - 1.0).abs() < 1e-9);
        assert!((body.position.y() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_snapshot_reflects_positions() {
        let mut sim = two_bodies();
        sim.step().unwrap();
        let snapshot = sim.snapshot();

        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.position(1), Some(sim.body(1).unwrap().position));
        assert_eq!(snapshot.elapsed(), sim.elapsed());
    }

    #[test]
    fn test_diagnostics() {
        let sim = two_bodies();
        assert_eq!(sim.total_mass(), 200.0);
        assert_eq!(sim.center_of_mass(), Some(Vector3::xyz(0.5, 0.0, 0.0)));
        assert_eq!(sim.kinetic_energy(), 0.0);
        assert!((sim.potential_energy() + 100.0).abs() < 1e-12);
        assert_eq!(sim.total_momentum(), Vector3::zero());

        let empty = Simulator::empty(&two_body_config()).unwrap();
        assert_eq!(empty.center_of_mass(), None);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let config = SimulationConfig::new(64, 0.01)
            .with_mass_range(1.0, 10.0)
            .with_position_radius(100.0)
            .with_gravitational_constant(1.0)
            .with_parallel_threshold(0);

        let mut sequential = Simulator::new(&config, &mut ChaChaRng::seed_from_u64(3)).unwrap();
        let mut parallel = sequential.clone();
        parallel.set_execution(ExecutionMode::Parallel);

        sequential.run_steps(20).unwrap();
        parallel.run_steps(20).unwrap();

        for (s, p) in sequential.bodies().iter().zip(parallel.bodies()) {
            let diff = (s.position - p.position).magnitude();
            assert!(diff <= 1e-9 * (1.0 + s.position.magnitude()), "diff = {}", diff);
        }
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_coincident_bodies_abort_step() {
        let config = SimulationConfig::new(64, 0.01)
            .with_mass_range(1.0, 10.0)
            .with_position_radius(100.0)
            .with_gravitational_constant(1.0)
            .with_execution(ExecutionMode::Parallel)
            .with_parallel_threshold(0);

        let mut sim = Simulator::new(&config, &mut ChaChaRng::seed_from_u64(9)).unwrap();
        let target = sim.body(0).unwrap().position;
        let index = sim.add_body_at_rest(1.0, target);
        assert!(sim.uses_parallel());

        let before = sim.bodies().to_vec();
        let err = sim.step().unwrap_err();
        assert_eq!(err, SimulationError::UndefinedInteraction { first: 0, second: index });
        assert_eq!(sim.bodies(), &before[..]);
        assert_eq!(sim.steps_taken(), 0);
    }
}
