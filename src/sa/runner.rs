//! SA execution loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::Rng;
use tracing::{debug, info, trace, warn};

use super::config::Schedule;
use super::trace::Trace;
use super::types::SaProblem;
use crate::error::Result;

/// Upper bound on the trace entries reserved up front.
const MAX_TRACE_PREALLOC: usize = 1 << 20;

/// Result of a Simulated Annealing run.
#[derive(Debug, Clone)]
pub struct SaResult<S: Clone> {
    /// The best solution found.
    pub best: S,

    /// Cost of the best solution.
    pub best_cost: f64,

    /// Cost of the generated starting solution.
    pub initial_cost: f64,

    /// Total number of iterations (neighbor evaluations).
    pub iterations: usize,

    /// Final temperature when the algorithm stopped.
    pub final_temperature: f64,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: usize,

    /// Number of improving moves.
    pub improving_moves: usize,

    /// Whether cancelled externally.
    pub cancelled: bool,

    /// Best cost after every iteration.
    pub trace: Trace,

    /// Wall-clock time spent in the run.
    pub elapsed: Duration,
}

/// Mutable state of a run. Owned by [`SaRunner`] for the run's duration.
#[derive(Debug)]
struct SearchState<S> {
    current: S,
    current_cost: f64,
    best: S,
    best_cost: f64,
    temperature: f64,
    trace: Trace,
    iterations: usize,
    accepted_moves: usize,
    improving_moves: usize,
}

impl<S: Clone> SearchState<S> {
    fn new(initial: S, initial_cost: f64, schedule: &Schedule) -> Self {
        Self {
            best: initial.clone(),
            current: initial,
            current_cost: initial_cost,
            best_cost: initial_cost,
            temperature: schedule.initial_temperature,
            trace: Trace::with_capacity(schedule.iteration_count().min(MAX_TRACE_PREALLOC)),
            iterations: 0,
            accepted_moves: 0,
            improving_moves: 0,
        }
    }

    fn is_frozen(&self, frozen_temperature: f64) -> bool {
        self.temperature <= frozen_temperature
    }

    /// One propose / accept / record / cool cycle.
    fn step<P, R>(&mut self, problem: &P, rng: &mut R, cooling_rate: f64)
    where
        P: SaProblem<Solution = S>,
        R: Rng,
    {
        let neighbor = problem.neighbor(&self.current, rng);
        let neighbor_cost = problem.cost(&neighbor);
        let delta = neighbor_cost - self.current_cost;

        // Metropolis acceptance criterion
        let accept = if delta < 0.0 {
            self.improving_moves += 1;
            true
        } else {
            let probability = (-delta / self.temperature).exp();
            rng.random::<f64>() < probability
        };

        if accept {
            self.current = neighbor;
            self.current_cost = neighbor_cost;
            self.accepted_moves += 1;

            if self.current_cost < self.best_cost {
                self.best = self.current.clone();
                self.best_cost = self.current_cost;
                trace!(
                    iteration = self.iterations,
                    best_cost = self.best_cost,
                    temperature = self.temperature,
                    "new incumbent"
                );
            }
        }

        self.trace.record(self.best_cost);
        self.iterations += 1;
        self.temperature *= cooling_rate;
    }

    fn finish(self, initial_cost: f64, cancelled: bool, elapsed: Duration) -> SaResult<S> {
        SaResult {
            best: self.best,
            best_cost: self.best_cost,
            initial_cost,
            iterations: self.iterations,
            final_temperature: self.temperature,
            accepted_moves: self.accepted_moves,
            improving_moves: self.improving_moves,
            cancelled,
            trace: self.trace,
            elapsed,
        }
    }
}

/// Executes the Simulated Annealing algorithm.
pub struct SaRunner;

impl SaRunner {
    /// Runs SA with the random source described by [`Schedule::rng`].
    pub fn run<P: SaProblem>(problem: &P, schedule: &Schedule) -> Result<SaResult<P::Solution>> {
        let mut rng = schedule.rng();
        Self::run_with_cancel(problem, schedule, &mut rng, None)
    }

    /// Runs SA drawing every random decision from `rng`.
    pub fn run_with_rng<P: SaProblem, R: Rng>(
        problem: &P,
        schedule: &Schedule,
        rng: &mut R,
    ) -> Result<SaResult<P::Solution>> {
        Self::run_with_cancel(problem, schedule, rng, None)
    }

    /// Runs SA with an optional cancellation token, checked before every
    /// iteration. A cancelled run still returns the incumbent found so far.
    pub fn run_with_cancel<P: SaProblem, R: Rng>(
        problem: &P,
        schedule: &Schedule,
        rng: &mut R,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SaResult<P::Solution>> {
        schedule.validate()?;
        let started = Instant::now();

        let initial = problem.initial_solution(rng);
        problem.check(&initial)?;
        let initial_cost = problem.cost(&initial);

        debug!(
            initial_cost,
            initial_temperature = schedule.initial_temperature,
            cooling_rate = schedule.cooling_rate,
            expected_iterations = schedule.iteration_count(),
            "annealing started"
        );

        let mut state = SearchState::new(initial, initial_cost, schedule);
        let mut cancelled = false;

        while !state.is_frozen(schedule.frozen_temperature) {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }
            state.step(problem, rng, schedule.cooling_rate);
        }

        let result = state.finish(initial_cost, cancelled, started.elapsed());
        if cancelled {
            warn!(
                iterations = result.iterations,
                best_cost = result.best_cost,
                "annealing cancelled"
            );
        } else {
            info!(
                best_cost = result.best_cost,
                initial_cost,
                iterations = result.iterations,
                accepted_moves = result.accepted_moves,
                improving_moves = result.improving_moves,
                elapsed_ms = result.elapsed.as_millis() as u64,
                "annealing finished"
            );
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    // ---- Quadratic minimization: f(x) = x^2, minimum at 0 ----

    struct QuadraticProblem;

    impl SaProblem for QuadraticProblem {
        type Solution = f64;

        fn initial_solution<R: Rng>(&self, rng: &mut R) -> f64 {
            rng.random_range(-10.0..10.0)
        }

        fn cost(&self, x: &f64) -> f64 {
            x * x
        }

        fn neighbor<R: Rng>(&self, x: &f64, rng: &mut R) -> f64 {
            x + rng.random_range(-1.0..1.0)
        }
    }

    #[test]
    fn test_sa_quadratic() {
        let schedule = Schedule::new(100.0, 0.999).with_seed(42);
        let result = SaRunner::run(&QuadraticProblem, &schedule).unwrap();

        assert!(
            result.best_cost < 1.0,
            "expected near-zero cost, got {}",
            result.best_cost
        );
        assert!(result.improving_moves > 0);
        assert!(result.accepted_moves > result.improving_moves);
        assert!(!result.cancelled);
    }

    #[test]
    fn test_sa_trace_length_matches_schedule() {
        let schedule = Schedule::new(100.0, 0.5).with_seed(1);
        let result = SaRunner::run(&QuadraticProblem, &schedule).unwrap();

        assert_eq!(result.iterations, 40);
        assert_eq!(result.trace.len(), 40);
        assert!(result.final_temperature <= schedule.frozen_temperature);
    }

    #[test]
    fn test_sa_trace_non_increasing() {
        let schedule = Schedule::new(50.0, 0.99).with_seed(42);
        let result = SaRunner::run(&QuadraticProblem, &schedule).unwrap();

        assert!(result.trace.is_non_increasing());
        assert_eq!(result.trace.last(), Some(result.best_cost));
        assert!(result.best_cost <= result.initial_cost);
    }

    #[test]
    fn test_sa_seeded_runs_identical() {
        let schedule = Schedule::new(100.0, 0.98).with_seed(99);
        let a = SaRunner::run(&QuadraticProblem, &schedule).unwrap();
        let b = SaRunner::run(&QuadraticProblem, &schedule).unwrap();

        assert_eq!(a.best.to_bits(), b.best.to_bits());
        assert_eq!(a.best_cost.to_bits(), b.best_cost.to_bits());
        assert_eq!(a.trace, b.trace);
    }

    #[test]
    fn test_sa_cancellation() {
        let schedule = Schedule::new(1e10, 0.9999).with_seed(42);
        let mut rng = StdRng::seed_from_u64(42);

        // Set cancel flag before running for deterministic cancellation.
        let cancel = Arc::new(AtomicBool::new(true));

        let result =
            SaRunner::run_with_cancel(&QuadraticProblem, &schedule, &mut rng, Some(cancel))
                .unwrap();
        assert!(result.cancelled);
        assert_eq!(result.iterations, 0);
        assert!(result.trace.is_empty());
        assert_eq!(result.best_cost, result.initial_cost);
    }

    #[test]
    fn test_sa_already_frozen_runs_no_iterations() {
        let schedule = Schedule::new(1e-12, 0.9).with_seed(3);
        let result = SaRunner::run(&QuadraticProblem, &schedule).unwrap();

        assert_eq!(result.iterations, 0);
        assert!(result.trace.is_empty());
        assert_eq!(result.best_cost, result.initial_cost);
    }

    #[test]
    fn test_sa_invalid_schedule_fails_fast() {
        let schedule = Schedule::new(0.0, 0.9);
        let err = SaRunner::run(&QuadraticProblem, &schedule).unwrap_err();
        assert!(err.is_configuration());
    }

    struct BrokenStart;

    impl SaProblem for BrokenStart {
        type Solution = Vec<usize>;

        fn initial_solution<R: Rng>(&self, _rng: &mut R) -> Vec<usize> {
            vec![0, 0]
        }

        fn cost(&self, _s: &Vec<usize>) -> f64 {
            0.0
        }

        fn neighbor<R: Rng>(&self, s: &Vec<usize>, _rng: &mut R) -> Vec<usize> {
            s.clone()
        }

        fn check(&self, _s: &Vec<usize>) -> Result<()> {
            Err(Error::invalid_tour("index 0 appears twice"))
        }
    }

    #[test]
    fn test_sa_check_runs_before_loop() {
        let err = SaRunner::run(&BrokenStart, &Schedule::new(10.0, 0.5)).unwrap_err();
        assert!(err.is_invalid_tour());
    }

    // ---- Discrete: permutation sorting ----

    struct PermSortProblem {
        n: usize,
    }

    impl SaProblem for PermSortProblem {
        type Solution = Vec<usize>;

        fn initial_solution<R: Rng>(&self, rng: &mut R) -> Vec<usize> {
            use rand::seq::SliceRandom;
            let mut perm: Vec<usize> = (0..self.n).collect();
            perm.shuffle(rng);
            perm
        }

        fn cost(&self, perm: &Vec<usize>) -> f64 {
            // Number of elements not in their correct position
            perm.iter().enumerate().filter(|&(i, &v)| i != v).count() as f64
        }

        fn neighbor<R: Rng>(&self, perm: &Vec<usize>, rng: &mut R) -> Vec<usize> {
            let mut new = perm.clone();
            let i = rng.random_range(0..self.n);
            let j = rng.random_range(0..self.n);
            new.swap(i, j);
            new
        }
    }

    #[test]
    fn test_sa_permutation_sort() {
        let schedule = Schedule::new(50.0, 0.999).with_seed(42);
        let result = SaRunner::run(&PermSortProblem { n: 10 }, &schedule).unwrap();

        assert!(
            result.best_cost <= 4.0,
            "expected near-sorted permutation, got cost {}",
            result.best_cost
        );
    }

    #[test]
    fn test_state_best_never_above_current() {
        let schedule = Schedule::new(1_000.0, 0.95);
        let mut rng = StdRng::seed_from_u64(5);
        let problem = QuadraticProblem;

        let initial = problem.initial_solution(&mut rng);
        let initial_cost = problem.cost(&initial);
        let mut state = SearchState::new(initial, initial_cost, &schedule);

        while !state.is_frozen(schedule.frozen_temperature) {
            state.step(&problem, &mut rng, schedule.cooling_rate);
            assert!(state.best_cost <= state.current_cost);
            assert!(state.best_cost <= initial_cost);
            assert_eq!(problem.cost(&state.best), state.best_cost);
            assert_eq!(state.trace.last(), Some(state.best_cost));
        }
        assert_eq!(state.trace.len(), state.iterations);
    }

    #[test]
    fn test_sa_metropolis_accepts_uphill() {
        // At very high temperature, almost all moves should be accepted
        let schedule = Schedule::new(1e8, 0.999)
            .with_frozen_temperature(1e7)
            .with_seed(42);
        let result = SaRunner::run(&QuadraticProblem, &schedule).unwrap();

        let acceptance_ratio = result.accepted_moves as f64 / result.iterations as f64;
        assert!(
            acceptance_ratio > 0.8,
            "expected high acceptance at high temp, got {acceptance_ratio}"
        );
    }
}
