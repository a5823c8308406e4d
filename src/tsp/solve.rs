//! Single-run entry point.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tracing::debug_span;

use super::problem::AnchoredTsp;
use super::tour::Tour;
use crate::error::Result;
use crate::geo::{Haversine, Metric, Point};
use crate::sa::{SaRunner, Schedule, Trace};

/// Counters and timings of a finished run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunStats {
    /// Cost of the shuffled starting tour.
    pub initial_cost: f64,
    /// Iterations executed (equals the trace length).
    pub iterations: usize,
    pub accepted_moves: usize,
    pub improving_moves: usize,
    /// Temperature when the loop stopped.
    pub final_temperature: f64,
    /// Whether the run was cancelled before freezing.
    pub cancelled: bool,
    pub elapsed: Duration,
}

/// What a run hands to its consumers: the incumbent tour, its cost and the
/// convergence trace.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnnealOutcome {
    /// Best tour found; starts with the anchor.
    pub best_tour: Tour,
    /// Closed-loop cost of `best_tour` in kilometres.
    pub best_cost: f64,
    /// Best cost after every iteration.
    pub trace: Trace,
    pub stats: RunStats,
}

/// Anneals a closed tour over `points` starting at `anchor_index`, using
/// haversine distances and drawing all randomness from `rng`.
///
/// # Errors
///
/// [`Error::Configuration`](crate::Error::Configuration) when there are
/// fewer than two points, the anchor is out of range, a coordinate is not
/// finite, or the schedule is invalid. Nothing runs in that case.
///
/// # Examples
///
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use tsp_anneal::{run_annealing, Point, Schedule};
///
/// let points = [
///     Point::new(0.0, 0.0),
///     Point::new(0.0, 1.0),
///     Point::new(1.0, 1.0),
///     Point::new(1.0, 0.0),
/// ];
/// let mut rng = StdRng::seed_from_u64(42);
/// let outcome = run_annealing(&points, 0, &Schedule::new(100.0, 0.99), &mut rng).unwrap();
///
/// assert_eq!(outcome.best_tour[0], 0);
/// assert_eq!(outcome.trace.len(), outcome.stats.iterations);
/// ```
pub fn run_annealing<R: Rng>(
    points: &[Point],
    anchor_index: usize,
    schedule: &Schedule,
    rng: &mut R,
) -> Result<AnnealOutcome> {
    run_annealing_with(points, anchor_index, schedule, Haversine, rng, None)
}

/// [`run_annealing`] with an explicit distance model and an optional
/// cancellation flag checked between iterations.
pub fn run_annealing_with<M: Metric, R: Rng>(
    points: &[Point],
    anchor_index: usize,
    schedule: &Schedule,
    metric: M,
    rng: &mut R,
    cancel: Option<Arc<AtomicBool>>,
) -> Result<AnnealOutcome> {
    let _span = debug_span!("anneal", n = points.len(), anchor = anchor_index).entered();

    let problem = AnchoredTsp::new(points, anchor_index, metric)?;
    let result = SaRunner::run_with_cancel(&problem, schedule, rng, cancel)?;

    Ok(AnnealOutcome {
        best_tour: result.best,
        best_cost: result.best_cost,
        trace: result.trace,
        stats: RunStats {
            initial_cost: result.initial_cost,
            iterations: result.iterations,
            accepted_moves: result.accepted_moves,
            improving_moves: result.improving_moves,
            final_temperature: result.final_temperature,
            cancelled: result.cancelled,
            elapsed: result.elapsed,
        },
    })
}
