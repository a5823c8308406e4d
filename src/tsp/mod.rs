//! Travelling salesman over geographic points with a pinned start.
//!
//! [`run_annealing`] is the entry point: it builds an [`AnchoredTsp`],
//! drives it through [`SaRunner`](crate::sa::SaRunner) and returns the
//! best tour, its cost and the convergence trace.
//!
//! Cost is always the closed cycle, including the edge from the last point
//! back to the anchor. Callers that draw the tour as an open path should
//! keep in mind that the drawn length is shorter than the optimized one.

mod problem;
mod restarts;
mod solve;
mod tour;

pub use problem::AnchoredTsp;
pub use restarts::{best_of, run_restarts};
pub use solve::{run_annealing, run_annealing_with, AnnealOutcome, RunStats};
pub use tour::{closed_cost, tour_cost, validate_permutation, Tour};
