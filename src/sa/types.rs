//! Core trait for Simulated Annealing.

use rand::Rng;

use crate::error::Result;

/// Defines a Simulated Annealing problem.
///
/// The problem supplies the starting solution, the cost function and the
/// neighbour move. [`SaRunner`](super::SaRunner) handles temperature,
/// the acceptance criterion and incumbent tracking.
///
/// # Minimization
///
/// SA minimizes the cost function. For maximization, negate the cost.
///
/// # References
///
/// Kirkpatrick et al. (1983), Cerny (1985)
pub trait SaProblem: Send + Sync {
    /// The solution representation type.
    type Solution: Clone + Send;

    /// Creates a random initial solution.
    fn initial_solution<R: Rng>(&self, rng: &mut R) -> Self::Solution;

    /// Computes the cost of a solution. Lower is better.
    ///
    /// Called on every proposal, so it may assume `solution` satisfies
    /// whatever [`SaProblem::check`] verifies.
    fn cost(&self, solution: &Self::Solution) -> f64;

    /// Generates a neighbor of the current solution.
    ///
    /// Returns a new value; the current solution is left untouched so that
    /// a rejected proposal can simply be dropped.
    fn neighbor<R: Rng>(&self, solution: &Self::Solution, rng: &mut R) -> Self::Solution;

    /// Structural check run once on the initial solution.
    ///
    /// Neighbor moves are expected to preserve whatever this verifies.
    fn check(&self, _solution: &Self::Solution) -> Result<()> {
        Ok(())
    }
}
