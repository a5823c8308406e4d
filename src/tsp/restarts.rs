//! Independent multi-start annealing.
//!
//! Each restart owns a `StdRng` seeded from its entry in `seeds`, so the
//! outcome of a restart does not depend on how many others run or on the
//! thread it lands on. With the `parallel` feature restarts are spread
//! over the rayon pool.

use rand::rngs::StdRng;
use rand::SeedableRng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::info;

use super::problem::AnchoredTsp;
use super::solve::{run_annealing_with, AnnealOutcome};
use crate::error::Result;
use crate::geo::{Metric, Point};
use crate::sa::Schedule;

/// Runs one annealing per seed and returns the outcomes in seed order.
///
/// Inputs are validated once up front, so a configuration error is
/// reported before any restart starts.
pub fn run_restarts<M: Metric>(
    points: &[Point],
    anchor_index: usize,
    schedule: &Schedule,
    metric: &M,
    seeds: &[u64],
) -> Result<Vec<AnnealOutcome>> {
    AnchoredTsp::new(points, anchor_index, metric)?;
    schedule.validate()?;

    let run = |&seed: &u64| {
        let mut rng = StdRng::seed_from_u64(seed);
        run_annealing_with(points, anchor_index, schedule, metric, &mut rng, None)
    };

    #[cfg(feature = "parallel")]
    let outcomes = seeds.par_iter().map(run).collect::<Result<Vec<_>>>()?;
    #[cfg(not(feature = "parallel"))]
    let outcomes = seeds.iter().map(run).collect::<Result<Vec<_>>>()?;

    if let Some(best) = best_of(&outcomes) {
        info!(
            restarts = outcomes.len(),
            best_cost = best.best_cost,
            "restarts finished"
        );
    }
    Ok(outcomes)
}

/// Lowest-cost outcome; the earliest one wins ties.
pub fn best_of(outcomes: &[AnnealOutcome]) -> Option<&AnnealOutcome> {
    outcomes
        .iter()
        .reduce(|best, next| if next.best_cost < best.best_cost { next } else { best })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Haversine;
    use crate::tsp::run_annealing;

    fn points() -> Vec<Point> {
        vec![
            Point::new(51.5074, -0.1278),
            Point::new(48.8566, 2.3522),
            Point::new(52.5200, 13.4050),
            Point::new(41.9028, 12.4964),
            Point::new(40.4168, -3.7038),
            Point::new(59.3293, 18.0686),
            Point::new(50.0755, 14.4378),
        ]
    }

    #[test]
    fn test_restarts_match_single_runs_in_seed_order() {
        let pts = points();
        let schedule = Schedule::new(500.0, 0.98);
        let seeds = [3, 1, 4, 1, 5];

        let outcomes = run_restarts(&pts, 2, &schedule, &Haversine, &seeds).unwrap();
        assert_eq!(outcomes.len(), seeds.len());

        for (outcome, &seed) in outcomes.iter().zip(&seeds) {
            let mut rng = StdRng::seed_from_u64(seed);
            let single = run_annealing(&pts, 2, &schedule, &mut rng).unwrap();
            assert_eq!(outcome.best_tour, single.best_tour);
            assert_eq!(outcome.best_cost.to_bits(), single.best_cost.to_bits());
            assert_eq!(outcome.trace, single.trace);
        }
    }

    #[test]
    fn test_best_of_picks_minimum() {
        let pts = points();
        let outcomes =
            run_restarts(&pts, 0, &Schedule::new(500.0, 0.98), &Haversine, &[10, 20, 30]).unwrap();

        let best = best_of(&outcomes).unwrap();
        assert!(outcomes.iter().all(|o| best.best_cost <= o.best_cost));
        assert!(best_of(&[]).is_none());
    }

    #[test]
    fn test_restarts_validate_before_running() {
        let pts = points();
        let err = run_restarts(&pts, 99, &Schedule::default(), &Haversine, &[1, 2]).unwrap_err();
        assert!(err.is_configuration());

        let err = run_restarts(&pts, 0, &Schedule::new(1.0, 2.0), &Haversine, &[1]).unwrap_err();
        assert!(err.is_configuration());
    }
}
