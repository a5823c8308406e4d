//! Tour representation and closed-loop cost evaluation.

use std::ops::Deref;

use crate::error::{Error, Result};
use crate::geo::{Metric, Point};

/// A visiting order: a permutation of the point indices `0..n`.
///
/// Position 0 holds the anchor. The tour is a closed cycle, so the edge
/// from the last position back to position 0 is part of its cost.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Tour(Vec<usize>);

impl Tour {
    /// Wraps an index sequence without validating it.
    ///
    /// Use [`validate_permutation`] or [`tour_cost`] to check it.
    pub fn new(order: Vec<usize>) -> Self {
        Self(order)
    }

    /// Index of the point at position 0, if any.
    pub fn anchor(&self) -> Option<usize> {
        self.0.first().copied()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<usize> {
        self.0
    }

    /// Exchanges the points at positions `i` and `j`.
    ///
    /// # Panics
    ///
    /// Panics if either position is out of bounds.
    pub fn swap(&mut self, i: usize, j: usize) {
        self.0.swap(i, j);
    }
}

impl Deref for Tour {
    type Target = [usize];

    fn deref(&self) -> &[usize] {
        &self.0
    }
}

impl From<Vec<usize>> for Tour {
    fn from(order: Vec<usize>) -> Self {
        Self(order)
    }
}

impl From<Tour> for Vec<usize> {
    fn from(tour: Tour) -> Self {
        tour.0
    }
}

/// Checks that `tour` is a permutation of `0..n` with `n >= 2`.
pub fn validate_permutation(tour: &[usize], n: usize) -> Result<()> {
    if n < 2 {
        return Err(Error::invalid_tour(format!(
            "a tour needs at least 2 points, got {n}"
        )));
    }
    if tour.len() != n {
        return Err(Error::invalid_tour(format!(
            "tour has {} positions but there are {n} points",
            tour.len()
        )));
    }

    let mut seen = vec![false; n];
    for &index in tour {
        match seen.get_mut(index) {
            None => {
                return Err(Error::invalid_tour(format!(
                    "index {index} is out of range for {n} points"
                )));
            }
            Some(true) => {
                return Err(Error::invalid_tour(format!("index {index} appears twice")));
            }
            Some(slot) => *slot = true,
        }
    }
    Ok(())
}

/// Total closed-loop cost of `tour` over `points`.
///
/// Validates the tour first and fails with [`Error::InvalidTour`] if it is
/// not a permutation of `0..points.len()`.
pub fn tour_cost<M: Metric>(tour: &[usize], points: &[Point], metric: &M) -> Result<f64> {
    validate_permutation(tour, points.len())?;
    Ok(closed_cost(tour, points, metric))
}

/// Closed-loop cost without validation.
///
/// # Panics
///
/// Panics if an index in `tour` is out of range for `points`.
pub fn closed_cost<M: Metric>(tour: &[usize], points: &[Point], metric: &M) -> f64 {
    let n = tour.len();
    (0..n)
        .map(|i| metric.distance(points[tour[i]], points[tour[(i + 1) % n]]))
        .sum()
}
