//! TSP with a pinned starting point, as an SA problem.

use rand::seq::SliceRandom;
use rand::Rng;

use super::tour::{closed_cost, tour_cost, validate_permutation, Tour};
use crate::error::{Error, Result};
use crate::geo::{Haversine, Metric, Point};
use crate::sa::SaProblem;

/// Closed-tour TSP over `points` where `anchor` stays at position 0.
///
/// Neighbours swap two positions other than 0, so every tour the engine
/// produces is a permutation beginning with the anchor.
#[derive(Debug, Clone)]
pub struct AnchoredTsp<'a, M = Haversine> {
    points: &'a [Point],
    anchor: usize,
    metric: M,
}

impl<'a> AnchoredTsp<'a, Haversine> {
    /// Problem over `points` measured with [`Haversine`].
    pub fn haversine(points: &'a [Point], anchor: usize) -> Result<Self> {
        Self::new(points, anchor, Haversine)
    }
}

impl<'a, M: Metric> AnchoredTsp<'a, M> {
    /// Validates the inputs and builds the problem.
    ///
    /// Fails with [`Error::Configuration`] for fewer than two points, an
    /// out-of-range anchor, or a non-finite coordinate.
    pub fn new(points: &'a [Point], anchor: usize, metric: M) -> Result<Self> {
        let n = points.len();
        if n < 2 {
            return Err(Error::configuration(format!(
                "at least 2 points are required, got {n}"
            )));
        }
        if anchor >= n {
            return Err(Error::configuration(format!(
                "anchor index {anchor} is out of range for {n} points"
            )));
        }
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(Error::configuration(format!(
                "point {index} has a non-finite coordinate"
            )));
        }
        Ok(Self {
            points,
            anchor,
            metric,
        })
    }

    pub fn points(&self) -> &'a [Point] {
        self.points
    }

    pub fn anchor(&self) -> usize {
        self.anchor
    }

    pub fn metric(&self) -> &M {
        &self.metric
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Validated closed-loop cost of an arbitrary tour over this point set.
    pub fn tour_cost(&self, tour: &[usize]) -> Result<f64> {
        tour_cost(tour, self.points, &self.metric)
    }
}

impl<M: Metric> SaProblem for AnchoredTsp<'_, M> {
    type Solution = Tour;

    fn initial_solution<R: Rng>(&self, rng: &mut R) -> Tour {
        let mut rest: Vec<usize> = (0..self.len()).filter(|&i| i != self.anchor).collect();
        rest.shuffle(rng);

        let mut order = Vec::with_capacity(self.len());
        order.push(self.anchor);
        order.extend(rest);
        Tour::new(order)
    }

    fn cost(&self, tour: &Tour) -> f64 {
        closed_cost(tour, self.points, &self.metric)
    }

    fn neighbor<R: Rng>(&self, tour: &Tour, rng: &mut R) -> Tour {
        let n = tour.len();
        let mut next = tour.clone();
        // positions 1..n are movable; a single movable position has no swap
        if n >= 3 {
            let i = rng.random_range(1..n);
            let mut j = rng.random_range(1..n - 1);
            if j >= i {
                j += 1;
            }
            next.swap(i, j);
        }
        next
    }

    fn check(&self, tour: &Tour) -> Result<()> {
        validate_permutation(tour, self.len())?;
        match tour.anchor() {
            Some(first) if first == self.anchor => Ok(()),
            first => Err(Error::invalid_tour(format!(
                "tour starts at {first:?}, expected anchor {}",
                self.anchor
            ))),
        }
    }
}
