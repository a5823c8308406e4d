//! Convergence trace.

/// Best-cost-so-far, one entry per annealing iteration.
///
/// Append-only while the run is in progress, read-only afterwards. The
/// engine never reads it back, so it has no influence on the search.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Trace(Vec<f64>);

impl Trace {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    pub(crate) fn record(&mut self, best_cost: f64) {
        self.0.push(best_cost);
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Final incumbent cost, if any iteration ran.
    pub fn last(&self) -> Option<f64> {
        self.0.last().copied()
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }

    /// Returns `true` when no entry is larger than its predecessor.
    pub fn is_non_increasing(&self) -> bool {
        self.0.windows(2).all(|w| w[1] <= w[0])
    }

    /// Iterations at which the incumbent strictly improved on the previous
    /// entry.
    pub fn improvements(&self) -> Vec<usize> {
        self.0
            .windows(2)
            .enumerate()
            .filter(|(_, w)| w[1] < w[0])
            .map(|(k, _)| k + 1)
            .collect()
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl From<Trace> for Vec<f64> {
    fn from(trace: Trace) -> Self {
        trace.0
    }
}
