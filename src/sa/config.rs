//! Annealing schedule.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::{Error, Result};

/// Temperature below which the system is considered frozen.
///
/// At this point `exp(-Δ / T)` underflows for any realistic cost delta.
pub const FROZEN_TEMPERATURE: f64 = 1e-10;

/// Geometric cooling schedule: `T_{k+1} = cooling_rate * T_k`.
///
/// One neighbour is proposed per temperature step; the run stops once the
/// temperature is no longer above `frozen_temperature`.
///
/// # Examples
///
/// ```
/// use tsp_anneal::sa::Schedule;
///
/// let schedule = Schedule::new(100.0, 0.5).with_seed(42);
/// assert!(schedule.validate().is_ok());
/// assert_eq!(schedule.iteration_count(), 40);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Schedule {
    /// Starting temperature. Must be positive and finite.
    pub initial_temperature: f64,

    /// Cooling factor in (0, 1). Higher = slower cooling, more iterations.
    pub cooling_rate: f64,

    /// Frozen-state threshold `ε`.
    pub frozen_temperature: f64,

    /// Random seed used by [`Schedule::rng`].
    pub seed: Option<u64>,
}

impl Default for Schedule {
    fn default() -> Self {
        Self {
            initial_temperature: 10_000.0,
            cooling_rate: 0.995,
            frozen_temperature: FROZEN_TEMPERATURE,
            seed: None,
        }
    }
}

impl Schedule {
    pub fn new(initial_temperature: f64, cooling_rate: f64) -> Self {
        Self {
            initial_temperature,
            cooling_rate,
            ..Self::default()
        }
    }

    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_cooling_rate(mut self, rate: f64) -> Self {
        self.cooling_rate = rate;
        self
    }

    pub fn with_frozen_temperature(mut self, t: f64) -> Self {
        self.frozen_temperature = t;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the schedule.
    pub fn validate(&self) -> Result<()> {
        if !(self.initial_temperature.is_finite() && self.initial_temperature > 0.0) {
            return Err(Error::configuration(format!(
                "initial_temperature must be positive and finite, got {}",
                self.initial_temperature
            )));
        }
        if !(self.cooling_rate > 0.0 && self.cooling_rate < 1.0) {
            return Err(Error::configuration(format!(
                "cooling_rate must be in (0, 1), got {}",
                self.cooling_rate
            )));
        }
        if !(self.frozen_temperature.is_finite() && self.frozen_temperature > 0.0) {
            return Err(Error::configuration(format!(
                "frozen_temperature must be positive and finite, got {}",
                self.frozen_temperature
            )));
        }
        Ok(())
    }

    /// Number of iterations the schedule runs for:
    /// `ceil(ln(ε / T0) / ln(cooling_rate))`, or 0 when `T0 <= ε`.
    ///
    /// The engine itself stops on the float comparison `T > ε`; both agree
    /// up to rounding at the boundary.
    pub fn iteration_count(&self) -> usize {
        if self.initial_temperature <= self.frozen_temperature {
            return 0;
        }
        let steps = (self.frozen_temperature / self.initial_temperature).ln()
            / self.cooling_rate.ln();
        steps.ceil() as usize
    }

    /// Random source for this schedule: seeded when [`Schedule::seed`] is
    /// set, from OS entropy otherwise.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}
