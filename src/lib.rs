//! Simulated annealing for the travelling salesman problem over
//! geographic points.
//!
//! The crate finds a low-cost closed tour over a fixed set of
//! `(latitude, longitude)` points, with one point pinned as the start:
//!
//! - **[`geo`]**: points and great-circle distance in kilometres
//!   ([`Haversine`], [`GreatCircle`]).
//! - **[`tsp`]**: tours, closed-loop cost evaluation, the anchored TSP
//!   problem and the [`run_annealing`] entry point.
//! - **[`sa`]**: the annealing engine: geometric cooling, Metropolis
//!   acceptance, incumbent tracking and the convergence [`Trace`].
//!
//! All randomness comes from a caller-supplied `rand::Rng`, so a seeded
//! generator reproduces a run bit for bit. Loading the points, drawing the
//! tour on a map and plotting the trace are left to the caller.
//!
//! # Example
//!
//! ```
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use tsp_anneal::{run_annealing, Point, Schedule};
//!
//! let cities = [
//!     Point::new(31.2304, 121.4737),
//!     Point::new(39.9042, 116.4074),
//!     Point::new(35.6762, 139.6503),
//!     Point::new(28.6139, 77.2090),
//! ];
//! let mut rng = StdRng::seed_from_u64(7);
//! let outcome = run_annealing(&cities, 0, &Schedule::default(), &mut rng)?;
//!
//! assert_eq!(outcome.best_tour[0], 0);
//! assert!(outcome.trace.is_non_increasing());
//! # Ok::<(), tsp_anneal::Error>(())
//! ```

pub mod error;
pub mod geo;
pub mod sa;
pub mod tsp;

pub use error::{Error, Result};
pub use geo::{GreatCircle, Haversine, Metric, Point};
pub use sa::{Schedule, Trace};
pub use tsp::{run_annealing, run_annealing_with, tour_cost, AnnealOutcome, Tour};
