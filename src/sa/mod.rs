//! Simulated Annealing (SA).
//!
//! A single-solution trajectory metaheuristic inspired by the physical
//! annealing process. Accepts worsening moves with a probability that
//! decreases over time (temperature), allowing the search to escape
//! local optima.
//!
//! This engine uses geometric cooling with one proposal per temperature
//! step and the Metropolis acceptance rule.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Cerny (1985), "Thermodynamical Approach to the Travelling Salesman Problem"

mod config;
mod runner;
mod trace;
mod types;

pub use config::{Schedule, FROZEN_TEMPERATURE};
pub use runner::{SaResult, SaRunner};
pub use trace::Trace;
pub use types::SaProblem;
