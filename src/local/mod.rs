//! Local optimizers: Hill Climbing, Simulated Annealing, Threshold Accepting.
//!
//! Each run walks a single trajectory through the state space, minimizing
//! an objective over states. Two pieces are shared:
//!
//! - [`LocalRestriction`] decorates a [`Problem`](crate::problem::Problem)
//!   so that only a few candidate actions are applicable at each state
//!   (a random sample, the best-scoring ones, or both).
//! - [`Acceptance`] decides whether to move to a candidate given
//!   `delta = f(candidate) - f(current)`.
//!
//! All three are Monte Carlo algorithms: neither completeness nor
//! optimality is guaranteed, see [`Probabilistic`].
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Dueck & Scheuer (1990), "Threshold Accepting: A General Purpose
//!   Optimization Algorithm Appearing Superior to Simulated Annealing"
//! - Lundy & Mees (1986), "Convergence of an Annealing Algorithm"

mod accept;
mod config;
mod restriction;
mod runner;

pub use accept::{metropolis, Acceptance};
pub use config::{CoolingSchedule, LocalConfig, LocalSelection, Schedule};
pub use restriction::LocalRestriction;
pub use runner::{
    HillClimbing, LocalResult, LocalSearch, Probabilistic, SimulatedAnnealing, ThresholdAccepting,
};
