//! Dynamic programming for Markov decision processes.
//!
//! Stochastic problems report several resulting states per action, each
//! with a [`Transition`](crate::problem::Transition) probability. The
//! solvers here minimize expected discounted cost to a goal:
//!
//! - [`GaussSeidel`]: in-place value iteration over an explicit state set,
//!   returning a [`GreedyPolicy`] once the largest change per sweep drops
//!   below the tolerance.
//! - [`Rtdp`]: online; an [`RtdpPolicy`] backs up each state it is asked
//!   about and is refined by simulated trials.
//!
//! Both share the Bellman backup U(s) := min_a Q(s, a) with
//! Q(s, a) = c(s, a) + γ · Σ P(s' | s, a) · U(s'), see [`action_value`].

mod config;
mod gauss_seidel;
mod policy;
mod rtdp;
mod value;

pub use config::DpConfig;
pub use gauss_seidel::{DpResult, GaussSeidel};
pub use policy::{GreedyPolicy, Policy};
pub use rtdp::{Rtdp, RtdpPolicy, Trial};
pub use value::{action_value, backup, greedy_action, UtilityTable};
