//! Gauss-Seidel value iteration.
//!
//! # Algorithm
//!
//! 1. U := heuristic on every state
//! 2. Sweep the state set in order; for each state set
//!    U(s) := min_a Q(s, a), reading values already updated in this sweep
//! 3. δ := largest |ΔU| of the sweep
//! 4. δ < tolerance: stop; otherwise go to 2
//!
//! The result is the greedy policy over the converged table.

use super::config::DpConfig;
use super::policy::GreedyPolicy;
use super::value::{backup, UtilityTable};
use crate::error::SearchError;
use crate::problem::{Heuristic, Problem};
use std::hash::Hash;

/// Convergence report of a Gauss-Seidel run.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DpResult {
    /// Sweeps performed.
    pub sweeps: usize,
    /// Largest change in the last sweep.
    pub residual: f64,
    /// Whether the residual fell below the tolerance (false if the sweep cap
    /// stopped the run).
    pub converged: bool,
}

/// In-place value iteration over an explicit, finite state set.
#[derive(Debug, Clone)]
pub struct GaussSeidel<S, H> {
    states: Vec<S>,
    heuristic: H,
    config: DpConfig,
}

impl<S, H> GaussSeidel<S, H> {
    /// Sweeps `states` in the given order, starting from `heuristic`.
    pub fn new(states: Vec<S>, heuristic: H) -> Self {
        Self {
            states,
            heuristic,
            config: DpConfig::default(),
        }
    }

    pub fn with_config(mut self, config: DpConfig) -> Self {
        self.config = config;
        self
    }

    pub fn states(&self) -> &[S] {
        &self.states
    }
}

impl<S, H> GaussSeidel<S, H>
where
    S: Clone + Eq + Hash,
    H: Heuristic<S> + Clone,
{
    /// Iterates to convergence and returns the report and the greedy policy.
    ///
    /// # Panics
    ///
    /// If the problem reports probabilities that do not sum to 1 or
    /// inconsistent immediate costs (see
    /// [`action_value`](super::action_value)).
    pub fn solve<'p, P>(
        &self,
        problem: &'p P,
    ) -> Result<(DpResult, GreedyPolicy<'p, P, H>), SearchError>
    where
        P: Problem<State = S>,
    {
        self.config.validate()?;

        let discount = self.config.discount;
        let mut table = UtilityTable::new(self.heuristic.clone());
        let mut sweeps = 0;
        let mut residual = f64::INFINITY;
        let mut converged = false;

        loop {
            if self.config.max_sweeps > 0 && sweeps >= self.config.max_sweeps {
                log::warn!(
                    "gauss-seidel: no convergence after {sweeps} sweeps, residual {residual}"
                );
                break;
            }

            let mut delta = 0.0f64;
            for state in &self.states {
                delta = delta.max(backup(problem, &mut table, discount, state)?);
            }
            sweeps += 1;
            residual = delta;
            log::debug!("gauss-seidel: sweep {sweeps}, residual {residual}");

            if residual < self.config.tolerance {
                converged = true;
                break;
            }
        }

        Ok((
            DpResult {
                sweeps,
                residual,
                converged,
            },
            GreedyPolicy::new(problem, table, discount),
        ))
    }
}
