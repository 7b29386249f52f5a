//! Policies derived from a utility table.

use super::value::{action_value, greedy_action, UtilityTable};
use crate::error::SearchError;
use crate::problem::{Heuristic, Problem};
use std::hash::Hash;

/// A mapping from states to the action to take.
pub trait Policy<S, A> {
    /// The action for `state`, or `None` at goal states and dead ends.
    ///
    /// Takes `&mut self` so that online policies can refine their estimates
    /// on every call.
    fn action(&mut self, state: &S) -> Result<Option<A>, SearchError>;
}

/// Fixed greedy policy π(s) = argmin_a Q(s, a) over a converged table.
pub struct GreedyPolicy<'p, P: Problem, H> {
    problem: &'p P,
    table: UtilityTable<P::State, H>,
    discount: f64,
}

impl<'p, P, H> GreedyPolicy<'p, P, H>
where
    P: Problem,
    P::State: Eq + Hash,
    H: Heuristic<P::State>,
{
    pub fn new(problem: &'p P, table: UtilityTable<P::State, H>, discount: f64) -> Self {
        Self {
            problem,
            table,
            discount,
        }
    }

    /// U(state) under the table; 0 at goal states.
    pub fn utility(&self, state: &P::State) -> f64 {
        if self.problem.is_solution(state) {
            0.0
        } else {
            self.table.get(state)
        }
    }

    /// Q(state, action) under the table.
    pub fn q_value(&self, action: &P::Action, state: &P::State) -> Result<f64, SearchError> {
        action_value(self.problem, &self.table, self.discount, action, state)
    }

    pub fn table(&self) -> &UtilityTable<P::State, H> {
        &self.table
    }

    pub fn discount(&self) -> f64 {
        self.discount
    }
}

impl<P, H> Policy<P::State, P::Action> for GreedyPolicy<'_, P, H>
where
    P: Problem,
    P::State: Eq + Hash,
    H: Heuristic<P::State>,
{
    fn action(&mut self, state: &P::State) -> Result<Option<P::Action>, SearchError> {
        if self.problem.is_solution(state) {
            return Ok(None);
        }
        Ok(greedy_action(self.problem, &self.table, self.discount, state)?.map(|(a, _)| a))
    }
}
