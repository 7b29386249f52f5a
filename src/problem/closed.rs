//! Duplicate suppression around a [`Problem`].
//!
//! [`ClosedSet`] remembers every state it has handed out (the union of the
//! open and closed sets) and hides already-discovered states from
//! `resulting_states`. Wrapping a cyclic problem with it makes depth-first
//! search visit each reachable state at most once.
//!
//! Every search starts from [`Problem::initial_state`], so that call forgets
//! the states of the previous run. Iterative algorithms that restart from
//! the initial state on each sweep therefore see a fresh set every sweep.
//!
//! The first path to reach a state wins. Under best-first search with an
//! inconsistent heuristic this can cost optimality; tree searches on
//! acyclic problems do not need the decorator at all.

use super::types::{Problem, Transition};
use crate::error::SearchError;
use std::cell::RefCell;
use std::collections::HashSet;
use std::hash::Hash;

/// Cycle and duplicate suppression decorator.
#[derive(Debug)]
pub struct ClosedSet<P: Problem> {
    inner: P,
    discovered: RefCell<HashSet<P::State>>,
}

impl<P> ClosedSet<P>
where
    P: Problem,
    P::State: Eq + Hash,
{
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            discovered: RefCell::new(HashSet::new()),
        }
    }

    /// Forgets every discovered state so the decorator can serve a new sweep.
    pub fn reset(&self) {
        self.discovered.borrow_mut().clear();
    }

    /// Number of distinct states handed out so far.
    pub fn discovered(&self) -> usize {
        self.discovered.borrow().len()
    }

    /// Whether `state` has already been handed out.
    pub fn contains(&self, state: &P::State) -> bool {
        self.discovered.borrow().contains(state)
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    pub fn into_inner(self) -> P {
        self.inner
    }
}

impl<P> Problem for ClosedSet<P>
where
    P: Problem,
    P::State: Eq + Hash,
{
    type State = P::State;
    type Action = P::Action;

    fn initial_state(&self) -> P::State {
        let state = self.inner.initial_state();
        let mut discovered = self.discovered.borrow_mut();
        discovered.clear();
        discovered.insert(state.clone());
        state
    }

    fn applicable_actions(&self, state: &P::State) -> Vec<P::Action> {
        self.inner.applicable_actions(state)
    }

    fn resulting_states(
        &self,
        action: &P::Action,
        state: &P::State,
    ) -> Result<Vec<P::State>, SearchError> {
        let states = self.inner.resulting_states(action, state)?;
        let mut discovered = self.discovered.borrow_mut();
        Ok(states
            .into_iter()
            .filter(|s| discovered.insert(s.clone()))
            .collect())
    }

    fn transition(
        &self,
        action: &P::Action,
        state: &P::State,
        next: &P::State,
    ) -> Result<Transition, SearchError> {
        self.inner.transition(action, state, next)
    }

    fn is_solution(&self, state: &P::State) -> bool {
        self.inner.is_solution(state)
    }
}
