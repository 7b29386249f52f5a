//! Candidate restriction for local search.

use super::config::LocalSelection;
use crate::error::SearchError;
use crate::problem::{Heuristic, Problem, Transition};
use crate::random::sample_indices;
use rand::Rng;
use std::cell::{Cell, RefCell};

/// Narrows a problem's applicable actions to the candidates a local
/// optimizer considers at each state.
///
/// Selection follows [`LocalSelection`]: a uniform random sample, the
/// actions whose resulting state scores lowest under `objective`, or both.
/// Every other part of the contract is passed through unchanged.
///
/// An action is scored by the lowest objective value among its resulting
/// states.
pub struct LocalRestriction<'p, P, H, R> {
    inner: &'p P,
    objective: &'p H,
    selection: Cell<LocalSelection>,
    rng: RefCell<R>,
}

impl<'p, P, H, R> LocalRestriction<'p, P, H, R>
where
    P: Problem,
    H: Heuristic<P::State>,
    R: Rng,
{
    pub fn new(inner: &'p P, objective: &'p H, selection: LocalSelection, rng: R) -> Self {
        Self {
            inner,
            objective,
            selection: Cell::new(selection),
            rng: RefCell::new(rng),
        }
    }

    pub fn inner(&self) -> &'p P {
        self.inner
    }

    pub fn selection(&self) -> LocalSelection {
        self.selection.get()
    }

    /// Switches the restriction applied from the next expansion on.
    pub fn set_selection(&self, selection: LocalSelection) {
        self.selection.set(selection);
    }

    pub(super) fn selection_cell(&self) -> &Cell<LocalSelection> {
        &self.selection
    }

    /// The restricted candidate actions at `state`.
    pub fn candidates(&self, state: &P::State) -> Result<Vec<P::Action>, SearchError> {
        let actions = self.inner.applicable_actions(state);
        let mut rng = self.rng.borrow_mut();
        Ok(match self.selection.get() {
            LocalSelection::Random => self.sample(actions, 1, &mut *rng),
            LocalSelection::Sample(k) => self.sample(actions, k, &mut *rng),
            LocalSelection::Best => self.best(actions, state)?,
            LocalSelection::RandomBest => {
                let ties = self.best(actions, state)?;
                self.sample(ties, 1, &mut *rng)
            }
            LocalSelection::BestOfSample(k) => {
                let sampled = self.sample(actions, k, &mut *rng);
                let ties = self.best(sampled, state)?;
                self.sample(ties, 1, &mut *rng)
            }
        })
    }

    fn sample(&self, actions: Vec<P::Action>, k: usize, rng: &mut R) -> Vec<P::Action> {
        if k >= actions.len() {
            return actions;
        }
        let picked = sample_indices(actions.len(), k, rng);
        let mut picked = picked.into_iter().peekable();
        actions
            .into_iter()
            .enumerate()
            .filter_map(|(i, a)| {
                if picked.peek() == Some(&i) {
                    picked.next();
                    Some(a)
                } else {
                    None
                }
            })
            .collect()
    }

    fn best(
        &self,
        actions: Vec<P::Action>,
        state: &P::State,
    ) -> Result<Vec<P::Action>, SearchError> {
        let mut scored = Vec::with_capacity(actions.len());
        for action in actions {
            let score = self
                .inner
                .resulting_states(&action, state)?
                .iter()
                .map(|s| self.objective.estimate(s))
                .fold(f64::INFINITY, f64::min);
            scored.push((score, action));
        }
        let lowest = scored.iter().map(|(v, _)| *v).fold(f64::INFINITY, f64::min);
        Ok(scored
            .into_iter()
            .filter(|(v, _)| *v == lowest)
            .map(|(_, a)| a)
            .collect())
    }
}

impl<'p, P, H, R> Problem for LocalRestriction<'p, P, H, R>
where
    P: Problem,
    H: Heuristic<P::State>,
    R: Rng,
{
    type State = P::State;
    type Action = P::Action;

    fn initial_state(&self) -> P::State {
        self.inner.initial_state()
    }

    /// Falls back to the unrestricted actions if scoring a candidate fails;
    /// the offending action then reports its error when expanded.
    fn applicable_actions(&self, state: &P::State) -> Vec<P::Action> {
        match self.candidates(state) {
            Ok(actions) => actions,
            Err(e) => {
                log::warn!("local restriction: scoring failed ({e}), not restricting");
                self.inner.applicable_actions(state)
            }
        }
    }

    fn resulting_states(
        &self,
        action: &P::Action,
        state: &P::State,
    ) -> Result<Vec<P::State>, SearchError> {
        self.inner.resulting_states(action, state)
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
