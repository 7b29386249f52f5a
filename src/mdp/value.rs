//! Utility table and Bellman backups.

use crate::error::SearchError;
use crate::problem::{Heuristic, Problem};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// Slack allowed when checking that outcome probabilities sum to 1.
const PROBABILITY_TOLERANCE: f64 = 1e-9;

/// Slack allowed between the immediate costs reported for the outcomes of
/// one action.
const COST_TOLERANCE: f64 = 1e-9;

/// Expected cost-to-go U(s) for every state seen so far.
///
/// States never written read as the heuristic's estimate, so the table only
/// stores states that were actually backed up.
#[derive(Clone)]
pub struct UtilityTable<S, H> {
    values: HashMap<S, f64>,
    heuristic: H,
}

impl<S: fmt::Debug, H> fmt::Debug for UtilityTable<S, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UtilityTable")
            .field("values", &self.values)
            .finish_non_exhaustive()
    }
}

impl<S, H> UtilityTable<S, H>
where
    S: Eq + Hash,
    H: Heuristic<S>,
{
    pub fn new(heuristic: H) -> Self {
        Self {
            values: HashMap::new(),
            heuristic,
        }
    }

    /// U(state): the stored value, or the heuristic estimate if none.
    pub fn get(&self, state: &S) -> f64 {
        self.values
            .get(state)
            .copied()
            .unwrap_or_else(|| self.heuristic.estimate(state))
    }

    pub fn set(&mut self, state: S, value: f64) {
        self.values.insert(state, value);
    }

    /// Whether `state` has been backed up at least once.
    pub fn contains(&self, state: &S) -> bool {
        self.values.contains_key(state)
    }

    /// Number of stored states.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Q(s, a) = c(s, a) + γ · Σ P(s' | s, a) · U(s').
///
/// Goal states are absorbing: U(goal) = 0 whatever the table says.
///
/// # Panics
///
/// If the outcome probabilities of `action` do not sum to 1, or if its
/// outcomes report different immediate costs. Both mean the problem breaks
/// its contract.
pub fn action_value<P, H>(
    problem: &P,
    table: &UtilityTable<P::State, H>,
    discount: f64,
    action: &P::Action,
    state: &P::State,
) -> Result<f64, SearchError>
where
    P: Problem,
    P::State: Eq + Hash,
    H: Heuristic<P::State>,
{
    let mut immediate: Option<f64> = None;
    let mut total = 0.0;
    let mut expected = 0.0;

    for next in problem.resulting_states(action, state)? {
        let t = problem.transition(action, state, &next)?;
        match immediate {
            None => immediate = Some(t.cost),
            Some(cost) => assert!(
                (cost - t.cost).abs() <= COST_TOLERANCE,
                "inconsistent immediate cost for {action:?} in {state:?}: {cost} vs {}",
                t.cost
            ),
        }
        total += t.probability;
        if t.probability > 0.0 && !problem.is_solution(&next) {
            expected += t.probability * table.get(&next);
        }
    }

    assert!(
        (total - 1.0).abs() <= PROBABILITY_TOLERANCE,
        "outcome probabilities of {action:?} in {state:?} sum to {total}, not 1"
    );
    Ok(immediate.unwrap_or(0.0) + discount * expected)
}

/// π(s) = argmin_a Q(s, a), with ties going to the earliest applicable
/// action. `None` if no action is applicable.
pub fn greedy_action<P, H>(
    problem: &P,
    table: &UtilityTable<P::State, H>,
    discount: f64,
    state: &P::State,
) -> Result<Option<(P::Action, f64)>, SearchError>
where
    P: Problem,
    P::State: Eq + Hash,
    H: Heuristic<P::State>,
{
    let mut best: Option<(P::Action, f64)> = None;
    for action in problem.applicable_actions(state) {
        let q = action_value(problem, table, discount, &action, state)?;
        if best.as_ref().is_none_or(|(_, b)| q < *b) {
            best = Some((action, q));
        }
    }
    Ok(best)
}

/// Sets U(s) := min_a Q(s, a) in place and returns |ΔU|.
///
/// Goal states are pinned to 0. States without applicable actions keep
/// their current utility.
pub fn backup<P, H>(
    problem: &P,
    table: &mut UtilityTable<P::State, H>,
    discount: f64,
    state: &P::State,
) -> Result<f64, SearchError>
where
    P: Problem,
    P::State: Eq + Hash,
    H: Heuristic<P::State>,
{
    let old = table.get(state);
    let new = if problem.is_solution(state) {
        0.0
    } else {
        match greedy_action(problem, table, discount, state)? {
            Some((_, q)) => q,
            None => return Ok(0.0),
        }
    };
    table.set(state.clone(), new);
    Ok(if new == old { 0.0 } else { (new - old).abs() })
}
