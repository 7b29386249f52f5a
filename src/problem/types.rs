//! The problem contract consumed by every algorithm.

use crate::error::SearchError;
use std::fmt::Debug;

/// Outcome of applying an action in a state: its cost and, for stochastic
/// problems, the probability of reaching the given successor.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transition {
    /// Immediate cost. Must stay bounded away from zero for completeness
    /// guarantees on infinite graphs.
    pub cost: f64,
    /// Probability of this particular successor; 1.0 for deterministic moves.
    pub probability: f64,
}

impl Transition {
    /// A deterministic transition with the given cost.
    pub fn deterministic(cost: f64) -> Self {
        Self {
            cost,
            probability: 1.0,
        }
    }

    /// A stochastic transition: `cost` incurred, successor reached with
    /// probability `probability`.
    pub fn stochastic(cost: f64, probability: f64) -> Self {
        Self { cost, probability }
    }
}

/// Defines a state-space search or planning problem.
///
/// The user describes states, applicable actions, the states each action may
/// lead to, and the cost (and probability) of every transition. Algorithms
/// never inspect states beyond these methods.
///
/// # Contract
///
/// - [`resulting_states`](Problem::resulting_states) and
///   [`transition`](Problem::transition) must fail with
///   [`SearchError::InapplicableAction`] for an action outside
///   [`applicable_actions`](Problem::applicable_actions).
/// - Deterministic problems return exactly one resulting state.
/// - For stochastic problems the probabilities over all resulting states of
///   one action sum to 1, and every successor reports the same cost.
///
/// # Examples
///
/// ```
/// use u_plan::problem::{Problem, Transition};
/// use u_plan::SearchError;
///
/// /// Count from 0 up to a target using +1 and +2 steps.
/// struct Counter { target: u32 }
///
/// impl Problem for Counter {
///     type State = u32;
///     type Action = u32;
///
///     fn initial_state(&self) -> u32 { 0 }
///
///     fn applicable_actions(&self, s: &u32) -> Vec<u32> {
///         [1, 2].into_iter().filter(|d| s + d <= self.target).collect()
///     }
///
///     fn resulting_states(&self, a: &u32, s: &u32) -> Result<Vec<u32>, SearchError> {
///         if s + a > self.target {
///             return Err(SearchError::inapplicable(a, s));
///         }
///         Ok(vec![s + a])
///     }
///
///     fn transition(&self, a: &u32, s: &u32, _next: &u32) -> Result<Transition, SearchError> {
///         if s + a > self.target {
///             return Err(SearchError::inapplicable(a, s));
///         }
///         Ok(Transition::deterministic(1.0))
///     }
///
///     fn is_solution(&self, s: &u32) -> bool { *s == self.target }
/// }
/// ```
pub trait Problem {
    /// Problem state. Must be `Eq + Hash` where duplicate detection is used.
    type State: Clone + Debug;

    /// Operator applicable at a state.
    type Action: Clone + Debug;

    /// The state the search starts from.
    fn initial_state(&self) -> Self::State;

    /// Actions applicable in `state`, in the order algorithms should try them.
    fn applicable_actions(&self, state: &Self::State) -> Vec<Self::Action>;

    /// States `action` may lead to from `state`.
    fn resulting_states(
        &self,
        action: &Self::Action,
        state: &Self::State,
    ) -> Result<Vec<Self::State>, SearchError>;

    /// Cost (and probability) of moving from `state` to `next` via `action`.
    fn transition(
        &self,
        action: &Self::Action,
        state: &Self::State,
        next: &Self::State,
    ) -> Result<Transition, SearchError>;

    /// Whether `state` is a goal.
    fn is_solution(&self, state: &Self::State) -> bool;
}
