//! Problem contract.
//!
//! A problem is described through [`Problem`]: initial state, applicable
//! actions, resulting states, transition cost/probability, and the goal test.
//! Everything else in the crate consumes only this contract.
//!
//! # Decorators
//!
//! - [`ClosedSet`]: cycle and duplicate suppression.
//! - [`crate::local::LocalRestriction`]: narrows applicable actions for local search.

mod closed;
mod heuristic;
mod types;

pub use closed::ClosedSet;
pub use heuristic::{
    AStarEvaluation, Evaluation, GreedyEvaluation, Heuristic, PathCost, WeightedEvaluation,
};
pub use types::{Problem, Transition};

use crate::error::SearchError;
use crate::node::Node;
use std::sync::Arc;

/// Node type produced when searching problem `P`.
pub type NodeOf<P> = Node<<P as Problem>::State, <P as Problem>::Action>;

/// Expands `parent`: one child per applicable action and resulting state,
/// in action order.
///
/// Each child's accumulated cost is the parent's plus the transition cost.
pub fn expand<P: Problem>(
    problem: &P,
    parent: &Arc<NodeOf<P>>,
) -> Result<Vec<NodeOf<P>>, SearchError> {
    let state = parent.state();
    let mut children = Vec::new();
    for action in problem.applicable_actions(state) {
        for next in problem.resulting_states(&action, state)? {
            let transition = problem.transition(&action, state, &next)?;
            children.push(Node::child(
                Arc::clone(parent),
                action.clone(),
                next,
                transition.cost,
            ));
        }
    }
    Ok(children)
}
