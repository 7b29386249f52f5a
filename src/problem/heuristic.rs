//! Heuristics and node evaluation functions.
//!
//! A [`Heuristic`] estimates the remaining cost from a state; an
//! [`Evaluation`] turns a node into the scalar f used to order expansion
//! and to prune against a bound.
//!
//! | Evaluation | f(n) |
//! |------------|------|
//! | [`PathCost`] | g(n) |
//! | [`AStarEvaluation`] | g(n) + h(n) |
//! | [`WeightedEvaluation`] | g(n) + W·h(n) |
//! | [`GreedyEvaluation`] | h(n) |

use crate::node::Node;

/// Estimate of the remaining cost from a state to a goal.
///
/// Admissible if it never overestimates the true remaining cost; A*, IDA*
/// and branch-and-bound are optimal only under admissible heuristics.
///
/// Any `Fn(&S) -> f64` is a heuristic.
pub trait Heuristic<S> {
    /// Estimated cost from `state` to the nearest goal.
    fn estimate(&self, state: &S) -> f64;
}

impl<S, F> Heuristic<S> for F
where
    F: Fn(&S) -> f64,
{
    fn estimate(&self, state: &S) -> f64 {
        self(state)
    }
}

/// Scalar evaluation f of a search node. Lower is better.
///
/// Any `Fn(&Node<S, A>) -> f64` is an evaluation.
pub trait Evaluation<S, A> {
    /// The node's f-value.
    fn evaluate(&self, node: &Node<S, A>) -> f64;
}

impl<S, A, F> Evaluation<S, A> for F
where
    F: Fn(&Node<S, A>) -> f64,
{
    fn evaluate(&self, node: &Node<S, A>) -> f64 {
        self(node)
    }
}

/// f = g. Used by blind searches and iterative deepening.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathCost;

impl<S, A> Evaluation<S, A> for PathCost {
    fn evaluate(&self, node: &Node<S, A>) -> f64 {
        node.cost()
    }
}

/// f = g + h.
#[derive(Debug, Clone, Copy)]
pub struct AStarEvaluation<H> {
    heuristic: H,
}

impl<H> AStarEvaluation<H> {
    pub fn new(heuristic: H) -> Self {
        Self { heuristic }
    }

    pub fn heuristic(&self) -> &H {
        &self.heuristic
    }
}

impl<S, A, H: Heuristic<S>> Evaluation<S, A> for AStarEvaluation<H> {
    fn evaluate(&self, node: &Node<S, A>) -> f64 {
        node.cost() + self.heuristic.estimate(node.state())
    }
}

/// f = g + W·h with W ≥ 1.
///
/// The weight is not checked here; algorithms that take a weight validate
/// it before building the evaluation.
#[derive(Debug, Clone, Copy)]
pub struct WeightedEvaluation<H> {
    heuristic: H,
    weight: f64,
}

impl<H> WeightedEvaluation<H> {
    pub fn new(heuristic: H, weight: f64) -> Self {
        Self { heuristic, weight }
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }
}

impl<S, A, H: Heuristic<S>> Evaluation<S, A> for WeightedEvaluation<H> {
    fn evaluate(&self, node: &Node<S, A>) -> f64 {
        node.cost() + self.weight * self.heuristic.estimate(node.state())
    }
}

/// f = h, ignoring the cost so far (greedy best-first).
#[derive(Debug, Clone, Copy)]
pub struct GreedyEvaluation<H> {
    heuristic: H,
}

impl<H> GreedyEvaluation<H> {
    pub fn new(heuristic: H) -> Self {
        Self { heuristic }
    }
}

impl<S, A, H: Heuristic<S>> Evaluation<S, A> for GreedyEvaluation<H> {
    fn evaluate(&self, node: &Node<S, A>) -> f64 {
        self.heuristic.estimate(node.state())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn sample_node() -> Node<i32, ()> {
        let root = Arc::new(Node::root(10));
        Node::child(root, (), 7, 3.0)
    }

    fn remaining(s: &i32) -> f64 {
        *s as f64
    }

    #[test]
    fn test_evaluations() {
        let node = sample_node();

        assert!((PathCost.evaluate(&node) - 3.0).abs() < 1e-12);
        assert!((AStarEvaluation::new(remaining).evaluate(&node) - 10.0).abs() < 1e-12);
        assert!((WeightedEvaluation::new(remaining, 2.0).evaluate(&node) - 17.0).abs() < 1e-12);
        assert!((GreedyEvaluation::new(remaining).evaluate(&node) - 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_closure_evaluation() {
        let node = sample_node();
        let depth_eval = |n: &Node<i32, ()>| n.depth() as f64;
        assert!((depth_eval.evaluate(&node) - 1.0).abs() < 1e-12);
    }
}
