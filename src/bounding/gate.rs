//! Pruning gates shared by the bounding algorithms.

use crate::node::Node;
use crate::problem::Evaluation;
use crate::traversal::Gate;

/// Whether `value` lies within `bound`.
///
/// Same as `value <= bound`, except that infinity is never within infinity:
/// a node with infinite f can never be admitted, so iterative algorithms
/// cannot loop forever on an unsolvable instance.
pub fn within_bound(value: f64, bound: f64) -> bool {
    if value.is_infinite() && bound.is_infinite() {
        return false;
    }
    value <= bound
}

/// Prunes nodes whose f exceeds a bound and remembers the smallest pruned f.
///
/// `have_pruned` only counts nodes some finite larger bound could admit;
/// nodes with infinite f are dropped silently.
#[derive(Debug, Clone)]
pub struct BoundGate<E> {
    evaluation: E,
    bound: f64,
    next_bound: Option<f64>,
    have_pruned: bool,
}

impl<E> BoundGate<E> {
    pub fn new(evaluation: E, bound: f64) -> Self {
        Self {
            evaluation,
            bound,
            next_bound: None,
            have_pruned: false,
        }
    }

    pub fn bound(&self) -> f64 {
        self.bound
    }

    /// Tightens or relaxes the bound for nodes selected from now on.
    pub fn set_bound(&mut self, bound: f64) {
        self.bound = bound;
    }

    /// Smallest f among nodes pruned so far.
    pub fn next_bound(&self) -> Option<f64> {
        self.next_bound
    }

    /// Whether any node was pruned during this sweep.
    pub fn have_pruned(&self) -> bool {
        self.have_pruned
    }

    pub fn evaluation(&self) -> &E {
        &self.evaluation
    }

    /// Whether `node` lies beyond the bound: `f(node) > bound`.
    pub fn is_out_of_bounds<S, A>(&self, node: &Node<S, A>) -> bool
    where
        E: Evaluation<S, A>,
    {
        !within_bound(self.evaluation.evaluate(node), self.bound)
    }
}

impl<S, A, E: Evaluation<S, A>> Gate<S, A> for BoundGate<E> {
    fn admit(&mut self, node: &Node<S, A>) -> bool {
        let f = self.evaluation.evaluate(node);
        if within_bound(f, self.bound) {
            return true;
        }
        if f.is_finite() {
            self.have_pruned = true;
            self.next_bound = Some(self.next_bound.map_or(f, |b| b.min(f)));
        }
        false
    }
}

/// Keeps only the first `breadth` successors of every node.
#[derive(Debug, Clone)]
pub struct BreadthGate {
    breadth: usize,
    have_pruned: bool,
}

impl BreadthGate {
    pub fn new(breadth: usize) -> Self {
        Self {
            breadth,
            have_pruned: false,
        }
    }

    pub fn breadth(&self) -> usize {
        self.breadth
    }

    /// Whether any node had more successors than the breadth allows.
    pub fn have_pruned(&self) -> bool {
        self.have_pruned
    }
}

impl<S, A> Gate<S, A> for BreadthGate {
    fn restrict(&mut self, children: &mut Vec<Node<S, A>>) -> usize {
        let dropped = children.len().saturating_sub(self.breadth);
        if dropped > 0 {
            self.have_pruned = true;
            children.truncate(self.breadth);
        }
        dropped
    }
}
