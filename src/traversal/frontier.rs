//! Open-set orderings.

use crate::node::Node;
use crate::problem::Evaluation;
use std::collections::VecDeque;

/// The open set of a traversal: nodes generated but not yet returned.
///
/// The ordering decides the search strategy: FIFO gives breadth-first,
/// LIFO depth-first, sorted-by-f best-first.
pub trait Frontier<S, A> {
    /// Whether no node is waiting.
    fn is_empty(&self) -> bool;

    /// Number of waiting nodes.
    fn len(&self) -> usize;

    /// Removes and returns the next node in this ordering.
    fn select(&mut self) -> Option<Node<S, A>>;

    /// Merges freshly expanded nodes into the open set, keeping their
    /// relative (action) order. Returns whether the set changed.
    fn add(&mut self, nodes: Vec<Node<S, A>>) -> bool;
}

/// First-in first-out open set (breadth-first).
#[derive(Debug)]
pub struct FifoFrontier<S, A> {
    queue: VecDeque<Node<S, A>>,
}

impl<S, A> FifoFrontier<S, A> {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }
}

impl<S, A> Default for FifoFrontier<S, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, A> Frontier<S, A> for FifoFrontier<S, A> {
    fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    fn len(&self) -> usize {
        self.queue.len()
    }

    fn select(&mut self) -> Option<Node<S, A>> {
        self.queue.pop_front()
    }

    fn add(&mut self, nodes: Vec<Node<S, A>>) -> bool {
        let changed = !nodes.is_empty();
        self.queue.extend(nodes);
        changed
    }
}

/// Last-in first-out open set (depth-first).
///
/// Siblings are pushed in reverse so the first action is explored first.
#[derive(Debug)]
pub struct LifoFrontier<S, A> {
    stack: Vec<Node<S, A>>,
}

impl<S, A> LifoFrontier<S, A> {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }
}

impl<S, A> Default for LifoFrontier<S, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, A> Frontier<S, A> for LifoFrontier<S, A> {
    fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    fn len(&self) -> usize {
        self.stack.len()
    }

    fn select(&mut self) -> Option<Node<S, A>> {
        self.stack.pop()
    }

    fn add(&mut self, nodes: Vec<Node<S, A>>) -> bool {
        let changed = !nodes.is_empty();
        self.stack.extend(nodes.into_iter().rev());
        changed
    }
}

/// Open set kept sorted by ascending f (best-first).
///
/// New nodes are stably sorted by f and merged into the existing list.
/// On equal f the node already waiting comes first, and siblings keep their
/// action order, so ties resolve by list order rather than at random.
pub struct SortedFrontier<S, A, E> {
    evaluation: E,
    list: VecDeque<(f64, Node<S, A>)>,
}

impl<S, A, E: Evaluation<S, A>> SortedFrontier<S, A, E> {
    pub fn new(evaluation: E) -> Self {
        Self {
            evaluation,
            list: VecDeque::new(),
        }
    }

    pub fn evaluation(&self) -> &E {
        &self.evaluation
    }

    /// f-value of the node that [`select`](Frontier::select) would return.
    pub fn peek_value(&self) -> Option<f64> {
        self.list.front().map(|(f, _)| *f)
    }

    fn is_sorted(&self) -> bool {
        self.list
            .iter()
            .zip(self.list.iter().skip(1))
            .all(|(a, b)| a.0 <= b.0)
    }
}

impl<S, A, E: Evaluation<S, A>> Frontier<S, A> for SortedFrontier<S, A, E> {
    fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    fn len(&self) -> usize {
        self.list.len()
    }

    fn select(&mut self) -> Option<Node<S, A>> {
        self.list.pop_front().map(|(_, node)| node)
    }

    fn add(&mut self, nodes: Vec<Node<S, A>>) -> bool {
        if nodes.is_empty() {
            return false;
        }

        let mut fresh: Vec<(f64, Node<S, A>)> = nodes
            .into_iter()
            .map(|n| {
                let f = self.evaluation.evaluate(&n);
                assert!(!f.is_nan(), "evaluation returned NaN");
                (f, n)
            })
            .collect();
        fresh.sort_by(|a, b| a.0.total_cmp(&b.0));

        let old = std::mem::take(&mut self.list);
        let mut merged = VecDeque::with_capacity(old.len() + fresh.len());
        let mut old = old.into_iter().peekable();
        let mut fresh = fresh.into_iter().peekable();
        loop {
            let take_old = match (old.peek(), fresh.peek()) {
                (Some(o), Some(f)) => o.0 <= f.0,
                (Some(_), None) => true,
                (None, Some(_)) => false,
                (None, None) => break,
            };
            let next = if take_old { old.next() } else { fresh.next() };
            merged.extend(next);
        }
        self.list = merged;

        debug_assert!(self.is_sorted(), "open set lost its ordering");
        true
    }
}
