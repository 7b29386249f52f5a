//! The resumable traversal and the fixed solve loop.

use super::frontier::Frontier;
use crate::error::SearchError;
use crate::node::Node;
use crate::problem::{expand, NodeOf, Problem};
use std::collections::HashSet;
use std::hash::Hash;
use std::sync::Arc;

/// Counters collected while traversing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// Nodes whose successors were computed.
    pub expanded: usize,
    /// Successors produced by expansion.
    pub generated: usize,
    /// Nodes discarded by the gate: beyond the bound, over the breadth
    /// limit, or already expanded.
    pub pruned: usize,
    /// Completed sweeps of an iterative algorithm (1 for single-pass searches).
    pub sweeps: usize,
}

impl SearchStats {
    /// Adds another sweep's counters to these.
    pub fn absorb(&mut self, other: &SearchStats) {
        self.expanded += other.expanded;
        self.generated += other.generated;
        self.pruned += other.pruned;
        self.sweeps += other.sweeps;
    }
}

/// Admission policy applied between the open set and the caller.
///
/// Blind and best-first searches use [`Open`], which admits everything.
/// Bounding algorithms plug in gates that prune nodes beyond a bound or cut
/// the number of successors per node.
pub trait Gate<S, A> {
    /// Whether a node leaving the open set may be returned and expanded.
    ///
    /// Called at selection time, so a bound tightened after the node was
    /// generated still applies.
    fn admit(&mut self, _node: &Node<S, A>) -> bool {
        true
    }

    /// May drop successors of a freshly expanded node before they enter the
    /// open set. Returns the number of successors dropped.
    fn restrict(&mut self, _children: &mut Vec<Node<S, A>>) -> usize {
        0
    }
}

/// The gate that admits every node.
#[derive(Debug, Clone, Copy, Default)]
pub struct Open;

impl<S, A> Gate<S, A> for Open {}

/// Graph-search gate: a state is expanded at most once.
///
/// Later nodes for an already expanded state are discarded when they leave
/// the open set. With a best-first order and a consistent heuristic the
/// first expansion of every state is along a cheapest path.
#[derive(Debug, Clone)]
pub struct Explored<S> {
    closed: HashSet<S>,
}

impl<S> Explored<S> {
    pub fn new() -> Self {
        Self {
            closed: HashSet::new(),
        }
    }

    /// Number of distinct states admitted so far.
    pub fn len(&self) -> usize {
        self.closed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.closed.is_empty()
    }
}

impl<S> Default for Explored<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Clone + Eq + Hash, A> Gate<S, A> for Explored<S> {
    fn admit(&mut self, node: &Node<S, A>) -> bool {
        self.closed.insert(node.state().clone())
    }
}

enum Phase<N> {
    /// A node was returned and its successors have not been computed yet.
    Pending(Arc<N>),
    /// Nothing pending; the next call selects straight from the open set.
    Ready,
    /// The open set ran dry. Terminal.
    Exhausted,
}

/// A resumable generator over search nodes.
///
/// [`advance`](Traversal::advance) first expands the node it returned last
/// time (lazily, exactly once) and then selects the next node from the
/// open set. [`remove`](Traversal::remove) drops the last returned node
/// from expansion. Once the open set is empty the traversal is exhausted
/// for good.
pub struct Traversal<'p, P: Problem, F, G = Open> {
    problem: &'p P,
    frontier: F,
    gate: G,
    phase: Phase<NodeOf<P>>,
    stats: SearchStats,
}

impl<'p, P, F, G> Traversal<'p, P, F, G>
where
    P: Problem,
    F: Frontier<P::State, P::Action>,
    G: Gate<P::State, P::Action>,
{
    /// Starts a traversal at the problem's initial state.
    pub fn new(problem: &'p P, frontier: F, gate: G) -> Self {
        Self::from_root(problem, frontier, gate, Node::root(problem.initial_state()))
    }

    /// Starts a traversal at an arbitrary node.
    pub fn from_root(problem: &'p P, mut frontier: F, gate: G, root: NodeOf<P>) -> Self {
        frontier.add(vec![root]);
        Self {
            problem,
            frontier,
            gate,
            phase: Phase::Ready,
            stats: SearchStats {
                sweeps: 1,
                ..SearchStats::default()
            },
        }
    }

    /// Returns the next node in traversal order, or `None` once exhausted.
    pub fn advance(&mut self) -> Result<Option<Arc<NodeOf<P>>>, SearchError> {
        match std::mem::replace(&mut self.phase, Phase::Ready) {
            Phase::Exhausted => {
                self.phase = Phase::Exhausted;
                return Ok(None);
            }
            Phase::Pending(node) => {
                if let Err(e) = self.expand(&node) {
                    self.phase = Phase::Exhausted;
                    return Err(e);
                }
            }
            Phase::Ready => {}
        }

        while let Some(node) = self.frontier.select() {
            if !self.gate.admit(&node) {
                self.stats.pruned += 1;
                continue;
            }
            let node = Arc::new(node);
            self.phase = Phase::Pending(Arc::clone(&node));
            return Ok(Some(node));
        }

        self.phase = Phase::Exhausted;
        Ok(None)
    }

    /// Excludes the most recently returned node from expansion.
    ///
    /// Returns `false` if there was nothing pending (already expanded,
    /// already removed, or exhausted).
    pub fn remove(&mut self) -> bool {
        if matches!(self.phase, Phase::Pending(_)) {
            self.phase = Phase::Ready;
            true
        } else {
            false
        }
    }

    fn expand(&mut self, node: &Arc<NodeOf<P>>) -> Result<(), SearchError> {
        let mut children = expand(self.problem, node)?;
        self.stats.expanded += 1;
        self.stats.generated += children.len();
        self.stats.pruned += self.gate.restrict(&mut children);
        log::trace!(
            "expanded {:?} (g={}) into {} successors",
            node.state(),
            node.cost(),
            children.len()
        );
        self.frontier.add(children);
        Ok(())
    }

    /// Whether the traversal has reached its terminal state.
    pub fn is_exhausted(&self) -> bool {
        matches!(self.phase, Phase::Exhausted)
    }

    pub fn problem(&self) -> &'p P {
        self.problem
    }

    pub fn gate(&self) -> &G {
        &self.gate
    }

    pub fn gate_mut(&mut self) -> &mut G {
        &mut self.gate
    }

    pub fn frontier(&self) -> &F {
        &self.frontier
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Consumes the traversal, returning its gate and counters.
    pub fn finish(self) -> (G, SearchStats) {
        (self.gate, self.stats)
    }
}

/// Pulls nodes from `traversal` until one satisfies the goal test.
///
/// Returns `Ok(None)` once the traversal is exhausted. Calling it again after
/// a solution resumes the traversal where it stopped.
pub fn drive<P, F, G>(
    traversal: &mut Traversal<'_, P, F, G>,
) -> Result<Option<Arc<NodeOf<P>>>, SearchError>
where
    P: Problem,
    F: Frontier<P::State, P::Action>,
    G: Gate<P::State, P::Action>,
{
    let problem = traversal.problem();
    while let Some(node) = traversal.advance()? {
        if problem.is_solution(node.state()) {
            return Ok(Some(node));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{Cycle, Grid};
    use crate::problem::ClosedSet;
    use crate::traversal::{FifoFrontier, LifoFrontier};

    #[test]
    fn test_advance_returns_root_first() {
        let grid = Grid::open(3, 3, (0, 0), (2, 2));
        let mut t = Traversal::new(&grid, FifoFrontier::new(), Open);

        let root = t.advance().unwrap().unwrap();
        assert_eq!(*root.state(), (0, 0));
        assert_eq!(t.stats().expanded, 0, "expansion is lazy");

        t.advance().unwrap();
        assert_eq!(t.stats().expanded, 1);
        assert_eq!(t.stats().generated, 2);
    }

    #[test]
    fn test_remove_skips_expansion() {
        let grid = Grid::open(3, 3, (0, 0), (2, 2));
        let mut t = Traversal::new(&grid, FifoFrontier::new(), Open);

        t.advance().unwrap();
        assert!(t.remove());
        assert!(!t.remove());
        assert!(t.advance().unwrap().is_none());
        assert!(t.is_exhausted());
        assert!(t.advance().unwrap().is_none(), "exhausted is terminal");
    }

    #[test]
    fn test_drive_finds_goal() {
        let grid = Grid::open(3, 3, (0, 0), (2, 2));
        let mut t = Traversal::new(&grid, FifoFrontier::new(), Open);
        let goal = drive(&mut t).unwrap().expect("goal reachable");
        assert_eq!(*goal.state(), (2, 2));
        assert!((goal.cost() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_unwrapped_dfs_revisits_cycle() {
        let ring = Cycle::new(3);
        let mut t = Traversal::new(&ring, LifoFrontier::new(), Open);

        let mut visits = vec![0usize; 3];
        for _ in 0..30 {
            let node = t.advance().unwrap().expect("a cycle never runs dry");
            visits[*node.state()] += 1;
        }
        assert!(visits.iter().all(|&v| v >= 10), "visits: {visits:?}");
    }

    #[test]
    fn test_closed_set_dfs_visits_each_state_once() {
        let ring = ClosedSet::new(Cycle::new(3));
        let mut t = Traversal::new(&ring, LifoFrontier::new(), Open);

        let mut visits = vec![0usize; 3];
        while let Some(node) = t.advance().unwrap() {
            visits[*node.state()] += 1;
        }
        assert_eq!(visits, vec![1, 1, 1]);
        assert!(drive(&mut t).unwrap().is_none());
    }
}
