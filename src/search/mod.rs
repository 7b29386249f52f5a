//! Tree and graph search algorithms.
//!
//! Every algorithm builds a [`Traversal`](crate::traversal::Traversal)
//! tailored to the problem and hands it to the shared solve loop. The result
//! is the first node satisfying the goal test, or `None` when the search
//! space is exhausted.
//!
//! - [`BreadthFirst`], [`DepthFirst`]: uninformed.
//! - [`BestFirst`]: sorted open set; [`AStar`], [`WeightedAStar`] and
//!   [`GreedyBestFirst`] are instances with different evaluations.
//! - Bounding algorithms (branch-and-bound, IDA*, iterative deepening and
//!   broadening) live in [`crate::bounding`].

mod best_first;
mod uninformed;

pub use best_first::{is_admissible_at, AStar, BestFirst, GreedyBestFirst, WeightedAStar};
pub use uninformed::{BreadthFirst, DepthFirst};

use crate::error::SearchError;
use crate::node::Node;
use crate::problem::{NodeOf, Problem};
use crate::traversal::SearchStats;

/// Result of a search run.
#[derive(Debug, Clone)]
pub struct SearchOutcome<S, A> {
    /// The solution node (cost and path), `None` if no solution was found.
    pub solution: Option<Node<S, A>>,

    /// Expansion counters summed over all sweeps.
    pub stats: SearchStats,

    /// Bound used by each sweep, in order. Empty for unbounded searches.
    pub bounds: Vec<f64>,
}

impl<S, A> SearchOutcome<S, A> {
    pub(crate) fn single(solution: Option<Node<S, A>>, stats: SearchStats) -> Self {
        Self {
            solution,
            stats,
            bounds: Vec::new(),
        }
    }

    /// Cost of the solution, if any.
    pub fn cost(&self) -> Option<f64> {
        self.solution.as_ref().map(Node::cost)
    }
}

/// Completeness and optimality of an algorithm under its usual assumptions
/// (finite branching, step costs bounded away from zero, admissible h).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Properties {
    /// Finds a solution whenever one exists.
    pub complete: bool,
    /// The solution found has minimal cost.
    pub optimal: bool,
}

/// Asymptotic cost in terms of branching factor `b`, solution depth `d` and
/// maximum depth `m`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Complexity {
    pub time: &'static str,
    pub space: &'static str,
}

/// A search algorithm over problems of type `P`.
pub trait SearchAlgorithm<P: Problem> {
    /// Runs the search and returns the solution with statistics.
    fn run(&self, problem: &P) -> Result<SearchOutcome<P::State, P::Action>, SearchError>;

    /// Runs the search and returns only the solution node.
    ///
    /// The returned node, if any, satisfies `problem.is_solution`.
    fn solve(&self, problem: &P) -> Result<Option<NodeOf<P>>, SearchError> {
        Ok(self.run(problem)?.solution)
    }

    /// Completeness and optimality guarantees.
    fn properties(&self) -> Properties;

    /// Asymptotic time and space, where the algorithm declares them.
    fn complexity(&self) -> Result<Complexity, SearchError> {
        Err(SearchError::Unsupported("complexity estimate"))
    }
}
