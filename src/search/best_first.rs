//! Best-first search: A*, weighted A* and greedy best-first.
//!
//! All three expand the open node with the lowest f and differ only in the
//! evaluation:
//!
//! - A*: f = g + h. Optimal with an admissible h.
//! - WA*: f = g + W·h, W ≥ 1. Solution cost is at most W times optimal.
//! - Greedy: f = h. Fast, neither optimal nor complete on infinite spaces.

use super::{Complexity, Properties, SearchAlgorithm, SearchOutcome};
use crate::error::SearchError;
use crate::problem::{
    AStarEvaluation, Evaluation, GreedyEvaluation, Heuristic, Problem, WeightedEvaluation,
};
use crate::traversal::{drive, Explored, Open, SortedFrontier, Traversal};
use std::hash::Hash;
use std::sync::Arc;

/// Best-first search ordered by an arbitrary evaluation.
#[derive(Debug, Clone)]
pub struct BestFirst<E> {
    evaluation: E,
    properties: Properties,
}

/// A*: best-first with f = g + h.
pub type AStar<H> = BestFirst<AStarEvaluation<H>>;

/// Weighted A*: best-first with f = g + W·h.
pub type WeightedAStar<H> = BestFirst<WeightedEvaluation<H>>;

/// Greedy best-first: f = h.
pub type GreedyBestFirst<H> = BestFirst<GreedyEvaluation<H>>;

impl<E> BestFirst<E> {
    /// Best-first search with a caller-supplied evaluation.
    ///
    /// No optimality is claimed for arbitrary evaluations.
    pub fn with_evaluation(evaluation: E) -> Self {
        Self {
            evaluation,
            properties: Properties {
                complete: true,
                optimal: false,
            },
        }
    }

    pub fn evaluation(&self) -> &E {
        &self.evaluation
    }
}

impl<H> BestFirst<AStarEvaluation<H>> {
    /// A* with heuristic `h`.
    pub fn a_star(heuristic: H) -> Self {
        Self {
            evaluation: AStarEvaluation::new(heuristic),
            properties: Properties {
                complete: true,
                optimal: true,
            },
        }
    }
}

impl<H> BestFirst<WeightedEvaluation<H>> {
    /// Weighted A* with heuristic `h` and weight `weight`.
    ///
    /// # Errors
    ///
    /// [`SearchError::InvalidConfig`] if `weight < 1` or not finite.
    pub fn weighted(heuristic: H, weight: f64) -> Result<Self, SearchError> {
        if !weight.is_finite() || weight < 1.0 {
            return Err(SearchError::config(format!(
                "weighted A* needs weight >= 1, got {weight}"
            )));
        }
        Ok(Self {
            evaluation: WeightedEvaluation::new(heuristic, weight),
            properties: Properties {
                complete: true,
                // W = 1 is plain A*.
                optimal: weight == 1.0,
            },
        })
    }
}

impl<H> BestFirst<GreedyEvaluation<H>> {
    /// Greedy best-first search with heuristic `h`.
    pub fn greedy(heuristic: H) -> Self {
        Self {
            evaluation: GreedyEvaluation::new(heuristic),
            properties: Properties {
                complete: false,
                optimal: false,
            },
        }
    }
}

impl<E: Clone> BestFirst<E> {
    pub fn create_traversal<'p, P>(
        &self,
        problem: &'p P,
    ) -> Traversal<'p, P, SortedFrontier<P::State, P::Action, E>, Open>
    where
        P: Problem,
        E: Evaluation<P::State, P::Action>,
    {
        Traversal::new(problem, SortedFrontier::new(self.evaluation.clone()), Open)
    }

    /// Like [`create_traversal`](Self::create_traversal), but expands every
    /// state at most once.
    pub fn create_graph_traversal<'p, P>(
        &self,
        problem: &'p P,
    ) -> Traversal<'p, P, SortedFrontier<P::State, P::Action, E>, Explored<P::State>>
    where
        P: Problem,
        P::State: Eq + Hash,
        E: Evaluation<P::State, P::Action>,
    {
        Traversal::new(
            problem,
            SortedFrontier::new(self.evaluation.clone()),
            Explored::new(),
        )
    }

    /// Graph search: duplicates of an expanded state are discarded.
    ///
    /// Terminates on every finite state space. Keeps A* optimal for
    /// consistent heuristics and weighted A* within its factor W.
    pub fn run_graph<P>(
        &self,
        problem: &P,
    ) -> Result<SearchOutcome<P::State, P::Action>, SearchError>
    where
        P: Problem,
        P::State: Eq + Hash,
        E: Evaluation<P::State, P::Action>,
    {
        let mut traversal = self.create_graph_traversal(problem);
        let solution = drive(&mut traversal)?.map(Arc::unwrap_or_clone);
        Ok(SearchOutcome::single(solution, traversal.stats()))
    }
}

impl<P, E> SearchAlgorithm<P> for BestFirst<E>
where
    P: Problem,
    E: Evaluation<P::State, P::Action> + Clone,
{
    fn run(&self, problem: &P) -> Result<SearchOutcome<P::State, P::Action>, SearchError> {
        let mut traversal = self.create_traversal(problem);
        let solution = drive(&mut traversal)?.map(Arc::unwrap_or_clone);
        Ok(SearchOutcome::single(solution, traversal.stats()))
    }

    fn properties(&self) -> Properties {
        self.properties
    }

    fn complexity(&self) -> Result<Complexity, SearchError> {
        Ok(Complexity {
            time: "O(b^d)",
            space: "O(b^d)",
        })
    }
}

/// Checks `h` against `optimal_cost` for a single state: `h(s) <= h*(s)`.
///
/// Used by tests and callers that want to sanity-check a heuristic against a
/// known optimum.
pub fn is_admissible_at<S, H: Heuristic<S>>(heuristic: &H, state: &S, optimal_cost: f64) -> bool {
    heuristic.estimate(state) <= optimal_cost + 1e-9
}
