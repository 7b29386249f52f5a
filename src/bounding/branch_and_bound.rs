//! Depth-first branch-and-bound.
//!
//! # Algorithm
//!
//! 1. Depth-first traversal with the bound set to the configured maximum
//! 2. Nodes with f > bound are pruned when they leave the open set
//! 3. On each solution: keep it if strictly cheaper, set bound := its cost
//! 4. Continue until the open set is exhausted (or stop at the first
//!    solution if configured)
//!
//! Optimal and complete on finite trees under an admissible heuristic.

use super::config::BranchAndBoundConfig;
use super::gate::BoundGate;
use crate::error::SearchError;
use crate::node::Node;
use crate::problem::{AStarEvaluation, Evaluation, NodeOf, PathCost, Problem};
use crate::search::{Complexity, Properties, SearchAlgorithm, SearchOutcome};
use crate::traversal::{drive, LifoFrontier, Traversal};
use std::sync::Arc;

/// Sequential depth-first branch-and-bound.
///
/// # Examples
///
/// ```no_run
/// use u_plan::bounding::{BranchAndBound, BranchAndBoundConfig};
/// # fn demo<P: u_plan::problem::Problem>(problem: &P) where P::State: 'static {
/// use u_plan::search::SearchAlgorithm;
///
/// let bnb = BranchAndBound::with_heuristic(|_: &P::State| 0.0)
///     .with_config(BranchAndBoundConfig::default().with_max_bound(50.0));
/// let best = bnb.solve(problem).unwrap();
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct BranchAndBound<E> {
    evaluation: E,
    config: BranchAndBoundConfig,
}

impl BranchAndBound<PathCost> {
    /// Branch-and-bound on accumulated cost alone (h = 0).
    pub fn new() -> Self {
        Self::with_evaluation(PathCost)
    }
}

impl Default for BranchAndBound<PathCost> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> BranchAndBound<AStarEvaluation<H>> {
    /// Branch-and-bound pruning on f = g + h.
    pub fn with_heuristic(heuristic: H) -> Self {
        Self::with_evaluation(AStarEvaluation::new(heuristic))
    }
}

impl<E> BranchAndBound<E> {
    pub fn with_evaluation(evaluation: E) -> Self {
        Self {
            evaluation,
            config: BranchAndBoundConfig::default(),
        }
    }

    pub fn with_config(mut self, config: BranchAndBoundConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &BranchAndBoundConfig {
        &self.config
    }
}

impl<E: Clone> BranchAndBound<E> {
    pub fn create_traversal<'p, P>(
        &self,
        problem: &'p P,
    ) -> Traversal<'p, P, LifoFrontier<P::State, P::Action>, BoundGate<E>>
    where
        P: Problem,
        E: Evaluation<P::State, P::Action>,
    {
        Traversal::new(
            problem,
            LifoFrontier::new(),
            BoundGate::new(self.evaluation.clone(), self.config.max_bound),
        )
    }
}

/// Keeps `candidate` if it beats `best` and returns the new bound.
fn process_solution<S, A>(best: &mut Option<Node<S, A>>, candidate: Node<S, A>) -> f64 {
    let cost = candidate.cost();
    let improves = best.as_ref().is_none_or(|b| cost < b.cost());
    if improves {
        log::debug!("branch-and-bound: new incumbent with cost {cost}");
        *best = Some(candidate);
    }
    best.as_ref().map_or(cost, Node::cost)
}

impl<P, E> SearchAlgorithm<P> for BranchAndBound<E>
where
    P: Problem,
    E: Evaluation<P::State, P::Action> + Clone,
{
    fn run(&self, problem: &P) -> Result<SearchOutcome<P::State, P::Action>, SearchError> {
        self.config.validate()?;

        let mut traversal = self.create_traversal(problem);
        let mut best: Option<NodeOf<P>> = None;
        let mut bounds = vec![self.config.max_bound];

        while let Some(found) = drive(&mut traversal)? {
            let bound = process_solution(&mut best, Arc::unwrap_or_clone(found));
            if bound < traversal.gate().bound() {
                traversal.gate_mut().set_bound(bound);
                bounds.push(bound);
            }
            if self.config.stop_at_first {
                break;
            }
        }

        Ok(SearchOutcome {
            solution: best,
            stats: traversal.stats(),
            bounds,
        })
    }

    fn properties(&self) -> Properties {
        Properties {
            complete: true,
            optimal: !self.config.stop_at_first,
        }
    }

    fn complexity(&self) -> Result<Complexity, SearchError> {
        Ok(Complexity {
            time: "O(b^m)",
            space: "O(b*m)",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{Grid, Knapsack};

    fn sample_knapsack() -> Knapsack {
        Knapsack::new(&[(5, 10), (4, 40), (6, 30), (3, 50)], 10)
    }

    #[test]
    fn test_knapsack_matches_brute_force() {
        let sack = sample_knapsack();
        let bnb = BranchAndBound::new()
            .with_config(BranchAndBoundConfig::default().with_max_bound(sack.total_value()));
        let outcome = bnb.run(&sack).unwrap();

        let lost = outcome.cost().expect("skipping everything is always feasible");
        let best_value = sack.total_value() - lost;
        assert_eq!(best_value as u32, sack.brute_force_best());
        assert_eq!(best_value as u32, 90);
    }

    #[test]
    fn test_final_bound_equals_best_cost() {
        let sack = sample_knapsack();
        let bnb = BranchAndBound::with_heuristic(sack.relaxation())
            .with_config(BranchAndBoundConfig::default().with_max_bound(sack.total_value()));
        let outcome = bnb.run(&sack).unwrap();

        let cost = outcome.cost().unwrap();
        assert_eq!(outcome.bounds.last().copied(), Some(cost));
        for w in outcome.bounds.windows(2) {
            assert!(w[1] < w[0], "bounds must tighten: {:?}", outcome.bounds);
        }
    }

    #[test]
    fn test_heuristic_prunes_more() {
        let sack = sample_knapsack();
        let config = BranchAndBoundConfig::default().with_max_bound(sack.total_value());
        let blind = BranchAndBound::new().with_config(config.clone()).run(&sack).unwrap();
        let informed = BranchAndBound::with_heuristic(sack.relaxation())
            .with_config(config)
            .run(&sack)
            .unwrap();

        assert_eq!(blind.cost(), informed.cost());
        assert!(informed.stats.expanded <= blind.stats.expanded);
    }

    #[test]
    fn test_stop_at_first() {
        let sack = sample_knapsack();
        let bnb = BranchAndBound::new().with_config(
            BranchAndBoundConfig::default()
                .with_max_bound(sack.total_value())
                .with_stop_at_first(true),
        );
        let outcome = bnb.run(&sack).unwrap();
        assert!(outcome.solution.is_some());
        assert!(!<BranchAndBound<PathCost> as SearchAlgorithm<Knapsack>>::properties(&bnb).optimal);
    }

    #[test]
    fn test_bound_below_optimum_finds_nothing() {
        let sack = sample_knapsack();
        // Optimal lost value is 40; nothing fits under 30.
        let bnb = BranchAndBound::new()
            .with_config(BranchAndBoundConfig::default().with_max_bound(30.0));
        assert!(bnb.solve(&sack).unwrap().is_none());
    }

    #[test]
    fn test_grid_with_bound() {
        let grid = Grid::open(3, 3, (0, 0), (2, 2));
        let bnb = BranchAndBound::with_heuristic(grid.manhattan())
            .with_config(BranchAndBoundConfig::default().with_max_bound(6.0));
        let goal = bnb.solve(&grid).unwrap().expect("goal within bound");
        assert!((goal.cost() - 4.0).abs() < 1e-12);
    }
}
