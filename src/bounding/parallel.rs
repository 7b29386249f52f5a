//! Parallel branch-and-bound on a rayon worker pool.
//!
//! Pruning and bound rules are those of [`BranchAndBound`](super::BranchAndBound).
//! At every branch point all children but the last are pushed as tasks onto
//! the pool; the current worker continues with the last child itself. The
//! scope returns once every task has drained.
//!
//! The incumbent is the only shared mutable state. Its cost is mirrored in
//! an atomic so workers can prune and reject non-improving solutions without
//! taking the lock; the lock is taken only to replace the incumbent, and the
//! cost is checked again inside it. The outer check may read a stale cost.
//! That is harmless: the incumbent only ever improves.

use super::config::BranchAndBoundConfig;
use super::gate::within_bound;
use crate::error::SearchError;
use crate::problem::{expand, AStarEvaluation, Evaluation, NodeOf, PathCost, Problem};
use crate::node::Node;
use crate::search::{Properties, SearchAlgorithm, SearchOutcome};
use crate::traversal::SearchStats;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// Branch-and-bound with one pool task per sibling subtree.
#[derive(Debug, Clone)]
pub struct ParallelBranchAndBound<E> {
    evaluation: E,
    config: BranchAndBoundConfig,
}

impl ParallelBranchAndBound<PathCost> {
    pub fn new() -> Self {
        Self::with_evaluation(PathCost)
    }
}

impl Default for ParallelBranchAndBound<PathCost> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> ParallelBranchAndBound<AStarEvaluation<H>> {
    pub fn with_heuristic(heuristic: H) -> Self {
        Self::with_evaluation(AStarEvaluation::new(heuristic))
    }
}

impl<E> ParallelBranchAndBound<E> {
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
}

/// Everything the workers share.
struct Shared<'a, P: Problem, E> {
    problem: &'a P,
    evaluation: &'a E,
    max_bound: f64,
    stop_at_first: bool,
    incumbent_cost: AtomicU64,
    incumbent: Mutex<Incumbent<P::State, P::Action>>,
    failure: Mutex<Option<SearchError>>,
    halted: AtomicBool,
    expanded: AtomicUsize,
    generated: AtomicUsize,
    pruned: AtomicUsize,
}

struct Incumbent<S, A> {
    best: Option<Node<S, A>>,
    bounds: Vec<f64>,
}

impl<'a, P: Problem, E> Shared<'a, P, E> {
    fn bound(&self) -> f64 {
        f64::from_bits(self.incumbent_cost.load(Ordering::Acquire)).min(self.max_bound)
    }

    fn halted(&self) -> bool {
        self.halted.load(Ordering::Relaxed)
    }

    /// Replaces the incumbent if `node` is strictly cheaper.
    fn offer(&self, node: &NodeOf<P>) {
        let cost = node.cost();
        if cost >= f64::from_bits(self.incumbent_cost.load(Ordering::Acquire)) {
            return;
        }
        let mut incumbent = self
            .incumbent
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if incumbent.best.as_ref().is_none_or(|b| cost < b.cost()) {
            log::debug!("parallel branch-and-bound: new incumbent with cost {cost}");
            incumbent.best = Some(node.clone());
            if incumbent.bounds.last().is_none_or(|&b| cost < b) {
                incumbent.bounds.push(cost);
            }
            self.incumbent_cost.store(cost.to_bits(), Ordering::Release);
        }
    }

    fn fail(&self, error: SearchError) {
        let mut failure = self.failure.lock().unwrap_or_else(PoisonError::into_inner);
        failure.get_or_insert(error);
        self.halted.store(true, Ordering::Relaxed);
    }
}

/// Explores the subtree below `root`, spawning sibling subtrees as tasks.
fn branch<'s, P, E>(shared: &'s Shared<'s, P, E>, root: NodeOf<P>, scope: &rayon::Scope<'s>)
where
    P: Problem + Sync + 's,
    P::State: Send + Sync + 's,
    P::Action: Send + Sync + 's,
    E: Evaluation<P::State, P::Action> + Sync + 's,
{
    let mut node = root;
    loop {
        if shared.halted() {
            return;
        }
        if !within_bound(shared.evaluation.evaluate(&node), shared.bound()) {
            shared.pruned.fetch_add(1, Ordering::Relaxed);
            return;
        }
        if shared.problem.is_solution(node.state()) {
            shared.offer(&node);
            if shared.stop_at_first {
                shared.halted.store(true, Ordering::Relaxed);
                return;
            }
        }

        let parent = Arc::new(node);
        let children = match expand(shared.problem, &parent) {
            Ok(children) => children,
            Err(e) => {
                shared.fail(e);
                return;
            }
        };
        shared.expanded.fetch_add(1, Ordering::Relaxed);
        shared.generated.fetch_add(children.len(), Ordering::Relaxed);

        let mut children = children.into_iter();
        let Some(last) = children.next_back() else {
            return;
        };
        for child in children {
            scope.spawn(move |s| branch(shared, child, s));
        }
        node = last;
    }
}

impl<E> ParallelBranchAndBound<E> {
    /// Runs the search on the configured pool.
    pub fn run<P>(&self, problem: &P) -> Result<SearchOutcome<P::State, P::Action>, SearchError>
    where
        P: Problem + Sync,
        P::State: Send + Sync,
        P::Action: Send + Sync,
        E: Evaluation<P::State, P::Action> + Sync,
    {
        self.config.validate()?;

        let shared = Shared {
            problem,
            evaluation: &self.evaluation,
            max_bound: self.config.max_bound,
            stop_at_first: self.config.stop_at_first,
            incumbent_cost: AtomicU64::new(f64::INFINITY.to_bits()),
            incumbent: Mutex::new(Incumbent {
                best: None,
                bounds: vec![self.config.max_bound],
            }),
            failure: Mutex::new(None),
            halted: AtomicBool::new(false),
            expanded: AtomicUsize::new(0),
            generated: AtomicUsize::new(0),
            pruned: AtomicUsize::new(0),
        };
        let root = Node::root(problem.initial_state());

        match self.config.threads {
            Some(n) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .map_err(|e| SearchError::config(e.to_string()))?;
                pool.install(|| rayon::scope(|s| branch(&shared, root, s)));
            }
            None => rayon::scope(|s| branch(&shared, root, s)),
        }

        if let Some(error) = shared
            .failure
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
        {
            return Err(error);
        }

        let stats = SearchStats {
            expanded: shared.expanded.into_inner(),
            generated: shared.generated.into_inner(),
            pruned: shared.pruned.into_inner(),
            sweeps: 1,
        };
        let incumbent = shared
            .incumbent
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);

        Ok(SearchOutcome {
            solution: incumbent.best,
            stats,
            bounds: incumbent.bounds,
        })
    }
}

impl<P, E> SearchAlgorithm<P> for ParallelBranchAndBound<E>
where
    P: Problem + Sync,
    P::State: Send + Sync,
    P::Action: Send + Sync,
    E: Evaluation<P::State, P::Action> + Sync,
{
    fn run(&self, problem: &P) -> Result<SearchOutcome<P::State, P::Action>, SearchError> {
        ParallelBranchAndBound::run(self, problem)
    }

    fn properties(&self) -> Properties {
        Properties {
            complete: true,
            optimal: !self.config.stop_at_first,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounding::BranchAndBound;
    use crate::fixtures::{Grid, Knapsack};

    fn items() -> Vec<(u32, u32)> {
        vec![
            (12, 4),
            (2, 2),
            (1, 1),
            (1, 2),
            (4, 10),
            (3, 7),
            (7, 13),
            (5, 8),
            (6, 9),
            (2, 3),
        ]
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let sack = Knapsack::new(&items(), 15);
        let config = BranchAndBoundConfig::default()
            .with_max_bound(sack.total_value())
            .with_threads(4);

        let parallel = ParallelBranchAndBound::with_heuristic(sack.relaxation())
            .with_config(config.clone())
            .run(&sack)
            .unwrap();
        let sequential = BranchAndBound::with_heuristic(sack.relaxation())
            .with_config(config)
            .run(&sack)
            .unwrap();

        assert_eq!(parallel.cost(), sequential.cost());
        let best_value = sack.total_value() - parallel.cost().unwrap();
        assert_eq!(best_value as u32, sack.brute_force_best());
    }

    #[test]
    fn test_parallel_final_bound_is_best_cost() {
        let sack = Knapsack::new(&items(), 15);
        let outcome = ParallelBranchAndBound::new()
            .with_config(
                BranchAndBoundConfig::default()
                    .with_max_bound(sack.total_value())
                    .with_threads(3),
            )
            .run(&sack)
            .unwrap();

        assert_eq!(outcome.bounds.last().copied(), outcome.cost());
        for w in outcome.bounds.windows(2) {
            assert!(w[1] < w[0], "incumbent must improve: {:?}", outcome.bounds);
        }
    }

    #[test]
    fn test_parallel_grid_default_pool() {
        let grid = Grid::open(4, 4, (0, 0), (3, 3));
        let outcome = ParallelBranchAndBound::with_heuristic(grid.manhattan())
            .with_config(BranchAndBoundConfig::default().with_max_bound(8.0))
            .run(&grid)
            .unwrap();
        assert_eq!(outcome.cost(), Some(6.0));
    }

    #[test]
    fn test_parallel_contract_violation_surfaces() {
        struct Broken;

        impl Problem for Broken {
            type State = u8;
            type Action = u8;

            fn initial_state(&self) -> u8 {
                0
            }

            fn applicable_actions(&self, _s: &u8) -> Vec<u8> {
                vec![1]
            }

            fn resulting_states(&self, a: &u8, s: &u8) -> Result<Vec<u8>, SearchError> {
                Err(SearchError::inapplicable(a, s))
            }

            fn transition(
                &self,
                a: &u8,
                s: &u8,
                _n: &u8,
            ) -> Result<crate::problem::Transition, SearchError> {
                Err(SearchError::inapplicable(a, s))
            }

            fn is_solution(&self, _s: &u8) -> bool {
                false
            }
        }

        let err = ParallelBranchAndBound::new().run(&Broken).unwrap_err();
        assert!(matches!(err, SearchError::InapplicableAction { .. }));
    }
}
