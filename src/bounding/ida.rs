//! Iterative-deepening A* (IDA*).
//!
//! # Algorithm
//!
//! 1. bound := f(initial state) = h(initial state)
//! 2. Depth-first sweep, pruning nodes with f = g + h > bound
//! 3. Solution found: return it
//! 4. Nothing pruned: the space is exhausted, return no solution
//! 5. Otherwise bound := smallest pruned f, go to 2
//!
//! Optimal under an admissible heuristic. Memory is linear in the solution
//! depth; running time grows with the number of distinct f-values.

use super::config::IdaConfig;
use super::gate::BoundGate;
use super::sweep;
use crate::error::SearchError;
use crate::node::Node;
use crate::problem::{AStarEvaluation, Evaluation, Heuristic, Problem};
use crate::search::{Complexity, Properties, SearchAlgorithm, SearchOutcome};
use crate::traversal::SearchStats;

/// IDA* with heuristic `H`.
#[derive(Debug, Clone)]
pub struct IdaStar<H> {
    evaluation: AStarEvaluation<H>,
    config: IdaConfig,
}

impl<H> IdaStar<H> {
    pub fn new(heuristic: H) -> Self {
        Self {
            evaluation: AStarEvaluation::new(heuristic),
            config: IdaConfig::default(),
        }
    }

    pub fn with_config(mut self, config: IdaConfig) -> Self {
        self.config = config;
        self
    }
}

impl<P, H> SearchAlgorithm<P> for IdaStar<H>
where
    P: Problem,
    H: Heuristic<P::State> + Clone,
{
    fn run(&self, problem: &P) -> Result<SearchOutcome<P::State, P::Action>, SearchError> {
        let root: Node<P::State, P::Action> = Node::root(problem.initial_state());
        let mut bound = self.evaluation.evaluate(&root);
        let mut bounds = Vec::new();
        let mut stats = SearchStats::default();

        loop {
            if self.config.max_sweeps > 0 && bounds.len() >= self.config.max_sweeps {
                log::warn!(
                    "IDA*: stopped after {} sweeps at bound {bound}",
                    self.config.max_sweeps
                );
                return Ok(SearchOutcome {
                    solution: None,
                    stats,
                    bounds,
                });
            }

            bounds.push(bound);
            let gate = BoundGate::new(self.evaluation.clone(), bound);
            let (found, gate, sweep_stats) = sweep(problem, gate)?;
            stats.absorb(&sweep_stats);
            log::debug!(
                "IDA*: sweep with bound {bound} expanded {} nodes, next bound {:?}",
                sweep_stats.expanded,
                gate.next_bound()
            );

            if found.is_some() {
                return Ok(SearchOutcome {
                    solution: found,
                    stats,
                    bounds,
                });
            }
            match gate.next_bound() {
                Some(next) if gate.have_pruned() => bound = next,
                _ => {
                    return Ok(SearchOutcome {
                        solution: None,
                        stats,
                        bounds,
                    })
                }
            }
        }
    }

    fn properties(&self) -> Properties {
        Properties {
            complete: true,
            optimal: true,
        }
    }

    fn complexity(&self) -> Result<Complexity, SearchError> {
        Ok(Complexity {
            time: "O(b^d)",
            space: "O(b*d)",
        })
    }
}
