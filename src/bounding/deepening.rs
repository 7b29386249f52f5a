//! Iterative deepening and iterative broadening.
//!
//! Both repeat depth-first sweeps under a growing limit and stop at the
//! first solution, or when a sweep prunes nothing (the limit no longer
//! matters, so a larger one cannot help).
//!
//! - Iterative deepening limits the accumulated cost g; bounds grow by a
//!   fixed step (0, 1, 2, ... by default). Earlier sweeps would have found
//!   any cheaper solution, so the first one found is optimal up to the step.
//! - Iterative broadening limits the number of successors expanded per node
//!   (1, 2, 3, ...). Useful when the branching factor, not the depth, is the
//!   unbounded dimension.

use super::config::{BroadeningConfig, DeepeningConfig};
use super::gate::{BoundGate, BreadthGate};
use super::sweep;
use crate::error::SearchError;
use crate::problem::{PathCost, Problem};
use crate::search::{Complexity, Properties, SearchAlgorithm, SearchOutcome};
use crate::traversal::SearchStats;

/// Iterative deepening on accumulated cost.
#[derive(Debug, Clone, Default)]
pub struct IterativeDeepening {
    config: DeepeningConfig,
}

impl IterativeDeepening {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: DeepeningConfig) -> Self {
        self.config = config;
        self
    }
}

impl<P: Problem> SearchAlgorithm<P> for IterativeDeepening {
    fn run(&self, problem: &P) -> Result<SearchOutcome<P::State, P::Action>, SearchError> {
        self.config.validate()?;

        let mut bound = self.config.initial_bound;
        let mut bounds = Vec::new();
        let mut stats = SearchStats::default();

        while bound <= self.config.max_bound {
            bounds.push(bound);
            let (found, gate, sweep_stats) = sweep(problem, BoundGate::new(PathCost, bound))?;
            stats.absorb(&sweep_stats);
            log::debug!(
                "iterative deepening: bound {bound}, expanded {}, pruned {}",
                sweep_stats.expanded,
                sweep_stats.pruned
            );

            if found.is_some() || !gate.have_pruned() {
                return Ok(SearchOutcome {
                    solution: found,
                    stats,
                    bounds,
                });
            }
            bound += self.config.step;
        }

        log::warn!(
            "iterative deepening: gave up past max_bound {}",
            self.config.max_bound
        );
        Ok(SearchOutcome {
            solution: None,
            stats,
            bounds,
        })
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

/// Iterative broadening: depth-first sweeps expanding at most `b`
/// successors per node, with `b` growing by one per sweep.
///
/// Every sweep must terminate on its own, so the problem needs finite depth
/// or a [`ClosedSet`](crate::problem::ClosedSet) wrapper, which starts
/// afresh at the initial state of each sweep.
#[derive(Debug, Clone, Default)]
pub struct IterativeBroadening {
    config: BroadeningConfig,
}

impl IterativeBroadening {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: BroadeningConfig) -> Self {
        self.config = config;
        self
    }
}

impl<P: Problem> SearchAlgorithm<P> for IterativeBroadening {
    fn run(&self, problem: &P) -> Result<SearchOutcome<P::State, P::Action>, SearchError> {
        self.config.validate()?;

        let mut breadth = self.config.initial_breadth;
        let mut bounds = Vec::new();
        let mut stats = SearchStats::default();

        loop {
            if self.config.max_breadth > 0 && breadth > self.config.max_breadth {
                log::warn!(
                    "iterative broadening: gave up past max_breadth {}",
                    self.config.max_breadth
                );
                return Ok(SearchOutcome {
                    solution: None,
                    stats,
                    bounds,
                });
            }

            bounds.push(breadth as f64);
            let (found, gate, sweep_stats) = sweep(problem, BreadthGate::new(breadth))?;
            stats.absorb(&sweep_stats);
            log::debug!(
                "iterative broadening: breadth {breadth}, expanded {}, pruned {}",
                sweep_stats.expanded,
                sweep_stats.pruned
            );

            if found.is_some() || !gate.have_pruned() {
                return Ok(SearchOutcome {
                    solution: found,
                    stats,
                    bounds,
                });
            }
            breadth += 1;
        }
    }

    fn properties(&self) -> Properties {
        Properties {
            complete: true,
            optimal: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{Grid, Knapsack};
    use crate::problem::{ClosedSet, Transition};

    /// Strings of digits `0..branching` up to length `target.len()`; the goal
    /// is one particular string.
    struct Digits {
        branching: u8,
        target: Vec<u8>,
    }

    impl Problem for Digits {
        type State = Vec<u8>;
        type Action = u8;

        fn initial_state(&self) -> Vec<u8> {
            Vec::new()
        }

        fn applicable_actions(&self, s: &Vec<u8>) -> Vec<u8> {
            if s.len() < self.target.len() {
                (0..self.branching).collect()
            } else {
                Vec::new()
            }
        }

        fn resulting_states(&self, d: &u8, s: &Vec<u8>) -> Result<Vec<Vec<u8>>, SearchError> {
            if *d >= self.branching || s.len() >= self.target.len() {
                return Err(SearchError::inapplicable(d, s));
            }
            let mut next = s.clone();
            next.push(*d);
            Ok(vec![next])
        }

        fn transition(&self, _d: &u8, _s: &Vec<u8>, _n: &Vec<u8>) -> Result<Transition, SearchError> {
            Ok(Transition::deterministic(1.0))
        }

        fn is_solution(&self, s: &Vec<u8>) -> bool {
            *s == self.target
        }
    }

    #[test]
    fn test_deepening_finds_shallowest() {
        let grid = Grid::open(3, 3, (0, 0), (2, 1));
        let outcome = IterativeDeepening::new().run(&grid).unwrap();
        let goal = outcome.solution.expect("goal reachable");

        assert!((goal.cost() - 3.0).abs() < 1e-12);
        assert_eq!(outcome.bounds, vec![0.0, 1.0, 2.0, 3.0]);
        assert_eq!(outcome.stats.sweeps, 4);
    }

    #[test]
    fn test_deepening_exhausts_finite_space() {
        // Taking the only item loses nothing, so the first sweep succeeds.
        let sack = Knapsack::new(&[(1, 1)], 1);
        let outcome = IterativeDeepening::new().run(&sack).unwrap();
        assert_eq!(outcome.cost(), Some(0.0));
        assert_eq!(outcome.bounds, vec![0.0]);

        let ring = crate::fixtures::Cycle::new(0);
        let none = IterativeDeepening::new().run(&ring).unwrap();
        assert!(none.solution.is_none());
        assert_eq!(none.bounds, vec![0.0]);
    }

    #[test]
    fn test_deepening_max_bound() {
        let grid = Grid::open(5, 5, (0, 0), (4, 4));
        let outcome = IterativeDeepening::new()
            .with_config(DeepeningConfig::default().with_max_bound(3.0))
            .run(&grid)
            .unwrap();
        assert!(outcome.solution.is_none());
        assert_eq!(outcome.bounds.len(), 4);
    }

    #[test]
    fn test_deepening_on_closed_set() {
        let chain = Grid::open(3, 1, (0, 0), (2, 0));
        let plain = IterativeDeepening::new().run(&chain).unwrap();
        let wrapped = IterativeDeepening::new()
            .run(&ClosedSet::new(chain.clone()))
            .unwrap();

        assert_eq!(plain.cost(), Some(2.0));
        assert_eq!(wrapped.cost(), Some(2.0));
        assert_eq!(wrapped.bounds, vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_broadening_on_closed_set() {
        let digits = ClosedSet::new(Digits {
            branching: 3,
            target: vec![1, 2],
        });
        let outcome = IterativeBroadening::new().run(&digits).unwrap();
        assert_eq!(outcome.solution.map(|n| n.into_state()), Some(vec![1, 2]));
        assert_eq!(outcome.bounds, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_broadening_widens_until_found() {
        let digits = Digits {
            branching: 5,
            target: vec![2, 0, 1],
        };
        let outcome = IterativeBroadening::new().run(&digits).unwrap();
        let goal = outcome.solution.expect("target reachable");

        assert_eq!(*goal.state(), vec![2, 0, 1]);
        assert_eq!(outcome.bounds, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_broadening_unreachable_stops() {
        let digits = Digits {
            branching: 2,
            target: vec![3],
        };
        let outcome = IterativeBroadening::new().run(&digits).unwrap();
        assert!(outcome.solution.is_none());
        assert_eq!(outcome.bounds, vec![1.0, 2.0]);

        let capped = IterativeBroadening::new()
            .with_config(BroadeningConfig::default().with_max_breadth(1))
            .run(&digits)
            .unwrap();
        assert_eq!(capped.bounds, vec![1.0]);
    }
}
