//! Breadth-first and depth-first search.

use super::{Complexity, Properties, SearchAlgorithm, SearchOutcome};
use crate::error::SearchError;
use crate::problem::Problem;
use crate::traversal::{drive, FifoFrontier, LifoFrontier, Open, Traversal};
use std::sync::Arc;

/// Breadth-first search.
///
/// Complete for finite branching; returns a solution at minimal depth,
/// which is optimal when all step costs are equal.
#[derive(Debug, Clone, Copy, Default)]
pub struct BreadthFirst;

impl BreadthFirst {
    pub fn create_traversal<'p, P: Problem>(
        &self,
        problem: &'p P,
    ) -> Traversal<'p, P, FifoFrontier<P::State, P::Action>, Open> {
        Traversal::new(problem, FifoFrontier::new(), Open)
    }
}

impl<P: Problem> SearchAlgorithm<P> for BreadthFirst {
    fn run(&self, problem: &P) -> Result<SearchOutcome<P::State, P::Action>, SearchError> {
        let mut traversal = self.create_traversal(problem);
        let solution = drive(&mut traversal)?.map(Arc::unwrap_or_clone);
        Ok(SearchOutcome::single(solution, traversal.stats()))
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
            space: "O(b^d)",
        })
    }
}

/// Depth-first search.
///
/// Linear memory, but neither complete (it may descend forever on infinite
/// or cyclic spaces; see [`ClosedSet`](crate::problem::ClosedSet)) nor
/// optimal.
#[derive(Debug, Clone, Copy, Default)]
pub struct DepthFirst;

impl DepthFirst {
    pub fn create_traversal<'p, P: Problem>(
        &self,
        problem: &'p P,
    ) -> Traversal<'p, P, LifoFrontier<P::State, P::Action>, Open> {
        Traversal::new(problem, LifoFrontier::new(), Open)
    }
}

impl<P: Problem> SearchAlgorithm<P> for DepthFirst {
    fn run(&self, problem: &P) -> Result<SearchOutcome<P::State, P::Action>, SearchError> {
        let mut traversal = self.create_traversal(problem);
        let solution = drive(&mut traversal)?.map(Arc::unwrap_or_clone);
        Ok(SearchOutcome::single(solution, traversal.stats()))
    }

    fn properties(&self) -> Properties {
        Properties {
            complete: false,
            optimal: false,
        }
    }

    fn complexity(&self) -> Result<Complexity, SearchError> {
        Ok(Complexity {
            time: "O(b^m)",
            space: "O(b*m)",
        })
    }
}
