//! Bounding algorithms.
//!
//! Depth-first traversals under a gate that prunes nodes beyond a bound:
//!
//! - [`BranchAndBound`]: one sweep; each solution tightens the bound to its
//!   cost, the cheapest one is kept.
//! - [`ParallelBranchAndBound`]: the same on a rayon pool (feature
//!   `parallel`).
//! - [`IdaStar`]: repeated sweeps, the bound rising to the smallest pruned
//!   f = g + h.
//! - [`IterativeDeepening`]: repeated sweeps on g with a fixed step.
//! - [`IterativeBroadening`]: repeated sweeps with a growing limit on the
//!   number of successors per node.
//!
//! Pruning compares with [`within_bound`], under which an infinite value is
//! never within an infinite bound.

mod branch_and_bound;
mod config;
mod deepening;
mod gate;
mod ida;
#[cfg(feature = "parallel")]
mod parallel;

pub use branch_and_bound::BranchAndBound;
pub use config::{BranchAndBoundConfig, BroadeningConfig, DeepeningConfig, IdaConfig};
pub use deepening::{IterativeBroadening, IterativeDeepening};
pub use gate::{within_bound, BoundGate, BreadthGate};
pub use ida::IdaStar;
#[cfg(feature = "parallel")]
pub use parallel::ParallelBranchAndBound;

use crate::error::SearchError;
use crate::problem::{NodeOf, Problem};
use crate::traversal::{drive, Gate, LifoFrontier, SearchStats, Traversal};
use std::sync::Arc;

/// One depth-first sweep from the initial state under `gate`.
///
/// Returns the first solution admitted by the gate, along with the gate
/// (for its pruning record) and the sweep's counters.
pub(crate) fn sweep<P, G>(
    problem: &P,
    gate: G,
) -> Result<(Option<NodeOf<P>>, G, SearchStats), SearchError>
where
    P: Problem,
    G: Gate<P::State, P::Action>,
{
    let mut traversal = Traversal::new(problem, LifoFrontier::new(), gate);
    let found = drive(&mut traversal)?;
    let (gate, stats) = traversal.finish();
    Ok((found.map(Arc::unwrap_or_clone), gate, stats))
}
