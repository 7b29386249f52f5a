//! Traversal: the open-set generator every tree search runs on.
//!
//! A [`Traversal`] owns an open set ([`Frontier`]) and an admission policy
//! ([`Gate`]). Its position is captured in its own fields, so it can be
//! paused after any node and resumed later; [`drive`] is the single solve
//! loop shared by all tree searches.
//!
//! | Frontier | Order | Search |
//! |----------|-------|--------|
//! | [`FifoFrontier`] | queue | breadth-first |
//! | [`LifoFrontier`] | stack | depth-first |
//! | [`SortedFrontier`] | ascending f, stable merge | best-first / A* |

mod engine;
mod frontier;

pub use engine::{drive, Explored, Gate, Open, SearchStats, Traversal};
pub use frontier::{FifoFrontier, Frontier, LifoFrontier, SortedFrontier};
