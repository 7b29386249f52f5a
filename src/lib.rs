//! Domain-agnostic state-space search and sequential decision planning.
//!
//! A problem is described once, through the [`problem::Problem`] contract
//! (states, applicable actions, resulting states, transition cost and
//! probability, goal test). Interchangeable solvers consume it:
//!
//! - **Uninformed search**: breadth-first and depth-first.
//! - **Best-first search**: A*, weighted A*, greedy best-first, on a
//!   stable sorted open set.
//! - **Bounding search**: branch-and-bound (sequential and parallel), IDA*,
//!   iterative deepening and iterative broadening.
//! - **Local optimizers**: Hill Climbing, Simulated Annealing and Threshold
//!   Accepting, built from a candidate restriction and an acceptance rule.
//! - **MDP dynamic programming**: Gauss-Seidel value iteration and RTDP.
//!
//! # Architecture
//!
//! Every tree search runs on the same resumable [`traversal::Traversal`]:
//! an open set ([`traversal::Frontier`]) decides the expansion order and a
//! [`traversal::Gate`] decides which nodes are admitted. A single solve loop
//! ([`traversal::drive`]) pulls nodes until one satisfies the goal test.
//! Search nodes carry their own accumulated cost and parent link, so no
//! state is shared between the problem and the engine.
//!
//! "No solution" is `Ok(None)`, never an error. [`SearchError`] is reserved
//! for contract violations, unsupported operations and invalid
//! configuration.

pub mod bounding;
pub mod error;
pub mod local;
pub mod mdp;
pub mod node;
pub mod problem;
pub mod random;
pub mod search;
pub mod traversal;

#[cfg(test)]
mod fixtures;

pub use error::SearchError;
pub use node::Node;
