//! Local search execution loop.
//!
//! A local optimizer is a traversal whose open set holds at most one node.
//! The [`LocalRestriction`] narrows the successors of the current node to a
//! few candidates; the frontier then tries them in order against the
//! acceptance criterion and keeps the first one accepted. A rejected round
//! re-queues the current node while the temperature (or threshold) is
//! positive, so it is expanded again with freshly drawn candidates. At
//! level 0 a rejected round empties the open set and the shared solve loop
//! reports exhaustion. Threshold Accepting first gets one more round with
//! the full best-candidate restriction, so it ends exactly as Hill Climbing
//! would.
//!
//! Accepted states are detached from their predecessor unless
//! [`LocalConfig::keep_path`] is set, so a run holds O(b) nodes regardless
//! of its length.

use super::accept::Acceptance;
use super::config::{CoolingSchedule, LocalConfig, LocalSelection, Schedule};
use super::restriction::LocalRestriction;
use crate::error::SearchError;
use crate::node::Node;
use crate::problem::{Heuristic, Problem};
use crate::search::{Complexity, Properties, SearchAlgorithm, SearchOutcome};
use crate::traversal::{drive, Frontier, Open, SearchStats, Traversal};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cell::Cell;
use std::fmt::Debug;
use std::sync::Arc;

/// Las Vegas or Monte Carlo semantics of a randomized algorithm.
pub trait Probabilistic {
    /// `true` for Las Vegas algorithms, whose answers are always correct.
    /// `false` for Monte Carlo algorithms, which may return a wrong
    /// (suboptimal or missing) answer.
    fn is_correct(&self) -> bool;
}

/// Result of a local search run.
#[derive(Debug, Clone)]
pub struct LocalResult<S, A> {
    /// The goal state reached, if the trajectory hit one.
    pub solution: Option<Node<S, A>>,

    /// The last accepted state. Its path is the trajectory when
    /// [`LocalConfig::keep_path`] is set; otherwise it is detached.
    pub current: Node<S, A>,

    /// The lowest-valued state visited.
    pub best: Node<S, A>,

    /// Objective value of `best`.
    pub best_value: f64,

    /// Move attempts (rounds of candidates offered to the acceptance test).
    pub iterations: usize,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: usize,

    /// Number of improving moves.
    pub improving_moves: usize,

    /// Current objective value at the start, every
    /// [`LocalConfig::history_interval`] iterations, and at the end.
    pub value_history: Vec<f64>,

    /// Traversal counters.
    pub stats: SearchStats,
}

/// Hill Climbing, Simulated Annealing and Threshold Accepting.
///
/// All three minimize `objective` over states reachable by applying
/// actions; they differ only in the [`Acceptance`] criterion and the
/// default [`LocalSelection`].
///
/// | Algorithm | Selection | Accepts | Stops |
/// |-----------|-----------|---------|-------|
/// | Hill Climbing | best | Δ ≤ 0 | no candidate accepted |
/// | Simulated Annealing | random | Δ ≤ 0, else prob. exp(-Δ/T) | T = 0 |
/// | Threshold Accepting | random, best at threshold 0 | Δ ≤ threshold | threshold 0 and no best candidate accepted |
///
/// Every run also stops on reaching a goal state or the iteration cap.
///
/// # Examples
///
/// ```
/// use u_plan::local::{CoolingSchedule, LocalConfig, SimulatedAnnealing};
///
/// let sa = SimulatedAnnealing::simulated_annealing(
///     |x: &i64| ((x - 7) * (x - 7)) as f64,
///     CoolingSchedule::Geometric { initial: 10.0, alpha: 0.99, floor: 1e-3 },
/// )
/// .with_config(LocalConfig::default().with_seed(42));
/// # let _ = sa;
/// ```
#[derive(Debug, Clone)]
pub struct LocalSearch<H, T = CoolingSchedule, R = StdRng> {
    objective: H,
    acceptance: Acceptance<T>,
    config: LocalConfig,
    rng: Option<R>,
}

/// Hill Climbing: greedy descent that never accepts a worse state.
pub type HillClimbing<H, R = StdRng> = LocalSearch<H, CoolingSchedule, R>;

/// Simulated Annealing with temperature schedule `T`.
pub type SimulatedAnnealing<H, T = CoolingSchedule, R = StdRng> = LocalSearch<H, T, R>;

/// Threshold Accepting with threshold schedule `T`.
pub type ThresholdAccepting<H, T = CoolingSchedule, R = StdRng> = LocalSearch<H, T, R>;

impl<H> LocalSearch<H, CoolingSchedule, StdRng> {
    pub fn hill_climbing(objective: H) -> Self {
        Self {
            objective,
            acceptance: Acceptance::Improving,
            config: LocalConfig::default().with_selection(LocalSelection::Best),
            rng: None,
        }
    }
}

impl<H, T> LocalSearch<H, T, StdRng> {
    pub fn simulated_annealing(objective: H, schedule: T) -> Self {
        Self {
            objective,
            acceptance: Acceptance::Metropolis(schedule),
            config: LocalConfig::default(),
            rng: None,
        }
    }

    pub fn threshold_accepting(objective: H, schedule: T) -> Self {
        Self {
            objective,
            acceptance: Acceptance::Threshold(schedule),
            config: LocalConfig::default(),
            rng: None,
        }
    }
}

impl<H, T, R> LocalSearch<H, T, R> {
    pub fn with_config(mut self, config: LocalConfig) -> Self {
        self.config = config;
        self
    }

    /// Uses `rng` as the random source; each run starts from a clone of it.
    /// Takes precedence over the configured seed.
    pub fn with_rng<R2>(self, rng: R2) -> LocalSearch<H, T, R2> {
        LocalSearch {
            objective: self.objective,
            acceptance: self.acceptance,
            config: self.config,
            rng: Some(rng),
        }
    }

    pub fn config(&self) -> &LocalConfig {
        &self.config
    }

    pub fn acceptance(&self) -> &Acceptance<T> {
        &self.acceptance
    }

    pub fn objective(&self) -> &H {
        &self.objective
    }
}

impl<H, T, R> LocalSearch<H, T, R>
where
    T: Schedule,
    R: Rng + SeedableRng + Clone,
{
    /// Runs the optimizer from the problem's initial state.
    pub fn optimize<P>(&self, problem: &P) -> Result<LocalResult<P::State, P::Action>, SearchError>
    where
        P: Problem,
        H: Heuristic<P::State>,
    {
        self.config.validate()?;

        let mut rng = match &self.rng {
            Some(rng) => rng.clone(),
            None => R::seed_from_u64(self.config.seed.unwrap_or_else(rand::random)),
        };
        let restricted = LocalRestriction::new(
            problem,
            &self.objective,
            self.config.selection,
            R::seed_from_u64(rng.random()),
        );
        let root = Node::root(restricted.initial_state());
        let frontier: LocalFrontier<'_, P::State, P::Action, H, T, R> = LocalFrontier::new(
            &self.objective,
            &self.acceptance,
            &self.config,
            restricted.selection_cell(),
            rng,
            &root,
        );

        let mut traversal = Traversal::from_root(&restricted, frontier, Open, root);
        let solution = drive(&mut traversal)?.map(Arc::unwrap_or_clone);
        let stats = traversal.stats();
        let frontier = traversal.frontier();

        if frontier.capped {
            log::warn!(
                "local search: stopped at the iteration cap of {}",
                self.config.max_iterations
            );
        }
        let (current, current_value) = frontier.current.clone();
        let (best, best_value) = frontier.best.clone();
        let mut value_history = frontier.value_history.clone();
        if value_history
            .last()
            .is_none_or(|&last| (last - current_value).abs() > 1e-15)
        {
            value_history.push(current_value);
        }
        log::debug!(
            "local search: {} iterations, {} accepted, best value {best_value}",
            frontier.iterations,
            frontier.accepted_moves
        );

        Ok(LocalResult {
            solution,
            current,
            best,
            best_value,
            iterations: frontier.iterations,
            accepted_moves: frontier.accepted_moves,
            improving_moves: frontier.improving_moves,
            value_history,
            stats,
        })
    }
}

impl<H, T, R> Probabilistic for LocalSearch<H, T, R> {
    fn is_correct(&self) -> bool {
        false
    }
}

impl<P, H, T, R> SearchAlgorithm<P> for LocalSearch<H, T, R>
where
    P: Problem,
    H: Heuristic<P::State>,
    T: Schedule,
    R: Rng + SeedableRng + Clone,
{
    fn run(&self, problem: &P) -> Result<SearchOutcome<P::State, P::Action>, SearchError> {
        let result = self.optimize(problem)?;
        Ok(SearchOutcome::single(result.solution, result.stats))
    }

    fn properties(&self) -> Properties {
        Properties {
            complete: false,
            optimal: false,
        }
    }

    fn complexity(&self) -> Result<Complexity, SearchError> {
        match self.acceptance {
            Acceptance::Improving => Ok(Complexity {
                time: "O(b*m)",
                space: "O(b)",
            }),
            _ => Err(SearchError::Unsupported(
                "complexity estimate for schedule-driven local search",
            )),
        }
    }
}

/// Open set of a local search: the current node, or nothing.
struct LocalFrontier<'a, S, A, H, T, R> {
    objective: &'a H,
    acceptance: &'a Acceptance<T>,
    max_iterations: usize,
    keep_path: bool,
    history_interval: usize,
    selection: &'a Cell<LocalSelection>,
    rng: R,
    seeded: bool,
    open: Option<Node<S, A>>,
    current: (Node<S, A>, f64),
    best: (Node<S, A>, f64),
    iterations: usize,
    accepted_moves: usize,
    improving_moves: usize,
    value_history: Vec<f64>,
    capped: bool,
}

impl<'a, S: Clone, A: Clone, H: Heuristic<S>, T, R> LocalFrontier<'a, S, A, H, T, R> {
    fn new(
        objective: &'a H,
        acceptance: &'a Acceptance<T>,
        config: &LocalConfig,
        selection: &'a Cell<LocalSelection>,
        rng: R,
        root: &Node<S, A>,
    ) -> Self {
        let value = objective.estimate(root.state());
        Self {
            objective,
            acceptance,
            max_iterations: config.max_iterations,
            keep_path: config.keep_path,
            history_interval: config.history_interval.max(1),
            selection,
            rng,
            seeded: false,
            open: None,
            current: (root.clone(), value),
            best: (root.clone(), value),
            iterations: 0,
            accepted_moves: 0,
            improving_moves: 0,
            value_history: vec![value],
            capped: false,
        }
    }
}

impl<S, A, H, T, R> LocalFrontier<'_, S, A, H, T, R>
where
    S: Clone + Debug,
    A: Clone,
    H: Heuristic<S>,
    T: Schedule,
    R: Rng,
{
    /// Offers `nodes` to the acceptance test in order and moves to the first
    /// one accepted.
    fn step(&mut self, nodes: Vec<Node<S, A>>, level: f64) -> bool {
        let current_value = self.current.1;
        for node in nodes {
            let value = self.objective.estimate(node.state());
            let delta = value - current_value;
            if !self.acceptance.accept(delta, level, &mut self.rng) {
                continue;
            }
            log::trace!("moved to {:?}: delta {delta}, level {level}", node.state());
            self.accepted_moves += 1;
            if delta < 0.0 {
                self.improving_moves += 1;
            }
            let node = if self.keep_path {
                node
            } else {
                node.into_detached()
            };
            if value < self.best.1 {
                self.best = (node.clone(), value);
            }
            self.current = (node.clone(), value);
            self.open = Some(node);
            return true;
        }
        false
    }
}

impl<S, A, H, T, R> Frontier<S, A> for LocalFrontier<'_, S, A, H, T, R>
where
    S: Clone + Debug,
    A: Clone,
    H: Heuristic<S>,
    T: Schedule,
    R: Rng,
{
    fn is_empty(&self) -> bool {
        self.open.is_none()
    }

    fn len(&self) -> usize {
        usize::from(self.open.is_some())
    }

    fn select(&mut self) -> Option<Node<S, A>> {
        self.open.take()
    }

    fn add(&mut self, nodes: Vec<Node<S, A>>) -> bool {
        if !self.seeded {
            self.seeded = true;
            self.open = nodes.into_iter().next();
            return self.open.is_some();
        }

        if self.max_iterations > 0 && self.iterations >= self.max_iterations {
            self.capped = true;
            return false;
        }
        let level = self.acceptance.level(self.iterations);
        if matches!(self.acceptance, Acceptance::Metropolis(_)) && level <= 0.0 {
            log::debug!(
                "simulated annealing: temperature reached 0 after {} iterations",
                self.iterations
            );
            return false;
        }
        self.iterations += 1;

        let moved = self.step(nodes, level);
        if self.iterations % self.history_interval == 0 {
            self.value_history.push(self.current.1);
        }
        if moved {
            return true;
        }

        if level > 0.0 {
            self.open = Some(self.current.0.clone());
            return true;
        }
        if matches!(self.acceptance, Acceptance::Threshold(_))
            && self.selection.get() != LocalSelection::Best
        {
            log::debug!(
                "threshold accepting: threshold 0 after {} iterations, finishing with best moves",
                self.iterations
            );
            self.selection.set(LocalSelection::Best);
            self.open = Some(self.current.0.clone());
            return true;
        }
        false
    }
}
