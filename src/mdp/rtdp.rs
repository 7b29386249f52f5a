//! Real-Time Dynamic Programming (RTDP).
//!
//! No state set is needed up front. The policy backs up U(s) every time it
//! is asked for an action in `s`, so only states actually visited are ever
//! refined. Repeated trials from the initial state converge on the states
//! relevant to an optimal policy when the heuristic is admissible.
//!
//! # References
//!
//! - Barto, Bradtke & Singh (1995), "Learning to Act Using Real-Time
//!   Dynamic Programming"

use super::config::DpConfig;
use super::policy::Policy;
use super::value::{greedy_action, UtilityTable};
use crate::error::SearchError;
use crate::problem::{Heuristic, Problem, Transition};
use rand::Rng;
use std::hash::Hash;

/// Builds RTDP policies.
#[derive(Debug, Clone)]
pub struct Rtdp<H> {
    heuristic: H,
    config: DpConfig,
}

impl<H> Rtdp<H> {
    /// RTDP starting from `heuristic`, which should be admissible.
    pub fn new(heuristic: H) -> Self {
        Self {
            heuristic,
            config: DpConfig::default(),
        }
    }

    pub fn with_config(mut self, config: DpConfig) -> Self {
        self.config = config;
        self
    }
}

impl<H: Clone> Rtdp<H> {
    /// A fresh online policy for `problem`.
    pub fn policy<'p, P>(&self, problem: &'p P) -> Result<RtdpPolicy<'p, P, H>, SearchError>
    where
        P: Problem,
        P::State: Eq + Hash,
        H: Heuristic<P::State>,
    {
        self.config.validate()?;
        Ok(RtdpPolicy {
            problem,
            table: UtilityTable::new(self.heuristic.clone()),
            discount: self.config.discount,
            backups: 0,
        })
    }

    /// A policy refined by `trials` simulated trials of at most `max_steps`
    /// steps each.
    pub fn train<'p, P, R>(
        &self,
        problem: &'p P,
        rng: &mut R,
        trials: usize,
        max_steps: usize,
    ) -> Result<RtdpPolicy<'p, P, H>, SearchError>
    where
        P: Problem,
        P::State: Eq + Hash,
        H: Heuristic<P::State>,
        R: Rng,
    {
        let mut policy = self.policy(problem)?;
        let mut reached = 0;
        for _ in 0..trials {
            if policy.trial(rng, max_steps)?.reached_goal {
                reached += 1;
            }
        }
        log::debug!(
            "rtdp: {reached}/{trials} trials reached a goal, {} backups",
            policy.backups()
        );
        Ok(policy)
    }
}

/// Outcome of one simulated trial.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trial {
    /// Actions taken.
    pub steps: usize,
    /// Accumulated cost of the actions taken.
    pub cost: f64,
    /// Whether the trial ended in a goal state.
    pub reached_goal: bool,
}

/// Online greedy policy that backs up every state it is queried on.
pub struct RtdpPolicy<'p, P: Problem, H> {
    problem: &'p P,
    table: UtilityTable<P::State, H>,
    discount: f64,
    backups: usize,
}

impl<'p, P, H> RtdpPolicy<'p, P, H>
where
    P: Problem,
    P::State: Eq + Hash,
    H: Heuristic<P::State>,
{
    /// Simulates one run from the initial state, acting greedily and
    /// sampling each successor by its probability.
    pub fn trial<R: Rng>(&mut self, rng: &mut R, max_steps: usize) -> Result<Trial, SearchError> {
        let mut state = self.problem.initial_state();
        let mut steps = 0;
        let mut cost = 0.0;

        while steps < max_steps && !self.problem.is_solution(&state) {
            let Some(action) = self.action(&state)? else {
                break;
            };
            let (next, transition) = self.sample(&action, &state, rng)?;
            log::trace!("rtdp: {state:?} --{action:?}--> {next:?}");
            cost += transition.cost;
            steps += 1;
            state = next;
        }

        Ok(Trial {
            steps,
            cost,
            reached_goal: self.problem.is_solution(&state),
        })
    }

    /// Draws one successor of `action` in `state` (roulette wheel).
    fn sample<R: Rng>(
        &self,
        action: &P::Action,
        state: &P::State,
        rng: &mut R,
    ) -> Result<(P::State, Transition), SearchError> {
        let mut outcomes = Vec::new();
        for next in self.problem.resulting_states(action, state)? {
            let t = self.problem.transition(action, state, &next)?;
            outcomes.push((next, t));
        }
        let total: f64 = outcomes.iter().map(|(_, t)| t.probability).sum();
        if outcomes.is_empty() || total <= 0.0 {
            return Err(SearchError::inapplicable(action, state));
        }

        let mut roll = rng.random_range(0.0..total);
        let mut chosen = outcomes.len() - 1;
        for (i, (_, t)) in outcomes.iter().enumerate() {
            roll -= t.probability;
            if roll < 0.0 {
                chosen = i;
                break;
            }
        }
        Ok(outcomes.swap_remove(chosen))
    }

    /// Current estimate U(state); 0 at goal states.
    pub fn utility(&self, state: &P::State) -> f64 {
        if self.problem.is_solution(state) {
            0.0
        } else {
            self.table.get(state)
        }
    }

    pub fn table(&self) -> &UtilityTable<P::State, H> {
        &self.table
    }

    /// Number of backups performed so far.
    pub fn backups(&self) -> usize {
        self.backups
    }
}

impl<P, H> Policy<P::State, P::Action> for RtdpPolicy<'_, P, H>
where
    P: Problem,
    P::State: Eq + Hash,
    H: Heuristic<P::State>,
{
    fn action(&mut self, state: &P::State) -> Result<Option<P::Action>, SearchError> {
        if self.problem.is_solution(state) {
            return Ok(None);
        }
        let Some((action, q)) = greedy_action(self.problem, &self.table, self.discount, state)?
        else {
            return Ok(None);
        };
        self.table.set(state.clone(), q);
        self.backups += 1;
        Ok(Some(action))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{Corridor, Step};
    use crate::random::create_rng;

    fn zero(_: &usize) -> f64 {
        0.0
    }

    #[test]
    fn test_action_backs_up_visited_state_only() {
        let corridor = Corridor::new(4);
        let mut policy = Rtdp::new(zero).policy(&corridor).unwrap();

        assert_eq!(policy.action(&2).unwrap(), Some(Step::Right));
        assert_eq!(policy.backups(), 1);
        assert!(policy.table().contains(&2));
        assert!(!policy.table().contains(&1));
        assert!((policy.utility(&2) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_goal_has_no_action() {
        let corridor = Corridor::new(2);
        let mut policy = Rtdp::new(zero).policy(&corridor).unwrap();
        assert_eq!(policy.action(&2).unwrap(), None);
        assert_eq!(policy.backups(), 0);
    }

    #[test]
    fn test_trials_converge() {
        let corridor = Corridor::new(4);
        let mut rng = create_rng(42);
        let mut policy = Rtdp::new(zero)
            .train(&corridor, &mut rng, 300, 200)
            .unwrap();

        assert!(
            (policy.utility(&0) - 5.0).abs() < 1e-3,
            "U(0) = {}",
            policy.utility(&0)
        );
        let trial = policy.trial(&mut rng, 200).unwrap();
        assert!(trial.reached_goal);
        assert!(trial.steps >= 4);
        assert!((trial.cost - trial.steps as f64).abs() < 1e-12);
    }

    #[test]
    fn test_utilities_never_exceed_optimum() {
        // With an admissible start every backup stays below the true value.
        let corridor = Corridor::new(5);
        let mut rng = create_rng(7);
        let policy = Rtdp::new(zero).train(&corridor, &mut rng, 20, 100).unwrap();
        for s in corridor.states() {
            assert!(policy.utility(&s) <= 1.25 * (5 - s) as f64 + 1e-9);
        }
    }

    #[test]
    fn test_step_cap_ends_trial() {
        let corridor = Corridor::new(10);
        let mut rng = create_rng(1);
        let mut policy = Rtdp::new(zero).policy(&corridor).unwrap();
        let trial = policy.trial(&mut rng, 3).unwrap();
        assert_eq!(trial.steps, 3);
        assert!(!trial.reached_goal);
    }
}
