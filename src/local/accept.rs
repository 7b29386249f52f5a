//! Move acceptance criteria.

use super::config::Schedule;
use rand::Rng;

/// Metropolis criterion: always accept `delta <= 0`, otherwise accept with
/// probability `exp(-delta / temperature)`. Nothing worse is accepted at
/// temperature 0.
pub fn metropolis<R: Rng>(delta: f64, temperature: f64, rng: &mut R) -> bool {
    if delta <= 0.0 {
        return true;
    }
    if temperature <= 0.0 {
        return false;
    }
    rng.random_range(0.0..1.0) < (-delta / temperature).exp()
}

/// Decides whether a local optimizer moves from the current state to a
/// candidate, given `delta = f(candidate) - f(current)`.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Acceptance<T> {
    /// `delta <= 0`. Hill Climbing.
    Improving,
    /// Metropolis criterion at temperature `T_k`. Simulated Annealing.
    Metropolis(T),
    /// `delta <= threshold_k`. Threshold Accepting.
    Threshold(T),
}

impl<T: Schedule> Acceptance<T> {
    /// Temperature or threshold in force at iteration `k`; 0 for
    /// [`Acceptance::Improving`].
    pub fn level(&self, k: usize) -> f64 {
        match self {
            Acceptance::Improving => 0.0,
            Acceptance::Metropolis(schedule) | Acceptance::Threshold(schedule) => schedule.value(k),
        }
    }

    /// Applies the criterion at level `level` (see [`Acceptance::level`]).
    pub fn accept<R: Rng>(&self, delta: f64, level: f64, rng: &mut R) -> bool {
        match self {
            Acceptance::Improving => delta <= 0.0,
            Acceptance::Metropolis(_) => metropolis(delta, level, rng),
            Acceptance::Threshold(_) => delta <= level.max(0.0),
        }
    }
}
