//! Local search configuration and cooling schedules.

use crate::error::SearchError;

/// Iteration index → temperature (or threshold).
///
/// Must decrease monotonically towards 0. Simulated Annealing stops at the
/// first iteration whose value is exactly 0; a schedule that never reaches
/// 0 runs until the iteration cap.
///
/// Any `Fn(usize) -> f64` is a schedule.
pub trait Schedule {
    fn value(&self, iteration: usize) -> f64;
}

impl<F> Schedule for F
where
    F: Fn(usize) -> f64,
{
    fn value(&self, iteration: usize) -> f64 {
        self(iteration)
    }
}

/// Closed-form cooling schedules.
///
/// # References
///
/// - Geometric: standard textbook approach
/// - Linear: fixed-duration cooling
/// - LundyMees: Lundy & Mees (1986), with convergence proof
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoolingSchedule {
    /// Geometric cooling: `T_k = initial * alpha^k`.
    ///
    /// Typical `alpha`: 0.95-0.99.
    Geometric {
        initial: f64,
        /// Cooling factor in (0, 1). Higher = slower cooling.
        alpha: f64,
        /// Temperatures below this are reported as 0.
        floor: f64,
    },

    /// Linear cooling: `T_k = initial * (1 - k / steps)`, 0 from step
    /// `steps` on.
    Linear { initial: f64, steps: usize },

    /// Lundy-Mees cooling: `T_{k+1} = T_k / (1 + beta * T_k)`, i.e.
    /// `T_k = initial / (1 + k * beta * initial)`.
    ///
    /// Cools fast at high T, slow at low T.
    LundyMees {
        initial: f64,
        /// Cooling parameter. Typically `(T_0 - T_min) / (max_iter * T_0 * T_min)`.
        beta: f64,
        /// Temperatures below this are reported as 0.
        floor: f64,
    },
}

impl Default for CoolingSchedule {
    fn default() -> Self {
        CoolingSchedule::Geometric {
            initial: 100.0,
            alpha: 0.95,
            floor: 1e-3,
        }
    }
}

impl CoolingSchedule {
    /// Validates the schedule parameters.
    pub fn validate(&self) -> Result<(), SearchError> {
        let initial = match *self {
            CoolingSchedule::Geometric {
                initial,
                alpha,
                floor,
            } => {
                if alpha <= 0.0 || alpha >= 1.0 {
                    return Err(SearchError::config(format!(
                        "geometric alpha must be in (0, 1), got {alpha}"
                    )));
                }
                if floor <= 0.0 {
                    return Err(SearchError::config("geometric floor must be positive"));
                }
                initial
            }
            CoolingSchedule::Linear { initial, steps } => {
                if steps == 0 {
                    return Err(SearchError::config("linear steps must be at least 1"));
                }
                initial
            }
            CoolingSchedule::LundyMees {
                initial,
                beta,
                floor,
            } => {
                if beta <= 0.0 {
                    return Err(SearchError::config(format!(
                        "lundy-mees beta must be positive, got {beta}"
                    )));
                }
                if floor <= 0.0 {
                    return Err(SearchError::config("lundy-mees floor must be positive"));
                }
                initial
            }
        };
        if !initial.is_finite() || initial <= 0.0 {
            return Err(SearchError::config(format!(
                "initial temperature must be positive, got {initial}"
            )));
        }
        Ok(())
    }
}

impl Schedule for CoolingSchedule {
    fn value(&self, k: usize) -> f64 {
        match *self {
            CoolingSchedule::Geometric {
                initial,
                alpha,
                floor,
            } => {
                let t = initial * alpha.powf(k as f64);
                if t < floor {
                    0.0
                } else {
                    t
                }
            }
            CoolingSchedule::Linear { initial, steps } => {
                if k >= steps {
                    0.0
                } else {
                    initial * (1.0 - k as f64 / steps as f64)
                }
            }
            CoolingSchedule::LundyMees {
                initial,
                beta,
                floor,
            } => {
                let t = initial / (1.0 + k as f64 * beta * initial);
                if t < floor {
                    0.0
                } else {
                    t
                }
            }
        }
    }
}

/// How the candidate moves at a state are narrowed before acceptance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LocalSelection {
    /// One applicable action drawn uniformly at random.
    Random,
    /// `k` applicable actions drawn uniformly, in action order.
    Sample(usize),
    /// Every action whose resulting state evaluates lowest, in action order.
    Best,
    /// One of the lowest-evaluating actions, ties broken at random.
    RandomBest,
    /// The lowest-evaluating actions among a uniform sample of `k`, ties
    /// broken at random.
    BestOfSample(usize),
}

/// Configuration shared by the local optimizers.
///
/// # Examples
///
/// ```
/// use u_plan::local::{LocalConfig, LocalSelection};
///
/// let config = LocalConfig::default()
///     .with_selection(LocalSelection::Sample(4))
///     .with_max_iterations(10_000)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocalConfig {
    /// Candidate restriction applied at every state.
    pub selection: LocalSelection,

    /// Maximum number of move attempts (hard budget). 0 = no limit.
    pub max_iterations: usize,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,

    /// Keep every accepted state linked to its predecessor so the result
    /// carries the whole trajectory. Off by default: memory then stays
    /// constant however many moves are accepted.
    pub keep_path: bool,

    /// Record the current objective value every this many iterations.
    pub history_interval: usize,
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self {
            selection: LocalSelection::Random,
            max_iterations: 0,
            seed: None,
            keep_path: false,
            history_interval: 100,
        }
    }
}

impl LocalConfig {
    pub fn with_selection(mut self, selection: LocalSelection) -> Self {
        self.selection = selection;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_keep_path(mut self, keep: bool) -> Self {
        self.keep_path = keep;
        self
    }

    pub fn with_history_interval(mut self, every: usize) -> Self {
        self.history_interval = every;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.history_interval == 0 {
            return Err(SearchError::config("history_interval must be at least 1"));
        }
        match self.selection {
            LocalSelection::Sample(0) | LocalSelection::BestOfSample(0) => {
                Err(SearchError::config("sample size must be at least 1"))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LocalConfig::default();
        assert_eq!(config.selection, LocalSelection::Random);
        assert_eq!(config.max_iterations, 0);
        assert!(!config.keep_path);
        assert_eq!(config.history_interval, 100);
        assert!(config.validate().is_ok());
        assert!(CoolingSchedule::default().validate().is_ok());
    }

    #[test]
    fn test_validate_bad_sample() {
        let config = LocalConfig::default().with_selection(LocalSelection::Sample(0));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_history_interval() {
        let config = LocalConfig::default().with_history_interval(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bad_alpha() {
        let schedule = CoolingSchedule::Geometric {
            initial: 10.0,
            alpha: 1.5,
            floor: 0.1,
        };
        assert!(schedule.validate().is_err());
    }

    #[test]
    fn test_validate_bad_beta() {
        let schedule = CoolingSchedule::LundyMees {
            initial: 10.0,
            beta: -1.0,
            floor: 0.1,
        };
        assert!(schedule.validate().is_err());
    }

    #[test]
    fn test_geometric_reaches_zero() {
        let schedule = CoolingSchedule::Geometric {
            initial: 1.0,
            alpha: 0.5,
            floor: 0.1,
        };
        assert!((schedule.value(0) - 1.0).abs() < 1e-12);
        assert!((schedule.value(3) - 0.125).abs() < 1e-12);
        assert_eq!(schedule.value(4), 0.0);
    }

    #[test]
    fn test_linear_reaches_zero() {
        let schedule = CoolingSchedule::Linear {
            initial: 10.0,
            steps: 5,
        };
        assert!((schedule.value(0) - 10.0).abs() < 1e-12);
        assert!((schedule.value(4) - 2.0).abs() < 1e-12);
        assert_eq!(schedule.value(5), 0.0);
        assert_eq!(schedule.value(100), 0.0);
    }

    #[test]
    fn test_lundy_mees_matches_recurrence() {
        let (initial, beta) = (50.0, 0.01);
        let schedule = CoolingSchedule::LundyMees {
            initial,
            beta,
            floor: 1e-9,
        };
        let mut t = initial;
        for k in 0..20 {
            assert!(
                (schedule.value(k) - t).abs() < 1e-9,
                "step {k}: closed form {} vs recurrence {t}",
                schedule.value(k)
            );
            t /= 1.0 + beta * t;
        }
    }

    #[test]
    fn test_closure_schedule() {
        let schedule = |k: usize| -> f64 { if k < 3 { 1.0 } else { 0.0 } };
        assert_eq!(schedule.value(2), 1.0);
        assert_eq!(schedule.value(3), 0.0);
    }
}
