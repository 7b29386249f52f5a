//! Bounding algorithm configuration.

use crate::error::SearchError;

/// Configuration for (parallel) branch-and-bound.
///
/// # Examples
///
/// ```
/// use u_plan::bounding::BranchAndBoundConfig;
///
/// let config = BranchAndBoundConfig::default()
///     .with_max_bound(100.0)
///     .with_stop_at_first(false)
///     .with_threads(4);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BranchAndBoundConfig {
    /// Initial bound. Nodes with f above it are pruned until a solution
    /// tightens it. `f64::INFINITY` disables pruning up front.
    pub max_bound: f64,

    /// Stop at the first solution instead of proving optimality.
    pub stop_at_first: bool,

    /// Worker threads for the parallel variant. `None` uses the global pool.
    pub threads: Option<usize>,
}

impl Default for BranchAndBoundConfig {
    fn default() -> Self {
        Self {
            max_bound: f64::INFINITY,
            stop_at_first: false,
            threads: None,
        }
    }
}

impl BranchAndBoundConfig {
    pub fn with_max_bound(mut self, bound: f64) -> Self {
        self.max_bound = bound;
        self
    }

    pub fn with_stop_at_first(mut self, stop: bool) -> Self {
        self.stop_at_first = stop;
        self
    }

    pub fn with_threads(mut self, n: usize) -> Self {
        self.threads = Some(n);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_bound.is_nan() {
            return Err(SearchError::config("max_bound must not be NaN"));
        }
        if self.threads == Some(0) {
            return Err(SearchError::config("threads must be at least 1"));
        }
        Ok(())
    }
}

/// Configuration for IDA*.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IdaConfig {
    /// Maximum number of sweeps. 0 = no limit.
    pub max_sweeps: usize,
}

impl IdaConfig {
    pub fn with_max_sweeps(mut self, n: usize) -> Self {
        self.max_sweeps = n;
        self
    }
}

/// Configuration for iterative deepening on accumulated cost.
///
/// Sweeps run with bounds `initial_bound`, `initial_bound + step`, ...
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeepeningConfig {
    /// Bound of the first sweep.
    pub initial_bound: f64,

    /// Increment between sweeps.
    pub step: f64,

    /// Last bound tried. `f64::INFINITY` = no limit.
    pub max_bound: f64,
}

impl Default for DeepeningConfig {
    fn default() -> Self {
        Self {
            initial_bound: 0.0,
            step: 1.0,
            max_bound: f64::INFINITY,
        }
    }
}

impl DeepeningConfig {
    pub fn with_initial_bound(mut self, bound: f64) -> Self {
        self.initial_bound = bound;
        self
    }

    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    pub fn with_max_bound(mut self, bound: f64) -> Self {
        self.max_bound = bound;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), SearchError> {
        if !self.initial_bound.is_finite() || self.initial_bound < 0.0 {
            return Err(SearchError::config(format!(
                "initial_bound must be finite and non-negative, got {}",
                self.initial_bound
            )));
        }
        if !self.step.is_finite() || self.step <= 0.0 {
            return Err(SearchError::config(format!(
                "step must be positive, got {}",
                self.step
            )));
        }
        if self.max_bound.is_nan() || self.max_bound < self.initial_bound {
            return Err(SearchError::config(
                "max_bound must not be below initial_bound",
            ));
        }
        Ok(())
    }
}

/// Configuration for iterative broadening.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BroadeningConfig {
    /// Successors per node in the first sweep.
    pub initial_breadth: usize,

    /// Widest sweep tried. 0 = no limit.
    pub max_breadth: usize,
}

impl Default for BroadeningConfig {
    fn default() -> Self {
        Self {
            initial_breadth: 1,
            max_breadth: 0,
        }
    }
}

impl BroadeningConfig {
    pub fn with_initial_breadth(mut self, n: usize) -> Self {
        self.initial_breadth = n;
        self
    }

    pub fn with_max_breadth(mut self, n: usize) -> Self {
        self.max_breadth = n;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.initial_breadth == 0 {
            return Err(SearchError::config("initial_breadth must be at least 1"));
        }
        if self.max_breadth != 0 && self.max_breadth < self.initial_breadth {
            return Err(SearchError::config(
                "max_breadth must not be below initial_breadth",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configs_valid() {
        assert!(BranchAndBoundConfig::default().validate().is_ok());
        assert!(DeepeningConfig::default().validate().is_ok());
        assert!(BroadeningConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_bad_values() {
        assert!(BranchAndBoundConfig::default()
            .with_max_bound(f64::NAN)
            .validate()
            .is_err());
        assert!(BranchAndBoundConfig::default()
            .with_threads(0)
            .validate()
            .is_err());
        assert!(DeepeningConfig::default().with_step(0.0).validate().is_err());
        assert!(DeepeningConfig::default()
            .with_initial_bound(5.0)
            .with_max_bound(2.0)
            .validate()
            .is_err());
        assert!(BroadeningConfig::default()
            .with_initial_breadth(0)
            .validate()
            .is_err());
    }
}
