//! Dynamic programming configuration.

use crate::error::SearchError;

/// Configuration shared by Gauss-Seidel and RTDP.
///
/// # Examples
///
/// ```
/// use u_plan::mdp::DpConfig;
///
/// let config = DpConfig::default()
///     .with_discount(0.95)
///     .with_tolerance(1e-8)
///     .with_max_sweeps(10_000);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DpConfig {
    /// Discount factor γ in [0, 1]. With γ = 1 every state must reach a
    /// goal with probability 1 under some policy.
    pub discount: f64,

    /// Gauss-Seidel stops once the largest change in a sweep falls below
    /// this.
    pub tolerance: f64,

    /// Maximum number of Gauss-Seidel sweeps. 0 = no limit.
    pub max_sweeps: usize,
}

impl Default for DpConfig {
    fn default() -> Self {
        Self {
            discount: 1.0,
            tolerance: 1e-6,
            max_sweeps: 0,
        }
    }
}

impl DpConfig {
    pub fn with_discount(mut self, discount: f64) -> Self {
        self.discount = discount;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_max_sweeps(mut self, n: usize) -> Self {
        self.max_sweeps = n;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), SearchError> {
        if !(0.0..=1.0).contains(&self.discount) {
            return Err(SearchError::config(format!(
                "discount must be in [0, 1], got {}",
                self.discount
            )));
        }
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(SearchError::config(format!(
                "tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DpConfig::default();
        assert!((config.discount - 1.0).abs() < 1e-15);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_bad_discount() {
        assert!(DpConfig::default().with_discount(1.5).validate().is_err());
        assert!(DpConfig::default().with_discount(-0.1).validate().is_err());
        assert!(DpConfig::default().with_discount(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_validate_bad_tolerance() {
        assert!(DpConfig::default().with_tolerance(0.0).validate().is_err());
    }
}
