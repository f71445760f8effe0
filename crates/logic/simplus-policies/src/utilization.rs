//! Resource utilization models

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use simplus_core::{PolicyError, Result, UtilizationModel};

fn check_fraction(label: &str, value: f64) -> Result<()> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(PolicyError::invalid_utilization(format!(
            "{label} must be within [0, 1], got {value}"
        )))
    }
}

/// Always uses the whole resource
#[derive(Debug, Default)]
pub struct UtilizationModelFull;

impl UtilizationModelFull {
    pub fn new() -> Self {
        UtilizationModelFull
    }
}

impl UtilizationModel for UtilizationModelFull {
    fn name(&self) -> &str {
        "Full"
    }

    fn utilization(&mut self, _time: f64) -> f64 {
        1.0
    }
}

/// Starts at an initial utilization and grows linearly up to a maximum
#[derive(Debug)]
pub struct UtilizationModelDynamic {
    initial: f64,
    increment_per_sec: f64,
    max: f64,
}

impl Default for UtilizationModelDynamic {
    fn default() -> Self {
        Self {
            initial: 0.0,
            increment_per_sec: 0.0,
            max: 1.0,
        }
    }
}

impl UtilizationModelDynamic {
    /// Constant zero utilization until configured otherwise
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a model with explicit parameters
    pub fn with_parameters(initial: f64, increment_per_sec: f64, max: f64) -> Result<Self> {
        check_fraction("initial utilization", initial)?;
        check_fraction("max utilization", max)?;
        if !increment_per_sec.is_finite() {
            return Err(PolicyError::invalid_utilization(
                "increment must be a finite number",
            ));
        }
        Ok(Self {
            initial,
            increment_per_sec,
            max,
        })
    }
}

impl UtilizationModel for UtilizationModelDynamic {
    fn name(&self) -> &str {
        "Dynamic"
    }

    fn utilization(&mut self, time: f64) -> f64 {
        let value = self.initial + self.increment_per_sec * time.max(0.0);
        value.clamp(0.0, self.max)
    }
}

/// Uniformly random utilization, stable while the time instant repeats.
///
/// Only the latest draw is kept: asking again for an earlier instant draws
/// a new value.
#[derive(Debug)]
pub struct UtilizationModelStochastic {
    rng: StdRng,
    /// Bits of the last time instant and the value drawn for it
    last: Option<(u64, f64)>,
}

impl Default for UtilizationModelStochastic {
    fn default() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl UtilizationModelStochastic {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reproducible model for a given seed
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            rng,
            last: None,
        }
    }
}

impl UtilizationModel for UtilizationModelStochastic {
    fn name(&self) -> &str {
        "Stochastic"
    }

    fn utilization(&mut self, time: f64) -> f64 {
        let key = time.to_bits();
        match self.last {
            Some((instant, value)) if instant == key => value,
            _ => {
                let value = self.rng.gen_range(0.0..=1.0);
                self.last = Some((key, value));
                value
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full() {
        let mut model = UtilizationModelFull::new();
        assert_eq!(model.utilization(0.0), 1.0);
        assert_eq!(model.utilization(1e6), 1.0);
    }

    #[test]
    fn test_dynamic_default_is_constant_zero() {
        let mut model = UtilizationModelDynamic::new();
        assert_eq!(model.utilization(0.0), 0.0);
        assert_eq!(model.utilization(100.0), 0.0);
    }

    #[test]
    fn test_dynamic_grows_to_max() {
        let mut model = UtilizationModelDynamic::with_parameters(0.1, 0.1, 0.5).unwrap();
        assert!((model.utilization(0.0) - 0.1).abs() < 1e-12);
        assert!((model.utilization(2.0) - 0.3).abs() < 1e-12);
        assert_eq!(model.utilization(10.0), 0.5);
    }

    #[test]
    fn test_dynamic_rejects_invalid_parameters() {
        assert!(UtilizationModelDynamic::with_parameters(1.5, 0.0, 1.0).is_err());
        assert!(UtilizationModelDynamic::with_parameters(0.0, f64::NAN, 1.0).is_err());
        assert!(UtilizationModelDynamic::with_parameters(0.0, 0.1, -0.1).is_err());
    }

    #[test]
    fn test_stochastic_is_stable_per_time() {
        let mut model = UtilizationModelStochastic::with_seed(42);

        let first = model.utilization(10.0);
        assert!((0.0..=1.0).contains(&first));
        assert_eq!(model.utilization(10.0), first);

        let mut same_seed = UtilizationModelStochastic::with_seed(42);
        assert_eq!(same_seed.utilization(10.0), first);
    }

    #[test]
    fn test_stochastic_keeps_only_latest_instant() {
        let mut model = UtilizationModelStochastic::with_seed(7);
        let mut replay = UtilizationModelStochastic::with_seed(7);

        model.utilization(1.0);
        model.utilization(2.0);
        assert_eq!(model.last.map(|(instant, _)| instant), Some(2.0_f64.to_bits()));

        // Going back to 1.0 draws the third value of the stream
        replay.utilization(1.0);
        replay.utilization(2.0);
        assert_eq!(model.utilization(1.0), replay.utilization(3.0));
    }
}
