use crate::domain::agent::learning_parameters::LearningParameters;
use crate::error::ConversionError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Interval `[min, max)` simulated execution times are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExecutionTimeRange {
    min: f64,
    max: f64,
}

impl ExecutionTimeRange {
    pub fn new(min: f64, max: f64) -> Result<Self, ConversionError> {
        if !(min.is_finite() && max.is_finite() && min > 0.0 && min < max) {
            return Err(ConversionError::InvalidExecutionTimeRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }
}

impl Default for ExecutionTimeRange {
    fn default() -> Self {
        Self { min: 1.0, max: 10.0 }
    }
}

/// How the cost of a successful migration is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MigrationCost {
    /// Reads the job's execution time at the destination before the job is
    /// recorded there. The lookup yields `0.0`, so the reward is always zero.
    #[default]
    RecordedAtDestination,
    /// Records the execution time simulated at submission on the destination
    /// and rewards its negation.
    Simulated,
}

impl FromStr for MigrationCost {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "recordedAtDestination" => Ok(MigrationCost::RecordedAtDestination),
            "simulated" => Ok(MigrationCost::Simulated),
            _ => Err(format!("unknown migration cost '{}'", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SchedulerConfig {
    pub learning: LearningParameters,
    pub execution_time_range: ExecutionTimeRange,
    pub migration_cost: MigrationCost,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_range_matches_reference_interval() {
        let range = ExecutionTimeRange::default();
        assert_eq!((range.min(), range.max()), (1.0, 10.0));
    }

    #[test]
    fn rejects_degenerate_ranges() {
        assert!(ExecutionTimeRange::new(0.0, 5.0).is_err());
        assert!(ExecutionTimeRange::new(5.0, 5.0).is_err());
        assert!(ExecutionTimeRange::new(2.0, f64::INFINITY).is_err());
        assert!(ExecutionTimeRange::new(0.5, 2.0).is_ok());
    }

    #[test]
    fn migration_cost_parses_camel_case_names() {
        assert_eq!("simulated".parse::<MigrationCost>(), Ok(MigrationCost::Simulated));
        assert_eq!("recordedAtDestination".parse::<MigrationCost>(), Ok(MigrationCost::RecordedAtDestination));
        assert!("other".parse::<MigrationCost>().is_err());
    }
}
