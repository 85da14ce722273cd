//! Simulation configuration.
//!
//! A `SimulationConfig` carries everything one run needs. It can be built
//! in code with `with_*` methods or loaded from JSON:
//!
//! ```json
//! { "burst_times": [5, 3, 8], "quantum": 2 }
//! ```
//!
//! `max_capacity` defaults to [`DEFAULT_MAX_CAPACITY`] and `queue_policy`
//! to `"skip-scan"`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{Ticks, WorkloadTable, DEFAULT_MAX_CAPACITY};
use crate::scheduler::{QueuePolicy, RoundRobinScheduler};
use crate::validation::{validate_input, ValidationResult};

/// Input for one round-robin simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Burst time per workload, in ID order.
    pub burst_times: Vec<Ticks>,
    /// Time quantum.
    pub quantum: Ticks,
    /// Maximum number of workloads.
    #[serde(default = "default_max_capacity")]
    pub max_capacity: usize,
    /// Ready-queue representation.
    #[serde(default)]
    pub queue_policy: QueuePolicy,
}

fn default_max_capacity() -> usize {
    DEFAULT_MAX_CAPACITY
}

impl SimulationConfig {
    /// Creates a config with default capacity and policy.
    pub fn new(burst_times: Vec<Ticks>, quantum: Ticks) -> Self {
        Self {
            burst_times,
            quantum,
            max_capacity: DEFAULT_MAX_CAPACITY,
            queue_policy: QueuePolicy::default(),
        }
    }

    /// Sets the table capacity.
    pub fn with_max_capacity(mut self, max_capacity: usize) -> Self {
        self.max_capacity = max_capacity;
        self
    }

    /// Sets the ready-queue policy.
    pub fn with_queue_policy(mut self, policy: QueuePolicy) -> Self {
        self.queue_policy = policy;
        self
    }

    /// Parses a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Checks every field, reporting all issues.
    pub fn validate(&self) -> ValidationResult {
        validate_input(&self.burst_times, self.quantum, self.max_capacity)
    }

    /// Builds the workload table and scheduler.
    ///
    /// Validation runs first over the whole config, so either both are
    /// returned or nothing is built.
    pub fn build(&self) -> Result<(WorkloadTable, RoundRobinScheduler)> {
        self.validate()?;
        let table = WorkloadTable::initialize_with_capacity(&self.burst_times, self.max_capacity)?;
        let scheduler = RoundRobinScheduler::new(self.quantum)?.with_policy(self.queue_policy);
        Ok((table, scheduler))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimError;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_json_defaults() {
        let config = SimulationConfig::from_json_str(r#"{"burst_times":[5,3,8],"quantum":2}"#)
            .unwrap();
        assert_eq!(config.burst_times, vec![5, 3, 8]);
        assert_eq!(config.quantum, 2);
        assert_eq!(config.max_capacity, DEFAULT_MAX_CAPACITY);
        assert_eq!(config.queue_policy, QueuePolicy::SkipScan);
    }

    #[test]
    fn test_json_explicit_fields() {
        let json = r#"{
            "burst_times": [1, 2],
            "quantum": 4,
            "max_capacity": 64,
            "queue_policy": "explicit-queue"
        }"#;
        let config = SimulationConfig::from_json_str(json).unwrap();
        assert_eq!(config.max_capacity, 64);
        assert_eq!(config.queue_policy, QueuePolicy::ExplicitQueue);
    }

    #[test]
    fn test_malformed_json() {
        let err = SimulationConfig::from_json_str(r#"{"quantum": 2}"#).unwrap_err();
        assert!(matches!(err, SimError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = SimulationConfig::from_path("/nonexistent/rr-config.json").unwrap_err();
        assert!(matches!(err, SimError::Io(_)));
    }

    #[test]
    fn test_build_valid() {
        let config = SimulationConfig::new(vec![5, 3, 8], 2)
            .with_queue_policy(QueuePolicy::ExplicitQueue);
        let (table, scheduler) = config.build().unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(scheduler.quantum(), 2);
        assert_eq!(scheduler.policy(), QueuePolicy::ExplicitQueue);
    }

    #[test]
    fn test_build_reports_all_issues() {
        let err = SimulationConfig::new(vec![3, -1], 0).build().unwrap_err();
        assert!(err.has_kind(ValidationErrorKind::NonPositiveBurst));
        assert!(err.has_kind(ValidationErrorKind::NonPositiveQuantum));
    }

    #[test]
    fn test_capacity_override() {
        let config = SimulationConfig::new(vec![1, 1, 1], 1).with_max_capacity(2);
        let errors = config.validate().unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::CapacityExceeded);
    }

    #[test]
    fn test_serde_round_trip() {
        let config = SimulationConfig::new(vec![4], 10);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(SimulationConfig::from_json_str(&json).unwrap(), config);
    }
}
