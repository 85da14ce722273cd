//! Error types for the round-robin simulator.

use thiserror::Error;

use crate::models::Ticks;
use crate::validation::{ValidationError, ValidationErrorKind};

/// Main error type for simulation setup and reporting.
///
/// The scheduler loop itself never fails; every variant here is raised
/// before a simulation starts or when a report is requested too early.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid configuration: {}", join_messages(.0))]
    InvalidConfiguration(Vec<ValidationError>),

    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Simulation incomplete: {pending} workload(s) still pending")]
    IncompleteRun { pending: usize },

    #[error("Workload table already ran: {executed} tick(s) executed; build a fresh table")]
    TableAlreadyRun { executed: Ticks },
}

/// Convenient Result type
pub type Result<T> = std::result::Result<T, SimError>;

impl SimError {
    /// Whether this is an `InvalidConfiguration` error.
    pub fn is_invalid_configuration(&self) -> bool {
        matches!(self, Self::InvalidConfiguration(_))
    }

    /// Validation issues carried by an `InvalidConfiguration` error.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            Self::InvalidConfiguration(errors) => errors,
            _ => &[],
        }
    }

    /// Whether any carried validation issue has the given kind.
    pub fn has_kind(&self, kind: ValidationErrorKind) -> bool {
        self.validation_errors().iter().any(|e| e.kind == kind)
    }
}

impl From<Vec<ValidationError>> for SimError {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::InvalidConfiguration(errors)
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_input;

    #[test]
    fn test_invalid_configuration_display() {
        let err = SimError::from(validate_input(&[0], 0, 10).unwrap_err());
        assert!(err.is_invalid_configuration());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: Burst time for P1 must be positive, got 0; \
             Time quantum must be positive, got 0"
        );
        assert!(err.has_kind(ValidationErrorKind::NonPositiveQuantum));
    }

    #[test]
    fn test_incomplete_run_display() {
        let err = SimError::IncompleteRun { pending: 2 };
        assert!(!err.is_invalid_configuration());
        assert!(err.validation_errors().is_empty());
        assert_eq!(err.to_string(), "Simulation incomplete: 2 workload(s) still pending");
    }
}
