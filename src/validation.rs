//! Input validation for round-robin simulations.
//!
//! Checks the raw configuration before any workload table or scheduler
//! is built. Detects:
//! - Empty workload sets
//! - Workload counts above the table capacity
//! - Non-positive burst times
//! - Non-positive quanta
//! - Burst totals that overflow the simulation clock
//!
//! All issues are collected so a caller sees every problem at once.

use thiserror::Error;

use crate::models::Ticks;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// No burst times were supplied.
    EmptyWorkloadSet,
    /// More workloads than the table can hold.
    CapacityExceeded,
    /// A burst time is zero or negative.
    NonPositiveBurst,
    /// The time quantum is zero or negative.
    NonPositiveQuantum,
    /// The table capacity itself is zero.
    InvalidCapacity,
    /// The summed burst times do not fit the clock type.
    BurstOverflow,
    /// A stored workload breaks the table invariants.
    InconsistentWorkload,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates burst times against a table capacity.
///
/// Checks:
/// 1. Capacity is at least 1
/// 2. At least one burst time is given
/// 3. Burst count does not exceed capacity
/// 4. Every burst time is positive
/// 5. The total burst time fits in [`Ticks`]
pub fn validate_burst_times(burst_times: &[Ticks], max_capacity: usize) -> ValidationResult {
    let mut errors = Vec::new();

    if max_capacity == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidCapacity,
            "Workload table capacity must be at least 1",
        ));
    }

    if burst_times.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyWorkloadSet,
            "At least one workload is required",
        ));
    } else if max_capacity > 0 && burst_times.len() > max_capacity {
        errors.push(ValidationError::new(
            ValidationErrorKind::CapacityExceeded,
            format!(
                "{} workloads exceed the table capacity of {max_capacity}",
                burst_times.len()
            ),
        ));
    }

    for (i, &burst) in burst_times.iter().enumerate() {
        if burst <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveBurst,
                format!("Burst time for P{} must be positive, got {burst}", i + 1),
            ));
        }
    }

    let overflows = burst_times
        .iter()
        .try_fold(0, |total: Ticks, &burst| total.checked_add(burst.max(0)))
        .is_none();
    if overflows {
        errors.push(ValidationError::new(
            ValidationErrorKind::BurstOverflow,
            format!("Total burst time exceeds {}", Ticks::MAX),
        ));
    }

    finish(errors)
}

/// Validates the time quantum.
pub fn validate_quantum(quantum: Ticks) -> ValidationResult {
    if quantum <= 0 {
        return Err(vec![ValidationError::new(
            ValidationErrorKind::NonPositiveQuantum,
            format!("Time quantum must be positive, got {quantum}"),
        )]);
    }
    Ok(())
}

/// Validates a complete simulation input: burst times, capacity and quantum.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(burst_times: &[Ticks], quantum: Ticks, max_capacity: usize) -> ValidationResult {
    let mut errors = Vec::new();
    if let Err(mut e) = validate_burst_times(burst_times, max_capacity) {
        errors.append(&mut e);
    }
    if let Err(mut e) = validate_quantum(quantum) {
        errors.append(&mut e);
    }
    finish(errors)
}

fn finish(errors: Vec<ValidationError>) -> ValidationResult {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_kind(errors: &[ValidationError], kind: ValidationErrorKind) -> bool {
        errors.iter().any(|e| e.kind == kind)
    }

    #[test]
    fn test_valid_input() {
        assert!(validate_input(&[5, 3, 8], 2, 10).is_ok());
    }

    #[test]
    fn test_empty_workload_set() {
        let errors = validate_burst_times(&[], 10).unwrap_err();
        assert!(has_kind(&errors, ValidationErrorKind::EmptyWorkloadSet));
    }

    #[test]
    fn test_capacity_exceeded() {
        let bursts = vec![1; 11];
        let errors = validate_burst_times(&bursts, 10).unwrap_err();
        assert!(has_kind(&errors, ValidationErrorKind::CapacityExceeded));
    }

    #[test]
    fn test_capacity_boundary_accepted() {
        let bursts = vec![1; 10];
        assert!(validate_burst_times(&bursts, 10).is_ok());
    }

    #[test]
    fn test_zero_capacity() {
        let errors = validate_burst_times(&[1], 0).unwrap_err();
        assert!(has_kind(&errors, ValidationErrorKind::InvalidCapacity));
        assert!(!has_kind(&errors, ValidationErrorKind::CapacityExceeded));
    }

    #[test]
    fn test_non_positive_burst() {
        let errors = validate_burst_times(&[5, 0, -2], 10).unwrap_err();
        let bursts: Vec<_> = errors
            .iter()
            .filter(|e| e.kind == ValidationErrorKind::NonPositiveBurst)
            .collect();
        assert_eq!(bursts.len(), 2);
        assert!(bursts[0].message.contains("P2"));
        assert!(bursts[1].message.contains("P3"));
    }

    #[test]
    fn test_burst_total_overflow() {
        let errors = validate_burst_times(&[Ticks::MAX, Ticks::MAX], 10).unwrap_err();
        assert!(has_kind(&errors, ValidationErrorKind::BurstOverflow));

        // Exactly Ticks::MAX still fits
        assert!(validate_burst_times(&[Ticks::MAX - 1, 1], 10).is_ok());
        // Non-positive entries are reported as such, not as overflow
        let errors = validate_burst_times(&[Ticks::MAX, Ticks::MIN], 10).unwrap_err();
        assert!(!has_kind(&errors, ValidationErrorKind::BurstOverflow));
    }

    #[test]
    fn test_non_positive_quantum() {
        for q in [0, -1] {
            let errors = validate_quantum(q).unwrap_err();
            assert!(has_kind(&errors, ValidationErrorKind::NonPositiveQuantum));
        }
        assert!(validate_quantum(1).is_ok());
    }

    #[test]
    fn test_multiple_errors() {
        // Zero burst + zero quantum
        let errors = validate_input(&[0], 0, 10).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(has_kind(&errors, ValidationErrorKind::NonPositiveBurst));
        assert!(has_kind(&errors, ValidationErrorKind::NonPositiveQuantum));
    }

    #[test]
    fn test_error_display_is_message() {
        let errors = validate_quantum(0).unwrap_err();
        assert_eq!(errors[0].to_string(), "Time quantum must be positive, got 0");
    }
}
