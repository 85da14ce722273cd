//! Workload (process) model.
//!
//! A workload is one competing process in the round-robin simulation.
//! Its identity and burst time are fixed at creation; only the scheduler
//! mutates its run-time state.
//!
//! # Time Representation
//! All times are integer ticks relative to the simulation start (t=0).
//! Every workload is ready at t=0, so turnaround equals the completion clock.

use serde::{Deserialize, Serialize};

use crate::validation::{ValidationError, ValidationErrorKind};

/// Simulated time unit.
pub type Ticks = i64;

/// Workload identifier (1-based, assigned in input order).
pub type WorkloadId = usize;

/// A workload competing for the simulated processor.
///
/// Deserialized only as part of a [`WorkloadTable`](super::WorkloadTable),
/// which checks the stored state first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Workload {
    id: WorkloadId,
    burst_time: Ticks,
    remaining_time: Ticks,
    waiting_time: Option<Ticks>,
    turnaround_time: Option<Ticks>,
    completed: bool,
}

impl Workload {
    /// Creates a fresh, not-yet-dispatched workload.
    ///
    /// Callers are expected to have validated `burst_time > 0`;
    /// `WorkloadTable::initialize` is the checked entry point.
    pub(crate) fn new(id: WorkloadId, burst_time: Ticks) -> Self {
        Self {
            id,
            burst_time,
            remaining_time: burst_time,
            waiting_time: None,
            turnaround_time: None,
            completed: false,
        }
    }

    /// Workload ID.
    #[inline]
    pub fn id(&self) -> WorkloadId {
        self.id
    }

    /// Total execution time required.
    #[inline]
    pub fn burst_time(&self) -> Ticks {
        self.burst_time
    }

    /// Execution time still owed.
    #[inline]
    pub fn remaining_time(&self) -> Ticks {
        self.remaining_time
    }

    /// Time spent ready but not executing. `None` until completion.
    #[inline]
    pub fn waiting_time(&self) -> Option<Ticks> {
        self.waiting_time
    }

    /// Time from start to completion. `None` until completion.
    #[inline]
    pub fn turnaround_time(&self) -> Option<Ticks> {
        self.turnaround_time
    }

    /// Whether the workload has finished.
    #[inline]
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Execution time already granted.
    pub fn executed_time(&self) -> Ticks {
        self.burst_time - self.remaining_time
    }

    /// Length of the next slice under `quantum`: `min(remaining, quantum)`.
    #[inline]
    pub fn next_slice(&self, quantum: Ticks) -> Ticks {
        self.remaining_time.min(quantum)
    }

    /// Consumes `slice` ticks of remaining time.
    ///
    /// Returns `true` if this call drove the remaining time to zero.
    pub(crate) fn consume(&mut self, slice: Ticks) -> bool {
        debug_assert!(!self.completed, "P{} dispatched after completion", self.id);
        debug_assert!(
            slice > 0 && slice <= self.remaining_time,
            "P{} slice {slice} outside (0, {}]",
            self.id,
            self.remaining_time
        );
        self.remaining_time -= slice;
        self.remaining_time == 0
    }

    /// Records completion at `clock`.
    ///
    /// Turnaround is the completion clock (all workloads arrive at t=0);
    /// waiting is turnaround minus burst.
    pub(crate) fn complete(&mut self, clock: Ticks) {
        debug_assert_eq!(self.remaining_time, 0);
        debug_assert!(!self.completed, "P{} completed twice", self.id);
        let turnaround = clock;
        self.turnaround_time = Some(turnaround);
        self.waiting_time = Some(turnaround - self.burst_time);
        self.completed = true;
    }

    #[cfg(test)]
    pub(crate) fn force_completed(&mut self) {
        self.remaining_time = 0;
        self.completed = true;
    }
}

/// Unchecked serialized form of a [`Workload`].
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WorkloadRecord {
    id: WorkloadId,
    burst_time: Ticks,
    remaining_time: Ticks,
    waiting_time: Option<Ticks>,
    turnaround_time: Option<Ticks>,
    completed: bool,
}

impl WorkloadRecord {
    pub(crate) fn burst_time(&self) -> Ticks {
        self.burst_time
    }

    /// Checks the record as the workload at 1-based position `expected_id`.
    ///
    /// Burst positivity is left to `validate_burst_times`.
    pub(crate) fn check(&self, expected_id: WorkloadId) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        let mut fail = |message: String| {
            errors.push(ValidationError::new(
                ValidationErrorKind::InconsistentWorkload,
                message,
            ))
        };
        let id = self.id;

        if id != expected_id {
            fail(format!("Workload at position {expected_id} has id {id}"));
        }
        if self.remaining_time < 0 || self.remaining_time > self.burst_time {
            fail(format!(
                "P{id} remaining time {} outside [0, {}]",
                self.remaining_time, self.burst_time
            ));
        }
        if self.completed != (self.remaining_time == 0) {
            fail(format!(
                "P{id} completed={} does not match remaining time {}",
                self.completed, self.remaining_time
            ));
        }

        match (self.completed, self.waiting_time, self.turnaround_time) {
            (false, None, None) => {}
            (true, Some(waiting), Some(turnaround)) => {
                if turnaround.checked_sub(self.burst_time) != Some(waiting) || waiting < 0 {
                    fail(format!(
                        "P{id} waiting {waiting} is not turnaround {turnaround} minus burst {}",
                        self.burst_time
                    ));
                }
            }
            (true, _, _) => fail(format!("P{id} is completed without waiting/turnaround times")),
            (false, _, _) => fail(format!("P{id} has metrics before completion")),
        }

        errors
    }

    /// Converts a record that passed [`check`](Self::check).
    pub(crate) fn into_workload(self) -> Workload {
        Workload {
            id: self.id,
            burst_time: self.burst_time,
            remaining_time: self.remaining_time,
            waiting_time: self.waiting_time,
            turnaround_time: self.turnaround_time,
            completed: self.completed,
        }
    }
}
