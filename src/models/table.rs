//! Workload table.
//!
//! Owns the set of workloads for one simulation run. Built in bulk from
//! validated burst times, mutated only by the scheduler, then read by the
//! metrics reporter.

use serde::{Deserialize, Serialize};

use super::workload::WorkloadRecord;
use super::{Ticks, Workload, WorkloadId};
use crate::error::{Result, SimError};
use crate::validation::validate_burst_times;

/// Default maximum number of workloads in one table.
pub const DEFAULT_MAX_CAPACITY: usize = 10;

/// The set of workloads competing in one simulation.
///
/// Workloads are stored in ascending ID order; ID `i` lives at index `i - 1`.
///
/// Deserializing re-checks every invariant `initialize` and the scheduler
/// maintain, failing with `InvalidConfiguration` otherwise. Capacity is
/// not enforced on stored tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WorkloadTableRecord")]
pub struct WorkloadTable {
    workloads: Vec<Workload>,
}

impl WorkloadTable {
    /// Creates one workload per burst time, capped at [`DEFAULT_MAX_CAPACITY`].
    ///
    /// # Errors
    /// `SimError::InvalidConfiguration` if the sequence is empty, too long,
    /// or contains a non-positive value. No table is built on failure.
    pub fn initialize(burst_times: &[Ticks]) -> Result<Self> {
        Self::initialize_with_capacity(burst_times, DEFAULT_MAX_CAPACITY)
    }

    /// Creates one workload per burst time with an explicit capacity.
    pub fn initialize_with_capacity(burst_times: &[Ticks], max_capacity: usize) -> Result<Self> {
        validate_burst_times(burst_times, max_capacity)?;

        let workloads = burst_times
            .iter()
            .enumerate()
            .map(|(i, &burst)| Workload::new(i + 1, burst))
            .collect();

        Ok(Self { workloads })
    }

    /// Number of workloads.
    #[inline]
    pub fn len(&self) -> usize {
        self.workloads.len()
    }

    /// Whether the table has no workloads. Never true for a validated table.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.workloads.is_empty()
    }

    /// Looks up a workload by ID.
    pub fn get(&self, id: WorkloadId) -> Option<&Workload> {
        id.checked_sub(1).and_then(|idx| self.workloads.get(idx))
    }

    pub(crate) fn get_mut(&mut self, id: WorkloadId) -> Option<&mut Workload> {
        id.checked_sub(1).and_then(|idx| self.workloads.get_mut(idx))
    }

    /// Workloads in ascending ID order.
    pub fn iter(&self) -> impl Iterator<Item = &Workload> {
        self.workloads.iter()
    }

    /// All workload IDs in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = WorkloadId> + '_ {
        self.workloads.iter().map(Workload::id)
    }

    /// Number of completed workloads.
    pub fn completed_count(&self) -> usize {
        self.workloads.iter().filter(|w| w.is_completed()).count()
    }

    /// Number of workloads still owed execution time.
    pub fn pending_count(&self) -> usize {
        self.len() - self.completed_count()
    }

    /// Whether every workload has completed.
    pub fn is_done(&self) -> bool {
        self.workloads.iter().all(Workload::is_completed)
    }

    /// Sum of all burst times.
    pub fn total_burst(&self) -> Ticks {
        self.workloads.iter().map(Workload::burst_time).sum()
    }

    /// Sum of all remaining times.
    pub fn total_remaining(&self) -> Ticks {
        self.workloads.iter().map(Workload::remaining_time).sum()
    }
}

#[derive(Deserialize)]
struct WorkloadTableRecord {
    workloads: Vec<WorkloadRecord>,
}

impl TryFrom<WorkloadTableRecord> for WorkloadTable {
    type Error = SimError;

    fn try_from(record: WorkloadTableRecord) -> Result<Self> {
        let bursts: Vec<Ticks> = record.workloads.iter().map(WorkloadRecord::burst_time).collect();
        let mut errors = validate_burst_times(&bursts, bursts.len().max(1)).err().unwrap_or_default();
        for (i, w) in record.workloads.iter().enumerate() {
            errors.extend(w.check(i + 1));
        }
        if !errors.is_empty() {
            return Err(SimError::InvalidConfiguration(errors));
        }

        Ok(Self {
            workloads: record
                .workloads
                .into_iter()
                .map(WorkloadRecord::into_workload)
                .collect(),
        })
    }
}

impl<'a> IntoIterator for &'a WorkloadTable {
    type Item = &'a Workload;
    type IntoIter = std::slice::Iter<'a, Workload>;

    fn into_iter(self) -> Self::IntoIter {
        self.workloads.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::RoundRobinScheduler;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_initialize_assigns_sequential_ids() {
        let table = WorkloadTable::initialize(&[5, 3, 8]).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.ids().collect::<Vec<_>>(), vec![1, 2, 3]);

        let p2 = table.get(2).unwrap();
        assert_eq!(p2.burst_time(), 3);
        assert_eq!(p2.remaining_time(), 3);
        assert!(!p2.is_completed());
        assert_eq!(p2.waiting_time(), None);
    }

    #[test]
    fn test_lookup_out_of_range() {
        let table = WorkloadTable::initialize(&[1]).unwrap();
        assert!(table.get(0).is_none());
        assert!(table.get(2).is_none());
    }

    #[test]
    fn test_totals() {
        let table = WorkloadTable::initialize(&[5, 3, 8]).unwrap();
        assert_eq!(table.total_burst(), 16);
        assert_eq!(table.total_remaining(), 16);
        assert_eq!(table.completed_count(), 0);
        assert_eq!(table.pending_count(), 3);
        assert!(!table.is_done());
    }

    #[test]
    fn test_initialize_rejects_empty() {
        let err = WorkloadTable::initialize(&[]).unwrap_err();
        assert!(err.has_kind(ValidationErrorKind::EmptyWorkloadSet));
    }

    #[test]
    fn test_initialize_rejects_non_positive_burst() {
        let err = WorkloadTable::initialize(&[4, 0]).unwrap_err();
        assert!(err.is_invalid_configuration());
        assert!(err.has_kind(ValidationErrorKind::NonPositiveBurst));
    }

    #[test]
    fn test_serde_round_trip_after_run() {
        let mut table = WorkloadTable::initialize(&[5, 3, 8]).unwrap();
        RoundRobinScheduler::new(2).unwrap().run(&mut table).unwrap();

        let json = serde_json::to_string(&table).unwrap();
        let back: WorkloadTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, table);
    }

    #[test]
    fn test_deserialize_rejects_zero_remaining_not_completed() {
        let json = r#"{"workloads":[{"id":1,"burst_time":3,"remaining_time":0,
            "waiting_time":null,"turnaround_time":null,"completed":false}]}"#;
        let err = serde_json::from_str::<WorkloadTable>(json).unwrap_err();
        assert!(err.to_string().contains("P1 completed=false"));
    }

    #[test]
    fn test_deserialize_rejects_bad_ids_and_bursts() {
        let json = r#"{"workloads":[
            {"id":2,"burst_time":3,"remaining_time":3,"waiting_time":null,"turnaround_time":null,"completed":false},
            {"id":2,"burst_time":-1,"remaining_time":-1,"waiting_time":null,"turnaround_time":null,"completed":false}
        ]}"#;
        let err = serde_json::from_str::<WorkloadTable>(json).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("position 1 has id 2"));
        assert!(message.contains("Burst time for P2 must be positive"));

        let empty = serde_json::from_str::<WorkloadTable>(r#"{"workloads":[]}"#).unwrap_err();
        assert!(empty.to_string().contains("At least one workload"));
    }

    #[test]
    fn test_deserialized_table_runs_cleanly() {
        let json = r#"{"workloads":[{"id":1,"burst_time":3,"remaining_time":3,
            "waiting_time":null,"turnaround_time":null,"completed":false}]}"#;
        let mut table: WorkloadTable = serde_json::from_str(json).unwrap();
        let outcome = RoundRobinScheduler::new(2).unwrap().run(&mut table).unwrap();
        assert_eq!(outcome.trace.len(), 2);
        assert_eq!(table.get(1).unwrap().turnaround_time(), Some(3));
    }

    #[test]
    fn test_initialize_rejects_over_capacity() {
        let bursts = vec![2; DEFAULT_MAX_CAPACITY + 1];
        let err = WorkloadTable::initialize(&bursts).unwrap_err();
        assert!(err.has_kind(ValidationErrorKind::CapacityExceeded));

        // A larger capacity accepts the same input
        let table = WorkloadTable::initialize_with_capacity(&bursts, 32).unwrap();
        assert_eq!(table.len(), DEFAULT_MAX_CAPACITY + 1);
    }
}
