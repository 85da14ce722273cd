//! Dispatch trace.
//!
//! The scheduler emits one [`DispatchEvent`] per slice it grants. The
//! emission order is deterministic and is part of the observable result.

use serde::{Deserialize, Serialize};

use super::{Ticks, WorkloadId};

/// What a dispatch left behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DispatchOutcome {
    /// The workload still needs this much time.
    Remaining { remaining: Ticks },
    /// The workload finished; `at` is the clock after the slice.
    Finished { at: Ticks },
}

/// One contiguous slice of execution granted to a workload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchEvent {
    /// Clock when the slice started.
    pub clock: Ticks,
    /// Dispatched workload.
    pub workload_id: WorkloadId,
    /// Slice length.
    pub slice: Ticks,
    /// Remaining time or finish marker.
    pub outcome: DispatchOutcome,
}

impl DispatchEvent {
    /// Clock when the slice ended.
    #[inline]
    pub fn end_clock(&self) -> Ticks {
        self.clock + self.slice
    }

    /// Whether this dispatch finished its workload.
    #[inline]
    pub fn is_finish(&self) -> bool {
        matches!(self.outcome, DispatchOutcome::Finished { .. })
    }

    /// Remaining time after the slice (0 when finished).
    pub fn remaining_after(&self) -> Ticks {
        match self.outcome {
            DispatchOutcome::Remaining { remaining } => remaining,
            DispatchOutcome::Finished { .. } => 0,
        }
    }
}

/// Ordered list of dispatch events for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Trace {
    events: Vec<DispatchEvent>,
}

impl Trace {
    /// Creates an empty trace.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, event: DispatchEvent) {
        debug_assert!(
            self.events
                .last()
                .is_none_or(|prev| prev.end_clock() <= event.clock),
            "dispatch at t={} overlaps the previous slice",
            event.clock
        );
        self.events.push(event);
    }

    /// Number of dispatches.
    #[inline]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether nothing was dispatched.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events in emission order.
    pub fn events(&self) -> &[DispatchEvent] {
        &self.events
    }

    /// Events in emission order.
    pub fn iter(&self) -> std::slice::Iter<'_, DispatchEvent> {
        self.events.iter()
    }

    /// Events for one workload, in emission order.
    pub fn for_workload(&self, id: WorkloadId) -> impl Iterator<Item = &DispatchEvent> {
        self.events.iter().filter(move |e| e.workload_id == id)
    }

    /// Total time dispatched to a workload.
    pub fn executed_for(&self, id: WorkloadId) -> Ticks {
        self.for_workload(id).map(|e| e.slice).sum()
    }

    /// Clock at a workload's first dispatch.
    pub fn first_dispatch(&self, id: WorkloadId) -> Option<Ticks> {
        self.for_workload(id).next().map(|e| e.clock)
    }

    /// Number of dispatches that switched to a different workload.
    ///
    /// The very first dispatch is not a switch.
    pub fn context_switches(&self) -> usize {
        self.events
            .windows(2)
            .filter(|pair| pair[0].workload_id != pair[1].workload_id)
            .count()
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a DispatchEvent;
    type IntoIter = std::slice::Iter<'a, DispatchEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
