//! Round-robin scheduler.
//!
//! # Algorithm
//!
//! One cycle is a full pass over workload IDs in ascending order:
//! 1. Skip workloads that already completed.
//! 2. Dispatch the rest for `min(remaining, quantum)` ticks, advancing the clock.
//! 3. On reaching zero remaining, record turnaround (= clock) and waiting
//!    (= turnaround - burst) and count the completion.
//! 4. If a whole cycle dispatched nothing while work is pending, advance
//!    the clock by one idle tick. Positive burst times make this unreachable.
//!
//! Cycles repeat until every workload has completed.
//!
//! # Termination
//! Every dispatch removes at least one tick from the total remaining time,
//! so a run takes at most `ceil(total_burst / quantum) * n` dispatches.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3.3

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use crate::error::{Result, SimError};
use crate::models::{DispatchEvent, DispatchOutcome, Ticks, Trace, WorkloadId, WorkloadTable};
use crate::validation::validate_quantum;

/// How the ready queue is represented.
///
/// Both policies produce the same dispatch order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QueuePolicy {
    /// Rescan IDs 1..=n every cycle, skipping completed workloads.
    #[default]
    SkipScan,
    /// Keep unfinished IDs in a FIFO; requeue after each non-final slice.
    ExplicitQueue,
}

/// Scheduler state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// Some workload still has remaining time.
    Running,
    /// Every workload has completed.
    Done,
}

/// What one cycle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleSummary {
    /// 1-based cycle number.
    pub cycle: usize,
    /// Slices granted in this cycle.
    pub dispatches: usize,
    /// Workloads that finished in this cycle.
    pub completions: usize,
    /// Whether the idle safety tick fired.
    pub idle_tick: bool,
}

/// Result of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationOutcome {
    /// Dispatch events in emission order.
    pub trace: Trace,
    /// Clock value when the last workload finished.
    pub final_clock: Ticks,
    /// Number of cycles executed.
    pub cycles: usize,
    /// Number of idle safety ticks taken.
    pub idle_ticks: usize,
}

/// Quantum-bounded round-robin scheduler.
///
/// # Example
///
/// ```
/// use u_roundrobin::models::WorkloadTable;
/// use u_roundrobin::scheduler::RoundRobinScheduler;
///
/// let mut table = WorkloadTable::initialize(&[5, 3, 8]).unwrap();
/// let scheduler = RoundRobinScheduler::new(2).unwrap();
/// let outcome = scheduler.run(&mut table).unwrap();
///
/// assert_eq!(outcome.final_clock, 16);
/// assert_eq!(outcome.trace.len(), 9);
/// assert_eq!(table.get(2).unwrap().turnaround_time(), Some(9));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundRobinScheduler {
    quantum: Ticks,
    policy: QueuePolicy,
}

impl RoundRobinScheduler {
    /// Creates a scheduler with the given quantum.
    ///
    /// # Errors
    /// `SimError::InvalidConfiguration` if `quantum <= 0`.
    pub fn new(quantum: Ticks) -> Result<Self> {
        validate_quantum(quantum)?;
        Ok(Self {
            quantum,
            policy: QueuePolicy::SkipScan,
        })
    }

    /// Sets the ready-queue policy.
    pub fn with_policy(mut self, policy: QueuePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Time quantum.
    pub fn quantum(&self) -> Ticks {
        self.quantum
    }

    /// Ready-queue policy.
    pub fn policy(&self) -> QueuePolicy {
        self.policy
    }

    /// Starts a stepwise simulation over `table`.
    ///
    /// A table is single-use: it must not have received any execution time.
    ///
    /// # Errors
    /// `SimError::TableAlreadyRun` if any workload has executed.
    pub fn start<'a>(&self, table: &'a mut WorkloadTable) -> Result<Simulation<'a>> {
        let executed = table.total_burst() - table.total_remaining();
        if executed != 0 {
            return Err(SimError::TableAlreadyRun { executed });
        }
        Ok(Simulation::new(table, self.quantum, self.policy))
    }

    /// Runs `table` to completion.
    ///
    /// # Errors
    /// Same as [`start`](Self::start).
    pub fn run(&self, table: &mut WorkloadTable) -> Result<SimulationOutcome> {
        Ok(self.start(table)?.run())
    }
}

/// A simulation in progress.
///
/// Holds the only mutable borrow of the workload table until it finishes.
#[derive(Debug)]
pub struct Simulation<'a> {
    table: &'a mut WorkloadTable,
    quantum: Ticks,
    policy: QueuePolicy,
    clock: Ticks,
    completed: usize,
    cycles: usize,
    idle_ticks: usize,
    ready: VecDeque<WorkloadId>,
    trace: Trace,
}

impl<'a> Simulation<'a> {
    fn new(table: &'a mut WorkloadTable, quantum: Ticks, policy: QueuePolicy) -> Self {
        let ready = match policy {
            QueuePolicy::SkipScan => VecDeque::new(),
            QueuePolicy::ExplicitQueue => table.ids().collect(),
        };

        Self {
            table,
            quantum,
            policy,
            clock: 0,
            completed: 0,
            cycles: 0,
            idle_ticks: 0,
            ready,
            trace: Trace::new(),
        }
    }

    /// Current state.
    pub fn state(&self) -> SchedulerState {
        if self.completed < self.table.len() {
            SchedulerState::Running
        } else {
            SchedulerState::Done
        }
    }

    /// Current simulated clock.
    pub fn clock(&self) -> Ticks {
        self.clock
    }

    /// Number of completed workloads.
    pub fn completed_count(&self) -> usize {
        self.completed
    }

    /// Trace emitted so far.
    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    /// Read-only view of the table being scheduled.
    pub fn table(&self) -> &WorkloadTable {
        &*self.table
    }

    /// Runs one cycle. Returns `None` once the simulation is `Done`.
    pub fn step_cycle(&mut self) -> Option<CycleSummary> {
        if self.state() == SchedulerState::Done {
            return None;
        }

        self.cycles += 1;
        let completed_before = self.completed;
        let dispatches = match self.policy {
            QueuePolicy::SkipScan => self.scan_cycle(),
            QueuePolicy::ExplicitQueue => self.queue_cycle(),
        };

        // Unreachable with positive bursts; kept so a stalled cycle still moves time.
        let idle_tick = dispatches == 0 && self.completed < self.table.len();
        if idle_tick {
            self.clock += 1;
            self.idle_ticks += 1;
            warn!(clock = self.clock, cycle = self.cycles, "idle cycle with pending work");
        }

        let summary = CycleSummary {
            cycle: self.cycles,
            dispatches,
            completions: self.completed - completed_before,
            idle_tick,
        };
        trace!(?summary, "cycle finished");
        Some(summary)
    }

    /// Runs cycles until `Done` and returns the outcome.
    pub fn run(mut self) -> SimulationOutcome {
        while self.step_cycle().is_some() {}
        info!(
            clock = self.clock,
            cycles = self.cycles,
            dispatches = self.trace.len(),
            "simulation done"
        );
        self.finish()
    }

    /// Ends the simulation, releasing the table, and returns what ran so far.
    pub fn finish(self) -> SimulationOutcome {
        SimulationOutcome {
            trace: self.trace,
            final_clock: self.clock,
            cycles: self.cycles,
            idle_ticks: self.idle_ticks,
        }
    }

    fn scan_cycle(&mut self) -> usize {
        let mut dispatches = 0;
        for id in 1..=self.table.len() {
            let eligible = self.table.get(id).is_some_and(|w| !w.is_completed());
            if eligible {
                self.dispatch(id);
                dispatches += 1;
            }
        }
        dispatches
    }

    fn queue_cycle(&mut self) -> usize {
        let mut dispatches = 0;
        for _ in 0..self.ready.len() {
            let Some(id) = self.ready.pop_front() else {
                break;
            };
            if !self.dispatch(id) {
                self.ready.push_back(id);
            }
            dispatches += 1;
        }
        dispatches
    }

    /// Grants one slice to `id`. Returns `true` if the workload finished.
    fn dispatch(&mut self, id: WorkloadId) -> bool {
        let Some(workload) = self.table.get_mut(id) else {
            return false;
        };

        let clock_before = self.clock;
        let slice = workload.next_slice(self.quantum);
        self.clock += slice;
        let finished = workload.consume(slice);

        let outcome = if finished {
            workload.complete(self.clock);
            self.completed += 1;
            info!(
                id,
                clock = self.clock,
                waiting = workload.waiting_time(),
                "workload finished"
            );
            DispatchOutcome::Finished { at: self.clock }
        } else {
            DispatchOutcome::Remaining {
                remaining: workload.remaining_time(),
            }
        };

        debug!(clock = clock_before, id, slice, ?outcome, "dispatch");
        self.trace.push(DispatchEvent {
            clock: clock_before,
            workload_id: id,
            slice,
            outcome,
        });
        finished
    }
}
