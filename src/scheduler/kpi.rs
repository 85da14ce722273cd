//! Simulation quality metrics (KPIs).
//!
//! Computes standard CPU-scheduling indicators from a finished workload
//! table and the dispatch trace of its run.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Waiting | turnaround - burst |
//! | Turnaround | completion clock (all arrive at t=0) |
//! | Response | clock at first dispatch |
//! | Makespan | latest completion |
//! | Context switches | dispatches that change workload |
//! | CPU utilization | total burst / makespan |
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.2: Scheduling Criteria

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};
use crate::models::{Ticks, Trace, WorkloadId, WorkloadTable};

/// Per-workload metrics row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkloadRow {
    /// Workload ID.
    pub id: WorkloadId,
    /// Total execution time required.
    pub burst_time: Ticks,
    /// Time spent ready but not running.
    pub waiting_time: Ticks,
    /// Time from start to completion.
    pub turnaround_time: Ticks,
    /// Clock at first dispatch.
    pub response_time: Ticks,
    /// Number of slices granted.
    pub dispatches: usize,
}

/// Simulation performance indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationKpi {
    /// Rows in ascending ID order.
    pub rows: Vec<WorkloadRow>,
    /// Mean waiting time.
    pub mean_waiting: f64,
    /// Mean turnaround time.
    pub mean_turnaround: f64,
    /// Mean response time.
    pub mean_response: f64,
    /// Latest completion clock.
    pub makespan: Ticks,
    /// Sum of burst times.
    pub total_burst: Ticks,
    /// Number of dispatch events.
    pub dispatch_count: usize,
    /// Dispatches that switched to a different workload.
    pub context_switches: usize,
    /// Busy fraction of the makespan (0.0..1.0).
    pub cpu_utilization: f64,
}

impl SimulationKpi {
    /// Computes KPIs from a finished table and its trace.
    ///
    /// # Errors
    /// `SimError::IncompleteRun` if any workload has not completed.
    pub fn calculate(table: &WorkloadTable, trace: &Trace) -> Result<Self> {
        let mut rows = Vec::with_capacity(table.len());
        for w in table {
            let (Some(waiting_time), Some(turnaround_time)) = (w.waiting_time(), w.turnaround_time())
            else {
                return Err(SimError::IncompleteRun {
                    pending: table.pending_count(),
                });
            };
            rows.push(WorkloadRow {
                id: w.id(),
                burst_time: w.burst_time(),
                waiting_time,
                turnaround_time,
                response_time: trace.first_dispatch(w.id()).unwrap_or(0),
                dispatches: trace.for_workload(w.id()).count(),
            });
        }

        let makespan = rows.iter().map(|r| r.turnaround_time).max().unwrap_or(0);
        let total_burst = table.total_burst();
        let cpu_utilization = if makespan == 0 {
            0.0
        } else {
            total_burst as f64 / makespan as f64
        };

        Ok(Self {
            mean_waiting: mean(rows.iter().map(|r| r.waiting_time)),
            mean_turnaround: mean(rows.iter().map(|r| r.turnaround_time)),
            mean_response: mean(rows.iter().map(|r| r.response_time)),
            rows,
            makespan,
            total_burst,
            dispatch_count: trace.len(),
            context_switches: trace.context_switches(),
            cpu_utilization,
        })
    }

    /// Row for a workload.
    pub fn row(&self, id: WorkloadId) -> Option<&WorkloadRow> {
        self.rows.iter().find(|r| r.id == id)
    }

    /// Sum of waiting times.
    ///
    /// Widened: per-row values fit [`Ticks`] but their sum may not.
    pub fn total_waiting(&self) -> i128 {
        self.rows.iter().map(|r| i128::from(r.waiting_time)).sum()
    }

    /// Sum of turnaround times.
    pub fn total_turnaround(&self) -> i128 {
        self.rows.iter().map(|r| i128::from(r.turnaround_time)).sum()
    }
}

fn mean(values: impl Iterator<Item = Ticks>) -> f64 {
    let (sum, count) = values.fold((0i128, 0usize), |(s, c), v| (s + i128::from(v), c + 1));
    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}
