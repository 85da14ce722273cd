//! Round-robin scheduler, KPI evaluation and reporting.
//!
//! # Algorithm
//!
//! `RoundRobinScheduler` grants each unfinished workload at most one
//! quantum per cycle, in ascending ID order, until all have completed.
//! The run is single-threaded and deterministic: identical burst times
//! and quantum always produce the identical trace.
//!
//! # KPI
//!
//! `SimulationKpi` computes waiting, turnaround and response times per
//! workload plus their means, makespan, context switches and utilization.
//! `MetricsReporter` packages these with the trace into a `Report`.
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4.3

mod kpi;
mod report;
mod round_robin;

pub use kpi::{SimulationKpi, WorkloadRow};
pub use report::{MetricsReporter, Report};
pub use round_robin::{
    CycleSummary, QueuePolicy, RoundRobinScheduler, SchedulerState, Simulation,
    SimulationOutcome,
};
