//! Round-robin CPU scheduling simulator for the U-Engine ecosystem.
//!
//! Models a fixed set of workloads, all ready at t=0, multiplexed onto one
//! processor under a bounded time quantum. Produces the dispatch trace and
//! per-workload waiting and turnaround metrics.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Workload`, `WorkloadTable`, `DispatchEvent`, `Trace`
//! - **`scheduler`**: `RoundRobinScheduler`, `SimulationKpi`, `MetricsReporter`
//! - **`validation`**: Input checks (empty set, capacity, non-positive burst/quantum)
//! - **`config`**: `SimulationConfig` with JSON loading
//! - **`generate`**: Seeded random burst times
//!
//! # Data Flow
//!
//! burst times + quantum → `WorkloadTable` → `RoundRobinScheduler` (mutates
//! the table, emits the trace) → `MetricsReporter` → `Report`.
//!
//! # Example
//!
//! ```
//! let report = u_roundrobin::simulate(&[5, 3, 8], 2).unwrap();
//! assert_eq!(report.kpi.makespan, 16);
//! assert_eq!(report.summary_lines()[1], "Average Turnaround Time: 12.33");
//!
//! let err = u_roundrobin::simulate(&[5, 3, 8], 0).unwrap_err();
//! assert!(err.is_invalid_configuration());
//! ```
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

pub mod config;
pub mod error;
pub mod generate;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use config::SimulationConfig;
pub use error::{Result, SimError};

use scheduler::{MetricsReporter, Report};

/// Runs a full simulation with default capacity and policy.
///
/// # Errors
/// `SimError::InvalidConfiguration` for any bad input; nothing is simulated.
pub fn simulate(burst_times: &[models::Ticks], quantum: models::Ticks) -> Result<Report> {
    run_config(&SimulationConfig::new(burst_times.to_vec(), quantum))
}

/// Runs a full simulation from a config.
pub fn run_config(config: &SimulationConfig) -> Result<Report> {
    let (mut table, scheduler) = config.build()?;
    let outcome = scheduler.run(&mut table)?;
    MetricsReporter::new(&table, &outcome.trace).report()
}
