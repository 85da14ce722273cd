//! Round-robin simulation domain models.
//!
//! Provides the data types shared by the scheduler and the metrics
//! reporter: the workloads, the table that owns them, and the dispatch
//! trace emitted while the simulation runs.
//!
//! # Domain Mappings
//!
//! | u-roundrobin | Operating System | Shared Service |
//! |--------------|------------------|----------------|
//! | Workload | Process | Client request |
//! | Burst time | CPU burst | Service demand |
//! | Quantum | Time slice | Turn length |
//! | Dispatch | Context switch in | Turn granted |

mod table;
mod trace;
mod workload;

pub use table::{WorkloadTable, DEFAULT_MAX_CAPACITY};
pub use trace::{DispatchEvent, DispatchOutcome, Trace};
pub use workload::{Ticks, Workload, WorkloadId};
