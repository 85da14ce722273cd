//! Metrics reporter.
//!
//! Turns a finished workload table and its dispatch trace into a
//! [`Report`]: the trace in emission order, one row per workload, and the
//! aggregate means. Reports render as plain text via `Display` or as JSON.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::SimulationKpi;
use crate::error::Result;
use crate::models::{DispatchEvent, DispatchOutcome, Trace, WorkloadTable};

const TABLE_WIDTH: usize = 37;

/// Builds reports from a finished simulation.
#[derive(Debug, Clone, Copy)]
pub struct MetricsReporter<'a> {
    table: &'a WorkloadTable,
    trace: &'a Trace,
}

impl<'a> MetricsReporter<'a> {
    /// Creates a reporter over a finished table and its trace.
    pub fn new(table: &'a WorkloadTable, trace: &'a Trace) -> Self {
        Self { table, trace }
    }

    /// Produces the report.
    ///
    /// # Errors
    /// `SimError::IncompleteRun` if the table is not done.
    pub fn report(&self) -> Result<Report> {
        let kpi = SimulationKpi::calculate(self.table, self.trace)?;
        Ok(Report {
            trace: self.trace.clone(),
            kpi,
        })
    }
}

/// A finished simulation report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Dispatch events in emission order.
    pub trace: Trace,
    /// Per-workload rows and aggregates.
    pub kpi: SimulationKpi,
}

impl Report {
    /// One line per dispatch event.
    pub fn trace_lines(&self) -> Vec<String> {
        self.trace.iter().map(format_event).collect()
    }

    /// Header, separators and one row per workload.
    pub fn table_lines(&self) -> Vec<String> {
        let rule = "-".repeat(TABLE_WIDTH);
        let mut lines = vec![
            rule.clone(),
            format!("{:<6}{:>8}{:>10}{:>13}", "PID", "Burst", "Waiting", "Turnaround"),
            rule.clone(),
        ];
        for row in &self.kpi.rows {
            lines.push(format!(
                "{:<6}{:>8}{:>10}{:>13}",
                format!("P{}", row.id),
                row.burst_time,
                row.waiting_time,
                row.turnaround_time
            ));
        }
        lines.push(rule);
        lines
    }

    /// The two aggregate lines, two decimals each.
    pub fn summary_lines(&self) -> [String; 2] {
        [
            format!("Average Waiting Time: {:.2}", self.kpi.mean_waiting),
            format!("Average Turnaround Time: {:.2}", self.kpi.mean_turnaround),
        ]
    }

    /// Serializes the report as pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Dispatch Trace ---")?;
        for line in self.trace_lines() {
            writeln!(f, "{line}")?;
        }
        writeln!(f)?;
        writeln!(f, "--- Final Performance Metrics ---")?;
        for line in self.table_lines() {
            writeln!(f, "{line}")?;
        }
        for line in self.summary_lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

fn format_event(event: &DispatchEvent) -> String {
    match event.outcome {
        DispatchOutcome::Remaining { remaining } => format!(
            "[Time {}] P{} ran for {} (Remaining: {remaining})",
            event.clock, event.workload_id, event.slice
        ),
        DispatchOutcome::Finished { at } => format!(
            "[Time {}] P{} ran for {} and FINISHED at {at}",
            event.clock, event.workload_id, event.slice
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimError;
    use crate::scheduler::RoundRobinScheduler;

    fn reference_report() -> Report {
        let mut table = WorkloadTable::initialize(&[5, 3, 8]).unwrap();
        let outcome = RoundRobinScheduler::new(2).unwrap().run(&mut table).unwrap();
        MetricsReporter::new(&table, &outcome.trace).report().unwrap()
    }

    #[test]
    fn test_trace_lines() {
        let lines = reference_report().trace_lines();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "[Time 0] P1 ran for 2 (Remaining: 3)");
        assert_eq!(lines[4], "[Time 8] P2 ran for 1 and FINISHED at 9");
        assert_eq!(lines[6], "[Time 11] P1 ran for 1 and FINISHED at 12");
        assert_eq!(lines[8], "[Time 14] P3 ran for 2 and FINISHED at 16");
    }

    #[test]
    fn test_table_lines() {
        let lines = reference_report().table_lines();
        // rule, header, rule, 3 rows, rule
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "-".repeat(TABLE_WIDTH));
        assert_eq!(
            lines[3],
            format!("P1{}5{}7{}12", " ".repeat(11), " ".repeat(9), " ".repeat(11))
        );
        assert!(lines[5].starts_with("P3"));
        assert!(lines[5].ends_with("16"));
    }

    #[test]
    fn test_summary_two_decimals() {
        let [waiting, turnaround] = reference_report().summary_lines();
        assert_eq!(waiting, "Average Waiting Time: 7.00");
        assert_eq!(turnaround, "Average Turnaround Time: 12.33");
    }

    #[test]
    fn test_display_order() {
        let text = reference_report().to_string();
        let trace_at = text.find("--- Dispatch Trace ---").unwrap();
        let metrics_at = text.find("--- Final Performance Metrics ---").unwrap();
        let avg_at = text.find("Average Waiting Time").unwrap();
        assert!(trace_at < metrics_at && metrics_at < avg_at);
        assert!(text.ends_with("Average Turnaround Time: 12.33\n"));
    }

    #[test]
    fn test_json_round_trip() {
        let report = reference_report();
        let json = report.to_json().unwrap();
        let back: Report = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }

    #[test]
    fn test_reporter_rejects_unfinished_table() {
        let table = WorkloadTable::initialize(&[1]).unwrap();
        let trace = Trace::new();
        let err = MetricsReporter::new(&table, &trace).report().unwrap_err();
        assert!(matches!(err, SimError::IncompleteRun { pending: 1 }));
    }
}
