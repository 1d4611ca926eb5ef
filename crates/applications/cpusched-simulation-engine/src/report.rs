//! Fixed-column text reports

use std::fmt;

use crate::simulator::SimulationResult;

const RULE_WIDTH: usize = 95;

/// Per-process table plus the summary lines
pub struct ScheduleReport<'a> {
    result: &'a SimulationResult,
}

impl<'a> ScheduleReport<'a> {
    pub fn new(result: &'a SimulationResult) -> Self {
        ScheduleReport { result }
    }
}

impl fmt::Display for ScheduleReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let schedule = &self.result.schedule;
        let summary = &self.result.summary;

        writeln!(f, "Policy: {}", schedule.policy)?;
        writeln!(
            f,
            "{:>8} {:>10} {:>8} {:>12} {:>12} {:>10} {:>10} {:>10}",
            "Process", "Arrival", "Burst", "Completion", "Turnaround", "Waiting", "Response", "Idle"
        )?;
        writeln!(f, "{}", "-".repeat(RULE_WIDTH))?;

        for o in &schedule.outcomes {
            writeln!(
                f,
                "{:>8} {:>10} {:>8} {:>12} {:>12} {:>10} {:>10} {:>10}",
                format!("P{}", o.id),
                o.arrival_time,
                o.burst_time,
                o.completion_time,
                o.turnaround_time,
                o.waiting_time,
                o.response_time,
                o.idle_before,
            )?;
        }

        writeln!(f, "{}", "-".repeat(RULE_WIDTH))?;
        writeln!(f, "Average Waiting Time: {:.2}", summary.average_waiting_time)?;
        writeln!(f, "Average Turnaround Time: {:.2}", summary.average_turnaround_time)?;
        writeln!(f, "Total Idle Time: {}", summary.total_idle_time)
    }
}

/// One-line Gantt rendering, e.g. `| idle 0-2 | P1 2-5 | P2 5-7 |`
pub struct GanttChart<'a> {
    result: &'a SimulationResult,
}

impl<'a> GanttChart<'a> {
    pub fn new(result: &'a SimulationResult) -> Self {
        GanttChart { result }
    }
}

impl fmt::Display for GanttChart<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "|")?;
        for slice in &self.result.schedule.timeline {
            match slice.process {
                Some(id) => write!(f, " P{} {}-{} |", id, slice.start, slice.end)?,
                None => write!(f, " idle {}-{} |", slice.start, slice.end)?,
            }
        }
        Ok(())
    }
}

/// Side-by-side summary of several policies over one workload
pub struct ComparisonReport<'a> {
    results: &'a [SimulationResult],
}

impl<'a> ComparisonReport<'a> {
    pub fn new(results: &'a [SimulationResult]) -> Self {
        ComparisonReport { results }
    }
}

impl fmt::Display for ComparisonReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<16} {:>12} {:>12} {:>12} {:>8} {:>10} {:>8}",
            "Policy", "Avg Wait", "Avg TAT", "Avg Resp", "Idle", "Makespan", "CPU %"
        )?;
        writeln!(f, "{}", "-".repeat(84))?;

        for result in self.results {
            let s = &result.summary;
            writeln!(
                f,
                "{:<16} {:>12.2} {:>12.2} {:>12.2} {:>8} {:>10} {:>8.1}",
                s.policy,
                s.average_waiting_time,
                s.average_turnaround_time,
                s.average_response_time,
                s.total_idle_time,
                s.makespan,
                s.cpu_utilization * 100.0,
            )?;
        }

        if let Some(best) = self
            .results
            .iter()
            .min_by(|a, b| a.summary.average_waiting_time.total_cmp(&b.summary.average_waiting_time))
        {
            writeln!(f, "{}", "-".repeat(84))?;
            writeln!(f, "Lowest average waiting time: {}", best.summary.policy)?;
        }

        Ok(())
    }
}
