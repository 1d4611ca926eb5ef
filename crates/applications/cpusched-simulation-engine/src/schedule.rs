//! Engine output: per-process outcomes, the CPU timeline and summary statistics

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};
use crate::types::{ExecutionSlice, ProcessId, ProcessOutcome, Time};

/// Result of running one policy over one workload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub policy: String,
    /// Ordered by first dispatch
    pub outcomes: Vec<ProcessOutcome>,
    pub timeline: Vec<ExecutionSlice>,
    pub total_idle_time: Time,
}

/// Aggregate statistics over a schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub policy: String,
    pub process_count: usize,
    pub average_waiting_time: f64,
    pub average_turnaround_time: f64,
    pub average_response_time: f64,
    /// Integer-truncated averages (`total / n`)
    pub truncated_average_waiting_time: Time,
    pub truncated_average_turnaround_time: Time,
    pub total_idle_time: Time,
    /// Last completion minus first arrival
    pub makespan: Time,
    pub cpu_utilization: f64,
}

impl Schedule {
    pub fn outcome(&self, id: ProcessId) -> Option<&ProcessOutcome> {
        self.outcomes.iter().find(|o| o.id == id)
    }

    /// Process ids in order of first dispatch
    pub fn run_order(&self) -> Vec<ProcessId> {
        self.outcomes.iter().map(|o| o.id).collect()
    }

    /// Outcomes ordered by process id
    pub fn by_id(&self) -> Vec<&ProcessOutcome> {
        let mut outcomes: Vec<&ProcessOutcome> = self.outcomes.iter().collect();
        outcomes.sort_by_key(|o| o.id);
        outcomes
    }

    pub fn completion_order(&self) -> Vec<ProcessId> {
        let mut outcomes: Vec<&ProcessOutcome> = self.outcomes.iter().collect();
        outcomes.sort_by_key(|o| o.completion_time);
        outcomes.into_iter().map(|o| o.id).collect()
    }

    pub fn busy_time(&self) -> Time {
        self.outcomes.iter().map(|o| o.burst_time).sum()
    }

    pub fn summary(&self) -> Summary {
        let n = self.outcomes.len();
        // Widened: each term fits in Time but their sum may not
        let total = |field: fn(&ProcessOutcome) -> Time| -> u128 {
            self.outcomes.iter().map(|o| u128::from(field(o))).sum()
        };
        let total_waiting = total(|o| o.waiting_time);
        let total_turnaround = total(|o| o.turnaround_time);
        let total_response = total(|o| o.response_time);

        let average = |sum: u128| if n == 0 { 0.0 } else { sum as f64 / n as f64 };
        // The mean of values that fit in Time also fits
        let truncated = |sum: u128| if n == 0 { 0 } else { (sum / n as u128) as Time };

        let first_arrival = self.outcomes.iter().map(|o| o.arrival_time).min().unwrap_or(0);
        let last_completion = self.outcomes.iter().map(|o| o.completion_time).max().unwrap_or(0);

        let busy = self.busy_time();
        let elapsed = busy + self.total_idle_time;
        let cpu_utilization = if elapsed == 0 { 0.0 } else { busy as f64 / elapsed as f64 };

        Summary {
            policy: self.policy.clone(),
            process_count: n,
            average_waiting_time: average(total_waiting),
            average_turnaround_time: average(total_turnaround),
            average_response_time: average(total_response),
            truncated_average_waiting_time: truncated(total_waiting),
            truncated_average_turnaround_time: truncated(total_turnaround),
            total_idle_time: self.total_idle_time,
            makespan: last_completion.saturating_sub(first_arrival),
            cpu_utilization,
        }
    }

    /// Check the accounting identities and that the timeline is a single,
    /// gap-free, non-overlapping CPU history starting at time 0.
    pub fn check_invariants(&self) -> Result<()> {
        for o in &self.outcomes {
            if o.completion_time < o.arrival_time + o.burst_time {
                return Err(SimError::inconsistent(format!(
                    "process {} completes at {} before it could have run",
                    o.id, o.completion_time
                )));
            }
            if o.turnaround_time != o.completion_time - o.arrival_time {
                return Err(SimError::inconsistent(format!("process {} turnaround mismatch", o.id)));
            }
            if o.waiting_time != o.turnaround_time - o.burst_time {
                return Err(SimError::inconsistent(format!("process {} waiting mismatch", o.id)));
            }
            if o.start_time < o.arrival_time || o.response_time != o.start_time - o.arrival_time {
                return Err(SimError::inconsistent(format!("process {} starts before arrival", o.id)));
            }
        }

        let mut clock = 0;
        let mut idle = 0;
        let mut executed: HashMap<ProcessId, Time> = HashMap::new();
        let mut first_run: HashMap<ProcessId, Time> = HashMap::new();
        let mut last_run: HashMap<ProcessId, Time> = HashMap::new();

        for slice in &self.timeline {
            if slice.start != clock || slice.end <= slice.start {
                return Err(SimError::inconsistent(format!(
                    "slice {}..{} does not continue the timeline at {}",
                    slice.start, slice.end, clock
                )));
            }
            clock = slice.end;

            match slice.process {
                Some(id) => {
                    *executed.entry(id).or_insert(0) += slice.duration();
                    first_run.entry(id).or_insert(slice.start);
                    last_run.insert(id, slice.end);
                }
                None => idle += slice.duration(),
            }
        }

        if idle != self.total_idle_time {
            return Err(SimError::inconsistent(format!(
                "timeline idles for {idle} but total idle is {}",
                self.total_idle_time
            )));
        }

        let annotated_idle: Time = self.outcomes.iter().map(|o| o.idle_before).sum();
        if annotated_idle != self.total_idle_time {
            return Err(SimError::inconsistent("per-process idle does not add up to total idle"));
        }

        if executed.len() != self.outcomes.len() {
            return Err(SimError::inconsistent("timeline and outcomes list different processes"));
        }

        for o in &self.outcomes {
            if executed.get(&o.id) != Some(&o.burst_time) {
                return Err(SimError::inconsistent(format!("process {} did not run its full burst", o.id)));
            }
            if first_run.get(&o.id) != Some(&o.start_time) || last_run.get(&o.id) != Some(&o.completion_time) {
                return Err(SimError::inconsistent(format!("process {} timeline disagrees with outcome", o.id)));
            }
        }

        Ok(())
    }
}
