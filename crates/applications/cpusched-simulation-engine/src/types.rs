//! Core types for the simulation engine

use serde::{Deserialize, Serialize};

/// Simulated time, in whole time units
pub type Time = u64;

/// Process identifier (1-based, assigned in input order)
pub type ProcessId = u32;

/// A process to be scheduled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    pub id: ProcessId,
    pub arrival_time: Time,
    pub burst_time: Time,     // CPU time required to complete
    pub remaining_time: Time, // CPU time left to complete
    pub priority: Option<u32>, // Lower value = more urgent
}

impl Process {
    pub fn new(id: ProcessId, arrival_time: Time, burst_time: Time) -> Self {
        Process {
            id,
            arrival_time,
            burst_time,
            remaining_time: burst_time,
            priority: None,
        }
    }

    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn is_finished(&self) -> bool {
        self.remaining_time == 0
    }
}

/// Final accounting for one process after an engine run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessOutcome {
    pub id: ProcessId,
    pub arrival_time: Time,
    pub burst_time: Time,
    pub priority: Option<u32>,
    pub start_time: Time, // First dispatch
    pub completion_time: Time,
    pub turnaround_time: Time,
    pub waiting_time: Time,
    pub response_time: Time,
    pub idle_before: Time, // CPU idle time right before the first dispatch
}

impl ProcessOutcome {
    /// Build the outcome of a process that was first dispatched at `start_time`
    /// and finished at `completion_time`.
    pub fn new(process: &Process, start_time: Time, completion_time: Time, idle_before: Time) -> Self {
        let turnaround_time = completion_time - process.arrival_time;

        ProcessOutcome {
            id: process.id,
            arrival_time: process.arrival_time,
            burst_time: process.burst_time,
            priority: process.priority,
            start_time,
            completion_time,
            turnaround_time,
            waiting_time: turnaround_time - process.burst_time,
            response_time: start_time - process.arrival_time,
            idle_before,
        }
    }
}

/// One contiguous span of the CPU timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionSlice {
    /// `None` while the CPU is idle
    pub process: Option<ProcessId>,
    pub start: Time,
    pub end: Time,
}

impl ExecutionSlice {
    pub fn duration(&self) -> Time {
        self.end - self.start
    }

    pub fn is_idle(&self) -> bool {
        self.process.is_none()
    }
}
