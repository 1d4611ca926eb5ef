//! Scheduling policies
//!
//! Implements the policies to compare:
//! - FCFS: serve strictly in arrival order
//! - Round-Robin: fixed-quantum time slicing over a FIFO ready queue
//! - SJF: non-preemptive shortest job first
//! - SRTF: preemptive shortest remaining time first
//! - Priority: non-preemptive, lowest priority number first
//! - Batch: prefix-sum waiting times over an already ordered batch

use std::num::NonZeroU64;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::schedule::Schedule;
use crate::workload::Workload;

pub mod batch;
pub mod fcfs;
pub mod priority;
pub mod round_robin;
pub mod sjf;
pub mod srtf;

pub use batch::{Batch, BatchOrder};
pub use fcfs::FirstComeFirstServed;
pub use priority::PriorityScheduling;
pub use round_robin::RoundRobin;
pub use sjf::ShortestJobFirst;
pub use srtf::ShortestRemainingTimeFirst;

/// Scheduling policy trait
pub trait SchedulingPolicy {
    /// Get policy name
    fn name(&self) -> &str;

    /// Reject workloads this policy cannot run
    fn validate(&self, _workload: &Workload) -> Result<()> {
        Ok(())
    }

    /// Simulate the workload to completion. Never mutates the workload.
    fn schedule(&self, workload: &Workload) -> Schedule;
}

/// Serializable policy selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "policy")]
pub enum Policy {
    Fcfs,
    RoundRobin { quantum: NonZeroU64 },
    Sjf,
    Srtf,
    Priority,
    Batch { order: BatchOrder },
}

impl Policy {
    pub fn build(self) -> Box<dyn SchedulingPolicy> {
        match self {
            Policy::Fcfs => Box::new(FirstComeFirstServed),
            Policy::RoundRobin { quantum } => Box::new(RoundRobin::new(quantum)),
            Policy::Sjf => Box::new(ShortestJobFirst),
            Policy::Srtf => Box::new(ShortestRemainingTimeFirst),
            Policy::Priority => Box::new(PriorityScheduling),
            Policy::Batch { order } => Box::new(Batch::new(order)),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::schedule::Schedule;
    use crate::types::Time;

    /// Busy time plus idle time covers the clock from 0 to the last completion
    pub fn assert_accounted(schedule: &Schedule) {
        schedule.check_invariants().unwrap();

        let last_completion = schedule.outcomes.iter().map(|o| o.completion_time).max().unwrap();
        let busy: Time = schedule.outcomes.iter().map(|o| o.burst_time).sum();
        assert_eq!(busy + schedule.total_idle_time, last_completion);
    }

    pub fn completions(schedule: &Schedule) -> Vec<Time> {
        schedule.by_id().iter().map(|o| o.completion_time).collect()
    }

    pub fn waits(schedule: &Schedule) -> Vec<Time> {
        schedule.by_id().iter().map(|o| o.waiting_time).collect()
    }
}
