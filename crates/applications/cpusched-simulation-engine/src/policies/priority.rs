//! Non-preemptive priority scheduling (lower number = higher priority)

use crate::error::{Result, SimError};
use crate::policies::SchedulingPolicy;
use crate::policies::sjf::run_to_completion_by;
use crate::schedule::Schedule;
use crate::workload::Workload;

pub struct PriorityScheduling;

impl SchedulingPolicy for PriorityScheduling {
    fn name(&self) -> &str {
        "Priority"
    }

    fn validate(&self, workload: &Workload) -> Result<()> {
        match workload.processes().iter().find(|p| p.priority.is_none()) {
            Some(process) => Err(SimError::MissingPriority(process.id)),
            None => Ok(()),
        }
    }

    fn schedule(&self, workload: &Workload) -> Schedule {
        // Unprioritised processes (rejected by `validate`) sort last
        run_to_completion_by(self.name(), workload, |p| p.priority.unwrap_or(u32::MAX))
    }
}
