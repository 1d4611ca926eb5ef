//! Simulation driver
//!
//! Wraps a scheduling policy, validates the workload against it, runs the
//! engine and derives the summary statistics.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Result;
use crate::policies::{Policy, SchedulingPolicy};
use crate::schedule::{Schedule, Summary};
use crate::workload::Workload;

/// Result of a simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub schedule: Schedule,
    pub summary: Summary,
}

/// Runs one scheduling policy over workloads
pub struct Simulator {
    policy: Box<dyn SchedulingPolicy>,
}

impl Simulator {
    /// Create a new simulator with the given policy
    pub fn new(policy: Box<dyn SchedulingPolicy>) -> Self {
        Simulator { policy }
    }

    pub fn from_policy(policy: Policy) -> Self {
        Self::new(policy.build())
    }

    pub fn policy_name(&self) -> &str {
        self.policy.name()
    }

    /// Run the workload to completion
    pub fn run(&self, workload: &Workload) -> Result<SimulationResult> {
        self.policy.validate(workload)?;

        debug!(policy = self.policy.name(), processes = workload.len(), "Starting simulation");
        let schedule = self.policy.schedule(workload);

        debug_assert!(
            schedule.check_invariants().is_ok(),
            "{} produced an inconsistent timeline: {:?}",
            self.policy.name(),
            schedule.check_invariants()
        );

        let summary = schedule.summary();
        info!(
            policy = %summary.policy,
            processes = summary.process_count,
            avg_waiting = summary.average_waiting_time,
            avg_turnaround = summary.average_turnaround_time,
            idle = summary.total_idle_time,
            "Simulation complete"
        );

        Ok(SimulationResult { schedule, summary })
    }
}

/// Run several policies over the same workload
pub fn compare(policies: &[Policy], workload: &Workload) -> Result<Vec<SimulationResult>> {
    policies
        .iter()
        .map(|&policy| Simulator::from_policy(policy).run(workload))
        .collect()
}
