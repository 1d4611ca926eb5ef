//! First-come, first-served

use crate::policies::SchedulingPolicy;
use crate::schedule::Schedule;
use crate::timeline::Timeline;
use crate::types::{Process, ProcessOutcome};
use crate::workload::Workload;

/// Runs processes to completion in arrival order (ties keep input order)
pub struct FirstComeFirstServed;

impl SchedulingPolicy for FirstComeFirstServed {
    fn name(&self) -> &str {
        "FCFS"
    }

    fn schedule(&self, workload: &Workload) -> Schedule {
        serve_in_order(self.name(), &workload.sorted_by_arrival())
    }
}

/// Run each process to completion in the given order, idling over any gap
/// between the clock and the next arrival.
pub(crate) fn serve_in_order(policy: &str, order: &[Process]) -> Schedule {
    let mut timeline = Timeline::new();
    let mut outcomes = Vec::with_capacity(order.len());

    for process in order {
        timeline.idle_until(process.arrival_time);
        let dispatch = timeline.dispatch(process.id, process.burst_time);
        outcomes.push(ProcessOutcome::new(process, dispatch.start, dispatch.end, dispatch.idle_before));
    }

    timeline.into_schedule(policy, outcomes)
}
