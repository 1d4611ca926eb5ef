//! Non-preemptive shortest job first

use crate::policies::SchedulingPolicy;
use crate::schedule::Schedule;
use crate::timeline::Timeline;
use crate::types::{Process, ProcessOutcome};
use crate::workload::Workload;

/// Runs the shortest arrived job to completion at every decision point
pub struct ShortestJobFirst;

impl ShortestJobFirst {
    /// All processes arrive together: shortest burst first, back to back.
    /// The only possible idle time is before the common arrival.
    fn schedule_simultaneous(&self, workload: &Workload) -> Schedule {
        let mut order = workload.processes().to_vec();
        order.sort_by_key(|p| p.burst_time);

        let mut timeline = Timeline::new();
        timeline.idle_until(order[0].arrival_time);

        let outcomes = order
            .iter()
            .map(|process| {
                let dispatch = timeline.dispatch(process.id, process.burst_time);
                ProcessOutcome::new(process, dispatch.start, dispatch.end, dispatch.idle_before)
            })
            .collect();

        timeline.into_schedule(self.name(), outcomes)
    }
}

impl SchedulingPolicy for ShortestJobFirst {
    fn name(&self) -> &str {
        "SJF"
    }

    fn schedule(&self, workload: &Workload) -> Schedule {
        if workload.all_arrive_together() {
            self.schedule_simultaneous(workload)
        } else {
            run_to_completion_by(self.name(), workload, |p| p.burst_time)
        }
    }
}

/// Non-preemptive selection loop shared with priority scheduling.
///
/// At each decision point the arrived, not-yet-run processes are scanned in
/// arrival order (ties in input order) and the first one with the smallest
/// key runs to completion. With nothing eligible the CPU idles until the next
/// arrival and the whole gap is recorded.
pub(crate) fn run_to_completion_by<K, F>(policy: &str, workload: &Workload, key: F) -> Schedule
where
    K: Ord,
    F: Fn(&Process) -> K,
{
    let mut pool = workload.sorted_by_arrival();
    let mut timeline = Timeline::new();
    let mut outcomes = Vec::with_capacity(pool.len());

    while !pool.is_empty() {
        let now = timeline.now();
        let selected = pool
            .iter()
            .enumerate()
            .filter(|(_, p)| p.arrival_time <= now)
            .min_by_key(|(_, p)| key(*p))
            .map(|(index, _)| index);

        let Some(index) = selected else {
            // pool stays arrival-sorted, so the head is the next arrival
            timeline.idle_until(pool[0].arrival_time);
            continue;
        };

        let process = pool.remove(index);
        let dispatch = timeline.dispatch(process.id, process.burst_time);
        outcomes.push(ProcessOutcome::new(&process, dispatch.start, dispatch.end, dispatch.idle_before));
    }

    timeline.into_schedule(policy, outcomes)
}
