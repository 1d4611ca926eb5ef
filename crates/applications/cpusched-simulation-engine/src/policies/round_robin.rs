//! Round-Robin time slicing

use std::collections::VecDeque;
use std::num::NonZeroU64;

use crate::policies::SchedulingPolicy;
use crate::schedule::Schedule;
use crate::timeline::Timeline;
use crate::types::{Process, ProcessOutcome, Time};
use crate::workload::Workload;

/// Cycles through a FIFO ready queue, granting each turn at most `quantum` units
pub struct RoundRobin {
    quantum: NonZeroU64,
    name: String,
}

impl RoundRobin {
    pub fn new(quantum: NonZeroU64) -> Self {
        RoundRobin {
            quantum,
            name: format!("RR(q={quantum})"),
        }
    }

    pub fn quantum(&self) -> NonZeroU64 {
        self.quantum
    }
}

/// Move every process that has arrived by `now` into the ready queue
fn admit(processes: &[Process], next: &mut usize, now: Time, ready: &mut VecDeque<usize>) {
    while *next < processes.len() && processes[*next].arrival_time <= now {
        ready.push_back(*next);
        *next += 1;
    }
}

impl SchedulingPolicy for RoundRobin {
    fn name(&self) -> &str {
        &self.name
    }

    fn schedule(&self, workload: &Workload) -> Schedule {
        let mut processes = workload.sorted_by_arrival();
        let n = processes.len();
        let quantum = self.quantum.get();

        let mut timeline = Timeline::new();
        let mut ready: VecDeque<usize> = VecDeque::with_capacity(n);
        let mut first_dispatch: Vec<Option<(Time, Time)>> = vec![None; n];
        let mut outcomes = Vec::with_capacity(n);
        let mut next = 0;

        while !ready.is_empty() || next < n {
            admit(&processes, &mut next, timeline.now(), &mut ready);

            let Some(index) = ready.pop_front() else {
                // Nothing ready: jump to the next arrival
                timeline.idle_until(processes[next].arrival_time);
                continue;
            };

            let process = &mut processes[index];
            let slice = process.remaining_time.min(quantum);
            let dispatch = timeline.dispatch(process.id, slice);
            let (start, idle_before) = *first_dispatch[index].get_or_insert((dispatch.start, dispatch.idle_before));

            process.remaining_time -= slice;
            if process.is_finished() {
                outcomes.push(ProcessOutcome::new(process, start, dispatch.end, idle_before));
            } else {
                // Arrivals during the slice queue ahead of the returning process
                admit(&processes, &mut next, timeline.now(), &mut ready);
                ready.push_back(index);
            }
        }

        outcomes.sort_by_key(|o| o.start_time);
        timeline.into_schedule(&self.name, outcomes)
    }
}
