//! Simulated CPU clock shared by all engines
//!
//! Engines advance the clock only through `idle_until` and `dispatch`, so the
//! recorded slices are contiguous and never overlap.

use tracing::debug;

use crate::schedule::Schedule;
use crate::types::{ExecutionSlice, ProcessId, ProcessOutcome, Time};

/// Where a dispatched run landed on the timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatch {
    pub start: Time,
    pub end: Time,
    /// Idle time accumulated since the previous dispatch
    pub idle_before: Time,
}

/// CPU clock starting at time 0
#[derive(Debug, Default)]
pub struct Timeline {
    clock: Time,
    total_idle: Time,
    pending_idle: Time,
    slices: Vec<ExecutionSlice>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Time {
        self.clock
    }

    pub fn total_idle(&self) -> Time {
        self.total_idle
    }

    /// Leave the CPU idle until `time`. Returns the idle gap, which is zero
    /// when `time` is not in the future.
    pub fn idle_until(&mut self, time: Time) -> Time {
        if time <= self.clock {
            return 0;
        }

        let gap = time - self.clock;
        debug!(from = self.clock, to = time, "CPU idle");

        self.push(None, self.clock, time);
        self.clock = time;
        self.total_idle += gap;
        self.pending_idle += gap;
        gap
    }

    /// Run a process for `units` starting now
    pub fn dispatch(&mut self, id: ProcessId, units: Time) -> Dispatch {
        let start = self.clock;
        let end = start + units;
        debug!(process = id, start, end, "dispatch");

        self.push(Some(id), start, end);
        self.clock = end;

        Dispatch {
            start,
            end,
            idle_before: std::mem::take(&mut self.pending_idle),
        }
    }

    /// Finish the run, pairing the recorded timeline with the outcomes
    pub fn into_schedule(self, policy: &str, outcomes: Vec<ProcessOutcome>) -> Schedule {
        Schedule {
            policy: policy.to_string(),
            outcomes,
            timeline: self.slices,
            total_idle_time: self.total_idle,
        }
    }

    fn push(&mut self, process: Option<ProcessId>, start: Time, end: Time) {
        if let Some(last) = self.slices.last_mut() {
            if last.process == process && last.end == start {
                last.end = end;
                return;
            }
        }
        self.slices.push(ExecutionSlice { process, start, end });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_then_dispatch() {
        let mut timeline = Timeline::new();

        assert_eq!(timeline.idle_until(3), 3);
        assert_eq!(timeline.idle_until(2), 0);

        let dispatch = timeline.dispatch(1, 4);
        assert_eq!(dispatch, Dispatch { start: 3, end: 7, idle_before: 3 });
        assert_eq!(timeline.now(), 7);
        assert_eq!(timeline.total_idle(), 3);

        // Pending idle is consumed by the first dispatch after the gap
        let dispatch = timeline.dispatch(2, 1);
        assert_eq!(dispatch.idle_before, 0);
    }

    #[test]
    fn test_adjacent_slices_merge() {
        let mut timeline = Timeline::new();
        timeline.dispatch(1, 2);
        timeline.dispatch(1, 2);
        timeline.dispatch(2, 1);
        timeline.idle_until(6);
        timeline.idle_until(8);

        let schedule = timeline.into_schedule("test", vec![]);
        assert_eq!(
            schedule.timeline,
            vec![
                ExecutionSlice { process: Some(1), start: 0, end: 4 },
                ExecutionSlice { process: Some(2), start: 4, end: 5 },
                ExecutionSlice { process: None, start: 5, end: 8 },
            ]
        );
        assert_eq!(schedule.total_idle_time, 3);
    }
}
