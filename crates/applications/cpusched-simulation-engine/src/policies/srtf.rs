//! Preemptive shortest job first (shortest remaining time first)

use crate::policies::SchedulingPolicy;
use crate::schedule::Schedule;
use crate::timeline::Timeline;
use crate::types::{ProcessOutcome, Time};
use crate::workload::Workload;

/// Always runs the arrived process with the least remaining time. A new
/// arrival with strictly less remaining time preempts the running process.
pub struct ShortestRemainingTimeFirst;

impl SchedulingPolicy for ShortestRemainingTimeFirst {
    fn name(&self) -> &str {
        "SRTF"
    }

    fn schedule(&self, workload: &Workload) -> Schedule {
        let mut processes = workload.sorted_by_arrival();
        let n = processes.len();

        let mut timeline = Timeline::new();
        let mut first_dispatch: Vec<Option<(Time, Time)>> = vec![None; n];
        let mut outcomes = Vec::with_capacity(n);
        let mut arrived = 0;

        while outcomes.len() < n {
            let now = timeline.now();
            while arrived < n && processes[arrived].arrival_time <= now {
                arrived += 1;
            }

            let selected = (0..arrived)
                .filter(|&i| !processes[i].is_finished())
                .min_by_key(|&i| processes[i].remaining_time);

            let Some(index) = selected else {
                timeline.idle_until(processes[arrived].arrival_time);
                continue;
            };

            // Run until completion or the next arrival, whichever comes first
            let mut run = processes[index].remaining_time;
            if let Some(next) = processes.get(arrived) {
                run = run.min(next.arrival_time - now);
            }

            let process = &mut processes[index];
            let dispatch = timeline.dispatch(process.id, run);
            let (start, idle_before) = *first_dispatch[index].get_or_insert((dispatch.start, dispatch.idle_before));

            process.remaining_time -= run;
            if process.is_finished() {
                outcomes.push(ProcessOutcome::new(process, start, dispatch.end, idle_before));
            }
        }

        outcomes.sort_by_key(|o| o.start_time);
        timeline.into_schedule(self.name(), outcomes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policies::test_support::{assert_accounted, completions, waits};
    use crate::types::ExecutionSlice;

    #[test]
    fn test_shorter_arrival_preempts() {
        let workload = Workload::from_pairs(&[(0, 8), (1, 4), (2, 9), (3, 5)]).unwrap();
        let schedule = ShortestRemainingTimeFirst.schedule(&workload);

        // P1 0-1, P2 1-5, P4 5-10, P1 10-17, P3 17-26
        assert_eq!(completions(&schedule), vec![17, 5, 26, 10]);
        assert_eq!(waits(&schedule), vec![9, 0, 15, 2]);
        assert_eq!(schedule.run_order(), vec![1, 2, 4, 3]);
        assert_eq!(schedule.outcome(1).unwrap().response_time, 0);
        assert_eq!(schedule.outcome(3).unwrap().response_time, 15);
        assert_accounted(&schedule);
    }

    #[test]
    fn test_equal_remaining_does_not_preempt() {
        let workload = Workload::from_pairs(&[(0, 4), (2, 2)]).unwrap();
        let schedule = ShortestRemainingTimeFirst.schedule(&workload);

        assert_eq!(
            schedule.timeline,
            vec![
                ExecutionSlice { process: Some(1), start: 0, end: 4 },
                ExecutionSlice { process: Some(2), start: 4, end: 6 },
            ]
        );
        assert_accounted(&schedule);
    }

    #[test]
    fn test_idle_between_bursts() {
        let workload = Workload::from_pairs(&[(1, 2), (6, 1)]).unwrap();
        let schedule = ShortestRemainingTimeFirst.schedule(&workload);

        assert_eq!(completions(&schedule), vec![3, 7]);
        assert_eq!(schedule.total_idle_time, 1 + 3);
        assert_accounted(&schedule);
    }
}
