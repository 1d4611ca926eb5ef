//! Validated process workloads
//!
//! A workload is built once per run, from inline specs, a JSON file or the
//! synthetic generator, and is only ever read by the engines.

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};
use crate::types::{Process, ProcessId, Time};

/// User-facing description of a single process (id assigned on load)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSpec {
    pub arrival_time: Time,
    pub burst_time: Time,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
}

impl ProcessSpec {
    pub fn new(arrival_time: Time, burst_time: Time) -> Self {
        ProcessSpec {
            arrival_time,
            burst_time,
            priority: None,
        }
    }

    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = Some(priority);
        self
    }
}

/// Parses `ARRIVAL:BURST` or `ARRIVAL:BURST:PRIORITY`
impl FromStr for ProcessSpec {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self> {
        let fields: Vec<&str> = s.split(':').map(str::trim).collect();
        if !(2..=3).contains(&fields.len()) {
            return Err(SimError::invalid_spec(format!(
                "expected ARRIVAL:BURST[:PRIORITY], got '{s}'"
            )));
        }

        let number = |name: &str, value: &str| -> Result<u64> {
            value
                .parse::<u64>()
                .map_err(|_| SimError::invalid_spec(format!("{name} '{value}' is not a non-negative integer")))
        };

        let arrival_time = number("arrival time", fields[0])?;
        let burst_time = number("burst time", fields[1])?;
        if burst_time == 0 {
            return Err(SimError::invalid_spec("burst time must be positive"));
        }

        let priority = match fields.get(2) {
            Some(value) => Some(
                value
                    .parse::<u32>()
                    .map_err(|_| SimError::invalid_spec(format!("priority '{value}' is not a non-negative integer")))?,
            ),
            None => None,
        };

        Ok(ProcessSpec {
            arrival_time,
            burst_time,
            priority,
        })
    }
}

/// On-disk workload format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkloadFile {
    pub processes: Vec<ProcessSpec>,
}

/// A non-empty set of processes with unique ids and positive bursts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Workload {
    processes: Vec<Process>,
}

impl Workload {
    /// Validate and wrap a process list
    pub fn new(processes: Vec<Process>) -> Result<Self> {
        if processes.is_empty() {
            return Err(SimError::EmptyWorkload);
        }

        let mut seen = HashSet::with_capacity(processes.len());
        for process in &processes {
            if process.id == 0 {
                return Err(SimError::InvalidProcessId);
            }
            if process.burst_time == 0 {
                return Err(SimError::ZeroBurst { id: process.id });
            }
            if !seen.insert(process.id) {
                return Err(SimError::DuplicateProcessId(process.id));
            }
        }

        // Every engine finishes by the last arrival plus all the work
        let last_arrival = processes.iter().map(|p| p.arrival_time).max().unwrap_or(0);
        processes
            .iter()
            .try_fold(last_arrival, |horizon, p| horizon.checked_add(p.burst_time))
            .ok_or(SimError::TimeOverflow)?;

        Ok(Workload { processes })
    }

    /// Build a workload, numbering processes 1, 2, ... in input order
    pub fn from_specs(specs: &[ProcessSpec]) -> Result<Self> {
        let processes = specs
            .iter()
            .enumerate()
            .map(|(index, spec)| {
                let id = ProcessId::try_from(index + 1).map_err(|_| SimError::InvalidProcessId)?;
                let process = Process::new(id, spec.arrival_time, spec.burst_time);
                Ok(match spec.priority {
                    Some(priority) => process.with_priority(priority),
                    None => process,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Self::new(processes)
    }

    /// Convenience constructor from `(arrival, burst)` pairs
    pub fn from_pairs(pairs: &[(Time, Time)]) -> Result<Self> {
        let specs: Vec<ProcessSpec> = pairs
            .iter()
            .map(|&(arrival, burst)| ProcessSpec::new(arrival, burst))
            .collect();
        Self::from_specs(&specs)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: WorkloadFile = serde_json::from_str(json)?;
        Self::from_specs(&file.processes)
    }

    /// Load a workload from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Convert back into the on-disk format
    pub fn to_file(&self) -> WorkloadFile {
        WorkloadFile {
            processes: self
                .processes
                .iter()
                .map(|p| ProcessSpec {
                    arrival_time: p.arrival_time,
                    burst_time: p.burst_time,
                    priority: p.priority,
                })
                .collect(),
        }
    }

    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    /// Copy of the processes ordered by arrival time, ties kept in input order
    pub fn sorted_by_arrival(&self) -> Vec<Process> {
        let mut sorted = self.processes.clone();
        sorted.sort_by_key(|p| p.arrival_time);
        sorted
    }

    /// True when every process arrives at the same instant
    pub fn all_arrive_together(&self) -> bool {
        let first = self.processes[0].arrival_time;
        self.processes.iter().all(|p| p.arrival_time == first)
    }

    pub fn total_burst_time(&self) -> Time {
        self.processes.iter().map(|p| p.burst_time).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_process_spec() {
        let spec: ProcessSpec = "3:7".parse().unwrap();
        assert_eq!(spec, ProcessSpec::new(3, 7));

        let spec: ProcessSpec = "0:4:2".parse().unwrap();
        assert_eq!(spec, ProcessSpec::new(0, 4).with_priority(2));
    }

    #[test]
    fn test_parse_rejects_bad_specs() {
        assert!("5".parse::<ProcessSpec>().is_err());
        assert!("1:2:3:4".parse::<ProcessSpec>().is_err());
        assert!("-1:4".parse::<ProcessSpec>().is_err());
        assert!("0:0".parse::<ProcessSpec>().is_err());
        assert!("0:x".parse::<ProcessSpec>().is_err());
    }

    #[test]
    fn test_ids_assigned_in_input_order() {
        let workload = Workload::from_pairs(&[(4, 1), (0, 5), (2, 3)]).unwrap();
        let ids: Vec<ProcessId> = workload.processes().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(workload.total_burst_time(), 9);
    }

    #[test]
    fn test_validation() {
        assert!(matches!(Workload::new(vec![]), Err(SimError::EmptyWorkload)));
        assert!(matches!(
            Workload::new(vec![Process::new(1, 0, 0)]),
            Err(SimError::ZeroBurst { id: 1 })
        ));
        assert!(matches!(
            Workload::new(vec![Process::new(1, 0, 2), Process::new(1, 1, 2)]),
            Err(SimError::DuplicateProcessId(1))
        ));
        assert!(matches!(
            Workload::new(vec![Process::new(0, 0, 2)]),
            Err(SimError::InvalidProcessId)
        ));
    }

    #[test]
    fn test_rejects_workloads_past_time_limit() {
        let specs = ["18446744073709551615:1".parse::<ProcessSpec>().unwrap()];
        assert!(matches!(Workload::from_specs(&specs), Err(SimError::TimeOverflow)));

        let half = Time::MAX / 2;
        assert!(matches!(
            Workload::from_pairs(&[(0, half), (1, half), (2, 2)]),
            Err(SimError::TimeOverflow)
        ));

        // Exactly at the limit is still schedulable
        let workload = Workload::from_pairs(&[(Time::MAX - 3, 3)]).unwrap();
        assert_eq!(workload.total_burst_time(), 3);
    }

    #[test]
    fn test_stable_arrival_sort() {
        let workload = Workload::from_pairs(&[(2, 1), (0, 1), (2, 1), (0, 1)]).unwrap();
        let ids: Vec<ProcessId> = workload.sorted_by_arrival().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 4, 1, 3]);

        // Caller's order untouched
        assert_eq!(workload.processes()[0].id, 1);
    }

    #[test]
    fn test_json_workload() {
        let json = r#"{"processes": [
            {"arrival_time": 0, "burst_time": 5, "priority": 2},
            {"arrival_time": 1, "burst_time": 3}
        ]}"#;

        let workload = Workload::from_json_str(json).unwrap();
        assert_eq!(workload.len(), 2);
        assert_eq!(workload.processes()[0].priority, Some(2));
        assert_eq!(workload.processes()[1].priority, None);
        assert!(!workload.all_arrive_together());

        let round_trip = serde_json::to_string(&workload.to_file()).unwrap();
        assert_eq!(Workload::from_json_str(&round_trip).unwrap(), workload);
    }

    #[test]
    fn test_sample_workload_file() {
        let workload = Workload::from_json_str(include_str!("../workloads/sample.json")).unwrap();

        assert_eq!(workload.len(), 4);
        assert_eq!(workload.total_burst_time(), 25);
        assert!(workload.processes().iter().all(|p| p.priority.is_some()));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            Workload::load("/nonexistent/cpusched/workload.json"),
            Err(SimError::Io(_))
        ));
    }
}
