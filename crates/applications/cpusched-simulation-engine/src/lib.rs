//! CPU Scheduling Simulation Engine
//!
//! Discrete-event simulator for comparing CPU scheduling policies over a
//! known-up-front process workload.

pub mod types;
pub mod error;
pub mod workload;
pub mod timeline;
pub mod schedule;
pub mod policies;
pub mod simulator;
pub mod generator;
pub mod report;

pub use error::{Result, SimError};
pub use policies::{BatchOrder, Policy, SchedulingPolicy};
pub use schedule::{Schedule, Summary};
pub use simulator::{SimulationResult, Simulator};
pub use types::{ExecutionSlice, Process, ProcessId, ProcessOutcome, Time};
pub use workload::{ProcessSpec, Workload};
