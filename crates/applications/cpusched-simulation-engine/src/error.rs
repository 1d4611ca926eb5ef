//! Error types for the simulation engine

use thiserror::Error;

use crate::types::ProcessId;

/// Simulation result type
pub type Result<T> = std::result::Result<T, SimError>;

/// Errors that can occur while building or running a simulation
#[derive(Error, Debug)]
pub enum SimError {
    /// Workload has no processes
    #[error("Workload contains no processes")]
    EmptyWorkload,

    /// Process needs no CPU time
    #[error("Process {id} has a zero burst time")]
    ZeroBurst { id: ProcessId },

    /// Two processes share an id
    #[error("Duplicate process id {0}")]
    DuplicateProcessId(ProcessId),

    /// Process ids are 1-based
    #[error("Process ids must be positive")]
    InvalidProcessId,

    /// Priority scheduling needs a priority on every process
    #[error("Process {0} has no priority")]
    MissingPriority(ProcessId),

    /// Last arrival plus total burst does not fit in the clock
    #[error("Workload runs past the largest representable time")]
    TimeOverflow,

    /// Malformed `ARRIVAL:BURST[:PRIORITY]` spec
    #[error("Invalid process spec: {0}")]
    InvalidProcessSpec(String),

    /// Bad workload generator parameters
    #[error("Invalid generator configuration: {0}")]
    InvalidGenerator(String),

    /// Engine produced a timeline that breaks an accounting invariant
    #[error("Inconsistent timeline: {0}")]
    InconsistentTimeline(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SimError {
    /// Create an invalid process spec error
    pub fn invalid_spec(msg: impl Into<String>) -> Self {
        Self::InvalidProcessSpec(msg.into())
    }

    /// Create an invalid generator error
    pub fn invalid_generator(msg: impl Into<String>) -> Self {
        Self::InvalidGenerator(msg.into())
    }

    /// Create an inconsistent timeline error
    pub fn inconsistent(msg: impl Into<String>) -> Self {
        Self::InconsistentTimeline(msg.into())
    }
}
