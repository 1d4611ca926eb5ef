//! CPU Scheduling Simulator CLI
//!
//! Builds a workload, runs one or more scheduling policies over it and prints
//! the per-process report for each.
//!
//! ```bash
//! # Three processes under FCFS
//! cpusched --process 0:5 --process 2:3 --process 4:1
//!
//! # Compare every policy over a random workload
//! cpusched --random 10 --seed 7 --max-priority 4 -p fcfs,rr,sjf,srtf,priority,batch
//! ```

use std::fs;
use std::num::NonZeroU64;
use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgGroup, Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cpusched_simulation_engine::{
    BatchOrder, Policy, ProcessSpec, Time, Workload,
    generator::WorkloadGenerator,
    report::{ComparisonReport, GanttChart, ScheduleReport},
    simulator::compare,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PolicyArg {
    Fcfs,
    Rr,
    Sjf,
    Srtf,
    Priority,
    Batch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum BatchOrderArg {
    Arrival,
    Input,
}

impl From<BatchOrderArg> for BatchOrder {
    fn from(arg: BatchOrderArg) -> Self {
        match arg {
            BatchOrderArg::Arrival => BatchOrder::Arrival,
            BatchOrderArg::Input => BatchOrder::Input,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "cpusched")]
#[command(about = "Simulate CPU scheduling policies over a process workload", long_about = None)]
#[command(group(ArgGroup::new("source").required(true).args(["processes", "workload", "random"])))]
struct Args {
    /// Policies to run (comma-separated)
    #[arg(short, long, value_enum, value_delimiter = ',', default_value = "fcfs")]
    policies: Vec<PolicyArg>,

    /// Round-Robin time quantum
    #[arg(short, long, env = "CPUSCHED_QUANTUM", default_value = "2")]
    quantum: NonZeroU64,

    /// Ordering used by the batch policy
    #[arg(long, value_enum, default_value_t = BatchOrderArg::Arrival)]
    batch_order: BatchOrderArg,

    /// Process as ARRIVAL:BURST[:PRIORITY] (repeatable, ids assigned in order)
    #[arg(long = "process", value_name = "ARRIVAL:BURST[:PRIORITY]")]
    processes: Vec<ProcessSpec>,

    /// JSON workload file
    #[arg(short, long)]
    workload: Option<PathBuf>,

    /// Generate a random workload with this many processes
    #[arg(long, value_name = "COUNT")]
    random: Option<usize>,

    /// Seed for the random workload
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Mean gap between random arrivals
    #[arg(long, default_value_t = 2.0)]
    mean_interarrival: f64,

    /// Largest random burst time
    #[arg(long, default_value_t = 10)]
    max_burst: Time,

    /// Give random processes priorities in 0..=MAX
    #[arg(long)]
    max_priority: Option<u32>,

    /// Write the workload used for this run as JSON
    #[arg(long)]
    save_workload: Option<PathBuf>,

    /// Print the execution timeline under each report
    #[arg(long)]
    gantt: bool,

    /// Output JSON file path (optional)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl Args {
    fn selected_policies(&self) -> Vec<Policy> {
        self.policies
            .iter()
            .map(|policy| match policy {
                PolicyArg::Fcfs => Policy::Fcfs,
                PolicyArg::Rr => Policy::RoundRobin { quantum: self.quantum },
                PolicyArg::Sjf => Policy::Sjf,
                PolicyArg::Srtf => Policy::Srtf,
                PolicyArg::Priority => Policy::Priority,
                PolicyArg::Batch => Policy::Batch { order: self.batch_order.into() },
            })
            .collect()
    }

    fn build_workload(&self) -> anyhow::Result<Workload> {
        if let Some(path) = &self.workload {
            return Workload::load(path).with_context(|| format!("Failed to load workload {}", path.display()));
        }

        if let Some(count) = self.random {
            let mut generator = WorkloadGenerator::new(self.seed, self.mean_interarrival, self.max_burst)?;
            if let Some(max_priority) = self.max_priority {
                generator = generator.with_priorities(max_priority);
            }
            return Ok(generator.generate(count)?);
        }

        Ok(Workload::from_specs(&self.processes)?)
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cpusched=info,cpusched_simulation_engine=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let workload = args.build_workload()?;
    info!(processes = workload.len(), total_burst = workload.total_burst_time(), "Workload ready");

    if let Some(path) = &args.save_workload {
        let json = serde_json::to_string_pretty(&workload.to_file())?;
        fs::write(path, json).with_context(|| format!("Failed to write workload to {}", path.display()))?;
        info!("Workload saved to {}", path.display());
    }

    let results = compare(&args.selected_policies(), &workload)?;

    for result in &results {
        println!("{}", ScheduleReport::new(result));
        if args.gantt {
            println!("{}\n", GanttChart::new(result));
        }
    }

    if results.len() > 1 {
        println!("{}", ComparisonReport::new(&results));
    }

    if let Some(path) = &args.output {
        let json = serde_json::to_string_pretty(&results)?;
        fs::write(path, json).with_context(|| format!("Failed to write results to {}", path.display()))?;
        info!("Results saved to {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_inline_processes() {
        let args = Args::try_parse_from([
            "cpusched", "--process", "0:5", "--process", "2:3:1", "-p", "fcfs,rr", "-q", "4",
        ])
        .unwrap();

        assert_eq!(args.processes, vec![ProcessSpec::new(0, 5), ProcessSpec::new(2, 3).with_priority(1)]);
        assert_eq!(
            args.selected_policies(),
            vec![Policy::Fcfs, Policy::RoundRobin { quantum: NonZeroU64::new(4).unwrap() }]
        );

        let workload = args.build_workload().unwrap();
        assert_eq!(workload.len(), 2);
    }

    #[test]
    fn test_workload_source_required_and_exclusive() {
        assert!(Args::try_parse_from(["cpusched"]).is_err());
        assert!(Args::try_parse_from(["cpusched", "--random", "5", "--process", "0:1"]).is_err());
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(Args::try_parse_from(["cpusched", "--process", "0:0"]).is_err());
        assert!(Args::try_parse_from(["cpusched", "--process", "0:1", "-q", "0"]).is_err());
        assert!(Args::try_parse_from(["cpusched", "--process", "0:1", "-p", "lottery"]).is_err());
    }

    #[test]
    fn test_random_workload_with_batch_order() {
        let args = Args::try_parse_from([
            "cpusched", "--random", "6", "--seed", "9", "--max-priority", "3", "-p", "priority,batch",
            "--batch-order", "input",
        ])
        .unwrap();

        assert_eq!(
            args.selected_policies(),
            vec![Policy::Priority, Policy::Batch { order: BatchOrder::Input }]
        );

        let workload = args.build_workload().unwrap();
        assert_eq!(workload.len(), 6);
        assert!(workload.processes().iter().all(|p| p.priority.is_some()));
    }
}
