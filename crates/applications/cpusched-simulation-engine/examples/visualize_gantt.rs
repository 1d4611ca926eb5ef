//! Visualize scheduling policies as Gantt charts
//!
//! Runs FCFS, Round-Robin, SJF and SRTF over the same random workload and
//! writes one interactive HTML chart with a row per policy.
//!
//! Usage:
//!   cargo run --example visualize_gantt

use std::num::NonZeroU64;

use cpusched_simulation_engine::{Policy, generator::WorkloadGenerator, simulator::compare};
use plotly::{
    color::NamedColor,
    common::{Line, Mode},
    layout::{Axis, Layout},
    Plot, Scatter,
};

const PALETTE: [NamedColor; 8] = [
    NamedColor::SteelBlue,
    NamedColor::OrangeRed,
    NamedColor::SeaGreen,
    NamedColor::Goldenrod,
    NamedColor::MediumPurple,
    NamedColor::Teal,
    NamedColor::Crimson,
    NamedColor::SlateGray,
];

fn main() -> anyhow::Result<()> {
    println!("🎨 Generating scheduling timeline visualization...");

    let workload = WorkloadGenerator::new(2024, 3.0, 8)?.generate(8)?;
    let policies = [
        Policy::Fcfs,
        Policy::RoundRobin { quantum: NonZeroU64::new(2).expect("quantum is non-zero") },
        Policy::Sjf,
        Policy::Srtf,
    ];
    let results = compare(&policies, &workload)?;

    let mut plot = Plot::new();

    for result in &results {
        let row = result.summary.policy.clone();

        // One thick line segment per timeline slice
        for slice in &result.schedule.timeline {
            let (name, color) = match slice.process {
                Some(id) => (format!("P{id}"), PALETTE[id as usize % PALETTE.len()].clone()),
                None => ("idle".to_string(), NamedColor::LightGray),
            };

            let trace = Scatter::new(vec![slice.start, slice.end], vec![row.clone(), row.clone()])
                .name(&name)
                .mode(Mode::Lines)
                .line(Line::new().color(color).width(18.0));
            plot.add_trace(trace);
        }
    }

    let layout = Layout::new()
        .title("CPU Scheduling Timelines")
        .x_axis(
            Axis::new()
                .title("Time")
                .grid_color(NamedColor::LightGray),
        )
        .y_axis(Axis::new().title("Policy"));
    plot.set_layout(layout);

    let output_path = std::env::temp_dir().join("cpusched_gantt.html");
    plot.write_html(&output_path);

    println!("✅ Visualization saved to {}", output_path.display());
    for result in &results {
        println!(
            "   {:<10} avg wait {:>6.2}  avg turnaround {:>6.2}  idle {}",
            result.summary.policy,
            result.summary.average_waiting_time,
            result.summary.average_turnaround_time,
            result.summary.total_idle_time,
        );
    }

    Ok(())
}
