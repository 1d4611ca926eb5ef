//! Synthetic workload generation
//!
//! Arrivals follow a Poisson process (exponential inter-arrival gaps rounded
//! to whole time units), bursts and priorities are uniform. Generation is
//! deterministic for a given seed.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Exp};

use crate::error::{Result, SimError};
use crate::types::Time;
use crate::workload::{ProcessSpec, Workload};

/// Seeded workload generator
pub struct WorkloadGenerator {
    rng: StdRng,
    interarrival: Exp<f64>,
    max_burst: Time,
    max_priority: Option<u32>,
}

impl WorkloadGenerator {
    /// Create a new workload generator
    ///
    /// # Arguments
    /// * `seed` - RNG seed
    /// * `mean_interarrival` - Mean gap between consecutive arrivals (time units)
    /// * `max_burst` - Bursts are drawn uniformly from `1..=max_burst`
    pub fn new(seed: u64, mean_interarrival: f64, max_burst: Time) -> Result<Self> {
        if !mean_interarrival.is_finite() || mean_interarrival <= 0.0 {
            return Err(SimError::invalid_generator(format!(
                "mean inter-arrival time must be positive, got {mean_interarrival}"
            )));
        }
        if max_burst == 0 {
            return Err(SimError::invalid_generator("max burst must be positive"));
        }

        let interarrival = Exp::new(1.0 / mean_interarrival)
            .map_err(|e| SimError::invalid_generator(format!("{e:?}")))?;

        Ok(WorkloadGenerator {
            rng: StdRng::seed_from_u64(seed),
            interarrival,
            max_burst,
            max_priority: None,
        })
    }

    /// Also draw priorities uniformly from `0..=max_priority`
    pub fn with_priorities(mut self, max_priority: u32) -> Self {
        self.max_priority = Some(max_priority);
        self
    }

    /// Generate `count` processes; the first one always arrives at time 0
    pub fn generate(&mut self, count: usize) -> Result<Workload> {
        let mut arrival: Time = 0;
        let mut specs = Vec::with_capacity(count);

        for i in 0..count {
            if i > 0 {
                let gap = self.interarrival.sample(&mut self.rng).round() as Time;
                arrival = arrival.checked_add(gap).ok_or_else(|| {
                    SimError::invalid_generator(format!(
                        "arrival of process {} overflows the clock; lower the mean inter-arrival time",
                        i + 1
                    ))
                })?;
            }

            let burst_time = self.rng.gen_range(1..=self.max_burst);
            let spec = ProcessSpec::new(arrival, burst_time);
            specs.push(match self.max_priority {
                Some(max) => spec.with_priority(self.rng.gen_range(0..=max)),
                None => spec,
            });
        }

        Workload::from_specs(&specs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_is_seeded() {
        let a = WorkloadGenerator::new(11, 2.0, 5).unwrap().generate(20).unwrap();
        let b = WorkloadGenerator::new(11, 2.0, 5).unwrap().generate(20).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_generated_values_in_range() {
        let mut generator = WorkloadGenerator::new(3, 4.0, 6).unwrap().with_priorities(2);
        let workload = generator.generate(50).unwrap();

        assert_eq!(workload.len(), 50);
        assert_eq!(workload.processes()[0].arrival_time, 0);

        let mut previous = 0;
        for process in workload.processes() {
            assert!((1..=6).contains(&process.burst_time));
            assert!(matches!(process.priority, Some(p) if p <= 2));
            assert!(process.arrival_time >= previous);
            previous = process.arrival_time;
        }
    }

    #[test]
    fn test_invalid_configuration() {
        assert!(WorkloadGenerator::new(0, 0.0, 5).is_err());
        assert!(WorkloadGenerator::new(0, f64::NAN, 5).is_err());
        assert!(WorkloadGenerator::new(0, 1.0, 0).is_err());

        let mut generator = WorkloadGenerator::new(0, 1.0, 5).unwrap();
        assert!(matches!(generator.generate(0), Err(SimError::EmptyWorkload)));
    }

    #[test]
    fn test_huge_interarrival_is_an_error() {
        let mut generator = WorkloadGenerator::new(1, 1e30, 5).unwrap();
        assert!(matches!(generator.generate(3), Err(SimError::InvalidGenerator(_))));

        // A single process never draws a gap
        assert_eq!(generator.generate(1).unwrap().len(), 1);
    }
}
