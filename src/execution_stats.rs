// Loss of precision is allowable in this module's use cases.
#![allow(clippy::cast_precision_loss)]

use std::time::{Duration, Instant};

use humantime::format_duration;
use log::info;
use serde::Serialize;

/// A container struct for computed final statistics. If no tick was run, the per tick
/// statistics are zero, as they are meaningless.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ExecutionStatistics {
    pub wall_time: Duration,
    pub runs: u32,
    pub ticks: u64,
    pub population: usize,

    // Per tick stats
    pub wall_time_per_tick: Duration,
    pub wall_time_per_agent_tick: Duration,
}

pub struct ExecutionProfilingCollector {
    /// Start of the first run, used to compute elapsed wall time
    start_time: Instant,
    runs: u32,
    /// Ticks summed over every finished run
    ticks: u64,
}

impl ExecutionProfilingCollector {
    #[must_use]
    pub fn new() -> ExecutionProfilingCollector {
        ExecutionProfilingCollector {
            start_time: Instant::now(),
            runs: 0,
            ticks: 0,
        }
    }

    pub fn record_run(&mut self, ticks: u64) {
        self.runs += 1;
        self.ticks += ticks;
    }

    /// Computes the final summary statistics
    #[must_use]
    pub fn compute_final_statistics(&self, population: usize) -> ExecutionStatistics {
        let wall_time = self.start_time.elapsed();
        let wall_time_per_tick = if self.ticks > 0 {
            Duration::from_secs_f64(wall_time.as_secs_f64() / self.ticks as f64)
        } else {
            Duration::ZERO
        };
        let agent_ticks = self.ticks as f64 * population as f64;
        let wall_time_per_agent_tick = if agent_ticks > 0.0 {
            Duration::from_secs_f64(wall_time.as_secs_f64() / agent_ticks)
        } else {
            Duration::ZERO
        };

        ExecutionStatistics {
            wall_time,
            runs: self.runs,
            ticks: self.ticks,
            population,
            wall_time_per_tick,
            wall_time_per_agent_tick,
        }
    }
}

impl Default for ExecutionProfilingCollector {
    fn default() -> Self {
        ExecutionProfilingCollector::new()
    }
}

/// Prints execution statistics to the console.
///
/// Use `ExecutionProfilingCollector::compute_final_statistics()` to construct `ExecutionStatistics`.
pub fn print_execution_statistics(summary: &ExecutionStatistics) {
    println!("━━━━ Execution Summary ━━━━");
    println!("{:<25}{}", "Wall time:", format_duration(summary.wall_time));
    println!("{:<25}{}", "Runs:", summary.runs);
    println!("{:<25}{}", "Ticks:", summary.ticks);
    println!("{:<25}{}", "Population:", summary.population);
    if summary.ticks > 0 {
        println!(
            "{:<25}{}",
            "Wall time per tick:",
            format_duration(summary.wall_time_per_tick)
        );
        println!(
            "{:<25}{}",
            "Wall time per agent:",
            format_duration(summary.wall_time_per_agent_tick)
        );
    }
}

/// Logs execution statistics with the logging system.
pub fn log_execution_statistics(stats: &ExecutionStatistics) {
    info!("Execution complete.");
    info!("Wall time: {}", format_duration(stats.wall_time));
    info!("Runs: {}, ticks: {}", stats.runs, stats.ticks);
    if stats.ticks > 0 {
        info!(
            "Wall time per tick: {}",
            format_duration(stats.wall_time_per_tick)
        );
    }
}

#[cfg(test)]
mod tests {
    use std::thread;
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_compute_final_statistics_structure() {
        let mut collector = ExecutionProfilingCollector::new();
        collector.record_run(40);
        collector.record_run(60);

        thread::sleep(Duration::from_millis(20));
        let stats = collector.compute_final_statistics(10);

        assert!(stats.wall_time >= Duration::from_millis(20));
        assert_eq!(stats.runs, 2);
        assert_eq!(stats.ticks, 100);
        assert_eq!(stats.population, 10);
        assert!(stats.wall_time_per_tick > Duration::ZERO);
        assert!(stats.wall_time_per_agent_tick <= stats.wall_time_per_tick);
    }

    #[test]
    fn test_no_ticks_results() {
        let collector = ExecutionProfilingCollector::default();
        let stats = collector.compute_final_statistics(0);

        assert_eq!(stats.runs, 0);
        assert_eq!(stats.wall_time_per_tick, Duration::ZERO);
        assert_eq!(stats.wall_time_per_agent_tick, Duration::ZERO);
    }

    #[test]
    fn test_statistics_serialize() {
        let mut collector = ExecutionProfilingCollector::new();
        collector.record_run(5);
        let stats = collector.compute_final_statistics(3);
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["ticks"], 5);
        assert_eq!(json["population"], 3);
    }
}
