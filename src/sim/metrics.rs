use crate::core::{Schedule, Ticks};
use average::Estimate;
use serde::Serialize;

/// Aggregate performance of one run.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Metrics {
    pub avg_waiting_time: f64,
    pub avg_turnaround_time: f64,
    pub avg_response_time: f64,
    pub context_switches: usize,
    pub makespan: Ticks,
    pub busy_time: Ticks,
    pub cpu_utilization: f64,
}

impl Metrics {
    /// Averages are taken over every process in the schedule. An empty
    /// schedule yields all zeros.
    pub fn from_schedule(schedule: &Schedule) -> Self {
        if schedule.is_empty() {
            return Self::default();
        }

        let timings = schedule.timings();
        let makespan = schedule.makespan();
        let busy_time = schedule.busy_time();
        Self {
            avg_waiting_time: avg(timings.iter().map(|t| t.waiting_time() as f64)),
            avg_turnaround_time: avg(timings.iter().map(|t| t.turnaround_time() as f64)),
            avg_response_time: avg(timings.iter().map(|t| t.response_time() as f64)),
            context_switches: schedule.context_switches(),
            makespan,
            busy_time,
            cpu_utilization: if makespan == 0 {
                0.0
            } else {
                busy_time as f64 / makespan as f64
            },
        }
    }
}

fn avg(iter: impl Iterator<Item = f64>) -> f64 {
    iter.collect::<average::Mean>().estimate()
}
