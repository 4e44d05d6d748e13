use super::process::Process;
use crate::{
    core::Ticks,
    error::{Error, Result},
    scheduler::{DEFAULT_TIME_QUANTUM, Policy},
};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// A workload plus the policy to run it under, as read from a JSON file:
///
/// ```json
/// { "policy": "round_robin", "time_quantum": 2,
///   "processes": [{ "id": 1, "arrival_time": 0, "burst_time": 5, "priority": 2 }] }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SimConfig {
    pub policy: Policy,
    pub time_quantum: Ticks,
    pub processes: Vec<Process>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            policy: Policy::Fcfs,
            time_quantum: DEFAULT_TIME_QUANTUM,
            processes: Vec::new(),
        }
    }
}

impl SimConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// Checks the input contract the engine relies on: unique ids, positive
    /// bursts, a quantum of at least 1 when running Round-Robin, and a
    /// workload that finishes before the clock runs out.
    pub fn validate(&self) -> Result<()> {
        if self.policy == Policy::RoundRobin && self.time_quantum == 0 {
            return Err(Error::InvalidQuantum(self.time_quantum));
        }

        let mut seen = FxHashSet::default();
        for process in &self.processes {
            if process.burst_time == 0 {
                return Err(Error::ZeroBurst(process.id));
            }
            if !seen.insert(process.id) {
                return Err(Error::DuplicateProcessId(process.id));
            }
        }
        ensure_fits_clock(&self.processes)
    }
}

// Every policy keeps the CPU busy while work is ready, so they all share the
// FCFS makespan. If that fits in `Ticks`, no run can overflow the clock.
fn ensure_fits_clock(processes: &[Process]) -> Result<()> {
    let mut order: Vec<&Process> = processes.iter().collect();
    order.sort_by_key(|process| process.arrival_time);

    let mut clock: Ticks = 0;
    for process in order {
        clock = clock
            .max(process.arrival_time)
            .checked_add(process.burst_time)
            .ok_or(Error::ClockOverflow { id: process.id })?;
    }
    Ok(())
}
