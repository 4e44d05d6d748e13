use super::{config::SimConfig, metrics::Metrics, process::Process};
use crate::{
    core::{ExecutionSlice, ProcessId, ProcessTiming, SchedCore, Schedule},
    error::Result,
    scheduler::Scheduler,
};

/// A process set bound to one policy: add processes, schedule, read results.
pub struct Sim<S: Scheduler> {
    pub core: SchedCore<S>,
    processes: Vec<Process>,
    // Result of the last `schedule()`; dropped whenever the process set changes
    schedule: Option<Schedule>,
}

impl<S: Scheduler> Sim<S> {
    pub fn new(scheduler: S) -> Self {
        Self::with_processes(scheduler, Vec::new())
    }

    pub fn with_processes(scheduler: S, processes: Vec<Process>) -> Self {
        Self {
            core: SchedCore::new(scheduler),
            processes,
            schedule: None,
        }
    }

    /// Appends `process`. Ids are not checked here; `schedule()` rejects duplicates.
    pub fn add_process(&mut self, process: Process) {
        self.processes.push(process);
        self.schedule = None;
    }

    pub fn schedule(&mut self) -> Result<&Schedule> {
        let schedule = self.core.execute(&self.processes)?;
        Ok(self.schedule.insert(schedule))
    }

    pub fn last_schedule(&self) -> Option<&Schedule> {
        self.schedule.as_ref()
    }

    /// Slices of the last run; empty before the first `schedule()`.
    pub fn execution_sequence(&self) -> &[ExecutionSlice] {
        self.schedule
            .as_ref()
            .map(Schedule::slices)
            .unwrap_or_default()
    }

    pub fn timing(&self, id: ProcessId) -> Option<&ProcessTiming> {
        self.schedule.as_ref()?.timing(id)
    }

    /// Metrics of the last run. Never fails: zeros if nothing has been scheduled.
    pub fn metrics(&self) -> Metrics {
        self.schedule
            .as_ref()
            .map_or_else(Metrics::default, Schedule::metrics)
    }
}

impl Sim<Box<dyn Scheduler>> {
    pub fn from_config(config: &SimConfig) -> Result<Self> {
        config.validate()?;
        let scheduler = config.policy.scheduler(config.time_quantum)?;
        Ok(Self::with_processes(scheduler, config.processes.clone()))
    }
}
