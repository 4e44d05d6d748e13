use super::{observer, schedule::Schedule, state::SimCtx};
use crate::{
    error::{Error, Result},
    scheduler::Scheduler,
    sim::Process,
};
use log::{debug, warn};
use rustc_hash::FxHashSet;

/// Runs a policy over a process snapshot. Stateless between runs: every call
/// starts from a fresh `SimCtx`, so the same snapshot may be rescheduled freely.
pub struct SchedCore<S: Scheduler> {
    pub scheduler: S,
}

impl<S: Scheduler> SchedCore<S> {
    pub fn new(scheduler: S) -> Self {
        Self { scheduler }
    }

    pub fn execute(&mut self, processes: &[Process]) -> Result<Schedule> {
        ensure_unique_ids(processes)?;

        let mut ctx = SimCtx::new(processes);
        self.scheduler.run(&mut ctx)?;

        let unfinished = ctx.unfinished();
        if unfinished > 0 {
            warn!(
                "{} stopped at t={} with {unfinished} process(es) unfinished",
                self.scheduler.name(),
                ctx.now
            );
            return Err(Error::NoArrivalProgress { unfinished });
        }

        let schedule = ctx.finish();
        observer::observe(processes, &schedule);
        debug!(
            "{} scheduled {} process(es) into {} slice(s), makespan {}",
            self.scheduler.name(),
            processes.len(),
            schedule.slices().len(),
            schedule.makespan()
        );
        Ok(schedule)
    }
}

// Results are keyed by id, so ids must be unambiguous.
fn ensure_unique_ids(processes: &[Process]) -> Result<()> {
    let mut seen = FxHashSet::default();
    for process in processes {
        if !seen.insert(process.id) {
            return Err(Error::DuplicateProcessId(process.id));
        }
    }
    Ok(())
}
