use super::schedule::Schedule;
use crate::{
    error::{Error, Result},
    sim::Process,
};
use log::trace;
use serde::Serialize;

// Index into the process snapshot of a run
pub type ProcIdx = usize;
pub type ProcessId = u64;
pub type Ticks = u64;

/// One contiguous span during which a single process held the CPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExecutionSlice {
    pub process: ProcessId,
    pub start: Ticks,
    pub end: Ticks,
}

impl ExecutionSlice {
    pub fn duration(&self) -> Ticks {
        self.end - self.start
    }
}

/// Per-process result row of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProcessTiming {
    pub id: ProcessId,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    pub priority: i32,
    pub remaining_time: Ticks,
    pub start_time: Option<Ticks>,
    pub completion_time: Option<Ticks>,
}

impl ProcessTiming {
    fn new(process: &Process) -> Self {
        Self {
            id: process.id,
            arrival_time: process.arrival_time,
            burst_time: process.burst_time,
            priority: process.priority,
            remaining_time: process.burst_time,
            start_time: None,
            completion_time: None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.completion_time.is_some()
    }

    pub fn turnaround_time(&self) -> Ticks {
        self.completion_time
            .map_or(0, |done| done.saturating_sub(self.arrival_time))
    }

    /// Time spent ready but off the CPU.
    pub fn waiting_time(&self) -> Ticks {
        if self.is_completed() {
            self.turnaround_time().saturating_sub(self.burst_time)
        } else {
            self.response_time()
        }
    }

    /// Time to first dispatch.
    pub fn response_time(&self) -> Ticks {
        self.start_time
            .map_or(0, |start| start.saturating_sub(self.arrival_time))
    }
}

/// Mutable state of a single run. Policies only touch processes through this,
/// so the caller's `Process` values are never mutated.
#[derive(Debug)]
pub struct SimCtx<'a> {
    pub now: Ticks,
    processes: &'a [Process],
    timings: Vec<ProcessTiming>,
    slices: Vec<ExecutionSlice>,
    unfinished: usize,
}

impl<'a> SimCtx<'a> {
    pub fn new(processes: &'a [Process]) -> Self {
        Self {
            now: 0,
            processes,
            timings: processes.iter().map(ProcessTiming::new).collect(),
            slices: Vec::new(),
            unfinished: processes.len(),
        }
    }

    pub fn process(&self, idx: ProcIdx) -> &Process {
        &self.processes[idx]
    }

    pub fn timing(&self, idx: ProcIdx) -> &ProcessTiming {
        &self.timings[idx]
    }

    pub fn unfinished(&self) -> usize {
        self.unfinished
    }

    /// Process indices ordered by arrival time; equal arrivals keep insertion order.
    pub fn arrival_order(&self) -> Vec<ProcIdx> {
        let mut order: Vec<ProcIdx> = (0..self.processes.len()).collect();
        order.sort_by_key(|&idx| self.processes[idx].arrival_time);
        order
    }

    /// Idle the CPU until `t`. No slice is emitted for the gap.
    pub fn advance_to(&mut self, t: Ticks) {
        if t > self.now {
            trace!("t={} cpu idle until {}", self.now, t);
            self.now = t;
        }
    }

    // Give `idx` the CPU for at most `budget` ticks. Returns true if it completed.
    pub fn run(&mut self, idx: ProcIdx, budget: Ticks) -> Result<bool> {
        let now = self.now;
        let timing = &mut self.timings[idx];
        debug_assert!(
            timing.completion_time.is_none(),
            "Process {} dispatched after completion",
            timing.id
        );
        debug_assert!(
            timing.arrival_time <= now,
            "Process {} dispatched before its arrival",
            timing.id
        );

        let exec = budget.min(timing.remaining_time);
        let end = now
            .checked_add(exec)
            .ok_or(Error::ClockOverflow { id: timing.id })?;

        if timing.start_time.is_none() {
            timing.start_time = Some(now);
        }
        timing.remaining_time -= exec;
        if exec > 0 {
            self.slices.push(ExecutionSlice {
                process: timing.id,
                start: now,
                end,
            });
        }
        trace!(
            "t={} run process {} for {} tick(s), {} remaining",
            now, timing.id, exec, timing.remaining_time
        );

        let completed = timing.remaining_time == 0;
        if completed {
            timing.completion_time = Some(end);
            self.unfinished -= 1;
        }
        self.now = end;
        Ok(completed)
    }

    /// Run `idx` until its whole remaining burst is consumed.
    pub fn run_to_completion(&mut self, idx: ProcIdx) -> Result<()> {
        let completed = self.run(idx, Ticks::MAX)?;
        debug_assert!(completed, "Unbounded run must complete the process");
        Ok(())
    }

    pub fn finish(self) -> Schedule {
        Schedule::new(self.slices, self.timings)
    }
}
