use super::state::{ExecutionSlice, ProcessId, ProcessTiming, Ticks};
use crate::sim::Metrics;
use rustc_hash::FxHashMap;
use serde::Serialize;

/// Outcome of one run: the execution sequence plus a timing row per process,
/// kept in input order and addressable by process id.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Schedule {
    slices: Vec<ExecutionSlice>,
    timings: Vec<ProcessTiming>,
    #[serde(skip)]
    by_id: FxHashMap<ProcessId, usize>,
}

impl Schedule {
    pub(crate) fn new(slices: Vec<ExecutionSlice>, timings: Vec<ProcessTiming>) -> Self {
        let by_id = timings
            .iter()
            .enumerate()
            .map(|(idx, timing)| (timing.id, idx))
            .collect();
        Self {
            slices,
            timings,
            by_id,
        }
    }

    pub fn slices(&self) -> &[ExecutionSlice] {
        &self.slices
    }

    pub fn timings(&self) -> &[ProcessTiming] {
        &self.timings
    }

    pub fn timing(&self, id: ProcessId) -> Option<&ProcessTiming> {
        self.by_id.get(&id).map(|&idx| &self.timings[idx])
    }

    pub fn slices_of(&self, id: ProcessId) -> impl Iterator<Item = &ExecutionSlice> {
        self.slices.iter().filter(move |slice| slice.process == id)
    }

    pub fn is_empty(&self) -> bool {
        self.timings.is_empty()
    }

    /// End of the last slice, measured from t=0.
    pub fn makespan(&self) -> Ticks {
        self.slices.last().map_or(0, |slice| slice.end)
    }

    pub fn busy_time(&self) -> Ticks {
        self.slices.iter().map(ExecutionSlice::duration).sum()
    }

    // Adjacent slices belonging to different processes
    pub fn context_switches(&self) -> usize {
        self.slices
            .windows(2)
            .filter(|pair| pair[0].process != pair[1].process)
            .count()
    }

    pub fn metrics(&self) -> Metrics {
        Metrics::from_schedule(self)
    }
}
