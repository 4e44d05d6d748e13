use crate::core::{ProcessId, Ticks};
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Time quantum must be at least 1 tick, got {0}.")]
    InvalidQuantum(Ticks),
    #[error("Process id {0} appears more than once.")]
    DuplicateProcessId(ProcessId),
    #[error("Process {0} has a burst time of 0, burst time must be > 0.")]
    ZeroBurst(ProcessId),
    #[error("{unfinished} process(es) left unfinished with nothing left to arrive.")]
    NoArrivalProgress { unfinished: usize },
    #[error("Running process {id} would push the clock past {} ticks.", Ticks::MAX)]
    ClockOverflow { id: ProcessId },
    #[error("Unknown scheduling policy '{0}'.")]
    UnknownPolicy(String),
    #[error("IO Error: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid workload file: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
