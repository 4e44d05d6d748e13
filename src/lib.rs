pub mod core;
pub mod error;
pub mod logger;
pub mod scheduler;
pub mod sim;

pub use crate::core::{ExecutionSlice, ProcessTiming, SchedCore, Schedule};
pub use error::{Error, Result};
pub use scheduler::{Policy, Scheduler};
pub use sim::{Metrics, Process, Sim, SimConfig};
