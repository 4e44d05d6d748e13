pub mod driver;
pub mod observer;
pub mod schedule;
pub mod state;

pub use driver::SchedCore;
pub use schedule::Schedule;
pub use state::{ExecutionSlice, ProcIdx, ProcessId, ProcessTiming, SimCtx, Ticks};
