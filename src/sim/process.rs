use crate::core::{ProcessId, Ticks};
use serde::{Deserialize, Serialize};

/// Immutable input record. Lower `priority` means more important; only the
/// Priority policy reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct Process {
    pub id: ProcessId,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    #[serde(default)]
    pub priority: i32,
}

impl Process {
    pub fn new(id: ProcessId, arrival_time: Ticks, burst_time: Ticks, priority: i32) -> Self {
        Self {
            id,
            arrival_time,
            burst_time,
            priority,
        }
    }
}
