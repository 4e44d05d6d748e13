use super::{Policy, Scheduler, priq};
use crate::{core::SimCtx, error::Result};

/// Non-preemptive priority: lowest `priority` value first, then earliest
/// arrival, then ready-queue entry order.
pub struct Priority;

impl Scheduler for Priority {
    fn policy(&self) -> Policy {
        Policy::Priority
    }

    fn run(&mut self, ctx: &mut SimCtx<'_>) -> Result<()> {
        priq::run_smallest_first(ctx, |process| (process.priority, process.arrival_time))
    }
}
