use super::{Policy, Scheduler, priq};
use crate::{core::SimCtx, error::Result};

/// Shortest Job First, non-preemptive. Once dispatched a job runs to completion,
/// even if a shorter one arrives meanwhile. Equal bursts go in ready-queue
/// entry order.
pub struct Sjf;

impl Scheduler for Sjf {
    fn policy(&self) -> Policy {
        Policy::Sjf
    }

    fn run(&mut self, ctx: &mut SimCtx<'_>) -> Result<()> {
        priq::run_smallest_first(ctx, |process| process.burst_time)
    }
}
