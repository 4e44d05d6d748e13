use super::{Policy, Scheduler};
use crate::{core::SimCtx, error::Result};

/// First-Come, First-Served. Equal arrivals run in insertion order.
pub struct Fcfs;

impl Scheduler for Fcfs {
    fn policy(&self) -> Policy {
        Policy::Fcfs
    }

    fn run(&mut self, ctx: &mut SimCtx<'_>) -> Result<()> {
        for idx in ctx.arrival_order() {
            let arrival = ctx.process(idx).arrival_time;
            ctx.advance_to(arrival);
            ctx.run_to_completion(idx)?;
        }
        Ok(())
    }
}
