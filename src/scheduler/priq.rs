use crate::{
    core::{ProcIdx, SimCtx},
    error::Result,
    sim::Process,
};
use keyed_priority_queue::KeyedPriorityQueue;
use std::{cmp::Ordering, collections::VecDeque};

/// Ready-queue rank: policy key first, then the order the process entered the
/// ready queue.
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub struct Rank<K> {
    pub key: K,
    pub seq: usize,
}

// KeyedPriorityQueue is a max-heap, so we need to flip-flop Rank's Ord
impl<K: Ord> PartialOrd for Rank<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> Ord for Rank<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .key
            .cmp(&self.key)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Non-preemptive dispatch loop: whenever the CPU frees up, run the arrived
/// process with the smallest `key` to completion. Used by SJF and Priority.
pub fn run_smallest_first<K, F>(ctx: &mut SimCtx<'_>, key: F) -> Result<()>
where
    K: Ord + Copy,
    F: Fn(&Process) -> K,
{
    let mut pending: VecDeque<ProcIdx> = ctx.arrival_order().into();
    let mut ready: KeyedPriorityQueue<ProcIdx, Rank<K>> = KeyedPriorityQueue::new();
    let mut seq = 0;

    loop {
        while let Some(&idx) = pending.front() {
            let process = ctx.process(idx);
            if process.arrival_time > ctx.now {
                break;
            }
            ready.push(
                idx,
                Rank {
                    key: key(process),
                    seq,
                },
            );
            seq += 1;
            pending.pop_front();
        }

        let Some((idx, _)) = ready.pop() else {
            match pending.front() {
                Some(&next) => {
                    let arrival = ctx.process(next).arrival_time;
                    ctx.advance_to(arrival);
                    continue;
                }
                None => return Ok(()),
            }
        };

        ctx.run_to_completion(idx)?;
    }
}
