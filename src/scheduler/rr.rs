use super::{Policy, Scheduler};
use crate::{
    core::{ProcIdx, SimCtx, Ticks},
    error::{Error, Result},
};
use std::collections::VecDeque;

/// Round-Robin with a fixed time quantum.
///
/// A process preempted at `t` is re-queued behind every process that arrived
/// at or before `t`, including arrivals exactly at `t`.
#[derive(Debug, Clone, Copy)]
pub struct RoundRobin {
    quantum: Ticks,
}

impl RoundRobin {
    pub fn new(quantum: Ticks) -> Result<Self> {
        if quantum == 0 {
            return Err(Error::InvalidQuantum(quantum));
        }
        Ok(Self { quantum })
    }

    pub fn quantum(&self) -> Ticks {
        self.quantum
    }
}

// Enqueue every not-yet-admitted process that has arrived by `ctx.now`
fn admit(ctx: &SimCtx<'_>, order: &[ProcIdx], cursor: &mut usize, ready: &mut VecDeque<ProcIdx>) {
    while let Some(&idx) = order.get(*cursor) {
        if ctx.process(idx).arrival_time > ctx.now {
            break;
        }
        ready.push_back(idx);
        *cursor += 1;
    }
}

impl Scheduler for RoundRobin {
    fn policy(&self) -> Policy {
        Policy::RoundRobin
    }

    fn name(&self) -> String {
        format!("Round Robin (quantum {})", self.quantum())
    }

    fn run(&mut self, ctx: &mut SimCtx<'_>) -> Result<()> {
        let order = ctx.arrival_order();
        let mut cursor = 0;
        let mut ready = VecDeque::new();

        while ctx.unfinished() > 0 {
            admit(ctx, &order, &mut cursor, &mut ready);

            let Some(idx) = ready.pop_front() else {
                match order.get(cursor) {
                    Some(&next) => {
                        let arrival = ctx.process(next).arrival_time;
                        ctx.advance_to(arrival);
                        continue;
                    }
                    None => {
                        return Err(Error::NoArrivalProgress {
                            unfinished: ctx.unfinished(),
                        });
                    }
                }
            };

            if !ctx.run(idx, self.quantum)? {
                admit(ctx, &order, &mut cursor, &mut ready);
                ready.push_back(idx);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::{SchedCore, Schedule},
        scheduler::Fcfs,
        sim::Process,
    };

    fn schedule(quantum: Ticks, processes: &[Process]) -> Schedule {
        SchedCore::new(RoundRobin::new(quantum).unwrap())
            .execute(processes)
            .unwrap()
    }

    fn spans(schedule: &Schedule) -> Vec<(u64, u64, u64)> {
        schedule
            .slices()
            .iter()
            .map(|s| (s.process, s.start, s.end))
            .collect()
    }

    #[test]
    fn test_rr_alternates() {
        let processes = vec![Process::new(1, 0, 5, 0), Process::new(2, 1, 3, 0)];
        let schedule = schedule(2, &processes);
        assert_eq!(
            spans(&schedule),
            vec![(1, 0, 2), (2, 2, 4), (1, 4, 6), (2, 6, 7), (1, 7, 8)]
        );
        assert_eq!(schedule.timing(1).unwrap().completion_time, Some(8));
        assert_eq!(schedule.timing(2).unwrap().completion_time, Some(7));
        assert_eq!(schedule.timing(2).unwrap().start_time, Some(2));
    }

    #[test]
    fn test_rr_new_arrival_ahead_of_preempted() {
        // B arrives exactly when A's first quantum expires
        let processes = vec![Process::new(1, 0, 4, 0), Process::new(2, 2, 2, 0)];
        assert_eq!(
            spans(&schedule(2, &processes)),
            vec![(1, 0, 2), (2, 2, 4), (1, 4, 6)]
        );
    }

    #[test]
    fn test_rr_slices_bounded_by_quantum() {
        let processes = vec![
            Process::new(1, 0, 7, 0),
            Process::new(2, 0, 3, 0),
            Process::new(3, 4, 9, 0),
        ];
        let schedule = schedule(3, &processes);
        assert!(schedule.slices().iter().all(|s| s.duration() <= 3));
        for process in &processes {
            let served: u64 = schedule.slices_of(process.id).map(|s| s.duration()).sum();
            assert_eq!(served, process.burst_time);
        }
    }

    #[test]
    fn test_rr_idle_until_next_arrival() {
        let processes = vec![Process::new(1, 0, 1, 0), Process::new(2, 5, 3, 0)];
        assert_eq!(
            spans(&schedule(2, &processes)),
            vec![(1, 0, 1), (2, 5, 7), (2, 7, 8)]
        );
    }

    #[test]
    fn test_rr_large_quantum_matches_fcfs() {
        let processes = vec![
            Process::new(1, 3, 4, 0),
            Process::new(2, 0, 2, 0),
            Process::new(3, 0, 5, 0),
            Process::new(4, 9, 1, 0),
        ];
        let fcfs = SchedCore::new(Fcfs).execute(&processes).unwrap();
        assert_eq!(spans(&schedule(100, &processes)), spans(&fcfs));
    }

    #[test]
    fn test_rr_rerun_is_identical() {
        let processes = vec![
            Process::new(1, 0, 5, 0),
            Process::new(2, 1, 3, 0),
            Process::new(3, 2, 4, 0),
        ];
        let mut core = SchedCore::new(RoundRobin::new(2).unwrap());
        let first = core.execute(&processes).unwrap();
        let second = core.execute(&processes).unwrap();
        assert_eq!(first.slices(), second.slices());
        assert_eq!(first.timings(), second.timings());
    }

    #[test]
    fn test_rr_zero_quantum_rejected() {
        assert!(matches!(RoundRobin::new(0), Err(Error::InvalidQuantum(0))));
        assert_eq!(RoundRobin::new(1).unwrap().quantum(), 1);
        assert_eq!(
            RoundRobin::new(4).unwrap().name(),
            "Round Robin (quantum 4)"
        );
    }
}
