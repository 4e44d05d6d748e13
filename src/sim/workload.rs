use super::process::Process;
use crate::core::Ticks;
use rand::prelude::*;

/// The four-process demo set.
pub fn sample_processes() -> Vec<Process> {
    vec![
        Process::new(1, 0, 5, 2),
        Process::new(2, 1, 3, 1),
        Process::new(3, 2, 8, 3),
        Process::new(4, 3, 6, 2),
    ]
}

/// Each tick in `0..ticks` spawns a process with probability `p_arrival`; a
/// spawned process is short with probability `p_short`. Priorities are drawn
/// from 1..=5. Ids are assigned in arrival order starting at 1.
pub fn bernoulli_processes(
    ticks: Ticks,
    p_arrival: f64,
    p_short: f64,
    short_ticks: Ticks,
    long_ticks: Ticks,
    seed: u64,
) -> Vec<Process> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut processes = Vec::new();

    for t in 0..ticks {
        if rng.random::<f64>() < p_arrival {
            let burst_time = if rng.random::<f64>() < p_short {
                short_ticks
            } else {
                long_ticks
            };

            processes.push(Process {
                id: processes.len() as u64 + 1,
                arrival_time: t,
                burst_time,
                priority: rng.random_range(1..=5),
            });
        }
    }

    processes
}
