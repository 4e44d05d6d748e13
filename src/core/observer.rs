use super::{schedule::Schedule, state::Ticks};
use crate::sim::Process;

// Checks the invariants every finished run must satisfy. Only active in debug builds.
pub fn observe(processes: &[Process], schedule: &Schedule) {
    for pair in schedule.slices().windows(2) {
        debug_assert!(
            pair[0].end <= pair[1].start,
            "Slice {:?} overlaps or precedes {:?}",
            pair[1],
            pair[0]
        );
    }

    for slice in schedule.slices() {
        debug_assert!(
            slice.start < slice.end,
            "Empty slice emitted for process {}",
            slice.process
        );
    }

    for process in processes {
        let id = process.id;
        let served: Ticks = schedule.slices_of(id).map(|s| s.duration()).sum();
        debug_assert_eq!(
            served, process.burst_time,
            "Process {id} received {served} ticks, burst is {}",
            process.burst_time
        );

        let Some(timing) = schedule.timing(id) else {
            debug_assert!(false, "Process {id} missing from timing table");
            continue;
        };
        debug_assert_eq!(timing.remaining_time, 0, "Process {id} left unfinished");
        match (timing.start_time, timing.completion_time) {
            (Some(start), Some(done)) => {
                debug_assert!(
                    process.arrival_time <= start && start <= done,
                    "Process {id} timestamps out of order: arrival {} start {start} completion {done}",
                    process.arrival_time
                );
            }
            other => debug_assert!(false, "Process {id} has incomplete timestamps {other:?}"),
        }
    }
}
