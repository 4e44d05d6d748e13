pub mod fcfs;
pub mod priority;
pub mod priq;
pub mod rr;
pub mod sjf;

use crate::{
    core::{SimCtx, Ticks},
    error::{Error, Result},
};
pub use fcfs::Fcfs;
pub use priority::Priority;
pub use rr::RoundRobin;
use serde::{Deserialize, Serialize};
pub use sjf::Sjf;
use std::{fmt, str::FromStr};

pub const DEFAULT_TIME_QUANTUM: Ticks = 2;

/// A scheduling policy. `run` drives `ctx` until every process has completed,
/// using only `advance_to` for idle gaps and `run` for dispatches.
pub trait Scheduler {
    fn policy(&self) -> Policy;

    fn name(&self) -> String {
        self.policy().to_string()
    }

    fn run(&mut self, ctx: &mut SimCtx<'_>) -> Result<()>;
}

impl<S: Scheduler + ?Sized> Scheduler for Box<S> {
    fn policy(&self) -> Policy {
        (**self).policy()
    }

    fn name(&self) -> String {
        (**self).name()
    }

    fn run(&mut self, ctx: &mut SimCtx<'_>) -> Result<()> {
        (**self).run(ctx)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    #[default]
    Fcfs,
    Sjf,
    Priority,
    RoundRobin,
}

impl Policy {
    pub const ALL: [Policy; 4] = [
        Policy::Fcfs,
        Policy::Sjf,
        Policy::Priority,
        Policy::RoundRobin,
    ];

    /// Build the scheduler for this policy. `quantum` is only read by Round-Robin.
    pub fn scheduler(self, quantum: Ticks) -> Result<Box<dyn Scheduler>> {
        let scheduler: Box<dyn Scheduler> = match self {
            Policy::Fcfs => Box::new(Fcfs),
            Policy::Sjf => Box::new(Sjf),
            Policy::Priority => Box::new(Priority),
            Policy::RoundRobin => Box::new(RoundRobin::new(quantum)?),
        };
        Ok(scheduler)
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Policy::Fcfs => write!(f, "First-Come, First-Served"),
            Policy::Sjf => write!(f, "Shortest Job First"),
            Policy::Priority => write!(f, "Priority"),
            Policy::RoundRobin => write!(f, "Round Robin"),
        }
    }
}

impl FromStr for Policy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "fcfs" => Ok(Policy::Fcfs),
            "sjf" => Ok(Policy::Sjf),
            "priority" | "prio" => Ok(Policy::Priority),
            "rr" | "round-robin" | "round_robin" => Ok(Policy::RoundRobin),
            _ => Err(Error::UnknownPolicy(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_policy() {
        assert_eq!("FCFS".parse::<Policy>().unwrap(), Policy::Fcfs);
        assert_eq!("rr".parse::<Policy>().unwrap(), Policy::RoundRobin);
        assert_eq!("round-robin".parse::<Policy>().unwrap(), Policy::RoundRobin);
        assert!(matches!(
            "lottery".parse::<Policy>(),
            Err(Error::UnknownPolicy(name)) if name == "lottery"
        ));
    }

    #[test]
    fn test_factory() {
        for policy in Policy::ALL {
            let scheduler = policy.scheduler(DEFAULT_TIME_QUANTUM).unwrap();
            assert_eq!(scheduler.policy(), policy);
        }
        assert!(matches!(
            Policy::RoundRobin.scheduler(0),
            Err(Error::InvalidQuantum(0))
        ));
        // Quantum is irrelevant to the other policies
        assert!(Policy::Sjf.scheduler(0).is_ok());
    }

    #[test]
    fn test_serde_names() {
        let policy: Policy = serde_json::from_str("\"round_robin\"").unwrap();
        assert_eq!(policy, Policy::RoundRobin);
        assert_eq!(serde_json::to_string(&Policy::Sjf).unwrap(), "\"sjf\"");
    }
}
