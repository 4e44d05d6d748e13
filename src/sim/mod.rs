pub mod config;
pub mod driver;
pub mod metrics;
pub mod process;
pub mod workload;

pub use config::SimConfig;
pub use driver::Sim;
pub use metrics::Metrics;
pub use process::Process;
