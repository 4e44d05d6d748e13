use cpusched::{
    Error, Metrics, Policy, Schedule, Sim, SimConfig, logger,
    sim::workload::{bernoulli_processes, sample_processes},
};
use log::{error, info};
use serde::Serialize;
use std::{env, process::ExitCode};
use tabled::{Table, Tabled};

const USAGE: &str = "\
usage: cpusched [OPTIONS] [WORKLOAD.json]

  -p, --policy <fcfs|sjf|priority|rr>   policy to run (overrides the file)
  -q, --quantum <TICKS>                 Round-Robin time quantum
      --compare                         run every policy and compare metrics
      --random <SEED>                   generate a Bernoulli workload
      --json                            print the schedule as JSON
  -v                                    more logging (repeatable)

Without a workload file or --random, the built-in sample set is used.";

#[derive(Default)]
struct Args {
    config: Option<String>,
    policy: Option<Policy>,
    quantum: Option<u64>,
    seed: Option<u64>,
    compare: bool,
    json: bool,
    verbosity: u8,
}

fn parse_args(argv: impl IntoIterator<Item = String>) -> Result<Args, String> {
    let mut args = Args::default();
    let mut iter = argv.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-p" | "--policy" => {
                let value = iter.next().ok_or("--policy needs a value")?;
                args.policy = Some(value.parse().map_err(|e: Error| e.to_string())?);
            }
            "-q" | "--quantum" => {
                let value = iter.next().ok_or("--quantum needs a value")?;
                let quantum = value
                    .parse::<u64>()
                    .map_err(|_| format!("Invalid quantum '{value}'"))?;
                args.quantum = Some(quantum);
            }
            "--random" => {
                let value = iter.next().ok_or("--random needs a seed")?;
                let seed = value
                    .parse::<u64>()
                    .map_err(|_| format!("Invalid seed '{value}'"))?;
                args.seed = Some(seed);
            }
            "--compare" => args.compare = true,
            "--json" => args.json = true,
            "-h" | "--help" => return Err(USAGE.to_string()),
            flag if flag.starts_with("-v") && flag[1..].chars().all(|c| c == 'v') => {
                let count = u8::try_from(flag.len() - 1).unwrap_or(u8::MAX);
                args.verbosity = args.verbosity.saturating_add(count);
            }
            flag if flag.starts_with('-') => {
                return Err(format!("Unknown option '{flag}'\n\n{USAGE}"));
            }
            path => args.config = Some(path.to_string()),
        }
    }
    Ok(args)
}

fn build_config(args: &Args) -> cpusched::Result<SimConfig> {
    let mut config = match &args.config {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.processes = bernoulli_processes(40, 0.3, 0.3, 2, 6, seed);
    } else if config.processes.is_empty() {
        config.processes = sample_processes();
    }
    if let Some(policy) = args.policy {
        config.policy = policy;
    }
    if let Some(quantum) = args.quantum {
        config.time_quantum = quantum;
    }
    config.validate()?;
    Ok(config)
}

#[derive(Serialize)]
struct Report<'a> {
    policy: Policy,
    schedule: &'a Schedule,
    metrics: Metrics,
}

#[derive(Tabled)]
struct ProcessRow {
    id: u64,
    arrival: u64,
    burst: u64,
    priority: i32,
    start: String,
    completion: String,
    waiting: u64,
    turnaround: u64,
    response: u64,
}

#[derive(Tabled)]
struct ComparisonRow {
    policy: String,
    avg_waiting: String,
    avg_turnaround: String,
    avg_response: String,
    context_switches: usize,
    utilization: String,
}

fn fmt_opt(value: Option<u64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

// One line per slice run, with "idle" for gaps: 0 |P1| 5 |P2| 8
fn gantt_line(schedule: &Schedule) -> String {
    let mut line = String::new();
    let mut clock = None;
    for slice in schedule.slices() {
        match clock {
            None => line.push_str(&slice.start.to_string()),
            Some(end) if end < slice.start => {
                line.push_str(&format!(" |idle| {}", slice.start));
            }
            Some(_) => {}
        }
        line.push_str(&format!(" |P{}| {}", slice.process, slice.end));
        clock = Some(slice.end);
    }
    line
}

fn print_schedule(name: &str, schedule: &Schedule) {
    let metrics = schedule.metrics();
    println!("=== {name} ===");
    println!("{}", gantt_line(schedule));
    println!();

    let rows = schedule.timings().iter().map(|t| ProcessRow {
        id: t.id,
        arrival: t.arrival_time,
        burst: t.burst_time,
        priority: t.priority,
        start: fmt_opt(t.start_time),
        completion: fmt_opt(t.completion_time),
        waiting: t.waiting_time(),
        turnaround: t.turnaround_time(),
        response: t.response_time(),
    });
    println!("{}", Table::new(rows));
    println!();
    println!("Average waiting time:    {:.2} ticks", metrics.avg_waiting_time);
    println!("Average turnaround time: {:.2} ticks", metrics.avg_turnaround_time);
    println!("Average response time:   {:.2} ticks", metrics.avg_response_time);
    println!("Context switches:        {}", metrics.context_switches);
    println!("CPU utilization:         {:.1}%", metrics.cpu_utilization * 100.0);
}

fn compare(config: &SimConfig) -> cpusched::Result<()> {
    let mut rows = Vec::new();
    for policy in Policy::ALL {
        let scheduler = policy.scheduler(config.time_quantum)?;
        let mut sim = Sim::with_processes(scheduler, config.processes.clone());
        let name = sim.core.scheduler.name();
        let metrics = sim.schedule()?.metrics();
        rows.push(ComparisonRow {
            policy: name,
            avg_waiting: format!("{:.2}", metrics.avg_waiting_time),
            avg_turnaround: format!("{:.2}", metrics.avg_turnaround_time),
            avg_response: format!("{:.2}", metrics.avg_response_time),
            context_switches: metrics.context_switches,
            utilization: format!("{:.1}%", metrics.cpu_utilization * 100.0),
        });
    }
    println!("{}", Table::new(rows));
    Ok(())
}

fn run(args: &Args) -> cpusched::Result<()> {
    let config = build_config(args)?;
    info!("Loaded {} process(es)", config.processes.len());

    if args.compare {
        return compare(&config);
    }

    let mut sim = Sim::from_config(&config)?;
    let name = sim.core.scheduler.name();
    let schedule = sim.schedule()?;
    if args.json {
        let report = Report {
            policy: config.policy,
            schedule,
            metrics: schedule.metrics(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_schedule(&name, schedule);
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = match parse_args(env::args().skip(1)) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::from(2);
        }
    };
    // Only fails if a logger is already installed
    let _ = logger::init(logger::level_for(args.verbosity));

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
