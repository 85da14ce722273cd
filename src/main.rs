use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};

use u_roundrobin::generate::WorkloadGenerator;
use u_roundrobin::scheduler::QueuePolicy;
use u_roundrobin::{run_config, SimulationConfig};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Round-robin CPU scheduling simulator", long_about = None)]
struct Args {
    /// Burst times in workload order, comma separated (e.g. 5,3,8)
    #[arg(
        short = 'b',
        long = "burst",
        value_delimiter = ',',
        allow_negative_numbers = true,
        conflicts_with_all = ["config", "random"]
    )]
    burst: Vec<i64>,

    /// Time quantum
    #[arg(short = 'q', long = "quantum", allow_negative_numbers = true)]
    quantum: Option<i64>,

    /// Load the simulation from a JSON config file
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Generate N random burst times instead of --burst
    #[arg(short = 'r', long = "random", value_name = "N", conflicts_with = "config")]
    random: Option<usize>,

    /// Seed for --random
    #[arg(long = "seed", default_value_t = 0)]
    seed: u64,

    /// Smallest random burst time
    #[arg(long = "min-burst", default_value_t = 1)]
    min_burst: i64,

    /// Largest random burst time
    #[arg(long = "max-burst", default_value_t = 10)]
    max_burst: i64,

    /// Ready-queue representation
    #[arg(long = "policy", value_enum)]
    policy: Option<PolicyArg>,

    /// Maximum number of workloads
    #[arg(long = "max-capacity")]
    max_capacity: Option<usize>,

    /// Print the report as JSON
    #[arg(long = "json")]
    json: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum PolicyArg {
    SkipScan,
    ExplicitQueue,
}

impl From<PolicyArg> for QueuePolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::SkipScan => QueuePolicy::SkipScan,
            PolicyArg::ExplicitQueue => QueuePolicy::ExplicitQueue,
        }
    }
}

fn resolve_config(args: &Args) -> Result<SimulationConfig> {
    let mut config = match (&args.config, args.random) {
        (Some(path), _) => SimulationConfig::from_path(path)?,
        (None, Some(count)) => {
            let bursts = WorkloadGenerator::new(args.seed)
                .with_burst_range(args.min_burst, args.max_burst)
                .burst_times(count);
            SimulationConfig::new(bursts, 0)
        }
        (None, None) => SimulationConfig::new(args.burst.clone(), 0),
    };

    match (args.quantum, &args.config) {
        (Some(quantum), _) => config.quantum = quantum,
        (None, Some(_)) => {}
        (None, None) => bail!("--quantum is required unless --config is given"),
    }
    if let Some(policy) = args.policy {
        config.queue_policy = policy.into();
    }
    if let Some(max_capacity) = args.max_capacity {
        config.max_capacity = max_capacity;
    }
    Ok(config)
}

fn render(args: &Args) -> Result<String> {
    let config = resolve_config(args)?;
    let report = run_config(&config)?;

    if args.json {
        Ok(format!("{}\n", report.to_json()?))
    } else {
        Ok(report.to_string())
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    print!("{}", render(&args)?);
    Ok(())
}
