//! Command-line entry point.
//!
//! Settings come from defaults, then an optional JSON file, then flags.
//! `RUST_LOG` overrides the level derived from `--trace`.

use std::path::PathBuf;
use std::process::ExitCode;

use abp_sim::{Simulation, SimulationConfig, SimulationResult};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Alternating-bit protocol over a simulated lossy channel.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// JSON file with a full or partial configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of messages to simulate
    #[arg(short = 'n', long)]
    messages: Option<u64>,

    /// Packet loss probability [0.0 for no loss]
    #[arg(short, long)]
    loss: Option<f64>,

    /// Packet corruption probability [0.0 for no corruption]
    #[arg(short = 'r', long)]
    corrupt: Option<f64>,

    /// Average time between messages from the sender's application (> 0)
    #[arg(short, long)]
    interarrival: Option<f64>,

    /// Trace verbosity (0-3)
    #[arg(short, long)]
    trace: Option<u8>,

    /// Random seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Sender retransmission timeout
    #[arg(long)]
    timeout: Option<f64>,

    /// Keep running after the last message until nothing is in flight
    #[arg(long)]
    drain: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

impl Args {
    fn into_config(self) -> SimulationResult<(SimulationConfig, bool)> {
        let mut config = match &self.config {
            Some(path) => SimulationConfig::from_json_file(path)?,
            None => SimulationConfig::default(),
        };
        if let Some(messages) = self.messages {
            config.messages = messages;
        }
        if let Some(loss) = self.loss {
            config.loss_probability = loss;
        }
        if let Some(corrupt) = self.corrupt {
            config.corrupt_probability = corrupt;
        }
        if let Some(interarrival) = self.interarrival {
            config.mean_interarrival = interarrival;
        }
        if let Some(trace) = self.trace {
            config.trace = trace;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(timeout) = self.timeout {
            config.timeout = timeout;
        }
        config.drain |= self.drain;
        Ok((config, self.json))
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let (config, json) = match args.into_config() {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level().to_string())),
        )
        .with_target(false)
        .try_init();

    let simulation = match Simulation::new(config) {
        Ok(simulation) => simulation,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let report = simulation.run();
    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("error: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        println!("{report}");
    }
    ExitCode::SUCCESS
}
