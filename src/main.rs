use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use env_logger::Env;
use log::info;

mod render;
mod runner;
mod sender;
mod topology;

use runner::{MutationWeights, RunnerOptions};
use sender::OspfSender;

/// Sends randomized OSPF LSA data to a topology visualizer API every N seconds
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Base URL of the topology visualizer
    #[arg(
        long,
        default_value = "https://v0-network-automation-visualization.vercel.app"
    )]
    url: String,

    /// Seconds between pushes
    #[arg(long, default_value_t = 15)]
    interval: u64,

    /// Number of rounds to send (0 = infinite)
    #[arg(long, default_value_t = 0)]
    rounds: u64,

    /// Weight for the add-router mutation
    #[arg(long, default_value_t = 30)]
    weight_add: u32,

    /// Weight for the remove-router mutation
    #[arg(long, default_value_t = 20)]
    weight_remove: u32,

    /// Weight for the change-metric mutation
    #[arg(long, default_value_t = 35)]
    weight_metric: u32,

    /// Weight for the restore-router mutation
    #[arg(long, default_value_t = 15)]
    weight_restore: u32,
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Parse command-line arguments
    let args = Args::parse();

    // Initialize logging with default filter level of "info"
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    info!("Starting OSPF real-time demo sender");
    info!("Target: {}", args.url);
    info!("Interval: {}s", args.interval);
    if args.rounds == 0 {
        info!("Rounds: infinite");
    } else {
        info!("Rounds: {}", args.rounds);
    }

    let sender = OspfSender::new(&args.url)
        .wrap_err_with(|| format!("Failed to build HTTP client for '{}'", args.url))?;

    // Ctrl-C flips the shutdown flag; the runner exits at the next check
    let shutdown = Arc::new(AtomicBool::new(false));
    let handler_flag = Arc::clone(&shutdown);
    ctrlc::set_handler(move || {
        handler_flag.store(true, Ordering::Relaxed);
    })
    .wrap_err("Failed to install Ctrl-C handler")?;

    let options = RunnerOptions {
        interval: Duration::from_secs(args.interval),
        rounds: args.rounds,
        weights: MutationWeights {
            add: args.weight_add,
            remove: args.weight_remove,
            change_metric: args.weight_metric,
            restore: args.weight_restore,
        },
    };

    runner::run(&options, &sender, &shutdown)?;

    info!("Demo sender finished");
    Ok(())
}
