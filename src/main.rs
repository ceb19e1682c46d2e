use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use circuit_blocking::circuit_network::RoutingPolicy;
use circuit_blocking::circuit_network::sweep::{distinct_policies, run_sweep};
use circuit_blocking::config::{SweepConfig, DEFAULT_DECADES, DEFAULT_TRIALS, MAX_DECADES};
use circuit_blocking::topology::load_topology;

/// Estimates call-blocking probability over a window-size sweep.
#[derive(Parser,Debug)]
#[command(version)]
struct Args {
    /// Topology file, one `from to weight capacity` link per line
    topology:PathBuf,
    /// Call attempts per simulation
    #[arg(long,default_value_t = DEFAULT_TRIALS)]
    trials:usize,
    /// Decades of the geometric window sweep (1..9, 10..90, ...)
    #[arg(long,default_value_t = DEFAULT_DECADES,value_parser = clap::value_parser!(u32).range(0..=MAX_DECADES as i64))]
    decades:u32,
    /// Fixed rng seed, otherwise seeded from the os
    #[arg(long)]
    seed:Option<u64>,
    /// Routing policy to simulate, repeatable; all four when omitted
    #[arg(long = "policy")]
    policies:Vec<RoutingPolicy>,
    /// Explicit window size, repeatable; replaces the geometric sweep
    #[arg(long = "window")]
    windows:Vec<usize>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = SweepConfig {trials:args.trials,decades:args.decades,seed:args.seed};

    let topology = load_topology(&args.topology)
        .with_context(|| format!("cannot load topology from {}",args.topology.display()))?;

    // a repeated --policy would print the same block twice
    let policies = if args.policies.is_empty() {RoutingPolicy::ALL.to_vec()} else {distinct_policies(&args.policies)};
    let windows = if args.windows.is_empty() {config.window_sizes()?.into_owned()} else {args.windows};

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    info!(trials = config.trials,runs = policies.len()*windows.len(),"starting sweep");
    let points = run_sweep(&topology,&config,&policies,&windows,&mut rng)
        .context("simulation failed")?;

    for policy in policies.iter() {
        println!("{}",policy.description());
        for point in points.iter().filter(|p| p.policy == *policy) {
            println!("{}",point.blocking_probability);
        }
        println!();
    }
    Ok(())
}
