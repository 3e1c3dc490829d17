use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use colored::Colorize;

use rl_load_balancer::domain::simulator::batch::run_batch;
use rl_load_balancer::domain::simulator::setup::SimulationSetup;
use rl_load_balancer::domain::utils::statistics::export_migration_history;
use rl_load_balancer::{JobId, generate_scheduling_graph, logger};

/// Runs a job batch over a capacity-bounded node graph with learned migrations.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Topology file (JSON) with nodes, edges and optional settings.
    #[arg(short, long)]
    config: PathBuf,

    /// Seed for reproducible runs; overrides the file's seed.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Comma-separated job ids; overrides the file's job list.
    #[arg(short, long, value_delimiter = ',')]
    jobs: Option<Vec<String>>,

    /// Write the migration history as CSV to this path.
    #[arg(long)]
    history_csv: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    logger::init();
    let args = Args::parse();

    let SimulationSetup { mut graph, jobs } =
        generate_scheduling_graph(&args.config, args.seed).with_context(|| format!("loading '{}'", args.config.display()))?;

    let jobs = match args.jobs {
        Some(jobs) => jobs.into_iter().map(JobId::new).collect(),
        None => jobs,
    };

    let report = run_batch(&mut graph, &jobs);
    graph.log_summary();

    println!("{}", "Migration History".bold());
    println!("{}", report.migration_info());
    println!();
    println!("{}", "Job Information".bold());
    print!("{}", report.job_info());
    println!();
    println!("{}", report.summary().green());

    if !report.unprocessed.is_empty() {
        let unprocessed: Vec<&str> = report.unprocessed.iter().map(JobId::as_str).collect();
        println!("{}", format!("Jobs couldn't be processed: {}", unprocessed.join(", ")).red());
    }

    if let Some(path) = &args.history_csv {
        export_migration_history(&report.migration_history, path).with_context(|| format!("writing '{}'", path.display()))?;
    }

    Ok(())
}
