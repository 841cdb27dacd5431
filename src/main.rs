//! Lineup -- exhaustive placement scorer.
//!
//! Loads an entity catalog, sweeps every configuration of one team's nine
//! entities, ranks the results, and writes the best as JSONL.
//!
//! Usage:
//!   lineup --catalog FILE [--team good|bad] [--threads N] [--top N]
//!          [--rank POLICY] [--progress N] [--show R] [--output FILE] [--quiet]

use std::env;
use std::fs::File;
use std::io::{self, BufWriter};
use std::ops::ControlFlow;
use std::process;
use std::sync::atomic::AtomicBool;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use lineup::catalog::Catalog;
use lineup::config::{Invocation, SweepConfig};
use lineup::rank::rank;
use lineup::report::{render_board, write_jsonl};
use lineup::search::{enumerate_parallel, enumerate_with, SweepProgress, CONFIGURATION_COUNT};

fn init_logging(quiet: bool) {
    let default = if quiet { "lineup=warn" } else { "lineup=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    let config = match SweepConfig::from_args(env::args().skip(1)) {
        Ok(Invocation::Run(config)) => config,
        Ok(Invocation::Help) => {
            print_usage();
            return;
        }
        Err(e) => {
            eprintln!("{}", e);
            print_usage();
            process::exit(2);
        }
    };

    init_logging(config.quiet);

    if let Err(e) = run(&config) {
        error!("{}", e);
        process::exit(1);
    }
}

fn run(config: &SweepConfig) -> Result<(), Box<dyn std::error::Error>> {
    let path = config.catalog.as_ref().ok_or("--catalog is required")?;
    let catalog = Catalog::load(path)?;
    let pool = catalog.pool(config.team)?;

    info!(
        event = "run_start",
        team = %config.team,
        threads = config.threads,
        policy = %config.policy,
    );

    let opts = config.sweep_options();
    let results = if config.threads == 1 {
        let mut results = Vec::with_capacity(CONFIGURATION_COUNT as usize);
        enumerate_with(
            &pool,
            &opts,
            None,
            |m| results.push(m),
            |p| {
                log_progress(&p);
                ControlFlow::Continue(())
            },
        )?;
        results
    } else {
        let stop = AtomicBool::new(false);
        let (results, _summary) = enumerate_parallel(&pool, &opts, &stop, |p| log_progress(&p))?;
        results
    };

    let ranking = rank(results, &config.policy);
    if let Some(best) = ranking.best() {
        info!(
            event = "best",
            component_count = best.component_count,
            vehicle_component_count = best.vehicle_component_count,
            miss = best.miss,
            unique = best.unique,
            total = best.total,
            vehicle = best.vehicle,
        );
    }

    if let Some(r) = config.show {
        match ranking.get(r) {
            Some(m) => eprint!("rank {}:\n{}", r, render_board(m, &pool)),
            None => eprintln!("rank {} out of range ({} results)", r, ranking.len()),
        }
    }

    match &config.output {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            write_jsonl(&ranking, &pool, config.top, &mut writer)?;
            info!(event = "wrote", results = config.top.min(ranking.len()), path = %path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            write_jsonl(&ranking, &pool, config.top, &mut writer)?;
        }
    }
    Ok(())
}

fn log_progress(p: &SweepProgress) {
    info!(
        event = "sweep_progress",
        produced = p.produced,
        percent = format_args!("{:.1}", p.fraction() * 100.0),
    );
}

fn print_usage() {
    eprintln!("Usage: lineup --catalog FILE [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --catalog FILE   Entity catalog JSON (required)");
    eprintln!("  --team T         Pool to place: good or bad (default: good)");
    eprintln!("  --threads N      Worker threads (default: 4)");
    eprintln!("  --top N          Ranked results to write (default: 10)");
    eprintln!("  --rank POLICY    Ranking policy, e.g. components:high,miss:high");
    eprintln!("  --progress N     Configurations between progress reports (default: 65536)");
    eprintln!("  --show R         Print the board at rank R to stderr");
    eprintln!("  --output FILE    Output file path (default: stdout)");
    eprintln!("  --quiet          Suppress progress and summary output");
    eprintln!("  --help           Show this help");
}
