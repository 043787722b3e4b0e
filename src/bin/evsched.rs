//! 场景运行器
//!
//! 读取 scenario.json，驱动事件调度器并输出运行摘要。

use clap::Parser;
use evsched::scenario::{RunOptions, ScenarioError, ScenarioSpec, run_scenario};
use evsched::sim::SimTime;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "evsched", about = "Run a scenario.json on the discrete-event scheduler")]
struct Args {
    /// Path to scenario.json
    #[arg(long)]
    scenario: PathBuf,

    /// Output trace JSON file
    #[arg(long)]
    trace_json: Option<PathBuf>,

    /// Stop before events later than this time (rejected when the scenario lists ops)
    #[arg(long)]
    until: Option<f64>,

    /// Print the report as JSON instead of a one-line summary
    #[arg(long)]
    json: bool,

    /// Disable logging
    #[arg(long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // 初始化 tracing
    tracing_subscriber::fmt()
        .with_env_filter(if args.quiet {
            tracing_subscriber::EnvFilter::new("off")
        } else {
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
        })
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Scenario(#[from] ScenarioError),
    #[error(transparent)]
    InvalidTime(#[from] evsched::sim::InvalidTimeError),
    #[error("failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn run(args: &Args) -> Result<(), CliError> {
    let spec = ScenarioSpec::from_path(&args.scenario)?;
    let until = args.until.map(SimTime::new).transpose()?;

    let run = run_scenario(
        &spec,
        RunOptions {
            trace: args.trace_json.is_some(),
            until,
        },
    )?;

    if let (Some(path), Some(trace)) = (&args.trace_json, &run.trace) {
        let json = trace.to_json_pretty()?;
        fs::write(path, json).map_err(|source| CliError::Write {
            path: path.clone(),
            source,
        })?;
        eprintln!("wrote trace events to {}", path.display());
    }

    let r = &run.report;
    if args.json {
        println!("{}", serde_json::to_string_pretty(r)?);
    } else {
        println!(
            "done @ {}, executed={}, discarded={}, deactivated={}, remaining={}",
            r.final_time,
            r.stats.executed,
            r.stats.discarded,
            r.stats.deactivated,
            r.remaining.len()
        );
    }
    Ok(())
}
