mod batch;
mod cli;
mod output;
mod plot;
mod quality;
mod sim;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use crate::batch::{run_batch, run_once, RunSummary};
use crate::cli::{Cli, Commands, Run, SummaryFormat};

fn print_summary(summary: &RunSummary, format: SummaryFormat) {
    match format {
        SummaryFormat::Text => {
            println!(
                "drop_rate={} param={} windows={} mean_ratio={:.4} final_quality={:.4}",
                summary.drop_rate,
                summary.param,
                summary.windows,
                summary.mean_ratio,
                summary.final_quality,
            );
            println!("data:    {}", summary.data_file.display());
            println!("quality: {}", summary.quality_file.display());
        }
        SummaryFormat::Json => {
            println!("{}", serde_json::to_string_pretty(summary).unwrap());
        }
    }
}

fn run_single(run: Run) -> Result<()> {
    let summary = run_once(&run)?;
    print_summary(&summary, run.format);
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .try_init()
        .ok();

    let cli = Cli::parse();
    let result: Result<()> = match cli.command {
        Some(Commands::Run(run)) => run_single(run),
        Some(Commands::Batch(batch)) => run_batch(&batch),
        None => {
            Cli::command().print_help().ok();
            println!();
            Ok(())
        }
    };

    if let Err(err) = result {
        // Map to stable exit codes
        let code = exit_code_for_error(&err);
        eprintln!("error: {err:?}");
        std::process::exit(code);
    }
}

pub(crate) fn exit_code_for_error(err: &anyhow::Error) -> i32 {
    // 2: parameter out of range, 4: file or tool I/O failure, 1: other
    for cause in err.chain() {
        if cause.is::<crate::sim::ParamError>() {
            return 2;
        }
        if cause.is::<std::io::Error>() {
            return 4;
        }
    }
    1
}
