use std::path::PathBuf;

use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::info;

use crate::cli::{Batch, Run};
use crate::output::write_run_outputs;
use crate::plot::{run_pyxplot, PlotScript};
use crate::quality::quality_sequence;
use crate::sim::{
    generate_ratios, validate_drop_rate, validate_param, validate_window_size,
};

pub const DROP_RATES: [f64; 4] = [0.1, 0.3, 0.6, 0.9];
pub const SMOOTHING_PARAMS: [f64; 2] = [0.9, 0.995];

pub const PLOT_SCRIPT_NAME: &str = "plot_data.pyx";

#[derive(Serialize)]
pub struct RunSummary {
    pub drop_rate: f64,
    pub param: f64,
    pub windows: usize,
    pub mean_ratio: f64,
    pub final_quality: f64,
    pub data_file: PathBuf,
    pub quality_file: PathBuf,
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}

fn simulate<R: Rng>(
    rng: &mut R,
    drop_rate: f64,
    param: f64,
    window_size: usize,
    trials: usize,
) -> (Vec<f64>, Vec<f64>) {
    let ratios = generate_ratios(rng, drop_rate, window_size, trials);
    let quality = quality_sequence(&ratios, param);
    (ratios, quality)
}

/// Single configuration: simulate, write the two default-named data files,
/// return a summary for the CLI to print.
pub fn run_once(run: &Run) -> Result<RunSummary> {
    validate_drop_rate(run.drop_rate)?;
    validate_param(run.param)?;
    validate_window_size(run.window_size)?;

    let mut rng = make_rng(run.seed);
    let (ratios, quality) = simulate(&mut rng, run.drop_rate, run.param, run.window_size, run.trials);

    let data_file = run.out_dir.join("connection_stats.txt");
    let quality_file = run.out_dir.join("connection_quality.txt");
    write_run_outputs(&data_file, &quality_file, &ratios, &quality)?;

    let windows = ratios.len();
    let mean_ratio = if windows == 0 {
        0.0
    } else {
        ratios.iter().sum::<f64>() / windows as f64
    };
    // with no completed window the EWMA never left its prior
    let final_quality = quality.last().copied().unwrap_or(1.0);

    info!(
        drop_rate = run.drop_rate,
        param = run.param,
        windows,
        "Simulated configuration"
    );

    Ok(RunSummary {
        drop_rate: run.drop_rate,
        param: run.param,
        windows,
        mean_ratio,
        final_quality,
        data_file,
        quality_file,
    })
}

/// Full sweep over the drop-rate x param grid: per configuration write both
/// data files and append one plot block, then save the script and hand it to
/// pyxplot.
pub fn run_batch(batch: &Batch) -> Result<()> {
    validate_window_size(batch.window_size)?;

    // one RNG stream across all configurations, as a single manual run would use
    let mut rng = make_rng(batch.seed);
    let mut script = PlotScript::new();

    for drop_rate in DROP_RATES {
        for param in SMOOTHING_PARAMS {
            let (ratios, quality) =
                simulate(&mut rng, drop_rate, param, batch.window_size, batch.trials);

            let data_name = format!("connection_stats-{drop_rate}-{param}.txt");
            let quality_name = format!("connection_quality-{drop_rate}-{param}.txt");
            write_run_outputs(
                &batch.out_dir.join(&data_name),
                &batch.out_dir.join(&quality_name),
                &ratios,
                &quality,
            )?;

            script.append_eval(
                &[
                    format!("\"{data_name}\" title \"packets\""),
                    format!("\"{quality_name}\" title \"quality\" with lines"),
                ],
                "time [packets]",
                "quality [0:1]",
                &format!("plot with drop rate: {drop_rate} and param: {param}"),
                &format!("plot-{drop_rate}-{param}.png"),
            );

            info!(drop_rate, param, windows = ratios.len(), "Simulated configuration");
        }
    }

    let script_path = batch.out_dir.join(PLOT_SCRIPT_NAME);
    script.save(&script_path)?;

    if batch.skip_plot {
        info!(script = %script_path.display(), "Skipping pyxplot invocation");
        return Ok(());
    }
    run_pyxplot(&script_path)
}
