use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Write one series per file, one decimal value per line, for gnuplot/pyxplot.
/// Existing files are overwritten.
pub fn write_series(path: &Path, values: &[f64]) -> Result<()> {
    let body = values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("\n");
    fs::write(path, body).with_context(|| format!("Writing data file {}", path.display()))
}

pub fn write_run_outputs(
    data_path: &Path,
    quality_path: &Path,
    ratios: &[f64],
    quality: &[f64],
) -> Result<()> {
    write_series(data_path, ratios)?;
    write_series(quality_path, quality)?;
    Ok(())
}

pub fn read_series(path: &Path) -> Result<Vec<f64>> {
    let body = fs::read_to_string(path)
        .with_context(|| format!("Reading data file {}", path.display()))?;
    body.lines()
        .filter(|l| !l.is_empty())
        .map(|l| {
            l.parse::<f64>()
                .with_context(|| format!("Parsing value {l:?} in {}", path.display()))
        })
        .collect()
}
