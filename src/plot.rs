use std::fs;
use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result};
use tracing::{info, warn};

/// Accumulates a pyxplot script in memory; one `append_eval` per plot block.
/// Starting from `new()` is the "cleared" state, `save` overwrites the script
/// file in one go.
pub struct PlotScript {
    buf: String,
}

impl PlotScript {
    pub fn new() -> Self {
        Self { buf: String::new() }
    }

    fn push_line(&mut self, line: &str) {
        self.buf.push('\n');
        self.buf.push_str(line);
    }

    pub fn append_eval(
        &mut self,
        plot_parts: &[String],
        x_label: &str,
        y_label: &str,
        title: &str,
        output_file: &str,
    ) {
        self.push_line("set term png");
        self.push_line(&format!("set output \"{output_file}\""));
        self.push_line(&format!("set xlabel \"{x_label}\""));
        self.push_line(&format!("set ylabel \"{y_label}\""));
        self.push_line(&format!("set title \"{title}\""));
        self.push_line(&format!("plot {}", plot_parts.join(", ")));
        self.push_line("replot");
    }

    pub fn contents(&self) -> &str {
        &self.buf
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, &self.buf)
            .with_context(|| format!("Writing plot script {}", path.display()))
    }
}

/// Invoke pyxplot on the generated script. Output is not captured; a missing
/// binary surfaces as the spawn error.
pub fn run_pyxplot(script_path: &Path) -> Result<()> {
    info!(script = %script_path.display(), "Running pyxplot");
    let mut cmd = Command::new("pyxplot");
    // plot blocks reference the data files by bare name, so resolve them
    // against the script's own directory
    match script_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        Some(dir) => {
            cmd.current_dir(dir);
            cmd.arg(script_path.file_name().unwrap_or(script_path.as_os_str()));
        }
        None => {
            cmd.arg(script_path);
        }
    }
    let status = cmd
        .status()
        .with_context(|| format!("Invoking pyxplot on {}", script_path.display()))?;
    if !status.success() {
        warn!(%status, "pyxplot exited with non-zero status");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_block(script: &mut PlotScript, n: usize) {
        script.append_eval(
            &[
                format!("\"stats-{n}.txt\" title \"packets\""),
                format!("\"quality-{n}.txt\" title \"quality\" with lines"),
            ],
            "time [packets]",
            "quality [0:1]",
            &format!("plot number {n}"),
            &format!("plot-{n}.png"),
        );
    }

    #[test]
    fn append_produces_one_block_per_call() {
        let mut script = PlotScript::new();
        for n in 0..3 {
            sample_block(&mut script, n);
        }
        let text = script.contents();
        assert_eq!(text.matches("set term png").count(), 3);
        assert_eq!(text.matches("replot").count(), 3);
        for n in 0..3 {
            assert!(text.contains(&format!("set title \"plot number {n}\"")));
            assert!(text.contains(&format!("set output \"plot-{n}.png\"")));
        }
    }

    #[test]
    fn plot_directive_joins_parts() {
        let mut script = PlotScript::new();
        sample_block(&mut script, 0);
        assert!(script
            .contents()
            .contains("plot \"stats-0.txt\" title \"packets\", \"quality-0.txt\" title \"quality\" with lines"));
    }

    #[test]
    fn save_writes_accumulated_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot_data.pyx");
        let mut script = PlotScript::new();
        sample_block(&mut script, 1);
        script.save(&path).unwrap();
        let on_disk = std::fs::read_to_string(&path).unwrap();
        assert_eq!(on_disk, script.contents());
    }

    #[test]
    fn new_script_is_empty() {
        assert!(PlotScript::new().contents().is_empty());
    }
}
