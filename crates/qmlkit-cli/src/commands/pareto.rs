//! Pareto command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use qmlkit_eval::export::load_table;
use qmlkit_eval::pareto_plot;

use super::common::{row_label, write_output};

/// Execute the pareto command.
pub fn execute(input: &Path, x: &str, y: &str, label: &[String], title: &str, output: &Path) -> Result<()> {
    let rows = load_table(input).with_context(|| format!("Failed to load table: {}", input.display()))?;
    let plot = pareto_plot(&rows, x, y, |row| row_label(row, label), title)?;
    write_output(output, &plot.to_svg())?;

    let front: Vec<_> = plot.front().collect();
    eprintln!(
        "{} {} of {} rows on the front",
        style("✓").green().bold(),
        front.len(),
        plot.points.len()
    );
    for point in front {
        eprintln!("  {x}={:<8} {y}={:.4}  {}", point.x, point.y, row_label(&point.row, label));
    }
    eprintln!("  Output: {}", style(output.display()).green());
    Ok(())
}
