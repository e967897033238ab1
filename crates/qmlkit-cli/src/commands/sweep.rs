//! Sweep command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use qmlkit_eval::export::records_to_file;
use qmlkit_eval::{CvRecord, Dataset, ExportConfig, run_sweep};

use crate::config::SweepConfig;

/// Execute the sweep command.
pub async fn execute(config_path: &Path) -> Result<()> {
    let config = SweepConfig::load(config_path)
        .with_context(|| format!("Failed to load sweep config: {}", config_path.display()))?;
    let dataset = Dataset::load(&config.dataset)
        .with_context(|| format!("Failed to load dataset: {}", config.dataset.display()))?;
    let grid = config.grid.to_grid(dataset.num_features());

    println!(
        "{} Sweeping {} configurations on {} examples ({} folds)",
        style("→").cyan().bold(),
        grid.len(),
        dataset.len(),
        config.folds
    );

    let progress = ProgressBar::new(grid.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let folds = config.folds;
    let bar = progress.clone();
    let records = tokio::task::spawn_blocking(move || {
        run_sweep(&grid, &dataset, folds, |record| {
            bar.set_message(format!(
                "n={} l={} seed={} {}",
                record.num_qubits, record.num_layers, record.seed, record.bases
            ));
            bar.inc(1);
        })
    })
    .await
    .context("Sweep worker failed")?;
    progress.finish_and_clear();

    records_to_file(&records, &config.output, &ExportConfig::default())
        .with_context(|| format!("Failed to write records: {}", config.output.display()))?;
    info!(output = %config.output.display(), records = records.len(), "wrote sweep records");

    print_summary(&records);
    println!("  Output: {}", style(config.output.display()).green());
    Ok(())
}

fn print_summary(records: &[CvRecord]) {
    let scored: Vec<&CvRecord> = records.iter().filter(|r| r.score.is_some()).collect();
    println!(
        "{} {} scored, {} failed",
        style("✓").green().bold(),
        scored.len(),
        records.len() - scored.len()
    );
    let best = scored
        .iter()
        .max_by(|a, b| a.score.unwrap_or(0.0).total_cmp(&b.score.unwrap_or(0.0)));
    if let Some(best) = best {
        println!(
            "  Best: {:.4} (qubits {}, features {}, layers {}, seed {}, bases {})",
            best.score.unwrap_or_default(),
            best.num_qubits,
            best.num_features,
            best.num_layers,
            best.seed,
            style(&best.bases).yellow()
        );
    }
}
