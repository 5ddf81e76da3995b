//! Wires files to the engine: opens the table, loads the hierarchies,
//! runs the Datafly loop, and enforces the discard-on-failure output
//! policy.

use std::fs;
use std::time::Instant;

use anyhow::Context;
use tracing::{info, warn};

use veil_core::models::{AnonymizationParams, RunSummary};
use veil_core::traits::IHierarchy;
use veil_engine::DataflyEngine;
use veil_hierarchy::Hierarchy;
use veil_table::{DelimitedTable, DelimitedWriter};

use crate::cli::Cli;

/// Run one anonymization described by `cli`.
///
/// A failure after the output file was created removes it again: a failed
/// run leaves no output artifact behind.
pub fn run(cli: &Cli) -> anyhow::Result<RunSummary> {
    anyhow::ensure!(
        cli.hierarchies.len() == cli.quasi_identifiers.len(),
        "expected one hierarchy file per quasi-identifier ({} needed, {} given)",
        cli.quasi_identifiers.len(),
        cli.hierarchies.len(),
    );

    let started = Instant::now();

    let table = DelimitedTable::open(&cli.input)
        .with_context(|| format!("reading table '{}'", cli.input.display()))?;

    let mut hierarchies: Vec<Box<dyn IHierarchy>> =
        Vec::with_capacity(cli.quasi_identifiers.len());
    for (name, path) in cli.quasi_identifiers.iter().zip(&cli.hierarchies) {
        let hierarchy = Hierarchy::from_csv(path, name.clone())
            .with_context(|| format!("loading hierarchy '{}'", path.display()))?;
        hierarchies.push(Box::new(hierarchy));
    }

    let params = AnonymizationParams::new(cli.quasi_identifiers.clone(), cli.k);
    let engine = DataflyEngine::new(params, hierarchies)?;

    let mut sink = DelimitedWriter::create(&cli.output)
        .with_context(|| format!("creating output '{}'", cli.output.display()))?;

    let summary = match engine.anonymize(&table, &mut sink) {
        Ok(summary) => summary,
        Err(err) => {
            drop(sink);
            discard_partial_output(cli);
            return Err(err.into());
        }
    };

    info!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        output = %cli.output.display(),
        "wrote anonymized table"
    );

    if let Some(report) = &cli.report {
        let json = serde_json::to_string_pretty(&summary)
            .context("serializing the run summary")?;
        fs::write(report, json)
            .with_context(|| format!("writing report '{}'", report.display()))?;
    }

    Ok(summary)
}

fn discard_partial_output(cli: &Cli) {
    if let Err(err) = fs::remove_file(&cli.output) {
        warn!(
            path = %cli.output.display(),
            %err,
            "failed to remove partial output"
        );
    }
}
