//! Executes one command invocation.

use std::io::Write;

use lexicon::{DirectorySink, FsLoader, GenerationSummary, GeneratorConfig, generate};
use log::debug;

use crate::cli::Cli;
use crate::error::{CliError, Result};
use crate::inputs::collect_inputs;

/// Outcome of a completed run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunReport {
    /// Generator counts.
    pub summary: GenerationSummary,
    /// Artifacts written to disk.
    pub written: usize,
    /// Artifacts that could not be written.
    pub write_failures: usize,
}

impl RunReport {
    /// `1` when an error was reported or a write failed, else `0`.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        if self.summary.has_errors() || self.write_failures > 0 {
            1
        } else {
            0
        }
    }
}

/// Loads configuration, expands inputs, generates and writes artifacts.
///
/// Every diagnostic is written to `stderr`, followed by a summary line.
///
/// # Errors
///
/// Fails before generation when the configuration, an input or the output
/// directory is unusable.
pub fn run(cli: &Cli, stderr: &mut dyn Write) -> Result<RunReport> {
    let config = resolve_config(cli)?;
    let files = collect_inputs(&cli.inputs)?;
    std::fs::create_dir_all(&cli.out_dir).map_err(|source| CliError::OutputDir {
        path: cli.out_dir.clone(),
        source,
    })?;

    debug!(
        target: "lexicon::cli",
        "generating from {} file(s) into {}",
        files.len(),
        cli.out_dir
    );
    let mut sink = DirectorySink::new(cli.out_dir.clone());
    let summary = generate(&files, &FsLoader, &config, &mut sink);

    for diagnostic in sink.diagnostics() {
        write_stderr_line(stderr, diagnostic);
    }
    let report = RunReport {
        summary,
        written: sink.written().len(),
        write_failures: sink.failures(),
    };
    write_stderr_line(
        stderr,
        format!(
            "{} family(ies), {} file(s) written, {} error(s), {} warning(s)",
            summary.families, report.written, summary.errors, summary.warnings
        ),
    );
    if report.write_failures > 0 {
        write_stderr_line(
            stderr,
            format!("{} file(s) could not be written", report.write_failures),
        );
    }
    Ok(report)
}

fn resolve_config(cli: &Cli) -> Result<GeneratorConfig> {
    let mut config = match &cli.config {
        Some(path) => GeneratorConfig::load(path)?,
        None => GeneratorConfig::default(),
    };
    if let Some(namespace) = &cli.namespace {
        config.namespace = Some(namespace.clone());
    }
    Ok(config)
}

/// Writes one line, ignoring write failures.
pub fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort output; nothing else to report to.
    }
}
