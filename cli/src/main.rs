//! `lexicon` binary entry point.

use std::io::Write;

use clap::Parser;
use lexicon_cli::cli::Cli;
use lexicon_cli::error::Result;
use lexicon_cli::runner::{RunReport, run, write_stderr_line};

fn main() {
    let cli = Cli::parse();
    let mut stderr = std::io::stderr();
    let run_result = run(&cli, &mut stderr);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn exit_code_for_run_result(result: Result<RunReport>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(report) => report.exit_code(),
        Err(err) => {
            write_stderr_line(stderr, format!("error: {err}"));
            err.exit_code()
        }
    }
}
