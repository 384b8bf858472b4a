//! Command-line front end for Lexicon.
//!
//! The binary collects localisation files from its inputs, runs the
//! generator over them and writes one Rust source file per family into the
//! output directory. Diagnostics go to stderr.

pub mod cli;
pub mod error;
pub mod inputs;
pub mod runner;
