//! Command-line interface orchestration for citygraph.
//!
//! `thin` seeds a complete graph from a node file and drops edge pairs until
//! the requested fraction is gone; `max-dropout` reports the largest fraction
//! the seed graph accepts.

mod commands;

pub use commands::{
    Cli, CliError, Command, ExecutionSummary, GraphArgs, MaxDropoutSummary, ThinCommand,
    ThinSummary, render_summary, run_cli,
};

#[cfg(test)]
mod test_helpers;
