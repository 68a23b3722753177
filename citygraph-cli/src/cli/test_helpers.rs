//! Small helpers shared across CLI tests.

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use tempfile::TempDir;

use super::commands::run_thin;
use super::{Cli, CliError, GraphArgs, ThinCommand, run_cli};

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

pub(super) fn create_node_file(dir: &TempDir, name: &str, contents: &str) -> io::Result<PathBuf> {
    let path = dir.path().join(name);
    let mut file = File::create(&path)?;
    file.write_all(contents.as_bytes())?;
    Ok(path)
}

/// Builds a `thin` command with a generous rejection budget.
pub(super) fn thin_command(nodes: PathBuf, dropout: f64, seed: u64) -> ThinCommand {
    ThinCommand {
        graph: GraphArgs {
            nodes,
            directed: "false".into(),
        },
        dropout,
        seed,
        max_rejections: 64,
        accept_partial: false,
    }
}

pub(super) fn run_cli_expecting_error(cli: Cli, panic_msg: &str) -> CliError {
    match run_cli(cli) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}

pub(super) fn run_thin_expecting_error(cmd: ThinCommand, panic_msg: &str) -> CliError {
    match run_thin(cmd) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}
