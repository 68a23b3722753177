//! Command implementations and argument parsing for the citygraph CLI.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use citygraph_core::{
    DEFAULT_MAX_CONSECUTIVE_REJECTIONS, DEFAULT_RNG_SEED, Direction, DropoutConfig,
    DropoutEngine, DropoutObserver, DropoutOutcome, DropoutProgress, Graph, GraphError,
    StallPolicy,
};
use clap::{Args, Parser, Subcommand};
use rand::{SeedableRng, rngs::SmallRng};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

/// Number of progress reports emitted over a full run.
const PROGRESS_STEPS: usize = 4;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "citygraph",
    about = "Thin complete city graphs while keeping them connected."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Seed a complete graph from a node file and drop a fraction of its edges.
    Thin(ThinCommand),
    /// Report the largest dropout a node file's complete graph accepts.
    MaxDropout(GraphArgs),
}

/// Arguments describing the seed graph.
#[derive(Debug, Args, Clone)]
pub struct GraphArgs {
    /// UTF-8 file listing one node label per line; blank lines are skipped.
    #[arg(long)]
    pub nodes: PathBuf,

    /// Seed one record per node pair (`true`) or a reciprocal pair (`false`).
    #[arg(long, default_value = "false")]
    pub directed: String,
}

/// Options accepted by the `thin` command.
#[derive(Debug, Args, Clone)]
pub struct ThinCommand {
    /// Seed graph options.
    #[command(flatten)]
    pub graph: GraphArgs,

    /// Fraction of edge records to remove.
    #[arg(long)]
    pub dropout: f64,

    /// Seed for the proposal RNG.
    #[arg(long, default_value_t = DEFAULT_RNG_SEED)]
    pub seed: u64,

    /// Consecutive rejections tolerated before scanning for a removable pair.
    #[arg(long = "max-rejections", default_value_t = DEFAULT_MAX_CONSECUTIVE_REJECTIONS)]
    pub max_rejections: usize,

    /// Print the graph reached so far instead of failing when no further pair
    /// can be removed.
    #[arg(long = "accept-partial")]
    pub accept_partial: bool,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Reading the node file failed.
    #[error("failed to read `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// The node file contained no labels.
    #[error("`{path}` does not list any nodes")]
    NoNodes {
        /// Path of the empty node file.
        path: PathBuf,
    },
    /// Graph construction or dropout failed.
    #[error(transparent)]
    Core(#[from] GraphError),
}

/// Result of a `thin` run.
#[derive(Debug, Clone)]
pub struct ThinSummary {
    /// Edge records in the seed graph.
    pub initial_edges: usize,
    /// Thinned graph and run statistics.
    pub outcome: DropoutOutcome<String>,
}

/// Result of a `max-dropout` query.
#[derive(Debug, Clone, PartialEq)]
pub struct MaxDropoutSummary {
    /// Distinct node labels read from the node file.
    pub nodes: usize,
    /// Edge records in the seed graph.
    pub edges: usize,
    /// Largest accepted dropout, or `None` when the seed graph has no edges.
    pub maximum: Option<f64>,
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub enum ExecutionSummary {
    /// Output of the `thin` command.
    Thinned(ThinSummary),
    /// Output of the `max-dropout` command.
    MaxDropout(MaxDropoutSummary),
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when the node file cannot be read or the dropout run
/// fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use citygraph_cli::cli::{Cli, Command, ExecutionSummary, GraphArgs, ThinCommand, run_cli};
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(file.path(), "north\neast\nsouth\nwest\n")?;
/// let cli = Cli {
///     command: Command::Thin(ThinCommand {
///         graph: GraphArgs {
///             nodes: file.path().to_path_buf(),
///             directed: "false".into(),
///         },
///         dropout: 0.5,
///         seed: 7,
///         max_rejections: 100,
///         accept_partial: false,
///     }),
/// };
/// let ExecutionSummary::Thinned(summary) = run_cli(cli)? else {
///     panic!("thin produces a thinned summary");
/// };
/// assert_eq!(summary.initial_edges, 12);
/// assert!(summary.outcome.graph().edge_count() <= 6);
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Thin(thin) => {
            Span::current().record("command", field::display("thin"));
            run_thin(thin).map(ExecutionSummary::Thinned)
        }
        Command::MaxDropout(args) => {
            Span::current().record("command", field::display("max-dropout"));
            run_max_dropout(&args).map(ExecutionSummary::MaxDropout)
        }
    }
}

#[instrument(
    name = "cli.thin",
    err,
    skip(command),
    fields(dropout = command.dropout, seed = command.seed, accept_partial = command.accept_partial),
)]
pub(super) fn run_thin(command: ThinCommand) -> Result<ThinSummary, CliError> {
    let graph = seed_graph(&command.graph)?;
    let policy = if command.accept_partial {
        StallPolicy::AcceptPartial
    } else {
        StallPolicy::Fail
    };
    let config = DropoutConfig::new(command.dropout)?
        .with_max_consecutive_rejections(command.max_rejections)
        .with_stall_policy(policy)
        .with_rng_seed(command.seed);
    let engine = DropoutEngine::new(config);

    let initial_edges = graph.edge_count();
    let mut rng = SmallRng::seed_from_u64(command.seed);
    let mut progress = ProgressLog::default();
    let outcome = engine.run_with_rng(graph, &mut rng, &mut progress)?;

    info!(
        initial_edges,
        remaining_edges = outcome.graph().edge_count(),
        complete = outcome.is_complete(),
        "thin command completed"
    );
    Ok(ThinSummary {
        initial_edges,
        outcome,
    })
}

#[instrument(name = "cli.max_dropout", err, skip(args))]
pub(super) fn run_max_dropout(args: &GraphArgs) -> Result<MaxDropoutSummary, CliError> {
    let graph = seed_graph(args)?;
    Ok(MaxDropoutSummary {
        nodes: graph.distinct_node_count(),
        edges: graph.edge_count(),
        maximum: graph.maximum_dropout(),
    })
}

fn seed_graph(args: &GraphArgs) -> Result<Graph<String>, CliError> {
    let direction: Direction = args.directed.parse()?;
    let nodes = load_nodes(&args.nodes)?;
    Ok(Graph::complete(nodes, direction))
}

#[instrument(name = "cli.load_nodes", err, fields(path = field::Empty, nodes = field::Empty))]
pub(super) fn load_nodes(path: &Path) -> Result<Vec<String>, CliError> {
    let span = Span::current();
    span.record("path", field::display(path.display()));
    let io_error = |source| CliError::Io {
        path: path.to_path_buf(),
        source,
    };
    let reader = BufReader::new(File::open(path).map_err(io_error)?);

    let mut nodes = Vec::new();
    for line in reader.lines() {
        let line = line.map_err(io_error)?;
        let label = line.trim();
        if !label.is_empty() {
            nodes.push(label.to_owned());
        }
    }
    if nodes.is_empty() {
        return Err(CliError::NoNodes {
            path: path.to_path_buf(),
        });
    }
    span.record("nodes", nodes.len());
    Ok(nodes)
}

/// Logs run progress each time another quarter of the target is removed.
#[derive(Debug, Default)]
pub(super) struct ProgressLog {
    pub(super) reports: usize,
}

impl DropoutObserver<String> for ProgressLog {
    fn on_commit(&mut self, progress: &DropoutProgress<'_, String>) {
        if progress.target_removals == 0 {
            return;
        }
        let reached = progress.total_removed.min(progress.target_removals) * PROGRESS_STEPS
            / progress.target_removals;
        if reached > self.reports {
            self.reports = reached;
            info!(
                removed = progress.total_removed,
                target = progress.target_removals,
                remaining_edges = progress.graph.edge_count(),
                "dropout progress"
            );
        }
    }
}

/// Renders `summary` to `writer` in a human-readable text format.
///
/// Thinned graphs list one `source<TAB>target` line per remaining edge record.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use citygraph_cli::cli::{ExecutionSummary, MaxDropoutSummary, render_summary};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let summary = ExecutionSummary::MaxDropout(MaxDropoutSummary {
///     nodes: 3,
///     edges: 6,
///     maximum: Some(0.5),
/// });
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// assert_eq!(
///     String::from_utf8(buffer)?,
///     "nodes: 3\nedges: 6\nmaximum dropout: 0.5\n"
/// );
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    match summary {
        ExecutionSummary::Thinned(thin) => {
            let graph = thin.outcome.graph();
            writeln!(writer, "nodes: {}", graph.distinct_node_count())?;
            writeln!(
                writer,
                "edges: {} -> {}",
                thin.initial_edges,
                graph.edge_count()
            )?;
            writeln!(
                writer,
                "removed: {} (target {})",
                thin.outcome.removed(),
                thin.outcome.target_removals()
            )?;
            writeln!(writer, "complete: {}", thin.outcome.is_complete())?;
            for (source, target) in graph.edge_pairs() {
                writeln!(writer, "{source}\t{target}")?;
            }
        }
        ExecutionSummary::MaxDropout(max) => {
            writeln!(writer, "nodes: {}", max.nodes)?;
            writeln!(writer, "edges: {}", max.edges)?;
            match max.maximum {
                Some(maximum) => writeln!(writer, "maximum dropout: {maximum}")?,
                None => writeln!(writer, "maximum dropout: undefined (no edges)")?,
            }
        }
    }
    Ok(())
}
