//! algotrace CLI - write and inspect algorithm traces
//!
//! Usage:
//!     algotrace sort quick --pivot median-of-three --fixture random
//!     algotrace sort merge --data 3,1,2 --compact
//!     algotrace search binary --key 8
//!     algotrace maze prim --width 10 --height 6 --distances -o maze.json
//!     algotrace inspect maze.json --replay
//!
//! Diagnostics go to stderr and follow `RUST_LOG` (default `algotrace=info`).

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use algotrace_core::fixtures::{SEARCH_SAMPLE, MERGE_SAMPLE};
use algotrace_core::{
    binary_search, distance_map, kth_order_statistic, parse_list, trace_sequence, BalanceVerifier,
    Fixture, Grid, MazeGenerator, PivotStrategy, ReplayEngine, Result, SortAlgorithm, TraceConfig,
    TraceError, TraceLogger, TraceSummary,
};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde_json::{json, Value};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "algotrace")]
#[command(about = "Trace sorts, searches and maze generators as replayable JSON")]
#[command(version)]
struct Args {
    /// JSON configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Write the trace here instead of stdout
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// One line per root instead of indented output
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Trace a sort over a list or a generated fixture
    Sort {
        /// quick, merge, aggregate-in-place, bubble, cocktail or comb
        algorithm: SortAlgorithm,

        /// Comma-separated integers
        #[arg(long, conflicts_with = "fixture")]
        data: Option<String>,

        /// sorted, reversed, random or few-uniques
        #[arg(long)]
        fixture: Option<Fixture>,

        /// Pivot strategy for quick sort
        #[arg(long)]
        pivot: Option<PivotStrategy>,
    },

    /// Trace a search over a list (sorted first for binary search)
    Search {
        #[command(subcommand)]
        search: SearchCommand,
    },

    /// Trace a maze generator
    Maze {
        /// dfs, prim, kruskal, recursive-division, sidewinder or binary-tree
        generator: MazeGenerator,

        #[arg(long)]
        width: Option<usize>,

        #[arg(long)]
        height: Option<usize>,

        /// Start cell (row-major index)
        #[arg(long)]
        start: Option<usize>,

        /// Also trace a distance map from the start cell
        #[arg(long)]
        distances: bool,
    },

    /// Summarize and verify a trace file
    Inspect {
        file: PathBuf,

        /// Replay swaps and snapshots of every root
        #[arg(long)]
        replay: bool,
    },
}

#[derive(Subcommand, Debug)]
enum SearchCommand {
    /// Binary search for a key
    Binary {
        #[arg(long)]
        key: i32,

        /// Comma-separated integers
        #[arg(long)]
        data: Option<String>,
    },

    /// k-th smallest element (0-based)
    Kth {
        #[arg(long)]
        k: usize,

        /// Comma-separated integers
        #[arg(long)]
        data: Option<String>,
    },
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "algotrace=info,algotrace_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = Args::parse();
    if let Err(e) = run(args) {
        tracing::error!(code = e.error_code(), "{e}");
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => TraceConfig::from_file(path)?,
        None => TraceConfig::default(),
    };
    if args.compact {
        config.pretty = false;
    }
    let out = open_output(&args.output)?;

    match args.command {
        Command::Sort {
            algorithm,
            data,
            fixture,
            pivot,
        } => {
            let algorithm = match (algorithm, pivot) {
                (SortAlgorithm::Quick(_), Some(strategy)) => SortAlgorithm::Quick(strategy),
                (other, Some(_)) => {
                    return Err(TraceError::InvalidParameter {
                        fct: "sort".to_string(),
                        message: format!("--pivot only applies to quick sort, not {other}"),
                    })
                }
                (other, None) => other,
            };
            let input = input_data(&config, data.as_deref(), fixture, &MERGE_SAMPLE)?;
            tracing::info!(%algorithm, size = input.len(), "tracing sort");
            let (sorted, ()) = trace_sequence(out, &config, input, |v| algorithm.run(&v.begin(), &v.end()))?;
            tracing::info!(?sorted, "sort finished");
        }

        Command::Search { search } => match search {
            SearchCommand::Binary { key, data } => {
                let mut input = input_data(&config, data.as_deref(), None, &SEARCH_SAMPLE)?;
                input.sort_unstable();
                tracing::info!(key, size = input.len(), "tracing binary search");
                let (_, index) =
                    trace_sequence(out, &config, input, |v| binary_search(&v.begin(), &v.end(), &key).index())?;
                tracing::info!(index, "binary search finished");
            }
            SearchCommand::Kth { k, data } => {
                let input = input_data(&config, data.as_deref(), None, &MERGE_SAMPLE)?;
                tracing::info!(k, size = input.len(), "tracing k-th order statistic");
                let (_, index) =
                    trace_sequence(out, &config, input, |v| kth_order_statistic(&v.begin(), &v.end(), k).index())?;
                tracing::info!(index, "k-th order statistic finished");
            }
        },

        Command::Maze {
            generator,
            width,
            height,
            start,
            distances,
        } => {
            config.maze.width = width.unwrap_or(config.maze.width);
            config.maze.height = height.unwrap_or(config.maze.height);
            config.maze.start = start.unwrap_or(config.maze.start);
            config.validate()?;

            let grid = Grid::new(config.maze.width, config.maze.height);
            let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
            let logger = TraceLogger::from_config(out, &config);
            tracing::info!(%generator, width = grid.width, height = grid.height, "tracing maze");
            let maze = generator.generate(&logger, grid, config.maze.start, &mut rng);
            if distances {
                distance_map(&logger, &maze, config.maze.start);
            }
            logger.finish()?;
            tracing::info!(passages = maze.passages().len(), "maze finished");
        }

        Command::Inspect { file, replay } => {
            let text = std::fs::read_to_string(&file)?;
            let roots = serde_json::Deserializer::from_str(&text)
                .into_iter::<Value>()
                .collect::<std::result::Result<Vec<_>, _>>()?;
            tracing::info!(roots = roots.len(), file = %file.display(), "inspecting trace");
            let report = inspect(&roots, replay)?;
            let mut out = out;
            if config.pretty {
                serde_json::to_writer_pretty(&mut out, &report)?;
            } else {
                serde_json::to_writer(&mut out, &report)?;
            }
            writeln!(out)?;
            out.flush()?;
        }
    }
    Ok(())
}

fn open_output(path: &Option<PathBuf>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(p) => Box::new(BufWriter::new(File::create(p)?)),
        None => Box::new(io::stdout()),
    })
}

/// `--data` wins over `--fixture`; with neither, the sample is used
fn input_data(config: &TraceConfig, data: Option<&str>, fixture: Option<Fixture>, sample: &[i32]) -> Result<Vec<i32>> {
    if let Some(text) = data {
        return parse_list(text);
    }
    Ok(match fixture {
        Some(fixture) => fixture.generate(&config.fixture, config.seed),
        None => sample.to_vec(),
    })
}

fn inspect(roots: &[Value], replay: bool) -> Result<Value> {
    let engine = ReplayEngine::new();
    let mut reports = Vec::with_capacity(roots.len());
    for root in roots {
        let summary = TraceSummary::from_value(root);
        let verification = BalanceVerifier::verify(root);
        if !verification.is_valid {
            tracing::warn!(
                path = verification.path.as_deref().unwrap_or(""),
                message = verification.error_message.as_deref().unwrap_or(""),
                "trace is malformed"
            );
        }
        let mut report = json!({
            "name": root.get("name").cloned().unwrap_or(Value::Null),
            "summary": summary,
            "verification": verification,
        });
        if replay {
            report["replay"] = match engine.replay(root) {
                Ok(result) => serde_json::to_value(result)?,
                Err(e) => json!({"success": false, "error": e.to_string()}),
            };
        }
        reports.push(report);
    }
    Ok(Value::Array(reports))
}
