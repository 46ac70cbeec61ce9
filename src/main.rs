//! MIS counter telemetry pipeline
//!
//! Stages, in execution order: `convert` prepares edge-list graph
//! inputs from binary CSR files, `bench` drives the external MIS
//! benchmark over the corpus, `ingest` loads the telemetry it wrote,
//! and `report`/`plot` reduce the arrays into percentile CSV tables
//! and distribution figures. `analyze` chains ingest, report, and
//! plot.

mod analysis;
mod commands;
mod common;
mod corpus;
mod graph;
mod layout;
mod telemetry;

use analysis::{generate_reports, ReportError};
use argh::FromArgs;
use commands::bench::{run_benchmarks, BenchConfig};
use commands::convert::{convert_corpus, convert_graph, ConvertError};
use commands::ingest::ingest_corpus;
use commands::plot::{plot_corpus, PlotStageError};
use corpus::{load_corpus, CorpusError};
use layout::DataLayout;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors surfaced by the pipeline entry point
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Corpus(#[from] CorpusError),

    #[error(transparent)]
    Convert(#[from] ConvertError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error(transparent)]
    Plot(#[from] PlotStageError),

    #[error("pipeline I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

type Result<T> = core::result::Result<T, PipelineError>;

/// Measurement and reporting pipeline for MIS benchmark counter telemetry.
#[derive(FromArgs, Debug)]
struct Args {
    #[argh(subcommand)]
    command: Command,
}

#[derive(FromArgs, Debug)]
#[argh(subcommand)]
enum Command {
    Convert(ConvertArgs),
    Bench(BenchArgs),
    Ingest(IngestArgs),
    Report(ReportArgs),
    Plot(PlotArgs),
    Analyze(AnalyzeArgs),
}

/// Convert binary CSR graphs into edge-list text files.
#[derive(FromArgs, Debug)]
#[argh(subcommand, name = "convert")]
struct ConvertArgs {
    /// data directory (bin/, txt/, telemetry directories)
    #[argh(option, short = 'd')]
    data: PathBuf,

    /// corpus list file (default: <data>/graphnames.txt)
    #[argh(option, short = 'c')]
    corpus: Option<PathBuf>,

    /// convert a single graph instead of the whole corpus
    #[argh(option, short = 'g')]
    graph: Option<String>,
}

/// Run the external MIS benchmark over every corpus graph.
#[derive(FromArgs, Debug)]
#[argh(subcommand, name = "bench")]
struct BenchArgs {
    /// data directory (bin/, telemetry directories)
    #[argh(option, short = 'd')]
    data: PathBuf,

    /// corpus list file (default: <data>/graphnames.txt)
    #[argh(option, short = 'c')]
    corpus: Option<PathBuf>,

    /// path to the benchmark executable
    #[argh(option, short = 'b')]
    benchmark: PathBuf,

    /// numeric mode flag passed to the benchmark (default: 1)
    #[argh(option, short = 'm', default = "1")]
    mode: u32,

    /// per-invocation timeout in seconds (default: unbounded)
    #[argh(option, short = 't')]
    timeout_secs: Option<u64>,
}

/// Ingest raw telemetry text into the fast-reload cache.
#[derive(FromArgs, Debug)]
#[argh(subcommand, name = "ingest")]
struct IngestArgs {
    /// data directory holding the telemetry directories
    #[argh(option, short = 'd')]
    data: PathBuf,

    /// corpus list file (default: <data>/graphnames.txt)
    #[argh(option, short = 'c')]
    corpus: Option<PathBuf>,
}

/// Build the percentile and round/frontier CSV reports.
#[derive(FromArgs, Debug)]
#[argh(subcommand, name = "report")]
struct ReportArgs {
    /// data directory holding the telemetry directories
    #[argh(option, short = 'd')]
    data: PathBuf,

    /// corpus list file (default: <data>/graphnames.txt)
    #[argh(option, short = 'c')]
    corpus: Option<PathBuf>,

    /// report output directory (default: <data>)
    #[argh(option, short = 'o')]
    output: Option<PathBuf>,
}

/// Render per-graph distribution figures.
#[derive(FromArgs, Debug)]
#[argh(subcommand, name = "plot")]
struct PlotArgs {
    /// data directory holding the telemetry directories
    #[argh(option, short = 'd')]
    data: PathBuf,

    /// corpus list file (default: <data>/graphnames.txt)
    #[argh(option, short = 'c')]
    corpus: Option<PathBuf>,

    /// figure output directory (default: <data>/figure)
    #[argh(option, short = 'o')]
    output: Option<PathBuf>,
}

/// Run ingest, report, and plot in sequence.
#[derive(FromArgs, Debug)]
#[argh(subcommand, name = "analyze")]
struct AnalyzeArgs {
    /// data directory holding the telemetry directories
    #[argh(option, short = 'd')]
    data: PathBuf,

    /// corpus list file (default: <data>/graphnames.txt)
    #[argh(option, short = 'c')]
    corpus: Option<PathBuf>,

    /// report output directory (default: <data>)
    #[argh(option, short = 'o')]
    output: Option<PathBuf>,

    /// figure output directory (default: <data>/figure)
    #[argh(option, short = 'f')]
    figures: Option<PathBuf>,
}

fn resolve_corpus(layout: &DataLayout, flag: Option<PathBuf>) -> Result<Vec<String>> {
    let path = flag.unwrap_or_else(|| layout.corpus_file());
    let corpus = load_corpus(&path)?;
    println!("Loaded {} graphs from {}", corpus.len(), path.display());
    Ok(corpus)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Args = argh::from_env();

    match args.command {
        Command::Convert(convert) => {
            let layout = DataLayout::new(&convert.data);
            if let Some(graph) = convert.graph {
                let edges = convert_graph(&layout, &graph)?;
                println!("✅ Wrote {} edges to {}", edges, layout.graph_txt(&graph).display());
            } else {
                let corpus = resolve_corpus(&layout, convert.corpus)?;
                convert_corpus(&layout, &corpus);
            }
        }
        Command::Bench(bench) => {
            let layout = DataLayout::new(&bench.data);
            let corpus = resolve_corpus(&layout, bench.corpus)?;
            let config = BenchConfig {
                benchmark: bench.benchmark,
                mode: bench.mode,
                timeout: bench.timeout_secs.map(Duration::from_secs),
            };
            run_benchmarks(&layout, &corpus, &config).await?;
        }
        Command::Ingest(ingest) => {
            let layout = DataLayout::new(&ingest.data);
            let corpus = resolve_corpus(&layout, ingest.corpus)?;
            ingest_corpus(&layout, &corpus);
        }
        Command::Report(report) => {
            let layout = DataLayout::new(&report.data);
            let corpus = resolve_corpus(&layout, report.corpus)?;
            let output = report.output.unwrap_or_else(|| layout.root().to_path_buf());
            generate_reports(&layout, &corpus, &output)?;
        }
        Command::Plot(plot) => {
            let layout = DataLayout::new(&plot.data);
            let corpus = resolve_corpus(&layout, plot.corpus)?;
            let output = plot.output.unwrap_or_else(|| layout.root().join("figure"));
            plot_corpus(&layout, &corpus, &output)?;
        }
        Command::Analyze(analyze) => {
            let layout = DataLayout::new(&analyze.data);
            let corpus = resolve_corpus(&layout, analyze.corpus)?;
            ingest_corpus(&layout, &corpus);
            let reports = analyze.output.unwrap_or_else(|| layout.root().to_path_buf());
            generate_reports(&layout, &corpus, &reports)?;
            let figures = analyze.figures.unwrap_or_else(|| layout.root().join("figure"));
            plot_corpus(&layout, &corpus, &figures)?;
        }
    }

    Ok(())
}
