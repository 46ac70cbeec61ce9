//! Benchmark driver: one subprocess per corpus graph
//!
//! The MIS benchmark is a black box invoked as
//! `<benchmark> <graph.bin> <mode>` with the data root as working
//! directory, so its telemetry lands in `counter_distribution/` and
//! `round_distribution/` there. Its stdout/stderr are captured and
//! echoed, never parsed for data.
//!
//! Failures are isolated per graph: a spawn error, timeout, or non-zero
//! exit is recorded in the run summary and the loop moves on. Exit
//! codes are surfaced explicitly rather than silently swallowed;
//! whatever telemetry a failed run did not write surfaces later as a
//! missing-file error during ingestion.

use crate::layout::DataLayout;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tabled::{Table, Tabled};
use tokio::process::Command;
use tokio::time::timeout;

/// Driver configuration for one run.
#[derive(Debug, Clone)]
pub struct BenchConfig {
    /// Path to the benchmark executable.
    pub benchmark: PathBuf,
    /// Numeric mode flag passed as the second argument.
    pub mode: u32,
    /// Optional bound on each invocation's wall time.
    pub timeout: Option<Duration>,
}

/// Result of one benchmark invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BenchStatus {
    Completed,
    Exited { code: Option<i32> },
    TimedOut,
    SpawnFailed { reason: String },
}

impl BenchStatus {
    fn label(&self) -> String {
        match self {
            BenchStatus::Completed => "ok".to_string(),
            BenchStatus::Exited { code: Some(code) } => format!("exit code {code}"),
            BenchStatus::Exited { code: None } => "killed by signal".to_string(),
            BenchStatus::TimedOut => "timed out".to_string(),
            BenchStatus::SpawnFailed { reason } => format!("spawn failed: {reason}"),
        }
    }
}

/// Per-graph outcome of the benchmark loop.
#[derive(Debug, Clone)]
pub struct BenchOutcome {
    pub graph: String,
    pub status: BenchStatus,
}

#[derive(Tabled)]
struct OutcomeRow {
    #[tabled(rename = "Graph")]
    graph: String,
    #[tabled(rename = "Status")]
    status: String,
}

/// Runs the benchmark over every corpus graph in order.
///
/// Never aborts early: every graph is attempted and the full outcome
/// list is returned after a summary table is printed.
pub async fn run_benchmarks(
    layout: &DataLayout,
    corpus: &[String],
    config: &BenchConfig,
) -> std::io::Result<Vec<BenchOutcome>> {
    // The benchmark opens its telemetry files without creating the
    // directories first.
    fs::create_dir_all(layout.root().join("counter_distribution"))?;
    fs::create_dir_all(layout.root().join("round_distribution"))?;

    let mut outcomes = Vec::with_capacity(corpus.len());
    for graph in corpus {
        println!("📦 Benchmarking: {graph}");
        let status = run_single(layout, graph, config).await;
        println!("   {}", status.label());
        outcomes.push(BenchOutcome {
            graph: graph.clone(),
            status,
        });
    }

    let rows: Vec<OutcomeRow> = outcomes
        .iter()
        .map(|outcome| OutcomeRow {
            graph: outcome.graph.clone(),
            status: outcome.status.label(),
        })
        .collect();
    println!("{}", Table::new(rows));

    let failed = outcomes
        .iter()
        .filter(|o| o.status != BenchStatus::Completed)
        .count();
    println!(
        "Benchmark loop finished: {}/{} succeeded ({} failed)",
        outcomes.len() - failed,
        outcomes.len(),
        failed
    );
    Ok(outcomes)
}

async fn run_single(layout: &DataLayout, graph: &str, config: &BenchConfig) -> BenchStatus {
    let bin_path = layout.graph_bin(graph);
    if !bin_path.exists() {
        return BenchStatus::SpawnFailed {
            reason: format!("graph binary missing: {}", bin_path.display()),
        };
    }

    let mut command = Command::new(&config.benchmark);
    command
        .arg(&bin_path)
        .arg(config.mode.to_string())
        .current_dir(layout.root())
        .kill_on_drop(true);

    let output = match config.timeout {
        Some(bound) => match timeout(bound, command.output()).await {
            Ok(result) => result,
            Err(_) => return BenchStatus::TimedOut,
        },
        None => command.output().await,
    };

    match output {
        Ok(output) => {
            let stdout = String::from_utf8_lossy(&output.stdout);
            if !stdout.is_empty() {
                print!("{stdout}");
            }
            let stderr = String::from_utf8_lossy(&output.stderr);
            if !stderr.is_empty() {
                eprint!("{stderr}");
            }
            if output.status.success() {
                BenchStatus::Completed
            } else {
                BenchStatus::Exited {
                    code: output.status.code(),
                }
            }
        }
        Err(error) => BenchStatus::SpawnFailed {
            reason: error.to_string(),
        },
    }
}
