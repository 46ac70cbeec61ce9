//! Per-graph telemetry ingestion
//!
//! The benchmark leaves newline-delimited integer files behind for
//! every graph it runs: counter snapshots at start and end, plus a
//! round/frontier stats file. This module loads them into numeric
//! arrays. Ingestion for a graph is fully independent of every other
//! graph, so a failed graph can be retried without cross-contamination.

pub mod ingest;
pub mod round_stats;

use std::path::PathBuf;
use thiserror::Error;

pub use ingest::{load_telemetry, sanitize_for_log};
pub use round_stats::RoundStats;

/// Non-integer token or short file in a telemetry or round-stats file
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("{}:{line}: expected integer, got {token:?}", path.display())]
    BadToken {
        path: PathBuf,
        line: usize,
        token: String,
    },

    #[error("{}: file ends after line {line}, another integer line expected", path.display())]
    UnexpectedEof { path: PathBuf, line: usize },

    #[error("{}:{line}: data continues past the declared round count", path.display())]
    TrailingLines { path: PathBuf, line: usize },
}

/// Mismatched series lengths when deriving the gap series
#[derive(Error, Debug)]
#[error("start series has {start_len} entries but end series has {end_len}")]
pub struct ShapeError {
    pub start_len: usize,
    pub end_len: usize,
}

/// Expected telemetry or round-stats file absent for a graph
#[derive(Error, Debug)]
#[error("graph {graph}: missing expected file {}", path.display())]
pub struct MissingFileError {
    pub graph: String,
    pub path: PathBuf,
}

/// Umbrella error for the ingestion stage
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error(transparent)]
    MissingFile(#[from] MissingFileError),

    #[error("telemetry I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("telemetry cache is unreadable: {0}")]
    Cache(#[from] bincode::Error),
}
