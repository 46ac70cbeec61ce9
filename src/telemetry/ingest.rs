//! Counter series loading, gap derivation, and the fast-reload cache

use crate::layout::DataLayout;
use crate::telemetry::{MissingFileError, ParseError, ShapeError, TelemetryError};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;

type Result<T> = core::result::Result<T, TelemetryError>;

/// The three per-vertex counter series of one graph.
///
/// All three have equal length (the graph's vertex count) when the
/// benchmark emits complete telemetry; `gap[i] == start[i] - end[i]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterTelemetry {
    pub start: Vec<i64>,
    pub end: Vec<i64>,
    pub gap: Vec<i64>,
}

impl CounterTelemetry {
    /// The series under a given name, for report/plot iteration.
    pub fn series(&self, name: &str) -> Option<&[i64]> {
        match name {
            "start" => Some(&self.start),
            "end" => Some(&self.end),
            "gap" => Some(&self.gap),
            _ => None,
        }
    }
}

/// Report/plot iteration order of the three series.
pub const SERIES_NAMES: [&str; 3] = ["start", "end", "gap"];

/// Parses one newline-delimited file of decimal integers.
///
/// Blank lines are skipped. A non-integer token fails with the file
/// path, 1-based line number, and the token itself.
pub fn load_series(path: &Path) -> Result<Vec<i64>> {
    let contents = fs::read_to_string(path)?;
    let mut values = Vec::new();
    for (index, line) in contents.lines().enumerate() {
        let token = line.trim();
        if token.is_empty() {
            continue;
        }
        let value = token.parse::<i64>().map_err(|_| ParseError::BadToken {
            path: path.to_path_buf(),
            line: index + 1,
            token: token.to_string(),
        })?;
        values.push(value);
    }
    Ok(values)
}

/// Element-wise `start[i] - end[i]`; the two series must be equal length.
pub fn derive_gap(start: &[i64], end: &[i64]) -> core::result::Result<Vec<i64>, ShapeError> {
    if start.len() != end.len() {
        return Err(ShapeError {
            start_len: start.len(),
            end_len: end.len(),
        });
    }
    Ok(start.iter().zip(end).map(|(s, e)| s - e).collect())
}

/// Prepares a series for log-scale plotting: drops values `<= 0` and
/// sorts ascending. Visualizer-only; percentile reports always use the
/// full unsanitized series.
pub fn sanitize_for_log(series: &[i64]) -> Vec<i64> {
    let mut kept: Vec<i64> = series.iter().copied().filter(|&v| v > 0).collect();
    kept.sort_unstable();
    kept
}

/// Loads the raw start/end files for a graph, derives the gap series,
/// and writes the fast-reload cache.
pub fn ingest_graph(layout: &DataLayout, graph: &str) -> Result<CounterTelemetry> {
    let start_path = require_file(layout.counter_start(graph), graph)?;
    let end_path = require_file(layout.counter_end(graph), graph)?;

    let start = load_series(&start_path)?;
    let end = load_series(&end_path)?;
    let gap = derive_gap(&start, &end)?;

    let telemetry = CounterTelemetry { start, end, gap };
    write_cache(&layout.telemetry_cache(graph), &telemetry)?;
    Ok(telemetry)
}

/// Loads a graph's telemetry, preferring the cache and falling back to
/// raw text ingestion (which repopulates the cache).
pub fn load_telemetry(layout: &DataLayout, graph: &str) -> Result<CounterTelemetry> {
    let cache = layout.telemetry_cache(graph);
    if cache.exists() {
        let reader = BufReader::new(File::open(&cache)?);
        return Ok(bincode::deserialize_from(reader)?);
    }
    ingest_graph(layout, graph)
}

fn write_cache(path: &Path, telemetry: &CounterTelemetry) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let writer = BufWriter::new(File::create(path)?);
    bincode::serialize_into(writer, telemetry)?;
    Ok(())
}

fn require_file(
    path: std::path::PathBuf,
    graph: &str,
) -> core::result::Result<std::path::PathBuf, MissingFileError> {
    if path.exists() {
        Ok(path)
    } else {
        Err(MissingFileError {
            graph: graph.to_string(),
            path,
        })
    }
}
