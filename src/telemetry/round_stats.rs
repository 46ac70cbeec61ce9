//! Per-graph round/frontier statistics file

use crate::layout::DataLayout;
use crate::telemetry::{MissingFileError, ParseError, TelemetryError};
use std::fs;
use std::path::Path;

type Result<T> = core::result::Result<T, TelemetryError>;

/// Scalar metadata the benchmark records for one graph run.
///
/// The file layout is four integer lines (`n`, `m`, `mis_size`,
/// `round_count`) followed by exactly `round_count` per-round frontier
/// sizes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundStats {
    pub n: u64,
    pub m: u64,
    pub mis_size: u64,
    pub round_count: u64,
    pub frontier: Vec<u64>,
}

/// Loads a graph's round-stats file through the layout.
pub fn load_round_stats(layout: &DataLayout, graph: &str) -> Result<RoundStats> {
    let path = layout.round_stats(graph);
    if !path.exists() {
        return Err(MissingFileError {
            graph: graph.to_string(),
            path,
        }
        .into());
    }
    parse_round_stats(&path)
}

/// Parses the fixed-format round-stats file.
pub fn parse_round_stats(path: &Path) -> Result<RoundStats> {
    let contents = fs::read_to_string(path)?;
    let mut reader = LineReader {
        path,
        lines: contents.lines(),
        line: 0,
    };

    let n = reader.next_u64()?;
    let m = reader.next_u64()?;
    let mis_size = reader.next_u64()?;
    let round_count = reader.next_u64()?;

    let mut frontier = Vec::with_capacity(round_count as usize);
    for _ in 0..round_count {
        frontier.push(reader.next_u64()?);
    }
    reader.expect_end()?;

    Ok(RoundStats {
        n,
        m,
        mis_size,
        round_count,
        frontier,
    })
}

struct LineReader<'a> {
    path: &'a Path,
    lines: std::str::Lines<'a>,
    line: usize,
}

impl LineReader<'_> {
    fn next_u64(&mut self) -> core::result::Result<u64, ParseError> {
        loop {
            let raw = self.lines.next().ok_or_else(|| ParseError::UnexpectedEof {
                path: self.path.to_path_buf(),
                line: self.line,
            })?;
            self.line += 1;
            let token = raw.trim();
            if token.is_empty() {
                continue;
            }
            return token.parse::<u64>().map_err(|_| ParseError::BadToken {
                path: self.path.to_path_buf(),
                line: self.line,
                token: token.to_string(),
            });
        }
    }

    /// The frontier section must exhaust the file; leftover non-blank
    /// lines mean the round count header undercounts the data.
    fn expect_end(&mut self) -> core::result::Result<(), ParseError> {
        for raw in self.lines.by_ref() {
            self.line += 1;
            if !raw.trim().is_empty() {
                return Err(ParseError::TrailingLines {
                    path: self.path.to_path_buf(),
                    line: self.line,
                });
            }
        }
        Ok(())
    }
}
