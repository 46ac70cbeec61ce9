//! CSV report assembly
//!
//! Two reports per run, both iterating the corpus in registry order:
//!
//! * `mis_counters.csv` — one row per (graph, series) with the graph's
//!   scalar stats and the 20-point percentile layout (deciles, then the
//!   fine-grained top decile), separated by two visual-spacer columns.
//! * `mis_rounds.csv` — one row per graph echoing the round stats, with
//!   the per-round frontier sizes appended as trailing columns. Rows
//!   are jagged across graphs (one column per round), so the writer
//!   runs in flexible mode.
//!
//! Report building fails fast on the first missing or malformed input:
//! a partial percentile table is worse than no table. Errors name the
//! offending graph and file.

use crate::analysis::percentiles::{percentiles, SeriesSummary, DECILES, FINE};
use crate::layout::DataLayout;
use crate::telemetry::ingest::SERIES_NAMES;
use crate::telemetry::round_stats::load_round_stats;
use crate::telemetry::{load_telemetry, RoundStats, TelemetryError};
use std::path::Path;
use tabled::{Table, Tabled};
use thiserror::Error;

/// Two-space spacer column carried in the header and every row.
const SPACER: &str = "  ";

/// Errors raised while assembling reports
#[derive(Error, Debug)]
pub enum ReportError {
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),

    #[error("graph {graph}: series {series} is empty, no percentiles to report")]
    EmptySeries { graph: String, series: String },

    #[error("failed to write report: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

type Result<T> = core::result::Result<T, ReportError>;

/// One assembled (graph, series) report record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PercentileRow {
    pub graph: String,
    pub series: String,
    pub n: u64,
    pub m: u64,
    pub mis_size: u64,
    /// Percentiles at 10, 20, ..., 100.
    pub deciles: Vec<i64>,
    /// Percentiles at 91, 92, ..., 100 (100 repeats the decile entry).
    pub fine: Vec<i64>,
}

/// Joins a graph's round stats with one series' percentile values.
///
/// `series` must already be sorted ascending and must be the full,
/// unsanitized series: percentile reports reflect the true
/// distribution, zero/negative artifacts included.
pub fn build_row(
    graph: &str,
    series_name: &str,
    stats: &RoundStats,
    sorted_series: &[i64],
) -> Result<PercentileRow> {
    let empty = || ReportError::EmptySeries {
        graph: graph.to_string(),
        series: series_name.to_string(),
    };
    let deciles = percentiles(sorted_series, &DECILES).ok_or_else(empty)?;
    let fine = percentiles(sorted_series, &FINE).ok_or_else(empty)?;
    Ok(PercentileRow {
        graph: graph.to_string(),
        series: series_name.to_string(),
        n: stats.n,
        m: stats.m,
        mis_size: stats.mis_size,
        deciles,
        fine,
    })
}

/// Builds every (graph, series) percentile row in corpus order.
pub fn build_counter_rows(layout: &DataLayout, corpus: &[String]) -> Result<Vec<PercentileRow>> {
    let mut rows = Vec::with_capacity(corpus.len() * SERIES_NAMES.len());
    for graph in corpus {
        let telemetry = load_telemetry(layout, graph)?;
        let stats = load_round_stats(layout, graph)?;
        for series_name in SERIES_NAMES {
            // series() cannot miss: SERIES_NAMES is its key set.
            let series = telemetry.series(series_name).unwrap_or(&[]);
            let mut sorted = series.to_vec();
            sorted.sort_unstable();
            rows.push(build_row(graph, series_name, &stats, &sorted)?);
        }
    }
    Ok(rows)
}

/// Writes `mis_counters.csv`.
pub fn write_counter_report(rows: &[PercentileRow], output_path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(output_path)?;

    let mut header: Vec<String> = vec![
        "graph name".into(),
        "series".into(),
        "n".into(),
        "m".into(),
        "mis_size".into(),
        SPACER.into(),
    ];
    header.extend(DECILES.iter().map(|p| format!("{p:.0}%")));
    header.push(SPACER.into());
    header.extend(FINE.iter().map(|p| format!("{p:.0}%")));
    writer.write_record(&header)?;

    for row in rows {
        let mut record: Vec<String> = vec![
            row.graph.clone(),
            row.series.clone(),
            row.n.to_string(),
            row.m.to_string(),
            row.mis_size.to_string(),
            SPACER.into(),
        ];
        record.extend(row.deciles.iter().map(|v| v.to_string()));
        record.push(SPACER.into());
        record.extend(row.fine.iter().map(|v| v.to_string()));
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

/// Writes `mis_rounds.csv` with jagged trailing frontier columns.
pub fn write_rounds_report(
    layout: &DataLayout,
    corpus: &[String],
    output_path: &Path,
) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(output_path)?;

    writer.write_record(["graph name", "n", "m", "mis_size", "n of rounds", "frontier"])?;

    for graph in corpus {
        let stats = load_round_stats(layout, graph)?;
        let mut record: Vec<String> = vec![
            graph.clone(),
            stats.n.to_string(),
            stats.m.to_string(),
            stats.mis_size.to_string(),
            stats.round_count.to_string(),
        ];
        record.extend(stats.frontier.iter().map(|v| v.to_string()));
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

#[derive(Tabled)]
struct GraphSummaryRow {
    #[tabled(rename = "Graph")]
    graph: String,
    #[tabled(rename = "n")]
    n: u64,
    #[tabled(rename = "m")]
    m: u64,
    #[tabled(rename = "MIS size")]
    mis_size: u64,
    #[tabled(rename = "Rounds")]
    rounds: u64,
}

/// ASCII summary table of the corpus, printed after report generation.
pub fn corpus_summary_table(layout: &DataLayout, corpus: &[String]) -> Result<String> {
    let mut rows = Vec::with_capacity(corpus.len());
    for graph in corpus {
        let stats = load_round_stats(layout, graph)?;
        rows.push(GraphSummaryRow {
            graph: graph.clone(),
            n: stats.n,
            m: stats.m,
            mis_size: stats.mis_size,
            rounds: stats.round_count,
        });
    }
    Ok(Table::new(rows).to_string())
}

/// Generates both reports plus the console summaries.
pub fn generate_reports(layout: &DataLayout, corpus: &[String], output_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(output_dir)?;

    let rows = build_counter_rows(layout, corpus)?;
    for graph in corpus {
        let telemetry = load_telemetry(layout, graph)?;
        for series_name in SERIES_NAMES {
            if let Some(values) = telemetry.series(series_name) {
                if let Some(summary) = SeriesSummary::from_series(values) {
                    println!("   {graph}/{series_name}: {summary}");
                }
            }
        }
    }

    let counters_path = output_dir.join("mis_counters.csv");
    write_counter_report(&rows, &counters_path)?;
    println!("✅ Wrote {}", counters_path.display());

    let rounds_path = output_dir.join("mis_rounds.csv");
    write_rounds_report(layout, corpus, &rounds_path)?;
    println!("✅ Wrote {}", rounds_path.display());

    println!("{}", corpus_summary_table(layout, corpus)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;

    fn write_file(path: &std::path::Path, contents: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        let mut file = fs::File::create(path).unwrap();
        write!(file, "{contents}").unwrap();
    }

    /// Lays out one graph's complete telemetry fixture.
    fn fixture_graph(layout: &DataLayout, graph: &str) {
        write_file(&layout.counter_start(graph), "5\n5\n5\n10\n");
        write_file(&layout.counter_end(graph), "1\n2\n3\n4\n");
        write_file(&layout.round_stats(graph), "4\n4\n2\n2\n3\n1\n");
    }

    #[test]
    fn test_build_row_gap_scenario() {
        let stats = RoundStats {
            n: 4,
            m: 4,
            mis_size: 2,
            round_count: 2,
            frontier: vec![3, 1],
        };
        let row = build_row("g", "gap", &stats, &[2, 3, 4, 6]).unwrap();
        assert_eq!(row.deciles, vec![2, 2, 2, 3, 3, 3, 4, 4, 5, 6]);
        assert_eq!(row.fine[9], 6);
        assert_eq!(row.deciles[9], row.fine[9]);
    }

    #[test]
    fn test_build_row_empty_series() {
        let stats = RoundStats {
            n: 0,
            m: 0,
            mis_size: 0,
            round_count: 0,
            frontier: vec![],
        };
        let error = build_row("g", "start", &stats, &[]).unwrap_err();
        assert!(matches!(error, ReportError::EmptySeries { .. }));
    }

    #[test]
    fn test_counter_rows_preserve_corpus_order() {
        let dir = tempfile::tempdir().unwrap();
        let layout = DataLayout::new(dir.path());
        fixture_graph(&layout, "beta");
        fixture_graph(&layout, "alpha");

        let corpus = vec!["beta".to_string(), "alpha".to_string()];
        let rows = build_counter_rows(&layout, &corpus).unwrap();

        let keys: Vec<(&str, &str)> = rows
            .iter()
            .map(|r| (r.graph.as_str(), r.series.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("beta", "start"),
                ("beta", "end"),
                ("beta", "gap"),
                ("alpha", "start"),
                ("alpha", "end"),
                ("alpha", "gap"),
            ]
        );
    }

    #[test]
    fn test_missing_round_stats_fails_whole_report() {
        let dir = tempfile::tempdir().unwrap();
        let layout = DataLayout::new(dir.path());
        fixture_graph(&layout, "good");
        // "bad" has counters but no round stats file.
        write_file(&layout.counter_start("bad"), "1\n");
        write_file(&layout.counter_end("bad"), "1\n");

        let corpus = vec!["good".to_string(), "bad".to_string()];
        let error = build_counter_rows(&layout, &corpus).unwrap_err();
        assert!(error.to_string().contains("bad"));
        assert!(matches!(
            error,
            ReportError::Telemetry(TelemetryError::MissingFile(_))
        ));
    }

    #[test]
    fn test_counter_report_layout() {
        let stats = RoundStats {
            n: 4,
            m: 4,
            mis_size: 2,
            round_count: 2,
            frontier: vec![3, 1],
        };
        let row = build_row("g", "gap", &stats, &[2, 3, 4, 6]).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mis_counters.csv");
        write_counter_report(&[row], &path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        let header = lines.next().unwrap();
        // Two spacer columns, decile group, then fine group.
        assert_eq!(
            header,
            "graph name,series,n,m,mis_size,  ,10%,20%,30%,40%,50%,60%,70%,80%,90%,100%,  ,91%,92%,93%,94%,95%,96%,97%,98%,99%,100%"
        );
        let data = lines.next().unwrap();
        assert!(data.starts_with("g,gap,4,4,2,"));
        assert!(data.ends_with(",6")); // duplicated 100% closes the row
    }

    #[test]
    fn test_rounds_report_is_jagged() {
        let dir = tempfile::tempdir().unwrap();
        let layout = DataLayout::new(dir.path());
        write_file(&layout.counter_start("a"), "1\n");
        write_file(&layout.counter_end("a"), "1\n");
        write_file(&layout.round_stats("a"), "10\n20\n5\n3\n6\n3\n1\n");
        write_file(&layout.round_stats("b"), "4\n4\n2\n1\n4\n");

        let corpus = vec!["a".to_string(), "b".to_string()];
        let path = dir.path().join("mis_rounds.csv");
        write_rounds_report(&layout, &corpus, &path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], "a,10,20,5,3,6,3,1");
        assert_eq!(lines[2], "b,4,4,2,1,4");
    }

    #[test]
    fn test_corpus_summary_table() {
        let dir = tempfile::tempdir().unwrap();
        let layout = DataLayout::new(dir.path());
        fixture_graph(&layout, "g");

        let table = corpus_summary_table(&layout, &["g".to_string()]).unwrap();
        assert!(table.contains("Graph"));
        assert!(table.contains("MIS size"));
        assert!(table.contains("g"));
    }

    #[test]
    fn test_generate_reports_writes_both_csvs() {
        let dir = tempfile::tempdir().unwrap();
        let layout = DataLayout::new(dir.path());
        fixture_graph(&layout, "g");

        let out = dir.path().join("reports");
        generate_reports(&layout, &["g".to_string()], &out).unwrap();

        let counters = fs::read_to_string(out.join("mis_counters.csv")).unwrap();
        assert_eq!(counters.lines().count(), 1 + SERIES_NAMES.len());
        let rounds = fs::read_to_string(out.join("mis_rounds.csv")).unwrap();
        assert_eq!(rounds.lines().nth(1).unwrap(), "g,4,4,2,2,3,1");
    }
}
