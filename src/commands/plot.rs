//! Corpus-wide distribution figure generation

use crate::common::plots::{render_linear_histogram, render_loglog_plot};
use crate::common::PlotError;
use crate::layout::DataLayout;
use crate::telemetry::ingest::SERIES_NAMES;
use crate::telemetry::{load_telemetry, sanitize_for_log, TelemetryError};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors raised while generating figures
#[derive(Error, Debug)]
pub enum PlotStageError {
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),

    #[error("graph {graph}: {source}")]
    Render {
        graph: String,
        #[source]
        source: PlotError,
    },

    #[error("failed to prepare figure directory: {0}")]
    Io(#[from] std::io::Error),
}

/// Renders both panels for every corpus graph in order.
///
/// Fails the whole stage on the first missing or malformed telemetry,
/// naming the graph. A graph whose series are entirely non-positive
/// has nothing to show on a log axis and is skipped with a warning.
pub fn plot_corpus(
    layout: &DataLayout,
    corpus: &[String],
    output_dir: &Path,
) -> Result<(), PlotStageError> {
    fs::create_dir_all(output_dir)?;

    for graph in corpus {
        let telemetry = load_telemetry(layout, graph)?;

        let sanitized: Vec<(&str, Vec<i64>)> = SERIES_NAMES
            .iter()
            .map(|&name| {
                let values = telemetry.series(name).unwrap_or(&[]);
                (name, sanitize_for_log(values))
            })
            .collect();

        if sanitized.iter().all(|(_, values)| values.is_empty()) {
            eprintln!("⚠️  {graph}: no positive counter values, skipping figures");
            continue;
        }

        let series: Vec<(&str, &[i64])> = sanitized
            .iter()
            .map(|(name, values)| (*name, values.as_slice()))
            .collect();

        let render = |source| PlotStageError::Render {
            graph: graph.clone(),
            source,
        };
        let linear_path = output_dir.join(format!("{graph}_linear.png"));
        render_linear_histogram(graph, &series, &linear_path).map_err(render)?;
        let loglog_path = output_dir.join(format!("{graph}_loglog.png"));
        render_loglog_plot(graph, &series, &loglog_path).map_err(render)?;
        println!("✅ {graph}: wrote {} and {}", linear_path.display(), loglog_path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(path: &Path, contents: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        let mut file = fs::File::create(path).unwrap();
        write!(file, "{contents}").unwrap();
    }

    #[test]
    fn test_missing_telemetry_fails_stage_naming_graph() {
        let dir = tempfile::tempdir().unwrap();
        let layout = DataLayout::new(dir.path());
        let figures = dir.path().join("figure");

        let error = plot_corpus(&layout, &["ghost".to_string()], &figures).unwrap_err();
        assert!(error.to_string().contains("ghost"));
    }

    #[test]
    fn test_all_nonpositive_graph_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let layout = DataLayout::new(dir.path());
        write_file(&layout.counter_start("flat"), "0\n0\n-1\n");
        write_file(&layout.counter_end("flat"), "0\n0\n0\n");
        let figures = dir.path().join("figure");

        plot_corpus(&layout, &["flat".to_string()], &figures).unwrap();
        assert!(!figures.join("flat_linear.png").exists());
        assert!(!figures.join("flat_loglog.png").exists());
    }
}
