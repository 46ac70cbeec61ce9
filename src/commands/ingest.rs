//! Corpus-wide telemetry ingestion into the fast-reload cache

use crate::layout::DataLayout;
use crate::telemetry::ingest::ingest_graph;
use crate::telemetry::TelemetryError;
use indicatif::ProgressBar;

/// Tally of one ingestion run.
#[derive(Debug, Default)]
pub struct IngestSummary {
    pub ingested: usize,
    pub failures: Vec<(String, TelemetryError)>,
}

/// Ingests every corpus graph's raw telemetry in order.
///
/// Graphs are independent, so a failed graph is recorded and the loop
/// continues; the failure list names each graph and file for triage.
pub fn ingest_corpus(layout: &DataLayout, corpus: &[String]) -> IngestSummary {
    let mut summary = IngestSummary::default();
    let progress = ProgressBar::new(corpus.len() as u64);

    for graph in corpus {
        match ingest_graph(layout, graph) {
            Ok(telemetry) => {
                progress.println(format!(
                    "✅ {graph}: cached {} vertices",
                    telemetry.start.len()
                ));
                summary.ingested += 1;
            }
            Err(error) => {
                progress.println(format!("❌ {error}"));
                summary.failures.push((graph.clone(), error));
            }
        }
        progress.inc(1);
    }
    progress.finish_and_clear();

    println!(
        "Ingested {}/{} graphs ({} failed)",
        summary.ingested,
        corpus.len(),
        summary.failures.len()
    );
    summary
}
