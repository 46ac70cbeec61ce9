//! Batched graph conversion: binary CSR to edge-list text

use crate::graph::{CsrGraph, FormatError};
use crate::layout::DataLayout;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use thiserror::Error;

/// Failure converting one graph
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("graph {graph}: failed to decode {}: {source}", path.display())]
    Decode {
        graph: String,
        path: PathBuf,
        #[source]
        source: FormatError,
    },

    #[error("graph {graph}: failed to write {}: {source}", path.display())]
    Write {
        graph: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Tally of one conversion run.
#[derive(Debug, Default)]
pub struct ConvertSummary {
    pub converted: usize,
    pub failures: Vec<ConvertError>,
}

/// Decodes one graph's binary file and writes its edge-list text form.
///
/// Returns the number of edges written.
pub fn convert_graph(layout: &DataLayout, graph: &str) -> Result<u64, ConvertError> {
    let bin_path = layout.graph_bin(graph);
    let decoded = CsrGraph::decode_file(&bin_path).map_err(|source| ConvertError::Decode {
        graph: graph.to_string(),
        path: bin_path,
        source,
    })?;

    let txt_path = layout.graph_txt(graph);
    let write_error = |source| ConvertError::Write {
        graph: graph.to_string(),
        path: txt_path.clone(),
        source,
    };

    if let Some(parent) = txt_path.parent() {
        fs::create_dir_all(parent).map_err(write_error)?;
    }
    let mut writer = BufWriter::new(File::create(&txt_path).map_err(write_error)?);
    decoded.write_edgelist(&mut writer).map_err(write_error)?;
    writer.flush().map_err(write_error)?;

    Ok(decoded.m)
}

/// Converts every corpus graph in order, isolating per-graph failures:
/// a malformed graph is reported and the remaining graphs still
/// convert.
pub fn convert_corpus(layout: &DataLayout, corpus: &[String]) -> ConvertSummary {
    let mut summary = ConvertSummary::default();

    for graph in corpus {
        println!("📦 Converting: {graph}");
        match convert_graph(layout, graph) {
            Ok(edges) => {
                println!("   ✅ Wrote {} edges to {}", edges, layout.graph_txt(graph).display());
                summary.converted += 1;
            }
            Err(error) => {
                println!("   ❌ {error}");
                summary.failures.push(error);
            }
        }
    }

    println!(
        "Converted {}/{} graphs ({} failed)",
        summary.converted,
        corpus.len(),
        summary.failures.len()
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn csr_bytes(n: u64, m: u64, offsets: &[u64], edges: &[u32]) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&n.to_le_bytes());
        bytes.extend_from_slice(&m.to_le_bytes());
        bytes.extend_from_slice(&0u64.to_le_bytes());
        for offset in offsets {
            bytes.extend_from_slice(&offset.to_le_bytes());
        }
        for edge in edges {
            bytes.extend_from_slice(&edge.to_le_bytes());
        }
        bytes
    }

    fn write_graph_bin(layout: &DataLayout, graph: &str, bytes: &[u8]) {
        let path = layout.graph_bin(graph);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, bytes).unwrap();
    }

    #[test]
    fn test_convert_graph_writes_edgelist() {
        let dir = tempfile::tempdir().unwrap();
        let layout = DataLayout::new(dir.path());
        write_graph_bin(&layout, "g", &csr_bytes(4, 4, &[0, 2, 3, 3, 4], &[1, 2, 0, 1]));

        let edges = convert_graph(&layout, "g").unwrap();
        assert_eq!(edges, 4);

        let text = fs::read_to_string(layout.graph_txt("g")).unwrap();
        assert_eq!(text, "# FromNodeId\tToNodeId\n0\t1\n0\t2\n1\t0\n3\t1\n");
    }

    #[test]
    fn test_convert_corpus_isolates_failures() {
        let dir = tempfile::tempdir().unwrap();
        let layout = DataLayout::new(dir.path());
        write_graph_bin(&layout, "good", &csr_bytes(2, 2, &[0, 1, 2], &[1, 0]));
        write_graph_bin(&layout, "bad", &[0u8; 4]); // truncated header

        let corpus = vec![
            "bad".to_string(),
            "good".to_string(),
            "absent".to_string(),
        ];
        let summary = convert_corpus(&layout, &corpus);

        assert_eq!(summary.converted, 1);
        assert_eq!(summary.failures.len(), 2);
        assert!(layout.graph_txt("good").exists());
        assert!(summary.failures[0].to_string().contains("bad"));
        assert!(summary.failures[1].to_string().contains("absent"));
    }
}
