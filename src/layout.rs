//! Path conventions for a pipeline data directory
//!
//! The benchmark writes its telemetry to paths inferred from the graph
//! name and a fixed directory convention. [`DataLayout`] makes that
//! implicit contract explicit: every stage receives a layout and asks
//! it for paths, so tests can point the pipeline at fixture
//! directories without invoking the real executable.
//!
//! Under the data root:
//!
//! ```text
//! graphnames.txt                        corpus list (default)
//! bin/<graph>.bin                       binary CSR graph
//! txt/<graph>.txt                       converted edge list
//! counter_distribution/<graph>_start.txt  counter snapshots at start
//! counter_distribution/<graph>_end.txt    counter snapshots at end
//! counter_distribution/<graph>.bin        cached telemetry arrays
//! round_distribution/<graph>.txt          round/frontier stats
//! ```

use std::path::{Path, PathBuf};

/// Derives every per-graph path of the pipeline from the data root.
#[derive(Debug, Clone)]
pub struct DataLayout {
    root: PathBuf,
}

impl DataLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Default corpus list location.
    pub fn corpus_file(&self) -> PathBuf {
        self.root.join("graphnames.txt")
    }

    /// Binary CSR graph consumed by the benchmark.
    pub fn graph_bin(&self, graph: &str) -> PathBuf {
        self.root.join("bin").join(format!("{graph}.bin"))
    }

    /// Edge-list text form for external graph toolchains.
    pub fn graph_txt(&self, graph: &str) -> PathBuf {
        self.root.join("txt").join(format!("{graph}.txt"))
    }

    /// Counter snapshots taken when the benchmark starts.
    pub fn counter_start(&self, graph: &str) -> PathBuf {
        self.counter_dir().join(format!("{graph}_start.txt"))
    }

    /// Counter snapshots taken when the benchmark finishes.
    pub fn counter_end(&self, graph: &str) -> PathBuf {
        self.counter_dir().join(format!("{graph}_end.txt"))
    }

    /// Fast-reload cache of the parsed start/end/gap arrays.
    pub fn telemetry_cache(&self, graph: &str) -> PathBuf {
        self.counter_dir().join(format!("{graph}.bin"))
    }

    /// Per-round frontier statistics written by the benchmark.
    pub fn round_stats(&self, graph: &str) -> PathBuf {
        self.root
            .join("round_distribution")
            .join(format!("{graph}.txt"))
    }

    fn counter_dir(&self) -> PathBuf {
        self.root.join("counter_distribution")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_paths() {
        let layout = DataLayout::new("/data");
        assert_eq!(layout.graph_bin("soc_lj"), Path::new("/data/bin/soc_lj.bin"));
        assert_eq!(layout.graph_txt("soc_lj"), Path::new("/data/txt/soc_lj.txt"));
        assert_eq!(
            layout.counter_start("soc_lj"),
            Path::new("/data/counter_distribution/soc_lj_start.txt")
        );
        assert_eq!(
            layout.counter_end("soc_lj"),
            Path::new("/data/counter_distribution/soc_lj_end.txt")
        );
        assert_eq!(
            layout.telemetry_cache("soc_lj"),
            Path::new("/data/counter_distribution/soc_lj.bin")
        );
        assert_eq!(
            layout.round_stats("soc_lj"),
            Path::new("/data/round_distribution/soc_lj.txt")
        );
    }
}
