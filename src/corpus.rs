//! Corpus registry: the ordered list of graph names for a pipeline run
//!
//! The corpus file is newline-delimited graph names; blank lines are
//! skipped. The resulting order defines the iteration order of every
//! downstream stage, so it is loaded once and passed explicitly into
//! each stage entry point.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure to read the corpus list file
#[derive(Error, Debug)]
#[error("failed to read corpus file {}: {source}", path.display())]
pub struct CorpusError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Loads the corpus list, preserving file order and skipping blanks.
pub fn load_corpus(path: &Path) -> Result<Vec<String>, CorpusError> {
    let contents = fs::read_to_string(path).map_err(|source| CorpusError {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_corpus_skips_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graphnames.txt");
        let mut file = fs::File::create(&path).unwrap();
        write!(file, "soc_lj\n\n  \nfriendster_sym\nsd_arc_sym\n").unwrap();

        let corpus = load_corpus(&path).unwrap();
        assert_eq!(corpus, vec!["soc_lj", "friendster_sym", "sd_arc_sym"]);
    }

    #[test]
    fn test_load_corpus_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_corpus(&dir.path().join("absent.txt"));
        let error = result.unwrap_err();
        assert!(error.to_string().contains("absent.txt"));
    }
}
