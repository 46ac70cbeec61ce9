//! Binary CSR graph decoding and edge-list encoding
//!
//! The benchmark's graph files are a fixed little-endian layout with no
//! padding and no checksum:
//!
//! ```text
//! u64 n | u64 m | u64 sizes | u64[n + 1] offsets | u32[m] edges
//! ```
//!
//! `offsets[u]..offsets[u + 1]` delimits vertex `u`'s slice of the edge
//! array. The `sizes` field is format metadata carried through as-is.

use std::fs;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

/// Errors raised while decoding a binary graph file
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("graph payload truncated: layout requires {expected} bytes, got {actual}")]
    Truncated { expected: u128, actual: usize },

    #[error("offsets not monotonic at vertex {vertex}: {previous} > {current}")]
    NonMonotonicOffsets {
        vertex: u64,
        previous: u64,
        current: u64,
    },

    #[error("final offset {final_offset} does not equal edge count {edge_count}")]
    OffsetEdgeMismatch { final_offset: u64, edge_count: u64 },

    #[error("edge {index} targets vertex {target}, outside [0, {vertex_count})")]
    EdgeOutOfRange {
        index: usize,
        target: u32,
        vertex_count: u64,
    },

    #[error("failed to read graph file: {0}")]
    FileRead(#[from] std::io::Error),
}

type Result<T> = core::result::Result<T, FormatError>;

/// In-memory adjacency representation of a decoded CSR graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrGraph {
    /// Vertex count.
    pub n: u64,
    /// Directed edge count.
    pub m: u64,
    /// Reserved format metadata, not interpreted.
    pub sizes: u64,
    /// `n + 1` monotonically non-decreasing slice boundaries, `offsets[n] == m`.
    pub offsets: Vec<u64>,
    /// Concatenated destination ids, vertex-major, length `m`.
    pub edges: Vec<u32>,
}

impl CsrGraph {
    /// Size of the three-field header in bytes.
    pub const HEADER_BYTES: usize = 24;

    /// Decodes a graph from the raw bytes of a binary graph file.
    ///
    /// Validates the full CSR contract: payload length matches the
    /// header-declared sizes, offsets are monotonic with
    /// `offsets[n] == m`, and every edge target lies in `[0, n)`.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < Self::HEADER_BYTES {
            return Err(FormatError::Truncated {
                expected: Self::HEADER_BYTES as u128,
                actual: bytes.len(),
            });
        }

        let n = read_u64_le(bytes, 0);
        let m = read_u64_le(bytes, 8);
        let sizes = read_u64_le(bytes, 16);

        // Computed in u128 so a hostile header cannot overflow the length check.
        let expected = Self::HEADER_BYTES as u128 + (n as u128 + 1) * 8 + m as u128 * 4;
        if (bytes.len() as u128) < expected {
            return Err(FormatError::Truncated {
                expected,
                actual: bytes.len(),
            });
        }

        let mut offsets = Vec::with_capacity(n as usize + 1);
        let mut pos = Self::HEADER_BYTES;
        let mut previous = 0u64;
        for vertex in 0..=n {
            let current = read_u64_le(bytes, pos);
            pos += 8;
            if vertex > 0 && current < previous {
                return Err(FormatError::NonMonotonicOffsets {
                    vertex,
                    previous,
                    current,
                });
            }
            offsets.push(current);
            previous = current;
        }

        let final_offset = offsets[n as usize];
        if final_offset != m {
            return Err(FormatError::OffsetEdgeMismatch {
                final_offset,
                edge_count: m,
            });
        }

        let mut edges = Vec::with_capacity(m as usize);
        for index in 0..m as usize {
            let target = read_u32_le(bytes, pos);
            pos += 4;
            if target as u64 >= n {
                return Err(FormatError::EdgeOutOfRange {
                    index,
                    target,
                    vertex_count: n,
                });
            }
            edges.push(target);
        }

        Ok(Self {
            n,
            m,
            sizes,
            offsets,
            edges,
        })
    }

    /// Reads and decodes a binary graph file.
    pub fn decode_file(path: &Path) -> Result<Self> {
        let bytes = fs::read(path)?;
        Self::decode(&bytes)
    }

    /// The destination slice of vertex `u`.
    pub fn neighbors(&self, u: u64) -> &[u32] {
        let start = self.offsets[u as usize] as usize;
        let end = self.offsets[u as usize + 1] as usize;
        &self.edges[start..end]
    }

    /// Writes the graph as tab-separated edge-list text.
    ///
    /// One `# FromNodeId\tToNodeId` header line, then one `u\tv` line
    /// per directed edge, vertices in id order and edges in stored
    /// order. No reordering and no dedup, so the conversion is
    /// deterministic and lossless over the edge multiset.
    pub fn write_edgelist<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writeln!(writer, "# FromNodeId\tToNodeId")?;
        for u in 0..self.n {
            for &v in self.neighbors(u) {
                writeln!(writer, "{}\t{}", u, v)?;
            }
        }
        Ok(())
    }
}

#[inline]
fn read_u64_le(bytes: &[u8], pos: usize) -> u64 {
    u64::from_le_bytes(bytes[pos..pos + 8].try_into().unwrap())
}

#[inline]
fn read_u32_le(bytes: &[u8], pos: usize) -> u32 {
    u32::from_le_bytes(bytes[pos..pos + 4].try_into().unwrap())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds the raw byte layout for a graph, without validation.
    fn csr_bytes(n: u64, m: u64, sizes: u64, offsets: &[u64], edges: &[u32]) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&n.to_le_bytes());
        bytes.extend_from_slice(&m.to_le_bytes());
        bytes.extend_from_slice(&sizes.to_le_bytes());
        for offset in offsets {
            bytes.extend_from_slice(&offset.to_le_bytes());
        }
        for edge in edges {
            bytes.extend_from_slice(&edge.to_le_bytes());
        }
        bytes
    }

    #[test]
    fn test_decode_valid_graph() {
        let bytes = csr_bytes(4, 4, 0, &[0, 2, 3, 3, 4], &[1, 2, 0, 1]);
        let graph = CsrGraph::decode(&bytes).unwrap();

        assert_eq!(graph.n, 4);
        assert_eq!(graph.m, 4);
        assert_eq!(graph.neighbors(0), &[1, 2]);
        assert_eq!(graph.neighbors(1), &[0]);
        assert_eq!(graph.neighbors(2), &[] as &[u32]);
        assert_eq!(graph.neighbors(3), &[1]);
    }

    #[test]
    fn test_decode_preserves_sizes_field() {
        let bytes = csr_bytes(1, 0, 42, &[0, 0], &[]);
        let graph = CsrGraph::decode(&bytes).unwrap();
        assert_eq!(graph.sizes, 42);
    }

    #[test]
    fn test_decode_truncated_header() {
        let result = CsrGraph::decode(&[0u8; 10]);
        assert!(matches!(result, Err(FormatError::Truncated { .. })));
    }

    #[test]
    fn test_decode_truncated_payload() {
        let mut bytes = csr_bytes(4, 4, 0, &[0, 2, 3, 3, 4], &[1, 2, 0, 1]);
        bytes.truncate(bytes.len() - 2);
        let result = CsrGraph::decode(&bytes);
        assert!(matches!(result, Err(FormatError::Truncated { .. })));
    }

    #[test]
    fn test_decode_non_monotonic_offsets() {
        let bytes = csr_bytes(2, 2, 0, &[0, 2, 1], &[0, 1]);
        let result = CsrGraph::decode(&bytes);
        assert!(matches!(
            result,
            Err(FormatError::NonMonotonicOffsets {
                vertex: 2,
                previous: 2,
                current: 1
            })
        ));
    }

    #[test]
    fn test_decode_final_offset_mismatch() {
        let bytes = csr_bytes(2, 2, 0, &[0, 1, 1], &[0, 1]);
        let result = CsrGraph::decode(&bytes);
        assert!(matches!(
            result,
            Err(FormatError::OffsetEdgeMismatch {
                final_offset: 1,
                edge_count: 2
            })
        ));
    }

    #[test]
    fn test_decode_edge_out_of_range() {
        let bytes = csr_bytes(2, 2, 0, &[0, 1, 2], &[0, 5]);
        let result = CsrGraph::decode(&bytes);
        assert!(matches!(
            result,
            Err(FormatError::EdgeOutOfRange {
                index: 1,
                target: 5,
                vertex_count: 2
            })
        ));
    }

    #[test]
    fn test_edgelist_output() {
        let bytes = csr_bytes(4, 4, 0, &[0, 2, 3, 3, 4], &[1, 2, 0, 1]);
        let graph = CsrGraph::decode(&bytes).unwrap();

        let mut out = Vec::new();
        graph.write_edgelist(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(
            text,
            "# FromNodeId\tToNodeId\n0\t1\n0\t2\n1\t0\n3\t1\n"
        );
    }

    #[test]
    fn test_edgelist_roundtrip_preserves_edge_multiset() {
        let bytes = csr_bytes(5, 6, 7, &[0, 2, 4, 4, 5, 6], &[1, 4, 0, 0, 2, 3]);
        let graph = CsrGraph::decode(&bytes).unwrap();

        let mut out = Vec::new();
        graph.write_edgelist(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let mut reparsed: Vec<(u64, u32)> = Vec::new();
        for line in text.lines().skip(1) {
            let mut parts = line.split('\t');
            let u: u64 = parts.next().unwrap().parse().unwrap();
            let v: u32 = parts.next().unwrap().parse().unwrap();
            reparsed.push((u, v));
        }

        let mut original: Vec<(u64, u32)> = Vec::new();
        for u in 0..graph.n {
            for &v in graph.neighbors(u) {
                original.push((u, v));
            }
        }

        assert_eq!(reparsed, original);
    }
}
