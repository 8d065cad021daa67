//! # chromsearch
//!
//! Primer and vector search in sequencing reads, tolerant of IUPAC ambiguity
//! codes and weighted by base-call quality.
//!
//! The crate offers three search procedures over one shared
//! ambiguity-aware substitution matrix:
//!
//! - [`search`]: a bidirectional threshold search that finds the leftmost
//!   (forward) or rightmost-before-a-limit (backward) position where a query
//!   aligns at a given percent identity. [`search_by_alignment_forward`] and
//!   [`search_by_alignment_backward`] wrap the two directions.
//! - [`vector_search_5`]: finds leading vector sequence and reports where it
//!   ends.
//! - [`vector_search_3`]: finds trailing vector sequence and reports where it
//!   starts.
//!
//! Reads are consumed through the [`ReadView`] trait; [`NucleotideRead`]
//! carries bases, optional qualities and an optional name, and also provides
//! exact IUPAC pattern search and a few per-read statistics.
//!
//! ## Thresholds
//! A percent identity is turned into an absolute score with [`min_score`]:
//!
//! ```text
//! min_score = len * GAP_OPEN + len * (MATCH - GAP_OPEN) * min_percent / 100
//! ```
//!
//! ### Example
//! ```
//! use chromsearch::{vector_search_5, NucleotideRead, SearchHit};
//! chromsearch::initialize();
//! let read = NucleotideRead::new("ACGATCAGACTGCGAAGATTCCATACAGCG");
//! assert_eq!(read.search_by_alignment_forward(0, b"CAGACAGCG", 80).position(), Some(5));
//!
//! let read = NucleotideRead::new("ACGTTGCAGGATCCTTAA");
//! let hit = vector_search_5(&read, b"ACGTTGCA", 50, 8);
//! assert_eq!(hit, SearchHit::Match { position: 7, score: 2 });
//! ```
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

pub mod common;
pub mod iupac;
pub mod read;
pub mod scoring;
pub mod search;
pub mod vector;

pub use common::{min_score, AlignParams, ChromError, SearchHit, VectorParams};
pub use read::{qualities_from_phred33, BaseCounts, NucleotideRead, ReadView, DEFAULT_BASE_QUALITY};
pub use scoring::{initialize, ScoringMatrix, GAP_EXTEND, GAP_OPEN, MATCH, MISMATCH};
pub use search::{search, search_by_alignment_backward, search_by_alignment_forward, Searcher};
pub use vector::{vector_search_3, vector_search_5, N_QUALITY};

#[cfg(test)]
mod tests {
    use super::*;

    // One searcher serving every procedure in turn, as a trimming pipeline
    // would use it on a single read.
    #[test]
    fn pipeline_on_one_read() {
        let read = NucleotideRead::with_qualities(
            "ACGTTGCAGGATCCTTAAGGTTCAACGTTGCA".as_bytes(),
            vec![30; 32],
        )
        .unwrap();
        let mut searcher = Searcher::new();

        let leading = searcher.vector_search_5(&read, b"ACGTTGCA", 50, 8);
        assert_eq!(leading, SearchHit::Match { position: 7, score: 2 });

        let trailing = searcher.vector_search_3(&read, 8, b"ACGTTGCA", 50, 8);
        assert_eq!(trailing, SearchHit::Match { position: 24, score: 2 });

        let site = read.search_sequence_forward(0, b"GGATCC", false);
        assert_eq!(site, Some(8));

        let params = AlignParams::default();
        let hit = searcher.search(&read, 0, read.len(), read.len(), b"GGATCC", params.min_percent);
        assert_eq!(hit.position(), Some(8));
    }
}
