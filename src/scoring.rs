//! Ambiguity-aware substitution matrix.
//!
//! The 16×16 matrix covers the 15 IUPAC codes plus the undefined index.
//! Scores are derived from the overlap of the base subsets each code stands
//! for:
//!
//! - no common base scores `mismatch`;
//! - two unambiguous, equal bases score `match`;
//! - any pairing involving an ambiguity code scores
//!   `mismatch + round((match - mismatch) * sqrt(common / (count_i * count_j)))`.
//!
//! Row and column [`UNDEFINED_INDEX`](crate::iupac::UNDEFINED_INDEX) always
//! score `mismatch`.
//!
//! The searches share one default matrix ([`ScoringMatrix::shared`]) built on
//! first use behind a [`OnceLock`], so concurrent first callers still trigger
//! exactly one build. Call [`initialize`] at startup to pay that cost up front.
//!
//! ### Example
//! ```rust
//! use chromsearch::ScoringMatrix;
//! let m = ScoringMatrix::shared();
//! assert_eq!(m.score(b'A', b'A'), 2);
//! assert_eq!(m.score(b'A', b'N'), -2);
//! assert_eq!(m.score(b'A', b'-'), -6);
//! ```
use std::sync::OnceLock;

use crate::iupac::{self, CODES, CODE_COUNT, UNDEFINED_INDEX};

/// Score for two equal unambiguous bases.
pub const MATCH: i32 = 2;
/// Score for disjoint base subsets.
pub const MISMATCH: i32 = -6;
/// Cost of opening a gap (and of every gap in the linear scan).
pub const GAP_OPEN: i32 = -4;
/// Cost of continuing an open gap in the quality-weighted scans.
pub const GAP_EXTEND: i32 = GAP_OPEN * 2;

/// Side length of the matrix: the codes plus the undefined index.
pub const MATRIX_SIZE: usize = CODE_COUNT + 1;

static SHARED: OnceLock<ScoringMatrix> = OnceLock::new();

#[cfg(test)]
static SHARED_BUILDS: std::sync::atomic::AtomicUsize = std::sync::atomic::AtomicUsize::new(0);

/// Symmetric substitution matrix indexed by IUPAC dense index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoringMatrix {
    cells: [[i32; MATRIX_SIZE]; MATRIX_SIZE],
}

impl ScoringMatrix {
    /// Build a matrix from match and mismatch scores.
    pub fn new(match_score: i32, mismatch_score: i32) -> Self {
        let mut cells = [[mismatch_score; MATRIX_SIZE]; MATRIX_SIZE];
        for (i, &(a, _)) in CODES.iter().enumerate() {
            let flags_a = iupac::flags(a);
            let count_a = flags_a.count_ones();
            for (j, &(b, _)) in CODES.iter().enumerate() {
                let flags_b = iupac::flags(b);
                let count_b = flags_b.count_ones();
                let common = (flags_a & flags_b).count_ones();
                cells[i][j] = if common == 0 {
                    mismatch_score
                } else if count_a + count_b > 2 {
                    let fraction = (common as f32 / (count_a * count_b) as f32).sqrt();
                    mismatch_score + ((match_score - mismatch_score) as f32 * fraction + 0.5) as i32
                } else {
                    match_score
                };
            }
        }
        // The undefined row and column keep the mismatch fill.
        debug_assert!(cells[UNDEFINED_INDEX].iter().all(|&s| s == mismatch_score));
        Self { cells }
    }

    /// The process-wide matrix for [`MATCH`] and [`MISMATCH`].
    ///
    /// Built at most once; later calls return the same reference.
    pub fn shared() -> &'static ScoringMatrix {
        SHARED.get_or_init(|| {
            #[cfg(test)]
            SHARED_BUILDS.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            log::debug!("building shared scoring matrix (match={MATCH}, mismatch={MISMATCH})");
            ScoringMatrix::new(MATCH, MISMATCH)
        })
    }

    /// Score between two dense indices.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> i32 {
        self.cells[i][j]
    }

    /// Row for the code `base`, to be indexed by [`iupac::index`] of the
    /// other symbol.
    #[inline]
    pub fn row(&self, base: u8) -> &[i32; MATRIX_SIZE] {
        &self.cells[iupac::index(base)]
    }

    /// Score between two bytes (case-insensitive, unknowns are undefined).
    #[inline]
    pub fn score(&self, a: u8, b: u8) -> i32 {
        self.cells[iupac::index(a)][iupac::index(b)]
    }
}

/// Build the shared matrix now rather than on the first search.
pub fn initialize() -> &'static ScoringMatrix {
    ScoringMatrix::shared()
}

#[cfg(test)]
pub(crate) fn shared_build_count() -> usize {
    SHARED_BUILDS.load(std::sync::atomic::Ordering::SeqCst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn unambiguous_pairs() {
        let m = ScoringMatrix::shared();
        for &a in b"ACGT" {
            for &b in b"ACGT" {
                let expected = if a == b { MATCH } else { MISMATCH };
                assert_eq!(m.score(a, b), expected, "{}/{}", a as char, b as char);
            }
        }
        assert_eq!(m.score(b'a', b'A'), MATCH);
        assert_eq!(m.score(b'U', b'T'), MATCH);
    }

    #[test]
    fn ambiguous_pairs() {
        let m = ScoringMatrix::shared();
        assert_eq!(m.score(b'A', b'N'), -2);
        assert_eq!(m.score(b'N', b'N'), -2);
        assert_eq!(m.score(b'A', b'R'), 0);
        assert_eq!(m.score(b'R', b'R'), 0);
        assert_eq!(m.score(b'R', b'Y'), MISMATCH);
        assert_eq!(m.score(b'B', b'C'), -1);
        assert_eq!(m.score(b'B', b'B'), -1);
        assert_eq!(m.score(b'S', b'B'), -1);
        assert_eq!(m.score(b'K', b'M'), MISMATCH);
        assert_eq!(m.score(b'D', b'V'), -2);
    }

    #[test]
    fn undefined_row_and_column() {
        let m = ScoringMatrix::shared();
        for i in 0..MATRIX_SIZE {
            assert_eq!(m.get(i, UNDEFINED_INDEX), MISMATCH);
            assert_eq!(m.get(UNDEFINED_INDEX, i), MISMATCH);
        }
        assert_eq!(m.score(b'-', b'-'), MISMATCH);
        assert_eq!(m.score(b'X', b'N'), MISMATCH);
    }

    #[test]
    fn symmetric() {
        let m = ScoringMatrix::new(MATCH, MISMATCH);
        for i in 0..MATRIX_SIZE {
            for j in 0..MATRIX_SIZE {
                assert_eq!(m.get(i, j), m.get(j, i));
            }
        }
    }

    #[test]
    fn rebuild_is_identical() {
        assert_eq!(ScoringMatrix::new(MATCH, MISMATCH), *ScoringMatrix::shared());
        assert_eq!(ScoringMatrix::new(MATCH, MISMATCH), ScoringMatrix::new(MATCH, MISMATCH));
    }

    #[test]
    fn shared_matrix_built_once() {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                std::thread::spawn(|| ScoringMatrix::shared() as *const ScoringMatrix as usize)
            })
            .collect();
        let addresses: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(addresses.windows(2).all(|w| w[0] == w[1]));
        for _ in 0..100 {
            initialize();
        }
        assert_eq!(shared_build_count(), 1);
    }

    #[test]
    fn custom_scores() {
        let m = ScoringMatrix::new(5, -4);
        assert_eq!(m.score(b'G', b'G'), 5);
        assert_eq!(m.score(b'G', b'C'), -4);
        // -4 + round(9 * sqrt(1/4))
        assert_eq!(m.score(b'G', b'N'), 1);
    }

    proptest! {
        #[test]
        fn prop_symmetric_for_any_bytes(a in any::<u8>(), b in any::<u8>()) {
            let m = ScoringMatrix::shared();
            prop_assert_eq!(m.score(a, b), m.score(b, a));
            prop_assert!(m.score(a, b) <= MATCH && m.score(a, b) >= MISMATCH);
        }
    }
}
