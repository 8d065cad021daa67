//! Common types shared by the search procedures: the error enum, the tagged
//! search result, parameter structs and the percent-identity threshold.
//!
//! ## Thresholds
//! Every procedure converts a *percent identity* into an absolute minimum
//! score for a query of a given length:
//!
//! ```text
//! min_score = len * GAP_OPEN + len * (MATCH - GAP_OPEN) * min_percent / 100
//! ```
//!
//! so that `min_percent = 100` requires a full-length exact match and
//! `min_percent = 0` accepts a run of gaps. Values outside `0..=100` are
//! accepted and simply make the threshold unreachable or trivially met.
//!
//! ## Examples
//! ```rust
//! use chromsearch::{min_score, SearchHit};
//! assert_eq!(min_score(10, 100), 20);
//! assert_eq!(min_score(10, 0), -40);
//! assert!(!SearchHit::NoMatch.is_found());
//! ```

use crate::scoring::{GAP_OPEN, MATCH};

/// Errors that can be returned by the read container and its helpers.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ChromError {
    /// Returned when a quality value exceeds the Phred ceiling of 93.
    #[error("quality {value} at position {position} exceeds the maximum of 93")]
    QualityOutOfRange { position: usize, value: u8 },
    /// Returned when a Phred+33 quality string holds a non-printable character.
    #[error("invalid Phred+33 quality character {found:?} at position {position}")]
    InvalidQualityChar { position: usize, found: char },
}

/// Outcome of one search.
///
/// A search reports only where the best qualifying alignment lies and how it
/// scored; there is no trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SearchHit {
    /// No position reached the threshold.
    #[default]
    NoMatch,
    /// Best qualifying position (0-based read coordinate) and its score.
    Match { position: usize, score: i32 },
}

impl SearchHit {
    /// `true` for [`SearchHit::Match`].
    pub fn is_found(&self) -> bool {
        matches!(self, SearchHit::Match { .. })
    }

    /// Reported read position, if any.
    pub fn position(&self) -> Option<usize> {
        match *self {
            SearchHit::Match { position, .. } => Some(position),
            SearchHit::NoMatch => None,
        }
    }

    /// Reported score, if any.
    pub fn score(&self) -> Option<i32> {
        match *self {
            SearchHit::Match { score, .. } => Some(score),
            SearchHit::NoMatch => None,
        }
    }
}

/// Parameters for the threshold searches (`find` in the CLI).
#[derive(Clone, Debug)]
pub struct AlignParams {
    /// Percent of the best possible score a hit must reach.
    pub min_percent: i32,
}

impl Default for AlignParams {
    fn default() -> Self {
        Self { min_percent: 80 }
    }
}

/// Parameters for the quality-weighted vector searches.
#[derive(Clone, Debug)]
pub struct VectorParams {
    /// Percent of the best possible score a hit must reach.
    pub min_percent: i32,
    /// Number of query bases the threshold is computed over; also the
    /// shortest overlap before a candidate is considered.
    pub min_match: usize,
}

impl Default for VectorParams {
    fn default() -> Self {
        Self { min_percent: 50, min_match: 11 }
    }
}

/// Absolute minimum score for a query of `length` bases at `min_percent`.
///
/// Integer arithmetic with truncating division, computed in `i64` so that
/// absurd percentages cannot overflow.
pub fn min_score(length: usize, min_percent: i32) -> i64 {
    let length = length as i64;
    let gap_open = i64::from(GAP_OPEN);
    length * gap_open + length * (i64::from(MATCH) - gap_open) * i64::from(min_percent) / 100
}
