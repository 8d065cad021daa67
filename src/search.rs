//! Bidirectional threshold search.
//!
//! A single-row local scan of the query against a window of the read,
//! sweeping read rows from the end of the window toward its start. After each
//! row the score of the full query anchored at the previous row is checked for
//! a local peak; peaks meeting the percent-identity threshold are reported.
//!
//! Gaps cost [`GAP_OPEN`] per position; there is no separate extension cost
//! in this scan.
//!
//! In *forward* mode (`max_result >= read length`) the whole window is swept
//! and the leftmost qualifying peak wins. In *backward* mode the sweep stops
//! at the first (rightmost) peak starting at or before `max_result`.
//!
//! ### Example
//! ```rust
//! use chromsearch::{NucleotideRead, SearchHit};
//! let read = NucleotideRead::new("ACGATCAGACTGCGAAGATTCCATACAGCG");
//! let fwd = read.search_by_alignment_forward(0, b"CAGACAGCG", 80);
//! let back = read.search_by_alignment_backward(read.len() - 1, b"CAGACAGCG", 80);
//! assert_eq!(fwd.position(), Some(5));
//! assert_eq!(back.position(), Some(21));
//! ```
use crate::common::{min_score, SearchHit};
use crate::iupac;
use crate::read::ReadView;
use crate::scoring::{ScoringMatrix, GAP_OPEN};
use crate::vector::Cell;

/// Search engine owning reusable scratch buffers.
///
/// One `Searcher` per thread; the scoring matrix behind it is shared and
/// read-only.
#[derive(Clone, Debug)]
pub struct Searcher {
    pub(crate) matrix: &'static ScoringMatrix,
    scores: Vec<i32>,
    pub(crate) cells: Vec<Cell>,
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Searcher {
    /// New engine on the shared scoring matrix (built here if needed).
    pub fn new() -> Self {
        Self { matrix: ScoringMatrix::shared(), scores: Vec::new(), cells: Vec::new() }
    }

    /// Search `read[window_start..window_end)` for `query`.
    ///
    /// `max_result < read.len()` selects backward mode: the rightmost hit at
    /// or before `max_result` is returned and the sweep stops there.
    /// Otherwise the leftmost hit in the window is returned. A window end past
    /// the read is clamped to the read length.
    pub fn search<R: ReadView + ?Sized>(
        &mut self,
        read: &R,
        window_start: usize,
        window_end: usize,
        max_result: usize,
        query: &[u8],
        min_percent: i32,
    ) -> SearchHit {
        let across = query.len();
        let window_end = window_end.min(read.len());
        if across == 0 || window_start >= window_end {
            return SearchHit::NoMatch;
        }
        // One extra row on the left for the "nothing consumed yet" boundary.
        let start = window_start - usize::from(window_start != 0);
        let down = window_end - start;

        self.scores.clear();
        self.scores.extend((0..across).map(|x| (across - x) as i32 * GAP_OPEN));

        let matrix = self.matrix;
        let backwards = max_result < read.len();
        let min_score = min_score(across, min_percent);
        let mut prev_score = -1i32;
        let mut prev_score_2 = -1i32;
        let mut best: Option<(usize, i32)> = None;

        for y in (0..down).rev() {
            let row = matrix.row(read.base_at(start + y));
            let mut left = 0i32;
            let mut diagonal = 0i32;
            for x in (0..across).rev() {
                let up = self.scores[x];
                let matched = diagonal + row[iupac::index(query[x])];
                let cell = matched.max(left.max(up) + GAP_OPEN);
                self.scores[x] = cell;
                diagonal = up;
                left = cell;
            }
            let row_score = left;

            // prev_score is a plateau or peak when walking leftward
            if y + 1 < down
                && row_score <= prev_score
                && prev_score >= prev_score_2
                && i64::from(prev_score) >= min_score
                && (!backwards || y < max_result)
            {
                best = Some((y + 1, prev_score));
                if backwards {
                    break;
                }
            }
            prev_score_2 = prev_score;
            prev_score = row_score;
        }

        // flush with the read start; only when row 0 is inside the window
        if best.is_none() && window_start == 0 && i64::from(prev_score) >= min_score {
            best = Some((0, prev_score));
        }

        let hit = match best {
            Some((row, score)) => SearchHit::Match { position: start + row, score },
            None => SearchHit::NoMatch,
        };
        log::trace!(
            "search window {window_start}..{window_end} backwards={backwards} \
             min_score={min_score}: {hit:?}"
        );
        hit
    }
}

/// [`Searcher::search`] with a fresh engine.
pub fn search<R: ReadView + ?Sized>(
    read: &R,
    window_start: usize,
    window_end: usize,
    max_result: usize,
    query: &[u8],
    min_percent: i32,
) -> SearchHit {
    Searcher::new().search(read, window_start, window_end, max_result, query, min_percent)
}

/// Leftmost hit of `query` at or after `start_pos`.
pub fn search_by_alignment_forward<R: ReadView + ?Sized>(
    read: &R,
    start_pos: usize,
    query: &[u8],
    min_percent: i32,
) -> SearchHit {
    let len = read.len();
    search(read, start_pos, len, len, query, min_percent)
}

/// Rightmost hit of `query` starting at or before `start_pos`.
pub fn search_by_alignment_backward<R: ReadView + ?Sized>(
    read: &R,
    start_pos: usize,
    query: &[u8],
    min_percent: i32,
) -> SearchHit {
    let len = read.len();
    if len == 0 {
        return SearchHit::NoMatch;
    }
    search(read, 0, len, start_pos.min(len - 1), query, min_percent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::read::NucleotideRead;
    use proptest::prelude::*;

    const READ: &str = "ACGATCAGACTGCGAAGATTCCATACAGCG";
    const QUERY: &[u8] = b"CAGACAGCG";

    fn read() -> NucleotideRead {
        NucleotideRead::new(READ)
    }

    #[test]
    fn forward_and_backward_recall() {
        let r = read();
        assert_eq!(
            r.search_by_alignment_forward(0, QUERY, 80),
            SearchHit::Match { position: 5, score: 10 }
        );
        assert_eq!(
            r.search_by_alignment_backward(r.len() - 1, QUERY, 80),
            SearchHit::Match { position: 21, score: 10 }
        );
    }

    #[test]
    fn forward_skips_hits_before_start() {
        let r = read();
        assert_eq!(r.search_by_alignment_forward(6, QUERY, 80).position(), Some(21));
        // window widened one base to the left
        assert_eq!(r.search_by_alignment_forward(5, QUERY, 80).position(), Some(5));
    }

    #[test]
    fn backward_respects_limit() {
        let r = read();
        assert_eq!(r.search_by_alignment_backward(20, QUERY, 80).position(), Some(5));
        assert_eq!(r.search_by_alignment_backward(21, QUERY, 80).position(), Some(21));
        assert_eq!(r.search_by_alignment_backward(500, QUERY, 80).position(), Some(21));
    }

    #[test]
    fn window_bounds() {
        let r = read();
        assert_eq!(search(&r, 0, 20, r.len(), QUERY, 80).position(), Some(5));
        assert_eq!(search(&r, 10, 25, r.len(), QUERY, 80), SearchHit::NoMatch);
        assert_eq!(search(&r, 0, 1000, r.len(), QUERY, 80).position(), Some(5));
    }

    #[test]
    fn threshold_rejection() {
        let r = read();
        for pct in [0, 50, 80, 85] {
            assert!(r.search_by_alignment_forward(0, QUERY, pct).is_found(), "{pct}");
        }
        for pct in [88, 90, 100, 150] {
            assert!(!r.search_by_alignment_forward(0, QUERY, pct).is_found(), "{pct}");
            assert!(!r.search_by_alignment_backward(r.len() - 1, QUERY, pct).is_found(), "{pct}");
        }
    }

    #[test]
    fn exact_hit_at_full_identity() {
        let r = read();
        assert_eq!(
            search(&r, 0, r.len(), r.len() - 1, b"CAGACTGCG", 100),
            SearchHit::Match { position: 5, score: 18 }
        );
    }

    #[test]
    fn ambiguity_codes_in_query() {
        let r = read();
        assert_eq!(
            r.search_by_alignment_forward(0, b"CAGRCWGCG", 80),
            SearchHit::Match { position: 5, score: 14 }
        );
        assert_eq!(
            r.search_by_alignment_forward(0, b"NNNNNNNNN", 0),
            SearchHit::Match { position: 1, score: -18 }
        );
    }

    #[test]
    fn hit_at_read_start() {
        let r = NucleotideRead::new("ACGTTGCA");
        assert_eq!(
            r.search_by_alignment_forward(0, b"ACG", 100),
            SearchHit::Match { position: 0, score: 6 }
        );
        let r = NucleotideRead::new("TTTTACGTTGCA");
        assert_eq!(r.search_by_alignment_forward(0, b"ACG", 80).position(), Some(4));
    }

    #[test]
    fn start_fallback_stays_inside_window() {
        let r = NucleotideRead::new("ACGTTTT");
        assert_eq!(search(&r, 0, 7, 7, b"ACG", 80), SearchHit::Match { position: 0, score: 6 });
        assert_eq!(search(&r, 1, 7, 7, b"ACG", 80), SearchHit::NoMatch);
        assert_eq!(r.search_by_alignment_forward(1, b"ACG", 80), SearchHit::NoMatch);
        let r = NucleotideRead::new("CG");
        assert_eq!(search(&r, 1, 2, 2, b"A", 0), SearchHit::NoMatch);
        let r = NucleotideRead::new("TTTTACGTTGCA");
        assert_eq!(r.search_by_alignment_forward(1, b"ACG", 80).position(), Some(4));
    }

    #[test]
    fn degenerate_inputs() {
        let r = read();
        let empty = NucleotideRead::new("");
        assert_eq!(search(&r, 0, r.len(), r.len(), b"", 80), SearchHit::NoMatch);
        assert_eq!(search(&empty, 0, 0, 0, QUERY, 80), SearchHit::NoMatch);
        assert_eq!(search(&r, 12, 12, r.len(), QUERY, 80), SearchHit::NoMatch);
        assert_eq!(empty.search_by_alignment_backward(0, QUERY, 80), SearchHit::NoMatch);
        assert_eq!(empty.search_by_alignment_forward(0, QUERY, 80), SearchHit::NoMatch);
    }

    #[test]
    fn reused_searcher_is_idempotent() {
        let r = read();
        let mut searcher = Searcher::new();
        let first = searcher.search(&r, 0, r.len(), r.len(), QUERY, 80);
        let _ = searcher.search(&r, 0, r.len(), r.len(), b"CAGACAGCGCAGACAGCG", 80);
        let _ = searcher.search(&r, 0, r.len(), r.len(), b"GA", 80);
        let second = searcher.search(&r, 0, r.len(), r.len(), QUERY, 80);
        assert_eq!(first, second);
        assert_eq!(first, search(&r, 0, r.len(), r.len(), QUERY, 80));
    }

    #[test]
    fn bare_slice_read() {
        let r: &[u8] = READ.as_bytes();
        assert_eq!(search_by_alignment_forward(r, 0, QUERY, 80).position(), Some(5));
    }

    proptest! {
        #[test]
        fn prop_hit_inside_window(
            read in "[ACGTN]{1,60}",
            query in "[ACGTRY]{1,12}",
            window_start in 0usize..60,
            span in 1usize..60,
            pct in 0i32..=100,
            backwards in any::<bool>(),
        ) {
            let r = NucleotideRead::new(read.as_bytes());
            let window_start = window_start.min(r.len() - 1);
            let window_end = (window_start + span).min(r.len());
            let max_result = if backwards { window_end.saturating_sub(1) } else { r.len() };
            let hit = search(&r, window_start, window_end, max_result, query.as_bytes(), pct);
            if let SearchHit::Match { position, score } = hit {
                prop_assert!(position >= window_start && position < window_end);
                prop_assert!(i64::from(score) >= min_score(query.len(), pct));
            }
            let again = search(&r, window_start, window_end, max_result, query.as_bytes(), pct);
            prop_assert_eq!(hit, again);
        }
    }
}
