//! Quality-weighted vector searches.
//!
//! Used to find leading (5′) or trailing (3′) vector/adapter sequence in a
//! read. Both scans are local affine-gap DPs where every substitution and gap
//! at read position `y` is multiplied by that position's quality (a fixed
//! low weight for `N` calls). Each cell also accumulates the weights along
//! its path, and a candidate is scored by the *average* `score / weight` so
//! that a short confident run and a long noisy run compare fairly.
//!
//! - [`Searcher::vector_search_5`] scans the read start to end and reports the
//!   read position where the query's **last** base aligns (the vector end).
//! - [`Searcher::vector_search_3`] scans `read[start_pos..]` end to start and
//!   reports the position where the query's **first** base aligns (the vector
//!   start), in read coordinates.
//!
//! The threshold is computed over `min_match` bases rather than the full
//! query, and candidates are only considered once `min(query, min_match)`
//! rows have been scanned.
//!
//! ### Example
//! ```rust
//! use chromsearch::{vector_search_5, vector_search_3, NucleotideRead, SearchHit};
//! let read = NucleotideRead::new("ACGTTGCAGGATCCTTAA");
//! let hit = vector_search_5(&read, b"ACGTTGCA", 50, 8);
//! assert_eq!(hit, SearchHit::Match { position: 7, score: 2 });
//! let read = NucleotideRead::new("GGATCCTTAAACGTTGCA");
//! let hit = vector_search_3(&read, 0, b"ACGTTGCA", 50, 8);
//! assert_eq!(hit, SearchHit::Match { position: 10, score: 2 });
//! ```
use crate::common::{min_score, SearchHit};
use crate::iupac;
use crate::read::ReadView;
use crate::scoring::{GAP_EXTEND, GAP_OPEN};
use crate::search::Searcher;

/// Weight used for `N` calls regardless of their recorded quality.
pub const N_QUALITY: u32 = 5;

/// Cost applied to the next gap step taken from a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum GapState {
    Open,
    Extend,
}

impl GapState {
    fn penalty(self) -> i64 {
        i64::from(match self {
            GapState::Open => GAP_OPEN,
            GapState::Extend => GAP_EXTEND,
        })
    }
}

/// Weighted DP cell. `quality` sums the weights along the cell's path and is
/// never zero.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Cell {
    score: i64,
    quality: i64,
    gap: GapState,
}

impl Cell {
    fn average(&self) -> i64 {
        self.score / self.quality
    }
}

fn row_weight<R: ReadView + ?Sized>(read: &R, pos: usize) -> i64 {
    let quality = if iupac::uppercase(read.base_at(pos)) == b'N' {
        N_QUALITY
    } else {
        read.quality_or_default(pos)
    };
    i64::from(quality.max(1))
}

/// One cell of the weighted recurrence.
///
/// `up` is the cell's value from the previous row, `neighbour` the cell just
/// computed in this row, `diagonal` the previous-row value of that neighbour.
/// `forced` takes the neighbour (gap) transition unconditionally before the
/// diagonal comparison.
fn advance(
    up: Cell,
    neighbour: Cell,
    diagonal: Cell,
    substitution: i64,
    weight: i64,
    forced: bool,
) -> Cell {
    let diagonal_score = diagonal.score + substitution;
    let across_score = neighbour.score + neighbour.gap.penalty() * weight;

    let mut cell = Cell {
        score: up.score + up.gap.penalty() * weight,
        quality: up.quality + weight,
        gap: GapState::Extend,
    };
    if cell.score < across_score || forced {
        cell.score = across_score;
        cell.quality = neighbour.quality + weight;
    }
    if cell.score < diagonal_score {
        cell = Cell {
            score: diagonal_score,
            quality: diagonal.quality + weight,
            gap: GapState::Open,
        };
    }
    cell
}

/// Tracks the best candidate; only strict improvements over -1 are kept.
struct Best {
    score: i64,
    position: Option<usize>,
    min_score: i64,
}

impl Best {
    fn new(min_score: i64) -> Self {
        Self { score: -1, position: None, min_score }
    }

    fn offer(&mut self, score: i64, position: usize) {
        if self.score < score && score >= self.min_score {
            self.score = score;
            self.position = Some(position);
        }
    }

    fn into_hit(self) -> SearchHit {
        match self.position {
            // averages lie between GAP_EXTEND and MATCH
            Some(position) => SearchHit::Match { position, score: self.score as i32 },
            None => SearchHit::NoMatch,
        }
    }
}

impl Searcher {
    fn seed_cells(&mut self, query: &[u8], base: u8, weight: i64) {
        let row = self.matrix.row(base);
        self.cells.clear();
        self.cells.extend(query.iter().map(|&q| Cell {
            score: i64::from(row[iupac::index(q)]) * weight,
            quality: weight,
            gap: GapState::Open,
        }));
    }

    /// Find leading vector sequence; see the [module docs](self).
    pub fn vector_search_5<R: ReadView + ?Sized>(
        &mut self,
        read: &R,
        query: &[u8],
        min_percent: i32,
        min_match: usize,
    ) -> SearchHit {
        let across = query.len();
        if across == 0 || read.is_empty() {
            return SearchHit::NoMatch;
        }
        let Some(first) = across.min(min_match).checked_sub(1) else {
            return SearchHit::NoMatch;
        };
        let last = across - 1;

        let matrix = self.matrix;
        self.seed_cells(query, read.base_at(0), row_weight(read, 0));
        let mut best = Best::new(min_score(min_match, min_percent));

        for y in 1..read.len() {
            let row = matrix.row(read.base_at(y));
            let weight = row_weight(read, y);
            let cells = &mut self.cells;

            let mut diagonal = cells[0];
            cells[0].score = i64::from(row[iupac::index(query[0])]) * weight;
            cells[0].quality = weight;

            for x in 1..across {
                let up = cells[x];
                let substitution = i64::from(row[iupac::index(query[x])]) * weight;
                cells[x] = advance(up, cells[x - 1], diagonal, substitution, weight, x == last);
                diagonal = up;
            }

            if y >= first {
                best.offer(cells[last].average(), y);
            }
        }

        let hit = best.into_hit();
        log::trace!("vector_search_5 query_len={across} min_match={min_match}: {hit:?}");
        hit
    }

    /// Find trailing vector sequence in `read[start_pos..]`; see the
    /// [module docs](self).
    ///
    /// The reported position is a read coordinate, not an offset from
    /// `start_pos`: a vector starting 2 bases into `read[4..]` is reported
    /// at 6.
    pub fn vector_search_3<R: ReadView + ?Sized>(
        &mut self,
        read: &R,
        start_pos: usize,
        query: &[u8],
        min_percent: i32,
        min_match: usize,
    ) -> SearchHit {
        let across = query.len();
        if across == 0 || start_pos >= read.len() {
            return SearchHit::NoMatch;
        }
        let down = read.len() - start_pos;
        let first = down as isize - across.min(min_match) as isize;
        let last = across - 1;

        let matrix = self.matrix;
        let tail = start_pos + down - 1;
        self.seed_cells(query, read.base_at(tail), row_weight(read, tail));
        let mut best = Best::new(min_score(min_match, min_percent));

        for y in (0..down - 1).rev() {
            let pos = start_pos + y;
            let row = matrix.row(read.base_at(pos));
            let weight = row_weight(read, pos);
            let cells = &mut self.cells;

            let mut diagonal = cells[last];
            cells[last].score = i64::from(row[iupac::index(query[last])]) * weight;
            cells[last].quality = weight;

            for x in (0..last).rev() {
                let up = cells[x];
                let substitution = i64::from(row[iupac::index(query[x])]) * weight;
                cells[x] = advance(up, cells[x + 1], diagonal, substitution, weight, x == 0);
                diagonal = up;
            }

            if y as isize <= first {
                best.offer(cells[0].average(), pos);
            }
        }

        let hit = best.into_hit();
        log::trace!(
            "vector_search_3 start={start_pos} query_len={across} min_match={min_match}: {hit:?}"
        );
        hit
    }
}

/// [`Searcher::vector_search_5`] with a fresh engine.
pub fn vector_search_5<R: ReadView + ?Sized>(
    read: &R,
    query: &[u8],
    min_percent: i32,
    min_match: usize,
) -> SearchHit {
    Searcher::new().vector_search_5(read, query, min_percent, min_match)
}

/// [`Searcher::vector_search_3`] with a fresh engine.
pub fn vector_search_3<R: ReadView + ?Sized>(
    read: &R,
    start_pos: usize,
    query: &[u8],
    min_percent: i32,
    min_match: usize,
) -> SearchHit {
    Searcher::new().vector_search_3(read, start_pos, query, min_percent, min_match)
}
