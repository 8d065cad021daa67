//! Read access for the search engine and a read-only nucleotide read.
//!
//! The searches only ever look at a read through [`ReadView`]: a length, a
//! base at a position, and a quality with the caller-side default already
//! substituted. [`NucleotideRead`] is the container used by the CLI and the
//! tests; a bare `[u8]` also works as a read with no recorded qualities.
//!
//! ## Qualities
//! Qualities are Phred scores in `0..=93`. Values of 0 or 1 mean "not
//! recorded" and read back as [`DEFAULT_BASE_QUALITY`].
use crate::common::{ChromError, SearchHit};
use crate::iupac;
use crate::search;

/// Quality reported for positions with no recorded quality.
pub const DEFAULT_BASE_QUALITY: u8 = 40;

/// Highest Phred quality a read may carry.
pub const MAX_QUALITY: u8 = 93;

/// Read-only accessor the search procedures consume.
pub trait ReadView {
    /// Number of bases.
    fn len(&self) -> usize;

    /// Base byte at `pos`. Any byte is legal; unknown symbols score as
    /// undefined.
    fn base_at(&self, pos: usize) -> u8;

    /// Quality at `pos` with the default substituted for unrecorded values.
    /// Must be non-zero.
    fn quality_or_default(&self, pos: usize) -> u32;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ReadView for [u8] {
    fn len(&self) -> usize {
        <[u8]>::len(self)
    }

    fn base_at(&self, pos: usize) -> u8 {
        self[pos]
    }

    fn quality_or_default(&self, _pos: usize) -> u32 {
        u32::from(DEFAULT_BASE_QUALITY)
    }
}

/// Per-symbol tallies from [`NucleotideRead::base_counts`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BaseCounts {
    pub a: usize,
    pub c: usize,
    pub g: usize,
    /// `T` and `U` together.
    pub t: usize,
    /// Ambiguity codes and anything else.
    pub other: usize,
}

/// A nucleotide read with one quality per base.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NucleotideRead {
    name: Option<String>,
    bases: Vec<u8>,
    qualities: Vec<u8>,
}

impl NucleotideRead {
    /// Read with no recorded qualities.
    pub fn new(bases: impl Into<Vec<u8>>) -> Self {
        let bases = bases.into();
        let qualities = vec![0; bases.len()];
        Self { name: None, bases, qualities }
    }

    /// Read with qualities. Missing trailing qualities are filled with 0
    /// ("not recorded"); surplus ones are dropped.
    pub fn with_qualities(
        bases: impl Into<Vec<u8>>,
        qualities: impl Into<Vec<u8>>,
    ) -> Result<Self, ChromError> {
        let bases = bases.into();
        let mut qualities = qualities.into();
        let out_of_range = qualities.iter().enumerate().find(|&(_, &q)| q > MAX_QUALITY);
        if let Some((position, &value)) = out_of_range {
            return Err(ChromError::QualityOutOfRange { position, value });
        }
        qualities.resize(bases.len(), 0);
        Ok(Self { name: None, bases, qualities })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn bases(&self) -> &[u8] {
        &self.bases
    }

    pub fn qualities(&self) -> &[u8] {
        &self.qualities
    }

    pub fn len(&self) -> usize {
        self.bases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    /// `true` if at least one quality was actually recorded.
    pub fn has_valid_quality(&self) -> bool {
        self.qualities.iter().any(|&q| q > 1)
    }

    pub fn base_counts(&self) -> BaseCounts {
        let mut counts = BaseCounts::default();
        for &b in &self.bases {
            match iupac::uppercase(b) {
                b'A' => counts.a += 1,
                b'C' => counts.c += 1,
                b'G' => counts.g += 1,
                b'T' | b'U' => counts.t += 1,
                _ => counts.other += 1,
            }
        }
        counts
    }

    /// GC content in percent. `S` counts as GC and `W` as AT; other
    /// ambiguity codes are ignored. Zero when neither class is present.
    pub fn percent_gc(&self) -> f32 {
        let (mut gc, mut at) = (0usize, 0usize);
        for &b in &self.bases {
            match iupac::uppercase(b) {
                b'A' | b'T' | b'U' | b'W' => at += 1,
                b'C' | b'G' | b'S' => gc += 1,
                _ => {}
            }
        }
        gc as f32 * 100.0 / (gc + at).max(1) as f32
    }

    /// Reverse complement; qualities follow their bases.
    pub fn reverse_complemented(&self) -> Self {
        Self {
            name: self.name.clone(),
            bases: self.bases.iter().rev().map(|&b| iupac::complement(b)).collect(),
            qualities: self.qualities.iter().rev().copied().collect(),
        }
    }

    pub fn is_redundant(&self, pos: usize) -> bool {
        iupac::is_redundant(self.bases[pos])
    }

    /// First `N` at or after `start_pos`.
    pub fn find_next_n(&self, start_pos: usize) -> Option<usize> {
        self.bases
            .iter()
            .enumerate()
            .skip(start_pos)
            .find(|&(_, &b)| iupac::uppercase(b) == b'N')
            .map(|(i, _)| i)
    }

    /// First ambiguity code at or after `start_pos`.
    pub fn find_next_redundant(&self, start_pos: usize) -> Option<usize> {
        (start_pos..self.len()).find(|&i| self.is_redundant(i))
    }

    /// Leftmost exact IUPAC match of `query` starting at or after
    /// `start_pos`. With `both_strands`, the reverse complement of the query
    /// is tried at each position too.
    pub fn search_sequence_forward(
        &self,
        start_pos: usize,
        query: &[u8],
        both_strands: bool,
    ) -> Option<usize> {
        let last = self.len().checked_sub(query.len())?;
        (start_pos..=last).find(|&pos| self.match_sequence(pos, query, both_strands))
    }

    /// Rightmost exact IUPAC match of `query` starting at or before
    /// `start_pos`.
    pub fn search_sequence_backward(
        &self,
        start_pos: usize,
        query: &[u8],
        both_strands: bool,
    ) -> Option<usize> {
        let last = self.len().checked_sub(query.len())?;
        (0..=start_pos.min(last)).rev().find(|&pos| self.match_sequence(pos, query, both_strands))
    }

    fn match_sequence(&self, pos: usize, query: &[u8], both_strands: bool) -> bool {
        let window = &self.bases[pos..pos + query.len()];
        let forward = window.iter().zip(query).all(|(&b, &q)| iupac::base_match(b, q));
        forward
            || (both_strands
                && window
                    .iter()
                    .zip(query.iter().rev())
                    .all(|(&b, &q)| iupac::base_match(b, iupac::complement(q))))
    }

    /// Leftmost alignment hit of `query` at or after `start_pos`.
    pub fn search_by_alignment_forward(
        &self,
        start_pos: usize,
        query: &[u8],
        min_percent: i32,
    ) -> SearchHit {
        search::search_by_alignment_forward(self, start_pos, query, min_percent)
    }

    /// Rightmost alignment hit of `query` starting at or before `start_pos`.
    pub fn search_by_alignment_backward(
        &self,
        start_pos: usize,
        query: &[u8],
        min_percent: i32,
    ) -> SearchHit {
        search::search_by_alignment_backward(self, start_pos, query, min_percent)
    }
}

impl ReadView for NucleotideRead {
    fn len(&self) -> usize {
        self.bases.len()
    }

    fn base_at(&self, pos: usize) -> u8 {
        self.bases[pos]
    }

    fn quality_or_default(&self, pos: usize) -> u32 {
        let q = self.qualities[pos];
        u32::from(if q > 1 { q } else { DEFAULT_BASE_QUALITY })
    }
}

/// Decode a Phred+33 quality string (FASTQ encoding).
pub fn qualities_from_phred33(text: &str) -> Result<Vec<u8>, ChromError> {
    text.chars()
        .enumerate()
        .map(|(position, c)| match c {
            '!'..='~' => Ok(c as u8 - b'!'),
            found => Err(ChromError::InvalidQualityChar { position, found }),
        })
        .collect()
}
