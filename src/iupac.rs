//! IUPAC nucleotide ambiguity codes.
//!
//! Each of the 15 codes stands for a non-empty subset of {A,C,G,T}, stored as
//! a 4-bit flag set (`T=1, C=2, A=4, G=8`) and a dense index `0..=14` in the
//! order `A B C D G H K M N R S T V W Y`. Every other byte maps to
//! [`UNDEFINED_INDEX`] and an empty flag set. Lookups are case-insensitive and
//! `U` is treated as `T`.
//!
//! All tables are built at compile time.

/// Number of defined ambiguity codes.
pub const CODE_COUNT: usize = 15;

/// Dense index for any byte that is not an ambiguity code.
pub const UNDEFINED_INDEX: usize = 15;

/// Codes in dense-index order with the bases each one represents.
pub const CODES: [(u8, &str); CODE_COUNT] = [
    (b'A', "A"),
    (b'B', "CGT"),
    (b'C', "C"),
    (b'D', "AGT"),
    (b'G', "G"),
    (b'H', "ACT"),
    (b'K', "GT"),
    (b'M', "AC"),
    (b'N', "ACGT"),
    (b'R', "AG"),
    (b'S', "CG"),
    (b'T', "T"),
    (b'V', "ACG"),
    (b'W', "AT"),
    (b'Y', "CT"),
];

const fn base_bit(base: u8) -> u8 {
    match base {
        b'T' => 1,
        b'C' => 2,
        b'A' => 4,
        b'G' => 8,
        _ => 0,
    }
}

const fn code_flags(bases: &str) -> u8 {
    let bytes = bases.as_bytes();
    let mut flags = 0u8;
    let mut i = 0;
    while i < bytes.len() {
        flags |= base_bit(bytes[i]);
        i += 1;
    }
    flags
}

const INDEX_TABLE: [u8; 256] = {
    let mut table = [UNDEFINED_INDEX as u8; 256];
    let mut i = 0;
    while i < CODE_COUNT {
        let symbol = CODES[i].0;
        table[symbol as usize] = i as u8;
        table[symbol.to_ascii_lowercase() as usize] = i as u8;
        i += 1;
    }
    table[b'U' as usize] = table[b'T' as usize];
    table[b'u' as usize] = table[b'T' as usize];
    table
};

const FLAG_TABLE: [u8; 256] = {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < CODE_COUNT {
        let (symbol, bases) = CODES[i];
        let flags = code_flags(bases);
        table[symbol as usize] = flags;
        table[symbol.to_ascii_lowercase() as usize] = flags;
        i += 1;
    }
    table[b'U' as usize] = table[b'T' as usize];
    table[b'u' as usize] = table[b'T' as usize];
    table
};

const COMPLEMENT_TABLE: [u8; 256] = {
    //                     ABCDEFGHIJKLMNOPQRSTUVWXYZ
    const ALPHABETIC: &[u8; 26] = b"TVGHEFCDIJMLKNOPQYSAABWXRZ";
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = i as u8;
        i += 1;
    }
    let mut i = 0;
    while i < 26 {
        let upper = b'A' + i as u8;
        table[upper as usize] = ALPHABETIC[i];
        table[upper.to_ascii_lowercase() as usize] = ALPHABETIC[i].to_ascii_lowercase();
        i += 1;
    }
    table
};

/// Dense index of `base` (`0..=14`), or [`UNDEFINED_INDEX`].
#[inline]
pub fn index(base: u8) -> usize {
    INDEX_TABLE[base as usize] as usize
}

/// 4-bit base subset of `base`; zero for anything that is not a code.
#[inline]
pub fn flags(base: u8) -> u8 {
    FLAG_TABLE[base as usize]
}

/// Number of bases `base` stands for.
#[inline]
pub fn base_count(base: u8) -> u32 {
    flags(base).count_ones()
}

#[inline]
pub fn uppercase(base: u8) -> u8 {
    base.to_ascii_uppercase()
}

/// IUPAC complement, preserving case. Non-letters are returned unchanged.
#[inline]
pub fn complement(base: u8) -> u8 {
    COMPLEMENT_TABLE[base as usize]
}

/// `true` when every base `base` may stand for is also allowed by `query`.
///
/// A byte with no flags (gap, `X`, punctuation) matches any query.
#[inline]
pub fn base_match(base: u8, query: u8) -> bool {
    let f = flags(base);
    f & flags(query) == f
}

/// `true` for codes standing for more than one base.
#[inline]
pub fn is_redundant(base: u8) -> bool {
    let f = flags(base);
    f & f.wrapping_sub(1) != 0
}

/// Code symbol at a dense index, or `None` for [`UNDEFINED_INDEX`] and beyond.
pub fn symbol(index: usize) -> Option<u8> {
    CODES.get(index).map(|&(s, _)| s)
}
