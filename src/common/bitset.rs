use std::fmt;

use itertools::Itertools;
use smallvec::{smallvec, SmallVec};

const WORD_BITS: usize = u64::BITS as usize;

/// Fixed-length bit set.
///
/// Used for the per-column direction vectors of the index ordering check and for
/// the modified-column set of a DML operator. Bits at or beyond `len` are always
/// zero, so word-wise comparisons are exact.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BitSet {
    len: usize,
    words: SmallVec<[u64; 1]>,
}

impl BitSet {
    pub fn new(len: usize) -> Self {
        let word_count = (len + WORD_BITS - 1) / WORD_BITS;
        Self {
            len,
            words: smallvec![0; word_count],
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Sets bit `idx`, returning whether it was already set.
    ///
    /// # Panics
    ///
    /// If `idx` is outside the set.
    pub fn insert(&mut self, idx: usize) -> bool {
        assert!(idx < self.len, "bit {} out of range {}", idx, self.len);
        let (word, mask) = Self::locate(idx);
        let was_set = self.words[word] & mask != 0;
        self.words[word] |= mask;
        was_set
    }

    pub fn contains(&self, idx: usize) -> bool {
        if idx >= self.len {
            return false;
        }
        let (word, mask) = Self::locate(idx);
        self.words[word] & mask != 0
    }

    /// No bit is set.
    pub fn is_clear(&self) -> bool {
        self.words.iter().all(|w| *w == 0)
    }

    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn ones(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.len).filter(move |idx| self.contains(*idx))
    }

    /// Every position in `0..len` differs between `self` and `other`.
    ///
    /// Two sets of different length are never complementary. Two empty sets are
    /// vacuously complementary.
    pub fn is_complement_of(&self, other: &BitSet) -> bool {
        if self.len != other.len {
            return false;
        }

        self.words
            .iter()
            .zip(other.words.iter())
            .enumerate()
            .all(|(word_idx, (a, b))| {
                let mask = self.word_mask(word_idx);
                (a ^ b) & mask == mask
            })
    }

    fn locate(idx: usize) -> (usize, u64) {
        (idx / WORD_BITS, 1u64 << (idx % WORD_BITS))
    }

    /// Mask of the valid bits of word `word_idx`.
    fn word_mask(&self, word_idx: usize) -> u64 {
        let remaining = self.len - word_idx * WORD_BITS;
        if remaining >= WORD_BITS {
            u64::MAX
        } else {
            (1u64 << remaining) - 1
        }
    }
}

impl fmt::Debug for BitSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitSet({}){{{}}}", self.len, self.ones().join(", "))
    }
}

impl fmt::Display for BitSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.ones().join(", "))
    }
}
