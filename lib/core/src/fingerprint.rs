use serde::{Deserialize, Serialize};

const WORD_BITS: usize = 64;

/// A fixed-length binary fingerprint packed into 64-bit words
///
/// Bits beyond `n_bits` in the last word are always zero, so word-level
/// popcounts never over-count.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint {
    words: Vec<u64>,
    n_bits: usize,
}

impl Fingerprint {
    /// Create an all-zero fingerprint of `n_bits` bits
    #[inline]
    #[must_use]
    pub fn new(n_bits: usize) -> Self {
        Self {
            words: vec![0; n_bits.div_ceil(WORD_BITS)],
            n_bits,
        }
    }

    /// Create a fingerprint with the given bit positions set
    ///
    /// Panics if a position is out of range.
    #[must_use]
    pub fn from_bits<I: IntoIterator<Item = usize>>(n_bits: usize, bits: I) -> Self {
        let mut fp = Self::new(n_bits);
        for bit in bits {
            fp.set(bit);
        }
        fp
    }

    #[inline]
    #[must_use]
    pub fn n_bits(&self) -> usize {
        self.n_bits
    }

    #[inline]
    #[must_use]
    pub fn as_words(&self) -> &[u64] {
        &self.words
    }

    #[inline]
    pub fn set(&mut self, bit: usize) {
        assert!(bit < self.n_bits, "bit {} out of range for {}-bit fingerprint", bit, self.n_bits);
        self.words[bit / WORD_BITS] |= 1u64 << (bit % WORD_BITS);
    }

    #[inline]
    #[must_use]
    pub fn get(&self, bit: usize) -> bool {
        bit < self.n_bits && self.words[bit / WORD_BITS] & (1u64 << (bit % WORD_BITS)) != 0
    }

    /// Number of set bits
    #[inline]
    #[must_use]
    pub fn count_ones(&self) -> u32 {
        self.words.iter().map(|w| w.count_ones()).sum()
    }

    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Iterate over the positions of set bits in ascending order
    pub fn ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().enumerate().flat_map(|(wi, &word)| {
            let mut w = word;
            std::iter::from_fn(move || {
                if w == 0 {
                    return None;
                }
                let tz = w.trailing_zeros() as usize;
                w &= w - 1;
                Some(wi * WORD_BITS + tz)
            })
        })
    }

    /// |A ∩ B| over set bits. Returns 0 for fingerprints of different length.
    #[inline]
    #[must_use]
    pub fn intersection_count(&self, other: &Fingerprint) -> u32 {
        if self.n_bits != other.n_bits {
            return 0;
        }
        // Two accumulators keep the popcount chain short
        let mut acc0 = 0u32;
        let mut acc1 = 0u32;
        let mut pairs = self.words.chunks_exact(2).zip(other.words.chunks_exact(2));
        for (a, b) in &mut pairs {
            acc0 += (a[0] & b[0]).count_ones();
            acc1 += (a[1] & b[1]).count_ones();
        }
        let tail = self.words.len() - self.words.len() % 2;
        for (a, b) in self.words[tail..].iter().zip(&other.words[tail..]) {
            acc0 += (a & b).count_ones();
        }
        acc0 + acc1
    }

    /// Tanimoto coefficient |A ∩ B| / |A ∪ B|
    ///
    /// Defined as 0.0 when both fingerprints are all-zero, and 0.0 when the
    /// lengths differ.
    #[inline]
    pub fn tanimoto(&self, other: &Fingerprint) -> f64 {
        if self.n_bits != other.n_bits {
            return 0.0;
        }
        let both = self.intersection_count(other);
        let union = self.count_ones() + other.count_ones() - both;
        if union == 0 {
            return 0.0;
        }
        both as f64 / union as f64
    }

    /// Dice coefficient 2|A ∩ B| / (|A| + |B|)
    ///
    /// Same zero-vector and length-mismatch conventions as [`Fingerprint::tanimoto`].
    #[inline]
    pub fn dice(&self, other: &Fingerprint) -> f64 {
        if self.n_bits != other.n_bits {
            return 0.0;
        }
        let total = self.count_ones() + other.count_ones();
        if total == 0 {
            return 0.0;
        }
        2.0 * self.intersection_count(other) as f64 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let mut fp = Fingerprint::new(130);
        fp.set(0);
        fp.set(64);
        fp.set(129);
        assert!(fp.get(0));
        assert!(fp.get(64));
        assert!(fp.get(129));
        assert!(!fp.get(1));
        assert!(!fp.get(500));
        assert_eq!(fp.count_ones(), 3);
        assert_eq!(fp.as_words().len(), 3);
    }

    #[test]
    #[should_panic]
    fn test_set_out_of_range() {
        let mut fp = Fingerprint::new(8);
        fp.set(8);
    }

    #[test]
    fn test_ones_iterates_in_order() {
        let fp = Fingerprint::from_bits(200, [150, 3, 64, 63]);
        assert_eq!(fp.ones().collect::<Vec<_>>(), vec![3, 63, 64, 150]);
    }

    #[test]
    fn test_intersection_count_odd_word_count() {
        let a = Fingerprint::from_bits(192, [1, 70, 130, 191]);
        let b = Fingerprint::from_bits(192, [1, 71, 130, 191]);
        assert_eq!(a.intersection_count(&b), 3);
    }

    #[test]
    fn test_tanimoto_and_dice() {
        let a = Fingerprint::from_bits(64, [0, 1, 2, 3]);
        let b = Fingerprint::from_bits(64, [2, 3, 4, 5]);
        // |A∩B| = 2, |A∪B| = 6
        assert!((a.tanimoto(&b) - 2.0 / 6.0).abs() < 1e-12);
        // 2*2 / (4+4)
        assert!((a.dice(&b) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_zero_vectors_score_zero() {
        let a = Fingerprint::new(2048);
        let b = Fingerprint::new(2048);
        assert_eq!(a.tanimoto(&b), 0.0);
        assert_eq!(a.dice(&b), 0.0);
    }

    #[test]
    fn test_length_mismatch_scores_zero() {
        let a = Fingerprint::from_bits(64, [1]);
        let b = Fingerprint::from_bits(128, [1]);
        assert_eq!(a.tanimoto(&b), 0.0);
        assert_eq!(a.dice(&b), 0.0);
        assert_eq!(a.intersection_count(&b), 0);
    }
}
