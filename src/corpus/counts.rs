use fnv::FnvHashMap;
use itertools::Itertools;
use sha2::{Digest, Sha256};

/// Integer n-gram counters. Merging is plain addition, so the result of a
/// map-reduce over chunks does not depend on chunk or merge order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NgramCounts {
    pub chars: FnvHashMap<char, u64>,
    pub bigrams: FnvHashMap<(char, char), u64>,
    pub trigrams: FnvHashMap<(char, char, char), u64>,
}

impl NgramCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts every n-gram whose first character sits at a position in
    /// `start..end`. Windows may read past `end` but never past the segment.
    pub fn count_segment(&mut self, segment: &[char], start: usize, end: usize) {
        let end = end.min(segment.len());
        for i in start..end {
            *self.chars.entry(segment[i]).or_default() += 1;

            if i + 1 < segment.len() {
                *self.bigrams.entry((segment[i], segment[i + 1])).or_default() += 1;
            }
            if i + 2 < segment.len() {
                *self
                    .trigrams
                    .entry((segment[i], segment[i + 1], segment[i + 2]))
                    .or_default() += 1;
            }
        }
    }

    pub fn merge_from(&mut self, other: &NgramCounts) {
        for (&c, &n) in &other.chars {
            *self.chars.entry(c).or_default() += n;
        }
        for (&b, &n) in &other.bigrams {
            *self.bigrams.entry(b).or_default() += n;
        }
        for (&t, &n) in &other.trigrams {
            *self.trigrams.entry(t).or_default() += n;
        }
    }

    /// Consuming merge, folding the smaller table into the larger one.
    pub fn merge(self, other: NgramCounts) -> NgramCounts {
        let (mut big, small) = if self.chars.len() >= other.chars.len() {
            (self, other)
        } else {
            (other, self)
        };
        big.merge_from(&small);
        big
    }

    pub fn total_chars(&self) -> u64 {
        self.chars.values().sum()
    }

    pub fn total_bigrams(&self) -> u64 {
        self.bigrams.values().sum()
    }

    pub fn total_trigrams(&self) -> u64 {
        self.trigrams.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_chars() == 0
    }

    /// SHA-256 over the sorted tables. Identical counts always hash identically.
    pub fn content_hash(&self) -> String {
        let mut hasher = Sha256::new();

        for (c, n) in self.chars.iter().sorted() {
            hasher.update(format!("1\t{}\t{}\n", c, n).as_bytes());
        }
        for ((a, b), n) in self.bigrams.iter().sorted() {
            hasher.update(format!("2\t{}{}\t{}\n", a, b, n).as_bytes());
        }
        for ((a, b, c), n) in self.trigrams.iter().sorted() {
            hasher.update(format!("3\t{}{}{}\t{}\n", a, b, c, n).as_bytes());
        }

        hex::encode(hasher.finalize())
    }
}
