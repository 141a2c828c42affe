//! Character-sequence similarity
//!
//! Longest-matching-blocks ratio over Unicode scalar values: find the longest
//! common block, recurse on both sides of it, and score `2 * M / T` where `M`
//! is the matched length and `T` the combined length.

use std::collections::HashMap;

/// Minimum length of `b` before very frequent characters are ignored as
/// match anchors.
const AUTOJUNK_MIN_LEN: usize = 200;

/// A matching block: `a[a_start..a_start + size] == b[b_start..b_start + size]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchBlock {
    pub a_start: usize,
    pub b_start: usize,
    pub size: usize,
}

/// Compares two sequences of chars
pub struct SequenceMatcher {
    a: Vec<char>,
    b: Vec<char>,
    /// char of `b` → ascending positions where it occurs
    b2j: HashMap<char, Vec<usize>>,
}

impl SequenceMatcher {
    pub fn new(a: &str, b: &str) -> Self {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();

        let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, &c) in b.iter().enumerate() {
            b2j.entry(c).or_default().push(j);
        }

        // Characters that make up more than 1% of a long `b` are poor anchors
        let n = b.len();
        if n >= AUTOJUNK_MIN_LEN {
            let popular_cutoff = n / 100 + 1;
            b2j.retain(|_, positions| positions.len() <= popular_cutoff);
        }

        Self { a, b, b2j }
    }

    /// Longest matching block in `a[alo..ahi]` and `b[blo..bhi]`.
    ///
    /// Among equally long blocks the one starting earliest in `a`, then
    /// earliest in `b`, wins.
    fn find_longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> MatchBlock {
        let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0usize);
        let mut j2len: HashMap<usize, usize> = HashMap::new();

        for i in alo..ahi {
            let mut new_j2len: HashMap<usize, usize> = HashMap::new();
            if let Some(positions) = self.b2j.get(&self.a[i]) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = if j > 0 {
                        j2len.get(&(j - 1)).copied().unwrap_or(0) + 1
                    } else {
                        1
                    };
                    new_j2len.insert(j, k);
                    if k > best_size {
                        best_i = i + 1 - k;
                        best_j = j + 1 - k;
                        best_size = k;
                    }
                }
            }
            j2len = new_j2len;
        }

        // Extend through characters dropped as popular anchors
        while best_i > alo && best_j > blo && self.a[best_i - 1] == self.b[best_j - 1] {
            best_i -= 1;
            best_j -= 1;
            best_size += 1;
        }
        while best_i + best_size < ahi
            && best_j + best_size < bhi
            && self.a[best_i + best_size] == self.b[best_j + best_size]
        {
            best_size += 1;
        }

        MatchBlock {
            a_start: best_i,
            b_start: best_j,
            size: best_size,
        }
    }

    /// Non-overlapping matching blocks in increasing order
    pub fn matching_blocks(&self) -> Vec<MatchBlock> {
        let mut queue = vec![(0, self.a.len(), 0, self.b.len())];
        let mut blocks = Vec::new();

        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let block = self.find_longest_match(alo, ahi, blo, bhi);
            if block.size == 0 {
                continue;
            }
            let (i, j, k) = (block.a_start, block.b_start, block.size);
            blocks.push(block);
            if alo < i && blo < j {
                queue.push((alo, i, blo, j));
            }
            if i + k < ahi && j + k < bhi {
                queue.push((i + k, ahi, j + k, bhi));
            }
        }

        blocks.sort_by_key(|b| (b.a_start, b.b_start));
        blocks
    }

    /// Similarity in [0, 1]; two empty strings are identical
    pub fn ratio(&self) -> f64 {
        let matched: usize = self.matching_blocks().iter().map(|b| b.size).sum();
        ratio_of(matched, self.a.len() + self.b.len())
    }

    /// Upper bound on [`ratio`](Self::ratio) from shared character counts
    pub fn quick_ratio(&self) -> f64 {
        let mut available: HashMap<char, usize> = HashMap::new();
        for &c in &self.b {
            *available.entry(c).or_insert(0) += 1;
        }
        let mut matched = 0;
        for c in &self.a {
            if let Some(count) = available.get_mut(c) {
                if *count > 0 {
                    *count -= 1;
                    matched += 1;
                }
            }
        }
        ratio_of(matched, self.a.len() + self.b.len())
    }
}

fn ratio_of(matched: usize, total: usize) -> f64 {
    if total == 0 {
        1.0
    } else {
        2.0 * matched as f64 / total as f64
    }
}

/// Sequence similarity between `a` and `b`
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    SequenceMatcher::new(a, b).ratio()
}

/// Cheap upper bound on [`sequence_ratio`]
pub fn sequence_upper_bound(a: &str, b: &str) -> f64 {
    SequenceMatcher::new(a, b).quick_ratio()
}
