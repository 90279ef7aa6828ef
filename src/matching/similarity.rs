//! String similarity scorers.
//!
//! The default scorer is the Ratcliff/Obershelp "gestalt" ratio: find the
//! longest common block, recurse on the unmatched text left and right of it,
//! and report `2 * matched / (len(a) + len(b))`.
//!
//! ```text
//! "bench press" vs "bench pres"
//!   longest block "bench pres" (10 chars), nothing left to recurse on
//!   ratio = 2 * 10 / (11 + 10) = 0.952
//! ```
//!
//! Identical strings score 1.0 with every scorer, which the resolver relies on
//! for exact catalog names.

use serde::{Deserialize, Serialize};

/// Similarity function used by the fuzzy matcher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scorer {
    /// Ratcliff/Obershelp matching-blocks ratio.
    #[default]
    Gestalt,
    JaroWinkler,
    NormalizedLevenshtein,
}

impl Scorer {
    /// Similarity of `a` and `b` in `[0, 1]`.
    pub fn score(self, a: &str, b: &str) -> f64 {
        match self {
            Scorer::Gestalt => gestalt_ratio(a, b),
            Scorer::JaroWinkler => strsim::jaro_winkler(a, b),
            Scorer::NormalizedLevenshtein => strsim::normalized_levenshtein(a, b),
        }
    }
}

/// Ratcliff/Obershelp similarity over characters.
pub fn gestalt_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matching_chars(&a, &b) as f64 / total as f64
}

/// Total size of the matching blocks between `a` and `b`.
fn matching_chars(a: &[char], b: &[char]) -> usize {
    let mut matched = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];

    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let (i, j, k) = longest_match(a, b, alo, ahi, blo, bhi);
        if k == 0 {
            continue;
        }
        matched += k;
        if alo < i && blo < j {
            pending.push((alo, i, blo, j));
        }
        if i + k < ahi && j + k < bhi {
            pending.push((i + k, ahi, j + k, bhi));
        }
    }

    matched
}

/// Longest common block of `a[alo..ahi]` and `b[blo..bhi]`.
///
/// Ties go to the block that starts earliest in `a`, then earliest in `b`.
fn longest_match(a: &[char], b: &[char], alo: usize, ahi: usize, blo: usize, bhi: usize) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_k) = (alo, blo, 0);
    // run[x + 1] = length of the common run ending at a[i - 1], b[blo + x]
    let mut prev = vec![0usize; bhi - blo + 1];
    let mut cur = vec![0usize; bhi - blo + 1];

    for i in alo..ahi {
        for j in blo..bhi {
            let x = j - blo;
            if a[i] == b[j] {
                let k = prev[x] + 1;
                cur[x + 1] = k;
                if k > best_k {
                    best_i = i + 1 - k;
                    best_j = j + 1 - k;
                    best_k = k;
                }
            } else {
                cur[x + 1] = 0;
            }
        }
        std::mem::swap(&mut prev, &mut cur);
    }

    (best_i, best_j, best_k)
}
