//! Top-N fuzzy matching with threshold backoff.
//!
//! Every candidate is scored once. The cutoff then walks down in tiers
//! (`initial`, `initial - step`, ... down to `min`) and the first tier with at
//! least one candidate wins:
//!
//! ```text
//! scores: [0.62, 0.91, 0.58]      initial 0.95, step 0.05, min 0.5
//!   0.95 -> none
//!   0.90 -> [0.91]                <- returned
//! ```
//!
//! A lower tier is only reached when every higher tier was empty, so weak
//! candidates never appear next to a strong one that cleared an earlier tier.
//! Within a tier candidates are sorted by score, descending; equal scores keep
//! candidate-pool order.

use super::normalize::normalize;
use super::similarity::Scorer;

const TIER_EPSILON: f64 = 1e-9;
/// Upper bound on tiers tried, whatever the schedule.
pub const MAX_TIERS: usize = 1_000;

/// Backoff schedule and result limit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cutoffs {
    pub initial: f64,
    pub step: f64,
    pub min: f64,
    pub max_results: usize,
}

impl Default for Cutoffs {
    fn default() -> Self {
        Cutoffs { initial: 0.80, step: 0.05, min: 0.5, max_results: 3 }
    }
}

impl Cutoffs {
    pub fn starting_at(initial: f64) -> Self {
        Cutoffs { initial, ..Cutoffs::default() }
    }

    /// Cutoff values tried, strictest first.
    ///
    /// Tiers are computed as `initial - k * step` rather than by repeated
    /// subtraction so float drift cannot drop the `min` tier. A NaN bound
    /// yields no tiers, a non-positive or NaN step a single one, and no
    /// schedule yields more than [`MAX_TIERS`].
    pub fn tiers(&self) -> impl Iterator<Item = f64> {
        let Cutoffs { initial, step, min, .. } = *self;
        let span = ((initial - min) / step + TIER_EPSILON).floor();
        let count = if initial.is_nan() || min.is_nan() || initial < min - TIER_EPSILON {
            0
        } else if step.is_nan() || step <= 0.0 {
            1
        } else if span.is_nan() {
            0
        } else {
            span.min((MAX_TIERS - 1) as f64) as usize + 1
        };
        (0..count).map(move |k| initial - k as f64 * step)
    }
}

/// A scored candidate, pointing back into the candidate pool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredCandidate<'a> {
    /// Position in the candidate pool.
    pub index: usize,
    pub candidate: &'a str,
    pub score: f64,
}

/// Best matches of `query` among `candidates`, at most `cutoffs.max_results`.
///
/// Query and candidates are compared in [`normalize`]d form; the returned
/// `candidate` is the original string.
pub fn top_matches<'a, I>(query: &str, candidates: I, cutoffs: Cutoffs, scorer: Scorer) -> Vec<ScoredCandidate<'a>>
where
    I: IntoIterator<Item = &'a str>,
{
    let query = normalize(query);
    let scored: Vec<ScoredCandidate<'a>> = candidates
        .into_iter()
        .enumerate()
        .map(|(index, candidate)| ScoredCandidate {
            index,
            candidate,
            score: scorer.score(&query, &normalize(candidate)),
        })
        .collect();

    for cutoff in cutoffs.tiers() {
        let mut hits: Vec<ScoredCandidate<'a>> = scored.iter().copied().filter(|c| c.score >= cutoff).collect();
        if hits.is_empty() {
            continue;
        }
        // `sort_by` is stable: equal scores keep pool order.
        hits.sort_by(|a, b| b.score.total_cmp(&a.score));
        hits.truncate(cutoffs.max_results);
        tracing::trace!(query = %query, cutoff, hits = hits.len(), "fuzzy tier matched");
        return hits;
    }

    Vec::new()
}
