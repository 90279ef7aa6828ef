//! Exercise name matching.
//!
//! Resolution maps a noisy, user-typed exercise name onto a catalog entry:
//!
//! ```text
//! raw name ── normalize ──┬─ top_matches(canonical names, 0.95 ↘ 0.50) ── hit? ──▶ candidates
//!                         │                                               │
//!                         │                                               └ none
//!                         └─ top_matches(names + aliases, 0.80 ↘ 0.50) ── hit? ──▶ candidates
//!                                                                          │
//!                                                                          └ none ──▶ []
//! ```
//!
//! - `normalize.rs`: case folding and the compact line form used by the
//!   detail extractor.
//! - `similarity.rs`: string scorers (gestalt ratio by default).
//! - `fuzzy.rs`: the threshold-backoff top-N matcher.
//! - `alias.rs`: the alias index and the two-tier resolver.

#[path = "matching/alias.rs"]
pub mod alias;
#[path = "matching/fuzzy.rs"]
pub mod fuzzy;
#[path = "matching/normalize.rs"]
pub mod normalize;
#[path = "matching/similarity.rs"]
pub mod similarity;

pub use alias::{AliasIndex, CanonicalRef, Resolver, resolve};
pub use fuzzy::{Cutoffs, ScoredCandidate, top_matches};
pub use normalize::{compact, compact_cased, normalize};
pub use similarity::{Scorer, gestalt_ratio};

use serde::{Deserialize, Serialize};

/// Thresholds and scorer used by the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Starting cutoff when matching against canonical names.
    pub canonical_cutoff: f64,
    /// Starting cutoff when matching against the full alias vocabulary.
    pub alias_cutoff: f64,
    /// Amount the cutoff is lowered after a tier without hits.
    pub step: f64,
    /// Lowest cutoff tried before giving up.
    pub min_cutoff: f64,
    pub max_results: usize,
    pub scorer: Scorer,
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            canonical_cutoff: 0.95,
            alias_cutoff: 0.80,
            step: 0.05,
            min_cutoff: 0.5,
            max_results: 3,
            scorer: Scorer::Gestalt,
        }
    }
}

impl MatchConfig {
    pub(crate) fn cutoffs(&self, initial: f64) -> Cutoffs {
        Cutoffs { initial, step: self.step, min: self.min_cutoff, max_results: self.max_results }
    }
}
