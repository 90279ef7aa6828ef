//! Alias index and two-tier name resolution.
//!
//! Canonical names are the most trusted signal, so they are tried first with
//! a strict starting cutoff. Only when no canonical name clears even the
//! floor does the resolver fall back to the whole vocabulary (canonical names
//! plus aliases) with a looser starting cutoff; an alias hit is reported as
//! its canonical exercise.

use super::fuzzy::top_matches;
use super::normalize::normalize;
use super::MatchConfig;
use crate::catalog::{CatalogEntry, ExerciseId};
use crate::error::ProcessError;
use crate::MatchCandidate;
use indexmap::IndexMap;

/// Canonical identity a name or alias points to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanonicalRef<'c> {
    pub name: &'c str,
    pub id: &'c ExerciseId,
}

/// Normalized name/alias → canonical identity, in catalog order.
///
/// When two entries claim the same normalized key the later entry wins the
/// value while the key keeps its first position.
#[derive(Debug, Clone)]
pub struct AliasIndex<'c> {
    canonical_names: Vec<&'c str>,
    keys: IndexMap<String, CanonicalRef<'c>>,
}

impl<'c> AliasIndex<'c> {
    pub fn build(catalog: &'c [CatalogEntry]) -> Result<Self, ProcessError> {
        let mut keys = IndexMap::with_capacity(catalog.len() * 3);
        let mut canonical_names = Vec::with_capacity(catalog.len());

        for (index, entry) in catalog.iter().enumerate() {
            let key = normalize(&entry.name);
            if key.is_empty() {
                return Err(ProcessError::MalformedCatalogEntry { index, id: entry.id.to_string() });
            }

            let target = CanonicalRef { name: entry.name.as_str(), id: &entry.id };
            canonical_names.push(entry.name.as_str());
            keys.insert(key, target);

            for alias in entry.aliases() {
                let alias = normalize(alias);
                if !alias.is_empty() {
                    keys.insert(alias, target);
                }
            }
        }

        Ok(AliasIndex { canonical_names, keys })
    }

    /// Canonical name of every entry, in catalog order.
    pub fn canonical_names(&self) -> &[&'c str] {
        &self.canonical_names
    }

    /// Every normalized name and alias, in first-insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.keys().map(String::as_str)
    }

    /// Look up a name or alias; `key` is normalized first.
    pub fn get(&self, key: &str) -> Option<CanonicalRef<'c>> {
        self.keys.get(&normalize(key)).copied()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Resolver bound to one catalog, with its alias index built once.
///
/// The resolver borrows the catalog, so the catalog cannot change while the
/// cached index is alive.
#[derive(Debug, Clone)]
pub struct Resolver<'c> {
    index: AliasIndex<'c>,
    config: MatchConfig,
}

impl<'c> Resolver<'c> {
    pub fn new(catalog: &'c [CatalogEntry], config: MatchConfig) -> Result<Self, ProcessError> {
        Ok(Resolver { index: AliasIndex::build(catalog)?, config })
    }

    pub fn index(&self) -> &AliasIndex<'c> {
        &self.index
    }

    /// Up to `max_results` catalog candidates for `exercise_name`.
    ///
    /// An empty result means the name is unresolved; that is not an error.
    pub fn resolve(&self, exercise_name: &str) -> Result<Vec<MatchCandidate>, ProcessError> {
        let canonical = top_matches(
            exercise_name,
            self.index.canonical_names.iter().copied(),
            self.config.cutoffs(self.config.canonical_cutoff),
            self.config.scorer,
        );
        if !canonical.is_empty() {
            tracing::debug!(name = exercise_name, hits = canonical.len(), "resolved by canonical name");
            return canonical
                .into_iter()
                .map(|hit| {
                    let target = self.lookup(hit.candidate)?;
                    Ok(candidate(hit.candidate, target.id, hit.score))
                })
                .collect();
        }

        let aliases = top_matches(
            exercise_name,
            self.index.keys(),
            self.config.cutoffs(self.config.alias_cutoff),
            self.config.scorer,
        );
        if !aliases.is_empty() {
            tracing::debug!(name = exercise_name, hits = aliases.len(), "resolved by alias");
            return aliases
                .into_iter()
                .map(|hit| {
                    let target = self.lookup(hit.candidate)?;
                    Ok(candidate(target.name, target.id, hit.score))
                })
                .collect();
        }

        tracing::debug!(name = exercise_name, "no catalog match");
        Ok(Vec::new())
    }

    fn lookup(&self, key: &str) -> Result<CanonicalRef<'c>, ProcessError> {
        self.index.get(key).ok_or_else(|| ProcessError::UnindexedMatch { key: key.to_string() })
    }
}

/// Resolve `exercise_name` against `catalog`, building a fresh index.
pub fn resolve(
    exercise_name: &str,
    catalog: &[CatalogEntry],
    config: MatchConfig,
) -> Result<Vec<MatchCandidate>, ProcessError> {
    Resolver::new(catalog, config)?.resolve(exercise_name)
}

fn candidate(name: &str, id: &ExerciseId, score: f64) -> MatchCandidate {
    MatchCandidate { name: name.to_string(), id: id.clone(), score: round2(score) }
}

/// Two decimals, exact halves to even (`0.625` -> `0.62`).
fn round2(score: f64) -> f64 {
    (score * 100.0).round_ties_even() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn catalog() -> Vec<CatalogEntry> {
        vec![
            CatalogEntry::new(1, "Bench Press").with_aliases(Some("flat bench"), Some("bp")),
            CatalogEntry::new(2, "Incline Bench Press").with_aliases(Some("incline bench"), None),
            CatalogEntry::new(3, "Back Squat").with_aliases(Some("squat"), None),
            CatalogEntry::new(4, "Romanian Deadlift").with_aliases(Some("rdl"), Some("stiff leg deadlift")),
            CatalogEntry::new(5, "Pull Up").with_aliases(Some("pullups"), Some("chin up")),
        ]
    }

    #[test]
    fn index_holds_names_and_aliases() {
        let catalog = catalog();
        let index = AliasIndex::build(&catalog).unwrap();

        assert_eq!(index.len(), 13);
        assert_eq!(index.get("  RDL ").map(|r| r.name), Some("Romanian Deadlift"));
        assert_eq!(index.get("back squat").map(|r| r.id), Some(&ExerciseId::Int(3)));
        assert_eq!(index.canonical_names().len(), 5);
    }

    #[test]
    fn alias_collisions_keep_the_last_entry() {
        let catalog = vec![
            CatalogEntry::new(1, "Chin Up").with_aliases(Some("pull"), None),
            CatalogEntry::new(2, "Pull Up").with_aliases(Some("pull"), None),
        ];
        let index = AliasIndex::build(&catalog).unwrap();

        assert_eq!(index.get("pull").map(|r| r.name), Some("Pull Up"));
        assert_eq!(index.keys().collect::<Vec<_>>(), vec!["chin up", "pull", "pull up"]);
    }

    #[test]
    fn empty_names_are_malformed() {
        let catalog = vec![CatalogEntry::new(1, "Squat"), CatalogEntry::new(2, "   ")];
        let err = AliasIndex::build(&catalog).unwrap_err();
        assert_eq!(err, ProcessError::MalformedCatalogEntry { index: 1, id: "2".to_string() });
    }

    #[test]
    fn every_canonical_name_resolves_to_itself() {
        let catalog = catalog();
        let resolver = Resolver::new(&catalog, MatchConfig::default()).unwrap();
        assert_eq!(resolver.index().len(), 13);

        for entry in &catalog {
            let hits = resolver.resolve(&entry.name).unwrap();
            assert_eq!(hits[0].name, entry.name);
            assert_eq!(hits[0].id, entry.id);
            assert_eq!(hits[0].score, 1.0);
        }
    }

    #[test]
    fn near_canonical_names_back_off_within_the_first_tier() {
        let catalog = catalog();
        let hits = resolve("bench pres", &catalog, MatchConfig::default()).unwrap();
        assert_eq!(hits[0].name, "Bench Press");
        assert_eq!(hits[0].score, 0.95);
    }

    #[test]
    fn aliases_resolve_to_their_canonical_entry() {
        let catalog = catalog();
        let hits = resolve("rdl", &catalog, MatchConfig::default()).unwrap();
        assert_eq!(
            hits,
            vec![MatchCandidate { name: "Romanian Deadlift".to_string(), id: ExerciseId::Int(4), score: 1.0 }]
        );
    }

    #[test]
    fn unknown_names_resolve_to_nothing() {
        let catalog = catalog();
        assert!(resolve("zzzz qqqq", &catalog, MatchConfig::default()).unwrap().is_empty());
    }

    #[test]
    fn scores_round_half_to_even() {
        let catalog = vec![CatalogEntry::new(1, "abcdeXYZ")];
        let hits = resolve("abcdefgh", &catalog, MatchConfig::default()).unwrap();
        assert_eq!(hits[0].score, 0.62);
        assert_eq!(round2(0.875), 0.88);
        assert_eq!(round2(0.6666), 0.67);
    }

    #[test]
    fn degenerate_schedules_do_not_panic() {
        let catalog = catalog();
        for step in [1e-20, 0.0, -1.0, f64::NAN] {
            let config = MatchConfig { step, ..MatchConfig::default() };
            assert!(resolve("zzzz", &catalog, config).unwrap().is_empty());
        }
        let config =
            MatchConfig { canonical_cutoff: f64::INFINITY, alias_cutoff: f64::INFINITY, ..MatchConfig::default() };
        assert!(resolve("bench press", &catalog, config).unwrap().is_empty());
    }

    #[test]
    fn empty_catalog_resolves_to_nothing() {
        assert!(resolve("bench press", &[], MatchConfig::default()).unwrap().is_empty());
    }
}
