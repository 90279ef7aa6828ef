//! Exercise catalog records.
//!
//! The catalog is owned by the caller; the parser only iterates it. A JSON
//! loader is provided for the command-line tool:
//!
//! ```json
//! [
//!   { "id": 1, "name": "Bench Press", "alias_1": "flat bench", "alias_2": null },
//!   { "id": "rdl", "name": "Romanian Deadlift", "alias_1": "rdl" }
//! ]
//! ```

use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Read;
use std::path::Path;

/// Opaque, stable exercise identifier. Catalogs may use integers or strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExerciseId {
    Int(i64),
    Text(String),
}

impl fmt::Display for ExerciseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExerciseId::Int(n) => write!(f, "{n}"),
            ExerciseId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ExerciseId {
    fn from(value: i64) -> Self {
        ExerciseId::Int(value)
    }
}

impl From<&str> for ExerciseId {
    fn from(value: &str) -> Self {
        ExerciseId::Text(value.to_string())
    }
}

/// Canonical exercise with up to two alternate names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: ExerciseId,
    pub name: String,
    #[serde(default)]
    pub alias_1: Option<String>,
    #[serde(default)]
    pub alias_2: Option<String>,
}

impl CatalogEntry {
    pub fn new(id: impl Into<ExerciseId>, name: &str) -> Self {
        CatalogEntry { id: id.into(), name: name.to_string(), alias_1: None, alias_2: None }
    }

    pub fn with_aliases(mut self, alias_1: Option<&str>, alias_2: Option<&str>) -> Self {
        self.alias_1 = alias_1.map(str::to_string);
        self.alias_2 = alias_2.map(str::to_string);
        self
    }

    /// Non-empty aliases, in column order.
    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        [self.alias_1.as_deref(), self.alias_2.as_deref()].into_iter().flatten().filter(|a| !a.is_empty())
    }
}

/// Read a JSON array of catalog entries.
pub fn load_json<R: Read>(reader: R) -> Result<Vec<CatalogEntry>, CatalogError> {
    let entries: Vec<CatalogEntry> = serde_json::from_reader(reader)?;
    tracing::debug!(entries = entries.len(), "catalog loaded");
    Ok(entries)
}

/// Read a JSON catalog file.
pub fn load_json_file(path: &Path) -> Result<Vec<CatalogEntry>, CatalogError> {
    let file = std::fs::File::open(path)?;
    load_json(std::io::BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn loads_mixed_ids_and_missing_aliases() {
        let json = r#"[
            {"id": 7, "name": "Bench Press", "alias_1": "flat bench", "alias_2": null},
            {"id": "rdl-01", "name": "Romanian Deadlift", "alias_1": "rdl"},
            {"id": 9, "name": "Plank"}
        ]"#;

        let entries = load_json(json.as_bytes()).unwrap();

        assert_eq!(
            entries,
            vec![
                CatalogEntry::new(7, "Bench Press").with_aliases(Some("flat bench"), None),
                CatalogEntry::new("rdl-01", "Romanian Deadlift").with_aliases(Some("rdl"), None),
                CatalogEntry::new(9, "Plank"),
            ]
        );
    }

    #[test]
    fn rejects_non_array_json() {
        let err = load_json(r#"{"id": 1}"#.as_bytes()).unwrap_err();
        assert!(matches!(err, CatalogError::Json(_)));
    }

    #[test]
    fn aliases_skip_blank_columns() {
        let entry = CatalogEntry::new(1, "Squat").with_aliases(Some(""), Some("back squat"));
        assert_eq!(entry.aliases().collect::<Vec<_>>(), vec!["back squat"]);
    }

    #[test]
    fn ids_display_without_quotes() {
        assert_eq!(ExerciseId::from(42).to_string(), "42");
        assert_eq!(ExerciseId::from("abc").to_string(), "abc");
    }
}
