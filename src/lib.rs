#[macro_use]
mod macros;
mod api;
pub mod catalog;
mod engine;
mod error;
pub mod matching;
pub mod table;

pub use api::{
    ExtractionTrace, InterpretationVerbose, Options, Response, RunDetails, interpret, interpret_verbose_with,
    interpret_with,
};
pub use catalog::{CatalogEntry, ExerciseId};
pub use engine::{
    CompactLine, DetailField, DetailRule, Extraction, SegmenterState, extract, extract_details, locate_line, segment,
};
pub use error::{CatalogError, InterpretError, ProcessError};
pub use matching::{MatchConfig, Scorer};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

// --- Segmentation ------------------------------------------------------------

/// How an exercise line relates to its neighbours.
///
/// Serialized as its numeric code (`0` standalone, `1` superset, `2` circuit).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum SetStructure {
    #[default]
    None,
    Superset,
    Circuit,
}

impl SetStructure {
    pub fn code(self) -> u8 {
        match self {
            SetStructure::None => 0,
            SetStructure::Superset => 1,
            SetStructure::Circuit => 2,
        }
    }
}

impl From<SetStructure> for u8 {
    fn from(value: SetStructure) -> Self {
        value.code()
    }
}

impl TryFrom<u8> for SetStructure {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(SetStructure::None),
            1 => Ok(SetStructure::Superset),
            2 => Ok(SetStructure::Circuit),
            other => Err(format!("unknown set structure code {other}")),
        }
    }
}

impl fmt::Display for SetStructure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SetStructure::None => "none",
            SetStructure::Superset => "superset",
            SetStructure::Circuit => "circuit",
        };
        f.write_str(name)
    }
}

/// One exercise line found by the segmenter, before name resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedExercise {
    /// Leading name text of the line, lowercased and trimmed.
    pub name: String,
    pub set_structure: SetStructure,
    pub group_id: u32,
    /// 0-based index of the source line within the input text.
    pub line: usize,
    /// The source line exactly as it appeared in the input.
    pub source: String,
}

// --- Details -----------------------------------------------------------------

/// A single rep target: a count, or a literal such as `Max`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Rep {
    Count(u32),
    Literal(String),
}

impl fmt::Display for Rep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rep::Count(n) => write!(f, "{n}"),
            Rep::Literal(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", from = "u8")]
pub enum WeightUnit {
    #[default]
    Lbs,
    Kg,
}

impl From<WeightUnit> for u8 {
    fn from(value: WeightUnit) -> Self {
        match value {
            WeightUnit::Lbs => 0,
            WeightUnit::Kg => 1,
        }
    }
}

impl From<u8> for WeightUnit {
    fn from(value: u8) -> Self {
        match value {
            1 => WeightUnit::Kg,
            _ => WeightUnit::Lbs,
        }
    }
}

/// Effort scale of the `rir` field: reps in reserve or perceived exertion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", from = "u8")]
pub enum EffortScale {
    #[default]
    Rir,
    Rpe,
}

impl From<EffortScale> for u8 {
    fn from(value: EffortScale) -> Self {
        match value {
            EffortScale::Rir => 0,
            EffortScale::Rpe => 1,
        }
    }
}

impl From<u8> for EffortScale {
    fn from(value: u8) -> Self {
        match value {
            1 => EffortScale::Rpe,
            _ => EffortScale::Rir,
        }
    }
}

/// Training parameters stated on an exercise line.
///
/// Every optional field is independent: `None` means the line did not state
/// it, never zero. `weight_unit` and `rir_or_rpe` carry their defaults when
/// the corresponding value is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseDetails {
    pub sets: Option<u32>,
    pub reps: Option<Vec<Rep>>,
    pub weight: Option<Vec<u32>>,
    pub weight_unit: WeightUnit,
    pub rir: Option<u32>,
    pub rir_or_rpe: EffortScale,
    pub rest: Option<String>,
}

// --- Resolution --------------------------------------------------------------

/// A catalog exercise proposed for a raw name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchCandidate {
    pub name: String,
    pub id: ExerciseId,
    pub score: f64,
}

// --- Output ------------------------------------------------------------------

/// Final per-exercise record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutRecord {
    /// Position of this exercise among all exercises of the prompt.
    pub occurrence: usize,
    /// Id of the best match, if any.
    pub id: Option<ExerciseId>,
    pub raw_name: String,
    pub top_matches: Vec<MatchCandidate>,
    pub set_structure: SetStructure,
    pub group_id: u32,
    /// Present only when at least one match candidate was found.
    pub details: Option<ExerciseDetails>,
}

/// How records of one prompt are keyed in serialized output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Keying {
    /// One record per exercise line, keyed by its occurrence index.
    #[default]
    Occurrence,
    /// One record per distinct raw name; a repeated name keeps its first
    /// position but the last occurrence's values.
    RawName,
}

/// All records of one prompt, in input order.
///
/// Serializes as a JSON object whose keys follow the [`Keying`] the data was
/// built with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkoutData {
    keying: Keying,
    records: Vec<WorkoutRecord>,
}

impl WorkoutData {
    pub fn new(keying: Keying, records: Vec<WorkoutRecord>) -> Self {
        WorkoutData { keying, records }
    }

    pub fn keying(&self) -> Keying {
        self.keying
    }

    pub fn records(&self) -> &[WorkoutRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Output key of `record` under this data's keying.
    pub fn key_of(&self, record: &WorkoutRecord) -> String {
        match self.keying {
            Keying::Occurrence => record.occurrence.to_string(),
            Keying::RawName => record.raw_name.clone(),
        }
    }

    /// Records keyed by raw name, in first-appearance order. A name that
    /// occurs more than once keeps its first position and its last record.
    pub fn by_raw_name(&self) -> IndexMap<&str, &WorkoutRecord> {
        self.records.iter().map(|r| (r.raw_name.as_str(), r)).collect()
    }

    /// Look up the last record carrying `raw_name`.
    pub fn get(&self, raw_name: &str) -> Option<&WorkoutRecord> {
        self.records.iter().rev().find(|r| r.raw_name == raw_name)
    }
}

impl Serialize for WorkoutData {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.records.len()))?;
        for record in &self.records {
            map.serialize_entry(&self.key_of(record), record)?;
        }
        map.end()
    }
}

impl<'a> IntoIterator for &'a WorkoutData {
    type Item = &'a WorkoutRecord;
    type IntoIter = std::slice::Iter<'a, WorkoutRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(occurrence: usize, raw_name: &str, group_id: u32) -> WorkoutRecord {
        WorkoutRecord {
            occurrence,
            id: None,
            raw_name: raw_name.to_string(),
            top_matches: Vec::new(),
            set_structure: SetStructure::None,
            group_id,
            details: None,
        }
    }

    fn data(keying: Keying) -> WorkoutData {
        WorkoutData::new(keying, vec![record(0, "squat", 1), record(1, "bench press", 2), record(2, "squat", 3)])
    }

    #[test]
    fn raw_name_view_keeps_first_position_and_last_record() {
        let data = data(Keying::Occurrence);
        let view = data.by_raw_name();

        assert_eq!(view.keys().copied().collect::<Vec<_>>(), vec!["squat", "bench press"]);
        assert_eq!(view["squat"].occurrence, 2);
        assert_eq!(view["squat"].group_id, 3);
        assert_eq!(data.get("squat").map(|r| r.occurrence), Some(2));
    }

    #[test]
    fn keys_follow_the_keying() {
        let by_occurrence = data(Keying::Occurrence);
        assert_eq!(by_occurrence.keying(), Keying::Occurrence);
        assert_eq!(by_occurrence.key_of(&by_occurrence.records()[2]), "2");

        let by_name = data(Keying::RawName);
        assert_eq!(by_name.keying(), Keying::RawName);
        assert_eq!(by_name.key_of(&by_name.records()[2]), "squat");
    }

    #[test]
    fn set_structure_codes_round_trip() {
        for structure in [SetStructure::None, SetStructure::Superset, SetStructure::Circuit] {
            assert_eq!(SetStructure::try_from(structure.code()), Ok(structure));
        }
        assert!(SetStructure::try_from(3).is_err());
    }
}
