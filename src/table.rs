//! Flat, one-row-per-record view of [`WorkoutData`].
//!
//! Detail fields are lifted to columns (absent details give empty cells) and
//! `top_matches` collapses to the `", "`-joined candidate names. Going back
//! with [`TableRow::to_record`] recovers everything except the candidates.

use crate::catalog::ExerciseId;
use crate::{EffortScale, ExerciseDetails, Rep, SetStructure, WeightUnit, WorkoutData, WorkoutRecord};
use serde::Serialize;

const COLUMNS: [&str; 13] = [
    "exercise",
    "id",
    "raw_name",
    "set_structure",
    "group_id",
    "sets",
    "reps",
    "weight",
    "rir",
    "rir_or_rpe",
    "rest",
    "weight_unit",
    "top_matches",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub exercise: String,
    pub id: Option<ExerciseId>,
    pub raw_name: String,
    pub set_structure: SetStructure,
    pub group_id: u32,
    pub sets: Option<u32>,
    pub reps: Option<Vec<Rep>>,
    pub weight: Option<Vec<u32>>,
    pub rir: Option<u32>,
    pub rir_or_rpe: Option<EffortScale>,
    pub rest: Option<String>,
    pub weight_unit: Option<WeightUnit>,
    pub top_matches: String,
}

impl From<&WorkoutRecord> for TableRow {
    fn from(record: &WorkoutRecord) -> Self {
        let details = record.details.as_ref();
        TableRow {
            exercise: record.raw_name.clone(),
            id: record.id.clone(),
            raw_name: record.raw_name.clone(),
            set_structure: record.set_structure,
            group_id: record.group_id,
            sets: details.and_then(|d| d.sets),
            reps: details.and_then(|d| d.reps.clone()),
            weight: details.and_then(|d| d.weight.clone()),
            rir: details.and_then(|d| d.rir),
            rir_or_rpe: details.map(|d| d.rir_or_rpe),
            rest: details.and_then(|d| d.rest.clone()),
            weight_unit: details.map(|d| d.weight_unit),
            top_matches: record.top_matches.iter().map(|m| m.name.as_str()).collect::<Vec<_>>().join(", "),
        }
    }
}

impl TableRow {
    /// Rebuild a record from this row. Match candidates cannot be recovered
    /// from their joined names, so `top_matches` comes back empty.
    pub fn to_record(&self, occurrence: usize) -> WorkoutRecord {
        let details = self.weight_unit.map(|weight_unit| ExerciseDetails {
            sets: self.sets,
            reps: self.reps.clone(),
            weight: self.weight.clone(),
            weight_unit,
            rir: self.rir,
            rir_or_rpe: self.rir_or_rpe.unwrap_or_default(),
            rest: self.rest.clone(),
        });

        WorkoutRecord {
            occurrence,
            id: self.id.clone(),
            raw_name: self.raw_name.clone(),
            top_matches: Vec::new(),
            set_structure: self.set_structure,
            group_id: self.group_id,
            details,
        }
    }

    fn cells(&self) -> [String; 13] {
        [
            self.exercise.clone(),
            cell(self.id.as_ref()),
            self.raw_name.clone(),
            self.set_structure.code().to_string(),
            self.group_id.to_string(),
            cell(self.sets),
            self.reps.as_deref().map(join).unwrap_or_default(),
            self.weight.as_deref().map(join).unwrap_or_default(),
            cell(self.rir),
            cell(self.rir_or_rpe.map(u8::from)),
            self.rest.clone().unwrap_or_default(),
            cell(self.weight_unit.map(u8::from)),
            self.top_matches.clone(),
        ]
    }
}

impl WorkoutData {
    pub fn to_rows(&self) -> Vec<TableRow> {
        self.records().iter().map(TableRow::from).collect()
    }
}

/// Render rows as tab-separated text with a header line.
pub fn render_tsv(rows: &[TableRow]) -> String {
    let mut out = COLUMNS.join("\t");
    out.push('\n');
    for row in rows {
        out.push_str(&row.cells().join("\t"));
        out.push('\n');
    }
    out
}

fn cell<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn join<T: ToString>(values: &[T]) -> String {
    values.iter().map(ToString::to_string).collect::<Vec<_>>().join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogEntry;
    use crate::{Options, interpret_with};
    use pretty_assertions::assert_eq;

    fn data() -> WorkoutData {
        let catalog = vec![
            CatalogEntry::new(1, "Bench Press"),
            CatalogEntry::new(4, "Romanian Deadlift").with_aliases(Some("rdl"), None),
        ];
        let prompt = "Superset\nBench Press 3x10,Max @100lbs 2RIR, 60s rest\nRDL 3x8 (60 kg)\n\nZumba dance";
        interpret_with(prompt, &catalog, &Options::default()).unwrap()
    }

    #[test]
    fn rows_round_trip_to_records() {
        let data = data();
        let rows = data.to_rows();

        for (row, record) in rows.iter().zip(data.records()) {
            let back = row.to_record(record.occurrence);
            assert_eq!(back.id, record.id);
            assert_eq!(back.raw_name, record.raw_name);
            assert_eq!(back.set_structure, record.set_structure);
            assert_eq!(back.group_id, record.group_id);
            assert_eq!(back.details, record.details);
        }
    }

    #[test]
    fn unresolved_rows_have_empty_detail_cells() {
        let rows = data().to_rows();
        let zumba = &rows[2];

        assert_eq!(zumba.id, None);
        assert_eq!(zumba.weight_unit, None);
        assert_eq!(zumba.top_matches, "");
    }

    #[test]
    fn tsv_has_a_header_and_one_line_per_row() {
        let tsv = render_tsv(&data().to_rows());
        let lines: Vec<&str> = tsv.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(tsv.ends_with('\n'));
        assert_eq!(lines[0].split('\t').count(), 13);
        assert_eq!(
            lines[1],
            "bench press\t1\tbench press\t1\t1\t3\t10,Max\t100\t2\t0\t60s\t0\tBench Press"
        );
        assert_eq!(lines[3], "zumba dance\t\tzumba dance\t0\t2\t\t\t\t\t\t\t\t");
    }
}
