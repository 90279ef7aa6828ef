use crate::catalog::CatalogEntry;
use crate::engine;
use crate::error::InterpretError;
use crate::matching::MatchConfig;
use crate::{Keying, WorkoutData};
use serde::Serialize;
use std::time::Duration;

pub use crate::engine::ExtractionTrace;

/// Options that affect matching and output keying.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Options {
    pub matching: MatchConfig,
    pub keying: Keying,
}

/// Timings and per-exercise traces returned by [`interpret_verbose_with`].
#[derive(Debug, Clone)]
pub struct RunDetails {
    /// Total elapsed time.
    pub total: Duration,
    pub segment: Duration,
    pub resolve: Duration,
    pub extract: Duration,
    /// One trace per record, in record order.
    pub traces: Vec<ExtractionTrace>,
}

/// Result of [`interpret_verbose_with`].
#[derive(Debug, Clone)]
pub struct InterpretationVerbose {
    pub data: WorkoutData,
    pub details: RunDetails,
}

/// Serializable outcome of one interpretation:
/// `{"workout_data": {...}}` or `{"error": "..."}`.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Response {
    Data { workout_data: WorkoutData },
    Error { error: String },
}

impl Response {
    pub fn from_result(result: Result<WorkoutData, InterpretError>) -> Self {
        match result {
            Ok(workout_data) => Response::Data { workout_data },
            Err(err) => Response::Error { error: err.to_string() },
        }
    }
}

/// Interpret `text` against `catalog` with default [`Options`].
///
/// # Example
/// ```
/// use liftparse::{CatalogEntry, interpret};
///
/// let catalog = vec![CatalogEntry::new(1, "Bench Press")];
/// let data = interpret("Bench Press 3x10 @135lbs", &catalog).unwrap();
/// assert_eq!(data.records()[0].raw_name, "bench press");
/// ```
pub fn interpret(text: &str, catalog: &[CatalogEntry]) -> Result<WorkoutData, InterpretError> {
    interpret_with(text, catalog, &Options::default())
}

/// Interpret `text` against `catalog` with the provided `options`.
///
/// Unresolved exercises are not errors; they come back with no matches and
/// no details. Internal faults are logged and reported as
/// [`InterpretError::Internal`].
pub fn interpret_with(text: &str, catalog: &[CatalogEntry], options: &Options) -> Result<WorkoutData, InterpretError> {
    run(text, catalog, options, false).map(|run| run.data)
}

/// Like [`interpret_with`], also returning phase timings and the detail rules
/// that fired for each exercise.
pub fn interpret_verbose_with(
    text: &str,
    catalog: &[CatalogEntry],
    options: &Options,
) -> Result<InterpretationVerbose, InterpretError> {
    let run = run(text, catalog, options, true)?;
    let details = RunDetails {
        total: run.metrics.total,
        segment: run.metrics.segment,
        resolve: run.metrics.resolve,
        extract: run.metrics.extract,
        traces: run.traces,
    };
    Ok(InterpretationVerbose { data: run.data, details })
}

fn run(
    text: &str,
    catalog: &[CatalogEntry],
    options: &Options,
    trace: bool,
) -> Result<engine::RunResult, InterpretError> {
    if text.trim().is_empty() {
        return Err(InterpretError::EmptyInput);
    }

    engine::run(text, catalog, options, trace).map_err(|err| {
        tracing::error!(error = %err, ?err, "failed to interpret workout");
        InterpretError::Internal
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ExerciseId;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    fn catalog() -> Vec<CatalogEntry> {
        vec![
            CatalogEntry::new(1, "Bench Press").with_aliases(Some("flat bench"), None),
            CatalogEntry::new(3, "Back Squat").with_aliases(Some("squat"), None),
        ]
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\n\t\n")]
    fn blank_input_is_rejected(#[case] text: &str) {
        assert_eq!(interpret(text, &catalog()), Err(InterpretError::EmptyInput));
    }

    #[test]
    fn internal_faults_surface_as_a_generic_error() {
        let catalog = vec![CatalogEntry::new(1, "  ")];
        let err = interpret("Squat 5x5", &catalog).unwrap_err();

        assert_eq!(err, InterpretError::Internal);
        assert_eq!(err.to_string(), "Internal processing error");
    }

    #[test]
    fn prompts_without_exercises_are_empty_not_errors() {
        let data = interpret("Superset\nrest\n", &catalog()).unwrap();
        assert!(data.is_empty());
    }

    #[test]
    fn envelope_wraps_keyed_records() {
        let response = Response::from_result(interpret("Squat 5x5", &catalog()));

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "workout_data": {
                    "0": {
                        "occurrence": 0,
                        "id": 3,
                        "raw_name": "squat",
                        "top_matches": [{ "name": "Back Squat", "id": 3, "score": 0.67 }],
                        "set_structure": 0,
                        "group_id": 1,
                        "details": {
                            "sets": 5,
                            "reps": [5],
                            "weight": null,
                            "weight_unit": 0,
                            "rir": null,
                            "rir_or_rpe": 0,
                            "rest": null
                        }
                    }
                }
            })
        );
    }

    #[test]
    fn envelope_carries_error_messages() {
        let response = Response::from_result(interpret("", &catalog()));
        assert_eq!(serde_json::to_value(&response).unwrap(), json!({ "error": "No workout string provided" }));
    }

    #[test]
    fn raw_name_keying_uses_names_as_keys() {
        let options = Options { keying: Keying::RawName, ..Options::default() };
        let data = interpret_with("Flat Bench 3x8\nSquat 5x5\nflat bench 2x12", &catalog(), &options).unwrap();
        let value = serde_json::to_value(&data).unwrap();

        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), 2);
        assert_eq!(value["flat bench"]["id"], json!(1));
        assert_eq!(data.get("flat bench").map(|r| r.id.clone()), Some(Some(ExerciseId::Int(1))));
    }

    #[test]
    fn verbose_run_reports_traces_and_timings() {
        let out = interpret_verbose_with("Bench Press 3x10 @135lbs\nSquat 5x5", &catalog(), &Options::default()).unwrap();

        assert_eq!(out.data.len(), 2);
        assert_eq!(out.details.traces.len(), 2);
        assert_eq!(out.details.traces[0].rules, vec!["sets", "reps", "weight (@)"]);
        assert!(out.details.segment <= out.details.total);
        assert!(out.details.extract <= out.details.total);
    }
}
