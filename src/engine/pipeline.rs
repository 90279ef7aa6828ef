//! Orchestration: segment, resolve, extract, assemble.

use super::extract::{Extraction, extract};
use super::metrics::{ExtractionTrace, RunMetrics, RunResult};
use super::segment::segment;
use crate::api::Options;
use crate::catalog::CatalogEntry;
use crate::error::ProcessError;
use crate::matching::Resolver;
use crate::{ExerciseDetails, Keying, MatchCandidate, ParsedExercise, WorkoutData, WorkoutRecord};
use indexmap::IndexMap;
use std::time::Instant;

/// First line of `prompt` containing `raw_name`, ignoring case.
pub fn locate_line<'p>(prompt: &'p str, raw_name: &str) -> Option<&'p str> {
    let needle = raw_name.to_lowercase();
    prompt.split('\n').find(|line| line.to_lowercase().contains(&needle))
}

/// Run the whole pipeline over `prompt`.
///
/// With `trace` set, the result carries one [`ExtractionTrace`] per record.
pub fn run(prompt: &str, catalog: &[CatalogEntry], options: &Options, trace: bool) -> Result<RunResult, ProcessError> {
    let total_start = Instant::now();
    let mut metrics = RunMetrics::default();

    let segment_start = Instant::now();
    let parsed = segment(prompt);
    metrics.segment = segment_start.elapsed();
    tracing::debug!(exercises = parsed.len(), keying = ?options.keying, "segmented prompt");

    let resolve_start = Instant::now();
    let resolver = Resolver::new(catalog, options.matching)?;
    metrics.resolve += resolve_start.elapsed();
    tracing::debug!(keys = resolver.index().len(), entries = catalog.len(), "alias index built");

    let entries: Vec<(usize, &ParsedExercise)> = match options.keying {
        Keying::Occurrence => parsed.iter().enumerate().collect(),
        Keying::RawName => collapse_by_name(&parsed),
    };

    let mut records = Vec::with_capacity(entries.len());
    let mut traces = Vec::new();

    for (occurrence, exercise) in entries {
        let resolve_start = Instant::now();
        let top_matches = resolver.resolve(&exercise.name)?;
        metrics.resolve += resolve_start.elapsed();

        let line = match options.keying {
            Keying::Occurrence => exercise.source.as_str(),
            Keying::RawName => locate_line(prompt, &exercise.name).unwrap_or(""),
        };

        let extract_start = Instant::now();
        let Extraction { compact, details, rules } = extract(line);
        metrics.extract += extract_start.elapsed();

        if trace {
            traces.push(ExtractionTrace {
                occurrence,
                raw_name: exercise.name.clone(),
                line: line.to_string(),
                compact,
                rules,
            });
        }

        records.push(assemble(occurrence, exercise, top_matches, details));
    }

    metrics.total = total_start.elapsed();
    Ok(RunResult { data: WorkoutData::new(options.keying, records), traces, metrics })
}

/// One entry per distinct name, in first-appearance order, carrying the last
/// occurrence of that name.
fn collapse_by_name(parsed: &[ParsedExercise]) -> Vec<(usize, &ParsedExercise)> {
    let mut by_name: IndexMap<&str, (usize, &ParsedExercise)> = IndexMap::with_capacity(parsed.len());
    for (occurrence, exercise) in parsed.iter().enumerate() {
        by_name.insert(exercise.name.as_str(), (occurrence, exercise));
    }
    by_name.into_values().collect()
}

fn assemble(
    occurrence: usize,
    exercise: &ParsedExercise,
    top_matches: Vec<MatchCandidate>,
    details: ExerciseDetails,
) -> WorkoutRecord {
    let id = top_matches.first().map(|best| best.id.clone());
    let details = (!top_matches.is_empty()).then_some(details);

    WorkoutRecord {
        occurrence,
        id,
        raw_name: exercise.name.clone(),
        top_matches,
        set_structure: exercise.set_structure,
        group_id: exercise.group_id,
        details,
    }
}
