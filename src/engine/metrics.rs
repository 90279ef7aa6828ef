//! Pipeline run metrics.
//!
//! `run` always measures its phases; per-exercise traces are only collected
//! when the caller asks for them (the verbose API and the CLI report).
//!
//! Phase timings are cumulative: `resolve` and `extract` add up the time
//! spent on every exercise of the prompt.

use crate::WorkoutData;
use std::time::Duration;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunMetrics {
    /// Total elapsed time for the run.
    pub total: Duration,
    /// Time spent segmenting the prompt into exercises.
    pub segment: Duration,
    /// Time spent building the alias index and resolving names.
    pub resolve: Duration,
    /// Time spent extracting details.
    pub extract: Duration,
}

/// What the detail extractor saw and did for one exercise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionTrace {
    pub occurrence: usize,
    pub raw_name: String,
    /// Source line the details were read from.
    pub line: String,
    /// Compact form the rules ran against.
    pub compact: String,
    /// Names of the rules that produced a value, in application order.
    pub rules: Vec<&'static str>,
}

/// Pipeline output bundled with timing information.
#[derive(Debug, Clone)]
pub struct RunResult {
    pub data: WorkoutData,
    /// Empty unless the run was asked to trace.
    pub traces: Vec<ExtractionTrace>,
    pub metrics: RunMetrics,
}
