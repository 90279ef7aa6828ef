//! Workout parsing engine.
//!
//! The engine turns a prompt into per-exercise records. It is split into
//! focused submodules under `src/engine/`:
//!
//! ```text
//! prompt ── segment (segment.rs) ──────────────┐
//!           fold SegmenterState over lines     │
//!           -> ParsedExercise*                 │
//!                                              v
//!                        run (pipeline.rs), per exercise:
//!                          - Resolver::resolve      (crate::matching)
//!                          - extract over source    (extract.rs)
//!                          - assemble WorkoutRecord
//!                                              │
//!                                              v
//!                                  RunResult (metrics.rs)
//!                                  data + traces + timings
//! ```
//!
//! ## Responsibilities by module
//!
//! - `segment.rs`: the grouping state machine. Header lines open superset and
//!   circuit scopes, blank lines close them, noise lines are skipped, and every
//!   other line yields at most one `ParsedExercise`.
//! - `extract.rs`: named detail rules (regex + production) applied to the
//!   compact form of a line.
//! - `pipeline.rs`: orchestration and keying of the final records.
//! - `metrics.rs`: timings and the run result bundle.
//!
//! ## Adding a detail rule
//!
//! Add a `rule_*` function in `extract.rs` using `detail_rule!` and list it
//! in `rules()`. Rules run in list order; a rule that wants to yield to an
//! earlier one checks the field it would write.

#[path = "engine/extract.rs"]
mod extract;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/pipeline.rs"]
mod pipeline;
#[path = "engine/segment.rs"]
mod segment;

pub use extract::{CompactLine, DetailField, DetailRule, Extraction, extract, extract_details};
pub use metrics::{ExtractionTrace, RunMetrics, RunResult};
pub use pipeline::{locate_line, run};
pub use segment::{SegmenterState, segment};
