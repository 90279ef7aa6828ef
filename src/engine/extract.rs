//! Detail extraction.
//!
//! A line is compacted once (see `matching::normalize`) and then every
//! [`DetailRule`] runs against it independently. A rule is a name, the field
//! it fills, a regex and a production that writes into [`ExerciseDetails`]:
//!
//! ```text
//! "Bench 3 x 10 @ 100 lbs, 2 RIR, 60s rest"
//!    │ compact
//!    v
//! "bench 3x10 @100lbs, 2rir, 60s rest"
//!    ├─ sets          (\d+)\s*[x-]          -> sets = 3
//!    ├─ reps          [x-] 10               -> reps = [10]
//!    ├─ weight (@)    @100lbs               -> weight = [100], lbs
//!    ├─ weight (())   (skipped: weight set)
//!    ├─ effort        2rir                  -> rir = 2, RIR
//!    └─ rest          60s rest              -> rest = "60s"
//! ```
//!
//! Productions receive each match in turn until one of them returns `true`,
//! so a match that fails to produce a value (a number that does not fit in
//! `u32`, say) leaves room for a later match. No rule can fail the
//! extraction as a whole; unmatched fields stay `None`.

use crate::matching::normalize::compact_cased;
use crate::{EffortScale, ExerciseDetails, Rep, WeightUnit};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::fmt;
use std::ops::Range;

static DETAIL_RULES: Lazy<Vec<DetailRule>> = Lazy::new(rules);

/// Field a detail rule fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetailField {
    Sets,
    Reps,
    Weight,
    Effort,
    Rest,
}

impl fmt::Display for DetailField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DetailField::Sets => "sets",
            DetailField::Reps => "reps",
            DetailField::Weight => "weight",
            DetailField::Effort => "effort",
            DetailField::Rest => "rest",
        };
        f.write_str(name)
    }
}

/// Compact form of a source line.
///
/// `folded` is what rules match against; `cased` has the same byte offsets
/// and keeps the source casing for literal tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompactLine {
    cased: String,
    folded: String,
}

impl CompactLine {
    pub fn new(line: &str) -> Self {
        let cased = compact_cased(line);
        let folded = cased.to_ascii_lowercase();
        CompactLine { cased, folded }
    }

    pub fn as_str(&self) -> &str {
        &self.folded
    }

    /// Source-cased text of a byte range of [`CompactLine::as_str`].
    pub fn cased(&self, range: Range<usize>) -> &str {
        &self.cased[range]
    }
}

pub type Production = Box<dyn Fn(&Captures<'_>, &CompactLine, &mut ExerciseDetails) -> bool + Send + Sync>;

/// A named extraction rule.
pub struct DetailRule {
    pub name: &'static str,
    pub field: DetailField,
    pub pattern: &'static Regex,
    pub production: Production,
}

impl fmt::Debug for DetailRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DetailRule")
            .field("name", &self.name)
            .field("field", &self.field)
            .field("pattern", &self.pattern.as_str())
            .field("production", &"<function>")
            .finish()
    }
}

impl DetailRule {
    /// Run the production over each match until one produces a value.
    fn apply(&self, line: &CompactLine, details: &mut ExerciseDetails) -> bool {
        self.pattern.captures_iter(line.as_str()).any(|caps| (self.production)(&caps, line, details))
    }
}

/// Details plus the names of the rules that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub compact: String,
    pub details: ExerciseDetails,
    pub rules: Vec<&'static str>,
}

/// Extract training details from a source line.
pub fn extract_details(line: &str) -> ExerciseDetails {
    extract(line).details
}

/// Extract training details and record which rules fired.
pub fn extract(line: &str) -> Extraction {
    let compact = CompactLine::new(line);
    let mut details = ExerciseDetails::default();
    let mut fired = Vec::new();

    for rule in DETAIL_RULES.iter() {
        if rule.apply(&compact, &mut details) {
            tracing::trace!(rule = rule.name, field = %rule.field, line = compact.as_str(), "detail rule fired");
            fired.push(rule.name);
        }
    }

    Extraction { compact: compact.folded, details, rules: fired }
}

/// All detail rules, in application order.
pub fn rules() -> Vec<DetailRule> {
    vec![
        rule_sets(),
        rule_reps(),
        rule_weight_at(),
        rule_weight_parenthesized(),
        rule_effort(),
        rule_effort_scale_first(),
        rule_rest(),
    ]
}

// --- Rules ---------------------------------------------------------------------

/// <sets>x / <sets>-
fn rule_sets() -> DetailRule {
    detail_rule! {
        name: "sets",
        field: DetailField::Sets,
        pattern: r"(\d+)\s*[x\-]",
        prod: |caps: &Captures, _line: &CompactLine, details: &mut ExerciseDetails| {
            details.sets = parse_u32(&caps[1]);
            details.sets.is_some()
        }
    }
}

/// x<reps>[,<reps>...] where a rep is a number or a literal like "max"
///
/// A number glued to a rest unit (`3x60s`) is a timed set, not a rep count,
/// and a number followed by another `x` (`flex 3x10`) is a set count.
fn rule_reps() -> DetailRule {
    detail_rule! {
        name: "reps",
        field: DetailField::Reps,
        pattern: r"[x\-]\s*((?:\d+|max|amrap)(?:\s*,\s*(?:\d+|max|amrap))*)",
        prod: |caps: &Captures, line: &CompactLine, details: &mut ExerciseDetails| {
            let Some(list) = caps.get(1) else {
                return false;
            };
            let after = &line.as_str()[list.end()..];
            if after.starts_with(['x', '-']) {
                return false;
            }
            let mut reps: Vec<Rep> = line.cased(list.range()).split(',').map(|token| to_rep(token.trim())).collect();
            if regex!(r"^(?:seconds|second|secs|sec|s|minutes|minute|mins|min)\b").is_match(after) {
                reps.pop();
            }
            if reps.is_empty() {
                return false;
            }
            details.reps = Some(reps);
            true
        }
    }
}

/// @<weight>[lbs|kg]
fn rule_weight_at() -> DetailRule {
    detail_rule! {
        name: "weight (@)",
        field: DetailField::Weight,
        pattern: r"@(\d+)(lbs|lb|kgs|kg)?",
        prod: |caps: &Captures, _line: &CompactLine, details: &mut ExerciseDetails| {
            set_weight(details, &caps[1], caps.get(2).map(|m| m.as_str()))
        }
    }
}

/// (<weight>[lbs|kg]), only when no @ weight was found
fn rule_weight_parenthesized() -> DetailRule {
    detail_rule! {
        name: "weight (parenthesized)",
        field: DetailField::Weight,
        pattern: r"\((\d+)(lbs|lb|kgs|kg)?\)",
        prod: |caps: &Captures, _line: &CompactLine, details: &mut ExerciseDetails| {
            if details.weight.is_some() {
                return false;
            }
            set_weight(details, &caps[1], caps.get(2).map(|m| m.as_str()))
        }
    }
}

/// <n>rir / <n>rpe
fn rule_effort() -> DetailRule {
    detail_rule! {
        name: "effort",
        field: DetailField::Effort,
        pattern: r"(\d+)(rir|rpe)",
        prod: |caps: &Captures, _line: &CompactLine, details: &mut ExerciseDetails| {
            set_effort(details, &caps[1], &caps[2])
        }
    }
}

/// rpe <n> / rir <n>, only when no <n>rpe form was found
fn rule_effort_scale_first() -> DetailRule {
    detail_rule! {
        name: "effort (scale first)",
        field: DetailField::Effort,
        pattern: r"\b(rir|rpe)\s*(\d+)",
        prod: |caps: &Captures, _line: &CompactLine, details: &mut ExerciseDetails| {
            if details.rir.is_some() {
                return false;
            }
            set_effort(details, &caps[2], &caps[1])
        }
    }
}

/// <n>s / <n>sec / <n>min [rest]
fn rule_rest() -> DetailRule {
    detail_rule! {
        name: "rest",
        field: DetailField::Rest,
        pattern: r"(\d+)\s*(seconds|second|secs|sec|s|minutes|minute|mins|min)\b(?:\s*rest)?",
        prod: |caps: &Captures, _line: &CompactLine, details: &mut ExerciseDetails| {
            let suffix = if caps[2].starts_with('s') { "s" } else { "min" };
            details.rest = Some(format!("{}{}", &caps[1], suffix));
            true
        }
    }
}

// --- Helpers -------------------------------------------------------------------

fn parse_u32(digits: &str) -> Option<u32> {
    digits.parse().ok()
}

fn to_rep(token: &str) -> Rep {
    match parse_u32(token) {
        Some(count) => Rep::Count(count),
        None => Rep::Literal(token.to_string()),
    }
}

fn set_weight(details: &mut ExerciseDetails, digits: &str, unit: Option<&str>) -> bool {
    let Some(weight) = parse_u32(digits) else {
        return false;
    };
    details.weight = Some(vec![weight]);
    details.weight_unit = match unit {
        Some(unit) if unit.starts_with("kg") => WeightUnit::Kg,
        _ => WeightUnit::Lbs,
    };
    true
}

fn set_effort(details: &mut ExerciseDetails, digits: &str, scale: &str) -> bool {
    let Some(rating) = parse_u32(digits) else {
        return false;
    };
    details.rir = Some(rating);
    details.rir_or_rpe = if scale == "rpe" { EffortScale::Rpe } else { EffortScale::Rir };
    true
}
