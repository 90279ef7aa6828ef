//! Line segmentation and set-structure grouping.
//!
//! The segmenter is a fold over the lines of a prompt. All state lives in
//! [`SegmenterState`]; each line is one transition
//! `(state, line) -> (state, Option<ParsedExercise>)`.
//!
//! ```text
//! Superset A            header    structure=Superset, open group 1
//! bench press 3x10      exercise  (superset, 1)
//! rows 3x10             exercise  (superset, 1)
//!                       blank     structure=None, prev=undefined
//! squat 5x5             exercise  (none, 2)        standalone: own group
//! plank 3x60s           exercise  (none, 3)
//!                       blank
//! Circuit               header    structure=Circuit, open group 4
//! burpees x10           exercise  (circuit, 4)
//! ```
//!
//! Group ids only ever grow. Standalone exercises never share a group; every
//! exercise under one uninterrupted header shares that header's group. When a
//! header follows exercises of another structure without a blank line, the
//! first exercise under it opens one more group, so ids can skip.

use crate::{ParsedExercise, SetStructure};

/// Classification of a single (trimmed, lowercased) line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    Header(SetStructure),
    Blank,
    Noise,
    Exercise,
}

fn classify(line: &str) -> LineKind {
    if line.starts_with("superset") {
        LineKind::Header(SetStructure::Superset)
    } else if line.starts_with("circuit") {
        LineKind::Header(SetStructure::Circuit)
    } else if line.is_empty() {
        LineKind::Blank
    } else if line == "repeat" || line == "rest" || line.starts_with("hiit") {
        LineKind::Noise
    } else {
        LineKind::Exercise
    }
}

/// Leading run of letters, whitespace, hyphens and apostrophes, with bullet
/// hyphens, surrounding whitespace and a dangling `x` rep marker removed.
fn exercise_name(line: &str) -> Option<&str> {
    let is_padding = |c: char| c.is_whitespace() || c == '-';
    let name = regex!(r"^[\p{L}\s\-']+").find(line)?.as_str().trim_matches(is_padding);
    // "burpees x10" stops at the digit and leaves "burpees x"
    let name = match name.strip_suffix('x') {
        Some(rest) if rest.ends_with(char::is_whitespace) => rest.trim_matches(is_padding),
        _ => name,
    };
    (!name.is_empty()).then_some(name)
}

/// State threaded through the lines of one prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmenterState {
    pub current_structure: SetStructure,
    pub current_group_id: u32,
    /// Next group id to hand out.
    pub group_id_counter: u32,
    /// Structure of the previous exercise line; `None` at the start and after
    /// a blank line.
    pub prev_structure: Option<SetStructure>,
}

impl Default for SegmenterState {
    fn default() -> Self {
        SegmenterState {
            current_structure: SetStructure::None,
            current_group_id: 1,
            group_id_counter: 1,
            prev_structure: None,
        }
    }
}

impl SegmenterState {
    fn open_group(&mut self) {
        self.current_group_id = self.group_id_counter;
        self.group_id_counter += 1;
    }

    /// Apply one line. `index` is the line's position in the prompt and
    /// `line` its untouched text.
    pub fn step(mut self, index: usize, line: &str) -> (Self, Option<ParsedExercise>) {
        let folded = line.trim().to_lowercase();

        match classify(&folded) {
            LineKind::Header(structure) => {
                self.current_structure = structure;
                self.open_group();
                tracing::debug!(line = index, %structure, group = self.current_group_id, "structure header");
                return (self, None);
            }
            LineKind::Blank => {
                self.current_structure = SetStructure::None;
                self.prev_structure = None;
                return (self, None);
            }
            LineKind::Noise => return (self, None),
            LineKind::Exercise => {}
        }

        // A different structure block started without a blank line in between.
        if self.prev_structure.is_some_and(|prev| prev != self.current_structure)
            && self.current_structure != SetStructure::None
        {
            self.open_group();
        }

        let parsed = exercise_name(&folded).map(|name| {
            if self.current_structure == SetStructure::None {
                self.open_group();
            }
            ParsedExercise {
                name: name.to_string(),
                set_structure: self.current_structure,
                group_id: self.current_group_id,
                line: index,
                source: line.to_string(),
            }
        });

        if parsed.is_none() {
            tracing::trace!(line = index, text = %folded, "no exercise name on line");
        }

        self.prev_structure = Some(self.current_structure);
        (self, parsed)
    }
}

/// Split `text` into exercises with their set structure and group id.
///
/// `ParsedExercise::line` indexes into `text` split on `\n`.
pub fn segment(text: &str) -> Vec<ParsedExercise> {
    // Blank lines before the first exercise only reset an already-initial
    // state, so the whole text can be folded without trimming it first.
    let (_, exercises) = text.split('\n').enumerate().fold(
        (SegmenterState::default(), Vec::new()),
        |(state, mut exercises), (index, line)| {
            let (state, parsed) = state.step(index, line);
            exercises.extend(parsed);
            (state, exercises)
        },
    );

    exercises
}
