use liftparse::{ExerciseDetails, InterpretationVerbose, SetStructure, WorkoutRecord};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const MAGENTA: &str = "\x1b[35m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

pub fn print_run(input: &str, out: &InterpretationVerbose, color: bool) {
    let palette = ansi::Palette::new(color);
    let lines = input.lines().filter(|l| !l.trim().is_empty()).count();
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Parsing {lines} line(s)"), ansi::CYAN)));

    println!("\n{}", palette.paint("━━━ Exercises ━━━", ansi::GRAY));
    if out.data.is_empty() {
        println!("{}", palette.dim("  No exercises found"));
        println!("\n{}", palette.paint("Possible reasons:", ansi::YELLOW));
        println!("  • Lines start with a digit or symbol instead of a name");
        println!("  • Every line is a header or a skipped line (rest, repeat, hiit)");
    } else {
        print_records(out, &palette);
    }

    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    println!(
        "  Total: {}  │  Segment: {}  │  Resolve: {}  │  Extract: {}",
        palette.paint(format!("{:?}", out.details.total), ansi::GREEN),
        palette.dim(format!("{:?}", out.details.segment)),
        palette.paint(format!("{:?}", out.details.resolve), ansi::CYAN),
        palette.dim(format!("{:?}", out.details.extract)),
    );
    println!();
}

fn print_records(out: &InterpretationVerbose, palette: &ansi::Palette) {
    let mut current_group = None;

    for (record, trace) in out.data.records().iter().zip(&out.details.traces) {
        if current_group != Some(record.group_id) {
            current_group = Some(record.group_id);
            println!("  {}", palette.paint(group_label(record), ansi::MAGENTA));
        }

        let resolved = match record.top_matches.first() {
            Some(best) => palette.bold(palette.paint(format!("{} ({:.2})", best.name, best.score), ansi::GREEN)),
            None => palette.paint("unresolved", ansi::YELLOW),
        };
        println!(
            "    {} {} {} {}",
            palette.paint(format!("[{}]", record.occurrence), ansi::GRAY),
            palette.paint(&record.raw_name, ansi::BLUE),
            palette.dim("→"),
            resolved
        );

        if record.top_matches.len() > 1 {
            let others: Vec<String> =
                record.top_matches[1..].iter().map(|m| format!("{} ({:.2})", m.name, m.score)).collect();
            println!("        {} {}", palette.dim("also:"), palette.dim(others.join(", ")));
        }

        if let Some(details) = &record.details {
            println!("        {} {}", palette.dim("details:"), format_details(details));
        }

        let rules = if trace.rules.is_empty() { "none".to_string() } else { trace.rules.join(", ") };
        println!("        {} {}", palette.dim("rules:"), palette.paint(rules, ansi::CYAN));
        println!("        {} {}", palette.dim("line:"), palette.dim(&trace.compact));
    }
}

fn group_label(record: &WorkoutRecord) -> String {
    match record.set_structure {
        SetStructure::None => format!("group {}", record.group_id),
        structure => format!("group {} ({structure})", record.group_id),
    }
}

fn format_details(details: &ExerciseDetails) -> String {
    let mut parts = Vec::new();
    if let Some(sets) = details.sets {
        parts.push(format!("sets={sets}"));
    }
    if let Some(reps) = &details.reps {
        let reps: Vec<String> = reps.iter().map(ToString::to_string).collect();
        parts.push(format!("reps={}", reps.join(",")));
    }
    if let Some(weight) = &details.weight {
        let weight: Vec<String> = weight.iter().map(ToString::to_string).collect();
        parts.push(format!("weight={}{:?}", weight.join(","), details.weight_unit).to_lowercase());
    }
    if let Some(rir) = details.rir {
        parts.push(format!("{:?}={rir}", details.rir_or_rpe).to_lowercase());
    }
    if let Some(rest) = &details.rest {
        parts.push(format!("rest={rest}"));
    }
    if parts.is_empty() { "none".to_string() } else { parts.join(" ") }
}
