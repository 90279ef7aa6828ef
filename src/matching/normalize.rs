//! Text normalization.
//!
//! Two forms are produced:
//!
//! - [`normalize`]: identity form for name comparison (lowercase, trimmed).
//! - [`compact`] / [`compact_cased`]: a whitespace-insensitive form of a
//!   workout line, so the detail patterns never have to tolerate spacing
//!   around numbers, units, `@` and effort ratings.
//!
//! ```text
//! "Bench 3 x 10 @ 100 LBS, 2 RIR"
//!   compact_cased ─▶ "Bench 3x10 @100LBS, 2RIR"
//!   compact       ─▶ "bench 3x10 @100lbs, 2rir"
//! ```
//!
//! Collapsing only removes whitespace, so the cased form and its ASCII
//! lowercase share byte offsets. The extractor relies on that to report
//! literal rep tokens ("Max") with their original casing.

/// Lowercase and trim.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Collapse the whitespace around numeric tokens and units, then lowercase.
pub fn compact(text: &str) -> String {
    compact_cased(text).to_lowercase()
}

/// Collapse the whitespace around numeric tokens and units, keeping case.
pub fn compact_cased(text: &str) -> String {
    // 3 x 10, 4 - 8
    let out = regex!(r"(\d)\s*([xX\-])\s*(\d)").replace_all(text, "${1}${2}${3}").into_owned();
    // 100 lbs, 40 kg
    let out = regex!(r"(?i)(\d)\s*(lbs|lb|kgs|kg)").replace_all(&out, "${1}${2}").into_owned();
    // @ 100
    let out = regex!(r"@\s*(\d)").replace_all(&out, "@${1}").into_owned();
    // ( 100lbs )
    let out = regex!(r"(?i)\(\s*(\d+)\s*(lbs|lb|kgs|kg)?\s*\)").replace_all(&out, "(${1}${2})").into_owned();
    // 2 rir, 8 rpe
    regex!(r"(?i)(\d)\s*(rir|rpe)").replace_all(&out, "${1}${2}").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("  Bench Press ", "bench press")]
    #[case("SQUAT", "squat")]
    #[case("", "")]
    #[case("\tlat   pulldown\n", "lat   pulldown")]
    fn normalize_folds_and_trims(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize(input), expected);
    }

    #[rstest]
    #[case(" Romanian Deadlift")]
    #[case("ÉCARTÉ  ")]
    #[case("already normal")]
    fn normalize_is_idempotent(#[case] input: &str) {
        let once = normalize(input);
        assert_eq!(normalize(&once), once);
    }

    #[rstest]
    #[case("3 x 10", "3x10")]
    #[case("4 - 8, 10", "4-8, 10")]
    #[case("Bench 3 X 10", "bench 3x10")]
    #[case("@ 100 lbs", "@100lbs")]
    #[case("( 40 KG )", "(40kg)")]
    #[case("( 100 )", "(100)")]
    #[case("2 RIR, 8 rpe", "2rir, 8rpe")]
    #[case("60s rest", "60s rest")]
    #[case("plank", "plank")]
    fn compact_collapses_numeric_spacing(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(compact(input), expected);
    }

    #[test]
    fn compact_cased_keeps_case_and_offsets() {
        let cased = compact_cased("Push Ups 3 x 12, Max @ 20 KG");
        assert_eq!(cased, "Push Ups 3x12, Max @20KG");
        assert_eq!(cased.to_ascii_lowercase(), compact("Push Ups 3 x 12, Max @ 20 KG"));
    }
}
