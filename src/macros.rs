#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

#[macro_export]
macro_rules! detail_rule {
    (
        name: $name:expr,
        field: $field:expr,
        pattern: $pat:literal
        , prod: |$caps:ident : &Captures, $line:ident : &CompactLine, $details:ident : &mut ExerciseDetails| $body:block
        $(,)?
    ) => {{
        $crate::DetailRule {
            name: $name,
            field: $field,
            pattern: $crate::regex!($pat),
            production: Box::new(
                move |$caps: &regex::Captures<'_>,
                      $line: &$crate::CompactLine,
                      $details: &mut $crate::ExerciseDetails|
                      -> bool { $body },
            ),
        }
    }};
}
