//! Marker kinds for the bracket template dialect.
//!
//! The dialect has exactly five control markers. Anything else in the
//! source, including other bracketed text, is plain markup and flows
//! through untouched.

/// The literal prefix of a loop-open directive. The full head runs to the
/// next `]` and carries the iterable expression and optional clauses.
pub const FOR_OPEN: &str = "[for";
/// `[empty]` - taken when the iterable yields zero iterations.
pub const EMPTY: &str = "[empty]";
/// `[between]` - separator content, emitted between iterations.
pub const BETWEEN: &str = "[between]";
/// `[/between]` - optional end of the separator segment.
pub const BETWEEN_END: &str = "[/between]";
/// `[/for]` - loop close.
pub const FOR_END: &str = "[/for]";

/// The kind of control marker recognized by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    /// `[for <iterable> [as <alias>] [key <expr>] [when <expr>]]`
    ForOpen,
    /// `[empty]`
    Empty,
    /// `[between]`
    Between,
    /// `[/between]`
    BetweenEnd,
    /// `[/for]`
    ForEnd,
}

impl MarkerKind {
    /// Classifies the marker starting at the beginning of `input`, if any.
    ///
    /// `[for` must be followed by whitespace or `]` so that bracketed text
    /// like `[format]` stays plain text.
    pub fn match_at(input: &str) -> Option<MarkerKind> {
        if input.starts_with(EMPTY) {
            return Some(MarkerKind::Empty);
        }
        if input.starts_with(BETWEEN) {
            return Some(MarkerKind::Between);
        }
        if input.starts_with(BETWEEN_END) {
            return Some(MarkerKind::BetweenEnd);
        }
        if input.starts_with(FOR_END) {
            return Some(MarkerKind::ForEnd);
        }
        if let Some(rest) = input.strip_prefix(FOR_OPEN) {
            match rest.chars().next() {
                Some(c) if c.is_whitespace() || c == ']' => return Some(MarkerKind::ForOpen),
                _ => return None,
            }
        }
        None
    }

    /// The source spelling used in error messages.
    pub fn label(self) -> &'static str {
        match self {
            MarkerKind::ForOpen => "[for]",
            MarkerKind::Empty => "[empty]",
            MarkerKind::Between => "[between]",
            MarkerKind::BetweenEnd => "[/between]",
            MarkerKind::ForEnd => "[/for]",
        }
    }

    /// The byte length of the marker's fixed spelling. `ForOpen` has no
    /// fixed length; its head runs to the closing `]`.
    pub fn fixed_len(self) -> Option<usize> {
        match self {
            MarkerKind::ForOpen => None,
            MarkerKind::Empty => Some(EMPTY.len()),
            MarkerKind::Between => Some(BETWEEN.len()),
            MarkerKind::BetweenEnd => Some(BETWEEN_END.len()),
            MarkerKind::ForEnd => Some(FOR_END.len()),
        }
    }
}
