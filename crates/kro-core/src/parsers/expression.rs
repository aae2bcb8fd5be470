//! Locates embedded `{{ ... }}` expressions in document text.

use regex::Regex;

use crate::diagnostics::{Position, Range};
use crate::regex_util::static_regex;

pub const OPEN_MARKER: &str = "{{";
pub const CLOSE_MARKER: &str = "}}";

// Body may not contain `}`, so each span ends at the nearest closer.
static_regex!(fn marker_pair, r"\{\{([^}]*)\}\}");

/// One embedded expression found in a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionSpan<'a> {
    pub range: Range,
    /// Raw text including the markers
    pub text: &'a str,
}

impl<'a> ExpressionSpan<'a> {
    /// Expression text with markers stripped and whitespace trimmed
    pub fn body(&self) -> &'a str {
        expression_body(self.text)
    }
}

/// Strip one leading `{{` and one trailing `}}`, then trim.
pub fn expression_body(raw: &str) -> &str {
    let raw = raw.strip_prefix(OPEN_MARKER).unwrap_or(raw);
    let raw = raw.strip_suffix(CLOSE_MARKER).unwrap_or(raw);
    raw.trim()
}

/// Lazily iterate over every expression span, line by line.
///
/// An opener without a closer on the same line is not a span.
pub fn extract_expressions(content: &str) -> impl Iterator<Item = ExpressionSpan<'_>> + '_ {
    content
        .split('\n')
        .enumerate()
        .flat_map(|(line_idx, line)| {
            marker_pair().find_iter(line).map(move |m| {
                let line_no = line_idx as u32;
                let start = char_column(line, m.start());
                let end = start + m.as_str().chars().count() as u32;
                ExpressionSpan {
                    range: Range::new(Position::new(line_no, start), Position::new(line_no, end)),
                    text: m.as_str(),
                }
            })
        })
}

/// Replace every marker pair, matched across the whole document, with `replacement`.
pub(crate) fn replace_marker_pairs<'a>(content: &'a str, replacement: &str) -> std::borrow::Cow<'a, str> {
    marker_pair().replace_all(content, regex::NoExpand(replacement))
}

fn char_column(line: &str, byte_offset: usize) -> u32 {
    line[..byte_offset].chars().count() as u32
}
