//! Cursor section resolution for completion.
//!
//! Nesting is inferred from indentation alone: walking upward from the cursor
//! line, the first line indented strictly less than the cursor line decides
//! the section. No YAML parse is involved, so invalid indentation gives a
//! best-effort answer rather than an error.

use serde::{Deserialize, Serialize};

use crate::diagnostics::Position;
use crate::parsers::expression::{CLOSE_MARKER, OPEN_MARKER};

/// Structural region enclosing a cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Section {
    TopLevel,
    Spec,
    Resources,
    Relations,
    Parameters,
    /// Inside an unterminated `{{` on the cursor line
    Expression,
}

impl Section {
    pub const fn as_str(self) -> &'static str {
        match self {
            Section::TopLevel => "top-level",
            Section::Spec => "spec",
            Section::Resources => "resources",
            Section::Relations => "relations",
            Section::Parameters => "parameters",
            Section::Expression => "expression",
        }
    }

    /// Section introduced by a header line (already trimmed).
    ///
    /// `spec:` and any non-header line resolve to [`Section::TopLevel`].
    pub fn from_header(trimmed: &str) -> Section {
        if trimmed.starts_with("resources:") {
            Section::Resources
        } else if trimmed.starts_with("relations:") {
            Section::Relations
        } else if trimmed.starts_with("parameters:") {
            Section::Parameters
        } else {
            Section::TopLevel
        }
    }
}

/// Section plus the cursor line's text up to the cursor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionContext {
    pub section: Section,
    pub line_prefix: String,
}

impl SectionContext {
    fn top_level() -> Self {
        Self {
            section: Section::TopLevel,
            line_prefix: String::new(),
        }
    }
}

/// Outcome of feeding one line to a [`SectionResolver`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scan {
    Continue,
    Resolved(Section),
}

/// Backward indentation scan as a two-field state machine.
///
/// Lines are fed nearest-first. Lines at or above the threshold indent are
/// skipped; the first shallower line resolves the section and the machine
/// stops accepting input.
#[derive(Debug, Clone)]
pub struct SectionResolver {
    threshold: usize,
    resolved: Option<Section>,
}

impl SectionResolver {
    pub fn new(cursor_indent: usize) -> Self {
        Self {
            threshold: cursor_indent,
            resolved: None,
        }
    }

    /// Feed one preceding line, given as its indent and trimmed text.
    pub fn observe(&mut self, indent: usize, trimmed: &str) -> Scan {
        if let Some(section) = self.resolved {
            return Scan::Resolved(section);
        }
        if indent >= self.threshold {
            return Scan::Continue;
        }

        let section = Section::from_header(trimmed);
        self.resolved = Some(section);
        Scan::Resolved(section)
    }

    pub fn section(&self) -> Section {
        self.resolved.unwrap_or(Section::TopLevel)
    }
}

/// Number of leading spaces
pub fn indentation(line: &str) -> usize {
    line.bytes().take_while(|b| *b == b' ').count()
}

/// Resolve the section at `position` in `content`.
pub fn resolve_context(content: &str, position: Position) -> SectionContext {
    let lines: Vec<&str> = content.split('\n').collect();
    resolve_in_lines(&lines, position)
}

/// Resolve the section at `position` given pre-split lines.
pub fn resolve_in_lines(lines: &[&str], position: Position) -> SectionContext {
    let line_idx = position.line as usize;
    let Some(line) = lines.get(line_idx) else {
        return SectionContext::top_level();
    };

    let line_prefix = line_prefix(line, position.character as usize).to_string();

    if inside_open_expression(&line_prefix) {
        return SectionContext {
            section: Section::Expression,
            line_prefix,
        };
    }

    let mut resolver = SectionResolver::new(indentation(line));
    for prev in lines[..line_idx].iter().rev() {
        if let Scan::Resolved(_) = resolver.observe(indentation(prev), prev.trim()) {
            break;
        }
    }

    SectionContext {
        section: resolver.section(),
        line_prefix,
    }
}

/// Text of `line` before the `character`-th char, or the whole line.
fn line_prefix(line: &str, character: usize) -> &str {
    match line.char_indices().nth(character) {
        Some((byte, _)) => &line[..byte],
        None => line,
    }
}

/// Whether the last `{{` in `prefix` has no `}}` after it.
fn inside_open_expression(prefix: &str) -> bool {
    prefix
        .rfind(OPEN_MARKER)
        .is_some_and(|idx| !prefix[idx + OPEN_MARKER.len()..].contains(CLOSE_MARKER))
}
