//! Diagnostic types and error reporting

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

pub type LintResult<T> = Result<T, LintError>;

/// Zero-based cursor location. `character` counts Unicode scalar values
/// within a line split on `\n`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub const fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// Half-open range between two positions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Zero-width range at the start of `line`.
    pub const fn line_start(line: u32) -> Self {
        Self::new(Position::new(line, 0), Position::new(line, 0))
    }

    /// Range covering `line` of `content` from column 0 to its last character.
    ///
    /// Lines past the end of `content` yield a zero-width range.
    pub fn full_line(content: &str, line: u32) -> Self {
        let width = content
            .split('\n')
            .nth(line as usize)
            .map(|l| l.trim_end_matches('\r').chars().count() as u32)
            .unwrap_or(0);
        Self::new(Position::new(line, 0), Position::new(line, width))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
    Info,
    Hint,
}

/// Which stage produced a diagnostic. The string forms are a stable
/// contract with editor clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagnosticSource {
    #[serde(rename = "yaml")]
    Yaml,
    #[serde(rename = "cel")]
    Cel,
    #[serde(rename = "kro-schema")]
    KroSchema,
}

impl DiagnosticSource {
    pub const fn as_str(self) -> &'static str {
        match self {
            DiagnosticSource::Yaml => "yaml",
            DiagnosticSource::Cel => "cel",
            DiagnosticSource::KroSchema => "kro-schema",
        }
    }
}

impl fmt::Display for DiagnosticSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A diagnostic produced by one validation call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub range: Range,
    pub severity: Severity,
    pub source: DiagnosticSource,
    /// Stable rule code, e.g. `cel::delimiters`
    pub rule: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl Diagnostic {
    pub fn error(range: Range, source: DiagnosticSource, rule: &str, message: String) -> Self {
        Self {
            range,
            severity: Severity::Error,
            source,
            rule: rule.to_string(),
            message,
            suggestion: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestion = Some(suggestion);
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// A diagnostic tied to the file it was found in, as reported by project walks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileDiagnostic {
    pub file: PathBuf,
    #[serde(flatten)]
    pub diagnostic: Diagnostic,
}

/// Linter errors
#[derive(Error, Debug)]
pub enum LintError {
    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid exclude pattern in config: {pattern}")]
    InvalidExclude {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
