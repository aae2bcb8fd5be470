//! JSON output format support.

use kro_core::{FileDiagnostic, Severity};
use serde::Serialize;
use std::collections::HashSet;
use std::path::Path;

/// Root structure for JSON output.
#[derive(Debug, Serialize)]
pub struct JsonOutput {
    /// Version of kro that produced this output.
    pub version: String,
    /// Number of distinct files with at least one diagnostic.
    pub files_with_diagnostics: usize,
    pub diagnostics: Vec<JsonDiagnostic>,
    pub summary: JsonSummary,
}

/// A single diagnostic in JSON format.
#[derive(Debug, Serialize)]
pub struct JsonDiagnostic {
    /// error, warning, info or hint
    pub level: String,
    /// Stage that produced it: yaml, cel or kro-schema
    pub source: String,
    /// Rule code (e.g., cel::delimiters).
    pub rule: String,
    /// File path (forward slashes for cross-platform consistency).
    pub file: String,
    /// Line number (1-based).
    pub line: u32,
    /// Column number (1-based).
    pub column: u32,
    pub end_line: u32,
    pub end_column: u32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

#[derive(Debug, Default, Serialize)]
pub struct JsonSummary {
    pub errors: usize,
    pub warnings: usize,
    pub info: usize,
}

pub fn severity_to_string(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
        Severity::Info => "info",
        Severity::Hint => "hint",
    }
}

fn path_to_string(path: &Path, base_path: &Path) -> String {
    path.strip_prefix(base_path)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

/// Convert diagnostics to JSON output format.
pub fn diagnostics_to_json(diagnostics: &[FileDiagnostic], base_path: &Path) -> JsonOutput {
    let mut files = HashSet::new();
    let mut summary = JsonSummary::default();

    let json_diagnostics = diagnostics
        .iter()
        .map(|FileDiagnostic { file, diagnostic }| {
            files.insert(file);
            match diagnostic.severity {
                Severity::Error => summary.errors += 1,
                Severity::Warning => summary.warnings += 1,
                Severity::Info | Severity::Hint => summary.info += 1,
            }
            let range = diagnostic.range;
            JsonDiagnostic {
                level: severity_to_string(diagnostic.severity).to_string(),
                source: diagnostic.source.to_string(),
                rule: diagnostic.rule.clone(),
                file: path_to_string(file, base_path),
                line: range.start.line + 1,
                column: range.start.character + 1,
                end_line: range.end.line + 1,
                end_column: range.end.character + 1,
                message: diagnostic.message.clone(),
                suggestion: diagnostic.suggestion.clone(),
            }
        })
        .collect();

    JsonOutput {
        version: env!("CARGO_PKG_VERSION").to_string(),
        files_with_diagnostics: files.len(),
        diagnostics: json_diagnostics,
        summary,
    }
}
