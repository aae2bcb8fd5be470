//! # kro-core
//!
//! Validation and completion engine for kro ResourceGraphDefinition documents.
//!
//! Validates:
//! - Base YAML syntax (with `{{ }}` expressions neutralized first)
//! - Structural well-formedness of embedded CEL expressions
//! - Required top-level and nested fields
//!
//! Resolves:
//! - The document section enclosing a cursor, for completion

pub mod authoring;
pub mod config;
pub mod context;
pub mod diagnostics;
pub mod parsers;
mod regex_util;
pub mod rules;

use std::path::{Path, PathBuf};

use rayon::prelude::*;

pub use authoring::{completion_candidates, CompletionCandidate, CompletionKind, Completions};
pub use config::{LintConfig, CONFIG_FILE_NAME};
pub use context::{resolve_context, Section, SectionContext};
pub use diagnostics::{
    Diagnostic, DiagnosticSource, FileDiagnostic, LintError, LintResult, Position, Range, Severity,
};
use rules::Validator;

/// Read-only view of one open document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSnapshot {
    pub uri: String,
    pub text: String,
    pub language_id: String,
}

impl DocumentSnapshot {
    pub fn new(uri: impl Into<String>, text: impl Into<String>, language_id: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            text: text.into(),
            language_id: language_id.into(),
        }
    }
}

/// Validate document text with the default configuration.
pub fn validate(content: &str) -> Vec<Diagnostic> {
    validate_with_config(content, &LintConfig::default())
}

/// Validate document text.
///
/// Runs base syntax first; if that fails its single diagnostic is the whole
/// result. Otherwise expression and schema diagnostics follow, in that order.
pub fn validate_with_config(content: &str, config: &LintConfig) -> Vec<Diagnostic> {
    let syntax = rules::syntax::SyntaxValidator.validate(content, config);
    if !syntax.is_empty() {
        tracing::debug!(
            line = syntax[0].range.start.line,
            "base syntax failed, skipping expression and schema checks"
        );
        return syntax;
    }

    let validators: [&dyn Validator; 2] = [
        &rules::expression::ExpressionValidator,
        &rules::schema::SchemaValidator,
    ];

    let diagnostics: Vec<Diagnostic> = validators
        .iter()
        .flat_map(|validator| validator.validate(content, config))
        .collect();

    tracing::debug!(count = diagnostics.len(), "validation finished");
    diagnostics
}

/// Validate an open document, honoring the configured file extensions.
pub fn validate_document(document: &DocumentSnapshot, config: &LintConfig) -> Vec<Diagnostic> {
    if !config.accepts(&document.uri) {
        return Vec::new();
    }
    validate_with_config(&document.text, config)
}

/// Validate a single file on disk
pub fn validate_file(path: &Path, config: &LintConfig) -> LintResult<Vec<Diagnostic>> {
    if !config.accepts(&path.to_string_lossy()) {
        return Ok(vec![]);
    }

    let content = std::fs::read_to_string(path).map_err(|e| LintError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(validate_with_config(&content, config))
}

/// Validate every matching file under `path`
pub fn validate_project(path: &Path, config: &LintConfig) -> LintResult<Vec<FileDiagnostic>> {
    use ignore::WalkBuilder;

    let exclude_patterns = config
        .exclude
        .iter()
        .map(|p| {
            glob::Pattern::new(p).map_err(|e| LintError::InvalidExclude {
                pattern: p.clone(),
                source: e,
            })
        })
        .collect::<LintResult<Vec<_>>>()?;

    // Sequential walk, parallel validation
    let paths: Vec<PathBuf> = WalkBuilder::new(path)
        .standard_filters(true)
        .build()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .filter(|entry| {
            let path_str = entry.path().to_string_lossy();
            config.accepts(&path_str) && !exclude_patterns.iter().any(|p| p.matches(&path_str))
        })
        .map(|entry| entry.path().to_path_buf())
        .collect();

    tracing::debug!(files = paths.len(), root = %path.display(), "validating project");

    // Unreadable files fail the whole walk.
    let per_file = paths
        .par_iter()
        .map(|file_path| -> LintResult<Vec<FileDiagnostic>> {
            let found = validate_file(file_path, config)?;
            Ok(found
                .into_iter()
                .map(|diagnostic| FileDiagnostic {
                    file: file_path.clone(),
                    diagnostic,
                })
                .collect::<Vec<_>>())
        })
        .collect::<LintResult<Vec<_>>>()?;

    let mut diagnostics: Vec<FileDiagnostic> = per_file.into_iter().flatten().collect();

    // Deterministic order: file, then position, then rule
    diagnostics.sort_by(|a, b| {
        a.file
            .cmp(&b.file)
            .then_with(|| a.diagnostic.range.start.cmp(&b.diagnostic.range.start))
            .then_with(|| a.diagnostic.rule.cmp(&b.diagnostic.rule))
    });

    Ok(diagnostics)
}
