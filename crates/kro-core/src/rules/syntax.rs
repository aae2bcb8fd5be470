//! Base YAML syntax validation

use crate::{
    config::LintConfig,
    diagnostics::{Diagnostic, DiagnosticSource, Range},
    parsers::yaml::{check_syntax, preprocess_expressions},
    rules::Validator,
};

pub struct SyntaxValidator;

impl Validator for SyntaxValidator {
    fn validate(&self, content: &str, _config: &LintConfig) -> Vec<Diagnostic> {
        let preprocessed = preprocess_expressions(content);

        match check_syntax(&preprocessed) {
            Ok(()) => Vec::new(),
            Err(error) => vec![Diagnostic::error(
                Range::full_line(content, error.line),
                DiagnosticSource::Yaml,
                "yaml::syntax",
                format!("YAML Syntax Error: {}", error.message),
            )],
        }
    }
}
