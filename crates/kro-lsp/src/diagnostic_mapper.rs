//! Maps kro-core diagnostics to LSP diagnostics.

use kro_core::{Diagnostic, Severity};
use tower_lsp::lsp_types::{
    Diagnostic as LspDiagnostic, DiagnosticSeverity, NumberOrString, Position, Range,
};

fn to_lsp_position(position: kro_core::Position) -> Position {
    Position {
        line: position.line,
        character: position.character,
    }
}

/// Convert a kro-core diagnostic to an LSP diagnostic.
///
/// The source tag (`yaml`, `cel`, `kro-schema`) becomes the LSP `source`,
/// the rule code becomes `code`, and a suggestion is appended to the message.
pub fn to_lsp_diagnostic(diag: &Diagnostic) -> LspDiagnostic {
    let severity = match diag.severity {
        Severity::Error => DiagnosticSeverity::ERROR,
        Severity::Warning => DiagnosticSeverity::WARNING,
        Severity::Info => DiagnosticSeverity::INFORMATION,
        Severity::Hint => DiagnosticSeverity::HINT,
    };

    let message = match diag.suggestion {
        Some(ref suggestion) => format!("{}\n\nSuggestion: {}", diag.message, suggestion),
        None => diag.message.clone(),
    };

    LspDiagnostic {
        range: Range {
            start: to_lsp_position(diag.range.start),
            end: to_lsp_position(diag.range.end),
        },
        severity: Some(severity),
        code: Some(NumberOrString::String(diag.rule.clone())),
        code_description: None,
        source: Some(diag.source.as_str().to_string()),
        message,
        related_information: None,
        tags: None,
        data: None,
    }
}

/// Convert a batch of kro-core diagnostics, preserving order.
pub fn to_lsp_diagnostics(diagnostics: &[Diagnostic]) -> Vec<LspDiagnostic> {
    diagnostics.iter().map(to_lsp_diagnostic).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use kro_core::{DiagnosticSource, Range as CoreRange};

    fn make_diagnostic(source: DiagnosticSource, rule: &str, message: &str) -> Diagnostic {
        Diagnostic::error(
            CoreRange::new(kro_core::Position::new(3, 4), kro_core::Position::new(3, 19)),
            source,
            rule,
            message.to_string(),
        )
    }

    #[test]
    fn test_error_severity_mapping() {
        let diag = make_diagnostic(DiagnosticSource::Cel, "cel::ternary", "bad");
        assert_eq!(
            to_lsp_diagnostic(&diag).severity,
            Some(DiagnosticSeverity::ERROR)
        );
    }

    #[test]
    fn test_other_severities() {
        let mut diag = make_diagnostic(DiagnosticSource::Cel, "cel::ternary", "bad");
        diag.severity = Severity::Warning;
        assert_eq!(
            to_lsp_diagnostic(&diag).severity,
            Some(DiagnosticSeverity::WARNING)
        );
        diag.severity = Severity::Info;
        assert_eq!(
            to_lsp_diagnostic(&diag).severity,
            Some(DiagnosticSeverity::INFORMATION)
        );
        diag.severity = Severity::Hint;
        assert_eq!(
            to_lsp_diagnostic(&diag).severity,
            Some(DiagnosticSeverity::HINT)
        );
    }

    #[test]
    fn test_range_is_copied_unchanged() {
        // Both sides are zero-based.
        let diag = make_diagnostic(DiagnosticSource::Cel, "cel::delimiters", "bad");
        let lsp_diag = to_lsp_diagnostic(&diag);
        assert_eq!(lsp_diag.range.start, Position::new(3, 4));
        assert_eq!(lsp_diag.range.end, Position::new(3, 19));
    }

    #[test]
    fn test_source_tags() {
        for (source, tag) in [
            (DiagnosticSource::Yaml, "yaml"),
            (DiagnosticSource::Cel, "cel"),
            (DiagnosticSource::KroSchema, "kro-schema"),
        ] {
            let lsp_diag = to_lsp_diagnostic(&make_diagnostic(source, "x::y", "m"));
            assert_eq!(lsp_diag.source.as_deref(), Some(tag));
        }
    }

    #[test]
    fn test_rule_code() {
        let diag = make_diagnostic(DiagnosticSource::KroSchema, "schema::kind", "bad");
        assert_eq!(
            to_lsp_diagnostic(&diag).code,
            Some(NumberOrString::String("schema::kind".to_string()))
        );
    }

    #[test]
    fn test_message_with_suggestion() {
        let diag = make_diagnostic(DiagnosticSource::KroSchema, "schema::kind", "Kro Schema Error")
            .with_suggestion("Set 'kind: ResourceGraphDefinition'".to_string());
        let lsp_diag = to_lsp_diagnostic(&diag);
        assert!(lsp_diag.message.starts_with("Kro Schema Error"));
        assert!(lsp_diag
            .message
            .contains("Suggestion: Set 'kind: ResourceGraphDefinition'"));
    }

    #[test]
    fn test_message_without_suggestion() {
        let diag = make_diagnostic(DiagnosticSource::Yaml, "yaml::syntax", "YAML Syntax Error: x");
        assert_eq!(to_lsp_diagnostic(&diag).message, "YAML Syntax Error: x");
    }

    #[test]
    fn test_batch_preserves_order() {
        let diagnostics = vec![
            make_diagnostic(DiagnosticSource::Cel, "cel::empty", "1"),
            make_diagnostic(DiagnosticSource::KroSchema, "schema::spec", "2"),
        ];
        let mapped = to_lsp_diagnostics(&diagnostics);
        assert_eq!(mapped.len(), 2);
        assert_eq!(mapped[0].message, "1");
        assert_eq!(mapped[1].message, "2");
        assert!(to_lsp_diagnostics(&[]).is_empty());
    }
}
