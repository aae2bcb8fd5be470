//! Structural checks for embedded `{{ }}` expressions.
//!
//! These are well-formedness heuristics, not a CEL parser: delimiter balance,
//! a blacklist of malformed operators, and `?`/`:` parity.

use thiserror::Error;

use crate::{
    config::LintConfig,
    diagnostics::{Diagnostic, DiagnosticSource},
    parsers::expression::extract_expressions,
    parsers::scanner::{QuoteAwareScanner, QuoteKind},
    rules::Validator,
};

/// Operator sequences that are never valid in an expression.
pub const INVALID_OPERATORS: &[&str] = &["++", "--", "**", "//", "/*", "*/", "&&&&", "||||"];

const TRAILING_OPERATORS: &[char] = &['+', '-', '*', '/', '&', '|', '^', '%', '<', '>'];

/// First structural problem found in an expression body
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpressionError {
    #[error("Empty CEL expression")]
    Empty,

    #[error("Unexpected closing delimiter: {0}")]
    UnexpectedClosing(char),

    #[error("Mismatched delimiter: expected {expected} but found {found}")]
    MismatchedDelimiter { expected: char, found: char },

    #[error("Unclosed {} quote", .0.name())]
    UnclosedQuote(QuoteKind),

    #[error("Unclosed delimiters: {0}")]
    UnclosedDelimiters(String),

    #[error("Invalid operator sequence: {0}")]
    InvalidOperator(&'static str),

    #[error("Expression ends with an operator")]
    TrailingOperator,

    #[error("Ternary expression missing colon")]
    MissingColon,

    #[error("Unexpected colon in expression")]
    UnexpectedColon,
}

impl ExpressionError {
    /// Rule code reported on the diagnostic
    pub fn rule(&self) -> &'static str {
        match self {
            ExpressionError::Empty => "cel::empty",
            ExpressionError::UnexpectedClosing(_)
            | ExpressionError::MismatchedDelimiter { .. }
            | ExpressionError::UnclosedQuote(_)
            | ExpressionError::UnclosedDelimiters(_) => "cel::delimiters",
            ExpressionError::InvalidOperator(_) | ExpressionError::TrailingOperator => {
                "cel::operators"
            }
            ExpressionError::MissingColon | ExpressionError::UnexpectedColon => "cel::ternary",
        }
    }
}

/// Validate one expression body (markers already stripped).
///
/// Checks run in a fixed order and the first failure wins.
pub fn validate_expression(body: &str) -> Result<(), ExpressionError> {
    if body.trim().is_empty() {
        return Err(ExpressionError::Empty);
    }

    check_balanced_delimiters(body)?;
    check_operators(body)?;
    check_ternary(body)
}

fn opener_for(closer: char) -> Option<char> {
    match closer {
        ')' => Some('('),
        ']' => Some('['),
        '}' => Some('{'),
        _ => None,
    }
}

pub fn check_balanced_delimiters(body: &str) -> Result<(), ExpressionError> {
    let mut stack: Vec<char> = Vec::new();
    let mut scanner = QuoteAwareScanner::new(body);

    for ch in scanner.by_ref() {
        if matches!(ch, '(' | '[' | '{') {
            stack.push(ch);
            continue;
        }

        if let Some(opener) = opener_for(ch) {
            match stack.last() {
                None => return Err(ExpressionError::UnexpectedClosing(ch)),
                Some(&top) if top != opener => {
                    return Err(ExpressionError::MismatchedDelimiter {
                        expected: opener,
                        found: top,
                    })
                }
                Some(_) => {
                    stack.pop();
                }
            }
        }
    }

    if let Some(quote) = scanner.open_quote() {
        return Err(ExpressionError::UnclosedQuote(quote));
    }

    if !stack.is_empty() {
        return Err(ExpressionError::UnclosedDelimiters(stack.into_iter().collect()));
    }

    Ok(())
}

pub fn check_operators(body: &str) -> Result<(), ExpressionError> {
    if let Some(op) = INVALID_OPERATORS.iter().find(|op| body.contains(**op)) {
        return Err(ExpressionError::InvalidOperator(*op));
    }

    let trimmed = body.trim_end();
    let without_eq = trimmed.strip_suffix('=').unwrap_or(trimmed);
    if without_eq.ends_with(TRAILING_OPERATORS) {
        return Err(ExpressionError::TrailingOperator);
    }

    Ok(())
}

pub fn check_ternary(body: &str) -> Result<(), ExpressionError> {
    let (questions, colons) =
        QuoteAwareScanner::new(body).fold((0usize, 0usize), |(q, c), ch| match ch {
            '?' => (q + 1, c),
            ':' => (q, c + 1),
            _ => (q, c),
        });

    match questions.cmp(&colons) {
        std::cmp::Ordering::Greater => Err(ExpressionError::MissingColon),
        std::cmp::Ordering::Less => Err(ExpressionError::UnexpectedColon),
        std::cmp::Ordering::Equal => Ok(()),
    }
}

pub struct ExpressionValidator;

impl Validator for ExpressionValidator {
    fn validate(&self, content: &str, config: &LintConfig) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        if !config.rules.expressions {
            return diagnostics;
        }

        for span in extract_expressions(content) {
            let Err(error) = validate_expression(span.body()) else {
                continue;
            };
            if !config.is_rule_enabled(error.rule()) {
                continue;
            }
            diagnostics.push(Diagnostic::error(
                span.range,
                DiagnosticSource::Cel,
                error.rule(),
                format!("CEL Expression Error: {}", error),
            ));
        }

        diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Position;

    #[test]
    fn test_ternary_balanced() {
        assert_eq!(validate_expression("a ? b : c"), Ok(()));
    }

    #[test]
    fn test_ternary_missing_colon() {
        assert_eq!(validate_expression("a ? b"), Err(ExpressionError::MissingColon));
    }

    #[test]
    fn test_ternary_unexpected_colon() {
        assert_eq!(validate_expression("a : b"), Err(ExpressionError::UnexpectedColon));
    }

    #[test]
    fn test_ternary_ignores_quoted_punctuation() {
        assert_eq!(validate_expression("x == 'a:b?' ? 1 : 2"), Ok(()));
    }

    #[test]
    fn test_unclosed_paren() {
        let err = validate_expression("foo(bar").unwrap_err();
        assert_eq!(err, ExpressionError::UnclosedDelimiters("(".to_string()));
        assert!(err.to_string().contains('('));
    }

    #[test]
    fn test_unclosed_delimiters_listed_in_stack_order() {
        let err = validate_expression("a([{").unwrap_err();
        assert_eq!(err.to_string(), "Unclosed delimiters: ([{");
    }

    #[test]
    fn test_unexpected_closing() {
        assert_eq!(
            validate_expression("foo)"),
            Err(ExpressionError::UnexpectedClosing(')'))
        );
    }

    #[test]
    fn test_mismatched_delimiter_names_both_openers() {
        let err = validate_expression("foo(bar]").unwrap_err();
        assert_eq!(
            err,
            ExpressionError::MismatchedDelimiter {
                expected: '[',
                found: '('
            }
        );
        assert_eq!(err.to_string(), "Mismatched delimiter: expected [ but found (");
    }

    #[test]
    fn test_unclosed_single_quote() {
        let err = validate_expression("'unterminated").unwrap_err();
        assert_eq!(err, ExpressionError::UnclosedQuote(QuoteKind::Single));
        assert_eq!(err.to_string(), "Unclosed single quote");
    }

    #[test]
    fn test_unclosed_double_quote() {
        let err = validate_expression("name == \"x").unwrap_err();
        assert_eq!(err.to_string(), "Unclosed double quote");
    }

    #[test]
    fn test_brackets_inside_quotes_ignored() {
        assert_eq!(validate_expression("f('(', \"]\")"), Ok(()));
    }

    #[test]
    fn test_quote_check_precedes_stack_check() {
        assert_eq!(
            validate_expression("f('x"),
            Err(ExpressionError::UnclosedQuote(QuoteKind::Single))
        );
    }

    #[test]
    fn test_empty_expression() {
        assert_eq!(validate_expression("   "), Err(ExpressionError::Empty));
    }

    #[test]
    fn test_invalid_operator_sequences() {
        for op in INVALID_OPERATORS {
            let body = format!("a {} b", op);
            assert_eq!(
                validate_expression(&body),
                Err(ExpressionError::InvalidOperator(*op)),
                "{} should be rejected",
                op
            );
        }
    }

    #[test]
    fn test_trailing_operator() {
        assert_eq!(validate_expression("a +"), Err(ExpressionError::TrailingOperator));
        assert_eq!(validate_expression("a <= "), Err(ExpressionError::TrailingOperator));
        assert_eq!(validate_expression("a >="), Err(ExpressionError::TrailingOperator));
        assert_eq!(validate_expression("a == b"), Ok(()));
    }

    #[test]
    fn test_delimiters_checked_before_operators() {
        assert_eq!(
            validate_expression("(a +"),
            Err(ExpressionError::UnclosedDelimiters("(".to_string()))
        );
    }

    #[test]
    fn test_operators_checked_before_ternary() {
        assert_eq!(
            validate_expression("a ? b ++ c"),
            Err(ExpressionError::InvalidOperator("++"))
        );
    }

    #[test]
    fn test_valid_expressions() {
        for body in [
            "params.name",
            "has(params.replicas) ? params.replicas : 1",
            "size(resources.web.status.ready) > 0",
            "string(params.port) + '-svc'",
            "params.tags[0]",
        ] {
            assert_eq!(validate_expression(body), Ok(()), "{} should be valid", body);
        }
    }

    #[test]
    fn test_rule_codes() {
        assert_eq!(ExpressionError::Empty.rule(), "cel::empty");
        assert_eq!(ExpressionError::UnexpectedClosing(')').rule(), "cel::delimiters");
        assert_eq!(ExpressionError::TrailingOperator.rule(), "cel::operators");
        assert_eq!(ExpressionError::UnexpectedColon.rule(), "cel::ternary");
    }

    #[test]
    fn test_validator_reports_each_bad_expression() {
        let content = "a: {{ foo( }}\nb: {{ ok }}\nc: {{ x ? y }}";
        let diagnostics = ExpressionValidator.validate(content, &LintConfig::default());

        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[0].range.start, Position::new(0, 3));
        assert_eq!(diagnostics[0].rule, "cel::delimiters");
        assert_eq!(diagnostics[1].range.start.line, 2);
        assert_eq!(diagnostics[1].rule, "cel::ternary");
        assert!(diagnostics
            .iter()
            .all(|d| d.source == DiagnosticSource::Cel && d.is_error()));
        assert!(diagnostics[1]
            .message
            .starts_with("CEL Expression Error: Ternary expression missing colon"));
    }

    #[test]
    fn test_validator_respects_config() {
        let content = "a: {{ x ? y }}";

        let mut config = LintConfig::default();
        config.rules.expressions = false;
        assert!(ExpressionValidator.validate(content, &config).is_empty());

        let mut config = LintConfig::default();
        config.rules.disabled_rules = vec!["cel::ternary".to_string()];
        assert!(ExpressionValidator.validate(content, &config).is_empty());
    }
}
