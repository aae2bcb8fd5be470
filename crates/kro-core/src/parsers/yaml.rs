//! Base YAML syntax checking.
//!
//! Embedded expressions are not YAML, so they are swapped for an inert string
//! literal before the text reaches `serde_yaml`.

use regex::Regex;
use serde::Deserialize;
use std::borrow::Cow;

use super::expression::replace_marker_pairs;
use crate::regex_util::static_regex;

/// Literal substituted for every `{{ ... }}` before parsing
pub const EXPRESSION_PLACEHOLDER: &str = "'CEL_EXPRESSION'";

static_regex!(fn error_line, r"\bline (\d+)");

/// A YAML parse failure with a best-effort zero-based line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YamlSyntaxError {
    pub line: u32,
    pub message: String,
}

/// Replace every embedded expression with [`EXPRESSION_PLACEHOLDER`].
pub fn preprocess_expressions(content: &str) -> Cow<'_, str> {
    replace_marker_pairs(content, EXPRESSION_PLACEHOLDER)
}

/// Parse `content` as a YAML stream, returning the first error.
///
/// Whitespace-only text is accepted without parsing.
pub fn check_syntax(content: &str) -> Result<(), YamlSyntaxError> {
    if content.trim().is_empty() {
        return Ok(());
    }

    for document in serde_yaml::Deserializer::from_str(content) {
        if let Err(e) = serde_yaml::Value::deserialize(document) {
            let message = e.to_string();
            let line = line_from_message(&message)
                .or_else(|| e.location().map(|loc| loc.line() as u32))
                .map(|line| line.saturating_sub(1))
                .unwrap_or(0);
            return Err(YamlSyntaxError { line, message });
        }
    }

    Ok(())
}

/// Extract the 1-based line number encoded in a parser message.
fn line_from_message(message: &str) -> Option<u32> {
    error_line()
        .captures(message)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}
