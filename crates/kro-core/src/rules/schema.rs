//! Required-field checks for ResourceGraphDefinition documents.
//!
//! This is a text-level check, not a schema walk: presence is substring
//! matching, and nested requirements look only at the indented block that
//! directly follows a top-level header.

use regex::Regex;

use crate::{
    config::LintConfig,
    diagnostics::{Diagnostic, DiagnosticSource, Range},
    regex_util::static_regex,
    rules::Validator,
};

pub const EXPECTED_KIND: &str = "ResourceGraphDefinition";
pub const EXPECTED_API_VERSION: &str = "kro.run/v1alpha1";

static_regex!(
    fn kind_value,
    r#"(?m)^[ \t]*kind:[ \t]*(?:ResourceGraphDefinition|"ResourceGraphDefinition"|'ResourceGraphDefinition')[ \t]*(?:#[^\n]*)?\r?$"#
);
static_regex!(
    fn api_version_value,
    r#"(?m)^[ \t]*apiVersion:[ \t]*(?:kro\.run/v1alpha1|"kro\.run/v1alpha1"|'kro\.run/v1alpha1')[ \t]*(?:#[^\n]*)?\r?$"#
);
// A header needs at least one indented `key:` line under it to count as a block.
static_regex!(fn metadata_block, r"(?m)^metadata:[ \t]*\r?((?:\n[ \t]+[^:\n]+:[^\n]*)+)");
static_regex!(fn spec_block, r"(?m)^spec:[ \t]*\r?((?:\n[ \t]+[^:\n]+:[^\n]*)+)");

pub struct SchemaValidator;

impl Validator for SchemaValidator {
    fn validate(&self, content: &str, config: &LintConfig) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        if !config.rules.schema {
            return diagnostics;
        }

        let mut report = |rule: &str, range: Range, message: &str, suggestion: String| {
            if config.is_rule_enabled(rule) {
                diagnostics.push(
                    Diagnostic::error(
                        range,
                        DiagnosticSource::KroSchema,
                        rule,
                        format!("Kro Schema Error: {}", message),
                    )
                    .with_suggestion(suggestion),
                );
            }
        };

        if !content.contains("kind:") {
            report(
                "schema::kind",
                Range::line_start(0),
                "Missing required field 'kind'",
                format!("Add 'kind: {}'", EXPECTED_KIND),
            );
        } else if !kind_value().is_match(content) {
            report(
                "schema::kind",
                Range::line_start(0),
                "'kind' must be 'ResourceGraphDefinition'",
                format!("Set 'kind: {}'", EXPECTED_KIND),
            );
        }

        if !content.contains("apiVersion:") {
            report(
                "schema::api-version",
                Range::line_start(0),
                "Missing required field 'apiVersion'",
                format!("Add 'apiVersion: {}'", EXPECTED_API_VERSION),
            );
        } else if !api_version_value().is_match(content) {
            report(
                "schema::api-version",
                Range::line_start(0),
                "'apiVersion' must be 'kro.run/v1alpha1'",
                format!("Set 'apiVersion: {}'", EXPECTED_API_VERSION),
            );
        }

        if !content.contains("metadata:") {
            report(
                "schema::metadata",
                Range::line_start(0),
                "Missing required field 'metadata'",
                "Add a 'metadata:' block with a 'name'".to_string(),
            );
        }

        if !content.contains("spec:") {
            report(
                "schema::spec",
                Range::line_start(0),
                "Missing required field 'spec'",
                "Add a 'spec:' block with 'resources'".to_string(),
            );
        }

        if let Some(block) = metadata_block().find(content) {
            if !block.as_str().contains("name:") {
                report(
                    "schema::metadata-name",
                    Range::full_line(content, header_line(content, "metadata:")),
                    "'metadata' must contain 'name' field",
                    "Add '  name: <graph-name>' under 'metadata:'".to_string(),
                );
            }
        }

        if let Some(block) = spec_block().find(content) {
            if !block.as_str().contains("resources:") {
                report(
                    "schema::spec-resources",
                    Range::full_line(content, header_line(content, "spec:")),
                    "'spec' must contain 'resources' field",
                    "Add '  resources:' under 'spec:'".to_string(),
                );
            }
        }

        diagnostics
    }
}

/// First line whose trimmed text is exactly `header`, or 0.
fn header_line(content: &str, header: &str) -> u32 {
    content
        .split('\n')
        .position(|line| line.trim() == header)
        .map(|idx| idx as u32)
        .unwrap_or(0)
}
