//! Validation rules

pub mod expression;
pub mod schema;
pub mod syntax;

use crate::{config::LintConfig, diagnostics::Diagnostic};

/// Trait for document validators
pub trait Validator {
    fn validate(&self, content: &str, config: &LintConfig) -> Vec<Diagnostic>;
}
