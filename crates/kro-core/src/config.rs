//! Linter configuration

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::diagnostics::{LintError, LintResult};

/// Default config file name looked up in a workspace root
pub const CONFIG_FILE_NAME: &str = ".kro-lsp.toml";

/// Configuration for the linter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LintConfig {
    /// Rules to enable/disable
    #[serde(default)]
    pub rules: RuleConfig,

    /// File extensions (without the dot) that are validated
    #[serde(default = "default_extensions")]
    pub file_extensions: Vec<String>,

    /// Glob patterns excluded from project walks
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            rules: RuleConfig::default(),
            file_extensions: default_extensions(),
            exclude: default_exclude(),
        }
    }
}

fn default_extensions() -> Vec<String> {
    vec!["kro".to_string(), "yaml".to_string(), "yml".to_string()]
}

fn default_exclude() -> Vec<String> {
    vec![
        "node_modules/**".to_string(),
        ".git/**".to_string(),
        "target/**".to_string(),
    ]
}

/// Helper function for serde default
fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Check embedded `{{ }}` expressions (cel::*)
    #[serde(default = "default_true")]
    pub expressions: bool,

    /// Check required ResourceGraphDefinition fields (schema::*)
    #[serde(default = "default_true")]
    pub schema: bool,

    /// Explicitly disabled rules by code (e.g., ["cel::ternary", "schema::kind"])
    #[serde(default)]
    pub disabled_rules: Vec<String>,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            expressions: true,
            schema: true,
            disabled_rules: Vec::new(),
        }
    }
}

impl LintConfig {
    /// Load config from file
    pub fn load(path: &Path) -> LintResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| LintError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| LintError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Load config or use default
    pub fn load_or_default(path: Option<&Path>) -> Self {
        path.and_then(|p| Self::load(p).ok()).unwrap_or_default()
    }

    /// Check if a rule is enabled.
    ///
    /// Base syntax (`yaml::*`) is always on, since every later stage depends
    /// on it having passed.
    pub fn is_rule_enabled(&self, rule: &str) -> bool {
        if rule.starts_with("yaml::") {
            return true;
        }

        if self.rules.disabled_rules.iter().any(|r| r == rule) {
            return false;
        }

        match rule {
            s if s.starts_with("cel::") => self.rules.expressions,
            s if s.starts_with("schema::") => self.rules.schema,
            _ => true,
        }
    }

    /// Whether a document path or URI has one of the configured extensions
    pub fn accepts(&self, path: &str) -> bool {
        let path = path.split(['?', '#']).next().unwrap_or(path);
        self.file_extensions.iter().any(|ext| {
            path.strip_suffix(ext.as_str())
                .is_some_and(|stem| stem.ends_with('.'))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_enables_all_rules() {
        let config = LintConfig::default();

        assert!(config.is_rule_enabled("yaml::syntax"));
        assert!(config.is_rule_enabled("cel::delimiters"));
        assert!(config.is_rule_enabled("cel::ternary"));
        assert!(config.is_rule_enabled("schema::kind"));
        assert!(config.is_rule_enabled("schema::spec-resources"));
    }

    #[test]
    fn test_disabled_rules_list() {
        let mut config = LintConfig::default();
        config.rules.disabled_rules = vec!["cel::ternary".to_string(), "schema::kind".to_string()];

        assert!(!config.is_rule_enabled("cel::ternary"));
        assert!(!config.is_rule_enabled("schema::kind"));
        assert!(config.is_rule_enabled("cel::delimiters"));
        assert!(config.is_rule_enabled("schema::api-version"));
    }

    #[test]
    fn test_category_disabled_expressions() {
        let mut config = LintConfig::default();
        config.rules.expressions = false;

        assert!(!config.is_rule_enabled("cel::empty"));
        assert!(!config.is_rule_enabled("cel::operators"));

        // Other categories still enabled
        assert!(config.is_rule_enabled("schema::metadata"));
    }

    #[test]
    fn test_syntax_rule_cannot_be_disabled() {
        let mut config = LintConfig::default();
        config.rules.disabled_rules = vec!["yaml::syntax".to_string()];
        assert!(config.is_rule_enabled("yaml::syntax"));
    }

    #[test]
    fn test_accepts_configured_extensions() {
        let config = LintConfig::default();

        assert!(config.accepts("file:///work/app.kro"));
        assert!(config.accepts("file:///work/app.yaml"));
        assert!(config.accepts("deploy/graph.yml"));
        assert!(!config.accepts("file:///work/app.json"));
        assert!(!config.accepts("file:///work/notyaml"));
    }

    #[test]
    fn test_load_partial_toml_uses_defaults() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[rules]\nschema = false\n").unwrap();

        let config = LintConfig::load(&path).unwrap();
        assert!(!config.rules.schema);
        assert!(config.rules.expressions);
        assert_eq!(config.file_extensions, vec!["kro", "yaml", "yml"]);
    }

    #[test]
    fn test_load_invalid_toml_is_config_error() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "rules = [").unwrap();

        let err = LintConfig::load(&path).unwrap_err();
        assert!(matches!(err, LintError::ConfigParse { .. }));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = LintConfig::load_or_default(Some(Path::new("/definitely/not/here.toml")));
        assert!(config.rules.schema);
    }

    #[test]
    fn test_config_round_trips_through_toml() {
        let config = LintConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: LintConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.file_extensions, config.file_extensions);
        assert_eq!(parsed.exclude, config.exclude);
    }
}
