//! Lazily-compiled static regex patterns.
//!
//! Patterns used by the locator, preprocessor, schema checker and syntax
//! line extraction all go through [`static_regex!`], so a typo in a pattern
//! panics with the pattern text on first use.

/// Declare a module-private function returning `&'static regex::Regex`,
/// compiled on first access and cached in a `std::sync::OnceLock`.
///
/// The calling module must have `use regex::Regex;` in scope.
///
/// # Panics
///
/// Panics on first call if `$pattern` is not a valid regex.
///
/// # Example
///
/// ```ignore
/// use regex::Regex;
/// use crate::regex_util::static_regex;
///
/// static_regex!(fn marker_pair, r"\{\{([^}]*)\}\}");
///
/// assert!(marker_pair().is_match("name: {{ params.name }}"));
/// ```
macro_rules! static_regex {
    (fn $fname:ident, $pattern:expr) => {
        fn $fname() -> &'static Regex {
            static STORE: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
            STORE.get_or_init(|| {
                Regex::new($pattern).expect(concat!("BUG: invalid static regex: ", $pattern))
            })
        }
    };
}
pub(crate) use static_regex;
