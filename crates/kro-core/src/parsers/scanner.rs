//! Quote-aware character scanner shared by the expression checks.
//!
//! A quote character toggles its own flag only while the other quote kind is
//! closed. Quote characters and everything between them are swallowed, so
//! callers only ever see structural characters.

use std::str::Chars;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteKind {
    Single,
    Double,
}

impl QuoteKind {
    pub fn name(self) -> &'static str {
        match self {
            QuoteKind::Single => "single",
            QuoteKind::Double => "double",
        }
    }
}

/// Iterator over the characters of an expression that sit outside quotes.
pub struct QuoteAwareScanner<'a> {
    chars: Chars<'a>,
    in_single: bool,
    in_double: bool,
}

impl<'a> QuoteAwareScanner<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            chars: text.chars(),
            in_single: false,
            in_double: false,
        }
    }

    /// The quote left open at the current point of the scan, if any.
    ///
    /// After the iterator is exhausted this reports an unterminated quote.
    pub fn open_quote(&self) -> Option<QuoteKind> {
        if self.in_single {
            Some(QuoteKind::Single)
        } else if self.in_double {
            Some(QuoteKind::Double)
        } else {
            None
        }
    }
}

impl Iterator for QuoteAwareScanner<'_> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        for ch in self.chars.by_ref() {
            match ch {
                '"' if !self.in_single => self.in_double = !self.in_double,
                '\'' if !self.in_double => self.in_single = !self.in_single,
                _ if self.in_single || self.in_double => {}
                _ => return Some(ch),
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unquoted(text: &str) -> String {
        QuoteAwareScanner::new(text).collect()
    }

    #[test]
    fn test_plain_text_passes_through() {
        assert_eq!(unquoted("a + b"), "a + b");
    }

    #[test]
    fn test_quoted_content_is_skipped() {
        assert_eq!(unquoted("f('a)b', \"c]\")"), "f(, )");
    }

    #[test]
    fn test_other_quote_kind_is_literal_inside_quotes() {
        assert_eq!(unquoted("\"it's\" + x"), " + x");
        assert_eq!(unquoted("'say \"hi\"' ? a"), " ? a");
    }

    #[test]
    fn test_open_quote_reported_after_exhaustion() {
        let mut scanner = QuoteAwareScanner::new("'unterminated");
        assert_eq!(scanner.by_ref().count(), 0);
        assert_eq!(scanner.open_quote(), Some(QuoteKind::Single));

        let mut scanner = QuoteAwareScanner::new("x == \"open");
        scanner.by_ref().for_each(drop);
        assert_eq!(scanner.open_quote(), Some(QuoteKind::Double));
    }

    #[test]
    fn test_balanced_quotes_leave_nothing_open() {
        let mut scanner = QuoteAwareScanner::new("'a' + \"b\"");
        scanner.by_ref().for_each(drop);
        assert_eq!(scanner.open_quote(), None);
    }
}
