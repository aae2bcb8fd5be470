//! Text-level parsers: expression location, quote-aware scanning, YAML syntax

pub mod expression;
pub mod scanner;
pub mod yaml;
