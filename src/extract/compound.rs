//! Compound field parsing.
//!
//! A compound field packs a count and a qualifier into one blob of text, such
//! as `(1,234 replies)` or `523 Deviants Online`. Each [`CompoundPattern`] is a
//! fixed regex with named captures `count` and `label`.

use crate::error::{Error, Result};
use crate::extract::rules::parse_separated;
use once_cell::sync::Lazy;
use regex::Regex;

/// Count and qualifier pulled out of a compound field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compound {
    pub count: i64,
    pub label: String,
}

#[derive(Debug)]
pub struct CompoundPattern {
    pub name: &'static str,
    regex: Regex,
}

impl CompoundPattern {
    fn new(name: &'static str, pattern: &str) -> Self {
        Self {
            name,
            regex: Regex::new(pattern).expect("static compound pattern compiles"),
        }
    }

    /// Match `text` and decode its parts.
    ///
    /// A non-matching blob is an [`Error::PatternMismatch`], which the record
    /// assembler treats as a failure of that entry only.
    pub fn parse(&self, text: &str) -> Result<Compound> {
        let mismatch = || Error::PatternMismatch {
            pattern: self.name,
            text: text.to_string(),
        };
        let caps = self.regex.captures(text).ok_or_else(mismatch)?;
        let count = caps
            .name("count")
            .and_then(|m| parse_separated(m.as_str()))
            .ok_or_else(mismatch)?;
        let label = caps
            .name("label")
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default();
        Ok(Compound { count, label })
    }
}

const COUNT: &str = r"(?P<count>\d{1,3}(?:,\d{3})+|\d+)";

/// `(1,234 replies)` on forum thread entries.
pub static REPLIES: Lazy<CompoundPattern> =
    Lazy::new(|| CompoundPattern::new("replies", &format!(r"^\({COUNT} (?P<label>replies)\)$")));

/// `(56 votes)` on poll entries.
pub static VOTES: Lazy<CompoundPattern> =
    Lazy::new(|| CompoundPattern::new("votes", &format!(r"^\({COUNT} (?P<label>votes)\)$")));

/// `1,234 Deviants` style tallies with a one or two word label.
pub static LABELLED_COUNT: Lazy<CompoundPattern> = Lazy::new(|| {
    CompoundPattern::new(
        "labelled count",
        &format!(r"^\s*{COUNT}(?P<label>(?: +\w+){{1,2}}) *$"),
    )
});
