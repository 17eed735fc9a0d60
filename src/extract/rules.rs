//! Field decode rule tables.
//!
//! A [`RuleTable`] is an ordered list of [`Rule`]s. Each rule pairs a substring
//! predicate with a [`Transform`]. For one line of page text the first rule
//! whose predicate matches decides the field; later rules are never consulted,
//! even if that rule's transform comes up empty. Text that matches no rule
//! produces no field and no error.
//!
//! Labels are located explicitly rather than sliced off at fixed offsets, so a
//! reworded label leaves its field out instead of producing garbage.

use crate::models::{FieldValue, Record};
use tracing::debug;

/// How matched text becomes a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    /// Leading number with thousands separators removed, e.g. `1,234 Pageviews` → 1234.
    Count,
    /// Text following the label, e.g. `Website http://x` → `http://x`.
    AfterLabel(&'static str),
    /// Text preceding the label, e.g. `12 Daily Deviations` → `12`.
    BeforeLabel(&'static str),
    /// The whole text.
    Verbatim,
}

impl Transform {
    pub fn apply(&self, text: &str) -> Option<FieldValue> {
        match *self {
            Transform::Count => parse_count(text).map(FieldValue::Integer),
            Transform::AfterLabel(label) => after_label(text, label).map(FieldValue::Text),
            Transform::BeforeLabel(label) => before_label(text, label).map(FieldValue::Text),
            Transform::Verbatim => Some(FieldValue::Text(text.trim().to_string())),
        }
    }
}

/// One predicate/transform pair.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    /// Substring the raw text must contain.
    pub contains: &'static str,
    /// Record key written on a match.
    pub field: &'static str,
    pub transform: Transform,
}

impl Rule {
    pub const fn new(contains: &'static str, field: &'static str, transform: Transform) -> Self {
        Self {
            contains,
            field,
            transform,
        }
    }
}

/// An ordered rule list; first match wins.
#[derive(Debug)]
pub struct RuleTable {
    pub name: &'static str,
    pub rules: &'static [Rule],
}

impl RuleTable {
    /// Decode one line of text.
    ///
    /// Returns `None` when no predicate matches, or when the winning rule's
    /// transform cannot produce a value.
    pub fn decode(&self, text: &str) -> Option<(&'static str, FieldValue)> {
        let rule = self.rules.iter().find(|r| text.contains(r.contains))?;
        match rule.transform.apply(text) {
            Some(value) => Some((rule.field, value)),
            None => {
                debug!(table = self.name, field = rule.field, %text, "Matched rule produced no value");
                None
            }
        }
    }

    /// Decode every item independently into `record`.
    pub fn apply<I, S>(&self, texts: I, record: &mut Record)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for text in texts {
            let text = text.as_ref();
            match self.decode(text) {
                Some((field, value)) => record.insert(field, value),
                None => debug!(table = self.name, %text, "Unexpected item, ignored"),
            }
        }
    }
}

/// Parse the leading number of `text`, ignoring `,` separators.
pub fn parse_count(text: &str) -> Option<i64> {
    let digits: String = text
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == ',')
        .filter(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

/// Strip thousands separators and parse the whole string.
pub fn parse_separated(text: &str) -> Option<i64> {
    text.trim().replace(',', "").parse().ok()
}

fn after_label(text: &str, label: &str) -> Option<String> {
    let start = text.find(label)? + label.len();
    Some(
        text[start..]
            .trim_start_matches(|c: char| c == ':' || c.is_whitespace())
            .trim_end()
            .to_string(),
    )
}

fn before_label(text: &str, label: &str) -> Option<String> {
    let end = text.rfind(label)?;
    Some(text[..end].trim().to_string())
}

/// Split `text` on `delimiter` into the fields named by `names`.
///
/// The first field is always written as text. Later fields are written as
/// optional text and hold `None` when the text has fewer parts.
pub fn split_into(record: &mut Record, text: &str, delimiter: char, names: &[&'static str]) {
    let mut parts = text.trim().split(delimiter).map(|p| p.trim().to_string());
    let Some((first, rest)) = names.split_first() else {
        return;
    };
    record.insert(*first, parts.next().unwrap_or_default());
    for name in rest {
        record.insert(*name, FieldValue::OptionalText(parts.next()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static STATS: RuleTable = RuleTable {
        name: "stats",
        rules: &[
            Rule::new("Deviation Comment", "made_comments_count", Transform::Count),
            Rule::new("Forum Post", "forum_posts_count", Transform::Count),
            Rule::new("Deviation", "deviations_count", Transform::Count),
            Rule::new("Pageview", "pageviews_count", Transform::Count),
        ],
    };

    #[test]
    fn test_count_with_separators() {
        assert_eq!(parse_count("1,234 Pageviews"), Some(1234));
        assert_eq!(parse_count("  42 Forum Posts"), Some(42));
        assert_eq!(parse_count("Pageviews"), None);
    }

    #[test]
    fn test_parse_separated() {
        assert_eq!(parse_separated("12,345"), Some(12345));
        assert_eq!(parse_separated("12 345"), None);
    }

    #[test]
    fn test_first_match_wins() {
        // "Deviation Comments" also contains "Deviation"; declared order decides.
        let (field, value) = STATS.decode("3,001 Deviation Comments").unwrap();
        assert_eq!(field, "made_comments_count");
        assert_eq!(value, FieldValue::Integer(3001));
        let (field, _) = STATS.decode("17 Deviations").unwrap();
        assert_eq!(field, "deviations_count");
    }

    #[test]
    fn test_unmatched_text_is_omitted() {
        let mut record = Record::new();
        STATS.apply(["42 Forum Posts", "Badge Count: 3"], &mut record);
        assert_eq!(record.integer("forum_posts_count"), Some(42));
        assert_eq!(record.len(), 1);
    }

    #[test]
    fn test_after_and_before_label() {
        assert_eq!(
            Transform::AfterLabel("Website").apply("Website http://example.com"),
            Some(FieldValue::Text("http://example.com".to_string()))
        );
        assert_eq!(
            Transform::AfterLabel("Status").apply("Status: away"),
            Some(FieldValue::Text("away".to_string()))
        );
        assert_eq!(
            Transform::BeforeLabel("Daily Deviations").apply("24 Daily Deviations"),
            Some(FieldValue::Text("24".to_string()))
        );
        assert_eq!(Transform::AfterLabel("Status").apply("Mood: fine"), None);
    }

    #[test]
    fn test_matched_rule_without_value_does_not_fall_through() {
        static TABLE: RuleTable = RuleTable {
            name: "fallthrough",
            rules: &[
                Rule::new("Scrap", "scraps_count", Transform::Count),
                Rule::new("browse", "browse", Transform::Verbatim),
            ],
        };
        assert_eq!(TABLE.decode("Scraps [browse]"), None);
    }

    #[test]
    fn test_split_into_pads_missing_parts() {
        let mut record = Record::new();
        split_into(&mut record, "Female/Italy", '/', &["sex", "location"]);
        assert_eq!(record.text("sex"), Some("Female"));
        assert_eq!(record.text("location"), Some("Italy"));

        let mut record = Record::new();
        split_into(&mut record, "Male", '/', &["sex", "location"]);
        assert_eq!(record.text("sex"), Some("Male"));
        assert_eq!(record.get("location"), Some(&FieldValue::OptionalText(None)));
    }
}
