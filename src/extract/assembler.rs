//! Record assembly for repeated page entries.
//!
//! A [`Template`] describes how to read one entry (a news item, a journal
//! entry, a forum thread): for each field, which inner selector to query
//! relative to the entry's container node, which match to read, and how to
//! decode it. [`assemble`] applies a template to every container matched by an
//! outer selector and returns the records in document order.
//!
//! Failure policy is declared per field. A [`Presence::Required`] field that
//! finds no node aborts the page with [`Error::MissingNode`]. An optional one
//! is left out of the record. A compound field that fails its pattern, or
//! whose blob is missing altogether, only drops the entry it belongs to.

use crate::error::{Error, Result};
use crate::extract::compound::CompoundPattern;
use crate::html::{self, Scope};
use crate::models::{FieldValue, Record};
use once_cell::sync::Lazy;
use scraper::ElementRef;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    Optional,
}

/// Which of the matched nodes a field reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pick {
    First,
    Nth(usize),
    /// Every match, text concatenated.
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Text,
    /// Text with everything inside matching descendants left out.
    TextExcluding(&'static str),
    Attr(&'static str),
}

#[derive(Debug, Clone, Copy)]
pub enum Decode {
    Text,
    /// Count captured by a compound pattern.
    Compound(&'static Lazy<CompoundPattern>),
    /// Text appended to the context's base URL.
    Prefixed,
}

/// How to read one field of an entry.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    /// Inner selector; `None` reads the container itself.
    pub selector: Option<&'static str>,
    pub pick: Pick,
    pub source: Source,
    pub presence: Presence,
    pub decode: Decode,
}

impl FieldSpec {
    /// A required text field read from every match of `selector`.
    pub const fn text(name: &'static str, selector: &'static str) -> Self {
        Self {
            name,
            selector: Some(selector),
            pick: Pick::All,
            source: Source::Text,
            presence: Presence::Required,
            decode: Decode::Text,
        }
    }

    /// A required attribute of the first match of `selector`.
    pub const fn attr(name: &'static str, selector: &'static str, attr: &'static str) -> Self {
        Self {
            name,
            selector: Some(selector),
            pick: Pick::First,
            source: Source::Attr(attr),
            presence: Presence::Required,
            decode: Decode::Text,
        }
    }

    /// The container's own text.
    pub const fn own_text(name: &'static str) -> Self {
        Self {
            name,
            selector: None,
            pick: Pick::First,
            source: Source::Text,
            presence: Presence::Required,
            decode: Decode::Text,
        }
    }

    pub const fn optional(mut self) -> Self {
        self.presence = Presence::Optional;
        self
    }

    pub const fn excluding(mut self, selector: &'static str) -> Self {
        self.source = Source::TextExcluding(selector);
        self
    }

    pub const fn first(mut self) -> Self {
        self.pick = Pick::First;
        self
    }

    pub const fn nth(mut self, n: usize) -> Self {
        self.pick = Pick::Nth(n);
        self
    }

    pub const fn decode(mut self, decode: Decode) -> Self {
        self.decode = decode;
        self
    }

    fn describe(&self) -> String {
        let selector = self.selector.unwrap_or(":scope");
        let picked = match self.pick {
            Pick::Nth(n) => format!("{selector}[{n}]"),
            _ => selector.to_string(),
        };
        match self.source {
            Source::Text | Source::TextExcluding(_) => picked,
            Source::Attr(attr) => format!("{picked} @{attr}"),
        }
    }
}

/// Field layout of one kind of repeated entry.
#[derive(Debug)]
pub struct Template {
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
}

/// Values supplied at extraction time rather than declared in a template.
#[derive(Debug, Default, Clone, Copy)]
pub struct Context<'c> {
    pub base_url: Option<&'c str>,
}

/// Build one record per node matched by `containers`, in document order.
///
/// Entries that fail with an entry-local error are logged and skipped; any
/// other error aborts assembly.
pub fn assemble(scope: Scope<'_>, containers: &str, template: &Template, ctx: &Context<'_>) -> Result<Vec<Record>> {
    let nodes = scope.select(containers)?;
    let mut records = Vec::with_capacity(nodes.len());
    for (index, node) in nodes.into_iter().enumerate() {
        match build_record(node, template, ctx) {
            Ok(record) => records.push(record),
            Err(e) if e.is_entry_local() => {
                warn!(template = template.name, index, error = %e, "Skipping malformed entry");
            }
            Err(e) => return Err(e),
        }
    }
    debug!(template = template.name, count = records.len(), "Assembled records");
    Ok(records)
}

/// Apply `template` to a single container node.
pub fn build_record(container: ElementRef<'_>, template: &Template, ctx: &Context<'_>) -> Result<Record> {
    let mut record = Record::new();
    for spec in template.fields {
        match read_field(container, spec)? {
            Some(raw) => {
                if let Some(value) = decode(spec, &raw, ctx)? {
                    record.insert(spec.name, value);
                }
            }
            None if spec.presence == Presence::Optional => {}
            None => {
                // An absent blob fails its pattern the same way an empty one does.
                if let Decode::Compound(pattern) = spec.decode {
                    pattern.parse("")?;
                }
                return Err(Error::MissingNode {
                    field: spec.name,
                    selector: spec.describe(),
                });
            }
        }
    }
    Ok(record)
}

fn read_field(container: ElementRef<'_>, spec: &FieldSpec) -> Result<Option<String>> {
    let nodes = match spec.selector {
        Some(selector) => Scope::from(container).select(selector)?,
        None => vec![container],
    };
    let picked: Vec<ElementRef<'_>> = match spec.pick {
        Pick::First => nodes.into_iter().take(1).collect(),
        Pick::Nth(n) => nodes.into_iter().skip(n).take(1).collect(),
        Pick::All => nodes,
    };
    if picked.is_empty() {
        return Ok(None);
    }
    Ok(match spec.source {
        Source::Text => Some(html::joined_text(&picked)),
        Source::TextExcluding(exclude) => {
            let parts = picked
                .iter()
                .map(|el| html::text_excluding(*el, exclude))
                .collect::<Result<Vec<_>>>()?;
            Some(html::normalize(&parts.join(" ")))
        }
        Source::Attr(name) => picked.iter().find_map(|el| html::attr(*el, name)),
    })
}

fn decode(spec: &FieldSpec, raw: &str, ctx: &Context<'_>) -> Result<Option<FieldValue>> {
    Ok(match spec.decode {
        Decode::Text => Some(FieldValue::Text(raw.to_string())),
        Decode::Compound(pattern) => Some(FieldValue::Integer(pattern.parse(raw)?.count)),
        Decode::Prefixed => Some(FieldValue::Text(format!("{}{}", ctx.base_url.unwrap_or_default(), raw))),
    })
}
