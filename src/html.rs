//! Selector query layer over `scraper`.
//!
//! Extraction code never walks the tree by hand. It asks a [`Scope`] (the
//! whole document or one element) for the nodes matching a CSS selector and
//! reads their text or attributes through the helpers here.

use crate::error::{Error, Result};
use scraper::{ElementRef, Html, Selector};

/// Where a selector query is evaluated: the whole document or below one node.
#[derive(Clone, Copy)]
pub enum Scope<'a> {
    Document(&'a Html),
    Element(ElementRef<'a>),
}

impl<'a> Scope<'a> {
    /// All nodes matching `selector`, in document order.
    pub fn select(&self, selector: &str) -> Result<Vec<ElementRef<'a>>> {
        let compiled = compile(selector)?;
        let nodes = match self {
            Scope::Document(doc) => doc.select(&compiled).collect(),
            Scope::Element(el) => el.select(&compiled).collect(),
        };
        Ok(nodes)
    }

    /// The first node matching `selector`, if any.
    pub fn first(&self, selector: &str) -> Result<Option<ElementRef<'a>>> {
        Ok(self.select(selector)?.into_iter().next())
    }

    /// The first node matching `selector`, or a [`Error::MissingNode`] naming `field`.
    pub fn require(&self, field: &'static str, selector: &str) -> Result<ElementRef<'a>> {
        self.first(selector)?.ok_or_else(|| Error::MissingNode {
            field,
            selector: selector.to_string(),
        })
    }

    /// Normalised text of every match, one string per node.
    pub fn texts(&self, selector: &str) -> Result<Vec<String>> {
        Ok(self.select(selector)?.into_iter().map(text).collect())
    }
}

impl<'a> From<&'a Html> for Scope<'a> {
    fn from(doc: &'a Html) -> Self {
        Scope::Document(doc)
    }
}

impl<'a> From<ElementRef<'a>> for Scope<'a> {
    fn from(el: ElementRef<'a>) -> Self {
        Scope::Element(el)
    }
}

/// Compile a selector, mapping the borrowed parse error into an owned one.
pub fn compile(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|_| Error::InvalidSelector(selector.to_string()))
}

/// Inner text of a node with whitespace runs collapsed and ends trimmed.
pub fn text(el: ElementRef<'_>) -> String {
    normalize(&el.text().collect::<String>())
}

/// Inner text of a node, leaving out everything inside descendants matching `exclude`.
pub fn text_excluding(el: ElementRef<'_>, exclude: &str) -> Result<String> {
    let excluded = Scope::from(el).select(exclude)?;
    let raw: String = el
        .descendants()
        .filter_map(|node| node.value().as_text().map(|t| (node, t)))
        .filter(|(node, _)| {
            !node
                .ancestors()
                .filter_map(ElementRef::wrap)
                .any(|a| excluded.contains(&a))
        })
        .map(|(_, t)| &**t)
        .collect();
    Ok(normalize(&raw))
}

/// Concatenated text of several nodes, normalised as one string.
pub fn joined_text(nodes: &[ElementRef<'_>]) -> String {
    let raw: String = nodes.iter().flat_map(|el| el.text()).collect();
    normalize(&raw)
}

pub fn attr(el: ElementRef<'_>, name: &str) -> Option<String> {
    el.value().attr(name).map(String::from)
}

/// The parent element of `el`, if it has one.
pub fn parent(el: ElementRef<'_>) -> Option<ElementRef<'_>> {
    el.parent().and_then(ElementRef::wrap)
}

pub fn normalize(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
