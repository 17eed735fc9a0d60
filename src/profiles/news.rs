//! Site news, one section at a time.

use super::PageProfile;
use crate::config::Config;
use crate::error::Result;
use crate::extract::assembler::{assemble, Context, FieldSpec, Template};
use crate::html::Scope;
use crate::models::Record;
use scraper::Html;
use serde::Serialize;
use tracing::debug;

const ENTRIES: &str = "#news-main .iconleft .report";

static ARTICLE: Template = Template {
    name: "news article",
    fields: &[
        FieldSpec::text("love", ".love span").optional(),
        FieldSpec::text("title", "h2"),
        FieldSpec::text("author", ".line0 small a .u").optional(),
        FieldSpec::text("summary", ".text").optional(),
    ],
};

/// News sections. Unknown keys fall back to [`Section::Front`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    #[default]
    Front,
    Art,
    Culture,
    Da,
    Fun,
}

impl Section {
    /// Map a section key to a section; anything unrecognised is `Front`.
    pub fn from_key(key: &str) -> Self {
        match key.trim() {
            "art" => Section::Art,
            "culture" => Section::Culture,
            "da" => Section::Da,
            "fun" => Section::Fun,
            "front" => Section::Front,
            other => {
                debug!(key = other, "Unknown news section, using front");
                Section::Front
            }
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Section::Front => "/browse/front/",
            Section::Art => "/browse/art_news/",
            Section::Culture => "/browse/culture/",
            Section::Da => "/browse/deviantart_inc/",
            Section::Fun => "/browse/fun/",
        }
    }
}

#[derive(Debug, Clone)]
pub struct SiteNews {
    section: Section,
    url: String,
}

impl SiteNews {
    pub fn new(config: &Config, section: Section) -> Self {
        Self {
            section,
            url: format!("{}{}", config.news_url.trim_end_matches('/'), section.path()),
        }
    }

    pub fn section(&self) -> Section {
        self.section
    }
}

impl PageProfile for SiteNews {
    type Output = Vec<Record>;

    fn name(&self) -> &'static str {
        "news"
    }

    fn url(&self) -> &str {
        &self.url
    }

    fn extract(&self, doc: &Html) -> Result<Vec<Record>> {
        assemble(Scope::from(doc), ENTRIES, &ARTICLE, &Context::default())
    }
}
