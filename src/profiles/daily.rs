//! The daily deviations list.
//!
//! Each `.ddinfo` block yields the deviation's `title` and `link` (from its
//! first `/deviation/` anchor) and `desc`, the block's text without the
//! `.foot` credits line.

use super::PageProfile;
use crate::config::Config;
use crate::error::Result;
use crate::extract::assembler::{assemble, Context, FieldSpec, Template};
use crate::html::Scope;
use crate::models::Record;
use scraper::Html;

const ENTRIES: &str = ".ddinfo";
const DEVIATION_LINK: &str = r#"a[href*="/deviation/"]"#;

static DEVIATION: Template = Template {
    name: "daily deviation",
    fields: &[
        FieldSpec::text("title", DEVIATION_LINK).first(),
        FieldSpec::own_text("desc").excluding(".foot"),
        FieldSpec::attr("link", DEVIATION_LINK, "href"),
    ],
};

#[derive(Debug, Clone)]
pub struct DailyDeviations {
    url: String,
}

impl DailyDeviations {
    pub fn new(config: &Config) -> Self {
        Self {
            url: config.daily_deviations_url.clone(),
        }
    }
}

impl PageProfile for DailyDeviations {
    type Output = Vec<Record>;

    fn name(&self) -> &'static str {
        "daily deviations"
    }

    fn url(&self) -> &str {
        &self.url
    }

    fn extract(&self, doc: &Html) -> Result<Vec<Record>> {
        assemble(Scope::from(doc), ENTRIES, &DEVIATION, &Context::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    const PAGE: &str = r#"
        <div class="ddinfo">
          <a href="http://alice.deviantart.com/">alice</a>
          <a href="http://alice.deviantart.com/art/x">ignored</a>
          <a href="http://www.deviantart.com/deviation/101/">Morning Light</a>
          <span class="foot">Suggested by bob</span>
        </div>
        <div class="ddinfo">
          <a href="http://www.deviantart.com/deviation/202/">Night Sky</a> by carol
        </div>
    "#;

    #[test]
    fn test_deviations() {
        let doc = Html::parse_document(PAGE);
        let records = DailyDeviations::new(&Config::default()).extract(&doc).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].text("title"), Some("Morning Light"));
        assert_eq!(
            records[0].text("link"),
            Some("http://www.deviantart.com/deviation/101/")
        );
        assert_eq!(
            records[0].text("desc"),
            Some("alice ignored Morning Light")
        );
        assert_eq!(records[1].text("title"), Some("Night Sky"));
        assert_eq!(records[1].text("desc"), Some("Night Sky by carol"));
    }

    #[test]
    fn test_entry_without_deviation_link() {
        let doc = Html::parse_document(r#"<div class="ddinfo"><a href="/art/1">x</a></div>"#);
        let err = DailyDeviations::new(&Config::default()).extract(&doc).unwrap_err();
        assert!(matches!(err, Error::MissingNode { field: "title", .. }));
    }

    #[test]
    fn test_url() {
        assert_eq!(
            DailyDeviations::new(&Config::default()).url(),
            "http://today.deviantart.com/dds/"
        );
    }
}
