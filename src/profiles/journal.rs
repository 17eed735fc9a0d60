//! A user's journal list.
//!
//! Each `.pp.mglist li` entry yields `title`, `date` (when shown) and `url`,
//! the entry link resolved against the user's home page.

use super::PageProfile;
use crate::config::Config;
use crate::error::Result;
use crate::extract::assembler::{assemble, Context, Decode, FieldSpec, Template};
use crate::html::Scope;
use crate::models::Record;
use scraper::Html;

const ENTRIES: &str = ".pp.mglist li";

static ENTRY: Template = Template {
    name: "journal entry",
    fields: &[
        FieldSpec::text("title", ".main"),
        FieldSpec::text("date", ".side").optional(),
        FieldSpec::attr("url", ".main a", "href").decode(Decode::Prefixed),
    ],
};

#[derive(Debug, Clone)]
pub struct UserJournal {
    nickname: String,
    base_url: String,
    url: String,
}

impl UserJournal {
    /// Fails with [`Error::InvalidParameter`](crate::Error::InvalidParameter) for an unusable nickname.
    pub fn new(config: &Config, nickname: &str) -> Result<Self> {
        let base_url = config.user_base_url(nickname)?;
        Ok(Self {
            nickname: nickname.trim().to_string(),
            url: format!("{base_url}/journal/"),
            base_url,
        })
    }

    pub fn nickname(&self) -> &str {
        &self.nickname
    }
}

impl PageProfile for UserJournal {
    type Output = Vec<Record>;

    fn name(&self) -> &'static str {
        "journal"
    }

    fn url(&self) -> &str {
        &self.url
    }

    fn extract(&self, doc: &Html) -> Result<Vec<Record>> {
        let ctx = Context {
            base_url: Some(&self.base_url),
        };
        assemble(Scope::from(doc), ENTRIES, &ENTRY, &ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_url_from_nickname() {
        let journal = UserJournal::new(&Config::default(), "spyed").unwrap();
        assert_eq!(journal.url(), "http://spyed.deviantart.com/journal/");
        assert_eq!(journal.nickname(), "spyed");
    }

    #[test]
    fn test_empty_nickname_rejected() {
        assert!(matches!(
            UserJournal::new(&Config::default(), ""),
            Err(Error::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_two_entries_in_order() {
        let doc = Html::parse_document(
            r#"<div><ul class="pp mglist">
                 <li><span class=main><a href=/x>Title A</a></span><span class=side>Jan 1</span></li>
                 <li><span class=main><a href=/y>Title B</a></span><span class=side>Feb 2</span></li>
               </ul></div>"#,
        );
        let journal = UserJournal::new(&Config::default(), "spyed").unwrap();
        let records = journal.extract(&doc).unwrap();
        assert_eq!(records.len(), 2);

        let mut expected = Record::new();
        expected.insert("title", "Title A");
        expected.insert("date", "Jan 1");
        expected.insert("url", "http://spyed.deviantart.com/x");
        assert_eq!(records[0], expected);

        assert_eq!(records[1].text("title"), Some("Title B"));
        assert_eq!(records[1].text("date"), Some("Feb 2"));
        assert_eq!(records[1].text("url"), Some("http://spyed.deviantart.com/y"));
    }

    #[test]
    fn test_entry_without_link_is_structural_error() {
        let doc = Html::parse_document(
            r#"<ul class="pp mglist"><li><span class=main>Untitled</span></li></ul>"#,
        );
        let journal = UserJournal::new(&Config::default(), "spyed").unwrap();
        assert!(matches!(
            journal.extract(&doc),
            Err(Error::MissingNode { field: "url", .. })
        ));
    }

    #[test]
    fn test_no_entries() {
        let doc = Html::parse_document("<p>This deviant has not written a journal yet.</p>");
        let journal = UserJournal::new(&Config::default(), "spyed").unwrap();
        assert!(journal.extract(&doc).unwrap().is_empty());
    }
}
