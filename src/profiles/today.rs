//! The site-wide "today" page.
//!
//! Everything on the page lands in one record:
//!
//! | Key | Value |
//! |-----|-------|
//! | `moods` | record of mood symbol → count |
//! | `popular_journals` | list of `{title, author, url}` |
//! | `last_comments` | list of `{author, url}` |
//! | `deviousness` | `{nickname, text}`, only when the block is shown |
//! | `daily_deviations` | integer, when a `NN Daily Deviations` heading is present |
//! | `total_deviants_online` | integer |
//! | `deviants_online` | record of member kind → count |
//! | `popular_threads` | list of `{title, url, author, replies}` |
//! | `popular_polls` | list of `{title, url, author, votes}` |
//! | `new_deviants`, `popular_deviants` | lists of nicknames |

use super::PageProfile;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::extract::assembler::{assemble, Context, Decode, FieldSpec, Template};
use crate::extract::compound::{LABELLED_COUNT, REPLIES, VOTES};
use crate::extract::pairing::{pair_keyed, pair_records};
use crate::extract::rules::{parse_count, parse_separated};
use crate::html::{self, Scope};
use crate::models::{symbol, FieldValue, Record};
use scraper::Html;
use tracing::debug;

const MOOD_LABELS: &str = "dl .f .graph dd";
const MOOD_COUNTS: &str = "dl .f .graph dt";
const POPULAR_JOURNALS: &str = ".pppt .iconleft .abridged .userjournal";
const COMMENT_AUTHORS: &str = ".c .block .pppt .u";
const COMMENT_LINKS: &str = ".c .block .pppt .shadow a";
const DEVIOUSNESS: &str = ".block .pppt .ppb";
const BLOCK_HEADINGS: &str = ".pppt h3";
const SECTION_HEADINGS: &str = ".flatview .section h3";
const ONLINE_KINDS: &str = ".flatview .section .ppppb .block ul .f li .f";

static JOURNAL: Template = Template {
    name: "popular journal",
    fields: &[
        FieldSpec::text("title", "h3"),
        FieldSpec::text("author", "a .u").optional(),
        FieldSpec::attr("url", "h3 a", "href"),
    ],
};

static THREAD: Template = Template {
    name: "forum thread",
    fields: &[
        FieldSpec::text("title", "a").first(),
        FieldSpec::attr("url", "a", "href"),
        FieldSpec::text("author", "a").nth(1),
        FieldSpec::text("replies", "span").decode(Decode::Compound(&REPLIES)),
    ],
};

static POLL: Template = Template {
    name: "user poll",
    fields: &[
        FieldSpec::text("title", "a").first(),
        FieldSpec::attr("url", "a", "href"),
        FieldSpec::text("author", "a").nth(1),
        FieldSpec::text("votes", "span").decode(Decode::Compound(&VOTES)),
    ],
};

#[derive(Debug, Clone)]
pub struct TodayPage {
    url: String,
}

impl TodayPage {
    pub fn new(config: &Config) -> Self {
        Self {
            url: config.today_url.clone(),
        }
    }
}

impl PageProfile for TodayPage {
    type Output = Record;

    fn name(&self) -> &'static str {
        "today"
    }

    fn url(&self) -> &str {
        &self.url
    }

    fn extract(&self, doc: &Html) -> Result<Record> {
        let scope = Scope::from(doc);
        let ctx = Context::default();
        let mut today = Record::new();

        today.insert("moods", moods(scope)?);
        today.insert("popular_journals", assemble(scope, POPULAR_JOURNALS, &JOURNAL, &ctx)?);
        today.insert("last_comments", last_comments(scope)?);
        if let Some(deviousness) = deviousness(scope)? {
            today.insert("deviousness", deviousness);
        }
        if let Some(count) = daily_deviation_count(scope)? {
            today.insert("daily_deviations", count);
        }

        if let Some(n) = total_online(scope)? {
            today.insert("total_deviants_online", n);
        }
        today.insert("deviants_online", online_kinds(scope)?);

        let threads = section(scope, "popular_threads", "Popular Forum Threads")?;
        today.insert("popular_threads", assemble(threads, "li", &THREAD, &ctx)?);
        let polls = section(scope, "popular_polls", "Popular User Polls")?;
        today.insert("popular_polls", assemble(polls, "li", &POLL, &ctx)?);
        let new_deviants = section(scope, "new_deviants", "New Deviants")?;
        today.insert("new_deviants", nicknames(new_deviants)?);
        let popular = section(scope, "popular_deviants", "Popular Deviants Today")?;
        today.insert("popular_deviants", nicknames(popular)?);

        Ok(today)
    }
}

/// Mood labels and counts sit in parallel columns.
fn moods(scope: Scope<'_>) -> Result<Record> {
    let labels = scope.texts(MOOD_LABELS)?;
    let counts = scope
        .texts(MOOD_COUNTS)?
        .into_iter()
        .map(|c| count_or_text(&c))
        .collect();
    pair_keyed("moods", labels, counts)
}

fn last_comments(scope: Scope<'_>) -> Result<Vec<Record>> {
    let authors = scope.texts(COMMENT_AUTHORS)?.into_iter().map(FieldValue::Text).collect();
    let links = scope
        .select(COMMENT_LINKS)?
        .into_iter()
        .map(|a| FieldValue::OptionalText(html::attr(a, "href")))
        .collect();
    pair_records("last_comments", vec![("author", authors), ("url", links)])
}

fn deviousness(scope: Scope<'_>) -> Result<Option<Record>> {
    let blocks = scope.select(DEVIOUSNESS)?;
    if blocks.is_empty() {
        return Ok(None);
    }
    let mut nicknames = Vec::new();
    let mut paragraphs = Vec::new();
    for block in &blocks {
        let block = Scope::from(*block);
        nicknames.extend(block.select("a .u")?);
        paragraphs.extend(block.select("p")?);
    }
    let nickname = nicknames.first().ok_or_else(|| Error::MissingNode {
        field: "deviousness",
        selector: format!("{DEVIOUSNESS} a .u"),
    })?;

    let mut record = Record::new();
    record.insert("nickname", html::text(*nickname));
    record.insert("text", html::joined_text(&paragraphs));
    Ok(Some(record))
}

/// The count in the `NN Daily Deviations` block heading.
///
/// Journal titles share the heading selector, so only a heading that ends in
/// the label with a bare count before it qualifies.
fn daily_deviation_count(scope: Scope<'_>) -> Result<Option<i64>> {
    const LABEL: &str = "Daily Deviations";
    let count = scope
        .texts(BLOCK_HEADINGS)?
        .iter()
        .filter_map(|h| h.strip_suffix(LABEL))
        .find_map(parse_separated);
    if count.is_none() {
        debug!("No daily deviations heading");
    }
    Ok(count)
}

/// Total from the first section heading ending in `Deviants Online`.
fn total_online(scope: Scope<'_>) -> Result<Option<i64>> {
    const LABEL: &str = "Deviants Online";
    let heading = scope
        .texts(SECTION_HEADINGS)?
        .into_iter()
        .find(|h| h.ends_with(LABEL))
        .ok_or_else(|| Error::MissingNode {
            field: "total_deviants_online",
            selector: format!("{SECTION_HEADINGS} ending in {LABEL:?}"),
        })?;
    Ok(parse_count(&heading))
}

fn online_kinds(scope: Scope<'_>) -> Result<Record> {
    let mut kinds = Record::new();
    for text in scope.texts(ONLINE_KINDS)? {
        match LABELLED_COUNT.parse(&text) {
            Ok(c) => kinds.insert(symbol(&c.label), c.count),
            Err(e) => debug!(error = %e, "Skipping online tally"),
        }
    }
    Ok(kinds)
}

/// The `.section` whose heading reads exactly `heading`.
fn section<'a>(scope: Scope<'a>, field: &'static str, heading: &'static str) -> Result<Scope<'a>> {
    let found = scope
        .select(SECTION_HEADINGS)?
        .into_iter()
        .find(|h| html::text(*h) == heading)
        .and_then(html::parent);
    match found {
        Some(section) => Ok(Scope::from(section)),
        None => Err(Error::MissingNode {
            field,
            selector: format!("{SECTION_HEADINGS} = {heading:?}"),
        }),
    }
}

fn nicknames(section: Scope<'_>) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for li in section.select("li")? {
        names.push(html::joined_text(&Scope::from(li).select("a .u")?));
    }
    Ok(names)
}

fn count_or_text(text: &str) -> FieldValue {
    match parse_separated(text) {
        Some(n) => FieldValue::Integer(n),
        None => FieldValue::Text(text.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
        <dl><div class="f"><div class="graph">
          <dd>Happy</dd><dt>1,204</dt>
          <dd>Sad</dd><dt>87</dt>
          <dd>Bored Stiff</dd><dt>5</dt>
        </div></div></dl>

        <div class="block"><div class="pppt">
          <div class="iconleft"><div class="abridged">
            <div class="userjournal">
              <h3><a href="http://alice.deviantart.com/journal/1/">Big News</a></h3>
              <a href="http://alice.deviantart.com/"><span class="u">alice</span></a>
            </div>
            <div class="userjournal">
              <h3><a href="http://bob.deviantart.com/journal/2/">Small News</a></h3>
            </div>
          </div></div>
        </div></div>

        <div class="c"><div class="block"><div class="pppt">
          <span class="shadow"><a href="http://www.deviantart.com/deviation/11/#comment"><img></a></span>
          <a href="http://carol.deviantart.com/"><span class="u">carol</span></a>
          <span class="shadow"><a href="http://www.deviantart.com/deviation/12/#comment"><img></a></span>
          <a href="http://dave.deviantart.com/"><span class="u">dave</span></a>
          <h3>24 Daily Deviations</h3>
        </div></div></div>

        <div class="block"><div class="pppt"><div class="ppb">
          <a href="http://erin.deviantart.com/"><span class="u">erin</span></a>
          <p>For years of service.</p>
        </div></div></div>

        <div class="flatview">
          <div class="section">
            <h3>12,345 Deviants Online</h3>
            <div class="ppppb"><div class="block"><ul><li class="f"><ul><li class="f">
              <span class="f">11,000 Members</span>
              <span class="f">1,300 Subscribers</span>
              <span class="f">45 Senior Members</span>
              <span class="f">and more</span>
            </li></ul></li></ul></div></div>
          </div>
          <div class="section">
            <h3>Popular Forum Threads</h3>
            <ul>
              <li><a href="/forum/1">Critique swap</a> by <a href="/u/f">frank</a> <span>(1,234 replies)</span></li>
              <li><a href="/forum/2">Broken</a> by <a href="/u/g">gina</a> <span>(locked)</span></li>
            </ul>
          </div>
          <div class="section">
            <h3>Popular User Polls</h3>
            <ul><li><a href="/poll/9">Tea or coffee?</a> by <a href="/u/h">hank</a> <span>(56 votes)</span></li></ul>
          </div>
          <div class="section">
            <h3>New Deviants</h3>
            <ul><li><a href="/u/i"><span class="u">ivy</span></a></li><li><a href="/u/j"><span class="u">jon</span></a></li></ul>
          </div>
          <div class="section">
            <h3>Popular Deviants Today</h3>
            <ul><li><a href="/u/k"><span class="u">kim</span></a></li></ul>
          </div>
        </div>
        </body></html>
    "#;

    fn extract(page: &str) -> Result<Record> {
        TodayPage::new(&Config::default()).extract(&Html::parse_document(page))
    }

    fn list<'r>(record: &'r Record, key: &str) -> &'r [FieldValue] {
        record.get(key).and_then(FieldValue::as_list).unwrap()
    }

    #[test]
    fn test_moods_keyed_by_symbol() {
        let today = extract(PAGE).unwrap();
        let moods = today.get("moods").and_then(FieldValue::as_record).unwrap();
        assert_eq!(moods.integer("happy"), Some(1204));
        assert_eq!(moods.integer("sad"), Some(87));
        assert_eq!(moods.integer("bored_stiff"), Some(5));
    }

    #[test]
    fn test_popular_journals() {
        let today = extract(PAGE).unwrap();
        let journals = list(&today, "popular_journals");
        assert_eq!(journals.len(), 2);
        let first = journals[0].as_record().unwrap();
        assert_eq!(first.text("title"), Some("Big News"));
        assert_eq!(first.text("author"), Some("alice"));
        assert_eq!(first.text("url"), Some("http://alice.deviantart.com/journal/1/"));
        assert!(!journals[1].as_record().unwrap().contains_key("author"));
    }

    #[test]
    fn test_last_comments_paired() {
        let today = extract(PAGE).unwrap();
        let comments = list(&today, "last_comments");
        assert_eq!(comments.len(), 2);
        let last = comments[1].as_record().unwrap();
        assert_eq!(last.text("author"), Some("dave"));
        assert_eq!(last.text("url"), Some("http://www.deviantart.com/deviation/12/#comment"));
    }

    #[test]
    fn test_deviousness_and_daily_count() {
        let today = extract(PAGE).unwrap();
        let deviousness = today.get("deviousness").and_then(FieldValue::as_record).unwrap();
        assert_eq!(deviousness.text("nickname"), Some("erin"));
        assert_eq!(deviousness.text("text"), Some("For years of service."));
        assert_eq!(today.integer("daily_deviations"), Some(24));
    }

    #[test]
    fn test_deviants_online() {
        let today = extract(PAGE).unwrap();
        assert_eq!(today.integer("total_deviants_online"), Some(12345));
        let kinds = today.get("deviants_online").and_then(FieldValue::as_record).unwrap();
        assert_eq!(kinds.integer("members"), Some(11000));
        assert_eq!(kinds.integer("subscribers"), Some(1300));
        assert_eq!(kinds.integer("senior_members"), Some(45));
        assert_eq!(kinds.len(), 3);
    }

    #[test]
    fn test_threads_skip_malformed_entries() {
        let today = extract(PAGE).unwrap();
        let threads = list(&today, "popular_threads");
        assert_eq!(threads.len(), 1);
        let thread = threads[0].as_record().unwrap();
        assert_eq!(thread.text("title"), Some("Critique swap"));
        assert_eq!(thread.text("url"), Some("/forum/1"));
        assert_eq!(thread.text("author"), Some("frank"));
        assert_eq!(thread.integer("replies"), Some(1234));
    }

    #[test]
    fn test_polls_and_nickname_lists() {
        let today = extract(PAGE).unwrap();
        let polls = list(&today, "popular_polls");
        assert_eq!(polls[0].as_record().unwrap().integer("votes"), Some(56));
        let new: Vec<&str> = list(&today, "new_deviants").iter().filter_map(FieldValue::as_text).collect();
        assert_eq!(new, vec!["ivy", "jon"]);
        let popular: Vec<&str> = list(&today, "popular_deviants").iter().filter_map(FieldValue::as_text).collect();
        assert_eq!(popular, vec!["kim"]);
    }

    #[test]
    fn test_missing_section_is_structural_error() {
        let page = PAGE.replace("Popular User Polls", "Polls");
        let err = extract(&page).unwrap_err();
        assert!(matches!(err, Error::MissingNode { field: "popular_polls", .. }));
    }

    #[test]
    fn test_daily_count_ignores_journal_titles_with_label() {
        let page = PAGE
            .replace("Big News", "My Daily Deviations picks")
            .replace("Small News", "Best Daily Deviations");
        let today = extract(&page).unwrap();
        assert_eq!(today.integer("daily_deviations"), Some(24));
    }

    #[test]
    fn test_daily_count_absent_without_heading() {
        let page = PAGE.replace("<h3>24 Daily Deviations</h3>", "");
        let today = extract(&page).unwrap();
        assert!(!today.contains_key("daily_deviations"));
    }

    #[test]
    fn test_thread_without_counter_is_skipped() {
        let page = PAGE.replace(" <span>(locked)</span>", "");
        let today = extract(&page).unwrap();
        let threads = list(&today, "popular_threads");
        assert_eq!(threads.len(), 1);
        assert_eq!(threads[0].as_record().unwrap().text("title"), Some("Critique swap"));
        assert_eq!(list(&today, "popular_polls").len(), 1);
    }

    #[test]
    fn test_total_online_uses_labelled_heading() {
        let page = PAGE.replace(
            r#"<div class="flatview">"#,
            r#"<div class="flatview"><div class="section"><h3>7 Featured Groups</h3></div>"#,
        );
        let today = extract(&page).unwrap();
        assert_eq!(today.integer("total_deviants_online"), Some(12345));
    }

    #[test]
    fn test_total_online_missing_label_is_structural_error() {
        let page = PAGE.replace("12,345 Deviants Online", "12,345 Visitors");
        let err = extract(&page).unwrap_err();
        assert!(matches!(err, Error::MissingNode { field: "total_deviants_online", .. }));
    }

    #[test]
    fn test_mood_column_mismatch() {
        let page = PAGE.replace("<dt>87</dt>", "");
        let err = extract(&page).unwrap_err();
        assert!(matches!(err, Error::PairingMismatch { what: "moods", .. }));
    }
}
