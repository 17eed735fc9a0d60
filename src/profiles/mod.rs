//! Page extraction profiles.
//!
//! Each profile knows one page type: its URL and the selectors, rule tables
//! and templates that turn its markup into records.
//!
//! | Page | Profile | Output |
//! |------|---------|--------|
//! | Today (site statistics) | [`today::TodayPage`] | one [`Record`](crate::Record) |
//! | Daily deviations | [`daily::DailyDeviations`] | `Vec<Record>` |
//! | Site news | [`news::SiteNews`] | `Vec<Record>` |
//! | User journal | [`journal::UserJournal`] | `Vec<Record>` |
//! | User profile | [`user::UserProfile`] | one `Record` |
//!
//! Profiles hold no parse state. [`PageProfile::run`] borrows a tree for one
//! pass and returns the data together with the time the pass took;
//! [`scrape`] adds fetching around it.

pub mod daily;
pub mod journal;
pub mod news;
pub mod today;
pub mod user;

use crate::error::Result;
use crate::extract::timed;
use crate::fetch::FetchPage;
use crate::models::{Extraction, PageReport};
use chrono::Utc;
use scraper::Html;
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{info, instrument};

/// One page type.
pub trait PageProfile {
    type Output: Serialize;

    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Page to fetch.
    fn url(&self) -> &str;

    /// Pull this page's records out of `doc`.
    fn extract(&self, doc: &Html) -> Result<Self::Output>;

    /// [`extract`](Self::extract), timed.
    fn run(&self, doc: &Html) -> Result<Extraction<Self::Output>> {
        timed(|| self.extract(doc))
    }

    /// Parse `body` into a tree, run the extraction and drop the tree.
    ///
    /// Returns the tree-building time alongside the extraction.
    fn run_on_markup(&self, body: &str) -> Result<(Duration, Extraction<Self::Output>)> {
        let t0 = Instant::now();
        let doc = Html::parse_document(body);
        let tree_time = t0.elapsed();
        let extraction = self.run(&doc)?;
        Ok((tree_time, extraction))
    }
}

/// Fetch the profile's page and extract it.
///
/// Fetch time in the report covers the download and tree construction; parse
/// time covers the extraction pass alone.
#[instrument(level = "info", skip_all, fields(profile = profile.name(), url = profile.url()))]
pub async fn scrape<F, P>(fetcher: &F, profile: &P) -> Result<PageReport<P::Output>>
where
    F: FetchPage,
    P: PageProfile,
{
    let t0 = Instant::now();
    let body = fetcher.fetch(profile.url()).await?;
    let fetched_at = Utc::now();
    let download_time = t0.elapsed();

    let (tree_time, extraction) = profile.run_on_markup(&body)?;
    let report = PageReport::new(profile.url().to_string(), fetched_at, download_time + tree_time, extraction);
    info!(
        fetch_ms = report.fetch_time_ms as u64,
        parse_ms = report.parse_time_ms as u64,
        total_ms = report.total_time_ms as u64,
        "Page scraped"
    );
    Ok(report)
}
