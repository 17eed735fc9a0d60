//! # devscrape
//!
//! Command-line front end: fetch one deviantART page, extract it with the
//! matching profile and print the report as JSON.
//!
//! ## Usage
//!
//! ```sh
//! devscrape today
//! devscrape news --section culture
//! devscrape --pretty -o out/profile.json profile someone
//! ```
//!
//! Logs go to stderr; set `RUST_LOG=devscrape=debug` to see per-entry skips
//! and rule misses.

use clap::Parser;
use devscrape::outputs::json;
use devscrape::profiles::daily::DailyDeviations;
use devscrape::profiles::journal::UserJournal;
use devscrape::profiles::news::{Section, SiteNews};
use devscrape::profiles::today::TodayPage;
use devscrape::profiles::user::UserProfile;
use devscrape::profiles::{self, PageProfile};
use devscrape::{Config, HttpFetcher};
use std::error::Error;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod cli;

use cli::{Cli, Page};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_writer(std::io::stderr)
        .init();

    let start_time = std::time::Instant::now();

    let args = Cli::parse();
    debug!(?args.page, ?args.config, ?args.output, "Parsed CLI arguments");

    let config = Config::load(args.config.as_deref())?;
    let fetcher = HttpFetcher::new(&config)?;

    let result = match &args.page {
        Page::Today => run(&fetcher, &TodayPage::new(&config), &args).await,
        Page::Dds => run(&fetcher, &DailyDeviations::new(&config), &args).await,
        Page::News { section } => {
            let news = SiteNews::new(&config, Section::from_key(section));
            run(&fetcher, &news, &args).await
        }
        Page::Journal { nickname } => {
            let journal = UserJournal::new(&config, nickname)?;
            run(&fetcher, &journal, &args).await
        }
        Page::Profile { nickname } => {
            let profile = UserProfile::new(&config, nickname)?;
            run(&fetcher, &profile, &args).await
        }
    };

    if let Err(e) = &result {
        error!(error = %e, "Scrape failed");
    }
    info!(elapsed_ms = start_time.elapsed().as_millis() as u64, "Done");
    result
}

/// Scrape one page and write its report.
#[instrument(level = "info", skip_all, fields(page = profile.name()))]
async fn run<P: PageProfile>(fetcher: &HttpFetcher, profile: &P, args: &Cli) -> Result<(), Box<dyn Error>> {
    let report = profiles::scrape(fetcher, profile).await?;
    json::write_report(&report, args.output.as_deref(), args.pretty).await
}
