//! # devscrape
//!
//! Extraction of deviantART pages into typed records.
//!
//! A page is fetched, parsed into a document tree once, and handed to a
//! [`PageProfile`](profiles::PageProfile) that knows where that page keeps its
//! data. Profiles are assembled from the generic pieces in [`extract`]:
//! decode rule tables, positional pairing, compound regex parsing and
//! template-driven record assembly.
//!
//! ```no_run
//! use devscrape::{profiles, Config, HttpFetcher};
//! use devscrape::profiles::journal::UserJournal;
//!
//! # async fn run() -> devscrape::Result<()> {
//! let config = Config::default();
//! let fetcher = HttpFetcher::new(&config)?;
//! let journal = UserJournal::new(&config, "someone")?;
//! let report = profiles::scrape(&fetcher, &journal).await?;
//! for entry in &report.data {
//!     println!("{:?}", entry.text("title"));
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod html;
pub mod models;
pub mod outputs;
pub mod profiles;
pub mod utils;

pub use config::Config;
pub use error::{Error, Result};
pub use fetch::{FetchPage, HttpFetcher};
pub use models::{Extraction, FieldValue, PageReport, Record};
