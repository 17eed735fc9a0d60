//! Command-line interface definitions for devscrape.
//!
//! One subcommand per page type. Global options pick the config file and
//! where the JSON report goes.

use clap::{Parser, Subcommand};

/// Command-line arguments.
///
/// # Examples
///
/// ```sh
/// # Today's site statistics, pretty-printed
/// devscrape --pretty today
///
/// # A user's journal, written to a file
/// devscrape -o out/journal.json journal someone
///
/// # Art news, against a mirror described in a config file
/// DEVSCRAPE_CONFIG=mirror.yaml devscrape news --section art
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a config.yaml file
    #[arg(short, long, env = "DEVSCRAPE_CONFIG", global = true)]
    pub config: Option<String>,

    /// Write the JSON report to this file instead of stdout
    #[arg(short, long, global = true)]
    pub output: Option<String>,

    /// Pretty-print the JSON report
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub page: Page,
}

/// Page to scrape.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Page {
    /// Site-wide statistics from the today page
    Today,
    /// The daily deviations list
    Dds,
    /// Site news
    News {
        /// News section: front, art, culture, da or fun
        #[arg(short, long, default_value = "front")]
        section: String,
    },
    /// A user's journal entries
    Journal {
        /// User nickname
        nickname: String,
    },
    /// A user's profile page
    Profile {
        /// User nickname
        nickname: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from(["devscrape", "--config", "mirror.yaml", "--pretty", "today"]);

        assert_eq!(cli.config.as_deref(), Some("mirror.yaml"));
        assert!(cli.pretty);
        assert_eq!(cli.output, None);
        assert_eq!(cli.page, Page::Today);
    }

    #[test]
    fn test_cli_short_flags_after_subcommand() {
        let cli = Cli::parse_from(["devscrape", "journal", "someone", "-o", "/tmp/journal.json"]);

        assert_eq!(cli.output.as_deref(), Some("/tmp/journal.json"));
        assert_eq!(
            cli.page,
            Page::Journal {
                nickname: "someone".to_string()
            }
        );
    }

    #[test]
    fn test_news_section_defaults_to_front() {
        let cli = Cli::parse_from(["devscrape", "news"]);
        assert_eq!(
            cli.page,
            Page::News {
                section: "front".to_string()
            }
        );

        let cli = Cli::parse_from(["devscrape", "news", "--section", "art"]);
        assert_eq!(
            cli.page,
            Page::News {
                section: "art".to_string()
            }
        );
    }

    #[test]
    fn test_nickname_is_required() {
        assert!(Cli::try_parse_from(["devscrape", "profile"]).is_err());
    }
}
