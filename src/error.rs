//! Error types for page fetching and extraction.
//!
//! Every failure the crate reports is one of these variants. Decode-rule misses
//! are not errors: an unrecognised line of text simply leaves its field out of
//! the record.

/// Error type for fetch and extraction operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A caller-supplied parameter (nickname, config value) is unusable.
    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        name: &'static str,
        reason: String,
    },

    /// A selector path could not be compiled.
    #[error("Invalid selector `{0}`")]
    InvalidSelector(String),

    /// A required selector matched no node; the page no longer has the expected shape.
    #[error("Required node missing: {selector} ({field})")]
    MissingNode {
        field: &'static str,
        selector: String,
    },

    /// Parallel node sequences that are paired by index differ in length.
    #[error("Pairing mismatch for {what}: expected {expected} items, found {found}")]
    PairingMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    /// A compound field did not match its pattern.
    #[error("Text `{text}` does not match the {pattern} pattern")]
    PatternMismatch {
        pattern: &'static str,
        text: String,
    },

    /// The URL failed validation before any connection was attempted.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The page could not be downloaded.
    #[error("Unable to connect to {url}: {reason}")]
    UnableToConnect { url: String, reason: String },

    /// The configuration file could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// True for failures confined to one repeated entry.
    ///
    /// The record assembler skips such entries and keeps going; every other
    /// error aborts extraction of the whole page.
    pub fn is_entry_local(&self) -> bool {
        matches!(self, Error::PatternMismatch { .. })
    }
}

/// Result type alias for fetch and extraction operations.
pub type Result<T> = std::result::Result<T, Error>;
