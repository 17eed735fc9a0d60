//! JSON serialization of [`PageReport`]s.

use crate::models::PageReport;
use crate::utils::ensure_writable_parent;
use serde::Serialize;
use std::error::Error;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{error, info, instrument};

/// Serialize a report, pretty-printed when `pretty` is set.
///
/// # Arguments
///
/// * `report` - The report to serialize
/// * `pretty` - Indent the output instead of writing one line
///
/// # Errors
///
/// Returns the `serde_json` error if the page data fails to serialize.
pub fn to_json<T: Serialize>(report: &PageReport<T>, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(report)
    } else {
        serde_json::to_string(report)
    }
}

/// Write a report to `output`, or to stdout when no path is given.
///
/// The JSON is followed by a newline. Parent directories of `output` are
/// created as needed.
///
/// # Arguments
///
/// * `report` - The report to write
/// * `output` - Destination file, or `None` for stdout
/// * `pretty` - Indent the JSON
///
/// # Returns
///
/// `Ok(())` once the whole report has been written and flushed.
///
/// # Errors
///
/// Returns an error if:
/// - The report fails to serialize
/// - The output directory cannot be created or is not writable
/// - Writing the file or stdout fails
#[instrument(level = "info", skip_all, fields(output = output.unwrap_or("-")))]
pub async fn write_report<T: Serialize>(
    report: &PageReport<T>,
    output: Option<&str>,
    pretty: bool,
) -> Result<(), Box<dyn Error>> {
    let mut json = to_json(report, pretty)?;
    json.push('\n');

    match output {
        Some(path) => {
            if let Err(e) = ensure_writable_parent(path).await {
                error!(path, error = %e, "Output location is not writable");
                return Err(e);
            }
            fs::write(path, json).await?;
            info!(path, "Wrote JSON report");
        }
        None => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(json.as_bytes()).await?;
            stdout.flush().await?;
        }
    }
    Ok(())
}
