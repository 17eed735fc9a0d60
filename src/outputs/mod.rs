//! Report output.
//!
//! Reports are written as JSON, either to stdout or to a file:
//!
//! ```text
//! devscrape today                      # JSON on stdout
//! devscrape -o out/today.json today    # JSON in out/today.json
//! ```

pub mod json;
