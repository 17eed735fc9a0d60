//! The extraction engine.
//!
//! Page profiles are built from four generic pieces:
//!
//! | Piece | Module | Turns |
//! |-------|--------|-------|
//! | Decode rule tables | [`rules`] | one line of text into one typed field, by first matching label |
//! | Positional pairing | [`pairing`] | parallel node lists into records by index |
//! | Compound parsing | [`compound`] | one blob into a count and a qualifier |
//! | Record assembly | [`assembler`] | repeated container nodes into a record each |
//!
//! None of them keep state between calls; running the same extraction twice
//! over the same tree gives the same result.

pub mod assembler;
pub mod compound;
pub mod pairing;
pub mod rules;

use crate::error::Result;
use crate::models::Extraction;
use std::time::Instant;

/// Run one extraction pass and time it.
pub fn timed<T>(pass: impl FnOnce() -> Result<T>) -> Result<Extraction<T>> {
    let start = Instant::now();
    let data = pass()?;
    Ok(Extraction {
        data,
        elapsed: start.elapsed(),
    })
}
