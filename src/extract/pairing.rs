//! Positional pairing of parallel node sequences.
//!
//! Some page blocks are laid out as separate lists that belong together by
//! position: mood labels in one column and mood counts in another, comment
//! authors in one list and their links in another. Pairing zips them by index.
//! The lists must line up exactly; any length difference means the page has
//! changed shape and is reported as [`Error::PairingMismatch`].

use crate::error::{Error, Result};
use crate::models::{symbol, FieldValue, Record};

/// One named column of values, in document order.
pub type Column = (&'static str, Vec<FieldValue>);

/// Build one record per index from equal-length columns.
///
/// Record `i` holds `column[i]` under each column's name, in column order.
pub fn pair_records(what: &'static str, columns: Vec<Column>) -> Result<Vec<Record>> {
    let Some(expected) = columns.first().map(|(_, values)| values.len()) else {
        return Ok(Vec::new());
    };
    check_lengths(what, expected, columns.iter().map(|(_, values)| values.len()))?;

    let mut records: Vec<Record> = (0..expected).map(|_| Record::new()).collect();
    for (name, values) in columns {
        for (record, value) in records.iter_mut().zip(values) {
            record.insert(name, value);
        }
    }
    Ok(records)
}

/// Build a single record keyed by label symbols.
///
/// `labels[i]` becomes the key for `values[i]`, so `"Happy"` paired with `12`
/// is read back as `record.get("happy")`.
pub fn pair_keyed(what: &'static str, labels: Vec<String>, values: Vec<FieldValue>) -> Result<Record> {
    check_lengths(what, labels.len(), std::iter::once(values.len()))?;
    let mut record = Record::new();
    for (label, value) in labels.iter().zip(values) {
        record.insert(symbol(label), value);
    }
    Ok(record)
}

fn check_lengths(what: &'static str, expected: usize, lengths: impl Iterator<Item = usize>) -> Result<()> {
    for found in lengths {
        if found != expected {
            return Err(Error::PairingMismatch {
                what,
                expected,
                found,
            });
        }
    }
    Ok(())
}
