//! Report source files missing from the destination.
//!
//! The comparison keys on checksum alone: a source file counts as present
//! when any destination file carries the same digest, wherever it lives
//! and whatever it is called.

use crate::output;
use crate::store::{FileRecord, RecordStore, Referential};
use anyhow::Result;

/// Source-origin records whose checksum appears in no destination record.
///
/// Each qualifying record is returned once, in store insertion order.
#[must_use]
pub fn missing_in_destination(store: &RecordStore) -> Vec<&FileRecord> {
    let destination_checksums = store.query_checksums(Referential::Destination);

    store
        .query(Referential::Source)
        .into_iter()
        .filter(|record| !destination_checksums.contains(record.checksum.as_str()))
        .collect()
}

/// Prints the missing-file listing and its trailing total.
///
/// # Errors
///
/// Currently infallible; kept fallible for uniformity with the other
/// command entry points.
pub fn execute(store: &RecordStore) -> Result<()> {
    output::print_info("List of missing file(s) in destination :");

    let missing = missing_in_destination(store);
    for record in &missing {
        println!("{record}");
    }
    println!("Total = {} file(s)", missing.len());

    Ok(())
}
