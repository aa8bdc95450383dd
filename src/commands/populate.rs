//! Scan both trees and fill the record store.
//!
//! Each root is walked once and buffered so the combined file total of the
//! two-root operation is known before the first checksum is computed; the
//! remaining-time estimate spans the whole run, not just the current tree.
//! Files are then hashed and inserted one at a time, one durable store
//! write per file, so interrupting a scan leaves a prefix of complete
//! records.

use crate::AppContext;
use crate::checksum;
use crate::output::{self, SpinnerLine, estimate_remaining, format_remaining};
use crate::scanner::{self, ScannedFile};
use crate::store::{FileRecord, RecordStore, Referential};
use anyhow::{Result, bail};
use std::path::Path;
use std::time::Instant;

/// Populates the store from the given roots.
///
/// With a non-empty store and no `--force`, scanning is skipped entirely:
/// a warning is printed if at least one root was requested, otherwise the
/// run silently proceeds to reporting over the existing data. A forced
/// rescan clears the store first.
///
/// # Errors
///
/// Returns an error if a requested root is not an existing directory, or
/// if any file cannot be traversed, read, or written to the store. A
/// failure on one file aborts the whole scan.
pub fn execute(
    ctx: &AppContext,
    store: &mut RecordStore,
    source: Option<&Path>,
    destination: Option<&Path>,
) -> Result<()> {
    if store.count() > 0 && !ctx.force {
        if source.is_some() || destination.is_some() {
            output::print_warning(&format!(
                "database '{}' is not empty, scanning is skipped to avoid overwriting it. \
                 Delete the file or pass --force to rescan.",
                ctx.store_path.display()
            ));
        }
        return Ok(());
    }

    for root in [source, destination].into_iter().flatten() {
        if !root.is_dir() {
            bail!("Not an existing directory: {}", root.display());
        }
    }

    // A forced run that names no root rescans nothing, so the existing
    // records must survive; only a real rescan replaces them
    if store.count() > 0 && (source.is_some() || destination.is_some()) {
        store.clear()?;
    }

    let mut spinner = SpinnerLine::new();
    let source_files = count_tree(&mut spinner, source)?;
    let destination_files = count_tree(&mut spinner, destination)?;

    let total = source_files.as_deref().map_or(0, <[ScannedFile]>::len)
        + destination_files.as_deref().map_or(0, <[ScannedFile]>::len);
    let mut progress = ScanProgress::new(spinner, total);

    if let Some(files) = source_files {
        scan_into_store(ctx, store, &mut progress, &files, Referential::Source)?;
    }
    if let Some(files) = destination_files {
        scan_into_store(ctx, store, &mut progress, &files, Referential::Destination)?;
    }

    progress.finish();
    tracing::debug!(records = total, "populate finished");

    Ok(())
}

/// Walks one root while showing the counting spinner, erased afterwards.
fn count_tree(spinner: &mut SpinnerLine, root: Option<&Path>) -> Result<Option<Vec<ScannedFile>>> {
    let Some(root) = root else {
        return Ok(None);
    };

    spinner.tick(&format!("counting files in path {}", root.display()));
    let files = scanner::scan_tree(root)?;
    spinner.erase();

    let totals = scanner::tree_totals(&files);
    tracing::debug!(root = %root.display(), files = totals.files, bytes = totals.bytes, "pre-scan totals");

    Ok(Some(files))
}

/// Hashes and stores every file of one tree under the given origin tag.
fn scan_into_store(
    ctx: &AppContext,
    store: &mut RecordStore,
    progress: &mut ScanProgress,
    files: &[ScannedFile],
    referential: Referential,
) -> Result<()> {
    for file in files {
        progress.file_started(referential);

        let digest = checksum::hash_file(&file.path, ctx.checksum_type)?;
        store.insert(FileRecord::new(
            file.name.clone(),
            file.path.clone(),
            digest,
            referential,
        ))?;

        progress.file_done();
    }

    Ok(())
}

/// Running progress over the combined two-root scan.
///
/// Owns the spinner for the processing phase; nothing else writes to
/// stdout until `finish` has erased the line.
struct ScanProgress {
    /// The console line being redrawn.
    spinner: SpinnerLine,
    /// Files processed so far across both roots.
    processed: usize,
    /// Combined file total of both roots.
    total: usize,
    /// Start of the processing phase.
    started: Instant,
}

impl ScanProgress {
    fn new(spinner: SpinnerLine, total: usize) -> Self {
        Self {
            spinner,
            processed: 0,
            total,
            started: Instant::now(),
        }
    }

    /// Redraws the line for the file about to be processed.
    fn file_started(&mut self, referential: Referential) {
        let remaining = estimate_remaining(self.processed, self.total, self.started.elapsed());
        self.spinner.tick(&format!(
            "processing file {}/{} from referential {} ({} remaining)",
            self.processed,
            self.total,
            referential,
            format_remaining(remaining)
        ));
    }

    fn file_done(&mut self) {
        self.processed += 1;
    }

    /// Erases the progress line, leaving the console clean.
    fn finish(mut self) {
        self.spinner.erase();
    }
}
