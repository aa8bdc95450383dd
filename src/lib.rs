#![warn(missing_docs)]
#![allow(clippy::arithmetic_side_effects)] // Simple counters and size totals cannot overflow

//! # aretheyallhere - Checksum-Based Tree Comparison
//!
//! Feeds a local record store with every file found under a source and a
//! destination directory, together with its content checksum (SHA-1 by
//! default, MD5 optional), then reports which source files have no
//! checksum match anywhere in the destination tree.
//!
//! The comparison is content-addressed: a file that was renamed or moved
//! inside the destination still counts as present as long as one
//! destination file carries the same checksum.
//!
//! ## Architecture
//!
//! - [`checksum`]: digest computation (SHA-1 / MD5, streaming reads)
//! - [`scanner`]: recursive directory traversal
//! - [`store`]: durable record store, one record per scanned file
//! - [`commands`]: the populate (scan) and report (diff) operations
//! - [`output`]: user-facing messages and in-place progress rendering
//! - [`cli`]: command-line argument definitions

/// Checksum computation with selectable digest algorithm.
pub mod checksum;

/// Command-line interface definitions (argument parsing structures).
pub mod cli;

/// The populate and report command implementations.
pub mod commands;

/// User-facing messages and progress rendering.
pub mod output;

/// Recursive filesystem traversal.
pub mod scanner;

/// Durable record store holding one record per scanned file.
pub mod store;

use std::path::PathBuf;

/// Current version of the aretheyallhere binary.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default record store file, created in the current directory.
pub const DEFAULT_STORE_FILE: &str = "aretheyallhere.db";

/// Settings shared by the populate and report operations.
///
/// Built once from the parsed command line; commands receive it by
/// reference and never mutate it.
#[derive(Debug, Clone)]
pub struct AppContext {
    /// Path to the record store file.
    pub store_path: PathBuf,

    /// Digest algorithm used when scanning files.
    pub checksum_type: checksum::ChecksumType,

    /// Whether a non-empty store is cleared and rescanned.
    pub force: bool,
}

impl AppContext {
    /// Creates a context for the given store path, algorithm, and force flag.
    #[must_use]
    pub fn new(store_path: PathBuf, checksum_type: checksum::ChecksumType, force: bool) -> Self {
        Self {
            store_path,
            checksum_type,
            force,
        }
    }
}
