//! Command-line interface definitions for aretheyallhere.
//!
//! Field-level documentation doubles as clap help text, so this module
//! allows missing docs on arguments.

#![allow(missing_docs)]

use crate::checksum::ChecksumType;
use clap::Parser;
use std::path::PathBuf;

/// Main CLI structure.
#[derive(Parser)]
#[command(
    name = "aretheyallhere",
    version = crate::VERSION,
    about = "Tells you whether every file of a source tree is present, by checksum, in a destination tree",
    long_about = "Feeds a local database with the files of a source and a destination \
                  directory together with their content checksums, then lists every source \
                  file whose checksum is missing from the destination, whatever its path or \
                  name there may be."
)]
pub struct Cli {
    /// Force overwriting the content of a non-empty database file
    #[arg(short, long)]
    pub force: bool,

    /// Database file used to persist scan results
    #[arg(long, value_name = "FILE", default_value = crate::DEFAULT_STORE_FILE)]
    pub database: PathBuf,

    /// Checksum algorithm used for comparing files
    #[arg(short, long, value_enum, default_value_t = ChecksumType::Sha1)]
    pub checksum_type: ChecksumType,

    /// Source path whose files are expected to all be in the destination
    #[arg(short, long, value_name = "DIR")]
    pub source: Option<PathBuf>,

    /// Destination path in which the source files are looked up
    #[arg(short, long, value_name = "DIR")]
    pub destination: Option<PathBuf>,

    /// Show debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}
