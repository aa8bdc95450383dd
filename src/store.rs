//! Durable record store holding one record per scanned file.
//!
//! The store is a single local file: a small magic/version header followed
//! by length-prefixed bincode records. Every insert appends one record and
//! syncs it to disk, so a crash mid-scan leaves a prefix of complete
//! records and never a half-written one. A truncated tail entry (the crash
//! case) is detected on load and discarded with a warning.
//!
//! Records are immutable once written. The only mutations are insert and
//! `clear`, which rewrites the store wholesale for a forced rescan.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Magic bytes identifying a record store file.
const STORE_MAGIC: &[u8; 4] = b"ATAH";

/// On-disk format version.
const STORE_VERSION: u32 = 1;

/// Header length: magic plus version.
const HEADER_LEN: usize = 8;

/// Sentinel for the reserved mimetype column; mime detection is not
/// implemented.
pub const MIMETYPE_PLACEHOLDER: &str = "?";

/// Bincode configuration for record encoding.
fn bincode_config() -> impl bincode::config::Config {
    // Legacy configuration for serde compatibility; allocation limit guards
    // against decoding corrupt length prefixes
    bincode::config::legacy().with_limit::<{ 16 * 1024 * 1024 }>()
}

/// Which of the two compared trees a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Referential {
    /// The tree whose files are expected to all be present elsewhere.
    Source,
    /// The tree searched for matching checksums.
    Destination,
}

impl Referential {
    /// The tag as stored and displayed.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::Destination => "destination",
        }
    }
}

impl fmt::Display for Referential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One scanned file: name, full path, content checksum, and origin tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Base filename.
    pub name: String,
    /// Full filesystem path.
    pub path: PathBuf,
    /// Lowercase hex digest of the file content.
    pub checksum: String,
    /// Reserved column, always [`MIMETYPE_PLACEHOLDER`].
    pub mimetype: String,
    /// Origin tag.
    pub referential: Referential,
}

impl FileRecord {
    /// Creates a record with the sentinel mimetype.
    #[must_use]
    pub fn new(name: String, path: PathBuf, checksum: String, referential: Referential) -> Self {
        Self {
            name,
            path,
            checksum,
            mimetype: MIMETYPE_PLACEHOLDER.to_string(),
            referential,
        }
    }
}

impl fmt::Display for FileRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "file:{} fullpath:{} checksum:{} referential:{} mime:{}",
            self.name,
            self.path.display(),
            self.checksum,
            self.referential,
            self.mimetype
        )
    }
}

/// File-backed record store.
///
/// Exactly one process owns a store for its lifetime; concurrent access to
/// the same file is unsupported.
pub struct RecordStore {
    /// Path to the store file.
    path: PathBuf,
    /// Write handle positioned at end of file.
    file: File,
    /// All records loaded from disk plus those inserted this run.
    records: Vec<FileRecord>,
}

impl RecordStore {
    /// Opens a store, creating the file if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or created, or if it
    /// exists but is not a record store of a supported version.
    pub fn open(path: &Path) -> Result<Self> {
        let existing = if path.exists() {
            std::fs::read(path)
                .with_context(|| format!("Failed to read record store: {}", path.display()))?
        } else {
            Vec::new()
        };

        let (records, valid_len) = if existing.is_empty() {
            (Vec::new(), 0)
        } else {
            decode_records(&existing, path)?
        };

        if valid_len < existing.len() as u64 {
            // Drop the truncated tail before appending anything after it
            OpenOptions::new()
                .write(true)
                .open(path)
                .and_then(|f| f.set_len(valid_len))
                .with_context(|| format!("Failed to repair record store: {}", path.display()))?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open record store: {}", path.display()))?;

        if existing.is_empty() {
            write_header(&mut file, path)?;
        }

        tracing::debug!(path = %path.display(), records = records.len(), "opened record store");

        Ok(Self {
            path: path.to_path_buf(),
            file,
            records,
        })
    }

    /// Appends one record and syncs it to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be encoded or the write cannot
    /// be made durable.
    pub fn insert(&mut self, record: FileRecord) -> Result<()> {
        let encoded = bincode::serde::encode_to_vec(&record, bincode_config())
            .context("Failed to encode file record")?;
        let len = u32::try_from(encoded.len()).context("File record too large to encode")?;

        self.file
            .write_all(&len.to_le_bytes())
            .and_then(|()| self.file.write_all(&encoded))
            .and_then(|()| self.file.sync_data())
            .with_context(|| format!("Failed to write record store: {}", self.path.display()))?;

        self.records.push(record);
        Ok(())
    }

    /// Number of records in the store.
    #[must_use]
    pub fn count(&self) -> usize {
        self.records.len()
    }

    /// All records with the given origin tag.
    #[must_use]
    pub fn query(&self, referential: Referential) -> Vec<&FileRecord> {
        self.records
            .iter()
            .filter(|r| r.referential == referential)
            .collect()
    }

    /// The set of checksums present for the given origin tag.
    #[must_use]
    pub fn query_checksums(&self, referential: Referential) -> HashSet<&str> {
        self.records
            .iter()
            .filter(|r| r.referential == referential)
            .map(|r| r.checksum.as_str())
            .collect()
    }

    /// Drops every record and truncates the store file for a forced rescan.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be truncated or rewritten.
    pub fn clear(&mut self) -> Result<()> {
        let mut file = File::create(&self.path)
            .with_context(|| format!("Failed to truncate record store: {}", self.path.display()))?;
        write_header(&mut file, &self.path)?;

        self.file = file;
        self.records.clear();
        Ok(())
    }
}

/// Writes and syncs the store header on a fresh file.
fn write_header(file: &mut File, path: &Path) -> Result<()> {
    file.write_all(STORE_MAGIC)
        .and_then(|()| file.write_all(&STORE_VERSION.to_le_bytes()))
        .and_then(|()| file.sync_data())
        .with_context(|| format!("Failed to initialize record store: {}", path.display()))
}

/// Decodes the record log, stopping at a truncated tail entry.
///
/// Returns the records together with the byte length of the valid prefix,
/// so the caller can cut a truncated tail off before appending.
fn decode_records(data: &[u8], path: &Path) -> Result<(Vec<FileRecord>, u64)> {
    if data.len() < HEADER_LEN || &data[..4] != STORE_MAGIC {
        bail!("Not a valid record store file: {}", path.display());
    }
    let version = u32::from_le_bytes([data[4], data[5], data[6], data[7]]);
    if version != STORE_VERSION {
        bail!(
            "Unsupported record store version {} in {}",
            version,
            path.display()
        );
    }

    let mut records = Vec::new();
    let mut offset = HEADER_LEN;

    while offset < data.len() {
        if data.len() - offset < 4 {
            tracing::warn!(path = %path.display(), "discarding truncated record at end of store");
            break;
        }
        let len = u32::from_le_bytes([
            data[offset],
            data[offset + 1],
            data[offset + 2],
            data[offset + 3],
        ]) as usize;

        if data.len() - offset - 4 < len {
            tracing::warn!(path = %path.display(), "discarding truncated record at end of store");
            break;
        }

        let (record, _) =
            bincode::serde::decode_from_slice(&data[offset + 4..offset + 4 + len], bincode_config())
                .with_context(|| format!("Corrupt record in store: {}", path.display()))?;
        records.push(record);
        offset += 4 + len;
    }

    Ok((records, offset as u64))
}
