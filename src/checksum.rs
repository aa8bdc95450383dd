//! Checksum computation for scanned files.
//!
//! Files are hashed with SHA-1 by default; MD5 is available for older
//! databases that were populated with it. Reads are streamed through a
//! fixed buffer so large files never have to fit in memory, and the
//! resulting digest is identical to hashing the whole content at once.

use anyhow::{Context, Result};
use clap::ValueEnum;
use md5::Md5;
use sha1::{Digest, Sha1};
use std::fmt;
use std::fmt::Write as _;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Read buffer size for streaming digests.
const HASH_BUFFER_SIZE: usize = 64 * 1024;

/// Digest algorithm used for file checksums.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChecksumType {
    /// SHA-1, 40 hex character digests (default).
    #[default]
    Sha1,
    /// MD5, 32 hex character digests.
    Md5,
}

impl ChecksumType {
    /// Resolves an algorithm name, falling back to MD5 for anything
    /// unrecognized.
    ///
    /// The fallback is legacy behavior kept for databases produced by the
    /// historical tool; the command line rejects unknown names before this
    /// is reached.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "sha1" => Self::Sha1,
            _ => Self::Md5,
        }
    }

    /// Length in hex characters of a digest produced by this algorithm.
    #[must_use]
    pub const fn digest_len(self) -> usize {
        match self {
            Self::Sha1 => 40,
            Self::Md5 => 32,
        }
    }
}

impl fmt::Display for ChecksumType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sha1 => write!(f, "sha1"),
            Self::Md5 => write!(f, "md5"),
        }
    }
}

/// Hashes a byte slice, returning the lowercase hex digest.
#[must_use]
pub fn hash_bytes(data: &[u8], kind: ChecksumType) -> String {
    match kind {
        ChecksumType::Sha1 => to_hex(Sha1::digest(data).as_slice()),
        ChecksumType::Md5 => to_hex(Md5::digest(data).as_slice()),
    }
}

/// Hashes the full content of a file, returning the lowercase hex digest.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read, for example when
/// it disappeared between enumeration and hashing or is a broken symlink.
pub fn hash_file(path: &Path, kind: ChecksumType) -> Result<String> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open file for hashing: {}", path.display()))?;

    let digest = match kind {
        ChecksumType::Sha1 => stream_digest::<Sha1>(file),
        ChecksumType::Md5 => stream_digest::<Md5>(file),
    }
    .with_context(|| format!("Failed to read file while hashing: {}", path.display()))?;

    Ok(digest)
}

/// Feeds a reader through a digest in fixed-size chunks.
fn stream_digest<D: Digest>(mut reader: impl Read) -> std::io::Result<String> {
    let mut hasher = D::new();
    let mut buffer = vec![0u8; HASH_BUFFER_SIZE];

    loop {
        let bytes_read = reader.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(to_hex(hasher.finalize().as_slice()))
}

/// Formats raw digest bytes as lowercase hex.
fn to_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        let _ = write!(out, "{byte:02x}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_sha1_known_vector() {
        assert_eq!(
            hash_bytes(b"abc", ChecksumType::Sha1),
            "a9993e364706816aba3e25717850c26c9cd0d89d"
        );
    }

    #[test]
    fn test_md5_known_vector() {
        assert_eq!(
            hash_bytes(b"abc", ChecksumType::Md5),
            "900150983cd24fb0d6963f7d28e17f72"
        );
    }

    #[test]
    fn test_hash_determinism_and_sensitivity() {
        let hash1 = hash_bytes(b"Hello, World!", ChecksumType::Sha1);
        let hash2 = hash_bytes(b"Hello, World!", ChecksumType::Sha1);
        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), ChecksumType::Sha1.digest_len());

        let hash3 = hash_bytes(b"Hello, World.", ChecksumType::Sha1);
        assert_ne!(hash1, hash3);
    }

    #[test]
    fn test_hash_file_matches_hash_bytes() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("test.txt");
        let content = b"Test content for hashing";
        std::fs::write(&file_path, content)?;

        for kind in [ChecksumType::Sha1, ChecksumType::Md5] {
            assert_eq!(hash_file(&file_path, kind)?, hash_bytes(content, kind));
        }

        Ok(())
    }

    #[test]
    fn test_hash_empty_file() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("empty");
        std::fs::write(&file_path, b"")?;

        assert_eq!(
            hash_file(&file_path, ChecksumType::Sha1)?,
            "da39a3ee5e6b4b0d3255bfef95601890afd80709"
        );

        Ok(())
    }

    #[test]
    fn test_hash_file_large_content_streams() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("large.bin");
        // Spans several read buffers with an uneven tail
        let content = vec![0xabu8; HASH_BUFFER_SIZE * 3 + 17];
        std::fs::write(&file_path, &content)?;

        assert_eq!(
            hash_file(&file_path, ChecksumType::Sha1)?,
            hash_bytes(&content, ChecksumType::Sha1)
        );

        Ok(())
    }

    #[test]
    fn test_hash_missing_file_fails() {
        let result = hash_file(Path::new("/nonexistent/file"), ChecksumType::Sha1);
        assert!(result.is_err());
    }

    #[test]
    fn test_from_name_falls_back_to_md5() {
        assert_eq!(ChecksumType::from_name("sha1"), ChecksumType::Sha1);
        assert_eq!(ChecksumType::from_name("md5"), ChecksumType::Md5);
        assert_eq!(ChecksumType::from_name("sha256"), ChecksumType::Md5);
        assert_eq!(ChecksumType::from_name(""), ChecksumType::Md5);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(ChecksumType::Sha1.to_string(), "sha1");
        assert_eq!(ChecksumType::Md5.to_string(), "md5");
    }
}
