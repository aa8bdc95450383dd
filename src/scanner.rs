//! Recursive filesystem traversal.
//!
//! A scan buffers every regular file found under a root so that the global
//! file count and byte total are known before any file is hashed; the
//! progress estimate for a two-root run needs both totals up front.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One regular file discovered during a tree scan.
#[derive(Debug, Clone)]
pub struct ScannedFile {
    /// Full path to the file.
    pub path: PathBuf,
    /// Base filename.
    pub name: String,
    /// Size in bytes at scan time.
    pub size: u64,
}

/// Aggregate counters over a set of scanned files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeTotals {
    /// Number of regular files.
    pub files: usize,
    /// Sum of file sizes in bytes.
    pub bytes: u64,
}

/// Recursively collects every regular file under `root`.
///
/// Directories are traversed but not emitted; symlinks are not followed.
/// Traversal order is whatever the filesystem reports and is not part of
/// the contract. A failure to read any directory or file metadata aborts
/// the whole scan.
///
/// # Errors
///
/// Returns an error if a directory cannot be read or a file's metadata
/// cannot be retrieved.
pub fn scan_tree(root: &Path) -> Result<Vec<ScannedFile>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry
            .with_context(|| format!("Failed to traverse directory tree: {}", root.display()))?;

        if !entry.file_type().is_file() {
            continue;
        }

        let metadata = entry
            .metadata()
            .with_context(|| format!("Failed to read metadata: {}", entry.path().display()))?;

        files.push(ScannedFile {
            path: entry.path().to_path_buf(),
            name: entry.file_name().to_string_lossy().into_owned(),
            size: metadata.len(),
        });
    }

    tracing::debug!(root = %root.display(), files = files.len(), "scanned tree");

    Ok(files)
}

/// Sums file count and byte size over scanned files.
#[must_use]
pub fn tree_totals(files: &[ScannedFile]) -> TreeTotals {
    TreeTotals {
        files: files.len(),
        bytes: files.iter().map(|f| f.size).sum(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_scan_collects_nested_files() -> Result<()> {
        let temp = TempDir::new()?;
        fs::write(temp.path().join("a.txt"), b"aa")?;
        let sub = temp.path().join("sub/deeper");
        fs::create_dir_all(&sub)?;
        fs::write(sub.join("b.txt"), b"bbbb")?;

        let mut files = scan_tree(temp.path())?;
        files.sort_by(|a, b| a.name.cmp(&b.name));

        assert_eq!(files.len(), 2);
        assert_eq!(files[0].name, "a.txt");
        assert_eq!(files[0].size, 2);
        assert_eq!(files[1].name, "b.txt");
        assert_eq!(files[1].size, 4);
        assert!(files[1].path.starts_with(temp.path()));

        Ok(())
    }

    #[test]
    fn test_scan_empty_directory() -> Result<()> {
        let temp = TempDir::new()?;
        let files = scan_tree(temp.path())?;
        assert!(files.is_empty());
        assert_eq!(tree_totals(&files), TreeTotals::default());
        Ok(())
    }

    #[test]
    fn test_directories_are_not_emitted() -> Result<()> {
        let temp = TempDir::new()?;
        fs::create_dir_all(temp.path().join("only/dirs/here"))?;

        let files = scan_tree(temp.path())?;
        assert!(files.is_empty());

        Ok(())
    }

    #[test]
    fn test_tree_totals() -> Result<()> {
        let temp = TempDir::new()?;
        fs::write(temp.path().join("one"), vec![0u8; 10])?;
        fs::write(temp.path().join("two"), vec![0u8; 32])?;

        let totals = tree_totals(&scan_tree(temp.path())?);
        assert_eq!(totals.files, 2);
        assert_eq!(totals.bytes, 42);

        Ok(())
    }

    #[test]
    fn test_scan_missing_root_fails() {
        assert!(scan_tree(Path::new("/nonexistent/root/path")).is_err());
    }
}
