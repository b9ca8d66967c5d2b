// fieldstrip/src/utils/file_io.rs
//! Reading and atomically replacing data files.
//!
//! Replacement always goes through a temporary file created in the target's
//! own directory, then renamed over the target, so an interrupted write
//! never leaves a truncated file behind.

use anyhow::{Context, Result};
use log::{debug, info};
use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Suffix appended to the original file name for backups.
pub const BACKUP_SUFFIX: &str = ".bak";

/// Reads a whole file as UTF-8 text.
pub fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path)
        .with_context(|| format!("Failed to read input file: {}", path.display()))?;
    let text = String::from_utf8(bytes)
        .with_context(|| format!("Input file is not valid UTF-8: {}", path.display()))?;
    debug!("Read {} bytes from {}.", text.len(), path.display());
    Ok(text)
}

/// Replaces `path` with `content` via a temporary file and rename.
///
/// Permissions of an existing target are carried over to the new file.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
    tmp.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write temporary file for {}", path.display()))?;
    tmp.as_file()
        .sync_all()
        .with_context(|| format!("Failed to flush temporary file for {}", path.display()))?;

    if let Ok(meta) = fs::metadata(path) {
        fs::set_permissions(tmp.path(), meta.permissions())
            .with_context(|| format!("Failed to copy permissions of {}", path.display()))?;
    }

    tmp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to replace {}", path.display()))?;
    debug!("Atomically wrote {} bytes to {}.", content.len(), path.display());
    Ok(())
}

/// `<path>.bak`, next to the original.
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}

/// Saves `original` as the backup of `path` and returns the backup location.
pub fn write_backup(path: &Path, original: &str) -> Result<PathBuf> {
    let backup = backup_path(path);
    write_atomic(&backup, original)
        .with_context(|| format!("Failed to write backup {}", backup.display()))?;
    info!("Backed up {} to {}.", path.display(), backup.display());
    Ok(backup)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn write_atomic_replaces_content() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("data.js");
        fs::write(&path, "old content that is longer")?;
        write_atomic(&path, "new")?;
        assert_eq!(fs::read_to_string(&path)?, "new");
        let leftovers: Vec<_> = fs::read_dir(dir.path())?.collect();
        assert_eq!(leftovers.len(), 1);
        Ok(())
    }

    #[test]
    fn write_atomic_creates_missing_target() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("fresh.json");
        write_atomic(&path, "{}")?;
        assert_eq!(fs::read_to_string(&path)?, "{}");
        Ok(())
    }

    #[test]
    fn backup_path_appends_suffix() {
        assert_eq!(
            backup_path(Path::new("dir/sample_data_complete.js")),
            PathBuf::from("dir/sample_data_complete.js.bak")
        );
    }

    #[test]
    fn read_text_rejects_invalid_utf8() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("bin.js");
        fs::write(&path, [0xff, 0xfe, 0x00])?;
        let err = read_text(&path).unwrap_err();
        assert!(err.to_string().contains("not valid UTF-8"));
        Ok(())
    }

    #[test]
    fn read_text_reports_missing_file() {
        let err = read_text(Path::new("/no/such/file.js")).unwrap_err();
        assert!(err.to_string().contains("Failed to read input file"));
    }
}
