//! # hgy Filesystem I/O Operations
//!
//! File: cli/src/common/fs/io.rs
//!
//! ## Overview
//!
//! Thin wrappers around `std::fs` that attach the path to every error and log
//! what they did. Used by the record and index code and by the commands that
//! move files in and out of the archive.
//!
//! - **`ensure_dir_exists`**: `mkdir -p`, failing if the path is a file.
//! - **`read_file_to_string`** / **`write_string_to_file`**: whole-file I/O;
//!   writing creates missing parent directories.
//! - **`copy_file`**: copies one file, creating the destination's parents.
//! - **`guard_not_exists`**: refuses to go on when a destination exists, unless
//!   the caller passed `--force`.
//! - **`rename_path`** / **`remove_path`**: move or delete records and image
//!   directories.
//!
use crate::core::error::{HgyError, Result};
use anyhow::Context;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Ensures that a directory exists at the specified path.
///
/// # Errors
///
/// Returns an `Err` if the path exists but is not a directory, or if creating
/// it fails.
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {:?}", path))?;
        info!("Created directory: {:?}", path);
    } else if !path.is_dir() {
        anyhow::bail!(HgyError::FileSystem(format!(
            "Path exists but is not a directory: {:?}",
            path
        )));
    } else {
        debug!("Directory already exists: {:?}", path);
    }
    Ok(())
}

/// Reads the entire content of a file into a string.
pub fn read_file_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file {:?}", path))
}

/// Writes string content to a file, overwriting it and creating missing parents.
pub fn write_string_to_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir_exists(parent)?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write to file {:?}", path))?;
    debug!("Wrote content to file: {:?}", path);
    Ok(())
}

/// Copies the file at `source` to `dest`, creating the destination's parents.
pub fn copy_file(source: &Path, dest: &Path) -> Result<()> {
    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir_exists(parent)?;
    }
    fs::copy(source, dest)
        .with_context(|| format!("Failed to copy {:?} to {:?}", source, dest))?;
    info!("Copied {:?} to {:?}", source, dest);
    Ok(())
}

/// Fails with `HgyError::DestinationExists` if something already exists at `path`.
pub fn guard_not_exists(path: &Path) -> Result<()> {
    if path.exists() {
        return Err(HgyError::DestinationExists {
            path: path.display().to_string(),
        }
        .into());
    }
    Ok(())
}

/// Moves a file or directory, creating the destination's parents.
pub fn rename_path(from: &Path, to: &Path) -> Result<()> {
    if let Some(parent) = to.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir_exists(parent)?;
    }
    fs::rename(from, to).with_context(|| format!("Failed to move {:?} to {:?}", from, to))?;
    info!("Moved {:?} to {:?}", from, to);
    Ok(())
}

/// Removes a file or a whole directory tree. Returns `false` if nothing was there.
pub fn remove_path(path: &Path) -> Result<bool> {
    let Ok(metadata) = fs::symlink_metadata(path) else {
        debug!("Nothing to remove at {:?}", path);
        return Ok(false);
    };
    if metadata.is_dir() {
        fs::remove_dir_all(path)
            .with_context(|| format!("Failed to remove directory {:?}", path))?;
    } else {
        fs::remove_file(path).with_context(|| format!("Failed to remove file {:?}", path))?;
    }
    info!("Removed {:?}", path);
    Ok(true)
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_ensure_dir_exists_creates_new() -> Result<()> {
        let base_dir = tempdir()?;
        let new_dir = base_dir.path().join("new/subdir");
        ensure_dir_exists(&new_dir)?;
        assert!(new_dir.is_dir());
        // Second call is a no-op.
        ensure_dir_exists(&new_dir)?;
        Ok(())
    }

    #[test]
    fn test_ensure_dir_exists_path_is_file() -> Result<()> {
        let base_dir = tempdir()?;
        let file_path = base_dir.path().join("a_file.txt");
        fs::write(&file_path, "hello")?;
        let result = ensure_dir_exists(&file_path);
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Path exists but is not a directory"));
        Ok(())
    }

    #[test]
    fn test_write_creates_parents_and_reads_back() -> Result<()> {
        let base_dir = tempdir()?;
        let file_path = base_dir.path().join("soups/tomato");
        write_string_to_file(&file_path, "name: Tomato soup\n")?;
        assert_eq!(read_file_to_string(&file_path)?, "name: Tomato soup\n");
        Ok(())
    }

    #[test]
    fn test_copy_file() -> Result<()> {
        let base_dir = tempdir()?;
        let source = base_dir.path().join("photo.jpg");
        fs::write(&source, [0xff, 0xd8, 0xff])?;
        let dest = base_dir.path().join(".images/pizza/photo.jpg");
        copy_file(&source, &dest)?;
        assert_eq!(fs::read(&dest)?, vec![0xff, 0xd8, 0xff]);
        Ok(())
    }

    #[test]
    fn test_guard_not_exists() -> Result<()> {
        let base_dir = tempdir()?;
        let path = base_dir.path().join("pizza");
        guard_not_exists(&path)?;
        fs::write(&path, "")?;
        let err = guard_not_exists(&path).unwrap_err();
        assert!(err.to_string().contains("Use --force"));
        Ok(())
    }

    #[test]
    fn test_rename_and_remove() -> Result<()> {
        let base_dir = tempdir()?;
        let images = base_dir.path().join(".images/pizza");
        write_string_to_file(&images.join("top.jpg"), "jpg")?;

        let moved = base_dir.path().join(".images/italian/pizza");
        rename_path(&images, &moved)?;
        assert!(!images.exists());
        assert!(moved.join("top.jpg").is_file());

        assert!(remove_path(&moved.join("top.jpg"))?);
        assert!(remove_path(&moved)?);
        assert!(!moved.exists());
        assert!(!remove_path(&moved)?);
        Ok(())
    }
}
