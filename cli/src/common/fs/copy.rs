//! # hgy Directory Copy Operations
//!
//! File: cli/src/common/fs/copy.rs
//!
//! ## Overview
//!
//! Recursive directory copying, used by `hgy render` to mirror the archive's
//! `.images` tree next to the generated HTML pages.
//!
use crate::core::error::Result;
use std::path::Path;
use tracing::info;

/// Copies the *contents* of `source` into `target`, overwriting existing files.
///
/// `target` is created if it does not exist yet.
pub fn copy_directory_contents(source: &Path, target: &Path) -> Result<()> {
    info!("Starting recursive copy from {:?} to {:?}", source, target);

    super::io::ensure_dir_exists(target)?;

    let mut options = fs_extra::dir::CopyOptions::new();
    options.overwrite = true;
    options.content_only = true;

    fs_extra::dir::copy(source, target, &options).map_err(|e| {
        anyhow::anyhow!(e).context(format!("Failed to copy dir {:?} to {:?}", source, target))
    })?;

    info!("Finished recursive copy from {:?} to {:?}", source, target);
    Ok(())
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_copy_nested_contents() -> Result<()> {
        let source = tempdir()?;
        let target = tempdir()?;
        fs::create_dir_all(source.path().join("pizza"))?;
        fs::write(source.path().join("pizza/top.jpg"), "jpg")?;

        let dest = target.path().join(".images");
        fs::create_dir_all(&dest)?;
        fs::write(dest.join("stale.jpg"), "old")?;
        copy_directory_contents(source.path(), &dest)?;

        assert_eq!(fs::read_to_string(dest.join("pizza/top.jpg"))?, "jpg");
        assert!(dest.join("stale.jpg").exists());
        Ok(())
    }

    #[test]
    fn test_copy_overwrites() -> Result<()> {
        let source = tempdir()?;
        let target = tempdir()?;
        fs::write(source.path().join("a.jpg"), "new")?;
        fs::write(target.path().join("a.jpg"), "old")?;
        copy_directory_contents(source.path(), target.path())?;
        assert_eq!(fs::read_to_string(target.path().join("a.jpg"))?, "new");
        Ok(())
    }
}
