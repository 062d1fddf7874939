//! Filesystem utilities.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Recursively copy a directory.
pub fn copy_dir_all(src: &Path, dst: &Path) -> Result<()> {
    fs::create_dir_all(dst)
        .with_context(|| format!("failed to create directory: {}", dst.display()))?;

    for entry in fs::read_dir(src)
        .with_context(|| format!("failed to read directory: {}", src.display()))?
    {
        let entry = entry?;
        let ty = entry.file_type()?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if ty.is_dir() {
            copy_dir_all(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path).with_context(|| {
                format!(
                    "failed to copy {} to {}",
                    src_path.display(),
                    dst_path.display()
                )
            })?;
        }
    }
    Ok(())
}

/// Copy a file or a directory tree, overwriting what is already there.
pub fn copy_path(src: &Path, dst: &Path) -> Result<()> {
    let meta = fs::metadata(src)
        .with_context(|| format!("failed to stat {}", src.display()))?;

    if meta.is_dir() {
        copy_dir_all(src, dst)
    } else {
        if let Some(parent) = dst.parent() {
            ensure_dir(parent)?;
        }
        fs::copy(src, dst).with_context(|| {
            format!("failed to copy {} to {}", src.display(), dst.display())
        })?;
        Ok(())
    }
}

/// Remove a file or directory tree, if it exists.
///
/// Returns whether anything was removed.
pub fn remove_path_if_exists(path: &Path) -> Result<bool> {
    let Ok(meta) = fs::symlink_metadata(path) else {
        return Ok(false);
    };

    if meta.is_dir() {
        fs::remove_dir_all(path)
            .with_context(|| format!("failed to remove directory: {}", path.display()))?;
    } else {
        fs::remove_file(path)
            .with_context(|| format!("failed to remove file: {}", path.display()))?;
    }
    Ok(true)
}

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Write a string to a file, creating parent directories if needed.
pub fn write_string(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    fs::write(path, contents)
        .with_context(|| format!("failed to write file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_copy_dir_all() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        let dst = tmp.path().join("dst");

        fs::create_dir_all(src.join("nested")).unwrap();
        fs::write(src.join("file.txt"), "content").unwrap();
        fs::write(src.join("nested/deep.txt"), "deep").unwrap();

        copy_dir_all(&src, &dst).unwrap();

        assert_eq!(fs::read_to_string(dst.join("file.txt")).unwrap(), "content");
        assert_eq!(fs::read_to_string(dst.join("nested/deep.txt")).unwrap(), "deep");
    }

    #[test]
    fn test_copy_path_file_and_missing() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("package.info");
        fs::write(&src, "name=demo").unwrap();

        let dst = tmp.path().join("demo.red/package.info");
        copy_path(&src, &dst).unwrap();
        assert_eq!(fs::read_to_string(&dst).unwrap(), "name=demo");

        assert!(copy_path(&tmp.path().join("missing"), &dst).is_err());
    }

    #[test]
    fn test_remove_path_if_exists() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("demo.elf");
        let dir = tmp.path().join("demo.red");
        fs::write(&file, "").unwrap();
        fs::create_dir_all(dir.join("resources")).unwrap();

        assert!(remove_path_if_exists(&file).unwrap());
        assert!(remove_path_if_exists(&dir).unwrap());
        assert!(!remove_path_if_exists(&file).unwrap());
        assert!(!dir.exists());
    }
}
