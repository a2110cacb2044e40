//! Atomic file replacement.
//!
//! 1. Write content to `.{filename}.tmp` in the target's directory
//! 2. Sync the temporary file to disk
//! 3. Rename it over the target
//!
//! The rename is atomic when source and target share a filesystem, which a
//! sibling file always does. On a crash, the temporary file may remain.

use crate::error::{CalibrateError, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Atomically replace `path` with `content`.
///
/// # Returns
///
/// * `Ok(())` - The target now holds exactly `content`
/// * `Err(CalibrateError::Io)` - Writing, syncing, or renaming failed; the
///   target is untouched
pub fn atomic_write_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();

    let temp_path = generate_temp_path(path)?;
    write_and_sync(&temp_path, content.as_bytes())?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        CalibrateError::io(path, e)
    })?;

    Ok(())
}

/// Generate a temporary file path in the same directory as the target.
fn generate_temp_path(target: &Path) -> Result<PathBuf> {
    let parent = target.parent().unwrap_or(Path::new("."));
    let filename = target.file_name().and_then(|n| n.to_str()).ok_or_else(|| {
        CalibrateError::io(
            target,
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "invalid file path"),
        )
    })?;

    Ok(parent.join(format!(".{}.tmp", filename)))
}

/// Write content to a file and sync to disk.
fn write_and_sync(path: &Path, content: &[u8]) -> Result<()> {
    let mut file = File::create(path).map_err(|e| CalibrateError::io(path, e))?;

    let written = file.write_all(content).and_then(|()| file.sync_all());
    if let Err(e) = written {
        let _ = fs::remove_file(path);
        return Err(CalibrateError::io(path, e));
    }

    Ok(())
}
