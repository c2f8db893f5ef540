//! Recursive copy of the static assets directory.

use std::fs;
use std::path::Path;

use crate::builder::BuildError;

/// Copy every file under `src` into `dest`, creating directories as needed.
///
/// Existing files at the destination are overwritten. Returns the number of
/// files copied.
pub fn copy_dir_recursive(src: &Path, dest: &Path) -> Result<usize, BuildError> {
    fs::create_dir_all(dest).map_err(|e| BuildError::io(dest, e))?;

    let mut copied = 0;
    for entry in fs::read_dir(src).map_err(|e| BuildError::io(src, e))? {
        let entry = entry.map_err(|e| BuildError::io(src, e))?;
        let from = entry.path();
        let to = dest.join(entry.file_name());

        if from.is_dir() {
            copied += copy_dir_recursive(&from, &to)?;
        } else {
            tracing::debug!(from = %from.display(), to = %to.display(), "Copying static file");
            fs::copy(&from, &to).map_err(|e| BuildError::io(&from, e))?;
            copied += 1;
        }
    }
    Ok(copied)
}
