//! Content discovery by filesystem walking.
//!
//! The scanner only identifies files and their mirrored output locations; no
//! content is read at this stage.

use std::fs;
use std::path::{Path, PathBuf};

use crate::builder::BuildError;

/// Reference to a content file and the page it produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRef {
    /// Path to the Markdown source file.
    pub source: PathBuf,
    /// Path of the generated `.html` page.
    pub dest: PathBuf,
}

/// Discovers content files by walking the content directory.
///
/// Every non-hidden file becomes a page. Its destination mirrors the file's
/// position under the content directory, with the extension replaced by
/// `.html` (`content/blog/post.md` → `public/blog/post.html`).
pub struct Scanner {
    content_dir: PathBuf,
    output_dir: PathBuf,
}

impl Scanner {
    pub fn new(content_dir: PathBuf, output_dir: PathBuf) -> Self {
        Self {
            content_dir,
            output_dir,
        }
    }

    /// Scan the content directory, returning pages sorted by source path.
    ///
    /// # Errors
    ///
    /// Returns `BuildError::Io` if the content directory, any directory below
    /// it, or any entry in them cannot be read. No page is skipped silently.
    pub fn scan(&self) -> Result<Vec<PageRef>, BuildError> {
        let mut refs = Vec::new();
        self.scan_directory(&self.content_dir, Path::new(""), &mut refs)?;
        refs.sort_by(|a, b| a.source.cmp(&b.source));
        Ok(refs)
    }

    fn scan_directory(
        &self,
        dir_path: &Path,
        rel_prefix: &Path,
        refs: &mut Vec<PageRef>,
    ) -> Result<(), BuildError> {
        let entries = fs::read_dir(dir_path).map_err(|e| BuildError::io(dir_path, e))?;

        for entry in entries {
            let entry = entry.map_err(|e| BuildError::io(dir_path, e))?;
            let name = entry.file_name();
            // Skip hidden files/dirs
            if name.to_string_lossy().starts_with('.') {
                continue;
            }

            let path = entry.path();
            let rel_path = rel_prefix.join(&name);
            let metadata = fs::metadata(&path).map_err(|e| BuildError::io(&path, e))?;
            if metadata.is_dir() {
                self.scan_directory(&path, &rel_path, refs)?;
            } else {
                refs.push(PageRef {
                    dest: page_dest(&self.output_dir, &rel_path),
                    source: path,
                });
            }
        }
        Ok(())
    }
}

/// Output path of a content file given its path relative to the content root.
pub(crate) fn page_dest(output_dir: &Path, rel_path: &Path) -> PathBuf {
    output_dir.join(rel_path).with_extension("html")
}
