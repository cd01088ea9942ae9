use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::utils::{IoContext as _, Result};

/// Version-control marker that survives emptying and does not count as content.
pub const VCS_MARKER: &str = ".git";

/// Whether `path` has no entries besides a lone [`VCS_MARKER`].
///
/// Callers must check that `path` exists first; a missing path is an error.
pub fn is_directory_empty(path: impl AsRef<Path>) -> Result<bool> {
    let path = path.as_ref();
    let mut entries = fs::read_dir(path).on("read directory", path)?;
    let Some(first) = entries.next() else {
        return Ok(true);
    };
    let first = first.on("read directory", path)?;
    Ok(first.file_name() == VCS_MARKER && entries.next().is_none())
}

/// Removes everything in `path` except [`VCS_MARKER`]. A missing `path` is a
/// no-op, as are entries that disappear while we are deleting.
pub fn empty_directory(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let entries = match fs::read_dir(path) {
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(()),
        entries => entries.on("read directory", path)?,
    };
    for entry in entries {
        let entry = entry.on("read directory", path)?;
        if entry.file_name() == VCS_MARKER {
            continue;
        }
        remove_entry(&entry.path())?;
    }
    debug!(path = %path.display(), "emptied directory");
    Ok(())
}

/// Deletes a file, link or directory tree. Links are removed, never followed.
/// A path that is already gone counts as removed.
pub fn remove_entry(path: &Path) -> Result<()> {
    let removed = match fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => fs::remove_dir_all(path),
        Ok(_) => fs::remove_file(path),
        Err(err) => Err(err),
    };
    match removed {
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
        removed => {
            removed.on("remove", path)?;
            trace!(path = %path.display(), "removed");
            Ok(())
        }
    }
}

/// Copies a file or a whole directory tree from `src` to `dst`, overwriting
/// files that already exist. Symbolic links are followed, so the link target's
/// content is copied; link cycles surface as an error.
///
/// Returns the number of files written.
pub fn copy_entry(src: impl AsRef<Path>, dst: impl AsRef<Path>) -> Result<u32> {
    let (src, dst) = (src.as_ref(), dst.as_ref());
    let mut files = 0;
    for entry in WalkDir::new(src).follow_links(true).sort_by_file_name() {
        let entry = entry?;
        let relative = entry.path().strip_prefix(src).unwrap_or(entry.path());
        let to = if relative.as_os_str().is_empty() {
            dst.to_path_buf()
        } else {
            dst.join(relative)
        };
        if entry.file_type().is_dir() {
            fs::create_dir_all(&to).on("create directory", &to)?;
        } else {
            if let Some(parent) = to.parent() {
                fs::create_dir_all(parent).on("create directory", parent)?;
            }
            fs::copy(entry.path(), &to).on("copy file", entry.path())?;
            files += 1;
        }
    }
    trace!(src = %src.display(), dst = %dst.display(), files, "copied");
    Ok(files)
}
