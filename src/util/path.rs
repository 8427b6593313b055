use std::io;
use std::path::{Path, PathBuf};

/// Relative path from the directory `from` to `to`.
///
/// Both paths must exist; symlinks are resolved first.
pub fn relative_path(from: &Path, to: &Path) -> io::Result<PathBuf> {
    let from = from.canonicalize()?;
    let to = to.canonicalize()?;
    pathdiff::diff_paths(&to, &from).ok_or_else(|| {
        io::Error::other(format!(
            "no relative path from {} to {}",
            from.display(),
            to.display()
        ))
    })
}
