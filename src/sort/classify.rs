//! Category keys and destination paths

use std::path::{Path, PathBuf};

/// Lowercased extension without the leading dot, or `""` when there is none
///
/// Dotfiles such as `.bashrc` and names with a trailing dot have no extension.
pub fn category_key(path: &Path) -> String {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

/// `output_root/<category>/<file name>`
///
/// The empty category joins to `output_root` itself, so extensionless files
/// land directly in the output root. Returns `None` for paths without a file
/// name (`/`, `..`).
pub fn destination_for(path: &Path, output_root: &Path) -> Option<PathBuf> {
    let file_name = path.file_name()?;
    Some(category_dir(path, output_root).join(file_name))
}

/// Folder that receives files of this path's category
pub fn category_dir(path: &Path, output_root: &Path) -> PathBuf {
    let category = category_key(path);
    if category.is_empty() {
        output_root.to_path_buf()
    } else {
        output_root.join(category)
    }
}
