use crate::utils::{Error, Result};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Expands a file or directory into the files whose normalized extension is in
/// `extensions`. A file named directly is returned as is so the plugin can
/// report why it was skipped.
pub fn find_media_files<P: AsRef<Path>>(
    path: P,
    extensions: &BTreeSet<String>,
) -> Result<Vec<PathBuf>> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(Error::validation(format!(
            "Path does not exist: {}",
            path.display()
        )));
    }

    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files: Vec<PathBuf> = WalkDir::new(path)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|entry| entry.into_path())
        .filter(|p| p.is_file() && has_extension(p, extensions))
        .collect();

    files.sort();
    Ok(files)
}

pub fn has_extension<P: AsRef<Path>>(path: P, extensions: &BTreeSet<String>) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| extensions.contains(&ext.to_lowercase()))
        .unwrap_or(false)
}
