use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::Result;

/// Name of the nested directory holding offensive fortune files.
pub const OFFENSIVE_DIR: &str = "off";

/// One source fortune file discovered under the fortunes directory.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    /// Category display name: the file's base name, extension included.
    pub name: String,
    pub offensive: bool,
}

/// Collects the regular files directly under `root` (non-offensive) and
/// directly under `root/off` (offensive). Deeper subdirectories are not
/// recursed into.
///
/// Files come back in directory-listing order, which the OS does not
/// guarantee. That order only affects the ids the database assigns, so
/// readers must not depend on it.
pub fn collect_sources(root: &Path) -> Result<Vec<SourceFile>> {
    let mut sources = list_files(root, false)?;
    sources.extend(list_files(&root.join(OFFENSIVE_DIR), true)?);
    Ok(sources)
}

fn list_files(dir: &Path, offensive: bool) -> Result<Vec<SourceFile>> {
    let mut out = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        if entry.file_type().is_file() {
            out.push(SourceFile {
                path: entry.path().to_path_buf(),
                name: entry.file_name().to_string_lossy().into_owned(),
                offensive,
            });
        }
    }
    Ok(out)
}
