//! Discovery of candidate files in dataset directories.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::AppError;
use crate::models::CandidateFile;

/// File extensions uploaded when none are configured.
pub const DEFAULT_EXTENSIONS: &[&str] = &[
    ".docx", ".xlsx", ".pptx", ".doc", ".xls", ".ppt", ".odt", ".ods", ".odp", ".pdf", ".csv",
    ".zip",
];

/// Case-insensitive suffix match on file names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionFilter {
    suffixes: Vec<String>,
}

impl ExtensionFilter {
    pub fn new<I, S>(suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            suffixes: suffixes
                .into_iter()
                .map(|s| s.as_ref().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    /// True if the lowercased `file_name` ends with any configured suffix.
    ///
    /// ```
    /// use ckan_import_core::ExtensionFilter;
    ///
    /// let filter = ExtensionFilter::new([".pdf", ".csv"]);
    /// assert!(filter.matches("Report.PDF"));
    /// assert!(!filter.matches("notes.txt"));
    /// ```
    pub fn matches(&self, file_name: &str) -> bool {
        let lower = file_name.to_lowercase();
        self.suffixes.iter().any(|s| lower.ends_with(s.as_str()))
    }

    pub fn suffixes(&self) -> &[String] {
        &self.suffixes
    }
}

impl Default for ExtensionFilter {
    fn default() -> Self {
        Self::new(DEFAULT_EXTENSIONS)
    }
}

/// Checks that every path exists and is a directory.
///
/// Runs before any remote call so a typo aborts the whole import up front.
pub fn validate_directories(dirs: &[PathBuf]) -> Result<(), AppError> {
    match dirs.iter().find(|dir| !dir.is_dir()) {
        Some(dir) => Err(AppError::InvalidDirectory(dir.clone())),
        None => Ok(()),
    }
}

/// Recursively lists files under `root` that pass `filter`, sorted by path.
///
/// Symbolic links are not followed as directories; a link to a regular file
/// is listed like the file itself. Entries below `root` that cannot be read
/// (broken links, unreadable subdirectories) are logged and skipped. Only a
/// failure to read `root` itself is an error.
pub fn scan_directory(
    root: &Path,
    filter: &ExtensionFilter,
) -> Result<Vec<CandidateFile>, AppError> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(source) if source.depth() == 0 => {
                return Err(AppError::Generic(format!(
                    "failed while traversing {}: {}",
                    root.display(),
                    source
                )));
            }
            Err(source) => {
                tracing::warn!(
                    "Skipping unreadable entry under {}: {}",
                    root.display(),
                    source
                );
                continue;
            }
        };

        let is_file = entry.file_type().is_file()
            || (entry.path_is_symlink() && entry.path().is_file());
        if !is_file {
            continue;
        }

        let Some(file) = CandidateFile::from_path(entry.path()) else {
            tracing::warn!("Skipping file with non UTF-8 name: {}", entry.path().display());
            continue;
        };

        if filter.matches(&file.file_name) {
            files.push(file);
        }
    }

    files.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(files)
}
