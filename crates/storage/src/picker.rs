//! File picker seam for export and import.
//!
//! A desktop shell would open a native dialog here. `None` means the user
//! cancelled, which callers treat as a no-op rather than an error.

use std::path::PathBuf;

/// Chooses files for export and import.
pub trait FilePicker {
    /// Choose a file to import from.
    fn pick_file_for_import(&self) -> Option<PathBuf>;

    /// Choose where to export, starting from a suggested file name.
    fn pick_file_for_export(&self, suggested_name: &str) -> Option<PathBuf>;
}

/// Non-interactive picker that answers with a path given up front.
///
/// For export without a path, the suggested name inside `fallback_dir` is used.
#[derive(Debug, Clone)]
pub struct PathPicker {
    path: Option<PathBuf>,
    fallback_dir: PathBuf,
}

impl PathPicker {
    /// Picker answering with `path`, falling back to the current directory.
    pub fn new(path: Option<PathBuf>) -> Self {
        Self {
            path,
            fallback_dir: PathBuf::from("."),
        }
    }

    /// Use a different directory for suggested export names.
    pub fn with_fallback_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.fallback_dir = dir.into();
        self
    }
}

impl FilePicker for PathPicker {
    fn pick_file_for_import(&self) -> Option<PathBuf> {
        self.path.clone()
    }

    fn pick_file_for_export(&self, suggested_name: &str) -> Option<PathBuf> {
        Some(
            self.path
                .clone()
                .unwrap_or_else(|| self.fallback_dir.join(suggested_name)),
        )
    }
}
