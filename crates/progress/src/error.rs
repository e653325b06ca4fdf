//! Error type for progress operations.

use wordwise_core::SettingError;
use wordwise_storage::StorageError;

/// Error type for progress operations.
pub type Result<T> = std::result::Result<T, ProgressError>;

/// Errors surfaced by the tracker and the service around it.
#[derive(Debug, thiserror::Error)]
pub enum ProgressError {
    /// Imported text is not a JSON object
    #[error("could not parse document: {0}")]
    Parse(#[from] serde_json::Error),

    /// Storage collaborator failed
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Settings update rejected
    #[error(transparent)]
    InvalidSetting(#[from] SettingError),
}
