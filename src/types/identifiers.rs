use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StorageIdError {
    #[error("Source path is outside the storage root")]
    OutsideRoot,
    #[error("Path involves invalid UTF-8")]
    InvalidUtf8,
    #[error("Path normalizes to an empty id")]
    Empty,
}

/// Build a storage id from a file path relative to `root`.
///
/// Separators become `/`; case is kept, so `Report.PDF` and `report.pdf`
/// stay distinct ids.
///
/// The result is what a backend passes to [`Metadata::copy`] when it
/// registers a record under its normalized path.
///
/// [`Metadata::copy`]: crate::document::Metadata::copy
pub fn storage_id_from_path(root: &Path, source: &Path) -> Result<String, StorageIdError> {
    let rel = source
        .strip_prefix(root)
        .map_err(|_| StorageIdError::OutsideRoot)?;

    let normalized = normalize_path(rel)?;
    if normalized.is_empty() {
        return Err(StorageIdError::Empty);
    }

    Ok(normalized)
}

fn normalize_path(path: &Path) -> Result<String, StorageIdError> {
    let s = path.to_str().ok_or(StorageIdError::InvalidUtf8)?;

    Ok(s.replace('\\', "/"))
}
