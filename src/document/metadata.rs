use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::document::Document;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MetadataError {
    #[error("Metadata id already set to {current:?}, refusing {candidate:?}")]
    IdConflict { current: String, candidate: String },
}

/// The descriptive facts a storage backend relies on.
///
/// Anything implementing this can stand in for [`FileMetadata`]. Every
/// metadata value is also a [`Document`], so `doc()` is always available.
/// None of the operations fail; validation belongs to whoever persists the
/// record.
pub trait Metadata: Document {
    /// Current identifier, `""` while unassigned.
    fn id(&self) -> &str;

    /// Claim the identifier.
    ///
    /// Returns `false` when this call assigned the id and `true` when an id
    /// was already present. An existing id is never replaced, even when the
    /// candidate differs.
    fn set_id(&mut self, id: &str) -> bool;

    fn size(&self) -> i64;

    fn checksum(&self) -> &str;

    fn checksum_format(&self) -> &str;

    /// Overwrite size, checksum and checksum format together.
    fn set_file(&mut self, size: i64, checksum: &str, checksum_format: &str);

    /// When the backend confirmed storage, if it has.
    fn stored(&self) -> Option<DateTime<Utc>>;

    /// Record the stored timestamp. `None` records the current UTC time.
    fn set_stored(&mut self, timestamp: Option<DateTime<Utc>>);

    /// An independent record with every field copied and the id replaced.
    fn copy(&self, id: &str) -> Self
    where
        Self: Sized;
}

/// Metadata for one stored file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FileMetadata {
    id: String,
    size: i64,
    checksum: String,
    checksum_format: String,
    stored: Option<DateTime<Utc>>,
}

impl FileMetadata {
    pub fn new() -> Self {
        FileMetadata {
            id: String::new(),
            size: 0,
            checksum: String::new(),
            checksum_format: String::new(),
            stored: None,
        }
    }

    /// Strict variant of [`Metadata::set_id`] for callers that treat a
    /// different existing id as a conflict. Re-asserting the current id is Ok.
    pub fn claim_id(&mut self, id: &str) -> Result<(), MetadataError> {
        if self.set_id(id) && self.id != id {
            return Err(MetadataError::IdConflict {
                current: self.id.clone(),
                candidate: id.to_string(),
            });
        }
        Ok(())
    }
}

impl Metadata for FileMetadata {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: &str) -> bool {
        if !self.id.is_empty() {
            if self.id != id {
                tracing::debug!(
                    current = %self.id,
                    candidate = %id,
                    "ignoring conflicting metadata id"
                );
            }
            return true;
        }
        tracing::debug!(id = %id, "metadata id claimed");
        self.id = id.to_string();
        false
    }

    fn size(&self) -> i64 {
        self.size
    }

    fn checksum(&self) -> &str {
        &self.checksum
    }

    fn checksum_format(&self) -> &str {
        &self.checksum_format
    }

    fn set_file(&mut self, size: i64, checksum: &str, checksum_format: &str) {
        self.size = size;
        self.checksum = checksum.to_string();
        self.checksum_format = checksum_format.to_string();
    }

    fn stored(&self) -> Option<DateTime<Utc>> {
        self.stored
    }

    fn set_stored(&mut self, timestamp: Option<DateTime<Utc>>) {
        let timestamp = timestamp.unwrap_or_else(Utc::now);
        tracing::trace!(id = %self.id, stored = %timestamp, "metadata stored timestamp set");
        self.stored = Some(timestamp);
    }

    fn copy(&self, id: &str) -> Self {
        let mut copied = self.clone();
        copied.id = id.to_string();
        copied
    }
}

// A bare record is a document without content.
impl Document for FileMetadata {
    type Meta = FileMetadata;

    fn doc(&self) -> &FileMetadata {
        self
    }

    fn doc_mut(&mut self) -> &mut FileMetadata {
        self
    }
}
