pub mod checksum;
pub mod identifiers;

pub use checksum::{ChecksumAlgorithm, FactsError, FileFacts};
pub use identifiers::{storage_id_from_path, StorageIdError};
