pub mod metadata;
pub mod document;

pub use metadata::{FileMetadata, Metadata, MetadataError};
pub use document::{Content, DocWrapper, Document};
