//! Metadata records and document wrappers for content-addressable file storage.
//!
//! `filestorage-core` holds the bookkeeping a storage backend relies on: a
//! [`FileMetadata`](document::FileMetadata) record whose id is claimed exactly
//! once, whose file facts change together, and which copies without sharing
//! state, plus a [`DocWrapper`](document::DocWrapper) pairing it with content.
//! Persisting anything is left to the backend.

pub mod document;
pub mod types;

pub use document::{Content, DocWrapper, Document, FileMetadata, Metadata, MetadataError};
pub use types::{ChecksumAlgorithm, FactsError, FileFacts};
