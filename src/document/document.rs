use std::fmt;
use std::io::Read;

use chrono::{DateTime, Utc};

use super::metadata::{FileMetadata, Metadata};

/// Raw content handed to a storage backend. Read once, by the backend.
pub type Content = Box<dyn Read + Send>;

/// Something that carries metadata, with or without content.
///
/// Both the bare [`FileMetadata`] and [`DocWrapper`] implement this, so a
/// backend can accept either.
pub trait Document {
    type Meta: Metadata;

    /// The live metadata, not a copy.
    fn doc(&self) -> &Self::Meta;

    /// The live metadata, for backends that set id and stored after a write.
    fn doc_mut(&mut self) -> &mut Self::Meta;

    fn has_content(&self) -> bool {
        false
    }

    /// Hand the content stream over. Later calls return `None`.
    fn take_content(&mut self) -> Option<Content> {
        None
    }
}

/// Metadata paired with an optional content stream for one storage operation.
pub struct DocWrapper<M = FileMetadata> {
    meta: M,
    content: Option<Content>,
}

impl<M: Metadata> DocWrapper<M> {
    pub fn new(meta: M, content: Option<Content>) -> Self {
        DocWrapper { meta, content }
    }

    pub fn with_content(meta: M, content: impl Read + Send + 'static) -> Self {
        Self::new(meta, Some(Box::new(content)))
    }

    pub fn metadata_only(meta: M) -> Self {
        Self::new(meta, None)
    }

    pub fn into_parts(self) -> (M, Option<Content>) {
        (self.meta, self.content)
    }
}

impl<M: Metadata> Document for DocWrapper<M> {
    type Meta = M;

    fn doc(&self) -> &M {
        &self.meta
    }

    fn doc_mut(&mut self) -> &mut M {
        &mut self.meta
    }

    fn has_content(&self) -> bool {
        self.content.is_some()
    }

    fn take_content(&mut self) -> Option<Content> {
        let content = self.content.take();
        if content.is_some() {
            tracing::trace!(id = %self.meta.id(), "document content handed off");
        }
        content
    }
}

// A wrapper answers every metadata call from the record it carries, so a
// backend bound on `Metadata` takes either.
impl<M: Metadata> Metadata for DocWrapper<M> {
    fn id(&self) -> &str {
        self.meta.id()
    }

    fn set_id(&mut self, id: &str) -> bool {
        self.meta.set_id(id)
    }

    fn size(&self) -> i64 {
        self.meta.size()
    }

    fn checksum(&self) -> &str {
        self.meta.checksum()
    }

    fn checksum_format(&self) -> &str {
        self.meta.checksum_format()
    }

    fn set_file(&mut self, size: i64, checksum: &str, checksum_format: &str) {
        self.meta.set_file(size, checksum, checksum_format);
    }

    fn stored(&self) -> Option<DateTime<Utc>> {
        self.meta.stored()
    }

    fn set_stored(&mut self, timestamp: Option<DateTime<Utc>>) {
        self.meta.set_stored(timestamp);
    }

    /// Copies the metadata only. The content stream stays with `self`.
    fn copy(&self, id: &str) -> Self {
        DocWrapper::metadata_only(self.meta.copy(id))
    }
}

impl<M: fmt::Debug> fmt::Debug for DocWrapper<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocWrapper")
            .field("meta", &self.meta)
            .field("content", &self.content.as_ref().map(|_| "<stream>"))
            .finish()
    }
}
