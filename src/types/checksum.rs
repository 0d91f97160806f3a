use std::fmt;
use std::io::Read;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256, Sha512};
use thiserror::Error;

use crate::document::Metadata;

#[derive(Debug, Error)]
pub enum FactsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unknown checksum format: {0:?}")]
    UnknownFormat(String),
    #[error("Negative file size: {0}")]
    NegativeSize(i64),
    #[error("Checksum is empty")]
    MissingChecksum,
    #[error("Size mismatch: expected {expected}, content has {actual}")]
    SizeMismatch { expected: i64, actual: i64 },
    #[error("Checksum mismatch: expected {expected}, content hashes to {actual}")]
    ChecksumMismatch { expected: String, actual: String },
}

/// Digest algorithms a checksum can be computed with.
///
/// Serialized by format name, the same string stored in
/// [`Metadata::checksum_format`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ChecksumAlgorithm {
    #[default]
    #[serde(rename = "SHA-256")]
    Sha256,
    #[serde(rename = "SHA-512")]
    Sha512,
}

impl ChecksumAlgorithm {
    pub fn format_name(&self) -> &'static str {
        match self {
            ChecksumAlgorithm::Sha256 => "SHA-256",
            ChecksumAlgorithm::Sha512 => "SHA-512",
        }
    }

    /// Lowercase hex digest of `content`.
    pub fn digest(&self, content: &[u8]) -> String {
        match self {
            ChecksumAlgorithm::Sha256 => hex::encode(Sha256::digest(content)),
            ChecksumAlgorithm::Sha512 => hex::encode(Sha512::digest(content)),
        }
    }

    fn digest_reader(&self, reader: impl Read) -> Result<(i64, String), FactsError> {
        match self {
            ChecksumAlgorithm::Sha256 => hash_reader(Sha256::new(), reader),
            ChecksumAlgorithm::Sha512 => hash_reader(Sha512::new(), reader),
        }
    }
}

impl fmt::Display for ChecksumAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.format_name())
    }
}

impl FromStr for ChecksumAlgorithm {
    type Err = FactsError;

    /// Accepts "SHA-256", "sha256" and similar spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('-', "").to_ascii_lowercase();
        match normalized.as_str() {
            "sha256" => Ok(ChecksumAlgorithm::Sha256),
            "sha512" => Ok(ChecksumAlgorithm::Sha512),
            _ => Err(FactsError::UnknownFormat(s.to_string())),
        }
    }
}

fn hash_reader<D: Digest>(
    mut hasher: D,
    mut reader: impl Read,
) -> Result<(i64, String), FactsError> {
    let mut buf = [0u8; 8192];
    let mut size: i64 = 0;
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        hasher.update(&buf[..n]);
        size += n as i64;
    }
    Ok((size, hex::encode(hasher.finalize())))
}

/// Size, checksum and checksum format, moved as one unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFacts {
    pub size: i64,
    pub checksum: String,
    pub checksum_format: String,
}

impl FileFacts {
    pub fn from_content(algorithm: ChecksumAlgorithm, content: &[u8]) -> Self {
        FileFacts {
            size: content.len() as i64,
            checksum: algorithm.digest(content),
            checksum_format: algorithm.format_name().to_string(),
        }
    }

    /// Stream `reader` to the end, hashing as it goes.
    pub fn from_reader(
        algorithm: ChecksumAlgorithm,
        reader: impl Read,
    ) -> Result<Self, FactsError> {
        let (size, checksum) = algorithm.digest_reader(reader)?;
        Ok(FileFacts {
            size,
            checksum,
            checksum_format: algorithm.format_name().to_string(),
        })
    }

    pub fn of(meta: &impl Metadata) -> Self {
        FileFacts {
            size: meta.size(),
            checksum: meta.checksum().to_string(),
            checksum_format: meta.checksum_format().to_string(),
        }
    }

    pub fn apply_to(&self, meta: &mut impl Metadata) {
        meta.set_file(self.size, &self.checksum, &self.checksum_format);
    }

    /// Structural checks a backend may run before persisting.
    ///
    /// Only formats this crate can compute are accepted (SHA-256, SHA-512).
    /// Facts recorded with any other format, "SHA-1" included, fail with
    /// [`FactsError::UnknownFormat`] even though [`Metadata::set_file`]
    /// stores them as given.
    pub fn check(&self) -> Result<ChecksumAlgorithm, FactsError> {
        if self.size < 0 {
            return Err(FactsError::NegativeSize(self.size));
        }
        if self.checksum.is_empty() {
            return Err(FactsError::MissingChecksum);
        }
        self.checksum_format.parse()
    }

    /// Recompute the facts from `content` and compare.
    pub fn verify(&self, content: &[u8]) -> Result<(), FactsError> {
        let algorithm = self.check()?;

        let actual_size = content.len() as i64;
        if actual_size != self.size {
            return Err(FactsError::SizeMismatch {
                expected: self.size,
                actual: actual_size,
            });
        }

        let actual = algorithm.digest(content);
        if !actual.eq_ignore_ascii_case(&self.checksum) {
            return Err(FactsError::ChecksumMismatch {
                expected: self.checksum.clone(),
                actual,
            });
        }
        Ok(())
    }
}
