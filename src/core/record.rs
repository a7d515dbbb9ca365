//! core::record
//!
//! Self-describing JSON state records.
//!
//! # Schema Design
//!
//! Every piece of persisted state is:
//! - Self-describing with `kind` and `schema_version`
//! - Strictly parsed (unknown fields rejected)
//! - Validated after parsing, before any caller sees it
//!
//! The envelope is checked before the full parse so a record of the wrong
//! kind or a future schema version fails with a precise message instead of
//! a field-level parse error.
//!
//! # Example
//!
//! A synced-marker record on disk:
//!
//! ```json
//! {
//!   "kind": "vellum.synced-marker",
//!   "schema_version": 1,
//!   "revision": 3
//! }
//! ```

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::core::error::OpError;
use crate::core::fsutil;

/// Errors from record parsing and validation.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("failed to parse record: {0}")]
    ParseError(String),

    #[error("invalid kind '{found}', expected '{expected}'")]
    InvalidKind { found: String, expected: String },

    #[error("unsupported schema version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("invalid record value: {0}")]
    InvalidValue(String),
}

/// A persisted state record with a self-describing envelope.
///
/// Implementors carry `kind` and `schema_version` as real serialized
/// fields; [`parse`] checks them against the type's constants and then
/// runs the record's own body validation.
pub trait Record: Serialize + DeserializeOwned {
    /// The kind identifier this record type writes and accepts.
    const KIND: &'static str;

    /// The schema version this build reads and writes.
    const VERSION: u32;

    /// The envelope fields as stored in this instance.
    fn envelope(&self) -> (&str, u32);

    /// Validate the record body (envelope already checked).
    fn validate_body(&self) -> Result<(), RecordError>;
}

/// Envelope for version dispatch before full parsing.
#[derive(Debug, serde::Deserialize)]
struct Envelope {
    kind: String,
    schema_version: u32,
}

/// Parse a record from JSON with envelope dispatch and validation.
///
/// # Errors
///
/// Returns an error if the JSON is malformed, the `kind` does not match,
/// the `schema_version` is unsupported, or body validation fails.
pub fn parse<T: Record>(json: &str) -> Result<T, RecordError> {
    // First, extract envelope to check kind and version
    let envelope: Envelope =
        serde_json::from_str(json).map_err(|e| RecordError::ParseError(e.to_string()))?;

    if envelope.kind != T::KIND {
        return Err(RecordError::InvalidKind {
            found: envelope.kind,
            expected: T::KIND.to_string(),
        });
    }

    match envelope.schema_version {
        v if v == T::VERSION => {
            let record: T =
                serde_json::from_str(json).map_err(|e| RecordError::ParseError(e.to_string()))?;
            record.validate_body()?;
            Ok(record)
        }
        v => Err(RecordError::UnsupportedVersion {
            found: v,
            supported: T::VERSION,
        }),
    }
}

/// Serialize a record to its on-disk JSON form.
///
/// The instance envelope is checked first so a miscomputed record can
/// never be written.
///
/// # Errors
///
/// Returns `RecordError` if the envelope or body is invalid.
pub fn to_json<T: Record>(record: &T) -> Result<String, RecordError> {
    let (kind, version) = record.envelope();
    if kind != T::KIND {
        return Err(RecordError::InvalidKind {
            found: kind.to_string(),
            expected: T::KIND.to_string(),
        });
    }
    if version != T::VERSION {
        return Err(RecordError::UnsupportedVersion {
            found: version,
            supported: T::VERSION,
        });
    }
    record.validate_body()?;

    let mut json =
        serde_json::to_string_pretty(record).map_err(|e| RecordError::ParseError(e.to_string()))?;
    json.push('\n');
    Ok(json)
}

/// Load a record from `path`, or `None` if the file does not exist.
///
/// Absence policy belongs to the caller: a missing revision log means an
/// untracked file, while a missing pending set means a damaged repository.
///
/// # Errors
///
/// Returns `OpError::Io` for read failures and `OpError::Corrupt` for
/// records that fail parsing or validation.
pub fn try_load<T: Record>(path: &Path) -> Result<Option<T>, OpError> {
    if !path.exists() {
        return Ok(None);
    }
    let bytes = fsutil::read_bytes(path)?;
    let json = String::from_utf8(bytes)
        .map_err(|_| OpError::corrupt(path, "record is not UTF-8"))?;
    let record = parse::<T>(&json).map_err(|e| OpError::corrupt(path, e.to_string()))?;
    Ok(Some(record))
}

/// Write a record to `path` atomically.
///
/// # Errors
///
/// Returns `OpError::Corrupt` for an invalid record (a bug upstream) and
/// `OpError::Io` for write failures.
pub fn save<T: Record>(path: &Path, record: &T) -> Result<(), OpError> {
    let json = to_json(record).map_err(|e| OpError::corrupt(path, e.to_string()))?;
    fsutil::write_atomic(path, json.as_bytes())
}
