//! JSON encoding for stored records
//!
//! Encoding failures are serialization errors; decoding failures mean the
//! bytes at rest do not match the expected shape and are reported as
//! corruption of that specific record.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::{OcError, Result};
use crate::model::{Index, Partition};

/// Encode a value as the JSON bytes stored under a key
pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(value).map_err(OcError::from)
}

/// Decode the bytes stored at `partition`/`key`
///
/// # Errors
///
/// Returns `DataCorruption` if the bytes are not valid JSON for `T`.
pub fn decode<T: DeserializeOwned>(partition: Partition, key: Index, bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(|e| OcError::DataCorruption {
        partition,
        key,
        reason: e.to_string(),
    })
}
