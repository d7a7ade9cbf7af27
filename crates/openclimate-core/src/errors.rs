use openclimate_core_types::{RequestId, TraceId};
use thiserror::Error;

use crate::model::{Index, Partition};

/// Result type alias using OcError
pub type Result<T> = std::result::Result<T, OcError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every failure surfaced by the store, the repositories or the aggregator is
/// classified into one of these kinds. Each kind maps to a stable code that a
/// gateway can translate into a protocol-level response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    /// Caller-supplied input is malformed (non-integer id, undeclared partition)
    InvalidInput,
    /// Key or name absent
    NotFound,
    /// Stored bytes fail to decode against the expected shape
    DataCorruption,

    // Integration/IO
    /// Filesystem failure
    Io,
    /// Storage engine failure
    Persistence,
    /// A value could not be encoded for storage
    Serialization,
    /// The store lock was poisoned by a panicking writer
    Concurrency,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::DataCorruption => "ERR_DATA_CORRUPTION",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Concurrency => "ERR_CONCURRENCY",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// Whether this kind belongs to the I/O family (filesystem or engine)
    pub fn is_io(&self) -> bool {
        matches!(self, ExErrorKind::Io | ExErrorKind::Persistence)
    }
}

/// Canonical structured error type
///
/// Carries a classification for programmatic handling plus context for
/// diagnostics. A wrapping layer keeps the original failure as `source`
/// instead of flattening it into the message.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    partition: Option<Partition>,
    index: Option<Index>,
    request_id: Option<RequestId>,
    trace_id: Option<TraceId>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            partition: None,
            index: None,
            request_id: None,
            trace_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add partition context
    pub fn with_partition(mut self, partition: Partition) -> Self {
        self.partition = Some(partition);
        self
    }

    /// Add record index context
    pub fn with_index(mut self, index: Index) -> Self {
        self.index = Some(index);
        self
    }

    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Wrap `cause` under a new operation, keeping its kind
    ///
    /// The wrapper reports the same kind as the cause so callers can branch on
    /// `kind()` without walking the chain.
    pub fn wrap(op: impl Into<String>, cause: ExError) -> Self {
        let message = cause.message.clone();
        ExError::new(cause.kind)
            .with_op(op)
            .with_message(message)
            .with_source(cause)
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn partition(&self) -> Option<Partition> {
        self.partition
    }

    pub fn index(&self) -> Option<Index> {
        self.index
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn trace_id(&self) -> Option<&TraceId> {
        self.trace_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }

    /// Innermost error in the source chain (self when there is no source)
    pub fn root_cause(&self) -> &ExError {
        let mut current = self;
        while let Some(next) = current.source.as_deref() {
            current = next;
        }
        current
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(partition) = &self.partition {
            write!(f, " (partition: {})", partition)?;
        }
        if let Some(index) = self.index {
            write!(f, " (index: {})", index)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Typed domain failures raised by records, codecs and repositories
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OcError {
    /// No record stored under the key
    #[error("No record at index {index} in partition {partition}")]
    RecordNotFound { partition: Partition, index: Index },

    /// Name lookup scanned the partition without a match
    #[error("No record named '{name}' in partition {partition}")]
    NameNotFound { partition: Partition, name: String },

    /// Stored bytes do not decode as the partition's record kind
    #[error("Corrupt record at index {key} in partition {partition}: {reason}")]
    DataCorruption {
        partition: Partition,
        key: Index,
        reason: String,
    },

    /// A textual id could not be turned into a record index
    #[error("Invalid index '{input}': {reason}")]
    InvalidIndex { input: String, reason: String },

    /// The partition was not declared when the store was opened
    #[error("Partition {partition} is not declared in the store configuration")]
    UnknownPartition { partition: Partition },

    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl From<OcError> for ExError {
    fn from(err: OcError) -> Self {
        let message = err.to_string();
        match err {
            OcError::RecordNotFound { partition, index } => ExError::new(ExErrorKind::NotFound)
                .with_partition(partition)
                .with_index(index)
                .with_message(message),
            OcError::NameNotFound { partition, .. } => ExError::new(ExErrorKind::NotFound)
                .with_partition(partition)
                .with_message(message),
            OcError::DataCorruption { partition, key, .. } => {
                ExError::new(ExErrorKind::DataCorruption)
                    .with_partition(partition)
                    .with_index(key)
                    .with_message(message)
            }
            OcError::InvalidIndex { .. } => {
                ExError::new(ExErrorKind::InvalidInput).with_message(message)
            }
            OcError::UnknownPartition { partition } => ExError::new(ExErrorKind::InvalidInput)
                .with_partition(partition)
                .with_message(message),
            OcError::Serialization { .. } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

impl From<serde_json::Error> for OcError {
    fn from(err: serde_json::Error) -> Self {
        OcError::Serialization {
            message: err.to_string(),
        }
    }
}

/// Parse a textual id (as a gateway receives it) into a record index
///
/// # Errors
///
/// Returns `InvalidIndex` for non-integer or non-positive input.
pub fn parse_index(input: &str) -> Result<Index> {
    let trimmed = input.trim();
    let index: Index = trimmed.parse().map_err(|_| OcError::InvalidIndex {
        input: input.to_string(),
        reason: "not an integer".to_string(),
    })?;
    if index < 1 {
        return Err(OcError::InvalidIndex {
            input: input.to_string(),
            reason: "indices start at 1".to_string(),
        });
    }
    Ok(index)
}
