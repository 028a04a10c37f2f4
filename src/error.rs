use thiserror::Error;

pub(crate) type Result<T> = std::result::Result<T, StoreError>;

/// Everything the store, query and backup layers can fail with.
///
/// Each variant maps to one failure class the calling layer is expected to
/// render differently, so callers match on the variant rather than the text.
#[derive(Debug, Error)]
pub(crate) enum StoreError {
    #[error("{kind} with key '{key}' already exists")]
    DuplicateKey { kind: &'static str, key: String },

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("malformed record: {0}")]
    MalformedRecord(#[source] serde_json::Error),

    #[error("could not encode backup: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("invalid backup: {0}")]
    InvalidBackup(String),

    #[error("import failed at {kind} #{index}: {source}")]
    ImportFailed {
        kind: &'static str,
        index: usize,
        #[source]
        source: Box<StoreError>,
    },

    #[error("{0}")]
    Validation(String),
}

impl StoreError {
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub(crate) fn import_failed(kind: &'static str, index: usize, source: StoreError) -> Self {
        Self::ImportFailed {
            kind,
            index,
            source: Box::new(source),
        }
    }
}
