use std::time::Duration;

/// Failures surfaced by the store.
///
/// `RecordNotFound` and `EditConflict` are domain outcomes the caller can act
/// on. `Timeout` and `Unavailable` are opaque backend failures; see
/// [`StoreError::is_unavailable`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record not found")]
    RecordNotFound,

    #[error("edit conflict")]
    EditConflict,

    #[error("sort key {0:?} is not permitted")]
    UnsupportedSort(String),

    #[error("store operation {operation} timed out after {timeout:?}")]
    Timeout {
        operation: &'static str,
        timeout: Duration,
    },

    #[error("store operation {operation} failed: {source}")]
    Unavailable {
        operation: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

impl StoreError {
    /// `true` for backend failures this layer cannot recover from.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StoreError::Timeout { .. } | StoreError::Unavailable { .. })
    }

    /// Name of the store operation that failed, for opaque failures.
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            StoreError::Timeout { operation, .. } | StoreError::Unavailable { operation, .. } => {
                Some(operation)
            }
            _ => None,
        }
    }
}
