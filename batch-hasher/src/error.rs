#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("hashing failed: {0}")]
    Hash(String),

    #[error("stored digest is malformed: {0}")]
    MalformedDigest(String),

    #[error("batch execution failed for batch {batch}: {source}")]
    Batch {
        batch: usize,
        #[source]
        source: Box<Error>,
    },

    #[error("dispatch failed: {0}")]
    Dispatch(String),

    #[error("barrier wait interrupted for batch {batch}: {reason}")]
    Interrupted { batch: usize, reason: String },
}
