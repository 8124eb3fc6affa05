use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("hash generation failed: {0}")]
    Hashing(#[from] batch_hasher::Error),

    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed record in '{path}' at line {line}: {reason}")]
    Parse { path: PathBuf, line: usize, reason: String },

    #[error("File '{path}' exists. Use --force to overwrite.")]
    FileExists { path: PathBuf },

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
}
