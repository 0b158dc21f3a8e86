use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FortuneError>;

/// Errors surfaced by the query library and the builder.
///
/// Nothing here is retried; every failure propagates to the immediate
/// caller. Random-selection queries over an empty matching set are a
/// distinct, explicit error rather than an out-of-range access.
#[derive(Debug, Error)]
pub enum FortuneError {
    #[error("no categories match the requested filter")]
    NoCategory,

    #[error("no fortunes match the requested filter")]
    NoFortune,

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("failed to scan fortunes directory: {0}")]
    Scan(#[from] walkdir::Error),

    #[error("failed to read fortune file {path:?}: {source}")]
    SourceIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
