use thiserror::Error;

/// Errors surfaced while loading the dataset or writing it to SQLite.
#[derive(Debug, Error)]
pub enum Error {
    /// The named dataset is not bundled or its asset could not be read.
    #[error("dataset '{name}' is unavailable: {reason}")]
    DatasetUnavailable { name: String, reason: String },

    /// A row of the bundled CSV asset did not match the expected record.
    #[error("malformed dataset row {row}")]
    Parse {
        row: usize,
        #[source]
        source: csv::Error,
    },

    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Raised by `IfExists::Fail` when the target table is already present.
    #[error("table '{0}' already exists")]
    TableExists(String),
}

pub type Result<T> = std::result::Result<T, Error>;
