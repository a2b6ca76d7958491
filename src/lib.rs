//! Loads the bundled iris dataset and writes it into a SQLite database file.
//!
//! # Intention
//!
//! - Turn a bundled example dataset into a single-table SQLite file.
//! - Replace the target table on every run, never append to it.
//!
//! # Architectural Boundaries
//!
//! - `dataset` only knows about bundled assets and the in-memory table.
//! - `sqlite` only knows about turning a table into SQL and writing it.

pub mod dataset;
pub mod error;
pub mod sqlite;

pub use dataset::{load_dataset, load_iris, Dataset};
pub use error::{Error, Result};
pub use sqlite::{IfExists, SqliteWriter, Value, WriterConfig};

/// Load the iris dataset and write it using `config`.
///
/// Returns the number of rows written.
pub fn run(config: &WriterConfig) -> Result<usize> {
    let dataset = load_iris()?;
    SqliteWriter::new(config.clone()).write(&dataset)
}
