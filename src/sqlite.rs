use std::path::{Path, PathBuf};

use log::{debug, info};
use rusqlite::types::{ToSql, ToSqlOutput, ValueRef};
use rusqlite::{params_from_iter, Connection, OptionalExtension};

use crate::dataset::Dataset;
use crate::error::{Error, Result};

/// Database file written when no other path is configured.
pub const DEFAULT_DB_PATH: &str = "iris.db";
/// Table the dataset is written to when no other name is configured.
pub const DEFAULT_TABLE_NAME: &str = "iris";

/// Core value types for a single cell
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl Value {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_real(&self) -> Option<f64> {
        match self {
            Value::Real(f) => Some(*f),
            _ => None,
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Real(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        let value = match self {
            Value::Null => ValueRef::Null,
            Value::Integer(i) => ValueRef::Integer(*i),
            Value::Real(f) => ValueRef::Real(*f),
            Value::Text(s) => ValueRef::Text(s.as_bytes()),
        };
        Ok(ToSqlOutput::Borrowed(value))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Integer,
    Real,
    Text,
}

impl DataType {
    /// Declared SQLite column type.
    pub fn sql_type(self) -> &'static str {
        match self {
            DataType::Integer => "INTEGER",
            DataType::Real => "REAL",
            DataType::Text => "TEXT",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDefinition {
    pub name: String,
    pub data_type: DataType,
}

impl ColumnDefinition {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// Table layout derived from a dataset, used to generate DDL and inserts.
#[derive(Debug, Clone, PartialEq)]
pub struct TableDefinition {
    pub name: String,
    pub columns: Vec<ColumnDefinition>,
}

impl TableDefinition {
    pub fn new(name: impl Into<String>, columns: Vec<ColumnDefinition>) -> Self {
        Self {
            name: name.into(),
            columns,
        }
    }

    pub fn for_dataset(name: impl Into<String>, dataset: &Dataset) -> Self {
        Self::new(name, dataset.columns().to_vec())
    }

    pub fn create_sql(&self) -> String {
        let columns = self
            .columns
            .iter()
            .map(|c| format!("{} {}", quote_identifier(&c.name), c.data_type.sql_type()))
            .collect::<Vec<_>>()
            .join(", ");
        format!("CREATE TABLE {} ({});", quote_identifier(&self.name), columns)
    }

    pub fn drop_sql(&self) -> String {
        format!("DROP TABLE {};", quote_identifier(&self.name))
    }

    pub fn insert_sql(&self) -> String {
        let names = self
            .columns
            .iter()
            .map(|c| quote_identifier(&c.name))
            .collect::<Vec<_>>()
            .join(", ");
        let placeholders = (1..=self.columns.len())
            .map(|i| format!("?{i}"))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "INSERT INTO {} ({}) VALUES ({});",
            quote_identifier(&self.name),
            names,
            placeholders
        )
    }
}

/// Wraps an identifier in double quotes, doubling any embedded quote.
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// What to do when the target table is already present in the file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IfExists {
    /// Drop the existing table and write a fresh one.
    #[default]
    Replace,
    /// Leave the file untouched and return `Error::TableExists`.
    Fail,
}

/// Writer configuration
#[derive(Debug, Clone, PartialEq)]
pub struct WriterConfig {
    /// Path to the SQLite database file
    pub db_path: PathBuf,
    /// Name of the table the dataset is written to
    pub table_name: String,
    pub if_exists: IfExists,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            table_name: DEFAULT_TABLE_NAME.to_string(),
            if_exists: IfExists::Replace,
        }
    }
}

impl WriterConfig {
    /// Create a config for the given database path with the default table
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            ..Self::default()
        }
    }

    pub fn with_table_name(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = table_name.into();
        self
    }

    pub fn with_if_exists(mut self, if_exists: IfExists) -> Self {
        self.if_exists = if_exists;
        self
    }
}

/// Writes a dataset into a single table of a SQLite database file.
pub struct SqliteWriter {
    config: WriterConfig,
}

impl SqliteWriter {
    pub fn new(config: WriterConfig) -> Self {
        Self { config }
    }

    pub fn path(&self) -> &Path {
        &self.config.db_path
    }

    /// Opens the configured file (creating it if absent), writes the dataset
    /// and closes the connection. Returns the number of rows written.
    ///
    /// The connection is dropped on every error path; on success it is closed
    /// explicitly so close failures are reported.
    pub fn write(&self, dataset: &Dataset) -> Result<usize> {
        info!("opening sqlite database at path: {}", self.path().display());
        let mut conn = Connection::open(self.path())?;
        let written = self.write_to(&mut conn, dataset)?;
        conn.close().map_err(|(_, e)| e)?;
        info!(
            "wrote {} rows to table '{}' in {}",
            written,
            self.config.table_name,
            self.path().display()
        );
        Ok(written)
    }

    /// Writes the dataset through an already open connection.
    ///
    /// Drop, create and inserts share one transaction: on failure the file
    /// keeps whatever it held before.
    pub fn write_to(&self, conn: &mut Connection, dataset: &Dataset) -> Result<usize> {
        let table = TableDefinition::for_dataset(&self.config.table_name, dataset);
        let tx = conn.transaction()?;

        if table_exists(&tx, &table.name)? {
            match self.config.if_exists {
                IfExists::Fail => return Err(Error::TableExists(table.name)),
                IfExists::Replace => {
                    debug!("dropping existing table '{}'", table.name);
                    tx.execute_batch(&table.drop_sql())?;
                }
            }
        }

        debug!("creating table: {}", table.create_sql());
        tx.execute_batch(&table.create_sql())?;

        let mut written = 0;
        {
            let mut stmt = tx.prepare_cached(&table.insert_sql())?;
            for row in dataset.rows() {
                written += stmt.execute(params_from_iter(row.iter()))?;
            }
        }
        tx.commit()?;
        Ok(written)
    }
}

/// Whether a table with this name exists in the main schema (SQLite names are
/// case-insensitive).
pub fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let found = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1 COLLATE NOCASE",
            [name],
            |_| Ok(()),
        )
        .optional()?;
    Ok(found.is_some())
}
