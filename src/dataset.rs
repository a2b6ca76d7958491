//! Bundled example datasets and their in-memory tabular form.

use std::collections::BTreeSet;

use log::info;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::sqlite::{ColumnDefinition, DataType, Value};

/// Name under which the iris dataset is bundled.
pub const IRIS: &str = "iris";

const IRIS_CSV: &str = include_str!("../data/iris.csv");

/// An immutable table: named, typed columns and row-major values.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    name: String,
    columns: Vec<ColumnDefinition>,
    rows: Vec<Vec<Value>>,
}

impl Dataset {
    pub fn new(
        name: impl Into<String>,
        columns: Vec<ColumnDefinition>,
        rows: Vec<Vec<Value>>,
    ) -> Self {
        Self {
            name: name.into(),
            columns,
            rows,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[ColumnDefinition] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// All values of the named column, in row order.
    pub fn column(&self, name: &str) -> Option<Vec<&Value>> {
        let idx = self.columns.iter().position(|c| c.name == name)?;
        Some(self.rows.iter().filter_map(|row| row.get(idx)).collect())
    }

    /// Sorted distinct text values of the named column.
    pub fn distinct(&self, name: &str) -> Option<BTreeSet<&str>> {
        let values = self.column(name)?;
        Some(values.into_iter().filter_map(Value::as_text).collect())
    }
}

/// One row of the iris CSV asset.
#[derive(Debug, Deserialize)]
struct IrisRecord {
    sepal_length: f64,
    sepal_width: f64,
    petal_length: f64,
    petal_width: f64,
    species: String,
}

impl From<IrisRecord> for Vec<Value> {
    fn from(record: IrisRecord) -> Self {
        vec![
            Value::Real(record.sepal_length),
            Value::Real(record.sepal_width),
            Value::Real(record.petal_length),
            Value::Real(record.petal_width),
            Value::Text(record.species),
        ]
    }
}

fn iris_columns() -> Vec<ColumnDefinition> {
    vec![
        ColumnDefinition::new("sepal_length", DataType::Real),
        ColumnDefinition::new("sepal_width", DataType::Real),
        ColumnDefinition::new("petal_length", DataType::Real),
        ColumnDefinition::new("petal_width", DataType::Real),
        ColumnDefinition::new("species", DataType::Text),
    ]
}

/// Names of every dataset that `load_dataset` can resolve.
pub fn available_datasets() -> &'static [&'static str] {
    &[IRIS]
}

/// Load a bundled dataset by name.
pub fn load_dataset(name: &str) -> Result<Dataset> {
    let dataset = match name {
        IRIS => parse_iris(IRIS_CSV)?,
        other => {
            return Err(Error::DatasetUnavailable {
                name: other.to_string(),
                reason: format!("not bundled; available: {}", available_datasets().join(", ")),
            })
        }
    };
    info!(
        "loaded dataset '{}': {} rows x {} columns",
        dataset.name(),
        dataset.num_rows(),
        dataset.num_columns()
    );
    Ok(dataset)
}

pub fn load_iris() -> Result<Dataset> {
    load_dataset(IRIS)
}

fn parse_iris(text: &str) -> Result<Dataset> {
    let mut reader = csv::Reader::from_reader(text.as_bytes());
    let mut rows: Vec<Vec<Value>> = Vec::new();

    for (i, result) in reader.deserialize::<IrisRecord>().enumerate() {
        // Header is line 1.
        let record = result.map_err(|source| Error::Parse { row: i + 2, source })?;
        rows.push(record.into());
    }

    if rows.is_empty() {
        return Err(Error::DatasetUnavailable {
            name: IRIS.to_string(),
            reason: "bundled asset contains no rows".to_string(),
        });
    }

    Ok(Dataset::new(IRIS, iris_columns(), rows))
}
