//! Typed in-memory table

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{IoError, IoResult};

/// Column data type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    Float,
    Int,
    Text,
}

impl ColumnType {
    /// Check if this is a numeric type
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Float | ColumnType::Int)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::Float => "float",
            ColumnType::Int => "int",
            ColumnType::Text => "text",
        };
        f.write_str(name)
    }
}

/// A column of optional cells
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Column {
    Float(Vec<Option<f64>>),
    Int(Vec<Option<i64>>),
    Text(Vec<Option<String>>),
}

impl Column {
    /// Float column without missing cells
    pub fn floats(values: impl IntoIterator<Item = f64>) -> Self {
        Column::Float(values.into_iter().map(Some).collect())
    }

    /// Integer column without missing cells
    pub fn ints(values: impl IntoIterator<Item = i64>) -> Self {
        Column::Int(values.into_iter().map(Some).collect())
    }

    /// Text column without missing cells
    pub fn texts<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Column::Text(values.into_iter().map(|s| Some(s.into())).collect())
    }

    /// Get the column type
    pub fn dtype(&self) -> ColumnType {
        match self {
            Column::Float(_) => ColumnType::Float,
            Column::Int(_) => ColumnType::Int,
            Column::Text(_) => ColumnType::Text,
        }
    }

    /// Get the number of cells
    pub fn len(&self) -> usize {
        match self {
            Column::Float(v) => v.len(),
            Column::Int(v) => v.len(),
            Column::Text(v) => v.len(),
        }
    }

    /// Check if the column is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the cell at `row` is missing. Float `NaN` counts as missing.
    pub fn is_missing(&self, row: usize) -> bool {
        match self {
            Column::Float(v) => !matches!(v.get(row), Some(Some(x)) if !x.is_nan()),
            Column::Int(v) => !matches!(v.get(row), Some(Some(_))),
            Column::Text(v) => !matches!(v.get(row), Some(Some(_))),
        }
    }

    /// Number of non-missing cells
    pub fn count_present(&self) -> usize {
        (0..self.len()).filter(|&row| !self.is_missing(row)).count()
    }

    /// Numeric cells as `f64`, `None` for text columns
    pub fn to_f64(&self) -> Option<Vec<Option<f64>>> {
        match self {
            Column::Float(v) => Some(v.iter().map(|x| x.filter(|x| !x.is_nan())).collect()),
            Column::Int(v) => Some(v.iter().map(|x| x.map(|i| i as f64)).collect()),
            Column::Text(_) => None,
        }
    }

    /// Render one cell for delimited output; missing cells render empty
    ///
    /// Floats always carry a fractional part (`1.0`, not `1`).
    pub fn cell_text(&self, row: usize) -> String {
        if self.is_missing(row) {
            return String::new();
        }
        match self {
            // Keep a fractional part so whole floats read back as floats
            Column::Float(v) => v[row].map(|x| format!("{:?}", x)).unwrap_or_default(),
            Column::Int(v) => v[row].map(|x| x.to_string()).unwrap_or_default(),
            Column::Text(v) => v[row].clone().unwrap_or_default(),
        }
    }
}

/// Float cells compare bitwise, so a column holding `NaN` equals its clone
impl PartialEq for Column {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Column::Float(a), Column::Float(b)) => {
                a.len() == b.len()
                    && a.iter().zip(b).all(|pair| match pair {
                        (Some(x), Some(y)) => x == y || x.to_bits() == y.to_bits(),
                        (None, None) => true,
                        _ => false,
                    })
            }
            (Column::Int(a), Column::Int(b)) => a == b,
            (Column::Text(a), Column::Text(b)) => a == b,
            _ => false,
        }
    }
}

/// A named column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedColumn {
    pub name: String,
    pub data: Column,
}

/// Ordered collection of equally long, named columns
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<NamedColumn>,
    num_rows: usize,
}

impl Table {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a column, builder style
    pub fn with_column(mut self, name: impl Into<String>, data: Column) -> IoResult<Self> {
        self.push_column(name, data)?;
        Ok(self)
    }

    /// Add a column
    ///
    /// The first column fixes the row count; later columns must match it.
    pub fn push_column(&mut self, name: impl Into<String>, data: Column) -> IoResult<()> {
        let name = name.into();
        if self.column(&name).is_some() {
            return Err(IoError::DuplicateColumn(name));
        }
        if self.columns.is_empty() {
            self.num_rows = data.len();
        } else if data.len() != self.num_rows {
            return Err(IoError::LengthMismatch {
                column: name,
                expected: self.num_rows,
                actual: data.len(),
            });
        }
        self.columns.push(NamedColumn { name, data });
        Ok(())
    }

    /// Number of rows
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Number of columns
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Column names in table order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Iterate over the named columns in order
    pub fn columns(&self) -> impl Iterator<Item = &NamedColumn> {
        self.columns.iter()
    }

    /// Get a column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name).map(|c| &c.data)
    }

    /// Get a column by name, failing with `ColumnNotFound`
    pub fn require(&self, name: &str) -> IoResult<&Column> {
        self.column(name)
            .ok_or_else(|| IoError::ColumnNotFound(name.to_string()))
    }

    /// Numeric column as optional `f64` cells, aligned with table rows
    pub fn numeric(&self, name: &str) -> IoResult<Vec<Option<f64>>> {
        let column = self.require(name)?;
        column.to_f64().ok_or_else(|| IoError::TypeMismatch {
            column: name.to_string(),
            expected: ColumnType::Float,
            actual: column.dtype(),
        })
    }

    /// Non-missing view of a numeric column, relative order preserved
    pub fn non_missing(&self, name: &str) -> IoResult<Vec<f64>> {
        Ok(self.numeric(name)?.into_iter().flatten().collect())
    }

    /// Integer column as optional `i64` cells
    ///
    /// Float columns are accepted when every present value is integral.
    pub fn integers(&self, name: &str) -> IoResult<Vec<Option<i64>>> {
        let column = self.require(name)?;
        let mismatch = || IoError::TypeMismatch {
            column: name.to_string(),
            expected: ColumnType::Int,
            actual: column.dtype(),
        };
        match column {
            Column::Int(v) => Ok(v.clone()),
            Column::Float(v) => v
                .iter()
                .map(|cell| match cell {
                    Some(x) if x.is_nan() => Ok(None),
                    Some(x) if x.fract() == 0.0 && x.is_finite() => Ok(Some(*x as i64)),
                    Some(_) => Err(mismatch()),
                    None => Ok(None),
                })
                .collect(),
            Column::Text(_) => Err(mismatch()),
        }
    }

    /// Text column cells
    pub fn text(&self, name: &str) -> IoResult<&[Option<String>]> {
        match self.require(name)? {
            Column::Text(v) => Ok(v),
            other => Err(IoError::TypeMismatch {
                column: name.to_string(),
                expected: ColumnType::Text,
                actual: other.dtype(),
            }),
        }
    }
}
