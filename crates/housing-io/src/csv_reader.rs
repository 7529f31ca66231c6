//! CSV loading with type inference

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::{IoError, IoResult};
use crate::table::{Column, ColumnType, Table};

/// Field spellings read as missing values
const MISSING_MARKERS: &[&str] = &["", "NA", "N/A", "NaN", "nan", "null", "NULL"];

/// Options for reading delimited text
#[derive(Debug, Clone, Copy)]
pub struct CsvOptions {
    pub delimiter: u8,
    pub has_header: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_header: true,
        }
    }
}

impl Table {
    /// Read a comma-separated file with a header row
    pub fn read_csv(path: impl AsRef<Path>) -> IoResult<Self> {
        Self::read_csv_with_options(path, CsvOptions::default())
    }

    /// Read a delimited file
    pub fn read_csv_with_options(path: impl AsRef<Path>, options: CsvOptions) -> IoResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(IoError::FileNotFound(path.to_path_buf()));
        }

        let file = File::open(path).map_err(|e| IoError::OpenFailed(e.to_string()))?;
        let table = Self::from_csv_reader(BufReader::new(file), options)?;
        tracing::debug!(
            path = %path.display(),
            rows = table.num_rows(),
            columns = table.num_columns(),
            "loaded table"
        );
        Ok(table)
    }

    /// Read delimited text from any reader
    ///
    /// Every column is typed from all of its non-missing fields: integer if
    /// they all parse as `i64`, float if they all parse as `f64`, text
    /// otherwise. Columns without any value are read as float.
    pub fn from_csv_reader<R: Read>(reader: R, options: CsvOptions) -> IoResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .has_headers(options.has_header)
            .from_reader(reader);

        let mut headers: Vec<String> = if options.has_header {
            reader
                .headers()
                .map_err(|e| IoError::InvalidFormat(e.to_string()))?
                .iter()
                .map(|s| s.to_string())
                .collect()
        } else {
            Vec::new()
        };

        let mut fields: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
        for (line, result) in reader.records().enumerate() {
            let record = result.map_err(|e| IoError::InvalidFormat(e.to_string()))?;
            if headers.is_empty() {
                // Generate column names
                headers = (0..record.len()).map(|i| format!("col_{}", i)).collect();
                fields = vec![Vec::new(); headers.len()];
            }
            if record.len() != headers.len() {
                return Err(IoError::InvalidFormat(format!(
                    "record {} has {} fields, expected {}",
                    line + 1,
                    record.len(),
                    headers.len()
                )));
            }
            for (i, value) in record.iter().enumerate() {
                fields[i].push(value.trim().to_string());
            }
        }

        let mut table = Table::new();
        for (name, values) in headers.into_iter().zip(fields) {
            let column = parse_column(&values, infer_type(&values));
            table.push_column(name, column)?;
        }
        Ok(table)
    }
}

fn is_missing(value: &str) -> bool {
    MISSING_MARKERS.contains(&value)
}

fn present(value: &str) -> Option<&str> {
    (!is_missing(value)).then_some(value)
}

/// Infer column type from its values
fn infer_type(values: &[String]) -> ColumnType {
    let present: Vec<&str> = values
        .iter()
        .map(|s| s.as_str())
        .filter(|s| !is_missing(s))
        .collect();
    // A column with no values at all stays numeric
    if present.is_empty() {
        return ColumnType::Float;
    }

    // Try parsing as integers
    if present.iter().all(|s| s.parse::<i64>().is_ok()) {
        return ColumnType::Int;
    }

    // Try parsing as floats
    if present.iter().all(|s| s.parse::<f64>().is_ok()) {
        return ColumnType::Float;
    }

    ColumnType::Text
}

/// Parse column values into a typed column
fn parse_column(values: &[String], dtype: ColumnType) -> Column {
    match dtype {
        ColumnType::Float => Column::Float(
            values
                .iter()
                .map(|s| present(s).and_then(|s| s.parse().ok()))
                .collect(),
        ),
        ColumnType::Int => Column::Int(
            values
                .iter()
                .map(|s| present(s).and_then(|s| s.parse().ok()))
                .collect(),
        ),
        ColumnType::Text => Column::Text(
            values
                .iter()
                .map(|s| present(s).map(str::to_string))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_infer_type_int() {
        assert_eq!(infer_type(&strings(&["1", "2", "", "3"])), ColumnType::Int);
    }

    #[test]
    fn test_infer_type_float() {
        assert_eq!(infer_type(&strings(&["1.5", "2", "NaN"])), ColumnType::Float);
    }

    #[test]
    fn test_infer_type_text() {
        assert_eq!(
            infer_type(&strings(&["20141013T000000", "20141209T000000"])),
            ColumnType::Text
        );
    }

    #[test]
    fn test_all_missing_column_is_numeric() {
        assert_eq!(infer_type(&strings(&["", "NA"])), ColumnType::Float);
    }

    #[test]
    fn test_read_typed_table() {
        let input = "id,date,price,lat\n\
                     7129300520,20141013T000000,221900,47.5112\n\
                     6414100192,20141209T000000,,47.721\n";
        let table = Table::from_csv_reader(input.as_bytes(), CsvOptions::default()).unwrap();

        assert_eq!(table.num_rows(), 2);
        assert_eq!(table.column("id").unwrap().dtype(), ColumnType::Int);
        assert_eq!(table.column("date").unwrap().dtype(), ColumnType::Text);
        assert_eq!(table.column("price").unwrap().dtype(), ColumnType::Int);
        assert_eq!(table.column("lat").unwrap().dtype(), ColumnType::Float);
        assert_eq!(table.numeric("price").unwrap(), vec![Some(221900.0), None]);
    }

    #[test]
    fn test_ragged_record_is_rejected() {
        let input = "a,b\n1,2\n3\n";
        let err = Table::from_csv_reader(input.as_bytes(), CsvOptions::default()).unwrap_err();
        assert!(matches!(err, IoError::InvalidFormat(_)));
    }

    #[test]
    fn test_headerless_input() {
        let input = "1,x\n2,y\n";
        let options = CsvOptions {
            has_header: false,
            ..Default::default()
        };
        let table = Table::from_csv_reader(input.as_bytes(), options).unwrap();
        assert_eq!(table.column_names(), vec!["col_0", "col_1"]);
    }

    #[test]
    fn test_missing_file() {
        let err = Table::read_csv("/nonexistent/kc_house_data.csv").unwrap_err();
        assert!(matches!(err, IoError::FileNotFound(_)));
    }
}
