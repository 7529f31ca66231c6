//! Delimited persistence with a working-directory fallback
//!
//! `save` writes a table to the requested path. When that fails with a
//! permission error it retries once with the bare file name, which resolves
//! against the current working directory. Every other failure, and a failed
//! retry, is logged and reported as `false`.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::table::Table;

/// Why a save did not produce a file
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("Error saving table to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Permission denied for {original} and it has no file name to retry with")]
    NoFileName { original: PathBuf },

    #[error("Error saving to current directory as {fallback}: {source}")]
    Fallback {
        original: PathBuf,
        fallback: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Destination for serialized tables
///
/// The production implementation writes files; tests substitute writers
/// that fail on chosen paths.
pub trait TableWriter {
    fn write_table(&self, table: &Table, path: &Path, include_row_labels: bool) -> io::Result<()>;
}

/// Writes comma-separated files to the filesystem
#[derive(Debug, Clone, Copy)]
pub struct CsvFileWriter {
    pub delimiter: u8,
}

impl Default for CsvFileWriter {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl TableWriter for CsvFileWriter {
    fn write_table(&self, table: &Table, path: &Path, include_row_labels: bool) -> io::Result<()> {
        let file = File::create(path)?;
        let mut out = BufWriter::new(file);
        write_delimited(table, &mut out, self.delimiter, include_row_labels)?;
        out.flush()
    }
}

/// Serialize a table as delimited text with a header row
///
/// Missing cells are written as empty fields. With `include_row_labels` a
/// leading column with an empty header holds 0-based row labels.
pub fn write_delimited<W: Write>(
    table: &Table,
    out: W,
    delimiter: u8,
    include_row_labels: bool,
) -> io::Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(out);

    let mut header: Vec<String> = Vec::with_capacity(table.num_columns() + 1);
    if include_row_labels {
        header.push(String::new());
    }
    header.extend(table.column_names().into_iter().map(str::to_string));
    writer.write_record(&header).map_err(csv_to_io)?;

    for row in 0..table.num_rows() {
        let mut record: Vec<String> = Vec::with_capacity(header.len());
        if include_row_labels {
            record.push(row.to_string());
        }
        record.extend(table.columns().map(|c| c.data.cell_text(row)));
        writer.write_record(&record).map_err(csv_to_io)?;
    }

    writer.flush()
}

fn csv_to_io(err: csv::Error) -> io::Error {
    match err.into_kind() {
        csv::ErrorKind::Io(e) => e,
        other => io::Error::other(format!("{:?}", other)),
    }
}

/// Save a table, returning the path actually written
pub fn try_save_with<W: TableWriter>(
    writer: &W,
    table: &Table,
    filepath: impl AsRef<Path>,
    include_row_labels: bool,
) -> Result<PathBuf, SaveError> {
    let path = filepath.as_ref();
    match writer.write_table(table, path, include_row_labels) {
        Ok(()) => {
            tracing::debug!(path = %path.display(), rows = table.num_rows(), "saved table");
            Ok(path.to_path_buf())
        }
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
            tracing::warn!(
                path = %path.display(),
                "Permission denied. Trying to save to the current directory instead."
            );
            let fallback = path
                .file_name()
                .map(PathBuf::from)
                .ok_or_else(|| SaveError::NoFileName {
                    original: path.to_path_buf(),
                })?;
            writer
                .write_table(table, &fallback, include_row_labels)
                .map_err(|source| SaveError::Fallback {
                    original: path.to_path_buf(),
                    fallback: fallback.clone(),
                    source,
                })?;
            let shown = std::env::current_dir()
                .map(|cwd| cwd.join(&fallback))
                .unwrap_or_else(|_| fallback.clone());
            tracing::info!(path = %shown.display(), "Successfully saved table to fallback path");
            Ok(fallback)
        }
        Err(source) => Err(SaveError::Write {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Save a table as CSV, returning the path actually written
pub fn try_save(
    table: &Table,
    filepath: impl AsRef<Path>,
    include_row_labels: bool,
) -> Result<PathBuf, SaveError> {
    try_save_with(&CsvFileWriter::default(), table, filepath, include_row_labels)
}

/// Save a table through `writer`; `false` when nothing could be written
pub fn save_with<W: TableWriter>(
    writer: &W,
    table: &Table,
    filepath: impl AsRef<Path>,
    include_row_labels: bool,
) -> bool {
    match try_save_with(writer, table, filepath, include_row_labels) {
        Ok(_) => true,
        Err(e) => {
            tracing::error!("{}", e);
            false
        }
    }
}

/// Save a table as CSV; `false` when nothing could be written
pub fn save(table: &Table, filepath: impl AsRef<Path>, include_row_labels: bool) -> bool {
    save_with(&CsvFileWriter::default(), table, filepath, include_row_labels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{Column, ColumnType};
    use std::cell::RefCell;

    fn sample() -> Table {
        Table::new()
            .with_column("id", Column::ints([1, 2]))
            .unwrap()
            .with_column("price", Column::Float(vec![Some(221900.0), None]))
            .unwrap()
    }

    /// Fails with a chosen error kind for paths in `deny`, records every attempt
    struct ScriptedWriter {
        deny: Vec<(PathBuf, io::ErrorKind)>,
        attempts: RefCell<Vec<PathBuf>>,
    }

    impl ScriptedWriter {
        fn new(deny: Vec<(&str, io::ErrorKind)>) -> Self {
            Self {
                deny: deny.into_iter().map(|(p, k)| (PathBuf::from(p), k)).collect(),
                attempts: RefCell::new(Vec::new()),
            }
        }
    }

    impl TableWriter for ScriptedWriter {
        fn write_table(&self, _: &Table, path: &Path, _: bool) -> io::Result<()> {
            self.attempts.borrow_mut().push(path.to_path_buf());
            match self.deny.iter().find(|(p, _)| p == path) {
                Some((_, kind)) => Err(io::Error::from(*kind)),
                None => Ok(()),
            }
        }
    }

    #[test]
    fn test_write_delimited_with_missing_cells() {
        let mut buf = Vec::new();
        write_delimited(&sample(), &mut buf, b',', false).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "id,price\n1,221900.0\n2,\n");
    }

    #[test]
    fn test_write_delimited_with_row_labels() {
        let mut buf = Vec::new();
        write_delimited(&sample(), &mut buf, b',', true).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            ",id,price\n0,1,221900.0\n1,2,\n"
        );
    }

    #[test]
    fn test_save_direct_success() {
        let writer = ScriptedWriter::new(vec![]);
        assert!(save_with(&writer, &sample(), "/data/out.csv", false));
        assert_eq!(*writer.attempts.borrow(), vec![PathBuf::from("/data/out.csv")]);
    }

    #[test]
    fn test_permission_denied_falls_back_to_file_name() {
        let writer = ScriptedWriter::new(vec![("/readonly/out.csv", io::ErrorKind::PermissionDenied)]);
        let written = try_save_with(&writer, &sample(), "/readonly/out.csv", false).unwrap();

        assert_eq!(written, PathBuf::from("out.csv"));
        assert_eq!(
            *writer.attempts.borrow(),
            vec![PathBuf::from("/readonly/out.csv"), PathBuf::from("out.csv")]
        );
    }

    #[test]
    fn test_failed_fallback_returns_false() {
        let writer = ScriptedWriter::new(vec![
            ("/readonly/out.csv", io::ErrorKind::PermissionDenied),
            ("out.csv", io::ErrorKind::InvalidInput),
        ]);
        assert!(!save_with(&writer, &sample(), "/readonly/out.csv", false));
        assert_eq!(writer.attempts.borrow().len(), 2);
    }

    #[test]
    fn test_permission_denied_without_file_name() {
        let writer = ScriptedWriter::new(vec![("/readonly/..", io::ErrorKind::PermissionDenied)]);
        let err = try_save_with(&writer, &sample(), "/readonly/..", false).unwrap_err();
        assert!(matches!(err, SaveError::NoFileName { .. }));
        assert_eq!(writer.attempts.borrow().len(), 1);
    }

    #[test]
    fn test_other_errors_do_not_retry() {
        let writer = ScriptedWriter::new(vec![("/data/out.csv", io::ErrorKind::NotFound)]);
        assert!(!save_with(&writer, &sample(), "/data/out.csv", false));
        assert_eq!(writer.attempts.borrow().len(), 1);
    }

    #[test]
    fn test_save_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("houses.csv");

        assert!(save(&sample(), &path, false));
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "id,price\n1,221900.0\n2,\n");
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("houses.csv");
        assert!(!save(&sample(), &path, false));
    }

    #[test]
    fn test_whole_floats_read_back_as_floats() {
        let table = Table::new()
            .with_column("floors", Column::floats([1.0, 2.0]))
            .unwrap()
            .with_column("lat", Column::Float(vec![Some(47.5), None]))
            .unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("floors.csv");

        assert!(save(&table, &path, false));
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "floors,lat\n1.0,47.5\n2.0,\n"
        );
        let reloaded = Table::read_csv(&path).unwrap();
        assert_eq!(reloaded.column("floors").unwrap().dtype(), ColumnType::Float);
        assert_eq!(reloaded, table);
    }
}
