//! CSV-backed datasets
//!
//! A dataset is read fresh on every call and written back as a whole through
//! a temporary file and an atomic rename, so a reader never sees a half
//! migrated header or a torn row.

use crate::table::Table;
use crate::target::ResolvedTarget;
use atomicwrites::{AtomicFile, OverwriteBehavior};
use rowgate_core::{Error, Result, Row};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Result of a successful append
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendReceipt {
    pub path: PathBuf,
    /// 1-based index of the appended row (header excluded)
    pub row_index: usize,
    /// The file did not exist before this append
    pub created: bool,
    /// Columns added to an existing schema by this append
    pub added_columns: Vec<String>,
}

/// A dataset opened for one gate call
#[derive(Debug)]
pub struct Dataset {
    path: PathBuf,
    table: Option<Table>,
}

impl Dataset {
    /// Load the dataset at a resolved target, if it exists
    pub fn open(target: &ResolvedTarget) -> Result<Self> {
        let table = if target.exists {
            Some(read_table(&target.path)?)
        } else {
            None
        };
        Ok(Self {
            path: target.path.clone(),
            table,
        })
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current contents; `None` until the first append creates the file
    #[inline]
    pub fn table(&self) -> Option<&Table> {
        self.table.as_ref()
    }

    #[inline]
    pub fn exists(&self) -> bool {
        self.table.is_some()
    }

    /// Append one row, widening the schema if the row brings new keys
    ///
    /// A new file takes the row's keys, in order, as its header. The file on
    /// disk is replaced only once the full new contents are written.
    pub fn append(&mut self, row: &Row) -> Result<AppendReceipt> {
        let created = self.table.is_none();
        let mut table = self.table.clone().unwrap_or_default();

        let added_columns = table.migrate(row.keys());
        if !created && !added_columns.is_empty() {
            debug!(
                "Migrating {:?}: adding columns {:?}, backfilling {} rows",
                self.path,
                added_columns,
                table.len()
            );
        }
        let row_index = table.push_row(row)?;

        write_table(&self.path, &table)?;
        if created {
            info!("Created dataset {:?}", self.path);
        }
        debug!("Appended row {} to {:?}", row_index, self.path);

        self.table = Some(table);
        Ok(AppendReceipt {
            path: self.path.clone(),
            row_index,
            created,
            added_columns: if created { Vec::new() } else { added_columns },
        })
    }
}

/// Read a whole CSV file
///
/// Anything that does not parse as a consistent table (no header, duplicate
/// columns, ragged rows, invalid UTF-8) is reported as a malformed dataset
/// rather than treated as empty.
pub fn read_table(path: &Path) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_path(path)
        .map_err(|e| csv_error(path, e))?;

    let columns: Vec<String> = reader
        .headers()
        .map_err(|e| csv_error(path, e))?
        .iter()
        .map(str::to_string)
        .collect();
    if columns.iter().all(|c| c.is_empty()) {
        return Err(malformed(path, "empty header"));
    }

    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| csv_error(path, e))?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Table::from_parts(columns, rows).map_err(|e| malformed(path, e))
}

/// Replace the file at `path` with `table`, atomically
pub fn write_table(path: &Path, table: &Table) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    AtomicFile::new(path, OverwriteBehavior::AllowOverwrite)
        .write(|file| -> std::result::Result<(), csv::Error> {
            let mut writer = csv::WriterBuilder::new()
                .quote_style(csv::QuoteStyle::Necessary)
                .from_writer(file);
            writer.write_record(table.columns())?;
            for row in table.rows() {
                writer.write_record(row)?;
            }
            writer.flush()?;
            Ok(())
        })
        .map_err(|e| Error::Storage(format!("failed to write {:?}: {}", path, e)))
}

fn csv_error(path: &Path, err: csv::Error) -> Error {
    if err.is_io_error() {
        Error::Storage(format!("failed to read {:?}: {}", path, err))
    } else {
        malformed(path, err)
    }
}

fn malformed(path: &Path, reason: impl ToString) -> Error {
    Error::MalformedDataset {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}
