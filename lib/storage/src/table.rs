//! In-memory view of a CSV dataset
//!
//! Columns are append-stable: a migration only ever adds columns on the
//! right and backfills existing rows with an empty string.

use rowgate_core::{Error, Result, Row};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Build a table, checking the header and every row width
    pub fn from_parts(columns: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        for (i, name) in columns.iter().enumerate() {
            if columns[..i].contains(name) {
                return Err(Error::RowShape(format!("duplicate column '{}'", name)));
            }
        }
        for (i, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(Error::RowShape(format!(
                    "row {} has {} values, header has {} columns",
                    i + 1,
                    row.len(),
                    columns.len()
                )));
            }
        }
        Ok(Self { columns, rows })
    }

    #[inline]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[inline]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[inline]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Values of one column in file order, or `None` if the column is absent
    pub fn column_values<'a>(&'a self, name: &str) -> Option<impl Iterator<Item = &'a str> + 'a> {
        let index = self.column_index(name)?;
        Some(self.rows.iter().map(move |row| row[index].as_str()))
    }

    /// Value at a 1-based row index
    pub fn value(&self, row_index: usize, column: &str) -> Option<&str> {
        let col = self.column_index(column)?;
        let row = self.rows.get(row_index.checked_sub(1)?)?;
        Some(row[col].as_str())
    }

    /// Add every key not yet in the schema as a new rightmost column
    ///
    /// Existing rows get an empty string for each new column. Returns the
    /// added column names in the order they were added.
    pub fn migrate<'k, I>(&mut self, keys: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'k str>,
    {
        let mut added = Vec::new();
        for key in keys {
            if self.column_index(key).is_none() {
                self.columns.push(key.to_string());
                added.push(key.to_string());
            }
        }
        if !added.is_empty() {
            for row in &mut self.rows {
                row.resize(self.columns.len(), String::new());
            }
        }
        added
    }

    /// Append a row whose keys are all known columns
    ///
    /// Columns the row does not mention are stored as empty strings. Returns
    /// the 1-based index of the new row.
    pub fn push_row(&mut self, row: &Row) -> Result<usize> {
        if let Some(unknown) = row.keys().find(|k| self.column_index(k).is_none()) {
            return Err(Error::RowShape(format!(
                "column '{}' is not in the dataset schema",
                unknown
            )));
        }
        let values = self
            .columns
            .iter()
            .map(|c| row.get(c).unwrap_or_default().to_string())
            .collect();
        self.rows.push(values);
        Ok(self.rows.len())
    }
}
