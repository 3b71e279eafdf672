use std::collections::HashSet;

use crate::error::{Result, XpsError};

#[derive(Debug, Clone, PartialEq)]
/// A named column of numerical data.
pub struct Column {
    name: String,
    values: Vec<f64>,
}

impl Column {
    pub fn new<S: Into<String>>(name: S, values: Vec<f64>) -> Self {
        Column {
            name: name.into(),
            values,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

#[derive(Debug, Clone, PartialEq)]
/// An ordered set of equal-length named columns sharing one numerical index.
///
/// The index holds the binding energies of a measurement and is kept apart
/// from the data columns: it is never renamed, subtracted or normalized.
pub struct Table {
    index: Vec<f64>,
    columns: Vec<Column>,
}

impl Table {
    /// Creates a Table, checking that column names are unique and that every
    /// column has as many rows as the index.
    pub fn new(index: Vec<f64>, columns: Vec<Column>) -> Result<Self> {
        let mut seen = HashSet::new();
        for column in &columns {
            if column.values.len() != index.len() {
                return Err(XpsError::InconsistentLength {
                    name: column.name.clone(),
                    expected: index.len(),
                    got: column.values.len(),
                });
            }
            if !seen.insert(column.name.as_str()) {
                return Err(XpsError::DuplicateColumn(column.name.clone()));
            }
        }
        Ok(Table { index, columns })
    }

    /// Values of the index (binding energies).
    pub fn index(&self) -> &[f64] {
        &self.index
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Number of data columns (the index is not counted).
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column names in table order.
    pub fn names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    /// Values of the column called `name`.
    pub fn column(&self, name: &str) -> Result<&[f64]> {
        let position = self.position(name)?;
        Ok(&self.columns[position].values)
    }

    /// Fails with the first name in `names` that is not a column.
    pub fn check_columns<S: AsRef<str>>(&self, names: &[S]) -> Result<()> {
        for name in names {
            self.position(name.as_ref())?;
        }
        Ok(())
    }

    fn position(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| XpsError::UnknownColumn {
                name: name.to_owned(),
                available: self.columns.iter().map(|c| c.name.clone()).collect(),
            })
    }

    /// Renames column `old` as `new`.
    pub fn rename(&mut self, old: &str, new: &str) -> Result<()> {
        let position = self.position(old)?;
        if old != new && self.contains(new) {
            return Err(XpsError::DuplicateColumn(new.to_owned()));
        }
        self.columns[position].name = new.to_owned();
        Ok(())
    }

    /// Renames columns by position.  An empty name keeps the current one and
    /// trailing columns without a name are left untouched.  Nothing is renamed
    /// if the resulting names would not be unique.
    pub fn rename_all<S: AsRef<str>>(&mut self, names: &[S]) -> Result<()> {
        if names.len() > self.columns.len() {
            return Err(XpsError::ArgumentCountMismatch {
                expected: self.columns.len(),
                got: names.len(),
            });
        }
        let mut renamed: Vec<String> = self.columns.iter().map(|c| c.name.clone()).collect();
        for (slot, name) in renamed.iter_mut().zip(names) {
            if !name.as_ref().is_empty() {
                *slot = name.as_ref().to_owned();
            }
        }
        let mut seen = HashSet::new();
        for name in &renamed {
            if !seen.insert(name.as_str()) {
                return Err(XpsError::DuplicateColumn(name.clone()));
            }
        }
        for (column, name) in self.columns.iter_mut().zip(renamed) {
            column.name = name;
        }
        Ok(())
    }

    /// Subtracts, row by row, the values of column `name` from every column
    /// (including itself).
    pub fn subtract(&mut self, name: &str) -> Result<()> {
        let reference = self.columns[self.position(name)?].values.clone();
        for column in self.columns.iter_mut() {
            for (value, bg) in column.values.iter_mut().zip(&reference) {
                *value -= bg;
            }
        }
        Ok(())
    }

    /// Maps every value of every column through `(v - min) / (max - min)`,
    /// where `min` and `max` are those of column `name`.
    pub fn normalize(&mut self, name: &str) -> Result<()> {
        let reference = &self.columns[self.position(name)?].values;
        let min = reference.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = reference.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let range = max - min;
        if range == 0.0 || !range.is_finite() {
            return Err(XpsError::DivideByZero {
                column: name.to_owned(),
                value: min,
            });
        }
        for column in self.columns.iter_mut() {
            for value in column.values.iter_mut() {
                *value = (*value - min) / range;
            }
        }
        Ok(())
    }
}
