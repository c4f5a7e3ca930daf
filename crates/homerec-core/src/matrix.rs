//! Plain row/column-labeled matrix.
//!
//! Used for evidence observation tables (bins × actions) and confusion
//! matrices (actual × recommended). Presentation is left to the consumer.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledMatrix<T> {
    row_labels: Vec<String>,
    column_labels: Vec<String>,
    values: Vec<Vec<T>>,
}

impl<T: Clone + Default> LabeledMatrix<T> {
    /// Matrix filled with `T::default()`.
    pub fn zeros(row_labels: Vec<String>, column_labels: Vec<String>) -> Self {
        let values = vec![vec![T::default(); column_labels.len()]; row_labels.len()];
        Self {
            row_labels,
            column_labels,
            values,
        }
    }
}

impl<T> LabeledMatrix<T> {
    pub fn row_labels(&self) -> &[String] {
        &self.row_labels
    }

    pub fn column_labels(&self) -> &[String] {
        &self.column_labels
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.row_labels.len(), self.column_labels.len())
    }

    pub fn get(&self, row: usize, column: usize) -> Option<&T> {
        self.values.get(row)?.get(column)
    }

    pub fn get_mut(&mut self, row: usize, column: usize) -> Option<&mut T> {
        self.values.get_mut(row)?.get_mut(column)
    }

    /// Lookup by labels.
    pub fn at(&self, row: &str, column: &str) -> Option<&T> {
        let r = self.row_labels.iter().position(|l| l == row)?;
        let c = self.column_labels.iter().position(|l| l == column)?;
        self.get(r, c)
    }

    pub fn row(&self, row: usize) -> Option<&[T]> {
        self.values.get(row).map(Vec::as_slice)
    }

    pub fn rows(&self) -> impl Iterator<Item = (&str, &[T])> + '_ {
        self.row_labels
            .iter()
            .zip(&self.values)
            .map(|(l, r)| (l.as_str(), r.as_slice()))
    }
}
