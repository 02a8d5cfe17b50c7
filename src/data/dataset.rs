//! In-memory continuous dataset: named columns over a row-major sample.

use std::collections::HashSet;

use nalgebra::DMatrix;

use crate::domain::Node;
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq)]
pub struct DataSet {
    variables: Vec<Node>,
    /// `num_rows × num_columns`, column `j` belongs to `variables[j]`.
    data: DMatrix<f64>,
}

impl DataSet {
    /// Build a dataset, validating the variable list against the matrix shape.
    pub fn new(variables: Vec<Node>, data: DMatrix<f64>) -> Result<Self, AppError> {
        if variables.len() != data.ncols() {
            return Err(AppError::config(format!(
                "Dataset has {} variable names but {} columns.",
                variables.len(),
                data.ncols()
            )));
        }

        let mut seen = HashSet::with_capacity(variables.len());
        for v in &variables {
            if v.name().trim().is_empty() {
                return Err(AppError::config("Variable names must not be empty."));
            }
            if !seen.insert(v.name()) {
                return Err(AppError::config(format!("Duplicate variable name '{v}'.")));
            }
        }

        if let Some((idx, _)) = data.iter().enumerate().find(|(_, x)| !x.is_finite()) {
            // Column-major storage: recover (row, column) for the message.
            let row = idx % data.nrows().max(1);
            let col = idx / data.nrows().max(1);
            return Err(AppError::config(format!(
                "Non-finite value at row {} of column '{}'.",
                row + 1,
                variables[col]
            )));
        }

        Ok(Self { variables, data })
    }

    /// Build from row vectors; every row must have one value per variable.
    pub fn from_rows(variables: Vec<Node>, rows: &[Vec<f64>]) -> Result<Self, AppError> {
        let ncols = variables.len();
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != ncols) {
            return Err(AppError::config(format!(
                "Row {} has {} values, expected {ncols}.",
                i + 1,
                row.len()
            )));
        }
        let data = DMatrix::from_fn(rows.len(), ncols, |i, j| rows[i][j]);
        Self::new(variables, data)
    }

    pub fn variables(&self) -> &[Node] {
        &self.variables
    }

    pub fn num_rows(&self) -> usize {
        self.data.nrows()
    }

    pub fn num_columns(&self) -> usize {
        self.data.ncols()
    }

    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.data
    }

    pub fn variable(&self, name: &str) -> Option<&Node> {
        self.variables.iter().find(|v| v.name() == name)
    }

    pub fn column_index(&self, node: &Node) -> Option<usize> {
        self.variables.iter().position(|v| v == node)
    }

    pub fn value(&self, row: usize, column: usize) -> f64 {
        self.data[(row, column)]
    }

    /// New dataset holding the given rows (in the given order).
    pub fn select_rows(&self, rows: &[usize]) -> Result<Self, AppError> {
        if let Some(&bad) = rows.iter().find(|&&r| r >= self.num_rows()) {
            return Err(AppError::compute(format!(
                "Row index {bad} out of range for dataset with {} rows.",
                self.num_rows()
            )));
        }
        Ok(Self {
            variables: self.variables.clone(),
            data: self.data.select_rows(rows.iter()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(names: &[&str]) -> Vec<Node> {
        names.iter().map(|n| Node::new(*n)).collect()
    }

    #[test]
    fn from_rows_preserves_layout() {
        let data = DataSet::from_rows(names(&["a", "b"]), &[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(data.num_rows(), 2);
        assert_eq!(data.num_columns(), 2);
        assert_eq!(data.value(1, 0), 3.0);
        assert_eq!(data.column_index(&Node::new("b")), Some(1));
        assert!(data.variable("c").is_none());
    }

    #[test]
    fn rejects_ragged_rows_duplicates_and_nan() {
        assert!(DataSet::from_rows(names(&["a", "b"]), &[vec![1.0]]).is_err());
        assert!(DataSet::from_rows(names(&["a", "a"]), &[vec![1.0, 2.0]]).is_err());

        let err = DataSet::from_rows(names(&["a", "b"]), &[vec![1.0, 2.0], vec![1.0, f64::NAN]])
            .unwrap_err();
        assert!(err.message().contains("row 2"));
        assert!(err.message().contains("'b'"));
    }

    #[test]
    fn select_rows_copies_requested_rows() {
        let data = DataSet::from_rows(
            names(&["a"]),
            &[vec![10.0], vec![20.0], vec![30.0]],
        )
        .unwrap();
        let sub = data.select_rows(&[2, 0]).unwrap();
        assert_eq!(sub.num_rows(), 2);
        assert_eq!(sub.value(0, 0), 30.0);
        assert_eq!(sub.value(1, 0), 10.0);
        assert!(data.select_rows(&[3]).is_err());
    }
}
