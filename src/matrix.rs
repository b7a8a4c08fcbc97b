//! Parsing of submitted JSON matrices into `Array2<f64>`.

use ndarray::Array2;
use serde_json::Value;
use thiserror::Error;

/// Ways a submitted value can fail to be a rectangular 2D numeric matrix.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum MatrixShapeError {
    /// No `matrix` value was supplied.
    #[error("you must provide a \"matrix\" as a 2D list")]
    Missing,

    /// The value is not a JSON list.
    #[error("the matrix must be a 2D list, got a non-list value")]
    NotAList,

    /// The list has no rows.
    #[error("the matrix must be a 2D list with at least one row")]
    NoRows,

    /// A row has no values.
    #[error("the matrix must be a 2D list, row {row} is empty")]
    EmptyRow { row: usize },

    /// The value is a list but not a list of lists of numbers (1D or 3D and deeper).
    #[error("the matrix must be a 2D list, row {row} is not a list of numbers")]
    NotTwoDimensional { row: usize },

    /// Rows have different lengths.
    #[error("the matrix must be a 2D list with rows of equal length, row {row} has {found} values but row 0 has {expected}")]
    RaggedRows { row: usize, expected: usize, found: usize },

    /// An entry is not a number.
    #[error("the matrix must be a 2D list of numbers, entry [{row}][{col}] is not numeric")]
    NonNumeric { row: usize, col: usize },

    /// Fewer rows than the analysis needs.
    #[error("need at least {required} samples (rows), got {found}")]
    TooFewRows { required: usize, found: usize },
}

/// Parses the `matrix` member of a request body.
///
/// Accepts a non-empty list of equally long, non-empty lists of JSON numbers.
/// Integers are widened to `f64`.
pub fn parse_matrix(value: Option<&Value>) -> Result<Array2<f64>, MatrixShapeError> {
    let rows = match value {
        None | Some(Value::Null) => return Err(MatrixShapeError::Missing),
        Some(Value::Array(rows)) => rows,
        Some(_) => return Err(MatrixShapeError::NotAList),
    };
    if rows.is_empty() {
        return Err(MatrixShapeError::NoRows);
    }

    let mut n_cols = None;
    let mut data = Vec::new();
    for (row_idx, row) in rows.iter().enumerate() {
        let entries = row
            .as_array()
            .ok_or(MatrixShapeError::NotTwoDimensional { row: row_idx })?;
        if entries.is_empty() {
            return Err(MatrixShapeError::EmptyRow { row: row_idx });
        }
        let expected = *n_cols.get_or_insert(entries.len());
        if entries.len() != expected {
            return Err(MatrixShapeError::RaggedRows {
                row: row_idx,
                expected,
                found: entries.len(),
            });
        }
        for (col_idx, entry) in entries.iter().enumerate() {
            match entry {
                Value::Number(n) => data.push(
                    n.as_f64()
                        .ok_or(MatrixShapeError::NonNumeric { row: row_idx, col: col_idx })?,
                ),
                Value::Array(_) => {
                    return Err(MatrixShapeError::NotTwoDimensional { row: row_idx })
                }
                _ => return Err(MatrixShapeError::NonNumeric { row: row_idx, col: col_idx }),
            }
        }
    }

    let n_cols = n_cols.unwrap_or(0);
    Array2::from_shape_vec((rows.len(), n_cols), data)
        .map_err(|_| MatrixShapeError::NotTwoDimensional { row: 0 })
}

/// Converts a 2D array into nested row vectors for JSON output.
pub fn to_rows<S>(array: &ndarray::ArrayBase<S, ndarray::Ix2>) -> Vec<Vec<f64>>
where
    S: ndarray::Data<Elem = f64>,
{
    array.rows().into_iter().map(|row| row.to_vec()).collect()
}
