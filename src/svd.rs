//! Economy-size singular value decomposition records.

use std::time::Instant;

use log::debug;
use ndarray::{s, Array1, Array2, ArrayView1, ArrayView2, Axis};

use crate::error::{DecompositionError, Result};
use crate::linalg_backends::BackendSVD;
use crate::matrix::MatrixShapeError;
use crate::truncate::Truncate;

/// Full SVD of a submitted matrix.
///
/// For an m×n `matrix` with k = min(m, n): `u` is m×k, `s` has k descending
/// non-negative entries, `vt` is k×n, and `matrix ≈ u · diag(s) · vt`.
#[derive(Debug, Clone)]
pub struct SvdRecord {
    matrix: Array2<f64>,
    u: Array2<f64>,
    s: Array1<f64>,
    vt: Array2<f64>,
}

impl SvdRecord {
    /// The original input, unmodified.
    pub fn matrix(&self) -> &Array2<f64> {
        &self.matrix
    }

    /// Left singular vectors, shape (m, k).
    pub fn u(&self) -> &Array2<f64> {
        &self.u
    }

    /// Singular values, descending.
    pub fn s(&self) -> &Array1<f64> {
        &self.s
    }

    /// Right singular vectors as rows, shape (k, n).
    pub fn vt(&self) -> &Array2<f64> {
        &self.vt
    }
}

/// Computes the economy SVD of `matrix`.
///
/// # Errors
/// `InvalidInput` if the matrix has no rows or no columns, `Backend` if the
/// linear algebra backend fails.
pub fn decompose<B: BackendSVD<f64>>(backend: &B, matrix: Array2<f64>) -> Result<SvdRecord> {
    let (n_rows, n_cols) = matrix.dim();
    if n_rows == 0 {
        return Err(MatrixShapeError::NoRows.into());
    }
    if n_cols == 0 {
        return Err(MatrixShapeError::EmptyRow { row: 0 }.into());
    }

    let start = Instant::now();
    let out = backend
        .svd_into(matrix.clone(), true, true)
        .map_err(|e| DecompositionError::Backend(format!("SVD of {}x{} matrix failed: {}", n_rows, n_cols, e)))?;
    let u = out.u.ok_or_else(|| DecompositionError::Backend("SVD did not return U".to_string()))?;
    let vt = out.vt.ok_or_else(|| DecompositionError::Backend("SVD did not return Vt".to_string()))?;
    debug!(
        "SVD of {}x{} matrix: {} singular values in {:?}",
        n_rows,
        n_cols,
        out.s.len(),
        start.elapsed()
    );

    Ok(SvdRecord { matrix, u, s: out.s, vt })
}

/// Rank-limited view of an [`SvdRecord`].
#[derive(Debug, Clone)]
pub struct SvdView<'a> {
    /// Original input, never truncated.
    pub matrix: ArrayView2<'a, f64>,
    /// Leading `rank` columns of U.
    pub u: ArrayView2<'a, f64>,
    /// Leading `rank` singular values.
    pub s: ArrayView1<'a, f64>,
    /// Leading `rank` rows of Vt.
    pub vt: ArrayView2<'a, f64>,
}

impl SvdView<'_> {
    pub fn rank(&self) -> usize {
        self.s.len()
    }

    /// Low-rank approximation `u · diag(s) · vt` of the original matrix.
    pub fn reconstruct(&self) -> Array2<f64> {
        let scaled_u = &self.u * &self.s.insert_axis(Axis(0));
        scaled_u.dot(&self.vt)
    }
}

impl Truncate for SvdRecord {
    type View<'a> = SvdView<'a>;

    fn natural_rank(&self) -> usize {
        self.s.len()
    }

    fn view_at(&self, rank: usize) -> SvdView<'_> {
        SvdView {
            matrix: self.matrix.view(),
            u: self.u.slice(s![.., ..rank]),
            s: self.s.slice(s![..rank]),
            vt: self.vt.slice(s![..rank, ..]),
        }
    }
}
