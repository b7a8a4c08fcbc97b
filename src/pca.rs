// Principal component analysis (PCA) through the SVD of mean-centered data

use std::time::Instant;

use log::{debug, warn};
use ndarray::{s, Array1, Array2, ArrayView1, ArrayView2, Axis};

use crate::error::{DecompositionError, Result};
use crate::linalg_backends::BackendSVD;
use crate::matrix::MatrixShapeError;
use crate::truncate::Truncate;

/// Minimum number of samples (rows) for a sample variance to exist.
pub const MIN_SAMPLES: usize = 2;

/// Share of the total sample variance carried by each component.
#[derive(Debug, Clone, PartialEq)]
pub enum ExplainedVarianceRatio {
    /// One ratio per component, each in [0, 1].
    PerComponent(Array1<f64>),
    /// The centered data has zero total variance. Reported as the single scalar `0`
    /// rather than a per-component vector, and passed through truncation unchanged.
    ZeroTotalVariance,
}

impl ExplainedVarianceRatio {
    /// Sum of the per-component ratios, `0.0` when total variance is zero.
    pub fn total(&self) -> f64 {
        match self {
            Self::PerComponent(ratios) => ratios.sum(),
            Self::ZeroTotalVariance => 0.0,
        }
    }
}

/// Borrowed, possibly truncated explained variance ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RatioView<'a> {
    PerComponent(ArrayView1<'a, f64>),
    ZeroTotalVariance,
}

/// Full PCA of a submitted (n_samples × n_features) matrix.
#[derive(Debug, Clone)]
pub struct PcaRecord {
    /// Original input.
    matrix: Array2<f64>,
    /// Column means. Shape: (n_features)
    mean: Array1<f64>,
    /// Principal axes as unit-norm rows. Shape: (k, n_features), k = min(n_samples, n_features)
    components: Array2<f64>,
    /// Singular values of the centered matrix, descending. Shape: (k)
    singular_values: Array1<f64>,
    /// `singular_values^2 / (n_samples - 1)`. Shape: (k)
    explained_variance: Array1<f64>,
    explained_variance_ratio: ExplainedVarianceRatio,
}

impl PcaRecord {
    pub fn matrix(&self) -> &Array2<f64> {
        &self.matrix
    }

    pub fn mean(&self) -> &Array1<f64> {
        &self.mean
    }

    pub fn components(&self) -> &Array2<f64> {
        &self.components
    }

    pub fn singular_values(&self) -> &Array1<f64> {
        &self.singular_values
    }

    pub fn explained_variance(&self) -> &Array1<f64> {
        &self.explained_variance
    }

    pub fn explained_variance_ratio(&self) -> &ExplainedVarianceRatio {
        &self.explained_variance_ratio
    }
}

/// Fits PCA to `matrix` (rows are samples, columns are features).
///
/// The data is centered by its column means and decomposed with an economy SVD.
/// Component `i` explains `s_i^2 / (n_samples - 1)` of variance; ratios divide by the
/// sum of the per-feature sample variances (ddof = 1) of the centered data.
///
/// # Errors
/// `InvalidInput` if there are fewer than two samples or no features, `Backend`
/// if the SVD fails.
pub fn fit_pca<B: BackendSVD<f64>>(backend: &B, matrix: Array2<f64>) -> Result<PcaRecord> {
    let (n_samples, n_features) = matrix.dim();
    if n_samples < MIN_SAMPLES {
        return Err(MatrixShapeError::TooFewRows {
            required: MIN_SAMPLES,
            found: n_samples,
        }
        .into());
    }
    if n_features == 0 {
        return Err(MatrixShapeError::EmptyRow { row: 0 }.into());
    }

    let start = Instant::now();
    let mean = matrix
        .mean_axis(Axis(0))
        .ok_or(MatrixShapeError::NoRows)?;
    let mut centered = matrix.clone();
    centered -= &mean;

    let total_variance = centered.var_axis(Axis(0), 1.0).sum();

    let out = backend
        .svd_into(centered, false, true)
        .map_err(|e| {
            DecompositionError::Backend(format!(
                "SVD of centered {}x{} matrix failed: {}",
                n_samples, n_features, e
            ))
        })?;
    let components = out
        .vt
        .ok_or_else(|| DecompositionError::Backend("SVD did not return Vt".to_string()))?;
    let singular_values = out.s;

    let dof = (n_samples - 1) as f64;
    let explained_variance = singular_values.mapv(|s_val| s_val.powi(2) / dof);
    let explained_variance_ratio = if total_variance > 0.0 {
        ExplainedVarianceRatio::PerComponent(&explained_variance / total_variance)
    } else {
        warn!(
            "Centered {}x{} matrix has zero total variance; explained variance ratio is reported as 0",
            n_samples, n_features
        );
        ExplainedVarianceRatio::ZeroTotalVariance
    };

    debug!(
        "PCA of {}x{} matrix: {} components, total variance {:.6e}, in {:?}",
        n_samples,
        n_features,
        singular_values.len(),
        total_variance,
        start.elapsed()
    );

    Ok(PcaRecord {
        matrix,
        mean,
        components,
        singular_values,
        explained_variance,
        explained_variance_ratio,
    })
}

/// Rank-limited view of a [`PcaRecord`].
#[derive(Debug, Clone)]
pub struct PcaView<'a> {
    pub matrix: ArrayView2<'a, f64>,
    pub mean: ArrayView1<'a, f64>,
    pub components: ArrayView2<'a, f64>,
    pub singular_values: ArrayView1<'a, f64>,
    pub explained_variance: ArrayView1<'a, f64>,
    pub explained_variance_ratio: RatioView<'a>,
}

impl PcaView<'_> {
    pub fn rank(&self) -> usize {
        self.singular_values.len()
    }
}

impl Truncate for PcaRecord {
    type View<'a> = PcaView<'a>;

    fn natural_rank(&self) -> usize {
        self.singular_values.len()
    }

    fn view_at(&self, rank: usize) -> PcaView<'_> {
        let explained_variance_ratio = match &self.explained_variance_ratio {
            ExplainedVarianceRatio::PerComponent(ratios) => {
                RatioView::PerComponent(ratios.slice(s![..rank]))
            }
            ExplainedVarianceRatio::ZeroTotalVariance => RatioView::ZeroTotalVariance,
        };
        PcaView {
            matrix: self.matrix.view(),
            mean: self.mean.view(),
            components: self.components.slice(s![..rank, ..]),
            singular_values: self.singular_values.slice(s![..rank]),
            explained_variance: self.explained_variance.slice(s![..rank]),
            explained_variance_ratio,
        }
    }
}
