//! REST API request and response types.

use serde::{Deserialize, Serialize};

use crate::matrix::to_rows;
use crate::pca::{PcaView, RatioView};
use crate::store::RecordId;
use crate::svd::SvdView;

/// Query string of a retrieval request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankQuery {
    /// Requested rank. Absent or empty returns the full record.
    pub rank: Option<String>,
}

impl RankQuery {
    /// Builds the query from decoded key/value pairs. A repeated `rank` keeps its first value.
    #[must_use]
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let rank = pairs.into_iter().find(|(key, _)| key == "rank").map(|(_, value)| value);
        Self { rank }
    }
}

/// Response from a create operation.
#[derive(Debug, Clone, Serialize)]
pub struct CreateResponse {
    /// Identifier assigned to the new record.
    pub id: u64,
}

/// SVD record, possibly truncated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SvdResponse {
    pub id: u64,
    /// Original matrix, never truncated.
    pub matrix: Vec<Vec<f64>>,
    #[serde(rename = "U")]
    pub u: Vec<Vec<f64>>,
    #[serde(rename = "S")]
    pub s: Vec<f64>,
    #[serde(rename = "Vt")]
    pub vt: Vec<Vec<f64>>,
}

impl SvdResponse {
    #[must_use]
    pub fn from_view(id: RecordId, view: &SvdView<'_>) -> Self {
        Self {
            id: id.0,
            matrix: to_rows(&view.matrix),
            u: to_rows(&view.u),
            s: view.s.to_vec(),
            vt: to_rows(&view.vt),
        }
    }
}

/// Explained variance ratio as sent on the wire: a list, or the bare number `0`
/// when the data has zero total variance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RatioBody {
    Values(Vec<f64>),
    Scalar(u8),
}

impl From<RatioView<'_>> for RatioBody {
    fn from(view: RatioView<'_>) -> Self {
        match view {
            RatioView::PerComponent(ratios) => Self::Values(ratios.to_vec()),
            RatioView::ZeroTotalVariance => Self::Scalar(0),
        }
    }
}

/// PCA record, possibly truncated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PcaResponse {
    pub id: u64,
    /// Original matrix, never truncated.
    pub matrix: Vec<Vec<f64>>,
    /// Column means, never truncated.
    pub mean: Vec<f64>,
    pub components: Vec<Vec<f64>>,
    pub singular_values: Vec<f64>,
    pub explained_variance: Vec<f64>,
    pub explained_variance_ratio: RatioBody,
}

impl PcaResponse {
    #[must_use]
    pub fn from_view(id: RecordId, view: &PcaView<'_>) -> Self {
        Self {
            id: id.0,
            matrix: to_rows(&view.matrix),
            mean: view.mean.to_vec(),
            components: to_rows(&view.components),
            singular_values: view.singular_values.to_vec(),
            explained_variance: view.explained_variance.to_vec(),
            explained_variance_ratio: view.explained_variance_ratio.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_svd_response_uses_capitalized_factor_names() {
        let response = SvdResponse {
            id: 1,
            matrix: vec![vec![1.0]],
            u: vec![vec![1.0]],
            s: vec![1.0],
            vt: vec![vec![1.0]],
        };
        let json = serde_json::to_value(&response).unwrap();
        let object = json.as_object().unwrap();
        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["S", "U", "Vt", "id", "matrix"]);
    }

    #[test]
    fn test_ratio_body_serialization() {
        assert_eq!(
            serde_json::to_string(&RatioBody::Values(vec![0.75, 0.25])).unwrap(),
            "[0.75,0.25]"
        );
        assert_eq!(serde_json::to_string(&RatioBody::Scalar(0)).unwrap(), "0");
        assert_eq!(serde_json::from_str::<RatioBody>("0").unwrap(), RatioBody::Scalar(0));
    }

    #[test]
    fn test_rank_query_from_pairs() {
        assert_eq!(RankQuery::from_pairs(Vec::new()), RankQuery::default());

        let pairs = vec![
            ("other".to_string(), "x".to_string()),
            ("rank".to_string(), "1".to_string()),
            ("rank".to_string(), "2".to_string()),
        ];
        assert_eq!(RankQuery::from_pairs(pairs).rank.as_deref(), Some("1"));
    }
}
