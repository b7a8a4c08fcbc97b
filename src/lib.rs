// Truncated singular value decomposition and principal component analysis services

#![doc = include_str!("../README.md")]

pub mod config;
pub mod error;
pub mod linalg_backends;
pub mod matrix;
pub mod pca;
pub mod rank;
pub mod rest;
pub mod store;
pub mod svd;
pub mod truncate;


pub use config::ServerConfig;
pub use error::{DecompositionError, Result};
pub use pca::{fit_pca, ExplainedVarianceRatio, PcaRecord, PcaView};
pub use store::{RecordId, RecordStore};
pub use svd::{decompose, SvdRecord, SvdView};
pub use truncate::Truncate;
