//! Fitted encoder state reusable across calls

use crate::categorical::OneHotCategories;
use crate::error::PreprocessError;
use crate::label::LabelCodes;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything a call learns from its input.
///
/// Fitting on a training batch and passing the result to later inference
/// calls keeps the feature columns and label codes identical between them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodingVocabulary {
    /// One-hot categories per source column
    pub one_hot: Vec<OneHotCategories>,
    /// Label codes per encoded column
    pub labels: Vec<LabelCodes>,
    /// Value gaps in `TIME_ORDER` are filled with
    pub time_fill: f64,
}

impl EncodingVocabulary {
    /// Categories for a one-hot source column
    pub fn one_hot_for(&self, column: &str) -> Result<&OneHotCategories, PreprocessError> {
        self.one_hot
            .iter()
            .find(|c| c.column == column)
            .ok_or_else(|| PreprocessError::VocabularyMismatch(column.to_string()))
    }

    /// Codes for a label-encoded column
    pub fn labels_for(&self, column: &str) -> Result<&LabelCodes, PreprocessError> {
        self.labels
            .iter()
            .find(|c| c.column == column)
            .ok_or_else(|| PreprocessError::VocabularyMismatch(column.to_string()))
    }

    /// Names of every indicator column, in output order
    pub fn indicator_names(&self) -> Vec<String> {
        self.one_hot
            .iter()
            .flat_map(OneHotCategories::feature_names)
            .collect()
    }

    /// Serialize to compact bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, PreprocessError> {
        Ok(postcard::to_allocvec(self)?)
    }

    /// Deserialize from bytes, re-sorting categories and classes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PreprocessError> {
        let mut vocab: Self = postcard::from_bytes(bytes)?;
        vocab.one_hot.iter_mut().for_each(OneHotCategories::normalize);
        vocab.labels.iter_mut().for_each(LabelCodes::normalize);
        Ok(vocab)
    }

    /// Write the vocabulary to `path`
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), PreprocessError> {
        std::fs::write(path, self.to_bytes()?)?;
        Ok(())
    }

    /// Read a vocabulary written by [`save_to_file`](Self::save_to_file)
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, PreprocessError> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }
}
