use crate::config::ModelConfig;
use crate::input::{InputError, InputVector};
use crate::logistic_regression::TrainingError;
use crate::parse::{self, Dataset, DatasetError};
use crate::predict::{predict, Prediction};
use crate::signature::{ClassSignatures, SignatureError};
use crate::trainer::{train, TrainedModel};
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error("training failed: {0}")]
    Training(#[from] TrainingError),

    #[error(transparent)]
    Signature(#[from] SignatureError),
}

/// Everything computed once at startup: the dataset, the fitted model and the
/// class signatures. Read-only for the rest of the process.
#[derive(Debug, Clone)]
pub struct AppContext {
    dataset: Dataset,
    model: TrainedModel,
    signatures: ClassSignatures,
}

impl AppContext {
    pub fn load(data_path: &Path, config: &ModelConfig) -> Result<Self, ContextError> {
        let dataset = parse::parse(data_path)?;
        Self::from_dataset(dataset, config)
    }

    pub fn from_dataset(dataset: Dataset, config: &ModelConfig) -> Result<Self, ContextError> {
        let signatures = ClassSignatures::compute(&dataset)?;
        let model = train(&dataset, config)?;

        Ok(Self {
            dataset,
            model,
            signatures,
        })
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn model(&self) -> &TrainedModel {
        &self.model
    }

    pub fn signatures(&self) -> &ClassSignatures {
        &self.signatures
    }

    pub fn predict(&self, input: &InputVector) -> Result<Prediction, InputError> {
        predict(&self.model.classifier, input)
    }
}
