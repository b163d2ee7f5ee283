use crate::parse::{Dataset, Label, DIMENSIONS};
use ndarray::{Array1, ArrayView1};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SignatureError {
    #[error("dataset has no {0} samples; cannot compute its mean signature")]
    MissingClass(Label),
}

/// Mean feature vector of each class, used as reference curves on the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassSignatures {
    rock: Vec<f64>,
    mine: Vec<f64>,
}

impl ClassSignatures {
    pub fn compute(dataset: &Dataset) -> Result<Self, SignatureError> {
        Ok(Self {
            rock: class_mean(dataset, Label::Rock)?,
            mine: class_mean(dataset, Label::Mine)?,
        })
    }

    pub fn mean(&self, label: Label) -> &[f64] {
        match label {
            Label::Rock => &self.rock,
            Label::Mine => &self.mine,
        }
    }
}

fn class_mean(dataset: &Dataset, label: Label) -> Result<Vec<f64>, SignatureError> {
    let mut sum = Array1::<f64>::zeros(DIMENSIONS);
    let mut count = 0usize;

    for sample in dataset.samples().iter().filter(|s| s.label == label) {
        sum += &ArrayView1::from(&sample.features);
        count += 1;
    }

    if count == 0 {
        return Err(SignatureError::MissingClass(label));
    }

    Ok((sum / count as f64).to_vec())
}
