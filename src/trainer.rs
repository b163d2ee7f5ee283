use crate::config::ModelConfig;
use crate::logistic_regression::{LogisticRegression, TrainingError};
use crate::metrics::accuracy;
use crate::parse::{Dataset, Label, Sample};
use crate::split::stratified_split;

/// Fitted classifier plus the accuracies measured right after fitting.
#[derive(Debug, Clone)]
pub struct TrainedModel {
    pub classifier: LogisticRegression,
    pub train_accuracy: f64,
    pub test_accuracy: f64,
    pub train_rows: usize,
    pub test_rows: usize,
}

pub fn train(dataset: &Dataset, config: &ModelConfig) -> Result<TrainedModel, TrainingError> {
    let split = stratified_split(dataset.samples(), config.test_ratio, config.seed);

    let mut classifier = LogisticRegression::new(
        config.regularization,
        config.max_iterations,
        config.tolerance,
    );
    let report = classifier.fit(&split.train)?;

    let train_accuracy = score(&classifier, &split.train)?;
    let test_accuracy = score(&classifier, &split.test)?;

    tracing::info!(
        train_rows = split.train.len(),
        test_rows = split.test.len(),
        iterations = report.iterations,
        train_accuracy,
        test_accuracy,
        "trained logistic regression"
    );

    Ok(TrainedModel {
        classifier,
        train_accuracy,
        test_accuracy,
        train_rows: split.train.len(),
        test_rows: split.test.len(),
    })
}

fn score(classifier: &LogisticRegression, samples: &[Sample]) -> Result<f64, TrainingError> {
    let predicted: Vec<Label> = samples
        .iter()
        .map(|s| classifier.predict(&s.features))
        .collect();
    let actual: Vec<Label> = samples.iter().map(|s| s.label).collect();

    accuracy(&predicted, &actual).ok_or(TrainingError::EmptyPartition)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::synthetic_dataset;
    use crate::parse::{Sample, DIMENSIONS};

    #[test]
    fn accuracies_are_fractions() {
        let dataset = synthetic_dataset(40, 5);
        let model = train(&dataset, &ModelConfig::default()).unwrap();

        assert!((0.0..=1.0).contains(&model.train_accuracy));
        assert!((0.0..=1.0).contains(&model.test_accuracy));
        assert!(model.train_accuracy > 0.9);
    }

    #[test]
    fn holds_out_a_tenth_of_the_rows() {
        let dataset = synthetic_dataset(40, 5);
        let model = train(&dataset, &ModelConfig::default()).unwrap();

        assert_eq!(model.test_rows, 8);
        assert_eq!(model.train_rows, 72);
    }

    #[test]
    fn training_is_deterministic() {
        let dataset = synthetic_dataset(30, 9);
        let config = ModelConfig::default();

        let first = train(&dataset, &config).unwrap();
        let second = train(&dataset, &config).unwrap();

        assert_eq!(first.classifier.weights(), second.classifier.weights());
        assert!((first.test_accuracy - second.test_accuracy).abs() < f64::EPSILON);
    }

    #[test]
    fn single_class_dataset_cannot_be_trained() {
        let dataset = Dataset::new(vec![
            Sample {
                features: [0.1; DIMENSIONS],
                label: Label::Rock,
            };
            10
        ]);

        assert_eq!(
            train(&dataset, &ModelConfig::default()).unwrap_err(),
            TrainingError::SingleClass(Label::Rock)
        );
    }
}
