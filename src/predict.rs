use crate::input::{InputError, InputVector};
use crate::logistic_regression::{ClassProbabilities, LogisticRegression};
use crate::parse::Label;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub label: Label,
    pub probabilities: ClassProbabilities,
}

impl Prediction {
    /// Probability assigned to the predicted class.
    pub fn confidence(&self) -> f64 {
        self.probabilities.get(self.label)
    }

    pub fn confidence_percent(&self) -> f64 {
        self.confidence() * 100.0
    }
}

/// Fails with [`InputError::Unscorable`] when the input overflows the
/// decision function; such inputs have no meaningful probability.
pub fn predict(
    classifier: &LogisticRegression,
    input: &InputVector,
) -> Result<Prediction, InputError> {
    if !classifier.decision_function(input.values()).is_finite() {
        return Err(InputError::Unscorable);
    }

    let probabilities = classifier.predict_proba(input.values());
    let (label, _) = probabilities.argmax();

    Ok(Prediction {
        label,
        probabilities,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModelConfig;
    use crate::fixtures::synthetic_dataset;
    use crate::input::parse_input;
    use crate::parse::DIMENSIONS;
    use ndarray::Array1;
    use crate::preset::Preset;
    use crate::trainer::train;

    fn classifier() -> LogisticRegression {
        train(&synthetic_dataset(40, 11), &ModelConfig::default())
            .unwrap()
            .classifier
    }

    #[test]
    fn rock_example_is_a_rock() {
        let input = parse_input(Preset::Rock.text()).unwrap();
        assert_eq!(predict(&classifier(), &input).unwrap().label, Label::Rock);
    }

    #[test]
    fn mine_example_is_a_mine() {
        let input = parse_input(Preset::Mine.text()).unwrap();
        assert_eq!(predict(&classifier(), &input).unwrap().label, Label::Mine);
    }

    #[test]
    fn confidence_is_the_winning_probability() {
        let classifier = classifier();

        for preset in [Preset::Rock, Preset::Mine] {
            let prediction = predict(&classifier, &parse_input(preset.text()).unwrap()).unwrap();
            let confidence = prediction.confidence_percent();

            assert!((50.0..=100.0).contains(&confidence));
            assert!(prediction
                .probabilities
                .iter()
                .all(|(_, probability)| prediction.confidence() >= probability));
        }
    }

    #[test]
    fn overflowing_inputs_are_not_scored() {
        let huge = parse_input(&vec!["1.7e308"; DIMENSIONS].join(",")).unwrap();

        let mixed_signs = LogisticRegression::from_parts(
            (0..DIMENSIONS)
                .map(|i| if i % 2 == 0 { 2.0 } else { -2.0 })
                .collect(),
            0.0,
        );
        let same_sign = LogisticRegression::from_parts(Array1::from_elem(DIMENSIONS, 2.0), 0.0);

        assert_eq!(predict(&mixed_signs, &huge), Err(InputError::Unscorable));
        assert_eq!(predict(&same_sign, &huge), Err(InputError::Unscorable));
    }

    #[test]
    fn large_finite_margins_stay_within_bounds() {
        let classifier = LogisticRegression::from_parts(Array1::from_elem(DIMENSIONS, 1.0), 0.0);
        let input = parse_input(&vec!["1e6"; DIMENSIONS].join(",")).unwrap();

        let prediction = predict(&classifier, &input).unwrap();
        assert_eq!(prediction.label, Label::Rock);
        assert!((50.0..=100.0).contains(&prediction.confidence_percent()));
    }
}
