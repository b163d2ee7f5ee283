use crate::parse::Label;

/// Fraction of matching labels, in `[0, 1]`.
///
/// `None` when there is nothing to score or the slices disagree in length.
pub fn accuracy(predicted: &[Label], actual: &[Label]) -> Option<f64> {
    if predicted.is_empty() || predicted.len() != actual.len() {
        return None;
    }

    let correct_predictions = predicted
        .iter()
        .zip(actual)
        .filter(|(prediction, label)| prediction == label)
        .count();

    Some(correct_predictions as f64 / predicted.len() as f64)
}
