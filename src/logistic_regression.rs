use crate::parse::{Label, Sample, DIMENSIONS};
use nalgebra::{DMatrix, DVector};
use ndarray::{Array1, Array2, ArrayView1, Axis, Slice};

const FEATURES_WITH_BIAS_DIMENSION: usize = DIMENSIONS + 1;
const MAX_LINE_SEARCH_HALVINGS: usize = 30;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TrainingError {
    #[error("cannot fit a classifier on an empty partition")]
    EmptyPartition,

    #[error("training data only contains {0} samples; both classes are required")]
    SingleClass(Label),

    #[error("hessian is singular; training data is degenerate")]
    SingularHessian,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitReport {
    pub iterations: usize,
    pub converged: bool,
}

/// Probability mass per class, keyed by label rather than by position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassProbabilities {
    entries: [(Label, f64); 2],
}

impl ClassProbabilities {
    pub fn get(&self, label: Label) -> f64 {
        self.entries
            .iter()
            .find(|(entry_label, _)| *entry_label == label)
            .map_or(0.0, |&(_, probability)| probability)
    }

    /// Highest-probability class. Ties go to the first class in model order.
    pub fn argmax(&self) -> (Label, f64) {
        let [first, second] = self.entries;
        if second.1 > first.1 {
            second
        } else {
            first
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Label, f64)> + '_ {
        self.entries.iter().copied()
    }
}

/// L2-regularised logistic regression with an unpenalised intercept.
///
/// Minimises `0.5 * |w|^2 + C * sum(logloss)` with damped Newton steps.
/// `classes[1]` is the positive class, the one the sigmoid scores.
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    weights: Array1<f64>,
    bias: f64,
    classes: [Label; 2],
    regularization: f64,
    max_iterations: usize,
    tolerance: f64,
}

impl LogisticRegression {
    pub fn new(regularization: f64, max_iterations: usize, tolerance: f64) -> Self {
        Self {
            weights: Array1::zeros(DIMENSIONS),
            bias: 0.0,
            classes: Label::ALL,
            regularization,
            max_iterations,
            tolerance,
        }
    }

    #[cfg(test)]
    pub(crate) fn from_parts(weights: Array1<f64>, bias: f64) -> Self {
        Self {
            weights,
            bias,
            ..Self::new(1.0, 100, 1e-6)
        }
    }

    pub fn weights(&self) -> &Array1<f64> {
        &self.weights
    }

    /// Class order of the fitted model, sorted by label code.
    pub fn classes(&self) -> [Label; 2] {
        self.classes
    }

    pub fn fit(&mut self, samples: &[Sample]) -> Result<FitReport, TrainingError> {
        self.classes = classes_of(samples)?;

        let (features, targets) = self.design_matrix(samples);

        // theta[0] is the intercept
        let mut theta = Array1::<f64>::zeros(FEATURES_WITH_BIAS_DIMENSION);
        let mut objective = self.objective(&features, &targets, &theta);
        let mut report = FitReport {
            iterations: 0,
            converged: false,
        };

        for iteration in 1..=self.max_iterations {
            report.iterations = iteration;

            let probabilities = features.dot(&theta).mapv(sigmoid);
            let gradient = self.gradient(&features, &targets, &probabilities, &theta);
            let hessian = self.hessian(&features, &probabilities);
            let direction = solve(hessian, &gradient)?;

            if direction.dot(&direction).sqrt() < self.tolerance {
                theta = &theta - &direction;
                report.converged = true;
                break;
            }

            let Some((candidate, candidate_objective)) =
                backtrack(&theta, &direction, objective, |candidate| {
                    self.objective(&features, &targets, candidate)
                })
            else {
                tracing::debug!(iteration, "line search found no descent step");
                break;
            };

            let step_norm = (&candidate - &theta).mapv(|d| d * d).sum().sqrt();
            theta = candidate;
            objective = candidate_objective;

            if step_norm < self.tolerance {
                report.converged = true;
                break;
            }
        }

        self.bias = theta[0];
        self.weights = theta.slice_axis(Axis(0), Slice::from(1..)).to_owned();

        if !report.converged {
            tracing::warn!(
                iterations = report.iterations,
                "logistic regression stopped before converging"
            );
        }

        Ok(report)
    }

    pub fn decision_function(&self, features: &[f64; DIMENSIONS]) -> f64 {
        ArrayView1::from(features).dot(&self.weights) + self.bias
    }

    pub fn predict_proba(&self, features: &[f64; DIMENSIONS]) -> ClassProbabilities {
        let positive = sigmoid(self.decision_function(features));
        let [negative_class, positive_class] = self.classes;

        ClassProbabilities {
            entries: [(negative_class, 1.0 - positive), (positive_class, positive)],
        }
    }

    pub fn predict(&self, features: &[f64; DIMENSIONS]) -> Label {
        self.predict_proba(features).argmax().0
    }

    fn design_matrix(&self, samples: &[Sample]) -> (Array2<f64>, Array1<f64>) {
        let mut features = Array2::zeros((samples.len(), FEATURES_WITH_BIAS_DIMENSION));
        let mut targets = Array1::zeros(samples.len());

        for (i, sample) in samples.iter().enumerate() {
            features[(i, 0)] = 1.0;

            for (j, &feature) in sample.features.iter().enumerate() {
                features[(i, j + 1)] = feature;
            }

            if sample.label == self.classes[1] {
                targets[i] = 1.0;
            }
        }

        (features, targets)
    }

    fn objective(&self, features: &Array2<f64>, targets: &Array1<f64>, theta: &Array1<f64>) -> f64 {
        let margins = features.dot(theta);
        let log_loss: f64 = margins
            .iter()
            .zip(targets)
            .map(|(&z, &y)| softplus(z) - y * z)
            .sum();

        let penalty = theta.slice_axis(Axis(0), Slice::from(1..)).mapv(|w| w * w).sum();

        0.5 * penalty + self.regularization * log_loss
    }

    fn gradient(
        &self,
        features: &Array2<f64>,
        targets: &Array1<f64>,
        probabilities: &Array1<f64>,
        theta: &Array1<f64>,
    ) -> Array1<f64> {
        let residuals = probabilities - targets;
        let mut gradient = features.t().dot(&residuals) * self.regularization;

        gradient
            .slice_axis_mut(Axis(0), Slice::from(1..))
            .zip_mut_with(&theta.slice_axis(Axis(0), Slice::from(1..)), |g, &w| *g += w);

        gradient
    }

    fn hessian(&self, features: &Array2<f64>, probabilities: &Array1<f64>) -> Array2<f64> {
        let curvature = probabilities.mapv(|p| p * (1.0 - p));
        let weighted = features * &curvature.view().insert_axis(Axis(1));

        let mut hessian = features.t().dot(&weighted) * self.regularization;
        for i in 1..FEATURES_WITH_BIAS_DIMENSION {
            hessian[(i, i)] += 1.0;
        }

        hessian
    }
}

fn classes_of(samples: &[Sample]) -> Result<[Label; 2], TrainingError> {
    let mut labels: Vec<Label> = samples.iter().map(|s| s.label).collect();
    labels.sort_unstable();
    labels.dedup();

    match labels.as_slice() {
        [] => Err(TrainingError::EmptyPartition),
        [only] => Err(TrainingError::SingleClass(*only)),
        [first, second, ..] => Ok([*first, *second]),
    }
}

/// Halves the Newton step until the objective stops increasing. `None` when
/// no tried step improves on `objective`.
fn backtrack(
    theta: &Array1<f64>,
    direction: &Array1<f64>,
    objective: f64,
    evaluate: impl Fn(&Array1<f64>) -> f64,
) -> Option<(Array1<f64>, f64)> {
    let mut step_size = 1.0;
    for _ in 0..=MAX_LINE_SEARCH_HALVINGS {
        let candidate = theta - &(direction * step_size);
        let candidate_objective = evaluate(&candidate);
        if candidate_objective <= objective {
            return Some((candidate, candidate_objective));
        }
        step_size /= 2.0;
    }
    None
}

fn solve(hessian: Array2<f64>, gradient: &Array1<f64>) -> Result<Array1<f64>, TrainingError> {
    let dimension = gradient.len();
    let hessian = DMatrix::from_row_iterator(dimension, dimension, hessian.iter().copied());
    let gradient = DVector::from_iterator(dimension, gradient.iter().copied());

    let direction = match hessian.clone().cholesky() {
        Some(cholesky) => cholesky.solve(&gradient),
        None => hessian
            .try_inverse()
            .map(|inverse| inverse * gradient)
            .ok_or(TrainingError::SingularHessian)?,
    };

    Ok(Array1::from(direction.as_slice().to_vec()))
}

pub fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

fn softplus(z: f64) -> f64 {
    if z > 0.0 {
        z + (-z).exp().ln_1p()
    } else {
        z.exp().ln_1p()
    }
}
