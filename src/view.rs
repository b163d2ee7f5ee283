//! Pure mapping from UI state to what the page shows.
//!
//! The page holds no state of its own: every request carries the selected
//! preset, the current text and the triggered action, and [`render`] derives
//! the whole view from those plus the startup [`AppContext`].

use crate::chart::render_svg;
use crate::context::AppContext;
use crate::input::{parse_input, InputError};
use crate::parse::Label;
use crate::predict::Prediction;
use crate::preset::Preset;
use serde::Deserialize;

pub const MODEL_TYPE: &str = "Logistic Regression";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    #[default]
    None,
    /// Copy the selected preset into the input box.
    Load,
    Analyze,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UiState {
    pub preset: Preset,
    pub input: String,
    pub action: Action,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sidebar {
    pub model_type: &'static str,
    pub train_accuracy: f64,
    pub test_accuracy: f64,
    pub dataset_rows: usize,
    pub train_rows: usize,
    pub test_rows: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub prediction: Prediction,
    pub chart_svg: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// No text yet.
    Idle,
    /// Text present, analysis not requested.
    AwaitingAction,
    Result(Analysis),
    Rejected(InputError),
    /// The prediction succeeded but could not be displayed.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub sidebar: Sidebar,
    pub preset: Preset,
    pub input: String,
    pub outcome: Outcome,
}

pub fn render(context: &AppContext, state: &UiState) -> View {
    let input = match state.action {
        Action::Load => state.preset.text().to_owned(),
        Action::None | Action::Analyze => state.input.clone(),
    };

    let outcome = if input.trim().is_empty() {
        Outcome::Idle
    } else if state.action == Action::Analyze {
        analyze(context, &input)
    } else {
        Outcome::AwaitingAction
    };

    View {
        sidebar: sidebar(context),
        preset: state.preset,
        input,
        outcome,
    }
}

fn sidebar(context: &AppContext) -> Sidebar {
    let model = context.model();
    Sidebar {
        model_type: MODEL_TYPE,
        train_accuracy: model.train_accuracy,
        test_accuracy: model.test_accuracy,
        dataset_rows: context.dataset().len(),
        train_rows: model.train_rows,
        test_rows: model.test_rows,
    }
}

fn analyze(context: &AppContext, text: &str) -> Outcome {
    let (input, prediction) = match parse_input(text)
        .and_then(|input| context.predict(&input).map(|prediction| (input, prediction)))
    {
        Ok(scored) => scored,
        Err(err) => {
            tracing::debug!(%err, "rejected input");
            return Outcome::Rejected(err);
        }
    };

    tracing::debug!(
        label = %prediction.label,
        confidence = prediction.confidence(),
        "analyzed signal"
    );

    let signatures = context.signatures();
    match render_svg(
        input.values(),
        signatures.mean(Label::Rock),
        signatures.mean(Label::Mine),
    ) {
        Ok(chart_svg) => Outcome::Result(Analysis {
            prediction,
            chart_svg,
        }),
        Err(err) => {
            tracing::error!(%err, "chart rendering failed");
            Outcome::Failed(err.to_string())
        }
    }
}
