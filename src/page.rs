use crate::input::InputError;
use crate::parse::Label;
use crate::preset::Preset;
use crate::view::{Analysis, Outcome, View};
use std::fmt::{self, Display, Formatter};

/// HTML rendering of a [`View`]; `to_string()` yields the full document.
pub struct Page<'a>(pub &'a View);

struct Escaped<'a>(&'a str);

impl Display for Escaped<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for c in self.0.chars() {
            match c {
                '&' => f.write_str("&amp;")?,
                '<' => f.write_str("&lt;")?,
                '>' => f.write_str("&gt;")?,
                '"' => f.write_str("&quot;")?,
                '\'' => f.write_str("&#39;")?,
                c => write!(f, "{c}")?,
            }
        }
        Ok(())
    }
}

const STYLE: &str = "body{font-family:sans-serif;margin:0;display:flex}\
aside{width:18rem;padding:1rem;background:#f0f2f6;min-height:100vh}\
main{flex:1;padding:1rem 2rem}\
.columns{display:flex;gap:2rem}.left{flex:1}.right{flex:2}\
textarea{width:100%;height:12rem}\
.banner{padding:1rem;border-radius:.5rem;font-size:1.4rem;font-weight:bold}\
.rock{background:#d4edda;color:#155724}.mine{background:#f8d7da;color:#721c24}\
.info{background:#d1ecf1;padding:1rem}.warning{background:#fff3cd;padding:1rem}\
.error{background:#f8d7da;padding:1rem}.metric{font-size:2rem}";

impl Display for Page<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let view = self.0;

        writeln!(f, "<!DOCTYPE html>")?;
        writeln!(f, "<html lang=\"en\"><head><meta charset=\"utf-8\">")?;
        writeln!(f, "<title>Sonar Rock vs Mine</title><style>{STYLE}</style></head>")?;
        writeln!(f, "<body><form method=\"post\" action=\"/\">")?;

        write_sidebar(f, view)?;

        writeln!(f, "<main><h1>Sonar predictor: Rock or Mine?</h1>")?;
        writeln!(
            f,
            "<p>Classifies sonar echoes. Mines and rocks have different frequency signatures.</p>"
        )?;
        writeln!(f, "<div class=\"columns\"><section class=\"left\">")?;
        writeln!(f, "<h2>1. Data input</h2>")?;
        writeln!(f, "<p>Enter the 60 frequency values, separated by commas.</p>")?;
        writeln!(
            f,
            "<textarea name=\"input\">{}</textarea>",
            Escaped(&view.input)
        )?;
        writeln!(
            f,
            "<button type=\"submit\" name=\"action\" value=\"analyze\">Run analysis</button>"
        )?;
        writeln!(f, "</section><section class=\"right\">")?;
        writeln!(f, "<h2>2. Analysis &amp; visualization</h2>")?;

        write_outcome(f, &view.outcome)?;

        writeln!(f, "</section></div></main></form></body></html>")
    }
}

fn write_sidebar(f: &mut Formatter<'_>, view: &View) -> fmt::Result {
    let sidebar = &view.sidebar;

    writeln!(f, "<aside><h2>About the model</h2>")?;
    writeln!(f, "<p><b>Type:</b> {}</p>", sidebar.model_type)?;
    writeln!(
        f,
        "<p><b>Accuracy (train):</b> {:.2}%</p>",
        sidebar.train_accuracy * 100.0
    )?;
    writeln!(
        f,
        "<p><b>Accuracy (test):</b> {:.2}%</p>",
        sidebar.test_accuracy * 100.0
    )?;
    writeln!(
        f,
        "<p>{} samples ({} train / {} test)</p><hr>",
        sidebar.dataset_rows, sidebar.train_rows, sidebar.test_rows
    )?;
    writeln!(
        f,
        "<p>Demonstration of underwater object detection from sonar frequencies.</p>"
    )?;
    writeln!(f, "<h3>Quick test</h3><fieldset><legend>Choose an example:</legend>")?;

    for preset in Preset::ALL {
        let checked = if preset == view.preset { " checked" } else { "" };
        writeln!(
            f,
            "<label><input type=\"radio\" name=\"preset\" value=\"{}\"{checked}> {}</label><br>",
            preset.key(),
            preset.title()
        )?;
    }

    writeln!(
        f,
        "</fieldset><button type=\"submit\" name=\"action\" value=\"load\">Load example</button></aside>"
    )
}

fn write_outcome(f: &mut Formatter<'_>, outcome: &Outcome) -> fmt::Result {
    match outcome {
        Outcome::Idle => writeln!(
            f,
            "<div class=\"info\">Waiting for data in the input panel.</div>"
        ),
        Outcome::AwaitingAction => Ok(()),
        Outcome::Result(analysis) => write_analysis(f, analysis),
        Outcome::Rejected(err @ InputError::Format { .. }) => {
            writeln!(f, "<div class=\"warning\">{}</div>", Escaped(&err.to_string()))
        }
        Outcome::Rejected(err) => {
            writeln!(f, "<div class=\"error\">Error: {}.</div>", Escaped(&err.to_string()))
        }
        Outcome::Failed(message) => {
            writeln!(f, "<div class=\"error\">{}</div>", Escaped(message))
        }
    }
}

fn write_analysis(f: &mut Formatter<'_>, analysis: &Analysis) -> fmt::Result {
    let label = analysis.prediction.label;
    let class = match label {
        Label::Rock => "rock",
        Label::Mine => "mine",
    };

    writeln!(
        f,
        "<div class=\"banner {class}\">Result: {}</div>",
        label.to_string().to_uppercase()
    )?;
    writeln!(
        f,
        "<p>Model confidence</p><p class=\"metric\">{:.1}% sure</p>",
        analysis.prediction.confidence_percent()
    )?;
    writeln!(f, "<h4>Signal comparison</h4>")?;
    writeln!(
        f,
        "<p>Your input compared with the mean signature of mines and rocks.</p>"
    )?;
    writeln!(f, "{}", analysis.chart_svg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModelConfig;
    use crate::context::AppContext;
    use crate::fixtures::synthetic_dataset;
    use crate::view::{render, Action, UiState};

    fn html(state: &UiState) -> String {
        let context =
            AppContext::from_dataset(synthetic_dataset(30, 2), &ModelConfig::default()).unwrap();
        Page(&render(&context, state)).to_string()
    }

    #[test]
    fn idle_page_prompts_for_data() {
        let page = html(&UiState::default());

        assert!(page.contains("Waiting for data"));
        assert!(page.contains("Logistic Regression"));
        assert!(page.contains("value=\"none\" checked"));
    }

    #[test]
    fn result_page_shows_banner_confidence_and_chart() {
        let page = html(&UiState {
            preset: Preset::Mine,
            input: Preset::Mine.text().to_owned(),
            action: Action::Analyze,
        });

        assert!(page.contains("banner mine"));
        assert!(page.contains("Result: MINE"));
        assert!(page.contains("% sure"));
        assert!(page.contains("<svg"));
    }

    #[test]
    fn length_error_names_the_counts() {
        let page = html(&UiState {
            input: "1, 2".to_owned(),
            action: Action::Analyze,
            ..UiState::default()
        });

        assert!(page.contains("expected 60 values, got 2"));
        assert!(!page.contains("<svg"));
    }

    #[test]
    fn user_text_is_escaped() {
        let page = html(&UiState {
            input: "</textarea><script>alert(1)</script>".to_owned(),
            ..UiState::default()
        });

        assert!(!page.contains("<script>"));
        assert!(page.contains("&lt;script&gt;"));
    }

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            Escaped("a<b & \"c\"").to_string(),
            "a&lt;b &amp; &quot;c&quot;"
        );
    }
}
