use plotters::prelude::*;

pub const CHART_SIZE: (u32, u32) = (800, 400);

#[derive(Debug, thiserror::Error)]
#[error("failed to draw chart: {0}")]
pub struct ChartError(String);

fn rock_style() -> ShapeStyle {
    GREEN.mix(0.7).stroke_width(2)
}

fn mine_style() -> ShapeStyle {
    RED.mix(0.7).stroke_width(2)
}

fn input_style() -> ShapeStyle {
    BLUE.stroke_width(3)
}

fn draw_error(err: impl std::fmt::Display) -> ChartError {
    ChartError(err.to_string())
}

/// Overlays the submitted signal on both class signatures, indexed by
/// feature position. Returns the SVG document as a string.
pub fn render_svg(input: &[f64], rock_mean: &[f64], mine_mean: &[f64]) -> Result<String, ChartError> {
    let last_index = input.len().max(rock_mean.len()).max(mine_mean.len()).saturating_sub(1);

    let values = input.iter().chain(rock_mean).chain(mine_mean).copied();
    let y_max = values.clone().fold(1.0_f64, f64::max);
    let y_min = values.fold(0.0_f64, f64::min);

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(draw_error)?;

        let mut chart = ChartBuilder::on(&root)
            .caption("Signal spectrum analysis", ("sans-serif", 20))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(0..last_index, y_min..y_max)
            .map_err(draw_error)?;

        chart
            .configure_mesh()
            .x_desc("Frequency (index 0-59)")
            .y_desc("Energy")
            .light_line_style(BLACK.mix(0.05).stroke_width(1))
            .draw()
            .map_err(draw_error)?;

        chart
            .draw_series(LineSeries::new(
                rock_mean.iter().copied().enumerate(),
                rock_style(),
            ))
            .map_err(draw_error)?
            .label("Mean Rock signature")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], rock_style()));

        chart
            .draw_series(LineSeries::new(
                mine_mean.iter().copied().enumerate(),
                mine_style(),
            ))
            .map_err(draw_error)?
            .label("Mean Mine signature")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], mine_style()));

        chart
            .draw_series(LineSeries::new(input.iter().copied().enumerate(), input_style()))
            .map_err(draw_error)?
            .label("Your signal")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], input_style()));

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8).filled())
            .border_style(BLACK.stroke_width(1))
            .draw()
            .map_err(draw_error)?;

        root.present().map_err(draw_error)?;
    }

    Ok(svg)
}
