use plotters::prelude::*;
use std::fs;
use tempfile::Builder;

/// Renders a two-curve comparison plot (the original function in blue, its
/// integral in red) into PNG bytes.
///
/// The chart is drawn through a temporary file because the bitmap backend
/// writes to a path; the file is removed when the handle drops. Each series
/// must contain at least two finite points.
pub fn render_two_series_png(
    caption: &str,
    original: &[(f64, f64)],
    integral: &[(f64, f64)],
) -> Result<Vec<u8>, String> {
    if original.len() < 2 || integral.len() < 2 {
        return Err("not enough finite points to plot".to_string());
    }

    let (mut x_min, mut x_max) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for &(x, y) in original.iter().chain(integral.iter()) {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }
    // degenerate ranges break build_cartesian_2d
    let y_pad = ((y_max - y_min).abs()).max(1e-6) * 0.05;
    let x_pad = ((x_max - x_min).abs()).max(1e-6) * 0.05;

    let tmp = Builder::new()
        .suffix(".png")
        .tempfile()
        .map_err(|e| e.to_string())?;
    let path = tmp.path().to_path_buf();
    {
        let root_area = BitMapBackend::new(&path, (800, 600)).into_drawing_area();
        root_area.fill(&WHITE).map_err(|e| e.to_string())?;

        let mut chart = ChartBuilder::on(&root_area)
            .caption(caption, ("sans-serif", 30))
            .margin(10)
            .x_label_area_size(30)
            .y_label_area_size(30)
            .build_cartesian_2d(x_min - x_pad..x_max + x_pad, y_min - y_pad..y_max + y_pad)
            .map_err(|e| e.to_string())?;

        chart
            .configure_mesh()
            .x_desc("x")
            .y_desc("y")
            .draw()
            .map_err(|e| e.to_string())?;

        chart
            .draw_series(LineSeries::new(original.iter().copied(), &BLUE))
            .map_err(|e| e.to_string())?
            .label("f(x)")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &BLUE));

        chart
            .draw_series(LineSeries::new(integral.iter().copied(), &RED))
            .map_err(|e| e.to_string())?
            .label("integral of f(x)")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &RED));

        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(|e| e.to_string())?;

        root_area.present().map_err(|e| e.to_string())?;
    }

    fs::read(&path).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_returns_png_bytes() {
        let original: Vec<(f64, f64)> = (0..100)
            .map(|i| {
                let x = i as f64 * 0.1;
                (x, x.sin())
            })
            .collect();
        let integral: Vec<(f64, f64)> = (0..100)
            .map(|i| {
                let x = i as f64 * 0.1;
                (x, 1.0 - x.cos())
            })
            .collect();
        let png = render_two_series_png("f(x) = sin(x)", &original, &integral).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_too_few_points_is_an_error() {
        let err = render_two_series_png("empty", &[], &[(0.0, 0.0), (1.0, 1.0)]).unwrap_err();
        assert!(err.contains("points"));
    }

    #[test]
    fn test_flat_series_does_not_fail() {
        let flat: Vec<(f64, f64)> = (0..10).map(|i| (i as f64, 2.0)).collect();
        let ramp: Vec<(f64, f64)> = (0..10).map(|i| (i as f64, 2.0 * i as f64)).collect();
        assert!(render_two_series_png("f(x) = 2", &flat, &ramp).is_ok());
    }
}
