use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{register_font, FontStyle};

use super::{Color as DataColor, Figure, LegendPosition, Marker, Panel, PlotStyle, TraceKind};
use crate::error::{Result, XpsError};

// DejaVu Serif, see assets/fonts/LICENSE.
const FONT: &[u8] = include_bytes!("../../assets/fonts/DejaVuSerif.ttf");

const X_LABEL_AREA: u32 = 60;
const Y_LABEL_AREA: u32 = 40;
const POSITION_LABEL_AREA: u32 = 30;
const RIGHT_MARGIN: u32 = 20;
const LEGEND_SAMPLE: i32 = 20;

pub(crate) fn save_figure(figure: &Figure, path: &Path) -> Result<()> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    if !matches!(extension.as_str(), "svg" | "png" | "bmp" | "jpg" | "jpeg") {
        return Err(XpsError::UnsupportedFormat(path.to_path_buf()));
    }
    load_font(&figure.style)?;
    match extension.as_str() {
        "svg" => {
            let root = SVGBackend::new(path, figure.size).into_drawing_area();
            draw_figure(&root, figure)?;
            root.present().map_err(render_error)?;
        }
        _ => {
            let root = BitMapBackend::new(path, figure.size).into_drawing_area();
            draw_figure(&root, figure)?;
            root.present().map_err(render_error)?;
        }
    }
    info!("Figure saved as {}", path.display());
    Ok(())
}

/// Makes the embedded font available under the family name of `style`.
fn load_font(style: &PlotStyle) -> Result<()> {
    register_font(&style.font_family, FontStyle::Normal, FONT).map_err(|_| {
        XpsError::Render(format!("cannot load a font for '{}'", style.font_family))
    })
}

fn render_error<E: std::fmt::Display>(error: E) -> XpsError {
    XpsError::Render(error.to_string())
}

fn rgb(color: DataColor) -> RGBColor {
    RGBColor(color.red, color.green, color.blue)
}

fn font(style: &PlotStyle, scale: f64) -> TextStyle<'_> {
    (style.font_family.as_str(), style.font_size as f64 * scale)
        .into_font()
        .color(&BLACK)
}

fn series_label_position(position: LegendPosition) -> SeriesLabelPosition {
    match position {
        LegendPosition::UpperLeft => SeriesLabelPosition::UpperLeft,
        LegendPosition::UpperRight => SeriesLabelPosition::UpperRight,
        LegendPosition::LowerLeft => SeriesLabelPosition::LowerLeft,
        LegendPosition::LowerRight => SeriesLabelPosition::LowerRight,
    }
}

fn draw_figure<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, figure: &Figure) -> Result<()> {
    let style = &figure.style;
    root.fill(&WHITE).map_err(render_error)?;
    let area = match &figure.title {
        Some(title) => root
            .titled(title, font(style, 1.2))
            .map_err(render_error)?,
        None => root.clone(),
    };
    let (first, last) = match (figure.panels.first(), figure.panels.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Ok(()),
    };

    // Panels share the height left once the position labels (above the first
    // panel) and the energy axis (below the last one) are accounted for.
    let top = if first.markers.is_empty() {
        0
    } else {
        POSITION_LABEL_AREA
    };
    let bottom = if last.x_axis { X_LABEL_AREA } else { 0 };
    let (_, height) = area.dim_in_pixel();
    let count = figure.panels.len() as u32;
    let step = (height.saturating_sub(top + bottom) / count).max(1);
    let breakpoints: Vec<i32> = (1..count).map(|i| (top + i * step) as i32).collect();
    let no_split: [i32; 0] = [];
    let areas = area.split_by_breakpoints(no_split, &breakpoints);

    // Position lines cross every panel, only the top one labels them.
    for (i, (panel, panel_area)) in figure.panels.iter().zip(areas.iter()).enumerate() {
        let margin_top = if i == 0 { top } else { 0 };
        draw_panel(panel_area, panel, style, margin_top, &first.markers, i == 0)?;
    }
    Ok(())
}

fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    panel: &Panel,
    style: &PlotStyle,
    margin_top: u32,
    markers: &[Marker],
    labelled: bool,
) -> Result<()> {
    // Energies decrease from left to right: data is drawn at -x and labels
    // print the opposite of the coordinate.
    let (x_from, x_to) = panel.x_range;
    let (y_min, y_max) = panel.y_range;
    let mut chart = ChartBuilder::on(area)
        .margin_top(margin_top)
        .margin_right(RIGHT_MARGIN)
        .x_label_area_size(if panel.x_axis { X_LABEL_AREA } else { 0 })
        .y_label_area_size(if panel.ylabel.is_some() { Y_LABEL_AREA } else { 0 })
        .build_cartesian_2d(-x_from..-x_to, y_min..y_max)
        .map_err(render_error)?;

    let energy = |v: &f64| format!("{:.0}", -v);
    let labels = font(style, 0.8);
    let mut mesh = chart.configure_mesh();
    mesh.disable_mesh()
        .y_labels(0)
        .x_label_formatter(&energy)
        .label_style(labels.clone())
        .axis_desc_style(font(style, 1.0));
    if panel.x_axis {
        mesh.x_desc(style.xlabel.as_str());
    } else {
        mesh.x_labels(0);
    }
    if let Some(ylabel) = &panel.ylabel {
        mesh.y_desc(ylabel.as_str());
    }
    mesh.draw().map_err(render_error)?;

    for trace in &panel.traces {
        let color = rgb(trace.color);
        let points: Vec<(f64, f64)> = trace.x.iter().zip(&trace.y).map(|(x, y)| (-x, *y)).collect();
        match &trace.kind {
            TraceKind::Line { width } => {
                let width = *width;
                let series = chart
                    .draw_series(LineSeries::new(points, color.stroke_width(width)))
                    .map_err(render_error)?;
                if let Some(label) = &trace.label {
                    series.label(label.as_str()).legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + LEGEND_SAMPLE, y)], color.stroke_width(width))
                    });
                }
            }
            TraceKind::Markers { size } => {
                let size = *size;
                let series = chart
                    .draw_series(points.iter().map(|p| Circle::new(*p, size, color.filled())))
                    .map_err(render_error)?;
                if let Some(label) = &trace.label {
                    series.label(label.as_str()).legend(move |(x, y)| {
                        Circle::new((x + LEGEND_SAMPLE / 2, y), size, color.filled())
                    });
                }
            }
            TraceKind::Fill {
                baseline,
                alpha,
                width,
            } => {
                let (alpha, width) = (*alpha, *width);
                let mut outline = points.clone();
                outline.extend(trace.x.iter().zip(baseline).rev().map(|(x, y)| (-x, *y)));
                chart
                    .draw_series(std::iter::once(Polygon::new(
                        outline,
                        color.mix(alpha).filled(),
                    )))
                    .map_err(render_error)?;
                let series = chart
                    .draw_series(LineSeries::new(points, color.stroke_width(width)))
                    .map_err(render_error)?;
                if let Some(label) = &trace.label {
                    series.label(label.as_str()).legend(move |(x, y)| {
                        Rectangle::new(
                            [(x, y - 5), (x + LEGEND_SAMPLE, y + 5)],
                            color.mix(alpha).filled(),
                        )
                    });
                }
            }
        }
    }

    let position_color = rgb(style.position_color);
    for marker in markers {
        let x = -marker.position;
        chart
            .draw_series(LineSeries::new(
                vec![(x, y_min), (x, y_max)],
                position_color.stroke_width(2),
            ))
            .map_err(render_error)?;
        if !labelled {
            continue;
        }
        chart
            .draw_series(std::iter::once(Text::new(
                marker.label.clone(),
                (x, y_max),
                labels.pos(Pos::new(HPos::Center, VPos::Bottom)),
            )))
            .map_err(render_error)?;
    }

    if panel.frame {
        chart
            .plotting_area()
            .draw(&Rectangle::new(
                [(-x_from, y_min), (-x_to, y_max)],
                BLACK.stroke_width(1),
            ))
            .map_err(render_error)?;
    }

    if panel.legend && panel.traces.iter().any(|t| t.label.is_some()) {
        chart
            .configure_series_labels()
            .position(series_label_position(panel.legend_position))
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .label_font(labels.clone())
            .draw()
            .map_err(render_error)?;
    }
    Ok(())
}
