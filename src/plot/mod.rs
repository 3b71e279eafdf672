//! Backend independent description of the figures drawn from XPS data.
//!
//! A [`Figure`] is a stack of [`Panel`]s, each panel holding the [`Trace`]s of
//! one measurement.  Figures are built by `XpsData::figure` and
//! `XpsStack::figure`, can be inspected or adjusted, and are finally drawn to
//! a file with [`Figure::save`].

pub use self::colors::{parse_color, Color, Palette};
pub use self::options::{
    LegendPosition, PanelOptions, PanelOptionsBuilder, PlotStyle, PlotStyleBuilder, StackOptions,
    StackOptionsBuilder,
};

mod colors;
mod options;
mod render;

use std::path::Path;

use crate::error::Result;

/// How the values of a column are drawn.
#[derive(Debug, Clone, PartialEq)]
pub enum TraceKind {
    /// A plain line.
    Line { width: u32 },
    /// Unconnected points.
    Markers { size: u32 },
    /// A region filled between `baseline` and the values, outlined by a line.
    Fill {
        baseline: Vec<f64>,
        alpha: f64,
        width: u32,
    },
}

/// The drawing of one column.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    /// Name of the column the trace comes from.
    pub column: String,
    /// Legend entry, if any.
    pub label: Option<String>,
    pub color: Color,
    pub kind: TraceKind,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

/// A labelled vertical line.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub position: f64,
    pub label: String,
}

impl Marker {
    pub fn new(position: f64) -> Self {
        Marker {
            position,
            label: format!("{:5.1}", position),
        }
    }
}

/// One sub plot.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub traces: Vec<Trace>,
    /// Energy axis limits, from left to right.  Energies decrease from left to
    /// right, so the first value is the greatest one.
    pub x_range: (f64, f64),
    /// Intensity axis limits (bottom, top).
    pub y_range: (f64, f64),
    pub ylabel: Option<String>,
    pub x_axis: bool,
    pub legend: bool,
    pub legend_position: LegendPosition,
    pub frame: bool,
    pub markers: Vec<Marker>,
}

impl Panel {
    /// Creates a panel over the energies in `index`, with limits fitted to
    /// the data.  Every flag is off.
    pub fn new(traces: Vec<Trace>, index: &[f64]) -> Self {
        let x_range = match bounds(index) {
            Some((min, max)) => (max, min),
            None => (1.0, 0.0),
        };
        let mut panel = Panel {
            traces,
            x_range,
            y_range: (0.0, 1.0),
            ylabel: None,
            x_axis: false,
            legend: false,
            legend_position: LegendPosition::default(),
            frame: false,
            markers: Vec::new(),
        };
        if let Some(data) = panel.data_bounds() {
            panel.y_range = padded(data);
        }
        panel
    }

    /// Minimum and maximum of every drawn value, fill baselines included.
    pub fn data_bounds(&self) -> Option<(f64, f64)> {
        let values = self.traces.iter().flat_map(|trace| {
            let baseline: &[f64] = match &trace.kind {
                TraceKind::Fill { baseline, .. } => baseline.as_slice(),
                _ => &[],
            };
            trace.y.iter().chain(baseline)
        });
        bounds(values)
    }

    /// Legend entries, in drawing order.
    pub fn legend_labels(&self) -> Vec<&str> {
        self.traces
            .iter()
            .filter_map(|trace| trace.label.as_deref())
            .collect()
    }

    pub fn trace(&self, column: &str) -> Option<&Trace> {
        self.traces.iter().find(|trace| trace.column == column)
    }
}

/// A titled stack of panels, drawn top to bottom with no space between them.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub title: Option<String>,
    pub panels: Vec<Panel>,
    /// Size in pixels (width, height).
    pub size: (u32, u32),
    pub style: PlotStyle,
}

impl Figure {
    pub fn new(style: PlotStyle) -> Self {
        Figure {
            title: None,
            panels: Vec::new(),
            size: style.size,
            style,
        }
    }

    /// Appends a panel below the existing ones.
    pub fn push(&mut self, panel: Panel) {
        self.panels.push(panel);
    }

    /// Gives every panel the same energy and intensity limits, wide enough for
    /// all of them.
    pub fn share_axes(&mut self) {
        let x_range = self.panels.iter().map(|p| p.x_range).fold(None, |acc, (from, to)| {
            Some(match acc {
                None => (from, to),
                Some((a, b)) => (f64::max(a, from), f64::min(b, to)),
            })
        });
        let y_range = self
            .panels
            .iter()
            .filter_map(|p| p.data_bounds())
            .fold(None, |acc: Option<(f64, f64)>, (min, max)| {
                Some(match acc {
                    None => (min, max),
                    Some((a, b)) => (a.min(min), b.max(max)),
                })
            })
            .map(padded);
        for panel in self.panels.iter_mut() {
            if let Some(x_range) = x_range {
                panel.x_range = x_range;
            }
            if let Some(y_range) = y_range {
                panel.y_range = y_range;
            }
        }
    }

    /// Draws the figure to `path`.  The format is chosen from the extension:
    /// `svg`, `png`, `bmp`, `jpg` or `jpeg`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        render::save_figure(self, path.as_ref())
    }
}

fn bounds<'a, I: IntoIterator<Item = &'a f64>>(values: I) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((min, max)) => Some((min.min(v), max.max(v))),
        })
}

fn padded((min, max): (f64, f64)) -> (f64, f64) {
    let range = max - min;
    let padding = if range.abs() < 1e-12 { 0.5 } else { range * 0.05 };
    (min - padding, max + padding)
}
