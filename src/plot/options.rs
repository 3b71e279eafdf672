use palette::Srgb;

use super::colors::{Color, Palette};

/// Corner of a panel where the legend is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendPosition {
    UpperLeft,
    UpperRight,
    LowerLeft,
    LowerRight,
}

impl Default for LegendPosition {
    fn default() -> Self {
        LegendPosition::UpperRight
    }
}

/// Drawing parameters shared by every panel of a figure.
#[derive(Debug, Clone, PartialEq, Builder)]
#[builder(default)]
pub struct PlotStyle {
    /// Figure size, in pixels (width, height).
    pub size: (u32, u32),
    /// Label of the energy axis.
    #[builder(setter(into))]
    pub xlabel: String,
    #[builder(setter(into))]
    pub font_family: String,
    pub font_size: u32,
    /// Stroke width of ordinary series.
    pub line_width: u32,
    /// Stroke width of the envelope.
    pub envelope_width: u32,
    /// Radius of experimental points.
    pub marker_size: u32,
    /// Opacity of filled components, between 0 and 1.
    pub alpha: f64,
    pub palette: Palette,
    /// Color of the vertical position lines of stacked figures.
    pub position_color: Color,
}

impl Default for PlotStyle {
    fn default() -> Self {
        PlotStyle {
            size: (1200, 800),
            xlabel: String::from("Binding Energy (eV)"),
            font_family: String::from("serif"),
            font_size: 20,
            line_width: 2,
            envelope_width: 1,
            marker_size: 3,
            alpha: 0.5,
            palette: Palette::default(),
            position_color: Srgb::new(0x55, 0x57, 0x53),
        }
    }
}

/// Options to build the panel of a single measurement.
#[derive(Debug, Clone, PartialEq, Builder)]
#[builder(default)]
pub struct PanelOptions {
    /// Columns to draw.  If `None`, the columns selected on the data are used,
    /// or all of them if there is no selection.
    #[builder(setter(custom))]
    pub columns: Option<Vec<String>>,
    /// Fill components down to the background.
    pub fill: bool,
    /// Draw the energy axis.
    pub x_axis: bool,
    pub legend: bool,
    /// Use the data file name as y label when no `ylabel` is given.
    pub filename_label: bool,
    #[builder(setter(into, strip_option))]
    pub ylabel: Option<String>,
    /// Draw a frame around the panel.
    pub frame: bool,
    pub legend_position: LegendPosition,
    pub style: PlotStyle,
}

impl Default for PanelOptions {
    fn default() -> Self {
        PanelOptions {
            columns: None,
            fill: false,
            x_axis: true,
            legend: true,
            filename_label: true,
            ylabel: None,
            frame: false,
            legend_position: LegendPosition::default(),
            style: PlotStyle::default(),
        }
    }
}

impl PanelOptionsBuilder {
    pub fn columns<I, S>(&mut self, columns: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = Some(Some(columns.into_iter().map(Into::into).collect()));
        self
    }
}

/// Options to build a stacked figure.
///
/// Stacked figures are drawn in portrait orientation: the width and height of
/// `style.size` are swapped.
#[derive(Debug, Clone, PartialEq, Builder)]
#[builder(default)]
pub struct StackOptions {
    /// Columns to draw in every panel, unless the stack has its own selection.
    #[builder(setter(custom))]
    pub columns: Option<Vec<String>>,
    pub fill: bool,
    /// Draw the legend on the top panel.
    pub legend: bool,
    pub filename_label: bool,
    #[builder(setter(into, strip_option))]
    pub ylabel: Option<String>,
    pub frame: bool,
    pub legend_position: LegendPosition,
    /// Energies where a labelled vertical line is drawn.
    #[builder(setter(into))]
    pub positions: Vec<f64>,
    pub style: PlotStyle,
}

impl Default for StackOptions {
    fn default() -> Self {
        StackOptions {
            columns: None,
            fill: false,
            legend: true,
            filename_label: true,
            ylabel: None,
            frame: false,
            legend_position: LegendPosition::default(),
            positions: Vec::new(),
            style: PlotStyle::default(),
        }
    }
}

impl StackOptionsBuilder {
    pub fn columns<I, S>(&mut self, columns: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = Some(Some(columns.into_iter().map(Into::into).collect()));
        self
    }
}

impl StackOptions {
    /// Options of one panel of the stack.
    pub(crate) fn panel_options(
        &self,
        columns: Option<&[String]>,
        x_axis: bool,
        legend: bool,
    ) -> PanelOptions {
        PanelOptions {
            columns: columns.map(|c| c.to_vec()),
            fill: self.fill,
            x_axis,
            legend,
            filename_label: self.filename_label,
            ylabel: self.ylabel.clone(),
            frame: self.frame,
            legend_position: self.legend_position,
            style: self.style.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let options = PanelOptionsBuilder::default().build().unwrap();
        assert_eq!(options, PanelOptions::default());
        assert!(options.x_axis);
        assert!(options.legend);
        assert!(options.filename_label);
        assert!(!options.fill);
        assert_eq!(options.style.size, (1200, 800));
    }

    #[test]
    fn builder_columns() {
        let options = PanelOptionsBuilder::default()
            .columns(vec!["Exp", "carb"])
            .fill(true)
            .ylabel("Intensity (a.u.)")
            .build()
            .unwrap();
        assert_eq!(
            options.columns,
            Some(vec![String::from("Exp"), String::from("carb")])
        );
        assert!(options.fill);
        assert_eq!(options.ylabel.as_deref(), Some("Intensity (a.u.)"));
    }

    #[test]
    fn style_builder() {
        let style = PlotStyleBuilder::default()
            .alpha(1.0)
            .font_size(12)
            .size((600, 400))
            .build()
            .unwrap();
        assert_eq!(style.size, (600, 400));
        assert_eq!(style.font_size, 12);
        assert_eq!(style.xlabel, "Binding Energy (eV)");
    }

    #[test]
    fn stack_panel_options() {
        let options = StackOptionsBuilder::default()
            .fill(true)
            .positions(vec![284.5])
            .build()
            .unwrap();
        let columns = vec![String::from("Exp")];
        let panel = options.panel_options(Some(&columns), false, true);
        assert!(panel.fill);
        assert!(!panel.x_axis);
        assert!(panel.legend);
        assert_eq!(panel.columns, Some(columns));
    }
}
