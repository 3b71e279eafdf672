use std::fmt;
use std::path::Path;

use yansi::Color::Blue;

use crate::error::Result;
use crate::plot::{Figure, Panel, PanelOptions, Trace, TraceKind};
use crate::read::ReportReader;
use crate::table::Table;

/// Name of the kinetic energy column.
pub const KINETIC_ENERGY: &str = "KE";
/// Name of the experimental data column.
pub const EXPERIMENT: &str = "Exp";
/// Name of the background column.
pub const BACKGROUND: &str = "BG";
/// Name of the envelope (sum of the components) column.
pub const ENVELOPE: &str = "envelope";

#[derive(Debug, Clone, PartialEq)]
/// The data of one XPS measurement, as exported by CasaXPS.
pub struct XpsData {
    filename: String,
    path: String,
    /// Free text title, defaults to the title found in the report header.
    pub title: String,
    source: f64,
    table: Table,
    to_plot: Vec<String>,
}

impl XpsData {
    /// Creates a XpsData from already loaded data.  Most of the time
    /// `XpsData::from_file` is what you want.
    pub fn new<F, T, P>(filename: F, table: Table, title: T, path: P, source: f64) -> Self
    where
        F: Into<String>,
        T: Into<String>,
        P: Into<String>,
    {
        XpsData {
            filename: filename.into(),
            path: path.into(),
            title: title.into(),
            source,
            table,
            to_plot: Vec::new(),
        }
    }

    /// Loads a report file with the default `ReportReader`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        ReportReader::default().read(path)
    }

    /// Name of the file the data was read from.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Path of the data as written in the report header.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Energy of the X-ray source, in eV.
    pub fn source(&self) -> f64 {
        self.source
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Binding energies.
    pub fn index(&self) -> &[f64] {
        self.table.index()
    }

    /// Kinetic energies, if the `KE` column has not been renamed.
    pub fn kinetic_energy(&self) -> Option<&[f64]> {
        self.table.column(KINETIC_ENERGY).ok()
    }

    pub fn column(&self, name: &str) -> Result<&[f64]> {
        self.table.column(name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.table.names()
    }

    /// Columns drawn when no columns are given to `panel`.
    pub fn selected_columns(&self) -> &[String] {
        &self.to_plot
    }

    /// Renames column `old` as `new`.
    pub fn rename_column(&mut self, old: &str, new: &str) -> Result<()> {
        self.table.rename(old, new)
    }

    /// Renames the columns in table order.  An empty name keeps the name of
    /// the column at that position, and columns after the last given name are
    /// not renamed.  Giving more names than there are columns is an error.
    ///
    /// ```
    /// # use xpsplot::XpsData;
    /// # use xpsplot::table::{Column, Table};
    /// let table = Table::new(
    ///     vec![285.0],
    ///     vec![Column::new("KE", vec![1201.6]), Column::new("Exp", vec![3.0]), Column::new("Comp_1", vec![1.0])],
    /// ).unwrap();
    /// let mut data = XpsData::new("c1s.txt", table, "C 1s", "", 1486.6);
    /// data.rename_all(&["", "", "carb"]).unwrap();
    /// assert_eq!(data.column_names(), vec!["KE", "Exp", "carb"]);
    /// ```
    pub fn rename_all<S: AsRef<str>>(&mut self, names: &[S]) -> Result<()> {
        self.table.rename_all(names)
    }

    /// Sets the columns drawn when no columns are given to `panel`.
    pub fn select_columns<S: AsRef<str>>(&mut self, names: &[S]) -> Result<()> {
        self.table.check_columns(names)?;
        self.to_plot = names.iter().map(|n| n.as_ref().to_owned()).collect();
        Ok(())
    }

    /// Subtracts the background column from every column.  Calling it twice
    /// subtracts the background twice.
    pub fn subtract_background(&mut self, background: &str) -> Result<()> {
        self.table.subtract(background)?;
        debug!("Subtracted '{}' from {}", background, self.filename);
        Ok(())
    }

    /// Scales every column so that the `reference` column spans from 0 to 1.
    pub fn normalize(&mut self, reference: &str) -> Result<()> {
        self.table.normalize(reference)?;
        debug!("Normalized {} on '{}'", self.filename, reference);
        Ok(())
    }

    fn resolve_columns(&self, requested: Option<&[String]>) -> Result<Vec<String>> {
        let columns = match requested {
            Some(columns) if !columns.is_empty() => columns.to_vec(),
            _ if !self.to_plot.is_empty() => self.to_plot.clone(),
            _ => return Ok(self.table.names().into_iter().map(String::from).collect()),
        };
        self.table.check_columns(&columns)?;
        Ok(columns)
    }

    /// Builds the panel drawing this data.
    ///
    /// The envelope is a thin line and experimental data are points, both in
    /// the reserved color of the palette.  Every other column is a line (or a
    /// region filled down to the background if `options.fill` is set) in the
    /// next color of the palette.
    pub fn panel(&self, options: &PanelOptions) -> Result<Panel> {
        let columns = self.resolve_columns(options.columns.as_deref())?;
        let style = &options.style;
        let palette = &style.palette;
        let baseline = if options.fill {
            self.table.column(BACKGROUND).ok()
        } else {
            None
        };
        let mut cycle = 0;
        let mut traces = Vec::with_capacity(columns.len());
        for column in columns {
            let y = self.table.column(&column)?.to_vec();
            let (label, color, kind) = match column.as_str() {
                ENVELOPE => (
                    None,
                    palette.reserved(),
                    TraceKind::Line {
                        width: style.envelope_width,
                    },
                ),
                EXPERIMENT => (
                    Some(column.clone()),
                    palette.reserved(),
                    TraceKind::Markers {
                        size: style.marker_size,
                    },
                ),
                _ => {
                    let color = palette.cycle(cycle);
                    cycle += 1;
                    let kind = match baseline {
                        Some(baseline) => TraceKind::Fill {
                            baseline: baseline.to_vec(),
                            alpha: style.alpha,
                            width: style.line_width,
                        },
                        None => TraceKind::Line {
                            width: style.line_width,
                        },
                    };
                    (Some(column.clone()), color, kind)
                }
            };
            traces.push(Trace {
                column,
                label,
                color,
                kind,
                x: self.index().to_vec(),
                y,
            });
        }

        let mut panel = Panel::new(traces, self.index());
        panel.ylabel = match &options.ylabel {
            Some(ylabel) => Some(ylabel.clone()),
            None if options.filename_label => Some(self.filename.clone()),
            None => None,
        };
        panel.x_axis = options.x_axis;
        panel.legend = options.legend;
        panel.legend_position = options.legend_position;
        panel.frame = options.frame;
        Ok(panel)
    }

    /// Builds a figure with a single panel drawing this data.
    pub fn figure(&self, options: &PanelOptions) -> Result<Figure> {
        let mut figure = Figure::new(options.style.clone());
        figure.push(self.panel(options)?);
        Ok(figure)
    }

    /// Draws this data to a file.  The format is chosen from the extension of
    /// `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P, options: &PanelOptions) -> Result<()> {
        self.figure(options)?.save(path)
    }
}

impl fmt::Display for XpsData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "filename : {}", Blue.paint(&self.filename))?;
        writeln!(f, "path     : {}", Blue.paint(&self.path))?;
        writeln!(f, "title    : {}", Blue.paint(&self.title))?;
        writeln!(f, "source   : {} eV", Blue.paint(self.source))?;
        writeln!(
            f,
            "columns  : {}",
            Blue.paint(self.table.names().join(" ; "))
        )
    }
}
