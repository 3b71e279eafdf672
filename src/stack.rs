use std::fmt;
use std::path::Path;

use crate::error::{Result, XpsError};
use crate::plot::{Figure, Marker, StackOptions};
use crate::series::XpsData;

#[derive(Debug, Clone, PartialEq)]
/// Several XPS measurements drawn as one figure, the first one at the top.
pub struct XpsStack {
    /// Title of the figure, defaults to the title of the first measurement.
    pub title: String,
    members: Vec<XpsData>,
    to_plot: Vec<String>,
}

impl XpsStack {
    /// Loads every report of `paths`, in order.  Nothing is loaded if one of
    /// the paths does not exist ("-", standard input, always does, but can
    /// only be given once).
    pub fn from_files<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let stdin_count = paths
            .iter()
            .filter(|p| p.as_ref() == Path::new("-"))
            .count();
        if stdin_count > 1 {
            return Err(XpsError::InvalidOptions(String::from(
                "standard input (\"-\") can only be read once",
            )));
        }
        let missing = paths.iter().find(|p| {
            let path = p.as_ref();
            path != Path::new("-") && !path.exists()
        });
        if let Some(missing) = missing {
            return Err(XpsError::FileNotFound(missing.as_ref().to_path_buf()));
        }
        let members = paths
            .iter()
            .map(XpsData::from_file)
            .collect::<Result<Vec<XpsData>>>()?;
        XpsStack::from_members(members)
    }

    pub fn from_members(members: Vec<XpsData>) -> Result<Self> {
        let title = match members.first() {
            Some(first) => first.title.clone(),
            None => return Err(XpsError::EmptyStack),
        };
        Ok(XpsStack {
            title,
            members,
            to_plot: Vec::new(),
        })
    }

    pub fn members(&self) -> &[XpsData] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Sets the columns drawn in every panel, whatever the options say.
    /// Names are checked against each measurement when drawing.
    pub fn select_columns<S: AsRef<str>>(&mut self, names: &[S]) {
        self.to_plot = names.iter().map(|n| n.as_ref().to_owned()).collect();
    }

    pub fn selected_columns(&self) -> &[String] {
        &self.to_plot
    }

    // Operations below stop at the first failing measurement: the ones before
    // it keep their changes, the ones after it are left untouched.

    /// Renames column `old` as `new` in every measurement.
    pub fn rename_column(&mut self, old: &str, new: &str) -> Result<()> {
        self.try_each(|data| data.rename_column(old, new))
    }

    /// Renames columns by position in every measurement (see
    /// `XpsData::rename_all`).
    pub fn rename_all<S: AsRef<str>>(&mut self, names: &[S]) -> Result<()> {
        self.try_each(|data| data.rename_all(names))
    }

    pub fn subtract_background(&mut self, background: &str) -> Result<()> {
        self.try_each(|data| data.subtract_background(background))
    }

    pub fn normalize(&mut self, reference: &str) -> Result<()> {
        self.try_each(|data| data.normalize(reference))
    }

    fn try_each<F>(&mut self, mut operation: F) -> Result<()>
    where
        F: FnMut(&mut XpsData) -> Result<()>,
    {
        for data in self.members.iter_mut() {
            if let Err(error) = operation(data) {
                warn!("Stopped at {}: {}", data.filename(), error);
                return Err(error);
            }
        }
        Ok(())
    }

    /// Builds the stacked figure: one panel per measurement, sharing both
    /// axes.  Only the bottom panel shows energies and only the top one shows
    /// the legend and the position lines.
    pub fn figure(&self, options: &StackOptions) -> Result<Figure> {
        let columns = if self.to_plot.is_empty() {
            options.columns.as_deref()
        } else {
            Some(self.to_plot.as_slice())
        };
        let mut style = options.style.clone();
        style.size = (style.size.1, style.size.0);
        let mut figure = Figure::new(style);
        figure.title = Some(self.title.clone());

        let last = self.members.len() - 1;
        for (i, data) in self.members.iter().enumerate() {
            let panel_options = options.panel_options(columns, i == last, i == 0 && options.legend);
            let mut panel = data.panel(&panel_options)?;
            if i == 0 {
                panel.markers = options.positions.iter().map(|&p| Marker::new(p)).collect();
            }
            figure.push(panel);
        }
        figure.share_axes();
        Ok(figure)
    }

    /// Draws the stack to a file.  The format is chosen from the extension of
    /// `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P, options: &StackOptions) -> Result<()> {
        self.figure(options)?.save(path)
    }
}

impl fmt::Display for XpsStack {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", "-".repeat(30))?;
        for (i, data) in self.members.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", data)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plot::StackOptionsBuilder;
    use crate::series::{BACKGROUND, EXPERIMENT};
    use crate::testing::{report_file, REPORT};
    use tempfile::NamedTempFile;
    use yansi::Paint;

    fn files(count: usize) -> Vec<NamedTempFile> {
        (0..count).map(|_| report_file(REPORT)).collect()
    }

    fn stack(files: &[NamedTempFile]) -> XpsStack {
        let paths: Vec<&Path> = files.iter().map(|f| f.path()).collect();
        XpsStack::from_files(&paths).unwrap()
    }

    #[test]
    fn from_files() {
        let files = files(3);
        let stack = stack(&files);
        assert_eq!(stack.len(), 3);
        assert_eq!(stack.title, "C 1s/1");
        for (data, file) in stack.members().iter().zip(&files) {
            assert_eq!(data.filename(), file.path().display().to_string());
        }
    }

    #[test]
    fn missing_file_loads_nothing() {
        let files = files(3);
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.TXT");
        let paths = vec![files[0].path(), files[1].path(), missing.as_path(), files[2].path()];
        match XpsStack::from_files(&paths) {
            Err(XpsError::FileNotFound(path)) => assert_eq!(path, missing),
            _ => panic!("Missing file not detected"),
        }
    }

    #[test]
    fn stdin_only_once() {
        let files = files(1);
        let paths = vec![Path::new("-"), files[0].path(), Path::new("-")];
        assert!(matches!(
            XpsStack::from_files(&paths),
            Err(XpsError::InvalidOptions(_))
        ));
    }

    #[test]
    fn empty_stack() {
        let paths: Vec<&Path> = Vec::new();
        assert!(matches!(
            XpsStack::from_files(&paths),
            Err(XpsError::EmptyStack)
        ));
    }

    #[test]
    fn fan_out() {
        let files = files(2);
        let mut stack = stack(&files);
        stack.rename_all(&["", "", "carb"]).unwrap();
        stack.subtract_background(BACKGROUND).unwrap();
        for data in stack.members() {
            assert!(data.column("carb").is_ok());
            assert!(data.column(BACKGROUND).unwrap().iter().all(|v| *v == 0.0));
        }
        stack.normalize(EXPERIMENT).unwrap();
        for data in stack.members() {
            assert_eq!(data.column(EXPERIMENT).unwrap()[1], 1.0);
            assert_eq!(data.column(EXPERIMENT).unwrap()[3], 0.0);
        }
    }

    #[test]
    fn fan_out_fails_fast() {
        let files = files(3);
        let mut stack = stack(&files);
        let mut members = stack.members().to_vec();
        members[1].rename_column("Comp_2", "tata").unwrap();
        let mut stack_with_odd_member = XpsStack::from_members(members).unwrap();
        assert!(matches!(
            stack_with_odd_member.rename_column("Comp_2", "carbonyl"),
            Err(XpsError::UnknownColumn { .. })
        ));
        let members = stack_with_odd_member.members();
        assert!(members[0].column("carbonyl").is_ok());
        assert!(members[1].column("tata").is_ok());
        assert!(members[2].column("Comp_2").is_ok());
        assert!(members[2].column("carbonyl").is_err());

        stack.rename_column("Comp_2", "carbonyl").unwrap();
        assert!(stack.members().iter().all(|d| d.column("carbonyl").is_ok()));
    }

    #[test]
    fn figure_layout() {
        let files = files(3);
        let stack = stack(&files);
        let options = StackOptionsBuilder::default()
            .columns(vec!["Exp", "Comp_1", "envelope"])
            .fill(true)
            .positions(vec![284.5, 290.9])
            .build()
            .unwrap();
        let figure = stack.figure(&options).unwrap();
        assert_eq!(figure.title.as_deref(), Some("C 1s/1"));
        assert_eq!(figure.size, (800, 1200));
        assert_eq!(figure.panels.len(), 3);

        let x_axes: Vec<bool> = figure.panels.iter().map(|p| p.x_axis).collect();
        assert_eq!(x_axes, vec![false, false, true]);
        let legends: Vec<bool> = figure.panels.iter().map(|p| p.legend).collect();
        assert_eq!(legends, vec![true, false, false]);
        assert_eq!(figure.panels[0].markers.len(), 2);
        assert_eq!(figure.panels[0].markers[1].label, "290.9");
        assert!(figure.panels[1].markers.is_empty());
        for panel in &figure.panels {
            assert_eq!(panel.y_range, figure.panels[0].y_range);
            assert_eq!(panel.x_range, (290.0, 287.0));
            assert_eq!(panel.legend_labels(), vec!["Exp", "Comp_1"]);
        }
    }

    #[test]
    fn stack_selection_overrides_options() {
        let files = files(2);
        let mut stack = stack(&files);
        stack.select_columns(&["Comp_2"]);
        let options = StackOptionsBuilder::default()
            .columns(vec!["Exp"])
            .build()
            .unwrap();
        let figure = stack.figure(&options).unwrap();
        assert_eq!(figure.panels[0].legend_labels(), vec!["Comp_2"]);

        stack.select_columns(&["carb"]);
        assert!(matches!(
            stack.figure(&options),
            Err(XpsError::UnknownColumn { .. })
        ));
    }

    #[test]
    fn display() {
        let files = files(2);
        let mut stack = stack(&files);
        stack.title = String::from("C1s of a nice surface");
        Paint::disable();
        let display = format!("{}", stack);
        assert!(display.starts_with("C1s of a nice surface\n------------------------------\n"));
        assert_eq!(display.matches("title    : C 1s/1").count(), 2);
    }
}
