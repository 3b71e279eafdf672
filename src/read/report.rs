use std::io::BufRead;
use std::path::Path;

use regex::Regex;

use crate::error::{Result, XpsError};
use crate::read::open_file;
use crate::series::{XpsData, BACKGROUND, ENVELOPE, EXPERIMENT, KINETIC_ENERGY};
use crate::table::{Column, Table};

const SOURCE_PATTERN: &str = r"(\d+.\d+)";
const COMPONENT_PREFIX: &str = "Comp_";
const HEADER_LINES: usize = 4;
// Kinetic energy, binding energy, experimental data, background and envelope.
const FIXED_COLUMNS: usize = 5;

/// Reader of the text reports exported by CasaXPS.
///
/// A report starts with four header lines (data path, title, a line holding
/// the energy of the X-ray source, tab separated column titles) followed by
/// one line of whitespace separated numbers per data point.
#[derive(Debug, Clone, Builder)]
pub struct ReportReader {
    /// Regex capturing the source energy in the third header line.  The
    /// capture group named `value` is used if present, otherwise the first
    /// capture group.
    #[builder(setter(into), default = "SOURCE_PATTERN.to_owned()")]
    source_pattern: String,
    /// Prefix of the component column names, followed by their rank.
    #[builder(setter(into), default = "COMPONENT_PREFIX.to_owned()")]
    component_prefix: String,
}

impl Default for ReportReader {
    fn default() -> Self {
        ReportReader {
            source_pattern: SOURCE_PATTERN.to_owned(),
            component_prefix: COMPONENT_PREFIX.to_owned(),
        }
    }
}

impl ReportReader {
    /// Reads the report at `path` ("-" for standard input).
    pub fn read<P: AsRef<Path>>(&self, path: P) -> Result<XpsData> {
        let path = path.as_ref();
        let filename = path.display().to_string();
        let source_regex = Regex::new(&self.source_pattern)?;
        let mut lines = open_file(path)?.lines();

        let mut header = Vec::with_capacity(HEADER_LINES);
        for number in 1..=HEADER_LINES {
            match lines.next() {
                Some(line) => header.push(line?),
                None => {
                    return Err(XpsError::parse(
                        &filename,
                        number,
                        "unexpected end of file in header",
                    ))
                }
            }
        }
        let data_path = header[0].trim().to_owned();
        let title = header[1].trim().to_owned();
        let source = self
            .parse_source(&source_regex, &header[2])
            .ok_or_else(|| {
                XpsError::parse(
                    &filename,
                    3,
                    format!("no source energy in '{}'", header[2].trim()),
                )
            })?;
        let ndata = header[3].split('\t').count();
        if ndata < FIXED_COLUMNS {
            return Err(XpsError::parse(
                &filename,
                4,
                format!(
                    "{} columns declared, at least {} are needed",
                    ndata, FIXED_COLUMNS
                ),
            ));
        }

        let mut rows: Vec<Vec<f64>> = Vec::new();
        for (offset, line) in lines.enumerate() {
            let number = HEADER_LINES + 1 + offset;
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let row = trimmed
                .split_whitespace()
                .map(|token| {
                    token.parse::<f64>().map_err(|error| {
                        XpsError::parse(
                            &filename,
                            number,
                            format!("cannot parse float ({}) at '{}'", error, token),
                        )
                    })
                })
                .collect::<Result<Vec<f64>>>()?;
            if row.len() != ndata {
                return Err(XpsError::parse(
                    &filename,
                    number,
                    format!("expected {} values, found {}", ndata, row.len()),
                ));
            }
            rows.push(row);
        }
        if rows.is_empty() {
            return Err(XpsError::parse(
                &filename,
                HEADER_LINES + 1,
                "no data after header",
            ));
        }

        let table = self.build_table(&rows, ndata)?;
        debug!(
            "Read {} rows of {} columns from {}",
            table.len(),
            table.width(),
            filename
        );
        Ok(XpsData::new(filename, table, title, data_path, source))
    }

    fn parse_source(&self, regex: &Regex, line: &str) -> Option<f64> {
        let cap = regex.captures(line)?;
        let value = cap.name("value").or_else(|| cap.get(1)).or_else(|| cap.get(0))?;
        match value.as_str().parse::<f64>() {
            Ok(n) => Some(n),
            Err(parse_error) => {
                debug!("Cannot parse float ({}) at '{}'", parse_error, line);
                None
            }
        }
    }

    /// Raw column 1 (binding energy) is the index; raw column 0 and raw
    /// columns from 2 on are the data columns.
    fn build_table(&self, rows: &[Vec<f64>], ndata: usize) -> Result<Table> {
        let raw = |i: usize| rows.iter().map(|row| row[i]).collect::<Vec<f64>>();
        let mut columns = Vec::with_capacity(ndata - 1);
        columns.push(Column::new(KINETIC_ENERGY, raw(0)));
        columns.push(Column::new(EXPERIMENT, raw(2)));
        for (rank, i) in (3..ndata - 2).enumerate() {
            columns.push(Column::new(
                format!("{}{}", self.component_prefix, rank + 1),
                raw(i),
            ));
        }
        columns.push(Column::new(BACKGROUND, raw(ndata - 2)));
        columns.push(Column::new(ENVELOPE, raw(ndata - 1)));
        Table::new(raw(1), columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{report_file, REPORT};
    use float_eq::assert_float_eq;

    fn report(header: &str, rows: usize) -> String {
        let ndata = header.split('\t').count();
        let mut content = String::from("/data/o1s.vms\nO 1s\nAl 1486.6 eV\n");
        content.push_str(header);
        content.push('\n');
        for row in 0..rows {
            let values: Vec<String> = (0..ndata).map(|c| format!("{}.5", row * 10 + c)).collect();
            content.push_str(&values.join("\t"));
            content.push('\n');
        }
        content
    }

    #[test]
    fn column_names_from_header_width() {
        let header = "K.E.\tB.E.\tCounts\tC1\tC2\tC3\tC4\tBackground\tEnvelope";
        let file = report_file(&report(header, 3));
        let data = ReportReader::default().read(file.path()).unwrap();
        // ndata columns: the index plus ndata - 1 named ones
        assert_eq!(data.table().width() + 1, 9);
        assert_eq!(
            data.column_names(),
            vec!["KE", "Exp", "Comp_1", "Comp_2", "Comp_3", "Comp_4", "BG", "envelope"]
        );
        assert_eq!(data.table().len(), 3);
        assert_eq!(data.index(), &[1.5, 11.5, 21.5]);
        assert_eq!(data.column("KE").unwrap(), &[0.5, 10.5, 20.5]);
        assert_eq!(data.column("Exp").unwrap(), &[2.5, 12.5, 22.5]);
        assert_eq!(data.column("envelope").unwrap(), &[8.5, 18.5, 28.5]);
        assert_float_eq!(data.source(), 1486.6, abs <= 1e-9);
        assert_eq!(data.title, "O 1s");
        assert_eq!(data.path(), "/data/o1s.vms");
    }

    #[test]
    fn no_component() {
        let file = report_file(&report("K.E.\tB.E.\tCounts\tBackground\tEnvelope", 2));
        let data = ReportReader::default().read(file.path()).unwrap();
        assert_eq!(data.column_names(), vec!["KE", "Exp", "BG", "envelope"]);
    }

    #[test]
    fn header_too_narrow() {
        let file = report_file(&report("K.E.\tB.E.\tCounts\tEnvelope", 2));
        match ReportReader::default().read(file.path()) {
            Err(XpsError::Parse { line, .. }) => assert_eq!(line, 4),
            _ => panic!("Narrow header not detected"),
        }
    }

    #[test]
    fn missing_source() {
        let file = report_file("/data\nC 1s\nno energy here\nA\tB\tC\tD\tE\n1 2 3 4 5\n");
        match ReportReader::default().read(file.path()) {
            Err(XpsError::Parse { line, message, .. }) => {
                assert_eq!(line, 3);
                assert!(message.contains("no energy here"));
            }
            _ => panic!("Missing source not detected"),
        }
    }

    #[test]
    fn truncated_header() {
        let file = report_file("/data\nC 1s\n");
        match ReportReader::default().read(file.path()) {
            Err(XpsError::Parse { line, .. }) => assert_eq!(line, 3),
            _ => panic!("Truncated header not detected"),
        }
    }

    #[test]
    fn malformed_rows() {
        let mut content = report("K.E.\tB.E.\tCounts\tBackground\tEnvelope", 2);
        content.push_str("1.0\t2.0\tthree\t4.0\t5.0\n");
        let file = report_file(&content);
        match ReportReader::default().read(file.path()) {
            Err(XpsError::Parse { line, message, .. }) => {
                assert_eq!(line, 7);
                assert!(message.contains("'three'"));
            }
            _ => panic!("Malformed row not detected"),
        }

        let mut content = report("K.E.\tB.E.\tCounts\tBackground\tEnvelope", 1);
        content.push_str("1.0\t2.0\t3.0\n");
        let file = report_file(&content);
        match ReportReader::default().read(file.path()) {
            Err(XpsError::Parse { line, message, .. }) => {
                assert_eq!(line, 6);
                assert!(message.contains("expected 5 values, found 3"));
            }
            _ => panic!("Short row not detected"),
        }
    }

    #[test]
    fn blank_lines_and_comments_are_skipped() {
        let mut content = report("K.E.\tB.E.\tCounts\tBackground\tEnvelope", 2);
        content.push_str("\n# trailing comment\n\n");
        let file = report_file(&content);
        let data = ReportReader::default().read(file.path()).unwrap();
        assert_eq!(data.table().len(), 2);
    }

    #[test]
    fn header_only() {
        let file = report_file("/data\nC 1s\n1486.6\nA\tB\tC\tD\tE\n");
        assert!(matches!(
            ReportReader::default().read(file.path()),
            Err(XpsError::Parse { line: 5, .. })
        ));
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nothing.TXT");
        assert!(matches!(
            ReportReader::default().read(&path),
            Err(XpsError::FileNotFound(_))
        ));
    }

    #[test]
    fn reader_builder() {
        let mut builder = ReportReaderBuilder::default();
        builder
            .source_pattern(r"Source: (?P<value>\d+)")
            .component_prefix("peak ");
        let reader = builder.build().unwrap();
        let content = "/data\nN 1s\n1486.6 Source: 1253 eV\nA\tB\tC\tD\tE\tF\n\
                       1 2 3 4 5 6\n";
        let file = report_file(content);
        let data = reader.read(file.path()).unwrap();
        assert_float_eq!(data.source(), 1253.0, abs <= f64::EPSILON);
        assert_eq!(data.column_names(), vec!["KE", "Exp", "peak 1", "BG", "envelope"]);
    }

    #[test]
    fn invalid_source_pattern() {
        let mut builder = ReportReaderBuilder::default();
        builder.source_pattern("(unclosed");
        let reader = builder.build().unwrap();
        let file = report_file(REPORT);
        assert!(matches!(reader.read(file.path()), Err(XpsError::Pattern(_))));
    }
}
