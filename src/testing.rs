use std::io::Write;

use tempfile::NamedTempFile;

/// A C 1s report with two components.
pub(crate) const REPORT: &str = r"C:\Data\sample\C1s.vms
C 1s/1
Characteristic Energy eV	1486.61	Acquisition Time s	120.0
K.E.	B.E.	Counts	C 1s	C 1s	Background	Envelope
1196.61	290.00	1200.0	210.0	205.0	200.0	215.0
1197.61	289.00	1500.0	600.0	230.0	210.0	1040.0
1198.61	288.00	1100.0	300.0	700.0	220.0	1080.0
1199.61	287.00	400.0	240.0	260.0	230.0	270.0
";

pub(crate) fn report_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file.flush().unwrap();
    file
}
