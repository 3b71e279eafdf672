pub use self::report::{ReportReader, ReportReaderBuilder};

mod report;

use std::fs::File;
use std::io::{self, BufReader, ErrorKind};
use std::path::{Path, PathBuf};

use crate::error::{Result, XpsError};

/// Return io::BufRead from a path, falling back to using stdin if path is "-".
fn open_file(path: &Path) -> Result<Box<dyn io::BufRead>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }
    match File::open(path) {
        Ok(fd) => Ok(Box::new(BufReader::new(fd))),
        Err(error) if error.kind() == ErrorKind::NotFound => {
            Err(XpsError::FileNotFound(PathBuf::from(path)))
        }
        Err(error) => {
            error!("Could not open {}: {}", path.display(), error);
            Err(error.into())
        }
    }
}
