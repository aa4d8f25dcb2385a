//! Append-only run log
//!
//! Every completed job leaves one record in `run_log.csv` next to its
//! output. The log is written through the [`AuditSink`] trait so the engine
//! itself holds no state between runs.

use crate::error::{Error, Result};
use crate::writer::UTF8_BOM;
use chrono::NaiveDateTime;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// File name of the run log inside the output directory
pub const RUN_LOG_FILE: &str = "run_log.csv";

const HEADER: [&str; 8] = [
    "Run At",
    "Config",
    "File A",
    "File B",
    "Output Rows",
    "Warnings",
    "Duplicates Removed",
    "Output File",
];

/// A record of one completed job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRecord {
    pub timestamp: NaiveDateTime,
    pub config_name: String,
    pub file_a: String,
    pub file_b: String,
    pub output_rows: usize,
    pub has_warnings: bool,
    pub removed: usize,
    pub output_file: String,
}

impl RunRecord {
    fn to_fields(&self) -> [String; 8] {
        [
            self.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            self.config_name.clone(),
            self.file_a.clone(),
            self.file_b.clone(),
            self.output_rows.to_string(),
            if self.has_warnings { "yes" } else { "no" }.to_string(),
            if self.removed > 0 {
                format!("{} rows", self.removed)
            } else {
                "none".to_string()
            },
            self.output_file.clone(),
        ]
    }
}

/// Destination for run records
pub trait AuditSink {
    fn append(&mut self, record: &RunRecord) -> Result<()>;
}

/// CSV run log; writes the BOM and header the first time the file is created
#[derive(Debug, Clone)]
pub struct CsvRunLog {
    path: PathBuf,
}

impl CsvRunLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The run log inside an output directory
    pub fn in_dir(output_dir: &Path) -> Self {
        Self::new(output_dir.join(RUN_LOG_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AuditSink for CsvRunLog {
    fn append(&mut self, record: &RunRecord) -> Result<()> {
        let io_err = |e| Error::FileWrite {
            path: self.path.clone(),
            source: e,
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(io_err)?;
        let is_new = file.metadata().map_err(io_err)?.len() == 0;
        if is_new {
            file.write_all(UTF8_BOM).map_err(io_err)?;
        }

        let mut writer = csv::Writer::from_writer(file);
        let csv_err = |e| Error::Csv {
            path: self.path.clone(),
            source: e,
        };
        if is_new {
            writer.write_record(HEADER).map_err(csv_err)?;
        }
        writer.write_record(record.to_fields()).map_err(csv_err)?;
        writer.flush().map_err(io_err)?;

        tracing::debug!(path = %self.path.display(), config = %record.config_name, "appended run record");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::fs;

    fn record(removed: usize, has_warnings: bool) -> RunRecord {
        RunRecord {
            timestamp: NaiveDate::from_ymd_opt(2024, 1, 2)
                .unwrap()
                .and_hms_opt(3, 4, 5)
                .unwrap(),
            config_name: "people".to_string(),
            file_a: "a.csv".to_string(),
            file_b: "b.csv".to_string(),
            output_rows: 2,
            has_warnings,
            removed,
            output_file: "people_20240102030405.csv".to_string(),
        }
    }

    #[test]
    fn test_header_written_once() {
        let dir = tempfile::tempdir().unwrap();
        let mut log = CsvRunLog::in_dir(dir.path());

        log.append(&record(0, false)).unwrap();
        log.append(&record(3, true)).unwrap();

        let bytes = fs::read(log.path()).unwrap();
        assert!(bytes.starts_with(UTF8_BOM));
        let text = String::from_utf8(bytes[UTF8_BOM.len()..].to_vec()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Run At,Config,File A,File B,Output Rows,Warnings,Duplicates Removed,Output File",
                "2024-01-02 03:04:05,people,a.csv,b.csv,2,no,none,people_20240102030405.csv",
                "2024-01-02 03:04:05,people,a.csv,b.csv,2,yes,3 rows,people_20240102030405.csv",
            ]
        );
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut log = CsvRunLog::in_dir(&dir.path().join("missing"));
        let err = log.append(&record(0, false)).unwrap_err();
        assert!(matches!(err, Error::FileWrite { .. }));
    }
}
