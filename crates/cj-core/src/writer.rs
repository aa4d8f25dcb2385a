//! CSV output for result tables
//!
//! Output files start with a UTF-8 byte-order mark so spreadsheet tools pick
//! the right encoding when opening them.

use crate::error::{Error, Result};
use crate::table::Table;
use chrono::NaiveDateTime;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// UTF-8 byte-order mark
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Write a table, header first, to a BOM-prefixed CSV file
pub fn write_table<P: AsRef<Path>>(table: &Table, path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| write_error(path, e))?;
    }

    let file = File::create(path).map_err(|e| write_error(path, e))?;
    let mut writer = BufWriter::new(file);
    writer.write_all(UTF8_BOM).map_err(|e| write_error(path, e))?;

    let mut csv_writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(writer);
    for row in table.rows() {
        csv_writer.write_record(row).map_err(|e| Error::Csv {
            path: path.to_path_buf(),
            source: e,
        })?;
    }
    csv_writer.flush().map_err(|e| write_error(path, e))?;

    tracing::info!(path = %path.display(), rows = table.row_count(), "wrote table");
    Ok(())
}

/// Output file name for a job run: spaces become underscores, followed by
/// a second-resolution timestamp
pub fn output_file_name(config_name: &str, timestamp: NaiveDateTime) -> String {
    format!(
        "{}_{}.csv",
        config_name.replace(' ', "_"),
        timestamp.format("%Y%m%d%H%M%S")
    )
}

fn write_error(path: &Path, source: std::io::Error) -> Error {
    Error::FileWrite {
        path: path.to_path_buf(),
        source,
    }
}
